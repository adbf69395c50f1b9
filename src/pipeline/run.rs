// src/pipeline/run.rs
// =============================================================================
// The harvesting run, start to finish.
//
// How it works:
// 1. Make sure the save directory exists
// 2. Fetch the listing page                       (fatal on failure)
// 3. Extract the detail page URLs                 (fatal on failure)
// 4. For every URL, concurrently: fetch page -> extract ImageRecord
// 5. For every record, concurrently: fetch image bytes -> write file
//
// Stages 4 and 5 are join barriers: stage 5 starts only once every stage 4
// task has finished.
//
// All tasks of a stage run on the current task, interleaved by the
// stream combinators (no tokio::spawn). Parsing and slugifying happen
// between awaits; the only suspension points are the fetches and the write.
// =============================================================================

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, warn};
use url::Url;

use super::report::{Failure, RunReport, SavedFile, Stage};
use crate::error::{Error, Result, TransportError};
use crate::extract::{Extractor, ImageRecord, SelectorSet};
use crate::fetch::Fetcher;
use crate::naming;

/// What happens when a single detail page or download fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the failure, keep going, report it at the end
    #[default]
    BestEffort,
    /// Drop every in-flight sibling and abort the run
    FailFast,
}

/// Everything a run needs. Passed in explicitly; nothing is global.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The listing page
    pub base_url: Url,
    /// Where images are written (created if missing)
    pub save_dir: PathBuf,
    pub selectors: SelectorSet,
    /// Per-request timeout
    pub timeout: Duration,
    /// Max in-flight tasks per stage
    pub concurrency: usize,
    pub policy: FailurePolicy,
    /// Optional limit on the whole run
    pub deadline: Option<Duration>,
}

impl PipelineConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_CONCURRENCY: usize = 50;

    /// Config with default selectors, timeout and concurrency.
    pub fn new(base_url: Url, save_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url,
            save_dir: save_dir.into(),
            selectors: SelectorSet::default(),
            timeout: Self::DEFAULT_TIMEOUT,
            concurrency: Self::DEFAULT_CONCURRENCY,
            policy: FailurePolicy::default(),
            deadline: None,
        }
    }
}

// A record together with the detail page it came from
#[derive(Debug)]
struct Harvested {
    detail_url: String,
    record: ImageRecord,
}

// Failed task: the URL to blame plus the error
type TaskError = (String, Error);

/// Runs the whole pipeline once.
///
/// Returns Err only for fatal conditions (listing stage, save directory,
/// fail-fast abort, deadline). Per-item failures under the best-effort
/// policy end up in the report instead.
pub async fn run(config: &PipelineConfig) -> Result<RunReport> {
    match config.deadline {
        Some(limit) => tokio::time::timeout(limit, harvest(config))
            .await
            .map_err(|_| Error::DeadlineExceeded(limit))?,
        None => harvest(config).await,
    }
}

async fn harvest(config: &PipelineConfig) -> Result<RunReport> {
    // Fail on bad selectors before any I/O
    let extractor = Extractor::new(&config.selectors)?;
    let fetcher = Fetcher::new(config.timeout)?;

    tokio::fs::create_dir_all(&config.save_dir)
        .await
        .map_err(|e| Error::filesystem(&config.save_dir, e))?;

    info!(url = %config.base_url, "fetching listing page");
    let listing = fetcher.fetch_text(config.base_url.as_str()).await?;
    let hrefs = extractor.detail_urls(&listing)?;
    info!(count = hrefs.len(), "discovered detail pages");

    let mut report = RunReport {
        discovered: hrefs.len(),
        ..RunReport::default()
    };

    // Stage 4: detail pages
    let detail_tasks = hrefs
        .into_iter()
        .map(|href| detail_task(&fetcher, &extractor, &config.base_url, href));
    let detail_outcomes =
        join_stage(Stage::Detail, detail_tasks, config.concurrency, config.policy).await?;

    let mut harvested = Vec::with_capacity(detail_outcomes.len());
    for outcome in detail_outcomes {
        match outcome {
            Ok(item) => harvested.push(item),
            Err(failure) => report.failures.push(failure),
        }
    }
    info!(
        records = harvested.len(),
        failed = report.failures.len(),
        "detail stage finished"
    );

    warn_on_collisions(&config.save_dir, &harvested);

    // Stage 5: downloads
    let download_tasks = harvested
        .into_iter()
        .map(|item| download_task(&fetcher, &config.save_dir, item));
    let download_outcomes =
        join_stage(Stage::Download, download_tasks, config.concurrency, config.policy).await?;

    for outcome in download_outcomes {
        match outcome {
            Ok(saved) => report.saved.push(saved),
            Err(failure) => report.failures.push(failure),
        }
    }
    info!(
        saved = report.saved.len(),
        failed = report.failures.len(),
        "run finished"
    );

    Ok(report)
}

// Resolves the href, fetches the detail page and pulls the record out of it
async fn detail_task(
    fetcher: &Fetcher,
    extractor: &Extractor,
    base: &Url,
    href: String,
) -> Result<Harvested, TaskError> {
    let detail_url = resolve(base, &href).map_err(|e| (href, Error::from(e)))?;
    let blame = detail_url.to_string();

    let html = fetcher
        .fetch_text(detail_url.as_str())
        .await
        .map_err(|e| (blame.clone(), Error::from(e)))?;
    let record = extractor
        .image_record(&html)
        .map_err(|e| (blame.clone(), Error::from(e)))?;

    // The image href may be relative to the detail page
    let image_url =
        resolve(&detail_url, &record.url).map_err(|e| (blame.clone(), Error::from(e)))?;
    debug!(
        detail = %detail_url,
        image = %image_url,
        name = %record.display_name,
        "extracted record"
    );

    Ok(Harvested {
        detail_url: blame,
        record: ImageRecord {
            url: image_url.to_string(),
            display_name: record.display_name,
        },
    })
}

// Fetches the image and writes it under its slugified name
async fn download_task(
    fetcher: &Fetcher,
    save_dir: &Path,
    item: Harvested,
) -> Result<SavedFile, TaskError> {
    let path = naming::output_path(save_dir, &item.record.display_name);

    let written = async {
        let bytes = fetcher.fetch_bytes(&item.record.url).await?;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| Error::filesystem(&path, e))?;
        Ok::<_, Error>(bytes.len())
    }
    .await;

    match written {
        Ok(bytes) => {
            debug!(path = %path.display(), bytes, "saved image");
            Ok(SavedFile {
                detail_url: item.detail_url,
                image_url: item.record.url,
                display_name: item.record.display_name,
                path,
                bytes,
            })
        }
        Err(e) => Err((item.detail_url, e)),
    }
}

// Runs one stage's tasks concurrently and waits for all of them.
//
// Results come back in launch order whatever order the tasks finished in.
// Under FailFast the first failure returns immediately; dropping the stream
// drops (cancels) every task still in flight.
async fn join_stage<T, F>(
    stage: Stage,
    tasks: impl Iterator<Item = F>,
    concurrency: usize,
    policy: FailurePolicy,
) -> Result<Vec<Result<T, Failure>>>
where
    F: Future<Output = Result<T, TaskError>>,
{
    let in_flight = stream::iter(tasks.enumerate().map(|(index, task)| async move {
        (index, task.await)
    }))
    .buffer_unordered(concurrency.max(1));

    let mut outcomes: Vec<(usize, Result<T, Failure>)> = match policy {
        FailurePolicy::BestEffort => {
            in_flight
                .map(|(index, result)| (index, result.map_err(|(url, e)| failure(stage, url, e))))
                .collect::<Vec<_>>()
                .await
        }
        FailurePolicy::FailFast => {
            in_flight
                .map(|(index, result)| match result {
                    Ok(value) => Ok((index, Ok(value))),
                    Err((url, e)) => Err(Error::Aborted {
                        stage,
                        url,
                        source: Box::new(e),
                    }),
                })
                .try_collect::<Vec<_>>()
                .await?
        }
    };

    outcomes.sort_by_key(|(index, _)| *index);
    Ok(outcomes.into_iter().map(|(_, outcome)| outcome).collect())
}

fn failure(stage: Stage, url: String, error: Error) -> Failure {
    warn!(%stage, %url, error = %error, "item failed");
    Failure {
        stage,
        url,
        reason: error.to_string(),
    }
}

fn resolve(base: &Url, href: &str) -> std::result::Result<Url, TransportError> {
    base.join(href).map_err(|e| TransportError::InvalidUrl {
        url: href.to_string(),
        reason: e.to_string(),
    })
}

// Distinct display names can slugify to the same file; the last write wins
fn warn_on_collisions(save_dir: &Path, harvested: &[Harvested]) {
    let mut by_path: HashMap<PathBuf, Vec<&str>> = HashMap::new();
    for item in harvested {
        by_path
            .entry(naming::output_path(save_dir, &item.record.display_name))
            .or_default()
            .push(&item.record.display_name);
    }

    for (path, names) in by_path.iter().filter(|(_, names)| names.len() > 1) {
        warn!(
            path = %path.display(),
            names = ?names,
            "several records map to the same file, last write wins"
        );
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why buffer_unordered + sort instead of buffered?
//    - buffered(n) yields in order, so a slow first task would hold back a
//      failure further down the list; fail-fast wants the first failure to
//      complete, not the first in document order
//    - Tagging each task with its index lets us restore listing order after
//
// 2. Why no tokio::spawn?
//    - The tasks borrow the fetcher, the extractor and the config
//    - Everything here waits on I/O, so interleaving on one task is enough
// -----------------------------------------------------------------------------
