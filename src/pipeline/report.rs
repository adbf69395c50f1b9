// src/pipeline/report.rs
// =============================================================================
// What a run produced: how many detail pages were discovered, which files
// were written, and which items failed (and why).
//
// Everything here derives Serialize so main.rs can print it as JSON.
// =============================================================================

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// The per-item stages of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Fetching and parsing a detail page
    Detail,
    /// Fetching an image and writing it to disk
    Download,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Detail => write!(f, "detail"),
            Stage::Download => write!(f, "download"),
        }
    }
}

/// One image written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedFile {
    /// Detail page the image was found on
    pub detail_url: String,
    pub image_url: String,
    pub display_name: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// One item that did not make it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub stage: Stage,
    /// The detail page URL the item came from
    pub url: String,
    pub reason: String,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Number of detail URLs found on the listing page
    pub discovered: usize,
    /// Files written, in listing order
    pub saved: Vec<SavedFile>,
    /// Items that failed, in listing order
    pub failures: Vec<Failure>,
}

impl RunReport {
    /// True when every discovered item ended up on disk.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
