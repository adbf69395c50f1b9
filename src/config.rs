// src/config.rs
// =============================================================================
// Turns parsed command-line flags into a PipelineConfig.
//
// clap has already read the flags (and BASE_URL / SAVE_DIR from the
// environment or .env). Here we check the values that clap can't check for
// us and load the optional selector file.
//
// Rust concepts:
// - impl blocks: adding a method to a type defined in another module
// - Struct update syntax: `..PipelineConfig::new(..)` fills the other fields
// =============================================================================

use std::time::Duration;

use url::Url;

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::extract::SelectorSet;
use crate::pipeline::{FailurePolicy, PipelineConfig};

impl Cli {
    /// Validates the base URL and loads the selector overrides.
    pub fn to_pipeline_config(&self) -> Result<PipelineConfig> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid base URL '{}': {}", self.base_url, e)))?;

        // No file means the built-in selectors for the original site
        let selectors = match &self.selectors {
            Some(path) => SelectorSet::from_file(path)?,
            None => SelectorSet::default(),
        };

        // Zero would mean "no task may run" or "every request times out at once"
        if self.concurrency == 0 {
            return Err(Error::Config("concurrency must be at least 1".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout must be at least 1 second".to_string()));
        }
        if self.deadline_secs == Some(0) {
            return Err(Error::Config("deadline must be at least 1 second".to_string()));
        }

        Ok(PipelineConfig {
            selectors,
            timeout: Duration::from_secs(self.timeout_secs),
            concurrency: self.concurrency,
            policy: if self.fail_fast {
                FailurePolicy::FailFast
            } else {
                FailurePolicy::BestEffort
            },
            deadline: self.deadline_secs.map(Duration::from_secs),
            ..PipelineConfig::new(base_url, self.save_dir.clone())
        })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not let clap parse the URL directly?
//    - It could, but a clap error would stop the program inside Cli::parse()
//    - Doing it here gives us our own Error::Config and exit code 2
//
// 2. What does Duration::from_secs do?
//    - Builds a std::time::Duration from whole seconds
//    - Option::map(Duration::from_secs) converts Some(90) into Some(90s)
//      and leaves None alone
// -----------------------------------------------------------------------------
