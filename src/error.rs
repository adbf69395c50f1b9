// src/error.rs
// =============================================================================
// Error types for the harvesting pipeline.
//
// Three families of failure can happen during a run:
// - TransportError: the network let us down (or the server answered non-2xx)
// - StructureNotFound: the HTML did not have the shape we expected
// - Filesystem: we could not create the save directory or write a file
//
// On top of that the run itself can be cut short (fail-fast abort, overall
// deadline, Ctrl-C).
//
// main.rs turns these into anyhow errors at the very edge of the program,
// everything below it works with these typed errors.
// =============================================================================

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::pipeline::Stage;

/// Failure of a single HTTP GET.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with a 2xx status
    #[error("{url} answered HTTP {}", .status.as_u16())]
    Status { url: String, status: StatusCode },

    /// The per-request deadline expired
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// An href could not be turned into an absolute URL
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl TransportError {
    /// Sorts a reqwest error into a timeout or a generic request failure.
    pub fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            TransportError::Timeout {
                url: url.to_string(),
            }
        } else {
            TransportError::Request {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// An element the markup contract requires is missing from a page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("structure not found on {page} page: {element}")]
pub struct StructureNotFound {
    /// "listing" or "detail"
    pub page: &'static str,
    /// Human-readable description of what was missing (usually the selector)
    pub element: String,
}

impl StructureNotFound {
    pub fn listing(element: impl Into<String>) -> Self {
        Self {
            page: "listing",
            element: element.into(),
        }
    }

    pub fn detail(element: impl Into<String>) -> Self {
        Self {
            page: "detail",
            element: element.into(),
        }
    }
}

/// Top-level error of a harvesting run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Structure(#[from] StructureNotFound),

    #[error("filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bad configuration (invalid selector, unreadable selector file, ...)
    #[error("configuration error: {0}")]
    Config(String),

    /// Fail-fast policy: one item failed, so the whole batch was dropped
    #[error("{stage} stage aborted on {url}: {source}")]
    Aborted {
        stage: Stage,
        url: String,
        #[source]
        source: Box<Error>,
    },

    #[error("run exceeded its deadline of {0:?}")]
    DeadlineExceeded(std::time::Duration),

    #[error("run interrupted")]
    Interrupted,
}

impl Error {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
