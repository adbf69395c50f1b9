// src/pipeline/mod.rs
// =============================================================================
// This module ties fetching, extraction and naming together into one run.
//
// Submodules:
// - run: the stages of a run and the concurrent fan-out/join
// - report: what a run produced (saved files, failures)
// =============================================================================

mod report;
mod run;

pub use report::{Failure, RunReport, Stage};
pub use run::{run, FailurePolicy, PipelineConfig};
