// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every required value can also come from the environment (BASE_URL,
// SAVE_DIR), and main.rs loads a .env file first, so a plain
// `image-harvester` works once .env is in place.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::PipelineConfig;

/// Scrape a listing page, follow every detail page and download its image.
#[derive(Parser, Debug)]
#[command(
    name = "image-harvester",
    version,
    about = "Downloads one image from every detail page linked on a listing page",
    long_about = "image-harvester fetches a listing page, follows every detail page it links to, \
                  pulls one image URL and a display name from each, and saves the images as \
                  <save-dir>/<slugified-name>.jpg."
)]
pub struct Cli {
    /// Listing page to start from
    #[arg(long, env = "BASE_URL")]
    pub base_url: String,

    /// Directory the images are written to (created if missing)
    #[arg(long, env = "SAVE_DIR")]
    pub save_dir: PathBuf,

    /// JSON file overriding the built-in CSS selectors
    #[arg(long, env = "SELECTORS_FILE")]
    pub selectors: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Give up on the whole run after this many seconds
    #[arg(long)]
    pub deadline_secs: Option<u64>,

    /// Max concurrent requests per stage
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Abort the run on the first failed detail page or download
    #[arg(long)]
    pub fail_fast: bool,

    /// Output the report as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_parse() {
        let cli = Cli::try_parse_from([
            "image-harvester",
            "--base-url",
            "https://example.com/engines",
            "--save-dir",
            "out",
            "--fail-fast",
            "--concurrency",
            "4",
        ])
        .unwrap();

        assert_eq!(cli.base_url, "https://example.com/engines");
        assert_eq!(cli.save_dir, PathBuf::from("out"));
        assert!(cli.fail_fast);
        assert_eq!(cli.concurrency, 4);
        assert_eq!(cli.timeout_secs, 30);
        assert_eq!(cli.deadline_secs, None);
    }
}
