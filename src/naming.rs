// src/naming.rs
// =============================================================================
// Turns a display name into the file the image is saved to.
//
// "Engine One"  -> "engine-one.jpg"
// "Café Crème!" -> "cafe-creme.jpg"
//
// The mapping is deterministic, so two records with the same display name
// (or names that slugify the same) end up at the same path. The pipeline
// warns about that; the later write wins.
//
// Rust concepts:
// - &Path vs PathBuf: borrowed path in, owned path out (like &str / String)
// - Shadowing: `let stem = ...` twice reuses the name for the cleaned value
// =============================================================================

use std::path::{Path, PathBuf};

/// Every saved image gets this extension, whatever the server sent.
pub const EXTENSION: &str = "jpg";

/// Used when a display name has no characters that survive slugification.
const FALLBACK_STEM: &str = "untitled";

/// Slugifies `display_name` and appends the fixed extension.
pub fn file_name(display_name: &str) -> String {
    // slugify lowercases, transliterates (é -> e) and joins words with '-'
    let stem = slug::slugify(display_name);
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem.as_str() };
    format!("{}.{}", stem, EXTENSION)
}

/// Full output path for a display name inside `save_dir`.
pub fn output_path(save_dir: &Path, display_name: &str) -> PathBuf {
    save_dir.join(file_name(display_name))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a slug?
//    - A lowercase, dash-separated version of a name: "Engine One" -> "engine-one"
//    - It only contains a-z, 0-9 and '-', so it is safe as a file name
//    - The `slug` crate uses `deunicode` to turn "Crème" into "creme"
//
// 2. Why Path::join instead of format!("{}/{}", ...)?
//    - join uses the right separator for the platform
//    - The slug never contains '/', so the file can't escape save_dir
// -----------------------------------------------------------------------------
