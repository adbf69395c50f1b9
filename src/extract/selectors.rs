// src/extract/selectors.rs
// =============================================================================
// The markup contract of the target site, as CSS selectors.
//
// The defaults match the site this tool was written for. When the site's
// markup changes (or you point the tool at another site), drop a JSON file
// with just the keys you want to change and pass it with --selectors.
// =============================================================================

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// CSS selectors (and attribute names) used by the Extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorSet {
    /// Nested containers walked from the document root, outermost first.
    /// Each one is searched for inside the previous one.
    pub listing_path: Vec<String>,
    /// Repeated item inside the innermost container
    pub listing_item: String,
    /// Anchor inside each item
    pub listing_anchor: String,
    /// Attribute of the anchor holding the detail URL
    pub listing_attr: String,
    /// Repeated section on a detail page
    pub detail_section: String,
    /// Heading holding the display name (looked up in the LAST section)
    pub detail_heading: String,
    /// Element holding the image URL (looked up in the FIRST section)
    pub detail_image: String,
    /// Attribute of that element holding the image URL
    pub detail_attr: String,
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            listing_path: vec![
                "div.site-root".to_string(),
                "div.comp-jh51issm".to_string(),
                "ul.S4WbK_.uQ5Uah.c2Zj9x".to_string(),
            ],
            listing_item: "div.ETPbIy".to_string(),
            listing_anchor: "a.oQUvqL.x5qIv3".to_string(),
            listing_attr: "href".to_string(),
            detail_section: "section.EeCU_".to_string(),
            detail_heading: "h1._2qrJF.igTU-".to_string(),
            detail_image: "div._3j9OG.media-wrapper-hook.V-iTp".to_string(),
            detail_attr: "href".to_string(),
        }
    }
}

impl SelectorSet {
    /// Loads overrides from a JSON file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::filesystem(path, e))?;
        Self::from_json(&raw)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
