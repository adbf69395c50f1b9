// src/extract/mod.rs
// =============================================================================
// This module turns page HTML into data. Nothing in here touches the network
// or the filesystem: every function is `&str -> data`, so it can be tested
// against fixture HTML.
//
// Submodules:
// - selectors: the site-specific markup contract (CSS selectors)
// - listing: listing page -> detail page URLs
// - detail: detail page -> ImageRecord
// =============================================================================

mod detail;
mod listing;
mod selectors;

use scraper::Selector;

use crate::error::Error;

pub use selectors::SelectorSet;

/// What a detail page yields: where the image lives and what it is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub url: String,
    pub display_name: String,
}

/// Compiled selectors for one run.
///
/// Built once from a SelectorSet, then shared by reference with every
/// concurrent detail task.
#[derive(Debug)]
pub struct Extractor {
    listing_path: Vec<(String, Selector)>,
    listing_item: (String, Selector),
    listing_anchor: (String, Selector),
    listing_attr: String,
    detail_section: (String, Selector),
    detail_heading: (String, Selector),
    detail_image: (String, Selector),
    detail_attr: String,
}

impl Extractor {
    /// Compiles every selector; an invalid one is a configuration error.
    pub fn new(set: &SelectorSet) -> Result<Self, Error> {
        Ok(Self {
            listing_path: set
                .listing_path
                .iter()
                .map(|s| compile(s))
                .collect::<Result<_, _>>()?,
            listing_item: compile(&set.listing_item)?,
            listing_anchor: compile(&set.listing_anchor)?,
            listing_attr: set.listing_attr.clone(),
            detail_section: compile(&set.detail_section)?,
            detail_heading: compile(&set.detail_heading)?,
            detail_image: compile(&set.detail_image)?,
            detail_attr: set.detail_attr.clone(),
        })
    }
}

// Keeps the source text next to the compiled selector for error messages
fn compile(css: &str) -> Result<(String, Selector), Error> {
    Selector::parse(css)
        .map(|selector| (css.to_string(), selector))
        .map_err(|e| Error::Config(format!("invalid selector '{}': {}", css, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selectors_compile() {
        assert!(Extractor::new(&SelectorSet::default()).is_ok());
    }

    #[test]
    fn test_invalid_selector_is_config_error() {
        let set = SelectorSet {
            detail_heading: "h1[".to_string(),
            ..SelectorSet::default()
        };
        let err = Extractor::new(&set).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("h1[")));
    }
}
