// src/extract/listing.rs
// =============================================================================
// Listing page -> detail page URLs.
//
// The listing page has one nested container holding a repeated item per
// detail page. We walk the container path, then take the anchor href of each
// item, in document order.
//
// Any missing step on the way is fatal for the whole run: an empty result
// caused by a markup change would look exactly like "nothing to download".
// =============================================================================

use scraper::{ElementRef, Html};

use super::Extractor;
use crate::error::StructureNotFound;

impl Extractor {
    /// Returns the raw href of every listing item, in document order.
    ///
    /// The hrefs are returned as found (possibly relative); resolving them
    /// against the listing URL is the pipeline's job.
    pub fn detail_urls(&self, listing_html: &str) -> Result<Vec<String>, StructureNotFound> {
        let document = Html::parse_document(listing_html);

        // Walk the container path, each step inside the previous one
        let mut container: ElementRef = document.root_element();
        for (css, selector) in &self.listing_path {
            container = container
                .select(selector)
                .next()
                .ok_or_else(|| StructureNotFound::listing(css.as_str()))?;
        }

        let (item_css, item_selector) = &self.listing_item;
        let (anchor_css, anchor_selector) = &self.listing_anchor;

        container
            .select(item_selector)
            .map(|item| -> Result<String, StructureNotFound> {
                let anchor = item.select(anchor_selector).next().ok_or_else(|| {
                    StructureNotFound::listing(format!("{} {}", item_css, anchor_css))
                })?;

                anchor
                    .value()
                    .attr(&self.listing_attr)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        StructureNotFound::listing(format!("{}[{}]", anchor_css, self.listing_attr))
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::SelectorSet;
    use super::*;

    fn extractor() -> Extractor {
        Extractor::new(&SelectorSet::default()).unwrap()
    }

    fn listing(items: &str) -> String {
        format!(
            r#"<html><body>
            <div class="site-root">
              <div class="comp-jh51issm">
                <ul class="S4WbK_ uQ5Uah c2Zj9x">{}</ul>
              </div>
            </div>
            </body></html>"#,
            items
        )
    }

    fn item(href: &str) -> String {
        format!(
            r#"<li><div class="ETPbIy"><a class="oQUvqL x5qIv3" href="{}">more</a></div></li>"#,
            href
        )
    }

    #[test]
    fn test_urls_in_document_order() {
        let html = listing(&format!("{}{}{}", item("/a"), item("/b"), item("/c")));
        let urls = extractor().detail_urls(&html).unwrap();
        assert_eq!(urls, vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let html = listing(&format!("{}{}", item("/a"), item("/a")));
        assert_eq!(extractor().detail_urls(&html).unwrap(), vec!["/a", "/a"]);
    }

    #[test]
    fn test_anchors_outside_container_are_ignored() {
        let html = format!(
            r#"<div class="ETPbIy"><a class="oQUvqL x5qIv3" href="/outside">x</a></div>{}"#,
            listing(&item("/inside"))
        );
        assert_eq!(extractor().detail_urls(&html).unwrap(), vec!["/inside"]);
    }

    #[test]
    fn test_empty_container_yields_no_urls() {
        let urls = extractor().detail_urls(&listing("")).unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn test_missing_container_is_structure_error() {
        let html = r#"<div class="site-root"><p>redesigned!</p></div>"#;
        let err = extractor().detail_urls(html).unwrap_err();
        assert_eq!(err, StructureNotFound::listing("div.comp-jh51issm"));
    }

    #[test]
    fn test_item_without_anchor_is_structure_error() {
        let html = listing(r#"<div class="ETPbIy"><span>no link</span></div>"#);
        let err = extractor().detail_urls(&html).unwrap_err();
        assert_eq!(err.page, "listing");
    }

    #[test]
    fn test_anchor_without_href_is_structure_error() {
        let html = listing(r#"<div class="ETPbIy"><a class="oQUvqL x5qIv3">x</a></div>"#);
        let err = extractor().detail_urls(&html).unwrap_err();
        assert!(err.element.contains("[href]"));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let html = listing(&format!("{}{}", item("/a"), item("/b")));
        let ex = extractor();
        assert_eq!(ex.detail_urls(&html).unwrap(), ex.detail_urls(&html).unwrap());
    }
}
