// src/extract/detail.rs
// =============================================================================
// Detail page -> ImageRecord.
//
// The page repeats one kind of section. The display name is the heading of
// the LAST section, the image URL sits on an element of the FIRST section.
// With a single section both lookups happen in that section.
//
// Rust concepts:
// - Slices: sections.first() / sections.last() return Option<&T>
// - Iterators: .text() yields every text node under an element
// - Option -> Result: .ok_or_else() turns "not found" into an error
// =============================================================================

use scraper::Html;

use super::{Extractor, ImageRecord};
use crate::error::StructureNotFound;

impl Extractor {
    /// Pulls the image URL and display name out of one detail page.
    ///
    /// The URL is returned as found (possibly relative); the pipeline
    /// resolves it against the detail page URL.
    pub fn image_record(&self, detail_html: &str) -> Result<ImageRecord, StructureNotFound> {
        let document = Html::parse_document(detail_html);

        // Collect every matching section so we can index from both ends
        let (section_css, section_selector) = &self.detail_section;
        let sections: Vec<_> = document.select(section_selector).collect();
        let (first, last) = match (sections.first(), sections.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(StructureNotFound::detail(section_css.as_str())),
        };

        let (heading_css, heading_selector) = &self.detail_heading;
        let heading = last.select(heading_selector).next().ok_or_else(|| {
            StructureNotFound::detail(format!("{} (last) {}", section_css, heading_css))
        })?;
        // The heading may contain nested tags; join all of its text
        let display_name = heading.text().collect::<String>().trim().to_string();

        // The image holder is not an <img>: the URL lives in an attribute
        let (image_css, image_selector) = &self.detail_image;
        let url = first
            .select(image_selector)
            .next()
            .and_then(|holder| holder.value().attr(&self.detail_attr))
            .ok_or_else(|| {
                StructureNotFound::detail(format!(
                    "{} (first) {}[{}]",
                    section_css, image_css, self.detail_attr
                ))
            })?
            .to_string();

        Ok(ImageRecord { url, display_name })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why collect the sections into a Vec?
//    - document.select() is an iterator; it can only be walked forward once
//    - We need both the first and the last match, so we keep them all
//    - With one section, first() and last() point at the same element
//
// 2. What does .text() return?
//    - An iterator over the text nodes inside the element, in order
//    - "<h1> Engine <span>One</span> </h1>" gives " Engine ", "One", " "
//    - collect::<String>() joins them, trim() drops the outer whitespace
//
// 3. Why .and_then() before .ok_or_else()?
//    - The holder element might be missing, OR present without the attribute
//    - and_then chains both Option steps; one error covers both cases
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::super::SelectorSet;
    use super::*;

    fn extractor() -> Extractor {
        Extractor::new(&SelectorSet::default()).unwrap()
    }

    const IMAGE_SECTION: &str = r#"
        <section class="EeCU_">
          <div class="_3j9OG media-wrapper-hook V-iTp" href="http://img/1.jpg"></div>
          <h1 class="_2qrJF igTU-">Decoy Heading</h1>
        </section>"#;

    const NAME_SECTION: &str = r#"
        <section class="EeCU_">
          <div class="_3j9OG media-wrapper-hook V-iTp" href="http://img/decoy.jpg"></div>
          <h1 class="_2qrJF igTU-">
             Engine <span>One</span>
          </h1>
        </section>"#;

    #[test]
    fn test_name_from_last_image_from_first() {
        let html = format!("<html><body>{}{}</body></html>", IMAGE_SECTION, NAME_SECTION);
        let record = extractor().image_record(&html).unwrap();
        assert_eq!(
            record,
            ImageRecord {
                url: "http://img/1.jpg".to_string(),
                display_name: "Engine One".to_string(),
            }
        );
    }

    #[test]
    fn test_single_section_serves_both_lookups() {
        let html = format!("<html><body>{}</body></html>", IMAGE_SECTION);
        let record = extractor().image_record(&html).unwrap();
        assert_eq!(record.url, "http://img/1.jpg");
        assert_eq!(record.display_name, "Decoy Heading");
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let html = format!("<html><body>{}{}</body></html>", IMAGE_SECTION, NAME_SECTION);
        let ex = extractor();
        assert_eq!(ex.image_record(&html).unwrap(), ex.image_record(&html).unwrap());
    }

    #[test]
    fn test_no_sections_is_structure_error() {
        let err = extractor().image_record("<html><body><p>gone</p></body></html>").unwrap_err();
        assert_eq!(err, StructureNotFound::detail("section.EeCU_"));
    }

    #[test]
    fn test_last_section_without_heading_is_structure_error() {
        let html = format!(
            r#"{}<section class="EeCU_"><p>footer</p></section>"#,
            IMAGE_SECTION
        );
        let err = extractor().image_record(&html).unwrap_err();
        assert!(err.element.contains("(last)"));
    }

    #[test]
    fn test_image_holder_without_href_is_structure_error() {
        let html = r#"
            <section class="EeCU_"><div class="_3j9OG media-wrapper-hook V-iTp"></div></section>
            <section class="EeCU_"><h1 class="_2qrJF igTU-">Name</h1></section>"#;
        let err = extractor().image_record(html).unwrap_err();
        assert!(err.element.contains("(first)"));
    }
}
