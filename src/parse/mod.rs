//! HTML extraction for the two upstream page shapes.
//!
//! Listing pages and article pages are parsed with [`scraper`] against the
//! selectors in [`crate::profile::ExtractionProfile`]. Article bodies are
//! first flattened into DOM-free [`ContentNode`]s so the byline scanner and
//! the block classifier can run as pure functions over a slice.

mod article;
mod byline;
mod content;
mod list;

pub use article::{parse_article, ParsedArticle};
pub use byline::{extract_byline, Byline};
pub use content::{classify, ContentNode};
pub use list::{discover_max_page, parse_list_page};

use scraper::ElementRef;

/// All text under an element, concatenated without trimming.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}
