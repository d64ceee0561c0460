//! Article detail page extraction.
//!
//! Pulls the headline block (title, date, source) off the page, flattens
//! the content region into [`ContentNode`]s, runs the byline scan over the
//! full run, then applies the profile's terminus so the classifier only
//! sees body content.

use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{NewsError, Result};
use crate::profile::{ContentTerminus, ExtractionProfile};

use super::byline::{extract_byline, Byline};
use super::content::ContentNode;
use super::element_text;

/// Everything a detail page yields before block classification.
#[derive(Debug, Clone, Default)]
pub struct ParsedArticle {
    pub title: String,

    /// Publication date, already validated as `YYYY-MM-DD`.
    pub date: String,

    /// Attributed source, defaulted to the publisher when the page leaves
    /// it blank.
    pub source: String,

    pub byline: Byline,

    /// Body nodes with the profile's terminus already applied.
    pub content: Vec<ContentNode>,
}

/// Extract an article from its detail page.
///
/// Title, date and source are structural: a page missing any of them is
/// reported as [`NewsError::UpstreamShape`]. The content region and the
/// byline are soft; a page without them yields an empty body.
pub fn parse_article(
    html: &str,
    profile: &ExtractionProfile,
    publisher: &str,
) -> Result<ParsedArticle> {
    let date_re = Regex::new(r"日期： *(\d{4}-\d{2}-\d{2})").unwrap();
    let source_re = Regex::new(r"稿件来源： *(.*)").unwrap();
    let doc = Html::parse_document(html);

    let Some(title_el) = doc.select(&profile.article_title).next() else {
        return Err(NewsError::UpstreamShape(
            "article page without a title element".into(),
        ));
    };
    let title = element_text(title_el).trim().to_string();

    let Some(date_el) = doc.select(&profile.article_date).next() else {
        return Err(NewsError::UpstreamShape(
            "article page without a date element".into(),
        ));
    };
    let date_text = element_text(date_el);
    let Some(date_caps) = date_re.captures(date_text.trim()) else {
        return Err(NewsError::UpstreamShape(format!(
            "unrecognized date line: {}",
            date_text.trim()
        )));
    };
    let date = date_caps[1].to_string();
    if NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
        return Err(NewsError::UpstreamShape(format!(
            "impossible calendar date: {date}"
        )));
    }

    let Some(source_el) = doc.select(&profile.article_source).next() else {
        return Err(NewsError::UpstreamShape(
            "article page without a source element".into(),
        ));
    };
    let source_text = element_text(source_el);
    let Some(source_caps) = source_re.captures(source_text.trim()) else {
        return Err(NewsError::UpstreamShape(format!(
            "unrecognized source line: {}",
            source_text.trim()
        )));
    };
    let source = match source_caps[1].trim() {
        "" => publisher.to_string(),
        name => name.to_string(),
    };

    let img_sel = Selector::parse("img").unwrap();
    let span_sel = Selector::parse("span").unwrap();
    let mut nodes = Vec::new();
    let mut foot = None;
    if let Some(region) = doc.select(&profile.content_region).next() {
        for child in region.children().filter_map(ElementRef::wrap) {
            if child.value().name() == "p" {
                foot = Some(nodes.len());
            }
            nodes.push(ContentNode {
                text: element_text(child),
                is_image_wrapper: child.value().classes().any(|c| c == profile.image_class),
                image_src: child
                    .select(&img_sel)
                    .next()
                    .and_then(|img| img.value().attr("src").map(str::to_string)),
                style: child.value().attr("style").map(str::to_string),
                has_span: child.select(&span_sel).next().is_some(),
            });
        }
    }

    // The byline lives at the tail of the region, so it has to be read
    // before the terminus cuts the run down to body content.
    let byline = extract_byline(&nodes, foot);

    let cut = match profile.terminus {
        ContentTerminus::FootElement => foot.unwrap_or(nodes.len()),
        ContentTerminus::SiblingsEnd => nodes.len(),
    };
    nodes.truncate(cut);

    debug!(nodes = nodes.len(), "parsed article page");
    Ok(ParsedArticle {
        title,
        date,
        source,
        byline,
        content: nodes,
    })
}
