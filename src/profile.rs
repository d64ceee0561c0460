//! Extraction profiles: structural anchors for one generation of the
//! upstream template.
//!
//! The upstream CMS has shipped more than one list/detail template over the
//! years. Instead of scattering selector and pattern literals through the
//! parsers, each template generation is described by one declarative
//! profile; a deployment picks its profile once, in configuration, and
//! never auto-detects.

use scraper::Selector;
use serde::{Deserialize, Serialize};

/// Which upstream template generation a deployment scrapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVariant {
    /// The multi-category template in production since the site redesign.
    #[default]
    Current,

    /// The single-category template that predates it.
    Legacy,
}

/// Where the body-content walk stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentTerminus {
    /// Stop at the byline foot; the trailing editor line stays out of the
    /// body.
    FootElement,

    /// Walk every child; the trailing editor line lands in the body
    /// verbatim, as the old deployment served it.
    SiblingsEnd,
}

/// Compiled structural anchors for one template generation.
///
/// Selectors are parsed once here; the parsers borrow the profile.
#[derive(Debug, Clone)]
pub struct ExtractionProfile {
    pub variant: TemplateVariant,

    /// Listing rows, document order = recency order.
    pub list_rows: Selector,
    /// Link anchor within a row.
    pub row_link: Selector,
    /// Day-of-month element within a row.
    pub row_day: Selector,
    /// Month element within a row; carries `YYYY-MM` on the current
    /// template, bare `MM` on the legacy one.
    pub row_month: Selector,
    /// Headline element within a row.
    pub row_title: Selector,
    /// Teaser element within a row.
    pub row_summary: Selector,
    /// Next-page navigation anchor on the main listing page.
    pub next_page: Selector,

    /// Article headline element.
    pub article_title: Selector,
    /// Element whose text carries the `日期：` line.
    pub article_date: Selector,
    /// Element whose text carries the `稿件来源：` line.
    pub article_source: Selector,
    /// Container whose element children form the body run.
    pub content_region: Selector,

    /// Class marking a body child that wraps an illustration.
    pub image_class: &'static str,
    /// Text prefix marking an embedded-player invocation.
    pub video_marker: &'static str,
    /// Where the body walk stops.
    pub terminus: ContentTerminus,
}

const DETAIL_FORM: &str = "body > div.list-show.wrap > div.list_right > form";

fn sel(selector: &str) -> Selector {
    Selector::parse(selector).unwrap()
}

impl ExtractionProfile {
    /// Anchors for [`TemplateVariant::Current`].
    ///
    /// List rows compose `YYYY-MM-DD` dates. The editor line sits below the
    /// byline foot and is excluded from the body.
    pub fn current() -> Self {
        Self {
            variant: TemplateVariant::Current,
            list_rows: sel("body > div.list04.wrap > ul > li"),
            row_link: sel("a"),
            row_day: sel("a > div.time > div.day"),
            row_month: sel("a > div.time > div.year"),
            row_title: sel("a > div.text > h5"),
            row_summary: sel("a > div.text > p"),
            next_page: sel("body > div.list04.wrap > div > span.p_pages > span.p_next.p_fun > a"),
            article_title: sel(&format!("{DETAIL_FORM} > div > div.show01 > h5")),
            article_date: sel(&format!("{DETAIL_FORM} > div > div.show01 > p > i:first-child")),
            article_source: sel(&format!("{DETAIL_FORM} > div > div.show01 > p > i:last-child")),
            content_region: sel(&format!("{DETAIL_FORM} > div > div.show02 div.v_news_content")),
            image_class: "vsbcontent_img",
            video_marker: "showVsbVideo",
            terminus: ContentTerminus::FootElement,
        }
    }

    /// Anchors for [`TemplateVariant::Legacy`].
    ///
    /// List rows compose `MM-DD` dates, and the trailing editor line is
    /// part of the article body.
    pub fn legacy() -> Self {
        Self {
            variant: TemplateVariant::Legacy,
            terminus: ContentTerminus::SiblingsEnd,
            ..Self::current()
        }
    }

    /// Look up the profile for a configured variant.
    pub fn for_variant(variant: TemplateVariant) -> Self {
        match variant {
            TemplateVariant::Current => Self::current(),
            TemplateVariant::Legacy => Self::legacy(),
        }
    }
}
