//! Normalized article documents.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{NewsContent, NewsHash};

/// One fully parsed news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Upstream numeric article id.
    pub id: u64,

    /// Display name of the category the article resolved under.
    pub category: String,

    /// Article headline.
    pub title: String,

    /// Publication date, `YYYY-MM-DD`.
    pub date: String,

    /// Publishing source; the configured publisher name when the page
    /// leaves it blank.
    pub source: String,

    /// Responsible editor, when the page carries an editor line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    /// Credited authors, when a byline was recognized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,

    /// Body content in the caller-selected rendering.
    pub content: NewsContent,

    /// Absolute link to the article page.
    pub link: Url,

    /// Stable article identifier.
    pub hash: NewsHash,
}
