//! Listing entries produced by the list-page parser.

use serde::{Deserialize, Serialize};
use url::Url;

use super::NewsHash;

/// One entry of the newest-first news feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Upstream numeric article id.
    pub id: u64,

    /// Row headline, trimmed. Empty on a degenerate row.
    pub title: String,

    /// Row teaser text, trimmed.
    pub summary: String,

    /// Composed row date: `YYYY-MM-DD` on the current template, `MM-DD` on
    /// the legacy one.
    pub date: String,

    /// Absolute link to the article page.
    pub link: Url,

    /// Stable listing identifier.
    pub hash: NewsHash,
}

impl ListItem {
    /// Build an entry, deriving the listing hash from the upstream id.
    pub fn new(id: u64, title: String, summary: String, date: String, link: Url) -> Self {
        let hash = NewsHash::summary(id);
        Self {
            id,
            title,
            summary,
            date,
            link,
            hash,
        }
    }
}
