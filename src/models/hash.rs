//! Stable opaque identifiers for scraped entities.
//!
//! The upstream exposes small numeric article ids that repeat across
//! endpoints; downstream consumers key on an opaque hash instead. Hashes
//! are endpoint-scoped: the same article id yields different identifiers
//! in listing and article contexts, so the two never collide in a shared
//! keyspace.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::form_urlencoded;

/// Opaque stable identifier attached to every scraped entity.
///
/// Deterministic over the upstream id: re-scraping the same article always
/// yields the same hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsHash(String);

impl NewsHash {
    /// Identifier for a full article document.
    pub fn article(id: u64) -> Self {
        Self::digest("news", id, None)
    }

    /// Identifier for a listing entry.
    pub fn summary(id: u64) -> Self {
        Self::digest("news_summary", id, None)
    }

    /// Title-qualified article identifier, for feeds that reuse ids across
    /// revisions.
    pub fn titled(id: u64, title: &str) -> Self {
        Self::digest("news", id, Some(title))
    }

    /// Digest the canonical query form of an upstream id.
    fn digest(endpoint: &str, id: u64, title: Option<&str>) -> Self {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("id", &id.to_string());
        if let Some(title) = title {
            query.append_pair("title", title);
        }

        let mut hasher = Sha256::new();
        hasher.update(endpoint.as_bytes());
        hasher.update(b"?");
        hasher.update(query.finish().as_bytes());
        let hash = hex::encode(hasher.finalize());

        // First 16 hex chars is plenty for a feed-sized keyspace.
        Self(hash[..16].to_string())
    }

    /// Get the hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NewsHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
