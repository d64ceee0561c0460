//! Error taxonomy for the news pipeline.
//!
//! Three caller-visible kinds carry the routing semantics:
//! - [`NewsError::UpstreamShape`]: a fetched document no longer matches the
//!   extraction profile (template drift).
//! - [`NewsError::NotFound`]: valid request, no matching upstream resource.
//! - [`NewsError::Validation`]: caller contract violation, raised before any
//!   network traffic.
//!
//! Nothing is retried internally and no partial results are returned: the
//! first hard error aborts the whole operation.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NewsError>;

/// Failures surfaced by the news pipeline.
#[derive(Debug, Error)]
pub enum NewsError {
    /// A fetched document lacks a structural anchor the profile expects.
    #[error("upstream structure mismatch: {0}")]
    UpstreamShape(String),

    /// Valid request, but nothing upstream answers to it.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// Caller-supplied parameter outside its documented range.
    #[error("invalid parameter `{param}`: got {got}, expected {expected}")]
    Validation {
        param: &'static str,
        got: String,
        expected: String,
    },

    /// Transport failure talking to the upstream.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream did not answer within the configured timeout.
    #[error("upstream request timed out")]
    UpstreamTimeout,

    /// A URL assembled from configuration did not parse.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}
