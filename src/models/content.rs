//! Article body blocks and their rendered forms.
//!
//! The classifier produces an ordered block sequence; callers choose
//! between the structured array and a flattened markdown string. Both are
//! final representations and are never mixed within one article.

use serde::{Deserialize, Serialize};

/// One classified unit of article body content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// An illustration; a centered caption right under it merges in as `alt`.
    Image {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },

    /// An embedded mp4 player invocation.
    Video { url: String },

    /// A trimmed run of paragraph text.
    Text { text: String },
}

/// How an article body is rendered for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    /// Structured block array, the default wire shape.
    #[default]
    Array,

    /// Single concatenated markdown string.
    Markdown,
}

/// Article body in its caller-selected rendering.
///
/// Serializes into the same JSON field as either the tagged block array or
/// a plain string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NewsContent {
    Blocks(Vec<ContentBlock>),
    Markdown(String),
}

impl NewsContent {
    /// Render classified blocks in the requested format.
    pub fn render(blocks: Vec<ContentBlock>, format: ContentFormat) -> Self {
        match format {
            ContentFormat::Array => NewsContent::Blocks(blocks),
            ContentFormat::Markdown => NewsContent::Markdown(to_markdown(&blocks)),
        }
    }
}

/// Flatten blocks into markdown, one block per paragraph.
fn to_markdown(blocks: &[ContentBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            ContentBlock::Image { url, alt } => {
                out.push_str(&format!("![{}]({})\n\n", alt.as_deref().unwrap_or(""), url));
            }
            ContentBlock::Video { url } => {
                out.push_str(&format!("![视频]({})\n\n", url));
            }
            ContentBlock::Text { text } => {
                out.push_str(text);
                out.push_str("\n\n");
            }
        }
    }
    out
}
