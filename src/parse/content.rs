//! Classification of article body nodes into content blocks.

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::error::{NewsError, Result};
use crate::models::ContentBlock;
use crate::profile::ExtractionProfile;

/// One direct child of the article content region, flattened out of the
/// DOM so classification and byline scanning can run over a plain slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentNode {
    /// Concatenated descendant text, untrimmed.
    pub text: String,

    /// Whether the element's classes mark it as an image container.
    pub is_image_wrapper: bool,

    /// `src` of the first nested `<img>`, when there is one.
    pub image_src: Option<String>,

    /// The element's raw `style` attribute.
    pub style: Option<String>,

    /// Whether a `<span>` is nested anywhere below the element.
    pub has_span: bool,
}

/// Classify body nodes into image, video, and text blocks, in reading
/// order.
///
/// A centered line directly under an uncaptioned image is folded into that
/// image's `alt` instead of becoming its own text block. Blank nodes are
/// dropped. Malformed embeds (an image container without a source, a video
/// marker without an mp4 path) abort with [`NewsError::UpstreamShape`].
pub fn classify(
    nodes: &[ContentNode],
    profile: &ExtractionProfile,
    origin: &Url,
) -> Result<Vec<ContentBlock>> {
    let video_re = Regex::new(&format!(r#"{}\("(.*?\.mp4)""#, profile.video_marker)).unwrap();
    let center_re = Regex::new(r"text-align:\s*center").unwrap();

    let mut blocks: Vec<ContentBlock> = Vec::new();
    for node in nodes {
        if node.is_image_wrapper {
            let Some(src) = node.image_src.as_deref() else {
                return Err(NewsError::UpstreamShape(format!(
                    "image container without a source: {}",
                    node.text.trim()
                )));
            };
            blocks.push(ContentBlock::Image {
                url: absolutize(src, origin)?,
                alt: None,
            });
        } else if node.text.trim().starts_with(profile.video_marker) {
            let Some(caps) = video_re.captures(&node.text) else {
                return Err(NewsError::UpstreamShape(format!(
                    "video embed without an mp4 path: {}",
                    node.text.trim()
                )));
            };
            blocks.push(ContentBlock::Video {
                url: absolutize(&caps[1], origin)?,
            });
        } else {
            let text = node.text.trim();
            if text.is_empty() {
                continue;
            }
            let centered = (node.has_span || node.style.is_some())
                && center_re.is_match(node.style.as_deref().unwrap_or(""));
            let merged = match blocks.last_mut() {
                Some(ContentBlock::Image { alt, .. }) if centered && alt.is_none() => {
                    *alt = Some(text.to_string());
                    true
                }
                _ => false,
            };
            if !merged {
                blocks.push(ContentBlock::Text {
                    text: text.to_string(),
                });
            }
        }
    }

    debug!(blocks = blocks.len(), "classified article body");
    Ok(blocks)
}

/// Root-relative paths resolve against the origin; everything else passes
/// through untouched, as the upstream emits it.
fn absolutize(src: &str, origin: &Url) -> Result<String> {
    if src.starts_with('/') {
        Ok(origin.join(src)?.to_string())
    } else {
        Ok(src.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn origin() -> Url {
        Url::parse("https://news.hfut.edu.cn").unwrap()
    }

    fn text_node(text: &str) -> ContentNode {
        ContentNode {
            text: text.to_string(),
            ..ContentNode::default()
        }
    }

    fn image_node(src: &str) -> ContentNode {
        ContentNode {
            is_image_wrapper: true,
            image_src: Some(src.to_string()),
            ..ContentNode::default()
        }
    }

    fn caption_node(text: &str) -> ContentNode {
        ContentNode {
            text: text.to_string(),
            style: Some("text-align: center;".to_string()),
            has_span: true,
            ..ContentNode::default()
        }
    }

    #[test]
    fn test_blocks_come_out_in_reading_order() {
        let nodes = vec![
            text_node("开头一段。"),
            image_node("/__local/a.jpg"),
            text_node(r#"showVsbVideo("/__local/clip.mp4");"#),
            text_node("结尾一段。"),
        ];

        let blocks = classify(&nodes, &ExtractionProfile::current(), &origin()).unwrap();
        assert_eq!(
            blocks,
            vec![
                ContentBlock::Text {
                    text: "开头一段。".to_string()
                },
                ContentBlock::Image {
                    url: "https://news.hfut.edu.cn/__local/a.jpg".to_string(),
                    alt: None,
                },
                ContentBlock::Video {
                    url: "https://news.hfut.edu.cn/__local/clip.mp4".to_string(),
                },
                ContentBlock::Text {
                    text: "结尾一段。".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_centered_line_becomes_image_caption() {
        let nodes = vec![
            image_node("/__local/a.jpg"),
            text_node("   "),
            caption_node("校园一角"),
        ];

        let blocks = classify(&nodes, &ExtractionProfile::current(), &origin()).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0],
            ContentBlock::Image {
                url: "https://news.hfut.edu.cn/__local/a.jpg".to_string(),
                alt: Some("校园一角".to_string()),
            }
        );
    }

    #[test]
    fn test_center_style_without_space_still_merges() {
        let tight = ContentNode {
            text: "紧凑样式说明".to_string(),
            style: Some("text-align:center".to_string()),
            ..ContentNode::default()
        };
        let nodes = vec![image_node("/__local/a.jpg"), tight];

        let blocks = classify(&nodes, &ExtractionProfile::current(), &origin()).unwrap();
        assert_eq!(blocks.len(), 1);
        assert!(matches!(
            &blocks[0],
            ContentBlock::Image { alt: Some(alt), .. } if alt == "紧凑样式说明"
        ));
    }

    #[test]
    fn test_second_centered_line_stays_text() {
        let nodes = vec![
            image_node("/__local/a.jpg"),
            caption_node("第一行说明"),
            caption_node("第二行说明"),
        ];

        let blocks = classify(&nodes, &ExtractionProfile::current(), &origin()).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[1], ContentBlock::Text { text } if text == "第二行说明"));
    }

    #[test]
    fn test_intervening_text_blocks_the_merge() {
        let nodes = vec![
            image_node("/__local/a.jpg"),
            text_node("普通段落。"),
            caption_node("居中但不是说明"),
        ];

        let blocks = classify(&nodes, &ExtractionProfile::current(), &origin()).unwrap();
        assert_eq!(blocks.len(), 3);
        assert!(matches!(&blocks[2], ContentBlock::Text { text } if text == "居中但不是说明"));
    }

    #[test]
    fn test_centered_needs_a_style_attribute() {
        let spanned = ContentNode {
            text: "带span但无样式".to_string(),
            has_span: true,
            ..ContentNode::default()
        };
        let nodes = vec![image_node("/__local/a.jpg"), spanned];

        let blocks = classify(&nodes, &ExtractionProfile::current(), &origin()).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[1], ContentBlock::Text { .. }));
    }

    #[test]
    fn test_video_after_image_blocks_caption() {
        let nodes = vec![
            image_node("/__local/a.jpg"),
            text_node(r#"showVsbVideo("/v.mp4");"#),
            caption_node("说明"),
        ];

        let blocks = classify(&nodes, &ExtractionProfile::current(), &origin()).unwrap();
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[2], ContentBlock::Text { .. }));
    }

    #[test]
    fn test_non_root_relative_sources_pass_through() {
        let nodes = vec![
            image_node("https://cdn.example.com/pic.png"),
            text_node(r#"showVsbVideo("clips/v.mp4");"#),
        ];

        let blocks = classify(&nodes, &ExtractionProfile::current(), &origin()).unwrap();
        assert!(matches!(
            &blocks[0],
            ContentBlock::Image { url, .. } if url == "https://cdn.example.com/pic.png"
        ));
        assert!(matches!(
            &blocks[1],
            ContentBlock::Video { url } if url == "clips/v.mp4"
        ));
    }

    #[test]
    fn test_image_without_source_is_a_shape_error() {
        let broken = ContentNode {
            is_image_wrapper: true,
            ..ContentNode::default()
        };

        let err = classify(&[broken], &ExtractionProfile::current(), &origin()).unwrap_err();
        assert!(matches!(err, NewsError::UpstreamShape(_)));
    }

    #[test]
    fn test_video_marker_without_mp4_is_a_shape_error() {
        let nodes = vec![text_node(r#"showVsbVideo("/clip.avi");"#)];
        let err = classify(&nodes, &ExtractionProfile::current(), &origin()).unwrap_err();
        assert!(matches!(err, NewsError::UpstreamShape(_)));
    }

    #[test]
    fn test_blank_nodes_emit_nothing() {
        let nodes = vec![text_node("  \n "), text_node(""), text_node("正文")];
        let blocks = classify(&nodes, &ExtractionProfile::current(), &origin()).unwrap();
        assert_eq!(blocks.len(), 1);
    }
}
