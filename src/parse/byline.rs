//! Editor and author extraction from the tail of an article body.
//!
//! Upstream articles close with an optional editor line ("责任编辑：…")
//! and, above it, an optional bracketed credit line naming authors with
//! per-person markers ("（张三/文 李四/图）"). Both live inside the content
//! region, so extraction runs over the already-flattened [`ContentNode`]
//! slice, backward from the last paragraph.

use regex::Regex;

use super::content::ContentNode;

/// Who edited and who wrote, as far as the page discloses.
///
/// Both fields are best-effort; a page without the trailing lines simply
/// yields the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Byline {
    pub editor: Option<String>,
    pub authors: Option<Vec<String>>,
}

/// Scan backward from `foot` (the index of the region's last paragraph)
/// for the editor line and the author credit line.
///
/// The first non-blank node at or before the foot is the editor candidate;
/// one step further back, again skipping blanks, sits the single author
/// candidate. A candidate that does not match its pattern leaves the field
/// absent; the scan never walks further up into the body text.
pub fn extract_byline(nodes: &[ContentNode], foot: Option<usize>) -> Byline {
    let Some(foot) = foot.filter(|f| *f < nodes.len()) else {
        return Byline::default();
    };
    let editor_re = Regex::new(r"(?:责任)?编辑： *(.*)").unwrap();
    let author_re = Regex::new(r".*(?:（|\()(.*[图文审核].*)(?:）|\)).*").unwrap();

    let mut at = foot;
    while at > 0 && nodes[at].text.trim().is_empty() {
        at -= 1;
    }
    let editor = editor_re.captures(nodes[at].text.trim()).and_then(|caps| {
        let name = caps[1].trim();
        (!name.is_empty()).then(|| name.to_string())
    });

    if at > 0 {
        at -= 1;
        while at > 0 && nodes[at].text.trim().is_empty() {
            at -= 1;
        }
    }
    let authors = author_re
        .captures(&nodes[at].text)
        .map(|caps| collect_names(&caps[1]))
        .filter(|names| !names.is_empty());

    Byline { editor, authors }
}

/// Pull person names out of a bracketed credit segment.
///
/// Role markers ("/文", "/图", "/审核") and the "综合" filler collapse to
/// separators first; what remains is mined for CJK runs of two or more
/// characters and then for Latin tokens, keeping first-seen order.
fn collect_names(credit: &str) -> Vec<String> {
    let strip_re = Regex::new(r"/(?:文|图|审核)|综合").unwrap();
    let cjk_re = Regex::new(r"[\u{4E00}-\u{9FA5}]{2,}").unwrap();
    let latin_re = Regex::new(r"[A-Za-z.·]+(?: [A-Za-z.·]+)*").unwrap();

    let cleaned = strip_re.replace_all(credit.trim(), "/");
    let mut names: Vec<String> = Vec::new();
    for found in cjk_re
        .find_iter(&cleaned)
        .chain(latin_re.find_iter(&cleaned))
    {
        let name = found.as_str().to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
