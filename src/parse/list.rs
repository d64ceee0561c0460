//! Listing page extraction and pager discovery.

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::error::{NewsError, Result};
use crate::models::ListItem;
use crate::profile::ExtractionProfile;

use super::element_text;

/// Article hrefs as they appear on listing rows, with or without the
/// relative prefix. Capture 1 is the site-relative path, capture 2 the
/// numeric article id.
const NEWS_HREF: &str = r"(?:\.\./)?(info/\d{4}/(\d+)\.htm)";

/// Extract up to `limit` rows from a listing page, newest first.
///
/// Every row must carry a well-formed article link; a row that does not is
/// an upstream shape change, not something to skip over. Title, summary
/// and the date halves degrade to empty strings when their elements are
/// missing.
pub fn parse_list_page(
    html: &str,
    profile: &ExtractionProfile,
    origin: &Url,
    limit: usize,
) -> Result<Vec<ListItem>> {
    let href_re = Regex::new(NEWS_HREF).unwrap();
    let doc = Html::parse_document(html);

    let mut items = Vec::new();
    for row in doc.select(&profile.list_rows).take(limit) {
        let Some(anchor) = row.select(&profile.row_link).next() else {
            return Err(NewsError::UpstreamShape(
                "listing row without an anchor".into(),
            ));
        };
        let Some(href) = anchor.value().attr("href") else {
            return Err(NewsError::UpstreamShape(
                "listing anchor without an href".into(),
            ));
        };
        let Some(caps) = href_re.captures(href) else {
            return Err(NewsError::UpstreamShape(format!(
                "listing href `{href}` does not point at an article"
            )));
        };
        let id: u64 = caps[2]
            .parse()
            .map_err(|_| NewsError::UpstreamShape(format!("article id in `{href}` overflows")))?;
        let link = origin.join(&caps[1])?;

        let text_of = |sel: &Selector| -> String {
            row.select(sel)
                .next()
                .map(element_text)
                .unwrap_or_default()
                .trim()
                .to_string()
        };
        let title = text_of(&profile.row_title);
        let summary = text_of(&profile.row_summary);
        // The current template's month element holds "YYYY-MM", the legacy
        // one a bare "MM"; joining with the day works for both.
        let date = format!("{}-{}", text_of(&profile.row_month), text_of(&profile.row_day));

        items.push(ListItem::new(id, title, summary, date, link));
    }

    debug!(rows = items.len(), "parsed listing page");
    Ok(items)
}

/// Read the total page count for a category off its main listing page.
///
/// The pager's next-page anchor points at the highest-numbered archive
/// page, which is the second logical page; the count therefore comes back
/// as the captured number plus one for the main page itself.
pub fn discover_max_page(html: &str, profile: &ExtractionProfile, slug: &str) -> Result<u32> {
    let doc = Html::parse_document(html);
    let Some(anchor) = doc.select(&profile.next_page).next() else {
        return Err(NewsError::UpstreamShape(
            "listing page has no next-page anchor".into(),
        ));
    };
    let Some(href) = anchor.value().attr("href") else {
        return Err(NewsError::UpstreamShape(
            "next-page anchor without an href".into(),
        ));
    };

    let page_re = Regex::new(&format!(r"{}/(\d+)\.htm", regex::escape(slug))).unwrap();
    let Some(caps) = page_re.captures(href) else {
        return Err(NewsError::UpstreamShape(format!(
            "next-page href `{href}` does not match category `{slug}`"
        )));
    };
    let second_page: u32 = caps[1]
        .parse()
        .map_err(|_| NewsError::UpstreamShape(format!("page number in `{href}` overflows")))?;

    Ok(second_page + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn origin() -> Url {
        Url::parse("https://news.hfut.edu.cn").unwrap()
    }

    fn row(href: &str, day: &str, month: &str, title: &str, summary: &str) -> String {
        format!(
            r#"<li><a href="{href}">
                <div class="time"><div class="day">{day}</div><div class="year">{month}</div></div>
                <div class="text"><h5>{title}</h5><p>{summary}</p></div>
            </a></li>"#
        )
    }

    fn listing_page(rows: &[String], next_href: Option<&str>) -> String {
        let pager = match next_href {
            Some(href) => format!(
                r#"<div><span class="p_pages"><span class="p_next p_fun"><a href="{href}">下页</a></span></span></div>"#
            ),
            None => String::new(),
        };
        format!(
            r#"<html><body><div class="list04 wrap"><ul>{}</ul>{pager}</div></body></html>"#,
            rows.join("\n")
        )
    }

    #[test]
    fn test_rows_extracted_in_document_order() {
        let html = listing_page(
            &[
                row("../info/1011/5001.htm", "18", "2025-03", "一号", "首条摘要"),
                row("info/1011/5000.htm", "17", "2025-03", "二号", "次条摘要"),
            ],
            Some("gdyw1/8.htm"),
        );

        let items = parse_list_page(&html, &ExtractionProfile::current(), &origin(), 10).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 5001);
        assert_eq!(items[0].title, "一号");
        assert_eq!(items[0].summary, "首条摘要");
        assert_eq!(items[0].date, "2025-03-18");
        assert_eq!(
            items[0].link.as_str(),
            "https://news.hfut.edu.cn/info/1011/5001.htm"
        );
        assert_eq!(items[1].id, 5000);
    }

    #[test]
    fn test_limit_caps_row_count() {
        let rows: Vec<String> = (0..5)
            .map(|i| {
                row(
                    &format!("../info/1011/{}.htm", 6000 + i),
                    "01",
                    "2025-01",
                    "标题",
                    "摘要",
                )
            })
            .collect();
        let html = listing_page(&rows, None);

        let items = parse_list_page(&html, &ExtractionProfile::current(), &origin(), 3).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].id, 6002);
    }

    #[test]
    fn test_legacy_month_element_composes_short_date() {
        let html = listing_page(&[row("../info/1014/42.htm", "09", "06", "旧版", "")], None);

        let items = parse_list_page(&html, &ExtractionProfile::legacy(), &origin(), 10).unwrap();
        assert_eq!(items[0].date, "06-09");
    }

    #[test]
    fn test_missing_text_bits_degrade_to_empty() {
        let html = listing_page(
            &[r#"<li><a href="../info/1011/7.htm"></a></li>"#.to_string()],
            None,
        );

        let items = parse_list_page(&html, &ExtractionProfile::current(), &origin(), 10).unwrap();
        assert_eq!(items[0].title, "");
        assert_eq!(items[0].summary, "");
        assert_eq!(items[0].date, "-");
    }

    #[test]
    fn test_foreign_href_is_a_shape_error() {
        let html = listing_page(
            &[row("https://example.com/other.htm", "01", "2025-01", "x", "y")],
            None,
        );

        let err = parse_list_page(&html, &ExtractionProfile::current(), &origin(), 10).unwrap_err();
        assert!(matches!(err, NewsError::UpstreamShape(_)));
    }

    #[test]
    fn test_row_without_anchor_is_a_shape_error() {
        let html = listing_page(&["<li><div>no link</div></li>".to_string()], None);

        let err = parse_list_page(&html, &ExtractionProfile::current(), &origin(), 10).unwrap_err();
        assert!(matches!(err, NewsError::UpstreamShape(_)));
    }

    #[test]
    fn test_max_page_is_next_capture_plus_one() {
        let html = listing_page(&[], Some("gdyw1/8.htm"));
        let pages = discover_max_page(&html, &ExtractionProfile::current(), "gdyw1").unwrap();
        assert_eq!(pages, 9);
    }

    #[test]
    fn test_missing_pager_is_a_shape_error() {
        let html = listing_page(&[], None);
        let err = discover_max_page(&html, &ExtractionProfile::current(), "gdyw1").unwrap_err();
        assert!(matches!(err, NewsError::UpstreamShape(_)));
    }

    #[test]
    fn test_pager_for_another_category_is_a_shape_error() {
        let html = listing_page(&[], Some("zhxw1/4.htm"));
        let err = discover_max_page(&html, &ExtractionProfile::current(), "gdyw1").unwrap_err();
        assert!(matches!(err, NewsError::UpstreamShape(_)));
    }
}
