//! The news facade: listing windows and article retrieval.
//!
//! `NewsClient` composes the fetcher, the extraction profile and the
//! pagination planner into the two public operations. It owns no mutable
//! state; every call stands alone.

use std::sync::Arc;

use tracing::{debug, info, warn};
use url::Url;

use crate::config::{Category, SiteConfig};
use crate::error::{NewsError, Result};
use crate::fetch::{FetchedPage, PageFetcher};
use crate::models::{Article, ContentFormat, ListItem, NewsContent, NewsHash};
use crate::paginate::{plan_pages, window, PAGE_SIZE};
use crate::parse::{classify, discover_max_page, parse_article, parse_list_page};
use crate::profile::ExtractionProfile;

/// Upper bound on items per listing request.
pub const MAX_COUNT: usize = 100;

/// High-level access to the upstream news site.
pub struct NewsClient {
    config: SiteConfig,
    profile: ExtractionProfile,
    fetcher: Arc<dyn PageFetcher>,
}

impl NewsClient {
    /// Build a client for a configured site over the given transport.
    pub fn new(config: SiteConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        let profile = ExtractionProfile::for_variant(config.variant);
        Self {
            config,
            profile,
            fetcher,
        }
    }

    /// Fetch `count` listing items starting at `index`, 0 being the
    /// newest item of the category (first configured category by
    /// default).
    ///
    /// A feed shorter than the requested window yields a shorter result,
    /// never an error; a page that fails to parse aborts the whole call.
    pub async fn list_news(
        &self,
        category: Option<usize>,
        count: usize,
        index: usize,
    ) -> Result<Vec<ListItem>> {
        if count == 0 || count > MAX_COUNT {
            return Err(NewsError::Validation {
                param: "count",
                got: count.to_string(),
                expected: format!("1-{MAX_COUNT}"),
            });
        }
        let category = self.resolve_category(category.unwrap_or(0))?;

        let main_url = self.config.main_page_url(category)?;
        let main_page = self.fetch_listing(&main_url).await?;
        let max_page = discover_max_page(&main_page.body, &self.profile, &category.slug)?;
        let main_items = parse_list_page(
            &main_page.body,
            &self.profile,
            &self.config.origin,
            PAGE_SIZE,
        )?;

        let plan = plan_pages(PAGE_SIZE, max_page, index, count);
        debug!(
            category = %category.slug,
            max_page,
            extra_pages = plan.pages_to_fetch.len(),
            keep_main = plan.keep_main,
            "planned listing window"
        );

        let mut collected = if plan.keep_main {
            main_items
        } else {
            Vec::new()
        };
        for reverse_page in &plan.pages_to_fetch {
            if collected.len() >= plan.slice_end {
                break;
            }
            let url = self.config.listing_page_url(category, *reverse_page)?;
            let page = self.fetch_listing(&url).await?;
            collected.extend(parse_list_page(
                &page.body,
                &self.profile,
                &self.config.origin,
                PAGE_SIZE,
            )?);
        }

        Ok(window(collected, &plan))
    }

    /// Retrieve one article by id.
    ///
    /// With an explicit category the article must live there; without one,
    /// categories are probed in configured order and the first hit names
    /// the article's category.
    pub async fn get_article(
        &self,
        id: u64,
        category: Option<usize>,
        format: ContentFormat,
    ) -> Result<Article> {
        let (category, node, page) = match category {
            Some(index) => {
                let category = self.resolve_category(index)?;
                let Some(node) = category.node else {
                    return Err(NewsError::NotFound(format!(
                        "category `{}` has no article endpoint",
                        category.name
                    )));
                };
                let url = self.config.article_url(node, id)?;
                let page = self.fetcher.fetch(&url).await?;
                if !page.ok() {
                    return Err(NewsError::NotFound(format!(
                        "article {id} in `{}` (HTTP {})",
                        category.name, page.status
                    )));
                }
                (category, node, page)
            }
            None => self.probe_categories(id).await?,
        };

        let parsed = parse_article(&page.body, &self.profile, &self.config.publisher)?;
        let blocks = classify(&parsed.content, &self.profile, &self.config.origin)?;

        Ok(Article {
            id,
            category: category.name.clone(),
            title: parsed.title,
            date: parsed.date,
            source: parsed.source,
            editor: parsed.byline.editor,
            authors: parsed.byline.authors,
            content: NewsContent::render(blocks, format),
            link: self.config.article_url(node, id)?,
            hash: NewsHash::article(id),
        })
    }

    /// Try each category's detail endpoint until one serves the article.
    async fn probe_categories(&self, id: u64) -> Result<(&Category, u32, FetchedPage)> {
        for category in &self.config.categories {
            let Some(node) = category.node else {
                continue;
            };
            let url = self.config.article_url(node, id)?;
            let page = self.fetcher.fetch(&url).await?;
            debug!(
                category = %category.slug,
                status = page.status,
                "probed category for article"
            );
            if page.ok() {
                info!(article = id, category = %category.slug, "article located by probe");
                return Ok((category, node, page));
            }
        }
        warn!(article = id, "probe exhausted every configured category");
        Err(NewsError::NotFound(format!(
            "article {id} in any configured category"
        )))
    }

    fn resolve_category(&self, index: usize) -> Result<&Category> {
        self.config
            .categories
            .get(index)
            .ok_or_else(|| NewsError::Validation {
                param: "category",
                got: index.to_string(),
                expected: format!("0-{}", self.config.categories.len() - 1),
            })
    }

    /// Listing pages must answer 200; anything else means the category
    /// layout moved.
    async fn fetch_listing(&self, url: &Url) -> Result<FetchedPage> {
        let page = self.fetcher.fetch(url).await?;
        if !page.ok() {
            return Err(NewsError::UpstreamShape(format!(
                "listing page {url} answered HTTP {}",
                page.status
            )));
        }
        Ok(page)
    }
}
