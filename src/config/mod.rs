//! Configuration loading and validation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::profile::TemplateVariant;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// One upstream news category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Numeric node id used by detail URLs. Categories that aggregate
    /// outside coverage have none and cannot serve articles.
    pub node: Option<u32>,

    /// URL slug of the category's listing pages.
    pub slug: String,

    /// Display name, reported on articles.
    pub name: String,
}

/// Site-level configuration for the news pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Upstream site origin.
    #[serde(default = "default_origin")]
    pub origin: Url,

    /// Which page template the deployment targets.
    #[serde(default)]
    pub variant: TemplateVariant,

    /// Publisher name used when an article leaves its source blank.
    #[serde(default = "default_publisher")]
    pub publisher: String,

    /// Upstream request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Categories in probe order. The first entry is the default for
    /// listing requests.
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
}

fn default_origin() -> Url {
    Url::parse("https://news.hfut.edu.cn").expect("static origin")
}

fn default_publisher() -> String {
    "合肥工业大学新闻网".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_categories() -> Vec<Category> {
    let entry = |node: Option<u32>, slug: &str, name: &str| Category {
        node,
        slug: slug.to_string(),
        name: name.to_string(),
    };
    vec![
        entry(Some(1011), "gdyw1", "工大要闻"),
        entry(Some(1012), "zhxw1", "综合新闻"),
        entry(Some(1014), "jxky1", "教学科研"),
        entry(None, "mtgd1", "媒体工大"),
        entry(Some(1016), "jjxy1", "菁菁校园"),
    ]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            variant: TemplateVariant::default(),
            publisher: default_publisher(),
            timeout_seconds: default_timeout(),
            categories: default_categories(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: SiteConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.origin.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "Origin must be http(s), got {}",
                self.origin
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        if self.categories.is_empty() {
            return Err(ConfigError::ValidationError(
                "At least one category is required".to_string(),
            ));
        }

        for category in &self.categories {
            if category.slug.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Category `{}` has an empty slug",
                    category.name
                )));
            }
        }

        Ok(())
    }

    /// Address of a category's main (newest) listing page.
    pub fn main_page_url(&self, category: &Category) -> Result<Url, url::ParseError> {
        self.origin.join(&format!("{}.htm", category.slug))
    }

    /// Address of an archive listing page, by reverse page number.
    pub fn listing_page_url(
        &self,
        category: &Category,
        reverse_page: u32,
    ) -> Result<Url, url::ParseError> {
        self.origin
            .join(&format!("{}/{}.htm", category.slug, reverse_page))
    }

    /// Address of an article detail page.
    pub fn article_url(&self, node: u32, id: u64) -> Result<Url, url::ParseError> {
        self.origin.join(&format!("info/{node}/{id}.htm"))
    }
}
