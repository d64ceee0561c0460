//! # hfut-news
//!
//! A scraping pipeline for the HFUT news site (news.hfut.edu.cn):
//! windowed listing over its reverse-numbered pagination, and full
//! article extraction with block-classified content.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (list items, articles, content blocks)
//! - **profile**: Per-template extraction anchors (selectors, markers)
//! - **parse**: HTML extraction for listing and detail pages
//! - **paginate**: Reverse-numbered pagination planning
//! - **fetch**: Upstream HTTP transport behind a trait seam
//! - **client**: The facade composing the two public operations
//! - **config**: Configuration loading and validation

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod paginate;
pub mod parse;
pub mod profile;

pub use client::NewsClient;
pub use error::{NewsError, Result};
pub use models::*;
