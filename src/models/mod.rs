//! Core data models for the news pipeline.

mod article;
mod content;
mod hash;
mod item;

pub use article::*;
pub use content::*;
pub use hash::*;
pub use item::*;
