//! Data types for the blog search server
//!
//! This module contains the core data structures used throughout the application.

mod post;
mod query;

pub use post::{Post, PostCollection};
pub use query::{Field, SearchMode, SearchQuery};
