//! Blog Search Server
//!
//! Searches a collection of blog posts by title, content and topic tags,
//! either in-process or through an Elasticsearch-compatible index.
//!
//! # Features
//!
//! - **Four search modes**: exact, fuzzy, semantic and hybrid
//! - **Term expansion**: built-in related-terms table or an LLM rewriter
//! - **Pluggable backends**: in-memory store or Elasticsearch REST index
//! - **REST API**: search, list, fetch and upsert posts over HTTP
//!
//! # Modules
//!
//! - `types`: Core data structures (Post, SearchMode, Field, SearchQuery)
//! - `store`: In-memory document store keyed by post id
//! - `search`: Match predicates, term expanders and search strategies
//! - `backend`: In-memory and Elasticsearch search backends
//! - `engine`: Search facade used by callers
//! - `config`: Environment configuration
//! - `api`: Axum router and REST handlers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use blog_search::{DocumentStore, SearchEngine, SearchMode};
//!
//! # async fn run() -> blog_search::Result<()> {
//! let store = Arc::new(DocumentStore::with_default_seed()?);
//! let engine = SearchEngine::in_memory(store);
//! let posts = engine.search("react", SearchMode::Fuzzy, None).await?;
//! println!("{} posts", posts.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod search;
pub mod store;
pub mod types;

// Re-export commonly used items at crate root
pub use config::Config;
pub use engine::SearchEngine;
pub use error::{Result, SearchError};
pub use store::DocumentStore;
pub use types::{Field, Post, SearchMode, SearchQuery};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
