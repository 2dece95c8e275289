//! Search backends
//!
//! A backend owns indexing and query execution. Two implementations exist:
//! - `memory`: strategies over the in-process document store
//! - `elasticsearch`: an Elasticsearch-compatible REST index

mod elasticsearch;
mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Post, SearchQuery};

pub use elasticsearch::{ElasticsearchBackend, DEFAULT_POST_IMAGE};
pub use memory::{InMemoryBackend, LatencyProfile};

/// Indexing and search capability behind the search facade
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Short name used in logs and health output
    fn name(&self) -> &'static str;

    /// Insert or replace a post in the index
    async fn index_post(&self, post: Post) -> Result<()>;

    /// Execute a query; an empty result is not an error
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Post>>;
}
