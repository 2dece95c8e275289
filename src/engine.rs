//! Search facade
//!
//! Single entry point for callers: picks the backend at construction time
//! and dispatches each query by mode.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::backend::{ElasticsearchBackend, InMemoryBackend, LatencyProfile, SearchBackend};
use crate::config::{BackendKind, Config, ExpanderKind};
use crate::error::Result;
use crate::search::{LlmExpander, StaticExpander, TermExpander};
use crate::store::DocumentStore;
use crate::types::{Field, Post, SearchMode, SearchQuery};

/// Search facade over a configured backend
#[derive(Clone)]
pub struct SearchEngine {
    backend: Arc<dyn SearchBackend>,
}

impl SearchEngine {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    /// In-memory engine over `store` with the static expander and filter hybrid
    pub fn in_memory(store: Arc<DocumentStore>) -> Self {
        let backend = InMemoryBackend::new(
            store,
            Arc::new(StaticExpander::new()),
            Default::default(),
        );
        Self::new(Arc::new(backend))
    }

    /// Build the engine described by `config`. The in-memory backend
    /// searches `store` directly.
    pub fn from_config(config: &Config, store: Arc<DocumentStore>) -> Self {
        let expander: Arc<dyn TermExpander> = match config.expander {
            ExpanderKind::Static => Arc::new(StaticExpander::new()),
            ExpanderKind::Llm => Arc::new(LlmExpander::new(
                config.llm_endpoint.clone(),
                config.llm_model.clone(),
                config.llm_api_key.clone(),
                Duration::from_millis(config.llm_timeout_ms),
            )),
        };

        let backend: Arc<dyn SearchBackend> = match config.backend {
            BackendKind::Memory => {
                let mut backend = InMemoryBackend::new(store, expander, config.hybrid_policy);
                if config.simulate_latency {
                    backend = backend.with_latency(LatencyProfile::default());
                }
                Arc::new(backend)
            }
            BackendKind::Elasticsearch => Arc::new(ElasticsearchBackend::new(
                config.elasticsearch_endpoint.clone(),
                config.elasticsearch_index.clone(),
                expander,
            )),
        };

        info!(
            backend = backend.name(),
            expander = ?config.expander,
            hybrid = ?config.hybrid_policy,
            "Search engine ready"
        );
        Self::new(backend)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Run a query. The field defaults per mode when `None`.
    pub async fn search(
        &self,
        query: &str,
        mode: SearchMode,
        field: Option<Field>,
    ) -> Result<Vec<Post>> {
        let query = SearchQuery {
            text: query.to_string(),
            mode,
            field,
        };
        self.execute(&query).await
    }

    /// Run a query whose mode comes from a caller string; unknown modes
    /// are treated as exact
    pub async fn search_with_mode_str(
        &self,
        query: &str,
        mode: Option<&str>,
        field: Option<Field>,
    ) -> Result<Vec<Post>> {
        self.search(query, SearchMode::parse_or_default(mode), field).await
    }

    pub async fn execute(&self, query: &SearchQuery) -> Result<Vec<Post>> {
        info!(
            query = %query.text,
            mode = %query.mode,
            field = %query.effective_field(),
            "Performing search"
        );
        self.backend.search(query).await
    }

    /// Index a newly authored or edited post
    pub async fn index_post(&self, post: Post) -> Result<()> {
        self.backend.index_post(post).await
    }

    /// Index a batch of posts, logging and skipping failures.
    /// Returns the number indexed.
    pub async fn index_all(&self, posts: Vec<Post>) -> usize {
        let mut indexed = 0;
        for post in posts {
            let id = post.id;
            match self.backend.index_post(post).await {
                Ok(()) => indexed += 1,
                Err(e) => warn!(id, error = %e, "Failed to index post"),
            }
        }
        indexed
    }
}
