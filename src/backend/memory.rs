//! In-memory backend: strategies over the shared document store

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use super::SearchBackend;
use crate::error::Result;
use crate::search::{
    ExactStrategy, FuzzyStrategy, HybridPolicy, HybridStrategy, SearchStrategy, SemanticStrategy,
    TermExpander,
};
use crate::store::DocumentStore;
use crate::types::{Post, SearchMode, SearchQuery};

/// Artificial per-mode delay, mimicking a remote index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub exact: Duration,
    pub fuzzy: Duration,
    pub semantic: Duration,
    pub hybrid: Duration,
}

impl LatencyProfile {
    pub fn delay(&self, mode: SearchMode) -> Duration {
        match mode {
            SearchMode::Exact => self.exact,
            SearchMode::Fuzzy => self.fuzzy,
            SearchMode::Semantic => self.semantic,
            SearchMode::Hybrid => self.hybrid,
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            exact: Duration::from_millis(500),
            fuzzy: Duration::from_millis(700),
            semantic: Duration::from_millis(1000),
            hybrid: Duration::from_millis(1200),
        }
    }
}

/// Backend running the search strategies in-process
pub struct InMemoryBackend {
    store: Arc<DocumentStore>,
    strategies: HashMap<SearchMode, Box<dyn SearchStrategy>>,
    latency: Option<LatencyProfile>,
}

impl InMemoryBackend {
    /// Create a backend with one strategy per mode
    pub fn new(
        store: Arc<DocumentStore>,
        expander: Arc<dyn TermExpander>,
        hybrid_policy: HybridPolicy,
    ) -> Self {
        let strategies: Vec<Box<dyn SearchStrategy>> = vec![
            Box::new(ExactStrategy),
            Box::new(FuzzyStrategy),
            Box::new(SemanticStrategy::new(expander.clone())),
            Box::new(HybridStrategy::new(expander, hybrid_policy)),
        ];

        Self {
            store,
            strategies: strategies.into_iter().map(|s| (s.mode(), s)).collect(),
            latency: None,
        }
    }

    /// Delay every search by the profile's per-mode duration
    pub fn with_latency(mut self, latency: LatencyProfile) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Replace the strategy serving its mode
    pub fn with_strategy(mut self, strategy: Box<dyn SearchStrategy>) -> Self {
        self.strategies.insert(strategy.mode(), strategy);
        self
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }
}

#[async_trait]
impl SearchBackend for InMemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn index_post(&self, post: Post) -> Result<()> {
        let id = post.id;
        let replaced = self.store.upsert(post);
        info!(id, replaced, "Indexed post");
        Ok(())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Post>> {
        if let Some(latency) = &self.latency {
            tokio::time::sleep(latency.delay(query.mode)).await;
        }

        // Every mode is registered in `new`; fall back to exact otherwise
        let strategy = match self.strategies.get(&query.mode) {
            Some(strategy) => strategy,
            None => match self.strategies.get(&SearchMode::Exact) {
                Some(strategy) => strategy,
                None => return Ok(Vec::new()),
            },
        };

        let results = strategy.execute(&self.store, &query.text, query.field).await?;
        debug!(mode = %query.mode, hits = results.len(), "In-memory search finished");
        Ok(results)
    }
}
