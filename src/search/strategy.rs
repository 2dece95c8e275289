//! Search strategies
//!
//! Each strategy filters (or, for weighted hybrid, ranks) a snapshot of
//! the document store. Strategies never mutate the store and never fail
//! on zero matches.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::expansion::TermExpander;
use super::predicates::{contains, filter_posts, matches, matches_any_field, normalize};
use super::scoring::{expansion_terms, rank, HybridWeights};
use crate::error::Result;
use crate::store::DocumentStore;
use crate::types::{Field, Post, SearchMode};

/// A ranking/selection algorithm behind one search mode
#[async_trait]
pub trait SearchStrategy: Send + Sync {
    /// Mode this strategy serves
    fn mode(&self) -> SearchMode;

    /// Run the query against the current store contents
    async fn execute(
        &self,
        store: &DocumentStore,
        query: &str,
        field: Option<Field>,
    ) -> Result<Vec<Post>>;
}

/// Case-insensitive equality on title or topic; containment elsewhere
#[derive(Debug, Default)]
pub struct ExactStrategy;

#[async_trait]
impl SearchStrategy for ExactStrategy {
    fn mode(&self) -> SearchMode {
        SearchMode::Exact
    }

    async fn execute(
        &self,
        store: &DocumentStore,
        query: &str,
        field: Option<Field>,
    ) -> Result<Vec<Post>> {
        let field = field.unwrap_or(Field::Title);
        let normalized = normalize(query);
        Ok(filter_posts(store.all(), |p| matches(p, &normalized, field, false)))
    }
}

/// Case-insensitive substring containment on one field
#[derive(Debug, Default)]
pub struct FuzzyStrategy;

#[async_trait]
impl SearchStrategy for FuzzyStrategy {
    fn mode(&self) -> SearchMode {
        SearchMode::Fuzzy
    }

    async fn execute(
        &self,
        store: &DocumentStore,
        query: &str,
        field: Option<Field>,
    ) -> Result<Vec<Post>> {
        let field = field.unwrap_or(Field::Content);
        let normalized = normalize(query);
        Ok(filter_posts(store.all(), |p| matches(p, &normalized, field, true)))
    }
}

/// Containment of the original query in any field, or of the whole
/// expanded query string in the content
pub struct SemanticStrategy {
    expander: Arc<dyn TermExpander>,
}

impl SemanticStrategy {
    pub fn new(expander: Arc<dyn TermExpander>) -> Self {
        Self { expander }
    }
}

#[async_trait]
impl SearchStrategy for SemanticStrategy {
    fn mode(&self) -> SearchMode {
        SearchMode::Semantic
    }

    async fn execute(
        &self,
        store: &DocumentStore,
        query: &str,
        _field: Option<Field>,
    ) -> Result<Vec<Post>> {
        let expanded = self.expander.expand(query).await;
        debug!(expander = self.expander.name(), expanded = %expanded, "Expanded query");

        let normalized = normalize(query);
        let expanded = normalize(&expanded);
        Ok(filter_posts(store.all(), |p| {
            matches_any_field(p, &normalized) || contains(&p.content, &expanded)
        }))
    }
}

/// How hybrid search selects and orders results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HybridPolicy {
    /// All-field containment of the original query, store order
    #[default]
    Filter,
    /// Weighted multi-signal scoring, best first
    Weighted,
}

impl FromStr for HybridPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "filter" => Ok(HybridPolicy::Filter),
            "weighted" => Ok(HybridPolicy::Weighted),
            other => Err(format!("unknown hybrid policy '{}'", other)),
        }
    }
}

/// Combination of exact, fuzzy and expanded-query signals
pub struct HybridStrategy {
    expander: Arc<dyn TermExpander>,
    policy: HybridPolicy,
    weights: HybridWeights,
}

impl HybridStrategy {
    pub fn new(expander: Arc<dyn TermExpander>, policy: HybridPolicy) -> Self {
        Self {
            expander,
            policy,
            weights: HybridWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: HybridWeights) -> Self {
        self.weights = weights;
        self
    }
}

#[async_trait]
impl SearchStrategy for HybridStrategy {
    fn mode(&self) -> SearchMode {
        SearchMode::Hybrid
    }

    async fn execute(
        &self,
        store: &DocumentStore,
        query: &str,
        _field: Option<Field>,
    ) -> Result<Vec<Post>> {
        let normalized = normalize(query);

        match self.policy {
            // Selection uses the original query; no expansion round trip
            HybridPolicy::Filter => Ok(filter_posts(store.all(), |p| {
                matches(p, &normalized, Field::All, true)
            })),
            HybridPolicy::Weighted => {
                let expanded = self.expander.expand(query).await;
                let terms = expansion_terms(&normalized, &expanded);
                debug!(terms = ?terms, "Hybrid weighted search");
                let ranked = rank(store.all(), &normalized, &terms, &self.weights);
                Ok(ranked.into_iter().map(|s| s.post).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::search::expansion::{related_terms, StaticExpander};

    fn store() -> DocumentStore {
        DocumentStore::with_posts(vec![
            Post::new(1, "Getting Started with React Hooks")
                .with_content("Learn useState and useEffect in everyday code")
                .with_topics(["React", "JavaScript"]),
            Post::new(2, "TypeScript Best Practices")
                .with_content("Static typing for JavaScript projects")
                .with_topics(["TypeScript"]),
            Post::new(3, "Notes")
                .with_content("A dump: typescript static typing javascript ts type interface")
                .with_topics(["Misc"]),
            Post::new(4, "Frontend Tooling")
                .with_content("Bundlers, linters and a react refresher")
                .with_topics(["Tooling"]),
        ])
    }

    fn ids(posts: &[Post]) -> Vec<u64> {
        posts.iter().map(|p| p.id).collect()
    }

    fn expander() -> Arc<dyn TermExpander> {
        Arc::new(StaticExpander::new())
    }

    #[tokio::test]
    async fn test_exact_title_equality_only() {
        let store = store();
        let hits = ExactStrategy
            .execute(&store, "typescript best practices", None)
            .await
            .unwrap();
        assert_eq!(ids(&hits), vec![2]);

        let hits = ExactStrategy.execute(&store, "React Hooks", None).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_exact_topic() {
        let store = store();
        let hits = ExactStrategy
            .execute(&store, "JAVASCRIPT", Some(Field::Topic))
            .await
            .unwrap();
        assert_eq!(ids(&hits), vec![1]);
    }

    #[tokio::test]
    async fn test_exact_content_falls_back_to_containment() {
        let store = store();
        let hits = ExactStrategy
            .execute(&store, "usestate", Some(Field::Content))
            .await
            .unwrap();
        assert_eq!(ids(&hits), vec![1]);
    }

    #[tokio::test]
    async fn test_fuzzy_defaults_to_content() {
        let store = store();
        let hits = FuzzyStrategy.execute(&store, "REACT", None).await.unwrap();
        assert_eq!(ids(&hits), vec![4]);

        let hits = FuzzyStrategy
            .execute(&store, "react hooks", Some(Field::Title))
            .await
            .unwrap();
        assert_eq!(ids(&hits), vec![1]);
    }

    #[tokio::test]
    async fn test_fuzzy_empty_query_matches_everything() {
        let store = store();
        let hits = FuzzyStrategy.execute(&store, "", None).await.unwrap();
        assert_eq!(ids(&hits), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_semantic_matches_original_and_expanded() {
        let store = store();
        let strategy = SemanticStrategy::new(expander());
        let hits = strategy.execute(&store, "typescript", None).await.unwrap();
        // 2 by title and topic, 3 by content
        assert_eq!(ids(&hits), vec![2, 3]);
    }

    #[tokio::test]
    async fn test_semantic_expanded_branch_is_literal() {
        let store = DocumentStore::with_posts(vec![Post::new(9, "Unrelated")
            .with_content("static typing with interfaces")]);
        let strategy = SemanticStrategy::new(expander());
        // Individual related terms appear, but not the whole expansion
        let hits = strategy.execute(&store, "typescript", None).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_hybrid_filter_uses_original_query_only() {
        let store = store();
        let strategy = HybridStrategy::new(expander(), HybridPolicy::Filter);
        let hits = strategy.execute(&store, "react", None).await.unwrap();
        assert_eq!(ids(&hits), vec![1, 4]);
    }

    #[tokio::test]
    async fn test_hybrid_weighted_ranks_title_first() {
        let store = store();
        let strategy = HybridStrategy::new(expander(), HybridPolicy::Weighted);
        let hits = strategy.execute(&store, "react", None).await.unwrap();

        // Title hit outranks content-only hit; expansion pulls in
        // posts mentioning "javascript"
        assert_eq!(hits[0].id, 1);
        assert!(ids(&hits).contains(&4));
        assert!(ids(&hits).contains(&2));
        let mut unique = ids(&hits);
        unique.dedup();
        assert_eq!(unique.len(), hits.len());
    }

    struct CountingExpander {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TermExpander for CountingExpander {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn expand(&self, query: &str) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            format!("{} {}", query, related_terms(query))
        }
    }

    #[tokio::test]
    async fn test_hybrid_filter_skips_expansion() {
        let store = store();
        let counting = Arc::new(CountingExpander {
            calls: AtomicUsize::new(0),
        });

        let filter = HybridStrategy::new(counting.clone(), HybridPolicy::Filter);
        filter.execute(&store, "react", None).await.unwrap();
        assert_eq!(counting.calls.load(Ordering::SeqCst), 0);

        let weighted = HybridStrategy::new(counting.clone(), HybridPolicy::Weighted);
        weighted.execute(&store, "react", None).await.unwrap();
        assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_hybrid_weighted_custom_weights() {
        let store = store();
        // Content outweighs title: the content-only post now leads
        let weights = HybridWeights {
            title: 1,
            content: 10,
            topic: 0,
            expanded_title: 0,
            expanded_content: 0,
            typo_content: 0,
        };
        let strategy =
            HybridStrategy::new(expander(), HybridPolicy::Weighted).with_weights(weights);
        let hits = strategy.execute(&store, "react", None).await.unwrap();
        assert_eq!(ids(&hits), vec![4, 1]);
    }

    #[tokio::test]
    async fn test_hybrid_weighted_ignores_partial_word_expansions() {
        let store = DocumentStore::with_default_seed().unwrap();
        let strategy = HybridStrategy::new(expander(), HybridPolicy::Weighted);
        // "ts" sits inside words like "effects" and "posts" in other seed posts
        let hits = strategy.execute(&store, "typescript", None).await.unwrap();
        assert_eq!(ids(&hits), vec![2]);
    }

    #[tokio::test]
    async fn test_empty_store_returns_empty_in_every_mode() {
        let store = DocumentStore::new();
        let strategies: Vec<Box<dyn SearchStrategy>> = vec![
            Box::new(ExactStrategy),
            Box::new(FuzzyStrategy),
            Box::new(SemanticStrategy::new(expander())),
            Box::new(HybridStrategy::new(expander(), HybridPolicy::Filter)),
            Box::new(HybridStrategy::new(expander(), HybridPolicy::Weighted)),
        ];
        for strategy in strategies {
            let hits = strategy.execute(&store, "react", None).await.unwrap();
            assert!(hits.is_empty(), "{} returned results", strategy.mode());
        }
    }

    #[test]
    fn test_parse_hybrid_policy() {
        assert_eq!("Weighted".parse::<HybridPolicy>().unwrap(), HybridPolicy::Weighted);
        assert!("ranked".parse::<HybridPolicy>().is_err());
    }
}
