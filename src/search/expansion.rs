//! Query expansion for semantic and hybrid search
//!
//! The static expander maps query tokens through a fixed table of
//! related terms. The LLM-backed expander lives in [`super::llm`].

use async_trait::async_trait;

/// Related terms per query token
pub const RELATED_TERMS: &[(&str, &str)] = &[
    ("react", "javascript frontend component hooks jsx"),
    ("typescript", "static typing javascript ts type interface"),
    ("material", "ui design component mui theme"),
    ("scalable", "architecture large scale performance"),
    ("web", "development frontend html css javascript"),
    ("app", "application software program mobile"),
    ("blog", "article post content writing"),
];

/// Broadens a query with related terms.
///
/// Implementations never fail: when no expansion is available they
/// return the query unchanged.
#[async_trait]
pub trait TermExpander: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Return the expanded query string
    async fn expand(&self, query: &str) -> String;
}

/// Look up the related terms for a single token
pub fn lookup(token: &str) -> Option<&'static str> {
    RELATED_TERMS
        .iter()
        .find(|(term, _)| *term == token)
        .map(|(_, related)| *related)
}

/// Related terms for every known token in the query, in token order.
/// Returns an empty string when no token is in the table.
pub fn related_terms(query: &str) -> String {
    query
        .to_lowercase()
        .split_whitespace()
        .filter_map(lookup)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Table-driven expander: `"{query} {related terms}"`
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticExpander;

impl StaticExpander {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TermExpander for StaticExpander {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn expand(&self, query: &str) -> String {
        format!("{} {}", query, related_terms(query))
    }
}
