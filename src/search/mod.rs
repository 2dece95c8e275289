//! Multi-mode post search
//!
//! This module provides the search core:
//! - Field-scoped match predicates (exact, containment, all-field)
//! - Query expansion through a static related-terms table or an LLM
//! - Exact, fuzzy, semantic and hybrid strategies
//! - Weighted multi-signal scoring for ranked hybrid search

mod expansion;
mod llm;
pub mod predicates;
mod scoring;
mod strategy;

pub use expansion::{related_terms, StaticExpander, TermExpander, RELATED_TERMS};
pub use llm::{LlmExpander, DEFAULT_LLM_ENDPOINT, DEFAULT_LLM_MODEL, MAX_QUERY_CHARS};
pub use scoring::{rank, score_post, HybridWeights, ScoredPost};
pub use strategy::{
    ExactStrategy, FuzzyStrategy, HybridPolicy, HybridStrategy, SearchStrategy, SemanticStrategy,
};
