//! Shared application state for HTTP handlers

use std::sync::Arc;

use crate::engine::SearchEngine;
use crate::store::DocumentStore;

/// State shared by all request handlers
pub struct AppState {
    /// Posts served by the listing and detail endpoints
    pub posts: Arc<DocumentStore>,

    /// Search facade
    pub engine: SearchEngine,
}

impl AppState {
    pub fn new(posts: Arc<DocumentStore>, engine: SearchEngine) -> Self {
        Self { posts, engine }
    }

    /// State with an in-memory engine searching `posts` directly
    pub fn in_memory(posts: Arc<DocumentStore>) -> Self {
        let engine = SearchEngine::in_memory(posts.clone());
        Self::new(posts, engine)
    }
}
