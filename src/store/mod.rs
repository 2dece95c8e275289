//! Document Store - in-memory post collection
//!
//! Posts are kept in insertion order with an id → position map for
//! upserts. Readers take a snapshot under a shared lock; upsert holds the
//! write lock only for the duration of the swap.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::error::Result;
use crate::types::{Post, PostCollection};

/// Seed collection shipped with the crate
pub const DEFAULT_SEED: &str = include_str!("../../data/posts.json");

#[derive(Debug, Default)]
struct Inner {
    posts: Vec<Post>,
    positions: HashMap<u64, usize>,
}

/// Thread-safe in-memory store of indexed posts
#[derive(Debug, Default)]
pub struct DocumentStore {
    inner: RwLock<Inner>,
}

impl DocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a list of posts (later duplicates replace earlier ones)
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let store = Self::new();
        for post in posts {
            store.upsert(post);
        }
        store
    }

    /// Build a store from a `{"posts": [...]}` JSON document
    pub fn from_seed_json(json: &str) -> Result<Self> {
        let collection: PostCollection = serde_json::from_str(json)?;
        let store = Self::with_posts(collection.posts);
        info!(posts = store.len(), "Seeded document store");
        Ok(store)
    }

    /// Build a store from a seed file on disk
    pub fn load_seed_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading seed posts");
        let content = fs::read_to_string(path)?;
        Self::from_seed_json(&content)
    }

    /// Build a store from the built-in seed collection
    pub fn with_default_seed() -> Result<Self> {
        Self::from_seed_json(DEFAULT_SEED)
    }

    /// Insert a post, or replace the post with the same id in place.
    /// Returns true when an existing post was replaced.
    pub fn upsert(&self, post: Post) -> bool {
        let mut inner = self.inner.write();
        let id = post.id;

        if let Some(&pos) = inner.positions.get(&id) {
            inner.posts[pos] = post;
            debug!(id, "Replaced post");
            true
        } else {
            let pos = inner.posts.len();
            inner.posts.push(post);
            inner.positions.insert(id, pos);
            debug!(id, "Inserted post");
            false
        }
    }

    /// Snapshot of all posts in store order
    pub fn all(&self) -> Vec<Post> {
        self.inner.read().posts.clone()
    }

    /// Get a single post by id
    pub fn get(&self, id: u64) -> Option<Post> {
        let inner = self.inner.read();
        inner.positions.get(&id).map(|&pos| inner.posts[pos].clone())
    }

    pub fn len(&self) -> usize {
        self.inner.read().posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
