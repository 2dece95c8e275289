//! Post endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::error;

use super::{ApiError, ApiResponse};
use crate::api::state::AppState;
use crate::types::Post;

/// Query parameters for listing posts
#[derive(Debug, Deserialize)]
pub struct ListPostsParams {
    /// Only posts tagged with this topic (case-insensitive)
    pub topic: Option<String>,
}

/// GET /api/posts - List posts in store order
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListPostsParams>,
) -> impl IntoResponse {
    let mut posts = state.posts.all();

    if let Some(ref topic) = params.topic {
        let topic = topic.to_lowercase();
        posts.retain(|p| p.topics.iter().any(|t| t.to_lowercase() == topic));
    }

    let total = posts.len();
    Json(ApiResponse::with_total(posts, total))
}

/// GET /api/posts/:id - Get single post
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    match state.posts.get(id) {
        Some(post) => (StatusCode::OK, Json(ApiResponse::new(post))).into_response(),
        None => {
            let error = ApiError::not_found(format!("Post {} not found", id));
            (StatusCode::NOT_FOUND, Json(error)).into_response()
        }
    }
}

/// POST /api/posts - Create or replace a post and index it for search
pub async fn upsert_post(
    State(state): State<Arc<AppState>>,
    Json(post): Json<Post>,
) -> impl IntoResponse {
    let replaced = state.posts.upsert(post.clone());

    // The in-memory backend shares `state.posts`; upserting twice is a no-op
    if let Err(e) = state.engine.index_post(post.clone()).await {
        error!(id = post.id, error = %e, "Failed to index post");
        let error = ApiError::internal(format!("Post {} saved but not indexed: {}", post.id, e));
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response();
    }

    let status = if replaced {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    (status, Json(ApiResponse::new(post))).into_response()
}
