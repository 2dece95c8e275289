//! Search endpoint

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::error;

use super::{ApiError, ApiResponse};
use crate::api::state::AppState;
use crate::types::Field;

/// Message shown when a backend failure aborts a search
pub const SEARCH_FAILED_MESSAGE: &str = "An error occurred while searching. Please try again.";

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search query string
    #[serde(default)]
    pub q: String,
    /// exact | fuzzy | semantic | hybrid (anything else means exact)
    pub mode: Option<String>,
    /// title | content | topic | all
    pub field: Option<String>,
}

/// GET /api/search - Search posts
pub async fn search_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    if params.q.trim().is_empty() {
        let error = ApiError::bad_request("Query parameter 'q' is required");
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }

    let field = match params.field.as_deref().map(str::parse::<Field>) {
        None => None,
        Some(Ok(field)) => Some(field),
        Some(Err(e)) => {
            return (StatusCode::BAD_REQUEST, Json(ApiError::bad_request(e))).into_response();
        }
    };

    match state
        .engine
        .search_with_mode_str(&params.q, params.mode.as_deref(), field)
        .await
    {
        Ok(posts) => {
            let total = posts.len();
            (StatusCode::OK, Json(ApiResponse::with_total(posts, total))).into_response()
        }
        Err(e) => {
            error!(error = %e, query = %params.q, "Search failed");
            let error = ApiError::internal(SEARCH_FAILED_MESSAGE);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}
