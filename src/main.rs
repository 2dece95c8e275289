//! Blog Search Server - Binary Entry Point

use std::sync::Arc;

use tracing::info;

use blog_search::api::{http::create_router, state::AppState};
use blog_search::config::{BackendKind, Config};
use blog_search::{logging, DocumentStore, SearchEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    logging::init();

    let config = Config::from_env()?;

    let posts = match &config.seed_path {
        Some(path) => DocumentStore::load_seed_file(path)?,
        None => DocumentStore::with_default_seed()?,
    };
    let posts = Arc::new(posts);
    info!(count = posts.len(), "Loaded posts");

    let engine = SearchEngine::from_config(&config, posts.clone());

    // The in-memory backend searches `posts` directly; a remote index needs them pushed
    if config.backend == BackendKind::Elasticsearch {
        let indexed = engine.index_all(posts.all()).await;
        info!(indexed, total = posts.len(), "Seeded search index");
    }

    let state = Arc::new(AppState::new(posts, engine));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(
        name = blog_search::NAME,
        version = blog_search::VERSION,
        addr = %config.addr,
        "Blog search server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
