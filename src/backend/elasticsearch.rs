//! Elasticsearch-compatible REST backend
//!
//! Posts are stored as `{title, content, author, topic, timestamp}` where
//! `topic` is the comma-joined topic list. Search results are mapped back
//! to posts with a generated excerpt and a default image.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::SearchBackend;
use crate::error::{Result, SearchError};
use crate::search::TermExpander;
use crate::types::{Field, Post, SearchMode, SearchQuery};

/// Image attached to posts reconstructed from search hits
pub const DEFAULT_POST_IMAGE: &str =
    "https://images.pexels.com/photos/3183150/pexels-photo-3183150.jpeg";

const EXCERPT_CHARS: usize = 120;
const TOPIC_SEPARATOR: &str = ", ";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Option<Hits>,
}

#[derive(Debug, Deserialize)]
struct Hits {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source")]
    source: IndexedPost,
}

/// Document shape stored in the index
#[derive(Debug, Deserialize)]
struct IndexedPost {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    author: String,
    topic: Option<String>,
    timestamp: Option<String>,
}

/// Backend talking to an Elasticsearch index over HTTP
pub struct ElasticsearchBackend {
    client: reqwest::Client,
    endpoint: String,
    index: String,
    expander: Arc<dyn TermExpander>,
}

impl ElasticsearchBackend {
    pub fn new(
        endpoint: impl Into<String>,
        index: impl Into<String>,
        expander: Arc<dyn TermExpander>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            index: index.into(),
            expander,
        }
    }

    async fn post_json(&self, url: String, body: &Value) -> Result<reqwest::Response> {
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::BackendStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Convert a `YYYY-MM-DD` date to an RFC 3339 timestamp at midnight UTC
pub(crate) fn date_to_timestamp(date: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let datetime = date.and_hms_opt(0, 0, 0)?.and_utc();
    Some(datetime.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Convert an indexed timestamp back to a `YYYY-MM-DD` date
pub(crate) fn timestamp_to_date(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.naive_utc().date().format("%Y-%m-%d").to_string(),
        Err(_) => timestamp.chars().take(10).collect(),
    }
}

/// Body stored for a post
pub(crate) fn index_document(post: &Post) -> Value {
    let timestamp = date_to_timestamp(&post.date);
    if timestamp.is_none() {
        warn!(id = post.id, date = %post.date, "Post date is not YYYY-MM-DD, indexing without timestamp");
    }

    json!({
        "title": post.title,
        "content": post.content,
        "author": post.author,
        "topic": post.topics.join(TOPIC_SEPARATOR),
        "timestamp": timestamp,
    })
}

fn es_field(field: Field) -> &'static str {
    match field {
        Field::Title => "title",
        Field::Content => "content",
        Field::Topic => "topic",
        Field::All => "all",
    }
}

/// Query DSL for a search. `expanded` is only used by semantic and hybrid.
pub(crate) fn build_query(query: &SearchQuery, expanded: &str) -> Value {
    let text = query.text.as_str();
    let field = query.effective_field();

    match query.mode {
        SearchMode::Exact => match field {
            Field::All => json!({
                "query": { "multi_match": { "query": text, "fields": ["title", "content", "topic"] } }
            }),
            field => json!({ "query": { "match": { es_field(field): text } } }),
        },
        SearchMode::Fuzzy => match field {
            Field::All => json!({
                "query": { "multi_match": {
                    "query": text,
                    "fields": ["title", "content", "topic"],
                    "fuzziness": "AUTO"
                } }
            }),
            field => json!({
                "query": { "fuzzy": { es_field(field): { "value": text, "fuzziness": "AUTO" } } }
            }),
        },
        SearchMode::Semantic => json!({
            "query": { "multi_match": {
                "query": expanded,
                "fields": ["title^3", "content^2", "topic"],
                "fuzziness": "AUTO",
                "type": "best_fields"
            } }
        }),
        SearchMode::Hybrid => json!({
            "query": { "bool": { "should": [
                { "match": { "title": { "query": text, "boost": 5 } } },
                { "match": { "content": { "query": text, "boost": 3 } } },
                { "match": { "topic": { "query": text, "boost": 2 } } },
                { "match": { "title": { "query": expanded, "boost": 2 } } },
                { "match": { "content": { "query": expanded, "boost": 1 } } },
                { "fuzzy": { "content": { "value": text, "fuzziness": "AUTO", "boost": 1 } } }
            ] } }
        }),
    }
}

/// Map a search response to posts, skipping hits without a numeric id
pub(crate) fn posts_from_response(body: Value) -> Result<Vec<Post>> {
    let response: SearchResponse = serde_json::from_value(body)?;
    let Some(hits) = response.hits else {
        return Ok(Vec::new());
    };

    let posts = hits
        .hits
        .into_iter()
        .filter_map(|hit| {
            let id = match hit.id.parse::<u64>() {
                Ok(id) => id,
                Err(_) => {
                    warn!(id = %hit.id, "Skipping hit with non-numeric id");
                    return None;
                }
            };
            Some(post_from_source(id, hit.source))
        })
        .collect();

    Ok(posts)
}

fn post_from_source(id: u64, source: IndexedPost) -> Post {
    let topics = source
        .topic
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| t.split(TOPIC_SEPARATOR).map(String::from).collect())
        .unwrap_or_default();
    let date = source
        .timestamp
        .as_deref()
        .map(timestamp_to_date)
        .unwrap_or_default();
    let excerpt = format!(
        "{}...",
        source.content.chars().take(EXCERPT_CHARS).collect::<String>()
    );

    Post {
        id,
        title: source.title,
        excerpt,
        content: source.content,
        author: source.author,
        date,
        topics,
        image: DEFAULT_POST_IMAGE.to_string(),
    }
}

#[async_trait]
impl SearchBackend for ElasticsearchBackend {
    fn name(&self) -> &'static str {
        "elasticsearch"
    }

    async fn index_post(&self, post: Post) -> Result<()> {
        let url = format!("{}/{}/_doc/{}", self.endpoint, self.index, post.id);
        self.post_json(url, &index_document(&post)).await?;
        info!(id = post.id, index = %self.index, "Indexed post");
        Ok(())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Post>> {
        let expanded = match query.mode {
            SearchMode::Semantic | SearchMode::Hybrid => self.expander.expand(&query.text).await,
            SearchMode::Exact | SearchMode::Fuzzy => String::new(),
        };

        let url = format!("{}/{}/_search", self.endpoint, self.index);
        let body = build_query(query, &expanded);
        let response: Value = self.post_json(url, &body).await?.json().await?;

        let posts = posts_from_response(response)?;
        debug!(mode = %query.mode, hits = posts.len(), "Elasticsearch search finished");
        Ok(posts)
    }
}
