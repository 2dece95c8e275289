//! Server configuration from environment variables
//!
//! | Variable | Default |
//! |---|---|
//! | `BLOG_SEARCH_ADDR` | `127.0.0.1:3030` |
//! | `BLOG_SEARCH_BACKEND` | `memory` (`memory` or `elasticsearch`) |
//! | `BLOG_SEARCH_SEED_PATH` | built-in seed posts |
//! | `ELASTICSEARCH_ENDPOINT` | `http://localhost:9200` |
//! | `ELASTICSEARCH_INDEX` | `blog-posts` |
//! | `BLOG_SEARCH_EXPANDER` | `static` (`static` or `llm`) |
//! | `OPENAI_API_KEY` | unset |
//! | `BLOG_SEARCH_LLM_ENDPOINT` | OpenRouter chat completions |
//! | `BLOG_SEARCH_LLM_MODEL` | `openai/gpt-3.5-turbo` |
//! | `BLOG_SEARCH_LLM_TIMEOUT_MS` | `5000` |
//! | `BLOG_SEARCH_HYBRID` | `filter` (`filter` or `weighted`) |
//! | `BLOG_SEARCH_SIMULATE_LATENCY` | `false` |

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Result, SearchError};
use crate::search::{HybridPolicy, DEFAULT_LLM_ENDPOINT, DEFAULT_LLM_MODEL};

pub const DEFAULT_ADDR: &str = "127.0.0.1:3030";
pub const DEFAULT_ELASTICSEARCH_ENDPOINT: &str = "http://localhost:9200";
pub const DEFAULT_ELASTICSEARCH_INDEX: &str = "blog-posts";
pub const DEFAULT_LLM_TIMEOUT_MS: u64 = 5000;

/// Which backend serves searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Memory,
    Elasticsearch,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mock" => Ok(BackendKind::Memory),
            "elasticsearch" | "es" => Ok(BackendKind::Elasticsearch),
            other => Err(format!("unknown backend '{}'", other)),
        }
    }
}

/// Which term expander semantic and hybrid modes use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpanderKind {
    #[default]
    Static,
    Llm,
}

impl FromStr for ExpanderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "static" => Ok(ExpanderKind::Static),
            "llm" | "openai" => Ok(ExpanderKind::Llm),
            other => Err(format!("unknown expander '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub backend: BackendKind,
    pub seed_path: Option<PathBuf>,
    pub elasticsearch_endpoint: String,
    pub elasticsearch_index: String,
    pub expander: ExpanderKind,
    pub llm_api_key: Option<String>,
    pub llm_endpoint: String,
    pub llm_model: String,
    pub llm_timeout_ms: u64,
    pub hybrid_policy: HybridPolicy,
    pub simulate_latency: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            backend: BackendKind::default(),
            seed_path: None,
            elasticsearch_endpoint: DEFAULT_ELASTICSEARCH_ENDPOINT.to_string(),
            elasticsearch_index: DEFAULT_ELASTICSEARCH_INDEX.to_string(),
            expander: ExpanderKind::default(),
            llm_api_key: None,
            llm_endpoint: DEFAULT_LLM_ENDPOINT.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_timeout_ms: DEFAULT_LLM_TIMEOUT_MS,
            hybrid_policy: HybridPolicy::default(),
            simulate_latency: false,
        }
    }
}

fn parse<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| SearchError::Config(format!("{}: {}", name, e)))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(SearchError::Config(format!(
            "{}: expected a boolean, got '{}'",
            name, other
        ))),
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through `lookup`; unset variables keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(v) = lookup("BLOG_SEARCH_ADDR") {
            config.addr = parse("BLOG_SEARCH_ADDR", &v)?;
        }
        if let Some(v) = lookup("BLOG_SEARCH_BACKEND") {
            config.backend = parse("BLOG_SEARCH_BACKEND", &v)?;
        }
        if let Some(v) = lookup("BLOG_SEARCH_SEED_PATH").filter(|v| !v.trim().is_empty()) {
            config.seed_path = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("ELASTICSEARCH_ENDPOINT") {
            config.elasticsearch_endpoint = v;
        }
        if let Some(v) = lookup("ELASTICSEARCH_INDEX") {
            config.elasticsearch_index = v;
        }
        if let Some(v) = lookup("BLOG_SEARCH_EXPANDER") {
            config.expander = parse("BLOG_SEARCH_EXPANDER", &v)?;
        }
        config.llm_api_key = lookup("OPENAI_API_KEY").filter(|v| !v.trim().is_empty());
        if let Some(v) = lookup("BLOG_SEARCH_LLM_ENDPOINT") {
            config.llm_endpoint = v;
        }
        if let Some(v) = lookup("BLOG_SEARCH_LLM_MODEL") {
            config.llm_model = v;
        }
        if let Some(v) = lookup("BLOG_SEARCH_LLM_TIMEOUT_MS") {
            config.llm_timeout_ms = parse("BLOG_SEARCH_LLM_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = lookup("BLOG_SEARCH_HYBRID") {
            config.hybrid_policy = parse("BLOG_SEARCH_HYBRID", &v)?;
        }
        if let Some(v) = lookup("BLOG_SEARCH_SIMULATE_LATENCY") {
            config.simulate_latency = parse_bool("BLOG_SEARCH_SIMULATE_LATENCY", &v)?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.expander, ExpanderKind::Static);
        assert_eq!(config.hybrid_policy, HybridPolicy::Filter);
        assert!(!config.simulate_latency);
        assert!(config.seed_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("BLOG_SEARCH_ADDR", "0.0.0.0:8080"),
            ("BLOG_SEARCH_BACKEND", "elasticsearch"),
            ("ELASTICSEARCH_ENDPOINT", "http://es:9200"),
            ("BLOG_SEARCH_EXPANDER", "llm"),
            ("OPENAI_API_KEY", "sk-test"),
            ("BLOG_SEARCH_LLM_TIMEOUT_MS", "250"),
            ("BLOG_SEARCH_HYBRID", "weighted"),
            ("BLOG_SEARCH_SIMULATE_LATENCY", "yes"),
            ("BLOG_SEARCH_SEED_PATH", "/tmp/posts.json"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.backend, BackendKind::Elasticsearch);
        assert_eq!(config.elasticsearch_endpoint, "http://es:9200");
        assert_eq!(config.expander, ExpanderKind::Llm);
        assert_eq!(config.llm_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm_timeout_ms, 250);
        assert_eq!(config.hybrid_policy, HybridPolicy::Weighted);
        assert!(config.simulate_latency);
        assert_eq!(config.seed_path, Some(PathBuf::from("/tmp/posts.json")));
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let err = Config::from_lookup(lookup(&[("BLOG_SEARCH_BACKEND", "solr")])).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));

        let err = Config::from_lookup(lookup(&[("BLOG_SEARCH_SIMULATE_LATENCY", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));

        let err =
            Config::from_lookup(lookup(&[("BLOG_SEARCH_ADDR", "not-an-addr")])).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }
}
