//! Search query types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Search mode selected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Exact,
    Fuzzy,
    Semantic,
    Hybrid,
}

impl SearchMode {
    pub const ALL: [SearchMode; 4] = [
        SearchMode::Exact,
        SearchMode::Fuzzy,
        SearchMode::Semantic,
        SearchMode::Hybrid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Exact => "exact",
            SearchMode::Fuzzy => "fuzzy",
            SearchMode::Semantic => "semantic",
            SearchMode::Hybrid => "hybrid",
        }
    }

    /// Parse a mode string; unknown or missing modes fall back to exact
    pub fn parse_or_default(mode: Option<&str>) -> Self {
        mode.and_then(|m| m.parse().ok()).unwrap_or_default()
    }

    /// Field searched when the caller does not name one
    pub fn default_field(&self) -> Field {
        match self {
            SearchMode::Exact => Field::Title,
            SearchMode::Fuzzy => Field::Content,
            SearchMode::Semantic | SearchMode::Hybrid => Field::All,
        }
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(SearchMode::Exact),
            "fuzzy" => Ok(SearchMode::Fuzzy),
            "semantic" => Ok(SearchMode::Semantic),
            "hybrid" => Ok(SearchMode::Hybrid),
            other => Err(format!("unknown search mode '{}'", other)),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post field a query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Content,
    Topic,
    /// Title, content and topics together
    All,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Content => "content",
            Field::Topic => "topic",
            Field::All => "all",
        }
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Field::Title),
            "content" => Ok(Field::Content),
            "topic" | "topics" => Ok(Field::Topic),
            "all" => Ok(Field::All),
            other => Err(format!("unknown field '{}'", other)),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub mode: SearchMode,
    pub field: Option<Field>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            text: text.into(),
            mode,
            field: None,
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.field = Some(field);
        self
    }

    /// Field to search, falling back to the mode's default
    pub fn effective_field(&self) -> Field {
        self.field.unwrap_or_else(|| self.mode.default_field())
    }
}
