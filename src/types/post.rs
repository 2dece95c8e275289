//! Blog post: the unit of search

use serde::{Deserialize, Serialize};

/// Blog post as indexed by the search engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    /// Publication date, `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub image: String,
}

impl Post {
    /// Create a new post with only id and title set
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            excerpt: String::new(),
            content: String::new(),
            author: String::new(),
            date: String::new(),
            topics: Vec::new(),
            image: String::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }
}

/// Seed file layout: `{"posts": [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostCollection {
    #[serde(default)]
    pub posts: Vec<Post>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_post() {
        let post: Post = serde_json::from_str(r#"{"id": 7, "title": "Hello"}"#).unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.title, "Hello");
        assert!(post.topics.is_empty());
        assert!(post.content.is_empty());
    }

    #[test]
    fn test_builder() {
        let post = Post::new(1, "Title")
            .with_content("Body")
            .with_topics(["React", "JavaScript"])
            .with_author("Jane")
            .with_date("2024-01-15");
        assert_eq!(post.topics, vec!["React".to_string(), "JavaScript".to_string()]);
        assert_eq!(post.author, "Jane");
        assert_eq!(post.date, "2024-01-15");
    }
}
