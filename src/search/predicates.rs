//! Field-scoped match predicates
//!
//! All checks are case-insensitive. Callers pass the query already
//! lower-cased (see [`normalize`]); post fields are lower-cased here.
//! An empty query is a substring of every string, so containment checks
//! accept every post for it.

use rayon::prelude::*;

use crate::types::{Field, Post};

/// Threshold for using parallel filtering (post count)
const PARALLEL_FILTER_THRESHOLD: usize = 1000;

/// Lower-case a raw query for matching
pub fn normalize(query: &str) -> String {
    query.to_lowercase()
}

/// Case-insensitive substring containment
pub fn contains(text: &str, normalized_query: &str) -> bool {
    text.to_lowercase().contains(normalized_query)
}

/// Case-insensitive full-string equality
pub fn equals(text: &str, normalized_query: &str) -> bool {
    text.to_lowercase() == normalized_query
}

/// Check a post against a query on one field.
///
/// `fuzzy` switches title and topic checks from equality to containment.
/// Content and `All` are always containment checks.
pub fn matches(post: &Post, normalized_query: &str, field: Field, fuzzy: bool) -> bool {
    match field {
        Field::Title => {
            if fuzzy {
                contains(&post.title, normalized_query)
            } else {
                equals(&post.title, normalized_query)
            }
        }
        Field::Content => contains(&post.content, normalized_query),
        Field::Topic => post.topics.iter().any(|topic| {
            if fuzzy {
                contains(topic, normalized_query)
            } else {
                equals(topic, normalized_query)
            }
        }),
        Field::All => matches_any_field(post, normalized_query),
    }
}

/// Title, content or any topic contains the query
pub fn matches_any_field(post: &Post, normalized_query: &str) -> bool {
    contains(&post.title, normalized_query)
        || contains(&post.content, normalized_query)
        || post.topics.iter().any(|t| contains(t, normalized_query))
}

/// Keep posts accepted by `predicate`, preserving input order
pub fn filter_posts<F>(posts: Vec<Post>, predicate: F) -> Vec<Post>
where
    F: Fn(&Post) -> bool + Sync + Send,
{
    if posts.len() > PARALLEL_FILTER_THRESHOLD {
        posts.into_par_iter().filter(|p| predicate(p)).collect()
    } else {
        posts.into_iter().filter(|p| predicate(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn react_post() -> Post {
        Post::new(1, "Getting Started with React Hooks")
            .with_content("Learn useState and useEffect")
            .with_topics(["React", "JavaScript"])
    }

    #[test]
    fn test_title_exact_requires_equality() {
        let post = react_post();
        assert!(matches(&post, "getting started with react hooks", Field::Title, false));
        assert!(!matches(&post, "react hooks", Field::Title, false));
    }

    #[test]
    fn test_title_fuzzy_is_containment() {
        let post = react_post();
        assert!(matches(&post, "react hooks", Field::Title, true));
        assert!(!matches(&post, "vue", Field::Title, true));
    }

    #[test]
    fn test_content_ignores_fuzzy_flag() {
        let post = react_post();
        assert!(matches(&post, "usestate", Field::Content, false));
        assert!(matches(&post, "usestate", Field::Content, true));
    }

    #[test]
    fn test_topic_exact_and_fuzzy() {
        let post = react_post();
        assert!(matches(&post, "javascript", Field::Topic, false));
        assert!(!matches(&post, "java", Field::Topic, false));
        assert!(matches(&post, "java", Field::Topic, true));
    }

    #[test]
    fn test_all_fields() {
        let post = react_post();
        assert!(matches(&post, "started", Field::All, false));
        assert!(matches(&post, "useeffect", Field::All, false));
        assert!(matches(&post, "script", Field::All, false));
        assert!(!matches(&post, "python", Field::All, true));
    }

    #[test]
    fn test_empty_query_matches_by_containment() {
        let post = react_post();
        assert!(matches(&post, "", Field::Content, true));
        assert!(matches(&post, "", Field::Title, true));
        assert!(matches(&post, "", Field::All, false));
        // Equality against an empty query only holds for empty fields
        assert!(!matches(&post, "", Field::Title, false));
    }

    #[test]
    fn test_filter_preserves_order() {
        let posts: Vec<Post> = (0..1500)
            .map(|i| Post::new(i, if i % 3 == 0 { "rust" } else { "go" }))
            .collect();
        let filtered = filter_posts(posts, |p| matches(p, "rust", Field::Title, false));
        assert_eq!(filtered.len(), 500);
        assert!(filtered.windows(2).all(|w| w[0].id < w[1].id));
    }
}
