//! Weighted multi-signal scoring for hybrid search
//!
//! Each signal that fires adds its weight to the post's score. Posts with
//! a zero score are dropped; the rest are ordered by descending score with
//! ties kept in store order.

use rapidfuzz::distance::levenshtein;
use rayon::prelude::*;

use super::predicates::contains;
use crate::types::Post;

/// Threshold for scoring in parallel (post count)
const PARALLEL_SCORE_THRESHOLD: usize = 1000;

/// Signal weights, strictly decreasing in priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HybridWeights {
    /// Title contains the original query
    pub title: u32,
    /// Content contains the original query
    pub content: u32,
    /// A topic contains the original query
    pub topic: u32,
    /// Title has an expansion term as a whole token
    pub expanded_title: u32,
    /// Content has an expansion term as a whole token
    pub expanded_content: u32,
    /// Content has a near-miss spelling of every query token
    pub typo_content: u32,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            title: 5,
            content: 3,
            topic: 2,
            expanded_title: 2,
            expanded_content: 1,
            typo_content: 1,
        }
    }
}

/// A post with its aggregate hybrid score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPost {
    pub post: Post,
    pub score: u32,
}

/// Terms the expansion added on top of the original query, lower-cased
/// and deduplicated in order of appearance
pub fn expansion_terms(normalized_query: &str, expanded: &str) -> Vec<String> {
    let query_tokens = tokenize(normalized_query);
    let mut terms: Vec<String> = Vec::new();

    for token in tokenize(expanded) {
        if query_tokens.contains(&token) || terms.contains(&token) {
            continue;
        }
        terms.push(token);
    }

    terms
}

/// Edit budget for a token of `len` characters: 0 up to 2 chars,
/// 1 up to 5 chars, 2 beyond
pub fn auto_fuzziness(len: usize) -> usize {
    match len {
        0..=2 => 0,
        3..=5 => 1,
        _ => 2,
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Every query token has a text token within its edit budget
pub fn typo_tolerant_match(text: &str, normalized_query: &str) -> bool {
    let query_tokens = tokenize(normalized_query);
    if query_tokens.is_empty() {
        return false;
    }
    let text_tokens = tokenize(text);

    query_tokens.iter().all(|q| {
        let budget = auto_fuzziness(q.chars().count());
        text_tokens
            .iter()
            .any(|t| levenshtein::distance(q.chars(), t.chars()) <= budget)
    })
}

/// Aggregate score of one post
pub fn score_post(
    post: &Post,
    normalized_query: &str,
    expansion: &[String],
    weights: &HybridWeights,
) -> u32 {
    let mut score = 0;

    if contains(&post.title, normalized_query) {
        score += weights.title;
    }
    if contains(&post.content, normalized_query) {
        score += weights.content;
    }
    if post.topics.iter().any(|t| contains(t, normalized_query)) {
        score += weights.topic;
    }
    // Expansion terms count only as whole tokens
    let title_tokens = tokenize(&post.title);
    if expansion.iter().any(|term| title_tokens.contains(term)) {
        score += weights.expanded_title;
    }
    let content_tokens = tokenize(&post.content);
    if expansion.iter().any(|term| content_tokens.contains(term)) {
        score += weights.expanded_content;
    }
    if typo_tolerant_match(&post.content, normalized_query) {
        score += weights.typo_content;
    }

    score
}

/// Score every post and return the matches, best first
pub fn rank(
    posts: Vec<Post>,
    normalized_query: &str,
    expansion: &[String],
    weights: &HybridWeights,
) -> Vec<ScoredPost> {
    let score = |post: Post| {
        let score = score_post(&post, normalized_query, expansion, weights);
        (score > 0).then_some(ScoredPost { post, score })
    };

    let mut scored: Vec<ScoredPost> = if posts.len() > PARALLEL_SCORE_THRESHOLD {
        posts.into_par_iter().filter_map(score).collect()
    } else {
        posts.into_iter().filter_map(score).collect()
    };

    // Stable sort keeps store order among equal scores
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_terms_drop_query_tokens() {
        let terms = expansion_terms("react", "react javascript frontend component hooks jsx");
        assert_eq!(terms, vec!["javascript", "frontend", "component", "hooks", "jsx"]);
    }

    #[test]
    fn test_expansion_terms_dedupe() {
        let terms = expansion_terms("web app", "Web App javascript frontend javascript");
        assert_eq!(terms, vec!["javascript", "frontend"]);
    }

    #[test]
    fn test_expansion_terms_strip_punctuation() {
        let terms = expansion_terms("react", "React, JSX; hooks.");
        assert_eq!(terms, vec!["jsx", "hooks"]);
    }

    #[test]
    fn test_expansion_terms_match_whole_tokens_only() {
        let weights = HybridWeights::default();
        let post = Post::new(1, "Side Effects").with_content("posts about threads and uis");
        let expansion = expansion_terms("typescript", "typescript ts ui");

        assert_eq!(score_post(&post, "typescript", &expansion, &weights), 0);

        let post = Post::new(2, "Why TS").with_content("a ui kit");
        assert_eq!(
            score_post(&post, "typescript", &expansion, &weights),
            weights.expanded_title + weights.expanded_content
        );
    }

    #[test]
    fn test_auto_fuzziness() {
        assert_eq!(auto_fuzziness(2), 0);
        assert_eq!(auto_fuzziness(4), 1);
        assert_eq!(auto_fuzziness(9), 2);
    }

    #[test]
    fn test_typo_tolerant_match() {
        assert!(typo_tolerant_match("Async Rust and the tokio runtime", "runtme"));
        assert!(typo_tolerant_match("Async Rust and the tokio runtime", "tokyo runtime"));
        assert!(!typo_tolerant_match("Async Rust and the tokio runtime", "python"));
        // Short tokens get no edit budget
        assert!(!typo_tolerant_match("go is fun", "ga"));
        assert!(!typo_tolerant_match("anything", ""));
    }

    #[test]
    fn test_score_post_sums_signals() {
        let weights = HybridWeights::default();
        let post = Post::new(1, "React Patterns")
            .with_content("Building a react component library")
            .with_topics(["React"]);
        let expansion = expansion_terms("react", "react javascript component");

        // title 5 + content 3 + topic 2 + expanded content 1 + typo content 1
        assert_eq!(score_post(&post, "react", &expansion, &weights), 12);
    }

    #[test]
    fn test_rank_orders_by_score_then_store_order() {
        let weights = HybridWeights::default();
        let posts = vec![
            Post::new(1, "Intro").with_content("we mention rust once"),
            Post::new(2, "Rust Ownership").with_content("borrowing explained"),
            Post::new(3, "Other").with_content("nothing relevant"),
            Post::new(4, "More").with_content("rust again"),
        ];

        let ranked = rank(posts, "rust", &[], &weights);
        let ids: Vec<u64> = ranked.iter().map(|s| s.post.id).collect();
        assert_eq!(ids, vec![2, 1, 4]);
        assert_eq!(ranked[0].score, 5);
        assert_eq!(ranked[1].score, 4);
    }
}
