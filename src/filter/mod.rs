//! Post filtering
//!
//! A stable filter over an immutable corpus: posts are kept or dropped, never
//! reordered or duplicated. The query is matched case-insensitively against
//! the title and excerpt; the category must match exactly.
//!
//! The query is used verbatim. It is not trimmed and no Unicode
//! normalization is applied, so `" "` only matches posts whose title or
//! excerpt contains a space. Lowercasing uses [`str::to_lowercase`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::content::Post;

/// Current search intent: free-text query plus an optional category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text query, empty matches everything
    #[serde(rename = "q", default)]
    pub query: String,

    /// Exact category label, `None` means all categories.
    /// An empty `category` parameter deserializes to `None`, which is what an
    /// "All categories" form option submits.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category: Option<String>,
}

impl FilterCriteria {
    /// Criteria with a query and no category restriction
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: None,
        }
    }

    /// Restrict to a category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// True when the criteria keep every post
    pub fn is_unrestricted(&self) -> bool {
        self.query.is_empty() && self.category.is_none()
    }

    /// Apply to a corpus
    pub fn apply<'a>(&self, corpus: &'a [Post]) -> Vec<&'a Post> {
        filter_posts(corpus, &self.query, self.category.as_deref())
    }
}

/// Filter `corpus` by `query` and `category`, preserving order.
///
/// A post is kept when the query is empty or is a case-insensitive substring
/// of its title or excerpt, and the category is absent or equal to the post's
/// category. No match yields an empty vector.
pub fn filter_posts<'a>(corpus: &'a [Post], query: &str, category: Option<&str>) -> Vec<&'a Post> {
    let needle = query.to_lowercase();

    corpus
        .iter()
        .filter(|post| matches_query(post, &needle) && matches_category(post, category))
        .collect()
}

fn matches_query(post: &Post, needle: &str) -> bool {
    needle.is_empty()
        || post.title.to_lowercase().contains(needle)
        || post.excerpt.to_lowercase().contains(needle)
}

fn matches_category(post: &Post, category: Option<&str>) -> bool {
    category.map_or(true, |c| post.category == c)
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::sample_posts;

    fn ids(posts: &[&Post]) -> Vec<u32> {
        posts.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let corpus = sample_posts();
        let result = filter_posts(&corpus, "", None);
        assert_eq!(result.len(), corpus.len());
        assert!(result.iter().zip(corpus.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_empty_corpus() {
        assert!(filter_posts(&[], "kubernetes", None).is_empty());
        assert!(filter_posts(&[], "", Some("IaC")).is_empty());
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let corpus = sample_posts();
        let upper = filter_posts(&corpus, "KUBERNETES", None);
        let lower = filter_posts(&corpus, "kubernetes", None);
        assert_eq!(ids(&upper), ids(&lower));
        assert_eq!(ids(&lower), vec![1]);
    }

    #[test]
    fn test_query_matches_excerpt() {
        let corpus = sample_posts();
        // "lambda" only appears in the serverless excerpt
        assert_eq!(ids(&filter_posts(&corpus, "Lambda", None)), vec![6]);
    }

    #[test]
    fn test_query_ignores_body_and_tags() {
        let mut post = Post::new(1, "Title", "Excerpt", "Ops");
        post.body = "needle".to_string();
        post.tags = vec!["needle".to_string()];
        assert!(filter_posts(&[post], "needle", None).is_empty());
    }

    #[test]
    fn test_category_is_exact() {
        let corpus = vec![
            Post::new(1, "Pipelines", "", "CI/CD"),
            Post::new(2, "More pipelines", "", "ci/cd"),
        ];
        assert!(filter_posts(&corpus, "", Some("CICD")).is_empty());
        assert_eq!(ids(&filter_posts(&corpus, "", Some("CI/CD"))), vec![1]);
    }

    #[test]
    fn test_category_only() {
        let corpus = sample_posts();
        let result = filter_posts(&corpus, "", Some("IaC"));
        assert_eq!(ids(&result), vec![2]);
        assert!(result.iter().all(|p| p.category == "IaC"));
    }

    #[test]
    fn test_both_predicates_required() {
        let corpus = sample_posts();
        // Matches the query but not the category
        assert!(filter_posts(&corpus, "kubernetes", Some("IaC")).is_empty());
        // Matches the category but not the query
        assert!(filter_posts(&corpus, "terraform", Some("Orchestration")).is_empty());
        assert_eq!(
            ids(&filter_posts(&corpus, "terraform", Some("IaC"))),
            vec![2]
        );
    }

    #[test]
    fn test_two_post_example() {
        let corpus = vec![
            Post::new(1, "Kubernetes Best Practices", "", "Orchestration"),
            Post::new(2, "Terraform & AWS", "", "IaC"),
        ];
        assert_eq!(ids(&filter_posts(&corpus, "kubernetes", None)), vec![1]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let corpus = sample_posts();
        assert!(filter_posts(&corpus, "zzz-no-match", None).is_empty());
    }

    #[test]
    fn test_result_is_ordered_subsequence() {
        let corpus = sample_posts();
        for query in ["", "a", "e", "AWS", "with", " "] {
            let result = filter_posts(&corpus, query, None);
            let positions: Vec<usize> = result
                .iter()
                .map(|p| corpus.iter().position(|c| c.id == p.id).unwrap())
                .collect();
            assert!(
                positions.windows(2).all(|w| w[0] < w[1]),
                "query {:?} reordered or duplicated posts",
                query
            );
        }
    }

    #[test]
    fn test_whitespace_query_is_literal() {
        let corpus = vec![
            Post::new(1, "Serverless", "Patterns", "Serverless"),
            Post::new(2, "GitOps with ArgoCD", "", "GitOps"),
        ];
        // Not trimmed: a lone space only matches text containing a space
        assert_eq!(ids(&filter_posts(&corpus, " ", None)), vec![2]);
        // Surrounding whitespace is part of the needle
        assert!(filter_posts(&corpus, " serverless ", None).is_empty());
        assert_eq!(ids(&filter_posts(&corpus, " with ", None)), vec![2]);
    }

    #[test]
    fn test_criteria_apply() {
        let corpus = sample_posts();
        let criteria = FilterCriteria::new("aws").with_category("Serverless");
        assert!(!criteria.is_unrestricted());
        assert_eq!(ids(&criteria.apply(&corpus)), vec![6]);
        assert!(FilterCriteria::default().is_unrestricted());
    }

    #[test]
    fn test_criteria_deserialize_empty_category() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"q": "ops", "category": ""}"#).unwrap();
        assert_eq!(criteria.query, "ops");
        assert_eq!(criteria.category, None);

        let criteria: FilterCriteria = serde_json::from_str(r#"{"category": "IaC"}"#).unwrap();
        assert_eq!(criteria.query, "");
        assert_eq!(criteria.category.as_deref(), Some("IaC"));
    }
}
