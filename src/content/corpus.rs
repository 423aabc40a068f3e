//! The post corpus
//!
//! Built once at startup and never mutated afterwards. Consumers borrow it,
//! and the server shares it behind an `Arc`.

use indexmap::IndexMap;
use std::collections::HashMap;

use super::{Post, PostId};
use crate::error::ContentError;
use crate::filter::FilterCriteria;

/// Ordered, immutable collection of posts with unique ids
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    posts: Vec<Post>,
}

impl Corpus {
    /// Build a corpus, keeping the given order.
    /// Fails if two posts share an id.
    pub fn new(posts: Vec<Post>) -> Result<Self, ContentError> {
        let mut seen: HashMap<PostId, &Post> = HashMap::with_capacity(posts.len());
        for post in &posts {
            if let Some(first) = seen.insert(post.id, post) {
                return Err(ContentError::DuplicateId {
                    id: post.id,
                    first: origin(first),
                    second: origin(post),
                });
            }
        }

        Ok(Self { posts })
    }

    /// All posts in corpus order
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Look up a post by id
    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// The featured post: `id` if it exists, otherwise the first post
    pub fn featured(&self, id: Option<PostId>) -> Option<&Post> {
        id.and_then(|id| self.get(id))
            .or_else(|| self.posts.first())
    }

    /// Posts matching `criteria`, in corpus order
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Post> {
        criteria.apply(&self.posts)
    }

    /// Post count per category, in order of first appearance
    pub fn categories(&self) -> IndexMap<&str, usize> {
        let mut counts = IndexMap::new();
        for post in &self.posts {
            *counts.entry(post.category.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Post count per tag, in order of first appearance
    pub fn tags(&self) -> IndexMap<&str, usize> {
        let mut counts = IndexMap::new();
        for tag in self.posts.iter().flat_map(|p| &p.tags) {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

fn origin(post: &Post) -> String {
    if post.source.is_empty() {
        format!("{:?}", post.title)
    } else {
        post.source.clone()
    }
}
