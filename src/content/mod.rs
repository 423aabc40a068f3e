//! Content module - posts, the corpus, and loading them from disk

mod corpus;
mod frontmatter;
pub mod loader;
pub mod markdown;
mod post;
mod sample;

pub use corpus::Corpus;
pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{Icon, Post, PostId, PostSummary};
pub use sample::sample_posts;
