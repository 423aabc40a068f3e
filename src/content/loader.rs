//! Content loader - builds the corpus from the posts directory

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::markdown::{first_paragraph, plain_text};
use super::{sample_posts, Corpus, FrontMatter, Icon, MarkdownRenderer, Post, PostId};
use crate::error::ContentError;
use crate::helpers::read_time;
use crate::Site;

/// Loads posts from `<source_dir>/<posts_dir>`
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::with_theme(&site.config.highlight_theme);
        Self { site, renderer }
    }

    /// Load the corpus.
    ///
    /// Files that fail to parse are skipped with a warning; duplicate ids
    /// are fatal. Posts are ordered by id. Without a posts directory the
    /// built-in articles are used.
    pub fn load_corpus(&self) -> Result<Corpus> {
        let posts_dir = self.site.posts_dir();
        if !posts_dir.exists() {
            tracing::info!(
                "No posts directory at {:?}, using built-in articles",
                posts_dir
            );
            let posts = sample_posts()
                .into_iter()
                .map(|mut post| {
                    self.finish_post(&mut post)?;
                    Ok(post)
                })
                .collect::<Result<Vec<_>>>()?;
            return Ok(Corpus::new(posts)?);
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !(path.is_file() && is_markdown_file(path)) {
                continue;
            }

            match self.load_post(path) {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => tracing::debug!("Skipping unpublished post {:?}", path),
                Err(e) => tracing::warn!("Failed to load post {:?}: {}", path, e),
            }
        }

        posts.sort_by_key(|p| p.id);
        tracing::debug!("Loaded {} posts from {:?}", posts.len(), posts_dir);

        Ok(Corpus::new(posts)?)
    }

    /// Every id declared in a post file's front matter, in file name order.
    /// Unpublished posts count, and so do files the corpus would reject for
    /// other reasons; only files without a readable id are left out.
    pub fn declared_ids(&self) -> Vec<PostId> {
        let posts_dir = self.site.posts_dir();
        if !posts_dir.exists() {
            return Vec::new();
        }

        WalkDir::new(&posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && is_markdown_file(e.path()))
            .filter_map(|e| {
                let raw = fs::read_to_string(e.path()).ok()?;
                match FrontMatter::parse(&raw) {
                    Ok((fm, _)) => fm.id,
                    Err(err) => {
                        tracing::debug!("No id in {:?}: {}", e.path(), err);
                        None
                    }
                }
            })
            .collect()
    }

    /// Load a single post file. Unpublished posts come back as `None`
    /// unless drafts are rendered.
    fn load_post(&self, path: &Path) -> Result<Option<Post>> {
        let raw = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&raw).map_err(|e| ContentError::FrontMatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if !fm.published && !self.site.config.render_drafts {
            return Ok(None);
        }

        let missing = |field: &'static str| ContentError::MissingField {
            path: path.to_path_buf(),
            field,
        };
        let id = fm.id.ok_or_else(|| missing("id"))?;
        let title = fm.title.as_deref().ok_or_else(|| missing("title"))?;
        let category = fm.category.as_deref().ok_or_else(|| missing("category"))?;

        let date = fm.parse_date().unwrap_or_else(|| {
            fs::metadata(path)
                .and_then(|m| m.modified())
                .map(|t| chrono::DateTime::<Local>::from(t).date_naive())
                .unwrap_or_else(|_| Local::now().date_naive())
        });

        let icon = match fm.icon.as_deref() {
            Some(name) => name.parse::<Icon>()?,
            None => Icon::default(),
        };

        let source = path
            .strip_prefix(&self.site.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let mut post = Post::new(id, title, fm.excerpt.as_deref().unwrap_or_default(), category);
        post.body = body.to_string();
        post.tags = fm.tags;
        post.date = date;
        post.read_time = fm.read_time.unwrap_or(0);
        post.icon = icon;
        post.source = source;

        self.finish_post(&mut post)?;
        Ok(Some(post))
    }

    /// Render the body and fill in derived fields: an empty excerpt comes from
    /// the teaser or first paragraph, a zero read time is estimated.
    fn finish_post(&self, post: &mut Post) -> Result<()> {
        let (teaser, full) = MarkdownRenderer::split_more(&post.body);

        if post.excerpt.is_empty() {
            post.excerpt = match teaser {
                Some(teaser) => plain_text(teaser),
                None => first_paragraph(&full),
            };
        }

        if post.read_time == 0 {
            post.read_time = read_time(&plain_text(&full), self.site.config.words_per_minute);
        }

        post.content = self.renderer.render(&full)?;
        Ok(())
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
