//! Create a new post

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::PathBuf;

use crate::content::loader::ContentLoader;
use crate::content::{FrontMatter, Icon, Post};
use crate::Site;

/// Options for a new post
#[derive(Debug, Clone, Default)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub category: &'a str,
    pub tags: &'a [String],
    pub icon: Option<Icon>,
}

/// Write a post file with the next free id and return its path.
///
/// The id is one past the highest id declared by any file in the posts
/// directory, drafts included, or 1 when there is none.
pub fn create_post(site: &Site, options: &NewPost<'_>) -> Result<PathBuf> {
    let posts_dir = site.posts_dir();
    let id = ContentLoader::new(site)
        .declared_ids()
        .into_iter()
        .max()
        .map_or(1, |id| id + 1);

    fs::create_dir_all(&posts_dir)?;

    let file_path = posts_dir.join(format!("{}.md", slug::slugify(options.title)));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let mut post = Post::new(id, options.title, "", options.category);
    post.tags = options.tags.to_vec();
    post.date = Local::now().date_naive();
    post.icon = options.icon.unwrap_or_default();

    // Excerpt and read time are derived from the body once it is written
    let mut front_matter = FrontMatter::from_post(&post);
    front_matter.excerpt = None;
    front_matter.read_time = None;

    let body = "Write the teaser here.\n\n<!-- more -->\n\nAnd the rest of the article here.";
    fs::write(&file_path, front_matter.to_document(body)?)?;

    tracing::info!("Created post {} at {:?}", id, file_path);
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_gets_next_id() {
        let dir = tempfile::TempDir::new().unwrap();
        crate::commands::init::init_site(dir.path()).unwrap();
        let site = Site::new(dir.path()).unwrap();

        let tags = vec!["Helm".to_string()];
        let path = create_post(
            &site,
            &NewPost {
                title: "Helm Charts 101",
                category: "Orchestration",
                tags: &tags,
                icon: Some(Icon::Container),
            },
        )
        .unwrap();
        assert!(path.ends_with("helm-charts-101.md"));

        let corpus = site.load_corpus().unwrap();
        let post = corpus.get(7).unwrap();
        assert_eq!(post.title, "Helm Charts 101");
        assert_eq!(post.tags, tags);
        assert_eq!(post.excerpt, "Write the teaser here.");
        assert_eq!(post.icon, Icon::Container);
    }

    #[test]
    fn test_new_post_skips_draft_ids() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut site = Site::new(dir.path()).unwrap();
        let posts_dir = site.posts_dir();
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("a.md"),
            "---\nid: 1\ntitle: A\ncategory: Ops\n---\nBody",
        )
        .unwrap();
        fs::write(
            posts_dir.join("draft.md"),
            "---\nid: 2\ntitle: Draft\ncategory: Ops\npublished: false\n---\nBody",
        )
        .unwrap();

        let options = NewPost {
            title: "Fresh",
            category: "Ops",
            ..Default::default()
        };
        create_post(&site, &options).unwrap();

        site.config.render_drafts = true;
        let corpus = site.load_corpus().unwrap();
        let ids: Vec<_> = corpus.posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(corpus.get(3).unwrap().title, "Fresh");
    }

    #[test]
    fn test_new_post_in_empty_site() {
        let dir = tempfile::TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let options = NewPost {
            title: "First",
            category: "Ops",
            ..Default::default()
        };

        create_post(&site, &options).unwrap();
        assert_eq!(site.load_corpus().unwrap().get(1).unwrap().title, "First");
        // Same title twice collides on the file name
        assert!(create_post(&site, &options).is_err());
    }
}
