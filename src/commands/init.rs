//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::{sample_posts, FrontMatter};

const CONFIG_TEMPLATE: &str = r##"# DevOpsHub configuration

# Site
title: DevOpsHub
description: DevOps tutorials, best practices, and cloud-native insights.
author: DevOpsHub
language: en

# URL
url: http://example.com
root: /

# Directory
source_dir: source
public_dir: public
posts_dir: _posts
category_dir: categories

# Writing
render_drafts: false
highlight_theme: base16-ocean.dark
words_per_minute: 200

# Home page
per_page: 9
# featured: 1

nav:
  - { label: Home, href: "#home" }
  - { label: Articles, href: "#articles" }
  - { label: Categories, href: "#categories" }
  - { label: About, href: "#about" }

# Category showcase. Leave empty to list every category in use;
# `count` overrides the number of posts shown on the card.
categories: []
#  - { name: CI/CD, icon: git-branch, count: 8 }

newsletter:
  enable: true
"##;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("{:?} already contains a site", target_dir);
    }

    let config = SiteConfig::default();
    let posts_dir = target_dir
        .join(&config.source_dir)
        .join(&config.posts_dir);
    fs::create_dir_all(&posts_dir)?;

    fs::write(&config_path, CONFIG_TEMPLATE)?;

    for post in sample_posts() {
        let path = posts_dir.join(format!("{}.md", slug::slugify(&post.title)));
        let document = FrontMatter::from_post(&post).to_document(&post.body)?;
        fs::write(&path, document)?;
        tracing::debug!("Wrote {:?}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;

    #[test]
    fn test_init_round_trips_sample_posts() {
        let dir = tempfile::TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.per_page, 9);
        assert!(site.posts_dir().is_dir());

        let corpus = site.load_corpus().unwrap();
        let expected = sample_posts();
        assert_eq!(corpus.len(), expected.len());
        for (loaded, sample) in corpus.posts().iter().zip(&expected) {
            assert_eq!(loaded.id, sample.id);
            assert_eq!(loaded.title, sample.title);
            assert_eq!(loaded.excerpt, sample.excerpt);
            assert_eq!(loaded.category, sample.category);
            assert_eq!(loaded.tags, sample.tags);
            assert_eq!(loaded.date, sample.date);
            assert_eq!(loaded.read_time, sample.read_time);
            assert_eq!(loaded.icon, sample.icon);
        }
    }

    #[test]
    fn test_config_template_matches_defaults() {
        let config: SiteConfig = serde_yaml::from_str(CONFIG_TEMPLATE).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.nav, defaults.nav);
        assert_eq!(config.nav[0].href, "#home");
        assert_eq!(config.words_per_minute, defaults.words_per_minute);
        assert!(config.categories.is_empty());
        assert!(config.newsletter.enable);
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = tempfile::TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
