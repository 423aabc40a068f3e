//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::{Icon, PostId};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub posts_dir: String,
    pub category_dir: String,

    // Writing
    pub render_drafts: bool,
    pub highlight_theme: String,
    pub words_per_minute: u32,

    // Home page
    pub per_page: usize,
    pub featured: Option<PostId>,
    pub nav: Vec<NavItem>,
    pub hero: HeroConfig,
    /// Category showcase; empty means every corpus category
    pub categories: Vec<CategoryConfig>,
    pub newsletter: NewsletterConfig,
    pub footer: FooterConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "DevOpsHub".to_string(),
            description: "DevOps tutorials, best practices, and cloud-native insights.".to_string(),
            author: "DevOpsHub".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),
            posts_dir: "_posts".to_string(),
            category_dir: "categories".to_string(),

            render_drafts: false,
            highlight_theme: "base16-ocean.dark".to_string(),
            words_per_minute: 200,

            per_page: 9,
            featured: None,
            nav: vec![
                NavItem::new("Home", "#home"),
                NavItem::new("Articles", "#articles"),
                NavItem::new("Categories", "#categories"),
                NavItem::new("About", "#about"),
            ],
            hero: HeroConfig::default(),
            categories: Vec::new(),
            newsletter: NewsletterConfig::default(),
            footer: FooterConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;

        if config.words_per_minute == 0 {
            anyhow::bail!("words_per_minute must be greater than zero");
        }
        if config.per_page == 0 {
            anyhow::bail!("per_page must be greater than zero");
        }

        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }
}

/// Navigation bar link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

impl NavItem {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Hero banner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub badge: String,
    pub headline: String,
    pub highlight: String,
    pub headline_tail: String,
    pub summary: String,
    /// Stats row; empty means computed from the corpus
    pub stats: Vec<Stat>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            badge: "Latest in DevOps & Cloud Native".to_string(),
            headline: "Master Modern".to_string(),
            highlight: "Infrastructure".to_string(),
            headline_tail: "& Automation".to_string(),
            summary: "Deep dives into Kubernetes, CI/CD pipelines, Infrastructure as Code, and \
                      Cloud Native technologies. Level up your DevOps skills with \
                      production-ready guides."
                .to_string(),
            stats: Vec::new(),
        }
    }
}

/// One figure in the hero stats row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

/// Category showcase entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    #[serde(default)]
    pub icon: Option<Icon>,
    /// Displayed count; the corpus count when absent
    #[serde(default)]
    pub count: Option<usize>,
}

/// Newsletter block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsletterConfig {
    pub enable: bool,
    pub heading: String,
    pub blurb: String,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            enable: true,
            heading: "Stay Ahead in DevOps".to_string(),
            blurb: "Get weekly insights on Kubernetes, CI/CD, and Cloud Native technologies \
                    delivered straight to your inbox."
                .to_string(),
        }
    }
}

/// Footer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub blurb: String,
    pub quick_links: Vec<NavItem>,
    pub topics: Vec<String>,
    pub social: Vec<NavItem>,
    pub copyright: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            blurb: "Your premier destination for DevOps tutorials, best practices, and \
                    cloud-native insights. Building the future of infrastructure, one article \
                    at a time."
                .to_string(),
            quick_links: vec![
                NavItem::new("Home", "#home"),
                NavItem::new("Articles", "#articles"),
                NavItem::new("Categories", "#categories"),
                NavItem::new("About", "#about"),
            ],
            topics: ["Kubernetes", "Docker", "Terraform", "AWS", "CI/CD"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            social: vec![
                NavItem::new("GitHub", "https://github.com"),
                NavItem::new("Twitter", "https://twitter.com"),
                NavItem::new("LinkedIn", "https://linkedin.com"),
            ],
            copyright: "© 2024 DevOpsHub. All rights reserved.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "DevOpsHub");
        assert_eq!(config.posts_dir, "_posts");
        assert_eq!(config.nav.len(), 4);
        assert!(config.newsletter.enable);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Ops Blog
per_page: 3
featured: 4
categories:
  - name: CI/CD
    icon: git-branch
    count: 8
  - name: IaC
hero:
  badge: New
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Ops Blog");
        assert_eq!(config.per_page, 3);
        assert_eq!(config.featured, Some(4));
        assert_eq!(config.categories[0].icon, Some(Icon::GitBranch));
        assert_eq!(config.categories[0].count, Some(8));
        assert_eq!(config.categories[1].count, None);
        assert_eq!(config.hero.badge, "New");
        // Untouched sections keep their defaults
        assert_eq!(config.hero.highlight, "Infrastructure");
        assert_eq!(config.footer.topics.len(), 5);
    }

    #[test]
    fn test_load_rejects_zero_page_size() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "per_page: 0\n").unwrap();
        assert!(SiteConfig::load(&path).is_err());
    }
}
