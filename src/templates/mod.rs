//! Built-in DevOpsHub templates using the Tera template engine
//!
//! Templates and static assets are embedded in the binary. The view structs
//! below are what templates see; they are derived from the corpus and config
//! on every render and never stored.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{SiteConfig, Stat};
use crate::content::{Corpus, Icon, Post};
use crate::filter::FilterCriteria;
use crate::helpers::{
    category_path, full_url_for, html_escape, search_url, truncate, url_for, SEARCH_PATH,
};

/// Stylesheet written to `css/style.css`
pub const STYLE_CSS: &str = include_str!("devopshub/assets/style.css");

/// Client-side search script written to `js/search.js`
pub const SEARCH_JS: &str = include_str!("devopshub/assets/search.js");

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("devopshub/layout.html")),
            ("index.html", include_str!("devopshub/index.html")),
            ("listing.html", include_str!("devopshub/listing.html")),
            ("post.html", include_str!("devopshub/post.html")),
            // Partials
            ("partials/nav.html", include_str!("devopshub/partials/nav.html")),
            ("partials/hero.html", include_str!("devopshub/partials/hero.html")),
            (
                "partials/featured.html",
                include_str!("devopshub/partials/featured.html"),
            ),
            (
                "partials/category_card.html",
                include_str!("devopshub/partials/category_card.html"),
            ),
            ("partials/card.html", include_str!("devopshub/partials/card.html")),
            (
                "partials/articles.html",
                include_str!("devopshub/partials/articles.html"),
            ),
            (
                "partials/newsletter.html",
                include_str!("devopshub/partials/newsletter.html"),
            ),
            (
                "partials/footer.html",
                include_str!("devopshub/partials/footer.html"),
            ),
        ])?;

        // Escape text but leave `/` alone so URLs stay readable
        tera.set_escape_fn(html_escape);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Home page: hero, featured post, category showcase, first page of
    /// articles, newsletter
    pub fn render_home(&self, config: &SiteConfig, corpus: &Corpus) -> Result<String> {
        let all: Vec<&Post> = corpus.posts().iter().collect();
        let mut listing = Listing::new(
            config,
            corpus,
            "Latest Articles",
            "Explore our collection of DevOps guides",
            &FilterCriteria::default(),
            &all,
        );
        if listing.posts.len() > config.per_page {
            listing.posts.truncate(config.per_page);
            listing.more_url = Some(url_for(config, "articles/"));
        }

        let mut context = base_context(config, corpus);
        context.insert("hero", &HeroView::new(config, corpus));
        context.insert(
            "featured",
            &corpus
                .featured(config.featured)
                .map(|p| PostCard::new(config, p)),
        );
        context.insert("categories", &showcase(config, corpus));
        context.insert("listing", &listing);

        self.render("index.html", &context)
    }

    /// Article list page (all articles, a category, or search results)
    pub fn render_listing(
        &self,
        config: &SiteConfig,
        corpus: &Corpus,
        listing: &Listing,
    ) -> Result<String> {
        let mut context = base_context(config, corpus);
        context.insert("listing", listing);
        self.render("listing.html", &context)
    }

    /// Full post page
    pub fn render_post(&self, config: &SiteConfig, corpus: &Corpus, post: &Post) -> Result<String> {
        let mut context = base_context(config, corpus);
        context.insert("post", &PostCard::new(config, post));
        context.insert("content", &post.content);
        context.insert("permalink", &full_url_for(config, &post.path()));
        self.render("post.html", &context)
    }
}

/// Variables every page uses
fn base_context(config: &SiteConfig, corpus: &Corpus) -> Context {
    let topics: Vec<Topic> = config
        .footer
        .topics
        .iter()
        .map(|name| Topic {
            name: name.clone(),
            url: search_url(config, &FilterCriteria::new(name.as_str())),
        })
        .collect();

    let mut context = Context::new();
    context.insert("config", config);
    context.insert("root", &url_for(config, ""));
    context.insert("version", env!("CARGO_PKG_VERSION"));
    context.insert("topics", &topics);
    context.insert("post_count", &corpus.len());
    context
}

/// Category showcase: configured entries, or every corpus category
fn showcase(config: &SiteConfig, corpus: &Corpus) -> Vec<CategoryCard> {
    let counts = corpus.categories();
    let icon_of = |name: &str| {
        corpus
            .posts()
            .iter()
            .find(|p| p.category == name)
            .map(|p| p.icon)
            .unwrap_or_default()
    };

    if config.categories.is_empty() {
        counts
            .iter()
            .map(|(name, count)| CategoryCard::new(config, name, icon_of(*name), *count))
            .collect()
    } else {
        config
            .categories
            .iter()
            .map(|c| {
                let count = c
                    .count
                    .unwrap_or_else(|| counts.get(c.name.as_str()).copied().unwrap_or(0));
                let icon = c.icon.unwrap_or_else(|| icon_of(&c.name));
                CategoryCard::new(config, &c.name, icon, count)
            })
            .collect()
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };

    Ok(tera::Value::String(truncate(&s, length, None)))
}

/// Post as shown on cards, the featured block and the post page
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub id: u32,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub category_url: String,
    pub tags: Vec<String>,
    pub date: String,
    pub read_time: String,
    pub icon_name: &'static str,
    pub icon_glyph: &'static str,
    pub url: String,
}

impl PostCard {
    pub fn new(config: &SiteConfig, post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            category: post.category.clone(),
            category_url: url_for(config, &category_path(config, &post.category)),
            tags: post.tags.clone(),
            date: post.display_date(),
            read_time: post.read_time_label(),
            icon_name: post.icon.name(),
            icon_glyph: post.icon.glyph(),
            url: url_for(config, &post.path()),
        }
    }
}

/// Category showcase card
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCard {
    pub name: String,
    pub count: usize,
    pub icon_name: &'static str,
    pub icon_glyph: &'static str,
    pub url: String,
}

impl CategoryCard {
    pub fn new(config: &SiteConfig, name: &str, icon: Icon, count: usize) -> Self {
        Self {
            name: name.to_string(),
            count,
            icon_name: icon.name(),
            icon_glyph: icon.glyph(),
            url: url_for(config, &category_path(config, name)),
        }
    }
}

/// An article grid with its search form
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub heading: String,
    pub subheading: String,
    /// Query echoed back into the search box
    pub query: String,
    /// Selected category in the search form
    pub category: Option<String>,
    pub category_options: Vec<String>,
    pub search_action: String,
    pub posts: Vec<PostCard>,
    pub more_url: Option<String>,
}

impl Listing {
    pub fn new(
        config: &SiteConfig,
        corpus: &Corpus,
        heading: &str,
        subheading: &str,
        criteria: &FilterCriteria,
        posts: &[&Post],
    ) -> Self {
        Self {
            heading: heading.to_string(),
            subheading: subheading.to_string(),
            query: criteria.query.clone(),
            category: criteria.category.clone(),
            category_options: corpus.categories().keys().map(|c| c.to_string()).collect(),
            search_action: url_for(config, SEARCH_PATH),
            posts: posts.iter().map(|p| PostCard::new(config, p)).collect(),
            more_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct HeroView<'a> {
    badge: &'a str,
    headline: &'a str,
    highlight: &'a str,
    headline_tail: &'a str,
    summary: &'a str,
    stats: Vec<Stat>,
}

impl<'a> HeroView<'a> {
    fn new(config: &'a SiteConfig, corpus: &Corpus) -> Self {
        let hero = &config.hero;
        let stats = if hero.stats.is_empty() {
            vec![
                Stat {
                    label: "Articles".to_string(),
                    value: corpus.len().to_string(),
                },
                Stat {
                    label: "Categories".to_string(),
                    value: corpus.categories().len().to_string(),
                },
                Stat {
                    label: "Topics".to_string(),
                    value: corpus.tags().len().to_string(),
                },
            ]
        } else {
            hero.stats.clone()
        };

        Self {
            badge: &hero.badge,
            headline: &hero.headline,
            highlight: &hero.highlight,
            headline_tail: &hero.headline_tail,
            summary: &hero.summary,
            stats,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct Topic {
    name: String,
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CategoryConfig;
    use crate::content::sample_posts;

    fn corpus() -> Corpus {
        Corpus::new(sample_posts()).unwrap()
    }

    #[test]
    fn test_render_home() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let html = renderer.render_home(&config, &corpus()).unwrap();

        assert!(html.contains("Featured Article"));
        assert!(html.contains("Kubernetes Best Practices for Production Environments"));
        assert!(html.contains("Browse by Category"));
        assert!(html.contains("Stay Ahead in DevOps"));
        // Title text is escaped
        assert!(html.contains("Terraform &amp; AWS"));
        assert!(!html.contains("No articles found"));
        // Six posts fit on the first page
        assert!(!html.contains("Load More Articles"));
    }

    #[test]
    fn test_home_paginates() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig {
            per_page: 2,
            ..SiteConfig::default()
        };
        let html = renderer.render_home(&config, &corpus()).unwrap();
        assert!(html.contains("Load More Articles"));
        assert!(html.contains(r#"href="/articles/""#));
    }

    #[test]
    fn test_render_empty_listing() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let corpus = corpus();
        let criteria = FilterCriteria::new("<zzz>");
        let listing = Listing::new(&config, &corpus, "Search", "", &criteria, &[]);
        let html = renderer.render_listing(&config, &corpus, &listing).unwrap();

        assert!(html.contains("No articles found matching your criteria."));
        // The echoed query is escaped
        assert!(html.contains(r#"value="&lt;zzz&gt;""#));
    }

    #[test]
    fn test_listing_marks_selected_category() {
        let config = SiteConfig::default();
        let corpus = corpus();
        let criteria = FilterCriteria::new("").with_category("IaC");
        let hits = corpus.filter(&criteria);
        let listing = Listing::new(&config, &corpus, "IaC", "", &criteria, &hits);
        assert_eq!(listing.posts.len(), 1);
        assert_eq!(listing.category_options.len(), 6);

        let html = TemplateRenderer::new()
            .unwrap()
            .render_listing(&config, &corpus, &listing)
            .unwrap();
        assert!(html.contains(r#"<option value="IaC" selected>IaC</option>"#));
    }

    #[test]
    fn test_render_post() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let corpus = corpus();
        let mut post = corpus.posts()[3].clone();
        post.content = "<p>rendered <em>body</em></p>".to_string();

        let html = renderer.render_post(&config, &corpus, &post).unwrap();
        assert!(html.contains("<p>rendered <em>body</em></p>"));
        assert!(html.contains("15 min read"));
        assert!(html.contains(r#"href="/categories/gitops/""#));
        assert!(html.contains(r#"<link rel="canonical" href="http://example.com/posts/4/">"#));
    }

    #[test]
    fn test_showcase_from_config() {
        let config = SiteConfig {
            categories: vec![
                CategoryConfig {
                    name: "IaC".to_string(),
                    icon: None,
                    count: None,
                },
                CategoryConfig {
                    name: "CI/CD".to_string(),
                    icon: Some(Icon::GitBranch),
                    count: Some(8),
                },
            ],
            ..SiteConfig::default()
        };

        let cards = showcase(&config, &corpus());
        assert_eq!(cards[0].count, 1);
        assert_eq!(cards[0].icon_name, "cloud");
        assert_eq!(cards[1].count, 8);
        assert_eq!(cards[1].url, "/categories/ci-cd/");
    }

    #[test]
    fn test_showcase_defaults_to_corpus() {
        let cards = showcase(&SiteConfig::default(), &corpus());
        let names: Vec<_> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Orchestration", "IaC", "Security", "GitOps", "Observability", "Serverless"]
        );
    }
}
