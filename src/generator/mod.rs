//! Generator module - writes the static site using the built-in templates

use anyhow::{Context as _, Result};
use indexmap::{IndexMap, IndexSet};
use std::fs;
use std::path::Path;

use crate::content::{Corpus, PostSummary};
use crate::filter::FilterCriteria;
use crate::helpers::{category_path, url_for, SEARCH_PATH};
use crate::templates::{Listing, TemplateRenderer, SEARCH_JS, STYLE_CSS};
use crate::Site;

/// Static site generator
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Generate the entire site into the public directory
    pub fn generate(&self, corpus: &Corpus) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        self.write("css/style.css", STYLE_CSS)?;
        self.write("js/search.js", SEARCH_JS)?;

        self.generate_home(corpus)?;
        self.generate_articles_page(corpus)?;
        self.generate_search_page(corpus)?;
        self.generate_category_pages(corpus)?;
        self.generate_post_pages(corpus)?;
        self.generate_search_index(corpus)?;

        Ok(())
    }

    fn generate_home(&self, corpus: &Corpus) -> Result<()> {
        let html = self.renderer.render_home(&self.site.config, corpus)?;
        self.write("index.html", &html)
    }

    /// Every article on one page, the target of "Load More Articles"
    fn generate_articles_page(&self, corpus: &Corpus) -> Result<()> {
        let criteria = FilterCriteria::default();
        let posts = corpus.filter(&criteria);
        let listing = Listing::new(
            &self.site.config,
            corpus,
            "All Articles",
            "Every guide in the collection",
            &criteria,
            &posts,
        );
        let html = self
            .renderer
            .render_listing(&self.site.config, corpus, &listing)?;
        self.write("articles/index.html", &html)
    }

    /// Static search page. It lists every article; `search.js` narrows it
    /// down from the `q` and `category` parameters of the page URL.
    fn generate_search_page(&self, corpus: &Corpus) -> Result<()> {
        let criteria = FilterCriteria::default();
        let posts = corpus.filter(&criteria);
        let listing = Listing::new(
            &self.site.config,
            corpus,
            "Search",
            "Filter every article by text and category",
            &criteria,
            &posts,
        );
        let html = self
            .renderer
            .render_listing(&self.site.config, corpus, &listing)?;
        self.write(&format!("{}index.html", SEARCH_PATH), &html)
    }

    /// One page per category: every category used by a post, plus any
    /// showcase category from the config (which may have no posts yet).
    ///
    /// Category matching is exact, so two labels that slugify to the same
    /// page path are an error rather than one page overwriting the other.
    fn generate_category_pages(&self, corpus: &Corpus) -> Result<()> {
        let config = &self.site.config;
        let mut names: IndexSet<&str> = corpus.categories().keys().copied().collect();
        names.extend(config.categories.iter().map(|c| c.name.as_str()));

        let mut pages: IndexMap<String, &str> = IndexMap::with_capacity(names.len());
        for &name in &names {
            if let Some(other) = pages.insert(category_path(config, name), name) {
                anyhow::bail!(
                    "Categories {:?} and {:?} share the page {:?}; rename one of them",
                    other,
                    name,
                    category_path(config, name)
                );
            }
        }

        for (path, name) in pages {
            let criteria = FilterCriteria::new("").with_category(name);
            let posts = corpus.filter(&criteria);
            let subheading = match posts.len() {
                1 => "1 article".to_string(),
                n => format!("{} articles", n),
            };
            let listing = Listing::new(config, corpus, name, &subheading, &criteria, &posts);
            let html = self.renderer.render_listing(config, corpus, &listing)?;

            self.write(&format!("{}index.html", path), &html)?;
        }

        Ok(())
    }

    fn generate_post_pages(&self, corpus: &Corpus) -> Result<()> {
        for post in corpus.posts() {
            let html = self
                .renderer
                .render_post(&self.site.config, corpus, post)?;
            self.write(&format!("{}index.html", post.path()), &html)?;
        }

        tracing::debug!("Generated {} post pages", corpus.len());
        Ok(())
    }

    /// Generate search index (JSON) for client-side filtering
    fn generate_search_index(&self, corpus: &Corpus) -> Result<()> {
        let root = url_for(&self.site.config, "");
        let summaries: Vec<PostSummary> =
            corpus.posts().iter().map(|p| p.summary(&root)).collect();

        let json = serde_json::to_string_pretty(&summaries)?;
        self.write("search.json", &json)?;
        tracing::info!("Generated search.json");

        Ok(())
    }

    /// Write a file below the public directory, creating parents
    fn write(&self, relative: &str, contents: &str) -> Result<()> {
        let output_path = self.site.public_dir.join(Path::new(relative));
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, contents)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}
