//! devopshub: static generator and preview server for the DevOpsHub blog
//!
//! Posts are loaded once into an immutable [`content::Corpus`] and rendered
//! with embedded Tera templates. Search and category browsing go through a
//! single pure function, [`filter::filter_posts`], whether it runs at build
//! time, behind the preview server, or from the CLI.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod filter;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use error::ContentError;
pub use filter::{filter_posts, FilterCriteria};

/// A site rooted at a directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Open the site in `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        })
    }

    /// Directory holding post files
    pub fn posts_dir(&self) -> PathBuf {
        self.source_dir.join(&self.config.posts_dir)
    }

    /// Load the corpus
    pub fn load_corpus(&self) -> Result<content::Corpus> {
        content::loader::ContentLoader::new(self).load_corpus()
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
