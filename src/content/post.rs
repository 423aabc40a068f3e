//! Post model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ContentError;

/// Stable, unique post identifier
pub type PostId = u32;

/// Icon shown on post and category cards.
///
/// Purely display metadata: filtering never looks at it, and templates map it
/// to a glyph and a CSS class without knowing about any icon toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Container,
    Cloud,
    Shield,
    GitBranch,
    Server,
    Zap,
    Terminal,
    Cpu,
    #[default]
    FileText,
}

impl Icon {
    /// Every icon, in declaration order
    pub const ALL: [Icon; 9] = [
        Icon::Container,
        Icon::Cloud,
        Icon::Shield,
        Icon::GitBranch,
        Icon::Server,
        Icon::Zap,
        Icon::Terminal,
        Icon::Cpu,
        Icon::FileText,
    ];

    /// Kebab-case name, also used as the CSS class suffix
    pub fn name(self) -> &'static str {
        match self {
            Icon::Container => "container",
            Icon::Cloud => "cloud",
            Icon::Shield => "shield",
            Icon::GitBranch => "git-branch",
            Icon::Server => "server",
            Icon::Zap => "zap",
            Icon::Terminal => "terminal",
            Icon::Cpu => "cpu",
            Icon::FileText => "file-text",
        }
    }

    /// Text glyph rendered inside the icon badge
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Container => "📦",
            Icon::Cloud => "☁",
            Icon::Shield => "🛡",
            Icon::GitBranch => "⑂",
            Icon::Server => "🖥",
            Icon::Zap => "⚡",
            Icon::Terminal => "⌨",
            Icon::Cpu => "▦",
            Icon::FileText => "📄",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Icon {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Icon::ALL
            .into_iter()
            .find(|icon| icon.name() == wanted || icon.name().replace('-', "") == wanted)
            .ok_or_else(|| ContentError::UnknownIcon(s.to_string()))
    }
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier
    pub id: PostId,

    /// Post title
    pub title: String,

    /// Short teaser shown on cards
    pub excerpt: String,

    /// Raw markdown body
    pub body: String,

    /// Rendered HTML body
    pub content: String,

    /// Category label
    pub category: String,

    /// Ordered tag labels
    pub tags: Vec<String>,

    /// Publication date
    pub date: NaiveDate,

    /// Estimated read time in minutes
    pub read_time: u32,

    /// Card icon
    pub icon: Icon,

    /// Source file path relative to the source dir (empty for built-in posts)
    pub source: String,
}

impl Post {
    /// Create a post with the fields filtering cares about; everything else
    /// starts empty and is filled in by the loader.
    pub fn new(id: PostId, title: &str, excerpt: &str, category: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            excerpt: excerpt.to_string(),
            body: String::new(),
            content: String::new(),
            category: category.to_string(),
            tags: Vec::new(),
            date: NaiveDate::default(),
            read_time: 1,
            icon: Icon::default(),
            source: String::new(),
        }
    }

    /// Site-relative path of the post page
    pub fn path(&self) -> String {
        format!("posts/{}/", self.id)
    }

    /// Publication date the way cards show it, e.g. "Feb 5, 2024"
    pub fn display_date(&self) -> String {
        self.date.format("%b %-d, %Y").to_string()
    }

    /// Read time label, e.g. "8 min read"
    pub fn read_time_label(&self) -> String {
        format!("{} min read", self.read_time)
    }

    /// Lightweight view used by the search index and JSON API
    pub fn summary(&self, root: &str) -> PostSummary {
        PostSummary {
            id: self.id,
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            category: self.category.clone(),
            tags: self.tags.clone(),
            date: self.display_date(),
            read_time: self.read_time_label(),
            icon: self.icon,
            url: format!("{}/{}", root.trim_end_matches('/'), self.path()),
        }
    }
}

/// Post fields exposed outside the site (search.json, /api/posts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: PostId,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub tags: Vec<String>,
    pub date: String,
    pub read_time: String,
    pub icon: Icon,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_from_str() {
        assert_eq!("git-branch".parse::<Icon>().unwrap(), Icon::GitBranch);
        assert_eq!("GitBranch".parse::<Icon>().unwrap(), Icon::GitBranch);
        assert_eq!("git_branch".parse::<Icon>().unwrap(), Icon::GitBranch);
        assert_eq!("Cloud".parse::<Icon>().unwrap(), Icon::Cloud);
        assert!(matches!(
            "rocket".parse::<Icon>(),
            Err(ContentError::UnknownIcon(name)) if name == "rocket"
        ));
    }

    #[test]
    fn test_icon_serde_name() {
        let json = serde_json::to_string(&Icon::GitBranch).unwrap();
        assert_eq!(json, "\"git-branch\"");
    }

    #[test]
    fn test_display_metadata() {
        let mut post = Post::new(4, "GitOps with ArgoCD", "", "GitOps");
        post.date = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        post.read_time = 15;
        assert_eq!(post.display_date(), "Feb 5, 2024");
        assert_eq!(post.read_time_label(), "15 min read");
        assert_eq!(post.path(), "posts/4/");
    }

    #[test]
    fn test_summary_url() {
        let post = Post::new(2, "Terraform & AWS", "", "IaC");
        assert_eq!(post.summary("/").url, "/posts/2/");
        assert_eq!(post.summary("/blog/").url, "/blog/posts/2/");
    }
}
