//! List site content

use anyhow::Result;
use std::fmt::Write as _;

use crate::content::Corpus;
use crate::Site;

/// Print posts, categories or tags
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let corpus = site.load_corpus()?;
    print!("{}", render(&corpus, content_type)?);
    Ok(())
}

/// Listing text for a content type
pub fn render(corpus: &Corpus, content_type: &str) -> Result<String> {
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            writeln!(out, "Posts ({}):", corpus.len())?;
            for post in corpus.posts() {
                writeln!(
                    out,
                    "  {:>3}  {}  {} [{}]",
                    post.id,
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.category
                )?;
            }
        }
        "category" | "categories" => {
            let categories = corpus.categories();
            writeln!(out, "Categories ({}):", categories.len())?;
            for (name, count) in categories {
                writeln!(out, "  {} ({})", name, count)?;
            }
        }
        "tag" | "tags" => {
            let mut tags: Vec<_> = corpus.tags().into_iter().collect();
            // Most used first; ties keep first-appearance order
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            writeln!(out, "Tags ({}):", tags.len())?;
            for (tag, count) in tags {
                writeln!(out, "  {} ({})", tag, count)?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category, tag",
                content_type
            );
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::sample_posts;

    fn corpus() -> Corpus {
        Corpus::new(sample_posts()).unwrap()
    }

    #[test]
    fn test_list_posts() {
        let out = render(&corpus(), "post").unwrap();
        assert!(out.starts_with("Posts (6):"));
        assert!(out.contains("    2  2024-02-10  Infrastructure as Code with Terraform & AWS [IaC]"));
    }

    #[test]
    fn test_list_tags_most_used_first() {
        let out = render(&corpus(), "tags").unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[1], "  Kubernetes (2)");
        assert_eq!(lines[2], "  AWS (2)");
    }

    #[test]
    fn test_unknown_type() {
        assert!(render(&corpus(), "pages").is_err());
    }
}
