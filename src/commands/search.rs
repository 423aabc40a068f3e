//! Search posts from the command line

use anyhow::Result;
use std::fmt::Write as _;

use crate::content::{Corpus, PostSummary};
use crate::filter::FilterCriteria;
use crate::helpers::url_for;
use crate::Site;

/// Message shown when nothing matches
pub const NO_RESULTS: &str = "No articles found matching your criteria.";

/// Filter the corpus and print the matches
pub fn run(site: &Site, criteria: &FilterCriteria, json: bool) -> Result<()> {
    let corpus = site.load_corpus()?;
    let output = if json {
        render_json(&corpus, criteria, &url_for(&site.config, ""))?
    } else {
        render_text(&corpus, criteria)?
    };
    println!("{}", output);
    Ok(())
}

/// Human-readable results, or the no-results message
pub fn render_text(corpus: &Corpus, criteria: &FilterCriteria) -> Result<String> {
    let hits = corpus.filter(criteria);
    tracing::debug!("{:?} matched {} of {} posts", criteria, hits.len(), corpus.len());

    if hits.is_empty() {
        return Ok(NO_RESULTS.to_string());
    }

    let mut out = String::new();
    for post in &hits {
        writeln!(out, "[{}] {} ({})", post.id, post.title, post.category)?;
        writeln!(out, "    {}", post.excerpt)?;
    }
    write!(
        out,
        "{} of {} articles",
        hits.len(),
        corpus.len()
    )?;
    Ok(out)
}

/// Matches as a JSON array of post summaries; empty array when none match
pub fn render_json(corpus: &Corpus, criteria: &FilterCriteria, root: &str) -> Result<String> {
    let summaries: Vec<PostSummary> = corpus
        .filter(criteria)
        .into_iter()
        .map(|p| p.summary(root))
        .collect();
    Ok(serde_json::to_string_pretty(&summaries)?)
}
