//! Generate static files

use anyhow::Result;
use std::time::Instant;

use crate::generator::Generator;
use crate::Site;

/// Load the corpus and render the whole site
pub fn run(site: &Site) -> Result<()> {
    let start = Instant::now();

    let corpus = site.load_corpus()?;
    tracing::info!("Loaded {} posts", corpus.len());

    Generator::new(site)?.generate(&corpus)?;

    tracing::info!(
        "Generated {:?} in {:.2}s",
        site.public_dir,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
