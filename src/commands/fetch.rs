use anyhow::{Context, Result};

use ulas::config::Config;
use ulas::source::{fetch_batched, PlayStoreSource};
use ulas::text::truncate;

/// Fetch raw reviews without analyzing them and print a preview
///
/// Exercises the review source alone; handy for checking an app id before a
/// full run.
pub async fn fetch(config: Config, app_id: String, limit: usize) -> Result<()> {
    let source = PlayStoreSource::new(config.request_timeout())
        .context("Failed to create review source")?;

    let reviews = fetch_batched(
        &source,
        &app_id,
        &config.fetch_options(),
        config.fetch.max_batches,
        config.batch_delay(),
    )
    .await?;

    println!("Fetched {} reviews for {app_id}", reviews.len());
    for (i, review) in reviews.iter().take(limit).enumerate() {
        println!("{:>4}  {}", i + 1, truncate(review, 100));
    }
    if reviews.len() > limit {
        println!("... and {} more", reviews.len() - limit);
    }

    Ok(())
}
