use anyhow::Result;

use ulas::config::Config;
use ulas::pipeline::{FilterMode, Pipeline};
use ulas::report;

/// Run the full analysis pipeline for one app and print the report
pub async fn analyze(
    config: Config,
    app_id: String,
    apply_filter: bool,
    json: bool,
) -> Result<()> {
    let mode = if apply_filter {
        FilterMode::Apply
    } else {
        FilterMode::Skip
    };

    let pipeline = Pipeline::new(config)?;

    match pipeline.run(&app_id, mode).await? {
        Some(run) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&run)?);
            } else {
                println!("{}", report::render(&run));
            }
        }
        None => {
            println!("Keyword filter declined; no analysis performed.");
        }
    }

    Ok(())
}
