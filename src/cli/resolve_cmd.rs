//! `flecta resolve <verb>` — one-shot resolution printed to stdout.

use crate::backend::ConjugationBackend;
use crate::cli::{output, serve};
use crate::config::ResolveConfig;
use crate::fallback::HttpTableFetcher;
use crate::pipeline::{Pipeline, Resolution};
use anyhow::{bail, Result};
use std::sync::Arc;

/// Run the resolve command.
pub async fn run(raw_verb: &str, lexicon: Option<&str>) -> Result<()> {
    let config = ResolveConfig::from_env();
    let backend: Arc<dyn ConjugationBackend> =
        Arc::new(serve::load_lexicon(&serve::lexicon_path(lexicon)));
    let fetcher = Arc::new(HttpTableFetcher::new(&config));
    let pipeline = Pipeline::new(backend, fetcher, config);

    let verb = match pipeline.normalize_verb(raw_verb) {
        Some(v) => v,
        None => {
            if output::is_json() {
                output::print_json(&serde_json::json!({ "error": "Please enter a verb." }));
                return Ok(());
            }
            bail!("Please enter a verb.");
        }
    };

    match pipeline.resolve(&verb).await {
        Resolution::Success(results) => {
            if output::is_json() {
                output::print_json(&serde_json::json!({ "results": results }));
            } else {
                for form in results {
                    println!("{form}");
                }
            }
            Ok(())
        }
        Resolution::NotFound => {
            if output::is_json() {
                output::print_json(&serde_json::json!({
                    "error": format!("Verb '{verb}' not found.")
                }));
                return Ok(());
            }
            bail!("Verb '{verb}' not found.");
        }
    }
}
