//! `flecta serve` — run the HTTP conjugation service.

use crate::backend::{ConjugationBackend, LexiconBackend};
use crate::config::ResolveConfig;
use crate::fallback::HttpTableFetcher;
use crate::pipeline::Pipeline;
use crate::rest::{self, AppState};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Default lexicon location.
pub fn default_lexicon_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".flecta/lexicon.json")
}

/// Resolve the lexicon path: flag, then env, then default location.
pub fn lexicon_path(flag: Option<&str>) -> PathBuf {
    flag.map(PathBuf::from)
        .or_else(|| std::env::var("FLECTA_LEXICON").ok().map(PathBuf::from))
        .unwrap_or_else(default_lexicon_path)
}

/// Load the lexicon, falling back to an empty backend when the file is
/// missing — the scrape fallback still answers requests.
pub fn load_lexicon(path: &PathBuf) -> LexiconBackend {
    match LexiconBackend::load(path) {
        Ok(backend) => {
            info!("loaded {} verb(s) from {}", backend.len(), path.display());
            backend
        }
        Err(e) => {
            warn!("no usable lexicon at {} ({e:#}); serving with fallback only", path.display());
            LexiconBackend::empty()
        }
    }
}

/// Run the serve command.
pub async fn run(port: Option<u16>, lexicon: Option<&str>) -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flecta=info".parse().unwrap()),
        )
        .init();

    info!("starting flecta v{}", env!("CARGO_PKG_VERSION"));

    let config = ResolveConfig::from_env();
    let backend = load_lexicon(&lexicon_path(lexicon));
    let lexicon_verbs = backend.len();

    let fetcher = Arc::new(HttpTableFetcher::new(&config));
    let backend: Arc<dyn ConjugationBackend> = Arc::new(backend);
    let pipeline = Pipeline::new(backend, fetcher, config);

    let port = port
        .or_else(|| {
            std::env::var("PORT")
                .ok()
                .and_then(|p| p.trim().parse().ok())
        })
        .unwrap_or(5000);

    let state = Arc::new(AppState {
        pipeline,
        started_at: Instant::now(),
        lexicon_verbs,
    });

    rest::start(port, state).await
}
