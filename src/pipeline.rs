//! The resolution pipeline: primary lookup, conditional fallback, aggregate.
//!
//! One sequential pass per request. The fallback only runs once the primary
//! is confirmed empty, so stubbed collaborators see deterministic ordering.

use crate::backend::{self, ConjugationBackend};
use crate::config::ResolveConfig;
use crate::fallback::{self, TableFetcher};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Terminal outcome of one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// At least one source produced forms; non-empty, sorted, deduplicated.
    Success(Vec<String>),
    /// Neither source produced usable candidates.
    NotFound,
}

/// Conjugation resolution pipeline.
///
/// Holds the shared read-only backend (loaded once at startup) and the
/// fallback fetcher. Cheap to clone per request via the inner `Arc`s.
#[derive(Clone)]
pub struct Pipeline {
    backend: Arc<dyn ConjugationBackend>,
    fetcher: Arc<dyn TableFetcher>,
    config: ResolveConfig,
}

impl Pipeline {
    pub fn new(
        backend: Arc<dyn ConjugationBackend>,
        fetcher: Arc<dyn TableFetcher>,
        config: ResolveConfig,
    ) -> Self {
        Self {
            backend,
            fetcher,
            config,
        }
    }

    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    /// Normalize raw caller input into a lookup key.
    ///
    /// Trims, lowercases, and (when configured) strips the leading
    /// infinitive particle "a ". Returns `None` when nothing remains.
    pub fn normalize_verb(&self, raw: &str) -> Option<String> {
        let mut verb = raw.trim().to_lowercase();
        if self.config.strip_particle {
            if let Some(stripped) = verb.strip_prefix("a ") {
                verb = stripped.trim_start().to_string();
            }
        }
        if verb.is_empty() {
            None
        } else {
            Some(verb)
        }
    }

    /// Resolve a normalized verb to its conjugated forms.
    pub async fn resolve(&self, verb: &str) -> Resolution {
        let mut candidates = backend::primary_candidates(self.backend.as_ref(), &self.config, verb);

        if candidates.is_empty() {
            debug!("primary source empty for '{verb}', trying fallback");
            candidates = fallback::fallback_candidates(self.fetcher.as_ref(), &self.config, verb).await;
        }

        let forms = aggregate(candidates);
        if forms.is_empty() {
            Resolution::NotFound
        } else {
            Resolution::Success(forms)
        }
    }
}

/// Trim candidates, drop empties, deduplicate, and sort by ordinal
/// comparison. The `BTreeSet` does the last two in one move.
pub fn aggregate(candidates: Vec<String>) -> Vec<String> {
    let set: BTreeSet<String> = candidates
        .into_iter()
        .map(|form| form.trim().to_string())
        .filter(|form| !form.is_empty())
        .collect();
    set.into_iter().collect()
}
