//! Primary conjugation backend: trait seam plus the shipped lexicon
//! implementation.
//!
//! The backend is loaded once at startup and shared read-only across
//! requests. Its failures never escape [`primary_candidates`] — a failed or
//! empty primary lookup just hands control to the fallback.

use crate::config::ResolveConfig;
use crate::tree::{self, ResultTree};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// The opaque primary resolver.
///
/// `Ok(Some(tree))` — the backend produced a result tree.
/// `Ok(None)` — the backend legitimately knows nothing about this verb.
/// `Err(_)` — the backend failed; callers recover, never propagate.
pub trait ConjugationBackend: Send + Sync {
    fn resolve(&self, verb: &str) -> Result<Option<ResultTree>>;
}

/// JSON lexicon keyed by bare infinitive.
///
/// The file maps each verb to an arbitrarily nested value in the backend's
/// result-tree shape, e.g.
/// `{"fi": {"indicativ": {"prezent": {"conjugations": ["eu sunt", ...]}}}}`.
pub struct LexiconBackend {
    entries: HashMap<String, ResultTree>,
}

impl LexiconBackend {
    /// Load a lexicon file. Entries with unusable JSON shapes are skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read lexicon {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&raw)
            .with_context(|| format!("lexicon {} is not valid JSON", path.display()))?;
        Self::from_value(value)
    }

    /// Build a lexicon from an in-memory JSON value (used by tests).
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let map = match value {
            serde_json::Value::Object(map) => map,
            _ => anyhow::bail!("lexicon root must be a JSON object keyed by verb"),
        };

        let entries = map
            .iter()
            .filter_map(|(verb, v)| ResultTree::from_json(v).map(|t| (verb.clone(), t)))
            .collect();

        Ok(Self { entries })
    }

    /// An empty lexicon — every lookup misses, the fallback does the work.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Number of verbs in the lexicon.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConjugationBackend for LexiconBackend {
    fn resolve(&self, verb: &str) -> Result<Option<ResultTree>> {
        Ok(self.entries.get(verb).cloned())
    }
}

/// Run the primary backend and flatten its result tree.
///
/// All three backend outcomes collapse to a plain string list: a missing
/// verb and a backend failure both come back empty, which is the pipeline's
/// cue to try the fallback.
pub fn primary_candidates(
    backend: &dyn ConjugationBackend,
    config: &ResolveConfig,
    verb: &str,
) -> Vec<String> {
    match backend.resolve(verb) {
        Ok(Some(result)) => tree::flatten(&result, &config.marker_keys),
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("primary backend failed for '{verb}': {e:#}");
            Vec::new()
        }
    }
}
