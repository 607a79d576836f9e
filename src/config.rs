//! Resolution configuration with environment overrides.
//!
//! Every knob has a sensible default; `FLECTA_*` environment variables
//! override defaults, and CLI flags override both.

/// Default external reference source for the scrape fallback.
pub const DEFAULT_FALLBACK_URL: &str = "https://dexonline.ro/conjugare";

/// Default request timeout for the fallback fetch.
pub const DEFAULT_FALLBACK_TIMEOUT_MS: u64 = 10_000;

/// Tunable behavior of the resolution pipeline.
#[derive(Debug, Clone)]
pub struct ResolveConfig {
    /// Strip a leading infinitive particle ("a ") from the verb before lookup.
    pub strip_particle: bool,
    /// Mapping keys that mark "this value holds the conjugation payload".
    /// Checked in order; the first match short-circuits further descent.
    pub marker_keys: Vec<String>,
    /// Keep pronoun-labeled composites from scraped cells ("eu vorbesc").
    /// When off, one leading subject-pronoun token is stripped.
    pub keep_pronouns: bool,
    /// Base URL of the external conjugation-table source. The verb is
    /// appended as a path segment.
    pub fallback_base_url: String,
    /// Timeout for the single fallback fetch attempt.
    pub fallback_timeout_ms: u64,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            strip_particle: true,
            marker_keys: vec!["conjugations".to_string(), "c".to_string()],
            keep_pronouns: true,
            fallback_base_url: DEFAULT_FALLBACK_URL.to_string(),
            fallback_timeout_ms: DEFAULT_FALLBACK_TIMEOUT_MS,
        }
    }
}

impl ResolveConfig {
    /// Build a config from defaults plus `FLECTA_*` environment overrides.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("FLECTA_STRIP_PARTICLE") {
            cfg.strip_particle = parse_bool(&v).unwrap_or(cfg.strip_particle);
        }
        if let Ok(v) = std::env::var("FLECTA_KEEP_PRONOUNS") {
            cfg.keep_pronouns = parse_bool(&v).unwrap_or(cfg.keep_pronouns);
        }
        if let Ok(v) = std::env::var("FLECTA_MARKER_KEYS") {
            let keys = parse_key_list(&v);
            if !keys.is_empty() {
                cfg.marker_keys = keys;
            }
        }
        if let Ok(v) = std::env::var("FLECTA_FALLBACK_URL") {
            let v = v.trim();
            if !v.is_empty() {
                cfg.fallback_base_url = v.trim_end_matches('/').to_string();
            }
        }
        if let Ok(v) = std::env::var("FLECTA_FALLBACK_TIMEOUT_MS") {
            if let Ok(ms) = v.trim().parse::<u64>() {
                cfg.fallback_timeout_ms = ms;
            }
        }

        cfg
    }
}

/// Parse a boolean env value. Accepts 1/0, true/false, on/off, yes/no.
fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Parse a comma-separated key list, dropping empty segments.
fn parse_key_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}
