//! Fallback source: fetch a conjugation-table page from the external
//! reference source and scrape it.
//!
//! One attempt per resolution, explicit timeout, no retries. Every failure
//! mode — network error, non-2xx status, unparsable markup, zero usable
//! cells — collapses to "no data" inside [`fallback_candidates`].

use crate::config::ResolveConfig;
use crate::scrape::{self, ScrapedTable};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// The opaque fetch+parse collaborator behind the fallback adapter.
#[async_trait]
pub trait TableFetcher: Send + Sync {
    async fn fetch_tables(&self, verb: &str) -> Result<Vec<ScrapedTable>>;
}

/// Fetches conjugation pages over HTTP and parses their inflection tables.
pub struct HttpTableFetcher {
    client: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
}

impl HttpTableFetcher {
    /// Build a fetcher from config: explicit timeout, limited redirects
    /// (the source redirects inflected spellings to the canonical page),
    /// and a browser user-agent.
    pub fn new(config: &ResolveConfig) -> Self {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                  AppleWebKit/537.36 (KHTML, like Gecko) \
                  Chrome/131.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.fallback_timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(ua)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.fallback_base_url.trim_end_matches('/').to_string(),
            timeout_ms: config.fallback_timeout_ms,
        }
    }
}

#[async_trait]
impl TableFetcher for HttpTableFetcher {
    async fn fetch_tables(&self, verb: &str) -> Result<Vec<ScrapedTable>> {
        let url = url::Url::parse(&format!("{}/{verb}", self.base_url))
            .with_context(|| format!("invalid fallback URL for '{verb}'"))?;

        let response = self
            .client
            .get(url.clone())
            .timeout(Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .with_context(|| format!("fallback fetch failed for {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("fallback source returned {status} for {url}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read fallback body for {url}"))?;

        // Parse synchronously after the body await: scraper::Html is not
        // Send and must not live across an await point.
        Ok(scrape::parse_inflection_tables(&body))
    }
}

/// Run the fallback source and normalize its tables.
///
/// A single attempt; fetch failures and "no data" both come back as an
/// empty list, which the pipeline maps to NotFound if the primary was also
/// empty.
pub async fn fallback_candidates(
    fetcher: &dyn TableFetcher,
    config: &ResolveConfig,
    verb: &str,
) -> Vec<String> {
    match fetcher.fetch_tables(verb).await {
        Ok(tables) => {
            debug!("fallback scraped {} table(s) for '{verb}'", tables.len());
            scrape::normalize_tables(&tables, config).unwrap_or_default()
        }
        Err(e) => {
            warn!("fallback fetch failed for '{verb}': {e:#}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::{CellKind, ScrapedCell};

    struct StubFetcher {
        tables: Result<Vec<ScrapedTable>, String>,
    }

    #[async_trait]
    impl TableFetcher for StubFetcher {
        async fn fetch_tables(&self, _verb: &str) -> Result<Vec<ScrapedTable>> {
            match &self.tables {
                Ok(t) => Ok(t.clone()),
                Err(msg) => bail!("{msg}"),
            }
        }
    }

    fn cfg() -> ResolveConfig {
        ResolveConfig::default()
    }

    fn data_cell(text: &str) -> ScrapedCell {
        ScrapedCell {
            kind: CellKind::Data,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_is_empty() {
        let fetcher = StubFetcher {
            tables: Err("connection refused".to_string()),
        };
        assert!(fallback_candidates(&fetcher, &cfg(), "fi").await.is_empty());
    }

    #[tokio::test]
    async fn test_no_data_is_empty() {
        let fetcher = StubFetcher { tables: Ok(vec![]) };
        assert!(fallback_candidates(&fetcher, &cfg(), "fi").await.is_empty());
    }

    #[tokio::test]
    async fn test_scraped_forms_pass_through() {
        let fetcher = StubFetcher {
            tables: Ok(vec![ScrapedTable {
                cells: vec![data_cell("vorbesc"), data_cell("vorbim")],
            }]),
        };
        let forms = fallback_candidates(&fetcher, &cfg(), "vorbi").await;
        assert_eq!(forms, vec!["vorbesc", "vorbim"]);
    }

    #[test]
    fn test_fetcher_construction_trims_base_url() {
        let mut config = cfg();
        config.fallback_base_url = "https://example.com/conjugare/".to_string();
        let fetcher = HttpTableFetcher::new(&config);
        assert_eq!(fetcher.base_url, "https://example.com/conjugare");
    }
}
