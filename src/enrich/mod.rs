//! Detail Enricher: best-effort per-record detail text.
//!
//! Each record carrying a detail link gets its page fetched once and
//! reduced to a single cleaned text blob. Fetches fan out under a
//! semaphore bound and results are written back by row index, so output
//! order always equals input order and one record's failure never
//! touches another record.

use crate::error::ScrapeError;
use crate::fetch;
use crate::process::normalize::EarthquakeRecord;
use crate::process::utils::collapse_whitespace;
use reqwest::Client;
use scraper::Html;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// Default bound on in-flight detail fetches; keeps the load on the
/// source server modest.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Fetch and attach detail text for every record with a detail link.
pub async fn enrich(
    client: &Client,
    records: Vec<EarthquakeRecord>,
    concurrency: usize,
) -> Vec<EarthquakeRecord> {
    let client = client.clone();
    enrich_with(records, concurrency, move |url: String| {
        let client = client.clone();
        async move { fetch::fetch_page(&client, &url).await }
    })
    .await
}

/// Enrichment core with the fetch step injected, so failure isolation is
/// testable without a network.
pub async fn enrich_with<F, Fut>(
    mut records: Vec<EarthquakeRecord>,
    concurrency: usize,
    fetch_fn: F,
) -> Vec<EarthquakeRecord>
where
    F: Fn(String) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<String, ScrapeError>> + Send + 'static,
{
    let sem = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut handles = Vec::new();

    for (idx, link) in records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.detail_link.clone().map(|l| (i, l)))
    {
        let sem = Arc::clone(&sem);
        let fetch_fn = fetch_fn.clone();
        handles.push(tokio::spawn(async move {
            let _permit = sem.acquire().await.expect("semaphore closed");
            match fetch_fn(link.clone()).await {
                Ok(html) => (idx, Some(clean_page_text(&html))),
                Err(err) => {
                    warn!(row = idx, url = %link, %err, "detail fetch failed, record kept without details");
                    (idx, None)
                }
            }
        }));
    }

    let fetched = handles.len();
    let mut populated = 0usize;
    for handle in handles {
        if let Ok((idx, details)) = handle.await {
            populated += usize::from(details.is_some());
            records[idx].details = details;
        }
    }

    info!(fetched, populated, "enrichment done");
    records
}

/// Reduce a detail page to one cleaned text blob: text nodes in document
/// order joined by a space, whitespace runs collapsed, ends trimmed.
pub fn clean_page_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let joined = doc.root_element().text().collect::<Vec<_>>().join(" ");
    collapse_whitespace(&joined)
}
