use anyhow::{Context, Result};
use quakescraper::{
    config::DbConfig,
    enrich, extract, fetch,
    process::{normalize, window},
    sink,
};
use scraper::Html;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

const SUMMARY_URL: &str = "https://earthquake.phivolcs.dost.gov.ph/";
/// The bulletin lives in the third `<table>` of the summary page.
const SUMMARY_TABLE_INDEX: usize = 2;
const OUTPUT_DIR: &str = "scraped_data";
const DB_CONFIG_PATH: &str = "db_config.json";
const DB_ENVIRONMENT: &str = "local_phil_earthquakes";

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) config + client ─────────────────────────────────────────
    let db_config =
        DbConfig::load(DB_CONFIG_PATH).with_context(|| format!("loading {DB_CONFIG_PATH}"))?;
    let db_env = db_config.environment(DB_ENVIRONMENT)?;
    let client = fetch::build_client()?;

    // ─── 3) scrape the summary table ────────────────────────────────
    let base = Url::parse(SUMMARY_URL)?;
    let body = fetch::fetch_page(&client, SUMMARY_URL).await?;
    let doc = Html::parse_document(&body);
    let table = extract::extract_table(&doc, SUMMARY_TABLE_INDEX, &base)?;
    info!(rows = table.len(), "summary table scraped");

    // ─── 4) locate the data window + normalize ──────────────────────
    let header = window::parse_month_header(&table)?;
    info!(month = %header.month, year = %header.year, "batch banner");
    let rows = window::compact(table);
    let win = window::locate_window(&rows, &header)?;
    let (records, row_errors) = normalize::normalize(&rows, &win);
    for err in &row_errors {
        warn!(%err, "row skipped");
    }
    info!(
        records = records.len(),
        skipped = row_errors.len(),
        "normalization done"
    );

    // ─── 5) enrich with detail pages ────────────────────────────────
    let records = enrich::enrich(&client, records, enrich::DEFAULT_CONCURRENCY).await;

    // ─── 6) sinks: CSV first, then database ─────────────────────────
    let csv_path = sink::csv::write_records(OUTPUT_DIR, &header, &records)?;

    let conn = sink::db::open_disk_db(&db_env.path)?;
    sink::db::replace_records(&conn, &records)
        .with_context(|| format!("dumping batch to {}", db_env.path.display()))?;

    info!(csv = %csv_path.display(), "all done");
    Ok(())
}
