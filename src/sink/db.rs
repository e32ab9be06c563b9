//! Relational sink: DuckDB, replace-or-create.
//!
//! One table per run; the previous run's table is dropped, matching the
//! source feed which republishes the whole month on every visit.

use crate::error::ScrapeError;
use crate::process::normalize::EarthquakeRecord;
use duckdb::{params, Connection};
use std::fs;
use std::path::Path;
use tracing::info;

pub const SCHEMA: &str = "raw";
pub const TABLE: &str = "tbldaily_earthquake_data";

/// Open (creating if needed) the DuckDB database file at `path`.
pub fn open_disk_db(path: impl AsRef<Path>) -> Result<Connection, ScrapeError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(Connection::open(path)?)
}

/// Open a DuckDB in-memory database.
pub fn open_mem_db() -> Result<Connection, ScrapeError> {
    Ok(Connection::open_in_memory()?)
}

/// Drop and recreate `raw.tbldaily_earthquake_data`, then insert the
/// whole batch, one parameterized insert per record.
pub fn replace_records(
    conn: &Connection,
    records: &[EarthquakeRecord],
) -> Result<(), ScrapeError> {
    conn.execute_batch(&format!(
        "CREATE SCHEMA IF NOT EXISTS {SCHEMA};
         DROP TABLE IF EXISTS {SCHEMA}.{TABLE};
         CREATE TABLE {SCHEMA}.{TABLE} (
             date_time   VARCHAR,
             date        DATE,
             time        TIME,
             latitude    DOUBLE,
             longitude   DOUBLE,
             depth_km    DOUBLE,
             magnitude   DOUBLE,
             location    VARCHAR,
             detail_link VARCHAR,
             details     VARCHAR
         );"
    ))?;

    let mut stmt = conn.prepare(&format!(
        "INSERT INTO {SCHEMA}.{TABLE} VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    ))?;
    for r in records {
        stmt.execute(params![
            r.date_time,
            r.date,
            r.time,
            r.latitude,
            r.longitude,
            r.depth_km,
            r.magnitude,
            r.location,
            r.detail_link,
            r.details,
        ])?;
    }

    info!(rows = records.len(), table = TABLE, "dumped batch to database");
    Ok(())
}
