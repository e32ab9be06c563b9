//! Record Normalizer: typed records out of windowed raw rows.

use crate::error::RowParseError;
use crate::extract::RawRow;
use crate::process::window::DataWindow;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::debug;

/// Number of cells a genuine event row carries:
/// date/time, latitude, longitude, depth, magnitude, location.
const EVENT_CELLS: usize = 6;

/// One normalized earthquake event. Field order matches the sink schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeRecord {
    /// Verbatim source cell, e.g. "05 October 2024 - 03:53 PM".
    pub date_time: String,
    pub date: NaiveDate,
    /// 24-hour time of day.
    pub time: NaiveTime,
    pub latitude: f64,
    pub longitude: f64,
    pub depth_km: f64,
    pub magnitude: f64,
    /// Free text, kept opaque (bearing and parenthetical province included).
    pub location: String,
    pub detail_link: Option<String>,
    pub details: Option<String>,
}

/// Map every row in the window to an [`EarthquakeRecord`], in source order.
///
/// A parse failure on any required field routes the row into the error
/// list and the batch continues; only the shape of the table itself is
/// fatal, and that was already checked by the window locator.
pub fn normalize(
    rows: &[RawRow],
    window: &DataWindow,
) -> (Vec<EarthquakeRecord>, Vec<RowParseError>) {
    let mut records = Vec::with_capacity(window.len());
    let mut errors = Vec::new();

    for (idx, row) in rows[window.start..window.end]
        .iter()
        .enumerate()
        .map(|(i, r)| (window.start + i, r))
    {
        match normalize_row(idx, row) {
            Ok(record) => records.push(record),
            Err(err) => errors.push(err),
        }
    }

    debug!(
        records = records.len(),
        errors = errors.len(),
        "normalized window"
    );
    (records, errors)
}

fn normalize_row(idx: usize, row: &RawRow) -> Result<EarthquakeRecord, RowParseError> {
    if row.len() < EVENT_CELLS {
        return Err(RowParseError {
            row: idx,
            field: "row",
            message: format!("expected {} cells, got {}", EVENT_CELLS, row.len()),
        });
    }

    let date_time = row[0].text().to_string();
    let parts: Vec<&str> = date_time.split(" - ").collect();
    let [date_str, time_str] = parts.as_slice() else {
        return Err(RowParseError {
            row: idx,
            field: "date_time",
            message: format!("cannot split {date_time:?} on \" - \""),
        });
    };

    let date = NaiveDate::parse_from_str(date_str, "%d %B %Y").map_err(|e| RowParseError {
        row: idx,
        field: "date",
        message: format!("{date_str:?}: {e}"),
    })?;
    let time = NaiveTime::parse_from_str(time_str, "%I:%M %p").map_err(|e| RowParseError {
        row: idx,
        field: "time",
        message: format!("{time_str:?}: {e}"),
    })?;

    Ok(EarthquakeRecord {
        latitude: parse_f64(idx, "latitude", row[1].text())?,
        longitude: parse_f64(idx, "longitude", row[2].text())?,
        depth_km: parse_f64(idx, "depth_km", row[3].text())?,
        magnitude: parse_f64(idx, "magnitude", row[4].text())?,
        location: row[5].text().to_string(),
        detail_link: row[0].link().map(str::to_string),
        details: None,
        date_time,
        date,
        time,
    })
}

fn parse_f64(row: usize, field: &'static str, text: &str) -> Result<f64, RowParseError> {
    text.trim().parse::<f64>().map_err(|e| RowParseError {
        row,
        field,
        message: format!("{text:?}: {e}"),
    })
}
