//! Delimited-file sink.

use crate::error::ScrapeError;
use crate::process::normalize::EarthquakeRecord;
use crate::process::window::MonthHeader;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name for a batch, derived from the banner month/year,
/// e.g. `earthquake_data_october_2024.csv`.
pub fn file_name(header: &MonthHeader) -> String {
    format!(
        "earthquake_data_{}_{}.csv",
        header.month.to_lowercase(),
        header.year.to_lowercase()
    )
}

/// Write the batch to `<dir>/<file_name>`: header row, one line per
/// record, floats in shortest round-trip form, absent options as empty
/// fields. Returns the written path.
pub fn write_records(
    dir: impl AsRef<Path>,
    header: &MonthHeader,
    records: &[EarthquakeRecord],
) -> Result<PathBuf, ScrapeError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(header));

    let mut wtr = csv::Writer::from_path(&path)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    info!(path = %path.display(), rows = records.len(), "wrote CSV");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::tempdir;

    fn header() -> MonthHeader {
        MonthHeader {
            month: "October".into(),
            year: "2024".into(),
        }
    }

    fn record() -> EarthquakeRecord {
        EarthquakeRecord {
            date_time: "05 October 2024 - 03:53 PM".into(),
            date: NaiveDate::from_ymd_opt(2024, 10, 5).unwrap(),
            time: NaiveTime::from_hms_opt(15, 53, 0).unwrap(),
            latitude: 10.12,
            longitude: 126.52,
            depth_km: 12.0,
            magnitude: 3.4,
            location: "051 km N 77° E of Burgos (Surigao Del Norte)".into(),
            detail_link: None,
            details: None,
        }
    }

    #[test]
    fn derives_lowercased_file_name() {
        assert_eq!(file_name(&header()), "earthquake_data_october_2024.csv");
    }

    #[test]
    fn writes_header_row_and_records() {
        let dir = tempdir().unwrap();
        let path = write_records(dir.path(), &header(), &[record()]).unwrap();
        assert!(path.ends_with("earthquake_data_october_2024.csv"));

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date_time,date,time,latitude,longitude,depth_km,magnitude,location,detail_link,details"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("05 October 2024 - 03:53 PM,2024-10-05,15:53:00,10.12,126.52,12.0,3.4,"));
        // absent detail_link/details serialize to empty fields
        assert!(row.ends_with(",,"));
        assert_eq!(lines.next(), None);
    }
}
