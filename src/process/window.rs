//! Window Locator: find the genuine event rows inside the scraped table.
//!
//! The bulletin table mixes a title row, a "<Month> <Year>" banner row,
//! the event rows themselves, and a trailing year/month navigation index.
//! The data window starts at a fixed offset past the banner and ends at
//! the marker row that opens the index block, a single-cell row whose
//! text is the bare banner year.

use crate::error::ScrapeError;
use crate::extract::{RawRow, RawTable};
use tracing::debug;

/// Fixed start of the data window within the compact sequence: skips the
/// title row and the month/year banner row.
pub const DATA_START: usize = 2;

/// The "<Month> <Year>" banner, split into its two tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthHeader {
    pub month: String,
    pub year: String,
}

/// Contiguous range `[start, end)` of event rows in the compact sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataWindow {
    pub start: usize,
    pub end: usize,
}

impl DataWindow {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Parse the month/year banner from row 1, cell 0 of the raw table.
///
/// The cell must split on a single space into exactly two tokens;
/// anything else ("October2024", "5 October 2024") is a fatal format
/// error rather than something to guess around.
pub fn parse_month_header(table: &RawTable) -> Result<MonthHeader, ScrapeError> {
    if table.len() < 3 {
        return Err(ScrapeError::TooFewRows { rows: table.len() });
    }

    let header = table.rows[1]
        .first()
        .map(|c| c.text().to_string())
        .unwrap_or_default();

    let mut parts: Vec<String> = header.split(' ').map(str::to_string).collect();
    if parts.len() != 2 || parts.iter().any(String::is_empty) {
        return Err(ScrapeError::HeaderFormat { header });
    }
    let year = parts.swap_remove(1);
    let month = parts.swap_remove(0);

    debug!(%month, %year, "parsed banner");
    Ok(MonthHeader { month, year })
}

/// Drop zero-cell rows, preserving relative order.
pub fn compact(table: RawTable) -> Vec<RawRow> {
    table.rows.into_iter().filter(|r| !r.is_empty()).collect()
}

/// Locate the data window within the compact sequence.
///
/// `end` is the first row at or after [`DATA_START`] whose *single* cell
/// equals the banner year. Requiring a single cell keeps a location
/// string that happens to contain the year from ending the window early;
/// event rows always carry six cells. No marker row at all is a fatal
/// structure error, never an empty window.
pub fn locate_window(rows: &[RawRow], header: &MonthHeader) -> Result<DataWindow, ScrapeError> {
    let end = rows
        .iter()
        .enumerate()
        .skip(DATA_START)
        .find(|(_, row)| row.len() == 1 && row[0].text() == header.year)
        .map(|(idx, _)| idx)
        .ok_or_else(|| ScrapeError::YearMarkerMissing {
            year: header.year.clone(),
            start: DATA_START,
        })?;

    debug!(start = DATA_START, end, "located data window");
    Ok(DataWindow {
        start: DATA_START,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Cell;

    fn text_row(cells: &[&str]) -> RawRow {
        cells.iter().map(|c| Cell::Text(c.to_string())).collect()
    }

    fn event_row(date_time: &str) -> RawRow {
        text_row(&[date_time, "10.12", "126.52", "012", "3.4", "somewhere"])
    }

    fn sample_table(n_events: usize) -> RawTable {
        let mut rows = vec![
            text_row(&["Latest Earthquake Information"]),
            text_row(&["October 2024"]),
        ];
        for i in 0..n_events {
            rows.push(event_row(&format!("{:02} October 2024 - 03:53 PM", i + 1)));
        }
        rows.push(Vec::new()); // blank separator
        rows.push(text_row(&["2024"]));
        rows.push(text_row(&["October", "September", "August"]));
        RawTable { rows }
    }

    #[test]
    fn banner_parses_into_month_and_year() {
        let header = parse_month_header(&sample_table(1)).unwrap();
        assert_eq!(header.month, "October");
        assert_eq!(header.year, "2024");
    }

    #[test]
    fn banner_without_space_is_fatal() {
        let mut table = sample_table(1);
        table.rows[1] = text_row(&["October2024"]);
        let err = parse_month_header(&table).unwrap_err();
        assert!(matches!(err, ScrapeError::HeaderFormat { header } if header == "October2024"));
    }

    #[test]
    fn too_few_rows_is_fatal() {
        let table = RawTable {
            rows: vec![text_row(&["Title"]), text_row(&["October 2024"])],
        };
        assert!(matches!(
            parse_month_header(&table),
            Err(ScrapeError::TooFewRows { rows: 2 })
        ));
    }

    #[test]
    fn window_covers_exactly_the_event_rows() {
        let n = 5;
        let table = sample_table(n);
        let header = parse_month_header(&table).unwrap();
        let rows = compact(table);
        let window = locate_window(&rows, &header).unwrap();
        assert_eq!(window.start, 2);
        assert_eq!(window.len(), n);
        for row in &rows[window.start..window.end] {
            assert_eq!(row.len(), 6);
        }
    }

    #[test]
    fn compact_drops_blank_rows_only() {
        let table = sample_table(3);
        let before = table.len();
        let rows = compact(table);
        assert_eq!(rows.len(), before - 1);
    }

    #[test]
    fn year_inside_a_location_does_not_end_the_window() {
        let mut table = sample_table(3);
        // an event whose location mentions the bare year
        table.rows[2] = text_row(&[
            "01 October 2024 - 01:00 AM",
            "10.0",
            "125.0",
            "005",
            "2.1",
            "2024",
        ]);
        let header = parse_month_header(&table).unwrap();
        let rows = compact(table);
        let window = locate_window(&rows, &header).unwrap();
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn missing_marker_is_fatal() {
        let mut table = sample_table(2);
        table.rows.retain(|r| r.len() != 1 || r[0].text() != "2024");
        let header = parse_month_header(&table).unwrap();
        let rows = compact(table);
        let err = locate_window(&rows, &header).unwrap_err();
        assert!(matches!(err, ScrapeError::YearMarkerMissing { .. }));
    }
}
