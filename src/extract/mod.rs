//! Table Extractor: lossless transcription of the summary table.
//!
//! Turns the bulletin page's `<table>` markup into an ordered [`RawTable`]
//! of [`RawRow`]s. Nothing is filtered here; header rows, the trailing
//! year/month index block, and empty rows all pass through so the window
//! locator can reason about the full structure.

use crate::error::ScrapeError;
use crate::process::utils::collapse_whitespace;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("table selector"));
static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("tr selector"));
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td, th").expect("cell selector"));
static A: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("anchor selector"));

/// One table cell: trimmed visible text, plus the absolute href when the
/// cell contains exactly one hyperlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Linked { text: String, href: String },
}

impl Cell {
    pub fn text(&self) -> &str {
        match self {
            Cell::Text(t) => t,
            Cell::Linked { text, .. } => text,
        }
    }

    pub fn link(&self) -> Option<&str> {
        match self {
            Cell::Text(_) => None,
            Cell::Linked { href, .. } => Some(href),
        }
    }
}

/// One `<tr>`, in cell order. Header and marker rows are shorter than
/// event rows; an empty `<tr>` yields an empty row.
pub type RawRow = Vec<Cell>;

/// The summary table as scraped, in source order (most recent event first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Transcribe the `index`-th `<table>` of `doc` into a [`RawTable`].
///
/// Hrefs are resolved against `base`. A missing table is fatal: the page
/// structure is a hard precondition of the whole run.
pub fn extract_table(doc: &Html, index: usize, base: &Url) -> Result<RawTable, ScrapeError> {
    let table = doc
        .select(&TABLE)
        .nth(index)
        .ok_or(ScrapeError::TableMissing { index })?;

    let mut rows = Vec::new();
    for tr in table.select(&TR) {
        let mut row = Vec::new();
        for td in tr.select(&TD) {
            row.push(extract_cell(td, base));
        }
        rows.push(row);
    }

    debug!(rows = rows.len(), "transcribed summary table");
    Ok(RawTable { rows })
}

fn extract_cell(td: ElementRef, base: &Url) -> Cell {
    let text = collapse_whitespace(&td.text().collect::<Vec<_>>().join(" "));

    let anchors: Vec<ElementRef> = td.select(&A).collect();
    if let [a] = anchors.as_slice() {
        if let Some(href) = a.value().attr("href") {
            let href = base
                .join(href)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| href.to_string());
            let text = collapse_whitespace(&a.text().collect::<Vec<_>>().join(" "));
            return Cell::Linked { text, href };
        }
    }
    Cell::Text(text)
}
