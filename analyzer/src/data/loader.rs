//! CSV loading with date-column auto-detection and numeric coercion

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Trim};
use tracing::{debug, warn};

use crate::data::{Column, PriceFrame};
use crate::error::{AnalysisError, Result};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%z"];

// Month comes before day in ambiguous formats.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d-%b-%Y", "%b %d, %Y", "%Y%m%d",
];

/// Find the date column among CSV headers.
///
/// The first header containing `date` (case-insensitive) wins; failing that,
/// the first containing `time` or `day`.
pub fn detect_date_column<'a, I>(headers: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let headers: Vec<&str> = headers.into_iter().map(str::trim).collect();
    headers
        .iter()
        .find(|h| h.to_lowercase().contains("date"))
        .or_else(|| {
            headers.iter().find(|h| {
                let lower = h.to_lowercase();
                lower.contains("time") || lower.contains("day")
            })
        })
        .map(|h| h.to_string())
}

/// Read a CSV file as text, falling back to ISO-8859-1 when it is not UTF-8
pub fn read_csv_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            debug!("{} is not UTF-8, decoding as ISO-8859-1", path.display());
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(err.as_bytes());
            Ok(text.into_owned())
        }
    }
}

/// Parse a date cell into a naive timestamp.
///
/// Offsets are dropped, keeping the local wall-clock time so daily bars stay
/// on their trading date.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Numeric cell value; `NaN` and infinities count as missing
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Load a stock CSV from disk
pub fn load_stock_data(path: &Path) -> Result<PriceFrame> {
    let text = read_csv_text(path)?;
    parse_stock_csv(&text, path)
}

/// Parse stock CSV text into a sorted, de-duplicated frame.
///
/// `source` only labels errors and log lines.
pub fn parse_stock_csv(text: &str, source: &Path) -> Result<PriceFrame> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .comment(Some(b'/'))
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let date_col = detect_date_column(headers.iter().map(String::as_str)).ok_or_else(|| {
        AnalysisError::NoDateColumn {
            path: source.to_path_buf(),
        }
    })?;
    let date_idx = headers
        .iter()
        .position(|h| *h == date_col)
        .ok_or_else(|| AnalysisError::NoDateColumn {
            path: source.to_path_buf(),
        })?;
    let value_idx: Vec<usize> = (0..headers.len()).filter(|&i| i != date_idx).collect();

    let mut rows: Vec<(NaiveDateTime, Vec<Option<f64>>)> = Vec::new();
    let mut bad_dates = 0usize;
    for record in reader.records() {
        let record = record?;
        let values: Vec<Option<f64>> = value_idx
            .iter()
            .map(|&i| record.get(i).and_then(parse_number))
            .collect();
        match record.get(date_idx).and_then(parse_date) {
            Some(date) => rows.push((date, values)),
            // A row with neither a date nor a number is simply blank.
            None if values.iter().all(Option::is_none) => {}
            None => bad_dates += 1,
        }
    }

    if bad_dates > 0 {
        warn!(
            "Dropped {} rows with an unparseable '{}' in {}",
            bad_dates,
            date_col,
            source.display()
        );
    }
    if rows.is_empty() {
        return Err(AnalysisError::NoRows {
            path: source.to_path_buf(),
        });
    }

    // Stable sort keeps file order among equal dates, so the last one wins below.
    rows.sort_by_key(|(date, _)| *date);
    let mut deduped: Vec<(NaiveDateTime, Vec<Option<f64>>)> = Vec::with_capacity(rows.len());
    let mut duplicates = 0usize;
    for row in rows {
        match deduped.last_mut() {
            Some(last) if last.0 == row.0 => {
                *last = row;
                duplicates += 1;
            }
            _ => deduped.push(row),
        }
    }
    if duplicates > 0 {
        warn!(
            "Collapsed {} duplicate dates in {} (kept last occurrence)",
            duplicates,
            source.display()
        );
    }

    let index: Vec<NaiveDateTime> = deduped.iter().map(|(d, _)| *d).collect();
    let columns = value_idx
        .iter()
        .enumerate()
        .map(|(pos, &i)| {
            Column::new(
                headers[i].clone(),
                deduped.iter().map(|(_, values)| values[pos]).collect(),
            )
        })
        .collect();

    debug!("Loaded {} rows from {}", index.len(), source.display());
    Ok(PriceFrame::new(index, columns))
}
