//! Flat CSV persistence of a rate series: a date column and one numeric
//! column per series.

use crate::analysis::returns::SeriesWithReturns;
use crate::core::error::Result as AnalysisResult;
use crate::core::series::{RatePoint, RateSeries};
use crate::data::DataError;
use chrono::NaiveDate;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Column name of the rate series.
pub const RATE_COLUMN: &str = "EUR_USD";
/// Column name of the daily returns in the analysis export.
pub const RETURN_COLUMN: &str = "daily_return";

/// A loaded series before cleaning: rows in file order, possibly unsorted,
/// duplicated, or missing values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSeries {
    rows: Vec<(NaiveDate, Option<f64>)>,
}

impl RawSeries {
    pub fn new(rows: Vec<(NaiveDate, Option<f64>)>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[(NaiveDate, Option<f64>)] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.rows.iter().filter(|(_, v)| v.is_none()).count()
    }

    /// Clean into a validated series.
    ///
    /// Sorts by date, keeps the last present observation of a duplicated
    /// date (a blank duplicate never replaces a value), forward-fills
    /// missing values and drops rows that have no earlier value to fill from.
    pub fn prepare(&self) -> AnalysisResult<RateSeries> {
        let mut deduped: BTreeMap<NaiveDate, Option<f64>> = BTreeMap::new();
        for &(date, value) in &self.rows {
            let slot = deduped.entry(date).or_insert(None);
            if value.is_some() {
                *slot = value;
            }
        }

        let mut points = Vec::with_capacity(deduped.len());
        let mut last: Option<f64> = None;
        let mut filled = 0usize;
        let mut dropped = 0usize;
        for (date, value) in deduped {
            match value.or(last) {
                Some(rate) => {
                    if value.is_none() {
                        filled += 1;
                    }
                    points.push(RatePoint::new(date, rate));
                    last = Some(rate);
                }
                None => dropped += 1,
            }
        }
        if filled > 0 || dropped > 0 {
            warn!(
                "prepared series: {} gaps forward-filled, {} leading rows dropped",
                filled, dropped
            );
        }
        RateSeries::new(points)
    }
}

/// Write `series` as `date,EUR_USD` rows.
pub fn write_series<P: AsRef<Path>>(path: P, series: &RateSeries) -> Result<(), DataError> {
    let file = File::create(path.as_ref())?;
    write_series_to(file, series)?;
    debug!("wrote {} rows to {}", series.len(), path.as_ref().display());
    Ok(())
}

pub fn write_series_to<W: Write>(writer: W, series: &RateSeries) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["date", RATE_COLUMN])?;
    for point in series {
        writer.write_record([point.date.to_string(), point.rate.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the analysed series as `date,EUR_USD,daily_return`; the absent
/// first return is an empty field.
pub fn write_returns<P: AsRef<Path>>(path: P, series: &SeriesWithReturns) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["date", RATE_COLUMN, RETURN_COLUMN])?;
    for point in series.points() {
        writer.write_record([
            point.date.to_string(),
            point.rate.to_string(),
            point.daily_return.map(|r| r.to_string()).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a `date,value` CSV into a raw, uncleaned series.
pub fn read_raw<P: AsRef<Path>>(path: P) -> Result<RawSeries, DataError> {
    let file = File::open(path)?;
    read_raw_from(file)
}

pub fn read_raw_from<R: Read>(reader: R) -> Result<RawSeries, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        let record = record?;
        let date_field = record.get(0).unwrap_or("");
        let date = parse_date(date_field).ok_or_else(|| DataError::Parse {
            line,
            message: format!("invalid date '{}'", date_field),
        })?;
        let value = parse_value(record.get(1).unwrap_or("")).map_err(|message| {
            DataError::Parse { line, message }
        })?;
        rows.push((date, value));
    }
    Ok(RawSeries::new(rows))
}

/// `YYYY-MM-DD`, ignoring any trailing time component.
fn parse_date(field: &str) -> Option<NaiveDate> {
    let day = field.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn parse_value(field: &str) -> Result<Option<f64>, String> {
    if field.is_empty() || field.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    field
        .parse::<f64>()
        .map(Some)
        .map_err(|e| format!("invalid rate '{}': {}", field, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_read_with_gaps() {
        let csv = "date,EUR_USD\n2023-01-01,1.1\n2023-01-02,\n2023-01-03,NaN\n2023-01-04,1.13\n";
        let raw = read_raw_from(csv.as_bytes()).unwrap();
        assert_eq!(raw.len(), 4);
        assert_eq!(raw.missing_count(), 2);

        let series = raw.prepare().unwrap();
        assert_eq!(series.rates(), vec![1.1, 1.1, 1.1, 1.13]);
    }

    #[test]
    fn test_accepts_datetime_index_and_blank_header() {
        let csv = ",EUR_USD\n2023-01-02 14:22:01.123456,1.0670\n2023-01-03 14:22:01.123456,1.0545\n";
        let series = read_raw_from(csv.as_bytes()).unwrap().prepare().unwrap();
        assert_eq!(series.dates(), vec![ymd(2023, 1, 2), ymd(2023, 1, 3)]);
    }

    #[test]
    fn test_prepare_sorts_dedupes_and_drops_leading_gaps() {
        let raw = RawSeries::new(vec![
            (ymd(2023, 1, 4), Some(1.3)),
            (ymd(2023, 1, 1), None),
            (ymd(2023, 1, 2), Some(1.1)),
            (ymd(2023, 1, 3), Some(1.2)),
            (ymd(2023, 1, 3), Some(1.25)),
        ]);
        let series = raw.prepare().unwrap();
        assert_eq!(
            series.dates(),
            vec![ymd(2023, 1, 2), ymd(2023, 1, 3), ymd(2023, 1, 4)]
        );
        assert_eq!(series.rates(), vec![1.1, 1.25, 1.3]);
    }

    #[test]
    fn test_blank_duplicate_keeps_observed_value() {
        let raw = RawSeries::new(vec![
            (ymd(2023, 1, 2), Some(1.1)),
            (ymd(2023, 1, 3), Some(1.2)),
            (ymd(2023, 1, 3), None),
            (ymd(2023, 1, 4), None),
            (ymd(2023, 1, 4), None),
        ]);
        let series = raw.prepare().unwrap();
        assert_eq!(series.rates(), vec![1.1, 1.2, 1.2]);
    }

    #[test]
    fn test_prepare_rejects_non_positive() {
        let raw = RawSeries::new(vec![(ymd(2023, 1, 2), Some(-1.0))]);
        assert!(raw.prepare().is_err());
    }

    #[test]
    fn test_bad_date_reports_line() {
        let csv = "date,EUR_USD\n2023-01-01,1.1\nnot-a-date,1.2\n";
        match read_raw_from(csv.as_bytes()) {
            Err(DataError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_value_reports_line() {
        let csv = "date,EUR_USD\n2023-01-01,abc\n";
        assert!(matches!(
            read_raw_from(csv.as_bytes()),
            Err(DataError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_write_then_read() {
        let series = RateSeries::from_parts(
            &[ymd(2023, 1, 2), ymd(2023, 1, 3)],
            &[1.0670, 1.0545],
        )
        .unwrap();
        let mut buf = Vec::new();
        write_series_to(&mut buf, &series).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("date,EUR_USD\n2023-01-02,1.067\n"));

        let back = read_raw_from(buf.as_slice()).unwrap().prepare().unwrap();
        assert_eq!(back, series);
    }
}
