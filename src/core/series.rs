use crate::core::error::{AnalysisError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One observation of the EUR/USD daily rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub date: NaiveDate,
    /// Units of USD per EUR.
    pub rate: f64,
}

impl RatePoint {
    pub fn new(date: NaiveDate, rate: f64) -> Self {
        Self { date, rate }
    }
}

/// An ordered daily rate series.
///
/// Dates are distinct and strictly increasing; they need not be contiguous
/// (non-trading days may be absent). Every rate is finite and strictly
/// positive. The series is immutable once validated.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fx_forecast::core::series::{RatePoint, RateSeries};
///
/// let series = RateSeries::new(vec![
///     RatePoint::new(NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(), 1.0670),
///     RatePoint::new(NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(), 1.0545),
/// ])
/// .unwrap();
///
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.last().unwrap().rate, 1.0545);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RateSeries {
    points: Vec<RatePoint>,
}

impl RateSeries {
    /// Validate and wrap a sequence of points.
    pub fn new(points: Vec<RatePoint>) -> Result<Self> {
        for (i, point) in points.iter().enumerate() {
            if !point.rate.is_finite() || point.rate <= 0.0 {
                return Err(AnalysisError::invalid(format!(
                    "rate must be finite and positive, got {} on {}",
                    point.rate, point.date
                )));
            }
            if i > 0 {
                let prev = points[i - 1].date;
                if point.date == prev {
                    return Err(AnalysisError::invalid(format!(
                        "duplicate date {}",
                        point.date
                    )));
                }
                if point.date < prev {
                    return Err(AnalysisError::invalid(format!(
                        "dates not sorted ascending: {} follows {}",
                        point.date, prev
                    )));
                }
            }
        }
        Ok(Self { points })
    }

    /// Wrap points taken from an already validated series.
    pub(crate) fn from_validated(points: Vec<RatePoint>) -> Self {
        Self { points }
    }

    /// Build a series from parallel date and rate slices.
    pub fn from_parts(dates: &[NaiveDate], rates: &[f64]) -> Result<Self> {
        if dates.len() != rates.len() {
            return Err(AnalysisError::invalid(format!(
                "{} dates but {} rates",
                dates.len(),
                rates.len()
            )));
        }
        Self::new(
            dates
                .iter()
                .zip(rates)
                .map(|(&date, &rate)| RatePoint::new(date, rate))
                .collect(),
        )
    }

    pub fn points(&self) -> &[RatePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&RatePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&RatePoint> {
        self.points.last()
    }

    pub fn rates(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.rate).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// First and last date, if the series is non-empty.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.first()?.date, self.last()?.date))
    }

    /// The last `n` points (all of them when `n >= len`).
    pub fn tail(&self, n: usize) -> &[RatePoint] {
        &self.points[self.points.len().saturating_sub(n)..]
    }

    /// Fail with `InvalidInput` unless the series holds at least `min` points.
    pub fn require_len(&self, min: usize, operation: &str) -> Result<()> {
        if self.points.len() < min {
            return Err(AnalysisError::invalid(format!(
                "{} needs at least {} points, got {}",
                operation,
                min,
                self.points.len()
            )));
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for RateSeries {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let points = Vec::<RatePoint>::deserialize(deserializer)?;
        RateSeries::new(points).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a RateSeries {
    type Item = &'a RatePoint;
    type IntoIter = std::slice::Iter<'a, RatePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
