use crate::core::error::Result;
use crate::core::series::{RatePoint, RateSeries};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A rate observation together with its daily percentage return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub rate: f64,
    /// `(rate[t] - rate[t-1]) / rate[t-1] * 100`; `None` on the first date.
    pub daily_return: Option<f64>,
}

/// A rate series augmented with daily returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesWithReturns {
    points: Vec<ReturnPoint>,
}

impl SeriesWithReturns {
    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn rates(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.rate).collect()
    }

    /// The returns that are present, in date order.
    pub fn returns(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.daily_return).collect()
    }

    /// The underlying rate series without the return field.
    pub fn to_rate_series(&self) -> RateSeries {
        let points = self
            .points
            .iter()
            .map(|p| RatePoint::new(p.date, p.rate))
            .collect();
        RateSeries::from_validated(points)
    }
}

/// Percentage change between consecutive observations.
pub fn percent_change(previous: f64, current: f64) -> f64 {
    (current - previous) / previous * 100.0
}

/// Append daily percentage returns to `series`.
///
/// Requires at least two observations; the first date's return is absent.
pub fn compute_returns(series: &RateSeries) -> Result<SeriesWithReturns> {
    series.require_len(2, "daily returns")?;
    let mut points = Vec::with_capacity(series.len());
    let mut previous: Option<f64> = None;
    for point in series {
        points.push(ReturnPoint {
            date: point.date,
            rate: point.rate,
            daily_return: previous.map(|prev| percent_change(prev, point.rate)),
        });
        previous = Some(point.rate);
    }
    Ok(SeriesWithReturns { points })
}
