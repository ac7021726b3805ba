use chrono::{Datelike, Duration, NaiveDate};
use fx_forecast::analysis::engine::AnalysisEngine;
use fx_forecast::analysis::stats::mean;
use fx_forecast::core::series::RateSeries;
use fx_forecast::data::csv_store::RawSeries;
use fx_forecast::simulation::generator::SeriesGenerator;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

/// Generate a plausible EUR/USD rate.
fn arb_rate() -> impl Strategy<Value = f64> {
    0.8f64..1.6f64
}

/// Generate a valid series of 2..120 points with irregular date gaps.
fn arb_series() -> impl Strategy<Value = RateSeries> {
    prop::collection::vec((1i64..5i64, arb_rate()), 2..120).prop_map(|steps| {
        let mut date = base_date();
        let mut dates = Vec::with_capacity(steps.len());
        let mut rates = Vec::with_capacity(steps.len());
        for (gap, rate) in steps {
            date += Duration::days(gap);
            dates.push(date);
            rates.push(rate);
        }
        RateSeries::from_parts(&dates, &rates).unwrap()
    })
}

/// Generate a date range of 0..800 days starting within 2020 to 2024.
fn arb_range() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (0i64..1800i64, 0i64..800i64).prop_map(|(offset, len)| {
        let start = base_date() + Duration::days(offset);
        (start, start + Duration::days(len))
    })
}

/// Generate raw loaded rows: shuffled dates, some values missing.
fn arb_raw_series() -> impl Strategy<Value = RawSeries> {
    prop::collection::vec((0i64..60i64, prop::option::weighted(0.7, arb_rate())), 1..80)
        .prop_map(|rows| {
            RawSeries::new(
                rows.into_iter()
                    .map(|(offset, value)| (base_date() + Duration::days(offset), value))
                    .collect(),
            )
        })
}

proptest! {
    // ===================================================================
    // INVARIANT 1: The naive forecast is the previous day's rate.
    //
    // Row i of the forecast table forecasts with rate[i] and realizes
    // rate[i + 1]; the table has exactly one row fewer than the series.
    // ===================================================================
    #[test]
    fn naive_forecast_is_previous_rate(series in arb_series()) {
        let (table, _) = AnalysisEngine::naive_forecast(&series).unwrap();
        let rates = series.rates();
        prop_assert_eq!(table.len(), rates.len() - 1);
        for (i, row) in table.rows().iter().enumerate() {
            prop_assert_eq!(row.forecast, rates[i]);
            prop_assert_eq!(row.actual, rates[i + 1]);
        }
    }

    // ===================================================================
    // INVARIANT 2: RMSE is never negative or NaN.
    // ===================================================================
    #[test]
    fn rmse_is_non_negative(series in arb_series()) {
        let (_, rmse) = AnalysisEngine::naive_forecast(&series).unwrap();
        prop_assert!(rmse.is_finite());
        prop_assert!(rmse >= 0.0, "RMSE {} must be ≥ 0", rmse);
    }

    // ===================================================================
    // INVARIANT 3: Anchored generation yields weekdays only, strictly
    // increasing.
    // ===================================================================
    #[test]
    fn anchored_generation_weekdays_only(
        (start, end) in arb_range(),
        terminal in arb_rate(),
        seed in any::<u64>(),
    ) {
        match SeriesGenerator::default().generate_anchored(terminal, start, end, seed) {
            Ok(series) => {
                let dates = series.dates();
                prop_assert!(dates.iter().all(|d| d.weekday().num_days_from_monday() < 5));
                prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
                prop_assert!(dates.iter().all(|d| *d >= start && *d <= end));
            }
            Err(e) => {
                // Only a weekend-only range may fail.
                prop_assert!((end - start).num_days() < 2, "unexpected error {}", e);
            }
        }
    }

    // ===================================================================
    // INVARIANT 4: Unanchored generation is deterministic, bit for bit.
    // ===================================================================
    #[test]
    fn unanchored_generation_is_deterministic(
        (start, end) in arb_range(),
        initial in arb_rate(),
        seed in any::<u64>(),
    ) {
        let generator = SeriesGenerator::default();
        let a = generator.generate_unanchored(start, end, initial, seed);
        let b = generator.generate_unanchored(start, end, initial, seed);
        match (a, b) {
            (Ok(a), Ok(b)) => {
                let bits_a: Vec<u64> = a.rates().iter().map(|r| r.to_bits()).collect();
                let bits_b: Vec<u64> = b.rates().iter().map(|r| r.to_bits()).collect();
                prop_assert_eq!(bits_a, bits_b);
                prop_assert_eq!(a.dates(), b.dates());
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "identical calls disagreed"),
        }
    }

    // ===================================================================
    // INVARIANT 5: Error metrics are consistent.
    //
    // mean(errors) = mean(actual) - mean(forecast), and the mean absolute
    // error bounds the magnitude of the mean error.
    // ===================================================================
    #[test]
    fn error_metrics_consistent(series in arb_series()) {
        let (table, _) = AnalysisEngine::naive_forecast(&series).unwrap();
        let metrics = AnalysisEngine::forecast_errors(&table).unwrap();
        let expected = mean(&table.actuals()) - mean(&table.forecasts());
        prop_assert!((metrics.mean_error - expected).abs() < 1e-9);
        prop_assert!(metrics.mean_absolute_error + 1e-12 >= metrics.mean_error.abs());
        prop_assert_eq!(metrics.errors.len(), table.len());
    }

    // ===================================================================
    // INVARIANT 6: Prepared loads have no missing values and stay sorted.
    // ===================================================================
    #[test]
    fn prepared_series_is_complete_and_sorted(raw in arb_raw_series()) {
        let series = raw.prepare().unwrap();
        let dates = series.dates();
        prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(series.rates().iter().all(|r| r.is_finite() && *r > 0.0));

        // Every distinct date from the first filled value onward survives;
        // a duplicated date takes its last present observation.
        let mut last_obs: BTreeMap<NaiveDate, Option<f64>> = BTreeMap::new();
        for &(date, value) in raw.rows() {
            let slot = last_obs.entry(date).or_insert(None);
            if value.is_some() {
                *slot = value;
            }
        }
        let expected: Vec<NaiveDate> = last_obs
            .iter()
            .skip_while(|(_, v)| v.is_none())
            .map(|(d, _)| *d)
            .collect();
        prop_assert_eq!(&dates, &expected);

        // An observed value is never replaced by a fill.
        for (date, rate) in series.dates().iter().zip(series.rates()) {
            if let Some(Some(observed)) = last_obs.get(date) {
                prop_assert_eq!(rate, *observed);
            }
        }
    }

    // ===================================================================
    // INVARIANT 7: Returns have one absent entry, at the first date.
    // ===================================================================
    #[test]
    fn first_return_is_absent(series in arb_series()) {
        let with_returns = AnalysisEngine::compute_returns(&series).unwrap();
        prop_assert!(with_returns.points()[0].daily_return.is_none());
        prop_assert!(with_returns.points()[1..].iter().all(|p| p.daily_return.is_some()));
    }
}
