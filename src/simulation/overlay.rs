//! Deterministic overlays applied on top of a generated random walk.

use std::f64::consts::PI;

/// `n` evenly spaced values from `start` to `end`, both inclusive.
///
/// A single value is `start`; zero values is empty.
pub fn linear_trend(n: usize, start: f64, end: f64) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// `amplitude * sin(2π * i / period)` for each index `i` in `0..n`.
pub fn annual_seasonality(n: usize, amplitude: f64, period: f64) -> Vec<f64> {
    (0..n)
        .map(|i| amplitude * (2.0 * PI * i as f64 / period).sin())
        .collect()
}

/// Scale each rate by `1 + trend[i] + seasonal[i]`.
pub fn apply_overlays(rates: &mut [f64], trend: &[f64], seasonal: &[f64]) {
    for ((rate, t), s) in rates.iter_mut().zip(trend).zip(seasonal) {
        *rate *= 1.0 + t + s;
    }
}
