//! Statistics behind the autocorrelation, box and violin plots

use crate::constants::stats::{KDE_CUT, KDE_GRID_SIZE, WHISKER_IQR};

/// Drop NaN and infinite values
pub fn finite_values(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Default number of ACF lags for a series of length `n`
pub fn default_acf_lags(n: usize) -> usize {
    if n < 2 {
        return 0;
    }
    let by_length = (10.0 * (n as f64).log10()).floor() as usize;
    by_length.min(n - 1)
}

/// Default number of PACF lags for a series of length `n`
pub fn default_pacf_lags(n: usize) -> usize {
    let by_length = (10.0 * (n as f64).log10()).floor() as usize;
    by_length.min((n / 2).saturating_sub(1))
}

/// Autocovariances for lags `0..=max_lag`
///
/// With `adjusted` the lag-k sum is divided by `n - k`, otherwise by `n`.
fn autocovariance(values: &[f64], max_lag: usize, adjusted: bool) -> Vec<f64> {
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = values.iter().map(|v| v - mean).collect();

    (0..=max_lag.min(n - 1))
        .map(|k| {
            let sum: f64 = centered[..n - k]
                .iter()
                .zip(&centered[k..])
                .map(|(a, b)| a * b)
                .sum();
            let denom = if adjusted { n - k } else { n };
            sum / denom as f64
        })
        .collect()
}

/// Sample autocorrelation function, lags `0..=nlags`
///
/// Non-finite values are dropped first. Series shorter than two values or
/// without variance give an empty result.
pub fn acf(values: &[f64], nlags: Option<usize>) -> Vec<f64> {
    let values = finite_values(values);
    if values.len() < 2 {
        return vec![];
    }
    let nlags = nlags.unwrap_or_else(|| default_acf_lags(values.len()));

    let acov = autocovariance(&values, nlags, false);
    if acov[0] == 0.0 {
        return vec![];
    }
    acov.iter().map(|c| c / acov[0]).collect()
}

/// Partial autocorrelation function, lags `0..=nlags`
///
/// Solves the Yule-Walker equations with the Levinson-Durbin recursion on
/// autocovariances divided by `n - k`.
pub fn pacf(values: &[f64], nlags: Option<usize>) -> Vec<f64> {
    let values = finite_values(values);
    if values.len() < 2 {
        return vec![];
    }
    let nlags = nlags.unwrap_or_else(|| default_pacf_lags(values.len()));

    let acov = autocovariance(&values, nlags, true);
    if acov[0] == 0.0 {
        return vec![];
    }
    let r: Vec<f64> = acov.iter().map(|c| c / acov[0]).collect();

    let mut result = vec![1.0];
    let mut phi: Vec<f64> = Vec::new();
    for k in 1..r.len() {
        let num = r[k] - (1..k).map(|j| phi[j - 1] * r[k - j]).sum::<f64>();
        let den = 1.0 - (1..k).map(|j| phi[j - 1] * r[j]).sum::<f64>();
        let phi_kk = num / den;

        let mut next: Vec<f64> = (1..k).map(|j| phi[j - 1] - phi_kk * phi[k - j - 1]).collect();
        next.push(phi_kk);
        phi = next;
        result.push(phi_kk);
    }
    result
}

/// Linear-interpolated quantile of sorted data, `q` in [0, 1]
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Five-number summary with Tukey whiskers
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    /// Values beyond the whiskers
    pub outliers: Vec<f64>,
}

pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    let mut sorted = finite_values(values);
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile_sorted(&sorted, 0.25);
    let median = quantile_sorted(&sorted, 0.5);
    let q3 = quantile_sorted(&sorted, 0.75);
    let iqr = q3 - q1;
    let low_fence = q1 - WHISKER_IQR * iqr;
    let high_fence = q3 + WHISKER_IQR * iqr;

    let lower_whisker = sorted.iter().copied().find(|&v| v >= low_fence).unwrap_or(q1);
    let upper_whisker = sorted.iter().copied().rev().find(|&v| v <= high_fence).unwrap_or(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|&v| v < low_fence || v > high_fence)
        .collect();

    Some(BoxSummary {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
    })
}

/// Kernel density estimate of one violin, normalized so the peak is 1
#[derive(Debug, Clone, PartialEq)]
pub struct ViolinProfile {
    /// `[value, relative density]` pairs in increasing value order
    pub points: Vec<[f64; 2]>,
}

/// Gaussian KDE with Scott's bandwidth
pub fn violin_profile(values: &[f64]) -> Option<ViolinProfile> {
    let data = finite_values(values);
    let n = data.len();
    if n == 0 {
        return None;
    }

    let mean = data.iter().sum::<f64>() / n as f64;
    let std_dev = if n > 1 {
        (data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
    } else {
        0.0
    };
    let bandwidth = std_dev * (n as f64).powf(-0.2);
    if bandwidth == 0.0 {
        // No spread: a flat sliver at the single value
        return Some(ViolinProfile {
            points: vec![[data[0], 1.0]],
        });
    }

    let min = data.iter().copied().fold(f64::INFINITY, f64::min) - KDE_CUT * bandwidth;
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max) + KDE_CUT * bandwidth;
    let step = (max - min) / (KDE_GRID_SIZE - 1) as f64;

    let mut points: Vec<[f64; 2]> = (0..KDE_GRID_SIZE)
        .map(|i| {
            let y = min + i as f64 * step;
            let density: f64 = data
                .iter()
                .map(|x| (-0.5 * ((y - x) / bandwidth).powi(2)).exp())
                .sum();
            [y, density]
        })
        .collect();

    let peak = points.iter().map(|p| p[1]).fold(0.0, f64::max);
    for p in &mut points {
        p[1] /= peak;
    }
    Some(ViolinProfile { points })
}
