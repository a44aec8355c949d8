//! Statistical primitives for gaze data reduction.
//!
//! Pure functions over `f64` slices. Precision measures follow the
//! eye-tracking literature: population standard deviation, intersample
//! RMS (Holmqvist, Nyström & Mulvey, 2012), and median absolute
//! deviation (Lohr, Friedman & Komogortsev, 2019).
//!
//! All functions fail with a typed error on empty input instead of
//! silently producing `NaN` from a zero division.

use thiserror::Error;

/// Errors from statistics primitives.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    /// Input slice was empty.
    #[error("empty input slice")]
    EmptyInput,

    /// Input slice was too short for the requested measure.
    #[error("need at least {needed} samples, got {got}")]
    NotEnoughSamples {
        /// Minimum required sample count.
        needed: usize,
        /// Actual sample count.
        got: usize,
    },
}

/// Convenience alias for statistics results.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Arithmetic mean.
///
/// # Example
/// ```
/// use drishti::stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
/// ```
pub fn mean(xs: &[f64]) -> Result<f64> {
    if xs.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    Ok(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Population standard deviation (divides by N, not N-1).
pub fn sd(xs: &[f64]) -> Result<f64> {
    let m = mean(xs)?;
    let var = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / xs.len() as f64;
    Ok(var.sqrt())
}

/// Sample median. Averages the two middle elements for even lengths.
pub fn median(xs: &[f64]) -> Result<f64> {
    if xs.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let m = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[m - 1] + sorted[m]) / 2.0)
    } else {
        Ok(sorted[m])
    }
}

/// Intersample root-mean-square error: RMS of successive sample-to-sample
/// differences. Penalizes jitter rather than constant offset, which makes
/// it the standard precision measure alongside [`sd`].
///
/// Needs at least two samples (N-1 differences).
pub fn rmsi(xs: &[f64]) -> Result<f64> {
    if xs.len() < 2 {
        return Err(StatsError::NotEnoughSamples {
            needed: 2,
            got: xs.len(),
        });
    }
    let sum_sq: f64 = xs.windows(2).map(|w| (w[1] - w[0]).powi(2)).sum();
    Ok((sum_sq / (xs.len() - 1) as f64).sqrt())
}

/// Median absolute deviation from the median.
pub fn mad(xs: &[f64]) -> Result<f64> {
    let med = median(xs)?;
    let devs: Vec<f64> = xs.iter().map(|x| (x - med).abs()).collect();
    median(&devs)
}

/// 2D median absolute deviation, combining horizontal and vertical gaze
/// angle series into a single radial precision value.
pub fn mad2(xs: &[f64], ys: &[f64]) -> Result<f64> {
    let mx = mad(xs)?;
    let my = mad(ys)?;
    Ok((mx * mx + my * my).sqrt())
}
