//! Adaptive threshold for bimodal samples.
//!
//! Both the brightness of each frame and the run durations of the resulting
//! binary signal cluster into two groups (lamp on/off, dot/dash, symbol/word
//! gap). [`compute_threshold`] finds the split point by iterative means:
//! start at the middle of the range, then repeatedly move to the midpoint
//! between the means of the two sides until the split stops moving.

use crate::error::{DecodeError, Result};

/// Split `samples` into two populations and return the boundary between them.
///
/// Values `< threshold` belong to the low population. Iteration stops once
/// the threshold moves by no more than `tolerance`; the result is truncated
/// toward zero.
///
/// An empty slice is an error. When every sample has the same value one side
/// of the split is empty and the value itself is returned.
pub fn compute_threshold<T>(samples: &[T], tolerance: u32) -> Result<u32>
where
    T: Copy + Into<f64>,
{
    let (min, max) = samples
        .iter()
        .map(|&s| Into::<f64>::into(s))
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or(DecodeError::EmptySignal)?;

    let tolerance = f64::from(tolerance);
    let mut threshold = min + (max - min) / 2.0;
    // Forces at least one refinement pass
    let mut last_threshold = threshold + tolerance + 1.0;

    while (threshold - last_threshold).abs() > tolerance {
        let (Some(low), Some(high)) = split_means(samples, threshold) else {
            break;
        };
        last_threshold = threshold;
        threshold = low + (high - low) / 2.0;
    }

    Ok(threshold as u32)
}

/// Means of the samples below and at-or-above `threshold`.
fn split_means<T>(samples: &[T], threshold: f64) -> (Option<f64>, Option<f64>)
where
    T: Copy + Into<f64>,
{
    let (mut low_sum, mut low_count) = (0.0, 0u32);
    let (mut high_sum, mut high_count) = (0.0, 0u32);

    for &sample in samples {
        let value: f64 = sample.into();
        if value < threshold {
            low_sum += value;
            low_count += 1;
        } else {
            high_sum += value;
            high_count += 1;
        }
    }

    let mean = |sum: f64, count: u32| (count > 0).then(|| sum / f64::from(count));
    (mean(low_sum, low_count), mean(high_sum, high_count))
}

/// On/off signal: `true` where the intensity is strictly above `threshold`.
pub fn binarize(intensities: &[u8], threshold: u32) -> Vec<bool> {
    intensities
        .iter()
        .map(|&value| u32::from(value) > threshold)
        .collect()
}
