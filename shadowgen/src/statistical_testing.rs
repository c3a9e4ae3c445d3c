//! Frequency checks for randomized schedules.
//!
//! Tolerances are relative to the expected count per axis:
//! - ±5% for ≥100K samples
//! - ±10% for fewer samples

use quantum_core::{All, Axis};

pub const TOLERANCE_HIGH_SAMPLES: f64 = 0.05;

pub const TOLERANCE_LOW_SAMPLES: f64 = 0.10;

/// Asserts that X, Y and Z each make up a third of `samples` within
/// `relative_tolerance`.
///
/// # Panics
/// Panics if `samples` is empty or an axis deviates by more than the tolerance.
#[allow(clippy::cast_precision_loss)]
pub fn assert_axes_uniform(samples: impl IntoIterator<Item = Axis>, relative_tolerance: f64, context: &str) {
    let mut counts = [0usize; 3];
    for axis in samples {
        counts[axis as usize] += 1;
    }
    let total: usize = counts.iter().sum();
    assert!(total > 0, "{context}: no samples");
    let expected = total as f64 / 3.0;
    for (axis, count) in Axis::all().into_iter().zip(counts) {
        let ratio = count as f64 / expected;
        assert!(
            ((1.0 - relative_tolerance)..(1.0 + relative_tolerance)).contains(&ratio),
            "{context}: {axis} drawn {count} times, expected {expected:.0} (±{:.0}%)",
            relative_tolerance * 100.0
        );
    }
}
