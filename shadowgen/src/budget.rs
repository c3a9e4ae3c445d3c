//! Cumulative measurement counts and the termination rule of the round loop.

use crate::match_state::MatchState;

/// How often each observable has been fully measured, and how often it must be.
///
/// Observable `i` needs `floor(weights[i] * measurements_per_observable)` rounds
/// that match it on every qubit. The loop driving this budget never runs more
/// than `measurements_per_observable * observable_count` rounds.
#[derive(Debug, Clone)]
pub struct MeasurementBudget {
    counts: Vec<usize>,
    weights: Vec<f64>,
    required: Vec<f64>,
    round_cap: usize,
}

impl MeasurementBudget {
    /// `weights` must hold one finite positive entry per observable; the
    /// derandomizer validates this before constructing a budget.
    #[must_use]
    pub fn new(measurements_per_observable: usize, weights: Vec<f64>) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let target = measurements_per_observable as f64;
        let required = weights.iter().map(|weight| (weight * target).floor()).collect();
        Self {
            counts: vec![0; weights.len()],
            round_cap: measurements_per_observable * weights.len(),
            weights,
            required,
        }
    }

    #[must_use]
    pub fn observable_count(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn count(&self, index: usize) -> usize {
        self.counts[index]
    }

    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    #[must_use]
    pub fn weight(&self, index: usize) -> f64 {
        self.weights[index]
    }

    #[must_use]
    pub fn required(&self, index: usize) -> f64 {
        self.required[index]
    }

    #[must_use]
    pub fn required_counts(&self) -> &[f64] {
        &self.required
    }

    #[must_use]
    pub fn round_cap(&self) -> usize {
        self.round_cap
    }

    /// True once observable `index` has been measured the required number of times.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn is_met(&self, index: usize) -> bool {
        self.counts[index] as f64 >= self.required[index]
    }

    /// Credits every observable fully matched by the finished round and returns
    /// how many observables have met their requirement.
    pub fn record_round(&mut self, state: &MatchState) -> usize {
        for (index, count) in self.counts.iter_mut().enumerate() {
            if state.is_satisfied(index) {
                *count += 1;
            }
        }
        self.satisfied_count()
    }

    #[must_use]
    pub fn satisfied_count(&self) -> usize {
        (0..self.counts.len()).filter(|&index| self.is_met(index)).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.satisfied_count() == self.counts.len()
    }
}
