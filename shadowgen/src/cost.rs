//! Pessimistic-estimator cost guiding the choice of each qubit's basis.
//!
//! For an observable that has been measured `m` times and still needs `k`
//! matching qubits in the current round, the potential is
//!
//! ```text
//! V = η/2 · m − ln(1 − ν / 3^k)     if k ≤ n
//! V = η/2 · m                       otherwise (conflicted this round)
//! ```
//!
//! with `ν = 1 − exp(−η/2)`. The cost of a candidate round state is
//! `Σ exp(−V/w − shift)` over the observables still below their requirement,
//! where `shift` is the mean of `V/w` over every evaluation of the previous
//! round. Without the shift the exponentials overflow for large systems.

use crate::budget::MeasurementBudget;
use crate::match_state::MatchState;

/// Default multiplicative-weights learning rate.
pub const DEFAULT_ETA: f64 = 0.9;

/// Running sum of the potentials seen by [`CostModel::evaluate`] during one round.
///
/// Its mean becomes the next round's shift.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PotentialAccumulator {
    sum: f64,
    count: usize,
}

impl PotentialAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn add(self, scaled_potential: f64) -> Self {
        Self {
            sum: self.sum + scaled_potential,
            count: self.count + 1,
        }
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean accumulated potential, or zero when nothing contributed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn shift(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

#[derive(Debug, Clone)]
pub struct CostModel {
    eta: f64,
    nu: f64,
    system_size: usize,
    // log_match_terms[k] = ln(1 - nu / 3^k)
    log_match_terms: Vec<f64>,
}

impl CostModel {
    /// `max_locality` bounds the `k` for which the log term is tabulated.
    #[must_use]
    pub fn new(eta: f64, system_size: usize, max_locality: usize) -> Self {
        let nu = 1.0 - (-eta / 2.0).exp();
        let mut log_match_terms = Vec::with_capacity(max_locality + 1);
        let mut power_of_three = 1.0_f64;
        for _ in 0..=max_locality {
            log_match_terms.push((1.0 - nu / power_of_three).ln());
            power_of_three *= 3.0;
        }
        Self {
            eta,
            nu,
            system_size,
            log_match_terms,
        }
    }

    #[must_use]
    pub fn eta(&self) -> f64 {
        self.eta
    }

    #[must_use]
    pub fn nu(&self) -> f64 {
        self.nu
    }

    /// The potential `V` of an observable measured `measurements_so_far` times
    /// that still needs `matches_needed` qubits this round.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn potential(&self, measurements_so_far: usize, matches_needed: usize) -> f64 {
        let measured_term = self.eta / 2.0 * measurements_so_far as f64;
        if matches_needed > self.system_size {
            return measured_term;
        }
        measured_term - self.log_match_term(matches_needed)
    }

    fn log_match_term(&self, matches_needed: usize) -> f64 {
        match self.log_match_terms.get(matches_needed) {
            Some(&term) => term,
            None => {
                let exponent = i32::try_from(matches_needed).unwrap_or(i32::MAX);
                (1.0 - self.nu / 3.0_f64.powi(exponent)).ln()
            }
        }
    }

    /// Cost of the (possibly partial) round described by `state`.
    ///
    /// Every observable still below its requirement contributes
    /// `exp(−V/w − shift)` and adds `V/w` to the returned accumulator.
    #[must_use]
    pub fn evaluate(
        &self,
        budget: &MeasurementBudget,
        state: &MatchState,
        shift: f64,
        accumulator: PotentialAccumulator,
    ) -> (f64, PotentialAccumulator) {
        let mut cost = 0.0;
        let mut accumulator = accumulator;
        for (index, &matches_needed) in state.as_slice().iter().enumerate() {
            if budget.is_met(index) {
                continue;
            }
            let scaled = self.potential(budget.count(index), matches_needed) / budget.weight(index);
            cost += (-scaled - shift).exp();
            accumulator = accumulator.add(scaled);
        }
        (cost, accumulator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_state::conflict_penalty;
    use crate::observable::{Observable, ObservableSet};
    use quantum_core::{x, z, Axis};

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn nu_matches_eta() {
        let model = CostModel::new(DEFAULT_ETA, 4, 2);
        assert!((model.eta() - DEFAULT_ETA).abs() < TOLERANCE);
        assert!((model.nu() - (1.0 - (-0.45_f64).exp())).abs() < TOLERANCE);
    }

    #[test]
    fn potential_grows_with_measurements_and_shrinks_with_needed_matches() {
        let model = CostModel::new(DEFAULT_ETA, 4, 4);
        assert!(model.potential(1, 2) > model.potential(0, 2));
        assert!(model.potential(0, 2) > model.potential(0, 3));
        assert!(model.potential(0, 0) > 0.0);
        // a conflicted observable keeps only the measured term
        let conflicted = model.potential(0, 4 + conflict_penalty(4));
        for matches_needed in 0..=4 {
            assert!(conflicted < model.potential(0, matches_needed));
        }
    }

    #[test]
    fn conflicted_observable_drops_log_term() {
        let model = CostModel::new(DEFAULT_ETA, 2, 2);
        assert!((model.potential(3, 1200) - 0.45 * 3.0).abs() < TOLERANCE);
        assert!((model.potential(0, 1201)).abs() < TOLERANCE);
    }

    #[test]
    fn tabulated_and_direct_log_terms_agree() {
        let model = CostModel::new(DEFAULT_ETA, 10, 2);
        let nu = model.nu();
        for k in 0..=10 {
            let expected = -(1.0 - nu / 3.0_f64.powi(k)).ln();
            assert!((model.potential(0, k as usize) - expected).abs() < TOLERANCE);
        }
    }

    #[test]
    fn shift_is_mean_or_zero() {
        assert_eq!(PotentialAccumulator::new().shift(), 0.0);
        let accumulator = PotentialAccumulator::new().add(1.0).add(2.0).add(6.0);
        assert_eq!(accumulator.count(), 3);
        assert!((accumulator.sum() - 9.0).abs() < TOLERANCE);
        assert!((accumulator.shift() - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn evaluate_skips_met_observables() {
        let set = ObservableSet::new(
            2,
            vec![Observable::new([x(0)]).unwrap(), Observable::new([z(1)]).unwrap()],
        )
        .unwrap();
        let model = CostModel::new(DEFAULT_ETA, 2, 1);
        let mut budget = MeasurementBudget::new(1, vec![1.0, 1.0]);
        let mut state = MatchState::new(&set);

        let (initial_cost, accumulator) = model.evaluate(&budget, &state, 0.0, PotentialAccumulator::new());
        assert_eq!(accumulator.count(), 2);
        assert!((initial_cost - 2.0 * (1.0 - model.nu() / 3.0)).abs() < TOLERANCE);

        state.apply(set.acting_on(0), Axis::X);
        budget.record_round(&state);
        let (cost, accumulator) = model.evaluate(&budget, &MatchState::new(&set), 0.0, accumulator);
        assert_eq!(accumulator.count(), 3);
        assert!((cost - (1.0 - model.nu() / 3.0)).abs() < TOLERANCE);
    }

    #[test]
    fn shift_scales_cost_uniformly() {
        let set = ObservableSet::new(1, vec![Observable::new([x(0)]).unwrap()]).unwrap();
        let model = CostModel::new(DEFAULT_ETA, 1, 1);
        let budget = MeasurementBudget::new(1, vec![1.0]);
        let state = MatchState::new(&set);
        let (unshifted, _) = model.evaluate(&budget, &state, 0.0, PotentialAccumulator::new());
        let (shifted, _) = model.evaluate(&budget, &state, 2.0, PotentialAccumulator::new());
        assert!((shifted - unshifted * (-2.0_f64).exp()).abs() < TOLERANCE);
    }
}
