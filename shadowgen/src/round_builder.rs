use quantum_core::{All, Axis};

use crate::budget::MeasurementBudget;
use crate::cost::{CostModel, PotentialAccumulator};
use crate::match_state::MatchState;
use crate::observable::ObservableSet;
use crate::schedule::Round;

/// Greedy construction of a single round, one qubit at a time.
///
/// Qubits are assigned in increasing order and each commitment is visible to
/// the cost evaluations of the qubits that follow it.
#[derive(Debug, Clone, Copy)]
pub struct RoundBuilder<'a> {
    observables: &'a ObservableSet,
    cost_model: &'a CostModel,
}

impl<'a> RoundBuilder<'a> {
    #[must_use]
    pub fn new(observables: &'a ObservableSet, cost_model: &'a CostModel) -> Self {
        Self {
            observables,
            cost_model,
        }
    }

    /// Builds a round starting from `state`, which must be freshly reset.
    ///
    /// On return `state` holds the round's final match state. Every cost
    /// evaluation adds to `accumulator`, which is handed back for computing the
    /// next round's shift.
    pub fn build(
        &self,
        budget: &MeasurementBudget,
        state: &mut MatchState,
        shift: f64,
        accumulator: PotentialAccumulator,
    ) -> (Round, PotentialAccumulator) {
        let system_size = self.observables.system_size();
        let mut round = Round::with_capacity(system_size);
        let mut accumulator = accumulator;
        for qubit_id in 0..system_size {
            let constraints = self.observables.acting_on(qubit_id);
            let mut costs = [0.0; 3];
            for (cost, axis) in costs.iter_mut().zip(Axis::all()) {
                state.apply(constraints, axis);
                let (candidate_cost, updated) = self.cost_model.evaluate(budget, state, shift, accumulator);
                state.revert(constraints, axis);
                *cost = candidate_cost;
                accumulator = updated;
            }
            let chosen = select_basis(costs);
            state.apply(constraints, chosen);
            round.push(chosen);
        }
        (round, accumulator)
    }
}

/// First axis, in X, Y, Z order, whose cost equals the minimum.
#[must_use]
pub fn select_basis(costs: [f64; 3]) -> Axis {
    let minimum = costs.iter().copied().fold(f64::INFINITY, f64::min);
    Axis::all()
        .into_iter()
        .zip(costs)
        .find(|&(_, cost)| cost <= minimum)
        .map_or(Axis::X, |(axis, _)| axis)
}
