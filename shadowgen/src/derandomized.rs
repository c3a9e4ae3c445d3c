//! Derandomized classical shadows.
//!
//! Instead of drawing every qubit's basis at random, each round is built
//! greedily so that the observables that are furthest from their required
//! measurement count are the most likely to be measured. The outer loop stops
//! as soon as every observable has been measured often enough, or after
//! `measurements_per_observable × observable_count` rounds.

use tracing::{debug, info, warn};

use crate::budget::MeasurementBudget;
use crate::cost::{CostModel, PotentialAccumulator, DEFAULT_ETA};
use crate::error::{Result, ShadowError};
use crate::match_state::MatchState;
use crate::observable::ObservableSet;
use crate::round_builder::RoundBuilder;
use crate::schedule::Schedule;

/// Parameters of a derandomization run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerandomizationConfig {
    /// Rounds that must measure each observable of weight one.
    pub measurements_per_observable: usize,
    /// Learning rate of the multiplicative-weights potential.
    pub eta: f64,
}

impl Default for DerandomizationConfig {
    fn default() -> Self {
        Self {
            measurements_per_observable: 1,
            eta: DEFAULT_ETA,
        }
    }
}

impl DerandomizationConfig {
    #[must_use]
    pub fn new(measurements_per_observable: usize) -> Self {
        Self {
            measurements_per_observable,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_eta(mut self, eta: f64) -> Self {
        self.eta = eta;
        self
    }

    /// # Errors
    ///
    /// Returns [`ShadowError::Configuration`] unless `eta` is finite and positive.
    pub fn validate(&self) -> Result<()> {
        if !(self.eta.is_finite() && self.eta > 0.0) {
            return Err(ShadowError::configuration(format!(
                "eta must be a finite positive number, got {}",
                self.eta
            )));
        }
        Ok(())
    }
}

/// Outcome of [`Derandomizer::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct DerandomizationReport {
    pub schedule: Schedule,
    /// Rounds that fully measured each observable.
    pub measurement_counts: Vec<usize>,
    /// `floor(weight × measurements_per_observable)` per observable.
    pub required_counts: Vec<f64>,
    /// Exponent shift applied while building each round: zero for the first,
    /// then the mean scaled potential evaluated during the round before.
    pub shifts: Vec<f64>,
    /// False when the round cap was reached before every requirement was met.
    pub converged: bool,
}

#[derive(Debug, Clone)]
pub struct Derandomizer<'a> {
    observables: &'a ObservableSet,
    config: DerandomizationConfig,
    weights: Vec<f64>,
}

impl<'a> Derandomizer<'a> {
    /// Every observable starts with weight one.
    ///
    /// # Errors
    ///
    /// Returns [`ShadowError::Configuration`] if `config` is invalid.
    pub fn new(observables: &'a ObservableSet, config: DerandomizationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            observables,
            config,
            weights: vec![1.0; observables.len()],
        })
    }

    /// Scales the required measurement count of each observable.
    ///
    /// # Errors
    ///
    /// Returns [`ShadowError::Configuration`] if there is not exactly one weight
    /// per observable or a weight is not finite and positive.
    pub fn with_weights(mut self, weights: Vec<f64>) -> Result<Self> {
        if weights.len() != self.observables.len() {
            return Err(ShadowError::configuration(format!(
                "expected {} weights, one per observable, got {}",
                self.observables.len(),
                weights.len()
            )));
        }
        if let Some((index, weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, weight)| !(weight.is_finite() && **weight > 0.0))
        {
            return Err(ShadowError::configuration(format!(
                "weight of observable {index} must be a finite positive number, got {weight}"
            )));
        }
        self.weights = weights;
        Ok(self)
    }

    #[must_use]
    pub fn config(&self) -> &DerandomizationConfig {
        &self.config
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[must_use]
    pub fn run(&self) -> DerandomizationReport {
        let observables = self.observables;
        let mut budget = MeasurementBudget::new(self.config.measurements_per_observable, self.weights.clone());
        let cost_model = CostModel::new(self.config.eta, observables.system_size(), observables.max_locality());
        let builder = RoundBuilder::new(observables, &cost_model);
        let mut state = MatchState::new(observables);
        let mut previous = PotentialAccumulator::new();
        let mut schedule = Schedule::new();
        let mut shifts = Vec::new();

        info!(
            observables = observables.len(),
            system_size = observables.system_size(),
            measurements_per_observable = self.config.measurements_per_observable,
            round_cap = budget.round_cap(),
            "derandomizing measurement schedule"
        );

        for round_index in 0..budget.round_cap() {
            state.reset(observables);
            let shift = previous.shift();
            let (round, accumulator) = builder.build(&budget, &mut state, shift, PotentialAccumulator::new());
            previous = accumulator;
            schedule.push(round);
            shifts.push(shift);

            let satisfied = budget.record_round(&state);
            debug!(round = round_index + 1, satisfied, shift, "round complete");
            if satisfied == observables.len() {
                break;
            }
        }

        let converged = budget.is_complete();
        if converged {
            info!(rounds = schedule.len(), "every observable reached its measurement count");
        } else {
            warn!(
                rounds = schedule.len(),
                satisfied = budget.satisfied_count(),
                observables = observables.len(),
                "round cap reached before every observable reached its measurement count"
            );
        }

        DerandomizationReport {
            schedule,
            measurement_counts: budget.counts().to_vec(),
            required_counts: budget.required_counts().to_vec(),
            shifts,
            converged,
        }
    }
}

/// Schedule measuring every observable `measurements_per_observable` times,
/// scaled by `weights` when given.
///
/// # Errors
///
/// Returns [`ShadowError::Configuration`] if `weights` does not hold one finite
/// positive entry per observable.
pub fn derandomized_classical_shadow(
    observables: &ObservableSet,
    measurements_per_observable: usize,
    weights: Option<&[f64]>,
) -> Result<Schedule> {
    let mut derandomizer = Derandomizer::new(observables, DerandomizationConfig::new(measurements_per_observable))?;
    if let Some(weights) = weights {
        derandomizer = derandomizer.with_weights(weights.to_vec())?;
    }
    Ok(derandomizer.run().schedule)
}
