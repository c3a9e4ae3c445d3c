//! Per-round bookkeeping of how far each observable is from being measured.

use quantum_core::Axis;

use crate::observable::ObservableSet;

/// Matches still needed by every observable in the round being built.
///
/// A conflicting basis adds [`MatchState::penalty`] instead of setting a flag,
/// so a conflicted observable always needs more matches than the system has
/// qubits. The cost model relies on the exact magnitude for tie-breaking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    needed: Vec<usize>,
    penalty: usize,
}

impl MatchState {
    #[must_use]
    pub fn new(observables: &ObservableSet) -> Self {
        Self {
            needed: observables.iter().map(|observable| observable.locality()).collect(),
            penalty: conflict_penalty(observables.system_size()),
        }
    }

    /// Restores the round-start state: every observable needs all of its qubits.
    pub fn reset(&mut self, observables: &ObservableSet) {
        self.needed.clear();
        self.needed
            .extend(observables.iter().map(|observable| observable.locality()));
    }

    /// Records that a qubit is measured in `axis`.
    ///
    /// `constraints` are the (observable index, required axis) pairs of that qubit,
    /// see [`ObservableSet::acting_on`].
    pub fn apply(&mut self, constraints: &[(usize, Axis)], axis: Axis) {
        for &(index, required) in constraints {
            if required == axis {
                self.needed[index] -= 1;
            } else {
                self.needed[index] += self.penalty;
            }
        }
    }

    /// Exact inverse of [`MatchState::apply`] with the same arguments.
    pub fn revert(&mut self, constraints: &[(usize, Axis)], axis: Axis) {
        for &(index, required) in constraints {
            if required == axis {
                self.needed[index] += 1;
            } else {
                self.needed[index] -= self.penalty;
            }
        }
    }

    #[must_use]
    pub fn needed(&self, index: usize) -> usize {
        self.needed[index]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.needed
    }

    /// True once every qubit of the observable has been matched.
    #[must_use]
    pub fn is_satisfied(&self, index: usize) -> bool {
        self.needed[index] == 0
    }

    #[must_use]
    pub fn penalty(&self) -> usize {
        self.penalty
    }
}

#[must_use]
pub fn conflict_penalty(system_size: usize) -> usize {
    100 * (system_size + 10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observable::Observable;
    use quantum_core::{x, y, z};

    fn two_observables() -> ObservableSet {
        ObservableSet::new(
            2,
            vec![
                Observable::new([x(0), z(1)]).unwrap(),
                Observable::new([y(0)]).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn starts_at_locality() {
        let state = MatchState::new(&two_observables());
        assert_eq!(state.as_slice(), &[2, 1]);
        assert_eq!(state.penalty(), 1200);
    }

    #[test]
    fn match_decrements_and_conflict_adds_penalty() {
        let set = two_observables();
        let mut state = MatchState::new(&set);
        state.apply(set.acting_on(0), Axis::X);
        assert_eq!(state.as_slice(), &[1, 1 + 1200]);
        state.apply(set.acting_on(1), Axis::Z);
        assert_eq!(state.as_slice(), &[0, 1201]);
        assert_eq!(state.needed(1), 1 + state.penalty());
        assert!(state.is_satisfied(0));
        assert!(!state.is_satisfied(1));
    }

    #[test]
    fn revert_undoes_apply() {
        let set = two_observables();
        let mut state = MatchState::new(&set);
        let before = state.clone();
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            state.apply(set.acting_on(0), axis);
            state.revert(set.acting_on(0), axis);
            assert_eq!(state, before);
        }
    }

    #[test]
    fn reset_restores_round_start() {
        let set = two_observables();
        let mut state = MatchState::new(&set);
        state.apply(set.acting_on(0), Axis::Z);
        state.reset(&set);
        assert_eq!(state, MatchState::new(&set));
    }
}
