//! Measurement rounds and the ordered schedule they form.

use derive_more::{Deref, From, Into};
use quantum_core::Axis;

/// One measurement basis per qubit, indexed by qubit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deref, From, Into)]
pub struct Round(Vec<Axis>);

impl Round {
    #[must_use]
    pub fn with_capacity(system_size: usize) -> Self {
        Self(Vec::with_capacity(system_size))
    }

    pub(crate) fn push(&mut self, axis: Axis) {
        self.0.push(axis);
    }

    #[must_use]
    pub fn system_size(&self) -> usize {
        self.0.len()
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (qubit_id, axis) in self.0.iter().enumerate() {
            if qubit_id > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{axis}")?;
        }
        Ok(())
    }
}

/// Rounds in execution order.
///
/// Formats as one line per round, each line listing the bases of all qubits
/// separated by spaces.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, From, Into)]
pub struct Schedule(Vec<Round>);

impl Schedule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, round: Round) {
        self.0.push(round);
    }

    /// Number of rounds that measure `observable` on all of its qubits.
    #[must_use]
    pub fn measurement_count(&self, observable: &crate::Observable) -> usize {
        self.0.iter().filter(|round| observable.is_measured_by(round)).count()
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for round in &self.0 {
            writeln!(f, "{round}")?;
        }
        Ok(())
    }
}

impl<'schedule> IntoIterator for &'schedule Schedule {
    type Item = &'schedule Round;
    type IntoIter = std::slice::Iter<'schedule, Round>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Schedule {
    type Item = Round;
    type IntoIter = std::vec::IntoIter<Round>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Round> for Schedule {
    fn from_iter<T: IntoIterator<Item = Round>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_formats_space_separated() {
        let round = Round::from(vec![Axis::X, Axis::Z, Axis::Y]);
        assert_eq!(round.to_string(), "X Z Y");
        assert_eq!(round.system_size(), 3);
    }

    #[test]
    fn schedule_formats_one_line_per_round() {
        let schedule: Schedule = [vec![Axis::X, Axis::Z], vec![Axis::Y, Axis::Y]]
            .into_iter()
            .map(Round::from)
            .collect();
        assert_eq!(schedule.to_string(), "X Z\nY Y\n");
        assert_eq!(Schedule::new().to_string(), "");
    }
}
