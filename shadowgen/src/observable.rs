//! Target observables: Pauli strings given as qubit-positioned axes.

use derive_more::Deref;
use quantum_core::{Axis, PositionedAxis};

use crate::error::{Result, ShadowError};
use crate::schedule::Round;

/// A Pauli observable acting nontrivially on a set of distinct qubits.
///
/// The factors keep the order in which they were given; it has no effect on
/// scheduling but is preserved when the observable is written back to a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref)]
pub struct Observable {
    factors: Vec<PositionedAxis>,
}

impl Observable {
    /// # Errors
    ///
    /// Returns [`ShadowError::Configuration`] if two factors act on the same qubit.
    pub fn new<Factor: Into<PositionedAxis>>(factors: impl IntoIterator<Item = Factor>) -> Result<Self> {
        let factors: Vec<PositionedAxis> = factors.into_iter().map(Into::into).collect();
        let mut qubits: Vec<usize> = factors.iter().map(|factor| factor.qubit_id).collect();
        qubits.sort_unstable();
        if let Some(pair) = qubits.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(ShadowError::configuration(format!(
                "observable acts on qubit {} more than once",
                pair[0]
            )));
        }
        Ok(Self { factors })
    }

    /// Number of qubits the observable acts on, i.e. its locality.
    #[must_use]
    pub fn locality(&self) -> usize {
        self.factors.len()
    }

    /// True when `round` measures every qubit of the observable in its basis.
    #[must_use]
    pub fn is_measured_by(&self, round: &Round) -> bool {
        self.factors
            .iter()
            .all(|factor| round.get(factor.qubit_id) == Some(&factor.axis))
    }
}

impl std::fmt::Display for Observable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.factors.is_empty() {
            return f.write_str("I");
        }
        for factor in &self.factors {
            write!(f, "{factor}")?;
        }
        Ok(())
    }
}

/// Observables of a fixed-size system, indexed per qubit for the round builder.
#[derive(Debug, Clone)]
pub struct ObservableSet {
    system_size: usize,
    observables: Vec<Observable>,
    // acting_on[qubit] lists (observable index, required axis)
    acting_on: Vec<Vec<(usize, Axis)>>,
}

impl ObservableSet {
    /// # Errors
    ///
    /// Returns [`ShadowError::Configuration`] if `system_size` is zero or an
    /// observable acts on a qubit outside `0..system_size`.
    pub fn new(system_size: usize, observables: Vec<Observable>) -> Result<Self> {
        if system_size == 0 {
            return Err(ShadowError::configuration("system size must be at least one qubit"));
        }
        let mut acting_on = vec![Vec::new(); system_size];
        for (index, observable) in observables.iter().enumerate() {
            for factor in observable.iter() {
                let Some(entries) = acting_on.get_mut(factor.qubit_id) else {
                    return Err(ShadowError::configuration(format!(
                        "observable {index} acts on qubit {} but the system has {system_size} qubits",
                        factor.qubit_id
                    )));
                };
                entries.push((index, factor.axis));
            }
        }
        Ok(Self {
            system_size,
            observables,
            acting_on,
        })
    }

    #[must_use]
    pub fn system_size(&self) -> usize {
        self.system_size
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observables.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Observable> {
        self.observables.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observable> {
        self.observables.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Observable] {
        &self.observables
    }

    /// Observables constraining `qubit_id`, with the axis each one requires there.
    #[must_use]
    pub fn acting_on(&self, qubit_id: usize) -> &[(usize, Axis)] {
        self.acting_on.get(qubit_id).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn max_locality(&self) -> usize {
        self.observables.iter().map(Observable::locality).max().unwrap_or(0)
    }
}

impl<'set> IntoIterator for &'set ObservableSet {
    type Item = &'set Observable;
    type IntoIter = std::slice::Iter<'set, Observable>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
