//! Benchmark observable sets built from neighboring-qubit correlators.

use quantum_core::{x, y, z};

use crate::error::Result;
use crate::observable::{Observable, ObservableSet};

/// Correlators between a neighboring pair `(i, i+1)` and other qubits of a chain.
///
/// Three families are produced, in order:
/// - `Yᵢ Yᵢ₊₁ Xⱼ Xⱼ₊₁` for every pair `j` that neither equals nor overlaps pair `i`,
/// - `Xᵢ Xᵢ₊₁ Zⱼ Zₖ` for distinct `j`, `k` outside pair `i`,
/// - `Xᵢ Xᵢ₊₁ Zⱼ` for every `j` outside pair `i`.
///
/// # Errors
///
/// Returns [`crate::ShadowError::Configuration`] if `system_size` is zero.
pub fn neighbor_correlators(system_size: usize) -> Result<ObservableSet> {
    let pairs = system_size.saturating_sub(1);
    let mut observables = Vec::new();

    for i in 0..pairs {
        for j in 0..pairs {
            if j == i || j == i + 1 || j + 1 == i {
                continue;
            }
            observables.push(Observable::new([y(i), y(i + 1), x(j), x(j + 1)])?);
        }
    }
    for i in 0..pairs {
        for j in (0..system_size).filter(|&j| j != i && j != i + 1) {
            for k in (0..system_size).filter(|&k| k != i && k != i + 1 && k != j) {
                observables.push(Observable::new([x(i), x(i + 1), z(j), z(k)])?);
            }
        }
    }
    for i in 0..pairs {
        for j in (0..system_size).filter(|&j| j != i && j != i + 1) {
            observables.push(Observable::new([x(i), x(i + 1), z(j)])?);
        }
    }

    ObservableSet::new(system_size, observables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_sizes() {
        // 4 qubits, pairs 0..3:
        // family one: (0,2) (2,0) -> 2
        // family two: 3 pairs × 2 outside qubits × 1 other -> 6
        // family three: 3 pairs × 2 outside qubits -> 6
        let set = neighbor_correlators(4).unwrap();
        assert_eq!(set.len(), 14);
        assert_eq!(set.max_locality(), 4);
    }

    #[test]
    fn small_chains() {
        assert!(neighbor_correlators(1).unwrap().is_empty());
        assert!(neighbor_correlators(2).unwrap().is_empty());
        assert_eq!(neighbor_correlators(3).unwrap().len(), 2);
        assert!(neighbor_correlators(0).is_err());
    }

    #[test]
    fn twenty_qubit_set_matches_reference_size() {
        // 19 pairs: 19·19 − 19 − 2·18 = 306, 19·18·17 = 5814, 19·18 = 342
        assert_eq!(neighbor_correlators(20).unwrap().len(), 306 + 5814 + 342);
    }
}
