//! Measurement schedules for classical shadows.
//!
//! A schedule is a list of rounds, each assigning a Pauli basis to every qubit.
//! [`derandomized_classical_shadow`] builds the rounds greedily so that each
//! target observable is measured on all of its qubits a required number of
//! times, using few rounds. [`randomized_classical_shadow`] is the baseline
//! that draws every basis uniformly at random.
//!
//! ```
//! use quantum_core::{x, z};
//! use shadowgen::{derandomized_classical_shadow, Observable, ObservableSet};
//!
//! let observables = ObservableSet::new(2, vec![Observable::new([x(0), z(1)])?])?;
//! let schedule = derandomized_classical_shadow(&observables, 1, None)?;
//! assert_eq!(schedule.to_string(), "X Z\n");
//! # Ok::<(), shadowgen::ShadowError>(())
//! ```

pub mod budget;
pub mod cost;
pub mod derandomized;
pub mod error;
pub mod generate;
pub mod match_state;
pub mod observable;
pub mod observable_file;
pub mod randomized;
pub mod round_builder;
pub mod schedule;
#[cfg(test)]
pub(crate) mod statistical_testing;

pub use cost::DEFAULT_ETA;
pub use derandomized::{derandomized_classical_shadow, DerandomizationConfig, DerandomizationReport, Derandomizer};
pub use error::ShadowError;
pub use observable::{Observable, ObservableSet};
pub use observable_file::{format_observables, parse_observables, read_observables, ObservableFile};
pub use randomized::randomized_classical_shadow;
pub use schedule::{Round, Schedule};
