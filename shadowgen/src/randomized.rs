//! Randomized classical shadows: every basis drawn independently and uniformly.

use quantum_core::{All, Axis};
use rand::Rng;

use crate::schedule::{Round, Schedule};

/// One round with a uniformly random basis on each of `system_size` qubits.
pub fn random_round<R: Rng + ?Sized>(system_size: usize, rng: &mut R) -> Round {
    let axes = Axis::all();
    (0..system_size)
        .map(|_| axes[rng.gen_range(0..axes.len())])
        .collect::<Vec<_>>()
        .into()
}

/// `total_measurements` independent random rounds.
pub fn randomized_classical_shadow<R: Rng + ?Sized>(
    total_measurements: usize,
    system_size: usize,
    rng: &mut R,
) -> Schedule {
    (0..total_measurements)
        .map(|_| random_round(system_size, rng))
        .collect()
}
