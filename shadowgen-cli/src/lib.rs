//! shadowgen CLI
//!
//! Prints measurement schedules for classical shadows, one round per line.
//!
//! # Usage
//!
//! ```bash
//! # Derandomized: measure every observable in the file at least 100 times
//! shadowgen -d 100 observables.txt
//!
//! # Randomized: 1000 rounds of uniformly random bases on 20 qubits
//! shadowgen -r 1000 20 --seed 7
//!
//! # Write the neighboring-pair correlator set for a 20 qubit chain
//! shadowgen -g 20 > observables.txt
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, ArgGroup, Parser};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shadowgen::generate::neighbor_correlators;
use shadowgen::{
    format_observables, randomized_classical_shadow, read_observables, DerandomizationConfig, Derandomizer,
    ShadowError, DEFAULT_ETA,
};

/// Classical-shadow measurement schedules
#[derive(Parser, Debug)]
#[command(name = "shadowgen")]
#[command(author, version, about = "Pauli measurement schedules for classical shadows")]
#[command(group(ArgGroup::new("mode").required(true).args(["derandomized", "randomized", "generate"])))]
pub struct Cli {
    /// Derandomized shadows measuring every observable of the file at least the given number of times
    #[arg(short = 'd', num_args = 2, value_names = ["MEASUREMENTS_PER_OBSERVABLE", "OBSERVABLE_FILE"])]
    pub derandomized: Option<Vec<String>>,

    /// Randomized shadows with the given number of rounds on the given number of qubits
    #[arg(short = 'r', num_args = 2, value_names = ["TOTAL_MEASUREMENTS", "SYSTEM_SIZE"])]
    pub randomized: Option<Vec<String>>,

    /// Print the neighboring-pair correlator observables of a chain of this many qubits
    #[arg(short = 'g', value_name = "SYSTEM_SIZE")]
    pub generate: Option<String>,

    /// Learning rate of the derandomization potential
    #[arg(long, default_value_t = DEFAULT_ETA)]
    pub eta: f64,

    /// Seed for randomized shadows
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log progress to stderr (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// What a validated invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Derandomized {
        measurements_per_observable: usize,
        observable_file: PathBuf,
    },
    Randomized {
        total_measurements: usize,
        system_size: usize,
    },
    Generate {
        system_size: usize,
    },
}

impl Cli {
    /// # Errors
    ///
    /// Returns [`ShadowError::InvalidArgument`] if a count is not a non-negative
    /// integer or a system size is zero.
    pub fn mode(&self) -> Result<Mode, ShadowError> {
        if let Some([measurements, file]) = self.derandomized.as_deref() {
            return Ok(Mode::Derandomized {
                measurements_per_observable: parse_count("MEASUREMENTS_PER_OBSERVABLE", measurements)?,
                observable_file: PathBuf::from(file),
            });
        }
        if let Some([total, system_size]) = self.randomized.as_deref() {
            return Ok(Mode::Randomized {
                total_measurements: parse_count("TOTAL_MEASUREMENTS", total)?,
                system_size: parse_system_size(system_size)?,
            });
        }
        if let Some(system_size) = &self.generate {
            return Ok(Mode::Generate {
                system_size: parse_system_size(system_size)?,
            });
        }
        Err(ShadowError::InvalidArgument(
            "one of -d, -r or -g is required".to_string(),
        ))
    }

    /// Default log filter for the requested verbosity.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

fn parse_count(name: &str, value: &str) -> Result<usize, ShadowError> {
    value
        .parse()
        .map_err(|_| ShadowError::InvalidArgument(format!("{name} must be a non-negative integer, got `{value}`")))
}

fn parse_system_size(value: &str) -> Result<usize, ShadowError> {
    match parse_count("SYSTEM_SIZE", value)? {
        0 => Err(ShadowError::InvalidArgument(
            "SYSTEM_SIZE must be at least one qubit".to_string(),
        )),
        system_size => Ok(system_size),
    }
}

/// Runs the invocation, writing the schedule or observable file to `out`.
///
/// # Errors
///
/// Fails on invalid arguments, unreadable or malformed observable files, and
/// write errors.
pub fn execute(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.mode()? {
        Mode::Derandomized {
            measurements_per_observable,
            observable_file,
        } => {
            let file = read_observables(&observable_file)
                .with_context(|| format!("loading observables from {}", observable_file.display()))?;
            let config = DerandomizationConfig::new(measurements_per_observable).with_eta(cli.eta);
            let report = Derandomizer::new(&file.observables, config)?
                .with_weights(file.weights)?
                .run();
            write!(out, "{}", report.schedule)?;
        }
        Mode::Randomized {
            total_measurements,
            system_size,
        } => {
            let mut rng = cli.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
            let schedule = randomized_classical_shadow(total_measurements, system_size, &mut rng);
            write!(out, "{schedule}")?;
        }
        Mode::Generate { system_size } => {
            let observables = neighbor_correlators(system_size)?;
            tracing::info!(observables = observables.len(), system_size, "generated observables");
            write!(out, "{}", format_observables(&observables, None))?;
        }
    }
    out.flush()?;
    Ok(())
}
