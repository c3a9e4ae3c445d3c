//! Text format for observable sets.
//!
//! ```text
//! 4
//! 2 X 0 Z 1
//! 3 Y 1 Y 2 X 3 0.5
//! ```
//!
//! The first line holds the number of qubits. Every further non-blank line is
//! one observable: a leading label (conventionally the locality, otherwise
//! ignored), then `<Pauli letter> <qubit index>` pairs. A single token left
//! over after the pairs is the observable's weight, which defaults to one.

use std::path::Path;
use std::str::FromStr;

use quantum_core::{Axis, PositionedAxis};

use crate::error::{Result, ShadowError};
use crate::observable::{Observable, ObservableSet};

/// Observables read from a file, with their per-line weights.
#[derive(Debug, Clone)]
pub struct ObservableFile {
    pub observables: ObservableSet,
    pub weights: Vec<f64>,
}

impl ObservableFile {
    /// True when some line carried a weight other than one.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn has_custom_weights(&self) -> bool {
        self.weights.iter().any(|&weight| weight != 1.0)
    }
}

impl FromStr for ObservableFile {
    type Err = ShadowError;

    fn from_str(text: &str) -> Result<Self> {
        parse_observables(text)
    }
}

/// # Errors
///
/// Returns [`ShadowError::InputFormat`] naming the offending line.
pub fn parse_observables(text: &str) -> Result<ObservableFile> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let Some((header_line, header)) = lines.next() else {
        return Err(ShadowError::input_format(1, "missing system size"));
    };
    let system_size = match header.parse::<usize>() {
        Ok(size) if size > 0 => size,
        _ => {
            return Err(ShadowError::input_format(
                header_line,
                format!("expected a positive system size, found `{header}`"),
            ))
        }
    };

    let mut observables = Vec::new();
    let mut weights = Vec::new();
    for (line_number, line) in lines {
        let (observable, weight) = parse_observable_line(line_number, line, system_size)?;
        observables.push(observable);
        weights.push(weight);
    }

    let observables = ObservableSet::new(system_size, observables)
        .map_err(|error| ShadowError::input_format(header_line, error.to_string()))?;
    Ok(ObservableFile { observables, weights })
}

fn parse_observable_line(line_number: usize, line: &str, system_size: usize) -> Result<(Observable, f64)> {
    let tokens: Vec<&str> = line.split_whitespace().skip(1).collect();
    let mut factors = Vec::with_capacity(tokens.len() / 2);
    let mut pairs = tokens.chunks_exact(2);
    for pair in pairs.by_ref() {
        let axis: Axis = pair[0].parse().map_err(|_| {
            ShadowError::input_format(line_number, format!("expected a Pauli letter X, Y or Z, found `{}`", pair[0]))
        })?;
        let qubit_id: usize = pair[1].parse().map_err(|_| {
            ShadowError::input_format(line_number, format!("expected a qubit index, found `{}`", pair[1]))
        })?;
        if qubit_id >= system_size {
            return Err(ShadowError::input_format(
                line_number,
                format!("qubit index {qubit_id} is out of range for {system_size} qubits"),
            ));
        }
        factors.push(PositionedAxis { qubit_id, axis });
    }

    let weight = match pairs.remainder().first() {
        None => 1.0,
        Some(token) => match token.parse::<f64>() {
            Ok(weight) if weight.is_finite() && weight > 0.0 => weight,
            _ => {
                return Err(ShadowError::input_format(
                    line_number,
                    format!("expected a positive weight, found `{token}`"),
                ))
            }
        },
    };

    let observable = Observable::new(factors).map_err(|error| match error {
        ShadowError::Configuration { message } => ShadowError::input_format(line_number, message),
        other => other,
    })?;
    Ok((observable, weight))
}

/// # Errors
///
/// Returns [`ShadowError::Io`] if the file cannot be read, otherwise as
/// [`parse_observables`].
pub fn read_observables(path: impl AsRef<Path>) -> Result<ObservableFile> {
    let text = std::fs::read_to_string(path)?;
    parse_observables(&text)
}

/// Formats `observables` in the file format, writing weights that differ from one.
///
/// # Panics
///
/// Panics if `weights` is given and its length differs from the number of observables.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_observables(observables: &ObservableSet, weights: Option<&[f64]>) -> String {
    if let Some(weights) = weights {
        assert_eq!(weights.len(), observables.len(), "one weight per observable");
    }
    let mut text = format!("{}\n", observables.system_size());
    for (index, observable) in observables.iter().enumerate() {
        text.push_str(&observable.locality().to_string());
        for factor in observable.iter() {
            text.push_str(&format!(" {} {}", factor.axis, factor.qubit_id));
        }
        if let Some(&weight) = weights.and_then(|weights| weights.get(index)) {
            if weight != 1.0 {
                text.push_str(&format!(" {weight}"));
            }
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantum_core::{x, y, z};

    fn assert_format_error(text: &str, expected_line: usize) {
        match parse_observables(text) {
            Err(ShadowError::InputFormat { line, .. }) => assert_eq!(line, expected_line, "{text:?}"),
            other => panic!("expected an input format error for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn parses_pairs_and_optional_weight() {
        let file: ObservableFile = "3\n2 X 0 Z 1\n\n3 y 0 Y 1 X 2 0.5\n".parse().unwrap();
        assert_eq!(file.observables.system_size(), 3);
        assert_eq!(file.observables.len(), 2);
        assert_eq!(file.observables.get(0).unwrap().as_slice(), &[x(0), z(1)]);
        assert_eq!(file.observables.get(1).unwrap().as_slice(), &[y(0), y(1), x(2)]);
        assert_eq!(file.weights, vec![1.0, 0.5]);
        assert!(file.has_custom_weights());
    }

    #[test]
    fn label_is_ignored() {
        let file = parse_observables("2\nobs X 1\n").unwrap();
        assert_eq!(file.observables.get(0).unwrap().as_slice(), &[x(1)]);
        assert!(!file.has_custom_weights());
    }

    #[test]
    fn label_only_line_is_an_empty_observable() {
        let file = parse_observables("2\n0\n").unwrap();
        assert_eq!(file.observables.len(), 1);
        assert_eq!(file.observables.get(0).unwrap().locality(), 0);
    }

    #[test]
    fn header_only_is_an_empty_set() {
        let file = parse_observables("5\n").unwrap();
        assert!(file.observables.is_empty());
    }

    #[test]
    fn malformed_files_name_the_line() {
        assert_format_error("", 1);
        assert_format_error("zero\n1 X 0\n", 1);
        assert_format_error("0\n", 1);
        assert_format_error("2\n1 X 0\n1 W 1\n", 3);
        assert_format_error("2\n1 X one\n", 2);
        assert_format_error("2\n1 X 2\n", 2);
        assert_format_error("2\n2 X 0 Z 0\n", 2);
        assert_format_error("2\n1 X 0 heavy\n", 2);
        assert_format_error("2\n1 X 0 -1\n", 2);
    }

    #[test]
    fn formatted_text_parses_back() {
        let set = ObservableSet::new(
            3,
            vec![Observable::new([x(0), z(2)]).unwrap(), Observable::new([y(1)]).unwrap()],
        )
        .unwrap();
        let text = format_observables(&set, Some(&[1.0, 2.5]));
        assert_eq!(text, "3\n2 X 0 Z 2\n1 Y 1 2.5\n");
        let file = parse_observables(&text).unwrap();
        assert_eq!(file.observables.as_slice(), set.as_slice());
        assert_eq!(file.weights, vec![1.0, 2.5]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let directory = tempfile::tempdir().unwrap();
        let result = read_observables(directory.path().join("absent.txt"));
        assert!(matches!(result, Err(ShadowError::Io(_))));
    }

    #[test]
    fn reads_file_from_disk() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("observables.txt");
        std::fs::write(&path, "2\n2 X 0 Z 1\n").unwrap();
        let file = read_observables(&path).unwrap();
        assert_eq!(file.observables.len(), 1);
    }
}
