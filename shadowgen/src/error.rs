//! Error type shared by the scheduling core and the observable-file reader.

use thiserror::Error;

/// Everything that can go wrong before a schedule is produced.
///
/// All variants are precondition violations: they are detected before the
/// first round is built, and no partial schedule is ever returned.
#[derive(Debug, Error)]
pub enum ShadowError {
    /// Inconsistent programmatic input, such as a weight vector whose length
    /// differs from the number of observables.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Malformed observable file. `line` is 1-based.
    #[error("observable file line {line}: {message}")]
    InputFormat { line: usize, message: String },

    /// A command-line value that could not be interpreted.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to read observable file: {0}")]
    Io(#[from] std::io::Error),
}

impl ShadowError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn input_format(line: usize, message: impl Into<String>) -> Self {
        Self::InputFormat {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T, E = ShadowError> = std::result::Result<T, E>;
