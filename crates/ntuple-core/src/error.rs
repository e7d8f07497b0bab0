//! Error types for the ntuple-core crate.

use std::error::Error;
use std::fmt;
use std::io;

/// Comprehensive error type for the training pipeline.
///
/// This enum covers all failure modes of the core: configuration validation,
/// self-play invariants, and model serialization/verification.
#[derive(Debug)]
pub enum NTupleError {
    /// I/O operation failed
    Io(io::Error),
    /// Configuration validation error
    Config(String),
    /// Self-play invariant violation
    Train(String),
    /// Model format or integrity error
    Format(String),
}

impl fmt::Display for NTupleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NTupleError::Io(err) => write!(f, "IO error: {err}"),
            NTupleError::Config(msg) => write!(f, "Configuration error: {msg}"),
            NTupleError::Train(msg) => write!(f, "Training error: {msg}"),
            NTupleError::Format(msg) => write!(f, "Model format error: {msg}"),
        }
    }
}

impl Error for NTupleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NTupleError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for NTupleError {
    fn from(err: io::Error) -> Self {
        NTupleError::Io(err)
    }
}

/// Convenience type alias for Results with NTupleError.
pub type Result<T> = std::result::Result<T, NTupleError>;
