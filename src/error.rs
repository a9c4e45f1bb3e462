//! Errors raised while loading, densifying, and training.
use std::io;
use std::path::PathBuf;

use thiserror::Error;


/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, ForestError>;


/// Every failure the benchmark can hit.
#[derive(Debug, Error)]
pub enum ForestError {
    /// The command line did not name an input file.
    #[error("[USAGE] forestbench <svmlight file>")]
    MissingPath,

    /// The input file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A record of the input file is malformed.
    /// `line` is 1-based.
    #[error("line {line}: {reason}")]
    Parse {
        line: usize,
        reason: String,
    },

    /// The sample has no examples or no features.
    #[error("the sample is empty (no examples or no features)")]
    EmptySample,

    /// The number of values does not match the declared shape.
    #[error("shape mismatch: expected {expected} items, got {actual}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
    },

    /// A target value is not a finite number.
    #[error("label of example {row} is not finite: {value}")]
    InvalidLabel {
        row: usize,
        value: f64,
    },

    /// The dense matrix cannot be indexed by `usize`.
    #[error("dense matrix of shape ({n_sample}, {n_feature}) is too large")]
    TooLarge {
        n_sample: usize,
        n_feature: usize,
    },

    /// The allocator refused the dense matrix.
    #[error("failed to allocate {bytes} bytes for the dense matrix")]
    Allocation {
        bytes: usize,
    },

    /// A hyperparameter is out of its domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// The worker pool could not be spawned.
    #[error("failed to build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// The report could not be written.
    #[error("failed to write the report: {0}")]
    Write(#[source] io::Error),
}


impl ForestError {
    pub(crate) fn parse<S: ToString>(line: usize, reason: S) -> Self {
        Self::Parse { line, reason: reason.to_string() }
    }


    pub(crate) fn invalid<S: ToString>(name: &'static str, reason: S)
        -> Self
    {
        Self::InvalidParameter { name, reason: reason.to_string() }
    }
}
