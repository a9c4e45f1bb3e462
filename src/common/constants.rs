//! Numeric constants shared by the tree and forest code.

/// Default number of bins per feature.
pub const DEFAULT_NBIN: usize = 255;

/// Impurity decreases below this value count as zero.
pub const NUMERIC_TOLERANCE: f64 = 1e-12;

/// Stack size of each forest worker.
/// Trees are grown recursively, one frame per level.
pub const WORKER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Largest number of bins per feature; bin codes are stored as `u16`.
pub const MAX_NBIN: usize = u16::MAX as usize + 1;
