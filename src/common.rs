//! Defines some common items used in this library.

/// Numeric constants.
pub mod constants;

/// Defines some checker functions.
pub(crate) mod checker;
