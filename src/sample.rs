//! Struct `Sample` represents a batch sample read from a SVMLight file,
//! struct `DenseSample` its dense counterpart used for training.

// Provides feature struct.
pub(crate) mod feature_struct;
// Provides sample struct.
pub(crate) mod sample_struct;
// Provides the dense sample.
pub(crate) mod dense_sample;

// Provides a struct that reads a file.
pub(crate) mod sample_reader;


pub use sample_reader::SampleReader;
pub use sample_struct::{Sample, ZeroBased};
pub use dense_sample::DenseSample;
pub use feature_struct::SparseFeature;
