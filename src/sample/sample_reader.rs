use std::path::Path;

use crate::error::{ForestError, Result};
use super::sample_struct::{Sample, ZeroBased, read_svmlight};


/// A struct that returns [`Sample`].
/// Using this struct, one can read a SVMLight format file to [`Sample`].
/// Other formats are not supported.
/// # Example
/// ```no_run
/// use forestbench::{SampleReader, ZeroBased};
///
/// let filename = "/path/to/svmlight/file";
/// let sample = SampleReader::default()
///     .file(filename)
///     .zero_based(ZeroBased::No)
///     .read()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SampleReader<P> {
    file: Option<P>,
    zero_based: ZeroBased,
    n_features: Option<usize>,
}


impl<P> Default for SampleReader<P> {
    fn default() -> Self {
        Self {
            file: None,
            zero_based: ZeroBased::Auto,
            n_features: None,
        }
    }
}


impl<P> SampleReader<P> {
    /// Set how feature indices are counted.
    /// Default is [`ZeroBased::Auto`].
    pub fn zero_based(mut self, zero_based: ZeroBased) -> Self {
        self.zero_based = zero_based;
        self
    }


    /// Force the number of features.
    /// Useful when a file does not mention the last features.
    pub fn n_features(mut self, n_features: usize) -> Self {
        self.n_features = Some(n_features);
        self
    }
}


impl<P> SampleReader<P>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }


    /// Reads the file based on the arguments,
    /// and returns the parsed [`Sample`].
    /// This method consumes `self.`
    pub fn read(self) -> Result<Sample> {
        let file = self.file
            .ok_or_else(|| ForestError::invalid("file", "no file is set"))?;
        read_svmlight(file.as_ref(), self.zero_based, self.n_features)
    }
}
