//! The training benchmark:
//! load an svmlight file, densify it, and time the forest fit.
use tracing::info;

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{ForestError, Result};
use crate::forest::RandomForestClassifier;
use crate::sample::SampleReader;


/// Runs the training benchmark on a single file.
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    path: PathBuf,
}


/// What a benchmark run measured.
/// The fitted forest itself is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The input file.
    pub path: PathBuf,
    /// Shape `(# of examples, # of features)` of the dense sample.
    pub shape: (usize, usize),
    /// Wall-clock duration of the fit.
    pub elapsed: Duration,
}


impl BenchmarkRunner {
    /// A runner on `path`.
    /// The hyperparameters are always [`ForestConfig::benchmark`](crate::ForestConfig::benchmark).
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }


    /// Load, densify, and fit, writing two lines to `out`:
    /// the classifier configuration and the training time in seconds.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<Report> {
        let sample = SampleReader::default()
            .file(&self.path)
            .read()?
            .into_dense()?;
        let shape = sample.shape();

        let learner = RandomForestClassifier::benchmark();
        writeln!(out, "{learner}").map_err(ForestError::Write)?;

        let now = Instant::now();
        let _forest = learner.fit(&sample)?;
        let elapsed = now.elapsed();

        let report = Report { path: self.path.clone(), shape, elapsed };
        writeln!(out, "{report}").map_err(ForestError::Write)?;
        out.flush().map_err(ForestError::Write)?;

        info!(
            path = %self.path.display(),
            n_sample = shape.0,
            n_feature = shape.1,
            seconds = elapsed.as_secs_f64(),
            "benchmark finished"
        );
        Ok(report)
    }
}


impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Training on {} took {}",
            self.path.display(),
            self.elapsed.as_secs_f64(),
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_line() {
        let report = Report {
            path: PathBuf::from("data/train.svm"),
            shape: (4, 2),
            elapsed: Duration::from_millis(1500),
        };
        assert_eq!(report.to_string(), "Training on data/train.svm took 1.5");
    }


    #[test]
    fn missing_file_is_an_io_error() {
        let runner = BenchmarkRunner::new("/no/such/dir/train.svm");
        let mut out = Vec::new();
        let err = runner.run(&mut out).unwrap_err();
        assert!(matches!(err, ForestError::Io { .. }));
        assert!(out.is_empty());
    }
}
