use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::mem;

use tracing::info;

use crate::error::{ForestError, Result};
use super::feature_struct::SparseFeature;
use super::dense_sample::DenseSample;


/// How the feature indices of a SVMLight file are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroBased {
    /// The first feature has index `0`.
    Yes,
    /// The first feature has index `1`.
    No,
    /// Treat the file as 0-based if any index is `0`,
    /// as 1-based otherwise.
    #[default]
    Auto,
}


/// Struct `Sample` holds a batch sample in sparse format,
/// exactly as it was read from the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub(super) features: Vec<SparseFeature>,
    pub(super) target: Vec<f64>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}


impl Sample {
    /// Read a SVMLight format file to `Sample` type.
    ///
    /// Each line of SVMLight format file has the following form:
    /// ```txt
    /// y index:value index:value
    /// ```
    /// where `y` is the target label of type `f64`,
    /// `index` is the feature index, and `value` is the value
    /// at the feature.
    ///
    /// **Note**
    /// The SVMLight format file is basically 1-indexed,
    /// while the `sklearn.datasets.dump_svmlight_file` outputs
    /// a svmlight format file with 0-indexed, by default.
    /// This method detects the convention (see [`ZeroBased::Auto`]).
    pub fn from_svmlight<P: AsRef<Path>>(file: P) -> Result<Self> {
        read_svmlight(file.as_ref(), ZeroBased::Auto, None)
    }


    /// Parse SVMLight records from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        parse_svmlight(reader, Path::new("<reader>"), ZeroBased::Auto, None)
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns the target values.
    pub fn target(&self) -> &[f64] {
        &self.target[..]
    }


    /// Returns a slice of the sparse features (columns).
    pub fn features(&self) -> &[SparseFeature] {
        &self.features[..]
    }


    /// Returns the number of explicitly stored values.
    pub fn nnz(&self) -> usize {
        self.features.iter()
            .map(|feature| feature.nnz())
            .sum()
    }


    /// Materialize the sample as a dense, row-major matrix.
    /// Absent entries become explicit zeros.
    pub fn densify(&self) -> Result<DenseSample> {
        let data = self.dense_values()?;
        DenseSample::new(data, self.n_feature, self.target.clone())
    }


    /// Same as [`Sample::densify`], but reuses the target buffer.
    pub fn into_dense(mut self) -> Result<DenseSample> {
        let data = self.dense_values()?;
        let target = mem::take(&mut self.target);
        DenseSample::new(data, self.n_feature, target)
    }


    fn dense_values(&self) -> Result<Vec<f64>> {
        let (n_sample, n_feature) = self.shape();
        let len = n_sample.checked_mul(n_feature)
            .ok_or(ForestError::TooLarge { n_sample, n_feature })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| {
                let bytes = len.saturating_mul(mem::size_of::<f64>());
                ForestError::Allocation { bytes }
            })?;
        data.resize(len, 0f64);

        for (j, feature) in self.features.iter().enumerate() {
            for &(i, x) in feature.entries() {
                data[i * n_feature + j] = x;
            }
        }

        info!(n_sample, n_feature, nnz = self.nnz(), "densified sample");
        Ok(data)
    }
}


pub(super) fn read_svmlight(
    file: &Path,
    zero_based: ZeroBased,
    n_features: Option<usize>,
) -> Result<Sample>
{
    // Open the given `file`.
    let handle = File::open(file)
        .map_err(|source| ForestError::Io {
            path: file.to_path_buf(),
            source,
        })?;
    let sample = parse_svmlight(
        BufReader::new(handle), file, zero_based, n_features
    )?;

    let (n_sample, n_feature) = sample.shape();
    info!(path = %file.display(), n_sample, n_feature, "loaded sample");
    Ok(sample)
}


fn parse_svmlight<R: BufRead>(
    reader: R,
    origin: &Path,
    zero_based: ZeroBased,
    n_features: Option<usize>,
) -> Result<Sample>
{
    let mut target = Vec::new();
    // Triples of `(index, row, value)` in reading order.
    let mut entries: Vec<(usize, usize, f64)> = Vec::new();
    let mut pairs: Vec<(usize, f64)> = Vec::new();
    let mut min_index = usize::MAX;
    let mut max_index = 0_usize;

    // For each line of the file
    for (k, line) in reader.lines().enumerate() {
        let lineno = k + 1;
        let line = line.map_err(|source| ForestError::Io {
            path: origin.to_path_buf(),
            source,
        })?;

        // Everything after `#` is a comment.
        let record = match line.find('#') {
            Some(pos) => &line[..pos],
            None => &line[..],
        };

        // Split the line by white spaces
        let mut words = record.split_whitespace();
        // The first word corresponds to the target value.
        let Some(label) = words.next() else { continue; };
        let y = parse_label(label)
            .map_err(|reason| ForestError::parse(lineno, reason))?;

        pairs.clear();
        for word in words {
            if let Some(qid) = word.strip_prefix("qid:") {
                qid.parse::<u64>()
                    .map_err(|_| {
                        let reason = format!("invalid query id `{word}`");
                        ForestError::parse(lineno, reason)
                    })?;
                continue;
            }
            let (i, x) = index_and_feature(word)
                .map_err(|reason| ForestError::parse(lineno, reason))?;
            if i == 0 && zero_based == ZeroBased::No {
                let reason = "feature index 0 in a 1-based file";
                return Err(ForestError::parse(lineno, reason));
            }
            pairs.push((i, x));
        }

        if pairs.is_empty() {
            let reason = "record has no index:value pair";
            return Err(ForestError::parse(lineno, reason));
        }

        pairs.sort_unstable_by_key(|&(i, _)| i);
        if let Some(w) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            let reason = format!("duplicate feature index {}", w[0].0);
            return Err(ForestError::parse(lineno, reason));
        }

        let row = target.len();
        for &(i, x) in pairs.iter() {
            min_index = min_index.min(i);
            max_index = max_index.max(i);
            entries.push((i, row, x));
        }
        target.push(y);
    }

    if target.is_empty() {
        return Err(ForestError::EmptySample);
    }

    let offset = match zero_based {
        ZeroBased::Yes => 0,
        ZeroBased::No => 1,
        ZeroBased::Auto => if min_index == 0 { 0 } else { 1 },
    };

    let n_sample = target.len();
    // `max_index >= offset` holds since index 0 forces `offset == 0`.
    let n_seen = (max_index - offset).checked_add(1)
        .ok_or(ForestError::TooLarge { n_sample, n_feature: max_index })?;
    let n_feature = match n_features {
        None => n_seen,
        Some(n) if n >= n_seen => n,
        Some(n) => {
            let reason = format!(
                "the file has {n_seen} features, but only {n} were requested"
            );
            return Err(ForestError::invalid("n_features", reason));
        },
    };

    // One column per feature index, including the unmentioned ones.
    let mut features = Vec::new();
    features.try_reserve_exact(n_feature)
        .map_err(|_| {
            let size = mem::size_of::<SparseFeature>();
            ForestError::Allocation { bytes: n_feature.saturating_mul(size) }
        })?;
    features.resize(n_feature, SparseFeature::new(n_sample));
    for (i, row, x) in entries {
        features[i - offset].append((row, x));
    }

    let sample = Sample { features, target, n_sample, n_feature };
    Ok(sample)
}


fn parse_label(word: &str) -> std::result::Result<f64, String> {
    if word.contains(':') {
        return Err(format!("missing label (got `{word}` first)"));
    }
    let y = word.parse::<f64>()
        .map_err(|_| format!("invalid label `{word}`"))?;
    if !y.is_finite() {
        return Err(format!("label `{word}` is not finite"));
    }
    Ok(y)
}


/// Parse the following type of `str` to the pair of `(usize, f64)`.
/// `index:value`, where `index: usize` and `value: f64`.
fn index_and_feature(word: &str) -> std::result::Result<(usize, f64), String> {
    let (i, x) = word.split_once(':')
        .ok_or_else(|| format!("expected `index:value`, got `{word}`"))?;
    let i = i.parse::<usize>()
        .map_err(|_| format!("invalid feature index in `{word}`"))?;
    let x = x.parse::<f64>()
        .map_err(|_| format!("invalid feature value in `{word}`"))?;
    if !x.is_finite() {
        return Err(format!("feature value in `{word}` is not finite"));
    }

    Ok((i, x))
}


#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Sample> {
        Sample::from_reader(text.as_bytes())
    }


    #[test]
    fn reads_one_based_records() {
        let sample = parse("+1 1:0.5 2:0.3\n-1 1:0.1\n+1 2:0.9\n-1 1:0.2 2:0.1\n")
            .unwrap();
        assert_eq!(sample.shape(), (4, 2));
        assert_eq!(sample.target(), &[1.0, -1.0, 1.0, -1.0]);
        assert_eq!(sample.nnz(), 6);
        assert_eq!(sample.features()[1][2], 0.9);
        assert_eq!(sample.features()[1][1], 0.0);
    }


    #[test]
    fn zero_index_switches_to_zero_based() {
        let sample = parse("1 0:1.0 2:3.0\n0 1:2.0\n").unwrap();
        assert_eq!(sample.shape(), (2, 3));
        assert_eq!(sample.features()[0][0], 1.0);
        assert_eq!(sample.features()[2][0], 3.0);
    }


    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let text = "# header comment\n\n1 1:1.0 # trailing\n   \n-1 2:1.0\n";
        let sample = parse(text).unwrap();
        assert_eq!(sample.shape(), (2, 2));
    }


    #[test]
    fn query_ids_are_ignored() {
        let sample = parse("2 qid:7 1:1.0 3:2.0\n1 qid:7 2:0.5\n").unwrap();
        assert_eq!(sample.shape(), (2, 3));
        assert_eq!(sample.target(), &[2.0, 1.0]);
    }


    #[test]
    fn missing_label_is_an_error() {
        let err = parse("1 1:1.0\n1:0.5 2:0.3\n").unwrap_err();
        assert!(matches!(err, ForestError::Parse { line: 2, .. }), "{err}");
    }


    #[test]
    fn record_without_pairs_is_an_error() {
        let err = parse("1 1:1.0\n-1\n").unwrap_err();
        assert!(matches!(err, ForestError::Parse { line: 2, .. }), "{err}");
    }


    #[test]
    fn malformed_pairs_are_errors() {
        for text in ["1 a:1.0\n", "1 1:x\n", "1 1\n", "1 1:inf\n", "1 -1:2\n"] {
            let err = parse(text).unwrap_err();
            assert!(matches!(err, ForestError::Parse { line: 1, .. }), "{text}");
        }
    }


    #[test]
    fn duplicate_index_is_an_error() {
        let err = parse("1 2:1.0 2:3.0\n").unwrap_err();
        assert!(matches!(err, ForestError::Parse { line: 1, .. }));
    }


    #[test]
    fn empty_input_is_an_error() {
        let err = parse("# nothing here\n\n").unwrap_err();
        assert!(matches!(err, ForestError::EmptySample));
    }


    #[test]
    fn densify_fills_zeros() {
        let sample = parse("+1 1:0.5 2:0.3\n-1 1:0.1\n+1 2:0.9\n-1 1:0.2 2:0.1\n")
            .unwrap();
        let dense = sample.densify().unwrap();
        assert_eq!(dense.shape(), (4, 2));
        assert_eq!(dense.row(0), &[0.5, 0.3]);
        assert_eq!(dense.row(1), &[0.1, 0.0]);
        assert_eq!(dense.row(2), &[0.0, 0.9]);
        assert_eq!(dense.row(3), &[0.2, 0.1]);
        assert_eq!(dense.target(), sample.target());
    }


    #[test]
    fn huge_index_is_an_error() {
        let err = parse("1 18446744073709551615:1.0\n").unwrap_err();
        assert!(matches!(err, ForestError::Allocation { .. }), "{err}");

        let err = parse("1 1152921504606846976:1.0\n-1 1:2.0\n").unwrap_err();
        assert!(matches!(err, ForestError::Allocation { .. }), "{err}");
    }


    #[test]
    fn huge_zero_based_index_overflows() {
        let text = "1 18446744073709551615:1.0\n";
        let err = parse_svmlight(
            text.as_bytes(), Path::new("<test>"), ZeroBased::Yes, None
        ).unwrap_err();
        assert!(matches!(err, ForestError::TooLarge { n_sample: 1, .. }), "{err}");
    }


    #[test]
    fn dense_allocation_failure_is_reported() {
        // 2^62 values fit in `usize`, but not their bytes.
        let sample = Sample {
            features: Vec::new(),
            target: Vec::new(),
            n_sample: 1 << 31,
            n_feature: 1 << 31,
        };
        let err = sample.densify().unwrap_err();
        assert!(matches!(err, ForestError::Allocation { .. }), "{err}");
    }


    #[test]
    fn oversized_dense_matrix_is_reported() {
        let sample = Sample {
            features: Vec::new(),
            target: Vec::new(),
            n_sample: usize::MAX,
            n_feature: 2,
        };
        let err = sample.densify().unwrap_err();
        assert!(matches!(err, ForestError::TooLarge { .. }));
    }
}
