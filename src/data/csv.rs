//! CSV format dataset implementation
//!
//! Supports loading datasets from CSV files where:
//! - The last column is the target
//! - All other columns are features
//! - First row can be headers (automatically detected)

use crate::core::{Dataset, KernelError, Result, Sample, SparseVector};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Dataset implementation for CSV format files
#[derive(Debug, Clone)]
pub struct CSVDataset {
    samples: Vec<Sample>,
    dimensions: usize,
}

impl CSVDataset {
    /// Load a dataset from a CSV file, detecting a header row
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(KernelError::IoError)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a dataset from a reader, detecting a header row
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, true)
    }

    /// Load a dataset from a reader with explicit header detection
    pub fn from_reader_with_options<R: BufRead>(
        reader: R,
        auto_detect_header: bool,
    ) -> Result<Self> {
        let mut samples = Vec::new();
        let mut dimensions = None;
        let mut first_row = true;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(KernelError::IoError)?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if std::mem::take(&mut first_row) && auto_detect_header && Self::is_header_line(line) {
                continue;
            }

            let (sample, num_features) = Self::parse_data_line(line).map_err(|e| {
                KernelError::ParseError(format!("Error parsing line {}: {}", line_num + 1, e))
            })?;

            match dimensions {
                None => dimensions = Some(num_features),
                Some(expected) if expected != num_features => {
                    return Err(KernelError::DimensionMismatch {
                        expected,
                        actual: num_features,
                    });
                }
                Some(_) => {}
            }
            samples.push(sample);
        }

        if samples.is_empty() {
            return Err(KernelError::EmptyDataset);
        }

        Ok(CSVDataset {
            samples,
            dimensions: dimensions.unwrap_or(0),
        })
    }

    /// A line is a header when most feature columns are not numbers
    fn is_header_line(line: &str) -> bool {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 2 {
            return false;
        }

        let non_numeric_count = fields
            .iter()
            .take(fields.len() - 1)
            .filter(|field| field.trim().parse::<f64>().is_err())
            .count();

        non_numeric_count > fields.len() / 2
    }

    /// Parse a data line into a sample and its number of feature columns
    fn parse_data_line(line: &str) -> Result<(Sample, usize)> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        let Some((target_str, feature_fields)) = fields.split_last() else {
            return Err(KernelError::ParseError("Empty line".to_string()));
        };
        if feature_fields.is_empty() {
            return Err(KernelError::ParseError(format!(
                "Line has too few fields: {line}"
            )));
        }

        let target = target_str
            .parse::<f64>()
            .map_err(|_| KernelError::ParseError(format!("Invalid target: {target_str}")))?;

        let dense = feature_fields
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                field.parse::<f64>().map_err(|_| {
                    KernelError::ParseError(format!(
                        "Invalid feature value at column {}: {}",
                        idx + 1,
                        field
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        Ok((
            Sample::new(SparseVector::from_dense(&dense), target),
            feature_fields.len(),
        ))
    }
}

impl Dataset for CSVDataset {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn dim(&self) -> usize {
        self.dimensions
    }

    fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_csv_basic() {
        let data = "1.0,2.0,1\n3.0,4.0,-1\n";
        let dataset = CSVDataset::from_reader(Cursor::new(data)).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.dim(), 2);

        let sample = &dataset.samples()[1];
        assert_eq!(sample.target, -1.0);
        assert_eq!(sample.features.indices, vec![0, 1]);
        assert_eq!(sample.features.values, vec![3.0, 4.0]);
    }

    #[test]
    fn test_csv_with_headers() {
        let data = "feature1,feature2,label\n1.0,2.0,1\n3.0,4.0,-1\n";
        let dataset = CSVDataset::from_reader(Cursor::new(data)).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.targets(), vec![1.0, -1.0]);
    }

    #[test]
    fn test_csv_header_after_comment() {
        let data = "# exported\nx,y,target\n0.5,0.1,3\n";
        let dataset = CSVDataset::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.targets(), vec![3.0]);
    }

    #[test]
    fn test_csv_sparse_features() {
        let data = "1.0,0.0,2.0,1\n0.0,3.0,0.0,-1\n";
        let dataset = CSVDataset::from_reader(Cursor::new(data)).unwrap();

        assert_eq!(dataset.dim(), 3);
        assert_eq!(dataset.samples()[0].features.indices, vec![0, 2]);
        assert_eq!(dataset.samples()[1].features.indices, vec![1]);
    }

    #[test]
    fn test_csv_all_zeros() {
        let dataset = CSVDataset::from_reader(Cursor::new("0.0,0.0,1\n")).unwrap();
        assert!(dataset.samples()[0].features.is_empty());
        assert_eq!(dataset.dim(), 2);
    }

    #[test]
    fn test_csv_keeps_real_targets() {
        let data = "1.0,2.0,0.5\n3.0,4.0,-0.5\n5.0,6.0,0\n";
        let dataset = CSVDataset::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(dataset.targets(), vec![0.5, -0.5, 0.0]);
    }

    #[test]
    fn test_csv_invalid_format() {
        assert!(CSVDataset::from_reader(Cursor::new("1.0\n")).is_err());
        assert!(CSVDataset::from_reader(Cursor::new("1.0,abc,-1\n")).is_err());
        assert!(matches!(
            CSVDataset::from_reader(Cursor::new("1.0,2.0,1\n1.0,1\n")),
            Err(KernelError::DimensionMismatch { expected: 2, actual: 1 })
        ));
        assert!(matches!(
            CSVDataset::from_reader(Cursor::new("\n# nothing\n")),
            Err(KernelError::EmptyDataset)
        ));
    }

    #[test]
    fn test_csv_manual_header_control() {
        let data = "a,b,label\n1.0,2.0,1\n";
        // header parsed as data and rejected
        assert!(CSVDataset::from_reader_with_options(Cursor::new(data), false).is_err());

        let data = "1.0,2.0,1\n3.0,4.0,-1\n";
        let dataset = CSVDataset::from_reader_with_options(Cursor::new(data), false).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_is_header_line() {
        assert!(CSVDataset::is_header_line("feature1,feature2,label"));
        assert!(CSVDataset::is_header_line("x1,x2,x3,y"));
        assert!(!CSVDataset::is_header_line("1.0,2.0,3.0,1"));
        assert!(!CSVDataset::is_header_line("1"));
    }
}
