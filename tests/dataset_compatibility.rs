//! Dataset compatibility and format validation tests
//!
//! The same data written as LibSVM and as CSV must produce the same buckets.

use approx::assert_relative_eq;
use kernelbucket::{make_kernel_bucket, pairwise_similarity, CSVDataset, Dataset, LibSVMDataset};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(contents: &str, suffix: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::with_suffix(suffix).expect("Failed to create temp file");
    write!(temp_file, "{contents}").expect("Failed to write");
    temp_file.flush().expect("Failed to flush");
    temp_file
}

/// Test LibSVM format variations
#[test]
fn test_libsvm_format_variations() {
    let test_cases = vec![
        ("+1 1:0.5 3:1.2 7:0.8\n-1 2:0.3 5:2.1\n", 2, 7, "basic format"),
        (
            "# This is a comment\n+1 1:0.5 3:1.2\n\n# Another comment\n-1 2:0.3\n",
            2,
            3,
            "with comments",
        ),
        ("0.25 1:0.5 2:1.0\n3 1:-0.5 2:-1.0\n", 2, 2, "regression targets"),
        (
            "+1 1:1.0 10:2.0 100:3.0\n-1 5:1.5 50:2.5 500:3.5\n",
            2,
            500,
            "sparse indices",
        ),
        ("+1 1:2.0\n-1 1:-2.0\n+1 1:1.8\n", 3, 1, "single feature"),
    ];

    for (data, len, dim, description) in test_cases {
        let temp_file = write_temp(data, ".libsvm");
        let dataset = LibSVMDataset::from_file(temp_file.path())
            .unwrap_or_else(|e| panic!("Failed to load LibSVM dataset ({description}): {e}"));

        assert_eq!(dataset.len(), len, "{description}");
        assert_eq!(dataset.dim(), dim, "{description}");
    }
}

/// Test CSV format variations
#[test]
fn test_csv_format_variations() {
    let test_cases = vec![
        ("1.0,2.0,1\n3.0,4.0,-1\n", 2, "no header"),
        ("f1,f2,label\n1.0,2.0,1\n3.0,4.0,-1\n", 2, "with header"),
        (" 1.0 , 2.0 , 1 \n 3.0 , 4.0 , -1 \n", 2, "whitespace"),
        ("0.0,0.0,1\n0.0,1.0,-1\n1.0,0.0,1\n", 3, "zeros"),
    ];

    for (data, len, description) in test_cases {
        let temp_file = write_temp(data, ".csv");
        let dataset = CSVDataset::from_file(temp_file.path())
            .unwrap_or_else(|e| panic!("Failed to load CSV dataset ({description}): {e}"));

        assert_eq!(dataset.len(), len, "{description}");
        assert_eq!(dataset.dim(), 2, "{description}");
    }
}

/// Equivalent LibSVM and CSV files yield identical kernel matrices
#[test]
fn test_cross_format_kernel_matrices() {
    let libsvm = write_temp(
        "1 1:0.5 2:0.2\n-1 1:-0.4 2:-0.3\n1 1:0.6\n-1 2:-0.6\n",
        ".libsvm",
    );
    let csv = write_temp(
        "x,y,label\n0.5,0.2,1\n-0.4,-0.3,-1\n0.6,0.0,1\n0.0,-0.6,-1\n",
        ".csv",
    );

    let libsvm_data = LibSVMDataset::from_file(libsvm.path()).unwrap();
    let csv_data = CSVDataset::from_file(csv.path()).unwrap();
    assert_eq!(libsvm_data.targets(), csv_data.targets());

    let mut from_libsvm = make_kernel_bucket("light", true, false).unwrap();
    from_libsvm.attach_to(libsvm_data.samples().to_vec()).unwrap();
    let mut from_csv = make_kernel_bucket("light", true, false).unwrap();
    from_csv.attach_to(csv_data.samples().to_vec()).unwrap();

    for (a, b) in from_libsvm.iter().zip(from_csv.iter()) {
        let (ka, kb) = (a.full().unwrap(), b.full().unwrap());
        for (x, y) in ka.as_slice().iter().zip(kb.as_slice()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    let sim_a = pairwise_similarity(&from_libsvm, "align").unwrap();
    let sim_b = pairwise_similarity(&from_csv, "align").unwrap();
    for (x, y) in sim_a.as_slice().iter().zip(sim_b.as_slice()) {
        assert_relative_eq!(*x, *y, epsilon = 1e-12);
    }
}

/// Malformed files are rejected with parse errors
#[test]
fn test_malformed_inputs() {
    let cases = [
        ("+1 1:0.5\n-1 0:0.3\n", ".libsvm"),
        ("+1 1=0.5\n", ".libsvm"),
        ("abc 1:0.5\n", ".libsvm"),
    ];
    for (data, suffix) in cases {
        let temp_file = write_temp(data, suffix);
        assert!(LibSVMDataset::from_file(temp_file.path()).is_err(), "{data:?}");
    }

    let temp_file = write_temp("1.0,2.0,x\n", ".csv");
    assert!(CSVDataset::from_file(temp_file.path()).is_err());
}
