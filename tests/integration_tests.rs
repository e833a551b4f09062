//! Integration tests for the kernelbucket library
//!
//! These tests exercise end-to-end workflows across the bucket, matrix,
//! similarity and persistence modules.

use approx::assert_relative_eq;
use kernelbucket::api::{quick, KernelAnalysis};
use kernelbucket::config::{GridPresets, KernelGrids};
use kernelbucket::similarity::{alignment_centered, OnZeroDivision};
use kernelbucket::{
    correlation_km, ideal_kernel, make_kernel_bucket, make_kernel_bucket_with_presets,
    pairwise_similarity, rank_by_target_alignment, BucketConfig, BucketStrategy, Dataset,
    KernelBucket, KernelCollection, KernelError, KernelFamily, LibSVMDataset, Sample,
    SimilarityMetric, SimilarityReport, SparseVector,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn toy_samples() -> Vec<Sample> {
    vec![
        Sample::new(SparseVector::from_dense(&[0.5, 0.2, 0.1]), 1.0),
        Sample::new(SparseVector::from_dense(&[-0.4, -0.3, 0.2]), -1.0),
        Sample::new(SparseVector::from_dense(&[0.6, 0.1, -0.2]), 1.0),
        Sample::new(SparseVector::from_dense(&[0.1, -0.6, 0.3]), -1.0),
        Sample::new(SparseVector::from_dense(&[0.3, 0.4, 0.0]), 1.0),
    ]
}

/// Complete workflow: bucket construction -> attach -> pairwise similarity
#[test]
fn test_complete_workflow_exhaustive() {
    let mut bucket = make_kernel_bucket("exhaustive", true, false).expect("bucket should build");
    assert_eq!(bucket.size(), 18);
    assert_eq!(bucket[0].name(), "linear");

    bucket.attach_to(toy_samples()).expect("attach should succeed");
    assert_eq!(bucket.num_samples(), Some(5));

    for km in &bucket {
        let full = km.full().expect("full matrix");
        assert_eq!(full.shape(), (5, 5));
        assert!(full.is_symmetric(1e-12), "{} is not symmetric", km.name());
        // |K[i,i]| / |K[i,i]| unless the entry was zeroed
        for value in full.diagonal() {
            assert!(value == 0.0 || (value.abs() - 1.0).abs() < 1e-9);
        }
    }

    for metric in ["corr", "align"] {
        let pairwise = pairwise_similarity(&bucket, metric).expect("similarity should succeed");
        assert_eq!(pairwise.shape(), (18, 18));
        assert!(pairwise.is_symmetric(1e-12));
        assert!(pairwise.as_slice().iter().all(|v| !v.is_nan()));
    }
}

/// Every combination of grids starts with the linear kernel
#[test]
fn test_first_entry_is_linear() {
    let grid_choices = [
        KernelGrids::exhaustive(),
        KernelGrids::light(),
        KernelGrids::none(),
        KernelGrids {
            sigmoid_offset_values: Some(vec![0.0]),
            ..KernelGrids::none()
        },
    ];

    for grids in grid_choices {
        let requested = grids.num_requested();
        let bucket = KernelBucket::new(BucketConfig::new("combo").with_grids(grids)).unwrap();
        assert_eq!(bucket[0].name(), "linear");
        assert_eq!(bucket.size(), requested + 1);
    }
}

/// Failing values are skipped one diagnostic each, the rest are added
#[test]
fn test_partial_failure_tolerance() {
    let config = BucketConfig::new("partial")
        .with_grids(KernelGrids::none())
        .with_poly_degree_values(Some(vec![2.0, 2.5, 3.0]))
        .with_rbf_sigma_values(Some(vec![0.0, 1.0, f64::NAN]));
    let bucket = KernelBucket::new(config).unwrap();

    assert_eq!(bucket.size(), 1 + 2 + 1);
    assert_eq!(bucket.skipped().len(), 3);
    assert_eq!(bucket.skipped()[0].kernel, KernelFamily::Polynomial);
    assert_eq!(bucket.skipped()[0].value, 2.5);
    assert_eq!(bucket.skipped()[1].kernel, KernelFamily::Gaussian);
    assert!(bucket.skipped()[2].value.is_nan());
}

/// Expansion after attaching binds the new kernels to the same samples
#[test]
fn test_expansion_after_attach() {
    let mut bucket = make_kernel_bucket("linear_only", true, false).unwrap();
    bucket.attach_to(toy_samples()).unwrap();

    let report = bucket
        .add_parametrized_kernels_by_name("laplace", "gamma", Some(&[0.5, 2.0]))
        .unwrap();
    assert_eq!(report.added, 2);
    assert!(report.skipped.is_empty());
    assert_eq!(bucket[2].num_samples(), Some(5));
    assert!(bucket[2].full().is_ok());

    // chi2 rejects the negative features of the attached samples
    let report = bucket
        .add_parametrized_kernels_by_name("chi2", "gamma", Some(&[1.0]))
        .unwrap();
    assert_eq!(report.added, 0);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].reason.contains("non-negative"));
    assert_eq!(bucket.size(), 3);
}

/// Unknown kernel types and empty value lists are errors, not skips
#[test]
fn test_expansion_errors() {
    let mut bucket = make_kernel_bucket("light", true, false).unwrap();
    let names = bucket.kernel_names();

    let err = bucket
        .add_parametrized_kernels_by_name("spline", "order", Some(&[1.0]))
        .unwrap_err();
    assert!(matches!(err, KernelError::InvalidKernelFunction(_)));
    assert_eq!(bucket.kernel_names(), names);

    let err = bucket
        .add_parametrized_kernels(KernelFamily::Gaussian, "sigma", Some(&[]))
        .unwrap_err();
    assert!(matches!(err, KernelError::InvalidParameter(_)));
    assert_eq!(bucket.kernel_names(), names);

    let report = bucket
        .add_parametrized_kernels(KernelFamily::Gaussian, "sigma", None)
        .unwrap();
    assert_eq!(report.added, 0);
    assert_eq!(bucket.size(), names.len());
}

/// Chi-squared works on non-negative data when added explicitly
#[test]
fn test_chi_square_on_histograms() {
    let histograms = vec![
        Sample::new(SparseVector::from_dense(&[0.2, 0.5, 0.3]), 1.0),
        Sample::new(SparseVector::from_dense(&[0.6, 0.1, 0.3]), -1.0),
        Sample::new(SparseVector::from_dense(&[0.1, 0.8, 0.1]), 1.0),
    ];

    let mut bucket = make_kernel_bucket("linear_only", false, false).unwrap();
    bucket
        .add_parametrized_kernels(KernelFamily::ChiSquare, "gamma", Some(&[0.5, 1.0]))
        .unwrap();
    bucket.attach_to(histograms).unwrap();

    assert_eq!(bucket.kernel_names(), vec!["linear", "chi2(gamma=0.5)", "chi2(gamma=1)"]);
    let km = bucket[1].full().unwrap();
    for i in 0..3 {
        assert_relative_eq!(km.get(i, i), 1.0);
    }
}

/// Factory with custom presets and pass-through behaviour
#[test]
fn test_factory_workflow() {
    let presets = GridPresets {
        exhaustive: KernelGrids {
            poly_degree_values: Some(vec![2.0]),
            rbf_sigma_values: Some(vec![1.0]),
            ..KernelGrids::none()
        },
        light: KernelGrids::none(),
    };

    let bucket =
        make_kernel_bucket_with_presets(BucketStrategy::Exhaustive, &presets, false, false).unwrap();
    assert_eq!(
        bucket.kernel_names(),
        vec!["linear", "poly(degree=2, gamma=1, b=1)", "gaussian(sigma=1)"]
    );

    let same = make_kernel_bucket(bucket, true, true).unwrap();
    assert_eq!(same.size(), 3);
    assert!(!same.normalize_kernels());

    let err = make_kernel_bucket("Everything", true, false).unwrap_err();
    assert!(err.to_string().contains("exhaustive, light, linear_only"));
}

/// Similarity primitives agree with their defining properties
#[test]
fn test_similarity_primitives() {
    let mut bucket = make_kernel_bucket("light", true, false).unwrap();
    bucket.attach_to(toy_samples()).unwrap();

    let km = bucket[3].full().unwrap();
    assert_relative_eq!(correlation_km(km, km).unwrap(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(
        alignment_centered(km, km, OnZeroDivision::Raise).unwrap(),
        1.0,
        epsilon = 1e-12
    );

    let ideal = ideal_kernel(&[1.0, -1.0, 1.0]);
    assert_eq!(
        ideal.to_rows(),
        vec![vec![1.0, -1.0, 1.0], vec![-1.0, 1.0, -1.0], vec![1.0, -1.0, 1.0]]
    );

    let err = pairwise_similarity(&bucket, "hsic").unwrap_err();
    assert!(matches!(err, KernelError::UnknownMetric { .. }));
}

/// Ranking by target alignment covers the whole bucket
#[test]
fn test_rank_by_target_alignment() {
    let samples = toy_samples();
    let targets: Vec<f64> = samples.iter().map(|s| s.target).collect();

    let mut bucket = make_kernel_bucket("light", true, false).unwrap();
    bucket.attach_to(samples).unwrap();

    let ranked = rank_by_target_alignment(&bucket, &targets).unwrap();
    assert_eq!(ranked.len(), bucket.size());

    let mut indices: Vec<usize> = ranked.iter().map(|r| r.index).collect();
    indices.sort_unstable();
    assert_eq!(indices, (0..bucket.size()).collect::<Vec<_>>());
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
}

/// KernelCollection lets the similarity engine accept trait objects
#[test]
fn test_collection_trait_object() {
    let mut bucket = make_kernel_bucket("light", true, false).unwrap();
    bucket.attach_to(toy_samples()).unwrap();

    let collection: &dyn KernelCollection = &bucket;
    assert_eq!(collection.name(), "KBucketLight");
    let pairwise = pairwise_similarity(collection, "align").unwrap();
    assert_eq!(pairwise.shape(), (collection.size(), collection.size()));
}

/// File-based workflow through the high-level API and persistence
#[test]
fn test_file_workflow_with_report() {
    let mut data_file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(data_file, "# toy regression data").expect("Failed to write");
    writeln!(data_file, "0.7 1:0.5 2:0.2").expect("Failed to write");
    writeln!(data_file, "-1.2 1:-0.4 2:-0.3").expect("Failed to write");
    writeln!(data_file, "0.3 1:0.6 2:0.1").expect("Failed to write");
    writeln!(data_file, "-0.8 1:0.1 2:-0.6").expect("Failed to write");
    data_file.flush().expect("Failed to flush");

    let dataset = LibSVMDataset::from_file(data_file.path()).unwrap();
    assert_eq!(dataset.targets(), vec![0.7, -1.2, 0.3, -0.8]);

    let report = KernelAnalysis::new()
        .with_strategy(BucketStrategy::Light)
        .with_metric(SimilarityMetric::Correlation)
        .run(&dataset)
        .unwrap();
    assert_eq!(report.kernels.len(), 9);
    assert_eq!(report.metadata.num_samples, 4);

    let report_file = NamedTempFile::new().expect("Failed to create temp file");
    report.save_to_file(report_file.path()).unwrap();
    let loaded = SimilarityReport::load_from_file(report_file.path()).unwrap();
    assert_eq!(loaded.kernels, report.kernels);
    assert_eq!(loaded.metric, SimilarityMetric::Correlation);

    let quick_report = quick::similarity_libsvm(data_file.path(), "align").unwrap();
    assert_eq!(quick_report.metric, SimilarityMetric::Alignment);
}

/// Bucket configuration round-trips through JSON and rejects bad flags
#[test]
fn test_bucket_config_json() {
    let config: BucketConfig = serde_json::from_str(
        r#"{"name": "json", "normalize_kernels": false, "skip_input_checks": true,
            "grids": {"laplace_gamma_values": [1.0, 4.0]}}"#,
    )
    .unwrap();
    let bucket = KernelBucket::new(config).unwrap();
    assert_eq!(bucket.name(), "json");
    assert_eq!(bucket.size(), 3);
    assert!(!bucket.normalize_kernels());

    let bad: Result<BucketConfig, _> = serde_json::from_str(
        r#"{"name": "bad", "normalize_kernels": "yes", "skip_input_checks": false}"#,
    );
    assert!(bad.is_err());
}
