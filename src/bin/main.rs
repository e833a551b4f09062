//! KernelBucket Command Line Interface
//!
//! Builds kernel buckets over LibSVM or CSV datasets and reports how the
//! kernels relate to each other and to the targets.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use kernelbucket::api::KernelAnalysis;
use kernelbucket::bucket::{make_kernel_bucket_with_presets, BucketStrategy, KernelBucket};
use kernelbucket::config::GridPresets;
use kernelbucket::core::{DenseMatrix, KernelError, Result};
use kernelbucket::persistence::SimilarityReport;
use kernelbucket::similarity::{RankedKernel, SimilarityMetric};
use kernelbucket::utils::{memory, validation};
use kernelbucket::{CSVDataset, Dataset, LibSVMDataset};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "kernelbucket")]
#[command(about = "Build kernel buckets and compare kernel matrices")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the kernels a strategy produces
    Bucket(BucketArgs),
    /// Compute the pairwise similarity matrix of a bucket
    Similarity(SimilarityArgs),
    /// Rank kernels by alignment with the targets
    Rank(RankArgs),
    /// Display a saved similarity report
    Info(InfoArgs),
}

#[derive(Args)]
struct BucketOptions {
    /// Bucket population strategy
    #[arg(short, long, default_value = "exhaustive")]
    strategy: CliStrategy,

    /// JSON file with custom parameter grids
    #[arg(long)]
    grids: Option<PathBuf>,

    /// Keep raw kernel values instead of normalizing
    #[arg(long)]
    no_normalize: bool,

    /// Skip kernel input checks on the samples
    #[arg(long)]
    skip_input_checks: bool,
}

#[derive(Args)]
struct DataOptions {
    /// Data file (LibSVM or CSV format)
    #[arg(long)]
    data: PathBuf,

    /// Data format: auto, libsvm, or csv
    #[arg(short, long, default_value = "auto")]
    format: String,
}

#[derive(Args)]
struct BucketArgs {
    #[command(flatten)]
    bucket: BucketOptions,

    /// Optional data file to attach the bucket to
    #[arg(long)]
    data: Option<PathBuf>,

    /// Data format: auto, libsvm, or csv
    #[arg(short, long, default_value = "auto")]
    format: String,
}

#[derive(Args)]
struct SimilarityArgs {
    #[command(flatten)]
    bucket: BucketOptions,

    #[command(flatten)]
    input: DataOptions,

    /// Similarity metric
    #[arg(short, long, default_value = "align")]
    metric: CliMetric,

    /// Save the report as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct RankArgs {
    #[command(flatten)]
    bucket: BucketOptions,

    #[command(flatten)]
    input: DataOptions,

    /// Only show the best N kernels
    #[arg(short, long)]
    top: Option<usize>,
}

#[derive(Args)]
struct InfoArgs {
    /// Report file
    report: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliStrategy {
    /// Wide grids for every kernel family (18 kernels)
    #[value(name = "exhaustive")]
    Exhaustive,
    /// Narrow grids (9 kernels)
    #[value(name = "light")]
    Light,
    /// Linear kernel only
    #[value(name = "linear_only")]
    LinearOnly,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliMetric {
    /// Pearson correlation of the kernel matrices
    #[value(name = "corr")]
    Correlation,
    /// Centered kernel alignment
    #[value(name = "align")]
    Alignment,
}

impl From<CliStrategy> for BucketStrategy {
    fn from(cli_strategy: CliStrategy) -> Self {
        match cli_strategy {
            CliStrategy::Exhaustive => BucketStrategy::Exhaustive,
            CliStrategy::Light => BucketStrategy::Light,
            CliStrategy::LinearOnly => BucketStrategy::LinearOnly,
        }
    }
}

impl From<CliMetric> for SimilarityMetric {
    fn from(cli_metric: CliMetric) -> Self {
        match cli_metric {
            CliMetric::Correlation => SimilarityMetric::Correlation,
            CliMetric::Alignment => SimilarityMetric::Alignment,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Bucket(args) => bucket_command(args),
        Commands::Similarity(args) => similarity_command(args),
        Commands::Rank(args) => rank_command(args),
        Commands::Info(args) => info_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn load_presets(options: &BucketOptions) -> Result<GridPresets> {
    match &options.grids {
        Some(path) => {
            info!("Loading parameter grids from: {path:?}");
            GridPresets::load_from_file(path)
        }
        None => Ok(GridPresets::default()),
    }
}

fn analysis_from(options: &BucketOptions) -> Result<KernelAnalysis> {
    Ok(KernelAnalysis::new()
        .with_strategy(options.strategy.into())
        .with_presets(load_presets(options)?)
        .with_normalize_kernels(!options.no_normalize)
        .with_skip_input_checks(options.skip_input_checks))
}

fn load_dataset(path: &Path, format: &str) -> Result<Box<dyn Dataset>> {
    let format = if format == "auto" {
        detect_format(path)
    } else {
        format.to_string()
    };

    info!("Loading dataset {path:?} as {format} format");

    let dataset: Box<dyn Dataset> = match format.as_str() {
        "libsvm" => Box::new(LibSVMDataset::from_file(path)?),
        "csv" => Box::new(CSVDataset::from_file(path)?),
        _ => {
            return Err(KernelError::InvalidParameter(format!(
                "Unsupported format: {format}. Use 'libsvm' or 'csv'"
            )))
        }
    };

    info!(
        "Loaded {} samples with {} dimensions",
        dataset.len(),
        dataset.dim()
    );
    Ok(dataset)
}

fn warn_unchecked(options: &BucketOptions, dataset: &dyn Dataset) {
    if options.skip_input_checks && !validation::all_features_finite(dataset.samples()) {
        warn!("Input checks are skipped but the data holds non-finite feature values");
    }
}

fn bucket_command(args: BucketArgs) -> Result<()> {
    let presets = load_presets(&args.bucket)?;
    let mut bucket = make_kernel_bucket_with_presets(
        BucketStrategy::from(args.bucket.strategy),
        &presets,
        !args.bucket.no_normalize,
        args.bucket.skip_input_checks,
    )?;

    if let Some(path) = &args.data {
        let dataset = load_dataset(path, &args.format)?;
        warn_unchecked(&args.bucket, dataset.as_ref());
        bucket.attach_to(dataset.samples().to_vec())?;
    }

    print_bucket(&bucket);
    Ok(())
}

fn print_bucket(bucket: &KernelBucket) {
    println!("=== Kernel Bucket: {} ===", bucket.name());
    println!("Normalized: {}", bucket.normalize_kernels());
    println!("Kernels: {}", bucket.size());
    if let Some(n) = bucket.num_samples() {
        println!("Attached samples: {n}");
        println!(
            "Estimated memory for full matrices: {:.1} KiB",
            memory::estimate_bucket_memory(bucket.size(), n) as f64 / 1024.0
        );
    }
    for (i, km) in bucket.iter().enumerate() {
        println!("  [{i:>2}] {}", km.name());
    }
    if !bucket.skipped().is_empty() {
        println!("Skipped values:");
        for skipped in bucket.skipped() {
            println!(
                "  {} {}={}: {}",
                skipped.kernel, skipped.param, skipped.value, skipped.reason
            );
        }
    }
}

fn similarity_command(args: SimilarityArgs) -> Result<()> {
    let dataset = load_dataset(&args.input.data, &args.input.format)?;
    warn_unchecked(&args.bucket, dataset.as_ref());

    let analysis = analysis_from(&args.bucket)?.with_metric(args.metric.into());
    info!(
        "Computing '{}' similarity with strategy '{}'",
        analysis.metric(),
        analysis.strategy()
    );
    let report = analysis.run(dataset.as_ref())?;

    println!(
        "=== Pairwise {} similarity: {} ===",
        report.metric, report.bucket_name
    );
    for (i, name) in report.kernels.iter().enumerate() {
        println!("  [{i:>2}] {name}");
    }
    print_matrix(&report.to_matrix()?);

    if let Some(output) = &args.output {
        report.save_to_file(output)?;
        info!("Report saved to: {output:?}");
    }
    Ok(())
}

fn print_matrix(matrix: &DenseMatrix) {
    print!("     ");
    for j in 0..matrix.n_cols() {
        print!(" {j:>8}");
    }
    println!();
    for i in 0..matrix.n_rows() {
        print!("[{i:>2}] ");
        for value in matrix.row(i) {
            print!(" {value:>8.4}");
        }
        println!();
    }
}

fn rank_command(args: RankArgs) -> Result<()> {
    let dataset = load_dataset(&args.input.data, &args.input.format)?;
    warn_unchecked(&args.bucket, dataset.as_ref());

    if validation::count_distinct_targets(dataset.samples()) < 2 {
        warn!("All targets are equal; every kernel aligns with the ideal kernel at 0");
    }

    let ranked = analysis_from(&args.bucket)?.rank(dataset.as_ref())?;
    let shown = args.top.unwrap_or(ranked.len()).min(ranked.len());

    println!("=== Kernel-target alignment ===");
    print_ranking(&ranked[..shown]);
    if shown < ranked.len() {
        println!("  ... ({} more)", ranked.len() - shown);
    }
    Ok(())
}

fn print_ranking(ranked: &[RankedKernel]) {
    for (rank, item) in ranked.iter().enumerate() {
        println!(
            "{:>3}. [{:>2}] {:<32} {:>8.4}",
            rank + 1,
            item.index,
            item.name,
            item.score
        );
    }
}

fn info_command(args: InfoArgs) -> Result<()> {
    info!("Loading report from: {:?}", args.report);
    let report = SimilarityReport::load_from_file(&args.report)?;

    report.print_summary();

    println!("\nSimilarity matrix:");
    print_matrix(&report.to_matrix()?);
    Ok(())
}

fn detect_format(path: &Path) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => "csv".to_string(),
        Some("libsvm") | Some("svm") => "libsvm".to_string(),
        Some(_) => {
            warn!("Unknown file extension, assuming LibSVM format");
            "libsvm".to_string()
        }
        None => {
            warn!("No file extension, assuming LibSVM format");
            "libsvm".to_string()
        }
    }
}
