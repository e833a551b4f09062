//! Error types for kernel bucket construction and analysis

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Input {0} is not a valid kernel function")]
    InvalidKernelFunction(String),

    #[error("Kernel '{kernel}' has no parameter named '{param}'")]
    UnknownParameter { kernel: &'static str, param: String },

    #[error("Invalid choice of strategy '{given}' - must be one of {valid}")]
    InvalidStrategy { given: String, valid: String },

    #[error("Unknown similarity metric '{given}' - must be one of {valid}")]
    UnknownMetric { given: String, valid: String },

    #[error("Kernel matrix for {0} is not attached to any samples")]
    NotAttached(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Zero variance input: {0}")]
    ZeroVariance(String),

    #[error("Division by zero: {0}")]
    ZeroDivision(String),

    #[error("Invalid input data: {0}")]
    InvalidInput(String),

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KernelError>;
