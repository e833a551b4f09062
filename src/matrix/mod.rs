//! Kernel matrices and ordered sets of them

pub mod kernel_matrix;
pub mod set;

pub use self::kernel_matrix::{normalize_entry, KernelMatrix};
pub use self::set::KernelSet;
