//! Data loading and dataset implementations
//!
//! Both loaders implement the `Dataset` trait and keep targets as read, so
//! the ideal kernel sees the labels exactly as stored on disk.

pub mod csv;
pub mod libsvm;

pub use self::csv::*;
pub use self::libsvm::*;
