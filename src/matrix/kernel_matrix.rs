//! Kernel matrix: a kernel function evaluated over every pair of samples

use crate::cache::{CacheStats, KernelCache};
use crate::core::{DenseMatrix, KernelError, Result, Sample};
use crate::kernel::Kernel;
use log::debug;
use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::sync::Arc;

/// Lazily computed matrix of kernel evaluations
///
/// The matrix is computed the first time `full()` is called and cached
/// until the matrix is attached to different samples. Single entries can be
/// read before that through `get()`, which goes through an LRU entry cache.
pub struct KernelMatrix {
    kernel: Box<dyn Kernel>,
    normalized: bool,
    samples: Option<Arc<[Sample]>>,
    full: OnceCell<DenseMatrix>,
    cache: RefCell<KernelCache>,
}

impl KernelMatrix {
    /// Wrap a boxed kernel function
    pub fn new(kernel: Box<dyn Kernel>, normalized: bool) -> Self {
        Self {
            kernel,
            normalized,
            samples: None,
            full: OnceCell::new(),
            cache: RefCell::new(KernelCache::default()),
        }
    }

    /// Wrap a concrete kernel function
    pub fn from_kernel<K: Kernel + 'static>(kernel: K, normalized: bool) -> Self {
        Self::new(Box::new(kernel), normalized)
    }

    /// The wrapped kernel function
    pub fn kernel(&self) -> &dyn Kernel {
        self.kernel.as_ref()
    }

    /// Kernel description, e.g. `"gaussian(sigma=0.5)"`
    pub fn name(&self) -> String {
        self.kernel.describe()
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    pub fn is_attached(&self) -> bool {
        self.samples.is_some()
    }

    /// Whether the full matrix has been computed for the current samples
    pub fn is_computed(&self) -> bool {
        self.full.get().is_some()
    }

    /// Number of samples the matrix is attached to
    pub fn num_samples(&self) -> Option<usize> {
        self.samples.as_ref().map(|s| s.len())
    }

    /// Run the kernel's input checks unless the kernel skips them
    pub fn check_inputs(&self, samples: &[Sample]) -> Result<()> {
        if samples.is_empty() {
            return Err(KernelError::EmptyDataset);
        }
        if self.kernel.skip_input_checks() {
            return Ok(());
        }
        self.kernel.check_inputs(samples)
    }

    /// Attach to samples, discarding anything computed for previous ones
    pub fn attach_to<S: Into<Arc<[Sample]>>>(&mut self, samples: S) -> Result<()> {
        let samples = samples.into();
        self.check_inputs(&samples)?;
        self.bind(samples);
        Ok(())
    }

    /// Attach without validation; callers have already run `check_inputs`
    pub(crate) fn bind(&mut self, samples: Arc<[Sample]>) {
        self.samples = Some(samples);
        self.full = OnceCell::new();
        self.cache.get_mut().clear();
    }

    /// The dense matrix, computing it on first access
    pub fn full(&self) -> Result<&DenseMatrix> {
        if let Some(matrix) = self.full.get() {
            return Ok(matrix);
        }
        let computed = self.compute_full()?;
        Ok(self.full.get_or_init(|| computed))
    }

    /// Entry (i, j), normalized if the matrix is
    pub fn get(&self, i: usize, j: usize) -> Result<f64> {
        let samples = self.require_samples()?;
        let len = samples.len();
        if let Some(&index) = [i, j].iter().find(|&&idx| idx >= len) {
            return Err(KernelError::IndexOutOfBounds { index, len });
        }

        if let Some(full) = self.full.get() {
            return Ok(full.get(i, j));
        }

        let mut cache = self.cache.borrow_mut();
        let mut raw = |a: usize, b: usize| {
            cache.get_or_compute(a, b, || {
                self.kernel
                    .compute(&samples[a].features, &samples[b].features)
            })
        };

        let kij = raw(i, j);
        if !self.normalized {
            return Ok(kij);
        }
        let kii = raw(i, i);
        let kjj = raw(j, j);
        Ok(normalize_entry(kij, kii, kjj))
    }

    /// Entry-cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.borrow().stats()
    }

    fn require_samples(&self) -> Result<&Arc<[Sample]>> {
        self.samples
            .as_ref()
            .ok_or_else(|| KernelError::NotAttached(self.kernel.describe()))
    }

    fn compute_full(&self) -> Result<DenseMatrix> {
        let samples = self.require_samples()?;
        let n = samples.len();
        debug!(
            "Computing {n}x{n} kernel matrix for {} (normalized: {})",
            self.kernel.describe(),
            self.normalized
        );

        let mut matrix = DenseMatrix::zeros(n, n);
        for i in 0..n {
            for j in i..n {
                let value = self.kernel.compute(&samples[i].features, &samples[j].features);
                matrix.set(i, j, value);
                matrix.set(j, i, value);
            }
        }

        if self.normalized {
            let diag = matrix.diagonal();
            for i in 0..n {
                for j in 0..n {
                    let value = normalize_entry(matrix.get(i, j), diag[i], diag[j]);
                    matrix.set(i, j, value);
                }
            }
        }

        Ok(matrix)
    }
}

/// `K[i,j] / sqrt(K[i,i] * K[j,j])`, or 0.0 when the denominator is not a
/// positive finite number
pub fn normalize_entry(kij: f64, kii: f64, kjj: f64) -> f64 {
    let denom = (kii * kjj).sqrt();
    if denom.is_finite() && denom > 0.0 {
        kij / denom
    } else {
        0.0
    }
}

impl fmt::Debug for KernelMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KernelMatrix")
            .field("kernel", &self.kernel.describe())
            .field("normalized", &self.normalized)
            .field("num_samples", &self.num_samples())
            .field("computed", &self.is_computed())
            .finish()
    }
}
