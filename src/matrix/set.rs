//! Ordered collection of kernel matrices sharing one set of samples

use crate::core::{KernelCollection, KernelError, Result, Sample};
use crate::matrix::KernelMatrix;
use log::info;
use std::ops::Index;
use std::sync::Arc;

/// Named, ordered set of kernel matrices
///
/// Once attached, every matrix in the set (including ones appended later)
/// refers to the same shared samples, so all entries agree on `num_samples`.
#[derive(Debug)]
pub struct KernelSet {
    name: String,
    km_list: Vec<KernelMatrix>,
    samples: Option<Arc<[Sample]>>,
}

impl KernelSet {
    /// Create an empty kernel set
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            km_list: Vec::new(),
            samples: None,
        }
    }

    /// Create a set from existing kernel matrices
    ///
    /// The set starts unattached; call `attach_to` to bind all matrices to
    /// the same samples.
    pub fn with_matrices<S: Into<String>>(name: S, km_list: Vec<KernelMatrix>) -> Self {
        Self {
            name: name.into(),
            km_list,
            samples: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of kernel matrices in the set
    pub fn size(&self) -> usize {
        self.km_list.len()
    }

    pub fn len(&self) -> usize {
        self.km_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.km_list.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&KernelMatrix> {
        self.km_list.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KernelMatrix> {
        self.km_list.iter()
    }

    /// Number of samples the set is attached to, `None` until attached
    pub fn num_samples(&self) -> Option<usize> {
        self.samples.as_ref().map(|s| s.len())
    }

    /// Append a kernel matrix, attaching it to the set's samples if the set
    /// is already attached. Nothing is appended if attaching fails.
    pub fn append(&mut self, mut km: KernelMatrix) -> Result<()> {
        if let Some(samples) = &self.samples {
            km.attach_to(Arc::clone(samples))?;
        }
        self.km_list.push(km);
        Ok(())
    }

    /// Attach every matrix in the set to `samples`.
    ///
    /// All matrices are validated before any is rebound, so on error the set
    /// keeps its previous attachment.
    pub fn attach_to<S: Into<Arc<[Sample]>>>(&mut self, samples: S) -> Result<()> {
        let samples: Arc<[Sample]> = samples.into();
        if samples.is_empty() {
            return Err(KernelError::EmptyDataset);
        }

        for km in &self.km_list {
            km.check_inputs(&samples)?;
        }
        for km in &mut self.km_list {
            km.bind(Arc::clone(&samples));
        }

        info!(
            "Attached {} kernel matrices in '{}' to {} samples",
            self.km_list.len(),
            self.name,
            samples.len()
        );
        self.samples = Some(samples);
        Ok(())
    }

    /// Kernel descriptions, in order
    pub fn kernel_names(&self) -> Vec<String> {
        self.km_list.iter().map(|km| km.name()).collect()
    }
}

impl Index<usize> for KernelSet {
    type Output = KernelMatrix;

    fn index(&self, index: usize) -> &KernelMatrix {
        &self.km_list[index]
    }
}

impl KernelCollection for KernelSet {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> usize {
        self.km_list.len()
    }

    fn get(&self, index: usize) -> Option<&KernelMatrix> {
        self.km_list.get(index)
    }
}

impl<'a> IntoIterator for &'a KernelSet {
    type Item = &'a KernelMatrix;
    type IntoIter = std::slice::Iter<'a, KernelMatrix>;

    fn into_iter(self) -> Self::IntoIter {
        self.km_list.iter()
    }
}
