//! Training batches.
//!
//! A [`TrainingBatch`] is an ordered list of `(input, expected)` samples. The network
//! only reads it by index and length; samples are never mutated during training.

use crate::Matrix;

/// One training sample: an input column and the expected output column.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Matrix,
    pub expected: Matrix,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingBatch {
    samples: Vec<Sample>,
}

impl TrainingBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Appends a sample. Shapes are checked when the network consumes the batch.
    pub fn add_sample(&mut self, input: Matrix, expected: Matrix) {
        self.samples.push(Sample { input, expected });
    }

    #[inline]
    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    /// Returns true if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    /// Returns the `idx`-th sample as `(input, expected)`.
    pub fn get(&self, idx: usize) -> Option<(&Matrix, &Matrix)> {
        self.samples.get(idx).map(|s| (&s.input, &s.expected))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Matrix, &Matrix)> {
        self.samples.iter().map(|s| (&s.input, &s.expected))
    }
}

impl FromIterator<(Matrix, Matrix)> for TrainingBatch {
    fn from_iter<I: IntoIterator<Item = (Matrix, Matrix)>>(iter: I) -> Self {
        Self {
            samples: iter
                .into_iter()
                .map(|(input, expected)| Sample { input, expected })
                .collect(),
        }
    }
}
