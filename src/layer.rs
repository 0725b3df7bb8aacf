use crate::{Error, Matrix, Result, activation};

/// One layer of a [`crate::Network`].
///
/// Shapes for a layer of `size` neurons fed by `prev` neurons:
/// - `neurons`, `bias`, `pre_activation`, `bias_delta`: column `(1, size)`
/// - `weights`, `weight_delta`: `(prev, size)`, row `o` holds the weights into neuron `o`
///
/// The input layer has no parameters; its weight and bias slots are `(1, 1)`
/// placeholders that are never read.
#[derive(Debug, Clone)]
pub struct Layer {
    pub(crate) neurons: Matrix,
    pub(crate) weights: Matrix,
    pub(crate) bias: Matrix,
    /// `weights · previous + bias` from the most recent forward pass.
    pub(crate) pre_activation: Matrix,
    pub(crate) weight_delta: Matrix,
    pub(crate) bias_delta: Matrix,
}

impl Layer {
    pub(crate) fn input(size: usize) -> Result<Self> {
        checked_matrix_len(1, size)?;
        Ok(Self {
            neurons: Matrix::zeros(1, size),
            weights: Matrix::zeros(1, 1),
            bias: Matrix::zeros(1, 1),
            pre_activation: Matrix::zeros(1, size),
            weight_delta: Matrix::zeros(1, 1),
            bias_delta: Matrix::zeros(1, 1),
        })
    }

    /// Fails with [`Error::InvalidConfig`] if the weight matrix cannot be allocated.
    pub(crate) fn dense(prev: usize, size: usize) -> Result<Self> {
        checked_matrix_len(prev, size)?;
        Ok(Self {
            neurons: Matrix::zeros(1, size),
            weights: Matrix::zeros(prev, size),
            bias: Matrix::zeros(1, size),
            pre_activation: Matrix::zeros(1, size),
            weight_delta: Matrix::zeros(prev, size),
            bias_delta: Matrix::zeros(1, size),
        })
    }

    /// Number of neurons.
    #[inline]
    pub fn size(&self) -> usize {
        self.neurons.height()
    }

    #[inline]
    pub fn neurons(&self) -> &Matrix {
        &self.neurons
    }

    #[inline]
    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    #[inline]
    pub fn bias(&self) -> &Matrix {
        &self.bias
    }

    #[inline]
    pub fn weight_delta(&self) -> &Matrix {
        &self.weight_delta
    }

    #[inline]
    pub fn bias_delta(&self) -> &Matrix {
        &self.bias_delta
    }

    /// Forward step from the previous layer's activations.
    ///
    /// Computes:
    /// - `pre_activation = weights · prev + bias`
    /// - `neurons = σ(pre_activation)`
    pub(crate) fn forward(&mut self, prev: &Matrix) -> Result<()> {
        let mut z = self.weights.dot(prev)?;
        z.add_assign(&self.bias)?;
        self.neurons = z.clone();
        activation::sigmoid_in_place(&mut self.neurons);
        self.pre_activation = z;
        Ok(())
    }

    /// Stores this sample's gradients for a layer whose delta is `delta`.
    ///
    /// - `bias_delta = delta`
    /// - `weight_delta = delta · prevᵀ`
    pub(crate) fn store_deltas(&mut self, delta: &Matrix, prev: &Matrix) -> Result<()> {
        self.weight_delta = delta.dot(&prev.transpose())?;
        self.bias_delta = delta.clone();
        Ok(())
    }
}

/// Replaces `target` with `value` laid out in `target`'s shape.
///
/// Any matrix with the same element count is accepted (e.g. a row where a column is
/// stored); other sizes fail with `ShapeMismatch`.
/// Element count of a `width x height` layer matrix.
///
/// Fails with [`Error::InvalidConfig`] if the count overflows or the buffer would exceed
/// `isize::MAX` bytes.
pub(crate) fn checked_matrix_len(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .filter(|len| {
            len.checked_mul(size_of::<f32>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| {
            Error::InvalidConfig(format!(
                "a ({width}, {height}) layer matrix does not fit in memory"
            ))
        })
}

pub(crate) fn replace_keeping_shape(
    target: &mut Matrix,
    value: &Matrix,
    op: &'static str,
) -> Result<()> {
    let shape = target.shape();
    if value.len() != shape.len() {
        return Err(Error::ShapeMismatch {
            op,
            lhs: shape,
            rhs: value.shape(),
        });
    }
    let mut value = value.clone();
    value.reshape(shape.width, shape.height)?;
    *target = value;
    Ok(())
}
