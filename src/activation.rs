//! The network's activation function.
//!
//! Every non-input layer applies the logistic curve `σ(x) = 1 / (1 + e^x)` element-wise
//! to its pre-activation sum `z = W a + b`. Note the sign of the exponent: this is the
//! mirror image of the textbook `1 / (1 + e^-x)`, so `σ` is decreasing and
//! `σ(2) ≈ 0.1192`. Trained parameters and checkpoints depend on this exact curve.
//!
//! The backward pass uses [`sigmoid_derivative`], `σ(x) * (1 - σ(x))`, evaluated
//! from the same pre-activation input `x`. For this curve the true slope is the
//! negation of that value; the update rule in `Network::process_batch` is written
//! against this convention.

use crate::Matrix;

#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + x.exp())
}

/// `σ(x) * (1 - σ(x))` from the pre-activation `x`.
#[inline]
pub fn sigmoid_derivative(x: f32) -> f32 {
    let s = sigmoid(x);
    s * (1.0 - s)
}

/// Applies [`sigmoid`] to every element in place.
#[inline]
pub fn sigmoid_in_place(mat: &mut Matrix) {
    mat.map_in_place(sigmoid);
}

/// [`sigmoid_derivative`] of every element of `pre_activation`.
#[inline]
pub fn sigmoid_derivative_of(pre_activation: &Matrix) -> Matrix {
    pre_activation.map(sigmoid_derivative)
}
