use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::layer::{Layer, checked_matrix_len, replace_keeping_shape};
use crate::{Error, Matrix, Result, TrainingBatch, activation};

/// A fully-connected feedforward network.
///
/// Layer 0 is the input layer and carries no parameters. Every later layer `i` owns
/// a weight matrix of shape `(size[i - 1], size[i])` and a bias column of height
/// `size[i]`.
///
/// Forward and backward passes overwrite the activations, pre-activations and
/// per-sample deltas stored in the layers, so a `Network` must not be shared between
/// callers during a training step.
#[derive(Debug, Clone, Default)]
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// Empty network; add layers with [`Network::add_layer`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Network with one layer per entry of `sizes` (input first). Parameters are zero.
    ///
    /// Every size and every weight count is checked before anything is allocated.
    pub fn with_layers(sizes: &[usize]) -> Result<Self> {
        if sizes.contains(&0) {
            return Err(Error::InvalidConfig("layer size must be > 0".to_owned()));
        }
        for (idx, &size) in sizes.iter().enumerate() {
            let prev = if idx == 0 { 1 } else { sizes[idx - 1] };
            checked_matrix_len(prev, size)?;
        }

        let mut net = Self::new();
        for &size in sizes {
            net.add_layer(size)?;
        }
        Ok(net)
    }

    /// Appends a layer of `size` neurons, fully connected to the current last layer.
    ///
    /// The first layer added is the input layer.
    pub fn add_layer(&mut self, size: usize) -> Result<&mut Self> {
        if size == 0 {
            return Err(Error::InvalidConfig("layer size must be > 0".to_owned()));
        }

        let layer = match self.layers.last() {
            Some(prev) => Layer::dense(prev.size(), size)?,
            None => Layer::input(size)?,
        };
        self.layers.push(layer);
        Ok(self)
    }

    #[inline]
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Neuron count of every layer, input first.
    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::size).collect()
    }

    #[inline]
    pub fn input_size(&self) -> Option<usize> {
        self.layers.first().map(Layer::size)
    }

    #[inline]
    pub fn output_size(&self) -> Option<usize> {
        self.layers.last().map(Layer::size)
    }

    #[inline]
    pub(crate) fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Result<&Layer> {
        self.layers.get(index).ok_or(Error::LayerOutOfRange {
            index,
            len: self.layers.len(),
        })
    }

    fn layer_mut(&mut self, index: usize) -> Result<&mut Layer> {
        let len = self.layers.len();
        self.layers
            .get_mut(index)
            .ok_or(Error::LayerOutOfRange { index, len })
    }

    fn require_trainable(&self) -> Result<()> {
        if self.layers.len() < 2 {
            return Err(Error::InvalidConfig(format!(
                "network needs an input and an output layer, has {} layers",
                self.layers.len()
            )));
        }
        Ok(())
    }

    /// Replaces the input layer's activations.
    ///
    /// `input` must be a column vector whose height matches the input layer size.
    pub fn set_input(&mut self, input: &Matrix) -> Result<()> {
        let first = self.layer_mut(0)?;
        if !input.is_column() || input.height() != first.size() {
            return Err(Error::InvalidInputShape {
                expected_height: first.size(),
                got: input.shape(),
            });
        }
        first.neurons = input.clone();
        Ok(())
    }

    /// Activations of the last layer.
    ///
    /// Only meaningful right after [`Network::feedforward`] (or a call that runs it).
    pub fn output(&self) -> Result<&Matrix> {
        self.layers
            .last()
            .map(Layer::neurons)
            .ok_or(Error::LayerOutOfRange { index: 0, len: 0 })
    }

    /// Recomputes every layer after the input: `a[i] = σ(W[i] · a[i - 1] + b[i])`.
    ///
    /// Overwrites all intermediate activations.
    pub fn feedforward(&mut self) -> Result<()> {
        for idx in 1..self.layers.len() {
            // Borrow the previous layer immutably and the current one mutably.
            let (left, right) = self.layers.split_at_mut(idx);
            right[0].forward(&left[idx - 1].neurons)?;
        }
        Ok(())
    }

    /// Sets the input, runs [`Network::feedforward`] and returns the output.
    pub fn predict(&mut self, input: &Matrix) -> Result<&Matrix> {
        self.set_input(input)?;
        self.feedforward()?;
        self.output()
    }

    /// Draws every weight, then every bias, uniformly from `[0, 1)`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for layer in self.layers.iter_mut().skip(1) {
            layer.weights.map_in_place(|_| rng.gen_range(0.0..1.0));
        }
        for layer in self.layers.iter_mut().skip(1) {
            layer.bias.map_in_place(|_| rng.gen_range(0.0..1.0));
        }
    }

    /// [`Network::randomize`] with a `StdRng` seeded from `seed`.
    pub fn randomize_with_seed(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.randomize(&mut rng);
    }

    /// Computes the parameter deltas for a single sample.
    ///
    /// Runs a forward pass on `input`, then walks back from the output layer:
    /// - output: `δ = (a[L-1] - desired) ⊙ σ'(z[L-1])`
    /// - hidden `i` (from `L-2` down to 1): `δ = (W[i+1]ᵀ · δ) ⊙ σ'(z[i])`
    ///
    /// and stores `bias_delta[i] = δ`, `weight_delta[i] = δ · a[i-1]ᵀ` for every
    /// non-input layer. Read them with [`Network::weight_delta`] and
    /// [`Network::bias_delta`].
    pub fn backpropagate(&mut self, input: &Matrix, desired: &Matrix) -> Result<()> {
        self.require_trainable()?;
        self.set_input(input)?;
        self.feedforward()?;

        let last = self.layers.len() - 1;
        let output = &self.layers[last];
        let mut delta = output.neurons.sub(desired)?;
        delta.hadamard_assign(&activation::sigmoid_derivative_of(&output.pre_activation))?;
        self.store_deltas(last, &delta)?;

        // Empty for a network without hidden layers.
        for idx in (1..last).rev() {
            let mut next = self.layers[idx + 1].weights.transpose().dot(&delta)?;
            next.hadamard_assign(&activation::sigmoid_derivative_of(
                &self.layers[idx].pre_activation,
            ))?;
            delta = next;
            self.store_deltas(idx, &delta)?;
        }

        trace!(layers = self.layers.len(), "backpropagated sample");
        Ok(())
    }

    fn store_deltas(&mut self, idx: usize, delta: &Matrix) -> Result<()> {
        let (left, right) = self.layers.split_at_mut(idx);
        right[0].store_deltas(delta, &left[idx - 1].neurons)
    }

    /// Backpropagates every sample of `batch` and applies one averaged update:
    ///
    /// `W[i] += Σ weight_delta[i] * (learning_rate / batch.len())`, likewise for `b[i]`.
    ///
    /// The summed deltas are *added*. Parameters are only touched once every sample
    /// has been processed, so a failing sample leaves them unchanged.
    pub fn process_batch(&mut self, learning_rate: f32, batch: &TrainingBatch) -> Result<()> {
        if batch.is_empty() {
            return Err(Error::EmptyBatch);
        }
        self.require_trainable()?;

        let mut weight_sums: Vec<Matrix> = self
            .layers
            .iter()
            .map(|l| Matrix::zeros(l.weights.width(), l.weights.height()))
            .collect();
        let mut bias_sums: Vec<Matrix> = self
            .layers
            .iter()
            .map(|l| Matrix::zeros(l.bias.width(), l.bias.height()))
            .collect();

        for (input, expected) in batch.iter() {
            self.backpropagate(input, expected)?;
            for (idx, layer) in self.layers.iter().enumerate().skip(1) {
                weight_sums[idx].add_assign(&layer.weight_delta)?;
                bias_sums[idx].add_assign(&layer.bias_delta)?;
            }
        }

        let step = learning_rate / batch.len() as f32;
        for ((layer, dw), db) in self
            .layers
            .iter_mut()
            .zip(&weight_sums)
            .zip(&bias_sums)
            .skip(1)
        {
            layer.weights.add_assign(&dw.scale(step))?;
            layer.bias.add_assign(&db.scale(step))?;
        }

        debug!(samples = batch.len(), learning_rate, "applied batch update");
        Ok(())
    }

    /// Signed total error of the current output: `Σ (output - desired)`.
    ///
    /// Not a squared error; positive and negative differences cancel.
    pub fn calculate_cost(&self, desired: &Matrix) -> Result<f32> {
        Ok(self.output()?.sub(desired)?.sum())
    }

    /// Mean of [`Network::calculate_cost`] over the samples of `batch`, running a
    /// forward pass for each.
    pub fn average_cost(&mut self, batch: &TrainingBatch) -> Result<f32> {
        if batch.is_empty() {
            return Err(Error::EmptyBatch);
        }
        let mut total = 0.0_f32;
        for (input, expected) in batch.iter() {
            self.predict(input)?;
            total += self.calculate_cost(expected)?;
        }
        Ok(total / batch.len() as f32)
    }

    pub fn layer_neurons(&self, index: usize) -> Result<&Matrix> {
        self.layer(index).map(Layer::neurons)
    }

    pub fn layer_weights(&self, index: usize) -> Result<&Matrix> {
        self.layer(index).map(Layer::weights)
    }

    pub fn layer_bias(&self, index: usize) -> Result<&Matrix> {
        self.layer(index).map(Layer::bias)
    }

    /// `weight_delta[index]` from the most recent [`Network::backpropagate`].
    pub fn weight_delta(&self, index: usize) -> Result<&Matrix> {
        self.layer(index).map(Layer::weight_delta)
    }

    /// `bias_delta[index]` from the most recent [`Network::backpropagate`].
    pub fn bias_delta(&self, index: usize) -> Result<&Matrix> {
        self.layer(index).map(Layer::bias_delta)
    }

    /// Overwrites a layer's activations. `mat` must have as many elements as the layer.
    pub fn set_layer_neurons(&mut self, index: usize, mat: &Matrix) -> Result<()> {
        replace_keeping_shape(&mut self.layer_mut(index)?.neurons, mat, "set_layer_neurons")
    }

    /// Overwrites a layer's weights. `mat` is stored in the layer's weight shape and must
    /// have the same element count.
    pub fn set_layer_weights(&mut self, index: usize, mat: &Matrix) -> Result<()> {
        replace_keeping_shape(&mut self.layer_mut(index)?.weights, mat, "set_layer_weights")
    }

    /// Overwrites a layer's bias. `mat` is stored as a column and must have the same
    /// element count.
    pub fn set_layer_bias(&mut self, index: usize, mat: &Matrix) -> Result<()> {
        replace_keeping_shape(&mut self.layer_mut(index)?.bias, mat, "set_layer_bias")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;
    use approx::assert_abs_diff_eq;

    fn col(data: &[f32]) -> Matrix {
        Matrix::column(data.to_vec())
    }

    fn half_squared_error(net: &mut Network, input: &Matrix, desired: &Matrix) -> f32 {
        let out = net.predict(input).unwrap().clone();
        out.sub(desired)
            .unwrap()
            .data()
            .iter()
            .map(|d| 0.5 * d * d)
            .sum()
    }

    fn assert_close(analytic: f32, numeric: f32, abs_tol: f32, rel_tol: f32) {
        let diff = (analytic - numeric).abs();
        let scale = analytic.abs().max(numeric.abs()).max(1.0);
        assert!(
            diff <= abs_tol || diff / scale <= rel_tol,
            "analytic={analytic} numeric={numeric} diff={diff}"
        );
    }

    #[test]
    fn add_layer_shapes_follow_previous_layer() {
        let net = Network::with_layers(&[4, 3, 2]).unwrap();
        assert_eq!(net.num_layers(), 3);
        assert_eq!(net.layer_sizes(), vec![4, 3, 2]);
        assert_eq!(net.input_size(), Some(4));
        assert_eq!(net.output_size(), Some(2));

        assert_eq!(net.layer_weights(0).unwrap().shape(), Shape::new(1, 1));
        assert_eq!(net.layer_weights(1).unwrap().shape(), Shape::new(4, 3));
        assert_eq!(net.layer_weights(2).unwrap().shape(), Shape::new(3, 2));
        assert_eq!(net.layer_bias(2).unwrap().shape(), Shape::new(1, 2));
        assert_eq!(net.layer_neurons(1).unwrap().shape(), Shape::new(1, 3));

        assert!(matches!(
            net.layer(3),
            Err(Error::LayerOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn add_layer_rejects_zero_size() {
        let mut net = Network::new();
        assert!(matches!(net.add_layer(0), Err(Error::InvalidConfig(_))));
        assert_eq!(net.num_layers(), 0);
    }

    #[test]
    fn overflowing_weight_count_is_rejected_before_allocation() {
        let mut net = Network::new();
        net.add_layer(2).unwrap();
        assert!(matches!(
            net.add_layer(usize::MAX),
            Err(Error::InvalidConfig(_))
        ));
        assert_eq!(net.layer_sizes(), vec![2]);

        assert!(matches!(
            Network::with_layers(&[usize::MAX, 2]),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Network::with_layers(&[3, 0, 1]),
            Err(Error::InvalidConfig(_))
        ));

        // An input layer whose activation buffer alone exceeds the address space.
        assert!(matches!(
            Network::new().add_layer(usize::MAX),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Network::with_layers(&[usize::MAX]),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn set_input_requires_matching_column() {
        let mut net = Network::with_layers(&[3, 1]).unwrap();
        assert!(net.set_input(&col(&[1.0, 2.0, 3.0])).is_ok());

        let row = Matrix::from_vec(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            net.set_input(&row),
            Err(Error::InvalidInputShape { expected_height: 3, .. })
        ));
        assert!(matches!(
            net.set_input(&col(&[1.0, 2.0])),
            Err(Error::InvalidInputShape { .. })
        ));

        let mut empty = Network::new();
        assert!(empty.set_input(&col(&[1.0])).is_err());
        assert!(empty.output().is_err());
    }

    #[test]
    fn feedforward_output_is_a_column_of_output_size() {
        let mut net = Network::with_layers(&[5, 4, 3]).unwrap();
        net.randomize_with_seed(1);
        net.set_input(&col(&[0.1, 0.2, 0.3, 0.4, 0.5])).unwrap();
        net.feedforward().unwrap();
        assert_eq!(net.output().unwrap().shape(), Shape::new(1, 3));
    }

    #[test]
    fn two_layer_forward_pass_and_signed_cost() {
        let mut net = Network::with_layers(&[2, 1]).unwrap();
        net.set_layer_weights(1, &Matrix::from_vec(vec![1.0, 1.0])).unwrap();
        net.set_layer_bias(1, &col(&[0.0])).unwrap();

        let out = net.predict(&col(&[1.0, 1.0])).unwrap();
        // σ(2) with σ(x) = 1 / (1 + e^x).
        assert_abs_diff_eq!(out.data()[0], 0.119_202_92, epsilon = 1e-5);

        let cost = net.calculate_cost(&col(&[1.0])).unwrap();
        assert_abs_diff_eq!(cost, -0.880_797_1, epsilon = 1e-5);
    }

    #[test]
    fn cost_is_a_signed_sum() {
        let mut net = Network::with_layers(&[1, 2]).unwrap();
        net.set_layer_neurons(1, &col(&[0.75, 0.25])).unwrap();
        let cost = net.calculate_cost(&col(&[0.25, 0.75])).unwrap();
        assert_abs_diff_eq!(cost, 0.0, epsilon = 1e-7);
        assert!(net.calculate_cost(&col(&[1.0])).is_err());
    }

    #[test]
    fn deltas_have_parameter_shapes() {
        for sizes in [&[2, 1][..], &[2, 3, 1][..], &[4, 5, 3, 2][..]] {
            let mut net = Network::with_layers(sizes).unwrap();
            net.randomize_with_seed(11);

            let input = Matrix::column(vec![0.5; sizes[0]]);
            let desired = Matrix::column(vec![1.0; sizes[sizes.len() - 1]]);
            net.backpropagate(&input, &desired).unwrap();

            for idx in 1..sizes.len() {
                assert_eq!(
                    net.weight_delta(idx).unwrap().shape(),
                    net.layer_weights(idx).unwrap().shape()
                );
                assert_eq!(
                    net.bias_delta(idx).unwrap().shape(),
                    net.layer_bias(idx).unwrap().shape()
                );
            }
        }
    }

    #[test]
    fn backpropagate_requires_input_and_output_layers() {
        let mut net = Network::with_layers(&[2]).unwrap();
        let res = net.backpropagate(&col(&[1.0, 1.0]), &col(&[1.0, 1.0]));
        assert!(matches!(res, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn deltas_match_numeric_gradients_with_layer_signs() {
        // For σ(x) = 1 / (1 + e^x) the true slope is -σ(x)(1 - σ(x)), so relative to
        // L = ½‖a - desired‖² the output-layer delta is -∂L/∂z and the first hidden
        // layer's delta is +∂L/∂z.
        let mut net = Network::with_layers(&[3, 4, 2]).unwrap();
        net.randomize_with_seed(7);

        let input = col(&[0.2, -0.4, 0.7]);
        let desired = col(&[0.9, 0.1]);
        net.backpropagate(&input, &desired).unwrap();
        let analytic: Vec<(Matrix, Matrix)> = (1..3)
            .map(|i| {
                (
                    net.weight_delta(i).unwrap().clone(),
                    net.bias_delta(i).unwrap().clone(),
                )
            })
            .collect();

        let eps = 1e-3_f32;
        for layer_idx in 1..3 {
            let sign = if layer_idx == 2 { -1.0 } else { 1.0 };
            let (dw, db) = &analytic[layer_idx - 1];

            let weights = net.layers[layer_idx].weights.clone();
            for y in 0..weights.height() {
                for x in 0..weights.width() {
                    let orig = weights.get(x, y).unwrap();

                    net.layers[layer_idx].weights.set(x, y, orig + eps).unwrap();
                    let plus = half_squared_error(&mut net, &input, &desired);
                    net.layers[layer_idx].weights.set(x, y, orig - eps).unwrap();
                    let minus = half_squared_error(&mut net, &input, &desired);
                    net.layers[layer_idx].weights.set(x, y, orig).unwrap();

                    let numeric = (plus - minus) / (2.0 * eps);
                    assert_close(dw.get(x, y).unwrap(), sign * numeric, 1e-3, 1e-2);
                }
            }

            for y in 0..db.height() {
                let orig = net.layers[layer_idx].bias.get(0, y).unwrap();

                net.layers[layer_idx].bias.set(0, y, orig + eps).unwrap();
                let plus = half_squared_error(&mut net, &input, &desired);
                net.layers[layer_idx].bias.set(0, y, orig - eps).unwrap();
                let minus = half_squared_error(&mut net, &input, &desired);
                net.layers[layer_idx].bias.set(0, y, orig).unwrap();

                let numeric = (plus - minus) / (2.0 * eps);
                assert_close(db.get(0, y).unwrap(), sign * numeric, 1e-3, 1e-2);
            }
        }
    }

    #[test]
    fn randomize_is_seeded_and_in_unit_interval() {
        let mut a = Network::with_layers(&[3, 4, 2]).unwrap();
        let mut b = a.clone();
        a.randomize_with_seed(42);
        b.randomize_with_seed(42);

        for idx in 1..3 {
            assert_eq!(a.layer_weights(idx).unwrap(), b.layer_weights(idx).unwrap());
            assert_eq!(a.layer_bias(idx).unwrap(), b.layer_bias(idx).unwrap());
            let w = a.layer_weights(idx).unwrap().data();
            let bias = a.layer_bias(idx).unwrap().data();
            assert!(w.iter().chain(bias).all(|v| (0.0..1.0).contains(v)));
        }
        // Input layer placeholders are left alone.
        assert_eq!(a.layer_weights(0).unwrap().data(), &[0.0]);

        let mut c = Network::with_layers(&[3, 4, 2]).unwrap();
        c.randomize_with_seed(43);
        assert_ne!(a.layer_weights(1).unwrap(), c.layer_weights(1).unwrap());
    }

    fn or_batch() -> TrainingBatch {
        [
            ([0.0, 0.0], 0.2),
            ([0.0, 1.0], 0.8),
            ([1.0, 0.0], 0.8),
            ([1.0, 1.0], 0.8),
        ]
        .into_iter()
        .map(|(x, y)| (col(&x), col(&[y])))
        .collect()
    }

    #[test]
    fn zero_learning_rate_leaves_parameters_unchanged() {
        let mut net = Network::with_layers(&[2, 3, 1]).unwrap();
        net.randomize_with_seed(5);
        let before = net.clone();

        net.process_batch(0.0, &or_batch()).unwrap();

        for idx in 0..3 {
            assert_eq!(
                net.layer_weights(idx).unwrap(),
                before.layer_weights(idx).unwrap()
            );
            assert_eq!(net.layer_bias(idx).unwrap(), before.layer_bias(idx).unwrap());
        }
    }

    #[test]
    fn process_batch_adds_the_averaged_deltas() {
        let mut net = Network::with_layers(&[2, 1]).unwrap();
        net.randomize_with_seed(9);
        let batch = or_batch();

        let mut probe = net.clone();
        let mut sum_w = Matrix::zeros(2, 1);
        let mut sum_b = Matrix::zeros(1, 1);
        for (x, y) in batch.iter() {
            probe.backpropagate(x, y).unwrap();
            sum_w.add_assign(probe.weight_delta(1).unwrap()).unwrap();
            sum_b.add_assign(probe.bias_delta(1).unwrap()).unwrap();
        }

        let before_w = net.layer_weights(1).unwrap().clone();
        let before_b = net.layer_bias(1).unwrap().clone();
        net.process_batch(0.5, &batch).unwrap();

        let expected_w = before_w.add(&sum_w.scale(0.5 / 4.0)).unwrap();
        let expected_b = before_b.add(&sum_b.scale(0.5 / 4.0)).unwrap();
        for (a, b) in net.layer_weights(1).unwrap().data().iter().zip(expected_w.data()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
        }
        assert_abs_diff_eq!(
            net.layer_bias(1).unwrap().data()[0],
            expected_b.data()[0],
            epsilon = 1e-6
        );
    }

    #[test]
    fn process_batch_reduces_error_without_hidden_layers() {
        let mut net = Network::with_layers(&[2, 1]).unwrap();
        net.randomize_with_seed(3);
        let batch = or_batch();

        let error = |net: &mut Network| -> f32 {
            batch
                .iter()
                .map(|(x, y)| half_squared_error(net, x, y))
                .sum()
        };

        let initial = error(&mut net);
        for _ in 0..200 {
            net.process_batch(0.5, &batch).unwrap();
        }
        let trained = error(&mut net);
        assert!(trained < initial, "initial={initial} trained={trained}");
    }

    #[test]
    fn process_batch_rejects_empty_batch_and_keeps_parameters_on_failure() {
        let mut net = Network::with_layers(&[2, 2]).unwrap();
        net.randomize_with_seed(1);
        let before = net.clone();

        assert!(matches!(
            net.process_batch(0.1, &TrainingBatch::new()),
            Err(Error::EmptyBatch)
        ));

        let mut batch = TrainingBatch::new();
        batch.add_sample(col(&[0.0, 1.0]), col(&[1.0, 0.0]));
        batch.add_sample(col(&[1.0, 0.0]), col(&[1.0]));
        assert!(matches!(
            net.process_batch(0.1, &batch),
            Err(Error::ShapeMismatch { .. })
        ));
        assert_eq!(net.layer_weights(1).unwrap(), before.layer_weights(1).unwrap());
        assert_eq!(net.layer_bias(1).unwrap(), before.layer_bias(1).unwrap());
    }

    #[test]
    fn setters_accept_same_element_count_only() {
        let mut net = Network::with_layers(&[2, 3]).unwrap();

        // A row is stored in the bias column shape.
        net.set_layer_bias(1, &Matrix::from_vec(vec![1.0, 2.0, 3.0])).unwrap();
        assert_eq!(net.layer_bias(1).unwrap().shape(), Shape::new(1, 3));

        let w = Matrix::from_shape_vec(vec![1.0; 6], 3, 2).unwrap();
        net.set_layer_weights(1, &w).unwrap();
        assert_eq!(net.layer_weights(1).unwrap().shape(), Shape::new(2, 3));

        assert!(matches!(
            net.set_layer_bias(1, &col(&[1.0, 2.0])),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(matches!(
            net.set_layer_weights(5, &w),
            Err(Error::LayerOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn average_cost_over_batch() {
        let mut net = Network::with_layers(&[2, 1]).unwrap();
        net.set_layer_weights(1, &Matrix::from_vec(vec![1.0, 1.0])).unwrap();

        let mut batch = TrainingBatch::new();
        batch.add_sample(col(&[0.0, 0.0]), col(&[0.5]));
        batch.add_sample(col(&[1.0, 1.0]), col(&[1.0]));
        let avg = net.average_cost(&batch).unwrap();
        // (σ(0) - 0.5 + σ(2) - 1) / 2
        assert_abs_diff_eq!(avg, (0.119_202_92 - 1.0) / 2.0, epsilon = 1e-5);

        assert!(matches!(
            net.average_cost(&TrainingBatch::new()),
            Err(Error::EmptyBatch)
        ));
    }
}
