//! A small dense-matrix engine and a fully-connected network trainer.
//!
//! `matnet` implements backpropagation and mini-batch updates from scratch on top of
//! its own [`Matrix`] type. It is meant for small classification tasks (e.g. digit
//! recognition from fixed-size greyscale images) where reading the whole training loop
//! matters more than speed.
//!
//! # Data layout and shapes
//!
//! - Scalars are `f32`.
//! - A [`Matrix`] is row-major with an explicit width (columns) and height (rows);
//!   shapes are written `(width, height)`.
//! - Network inputs, activations, biases and expected outputs are column vectors
//!   (`width == 1`).
//! - Layer `i` weights have shape `(size[i - 1], size[i])`, so `W · a` maps the previous
//!   layer's column to this layer's column.
//!
//! # Errors
//!
//! Every shape, index and parse problem is reported through [`Error`]; nothing is
//! retried or swallowed inside the engine.
//!
//! # Conventions worth knowing
//!
//! - The activation is `σ(x) = 1 / (1 + e^x)` (see [`activation`]).
//! - [`Network::process_batch`] *adds* the averaged deltas to the parameters.
//! - [`Network::calculate_cost`] is the signed sum `Σ (output - desired)`.
//!
//! # Quick start
//!
//! ```rust
//! use matnet::{Matrix, Network, TrainingBatch};
//!
//! # fn main() -> matnet::Result<()> {
//! let mut net = Network::new();
//! net.add_layer(2)?.add_layer(3)?.add_layer(1)?;
//! net.randomize_with_seed(0);
//!
//! let mut batch = TrainingBatch::new();
//! batch.add_sample(Matrix::column(vec![0.0, 1.0]), Matrix::column(vec![1.0]));
//! batch.add_sample(Matrix::column(vec![1.0, 1.0]), Matrix::column(vec![0.0]));
//!
//! for _ in 0..10 {
//!     net.process_batch(0.1, &batch)?;
//! }
//!
//! let out = net.predict(&Matrix::column(vec![0.0, 1.0]))?;
//! assert_eq!(out.shape(), matnet::Shape::new(1, 1));
//!
//! let restored: Network = net.to_text().parse()?;
//! assert_eq!(restored.layer_sizes(), vec![2, 3, 1]);
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod batch;
mod codec;
pub mod error;
pub mod layer;
pub(crate) mod matmul;
pub mod matrix;
pub mod network;
pub mod train;

#[cfg(feature = "serde")]
pub mod serde_model;

pub use batch::{Sample, TrainingBatch};
pub use error::{Error, Result};
pub use layer::Layer;
pub use matrix::{Matrix, Shape};
pub use network::Network;
pub use train::{CostReport, TrainConfig, TrainReport};

#[cfg(feature = "serde")]
pub use serde_model::{CHECKPOINT_FORMAT_VERSION, SerializedLayer, SerializedNetwork};
