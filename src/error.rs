use thiserror::Error;

use crate::Shape;

#[derive(Debug, Error)]
pub enum Error {
    /// Elementwise operands differ in width or height.
    #[error("shape mismatch in {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },
    /// `lhs.width != rhs.height` in a matrix product.
    #[error("dimension mismatch in dot: lhs {lhs} width must equal rhs {rhs} height")]
    DimensionMismatch { lhs: Shape, rhs: Shape },
    #[error("index ({x}, {y}) out of range for matrix {shape}")]
    IndexOutOfRange { x: usize, y: usize, shape: Shape },
    #[error("cannot reshape from {from} to {to}")]
    ReshapeSizeMismatch { from: Shape, to: Shape },
    #[error("input must be a column vector of height {expected_height}, got {got}")]
    InvalidInputShape { expected_height: usize, got: Shape },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("layer {index} out of range for network with {len} layers")]
    LayerOutOfRange { index: usize, len: usize },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("batch must contain at least one sample")]
    EmptyBatch,
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
