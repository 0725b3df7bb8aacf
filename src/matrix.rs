//! Dense 2-D `f32` matrices.
//!
//! A [`Matrix`] owns a flat row-major buffer plus its width (columns) and height (rows).
//! Element `(x, y)` lives at index `y * width + x`, and `data.len() == width * height`
//! holds for every value this module hands out.
//!
//! Operations that can only fail on incompatible shapes return [`Result`]; scalar
//! operations always succeed and are also available through `std::ops`
//! (`&m * 2.0`, `&m / 2.0`).
//!
//! # Text format
//!
//! [`Matrix::to_text`] (and `Display`) writes one line per row, values separated by a
//! single space, every row terminated by `\n`. [`Matrix::from_text`] (and `FromStr`)
//! infers the width from the first row and the height from the number of rows.

use std::fmt;
use std::ops::{Div, Mul};
use std::str::FromStr;

use crate::matmul::matmul_f32;
use crate::{Error, Result};

/// Width (columns) and height (rows) of a matrix. Displayed as `(width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    pub width: usize,
    pub height: usize,
}

impl Shape {
    #[inline]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of elements.
    ///
    /// Saturates at `usize::MAX`; use [`Shape::checked_len`] when the shape comes from
    /// untrusted input.
    #[inline]
    pub const fn len(self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Number of elements, or `None` if `width * height` overflows.
    #[inline]
    pub const fn checked_len(self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Zero-filled matrix with `width` columns and `height` rows.
    ///
    /// # Panics
    ///
    /// Panics with a capacity overflow if `width * height` does not fit in memory,
    /// like `vec!` does.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; Shape::new(width, height).len()],
        }
    }

    /// Single-row matrix (`height == 1`) holding `data`.
    pub fn from_vec(data: Vec<f32>) -> Self {
        Self {
            width: data.len(),
            height: 1,
            data,
        }
    }

    /// Column vector (`width == 1`) holding `data`.
    pub fn column(data: Vec<f32>) -> Self {
        Self {
            width: 1,
            height: data.len(),
            data,
        }
    }

    /// Matrix over a row-major buffer.
    ///
    /// Fails with [`Error::ReshapeSizeMismatch`] if `data.len() != width * height`.
    pub fn from_shape_vec(data: Vec<f32>, width: usize, height: usize) -> Result<Self> {
        let to = Shape::new(width, height);
        if to.checked_len() != Some(data.len()) {
            return Err(Error::ReshapeSizeMismatch {
                from: Shape::new(data.len(), 1),
                to,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        Shape::new(self.width, self.height)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn is_column(&self) -> bool {
        self.width == 1
    }

    /// Row-major view of the elements.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Replaces the buffer, keeping the shape.
    ///
    /// Fails with [`Error::ReshapeSizeMismatch`] if `data.len()` differs from the
    /// current element count.
    pub fn set_data(&mut self, data: Vec<f32>) -> Result<()> {
        if data.len() != self.data.len() {
            return Err(Error::ReshapeSizeMismatch {
                from: Shape::new(data.len(), 1),
                to: self.shape(),
            });
        }
        self.data = data;
        Ok(())
    }

    fn check_same_shape(&self, other: &Matrix, op: &'static str) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::ShapeMismatch {
                op,
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }
        Ok(())
    }

    fn zip_with(
        &self,
        other: &Matrix,
        op: &'static str,
        f: impl Fn(f32, f32) -> f32,
    ) -> Result<Matrix> {
        self.check_same_shape(other, op)?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Self {
            width: self.width,
            height: self.height,
            data,
        })
    }

    fn zip_in_place(
        &mut self,
        other: &Matrix,
        op: &'static str,
        f: impl Fn(&mut f32, f32),
    ) -> Result<()> {
        self.check_same_shape(other, op)?;
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            f(a, b);
        }
        Ok(())
    }

    /// Elementwise sum.
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    /// Elementwise difference.
    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "sub", |a, b| a - b)
    }

    /// Elementwise (Hadamard) product. Not a matrix product, see [`Matrix::dot`].
    pub fn hadamard(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "hadamard", |a, b| a * b)
    }

    pub fn add_assign(&mut self, other: &Matrix) -> Result<()> {
        self.zip_in_place(other, "add", |a, b| *a += b)
    }

    pub fn sub_assign(&mut self, other: &Matrix) -> Result<()> {
        self.zip_in_place(other, "sub", |a, b| *a -= b)
    }

    pub fn hadamard_assign(&mut self, other: &Matrix) -> Result<()> {
        self.zip_in_place(other, "hadamard", |a, b| *a *= b)
    }

    /// Subtracts `value` from every element.
    pub fn sub_scalar(&self, value: f32) -> Matrix {
        self.map(|v| v - value)
    }

    /// Multiplies every element by `factor`.
    pub fn scale(&self, factor: f32) -> Matrix {
        self.map(|v| v * factor)
    }

    /// Divides every element by `factor`. Division by zero follows IEEE-754.
    pub fn div_scalar(&self, factor: f32) -> Matrix {
        self.map(|v| v / factor)
    }

    pub fn scale_in_place(&mut self, factor: f32) {
        self.map_in_place(|v| v * factor);
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// New matrix of the same shape with `f` applied to every element.
    pub fn map(&self, mut f: impl FnMut(f32) -> f32) -> Matrix {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Applies `f` to every element in place.
    pub fn map_in_place(&mut self, mut f: impl FnMut(f32) -> f32) {
        for v in &mut self.data {
            *v = f(*v);
        }
    }

    /// Matrix product `self · other`.
    ///
    /// Requires `self.width() == other.height()`; the result has shape
    /// `(other.width(), self.height())` and element `(c, r)` is
    /// `sum_k self(k, r) * other(c, k)`.
    pub fn dot(&self, other: &Matrix) -> Result<Matrix> {
        if self.width != other.height {
            return Err(Error::DimensionMismatch {
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }

        let mut out = Matrix::zeros(other.width, self.height);
        matmul_f32(
            self.height,
            self.width,
            other.width,
            &self.data,
            &other.data,
            &mut out.data,
        );
        Ok(out)
    }

    /// Sum of all elements.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// New matrix with width and height swapped and `t(y, x) == self(x, y)`.
    pub fn transpose(&self) -> Matrix {
        let mut t = Matrix::zeros(self.height, self.width);
        for y in 0..self.height {
            for x in 0..self.width {
                t.data[x * self.height + y] = self.data[y * self.width + x];
            }
        }
        t
    }

    #[inline]
    fn index_of(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfRange {
                x,
                y,
                shape: self.shape(),
            });
        }
        Ok(y * self.width + x)
    }

    /// Element at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Result<f32> {
        let idx = self.index_of(x, y)?;
        Ok(self.data[idx])
    }

    /// Overwrites the element at column `x`, row `y`.
    pub fn set(&mut self, x: usize, y: usize, value: f32) -> Result<()> {
        let idx = self.index_of(x, y)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Reinterprets the buffer with a new width and height. Elements are not moved.
    pub fn reshape(&mut self, width: usize, height: usize) -> Result<()> {
        let to = Shape::new(width, height);
        if to.checked_len() != Some(self.data.len()) {
            return Err(Error::ReshapeSizeMismatch {
                from: self.shape(),
                to,
            });
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Encodes the matrix in the text format (see module docs).
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Parses the text format (see module docs).
    ///
    /// Blank lines are skipped. Rows with a different value count than the first row
    /// and tokens that are not valid `f32` fail with [`Error::Parse`].
    pub fn from_text(text: &str) -> Result<Self> {
        let mut width = None;
        let mut height = 0;
        let mut data = Vec::new();

        for (line_idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let before = data.len();
            for token in line.split_whitespace() {
                data.push(parse_f32(token, line_idx + 1)?);
            }
            let count = data.len() - before;

            match width {
                None => width = Some(count),
                Some(w) if w != count => {
                    return Err(Error::Parse(format!(
                        "line {} has {count} values, expected {w}",
                        line_idx + 1
                    )));
                }
                Some(_) => {}
            }
            height += 1;
        }

        Ok(Self {
            width: width.unwrap_or(0),
            height,
            data,
        })
    }
}

/// Parses one numeric token; `line` is 1-based and only used in the error message.
pub(crate) fn parse_f32(token: &str, line: usize) -> Result<f32> {
    token
        .parse::<f32>()
        .map_err(|e| Error::Parse(format!("invalid number {token:?} on line {line}: {e}")))
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        for row in self.data.chunks_exact(self.width) {
            for (x, v) in row.iter().enumerate() {
                if x > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{v}")?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl FromStr for Matrix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}

macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident, $body:ident) => {
        impl $trait<f32> for &Matrix {
            type Output = Matrix;

            #[inline]
            fn $method(self, rhs: f32) -> Matrix {
                self.$body(rhs)
            }
        }

        impl $trait<f32> for Matrix {
            type Output = Matrix;

            #[inline]
            fn $method(self, rhs: f32) -> Matrix {
                self.$body(rhs)
            }
        }
    };
}

impl_scalar_op!(Mul, mul, scale);
impl_scalar_op!(Div, div, div_scalar);
