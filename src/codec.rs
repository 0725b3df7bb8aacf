//! Text checkpoints for [`Network`].
//!
//! The format is line-oriented:
//!
//! ```text
//! structure 4 3 2
//! weight 1 <12 values, row-major>
//! weight 2 <6 values>
//! bias 1 <3 values>
//! bias 2 <2 values>
//! ```
//!
//! `structure` lists every layer size, input first, and must come before any
//! `weight`/`bias` line. Parameter lines may appear in any order and refer to layers by
//! index. Values are written with Rust's shortest round-trip `f32` formatting, so
//! `from_text(to_text(net))` restores the parameters exactly.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::matrix::parse_f32;
use crate::{Error, Matrix, Network, Result};

impl Network {
    /// Encodes structure, weights and biases in the text format.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Rebuilds a network from the text format.
    ///
    /// Layers are created with [`Network::add_layer`] from the `structure` line, then
    /// each `weight`/`bias` line is assigned with [`Network::set_layer_weights`] /
    /// [`Network::set_layer_bias`]. Index-0 lines (placeholders written by older
    /// encoders) are accepted.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut net: Option<Network> = None;

        for (line_idx, line) in text.lines().enumerate() {
            let line_no = line_idx + 1;
            let mut tokens = line.split_whitespace();
            let Some(keyword) = tokens.next() else {
                continue;
            };

            match keyword {
                "structure" => {
                    if net.is_some() {
                        return Err(Error::Parse(format!(
                            "duplicate structure line on line {line_no}"
                        )));
                    }
                    let sizes = tokens
                        .map(|t| parse_usize(t, line_no))
                        .collect::<Result<Vec<_>>>()?;
                    if sizes.is_empty() {
                        return Err(Error::Parse(format!(
                            "structure line {line_no} lists no layers"
                        )));
                    }
                    let structure = Network::with_layers(&sizes)
                        .map_err(|e| Error::Parse(format!("line {line_no}: {e}")))?;
                    net = Some(structure);
                }
                "weight" | "bias" => {
                    let target = net.as_mut().ok_or_else(|| {
                        Error::Parse(format!(
                            "{keyword} line {line_no} appears before the structure line"
                        ))
                    })?;
                    let index = tokens.next().ok_or_else(|| {
                        Error::Parse(format!("{keyword} line {line_no} has no layer index"))
                    })?;
                    let index = parse_usize(index, line_no)?;
                    let values = tokens
                        .map(|t| parse_f32(t, line_no))
                        .collect::<Result<Vec<_>>>()?;
                    let values = Matrix::from_vec(values);

                    if keyword == "weight" {
                        target.set_layer_weights(index, &values)?;
                    } else {
                        target.set_layer_bias(index, &values)?;
                    }
                }
                other => {
                    return Err(Error::Parse(format!(
                        "unknown keyword {other:?} on line {line_no}"
                    )));
                }
            }
        }

        let net = net.ok_or_else(|| Error::Parse("missing structure line".to_owned()))?;
        debug!(layers = ?net.layer_sizes(), "parsed network text");
        Ok(net)
    }

    /// Writes the text format to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_text())?;
        debug!(path = %path.as_ref().display(), "saved network");
        Ok(())
    }

    /// Reads a network in the text format from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_text(&text)
    }
}

fn parse_usize(token: &str, line: usize) -> Result<usize> {
    token
        .parse::<usize>()
        .map_err(|e| Error::Parse(format!("invalid integer {token:?} on line {line}: {e}")))
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("structure")?;
        for size in self.layer_sizes() {
            write!(f, " {size}")?;
        }
        f.write_str("\n")?;

        for (idx, layer) in self.layers().iter().enumerate().skip(1) {
            write!(f, "weight {idx}")?;
            for v in layer.weights().data() {
                write!(f, " {v}")?;
            }
            f.write_str("\n")?;
        }

        for (idx, layer) in self.layers().iter().enumerate().skip(1) {
            write!(f, "bias {idx}")?;
            for v in layer.bias().data() {
                write!(f, " {v}")?;
            }
            f.write_str("\n")?;
        }

        Ok(())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}
