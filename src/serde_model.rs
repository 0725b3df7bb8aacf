//! JSON checkpoints for `Network` (feature: `serde`).
//!
//! A checkpoint records the layer sizes and, for every non-input layer, its weights
//! (row-major) and bias. Activations, pre-activations and deltas are training state
//! and are left out. [`SerializedNetwork::validate`] runs before a network is rebuilt:
//! it checks the format version, the layer count, every parameter length and that all
//! values are finite.

use serde::{Deserialize, Serialize};

use std::path::Path;

use crate::{Error, Matrix, Network, Result};

pub const CHECKPOINT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedNetwork {
    pub format_version: u32,
    /// Layer sizes, input first.
    pub structure: Vec<usize>,
    /// Parameters of layers `1..structure.len()`.
    pub layers: Vec<SerializedLayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedLayer {
    /// Row-major `(size, prev_size)`.
    pub weights: Vec<f32>,
    pub bias: Vec<f32>,
}

impl SerializedNetwork {
    pub fn validate(&self) -> Result<()> {
        if self.format_version != CHECKPOINT_FORMAT_VERSION {
            return Err(Error::InvalidData(format!(
                "unsupported checkpoint format_version {}; expected {}",
                self.format_version, CHECKPOINT_FORMAT_VERSION
            )));
        }
        if self.structure.is_empty() {
            return Err(Error::InvalidData(
                "checkpoint structure must list at least one layer".to_owned(),
            ));
        }
        if self.structure.contains(&0) {
            return Err(Error::InvalidData(
                "all layer sizes must be > 0".to_owned(),
            ));
        }
        if self.layers.len() != self.structure.len() - 1 {
            return Err(Error::InvalidData(format!(
                "checkpoint has {} parameter layers, structure needs {}",
                self.layers.len(),
                self.structure.len() - 1
            )));
        }

        for (i, (layer, dims)) in self.layers.iter().zip(self.structure.windows(2)).enumerate() {
            let idx = i + 1;
            let (prev, size) = (dims[0], dims[1]);
            let expected_w = prev
                .checked_mul(size)
                .ok_or_else(|| Error::InvalidData("layer weight shape overflow".to_owned()))?;
            if layer.weights.len() != expected_w {
                return Err(Error::InvalidData(format!(
                    "layer {idx} weights length {} does not match size * prev ({size} * {prev})",
                    layer.weights.len()
                )));
            }
            if layer.bias.len() != size {
                return Err(Error::InvalidData(format!(
                    "layer {idx} bias length {} does not match size {size}",
                    layer.bias.len()
                )));
            }
            if layer.weights.iter().chain(&layer.bias).any(|v| !v.is_finite()) {
                return Err(Error::InvalidData(format!(
                    "layer {idx} parameters must contain only finite values"
                )));
            }
        }

        Ok(())
    }
}

impl From<&Network> for SerializedNetwork {
    fn from(net: &Network) -> Self {
        let layers = net
            .layers()
            .iter()
            .skip(1)
            .map(|layer| SerializedLayer {
                weights: layer.weights().data().to_vec(),
                bias: layer.bias().data().to_vec(),
            })
            .collect();
        Self {
            format_version: CHECKPOINT_FORMAT_VERSION,
            structure: net.layer_sizes(),
            layers,
        }
    }
}

impl TryFrom<SerializedNetwork> for Network {
    type Error = Error;

    fn try_from(value: SerializedNetwork) -> std::result::Result<Self, Self::Error> {
        value.validate()?;

        let mut net = Network::with_layers(&value.structure)?;
        for (i, layer) in value.layers.into_iter().enumerate() {
            net.set_layer_weights(i + 1, &Matrix::from_vec(layer.weights))?;
            net.set_layer_bias(i + 1, &Matrix::from_vec(layer.bias))?;
        }
        Ok(net)
    }
}

impl Network {
    /// Serialize the network to a pretty-printed JSON string.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        let ser = SerializedNetwork::from(self);
        serde_json::to_string_pretty(&ser)
            .map_err(|e| Error::InvalidData(format!("failed to serialize network: {e}")))
    }

    /// Serialize the network to a compact JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        let ser = SerializedNetwork::from(self);
        serde_json::to_string(&ser)
            .map_err(|e| Error::InvalidData(format!("failed to serialize network: {e}")))
    }

    /// Parse a network from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let ser: SerializedNetwork = serde_json::from_str(s)
            .map_err(|e| Error::InvalidData(format!("failed to parse network json: {e}")))?;
        ser.try_into()
    }

    /// Save the network to a JSON file (pretty-printed).
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let s = self.to_json_string_pretty()?;
        std::fs::write(path.as_ref(), s)?;
        Ok(())
    }

    /// Load a network from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&s)
    }
}
