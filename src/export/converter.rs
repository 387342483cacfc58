use std::path::Path;

use tracing::{debug, info};

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::export::format::{quantize, CompactLayer, CompactModel};
use crate::network::network::Network;

/// Turns a full-precision network into the compact inference format.
///
/// Conversion is deterministic and lossy: weights are quantized to int8,
/// biases are narrowed to f32, and the backprop caches are dropped.
pub struct Converter {
    network: Network,
}

impl Converter {
    /// Reads a model previously written by `Network::save_json`.
    pub fn from_model_file<P: AsRef<Path>>(path: P) -> Result<Converter> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading full-precision model for conversion");
        Ok(Converter { network: Network::load_json(path)? })
    }

    pub fn from_network(network: Network) -> Converter {
        Converter { network }
    }

    /// Validates and quantizes the model.
    pub fn convert_model(&self) -> Result<CompactModel> {
        let layers = &self.network.layers;
        if layers.is_empty() {
            return Err(Error::UnsupportedModel("network has no layers".into()));
        }

        let mut compact = Vec::with_capacity(layers.len());
        let mut expected_input = layers[0].input_size;

        for (i, layer) in layers.iter().enumerate() {
            let w = &layer.weights;
            if layer.input_size != expected_input
                || w.rows != layer.input_size
                || w.cols != layer.size
                || w.data.len() != w.rows
                || w.data.iter().any(|row| row.len() != w.cols)
                || layer.biases.rows != 1
                || layer.biases.cols != layer.size
                || layer.biases.data.first().map_or(true, |b| b.len() != layer.size)
            {
                return Err(Error::UnsupportedModel(format!(
                    "layer {i} has inconsistent shape (expected {expected_input} inputs)"
                )));
            }
            if layer.activator == ActivationFunction::Softmax && i + 1 != layers.len() {
                return Err(Error::UnsupportedModel(format!(
                    "softmax is only supported on the output layer, found on layer {i}"
                )));
            }
            if !w.is_finite() || !layer.biases.is_finite() {
                return Err(Error::UnsupportedModel(format!("layer {i} has non-finite parameters")));
            }

            let flat: Vec<f64> = w.data.iter().flatten().copied().collect();
            let (scale, weights) = quantize(&flat);
            compact.push(CompactLayer {
                input_size: layer.input_size,
                output_size: layer.size,
                activation: layer.activator,
                scale,
                weights,
                biases: layer.biases.data[0].iter().map(|&b| b as f32).collect(),
            });
            expected_input = layer.size;
        }

        let output_labels = match self.network.metadata.as_ref().and_then(|m| m.output_labels.clone()) {
            Some(labels) if labels.len() != self.network.output_size() => {
                return Err(Error::UnsupportedModel(format!(
                    "{} output labels for {} outputs",
                    labels.len(),
                    self.network.output_size()
                )));
            }
            Some(labels) => labels,
            None => Vec::new(),
        };

        Ok(CompactModel { layers: compact, output_labels })
    }

    /// Converts to the compact byte representation.
    pub fn convert(&self) -> Result<Vec<u8>> {
        let bytes = self.convert_model()?.to_bytes()?;
        info!(
            parameters = self.network.parameter_count(),
            bytes = bytes.len(),
            "converted model to compact format"
        );
        Ok(bytes)
    }
}
