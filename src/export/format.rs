//! Compact on-device model format.
//!
//! Layout (little-endian):
//!
//! ```text
//! magic     "FBNN"
//! version   u8
//! n_layers  u8
//! per layer:
//!   in      u16
//!   out     u16
//!   act     u8            0 = tanh, 1 = softmax
//!   scale   f32           weight dequantization scale
//!   weights i8 × in·out   row-major [in][out]
//!   biases  f32 × out
//! n_labels  u8
//! per label: len u8, utf-8 bytes
//! ```

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};

pub const MAGIC: &[u8; 4] = b"FBNN";
pub const VERSION: u8 = 1;

/// One quantized dense layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactLayer {
    pub input_size: usize,
    pub output_size: usize,
    pub activation: ActivationFunction,
    /// `real_weight ≈ quantized as f32 * scale`
    pub scale: f32,
    pub weights: Vec<i8>,
    pub biases: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompactModel {
    pub layers: Vec<CompactLayer>,
    pub output_labels: Vec<String>,
}

/// Symmetric per-tensor int8 quantization: scale = max|w| / 127.
pub fn quantize(values: &[f64]) -> (f32, Vec<i8>) {
    let max_abs = values.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if max_abs == 0.0 {
        return (1.0, vec![0; values.len()]);
    }
    let scale = max_abs / 127.0;
    let q = values.iter()
        .map(|v| (v / scale).round().clamp(-127.0, 127.0) as i8)
        .collect();
    (scale as f32, q)
}

pub fn dequantize(scale: f32, values: &[i8]) -> Vec<f32> {
    values.iter().map(|&q| q as f32 * scale).collect()
}

fn activation_tag(activation: ActivationFunction) -> u8 {
    match activation {
        ActivationFunction::Tanh => 0,
        ActivationFunction::Softmax => 1,
    }
}

fn activation_from_tag(tag: u8) -> Result<ActivationFunction> {
    match tag {
        0 => Ok(ActivationFunction::Tanh),
        1 => Ok(ActivationFunction::Softmax),
        other => Err(Error::InvalidFormat(format!("unknown activation tag {other}"))),
    }
}

impl CompactModel {
    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, |l| l.input_size)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |l| l.output_size)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let n_layers = u8::try_from(self.layers.len())
            .map_err(|_| Error::UnsupportedModel(format!("{} layers", self.layers.len())))?;
        let n_labels = u8::try_from(self.output_labels.len())
            .map_err(|_| Error::UnsupportedModel(format!("{} labels", self.output_labels.len())))?;

        let mut out = Vec::new();
        out.extend_from_slice(MAGIC);
        out.push(VERSION);
        out.push(n_layers);

        for layer in &self.layers {
            let width = |n: usize| {
                u16::try_from(n).map_err(|_| Error::UnsupportedModel(format!("layer width {n}")))
            };
            out.extend_from_slice(&width(layer.input_size)?.to_le_bytes());
            out.extend_from_slice(&width(layer.output_size)?.to_le_bytes());
            out.push(activation_tag(layer.activation));
            out.extend_from_slice(&layer.scale.to_le_bytes());
            out.extend(layer.weights.iter().map(|&w| w as u8));
            for b in &layer.biases {
                out.extend_from_slice(&b.to_le_bytes());
            }
        }

        out.push(n_labels);
        for label in &self.output_labels {
            let len = u8::try_from(label.len())
                .map_err(|_| Error::UnsupportedModel(format!("label '{label}' too long")))?;
            out.push(len);
            out.extend_from_slice(label.as_bytes());
        }

        Ok(out)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<CompactModel> {
        let mut r = Reader { bytes, pos: 0 };

        if r.take(4)? != MAGIC {
            return Err(Error::InvalidFormat("bad magic".into()));
        }
        let version = r.u8()?;
        if version != VERSION {
            return Err(Error::InvalidFormat(format!("unsupported version {version}")));
        }

        let n_layers = r.u8()? as usize;
        let mut layers: Vec<CompactLayer> = Vec::with_capacity(n_layers);
        for i in 0..n_layers {
            let input_size = r.u16()? as usize;
            let output_size = r.u16()? as usize;
            if let Some(prev) = layers.last().map(|l| l.output_size) {
                if input_size != prev {
                    return Err(Error::InvalidFormat(format!(
                        "layer {i} takes {input_size} inputs but the previous layer has {prev} outputs"
                    )));
                }
            }
            let activation = activation_from_tag(r.u8()?)?;
            let scale = r.f32()?;
            let weights = r.take(input_size * output_size)?.iter().map(|&b| b as i8).collect();
            let biases = (0..output_size).map(|_| r.f32()).collect::<Result<Vec<f32>>>()?;
            layers.push(CompactLayer { input_size, output_size, activation, scale, weights, biases });
        }

        let n_labels = r.u8()? as usize;
        let mut output_labels = Vec::with_capacity(n_labels);
        for _ in 0..n_labels {
            let len = r.u8()? as usize;
            let label = std::str::from_utf8(r.take(len)?)
                .map_err(|e| Error::InvalidFormat(format!("label is not utf-8: {e}")))?;
            output_labels.push(label.to_string());
        }

        if r.pos != bytes.len() {
            return Err(Error::InvalidFormat(format!(
                "{} trailing bytes",
                bytes.len() - r.pos
            )));
        }

        Ok(CompactModel { layers, output_labels })
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| Error::InvalidFormat(format!("truncated at byte {}", self.pos)))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn f32(&mut self) -> Result<f32> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}
