use std::path::Path;

use crate::activation::activation::ActivationFunction;
use crate::data::fizzbuzz::{encode_binary, FizzBuzzClass};
use crate::error::{Error, Result};
use crate::export::format::{dequantize, CompactModel};

struct DenseOp {
    input_size: usize,
    output_size: usize,
    activation: ActivationFunction,
    weights: Vec<f32>,
    biases: Vec<f32>,
}

/// Runs a compact model. Weights are dequantized once at load; inference is f32.
pub struct Interpreter {
    ops: Vec<DenseOp>,
    labels: Vec<String>,
}

impl Interpreter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Interpreter> {
        let bytes = std::fs::read(path)?;
        Interpreter::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Interpreter> {
        Ok(Interpreter::new(CompactModel::from_bytes(bytes)?))
    }

    pub fn new(model: CompactModel) -> Interpreter {
        let ops = model.layers.into_iter()
            .map(|l| DenseOp {
                input_size: l.input_size,
                output_size: l.output_size,
                activation: l.activation,
                weights: dequantize(l.scale, &l.weights),
                biases: l.biases,
            })
            .collect();
        Interpreter { ops, labels: model.output_labels }
    }

    pub fn input_size(&self) -> usize {
        self.ops.first().map_or(0, |op| op.input_size)
    }

    pub fn output_size(&self) -> usize {
        self.ops.last().map_or(0, |op| op.output_size)
    }

    pub fn output_labels(&self) -> &[String] {
        &self.labels
    }

    /// Runs one sample through every layer.
    pub fn invoke(&self, input: &[f32]) -> Result<Vec<f32>> {
        if input.len() != self.input_size() {
            return Err(Error::DimensionMismatch { expected: self.input_size(), actual: input.len() });
        }

        let mut current = input.to_vec();
        for op in &self.ops {
            if current.len() != op.input_size
                || op.weights.len() != op.input_size * op.output_size
                || op.biases.len() != op.output_size
            {
                return Err(Error::DimensionMismatch { expected: op.input_size, actual: current.len() });
            }
            let mut z = op.biases.clone();
            for (i, &x) in current.iter().enumerate() {
                if x == 0.0 {
                    continue;
                }
                let row = &op.weights[i * op.output_size..(i + 1) * op.output_size];
                for (acc, &w) in z.iter_mut().zip(row) {
                    *acc += x * w;
                }
            }
            current = match op.activation {
                ActivationFunction::Tanh => z.into_iter().map(f32::tanh).collect(),
                ActivationFunction::Softmax => softmax_f32(&z),
            };
        }
        Ok(current)
    }

    /// Classifies `i` using its `num_digits`-bit encoding.
    pub fn predict(&self, i: u64, num_digits: usize) -> Result<FizzBuzzClass> {
        let input: Vec<f32> = encode_binary(i, num_digits).into_iter().map(|b| b as f32).collect();
        let output = self.invoke(&input)?;
        let best = output.iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or(0);
        FizzBuzzClass::from_index(best).ok_or(Error::DimensionMismatch {
            expected: FizzBuzzClass::COUNT,
            actual: output.len(),
        })
    }
}

fn softmax_f32(z: &[f32]) -> Vec<f32> {
    let max = z.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = z.iter().map(|x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::format::CompactLayer;

    fn identity_like() -> CompactModel {
        // 2 → 2 tanh with weights 0.5·I, then 2 → 2 softmax with I.
        CompactModel {
            layers: vec![
                CompactLayer {
                    input_size: 2,
                    output_size: 2,
                    activation: ActivationFunction::Tanh,
                    scale: 0.5 / 127.0,
                    weights: vec![127, 0, 0, 127],
                    biases: vec![0.0, 0.0],
                },
                CompactLayer {
                    input_size: 2,
                    output_size: 2,
                    activation: ActivationFunction::Softmax,
                    scale: 1.0 / 127.0,
                    weights: vec![127, 0, 0, 127],
                    biases: vec![0.0, 0.0],
                },
            ],
            output_labels: vec!["left".into(), "right".into()],
        }
    }

    #[test]
    fn invoke_runs_every_layer() {
        let interp = Interpreter::new(identity_like());
        assert_eq!((interp.input_size(), interp.output_size()), (2, 2));
        let out = interp.invoke(&[0.0, 2.0]).unwrap();
        let h = 1.0f32.tanh();
        let expected_right = h.exp() / (1.0 + h.exp());
        assert!((out[1] - expected_right).abs() < 1e-5);
        assert!((out.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        assert_eq!(interp.output_labels(), ["left", "right"]);
    }

    #[test]
    fn wrong_input_length_is_rejected() {
        let interp = Interpreter::new(identity_like());
        assert!(matches!(
            interp.invoke(&[1.0, 2.0, 3.0]),
            Err(Error::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn disconnected_layers_fail_instead_of_panicking() {
        let mut model = identity_like();
        model.layers[1].input_size = 1;
        model.layers[1].weights = vec![127, 0];

        assert!(Interpreter::from_bytes(&model.to_bytes().unwrap()).is_err());

        let interp = Interpreter::new(model);
        assert!(matches!(
            interp.invoke(&[1.0, 1.0]),
            Err(Error::DimensionMismatch { expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn round_trips_through_bytes() {
        let bytes = identity_like().to_bytes().unwrap();
        let interp = Interpreter::from_bytes(&bytes).unwrap();
        assert_eq!(interp.invoke(&[1.0, 0.0]).unwrap().len(), 2);
    }
}
