use serde::{Serialize, Deserialize};
use crate::activation::activation::ActivationFunction;
use crate::data::fizzbuzz::{FizzBuzzClass, NUM_DIGITS};
use crate::network::metadata::ModelMetadata;

/// Describes one layer in a network specification.
///
/// Fields:
/// - `size`       — number of neurons in this layer
/// - `input_size` — number of neurons feeding into this layer (i.e. the output
///                  size of the previous layer, or the raw input dimension for
///                  the first layer)
/// - `activation` — activation function applied after the linear transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: ActivationFunction,
}

/// A serializable description of a network architecture plus its metadata,
/// independent of any trained weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

impl NetworkSpec {
    /// The fixed FizzBuzz topology: `num_digits` → hidden (tanh) → 4 (softmax).
    pub fn fizzbuzz(num_digits: usize, hidden: usize) -> NetworkSpec {
        NetworkSpec {
            layers: vec![
                LayerSpec { size: hidden, input_size: num_digits, activation: ActivationFunction::Tanh },
                LayerSpec {
                    size: FizzBuzzClass::COUNT,
                    input_size: hidden,
                    activation: ActivationFunction::Softmax,
                },
            ],
            metadata: Some(ModelMetadata {
                description: Some(format!(
                    "FizzBuzz classifier over {num_digits}-bit LSB-first binary input"
                )),
                output_labels: Some(
                    FizzBuzzClass::ALL.iter().map(|c| c.label().to_string()).collect(),
                ),
            }),
        }
    }
}

impl Default for NetworkSpec {
    fn default() -> Self {
        NetworkSpec::fizzbuzz(NUM_DIGITS, 64)
    }
}
