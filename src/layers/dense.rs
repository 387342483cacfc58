use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// Fully-connected layer: `a = f(x · W + b)`.
///
/// `weights` has shape (input_size, size) and `biases` shape (1, size).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer{
    pub size: usize,
    pub input_size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction,
    // Forward-pass cache for backprop; never persisted.
    #[serde(skip)]
    pub neurons: Matrix,
    #[serde(skip)]
    pre_neurons: Matrix,
}

impl Layer {
    /// Glorot-uniform weights, zero biases.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        Layer::from_parameters(
            Matrix::glorot_uniform(input_size, size, rng),
            Matrix::zeros(1, size),
            activation,
        )
    }

    /// Builds a layer around explicit parameters; shapes are taken from `weights`.
    pub fn from_parameters(weights: Matrix, biases: Matrix, activation: ActivationFunction) -> Layer {
        assert_eq!(biases.rows, 1, "biases must be a single row");
        assert_eq!(biases.cols, weights.cols, "one bias per output neuron");
        Layer {
            size: weights.cols,
            input_size: weights.rows,
            neurons: Matrix::zeros(1, weights.cols),
            pre_neurons: Matrix::zeros(1, weights.cols),
            weights,
            biases,
            activator: activation,
        }
    }

    /// Stateless forward pass.
    pub fn activate(&self, input: &[f64]) -> Vec<f64> {
        let z = &(&Matrix::row(input) * &self.weights) + &self.biases;
        self.activator.apply(&z.data[0])
    }

    /// Forward pass that remembers z and a for the backward pass.
    pub fn feed_from(&mut self, input: &[f64]) -> Vec<f64> {
        let z = &(&Matrix::row(input) * &self.weights) + &self.biases;
        let a = self.activator.apply(&z.data[0]);
        self.pre_neurons = z;
        self.neurons = Matrix::row(&a);
        a
    }

    /// Computes gradient adjustments. Returns (weights_grad, biases_grad).
    /// `next_layer_delta` is ∂L/∂a for this layer (error in activation space).
    pub fn compute_gradients(
        &self,
        next_layer_delta: &Matrix,
        inputs: &Matrix,
    ) -> (Matrix, Matrix) {
        // Use pre-activation z so that derivative(z) = σ'(z) is computed correctly
        let act_derivative = self.pre_neurons.map(|x| self.activator.derivative(x));
        let layer_delta = next_layer_delta.hadamard(&act_derivative);

        let weights_adjustment = &inputs.transpose() * &layer_delta;

        (weights_adjustment, layer_delta)
    }

    /// Subtracts already-scaled updates from the parameters.
    pub fn apply_gradients(&mut self, weights_step: &Matrix, biases_step: &Matrix) {
        self.weights = &self.weights - weights_step;
        self.biases = &self.biases - biases_step;
    }

    pub fn parameter_count(&self) -> usize {
        self.weights.rows * self.weights.cols + self.biases.cols
    }
}
