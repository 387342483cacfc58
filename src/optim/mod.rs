pub mod adam;
pub mod sgd;

pub use adam::{Adam, AdamConfig};
pub use sgd::Sgd;

use crate::{layers::dense::Layer, math::matrix::Matrix};

/// A parameter update rule.
///
/// `grads[i]` holds the batch-averaged (weights, biases) gradients for
/// `layers[i]`; one call is one optimization step for the whole network.
pub trait Optimizer {
    fn step(&mut self, layers: &mut [Layer], grads: &[(Matrix, Matrix)]);

    fn name(&self) -> &'static str;
}
