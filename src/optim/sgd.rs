use crate::{math::matrix::Matrix, layers::dense::Layer, optim::Optimizer};

pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, layers: &mut [Layer], grads: &[(Matrix, Matrix)]) {
        let lr = self.learning_rate;
        for (layer, (w_grad, b_grad)) in layers.iter_mut().zip(grads) {
            layer.apply_gradients(&w_grad.map(|g| g * lr), &b_grad.map(|g| g * lr));
        }
    }

    fn name(&self) -> &'static str {
        "sgd"
    }
}
