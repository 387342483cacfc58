use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, layers::dense::Layer, optim::Optimizer};

/// Adam hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdamConfig {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
}

impl Default for AdamConfig {
    fn default() -> Self {
        AdamConfig { learning_rate: 0.001, beta1: 0.9, beta2: 0.999, epsilon: 1e-7 }
    }
}

/// First and second moment estimates for one layer.
struct Moments {
    m_w: Matrix,
    v_w: Matrix,
    m_b: Matrix,
    v_b: Matrix,
}

impl Moments {
    fn for_layer(layer: &Layer) -> Moments {
        let (wr, wc) = (layer.weights.rows, layer.weights.cols);
        let (br, bc) = (layer.biases.rows, layer.biases.cols);
        Moments {
            m_w: Matrix::zeros(wr, wc),
            v_w: Matrix::zeros(wr, wc),
            m_b: Matrix::zeros(br, bc),
            v_b: Matrix::zeros(br, bc),
        }
    }
}

/// Adam with bias-corrected step size:
///   lr_t = lr · sqrt(1 - β2^t) / (1 - β1^t)
///   θ   -= lr_t · m / (sqrt(v) + ε)
pub struct Adam {
    pub config: AdamConfig,
    t: u64,
    moments: Vec<Moments>,
}

impl Adam {
    pub fn new(config: AdamConfig) -> Adam {
        Adam { config, t: 0, moments: Vec::new() }
    }

    /// Number of updates applied so far.
    pub fn steps(&self) -> u64 {
        self.t
    }
}

impl Default for Adam {
    fn default() -> Self {
        Adam::new(AdamConfig::default())
    }
}

impl Optimizer for Adam {
    fn step(&mut self, layers: &mut [Layer], grads: &[(Matrix, Matrix)]) {
        if self.moments.len() != layers.len() {
            self.moments = layers.iter().map(Moments::for_layer).collect();
        }
        self.t += 1;

        let AdamConfig { learning_rate, beta1, beta2, epsilon } = self.config;
        let t = self.t as i32;
        let lr_t = learning_rate * (1.0 - beta2.powi(t)).sqrt() / (1.0 - beta1.powi(t));

        for ((layer, (w_grad, b_grad)), moments) in
            layers.iter_mut().zip(grads).zip(self.moments.iter_mut())
        {
            let w_step = update_moments(&mut moments.m_w, &mut moments.v_w, w_grad, beta1, beta2, lr_t, epsilon);
            let b_step = update_moments(&mut moments.m_b, &mut moments.v_b, b_grad, beta1, beta2, lr_t, epsilon);
            layer.apply_gradients(&w_step, &b_step);
        }
    }

    fn name(&self) -> &'static str {
        "adam"
    }
}

/// Folds `grad` into the running moments and returns the parameter step.
fn update_moments(
    m: &mut Matrix,
    v: &mut Matrix,
    grad: &Matrix,
    beta1: f64,
    beta2: f64,
    lr_t: f64,
    epsilon: f64,
) -> Matrix {
    let mut step = Matrix::zeros(grad.rows, grad.cols);
    for i in 0..grad.rows {
        for j in 0..grad.cols {
            let g = grad.data[i][j];
            let m_ij = beta1 * m.data[i][j] + (1.0 - beta1) * g;
            let v_ij = beta2 * v.data[i][j] + (1.0 - beta2) * g * g;
            m.data[i][j] = m_ij;
            v.data[i][j] = v_ij;
            step.data[i][j] = lr_t * m_ij / (v_ij.sqrt() + epsilon);
        }
    }
    step
}
