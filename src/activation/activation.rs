use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    /// Bounded, saturating; used on the hidden layer.
    Tanh,
    /// Softmax is a vector-valued activation and is only valid on the output
    /// layer, where the trainer pairs it with cross-entropy.
    Softmax,
}

impl ActivationFunction {
    /// Applies the activation to a whole pre-activation row.
    pub fn apply(&self, z: &[f64]) -> Vec<f64> {
        match self {
            ActivationFunction::Tanh => z.iter().map(|x| x.tanh()).collect(),
            ActivationFunction::Softmax => softmax(z),
        }
    }

    /// Element-wise derivative with respect to the pre-activation `x`.
    ///
    /// For `Softmax`, the layer pairs it with cross-entropy and the combined
    /// gradient is `predicted - expected` (already computed by
    /// `CrossEntropyLoss::derivative()`).  Returning `1.0` here passes that
    /// delta through unchanged without double-applying the Jacobian.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::Softmax => 1.0,
        }
    }
}

/// Numerically stable softmax: shifts by the max logit before exponentiating.
pub fn softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = z.iter().map(|x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_is_a_distribution() {
        let p = softmax(&[1.0, 2.0, 3.0, 1000.0]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(p.iter().all(|&x| x >= 0.0));
        assert!(p[3] > 0.999);
    }

    #[test]
    fn tanh_derivative_peaks_at_zero() {
        let act = ActivationFunction::Tanh;
        assert_eq!(act.derivative(0.0), 1.0);
        assert!(act.derivative(3.0) < 0.01);
        assert_eq!(act.apply(&[0.0]), vec![0.0]);
    }
}
