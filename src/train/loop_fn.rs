use std::time::Instant;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::data::fizzbuzz::argmax;
use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::Optimizer;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs with categorical cross-entropy
/// and returns the mean training loss of the last epoch.
///
/// # Arguments
/// - `network`      — mutable reference to the network; modified in place
/// - `train_inputs` — training samples, each a `Vec<f64>` of length `input_size`
/// - `train_labels` — one-hot targets, same length as `train_inputs`
/// - `optimizer`    — update rule applied once per mini-batch
/// - `config`       — epochs, batch size, shuffling, progress reporting
/// - `rng`          — source for the per-epoch shuffle
///
/// Every epoch runs; loss and accuracy are reported, never acted on.
///
/// # Panics
/// Panics if `train_inputs` is empty, lengths mismatch, or `batch_size == 0`.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    train_inputs: &[Vec<f64>],
    train_labels: &[Vec<f64>],
    optimizer: &mut dyn Optimizer,
    config: &TrainConfig,
    rng: &mut R,
) -> f64 {
    assert!(!train_inputs.is_empty(), "train_inputs must not be empty");
    assert_eq!(
        train_inputs.len(),
        train_labels.len(),
        "train_inputs and train_labels must have equal length"
    );
    assert!(config.batch_size > 0, "batch_size must be at least 1");

    info!(
        epochs = config.epochs,
        batch_size = config.batch_size,
        samples = train_inputs.len(),
        optimizer = optimizer.name(),
        "training started"
    );

    let mut last_train_loss = 0.0;

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        let train_loss = run_one_epoch(
            network,
            train_inputs,
            train_labels,
            optimizer,
            config,
            rng,
        );
        last_train_loss = train_loss;

        let train_accuracy = compute_accuracy(network, train_inputs, train_labels);
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            train_accuracy,
            elapsed_ms,
        };

        if config.log_every > 0 && (epoch % config.log_every == 0 || epoch == config.epochs) {
            info!(epoch, loss = train_loss, accuracy = train_accuracy, "epoch complete");
        } else {
            debug!(epoch, loss = train_loss, accuracy = train_accuracy, "epoch complete");
        }

        if let Some(ref tx) = config.progress_tx {
            // Nobody listening is fine; training still runs every epoch.
            let _ = tx.send(stats);
        }
    }

    last_train_loss
}

/// Fraction of samples classified correctly (argmax match).
pub fn compute_accuracy(
    network: &Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
) -> f64 {
    let n = inputs.len();
    if n == 0 {
        return 0.0;
    }
    let correct = inputs.iter().zip(labels.iter())
        .filter(|(input, label)| argmax(&network.predict(input)) == argmax(label))
        .count();
    correct as f64 / n as f64
}

/// Mean cross-entropy over a dataset without touching the parameters.
pub fn compute_loss(
    network: &Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
) -> f64 {
    let n = inputs.len();
    if n == 0 {
        return 0.0;
    }
    let total: f64 = inputs.iter().zip(labels.iter())
        .map(|(input, label)| CrossEntropyLoss::loss(&network.predict(input), label))
        .sum();
    total / n as f64
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Splits one epoch's sample order into consecutive mini-batches.
/// The last batch keeps whatever is left; nothing is padded or dropped.
fn mini_batches(indices: &[usize], batch_size: usize) -> std::slice::Chunks<'_, usize> {
    indices.chunks(batch_size)
}

/// Runs one full epoch of mini-batch updates over the training data.
/// Returns the mean loss over all samples.
fn run_one_epoch<R: Rng + ?Sized>(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    optimizer: &mut dyn Optimizer,
    config: &TrainConfig,
    rng: &mut R,
) -> f64 {
    let n = inputs.len();
    let mut total_loss = 0.0;

    let mut indices: Vec<usize> = (0..n).collect();
    if config.shuffle {
        indices.shuffle(rng);
    }

    for batch in mini_batches(&indices, config.batch_size) {
        let inv_batch = 1.0 / batch.len() as f64;

        let mut acc_grads: Vec<(Matrix, Matrix)> = network.layers.iter()
            .map(|layer| (
                Matrix::zeros(layer.weights.rows, layer.weights.cols),
                Matrix::zeros(layer.biases.rows, layer.biases.cols),
            ))
            .collect();

        for &idx in batch {
            let input    = &inputs[idx];
            let expected = &labels[idx];

            let output = network.forward(input);
            total_loss += CrossEntropyLoss::loss(&output, expected);

            let mut delta = Matrix::row(&CrossEntropyLoss::derivative(&output, expected));

            // Backward pass.
            for i in (0..network.layers.len()).rev() {
                let input_for_layer = if i == 0 {
                    Matrix::row(input)
                } else {
                    network.layers[i - 1].neurons.clone()
                };

                let (w_grad, b_grad) = network.layers[i].compute_gradients(&delta, &input_for_layer);

                if i > 0 {
                    // Propagate δ_i through weights to get ∂L/∂a_{i-1}
                    delta = &b_grad * &network.layers[i].weights.transpose();
                }

                acc_grads[i].0.add_assign(&w_grad);
                acc_grads[i].1.add_assign(&b_grad);
            }
        }

        let averaged: Vec<(Matrix, Matrix)> = acc_grads.into_iter()
            .map(|(w, b)| (w.map(|x| x * inv_batch), b.map(|x| x * inv_batch)))
            .collect();
        optimizer.step(&mut network.layers, &averaged);
    }

    total_loss / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use rand::{rngs::StdRng, SeedableRng};
    use crate::data::{Dataset, fizzbuzz::{NUM_DIGITS, TRAIN_RANGE}};
    use crate::network::spec::NetworkSpec;
    use crate::optim::{Adam, Sgd};

    fn setup(seed: u64) -> (Network, Dataset, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let network = Network::from_spec(&NetworkSpec::default(), &mut rng);
        (network, Dataset::fizzbuzz(TRAIN_RANGE, NUM_DIGITS), rng)
    }

    #[test]
    fn adam_reduces_loss() {
        let (mut network, ds, mut rng) = setup(11);
        let before = compute_loss(&network, &ds.inputs, &ds.labels);

        let mut adam = Adam::default();
        let config = TrainConfig::new(300, 64);
        train_loop(&mut network, &ds.inputs, &ds.labels, &mut adam, &config, &mut rng);

        let after = compute_loss(&network, &ds.inputs, &ds.labels);
        assert!(after < before, "loss went from {before} to {after}");
        // Two batches (64 + 36) per epoch.
        assert_eq!(adam.steps(), 600);
    }

    #[test]
    fn sgd_reduces_loss() {
        let (mut network, ds, mut rng) = setup(12);
        let before = compute_loss(&network, &ds.inputs, &ds.labels);

        let mut sgd = Sgd::new(0.1);
        let config = TrainConfig::new(100, 64);
        train_loop(&mut network, &ds.inputs, &ds.labels, &mut sgd, &config, &mut rng);

        assert!(compute_loss(&network, &ds.inputs, &ds.labels) < before);
    }

    #[test]
    fn every_epoch_is_reported_even_without_listener() {
        let (mut network, ds, mut rng) = setup(13);
        let (tx, rx) = mpsc::channel();
        let mut config = TrainConfig::new(5, 64);
        config.progress_tx = Some(tx);

        let mut adam = Adam::default();
        train_loop(&mut network, &ds.inputs, &ds.labels, &mut adam, &config, &mut rng);
        let stats: Vec<EpochStats> = rx.try_iter().collect();
        assert_eq!(stats.iter().map(|s| s.epoch).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert!(stats.iter().all(|s| s.total_epochs == 5 && (0.0..=1.0).contains(&s.train_accuracy)));

        // Dropped receiver: the loop still completes all epochs.
        let (tx, rx) = mpsc::channel();
        drop(rx);
        config.progress_tx = Some(tx);
        let mut adam = Adam::default();
        train_loop(&mut network, &ds.inputs, &ds.labels, &mut adam, &config, &mut rng);
        assert_eq!(adam.steps(), 10);
    }

    /// Counts steps and checks every update carries one gradient pair per layer.
    struct CountingOptimizer {
        steps: usize,
    }

    impl Optimizer for CountingOptimizer {
        fn step(&mut self, layers: &mut [crate::layers::dense::Layer], grads: &[(Matrix, Matrix)]) {
            assert_eq!(layers.len(), grads.len());
            self.steps += 1;
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    #[test]
    fn hundred_samples_split_into_64_and_36() {
        let indices: Vec<usize> = (0..100).collect();
        let sizes: Vec<usize> = mini_batches(&indices, 64).map(|b| b.len()).collect();
        assert_eq!(sizes, vec![64, 36]);

        let flattened: Vec<usize> = mini_batches(&indices, 64).flatten().copied().collect();
        assert_eq!(flattened, indices);
    }

    #[test]
    fn one_update_per_mini_batch() {
        let (mut network, ds, mut rng) = setup(15);
        let mut counter = CountingOptimizer { steps: 0 };
        let config = TrainConfig::new(3, 64);
        train_loop(&mut network, &ds.inputs, &ds.labels, &mut counter, &config, &mut rng);
        assert_eq!(counter.steps, 3 * 2);
    }

    #[test]
    #[should_panic(expected = "batch_size must be at least 1")]
    fn zero_batch_size_panics() {
        let (mut network, ds, mut rng) = setup(14);
        let config = TrainConfig::new(1, 0);
        train_loop(&mut network, &ds.inputs, &ds.labels, &mut Adam::default(), &config, &mut rng);
    }
}
