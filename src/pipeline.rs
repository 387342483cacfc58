use std::path::PathBuf;

use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::config::PipelineConfig;
use crate::data::Dataset;
use crate::error::Result;
use crate::export;
use crate::network::{Network, NetworkSpec};
use crate::optim::Adam;
use crate::train::{compute_accuracy, train_loop, TrainConfig};

/// What a pipeline run produced.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub final_loss: f64,
    pub final_accuracy: f64,
    pub compact_bytes: usize,
    pub model_path: PathBuf,
    pub compact_path: PathBuf,
}

/// Builds the data, trains the network, and writes both model files.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport> {
    let (report, _) = train_and_export(config)?;
    Ok(report)
}

/// Same as `run`, also handing back the trained network.
pub fn train_and_export(config: &PipelineConfig) -> Result<(PipelineReport, Network)> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let dataset = Dataset::fizzbuzz(config.range.clone(), config.num_digits);
    info!(examples = dataset.len(), num_digits = config.num_digits, "built dataset");

    let spec = NetworkSpec::fizzbuzz(config.num_digits, config.hidden);
    let mut network = Network::from_spec(&spec, &mut rng);
    info!(parameters = network.parameter_count(), "initialized network");

    let mut optimizer = Adam::new(config.adam);
    let mut train_config = TrainConfig::new(config.epochs, config.batch_size);
    train_config.log_every = config.log_every;

    let final_loss = train_loop(
        &mut network,
        &dataset.inputs,
        &dataset.labels,
        &mut optimizer,
        &train_config,
        &mut rng,
    );
    let final_accuracy = compute_accuracy(&network, &dataset.inputs, &dataset.labels);
    info!(loss = final_loss, accuracy = final_accuracy, "training finished");

    let compact_bytes = export::export(&network, &config.model_path, &config.compact_path)?;

    let report = PipelineReport {
        final_loss,
        final_accuracy,
        compact_bytes,
        model_path: config.model_path.clone(),
        compact_path: config.compact_path.clone(),
    };
    Ok((report, network))
}
