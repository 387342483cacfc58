//! Pipeline configuration.
//!
//! There is no config file: `PipelineConfig::default()` holds the fixed values
//! the training binary runs with. The struct exists so tests can shrink the
//! run and so the effective settings can be logged in one place.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use serde::Serialize;

use crate::data::fizzbuzz::{NUM_DIGITS, TRAIN_RANGE};
use crate::optim::AdamConfig;

pub const MODEL_FILE: &str = "fizzbuzz_model.json";
pub const COMPACT_MODEL_FILE: &str = "fizzbuzz_model.fbnn";

#[derive(Debug, Clone, Serialize)]
pub struct PipelineConfig {
    /// Integers to train on.
    pub range: RangeInclusive<u64>,
    /// Width of the binary input encoding.
    pub num_digits: usize,
    /// Neurons in the tanh hidden layer.
    pub hidden: usize,
    pub epochs: usize,
    pub batch_size: usize,
    pub adam: AdamConfig,
    /// Seed for weight initialization and shuffling; `None` draws from the OS.
    pub seed: Option<u64>,
    /// Log an `info` line every this many epochs.
    pub log_every: usize,
    pub model_path: PathBuf,
    pub compact_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            range: TRAIN_RANGE,
            num_digits: NUM_DIGITS,
            hidden: 64,
            epochs: 3600,
            batch_size: 64,
            adam: AdamConfig::default(),
            seed: None,
            log_every: 100,
            model_path: PathBuf::from(MODEL_FILE),
            compact_path: PathBuf::from(COMPACT_MODEL_FILE),
        }
    }
}
