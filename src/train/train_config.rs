use std::sync::mpsc;
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`      — total number of full passes over the training data;
///                   always run to completion
/// - `batch_size`  — samples per mini-batch; the last batch of an epoch may
///                   be smaller
/// - `shuffle`     — reshuffle sample order at the start of every epoch
/// - `log_every`   — emit an `info` log line every this many epochs
///                   (every epoch is logged at `debug`)
/// - `progress_tx` — optional channel sender; one `EpochStats` is sent per
///                   completed epoch.  A dropped receiver is ignored.
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub shuffle: bool,
    pub log_every: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with shuffling on and no progress channel.
    pub fn new(epochs: usize, batch_size: usize) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            shuffle: true,
            log_every: 100,
            progress_tx: None,
        }
    }
}
