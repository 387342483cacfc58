use serde::{Deserialize, Serialize};

/// Optional annotations attached to a saved Network.
/// All fields are Option<> so models saved without metadata deserialize cleanly.
/// The converter carries `output_labels` into the compact model.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ModelMetadata {
    pub description: Option<String>,
    /// Human-readable class labels for the output layer, in output order.
    pub output_labels: Option<Vec<String>>,
}
