pub mod converter;
pub mod format;
pub mod interpreter;

pub use converter::Converter;
pub use format::{CompactLayer, CompactModel};
pub use interpreter::Interpreter;

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::network::network::Network;

/// Two-stage export: save the full-precision model, read it back through the
/// converter, then write the compact model.
///
/// The compact bytes are built in memory first, so a failed conversion never
/// leaves a partial compact file behind. The full-precision file is not
/// cleaned up on failure.
pub fn export<P: AsRef<Path>, Q: AsRef<Path>>(
    network: &Network,
    model_path: P,
    compact_path: Q,
) -> Result<usize> {
    let model_path = model_path.as_ref();
    let compact_path = compact_path.as_ref();

    network.save_json(model_path)?;
    info!(path = %model_path.display(), "saved full-precision model");

    let bytes = Converter::from_model_file(model_path)?.convert()?;
    std::fs::write(compact_path, &bytes)?;
    info!(path = %compact_path.display(), bytes = bytes.len(), "wrote compact model");

    Ok(bytes.len())
}
