// Trains the FizzBuzz network and writes fizzbuzz_model.json and
// fizzbuzz_model.fbnn to the working directory. Takes no arguments.
// These stand in for the usual fizzbuzz_model.h5 / fizzbuzz_model.tflite pair:
// the full-precision model is serde JSON and the compact model is the int8
// format described in src/export/format.rs, not HDF5 or TFLite.
// Log verbosity follows RUST_LOG (default: fizzbuzz_nn=info).
use anyhow::{Context, Result};
use fizzbuzz_nn::{pipeline, PipelineConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fizzbuzz_nn=info".parse()?),
        )
        .init();

    let config = PipelineConfig::default();
    let report = pipeline::run(&config).context("fizzbuzz training pipeline failed")?;

    println!(
        "loss {:.6}, accuracy {:.2}%, wrote {} and {} ({} bytes)",
        report.final_loss,
        report.final_accuracy * 100.0,
        report.model_path.display(),
        report.compact_path.display(),
        report.compact_bytes,
    );
    Ok(())
}
