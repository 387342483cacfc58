// Loads fizzbuzz_model.fbnn from the working directory and prints FizzBuzz
// for 1..=100 using the model's predictions. Takes no arguments.
use anyhow::{Context, Result};
use fizzbuzz_nn::config::COMPACT_MODEL_FILE;
use fizzbuzz_nn::data::fizzbuzz::{NUM_DIGITS, TRAIN_RANGE};
use fizzbuzz_nn::{FizzBuzzClass, Interpreter};
use tracing::warn;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fizzbuzz=info".parse()?),
        )
        .init();

    let interpreter = Interpreter::from_file(COMPACT_MODEL_FILE)
        .with_context(|| format!("cannot load {COMPACT_MODEL_FILE}; run fizzbuzz-nn first"))?;

    let mut mistakes = 0;
    for i in TRAIN_RANGE {
        let predicted = interpreter.predict(i, NUM_DIGITS)?;
        if predicted != FizzBuzzClass::of(i) {
            mistakes += 1;
        }
        println!("{}", predicted.render(i));
    }

    if mistakes > 0 {
        warn!(mistakes, "model disagrees with FizzBuzz");
    }
    Ok(())
}
