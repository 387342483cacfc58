//! End-to-end tests: train, save, convert, and run the compact model.

use fizzbuzz_nn::data::fizzbuzz::{encode_binary, NUM_DIGITS, TRAIN_RANGE};
use fizzbuzz_nn::data::{argmax, fizzbuzz};
use fizzbuzz_nn::export::{self, Interpreter};
use fizzbuzz_nn::network::ModelMetadata;
use fizzbuzz_nn::pipeline;
use fizzbuzz_nn::*;

fn config_in(dir: &tempfile::TempDir, epochs: usize) -> PipelineConfig {
    PipelineConfig {
        epochs,
        seed: Some(42),
        model_path: dir.path().join("fizzbuzz_model.json"),
        compact_path: dir.path().join("fizzbuzz_model.fbnn"),
        ..PipelineConfig::default()
    }
}

/// 7 → 64 → 4 network that puts 15 (0b0001111) in the fizzbuzz class.
/// Hidden unit 0 fires only when the low four bits are set and the high three are clear.
fn fifteen_detector() -> Network {
    let mut w1 = vec![vec![0.0; 64]; 7];
    for (d, row) in w1.iter_mut().enumerate() {
        row[0] = if d < 4 { 1.0 } else { -1.0 };
    }
    let mut b1 = vec![0.0; 64];
    b1[0] = -3.5;

    let mut w2 = vec![vec![0.0; 4]; 64];
    w2[0] = vec![-5.0, -5.0, -5.0, 10.0];

    Network::from_layers(
        vec![
            Layer::from_parameters(Matrix::from_data(w1), Matrix::from_data(vec![b1]), ActivationFunction::Tanh),
            Layer::from_parameters(Matrix::from_data(w2), Matrix::zeros(1, 4), ActivationFunction::Softmax),
        ],
        Some(ModelMetadata {
            description: None,
            output_labels: Some(FizzBuzzClass::ALL.iter().map(|c| c.label().to_string()).collect()),
        }),
    )
}

#[test]
fn end_to_end_scenario_labels() {
    assert_eq!(fizzbuzz(15), vec![0.0, 0.0, 0.0, 1.0]);
    assert_eq!(fizzbuzz(9), vec![0.0, 1.0, 0.0, 0.0]);
    assert_eq!(fizzbuzz(10), vec![0.0, 0.0, 1.0, 0.0]);
    assert_eq!(fizzbuzz(7), vec![1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn short_pipeline_writes_both_files_and_they_agree() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, 50);

    let (report, network) = pipeline::train_and_export(&config).unwrap();
    assert!(report.final_loss.is_finite());
    assert!(config.model_path.exists());
    assert!(config.compact_path.exists());
    assert_eq!(
        std::fs::metadata(&config.compact_path).unwrap().len() as usize,
        report.compact_bytes
    );

    let reloaded = Network::load_json(&config.model_path).unwrap();
    let interpreter = Interpreter::from_file(&config.compact_path).unwrap();
    assert_eq!(interpreter.input_size(), 7);
    assert_eq!(interpreter.output_size(), 4);
    assert_eq!(interpreter.output_labels(), ["none", "fizz", "buzz", "fizzbuzz"]);

    for i in TRAIN_RANGE {
        let features = encode_binary(i, NUM_DIGITS);

        let full = network.predict(&features);
        assert_eq!(full.len(), 4);
        assert!(full.iter().all(|&p| p >= 0.0));
        assert!((full.iter().sum::<f64>() - 1.0).abs() < 1e-9);

        let saved = reloaded.predict(&features);
        let compact = interpreter
            .invoke(&features.iter().map(|&x| x as f32).collect::<Vec<_>>())
            .unwrap();
        for ((f, s), c) in full.iter().zip(&saved).zip(&compact) {
            assert!((f - s).abs() < 1e-9);
            assert!((f - *c as f64).abs() < 0.05, "i = {i}: {full:?} vs {compact:?}");
        }
    }
}

#[test]
fn compact_model_predicts_fizzbuzz_for_fifteen() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    let compact_path = dir.path().join("model.fbnn");

    let network = fifteen_detector();
    assert_eq!(argmax(&network.predict(&encode_binary(15, NUM_DIGITS))), 3);

    export::export(&network, &model_path, &compact_path).unwrap();
    let interpreter = Interpreter::from_file(&compact_path).unwrap();

    let probs = interpreter
        .invoke(&encode_binary(15, NUM_DIGITS).iter().map(|&x| x as f32).collect::<Vec<_>>())
        .unwrap();
    assert!(probs[3] > probs[0] && probs[3] > probs[1] && probs[3] > probs[2]);
    assert_eq!(interpreter.predict(15, NUM_DIGITS).unwrap(), FizzBuzzClass::FizzBuzz);
    assert_ne!(interpreter.predict(7, NUM_DIGITS).unwrap(), FizzBuzzClass::FizzBuzz);
}

#[test]
fn failed_conversion_writes_no_compact_file() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    let compact_path = dir.path().join("model.fbnn");

    let mut network = fifteen_detector();
    network.layers[0].activator = ActivationFunction::Softmax;

    let result = export::export(&network, &model_path, &compact_path);
    assert!(matches!(result, Err(Error::UnsupportedModel(_))));
    assert!(model_path.exists());
    assert!(!compact_path.exists());
}

#[test]
fn corrupted_model_file_fails_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    std::fs::write(&model_path, b"{ not json").unwrap();

    let result = Converter::from_model_file(&model_path);
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn full_training_learns_fizzbuzz() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, 3600);

    let report = pipeline::run(&config).unwrap();
    assert!(report.final_accuracy > 0.9, "accuracy {}", report.final_accuracy);

    let interpreter = Interpreter::from_file(&config.compact_path).unwrap();
    let probs = interpreter
        .invoke(&encode_binary(15, NUM_DIGITS).iter().map(|&x| x as f32).collect::<Vec<_>>())
        .unwrap();
    assert!(probs[3] > probs[0] && probs[3] > probs[1] && probs[3] > probs[2], "{probs:?}");
    assert_eq!(interpreter.predict(15, NUM_DIGITS).unwrap(), FizzBuzzClass::FizzBuzz);
}
