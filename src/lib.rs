pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod data;
pub mod export;
pub mod config;
pub mod pipeline;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{Network, NetworkSpec};
pub use loss::CrossEntropyLoss;
pub use optim::{Adam, AdamConfig, Optimizer, Sgd};
pub use train::{train_loop, TrainConfig};
pub use data::{Dataset, FizzBuzzClass};
pub use export::{Converter, Interpreter};
pub use config::PipelineConfig;
pub use error::{Error, Result};
