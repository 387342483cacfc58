pub mod dataset;
pub mod fizzbuzz;

pub use dataset::Dataset;
pub use fizzbuzz::{FizzBuzzClass, fizzbuzz, encode_binary, decode_binary, argmax};
