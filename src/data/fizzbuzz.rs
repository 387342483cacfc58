use std::ops::RangeInclusive;

use serde::{Serialize, Deserialize};

/// Width of the binary input encoding; enough for 1..=127.
pub const NUM_DIGITS: usize = 7;

/// The integers the model is trained on.
pub const TRAIN_RANGE: RangeInclusive<u64> = 1..=100;

/// The four FizzBuzz categories, in one-hot / output-neuron order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FizzBuzzClass {
    None,
    Fizz,
    Buzz,
    FizzBuzz,
}

impl FizzBuzzClass {
    pub const COUNT: usize = 4;
    pub const ALL: [FizzBuzzClass; 4] = [
        FizzBuzzClass::None,
        FizzBuzzClass::Fizz,
        FizzBuzzClass::Buzz,
        FizzBuzzClass::FizzBuzz,
    ];

    /// Classifies `i`, testing 15 before 5 before 3.
    pub fn of(i: u64) -> FizzBuzzClass {
        if i % 15 == 0 {
            FizzBuzzClass::FizzBuzz
        } else if i % 5 == 0 {
            FizzBuzzClass::Buzz
        } else if i % 3 == 0 {
            FizzBuzzClass::Fizz
        } else {
            FizzBuzzClass::None
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<FizzBuzzClass> {
        FizzBuzzClass::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            FizzBuzzClass::None => "none",
            FizzBuzzClass::Fizz => "fizz",
            FizzBuzzClass::Buzz => "buzz",
            FizzBuzzClass::FizzBuzz => "fizzbuzz",
        }
    }

    /// The line FizzBuzz prints for `i` when it falls in this class.
    pub fn render(self, i: u64) -> String {
        match self {
            FizzBuzzClass::None => i.to_string(),
            FizzBuzzClass::Fizz => "Fizz".to_string(),
            FizzBuzzClass::Buzz => "Buzz".to_string(),
            FizzBuzzClass::FizzBuzz => "FizzBuzz".to_string(),
        }
    }

    pub fn one_hot(self) -> Vec<f64> {
        let mut v = vec![0.0; FizzBuzzClass::COUNT];
        v[self.index()] = 1.0;
        v
    }
}

/// One-hot label for `i`: none, fizz, buzz, fizzbuzz.
pub fn fizzbuzz(i: u64) -> Vec<f64> {
    FizzBuzzClass::of(i).one_hot()
}

/// LSB-first binary encoding of `i` in `num_digits` bits.
/// Bits above `num_digits` are dropped.
pub fn encode_binary(i: u64, num_digits: usize) -> Vec<f64> {
    (0..num_digits)
        .map(|d| if d < 64 { ((i >> d) & 1) as f64 } else { 0.0 })
        .collect()
}

/// Inverse of `encode_binary` for values that fit in the encoded width.
/// Any non-zero entry counts as a set bit.
pub fn decode_binary(bits: &[f64]) -> u64 {
    bits.iter()
        .take(64)
        .enumerate()
        .filter(|(_, &b)| b != 0.0)
        .fold(0, |acc, (d, _)| acc | (1u64 << d))
}

/// Index of the maximum element in a slice.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
