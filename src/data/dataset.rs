use std::ops::RangeInclusive;

use crate::data::fizzbuzz::{encode_binary, fizzbuzz};

/// Fully materialized training set: binary features paired with one-hot labels.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub inputs: Vec<Vec<f64>>,
    pub labels: Vec<Vec<f64>>,
}

impl Dataset {
    /// One example per integer in `range`, in order.
    pub fn fizzbuzz(range: RangeInclusive<u64>, num_digits: usize) -> Dataset {
        let inputs = range.clone().map(|i| encode_binary(i, num_digits)).collect();
        let labels = range.map(fizzbuzz).collect();
        Dataset { inputs, labels }
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fizzbuzz::{NUM_DIGITS, TRAIN_RANGE};

    #[test]
    fn fizzbuzz_dataset_shape() {
        let ds = Dataset::fizzbuzz(TRAIN_RANGE, NUM_DIGITS);
        assert_eq!(ds.len(), 100);
        assert!(!ds.is_empty());
        assert!(ds.inputs.iter().all(|x| x.len() == 7));
        assert!(ds.labels.iter().all(|y| y.len() == 4 && y.iter().sum::<f64>() == 1.0));
        // First example is 1 = 0b0000001.
        assert_eq!(ds.inputs[0], vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(ds.labels[14], vec![0.0, 0.0, 0.0, 1.0]);
    }
}
