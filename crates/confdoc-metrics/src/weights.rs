//! Weight vector for the complexity score.

use serde::{Deserialize, Serialize};

/// The 3-component weight vector applied to the normalised metrics.
/// Weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityWeights {
    /// Normalised total word count
    pub word_count: f64,
    /// Normalised average sentence length
    pub sentence_length: f64,
    /// Normalised abstract-to-content ratio
    pub abstract_ratio: f64,
}

impl Default for ComplexityWeights {
    fn default() -> Self {
        Self {
            word_count:      0.3,
            sentence_length: 0.4,
            abstract_ratio:  0.3,
        }
    }
}

impl ComplexityWeights {
    fn sum(&self) -> f64 {
        self.word_count + self.sentence_length + self.abstract_ratio
    }

    /// Validate that all weights sum to ~1.0 and none is negative.
    pub fn validate(&self) -> bool {
        self.as_array().iter().all(|w| *w >= 0.0) && (self.sum() - 1.0).abs() < 1e-6
    }

    /// Convert to array for iteration.
    pub fn as_array(&self) -> [f64; 3] {
        [self.word_count, self.sentence_length, self.abstract_ratio]
    }

    /// Weighted sum Σ(w_i × n_i) of already-normalised components.
    pub fn weighted_sum(&self, normalised: [f64; 3]) -> f64 {
        normalised
            .iter()
            .zip(self.as_array().iter())
            .map(|(n, w)| n * w)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = ComplexityWeights::default();
        assert!(w.validate(), "Default weights must sum to 1.0");
    }

    #[test]
    fn test_negative_weight_is_invalid() {
        let w = ComplexityWeights { word_count: -0.2, sentence_length: 0.9, abstract_ratio: 0.3 };
        assert!(!w.validate());
    }

    #[test]
    fn test_weighted_sum() {
        let w = ComplexityWeights::default();
        let s = w.weighted_sum([1.0, 1.0, 1.0]);
        assert!((s - 1.0).abs() < 1e-12);
        let s = w.weighted_sum([0.008, 0.1333, 1.6667]);
        assert!((s - (0.008 * 0.3 + 0.1333 * 0.4 + 1.6667 * 0.3)).abs() < 1e-12);
    }
}
