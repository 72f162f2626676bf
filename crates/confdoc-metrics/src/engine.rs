//! Per-paper metrics computation.
//!
//! Every ratio uses `ratio`, which yields 0 for a zero denominator instead
//! of failing. The renderer relies on the same helper so narrated
//! intermediate values always match the stored results.

use serde::{Deserialize, Serialize};

use confdoc_common::DocumentRecord;

use crate::keywords::extract_keyword;
use crate::text::{count_chars_no_spaces, count_sentences, count_words, keyword_density};
use crate::weights::ComplexityWeights;

/// Constants the metrics are computed with. Defaults are the standard
/// reading speed and complexity normalisers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    /// Reading speed used for the reading-time estimate.
    pub words_per_minute: f64,
    /// Divisor normalising the total word count.
    pub word_count_scale: f64,
    /// Divisor normalising the average sentence length.
    pub sentence_length_scale: f64,
    /// Divisor normalising the abstract-to-content ratio (in %).
    pub abstract_ratio_scale: f64,
    pub weights: ComplexityWeights,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            words_per_minute: 200.0,
            word_count_scale: 1000.0,
            sentence_length_scale: 20.0,
            abstract_ratio_scale: 20.0,
            weights: ComplexityWeights::default(),
        }
    }
}

/// `numerator / denominator`, or 0 when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Inputs and result of the complexity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityBreakdown {
    pub word_count_scale: f64,
    pub sentence_length_scale: f64,
    pub abstract_ratio_scale: f64,
    pub weights: ComplexityWeights,
    pub normalized_word_count: f64,
    pub normalized_sentence_length: f64,
    pub normalized_abstract_ratio: f64,
    pub score: f64,
}

impl ComplexityBreakdown {
    pub fn normalized(&self) -> [f64; 3] {
        [
            self.normalized_word_count,
            self.normalized_sentence_length,
            self.normalized_abstract_ratio,
        ]
    }

    /// Each normalised component multiplied by its weight.
    pub fn weighted_terms(&self) -> [f64; 3] {
        let w = self.weights.as_array();
        let n = self.normalized();
        [n[0] * w[0], n[1] * w[1], n[2] * w[2]]
    }
}

/// Full metric set for one paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub abstract_words: usize,
    pub content_words: usize,
    pub total_words: usize,
    /// Abstract words as a percentage of content words.
    pub abstract_content_ratio: f64,
    /// Non-whitespace characters per word over abstract and content.
    pub avg_word_length: f64,
    pub abstract_sentences: usize,
    pub content_sentences: usize,
    pub total_sentences: usize,
    pub avg_sentence_length: f64,
    pub words_per_minute: f64,
    /// Estimated reading time in minutes.
    pub reading_time: f64,
    /// Most frequent content keyword; empty when none qualified.
    pub keyword: String,
    pub keyword_count: usize,
    /// Keyword occurrences as a percentage of all words (abstract + content).
    pub keyword_density: f64,
    /// Keyword density within the content alone.
    pub content_keyword_density: f64,
    pub complexity: ComplexityBreakdown,
}

#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    settings: MetricsSettings,
}

impl MetricsEngine {
    pub fn new(settings: MetricsSettings) -> Self {
        Self { settings }
    }

    /// Compute every metric for a validated paper.
    pub fn compute(&self, record: &DocumentRecord) -> MetricsResult {
        let s = &self.settings;
        let abstract_text = record.abstract_text.as_str();
        let content = record.content.as_str();

        let abstract_words = count_words(abstract_text);
        let content_words = count_words(content);
        let total_words = abstract_words + content_words;

        let abstract_content_ratio = ratio(abstract_words as f64, content_words as f64) * 100.0;

        let total_chars = count_chars_no_spaces(abstract_text) + count_chars_no_spaces(content);
        let avg_word_length = ratio(total_chars as f64, total_words as f64);

        let abstract_sentences = count_sentences(abstract_text);
        let content_sentences = count_sentences(content);
        let total_sentences = abstract_sentences + content_sentences;
        let avg_sentence_length = ratio(total_words as f64, total_sentences as f64);

        let reading_time = ratio(total_words as f64, s.words_per_minute);

        let keyword = extract_keyword(content);
        let keyword_density_value = ratio(keyword.count as f64, total_words as f64) * 100.0;
        let content_keyword_density = keyword_density(content, &keyword.term);

        let normalized_word_count = ratio(total_words as f64, s.word_count_scale);
        let normalized_sentence_length = ratio(avg_sentence_length, s.sentence_length_scale);
        let normalized_abstract_ratio = ratio(abstract_content_ratio, s.abstract_ratio_scale);
        let score = s.weights.weighted_sum([
            normalized_word_count,
            normalized_sentence_length,
            normalized_abstract_ratio,
        ]);

        MetricsResult {
            abstract_words,
            content_words,
            total_words,
            abstract_content_ratio,
            avg_word_length,
            abstract_sentences,
            content_sentences,
            total_sentences,
            avg_sentence_length,
            words_per_minute: s.words_per_minute,
            reading_time,
            keyword: keyword.term,
            keyword_count: keyword.count,
            keyword_density: keyword_density_value,
            content_keyword_density,
            complexity: ComplexityBreakdown {
                word_count_scale: s.word_count_scale,
                sentence_length_scale: s.sentence_length_scale,
                abstract_ratio_scale: s.abstract_ratio_scale,
                weights: s.weights,
                normalized_word_count,
                normalized_sentence_length,
                normalized_abstract_ratio,
                score,
            },
        }
    }
}

/// Compute metrics with the default settings.
pub fn compute_metrics(record: &DocumentRecord) -> MetricsResult {
    MetricsEngine::default().compute(record)
}
