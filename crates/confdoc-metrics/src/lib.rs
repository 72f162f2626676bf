//! confdoc-metrics - Text analytics for validated papers.
//! - Word, character and sentence counting
//! - Keyword extraction and density
//! - Weighted complexity score
//! - Per-paper metrics engine

pub mod text;
pub mod keywords;
pub mod weights;
pub mod engine;

pub use engine::{compute_metrics, ratio, ComplexityBreakdown, MetricsEngine, MetricsResult, MetricsSettings};
pub use keywords::{extract_keyword, Keyword, STOPWORDS};
pub use text::{count_chars_no_spaces, count_sentences, count_words, keyword_density};
pub use weights::ComplexityWeights;
