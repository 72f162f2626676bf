//! Pure text-counting primitives.
//!
//! A word is a maximal run of word characters (Unicode letters, digits,
//! underscore). Sentences end at `.`, `!` or `?` followed by whitespace or
//! the end of the text.

use std::sync::OnceLock;

use regex::Regex;

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\b\w+\b").expect("word pattern compiles"))
}

fn sentence_end_regex() -> &'static Regex {
    static SENTENCE_END: OnceLock<Regex> = OnceLock::new();
    SENTENCE_END.get_or_init(|| Regex::new(r"[.!?](?:\s|$)").expect("sentence pattern compiles"))
}

/// Iterate over the words of `text` in order.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    word_regex().find_iter(text).map(|m| m.as_str())
}

pub fn count_words(text: &str) -> usize {
    words(text).count()
}

/// Number of characters once all whitespace is removed.
pub fn count_chars_no_spaces(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Number of non-empty fragments left after splitting on sentence terminators.
/// Text without any terminator is a single sentence.
pub fn count_sentences(text: &str) -> usize {
    sentence_end_regex()
        .split(text)
        .filter(|fragment| !fragment.is_empty())
        .count()
}

/// Case-insensitive occurrences of `keyword` among the words of `text`, as a
/// percentage of those words. Zero when either is empty or `text` has no words.
pub fn keyword_density(text: &str, keyword: &str) -> f64 {
    if text.is_empty() || keyword.is_empty() {
        return 0.0;
    }
    let keyword = keyword.to_lowercase();
    let (total, occurrences) = words(text).fold((0usize, 0usize), |(total, hits), word| {
        let hit = word.to_lowercase() == keyword;
        (total + 1, hits + usize::from(hit))
    });
    if total == 0 {
        return 0.0;
    }
    occurrences as f64 / total as f64 * 100.0
}
