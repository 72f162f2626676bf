//! Most-frequent keyword extraction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::text::words;

/// Function words never considered as keywords.
pub const STOPWORDS: [&str; 12] = [
    "the", "and", "a", "an", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Tokens this short or shorter are never keywords.
const MAX_IGNORED_LEN: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    /// Lower-cased term; empty when no token qualified.
    pub term: String,
    pub count: usize,
}

impl Keyword {
    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }
}

/// Most frequent lower-cased token of `text` that is neither a stopword nor
/// two characters or shorter. Ties go to the token seen first.
pub fn extract_keyword(text: &str) -> Keyword {
    let lowered = text.to_lowercase();
    // Counts in first-seen order; `slots` maps a token to its position.
    let mut tally: Vec<(&str, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for token in words(&lowered) {
        if token.chars().count() <= MAX_IGNORED_LEN || STOPWORDS.contains(&token) {
            continue;
        }
        match slots.get(token) {
            Some(&slot) => tally[slot].1 += 1,
            None => {
                slots.insert(token, tally.len());
                tally.push((token, 1));
            }
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for &(token, n) in &tally {
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((token, n));
        }
    }

    best.map(|(term, count)| Keyword { term: term.to_string(), count })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_frequent_keyword() {
        let kw = extract_keyword("Solar panels convert light. Solar farms scale. Panels age.");
        assert_eq!(kw, Keyword { term: "solar".to_string(), count: 2 });
    }

    #[test]
    fn test_first_seen_wins_ties() {
        let kw = extract_keyword("beta alpha alpha beta gamma");
        assert_eq!(kw.term, "beta");
        assert_eq!(kw.count, 2);
    }

    #[test]
    fn test_case_folding() {
        let kw = extract_keyword("RPA rpa Rpa automation");
        assert_eq!(kw, Keyword { term: "rpa".to_string(), count: 3 });
    }

    #[test]
    fn test_stopwords_and_short_tokens_yield_empty() {
        let kw = extract_keyword("a an of to AI is");
        assert!(kw.is_empty());
        assert_eq!(kw.count, 0);
        assert!(extract_keyword("").is_empty());
    }

    #[test]
    fn test_many_distinct_tokens() {
        let mut text: String = (0..50_000).map(|i| format!("tok{} ", i)).collect();
        text.push_str("tok49999 tok7 tok49999");
        let kw = extract_keyword(&text);
        assert_eq!(kw, Keyword { term: "tok49999".to_string(), count: 3 });
    }

    #[test]
    fn test_stopword_longer_than_two_is_skipped() {
        let kw = extract_keyword("the the the and and with data");
        assert_eq!(kw.term, "data");
    }
}
