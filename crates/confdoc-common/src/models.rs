//! Paper records as they come out of the parser and as the metrics pipeline sees them.
//!
//! `RawPaper` keeps the "absent vs. present but blank" distinction the schema
//! validator needs. Once a collection has passed validation it is converted
//! into `DocumentRecord`s, whose fields are guaranteed to carry text.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ConfdocError, Result};

/// The five fields every paper must carry.
///
/// Declaration order is the order fields are checked and reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Title,
    Authors,
    Abstract,
    Content,
    Biography,
}

impl RequiredField {
    pub const ALL: [RequiredField; 5] = [
        RequiredField::Title,
        RequiredField::Authors,
        RequiredField::Abstract,
        RequiredField::Content,
        RequiredField::Biography,
    ];

    /// Logical field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::Title     => "title",
            RequiredField::Authors   => "authors",
            RequiredField::Abstract  => "abstract",
            RequiredField::Content   => "content",
            RequiredField::Biography => "biography",
        }
    }

    /// Element name of the field in the input markup.
    pub fn tag(&self) -> &'static str {
        match self {
            RequiredField::Title     => "paper_title",
            RequiredField::Authors   => "authors",
            RequiredField::Abstract  => "abstract",
            RequiredField::Content   => "content",
            RequiredField::Biography => "author_biography",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        RequiredField::ALL.into_iter().find(|f| f.tag() == tag)
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A paper exactly as found in the input.
///
/// `None` means the element was absent; `Some("")` means it was present
/// without text. `authors` is `Some(vec![])` when the `<authors>` container
/// exists but holds no `<author>` entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPaper {
    pub paper_title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub abstract_text: Option<String>,
    pub content: Option<String>,
    pub author_biography: Option<String>,
}

impl RawPaper {
    /// Text of a single-valued field. Not meaningful for `Authors`.
    pub fn text(&self, field: RequiredField) -> Option<&str> {
        match field {
            RequiredField::Title     => self.paper_title.as_deref(),
            RequiredField::Abstract  => self.abstract_text.as_deref(),
            RequiredField::Content   => self.content.as_deref(),
            RequiredField::Biography => self.author_biography.as_deref(),
            RequiredField::Authors   => None,
        }
    }

    /// Convert into a typed record. `index` is 1-based and only used for the error.
    pub fn into_record(self, index: usize) -> Result<DocumentRecord> {
        fn required(value: Option<String>, paper: usize, field: RequiredField) -> Result<String> {
            match value {
                Some(v) if !v.trim().is_empty() => Ok(v),
                _ => Err(ConfdocError::Schema { paper, field: field.as_str() }),
            }
        }

        let authors: Vec<String> = self
            .authors
            .unwrap_or_default()
            .into_iter()
            .filter(|a| !a.trim().is_empty())
            .collect();
        if authors.is_empty() {
            return Err(ConfdocError::Schema { paper: index, field: RequiredField::Authors.as_str() });
        }

        Ok(DocumentRecord {
            title: required(self.paper_title, index, RequiredField::Title)?,
            authors,
            abstract_text: required(self.abstract_text, index, RequiredField::Abstract)?,
            content: required(self.content, index, RequiredField::Content)?,
            biography: required(self.author_biography, index, RequiredField::Biography)?,
        })
    }
}

/// All papers found under the input's root element, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCollection {
    pub papers: Vec<RawPaper>,
}

impl RawCollection {
    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Convert every paper into a typed record, failing on the first one that
    /// does not satisfy the schema.
    pub fn into_records(self) -> Result<DocumentCollection> {
        let records = self
            .papers
            .into_iter()
            .enumerate()
            .map(|(i, p)| p.into_record(i + 1))
            .collect::<Result<Vec<_>>>()?;
        Ok(DocumentCollection { records })
    }
}

/// One validated conference paper. Field text is kept exactly as it appeared
/// in the element, surrounding whitespace included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub title: String,
    /// Non-empty author names, in input order. Never empty.
    pub authors: Vec<String>,
    pub abstract_text: String,
    pub content: String,
    pub biography: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentCollection {
    pub records: Vec<DocumentRecord>,
}

impl DocumentCollection {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_paper() -> RawPaper {
        RawPaper {
            paper_title: Some("  Solar Energy Efficiency ".to_string()),
            authors: Some(vec!["Eric Thompson".to_string(), "   ".to_string(), "Nina Patel".to_string()]),
            abstract_text: Some("This research analyzes efficiency.".to_string()),
            content: Some("\n  Innovative materials help.\n".to_string()),
            author_biography: Some("Leading researchers.".to_string()),
        }
    }

    #[test]
    fn test_field_order_and_tags() {
        let tags: Vec<&str> = RequiredField::ALL.iter().map(|f| f.tag()).collect();
        assert_eq!(tags, ["paper_title", "authors", "abstract", "content", "author_biography"]);
        assert_eq!(RequiredField::from_tag("author_biography"), Some(RequiredField::Biography));
        assert_eq!(RequiredField::from_tag("author"), None);
    }

    #[test]
    fn test_into_record_keeps_text_and_drops_blank_authors() {
        let record = complete_paper().into_record(1).unwrap();
        assert_eq!(record.title, "  Solar Energy Efficiency ");
        assert_eq!(record.authors, vec!["Eric Thompson", "Nina Patel"]);
        assert_eq!(record.content, "\n  Innovative materials help.\n");
    }

    #[test]
    fn test_into_record_rejects_blank_field() {
        let mut paper = complete_paper();
        paper.author_biography = Some(" \n ".to_string());
        let err = paper.into_record(3).unwrap_err();
        assert!(matches!(err, ConfdocError::Schema { paper: 3, field: "biography" }));
    }

    #[test]
    fn test_into_records_reports_first_failure() {
        let mut bad = complete_paper();
        bad.authors = Some(vec![]);
        let collection = RawCollection { papers: vec![complete_paper(), bad] };
        let err = collection.into_records().unwrap_err();
        assert!(matches!(err, ConfdocError::Schema { paper: 2, field: "authors" }));
        assert!(!err.is_structural());
    }
}
