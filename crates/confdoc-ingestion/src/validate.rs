//! Required-field schema validation for paper collections.
//!
//! Each paper must carry a non-blank `paper_title`, `abstract`, `content` and
//! `author_biography`, plus at least one non-blank `<author>` inside
//! `<authors>`. Problems are reported per paper as two classes, missing and
//! empty, and folded into collection-wide field validity flags.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use confdoc_common::{RawCollection, RawPaper, RequiredField};

use crate::xml::{parse_papers_xml, strip_markdown_fence};

/// Error reported when the raw input cannot be read as a paper collection.
pub const INVALID_FORMAT_ERROR: &str =
    "Invalid data format. Please provide data in XML format enclosed in a markdown block.";

/// Collection-wide validity per required field.
/// A field is invalid as soon as any paper fails it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldValidity(BTreeMap<RequiredField, bool>);

impl FieldValidity {
    pub fn all(valid: bool) -> Self {
        Self(RequiredField::ALL.into_iter().map(|f| (f, valid)).collect())
    }

    pub fn is_valid(&self, field: RequiredField) -> bool {
        self.0.get(&field).copied().unwrap_or(false)
    }

    fn invalidate(&mut self, field: RequiredField) {
        self.0.insert(field, false);
    }

    /// Fields in check order with their flag.
    pub fn iter(&self) -> impl Iterator<Item = (RequiredField, bool)> + '_ {
        self.0.iter().map(|(f, v)| (*f, *v))
    }
}

/// Outcome of validating one input. Immutable once built; `is_valid` holds
/// exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    total_records: usize,
    is_valid: bool,
    errors: Vec<String>,
    field_validity: FieldValidity,
    /// 1-based paper number → that paper's errors (empty for clean papers).
    per_record_errors: BTreeMap<usize, Vec<String>>,
}

impl ValidationResult {
    fn new(
        total_records: usize,
        errors: Vec<String>,
        field_validity: FieldValidity,
        per_record_errors: BTreeMap<usize, Vec<String>>,
    ) -> Self {
        Self {
            total_records,
            is_valid: errors.is_empty(),
            errors,
            field_validity,
            per_record_errors,
        }
    }

    /// Result for input that could not be parsed into a paper collection.
    pub fn structural_failure() -> Self {
        Self::new(
            0,
            vec![INVALID_FORMAT_ERROR.to_string()],
            FieldValidity::all(false),
            BTreeMap::new(),
        )
    }

    pub fn total_records(&self) -> usize { self.total_records }
    pub fn is_valid(&self) -> bool { self.is_valid }
    pub fn errors(&self) -> &[String] { &self.errors }
    pub fn field_validity(&self) -> &FieldValidity { &self.field_validity }
    pub fn per_record_errors(&self) -> &BTreeMap<usize, Vec<String>> { &self.per_record_errors }

    /// Errors of one paper (1-based), empty when the paper is clean or unknown.
    pub fn record_errors(&self, paper: usize) -> &[String] {
        self.per_record_errors.get(&paper).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FieldStatus {
    Present,
    Missing,
    Empty,
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn check_field(paper: &RawPaper, field: RequiredField) -> FieldStatus {
    if field == RequiredField::Authors {
        return match paper.authors.as_deref() {
            None | Some([]) => FieldStatus::Missing,
            Some(authors) if authors.iter().all(|a| is_blank(a)) => FieldStatus::Empty,
            Some(_) => FieldStatus::Present,
        };
    }
    match paper.text(field) {
        None => FieldStatus::Missing,
        Some(text) if is_blank(text) => FieldStatus::Empty,
        Some(_) => FieldStatus::Present,
    }
}

fn tag_list(fields: &[RequiredField]) -> String {
    fields.iter().map(|f| f.tag()).collect::<Vec<_>>().join(", ")
}

/// Validate every paper of a parsed collection.
#[instrument(skip(collection), fields(papers = collection.len()))]
pub fn validate(collection: &RawCollection) -> ValidationResult {
    let mut errors = Vec::new();
    let mut field_validity = FieldValidity::all(true);
    let mut per_record_errors = BTreeMap::new();

    for (i, paper) in collection.papers.iter().enumerate() {
        let number = i + 1;
        let mut missing = Vec::new();
        let mut empty = Vec::new();

        for field in RequiredField::ALL {
            match check_field(paper, field) {
                FieldStatus::Present => continue,
                FieldStatus::Missing => missing.push(field),
                FieldStatus::Empty   => empty.push(field),
            }
            field_validity.invalidate(field);
        }

        let mut paper_errors = Vec::new();
        if !missing.is_empty() {
            paper_errors.push(format!(
                "Missing required tag(s): {} in Paper {}.",
                tag_list(&missing),
                number
            ));
        }
        if !empty.is_empty() {
            paper_errors.push(format!(
                "Empty content in required tag(s): {} in Paper {}.",
                tag_list(&empty),
                number
            ));
        }

        if !paper_errors.is_empty() {
            debug!(paper = number, errors = ?paper_errors, "Paper failed validation");
        }
        errors.extend(paper_errors.iter().cloned());
        per_record_errors.insert(number, paper_errors);
    }

    let result = ValidationResult::new(collection.len(), errors, field_validity, per_record_errors);
    if result.is_valid() {
        info!(papers = result.total_records(), "Validation passed");
    } else {
        warn!(errors = result.errors().len(), "Validation failed");
    }
    result
}

/// Validation outcome together with the parsed collection, when there is one.
#[derive(Debug, Clone)]
pub struct ValidatedInput {
    pub result: ValidationResult,
    pub collection: Option<RawCollection>,
}

/// Parse and validate raw input. Malformed input becomes a structural
/// `ValidationResult` rather than an error.
pub fn validate_input(raw: &str, strip_fence: bool) -> ValidatedInput {
    let xml = if strip_fence { strip_markdown_fence(raw) } else { raw };
    match parse_papers_xml(xml) {
        Ok(collection) => ValidatedInput {
            result: validate(&collection),
            collection: Some(collection),
        },
        Err(e) => {
            warn!(error = %e, "Input is not a paper collection");
            ValidatedInput {
                result: ValidationResult::structural_failure(),
                collection: None,
            }
        }
    }
}
