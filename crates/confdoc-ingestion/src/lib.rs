//! confdoc-ingestion - Turning raw paper markup into validated records.
//! - Markdown fence stripping
//! - XML parsing into `RawCollection` (absent vs. blank preserved)
//! - Required-field schema validation

pub mod xml;
pub mod validate;

pub use validate::{validate, validate_input, FieldValidity, ValidatedInput, ValidationResult};
pub use xml::{parse_papers_xml, strip_markdown_fence};
