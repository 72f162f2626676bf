//! confdoc-common - Shared paper model and error type used across all confdoc crates.

pub mod error;
pub mod models;

// Re-export commonly used types
pub use error::{ConfdocError, Result};
pub use models::{
    DocumentCollection, DocumentRecord, RawCollection, RawPaper, RequiredField,
};
