//! confdoc-report - Markdown rendering of validation and metrics results.
//! - Validation report
//! - Narrated, formula-annotated per-paper calculations
//! - LaTeX document template per paper
//! - Pipeline orchestration (validate → compute → render)

pub mod validation;
pub mod record;
pub mod template;
pub mod pipeline;

pub use pipeline::{process, PaperAnalysis, Pipeline, PipelineReport};
pub use record::render_record;
pub use template::render_document_template;
pub use validation::render_validation;

/// Indent every line of `text` by `prefix`.
pub(crate) fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
