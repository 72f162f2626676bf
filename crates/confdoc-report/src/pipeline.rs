//! End-to-end report pipeline.
//!
//! Orchestrates one run over a raw input:
//!   1. Strip an optional markdown fence and parse the paper collection
//!   2. Validate required fields
//!   3. Stop at the validation report when the input is invalid
//!   4. Otherwise compute metrics per paper, in input order
//!   5. Render validation report, per-paper calculations and LaTeX templates

use serde::Serialize;
use tracing::{debug, error, info, instrument};

use confdoc_common::{DocumentCollection, DocumentRecord};
use confdoc_ingestion::{validate_input, ValidationResult};
use confdoc_metrics::{MetricsEngine, MetricsResult, MetricsSettings};

use crate::record::render_record;
use crate::template::render_document_template;
use crate::validation::render_validation;

/// One validated paper together with its metrics.
#[derive(Debug, Clone, Serialize)]
pub struct PaperAnalysis {
    pub record: DocumentRecord,
    pub metrics: MetricsResult,
}

/// Typed outcome of a pipeline run. `papers` is empty unless validation passed.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub validation: ValidationResult,
    pub papers: Vec<PaperAnalysis>,
}

impl PipelineReport {
    fn validation_only(validation: ValidationResult) -> Self {
        Self { validation, papers: Vec::new() }
    }

    /// Render the combined markdown report. An invalid input renders the
    /// validation report alone.
    pub fn render(&self) -> String {
        let validation_report = render_validation(&self.validation);
        if !self.validation.is_valid() {
            return validation_report;
        }

        let mut summary = String::from("# LaTeX Conference Document Summary\n\n");
        summary.push_str(&format!(
            "**Total Papers Processed:** {}\n\n",
            self.validation.total_records()
        ));
        summary.push_str("---\n\n");
        summary.push_str("## Detailed Analysis per Paper\n\n");

        for paper in &self.papers {
            summary.push_str(&render_record(&paper.record, &paper.metrics));
            summary.push_str("---\n\n");
            summary.push_str(&render_document_template(&paper.record));
        }

        format!("{}\n\n{}", validation_report, summary)
    }
}

/// Pipeline configuration: metric constants and input handling.
#[derive(Debug, Clone)]
pub struct Pipeline {
    engine: MetricsEngine,
    strip_fence: bool,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(MetricsSettings::default(), true)
    }
}

impl Pipeline {
    pub fn new(settings: MetricsSettings, strip_fence: bool) -> Self {
        Self {
            engine: MetricsEngine::new(settings),
            strip_fence,
        }
    }

    /// Validate the input and, when valid, compute metrics for every paper.
    #[instrument(skip(self, raw), fields(bytes = raw.len()))]
    pub fn analyse(&self, raw: &str) -> PipelineReport {
        let validated = validate_input(raw, self.strip_fence);
        if !validated.result.is_valid() {
            return PipelineReport::validation_only(validated.result);
        }

        let collection: DocumentCollection = match validated.collection.map(|c| c.into_records()) {
            Some(Ok(collection)) => collection,
            Some(Err(e)) => {
                error!(error = %e, "Validated paper could not be converted");
                return PipelineReport::validation_only(validated.result);
            }
            None => return PipelineReport::validation_only(validated.result),
        };

        let papers: Vec<PaperAnalysis> = collection
            .records
            .into_iter()
            .map(|record| {
                let metrics = self.engine.compute(&record);
                debug!(
                    title = %record.title,
                    words = metrics.total_words,
                    complexity = metrics.complexity.score,
                    "Computed paper metrics"
                );
                PaperAnalysis { record, metrics }
            })
            .collect();

        info!(papers = papers.len(), "Pipeline complete");
        PipelineReport { validation: validated.result, papers }
    }

    /// Run the whole pipeline and return the combined report text.
    pub fn process(&self, raw: &str) -> String {
        self.analyse(raw).render()
    }
}

/// Run the pipeline with default settings.
pub fn process(raw: &str) -> String {
    Pipeline::default().process(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use confdoc_test_utils::{paper_xml, PaperXml};

    #[test]
    fn test_invalid_input_has_no_papers() {
        let xml = paper_xml(&[PaperXml::default().without("content")]);
        let report = Pipeline::default().analyse(&xml);
        assert!(!report.validation.is_valid());
        assert!(report.papers.is_empty());
    }

    #[test]
    fn test_valid_input_analyses_every_paper() {
        let xml = paper_xml(&[PaperXml::default(), PaperXml::default().with("paper_title", "Second")]);
        let report = Pipeline::default().analyse(&xml);
        assert_eq!(report.papers.len(), 2);
        assert_eq!(report.papers[1].record.title, "Second");
        assert_eq!(report.papers[0].metrics.total_words, 8);
    }

    #[test]
    fn test_fence_is_only_stripped_when_enabled() {
        let fenced = format!("```xml\n{}```\n", paper_xml(&[PaperXml::default()]));
        assert!(Pipeline::default().analyse(&fenced).validation.is_valid());
        let strict = Pipeline::new(MetricsSettings::default(), false);
        assert_eq!(strict.analyse(&fenced).validation.total_records(), 0);
    }

    #[test]
    fn test_report_serialises_to_json() {
        let report = Pipeline::default().analyse(&paper_xml(&[PaperXml::default()]));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["validation"]["is_valid"], true);
        assert_eq!(json["validation"]["field_validity"]["title"], true);
        assert_eq!(json["papers"][0]["metrics"]["total_words"], 8);
        assert_eq!(json["papers"][0]["record"]["authors"][0], "Ada Lovelace");
    }
}
