//! Aggregated audit results and text rendering

use chrono::Utc;
use command_model_generator_common::ValidationReport;
use std::fmt::Write as FmtWrite;
use std::path::PathBuf;

/// Validation outcome for one persisted document
#[derive(Debug, Clone)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub report: ValidationReport,
}

/// Aggregated audit over a whole corpus
#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    pub documents: Vec<DocumentReport>,
}

impl AuditReport {
    /// Number of documents checked
    pub fn total_documents(&self) -> usize {
        self.documents.len()
    }

    /// Number of documents with no errors
    pub fn clean_documents(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| d.report.is_valid())
            .count()
    }

    /// Total errors across the corpus
    pub fn total_errors(&self) -> usize {
        self.documents.iter().map(|d| d.report.errors.len()).sum()
    }

    /// Total warnings across the corpus
    pub fn total_warnings(&self) -> usize {
        self.documents.iter().map(|d| d.report.warnings.len()).sum()
    }

    /// Whether the corpus has no errors at all (warnings allowed)
    pub fn is_clean(&self) -> bool {
        self.total_errors() == 0
    }

    /// Render the audit as a text summary
    pub fn render_summary(&self) -> String {
        let mut output = String::new();
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

        let _ = writeln!(output, "Corpus Audit Report");
        let _ = writeln!(output, "Generated: {timestamp}");
        let _ = writeln!(output);
        let _ = writeln!(output, "Documents checked: {}", self.total_documents());
        let _ = writeln!(output, "Clean documents:   {}", self.clean_documents());
        let _ = writeln!(output, "Errors:            {}", self.total_errors());
        let _ = writeln!(output, "Warnings:          {}", self.total_warnings());

        for document in &self.documents {
            if document.report.errors.is_empty() && document.report.warnings.is_empty() {
                continue;
            }

            let _ = writeln!(output);
            let _ = writeln!(output, "{}", document.path.display());
            for error in &document.report.errors {
                let _ = writeln!(output, "  error: {error}");
            }
            for warning in &document.report.warnings {
                let _ = writeln!(output, "  warning: {warning}");
            }
        }

        output
    }
}
