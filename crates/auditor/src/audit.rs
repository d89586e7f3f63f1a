//! Corpus traversal and per-document validation

use crate::report::{AuditReport, DocumentReport};
use crate::{AuditError, Result};
use command_model_generator_common::{validate_document, ValidationReport};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Audits a persisted command schema corpus
pub struct CorpusAuditor {
    root: PathBuf,
}

impl CorpusAuditor {
    /// Create an auditor over a corpus root directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Validate every command document under the corpus root.
    ///
    /// Every `*.json` file is treated as a persisted command document.
    /// Unreadable or unparsable files are reported as errors for that
    /// document rather than aborting the audit.
    pub fn audit(&self) -> Result<AuditReport> {
        if !self.root.is_dir() {
            return Err(AuditError::NotADirectory(
                self.root.display().to_string(),
            ));
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            documents.push(DocumentReport {
                path: path.to_path_buf(),
                report: audit_file(path),
            });
        }

        Ok(AuditReport { documents })
    }
}

fn audit_file(path: &Path) -> ValidationReport {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            return ValidationReport {
                errors: vec![format!("unreadable document: {e}")],
                warnings: Vec::new(),
            }
        }
    };

    match serde_json::from_str::<serde_json::Value>(&content) {
        Ok(document) => validate_document(&document),
        Err(e) => ValidationReport {
            errors: vec![format!("invalid JSON: {e}")],
            warnings: Vec::new(),
        },
    }
}
