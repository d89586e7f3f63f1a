//! Offline audit for persisted command schema corpora
//!
//! Walks a generated output tree, re-runs the consistency validator over
//! every persisted command document, and aggregates the results into a
//! corpus-wide report. The audit never stops at the first bad document:
//! every file is checked so a whole corpus can be triaged in one pass.
//!
//! # Examples
//!
//! ```no_run
//! use command_model_generator_auditor::CorpusAuditor;
//! use std::path::PathBuf;
//!
//! let auditor = CorpusAuditor::new(PathBuf::from("./commands"));
//! let report = auditor.audit().expect("Audit failed");
//!
//! println!("{}", report.render_summary());
//! assert!(report.is_clean());
//! ```

mod audit;
mod report;

pub use audit::CorpusAuditor;
pub use report::{AuditReport, DocumentReport};

use thiserror::Error;

/// Errors that can occur while auditing a corpus
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Failed to read corpus directory: {0}")]
    DirectoryRead(#[from] std::io::Error),

    #[error("Failed to walk corpus: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Corpus root is not a directory: {0}")]
    NotADirectory(String),
}

/// Result type for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;
