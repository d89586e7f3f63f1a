//! Common types and utilities for the Command Model Generator
//!
//! This crate contains the shared schema types, error types, the
//! consistency validator, and the generation config used across the
//! parser, generator, auditor, and CLI components.

mod config;
mod schema;
mod validate;

pub use config::GenerationConfig;
pub use schema::{
    CommandSchema, ParameterDescriptor, ParameterType, ServiceCommandSet,
    MAX_DOCUMENTATION_LENGTH,
};
pub use validate::{validate, validate_document, ValidationReport};

use thiserror::Error;

/// Errors that can occur during command schema generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Shape not found: {0}")]
    ShapeNotFound(String),

    #[error("Input shape not found for operation {operation}: {shape}")]
    InputShapeNotFound { operation: String, shape: String },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
