//! Vendor API description file parser
//!
//! Loads one service's model JSON and runs batch extraction over every
//! operation it declares.

use crate::extractor::{ExtractedCommand, OperationExtractor, SkippedOperation};
use crate::types::ApiDescription;
use command_model_generator_common::{GeneratorError, Result, ServiceCommandSet};
use std::fs;
use std::path::Path;

/// Vendor API description parser
///
/// Reads and parses one service's model JSON for one API version.
pub struct ModelParser {
    /// Loaded description
    description: ApiDescription,

    /// Service name (e.g., "storage", "queue")
    service_name: String,

    /// API version the model file belongs to
    api_version: String,
}

impl ModelParser {
    /// Load a vendor description from a file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = ModelParser::from_file(
    ///     "models/storage/2023-01-01/model.json",
    ///     "storage",
    ///     "2023-01-01",
    /// )?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        service_name: &str,
        api_version: &str,
    ) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to read model file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content, service_name, api_version)
    }

    /// Parse a vendor description from a JSON string
    pub fn from_json(json: &str, service_name: &str, api_version: &str) -> Result<Self> {
        let description: ApiDescription = serde_json::from_str(json)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse model JSON: {}", e)))?;

        Ok(Self {
            description,
            service_name: service_name.to_string(),
            api_version: api_version.to_string(),
        })
    }

    /// Get reference to the underlying description
    pub fn description(&self) -> &ApiDescription {
        &self.description
    }

    /// Extract command schemas for every operation in the description.
    ///
    /// Operations are processed in declared order. An operation whose
    /// extraction aborts (input shape missing) is recorded under `skipped`
    /// and the batch continues; it never halts the run.
    pub fn extract(&self) -> ServiceExtraction {
        let mut commands = Vec::new();
        let mut skipped = Vec::new();

        for (operation_name, operation) in &self.description.operations {
            match OperationExtractor::extract(
                &self.service_name,
                operation_name,
                operation,
                &self.description.shapes,
            ) {
                Ok(extracted) => commands.push(extracted),
                Err(e) => skipped.push(SkippedOperation {
                    operation: operation_name.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        ServiceExtraction {
            service: self.service_name.clone(),
            api_version: self.api_version.clone(),
            display_name: self.description.service_full_name().map(String::from),
            commands,
            skipped,
        }
    }
}

/// Result of batch extraction over one service
#[derive(Debug, Clone)]
pub struct ServiceExtraction {
    pub service: String,
    pub api_version: String,
    pub display_name: Option<String>,
    pub commands: Vec<ExtractedCommand>,
    pub skipped: Vec<SkippedOperation>,
}

impl ServiceExtraction {
    /// Total member diagnostics across all extracted commands
    pub fn diagnostic_count(&self) -> usize {
        self.commands.iter().map(|c| c.diagnostics.len()).sum()
    }

    /// Convert into the shared IR consumed by the generator
    pub fn into_command_set(self) -> ServiceCommandSet {
        ServiceCommandSet {
            service: self.service,
            api_version: self.api_version,
            display_name: self.display_name,
            schemas: self.commands.into_iter().map(|c| c.schema).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_model() {
        let model_json = r#"{
            "version": "2.0",
            "metadata": { "apiVersion": "2023-01-01" },
            "operations": {},
            "shapes": {}
        }"#;

        let parser = ModelParser::from_json(model_json, "storage", "2023-01-01");
        assert!(parser.is_ok());

        let parser = parser.unwrap();
        assert_eq!(parser.description().api_version(), Some("2023-01-01"));
        assert!(parser.description().shapes.is_empty());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let result = ModelParser::from_json("not json", "storage", "2023-01-01");
        assert!(matches!(result, Err(GeneratorError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_parse_error() {
        let result = ModelParser::from_file("/nonexistent/model.json", "storage", "v1");
        assert!(matches!(result, Err(GeneratorError::Parse(_))));
    }

    #[test]
    fn test_batch_continues_past_broken_operation() {
        let model_json = r#"{
            "operations": {
                "Broken": {
                    "input": { "shape": "NoSuchInput" }
                },
                "Works": {
                    "input": { "shape": "WorksInput" }
                }
            },
            "shapes": {
                "WorksInput": {
                    "type": "structure",
                    "members": { "Id": { "shape": "Id" } },
                    "required": ["Id"]
                },
                "Id": { "type": "string" }
            }
        }"#;

        let parser = ModelParser::from_json(model_json, "storage", "2023-01-01").unwrap();
        let extraction = parser.extract();

        assert_eq!(extraction.commands.len(), 1);
        assert_eq!(extraction.commands[0].schema.operation, "Works");
        assert_eq!(extraction.skipped.len(), 1);
        assert_eq!(extraction.skipped[0].operation, "Broken");
        assert!(extraction.skipped[0].reason.contains("NoSuchInput"));
    }
}
