//! Persisted output generation for command schemas
//!
//! This crate owns the storage layer's shape of the corpus: one folder per
//! service, one JSON document per command, and a README index over the
//! whole run. The core schema fields are written verbatim (the extractor
//! is the sole authority for `parameters`, `requiredParameters`, and
//! `optionalParameters`), while the derived view (`generatedAt`,
//! `parameterCount`, `summary`) belongs here.

mod templates;

use chrono::Utc;
use command_model_generator_common::{
    CommandSchema, GeneratorError, Result, ServiceCommandSet,
};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tera::Tera;

/// Fixed suffix concatenated to the operation name to form the persisted
/// command identifier
pub const COMMAND_SUFFIX: &str = "Command";

/// Persisted form of one command schema
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDocument<'a> {
    #[serde(flatten)]
    schema: &'a CommandSchema,

    /// Generation timestamp (UTC)
    generated_at: String,

    /// Derived view over the schema's parameters
    parameter_count: usize,
    summary: String,
}

impl<'a> CommandDocument<'a> {
    /// Build the persisted view of a schema, stamped now
    pub fn new(schema: &'a CommandSchema) -> Self {
        let generated_at = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        Self::with_timestamp(schema, generated_at)
    }

    fn with_timestamp(schema: &'a CommandSchema, generated_at: String) -> Self {
        Self {
            schema,
            generated_at,
            parameter_count: schema.parameter_count(),
            summary: format!(
                "{} parameters ({} required)",
                schema.parameter_count(),
                schema.required_parameters.len()
            ),
        }
    }
}

/// Summary row for one generated service, used by the README index
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedService {
    pub service: String,
    pub api_version: String,
    pub display_name: Option<String>,
    pub command_count: usize,
    pub parameter_count: usize,
}

/// Command corpus generator
///
/// Writes per-service folders of command documents and the README index.
pub struct CommandSetGenerator {
    tera: Tera,
}

impl CommandSetGenerator {
    /// Create a new generator with the embedded templates loaded
    pub fn new() -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self { tera })
    }

    /// Derive the persisted file name of one command
    pub fn command_file_name(operation: &str) -> String {
        format!("{}{}.json", operation, COMMAND_SUFFIX)
    }

    /// Write one service's command documents under `output_root/<service>/`
    pub fn generate_service(
        &self,
        set: &ServiceCommandSet,
        output_root: &Path,
    ) -> Result<GeneratedService> {
        let service_dir = output_root.join(&set.service);
        fs::create_dir_all(&service_dir).map_err(|e| {
            GeneratorError::Generation(format!(
                "Failed to create service directory {}: {}",
                service_dir.display(),
                e
            ))
        })?;

        for schema in &set.schemas {
            let document = CommandDocument::new(schema);
            let rendered = serde_json::to_string_pretty(&document)?;

            let output_path = service_dir.join(Self::command_file_name(&schema.operation));
            fs::write(&output_path, rendered).map_err(|e| {
                GeneratorError::Generation(format!(
                    "Failed to write {}: {}",
                    output_path.display(),
                    e
                ))
            })?;
        }

        Ok(GeneratedService {
            service: set.service.clone(),
            api_version: set.api_version.clone(),
            display_name: set.display_name.clone(),
            command_count: set.schemas.len(),
            parameter_count: set.schemas.iter().map(|s| s.parameter_count()).sum(),
        })
    }

    /// Render the README index over all generated services
    pub fn generate_index(
        &self,
        services: &[GeneratedService],
        output_root: &Path,
    ) -> Result<()> {
        let mut context = tera::Context::new();
        context.insert("services", services);
        context.insert(
            "generated_at",
            &Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        );

        let total_commands: usize = services.iter().map(|s| s.command_count).sum();
        context.insert("total_commands", &total_commands);

        let rendered = self
            .tera
            .render("README.md", &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {}", e)))?;

        let output_path = output_root.join("README.md");
        fs::write(output_path, rendered)
            .map_err(|e| GeneratorError::Generation(format!("Failed to write README.md: {}", e)))?;

        Ok(())
    }
}
