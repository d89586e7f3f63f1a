//! Template loading and management

use command_model_generator_common::{GeneratorError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("display_name", display_name_filter);

    tera.add_raw_template("README.md", include_str!("../templates/README.md.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load README.md template: {}", e))
        })?;

    Ok(tera)
}

/// Filter that falls back to the service identifier when a service has no
/// human-readable name
fn display_name_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    if let Some(name) = value.as_str() {
        if !name.is_empty() {
            return Ok(Value::String(name.to_string()));
        }
    }

    let fallback = args
        .get("fallback")
        .and_then(|v| v.as_str())
        .ok_or_else(|| tera::Error::msg("display_name filter expects a fallback argument"))?;

    Ok(Value::String(fallback.to_string()))
}
