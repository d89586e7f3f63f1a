//! Structural consistency validation for command schemas
//!
//! The validator is a pure function over one schema: it never performs I/O,
//! never mutates its input, and never fails. Invariant violations are
//! returned as a structured report so batch auditing can proceed across an
//! entire corpus. It runs in two places: synchronously after extraction as
//! a self-check, and offline over persisted command documents.

use crate::{CommandSchema, ParameterDescriptor};
use serde_json::Value;
use std::collections::HashSet;

/// Top-level fields every persisted command document must carry
const REQUIRED_FIELDS: [&str; 5] = [
    "service",
    "operation",
    "parameters",
    "requiredParameters",
    "optionalParameters",
];

/// Outcome of validating one schema.
///
/// Errors mean the schema is unusable; warnings mean it is usable but
/// suspicious.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Whether the schema passed with no errors (warnings allowed)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn from_error(message: String) -> Self {
        Self {
            errors: vec![message],
            warnings: Vec::new(),
        }
    }
}

/// Validate a typed command schema against the structural invariants.
///
/// Deterministic and order-independent: two runs over the same schema
/// produce identical reports.
pub fn validate(schema: &CommandSchema) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let required: HashSet<&str> = schema.required_parameters.iter().map(String::as_str).collect();
    let optional: HashSet<&str> = schema.optional_parameters.iter().map(String::as_str).collect();

    // Map key and descriptor name must agree
    for (name, descriptor) in &schema.parameters {
        if descriptor.name != *name {
            errors.push(format!(
                "parameter key {name:?} does not match descriptor name {:?}",
                descriptor.name
            ));
        }
    }

    // No name may sit in both lists
    for name in &schema.required_parameters {
        if optional.contains(name.as_str()) {
            errors.push(format!(
                "parameter {name:?} is listed as both required and optional"
            ));
        }
    }

    // Listed names must be defined, with an agreeing required flag
    check_listing(&schema.required_parameters, schema, true, &mut errors);
    check_listing(&schema.optional_parameters, schema, false, &mut errors);

    for (name, descriptor) in &schema.parameters {
        // A defined parameter missing from both lists is suspicious but usable
        if !required.contains(name.as_str()) && !optional.contains(name.as_str()) {
            warnings.push(format!(
                "parameter {name:?} is defined but listed as neither required nor optional"
            ));
        }

        // Types outside the closed set are tolerated but flagged
        if !descriptor.parameter_type.is_canonical() {
            warnings.push(format!(
                "parameter {name:?} has unusual type {:?}",
                descriptor.parameter_type.as_str()
            ));
        }
    }

    ValidationReport { errors, warnings }
}

fn check_listing(
    listed: &[String],
    schema: &CommandSchema,
    expect_required: bool,
    errors: &mut Vec<String>,
) {
    let listing = if expect_required { "required" } else { "optional" };

    for name in listed {
        match schema.parameters.get(name) {
            None => errors.push(format!(
                "parameter {name:?} is listed as {listing} but not defined in parameters"
            )),
            Some(ParameterDescriptor { required, .. }) if *required != expect_required => {
                errors.push(format!(
                    "parameter {name:?} is listed as {listing} but its required flag is {required}"
                ));
            }
            Some(_) => {}
        }
    }
}

/// Validate a persisted command document.
///
/// Checks the five required top-level fields on the raw JSON first (a
/// typed [`CommandSchema`] can never be missing a field, so presence can
/// only be observed here), then deserializes and delegates to [`validate`].
/// Derived storage-layer fields (`generatedAt`, `parameterCount`,
/// `summary`) are ignored.
pub fn validate_document(document: &Value) -> ValidationReport {
    let Some(object) = document.as_object() else {
        return ValidationReport::from_error("document is not a JSON object".to_string());
    };

    let mut errors = Vec::new();
    for field in REQUIRED_FIELDS {
        if !object.contains_key(field) {
            errors.push(format!("missing required field {field:?}"));
        }
    }
    if !errors.is_empty() {
        return ValidationReport {
            errors,
            warnings: Vec::new(),
        };
    }

    match serde_json::from_value::<CommandSchema>(document.clone()) {
        Ok(schema) => validate(&schema),
        Err(e) => ValidationReport::from_error(format!("malformed command document: {e}")),
    }
}
