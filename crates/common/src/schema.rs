//! Shared schema types for resolved command parameter models
//!
//! These types are the intermediate representation handed from the parser
//! to the generator and auditor: one [`CommandSchema`] per API operation,
//! one [`ParameterDescriptor`] per resolved input parameter.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Maximum length of cleaned parameter documentation, in characters.
///
/// Longer documentation is hard-truncated with no ellipsis.
pub const MAX_DOCUMENTATION_LENGTH: usize = 200;

/// Resolved parameter type.
///
/// The six unit variants form the closed canonical set. `Other` carries the
/// raw kind name of a shape kind outside the resolver's mapping table; the
/// validator flags it as unusual rather than rejecting the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterType {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Unknown,
    /// Raw kind name outside the canonical set
    Other(String),
}

impl ParameterType {
    /// The wire representation of this type
    pub fn as_str(&self) -> &str {
        match self {
            ParameterType::String => "string",
            ParameterType::Number => "number",
            ParameterType::Boolean => "boolean",
            ParameterType::Array => "array",
            ParameterType::Object => "object",
            ParameterType::Unknown => "unknown",
            ParameterType::Other(raw) => raw,
        }
    }

    /// Parse a wire string, canonicalizing the six known values
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "string" => ParameterType::String,
            "number" => ParameterType::Number,
            "boolean" => ParameterType::Boolean,
            "array" => ParameterType::Array,
            "object" => ParameterType::Object,
            "unknown" => ParameterType::Unknown,
            other => ParameterType::Other(other.to_string()),
        }
    }

    /// Whether this type is one of the six closed canonical values
    pub fn is_canonical(&self) -> bool {
        !matches!(self, ParameterType::Other(_))
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ParameterType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ParameterType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ParameterType::from_raw(&raw))
    }
}

/// One resolved input parameter of an operation.
///
/// Created once during extraction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name (the member name in the input shape)
    pub name: String,

    /// Resolved type
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,

    /// Whether the parameter is mandatory
    pub required: bool,

    /// Cleaned documentation (tag-stripped, whitespace-collapsed, ≤200 chars)
    pub documentation: String,
}

/// The flat, resolved parameter model for one API operation.
///
/// Invariants for a valid schema:
/// - no name appears in both `required_parameters` and `optional_parameters`
/// - the two lists together cover exactly the keys of `parameters`
/// - each descriptor's `required` flag agrees with its containing list
/// - `parameters` preserves the source structure's member order, and both
///   lists preserve that same relative order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSchema {
    /// Service the operation belongs to
    pub service: String,

    /// Operation name
    pub operation: String,

    /// Resolved parameters, keyed by name, in source member order
    pub parameters: IndexMap<String, ParameterDescriptor>,

    /// Names of mandatory parameters, in source member order
    pub required_parameters: Vec<String>,

    /// Names of optional parameters, in source member order
    pub optional_parameters: Vec<String>,

    /// Operation-level documentation, copied verbatim from the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl CommandSchema {
    /// Create an empty schema for an operation
    pub fn new(service: &str, operation: &str) -> Self {
        Self {
            service: service.to_string(),
            operation: operation.to_string(),
            parameters: IndexMap::new(),
            required_parameters: Vec::new(),
            optional_parameters: Vec::new(),
            documentation: None,
        }
    }

    /// Number of resolved parameters
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }
}

/// All command schemas extracted from one service's API description
#[derive(Debug, Clone, Serialize)]
pub struct ServiceCommandSet {
    /// Service identifier (directory name under the models root)
    pub service: String,

    /// API version the schemas were extracted from
    pub api_version: String,

    /// Human-readable service name, when the description provides one
    pub display_name: Option<String>,

    /// Extracted schemas, in source operation order
    pub schemas: Vec<CommandSchema>,
}
