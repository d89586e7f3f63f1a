//! Vendor API description type definitions
//!
//! These types represent the structure of vendor model JSON files: a flat
//! mapping of operations plus a flat mapping of named shapes. Shapes
//! reference each other by name only, so the description is held as a
//! lookup table rather than an object graph; the extraction pass never
//! follows more than one reference level deep.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root vendor API description document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDescription {
    /// Model format version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Service metadata (apiVersion, serviceFullName, etc.)
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,

    /// Operation definitions, in source order
    #[serde(default)]
    pub operations: IndexMap<String, Operation>,

    /// Shape definitions, keyed by name
    #[serde(default)]
    pub shapes: ShapeStore,
}

impl ApiDescription {
    /// API version from the metadata section, when present
    pub fn api_version(&self) -> Option<&str> {
        self.metadata.get("apiVersion").and_then(|v| v.as_str())
    }

    /// Human-readable service name from the metadata section, when present
    pub fn service_full_name(&self) -> Option<&str> {
        self.metadata.get("serviceFullName").and_then(|v| v.as_str())
    }
}

/// One API operation: an optional input shape reference and documentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Input shape reference; absent for operations that take no input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<ShapeRef>,

    /// Operation documentation, carried verbatim into the schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

/// Immutable name → shape lookup table for one API version
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeStore {
    shapes: IndexMap<String, Shape>,
}

impl ShapeStore {
    /// Look up a shape by name
    pub fn get(&self, name: &str) -> Option<&Shape> {
        self.shapes.get(name)
    }

    /// Whether a shape with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.shapes.contains_key(name)
    }

    /// Number of shapes in the store
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl FromIterator<(String, Shape)> for ShapeStore {
    fn from_iter<I: IntoIterator<Item = (String, Shape)>>(iter: I) -> Self {
        Self {
            shapes: iter.into_iter().collect(),
        }
    }
}

/// A named shape definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    /// Shape kind; vendor models may omit it
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ShapeKind>,

    /// Member fields, for structure shapes, in source order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub members: IndexMap<String, ShapeRef>,

    /// Names of mandatory members
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Shape documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl Shape {
    /// Case-sensitive membership test against the shape's required list
    pub fn is_required(&self, member: &str) -> bool {
        self.required.iter().any(|name| name == member)
    }
}

/// Shape kind as written in the vendor model.
///
/// The unit variants are the kinds the resolver maps; `Other` keeps the raw
/// name of any kind outside that set so it can surface in the resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    String,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    Timestamp,
    Blob,
    List,
    Map,
    Structure,
    #[serde(untagged)]
    Other(String),
}

/// Reference to a shape by name, possibly overriding its documentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeRef {
    /// Target shape name
    pub shape: String,

    /// Reference-site documentation; wins over the shape's own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl ShapeRef {
    /// Plain reference with no documentation override
    pub fn to(shape: &str) -> Self {
        Self {
            shape: shape.to_string(),
            documentation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_description() {
        let json = r#"{
            "version": "2.0",
            "metadata": {
                "apiVersion": "2023-01-01",
                "serviceFullName": "Example Storage"
            },
            "operations": {},
            "shapes": {}
        }"#;

        let description: ApiDescription = serde_json::from_str(json).unwrap();
        assert_eq!(description.version.as_deref(), Some("2.0"));
        assert_eq!(description.api_version(), Some("2023-01-01"));
        assert_eq!(description.service_full_name(), Some("Example Storage"));
        assert!(description.operations.is_empty());
        assert!(description.shapes.is_empty());
    }

    #[test]
    fn test_parse_shape_kinds() {
        let shape: Shape = serde_json::from_str(r#"{"type": "structure"}"#).unwrap();
        assert_eq!(shape.kind, Some(ShapeKind::Structure));

        let shape: Shape = serde_json::from_str(r#"{"type": "timestamp"}"#).unwrap();
        assert_eq!(shape.kind, Some(ShapeKind::Timestamp));

        // A kind outside the known set keeps its raw name
        let shape: Shape = serde_json::from_str(r#"{"type": "document"}"#).unwrap();
        assert_eq!(shape.kind, Some(ShapeKind::Other("document".to_string())));

        // The kind field may be absent entirely
        let shape: Shape = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(shape.kind, None);
    }

    #[test]
    fn test_member_order_is_preserved() {
        let json = r#"{
            "type": "structure",
            "members": {
                "Charlie": { "shape": "S" },
                "Alpha": { "shape": "S" },
                "Bravo": { "shape": "S" }
            }
        }"#;

        let shape: Shape = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = shape.members.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Charlie", "Alpha", "Bravo"]);
    }

    #[test]
    fn test_required_membership_is_case_sensitive() {
        let shape: Shape = serde_json::from_str(
            r#"{"type": "structure", "required": ["Bucket"]}"#,
        )
        .unwrap();

        assert!(shape.is_required("Bucket"));
        assert!(!shape.is_required("bucket"));
    }
}
