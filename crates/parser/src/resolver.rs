//! Shape reference resolution
//!
//! Maps one shape reference to a resolved `(type, documentation)` pair.
//! The mapping is a fixed, total function over shape kind and is
//! deliberately shallow: list element types and structure member types are
//! never expanded, only the immediate resolved kind is recorded.

use crate::types::{ShapeKind, ShapeRef, ShapeStore};
use command_model_generator_common::{
    GeneratorError, ParameterType, Result, MAX_DOCUMENTATION_LENGTH,
};
use regex::Regex;
use std::sync::OnceLock;

/// A shape reference resolved to a concrete parameter type
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameter {
    /// Resolved type
    pub parameter_type: ParameterType,

    /// Cleaned documentation; empty when neither the reference site nor the
    /// shape carries any
    pub documentation: String,
}

/// Resolves shape references against a shape store
pub struct TypeResolver;

impl TypeResolver {
    /// Resolve one shape reference.
    ///
    /// Fails with [`GeneratorError::ShapeNotFound`] when the referenced
    /// name has no entry in the store; the caller decides recoverability.
    pub fn resolve(reference: &ShapeRef, store: &ShapeStore) -> Result<ResolvedParameter> {
        let shape = store
            .get(&reference.shape)
            .ok_or_else(|| GeneratorError::ShapeNotFound(reference.shape.clone()))?;

        // Reference-site documentation wins over the shape's own
        let raw_documentation = reference
            .documentation
            .as_deref()
            .or(shape.documentation.as_deref())
            .unwrap_or("");

        Ok(ResolvedParameter {
            parameter_type: Self::map_kind(shape.kind.as_ref()),
            documentation: clean_documentation(raw_documentation),
        })
    }

    /// Map a shape kind to its parameter type.
    ///
    /// Timestamps resolve to string (ISO-8601 convention) and blobs to
    /// string (base64 convention). Kinds outside the known set keep their
    /// raw name; an absent kind resolves to the literal unknown type.
    pub fn map_kind(kind: Option<&ShapeKind>) -> ParameterType {
        match kind {
            Some(ShapeKind::String | ShapeKind::Timestamp | ShapeKind::Blob) => {
                ParameterType::String
            }
            Some(
                ShapeKind::Integer | ShapeKind::Long | ShapeKind::Float | ShapeKind::Double,
            ) => ParameterType::Number,
            Some(ShapeKind::Boolean) => ParameterType::Boolean,
            Some(ShapeKind::List) => ParameterType::Array,
            Some(ShapeKind::Map | ShapeKind::Structure) => ParameterType::Object,
            Some(ShapeKind::Other(raw)) => ParameterType::Other(raw.clone()),
            None => ParameterType::Unknown,
        }
    }
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"))
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

/// Clean raw member documentation for presentation.
///
/// Strips `<...>` tag-like substrings, collapses whitespace runs to a
/// single space, trims, then hard-truncates to
/// [`MAX_DOCUMENTATION_LENGTH`] characters with no ellipsis. Idempotent.
pub fn clean_documentation(raw: &str) -> String {
    let stripped = tag_pattern().replace_all(raw, "");
    let collapsed = whitespace_pattern().replace_all(&stripped, " ");
    collapsed
        .trim()
        .chars()
        .take(MAX_DOCUMENTATION_LENGTH)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Shape;
    use indexmap::IndexMap;

    fn shape(kind: ShapeKind, documentation: Option<&str>) -> Shape {
        Shape {
            kind: Some(kind),
            members: IndexMap::new(),
            required: Vec::new(),
            documentation: documentation.map(String::from),
        }
    }

    fn store_with(name: &str, shape: Shape) -> ShapeStore {
        [(name.to_string(), shape)].into_iter().collect()
    }

    #[test]
    fn test_kind_mapping_is_total() {
        let cases = [
            (ShapeKind::String, ParameterType::String),
            (ShapeKind::Timestamp, ParameterType::String),
            (ShapeKind::Blob, ParameterType::String),
            (ShapeKind::Integer, ParameterType::Number),
            (ShapeKind::Long, ParameterType::Number),
            (ShapeKind::Float, ParameterType::Number),
            (ShapeKind::Double, ParameterType::Number),
            (ShapeKind::Boolean, ParameterType::Boolean),
            (ShapeKind::List, ParameterType::Array),
            (ShapeKind::Map, ParameterType::Object),
            (ShapeKind::Structure, ParameterType::Object),
        ];

        for (kind, expected) in cases {
            assert_eq!(TypeResolver::map_kind(Some(&kind)), expected);
        }

        assert_eq!(
            TypeResolver::map_kind(Some(&ShapeKind::Other("document".to_string()))),
            ParameterType::Other("document".to_string())
        );
        assert_eq!(TypeResolver::map_kind(None), ParameterType::Unknown);
    }

    #[test]
    fn test_missing_shape_is_an_error() {
        let store = ShapeStore::default();
        let result = TypeResolver::resolve(&ShapeRef::to("Nowhere"), &store);

        assert!(matches!(
            result,
            Err(GeneratorError::ShapeNotFound(name)) if name == "Nowhere"
        ));
    }

    #[test]
    fn test_member_documentation_wins() {
        let store = store_with("Name", shape(ShapeKind::String, Some("shape doc")));
        let reference = ShapeRef {
            shape: "Name".to_string(),
            documentation: Some("member doc".to_string()),
        };

        let resolved = TypeResolver::resolve(&reference, &store).unwrap();
        assert_eq!(resolved.documentation, "member doc");
    }

    #[test]
    fn test_shape_documentation_is_fallback() {
        let store = store_with("Name", shape(ShapeKind::String, Some("shape doc")));
        let resolved = TypeResolver::resolve(&ShapeRef::to("Name"), &store).unwrap();
        assert_eq!(resolved.documentation, "shape doc");
    }

    #[test]
    fn test_no_documentation_is_empty_string() {
        let store = store_with("Name", shape(ShapeKind::String, None));
        let resolved = TypeResolver::resolve(&ShapeRef::to("Name"), &store).unwrap();
        assert_eq!(resolved.documentation, "");
    }

    #[test]
    fn test_clean_strips_tags_and_collapses_whitespace() {
        assert_eq!(
            clean_documentation("<p>Creates a   new\n bucket.</p>"),
            "Creates a new bucket."
        );
        assert_eq!(
            clean_documentation("  <a href=\"x\">link</a> text  "),
            "link text"
        );
    }

    #[test]
    fn test_clean_is_idempotent() {
        let long = "long ".repeat(100);
        let inputs = [
            "<p>Creates a   new\n bucket.</p>",
            "plain text",
            "",
            long.as_str(),
        ];

        for input in inputs {
            let once = clean_documentation(input);
            assert_eq!(clean_documentation(&once), once);
        }
    }

    #[test]
    fn test_truncation_boundary() {
        // 201 plain characters are cut to the first 200, no suffix added
        let over = "a".repeat(201);
        let cleaned = clean_documentation(&over);
        assert_eq!(cleaned.chars().count(), 200);
        assert_eq!(cleaned, "a".repeat(200));

        // exactly 200 characters pass through unchanged
        let exact = "b".repeat(200);
        assert_eq!(clean_documentation(&exact), exact);
    }

    #[test]
    fn test_resolved_documentation_is_bounded() {
        let long = format!("<p>{}</p>", "word ".repeat(100));
        let store = store_with("Name", shape(ShapeKind::String, Some(&long)));

        let resolved = TypeResolver::resolve(&ShapeRef::to("Name"), &store).unwrap();
        assert!(resolved.documentation.chars().count() <= MAX_DOCUMENTATION_LENGTH);
    }
}
