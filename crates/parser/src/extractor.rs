//! Command schema extraction
//!
//! Walks an operation's input shape's direct members, resolves each one,
//! and partitions them into required and optional parameters, preserving
//! the source member order throughout.

use crate::resolver::TypeResolver;
use crate::types::{Operation, ShapeStore};
use command_model_generator_common::{
    CommandSchema, GeneratorError, ParameterDescriptor, Result,
};
use std::fmt;

/// One extracted command schema plus any per-member diagnostics
#[derive(Debug, Clone)]
pub struct ExtractedCommand {
    pub schema: CommandSchema,

    /// Members skipped because their shape reference did not resolve
    pub diagnostics: Vec<MemberDiagnostic>,
}

/// A member that was skipped during extraction.
///
/// Non-fatal: the member is absent from the schema's parameters and from
/// both ordered lists, and the rest of the operation extracted normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDiagnostic {
    /// Member name in the input shape
    pub member: String,

    /// The shape name that had no entry in the store
    pub shape: String,
}

impl fmt::Display for MemberDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "member {} skipped: shape {} not found",
            self.member, self.shape
        )
    }
}

/// Extracts flat command schemas from operation definitions
pub struct OperationExtractor;

impl OperationExtractor {
    /// Extract the command schema for one operation.
    ///
    /// An operation without an input shape yields an empty schema, which
    /// is a valid outcome. A missing input shape aborts the whole
    /// operation with [`GeneratorError::InputShapeNotFound`]; a missing
    /// member shape only skips that member and records a diagnostic.
    pub fn extract(
        service: &str,
        operation_name: &str,
        operation: &Operation,
        store: &ShapeStore,
    ) -> Result<ExtractedCommand> {
        let mut schema = CommandSchema::new(service, operation_name);
        schema.documentation = operation.documentation.clone();

        let Some(input_ref) = &operation.input else {
            return Ok(ExtractedCommand {
                schema,
                diagnostics: Vec::new(),
            });
        };

        let input_shape = store.get(&input_ref.shape).ok_or_else(|| {
            GeneratorError::InputShapeNotFound {
                operation: operation_name.to_string(),
                shape: input_ref.shape.clone(),
            }
        })?;

        let mut diagnostics = Vec::new();

        for (member_name, member_ref) in &input_shape.members {
            let required = input_shape.is_required(member_name);

            match TypeResolver::resolve(member_ref, store) {
                Ok(resolved) => {
                    schema.parameters.insert(
                        member_name.clone(),
                        ParameterDescriptor {
                            name: member_name.clone(),
                            parameter_type: resolved.parameter_type,
                            required,
                            documentation: resolved.documentation,
                        },
                    );
                    if required {
                        schema.required_parameters.push(member_name.clone());
                    } else {
                        schema.optional_parameters.push(member_name.clone());
                    }
                }
                // One bad member must not discard the operation: skip it
                // and report, keeping everything else
                Err(GeneratorError::ShapeNotFound(shape)) => {
                    diagnostics.push(MemberDiagnostic {
                        member: member_name.clone(),
                        shape,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(ExtractedCommand {
            schema,
            diagnostics,
        })
    }
}

/// An operation whose extraction aborted entirely
#[derive(Debug, Clone)]
pub struct SkippedOperation {
    pub operation: String,
    pub reason: String,
}
