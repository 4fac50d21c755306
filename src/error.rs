//! Error types for the descriptor registry
//!
//! Library code returns [`RegistryError`]; binaries wrap it in `anyhow`.
//! Validation problems are never raised one at a time: they are collected into a
//! [`ValidationFailure`] and surfaced once, after the whole document was walked.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lifecycle::LifecycleError;

/// Main error type for the registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No descriptor document at all. The only fail-fast condition of a run.
    #[error("Descriptor document is missing")]
    MissingDescriptor,

    /// Every violation found in one pass over the document.
    #[error("{0}")]
    Validation(ValidationFailure),

    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] IdentityError),

    #[error("Invalid descriptor JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unresolved descriptor variables: {}", .0.join(", "))]
    UnresolvedVariables(Vec<String>),

    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),
}

impl RegistryError {
    /// Status code a REST surface should answer with.
    ///
    /// Everything caused by the submitted document is a client error and
    /// must not be retried as-is.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingDescriptor
            | Self::Validation(_)
            | Self::InvalidArgument(_)
            | Self::Parse(_)
            | Self::UnresolvedVariables(_) => 400,
            Self::Lifecycle(_) => 409,
        }
    }

    /// The individual violations, when this is a validation failure.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(failure) => &failure.errors,
            _ => &[],
        }
    }
}

/// Failures of the pure identity generation functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("'{0}' must not be empty")]
    EmptyArgument(&'static str),

    #[error("Cannot extract mesh namespace from '{0}': missing ':dataproducts:' segment")]
    MissingMeshNamespace(String),
}

// ============================================================================
// ACCUMULATED FIELD ERRORS
// ============================================================================

/// Category of a single accumulated violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingRequiredField,
    InvalidSemanticVersion,
    DuplicateName,
    InvalidOrDuplicateComponentKey,
    EntityTypeMismatch,
    FqnMismatch,
    FqnExtractionFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::InvalidSemanticVersion => "invalid_semantic_version",
            Self::DuplicateName => "duplicate_name",
            Self::InvalidOrDuplicateComponentKey => "invalid_or_duplicate_component_key",
            Self::EntityTypeMismatch => "entity_type_mismatch",
            Self::FqnMismatch => "fqn_mismatch",
            Self::FqnExtractionFailure => "fqn_extraction_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One violation, tagged with the dotted path of the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// e.g. `interfaceComponents.outputPorts[0].version`; empty for document-level errors
    pub field_path: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field_path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field_path, self.message)
        }
    }
}

/// Aggregate validation failure carrying every violation of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub errors: Vec<FieldError>,
}

impl ValidationFailure {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn field(path: &str, message: &str) -> FieldError {
        FieldError {
            field_path: path.to_string(),
            kind: ErrorKind::MissingRequiredField,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_aggregate_message_joins_with_semicolons() {
        let failure = ValidationFailure::new(vec![
            field("info.name", "Required field is missing or empty"),
            field("", "Document-level problem"),
            field("info.domain", "Required field is missing or empty"),
        ]);
        assert_eq!(
            failure.to_string(),
            "info.name: Required field is missing or empty; Document-level problem; \
             info.domain: Required field is missing or empty"
        );
    }

    #[test]
    fn test_registry_error_display_is_aggregate_message() {
        let err = RegistryError::Validation(ValidationFailure::new(vec![field("a", "b")]));
        assert_eq!(err.to_string(), "a: b");
        assert_eq!(err.field_errors().len(), 1);
    }

    // ── http_status ──────────────────────────────────────────────

    #[test]
    fn http_status_client_errors() {
        assert_eq!(RegistryError::MissingDescriptor.http_status(), 400);
        assert_eq!(
            RegistryError::Validation(ValidationFailure::new(vec![])).http_status(),
            400
        );
        assert_eq!(
            RegistryError::InvalidArgument(IdentityError::EmptyArgument("name")).http_status(),
            400
        );
        assert_eq!(
            RegistryError::UnresolvedVariables(vec!["env".into()]).http_status(),
            400
        );
    }

    #[test]
    fn display_unresolved_variables() {
        let err = RegistryError::UnresolvedVariables(vec!["env".into(), "region".into()]);
        assert_eq!(err.to_string(), "Unresolved descriptor variables: env, region");
    }

    #[test]
    fn display_identity_error() {
        let err = IdentityError::MissingMeshNamespace("urn:x".into());
        assert_eq!(
            err.to_string(),
            "Cannot extract mesh namespace from 'urn:x': missing ':dataproducts:' segment"
        );
    }
}
