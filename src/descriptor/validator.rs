//! Entry points of the descriptor engine.
//!
//! - [`validate`] checks a document without touching it
//! - [`validate_and_generate`] checks and fills missing identity fields in one pass
//! - [`generate_only`] fills identity fields of a document that already passed validation
//! - [`run`] is the report-returning form used when the caller wants the raw
//!   error list instead of an aggregate failure
//!
//! A missing document is the only condition that aborts a run; every other
//! violation is collected and reported together once the walk is complete.

use descriptor_types::DataProductDescriptor;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::cursor::Cursor;
use super::traversal::{Mode, Walker};
use crate::error::{FieldError, RegistryError, RegistryResult, ValidationFailure};

/// Outcome of one traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub mode: Mode,
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Escalate to the aggregate failure when any error was collected.
    pub fn into_result(self) -> RegistryResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::Validation(ValidationFailure::new(self.errors)))
        }
    }
}

fn walk(
    root: Cursor<'_, DataProductDescriptor>,
    mode: Mode,
    expected_fqn: Option<&str>,
) -> ValidationReport {
    let mut walker = Walker::new(mode);
    walker.visit_descriptor(root, expected_fqn);
    let errors = walker.into_errors();

    if errors.is_empty() {
        info!(mode = %mode, "descriptor traversal complete");
    } else {
        warn!(mode = %mode, error_count = errors.len(), "descriptor failed validation");
    }
    ValidationReport { mode, errors }
}

/// Run one traversal in `mode` and return the full report.
///
/// `ValidateOnly` reads the tree through a shared borrow even though a
/// mutable one was handed in, so it never mutates.
pub fn run(
    root: Option<&mut DataProductDescriptor>,
    mode: Mode,
    expected_fqn: Option<&str>,
) -> RegistryResult<ValidationReport> {
    let root = root.ok_or(RegistryError::MissingDescriptor)?;
    let cursor = match mode {
        Mode::ValidateOnly => Cursor::Read(&*root),
        Mode::ValidateAndGenerate | Mode::GenerateOnly => Cursor::Write(root),
    };
    Ok(walk(cursor, mode, expected_fqn))
}

/// Validate without generating anything.
pub fn validate(
    root: Option<&DataProductDescriptor>,
    expected_fqn: Option<&str>,
) -> RegistryResult<()> {
    let root = root.ok_or(RegistryError::MissingDescriptor)?;
    walk(Cursor::Read(root), Mode::ValidateOnly, expected_fqn).into_result()
}

/// Validate and fill missing `entityType`, `fullyQualifiedName` and `id` fields.
///
/// On failure the tree may already carry generated values; callers must
/// discard it rather than persist it.
pub fn validate_and_generate<'a>(
    root: Option<&'a mut DataProductDescriptor>,
    expected_fqn: Option<&str>,
) -> RegistryResult<&'a mut DataProductDescriptor> {
    let root = root.ok_or(RegistryError::MissingDescriptor)?;
    walk(
        Cursor::Write(&mut *root),
        Mode::ValidateAndGenerate,
        expected_fqn,
    )
    .into_result()?;
    Ok(root)
}

/// Fill missing identity fields of a tree that already passed validation.
///
/// Nodes lacking the inputs for a derived value are left as they are.
pub fn generate_only(
    root: Option<&mut DataProductDescriptor>,
) -> RegistryResult<&mut DataProductDescriptor> {
    let root = root.ok_or(RegistryError::MissingDescriptor)?;
    walk(Cursor::Write(&mut *root), Mode::GenerateOnly, None);
    Ok(root)
}
