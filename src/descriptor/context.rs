//! Per-run error accumulator and uniqueness registries.
//!
//! A [`ValidationContext`] belongs to exactly one run. Registries only grow:
//! once a name or key has been seen, any later occurrence in the same registry
//! is reported as a duplicate.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use super::identity::{ComponentKind, PortKind};
use crate::error::{ErrorKind, FieldError};

pub const MISSING_FIELD_MESSAGE: &str = "Required field is missing or empty";

static COMPONENT_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").unwrap());

#[derive(Debug, Default)]
pub struct ValidationContext {
    errors: Vec<FieldError>,
    port_names: HashMap<PortKind, HashSet<String>>,
    component_names: HashMap<ComponentKind, HashSet<String>>,
    /// Collection label (e.g. `components.inputPorts`) -> keys seen so far
    component_keys: HashMap<String, HashSet<String>>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditionally record a violation.
    pub fn add_error(
        &mut self,
        field_path: impl Into<String>,
        kind: ErrorKind,
        message: impl Into<String>,
    ) {
        self.errors.push(FieldError {
            field_path: field_path.into(),
            kind,
            message: message.into(),
        });
    }

    /// Record a missing field error when `value` is absent or empty.
    /// Returns true when the field was missing.
    pub fn require(&mut self, value: Option<&str>, field_path: impl Into<String>) -> bool {
        if value.is_some_and(|v| !v.is_empty()) {
            return false;
        }
        self.add_error(field_path, ErrorKind::MissingRequiredField, MISSING_FIELD_MESSAGE);
        true
    }

    /// Register a port name for its collection. Returns true on a duplicate.
    /// Empty names are ignored; the required-field check reports them.
    pub fn add_port_name(&mut self, kind: PortKind, name: &str, field_path: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        let inserted = self
            .port_names
            .entry(kind)
            .or_default()
            .insert(name.to_string());
        if !inserted {
            self.add_error(
                field_path,
                ErrorKind::DuplicateName,
                format!("Duplicate {} name '{}'", kind.label(), name),
            );
        }
        !inserted
    }

    /// Register an application or infrastructural component name. Returns true on a duplicate.
    pub fn add_component_name(
        &mut self,
        kind: ComponentKind,
        name: &str,
        field_path: &str,
    ) -> bool {
        if name.is_empty() {
            return false;
        }
        let inserted = self
            .component_names
            .entry(kind)
            .or_default()
            .insert(name.to_string());
        if !inserted {
            self.add_error(
                field_path,
                ErrorKind::DuplicateName,
                format!("Duplicate {} name '{}'", kind.label(), name),
            );
        }
        !inserted
    }

    /// Check a reusable component key for emptiness, format, then uniqueness
    /// within `collection_label`. At most one error is emitted per key.
    /// Returns true when an error was recorded.
    pub fn add_component_key(
        &mut self,
        collection_label: &str,
        key: &str,
        field_path: &str,
    ) -> bool {
        if key.is_empty() {
            self.add_error(
                field_path,
                ErrorKind::InvalidOrDuplicateComponentKey,
                format!("Component key in '{collection_label}' must not be empty"),
            );
            return true;
        }
        if !COMPONENT_KEY_RE.is_match(key) {
            self.add_error(
                field_path,
                ErrorKind::InvalidOrDuplicateComponentKey,
                format!(
                    "Component key '{key}' is invalid: only letters, digits, '.', '_' and '-' are allowed"
                ),
            );
            return true;
        }
        let inserted = self
            .component_keys
            .entry(collection_label.to_string())
            .or_default()
            .insert(key.to_string());
        if !inserted {
            self.add_error(
                field_path,
                ErrorKind::InvalidOrDuplicateComponentKey,
                format!("Duplicate component key '{key}' in '{collection_label}'"),
            );
        }
        !inserted
    }

    /// Compare a node's declared entity type with the one its position implies.
    /// An absent or empty value is not an error here: generation fills it.
    pub fn add_error_if_invalid_entity_type(
        &mut self,
        actual: Option<&str>,
        expected: &str,
        field_path: &str,
    ) -> bool {
        match actual {
            Some(actual) if !actual.is_empty() && actual != expected => {
                self.add_error(
                    field_path,
                    ErrorKind::EntityTypeMismatch,
                    format!("Entity type '{actual}' does not match expected '{expected}'"),
                );
                true
            }
            _ => false,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}
