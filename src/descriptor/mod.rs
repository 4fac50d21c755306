//! Data product descriptor validation and identity field generation.
//!
//! Layout, leaf first:
//! - `semver` - SemVer 2.0.0 predicate
//! - `identity` - FQN / mesh namespace / UUID v5 derivation
//! - `context` - per-run error accumulator and uniqueness registries
//! - `cursor` + `traversal` - the mode-parameterised walk over the tree
//! - `validator` - entry points
//!
//! `parse` and `variables` sit outside the engine: text in, text substitution.

pub mod context;
pub mod cursor;
pub mod identity;
pub mod parse;
pub mod semver;
pub mod traversal;
pub mod validator;
pub mod variables;

pub use context::ValidationContext;
pub use identity::{
    extract_mesh_namespace, generate_component_fqn, generate_id,
    generate_standard_definition_fqn, ComponentKind, DefinitionContext, PortKind,
};
pub use parse::{parse_descriptor, to_pretty_json};
pub use traversal::Mode;
pub use validator::{generate_only, run, validate, validate_and_generate, ValidationReport};
pub use variables::{extract_variables, parse_bindings, substitute, Substitution};
