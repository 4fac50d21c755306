//! Data product descriptor registry
//!
//! The core of the registry is the descriptor engine in [`descriptor`]: a
//! single walk over a parsed DPDS document that validates rules a static
//! schema cannot express and derives missing identity fields
//! (`entityType`, `fullyQualifiedName`, `id`).
//!
//! Around it:
//! - [`lifecycle`] - init/approve/reject/publish status transitions
//! - [`publish`] - the publish use case tying parsing, variables, validation and lifecycle together
//! - [`config`] - command line / environment configuration for the `dpds-validate` binary

pub mod config;
pub mod descriptor;
pub mod error;
pub mod lifecycle;
pub mod publish;

pub use descriptor_types;
pub use error::{
    ErrorKind, FieldError, IdentityError, RegistryError, RegistryResult, ValidationFailure,
};
