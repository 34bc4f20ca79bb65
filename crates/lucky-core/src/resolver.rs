//! # Validator Resolution Capability
//!
//! Resolving a schema reference string to a loaded [`FieldSpec`] is an
//! external collaborator concern: the production implementation reads
//! descriptor files from the project filesystem, while tests substitute an
//! in-memory table. The core pipeline only sees this trait.
//!
//! A resolution failure is fatal for the referencing endpoint only; the
//! run continues with the remaining endpoints.

use std::path::Path;

use thiserror::Error;

use crate::spec::{FieldSpec, MalformedSpecError};

/// Failure to resolve a schema reference into a validator field tree.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No descriptor was found for the reference.
    #[error("validator '{schema_ref}' not found under {base_path}")]
    NotFound {
        /// The schema reference as declared on the endpoint.
        schema_ref: String,
        /// The validators base path that was searched.
        base_path: String,
    },

    /// The descriptor exists but is not parseable.
    #[error("validator '{schema_ref}' is unreadable: {reason}")]
    Unreadable {
        /// The schema reference as declared on the endpoint.
        schema_ref: String,
        /// Parse or IO failure detail.
        reason: String,
    },

    /// The descriptor parsed but violates the field-tree shape rules.
    #[error("validator '{schema_ref}' is malformed: {source}")]
    Malformed {
        /// The schema reference as declared on the endpoint.
        schema_ref: String,
        /// The underlying shape violation.
        source: MalformedSpecError,
    },
}

/// Capability to resolve schema references to validator field trees.
pub trait ValidatorResolver {
    /// Resolve `schema_ref` relative to `base_path` into a [`FieldSpec`].
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the reference cannot be located,
    /// read, or shaped into a well-formed field tree.
    fn resolve(&self, base_path: &Path, schema_ref: &str) -> Result<FieldSpec, ResolveError>;
}
