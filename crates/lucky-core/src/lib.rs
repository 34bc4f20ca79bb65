//! # lucky-core — Foundational Types for the Schema Generator
//!
//! `lucky` turns object-shape validators describing HTTP request bodies
//! into JSON-Schema-like artifacts and registers them in a documentation
//! configuration. This crate defines the types shared by the deriver and
//! the reconciler; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Open type set.** `FieldType` names the types the generator treats
//!    specially; any other type string a validator declares is carried
//!    through unchanged as `FieldType::Other`.
//!
//! 2. **Order-preserving field maps.** Validator field order determines the
//!    property order of the emitted artifact, so every field mapping is an
//!    `IndexMap`, never a sorted or hashed map.
//!
//! 3. **Resolution as a capability.** `ValidatorResolver` is a trait; the
//!    core never touches the filesystem to load a validator.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lucky-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod model;
pub mod naming;
pub mod resolver;
pub mod spec;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use config::{EndpointBinding, LuckyConfig};
pub use model::ModelEntry;
pub use naming::camel_case;
pub use resolver::{ResolveError, ValidatorResolver};
pub use spec::{FieldSpec, FieldType, MalformedSpecError};
pub use value::yaml_to_json;
