//! # lucky-schema — Schema Deriver
//!
//! The pure transformation at the heart of the generator: a validator's
//! [`FieldSpec`](lucky_core::FieldSpec) tree in, a [`SchemaNode`] tree out,
//! plus the 4-space-indented JSON rendering that lands on disk.
//!
//! Everything here is side-effect free; file placement and registry
//! bookkeeping live in `lucky-reconcile`.

pub mod derive;
pub mod emit;

pub use derive::{derive, DeriveOptions, SchemaNode};
pub use emit::to_json_pretty;
