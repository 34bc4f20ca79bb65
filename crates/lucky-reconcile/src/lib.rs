//! # lucky-reconcile — Output Reconciler
//!
//! The effectful half of the generator: given derived schema artifacts,
//! decide which files need writing and which documentation registry
//! entries need appending, without ever duplicating either. All file I/O
//! of the pipeline lives here.
//!
//! ## Guarantees
//!
//! - Running twice over unchanged inputs produces no second write and no
//!   duplicate registry entry.
//! - Registry state per target is read once, accumulated in memory, and
//!   flushed once — concurrent endpoints cannot lose each other's updates.
//! - Every failure path yields a distinguishable [`Event`]; nothing is
//!   silently swallowed.

pub mod fileref;
pub mod project;
pub mod reconcile;
pub mod registry;

pub use fileref::{file_ref, parse_doc_pointer, FileRefError};
pub use project::{ConfigParseError, ProjectDocument};
pub use reconcile::{Event, Reconciler, RunReport, Severity};
pub use registry::{DocRegistry, RegistryFlushError, RegistryTarget};
