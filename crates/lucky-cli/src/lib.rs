//! # lucky-cli — Command-Line Front End
//!
//! Wires the deriver and reconciler to the outside world: clap argument
//! parsing, filesystem validator resolution, and the run loop that maps
//! reconciliation events onto log severities.

pub mod generate;
pub mod resolver;

pub use resolver::FsValidatorResolver;
