//! # Generator Configuration & Endpoint Bindings
//!
//! The declarative inputs of a run: the `custom.lucky` section of the
//! project file, and one binding per declared HTTP endpoint that references
//! a named validator.

use serde::{Deserialize, Serialize};

/// The `custom.lucky` section of the project configuration file.
///
/// Paths are interpreted relative to the project root. Both flags default
/// to `false` when not declared.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LuckyConfig {
    /// Directory containing validator descriptor files.
    pub validators_base_path: String,
    /// Directory under which schema artifacts are written.
    pub output_path: String,
    /// Whether the documentation registry lives inline in the project file.
    #[serde(default)]
    pub inline_docs: bool,
    /// Whether derived schemas carry example values.
    #[serde(default)]
    pub use_examples: bool,
}

/// One declared API route's reference to a validator.
///
/// Extracted from a function's first `httpApi` event. Duplicate folder
/// identifiers are allowed here; the reconciler collapses them to a set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointBinding {
    /// The declared function name, as written in the project file.
    pub function: String,
    /// HTTP verb, cased exactly as declared. Names the output artifact.
    pub method: String,
    /// Lookup key for the validator descriptor, relative to the base path.
    pub schema_ref: String,
    /// Destination folder identifiers. Duplicates allowed.
    pub folders: Vec<String>,
    /// Content type for the documentation model entry, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl EndpointBinding {
    /// The output artifact filename: `<method>.json`, method cased as declared.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.method)
    }
}
