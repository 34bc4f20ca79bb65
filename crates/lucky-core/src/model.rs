//! # Documentation Model Entries
//!
//! A `ModelEntry` is the record the reconciler inserts into a documentation
//! registry (inline or external) for each generated schema artifact.

use serde::{Deserialize, Serialize};

/// One record in a documentation registry's `models` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelEntry {
    /// Model name, derived from the function name in camelCase.
    pub name: String,
    /// MIME type of the request body.
    pub content_type: String,
    /// Free-form description. Empty for generated entries.
    #[serde(default)]
    pub description: String,
    /// File-reference expression pointing at the generated artifact,
    /// e.g. `${file(schemas/v1/POST.json)}`.
    pub schema_reference: String,
}

impl ModelEntry {
    /// Default content type when the endpoint declares none.
    pub const DEFAULT_CONTENT_TYPE: &'static str = "application/json";

    /// Whether `other` is a duplicate of this entry.
    ///
    /// The uniqueness key is (name, contentType, schemaReference); the
    /// description does not participate.
    pub fn is_duplicate_of(&self, other: &ModelEntry) -> bool {
        self.name == other.name
            && self.content_type == other.content_type
            && self.schema_reference == other.schema_reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, content_type: &str, reference: &str) -> ModelEntry {
        ModelEntry {
            name: name.to_string(),
            content_type: content_type.to_string(),
            description: String::new(),
            schema_reference: reference.to_string(),
        }
    }

    #[test]
    fn test_duplicate_ignores_description() {
        let a = entry("createUser", "application/json", "${file(schemas/v1/POST.json)}");
        let mut b = a.clone();
        b.description = "hand-written note".to_string();
        assert!(a.is_duplicate_of(&b));
    }

    #[test]
    fn test_not_duplicate_on_differing_reference() {
        let a = entry("createUser", "application/json", "${file(schemas/v1/POST.json)}");
        let b = entry("createUser", "application/json", "${file(schemas/v2/POST.json)}");
        assert!(!a.is_duplicate_of(&b));
    }

    #[test]
    fn test_serde_camel_case_keys() {
        let yaml = "name: createUser\ncontentType: application/json\ndescription: ''\nschemaReference: ${file(schemas/v1/POST.json)}\n";
        let parsed: ModelEntry = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.content_type, "application/json");
        let back = serde_yaml::to_string(&parsed).unwrap();
        assert!(back.contains("contentType:"));
        assert!(back.contains("schemaReference:"));
    }
}
