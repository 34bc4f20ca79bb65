//! # Validator Field Specs
//!
//! The input side of schema derivation: a `FieldSpec` tree describes the
//! shape a request-body validator enforces — one node per field, with
//! `object` nodes carrying an ordered mapping of child fields.
//!
//! ## Invariants
//!
//! - Every `object` node has a non-empty `fields` mapping.
//! - Non-object nodes carry no `fields` mapping; if a descriptor declares
//!   one anyway it is ignored during construction.
//! - Declared field order is preserved (`IndexMap`), because it determines
//!   the property order of the emitted schema artifact.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The field types a validator descriptor may declare.
///
/// The named variants are the types the generator understands specially
/// (object recursion, example values). Anything else a validator library
/// produces is carried through verbatim as [`FieldType::Other`] — an
/// unlisted type string is not a malformation, it just gets no special
/// treatment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// A nested object with its own field mapping.
    Object,
    /// A string value.
    String,
    /// A numeric value.
    Number,
    /// An array value.
    Array,
    /// A date value, rendered as an ISO-8601 string.
    Date,
    /// A boolean value.
    Boolean,
    /// Any other type string, copied to the artifact unchanged.
    #[serde(untagged)]
    Other(String),
}

impl FieldType {
    /// The wire name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Object => "object",
            Self::String => "string",
            Self::Number => "number",
            Self::Array => "array",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Other(name) => name,
        }
    }

    /// Parse a wire name into a `FieldType`. Never fails: names outside
    /// the known set become [`FieldType::Other`].
    pub fn parse(s: &str) -> Self {
        match s {
            "object" => Self::Object,
            "string" => Self::String,
            "number" => Self::Number,
            "array" => Self::Array,
            "date" => Self::Date,
            "boolean" => Self::Boolean,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a validator's field tree.
///
/// The root of a validator descriptor is itself a `FieldSpec` (almost always
/// of type `object`). Construct via [`FieldSpec::from_value`], which checks
/// the structural invariants and reports [`MalformedSpecError`] otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// The declared type of this field.
    pub kind: FieldType,
    /// Whether the field may be absent. Defaults to `false`.
    pub optional: bool,
    /// Child fields, in declared order. Non-empty iff `kind` is `Object`.
    pub fields: IndexMap<String, FieldSpec>,
}

/// A validator descriptor that violates the field-tree shape rules.
#[derive(Error, Debug)]
pub enum MalformedSpecError {
    /// A field node is not a mapping at all.
    #[error("field '{path}' is not a mapping")]
    NotAMapping {
        /// Dotted path to the offending field, `(root)` for the tree root.
        path: String,
    },

    /// A field node has no `type` key.
    #[error("field '{path}' has no type")]
    MissingType {
        /// Dotted path to the offending field.
        path: String,
    },

    /// An `object` field declares no child fields.
    #[error("object field '{path}' declares no fields")]
    EmptyObject {
        /// Dotted path to the offending field.
        path: String,
    },
}

impl FieldSpec {
    /// Build a `FieldSpec` tree from a loosely-typed descriptor value.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedSpecError`] if any node is missing a `type` or
    /// is an `object` without fields. These are the only two failure
    /// modes; unlisted type strings are accepted as-is.
    pub fn from_value(value: &Value) -> Result<Self, MalformedSpecError> {
        Self::from_value_at(value, "(root)")
    }

    fn from_value_at(value: &Value, path: &str) -> Result<Self, MalformedSpecError> {
        let map = value
            .as_object()
            .ok_or_else(|| MalformedSpecError::NotAMapping { path: path.to_string() })?;

        let kind = map
            .get("type")
            .and_then(Value::as_str)
            .map(FieldType::parse)
            .ok_or_else(|| MalformedSpecError::MissingType { path: path.to_string() })?;

        let optional = map.get("optional").and_then(Value::as_bool).unwrap_or(false);

        let mut fields = IndexMap::new();
        if kind == FieldType::Object {
            let declared = map
                .get("fields")
                .and_then(Value::as_object)
                .filter(|m| !m.is_empty())
                .ok_or_else(|| MalformedSpecError::EmptyObject { path: path.to_string() })?;
            for (name, child) in declared {
                let child_path = if path == "(root)" {
                    name.clone()
                } else {
                    format!("{path}.{name}")
                };
                fields.insert(name.clone(), Self::from_value_at(child, &child_path)?);
            }
        }
        // `fields` on a non-object node is ignored.

        Ok(Self { kind, optional, fields })
    }

    /// Whether this node is an object with child fields.
    pub fn is_object(&self) -> bool {
        self.kind == FieldType::Object
    }
}
