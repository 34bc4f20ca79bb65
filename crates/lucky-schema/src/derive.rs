//! # Schema Derivation
//!
//! The pure half of the generator: walk a validator's field tree and
//! produce the mirror-shaped [`SchemaNode`] tree. No I/O, no side effects.
//!
//! ## Contract
//!
//! - Depth-first, pre-order; properties appear in declared field order.
//! - `required: true` is set iff the field is not optional. An optional
//!   field carries **no** `required` key at all — consumers treat a missing
//!   key as false, but the distinction is observable in the emitted
//!   artifact and must survive serialization byte-for-byte.
//! - Example values are attached only when enabled by configuration, per a
//!   fixed mapping: string → `""`, array → `[]`, number → `10`, date → the
//!   clock instant as an ISO-8601 string. Other types get no example.
//!
//! ## Determinism
//!
//! The only non-deterministic input is the `date` example timestamp. The
//! clock instant lives in [`DeriveOptions`]; deriving twice with the same
//! options yields byte-identical output.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use lucky_core::{FieldSpec, FieldType, MalformedSpecError};

/// One node of a derived schema tree.
///
/// Mirrors the shape of the validator's [`FieldSpec`] tree. Constructed
/// fresh on every run and never mutated after construction; `None` fields
/// are omitted entirely on serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// The field type, copied from the validator.
    #[serde(rename = "type")]
    pub kind: FieldType,

    /// `Some(true)` iff the field was not optional; never `Some(false)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Example value, present only when example generation is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Child schema nodes, present only for object fields, declared order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,
}

/// Options controlling a derivation pass.
#[derive(Debug, Clone)]
pub struct DeriveOptions {
    /// Whether to attach example values to primitive fields.
    pub include_examples: bool,
    /// The instant used for `date` example values.
    pub now: DateTime<Utc>,
}

impl DeriveOptions {
    /// Options with the current UTC time as the clock instant.
    pub fn new(include_examples: bool) -> Self {
        Self { include_examples, now: Utc::now() }
    }

    /// Options with a fixed clock instant, for deterministic output.
    pub fn with_clock(include_examples: bool, now: DateTime<Utc>) -> Self {
        Self { include_examples, now }
    }
}

/// Derive a schema tree from a validator field tree.
///
/// Recursive, depth-first, pre-order on properties in declared field order.
///
/// # Errors
///
/// Well-formed input never fails. Returns [`MalformedSpecError`] only when
/// an `object` node reached during the walk has no child fields — the one
/// shape violation [`FieldSpec`] construction cannot rule out for trees
/// assembled by hand.
pub fn derive(spec: &FieldSpec, options: &DeriveOptions) -> Result<SchemaNode, MalformedSpecError> {
    derive_at(spec, options, "(root)")
}

fn derive_at(
    spec: &FieldSpec,
    options: &DeriveOptions,
    path: &str,
) -> Result<SchemaNode, MalformedSpecError> {
    let required = if spec.optional { None } else { Some(true) };

    if spec.kind == FieldType::Object {
        if spec.fields.is_empty() {
            return Err(MalformedSpecError::EmptyObject { path: path.to_string() });
        }
        let mut properties = IndexMap::with_capacity(spec.fields.len());
        for (name, child) in &spec.fields {
            let child_path = if path == "(root)" {
                name.clone()
            } else {
                format!("{path}.{name}")
            };
            properties.insert(name.clone(), derive_at(child, options, &child_path)?);
        }
        return Ok(SchemaNode {
            kind: FieldType::Object,
            required,
            example: None,
            properties: Some(properties),
        });
    }

    let example = if options.include_examples {
        example_for(&spec.kind, &options.now)
    } else {
        None
    };

    Ok(SchemaNode { kind: spec.kind.clone(), required, example, properties: None })
}

/// The fixed example mapping. Types outside it get no example.
fn example_for(kind: &FieldType, now: &DateTime<Utc>) -> Option<Value> {
    match kind {
        FieldType::String => Some(json!("")),
        FieldType::Array => Some(json!([])),
        FieldType::Number => Some(json!(10)),
        FieldType::Date => Some(Value::String(
            now.to_rfc3339_opts(SecondsFormat::Millis, true),
        )),
        FieldType::Object | FieldType::Boolean | FieldType::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn spec(value: Value) -> FieldSpec {
        FieldSpec::from_value(&value).unwrap()
    }

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_email_age_scenario() {
        // Required string + optional number, examples disabled.
        let spec = spec(json!({
            "type": "object",
            "fields": {
                "email": { "type": "string", "optional": false },
                "age": { "type": "number", "optional": true }
            }
        }));
        let node = derive(&spec, &DeriveOptions::new(false)).unwrap();

        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "type": "object",
                "required": true,
                "properties": {
                    "email": { "type": "string", "required": true },
                    "age": { "type": "number" }
                }
            })
        );
    }

    #[test]
    fn test_optional_field_has_no_required_key() {
        let spec = spec(json!({
            "type": "object",
            "fields": { "nickname": { "type": "string", "optional": true } }
        }));
        let node = derive(&spec, &DeriveOptions::new(false)).unwrap();
        let emitted = serde_json::to_string(&node).unwrap();
        // Absence-as-false: no "required" key anywhere under nickname,
        // and in particular never `"required":false`.
        let nickname = &serde_json::from_str::<Value>(&emitted).unwrap()["properties"]["nickname"];
        assert!(nickname.get("required").is_none());
        assert!(!emitted.contains("false"));
    }

    #[test]
    fn test_property_order_matches_declaration() {
        let spec = spec(json!({
            "type": "object",
            "fields": {
                "zulu": { "type": "string" },
                "alpha": { "type": "number" },
                "mike": { "type": "boolean" }
            }
        }));
        let node = derive(&spec, &DeriveOptions::new(false)).unwrap();
        let keys: Vec<&String> = node.properties.as_ref().unwrap().keys().collect();
        assert_eq!(keys, ["zulu", "alpha", "mike"]);
    }

    #[test]
    fn test_nested_depth_matches() {
        let spec = spec(json!({
            "type": "object",
            "fields": {
                "address": {
                    "type": "object",
                    "fields": {
                        "geo": {
                            "type": "object",
                            "fields": { "lat": { "type": "number" } }
                        }
                    }
                }
            }
        }));
        let node = derive(&spec, &DeriveOptions::new(false)).unwrap();
        let geo = &node.properties.as_ref().unwrap()["address"]
            .properties
            .as_ref()
            .unwrap()["geo"];
        let lat = &geo.properties.as_ref().unwrap()["lat"];
        assert_eq!(lat.kind, FieldType::Number);
        assert!(lat.properties.is_none());
    }

    #[test]
    fn test_examples_fixed_mapping() {
        let spec = spec(json!({
            "type": "object",
            "fields": {
                "name": { "type": "string" },
                "tags": { "type": "array" },
                "count": { "type": "number" },
                "when": { "type": "date" },
                "active": { "type": "boolean" }
            }
        }));
        let options = DeriveOptions::with_clock(true, fixed_clock());
        let node = derive(&spec, &options).unwrap();
        let props = node.properties.as_ref().unwrap();
        assert_eq!(props["name"].example, Some(json!("")));
        assert_eq!(props["tags"].example, Some(json!([])));
        assert_eq!(props["count"].example, Some(json!(10)));
        assert_eq!(props["when"].example, Some(json!("2026-01-15T12:00:00.000Z")));
        // Boolean has no mapped example rule.
        assert_eq!(props["active"].example, None);
    }

    #[test]
    fn test_unlisted_type_carried_through_without_example() {
        // A type outside the specially-handled set flows to the artifact
        // unchanged and simply gets no example value.
        let spec = spec(json!({
            "type": "object",
            "fields": { "payload": { "type": "mixed" } }
        }));
        let options = DeriveOptions::with_clock(true, fixed_clock());
        let node = derive(&spec, &options).unwrap();
        let payload = &node.properties.as_ref().unwrap()["payload"];
        assert_eq!(payload.kind, FieldType::Other("mixed".to_string()));
        assert_eq!(payload.example, None);
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            json!({ "type": "mixed", "required": true })
        );
    }

    #[test]
    fn test_examples_disabled_attaches_none() {
        let spec = spec(json!({
            "type": "object",
            "fields": { "when": { "type": "date" } }
        }));
        let node = derive(&spec, &DeriveOptions::new(false)).unwrap();
        assert_eq!(node.properties.as_ref().unwrap()["when"].example, None);
    }

    #[test]
    fn test_fixed_clock_is_deterministic() {
        let spec = spec(json!({
            "type": "object",
            "fields": {
                "when": { "type": "date" },
                "name": { "type": "string" }
            }
        }));
        let options = DeriveOptions::with_clock(true, fixed_clock());
        let first = serde_json::to_string(&derive(&spec, &options).unwrap()).unwrap();
        let second = serde_json::to_string(&derive(&spec, &options).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialize_parse_roundtrip() {
        let spec = spec(json!({
            "type": "object",
            "fields": {
                "email": { "type": "string" },
                "address": {
                    "type": "object",
                    "optional": true,
                    "fields": { "zip": { "type": "string", "optional": true } }
                }
            }
        }));
        let node = derive(&spec, &DeriveOptions::with_clock(true, fixed_clock())).unwrap();
        let text = serde_json::to_string(&node).unwrap();
        let parsed: SchemaNode = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, node);
    }

    #[test]
    fn test_hand_built_empty_object_rejected() {
        // FieldSpec assembled directly, bypassing from_value.
        let spec = FieldSpec {
            kind: FieldType::Object,
            optional: false,
            fields: indexmap::IndexMap::new(),
        };
        let err = derive(&spec, &DeriveOptions::new(false)).unwrap_err();
        assert!(matches!(err, MalformedSpecError::EmptyObject { .. }));
    }
}
