//! # Artifact Emission
//!
//! Renders a derived [`SchemaNode`](crate::SchemaNode) tree to the on-disk
//! artifact format: UTF-8 JSON, 4-space indented, trailing newline.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Serialize a value as 4-space-indented JSON with a trailing newline.
///
/// # Errors
///
/// Returns the underlying `serde_json` error; derived schema trees always
/// serialize cleanly, so this surfaces only for foreign `Serialize` impls.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    // The serializer only ever writes valid UTF-8.
    String::from_utf8(buf).map_err(serde::ser::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{derive, DeriveOptions};
    use lucky_core::FieldSpec;
    use serde_json::json;

    #[test]
    fn test_four_space_indent() {
        let spec = FieldSpec::from_value(&json!({
            "type": "object",
            "fields": { "email": { "type": "string" } }
        }))
        .unwrap();
        let node = derive(&spec, &DeriveOptions::new(false)).unwrap();
        let text = to_json_pretty(&node).unwrap();
        assert!(text.contains("\n    \"required\": true"));
        assert!(text.contains("\n        \"email\": {"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_emitted_key_order() {
        let spec = FieldSpec::from_value(&json!({
            "type": "object",
            "fields": {
                "second": { "type": "number", "optional": true },
                "first": { "type": "string" }
            }
        }))
        .unwrap();
        let node = derive(&spec, &DeriveOptions::new(false)).unwrap();
        let text = to_json_pretty(&node).unwrap();
        let second = text.find("\"second\"").unwrap();
        let first = text.find("\"first\"").unwrap();
        assert!(second < first, "declared order must survive emission:\n{text}");
    }
}
