//! # Filesystem Validator Resolver
//!
//! Production implementation of the [`ValidatorResolver`] capability:
//! loads declarative validator descriptors (YAML or JSON) from the
//! project's `validatorsBasePath` directory.
//!
//! A reference may name the descriptor file exactly or omit its extension;
//! `<ref>`, `<ref>.yaml`, `<ref>.yml`, and `<ref>.json` are tried in that
//! order.

use std::path::{Path, PathBuf};

use lucky_core::{yaml_to_json, FieldSpec, ResolveError, ValidatorResolver};

/// Extensions tried when the reference does not name a file directly.
const DESCRIPTOR_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Resolver reading descriptor files from the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsValidatorResolver;

impl FsValidatorResolver {
    fn locate(base_path: &Path, schema_ref: &str) -> Option<PathBuf> {
        let direct = base_path.join(schema_ref);
        if direct.is_file() {
            return Some(direct);
        }
        for ext in DESCRIPTOR_EXTENSIONS {
            let candidate = base_path.join(format!("{schema_ref}.{ext}"));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }
}

impl ValidatorResolver for FsValidatorResolver {
    fn resolve(&self, base_path: &Path, schema_ref: &str) -> Result<FieldSpec, ResolveError> {
        let path = Self::locate(base_path, schema_ref).ok_or_else(|| ResolveError::NotFound {
            schema_ref: schema_ref.to_string(),
            base_path: base_path.display().to_string(),
        })?;

        let content = std::fs::read_to_string(&path).map_err(|e| ResolveError::Unreadable {
            schema_ref: schema_ref.to_string(),
            reason: format!("cannot read {}: {e}", path.display()),
        })?;

        // serde_yaml parses JSON descriptors as well.
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| ResolveError::Unreadable {
                schema_ref: schema_ref.to_string(),
                reason: format!("invalid descriptor {}: {e}", path.display()),
            })?;
        let value = yaml_to_json(&yaml).map_err(|reason| ResolveError::Unreadable {
            schema_ref: schema_ref.to_string(),
            reason,
        })?;

        FieldSpec::from_value(&value).map_err(|source| ResolveError::Malformed {
            schema_ref: schema_ref.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucky_core::FieldType;

    fn write_descriptor(dir: &Path, name: &str, content: &str) {
        if let Some(parent) = dir.join(name).parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_resolve_yaml_descriptor_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        write_descriptor(
            dir.path(),
            "user/create.yaml",
            "type: object\nfields:\n  email:\n    type: string\n",
        );
        let spec = FsValidatorResolver.resolve(dir.path(), "user/create").unwrap();
        assert_eq!(spec.kind, FieldType::Object);
        assert_eq!(spec.fields["email"].kind, FieldType::String);
    }

    #[test]
    fn test_resolve_json_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        write_descriptor(
            dir.path(),
            "order.json",
            r#"{ "type": "object", "fields": { "total": { "type": "number" } } }"#,
        );
        let spec = FsValidatorResolver.resolve(dir.path(), "order").unwrap();
        assert_eq!(spec.fields["total"].kind, FieldType::Number);
    }

    #[test]
    fn test_resolve_exact_filename() {
        let dir = tempfile::tempdir().unwrap();
        write_descriptor(dir.path(), "ping.yml", "type: object\nfields:\n  ok:\n    type: boolean\n");
        let spec = FsValidatorResolver.resolve(dir.path(), "ping.yml").unwrap();
        assert_eq!(spec.fields["ok"].kind, FieldType::Boolean);
    }

    #[test]
    fn test_resolve_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsValidatorResolver.resolve(dir.path(), "missing").unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));
    }

    #[test]
    fn test_resolve_unreadable_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        write_descriptor(dir.path(), "bad.yaml", "type: [unclosed");
        let err = FsValidatorResolver.resolve(dir.path(), "bad").unwrap_err();
        assert!(matches!(err, ResolveError::Unreadable { .. }));
    }

    #[test]
    fn test_resolve_malformed_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        write_descriptor(dir.path(), "empty.yaml", "type: object\n");
        let err = FsValidatorResolver.resolve(dir.path(), "empty").unwrap_err();
        assert!(matches!(err, ResolveError::Malformed { .. }));
    }
}
