//! # Project Configuration Document
//!
//! The serverless-style project YAML is the single host input: it declares
//! the generator's own configuration (`custom.lucky`), the optional
//! documentation registry (`custom.documentation`), and the functions
//! whose first `httpApi` event may carry a validator binding.
//!
//! The document is kept as a raw `serde_yaml::Value` so that inline
//! registry updates can be written back without disturbing unrelated keys;
//! typed views (`LuckyConfig`, `EndpointBinding`) are deserialized on
//! demand.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use lucky_core::{EndpointBinding, LuckyConfig};

use crate::fileref::FileRefError;

/// Unusable project or registry configuration. Fatal for the run.
#[derive(Error, Debug)]
pub enum ConfigParseError {
    /// A YAML document could not be read or parsed.
    #[error("cannot parse {path}: {reason}")]
    Yaml {
        /// The file that failed to parse.
        path: String,
        /// Parse or IO failure detail.
        reason: String,
    },

    /// The project file has no `custom.lucky` section.
    #[error("{path} declares no custom.lucky section")]
    MissingLuckySection {
        /// The project file that was inspected.
        path: String,
    },

    /// The `custom.lucky` section does not match the expected shape.
    #[error("invalid custom.lucky section in {path}: {reason}")]
    InvalidLuckySection {
        /// The project file that was inspected.
        path: String,
        /// Deserialization failure detail.
        reason: String,
    },

    /// `custom.documentation` is a string without a usable file pointer.
    #[error("invalid documentation reference in {path}: {source}")]
    DocPointer {
        /// The project file that was inspected.
        path: String,
        /// The pointer grammar violation.
        source: FileRefError,
    },
}

/// The `lucky` binding carried by an `httpApi` event.
#[derive(Debug, Deserialize)]
struct EventBinding {
    schema: String,
    folders: Vec<String>,
}

/// A loaded project configuration document.
#[derive(Debug, Clone)]
pub struct ProjectDocument {
    path: PathBuf,
    document: serde_yaml::Value,
}

impl ProjectDocument {
    /// Load and parse the project YAML at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigParseError::Yaml`] when the file cannot be read or
    /// is not valid YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigParseError> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigParseError::Yaml {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        })?;
        Self::parse(path, &content)
    }

    /// Parse a project document from already-loaded YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigParseError::Yaml`] when the text is not valid YAML.
    pub fn parse(path: PathBuf, content: &str) -> Result<Self, ConfigParseError> {
        let document: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigParseError::Yaml {
                path: path.display().to_string(),
                reason: format!("invalid YAML: {e}"),
            })?;
        Ok(Self { path, document })
    }

    /// The path this document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deserialize the `custom.lucky` section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigParseError`] when the section is absent or does not
    /// match the expected shape.
    pub fn lucky_config(&self) -> Result<LuckyConfig, ConfigParseError> {
        let section = self
            .document
            .get("custom")
            .and_then(|c| c.get("lucky"))
            .ok_or_else(|| ConfigParseError::MissingLuckySection {
                path: self.path.display().to_string(),
            })?;
        serde_yaml::from_value(section.clone()).map_err(|e| {
            ConfigParseError::InvalidLuckySection {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// The raw `custom.documentation` value, if declared at all.
    pub fn documentation(&self) -> Option<&serde_yaml::Value> {
        self.document.get("custom").and_then(|c| c.get("documentation"))
    }

    /// Extract one endpoint binding per declared function.
    ///
    /// Only the first event of each function is consulted, and only when it
    /// is an `httpApi` event carrying a `lucky` section; functions without
    /// a binding are skipped silently. A present-but-misshapen binding is
    /// also skipped, with a log entry naming the function.
    pub fn endpoints(&self) -> Vec<EndpointBinding> {
        let Some(functions) = self
            .document
            .get("functions")
            .and_then(serde_yaml::Value::as_mapping)
        else {
            return Vec::new();
        };

        let mut bindings = Vec::new();
        for (name, def) in functions {
            let Some(name) = name.as_str() else { continue };
            let Some(http_api) = def
                .get("events")
                .and_then(serde_yaml::Value::as_sequence)
                .and_then(|events| events.first())
                .and_then(|event| event.get("httpApi"))
            else {
                continue;
            };
            let Some(lucky) = http_api.get("lucky") else {
                continue;
            };
            let Some(method) = http_api.get("method").and_then(serde_yaml::Value::as_str)
            else {
                tracing::error!(function = name, "httpApi event declares no method, skipping");
                continue;
            };
            let binding: EventBinding = match serde_yaml::from_value(lucky.clone()) {
                Ok(b) => b,
                Err(e) => {
                    tracing::error!(function = name, error = %e, "invalid lucky binding, skipping");
                    continue;
                }
            };
            let content_type = http_api
                .get("contentType")
                .and_then(serde_yaml::Value::as_str)
                .map(str::to_string);
            bindings.push(EndpointBinding {
                function: name.to_string(),
                method: method.to_string(),
                schema_ref: binding.schema,
                folders: binding.folders,
                content_type,
            });
        }
        bindings
    }

    /// Replace the `custom.documentation.models` list in the document.
    ///
    /// Used by the inline registry flush. Creates the `models` key when the
    /// documentation section exists without one.
    pub fn set_documentation_models(&mut self, models: serde_yaml::Value) {
        if let Some(doc) = self
            .document
            .get_mut("custom")
            .and_then(|c| c.get_mut("documentation"))
        {
            if let Some(mapping) = doc.as_mapping_mut() {
                mapping.insert(serde_yaml::Value::from("models"), models);
            } else {
                // documentation declared as null or scalar: replace wholesale.
                let mut mapping = serde_yaml::Mapping::new();
                mapping.insert(serde_yaml::Value::from("models"), models);
                *doc = serde_yaml::Value::Mapping(mapping);
            }
        }
    }

    /// Serialize the document back to YAML text.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_yaml` error, which does not occur for
    /// documents that were loaded from YAML in the first place.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = r#"
service: demo
custom:
  lucky:
    validatorsBasePath: validators
    outputPath: schemas
    useExamples: true
  documentation: "${file(docs/models.yml):documentation}"
functions:
  create_user:
    events:
      - httpApi:
          method: POST
          path: /users
          contentType: application/json
          lucky:
            schema: user/create
            folders: [v1, v1, v2]
  health:
    events:
      - httpApi:
          method: GET
          path: /health
"#;

    fn project() -> ProjectDocument {
        ProjectDocument::parse(PathBuf::from("serverless.yml"), PROJECT).unwrap()
    }

    #[test]
    fn test_lucky_config_extraction() {
        let config = project().lucky_config().unwrap();
        assert_eq!(config.validators_base_path, "validators");
        assert_eq!(config.output_path, "schemas");
        assert!(config.use_examples);
        assert!(!config.inline_docs);
    }

    #[test]
    fn test_missing_lucky_section() {
        let doc =
            ProjectDocument::parse(PathBuf::from("serverless.yml"), "service: demo\n").unwrap();
        let err = doc.lucky_config().unwrap_err();
        assert!(matches!(err, ConfigParseError::MissingLuckySection { .. }));
    }

    #[test]
    fn test_invalid_yaml_is_fatal() {
        let err =
            ProjectDocument::parse(PathBuf::from("serverless.yml"), "a: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigParseError::Yaml { .. }));
    }

    #[test]
    fn test_endpoint_extraction() {
        let endpoints = project().endpoints();
        assert_eq!(endpoints.len(), 1);
        let ep = &endpoints[0];
        assert_eq!(ep.function, "create_user");
        assert_eq!(ep.method, "POST");
        assert_eq!(ep.schema_ref, "user/create");
        assert_eq!(ep.folders, ["v1", "v1", "v2"]);
        assert_eq!(ep.content_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn test_function_without_binding_skipped() {
        // `health` has an httpApi event but no lucky section.
        let endpoints = project().endpoints();
        assert!(endpoints.iter().all(|e| e.function != "health"));
    }

    #[test]
    fn test_documentation_value_present() {
        let doc = project();
        let documentation = doc.documentation().unwrap();
        assert!(documentation.as_str().unwrap().contains("docs/models.yml"));
    }

    #[test]
    fn test_set_documentation_models_on_string_section() {
        let mut doc = project();
        doc.set_documentation_models(serde_yaml::Value::Sequence(Vec::new()));
        let yaml = doc.to_yaml().unwrap();
        assert!(yaml.contains("models"));
    }
}
