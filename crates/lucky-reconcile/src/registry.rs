//! # Documentation Registry Store
//!
//! The registry is the ordered `models` list inside a documentation
//! configuration. Depending on `inlineDocs` it lives either inside the
//! project file itself (`custom.documentation.models`) or in a separate
//! YAML file (`documentation.models`) named by a file pointer in the
//! project's `custom.documentation` string. The branch is on the flag
//! only — the file's actual shape is never sniffed.
//!
//! ## Coalescing
//!
//! Registry state is loaded once per run, accumulated in memory across all
//! endpoints, and flushed exactly once. Without this, two endpoints
//! updating the same external file would lose the first update to a
//! last-writer-wins overwrite.
//!
//! Existing entries are kept as raw YAML values so that hand-written keys
//! on foreign entries survive the write-back.

use std::path::{Path, PathBuf};

use thiserror::Error;

use lucky_core::ModelEntry;

use crate::fileref::{parse_doc_pointer, FileRefError};
use crate::project::{ConfigParseError, ProjectDocument};

/// Where a registry's models list lives.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryTarget {
    /// `custom.documentation.models` inside the project file.
    Inline,
    /// `documentation.models` in a separate YAML file.
    External(PathBuf),
}

/// A registry flush that could not be completed.
#[derive(Error, Debug)]
#[error("cannot write documentation registry {path}: {reason}")]
pub struct RegistryFlushError {
    /// The file that could not be written.
    pub path: PathBuf,
    /// Serialization or IO failure detail.
    pub reason: String,
}

/// In-memory documentation registry state for one run.
#[derive(Debug)]
pub struct DocRegistry {
    target: RegistryTarget,
    /// Full external document for write-back; `None` for inline targets
    /// and for external files that do not exist yet.
    external_document: Option<serde_yaml::Value>,
    models: Vec<serde_yaml::Value>,
    dirty: bool,
}

impl DocRegistry {
    /// Open the registry declared by the project, if any.
    ///
    /// Returns `Ok(None)` when the project declares no documentation
    /// section at all — the caller reports that per folder.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigParseError`] for an unparsable external file, or a
    /// documentation string with no usable file pointer. Both are fatal
    /// for the run.
    pub fn open(
        root: &Path,
        inline_docs: bool,
        project: &ProjectDocument,
    ) -> Result<Option<Self>, ConfigParseError> {
        let Some(documentation) = project.documentation() else {
            return Ok(None);
        };

        if inline_docs {
            let models = documentation
                .get("models")
                .and_then(serde_yaml::Value::as_sequence)
                .cloned()
                .unwrap_or_default();
            return Ok(Some(Self {
                target: RegistryTarget::Inline,
                external_document: None,
                models,
                dirty: false,
            }));
        }

        let text = documentation.as_str().ok_or_else(|| ConfigParseError::DocPointer {
            path: project.path().display().to_string(),
            source: FileRefError::MissingPointer {
                text: "<non-string documentation section>".to_string(),
            },
        })?;
        let pointer = parse_doc_pointer(text).map_err(|source| ConfigParseError::DocPointer {
            path: project.path().display().to_string(),
            source,
        })?;
        let path = root.join(pointer);

        if !path.exists() {
            // Registry file declared but not yet created: start empty,
            // the flush creates it.
            return Ok(Some(Self {
                target: RegistryTarget::External(path),
                external_document: None,
                models: Vec::new(),
                dirty: false,
            }));
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigParseError::Yaml {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        })?;
        let document: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| ConfigParseError::Yaml {
                path: path.display().to_string(),
                reason: format!("invalid YAML: {e}"),
            })?;
        let models = document
            .get("documentation")
            .and_then(|d| d.get("models"))
            .and_then(serde_yaml::Value::as_sequence)
            .cloned()
            .unwrap_or_default();

        Ok(Some(Self {
            target: RegistryTarget::External(path),
            external_document: Some(document),
            models,
            dirty: false,
        }))
    }

    /// Where this registry's models list lives.
    pub fn target(&self) -> &RegistryTarget {
        &self.target
    }

    /// Number of entries currently in the models list.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the models list is empty.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Whether any entry was appended since the registry was opened.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Contains-or-append: add `entry` unless an equivalent one exists.
    ///
    /// Returns `true` when the entry was appended, `false` when a duplicate
    /// (same name, contentType, and schemaReference) was already present.
    pub fn insert(&mut self, entry: &ModelEntry) -> bool {
        if self.models.iter().any(|existing| is_duplicate(existing, entry)) {
            return false;
        }
        // ModelEntry serializes to a plain mapping; this cannot fail.
        if let Ok(value) = serde_yaml::to_value(entry) {
            self.models.push(value);
            self.dirty = true;
            return true;
        }
        false
    }

    /// Flush accumulated state to its target. Call once, at end of run.
    ///
    /// Returns the path that was written, or `None` when nothing changed.
    /// For inline targets the models list is folded back into `project`
    /// and the project file rewritten.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryFlushError`] on serialization or IO failure; the
    /// caller reports it and continues.
    pub fn flush(
        self,
        project: &mut ProjectDocument,
    ) -> Result<Option<PathBuf>, RegistryFlushError> {
        if !self.dirty {
            return Ok(None);
        }
        let models = serde_yaml::Value::Sequence(self.models);

        match self.target {
            RegistryTarget::Inline => {
                let path = project.path().to_path_buf();
                project.set_documentation_models(models);
                let text = project.to_yaml().map_err(|e| RegistryFlushError {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                std::fs::write(&path, text).map_err(|e| RegistryFlushError {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                Ok(Some(path))
            }
            RegistryTarget::External(path) => {
                let mut document = self
                    .external_document
                    .unwrap_or_else(|| serde_yaml::Value::Mapping(serde_yaml::Mapping::new()));
                set_external_models(&mut document, models);
                let text = serde_yaml::to_string(&document).map_err(|e| RegistryFlushError {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                std::fs::write(&path, text).map_err(|e| RegistryFlushError {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                Ok(Some(path))
            }
        }
    }
}

/// Duplicate test on the registry uniqueness key: (name, contentType,
/// schemaReference). Description and any foreign keys do not participate.
fn is_duplicate(existing: &serde_yaml::Value, entry: &ModelEntry) -> bool {
    existing.get("name").and_then(serde_yaml::Value::as_str) == Some(entry.name.as_str())
        && existing.get("contentType").and_then(serde_yaml::Value::as_str)
            == Some(entry.content_type.as_str())
        && existing.get("schemaReference").and_then(serde_yaml::Value::as_str)
            == Some(entry.schema_reference.as_str())
}

/// Set `documentation.models` in an external registry document, creating
/// the `documentation` mapping when missing or misshapen.
fn set_external_models(document: &mut serde_yaml::Value, models: serde_yaml::Value) {
    let mapping = match document.as_mapping_mut() {
        Some(m) => m,
        None => {
            *document = serde_yaml::Value::Mapping(serde_yaml::Mapping::new());
            // Just replaced with a mapping.
            match document.as_mapping_mut() {
                Some(m) => m,
                None => return,
            }
        }
    };

    let doc_key = serde_yaml::Value::from("documentation");
    let needs_mapping = !matches!(mapping.get(&doc_key), Some(serde_yaml::Value::Mapping(_)));
    if needs_mapping {
        mapping.insert(doc_key.clone(), serde_yaml::Value::Mapping(serde_yaml::Mapping::new()));
    }
    if let Some(serde_yaml::Value::Mapping(doc)) = mapping.get_mut(&doc_key) {
        doc.insert(serde_yaml::Value::from("models"), models);
    }
}
