//! # Output Reconciliation
//!
//! Takes derived schema artifacts and decides, per (endpoint, distinct
//! folder) pair, whether a file write is needed and whether the
//! documentation registry needs a new model entry. All effects are
//! collected as [`Event`]s; the host maps them to its log severities.
//!
//! ## Write policy
//!
//! A schema file is written only when it does not already exist **and**
//! its destination folder already exists beforehand. The folder guard is
//! deliberate: it prevents a misconfigured `outputPath` from silently
//! scaffolding a new directory tree. Both skips are notices, not errors,
//! and the registry is still checked and updated.
//!
//! ## Sequencing
//!
//! Writes are collected during reconciliation and executed in
//! [`Reconciler::finish`], so every write's outcome is observed before the
//! run reports completion; the registry is flushed exactly once.

use std::path::PathBuf;

use indexmap::IndexSet;

use lucky_core::{camel_case, EndpointBinding, LuckyConfig, ModelEntry};

use crate::fileref::file_ref;
use crate::project::{ConfigParseError, ProjectDocument};
use crate::registry::DocRegistry;

/// Severity of a reconciliation event, matching the host's log sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A change landed.
    Success,
    /// An intentional no-op.
    Notice,
    /// A failure that did not abort the run.
    Error,
}

/// One observable effect of a reconciliation run.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A schema artifact was written.
    SchemaWritten {
        /// Destination of the write.
        path: PathBuf,
    },
    /// The artifact already exists; the write was skipped.
    SchemaExists {
        /// The pre-existing destination.
        path: PathBuf,
    },
    /// The destination folder does not exist; the write was skipped.
    FolderMissing {
        /// The missing folder.
        path: PathBuf,
    },
    /// An earlier endpoint in this run already planned a write to the
    /// same destination; the first one wins.
    SchemaAlreadyPlanned {
        /// The contested destination.
        path: PathBuf,
    },
    /// The project declares no documentation section at all.
    DocumentationMissing {
        /// The function whose schema could not be registered.
        function: String,
        /// The folder being processed when the gate fired.
        folder: String,
    },
    /// A file write failed.
    WriteFailed {
        /// The destination that could not be written.
        path: PathBuf,
        /// IO failure detail.
        reason: String,
    },
    /// A model entry was appended to the registry.
    ModelRegistered {
        /// The model name.
        name: String,
    },
    /// An equivalent model entry was already present.
    ModelUnchanged {
        /// The model name.
        name: String,
    },
    /// The registry was flushed to disk.
    RegistryFlushed {
        /// The registry file that was written.
        path: PathBuf,
    },
}

impl Event {
    /// The log severity this event maps to.
    pub fn severity(&self) -> Severity {
        match self {
            Self::SchemaWritten { .. }
            | Self::ModelRegistered { .. }
            | Self::RegistryFlushed { .. } => Severity::Success,
            Self::SchemaExists { .. }
            | Self::FolderMissing { .. }
            | Self::SchemaAlreadyPlanned { .. }
            | Self::ModelUnchanged { .. } => Severity::Notice,
            Self::DocumentationMissing { .. } | Self::WriteFailed { .. } => Severity::Error,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SchemaWritten { path } => {
                write!(f, "Lucky task: schema created in {}", path.display())
            }
            Self::SchemaExists { path } => {
                write!(f, "Lucky task: {} already exists, write skipped", path.display())
            }
            Self::FolderMissing { path } => write!(
                f,
                "Lucky task: destination folder {} does not exist, write skipped",
                path.display()
            ),
            Self::SchemaAlreadyPlanned { path } => write!(
                f,
                "Lucky task: {} already scheduled in this run, write skipped",
                path.display()
            ),
            Self::DocumentationMissing { function, folder } => write!(
                f,
                "documentation property must be declared (function '{function}', folder '{folder}')"
            ),
            Self::WriteFailed { path, reason } => {
                write!(f, "cannot write {}: {reason}", path.display())
            }
            Self::ModelRegistered { name } => {
                write!(f, "documentation model '{name}' registered")
            }
            Self::ModelUnchanged { name } => {
                write!(f, "documentation model '{name}' already registered")
            }
            Self::RegistryFlushed { path } => {
                write!(f, "documentation registry updated in {}", path.display())
            }
        }
    }
}

/// The outcome of a reconciliation run: every effect, in order.
#[derive(Debug, Default)]
pub struct RunReport {
    /// All events observed during the run.
    pub events: Vec<Event>,
}

impl RunReport {
    /// Whether any event carries error severity.
    pub fn has_errors(&self) -> bool {
        self.events.iter().any(|e| e.severity() == Severity::Error)
    }
}

/// A schema write planned during reconciliation, executed at finish.
#[derive(Debug)]
struct PendingWrite {
    path: PathBuf,
    contents: String,
}

/// Reconciles derived schemas against the filesystem and the registry.
///
/// Owns the project document for the duration of the run so the inline
/// registry can be folded back into it on flush.
#[derive(Debug)]
pub struct Reconciler {
    root: PathBuf,
    config: LuckyConfig,
    project: ProjectDocument,
    registry: Option<DocRegistry>,
    pending: Vec<PendingWrite>,
    events: Vec<Event>,
}

impl Reconciler {
    /// Set up a run: open the registry declared by the project, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigParseError`] when the registry configuration is
    /// unusable (unparsable external YAML, pointerless documentation
    /// string). Fatal for the run.
    pub fn new(
        root: impl Into<PathBuf>,
        config: LuckyConfig,
        project: ProjectDocument,
    ) -> Result<Self, ConfigParseError> {
        let root = root.into();
        let registry = DocRegistry::open(&root, config.inline_docs, &project)?;
        Ok(Self {
            root,
            config,
            project,
            registry,
            pending: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Reconcile one endpoint's derived schema against every declared
    /// folder. Duplicate folder identifiers are collapsed to a set; each
    /// distinct folder is processed exactly once.
    pub fn reconcile(&mut self, endpoint: &EndpointBinding, artifact: &str) {
        let folders: IndexSet<&str> = endpoint.folders.iter().map(String::as_str).collect();

        for folder in folders {
            let dest_dir = self.root.join(&self.config.output_path).join(folder);
            let dest = dest_dir.join(endpoint.file_name());

            // Schema emission is gated on the project having declared a
            // (possibly empty) documentation section.
            let Some(registry) = self.registry.as_mut() else {
                self.events.push(Event::DocumentationMissing {
                    function: endpoint.function.clone(),
                    folder: folder.to_string(),
                });
                continue;
            };

            let relative = format!(
                "{}/{}/{}",
                self.config.output_path,
                folder,
                endpoint.file_name()
            );
            let entry = ModelEntry {
                name: camel_case(&endpoint.function),
                content_type: endpoint
                    .content_type
                    .clone()
                    .unwrap_or_else(|| ModelEntry::DEFAULT_CONTENT_TYPE.to_string()),
                description: String::new(),
                schema_reference: file_ref(&relative),
            };
            let name = entry.name.clone();
            if registry.insert(&entry) {
                self.events.push(Event::ModelRegistered { name });
            } else {
                self.events.push(Event::ModelUnchanged { name });
            }

            if dest.exists() {
                self.events.push(Event::SchemaExists { path: dest });
            } else if !dest_dir.exists() {
                self.events.push(Event::FolderMissing { path: dest_dir });
            } else if self.pending.iter().any(|w| w.path == dest) {
                // Two endpoints can bind the same folder and method; the
                // first planned artifact wins.
                self.events.push(Event::SchemaAlreadyPlanned { path: dest });
            } else {
                self.pending.push(PendingWrite { path: dest, contents: artifact.to_string() });
            }
        }
    }

    /// Execute all pending writes and flush the registry once.
    ///
    /// Every write's outcome is observed here, before the report is
    /// returned; individual failures become [`Event::WriteFailed`] and do
    /// not abort the remaining writes.
    pub fn finish(mut self) -> RunReport {
        for write in self.pending {
            match std::fs::write(&write.path, &write.contents) {
                Ok(()) => self.events.push(Event::SchemaWritten { path: write.path }),
                Err(e) => self.events.push(Event::WriteFailed {
                    path: write.path,
                    reason: e.to_string(),
                }),
            }
        }

        if let Some(registry) = self.registry {
            match registry.flush(&mut self.project) {
                Ok(Some(path)) => self.events.push(Event::RegistryFlushed { path }),
                Ok(None) => {}
                Err(e) => self.events.push(Event::WriteFailed { path: e.path, reason: e.reason }),
            }
        }

        RunReport { events: self.events }
    }
}
