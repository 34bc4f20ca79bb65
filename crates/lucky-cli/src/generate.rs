//! # Generate Subcommand
//!
//! One-shot schema generation: load the project file, derive a schema per
//! bound endpoint, reconcile files and documentation models.

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{error, info};

use lucky_core::ValidatorResolver;
use lucky_reconcile::{ProjectDocument, Reconciler, RunReport, Severity};
use lucky_schema::{derive, to_json_pretty, DeriveOptions};

use crate::resolver::FsValidatorResolver;

/// Arguments for the generate subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the project configuration file.
    #[arg(long, default_value = "serverless.yml")]
    pub config: PathBuf,

    /// Project root for resolving relative paths. Defaults to the
    /// directory containing the configuration file.
    #[arg(long)]
    pub root: Option<PathBuf>,
}

/// Run schema generation for every bound endpoint in the project.
///
/// Recoverable failures (unresolvable validators, malformed field trees,
/// individual write failures) are logged and skipped; unparsable core
/// configuration aborts the run.
///
/// # Errors
///
/// Returns an error for an unreadable or unparsable project file, a
/// missing or invalid `custom.lucky` section, or an unusable documentation
/// registry configuration.
pub fn run(args: &GenerateArgs) -> anyhow::Result<RunReport> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => args
            .config
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };

    let project = ProjectDocument::load(&args.config)?;
    let config = project.lucky_config()?;
    let endpoints = project.endpoints();
    info!(
        endpoints = endpoints.len(),
        root = %root.display(),
        "starting schema generation"
    );

    let base_path = root.join(&config.validators_base_path);
    // One clock instant per run; every date example in this run agrees.
    let options = DeriveOptions::new(config.use_examples);
    let resolver = FsValidatorResolver;

    let mut reconciler = Reconciler::new(root, config, project)?;

    for endpoint in &endpoints {
        let spec = match resolver.resolve(&base_path, &endpoint.schema_ref) {
            Ok(spec) => spec,
            Err(e) => {
                error!(function = %endpoint.function, "{e}");
                continue;
            }
        };
        let node = match derive(&spec, &options) {
            Ok(node) => node,
            Err(e) => {
                error!(function = %endpoint.function, "malformed validator: {e}");
                continue;
            }
        };
        let artifact = to_json_pretty(&node)?;
        reconciler.reconcile(endpoint, &artifact);
    }

    let report = reconciler.finish();
    for event in &report.events {
        match event.severity() {
            Severity::Success | Severity::Notice => info!("{event}"),
            Severity::Error => error!("{event}"),
        }
    }
    Ok(report)
}
