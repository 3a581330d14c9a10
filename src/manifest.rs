//! Manifest bootstrap and tidy commands.

use log::info;
use std::path::Path;

use crate::config::ManifestSettings;
use crate::error::Result;
use crate::tool::{Invocation, ToolRunner};

/// Builds the bootstrap invocation; the module path is the last argument.
pub fn init_invocation<P: AsRef<Path>>(
    settings: &ManifestSettings,
    module_path: &str,
    project_root: P,
) -> Invocation {
    Invocation::new(settings.init.program.as_str(), project_root)
        .args(settings.init.args.iter().map(String::as_str))
        .arg(module_path)
}

pub fn tidy_invocation<P: AsRef<Path>>(settings: &ManifestSettings, project_root: P) -> Invocation {
    Invocation::new(settings.tidy.program.as_str(), project_root)
        .args(settings.tidy.args.iter().map(String::as_str))
}

/// Creates the manifest declaring `module_path` in `project_root`.
pub fn init_manifest<P: AsRef<Path>>(
    runner: &dyn ToolRunner,
    settings: &ManifestSettings,
    module_path: &str,
    project_root: P,
) -> Result<()> {
    let invocation = init_invocation(settings, module_path, project_root);
    info!("Running {invocation}");
    runner.run(&invocation).map(|_| ())
}

/// Resolves the dependencies declared by the project's sources.
///
/// Runs after the setup script, which may add sources with new imports.
pub fn tidy_manifest<P: AsRef<Path>>(
    runner: &dyn ToolRunner,
    settings: &ManifestSettings,
    project_root: P,
) -> Result<()> {
    let invocation = tidy_invocation(settings, project_root);
    info!("Running {invocation}");
    runner.run(&invocation).map(|_| ())
}
