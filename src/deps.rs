//! Optional dependency setup script.

use log::info;
use std::path::{Path, PathBuf};

use crate::config::SetupSettings;
use crate::error::Result;
use crate::tool::{Invocation, ToolRunner};

/// Returns the setup script path inside `project_root`.
pub fn setup_script_path<P: AsRef<Path>>(project_root: P, settings: &SetupSettings) -> PathBuf {
    project_root.as_ref().join(&settings.script)
}

/// Runs the template's setup script with the project root as working directory.
///
/// The script is optional: when it is absent the step is skipped and reports
/// success. Returns whether the script ran.
///
/// # Errors
/// * `Error::ToolInvocation` if the script exits non-zero or cannot be started
pub fn install_dependencies<P: AsRef<Path>>(
    runner: &dyn ToolRunner,
    project_root: P,
    settings: &SetupSettings,
) -> Result<bool> {
    let project_root = project_root.as_ref();
    let script = setup_script_path(project_root, settings);

    if !script.is_file() {
        info!(
            "No setup script at '{}', skipping dependency installation",
            settings.script.display()
        );
        return Ok(false);
    }

    info!("Adding dependencies with '{}'", settings.script.display());
    let invocation = Invocation::new(settings.shell.as_str(), project_root)
        .arg(settings.script.to_string_lossy());
    runner.run(&invocation)?;

    Ok(true)
}
