//! Template settings handling for Forge.
//! A template may ship a `forge.json`, `forge.yml` or `forge.yaml` file at its root
//! to override the commands used to bootstrap the manifest, install dependencies
//! and create the initial commit. Every key is optional.

use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_BRANCH, DEFAULT_COMMIT_MESSAGE, DEFAULT_SETUP_SCRIPT, DEFAULT_SETUP_SHELL,
    SETTINGS_FILES,
};
use crate::error::{Error, Result};

/// An executable with its leading arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<S: Into<String>>(program: S, args: &[&str]) -> Self {
        Self { program: program.into(), args: args.iter().map(|a| a.to_string()).collect() }
    }
}

/// Manifest bootstrap and tidy commands.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestSettings {
    /// Run with the module path appended as the last argument
    pub init: CommandSpec,
    pub tidy: CommandSpec,
}

impl Default for ManifestSettings {
    fn default() -> Self {
        Self {
            init: CommandSpec::new("go", &["mod", "init"]),
            tidy: CommandSpec::new("go", &["mod", "tidy"]),
        }
    }
}

/// Optional setup script run by the dependency installer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SetupSettings {
    pub shell: String,
    /// Relative to the project root
    pub script: PathBuf,
}

impl Default for SetupSettings {
    fn default() -> Self {
        Self { shell: DEFAULT_SETUP_SHELL.into(), script: PathBuf::from(DEFAULT_SETUP_SCRIPT) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VcsSettings {
    pub branch: String,
    pub commit_message: String,
}

impl Default for VcsSettings {
    fn default() -> Self {
        Self { branch: DEFAULT_BRANCH.into(), commit_message: DEFAULT_COMMIT_MESSAGE.into() }
    }
}

/// Toolchain used to finish a project after extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateSettings {
    pub manifest: ManifestSettings,
    pub setup: SetupSettings,
    pub vcs: VcsSettings,
}

/// Returns the first settings file present in `template_dir`.
pub fn find_settings_file<P: AsRef<Path>>(template_dir: P) -> Option<PathBuf> {
    SETTINGS_FILES
        .iter()
        .map(|file| template_dir.as_ref().join(file))
        .find(|path| path.is_file())
}

/// Parses settings content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
///   for the settings schema
pub fn parse_settings(content: &str) -> Result<TemplateSettings> {
    match serde_json::from_str(content) {
        Ok(settings) => Ok(settings),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid settings format: {e}"))),
    }
}

/// Loads the template settings from `template_dir`, falling back to defaults.
///
/// The settings file describes the template, not the project, so it is removed
/// once read.
pub fn load_settings<P: AsRef<Path>>(template_dir: P) -> Result<TemplateSettings> {
    let Some(path) = find_settings_file(&template_dir) else {
        debug!("No settings file found, using the default toolchain");
        return Ok(TemplateSettings::default());
    };

    debug!("Loading settings from {}", path.display());
    let content = std::fs::read_to_string(&path).map_err(|e| Error::filesystem(&path, e))?;
    let settings = parse_settings(&content)?;
    std::fs::remove_file(&path).map_err(|e| Error::filesystem(&path, e))?;

    Ok(settings)
}
