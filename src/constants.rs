//! Common constants used throughout the Forge application.

/// Placeholder replaced with the project name
pub const PROJECT_NAME_TOKEN: &str = "{{project_name}}";

/// Placeholder replaced with the module path
pub const MODULE_PATH_TOKEN: &str = "{{module_path}}";

/// Placeholder replaced with the project description
pub const DESCRIPTION_TOKEN: &str = "{{project_description}}";

/// Supported template settings file names
pub const SETTINGS_FILES: [&str; 3] = ["forge.json", "forge.yml", "forge.yaml"];

/// Forge's ignore file name
pub const IGNORE_FILE: &str = ".forgeignore";

/// Setup script run by the dependency installer, relative to the project root
pub const DEFAULT_SETUP_SCRIPT: &str = "_deps.sh";

pub const DEFAULT_SETUP_SHELL: &str = "sh";

/// Branch created by `git init`
pub const DEFAULT_BRANCH: &str = "main";

pub const DEFAULT_COMMIT_MESSAGE: &str = "created by forge: initial commit";

/// Per-invocation timeout for external tools, in seconds
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 300;

/// Prefix of the staging directory created next to the project root
pub const STAGING_PREFIX: &str = ".forge-";
