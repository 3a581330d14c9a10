//! Per-invocation inputs shared by every pipeline step.

use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;

use crate::cli::Args;
use crate::error::{Error, Result};

const PROJECT_NAME_PATTERN: &str = r"^[A-Za-z0-9_][A-Za-z0-9._-]*$";

fn project_name_pattern() -> Result<Regex> {
    Regex::new(PROJECT_NAME_PATTERN).map_err(|e| Error::ValidationError(e.to_string()))
}

/// Validated inputs of one `forge` run.
///
/// Built once and passed by reference to every step, so extraction and the
/// later tool invocations all agree on where the project lives.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    work_dir: PathBuf,
    project_name: String,
    module_name: String,
    description: Option<String>,
    template_path: PathBuf,
    tool_timeout: Option<Duration>,
}

impl ProjectContext {
    /// Validates the user supplied values and builds a context rooted at `work_dir`.
    ///
    /// # Errors
    /// * `Error::ValidationError` if the project name is not a single path
    ///   component or the module name is empty or contains whitespace
    pub fn new<W, T, S1, S2>(
        work_dir: W,
        template_path: T,
        project_name: S1,
        module_name: S2,
    ) -> Result<Self>
    where
        W: Into<PathBuf>,
        T: Into<PathBuf>,
        S1: Into<String>,
        S2: Into<String>,
    {
        let project_name = project_name.into();
        let module_name = module_name.into();

        if !project_name_pattern()?.is_match(&project_name) {
            return Err(Error::ValidationError(format!(
                "invalid project name '{project_name}': use letters, digits, '.', '_' and '-'"
            )));
        }
        if module_name.is_empty() || module_name.chars().any(char::is_whitespace) {
            return Err(Error::ValidationError(format!(
                "invalid module name '{module_name}'"
            )));
        }

        Ok(Self {
            work_dir: work_dir.into(),
            project_name,
            module_name,
            description: None,
            template_path: template_path.into(),
            tool_timeout: None,
        })
    }

    /// Builds the context from parsed command line arguments, rooted at the
    /// current directory.
    pub fn from_args(args: &Args) -> Result<Self> {
        let work_dir =
            std::env::current_dir().map_err(|e| Error::filesystem(".", e))?;
        let timeout = (args.timeout > 0).then(|| Duration::from_secs(args.timeout));

        Ok(Self::new(
            work_dir,
            &args.template_path,
            args.project_name.as_str(),
            args.module_name.as_str(),
        )?
        .with_description(args.description.clone())
        .with_tool_timeout(timeout))
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_tool_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.tool_timeout = timeout;
        self
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Description substituted for the description token; empty when none was given.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    pub fn tool_timeout(&self) -> Option<Duration> {
        self.tool_timeout
    }

    /// The directory the project is materialized into.
    pub fn project_root(&self) -> PathBuf {
        self.work_dir.join(&self.project_name)
    }
}
