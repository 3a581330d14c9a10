//! Git repository initialization.
//! The repository is created with the `git` executable; `git2` is only used to
//! check that each step's precondition holds before shelling out.

use log::info;
use std::path::Path;

use crate::error::{Error, Result};
use crate::tool::{Invocation, ToolRunner};

fn open_repository(project_root: &Path) -> Result<git2::Repository> {
    git2::Repository::open(project_root).map_err(|e| {
        Error::Sequencing(format!(
            "no repository at '{}', initialize it before staging ({})",
            project_root.display(),
            e.message()
        ))
    })
}

/// Initializes a repository in `project_root` with `branch` checked out.
pub fn init<P: AsRef<Path>>(runner: &dyn ToolRunner, project_root: P, branch: &str) -> Result<()> {
    info!("Initializing git repository, working branch = {branch}");
    let invocation = Invocation::new("git", project_root).args(["init", "-b", branch]);
    runner.run(&invocation).map(|_| ())
}

/// Stages every file of the project.
///
/// # Errors
/// * `Error::Sequencing` if `project_root` is not a repository yet
/// * `Error::ToolInvocation` if `git add` fails
pub fn stage_all<P: AsRef<Path>>(runner: &dyn ToolRunner, project_root: P) -> Result<()> {
    let project_root = project_root.as_ref();
    open_repository(project_root)?;

    info!("Adding files to the index");
    let invocation = Invocation::new("git", project_root).args(["add", "."]);
    runner.run(&invocation).map(|_| ())
}

/// Records the staged files as the initial commit.
///
/// # Errors
/// * `Error::Sequencing` if there is no repository or nothing has been staged
/// * `Error::ToolInvocation` if `git commit` fails
pub fn commit<P: AsRef<Path>>(
    runner: &dyn ToolRunner,
    project_root: P,
    message: &str,
) -> Result<()> {
    let project_root = project_root.as_ref();
    let repo = open_repository(project_root)?;
    if repo.index()?.is_empty() {
        return Err(Error::Sequencing(format!(
            "nothing staged in '{}', stage files before committing",
            project_root.display()
        )));
    }

    info!("Creating initial commit");
    let invocation = Invocation::new("git", project_root).args(["commit", "-m", message]);
    runner.run(&invocation).map(|_| ())
}
