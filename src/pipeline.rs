//! Project creation pipeline.
//! Runs every step in a fixed order and stops at the first failure. Rolling
//! back a failed run is left to the caller; see [`crate::rollback`].

use log::info;
use std::fmt;
use std::path::PathBuf;

use crate::config::{load_settings, TemplateSettings};
use crate::context::ProjectContext;
use crate::error::{Error, Result};
use crate::extract::extract_template;
use crate::ignore::load_ignore_patterns;
use crate::substitute::{substitute_tokens, SubstitutionReport, TokenSet};
use crate::tool::ToolRunner;
use crate::{deps, manifest, vcs};

/// The steps of a pipeline run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Extracting,
    LoadingSettings,
    Substituting,
    ManifestInit,
    InstallingDeps,
    ManifestTidy,
    VcsInit,
    VcsAdd,
    VcsCommit,
}

impl Step {
    pub const ALL: [Step; 9] = [
        Step::Extracting,
        Step::LoadingSettings,
        Step::Substituting,
        Step::ManifestInit,
        Step::InstallingDeps,
        Step::ManifestTidy,
        Step::VcsInit,
        Step::VcsAdd,
        Step::VcsCommit,
    ];
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Extracting => "template extraction",
            Step::LoadingSettings => "template settings",
            Step::Substituting => "token substitution",
            Step::ManifestInit => "manifest init",
            Step::InstallingDeps => "dependency installation",
            Step::ManifestTidy => "manifest tidy",
            Step::VcsInit => "git init",
            Step::VcsAdd => "git add",
            Step::VcsCommit => "git commit",
        };
        f.write_str(name)
    }
}

/// Where a pipeline run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Running(Step),
    Done,
    Failed(Step),
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct ProjectReport {
    pub project_root: PathBuf,
    pub substitution: SubstitutionReport,
    /// Whether the template shipped a setup script that was run
    pub ran_setup_script: bool,
}

/// Sequences extraction, substitution and the external tool steps for one project.
pub struct Pipeline<'a> {
    ctx: &'a ProjectContext,
    runner: &'a dyn ToolRunner,
    state: State,
    root_created: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(ctx: &'a ProjectContext, runner: &'a dyn ToolRunner) -> Self {
        Self { ctx, runner, state: State::Idle, root_created: false }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Whether this run created the project root. Only then may a caller
    /// delete it after a failure.
    pub fn root_created(&self) -> bool {
        self.root_created
    }

    fn step<T, F>(&mut self, step: Step, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        self.state = State::Running(step);
        info!("Step: {step}");
        f().map_err(|source| {
            self.state = State::Failed(step);
            Error::Step { step, source: Box::new(source) }
        })
    }

    /// Runs every step in order.
    ///
    /// # Errors
    /// * `Error::Step` naming the first step that failed and its cause
    pub fn run(&mut self) -> Result<ProjectReport> {
        let ctx = self.ctx;
        let runner = self.runner;
        let root = ctx.project_root();
        info!(
            "Creating project '{}' (module '{}') from '{}'",
            ctx.project_name(),
            ctx.module_name(),
            ctx.template_path().display()
        );

        self.step(Step::Extracting, || {
            let template = ctx.template_path();
            if !template.exists() {
                return Err(Error::InputNotFound { path: template.display().to_string() });
            }
            if root.exists() {
                return Err(Error::DestinationExists { path: root.display().to_string() });
            }
            extract_template(template, &root)
        })?;
        self.root_created = true;

        let (settings, ignored): (TemplateSettings, _) = self.step(Step::LoadingSettings, || {
            Ok((load_settings(&root)?, load_ignore_patterns(&root)?))
        })?;

        let substitution = self.step(Step::Substituting, || {
            substitute_tokens(&root, &TokenSet::from_context(ctx), &ignored)
        })?;
        info!(
            "Rewrote {} of {} files ({} ignored)",
            substitution.files_rewritten, substitution.files_visited, substitution.files_ignored
        );

        self.step(Step::ManifestInit, || {
            manifest::init_manifest(runner, &settings.manifest, ctx.module_name(), &root)
        })?;
        let ran_setup_script = self.step(Step::InstallingDeps, || {
            deps::install_dependencies(runner, &root, &settings.setup)
        })?;
        self.step(Step::ManifestTidy, || {
            manifest::tidy_manifest(runner, &settings.manifest, &root)
        })?;

        self.step(Step::VcsInit, || vcs::init(runner, &root, &settings.vcs.branch))?;
        self.step(Step::VcsAdd, || vcs::stage_all(runner, &root))?;
        self.step(Step::VcsCommit, || vcs::commit(runner, &root, &settings.vcs.commit_message))?;

        self.state = State::Done;
        Ok(ProjectReport { project_root: root, substitution, ran_setup_script })
    }
}

/// Creates the project described by `ctx` without rolling back on failure.
pub fn create_project(ctx: &ProjectContext, runner: &dyn ToolRunner) -> Result<ProjectReport> {
    Pipeline::new(ctx, runner).run()
}
