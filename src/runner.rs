//! Top-level caller of the pipeline: builds the context from the command
//! line, runs the pipeline and applies the rollback policy on failure.

use log::{info, warn};

use crate::cli::{Args, RollbackPolicy};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::pipeline::{Pipeline, ProjectReport};
use crate::prompt::{DialoguerPrompter, Prompter};
use crate::rollback::rollback_quietly;
use crate::tool::{ProcessRunner, ToolRunner};

/// Creates the project and, when a step fails, removes what the run created
/// according to `policy`.
///
/// The original error is always returned; a failed rollback is only logged.
pub fn create_project_with_rollback(
    ctx: &ProjectContext,
    runner: &dyn ToolRunner,
    policy: RollbackPolicy,
    prompt: &dyn Prompter,
) -> Result<ProjectReport> {
    let mut pipeline = Pipeline::new(ctx, runner);
    let err = match pipeline.run() {
        Ok(report) => return Ok(report),
        Err(err) => err,
    };

    if !pipeline.root_created() {
        return Err(err);
    }

    let root = ctx.project_root();
    let remove = match policy {
        RollbackPolicy::Always => true,
        RollbackPolicy::Never => false,
        RollbackPolicy::Ask => prompt
            .confirm(format!("{err}\nDelete '{}'?", root.display()))
            .unwrap_or_else(|e| {
                warn!("{e}");
                false
            }),
    };

    if remove {
        rollback_quietly(&root);
    } else {
        info!("Keeping partially created project at '{}'", root.display());
    }

    Err(err)
}

/// Main application logic execution.
///
/// # Flow
/// 1. Validates the arguments into a [`ProjectContext`]
/// 2. Runs the pipeline with a process-backed tool runner
/// 3. Rolls back according to `--rollback` if a step fails
pub fn run(args: Args) -> Result<()> {
    let ctx = ProjectContext::from_args(&args)?;
    let runner = ProcessRunner::new(ctx.tool_timeout());
    let prompt = DialoguerPrompter::new();

    let report = create_project_with_rollback(&ctx, &runner, args.rollback, &prompt)?;

    println!("Project '{}' created in {}.", ctx.project_name(), report.project_root.display());
    Ok(())
}
