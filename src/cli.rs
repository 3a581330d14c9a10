//! Command-line interface implementation for Forge.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;

use crate::constants::DEFAULT_TOOL_TIMEOUT_SECS;

/// What the caller does with a partially created project after a failure.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RollbackPolicy {
    /// Delete the project directory without asking
    #[default]
    Always,
    /// Leave whatever was created on disk
    Never,
    /// Ask for confirmation before deleting
    Ask,
}

/// Command-line arguments structure for Forge.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Forge: create a new project from a zipped template",
    long_about = None,
    disable_version_flag = true,
    after_help = "Example: forge -t ./template.zip -p myproj -m github.com/user/myproj"
)]
pub struct Args {
    /// The directory name for the project. It will also be the name of the project
    #[arg(short, long, value_name = "NAME")]
    pub project_name: String,

    /// The module path, root namespace or root package name of the project
    #[arg(short, long, value_name = "MODULE")]
    pub module_name: String,

    /// Path to the template (*.zip) file
    #[arg(short, long, value_name = "TEMPLATE")]
    pub template_path: PathBuf,

    /// Short description substituted for the description placeholder
    #[arg(short, long)]
    pub description: Option<String>,

    /// Seconds each external tool may run before it is killed; 0 disables the limit
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TOOL_TIMEOUT_SECS)]
    pub timeout: u64,

    /// What to do with the partially created project when a step fails
    #[arg(long, value_enum, default_value_t = RollbackPolicy::Always)]
    pub rollback: RollbackPolicy,

    /// Enable verbose logging output
    #[arg(long)]
    pub verbose: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                eprintln!("{}", e.render());
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
