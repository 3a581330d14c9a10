//! Error handling for the Forge application.
//! Defines custom error types and results used throughout the application.

use std::io;
use std::path::Path;
use thiserror::Error;

use crate::pipeline::Step;

/// Custom error types for Forge operations.
///
/// This enum represents all possible errors that can occur while a project
/// is materialized from a template archive.
#[derive(Error, Debug)]
pub enum Error {
    /// The template archive path does not exist
    #[error("Template '{path}' does not exist.")]
    InputNotFound { path: String },

    /// The template archive could not be opened or read as a zip file
    #[error("Template archive '{path}' is corrupt: {source}.")]
    ArchiveCorrupt {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// Read, write or rename failures during extraction or substitution
    #[error("Filesystem error at '{path}': {source}.")]
    Filesystem {
        path: String,
        #[source]
        source: io::Error,
    },

    /// An external command exited non-zero, failed to start or timed out
    #[error("Command '{command}' {reason}: {stderr}")]
    ToolInvocation { command: String, reason: String, stderr: String },

    /// A step was invoked before its precondition was met
    #[error("Sequencing error: {0}.")]
    Sequencing(String),

    /// The project directory is already present on disk
    #[error("Project directory '{path}' already exists.")]
    DestinationExists { path: String },

    /// Represents errors that occur during template settings parsing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents errors in processing .forgeignore files
    #[error("ForgeIgnore error: {0}.")]
    IgnoreError(String),

    /// Represents validation failures in user input
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// Represents failures while asking the operator for confirmation
    #[error("Prompt error: {0}.")]
    PromptError(String),

    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),

    /// Wraps the cause of an orchestrated step with the step that failed
    #[error("{step} failed: {source}")]
    Step {
        step: Step,
        #[source]
        source: Box<Error>,
    },
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Builds a [`Error::Filesystem`] for the given path.
    pub fn filesystem<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Error::Filesystem { path: path.as_ref().display().to_string(), source }
    }

    /// Returns the pipeline step this error was raised in, if any.
    pub fn step(&self) -> Option<Step> {
        match self {
            Error::Step { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Returns the innermost cause, looking through step wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Step { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
