//! Forge creates a new project from a zipped template.
//! It extracts the template, substitutes the project placeholders, bootstraps
//! the manifest, installs dependencies and commits the result to a fresh git
//! repository, removing the partial project if any step fails.

/// Command-line interface module for the Forge application
pub mod cli;

/// Template settings (forge.json, forge.yml, forge.yaml)
pub mod config;

pub mod constants;

/// Validated inputs shared by every step
pub mod context;

/// Optional setup script execution
pub mod deps;

/// Error types and handling for the Forge application
pub mod error;

/// Zip archive extraction with stage-then-rename
pub mod extract;

/// Files excluded from substitution through .forgeignore
pub mod ignore;

pub mod logger;

/// Manifest bootstrap and tidy commands
pub mod manifest;

/// Step sequencing for one project
pub mod pipeline;

/// User input and interaction handling
pub mod prompt;

pub mod rollback;

/// Top-level caller applying the rollback policy
pub mod runner;

/// Placeholder substitution over the extracted tree
pub mod substitute;

/// External process invocation
pub mod tool;

/// Git repository initialization
pub mod vcs;

pub use runner::run;
