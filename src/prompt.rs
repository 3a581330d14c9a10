//! User interaction.

use dialoguer::Confirm;

use crate::error::{Error, Result};

/// Asks the operator yes/no questions.
pub trait Prompter {
    /// Asks `prompt` and returns the operator's answer.
    fn confirm(&self, prompt: String) -> Result<bool>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: String) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}
