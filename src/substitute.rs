//! Placeholder substitution over an extracted project tree.

use globset::GlobSet;
use log::{debug, info};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::constants::{DESCRIPTION_TOKEN, MODULE_PATH_TOKEN, PROJECT_NAME_TOKEN};
use crate::context::ProjectContext;
use crate::error::{Error, Result};

/// A literal placeholder and the bytes that replace it.
#[derive(Debug, Clone)]
pub struct Token {
    marker: &'static str,
    replacement: Vec<u8>,
}

impl Token {
    pub fn new<V: AsRef<[u8]>>(marker: &'static str, replacement: V) -> Self {
        Self { marker, replacement: replacement.as_ref().to_vec() }
    }

    pub fn marker(&self) -> &'static str {
        self.marker
    }

    /// Replaces every occurrence in `content`, returning the new content and
    /// the number of replacements made.
    ///
    /// Matches are leftmost and non-overlapping; replacement bytes are never
    /// rescanned.
    pub fn replace_in(&self, content: &[u8]) -> (Vec<u8>, usize) {
        let marker = self.marker.as_bytes();
        let mut replaced = Vec::with_capacity(content.len());
        let mut count = 0;
        let mut rest = content;
        while let Some(at) = rest.windows(marker.len()).position(|window| window == marker) {
            replaced.extend_from_slice(&rest[..at]);
            replaced.extend_from_slice(&self.replacement);
            rest = &rest[at + marker.len()..];
            count += 1;
        }
        replaced.extend_from_slice(rest);
        (replaced, count)
    }
}

/// Ordered placeholders applied to every file; each one runs over the output
/// of the previous one.
#[derive(Debug, Clone)]
pub struct TokenSet {
    tokens: Vec<Token>,
}

impl TokenSet {
    pub fn new(project_name: &str, module_path: &str, description: &str) -> Self {
        Self {
            tokens: vec![
                Token::new(PROJECT_NAME_TOKEN, project_name),
                Token::new(MODULE_PATH_TOKEN, module_path),
                Token::new(DESCRIPTION_TOKEN, description),
            ],
        }
    }

    pub fn from_context(ctx: &ProjectContext) -> Self {
        Self::new(ctx.project_name(), ctx.module_name(), ctx.description())
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Applies every token in order. Returns the new content and the
    /// replacement count per token, in token order.
    pub fn apply(&self, content: &[u8]) -> (Vec<u8>, Vec<usize>) {
        let mut current = content.to_vec();
        let mut counts = Vec::with_capacity(self.tokens.len());
        for token in &self.tokens {
            let (next, count) = token.replace_in(&current);
            current = next;
            counts.push(count);
        }
        (current, counts)
    }
}

/// Outcome of a substitution pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubstitutionReport {
    pub files_visited: usize,
    pub files_rewritten: usize,
    pub files_ignored: usize,
    /// Replacement count per token marker, in token order
    pub replacements: Vec<(&'static str, usize)>,
}

impl SubstitutionReport {
    /// Total replacements made for `marker`.
    pub fn count(&self, marker: &str) -> usize {
        self.replacements.iter().find(|(m, _)| *m == marker).map(|(_, n)| *n).unwrap_or(0)
    }
}

/// Rewrites the placeholders of a single file in place.
///
/// Files without any placeholder are not written back. Returns the
/// replacement count per token.
pub fn substitute_file<P: AsRef<Path>>(path: P, tokens: &TokenSet) -> Result<Vec<usize>> {
    let path = path.as_ref();
    let content = fs::read(path).map_err(|e| Error::filesystem(path, e))?;
    let (updated, counts) = tokens.apply(&content);

    if counts.iter().all(|count| *count == 0) {
        debug!("No tokens found in file: {}", path.display());
    } else {
        debug!("Replacing tokens in file: {}", path.display());
        fs::write(path, updated).map_err(|e| Error::filesystem(path, e))?;
    }

    Ok(counts)
}

/// Walks `root` and substitutes placeholders in every regular file.
///
/// # Arguments
/// * `root` - Project root to walk
/// * `tokens` - Placeholders and their replacements
/// * `ignored` - Patterns, relative to `root`, of files to leave untouched
///
/// # Errors
/// * `Error::Filesystem` on the first entry that cannot be traversed, read or written
pub fn substitute_tokens<P: AsRef<Path>>(
    root: P,
    tokens: &TokenSet,
    ignored: &GlobSet,
) -> Result<SubstitutionReport> {
    let root = root.as_ref();
    info!("Replacing tokens under '{}'", root.display());

    let mut report = SubstitutionReport {
        replacements: tokens.tokens().iter().map(|t| (t.marker(), 0)).collect(),
        ..Default::default()
    };

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::filesystem(&path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        report.files_visited += 1;

        if ignored.is_match(relative) {
            debug!("Skipping file {} from ignore patterns", relative.display());
            report.files_ignored += 1;
            continue;
        }

        let counts = substitute_file(path, tokens)?;
        if counts.iter().any(|count| *count > 0) {
            report.files_rewritten += 1;
        }
        for ((_, total), count) in report.replacements.iter_mut().zip(counts) {
            *total += count;
        }
    }

    Ok(report)
}
