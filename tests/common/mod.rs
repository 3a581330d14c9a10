#![allow(dead_code)]

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use forge::error::{Error, Result};
use forge::tool::{Invocation, ProcessRunner, ToolOutput, ToolRunner};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const PROJECT_NAME: &str = "myproj";
pub const MODULE_NAME: &str = "github.com/user/myproj";

/// Settings replacing the Go toolchain with `sh` one-liners.
pub const SH_TOOLCHAIN: &str = r#"{
    "manifest": {
        "init": {"program": "sh", "args": ["-c", "printf 'module %s\\n' \"$1\" > go.mod", "sh"]},
        "tidy": {"program": "sh", "args": ["-c", "test -f go.mod"]}
    }
}"#;

/// Writes a zip archive; names ending in `/` become directory entries.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let mut writer = ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content).unwrap();
        }
    }
    writer.finish().unwrap();
}

/// Zips the contents of `src` so that `src` itself is the archive root.
pub fn zip_dir(src: &Path, dest: &Path) {
    let mut writer = ZipWriter::new(File::create(dest).unwrap());
    let options = SimpleFileOptions::default();
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.unwrap();
        let name = entry.path().strip_prefix(src).unwrap().to_str().unwrap().replace('\\', "/");
        if entry.file_type().is_dir() {
            writer.add_directory(format!("{name}/"), options).unwrap();
        } else {
            writer.start_file(name, options).unwrap();
            writer.write_all(&fs::read(entry.path()).unwrap()).unwrap();
        }
    }
    writer.finish().unwrap();
}

/// Process runner with a fixed git identity and no user or system git config.
pub fn runner() -> ProcessRunner {
    ProcessRunner::new(Some(Duration::from_secs(60)))
        .env("GIT_AUTHOR_NAME", "forge")
        .env("GIT_AUTHOR_EMAIL", "forge@localhost")
        .env("GIT_COMMITTER_NAME", "forge")
        .env("GIT_COMMITTER_EMAIL", "forge@localhost")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
}

/// Records every invocation and answers with a canned result.
#[derive(Default)]
pub struct RecordingRunner {
    pub calls: RefCell<Vec<Invocation>>,
    pub fail: bool,
}

impl RecordingRunner {
    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ToString::to_string).collect()
    }
}

impl ToolRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        if self.fail {
            return Err(Error::ToolInvocation {
                command: invocation.to_string(),
                reason: "failed with exit status: 1".into(),
                stderr: "boom".into(),
            });
        }
        Ok(ToolOutput::default())
    }
}
