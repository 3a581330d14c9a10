//! External tool invocation.
//! Every step that shells out (manifest, dependency script, git) goes through a
//! [`ToolRunner`], which runs one process to completion and keeps its output
//! for diagnostics.

use log::{debug, warn};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

#[cfg(unix)]
use std::os::unix::process::CommandExt;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Fully describes one external process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl Invocation {
    pub fn new<S: Into<String>, P: AsRef<Path>>(program: S, working_dir: P) -> Self {
        Self { program: program.into(), args: Vec::new(), working_dir: working_dir.as_ref().into() }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured output of a successful invocation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs external tools on behalf of the pipeline.
pub trait ToolRunner {
    /// Runs `invocation` to completion.
    ///
    /// # Errors
    /// * `Error::ToolInvocation` if the process cannot be started, exits with a
    ///   non-zero status or exceeds the runner's timeout
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput>;
}

/// [`ToolRunner`] backed by `std::process`, with an optional timeout.
#[derive(Debug, Default, Clone)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
    envs: Vec<(String, String)>,
}

impl ProcessRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout, envs: Vec::new() }
    }

    /// Sets an environment variable on every process this runner starts.
    pub fn env<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    fn wait(&self, child: &mut Child) -> std::io::Result<Option<ExitStatus>> {
        let Some(timeout) = self.timeout else {
            return child.wait().map(Some);
        };

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            if Instant::now() >= deadline {
                kill_process_group(child);
                let _ = child.kill();
                child.wait()?;
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Kills every process in the child's group, so helpers it forked die with it.
#[cfg(unix)]
fn kill_process_group(child: &Child) {
    let group = format!("-{}", child.id());
    let status = Command::new("kill")
        .args(["-KILL", "--", &group])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    if !matches!(status, Ok(status) if status.success()) {
        warn!("Could not kill process group {}", child.id());
    }
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}

/// Output read from one pipe by a background thread.
struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
    reader: thread::JoinHandle<()>,
}

impl Capture {
    fn start<R: Read + Send + 'static>(pipe: Option<R>) -> Self {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let shared = Arc::clone(&buf);
        let reader = thread::spawn(move || {
            let Some(mut pipe) = pipe else { return };
            let mut chunk = [0u8; 4096];
            while let Ok(read) = pipe.read(&mut chunk) {
                if read == 0 {
                    break;
                }
                match shared.lock() {
                    Ok(mut buf) => buf.extend_from_slice(&chunk[..read]),
                    Err(poisoned) => poisoned.into_inner().extend_from_slice(&chunk[..read]),
                }
            }
        });
        Self { buf, reader }
    }

    /// Returns what was read. With `until_eof` the reader is joined first;
    /// otherwise whatever arrived so far is returned and the reader is left
    /// to finish on its own.
    fn finish(self, until_eof: bool) -> String {
        if until_eof {
            let _ = self.reader.join();
        }
        let buf = match self.buf.lock() {
            Ok(buf) => buf.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput> {
        let command = invocation.to_string();
        let failure = |reason: String, stderr: String| Error::ToolInvocation {
            command: command.clone(),
            reason,
            stderr: stderr.trim_end().to_string(),
        };

        debug!("Running '{}' in '{}'", command, invocation.working_dir.display());

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // Own process group, so a timeout can take down forked helpers too.
        #[cfg(unix)]
        command.process_group(0);

        let mut child = command
            .spawn()
            .map_err(|e| failure("could not be started".into(), e.to_string()))?;

        // Both pipes are drained concurrently so a chatty child cannot block on a full pipe.
        let stdout = Capture::start(child.stdout.take());
        let stderr = Capture::start(child.stderr.take());

        let status = self
            .wait(&mut child)
            .map_err(|e| failure("could not be awaited".into(), e.to_string()))?;

        // After a timeout a surviving grandchild may still hold the pipes open.
        let until_eof = status.is_some();
        let output = ToolOutput { stdout: stdout.finish(until_eof), stderr: stderr.finish(until_eof) };

        match status {
            Some(status) if status.success() => {
                if !output.stdout.trim().is_empty() {
                    debug!("{}", output.stdout.trim_end());
                }
                Ok(output)
            }
            Some(status) => Err(failure(format!("failed with {status}"), output.stderr)),
            None => Err(failure(
                format!("timed out after {:?}", self.timeout.unwrap_or_default()),
                output.stderr,
            )),
        }
    }
}
