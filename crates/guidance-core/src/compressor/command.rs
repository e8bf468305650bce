//! Worker-process backend
//!
//! The worker is started once and kept alive for the whole run, so the model
//! is loaded a single time. Each request is one JSON object on the worker's
//! stdin, answered by one JSON object on its stdout.

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use super::wire::{WireReply, WireRequest};
use super::{CompressionError, CompressionRequest, Compressor, CompressorOutput};

const BACKEND: &str = "command";

/// A long-running compressor worker process
#[derive(Debug)]
pub struct CommandCompressor {
    program: String,
    model: String,
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
    /// Set once the worker has answered a request
    replied: bool,
    exited: bool,
}

impl CommandCompressor {
    /// Spawn the worker described by `argv`.
    pub fn spawn(argv: &[String], model: &str) -> Result<Self, CompressionError> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            CompressionError::InvalidRequest("compressor command is empty".to_string())
        })?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| unavailable(program, &e.to_string()))?;

        let stdin = child.stdin.take();
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| CompressionError::Protocol("worker stdout not captured".to_string()))?;

        tracing::debug!(program = %program, pid = child.id(), "started compressor worker");

        Ok(Self {
            program: program.clone(),
            model: model.to_string(),
            child,
            stdin,
            stdout: BufReader::new(stdout),
            replied: false,
            exited: false,
        })
    }

    fn exchange(&mut self, line: &str) -> Result<String, CompressionError> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| CompressionError::Failed("worker input is closed".to_string()))?;
        stdin.write_all(line.as_bytes())?;
        stdin.write_all(b"\n")?;
        stdin.flush()?;

        let mut reply = String::new();
        let read = self.stdout.read_line(&mut reply)?;
        if read == 0 {
            self.exited = true;
            return Err(self.lost("exited without replying"));
        }
        self.replied = true;
        Ok(reply)
    }

    /// Error for a worker that has gone away. A worker that never answered
    /// did not start properly, so the backend counts as unavailable.
    fn lost(&self, reason: &str) -> CompressionError {
        if self.replied {
            CompressionError::Failed(format!("worker '{}' {}", self.program, reason))
        } else {
            unavailable(&self.program, reason)
        }
    }
}

impl Compressor for CommandCompressor {
    fn name(&self) -> &str {
        BACKEND
    }

    fn compress(
        &mut self,
        text: &str,
        request: &CompressionRequest,
    ) -> Result<CompressorOutput, CompressionError> {
        if self.exited {
            return Err(self.lost("is no longer running"));
        }

        let payload = serde_json::to_string(&WireRequest::new(text, request, &self.model))
            .map_err(|e| CompressionError::Protocol(e.to_string()))?;

        let reply = match self.exchange(&payload) {
            Ok(reply) => reply,
            Err(CompressionError::Io(e)) => {
                self.exited = true;
                return Err(self.lost(&format!("pipe failed: {}", e)));
            }
            Err(e) => return Err(e),
        };

        WireReply::parse(&reply)?.into_output()
    }
}

impl Drop for CommandCompressor {
    fn drop(&mut self) {
        // Closing stdin lets a well-behaved worker exit on its own.
        drop(self.stdin.take());
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}

/// Check that the worker program can be found without starting it.
pub(super) fn probe(argv: &[String]) -> Result<(), CompressionError> {
    let program = argv.first().ok_or_else(|| {
        CompressionError::InvalidRequest("compressor command is empty".to_string())
    })?;

    match resolve_program(program) {
        Some(path) => {
            tracing::debug!(program = %path.display(), "compressor worker found");
            Ok(())
        }
        None => Err(unavailable(program, "not found on PATH")),
    }
}

/// Locate `program` the way a shell would: paths are taken as-is, bare
/// names are searched on `PATH`.
fn resolve_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(program))
        .find(|full| is_executable(full))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

fn unavailable(program: &str, reason: &str) -> CompressionError {
    CompressionError::Unavailable {
        backend: BACKEND.to_string(),
        hint: format!(
            "Cannot start '{}' ({}). Install the compressor worker or set \
             [compressor].command in the config file.",
            program, reason
        ),
    }
}
