// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

//! Structured invocation of external tool binaries. Arguments are passed
//! as an ordered vector, never through a shell, so benchmark names with
//! shell metacharacters cannot change the command.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    /// The binary could not be started at all (missing or not
    /// executable). Distinct from a tool that ran and failed.
    #[error("failed to launch `{cmd}`: {source}")]
    Launch { cmd: String, source: io::Error },
    /// The tool ran and reported failure through its exit status.
    #[error("command failed with {status}: {cmd}")]
    Failed { cmd: String, status: ExitStatus },
    /// Copying the child's diagnostic stream broke down mid-run.
    #[error("lost contact with `{cmd}`: {source}")]
    Relay { cmd: String, source: io::Error },
}

/// One external tool call: executable path plus positional arguments.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

/// What one completed tool call did: exit status, elapsed wall time and
/// any captured output.
#[derive(Debug)]
pub struct Invocation {
    pub status: ExitStatus,
    pub elapsed: Duration,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    /// Run to completion with stdout dropped. The tools print banners and
    /// statistics there that the harness does not interpret.
    pub fn run_discard(&self) -> Result<Invocation, ExecError> {
        let start = Instant::now();
        let status = self
            .command()
            .stdout(Stdio::null())
            .status()
            .map_err(|source| self.launch_err(source))?;
        Ok(Invocation {
            status,
            elapsed: start.elapsed(),
            stdout: Vec::new(),
            stderr: Vec::new(),
        })
    }

    /// Run to completion, buffering both output streams.
    pub fn run_capture(&self) -> Result<Invocation, ExecError> {
        let start = Instant::now();
        let output = self
            .command()
            .output()
            .map_err(|source| self.launch_err(source))?;
        Ok(Invocation {
            status: output.status,
            elapsed: start.elapsed(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    /// Run with stdout dropped and fail on any non-zero exit, naming the
    /// exact command line so it can be re-run by hand.
    pub fn run_checked(&self) -> Result<Invocation, ExecError> {
        let run = self.run_discard()?;
        if run.status.success() {
            Ok(run)
        } else {
            Err(ExecError::Failed {
                cmd: self.to_string(),
                status: run.status,
            })
        }
    }

    /// Spawn the tool and copy its stderr to `out` as bytes arrive,
    /// flushing after every chunk. Returns once the stream is closed and
    /// the child has exited; the child's stdout is inherited.
    pub fn relay_stderr(&self, out: &mut dyn Write) -> Result<Invocation, ExecError> {
        let start = Instant::now();
        let mut child = self
            .command()
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| self.launch_err(source))?;
        let mut stream = child.stderr.take().ok_or_else(|| ExecError::Relay {
            cmd: self.to_string(),
            source: io::Error::new(io::ErrorKind::BrokenPipe, "child stderr was not captured"),
        })?;
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf).map_err(|e| self.relay_err(e))?;
            if n == 0 {
                break;
            }
            out.write_all(&buf[..n]).map_err(|e| self.relay_err(e))?;
            out.flush().map_err(|e| self.relay_err(e))?;
        }
        let status = child.wait().map_err(|e| self.relay_err(e))?;
        Ok(Invocation {
            status,
            elapsed: start.elapsed(),
            stdout: Vec::new(),
            stderr: Vec::new(),
        })
    }

    fn launch_err(&self, source: io::Error) -> ExecError {
        ExecError::Launch {
            cmd: self.to_string(),
            source,
        }
    }

    fn relay_err(&self, source: io::Error) -> ExecError {
        ExecError::Relay {
            cmd: self.to_string(),
            source,
        }
    }
}

/// The literal command line, for diagnostics.
impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", Path::new(arg).display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_the_command_line() {
        let cmd = ToolCommand::new("./addParityTool")
            .arg("benchmarks/a.aig")
            .arg("99")
            .arg("2")
            .arg("tmp/prot_a.aig");
        assert_eq!(
            cmd.to_string(),
            "./addParityTool benchmarks/a.aig 99 2 tmp/prot_a.aig"
        );
    }

    #[cfg(unix)]
    #[test]
    fn launch_failure_is_not_an_exit_failure() {
        let cmd = ToolCommand::new("/nonexistent/tool").arg("x");
        match cmd.run_checked() {
            Err(ExecError::Launch { cmd, .. }) => {
                assert!(cmd.starts_with("/nonexistent/tool"))
            }
            other => panic!("expected a launch error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_carries_the_command_line() {
        let cmd = ToolCommand::new("/bin/sh").arg("-c").arg("exit 3");
        match cmd.run_checked() {
            Err(ExecError::Failed { cmd, status }) => {
                assert!(cmd.starts_with("/bin/sh"));
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("expected an exit failure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn capture_buffers_both_streams() {
        let cmd = ToolCommand::new("/bin/sh")
            .arg("-c")
            .arg("echo out; echo err >&2");
        let run = cmd.run_capture().unwrap();
        assert!(run.status.success());
        assert_eq!(run.stdout, b"out\n");
        assert_eq!(run.stderr, b"err\n");
    }

    #[cfg(unix)]
    #[test]
    fn relay_preserves_byte_order() {
        let cmd = ToolCommand::new("/bin/sh")
            .arg("-c")
            .arg("printf 'one\\ntwo\\n' >&2; printf 'three\\n' >&2");
        let mut seen = Vec::new();
        let run = cmd.relay_stderr(&mut seen).unwrap();
        assert!(run.status.success());
        assert_eq!(seen, b"one\ntwo\nthree\n");
    }
}
