//! Interactions with the external ffmpeg tool.
//!
//! All subprocess use in the crate goes through the [`CommandRunner`]
//! trait so the pipeline can be tested against a scripted mock without a
//! real ffmpeg binary installed. The production implementation launches
//! the command with stdin disconnected, discards stdout, captures the
//! full stderr stream, and resolves success solely from the exit code.

use log::debug;
use std::io::{self, Read};
use std::process::{Command, Stdio};

use crate::error::{CoreError, CoreResult};

pub mod mocks;

/// Name of the external encoder/muxer binary.
pub const FFMPEG: &str = "ffmpeg";

/// Capability to run an external command to completion.
///
/// The pipeline holds a `&dyn CommandRunner`; tests substitute
/// [`mocks::MockCommandRunner`] to observe and script invocations.
pub trait CommandRunner {
    /// Run `program` with `args`, resolving `Ok(())` only on exit code 0.
    fn run(&self, program: &str, args: &[String]) -> CoreResult<()>;
}

/// Production runner backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecCommandRunner;

impl CommandRunner for ExecCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> CoreResult<()> {
        debug!("Running: {} {}", program, args.join(" "));

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CoreError::CommandStart(program.to_string(), e))?;

        // Drain stderr before waiting so a chatty child cannot block on a
        // full pipe.
        let mut stderr = String::new();
        if let Some(mut pipe) = child.stderr.take() {
            pipe.read_to_string(&mut stderr)?;
        }

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(CoreError::CommandFailed {
                program: program.to_string(),
                exit_code: status.code().unwrap_or(-1),
                stderr,
            })
        }
    }
}

/// Check that a required external command is available and executable.
///
/// Runs `<cmd> -version` with both output streams discarded. A missing
/// binary maps to [`CoreError::DependencyNotFound`]; any other launch
/// failure maps to [`CoreError::CommandStart`].
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => Err(CoreError::CommandStart(cmd_name.to_string(), e)),
    }
}
