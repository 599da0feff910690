//! Mocking infrastructure for testing the pipeline without ffmpeg.
//!
//! `MockCommandRunner` records every invocation and can be scripted to
//! fail at a given call index, mimicking a non-zero ffmpeg exit. It
//! carries no extra dependencies, so it is compiled unconditionally and
//! shared by unit and integration tests.

use std::sync::{Arc, Mutex};

use super::CommandRunner;
use crate::error::{CoreError, CoreResult};

/// One recorded command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone)]
struct PlannedFailure {
    call_index: usize,
    exit_code: i32,
    stderr: String,
}

/// Scriptable [`CommandRunner`] that records calls instead of spawning.
///
/// Clones share state, so a test can hand one clone to the pipeline and
/// inspect the calls through another.
#[derive(Debug, Clone, Default)]
pub struct MockCommandRunner {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    failure: Arc<Mutex<Option<PlannedFailure>>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Default::default()
    }

    /// Script the invocation at `call_index` (0-based, counting every
    /// call) to fail with the given exit code and diagnostic text.
    pub fn fail_on_call(&self, call_index: usize, exit_code: i32, stderr: &str) {
        *self.failure.lock().unwrap() = Some(PlannedFailure {
            call_index,
            exit_code,
            stderr: stderr.to_string(),
        });
    }

    /// All invocations received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of invocations received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> CoreResult<()> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedCall {
                program: program.to_string(),
                args: args.to_vec(),
            });
            calls.len() - 1
        };

        let failure = self.failure.lock().unwrap();
        match failure.as_ref() {
            Some(planned) if planned.call_index == index => Err(CoreError::CommandFailed {
                program: program.to_string(),
                exit_code: planned.exit_code,
                stderr: planned.stderr.clone(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_calls_in_order() {
        let runner = MockCommandRunner::new();
        runner.run("ffmpeg", &["-y".to_string()]).unwrap();
        runner.run("ffmpeg", &["-i".to_string()]).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].args, vec!["-y"]);
        assert_eq!(calls[1].args, vec!["-i"]);
    }

    #[test]
    fn test_mock_scripted_failure() {
        let runner = MockCommandRunner::new();
        runner.fail_on_call(1, 187, "simulated encoder failure");

        assert!(runner.run("ffmpeg", &[]).is_ok());
        match runner.run("ffmpeg", &[]) {
            Err(CoreError::CommandFailed {
                exit_code, stderr, ..
            }) => {
                assert_eq!(exit_code, 187);
                assert_eq!(stderr, "simulated encoder failure");
            }
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }
}
