//! Scripted tool runner for tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{ToolOutput, ToolRunner};

/// Runner that replays a fixed sequence of outputs and records every
/// invocation, so tests can assert on both.
pub(crate) struct StubRunner {
    outputs: Mutex<Vec<ToolOutput>>,
    calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
}

impl StubRunner {
    pub fn new(outputs: Vec<ToolOutput>) -> Self {
        Self {
            outputs: Mutex::new(outputs),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Runner whose single invocation succeeds with the given stdout.
    pub fn ok(stdout: &str) -> Self {
        Self::new(vec![ToolOutput::new(0, stdout, "")])
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ToolRunner for StubRunner {
    fn run(&self, program: &Path, args: &[String]) -> ToolOutput {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_path_buf(), args.to_vec()));

        let mut outputs = self.outputs.lock().unwrap();
        if outputs.is_empty() {
            ToolOutput::unavailable("stub runner has no more scripted outputs")
        } else {
            outputs.remove(0)
        }
    }
}
