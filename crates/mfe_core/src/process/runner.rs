//! Command runner for external tool execution.
//!
//! Both output streams are drained line by line on dedicated reader
//! threads, so a child producing large output cannot fill a pipe and
//! deadlock against us reading the other one.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Exit code reported when the child could not be spawned, was killed on
/// timeout, or terminated by a signal.
pub const UNAVAILABLE_EXIT_CODE: i32 = -1;

/// Poll interval while waiting on a child with a timeout configured.
const WAIT_POLL: Duration = Duration::from_millis(50);

/// Captured output of one external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Distinguished failure for paths or platforms where the process
    /// could not run at all.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            exit_code: UNAVAILABLE_EXIT_CODE,
            stdout: String::new(),
            stderr: reason.into(),
        }
    }

    /// Stdout and stderr joined, for scanning diagnostics that the tool
    /// may print on either stream.
    pub fn combined(&self) -> String {
        if self.stdout.is_empty() {
            self.stderr.clone()
        } else if self.stderr.is_empty() {
            self.stdout.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Seam for external tool execution.
///
/// Implementations never fail: anything preventing the run is reported
/// through [`ToolOutput::unavailable`] so callers deal with one shape.
pub trait ToolRunner {
    fn run(&self, program: &Path, args: &[String]) -> ToolOutput;
}

/// Production runner backed by `std::process`.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    timeout: Option<Duration>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Runner that kills the child once the wall-clock limit elapses.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    fn wait(&self, child: &mut Child) -> i32 {
        let status = match self.timeout {
            None => child.wait().ok(),
            Some(limit) => {
                let start = Instant::now();
                loop {
                    match child.try_wait() {
                        Ok(Some(status)) => break Some(status),
                        Ok(None) if start.elapsed() >= limit => {
                            tracing::warn!(
                                "child did not finish within {}s, killing it",
                                limit.as_secs()
                            );
                            let _ = child.kill();
                            break child.wait().ok();
                        }
                        Ok(None) => thread::sleep(WAIT_POLL),
                        Err(_) => break None,
                    }
                }
            }
        };

        // Signal-terminated children have no exit code.
        status.and_then(|s| s.code()).unwrap_or(UNAVAILABLE_EXIT_CODE)
    }
}

impl ToolRunner for CommandRunner {
    fn run(&self, program: &Path, args: &[String]) -> ToolOutput {
        tracing::debug!("$ {} {}", program.display(), args.join(" "));

        let mut child = match Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return ToolOutput::unavailable(format!(
                    "failed to start {}: {}",
                    program.display(),
                    e
                ))
            }
        };

        let stdout_handle = child.stdout.take().map(spawn_line_reader);
        let stderr_handle = child.stderr.take().map(spawn_line_reader);

        let exit_code = self.wait(&mut child);

        ToolOutput {
            exit_code,
            stdout: stdout_handle.map(join_lines).unwrap_or_default(),
            stderr: stderr_handle.map(join_lines).unwrap_or_default(),
        }
    }
}

/// Drain a stream line by line on its own thread.
fn spawn_line_reader<R: Read + Send + 'static>(stream: R) -> thread::JoinHandle<Vec<String>> {
    thread::spawn(move || {
        let mut lines = Vec::new();
        for line in BufReader::new(stream).lines() {
            match line {
                Ok(line) => lines.push(line),
                Err(_) => break,
            }
        }
        lines
    })
}

/// Collect the reader thread's lines into one block with no trailing
/// newline.
fn join_lines(handle: thread::JoinHandle<Vec<String>>) -> String {
    handle.join().map(|lines| lines.join("\n")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unspawnable_program_reports_unavailable() {
        let runner = CommandRunner::new();
        let output = runner.run(Path::new("/nonexistent/no-such-binary"), &[]);

        assert_eq!(output.exit_code, UNAVAILABLE_EXIT_CODE);
        assert!(output.stdout.is_empty());
        assert!(output.stderr.contains("failed to start"));
    }

    #[cfg(unix)]
    #[test]
    fn captures_both_streams_with_trailing_newline_trimmed() {
        let runner = CommandRunner::new();
        let args = vec![
            "-c".to_string(),
            "printf 'out1\\nout2\\n'; printf 'err1\\n' >&2".to_string(),
        ];
        let output = runner.run(Path::new("/bin/sh"), &args);

        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout, "out1\nout2");
        assert_eq!(output.stderr, "err1");
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_code_is_reported() {
        let runner = CommandRunner::new();
        let args = vec!["-c".to_string(), "exit 5".to_string()];
        let output = runner.run(Path::new("/bin/sh"), &args);

        assert_eq!(output.exit_code, 5);
    }

    #[test]
    fn combined_joins_streams_once() {
        let output = ToolOutput::new(0, "out", "err");
        assert_eq!(output.combined(), "out\nerr");

        let only_err = ToolOutput::new(0, "", "err");
        assert_eq!(only_err.combined(), "err");
    }
}
