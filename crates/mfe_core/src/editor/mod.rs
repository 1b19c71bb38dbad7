//! Applies planned edits and interprets mkvpropedit outcomes.
//!
//! Exit codes map to three outcomes: 0 is clean success, 1 means the edits
//! were applied but the tool warned about something, anything else is
//! failure. Warnings are collected in every case; they never change the
//! classification.

use std::path::Path;

use crate::models::{EditResult, PropertyChange};
use crate::planner;
use crate::process::{ToolOutput, ToolRunner};

/// Message attached to applied-with-warnings outcomes.
pub const WARNINGS_MESSAGE: &str = "Operation completed with warnings";

/// Apply a batch of property changes to a file.
///
/// An empty batch short-circuits to success without touching the tool.
pub fn apply(
    runner: &dyn ToolRunner,
    mkvpropedit: &Path,
    path: &Path,
    changes: &[PropertyChange],
) -> EditResult {
    if changes.is_empty() {
        return EditResult::no_changes();
    }

    let tokens = planner::plan(path, changes);
    let output = runner.run(mkvpropedit, &tokens);
    let result = classify(&output);

    if result.success {
        tracing::debug!(
            "applied {} change(s) to {} ({} warning(s))",
            changes.len(),
            path.display(),
            result.warnings.len()
        );
    } else {
        tracing::warn!(
            "edit of {} failed with exit code {}",
            path.display(),
            result.exit_code
        );
    }

    result
}

/// Map one tool invocation onto an [`EditResult`].
pub fn classify(output: &ToolOutput) -> EditResult {
    let warnings = extract_warnings(&output.combined());

    match output.exit_code {
        0 => EditResult {
            success: true,
            error_message: None,
            warnings,
            exit_code: 0,
        },
        1 => EditResult {
            success: true,
            error_message: Some(WARNINGS_MESSAGE.to_string()),
            warnings,
            exit_code: 1,
        },
        code => EditResult {
            success: false,
            error_message: Some(output.stderr.clone()),
            warnings,
            exit_code: code,
        },
    }
}

/// Trimmed lines starting with a case-insensitive `Warning:` token.
pub fn extract_warnings(combined: &str) -> Vec<String> {
    combined
        .lines()
        .map(str::trim)
        .filter(|line| {
            line.get(..8)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("warning:"))
        })
        .map(str::to_string)
        .collect()
}
