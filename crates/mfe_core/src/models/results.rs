//! Outcome types for edit operations.

use serde::{Deserialize, Serialize};

/// Outcome of applying a batch of property changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditResult {
    /// Whether the edits were applied. Exit code 1 still counts as applied;
    /// the warnings and message carry the caveat.
    pub success: bool,
    /// Failure reason, or the warning notice on partial success.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Warning lines extracted from the tool output. Empty when none.
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Exit code of the underlying process, 0 when nothing ran.
    pub exit_code: i32,
}

impl EditResult {
    /// Trivial success for an empty change batch; nothing was invoked.
    pub fn no_changes() -> Self {
        Self {
            success: true,
            error_message: None,
            warnings: Vec::new(),
            exit_code: 0,
        }
    }

    /// A failure that never reached or never finished the external tool.
    pub fn failure(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            warnings: Vec::new(),
            exit_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_changes_is_clean_success() {
        let result = EditResult::no_changes();
        assert!(result.success);
        assert_eq!(result.error_message, None);
        assert!(result.warnings.is_empty());
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn failure_carries_message() {
        let result = EditResult::failure("tool missing", -1);
        assert!(!result.success);
        assert_eq!(result.error_message.as_deref(), Some("tool missing"));
        assert_eq!(result.exit_code, -1);
    }
}
