//! Settings struct with TOML-based sections.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// External tool configuration.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// External tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Override path to mkvpropedit. Empty means search PATH.
    #[serde(default)]
    pub mkvpropedit_path: String,

    /// Override path to mkvmerge. Empty means search PATH.
    #[serde(default)]
    pub mkvmerge_path: String,

    /// Kill external tools after this many seconds. 0 disables the limit.
    #[serde(default)]
    pub timeout_secs: u64,
}

impl ToolSettings {
    /// The configured timeout, if one is set.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level to log when RUST_LOG is not set.
    #[serde(default)]
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_means_none() {
        let settings = ToolSettings::default();
        assert_eq!(settings.timeout(), None);
    }

    #[test]
    fn positive_timeout_maps_to_duration() {
        let settings = ToolSettings {
            timeout_secs: 30,
            ..Default::default()
        };
        assert_eq!(settings.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn missing_sections_deserialize_to_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert!(settings.tools.mkvmerge_path.is_empty());
        assert_eq!(settings.logging.level, LogLevel::Info);
    }
}
