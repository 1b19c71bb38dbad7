//! Discovery of the external mkvtoolnix binaries.
//!
//! Paths come from the settings overrides when present, otherwise from a
//! PATH search. Discovery happens once, at service construction; a missing
//! tool is fatal there rather than on first use.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ToolSettings;

pub const MKVMERGE: &str = "mkvmerge";
pub const MKVPROPEDIT: &str = "mkvpropedit";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// A required binary is neither configured nor on PATH.
    #[error("required tool not found: {0}")]
    NotFound(String),
    /// A configured override does not point at a file.
    #[error("configured path for {tool} does not exist: {path}")]
    BadOverride { tool: String, path: String },
}

/// Resolved locations of the external tools the core drives.
#[derive(Debug, Clone)]
pub struct Tools {
    pub mkvmerge: PathBuf,
    pub mkvpropedit: PathBuf,
}

impl Tools {
    /// Locate both tools, honoring settings overrides before PATH.
    pub fn discover(settings: &ToolSettings) -> Result<Self, ToolError> {
        Ok(Self {
            mkvmerge: resolve(MKVMERGE, &settings.mkvmerge_path)?,
            mkvpropedit: resolve(MKVPROPEDIT, &settings.mkvpropedit_path)?,
        })
    }
}

fn resolve(tool: &str, override_path: &str) -> Result<PathBuf, ToolError> {
    if !override_path.is_empty() {
        let path = PathBuf::from(override_path);
        if path.is_file() {
            return Ok(path);
        }
        return Err(ToolError::BadOverride {
            tool: tool.to_string(),
            path: override_path.to_string(),
        });
    }

    search_path(tool).ok_or_else(|| ToolError::NotFound(tool.to_string()))
}

fn search_path(tool: &str) -> Option<PathBuf> {
    let exe = if cfg!(windows) {
        format!("{tool}.exe")
    } else {
        tool.to_string()
    };

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(&exe))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn override_pointing_at_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("mkvmerge");
        File::create(&fake).unwrap();

        let resolved = resolve(MKVMERGE, &fake.to_string_lossy()).unwrap();
        assert_eq!(resolved, fake);
    }

    #[test]
    fn dangling_override_is_an_error() {
        let err = resolve(MKVMERGE, "/nope/mkvmerge").unwrap_err();
        assert!(matches!(err, ToolError::BadOverride { .. }));
    }

    #[test]
    fn discover_uses_both_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let merge = dir.path().join("mkvmerge");
        let propedit = dir.path().join("mkvpropedit");
        File::create(&merge).unwrap();
        File::create(&propedit).unwrap();

        let settings = ToolSettings {
            mkvmerge_path: merge.to_string_lossy().into_owned(),
            mkvpropedit_path: propedit.to_string_lossy().into_owned(),
            timeout_secs: 0,
        };

        let tools = Tools::discover(&settings).unwrap();
        assert_eq!(tools.mkvmerge, merge);
        assert_eq!(tools.mkvpropedit, propedit);
    }
}
