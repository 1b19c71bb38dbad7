//! High-level property editing service.
//!
//! Owns the resolved tool locations, the shared command runner, and the
//! property catalog, and exposes the operations the UI boundary calls.
//! Every operation reports problems through its structured result type;
//! the only fallible step is construction, which fails when the external
//! tools cannot be located.

use std::path::Path;

use crate::catalog::PropertyCatalog;
use crate::config::Settings;
use crate::editor;
use crate::inspector;
use crate::models::{EditResult, FileInfo, PropertyChange, PropertyDefinition};
use crate::process::CommandRunner;
use crate::tools::{ToolError, Tools};

pub struct PropertyEditService {
    tools: Tools,
    runner: CommandRunner,
    catalog: PropertyCatalog,
}

impl PropertyEditService {
    /// Build a service from settings.
    ///
    /// Fails when mkvmerge or mkvpropedit cannot be located; a service
    /// that cannot drive either tool is useless.
    pub fn new(settings: &Settings) -> Result<Self, ToolError> {
        let tools = Tools::discover(&settings.tools)?;
        tracing::debug!("using mkvmerge at {}", tools.mkvmerge.display());
        tracing::debug!("using mkvpropedit at {}", tools.mkvpropedit.display());

        Ok(Self {
            tools,
            runner: CommandRunner::with_timeout(settings.tools.timeout()),
            catalog: PropertyCatalog::new(),
        })
    }

    /// Editable property definitions, fetched once and cached for the
    /// process lifetime.
    pub fn available_properties(&self) -> &[PropertyDefinition] {
        self.catalog.list(&self.runner, &self.tools.mkvpropedit)
    }

    /// Whether the path points at an existing, identifiable Matroska file.
    pub fn is_valid_file(&self, path: &Path) -> bool {
        inspector::validate(&self.runner, &self.tools.mkvmerge, path)
    }

    /// Read the current track and property state of a file.
    ///
    /// Validation failures come back as an invalid [`FileInfo`], never as
    /// an error.
    pub fn read_file_properties(&self, path: &Path) -> FileInfo {
        let catalog = self.available_properties();
        inspector::read_properties(&self.runner, &self.tools.mkvmerge, path, catalog)
    }

    /// Apply a batch of property changes to a file.
    pub fn apply_changes(&self, path: &Path, changes: &[PropertyChange]) -> EditResult {
        editor::apply(&self.runner, &self.tools.mkvpropedit, path, changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolSettings;
    use std::fs::File;

    fn settings_with_overrides(dir: &Path) -> Settings {
        let merge = dir.join("mkvmerge");
        let propedit = dir.join("mkvpropedit");
        File::create(&merge).unwrap();
        File::create(&propedit).unwrap();

        Settings {
            tools: ToolSettings {
                mkvmerge_path: merge.to_string_lossy().into_owned(),
                mkvpropedit_path: propedit.to_string_lossy().into_owned(),
                timeout_secs: 0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn construction_fails_when_a_tool_is_missing() {
        let settings = Settings {
            tools: ToolSettings {
                mkvmerge_path: "/nope/mkvmerge".to_string(),
                mkvpropedit_path: "/nope/mkvpropedit".to_string(),
                timeout_secs: 0,
            },
            ..Default::default()
        };

        assert!(PropertyEditService::new(&settings).is_err());
    }

    #[test]
    fn construction_succeeds_with_resolvable_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_with_overrides(dir.path());

        assert!(PropertyEditService::new(&settings).is_ok());
    }

    #[test]
    fn catalog_fails_soft_when_the_tool_cannot_run() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_with_overrides(dir.path());
        let service = PropertyEditService::new(&settings).unwrap();

        // The override files exist but are not executable, so the listing
        // cannot run; the catalog degrades to empty instead of erroring.
        assert!(service.available_properties().is_empty());
    }

    #[test]
    fn empty_change_batch_never_reaches_the_tool() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_with_overrides(dir.path());
        let service = PropertyEditService::new(&settings).unwrap();

        let result = service.apply_changes(Path::new("/videos/movie.mkv"), &[]);
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }
}
