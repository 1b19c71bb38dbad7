//! Editable property catalog.
//!
//! mkvpropedit knows which container properties can be edited; the catalog
//! fetches that listing once per process and caches the parsed
//! definitions. A failed listing yields an empty catalog so callers can
//! keep going in a degraded mode instead of erroring out.

mod parser;

use std::path::Path;

use once_cell::sync::OnceCell;

use crate::models::PropertyDefinition;
use crate::process::ToolRunner;

pub use parser::parse_listing;

const LIST_ARG: &str = "--list-property-names";

/// Process-wide cache of editable property definitions.
///
/// The first [`list`](Self::list) call invokes mkvpropedit; later calls
/// return the memoized result. The cache only resets with the process.
#[derive(Debug, Default)]
pub struct PropertyCatalog {
    cache: OnceCell<Vec<PropertyDefinition>>,
}

impl PropertyCatalog {
    pub fn new() -> Self {
        Self {
            cache: OnceCell::new(),
        }
    }

    pub fn list(&self, runner: &dyn ToolRunner, mkvpropedit: &Path) -> &[PropertyDefinition] {
        self.cache
            .get_or_init(|| fetch(runner, mkvpropedit))
            .as_slice()
    }
}

fn fetch(runner: &dyn ToolRunner, mkvpropedit: &Path) -> Vec<PropertyDefinition> {
    let output = runner.run(mkvpropedit, &[LIST_ARG.to_string()]);

    if output.exit_code != 0 {
        tracing::warn!(
            "property listing failed (exit {}): {}",
            output.exit_code,
            output.stderr.trim()
        );
        return Vec::new();
    }

    let definitions = parse_listing(&output.stdout);
    tracing::debug!("cached {} property definitions", definitions.len());
    definitions
}
