//! MFE Core - Backend logic for MKV Flag Editor
//!
//! This crate contains all business logic with zero UI dependencies.
//! The UI shell talks to it through the bridge crate; everything here is
//! also usable from a plain CLI or from tests.
//!
//! The core drives two external mkvtoolnix binaries: `mkvmerge` for
//! identifying files and `mkvpropedit` for editing container properties.
//! It never touches the Matroska binary format itself.

pub mod catalog;
pub mod config;
pub mod editor;
pub mod inspector;
pub mod logging;
pub mod models;
pub mod planner;
pub mod process;
pub mod service;
pub mod tools;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
