//! CXX bridge between mfe_core (Rust) and the Qt UI (C++).
//!
//! All core functionality crosses this boundary as a request/response
//! pair: primitives stay primitives, everything structured travels as a
//! JSON string so the UI layer can stay schema-driven. No call here ever
//! panics across the FFI boundary; every failure comes back as an
//! error-shaped payload.

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::Serialize;

use mfe_core::config::ConfigManager;
use mfe_core::logging;
use mfe_core::models::{EditResult, FileInfo, PropertyChange};
use mfe_core::service::PropertyEditService;

#[cxx::bridge(namespace = "mfe")]
mod ffi {
    extern "Rust" {
        /// Editable property definitions as a JSON array.
        fn bridge_available_properties() -> String;

        /// Whether the path is an existing, identifiable Matroska file.
        fn bridge_is_valid_file(path: &str) -> bool;

        /// Current track/property state of a file as JSON.
        fn bridge_read_file_properties(path: &str) -> String;

        /// Apply a JSON array of property changes; returns a JSON edit
        /// result.
        fn bridge_apply_changes(path: &str, changes_json: &str) -> String;

        /// Core crate version.
        fn bridge_version() -> String;
    }
}

fn config_path() -> PathBuf {
    // XDG config dir where available, current dir otherwise.
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("mkv-flag-editor").join("settings.toml")
    } else {
        PathBuf::from("settings.toml")
    }
}

/// The shared service, built on first use so the property catalog is
/// cached for the whole process. Construction failure is remembered and
/// re-reported on every call.
fn service() -> Result<&'static PropertyEditService, String> {
    static SERVICE: OnceCell<Result<PropertyEditService, String>> = OnceCell::new();

    SERVICE
        .get_or_init(|| {
            let mut manager = ConfigManager::new(config_path());
            let load_result = manager.load_or_create();
            let settings = manager.settings().clone();

            logging::init_tracing(settings.logging.level);
            if let Err(e) = load_result {
                tracing::warn!("falling back to default settings: {}", e);
            }

            PropertyEditService::new(&settings).map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(Clone::clone)
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| error_json(&e.to_string()))
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

fn bridge_available_properties() -> String {
    match service() {
        Ok(service) => to_json(&service.available_properties()),
        Err(e) => error_json(&e),
    }
}

fn bridge_is_valid_file(path: &str) -> bool {
    match service() {
        Ok(service) => service.is_valid_file(Path::new(path)),
        Err(_) => false,
    }
}

fn bridge_read_file_properties(path: &str) -> String {
    match service() {
        Ok(service) => to_json(&service.read_file_properties(Path::new(path))),
        Err(e) => to_json(&FileInfo::invalid(path, e)),
    }
}

fn bridge_apply_changes(path: &str, changes_json: &str) -> String {
    let changes: Vec<PropertyChange> = match serde_json::from_str(changes_json) {
        Ok(changes) => changes,
        Err(e) => {
            return to_json(&EditResult::failure(
                format!("invalid change list: {}", e),
                -1,
            ))
        }
    };

    match service() {
        Ok(service) => to_json(&service.apply_changes(Path::new(path), &changes)),
        Err(e) => to_json(&EditResult::failure(e, -1)),
    }
}

fn bridge_version() -> String {
    mfe_core::version().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_change_list_returns_failure_result() {
        let json = bridge_apply_changes("/videos/movie.mkv", "this is not json");
        let result: EditResult = serde_json::from_str(&json).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, -1);
        assert!(result
            .error_message
            .as_deref()
            .unwrap()
            .starts_with("invalid change list"));
    }

    #[test]
    fn change_list_wire_format_parses() {
        let raw = r#"[
            {"name": "flag-default", "section": "track:2", "change_type": "set", "value": "1"},
            {"name": "title", "section": "info", "change_type": "delete"}
        ]"#;
        let changes: Vec<PropertyChange> = serde_json::from_str(raw).unwrap();

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].name, "flag-default");
        assert_eq!(changes[1].value, None);
    }

    #[test]
    fn error_json_is_parseable() {
        let value: serde_json::Value = serde_json::from_str(&error_json("boom")).unwrap();
        assert_eq!(value["error"], "boom");
    }
}
