//! File validation and probing using mkvmerge -J.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::{FileInfo, PropertyDefinition, PropertyValue, TrackInfo, TrackType};
use crate::process::{ToolOutput, ToolRunner};

/// Extension a candidate file must carry.
const MKV_EXTENSION: &str = "mkv";

/// Reasons a path fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("file does not exist: {}", .0.display())]
    Missing(PathBuf),
    #[error("not a Matroska file: {}", .0.display())]
    WrongExtension(PathBuf),
    #[error("file could not be identified: {0}")]
    ProbeFailed(String),
}

/// Whether the path points at an existing, identifiable Matroska file.
pub fn validate(runner: &dyn ToolRunner, mkvmerge: &Path, path: &Path) -> bool {
    check_file(runner, mkvmerge, path).is_ok()
}

/// Validation with the failure reason, for callers that report it.
///
/// Checks run in order and stop at the first failure: existence,
/// extension, then a probe that must exit 0 with non-empty output.
pub fn check_file(
    runner: &dyn ToolRunner,
    mkvmerge: &Path,
    path: &Path,
) -> Result<(), ValidationFailure> {
    if !path.exists() {
        return Err(ValidationFailure::Missing(path.to_path_buf()));
    }

    let extension_ok = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case(MKV_EXTENSION))
        .unwrap_or(false);
    if !extension_ok {
        return Err(ValidationFailure::WrongExtension(path.to_path_buf()));
    }

    let output = probe(runner, mkvmerge, path);
    if output.exit_code != 0 {
        let detail = if output.stderr.trim().is_empty() {
            format!("identify exited with code {}", output.exit_code)
        } else {
            output.stderr.trim().to_string()
        };
        return Err(ValidationFailure::ProbeFailed(detail));
    }
    if output.stdout.trim().is_empty() {
        return Err(ValidationFailure::ProbeFailed(
            "identify produced no output".to_string(),
        ));
    }

    Ok(())
}

/// Read the current track and property state of a file.
///
/// On validation failure the returned [`FileInfo`] is invalid and carries
/// the reason; nothing is raised, and repeated calls give the same answer.
pub fn read_properties(
    runner: &dyn ToolRunner,
    mkvmerge: &Path,
    path: &Path,
    catalog: &[PropertyDefinition],
) -> FileInfo {
    if let Err(reason) = check_file(runner, mkvmerge, path) {
        return FileInfo::invalid(path, reason.to_string());
    }

    let output = probe(runner, mkvmerge, path);
    let (tracks, title) = match parse_identify_json(&output.stdout) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(
                "structured identify output unusable ({}), using text fallback",
                e
            );
            (parse_identify_text(&output.stdout), None)
        }
    };

    FileInfo {
        path: path.to_path_buf(),
        properties: flag_baseline(catalog),
        tracks,
        is_valid: true,
        error_message: None,
        title,
    }
}

fn probe(runner: &dyn ToolRunner, mkvmerge: &Path, path: &Path) -> ToolOutput {
    let args = vec!["-J".to_string(), path.to_string_lossy().into_owned()];
    runner.run(mkvmerge, &args)
}

/// Known flag properties materialized with a fixed "0" starting value.
///
/// The per-track flag state lives on [`TrackInfo`]; this file-level listing
/// is a constant baseline, not read back from the container.
fn flag_baseline(catalog: &[PropertyDefinition]) -> Vec<PropertyValue> {
    catalog
        .iter()
        .filter(|definition| definition.is_flag())
        .map(|definition| PropertyValue {
            definition: definition.clone(),
            value: "0".to_string(),
        })
        .collect()
}

// =============================================================================
// STRUCTURED (JSON) IDENTIFY OUTPUT
// =============================================================================

#[derive(Debug, Deserialize)]
struct Identify {
    #[serde(default)]
    container: Option<IdentifyContainer>,
    #[serde(default)]
    tracks: Vec<IdentifyTrack>,
}

#[derive(Debug, Deserialize)]
struct IdentifyContainer {
    #[serde(default)]
    properties: Option<IdentifyContainerProperties>,
}

#[derive(Debug, Deserialize)]
struct IdentifyContainerProperties {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdentifyTrack {
    id: usize,
    #[serde(rename = "type")]
    track_type: String,
    #[serde(default)]
    properties: IdentifyTrackProperties,
}

/// Optional-field schema for a track's properties object. Absent flags
/// decode as false; absent strings as None.
#[derive(Debug, Default, Deserialize)]
struct IdentifyTrackProperties {
    #[serde(default)]
    track_name: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    language_ietf: Option<String>,
    #[serde(default)]
    default_track: bool,
    #[serde(default)]
    enabled_track: bool,
    #[serde(default)]
    forced_track: bool,
}

impl From<IdentifyTrack> for TrackInfo {
    fn from(track: IdentifyTrack) -> Self {
        let props = track.properties;
        Self {
            id: track.id,
            track_type: TrackType::from_probe(&track.track_type),
            name: props.track_name,
            language: props.language,
            language_ietf: props.language_ietf,
            is_default: props.default_track,
            is_enabled: props.enabled_track,
            is_forced: props.forced_track,
        }
    }
}

fn parse_identify_json(
    stdout: &str,
) -> Result<(Vec<TrackInfo>, Option<String>), serde_json::Error> {
    let identify: Identify = serde_json::from_str(stdout)?;

    let title = identify
        .container
        .and_then(|c| c.properties)
        .and_then(|p| p.title);
    let tracks = identify.tracks.into_iter().map(TrackInfo::from).collect();

    Ok((tracks, title))
}

// =============================================================================
// TEXT FALLBACK
// =============================================================================

/// Recover track id and type from the plain identify format
/// (`Track ID <n>: <type> (...)`).
///
/// Everything else is unknowable here; flags stay false except enabled,
/// which this format carries no signal for and is assumed on.
fn parse_identify_text(stdout: &str) -> Vec<TrackInfo> {
    let mut tracks = Vec::new();

    for line in stdout.lines() {
        let Some(rest) = line.trim().strip_prefix("Track ID ") else {
            continue;
        };
        let Some((id_part, type_part)) = rest.split_once(':') else {
            continue;
        };
        let Ok(id) = id_part.trim().parse::<usize>() else {
            continue;
        };

        let type_word = type_part.trim().split([' ', '(']).next().unwrap_or("");
        tracks.push(TrackInfo {
            id,
            track_type: TrackType::from_probe(type_word),
            name: None,
            language: None,
            language_ietf: None,
            is_default: false,
            is_enabled: true,
            is_forced: false,
        });
    }

    tracks
}
