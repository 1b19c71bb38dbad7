//! Track and file state as read from a container.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::enums::TrackType;
use super::properties::PropertyDefinition;

/// Undetermined language code; treated the same as an absent one.
const UND: &str = "und";

/// One media track inside a container.
///
/// `id` is the number the prober reports for the track (0-based, not
/// necessarily contiguous). It is NOT the ordinal used to address the track
/// in edit commands; that ordinal is the track's 1-based position in the
/// reported list. The two must never be conflated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Container-assigned track number from the probe.
    pub id: usize,
    /// Kind of track.
    pub track_type: TrackType,
    /// Track name, if set.
    #[serde(default)]
    pub name: Option<String>,
    /// Legacy (ISO 639-2) language code, if set.
    #[serde(default)]
    pub language: Option<String>,
    /// IETF BCP 47 language tag, if set.
    #[serde(default)]
    pub language_ietf: Option<String>,
    /// Default track flag.
    #[serde(default)]
    pub is_default: bool,
    /// Enabled track flag.
    #[serde(default)]
    pub is_enabled: bool,
    /// Forced display flag.
    #[serde(default)]
    pub is_forced: bool,
}

impl TrackInfo {
    /// The language to display: the IETF tag when present and determined,
    /// otherwise the legacy code when determined, otherwise nothing.
    pub fn resolved_language(&self) -> Option<&str> {
        match self.language_ietf.as_deref() {
            Some(lang) if lang != UND => Some(lang),
            _ => match self.language.as_deref() {
                Some(lang) if lang != UND => Some(lang),
                _ => None,
            },
        }
    }
}

/// A property definition paired with its current string-encoded value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub definition: PropertyDefinition,
    pub value: String,
}

/// Everything the editor knows about one container file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Path the file was read from.
    pub path: PathBuf,
    /// File-level flag properties with their current values.
    pub properties: Vec<PropertyValue>,
    /// Tracks in reported order; edit ordinals follow this order, 1-based.
    pub tracks: Vec<TrackInfo>,
    /// Whether the file passed validation and was probed successfully.
    pub is_valid: bool,
    /// Why the file is invalid, when it is.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Segment title, if the container carries one.
    #[serde(default)]
    pub title: Option<String>,
}

impl FileInfo {
    /// An invalid file report. Properties and tracks stay empty.
    pub fn invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            properties: Vec::new(),
            tracks: Vec::new(),
            is_valid: false,
            error_message: Some(reason.into()),
            title: None,
        }
    }

    /// Tracks paired with the 1-based ordinal used to address them in
    /// edit commands.
    pub fn tracks_with_ordinals(&self) -> impl Iterator<Item = (u32, &TrackInfo)> {
        self.tracks
            .iter()
            .enumerate()
            .map(|(index, track)| ((index + 1) as u32, track))
    }
}
