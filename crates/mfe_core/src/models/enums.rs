//! Core enums used throughout the application.

use serde::{Deserialize, Serialize};

/// Type of media track as reported by the prober.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    Video,
    Audio,
    Subtitles,
    Buttons,
    Other,
}

impl TrackType {
    /// Map a probe type string to a track type.
    ///
    /// Matching is case-insensitive and tolerates singular forms; unknown
    /// strings map to `Other` rather than failing.
    pub fn from_probe(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "video" => TrackType::Video,
            "audio" => TrackType::Audio,
            "subtitles" | "subtitle" => TrackType::Subtitles,
            "buttons" | "button" => TrackType::Buttons,
            _ => TrackType::Other,
        }
    }
}

impl std::fmt::Display for TrackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackType::Video => write!(f, "video"),
            TrackType::Audio => write!(f, "audio"),
            TrackType::Subtitles => write!(f, "subtitles"),
            TrackType::Buttons => write!(f, "buttons"),
            TrackType::Other => write!(f, "other"),
        }
    }
}

/// Value type of an editable container property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Boolean,
    String,
    Integer,
    UnsignedInteger,
    Float,
    Binary,
    Unknown,
}

impl PropertyType {
    /// Map mkvpropedit's type label to a property type.
    ///
    /// Matching is case-insensitive; labels that are not recognized map to
    /// `Unknown` rather than failing.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "boolean" | "bool" => PropertyType::Boolean,
            "string" => PropertyType::String,
            "integer" | "signed integer" | "signed-integer" => PropertyType::Integer,
            "unsigned integer" | "unsigned-integer" => PropertyType::UnsignedInteger,
            "float" => PropertyType::Float,
            "binary" => PropertyType::Binary,
            _ => PropertyType::Unknown,
        }
    }
}

/// Kind of mutation requested for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// Assign a value, replacing any existing one.
    Set,
    /// Remove the property entirely.
    Delete,
    /// Append a value without touching existing occurrences.
    Add,
}
