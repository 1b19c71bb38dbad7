//! Editable property definitions and change requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::enums::{ChangeType, PropertyType};

/// Which kind of section a property belongs to.
///
/// mkvpropedit edits either the segment information ("info") or one track;
/// each property name is tied to one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionAffinity {
    Info,
    Track,
}

impl SectionAffinity {
    /// Infer the affinity from the property name.
    ///
    /// Names starting with `flag-`, `language`, `name`, or `codec`, or
    /// containing `track`, are track properties; everything else edits the
    /// segment information.
    pub fn infer(name: &str) -> Self {
        const TRACK_PREFIXES: [&str; 4] = ["flag-", "language", "name", "codec"];

        if TRACK_PREFIXES.iter().any(|p| name.starts_with(p)) || name.contains("track") {
            SectionAffinity::Track
        } else {
            SectionAffinity::Info
        }
    }
}

/// Concrete edit target: the segment information or one track addressed by
/// its 1-based position in the reported track list.
///
/// The wire selector (`info` / `track:<n>`) is only produced when a command
/// is built, so a malformed selector cannot exist inside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertySection {
    Info,
    Track(u32),
}

impl PropertySection {
    /// The selector string mkvpropedit expects after `--edit`.
    pub fn selector(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PropertySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertySection::Info => write!(f, "info"),
            PropertySection::Track(ordinal) => write!(f, "track:{}", ordinal),
        }
    }
}

/// Error returned when a selector string cannot be understood.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid section selector: {0:?}")]
pub struct ParseSectionError(pub String);

impl FromStr for PropertySection {
    type Err = ParseSectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "info" {
            return Ok(PropertySection::Info);
        }
        if let Some(rest) = s.strip_prefix("track:") {
            if let Ok(ordinal) = rest.parse::<u32>() {
                // Track ordinals are positions in the track list, 1-based.
                if ordinal >= 1 {
                    return Ok(PropertySection::Track(ordinal));
                }
            }
        }
        Err(ParseSectionError(s.to_string()))
    }
}

impl Serialize for PropertySection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PropertySection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One editable property as reported by mkvpropedit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    /// Stable identifier used in the edit syntax (e.g. `flag-default`).
    pub name: String,
    /// Human-readable form of the identifier.
    pub display_name: String,
    /// Value type of the property.
    pub property_type: PropertyType,
    /// Whether the property edits a track or the segment information.
    pub section: SectionAffinity,
    /// Free-text description from the tool listing.
    pub description: String,
}

impl PropertyDefinition {
    /// Build a definition, deriving display name and section affinity from
    /// the identifier.
    pub fn new(
        name: impl Into<String>,
        property_type: PropertyType,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            display_name: display_name_for(&name),
            section: SectionAffinity::infer(&name),
            name,
            property_type,
            description: description.into(),
        }
    }

    /// Whether this is one of the boolean track flags the editor surfaces
    /// at the file level.
    pub fn is_flag(&self) -> bool {
        self.property_type == PropertyType::Boolean
            && (self.name.starts_with("flag-")
                || self.name.contains("default")
                || self.name.contains("enabled")
                || self.name.contains("forced"))
    }
}

/// De-hyphenate and title-case an identifier: `flag-default` becomes
/// `Flag Default`.
fn display_name_for(name: &str) -> String {
    name.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A single requested property mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyChange {
    /// Property identifier in the wire syntax.
    pub name: String,
    /// Edit target for this change.
    pub section: PropertySection,
    /// Kind of mutation.
    pub change_type: ChangeType,
    /// New value, string-encoded regardless of the underlying type.
    /// Unused for deletions.
    #[serde(default)]
    pub value: Option<String>,
}

impl PropertyChange {
    /// Assign a value.
    pub fn set(
        name: impl Into<String>,
        section: PropertySection,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            section,
            change_type: ChangeType::Set,
            value: Some(value.into()),
        }
    }

    /// Remove the property.
    pub fn delete(name: impl Into<String>, section: PropertySection) -> Self {
        Self {
            name: name.into(),
            section,
            change_type: ChangeType::Delete,
            value: None,
        }
    }

    /// Append a value.
    pub fn add(
        name: impl Into<String>,
        section: PropertySection,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            section,
            change_type: ChangeType::Add,
            value: Some(value.into()),
        }
    }
}
