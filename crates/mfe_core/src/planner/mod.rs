//! Builds mkvpropedit argument sequences from property change batches.
//!
//! Changes are grouped by their edit target in the order the targets first
//! appear; every group except the segment information opens with an
//! `--edit` selector, then each change maps to one directive. The planner
//! is mechanical on purpose: it emits exactly the batch it is handed and
//! enforces no flag semantics of its own. Keeping the default flag unique
//! per track type is the caller's contract; [`default_flag_batch`] derives
//! such a batch from current track state for callers that want it.

use std::path::Path;

use crate::models::{ChangeType, PropertyChange, PropertySection, TrackInfo, TrackType};

/// Wire name of the default track flag.
pub const FLAG_DEFAULT: &str = "flag-default";

/// Build the full mkvpropedit argument sequence for a change batch.
///
/// The file path comes first, then the grouped directives.
pub fn plan(path: &Path, changes: &[PropertyChange]) -> Vec<String> {
    let mut tokens = vec![path.to_string_lossy().into_owned()];

    for (section, group) in group_by_section(changes) {
        if section != PropertySection::Info {
            tokens.push("--edit".to_string());
            tokens.push(section.selector());
        }

        for change in group {
            match change.change_type {
                ChangeType::Set => {
                    tokens.push("--set".to_string());
                    tokens.push(assignment(change));
                }
                ChangeType::Delete => {
                    tokens.push("--delete".to_string());
                    tokens.push(change.name.clone());
                }
                ChangeType::Add => {
                    tokens.push("--add".to_string());
                    tokens.push(assignment(change));
                }
            }
        }
    }

    tokens
}

/// Group changes by section, preserving the order sections first appear.
fn group_by_section(changes: &[PropertyChange]) -> Vec<(PropertySection, Vec<&PropertyChange>)> {
    let mut groups: Vec<(PropertySection, Vec<&PropertyChange>)> = Vec::new();

    for change in changes {
        match groups.iter_mut().find(|(section, _)| *section == change.section) {
            Some((_, group)) => group.push(change),
            None => groups.push((change.section, vec![change])),
        }
    }

    groups
}

fn assignment(change: &PropertyChange) -> String {
    format!("{}={}", change.name, change.value.as_deref().unwrap_or(""))
}

/// Build the change batch that makes `target_ordinal` the only track of
/// its type carrying the default flag.
///
/// Every other same-type track that currently has the flag set is cleared
/// first, then the target is set, so the batch applies in a safe order.
pub fn default_flag_batch(
    tracks: &[TrackInfo],
    target_ordinal: u32,
    track_type: TrackType,
) -> Vec<PropertyChange> {
    let mut changes = Vec::new();

    for (index, track) in tracks.iter().enumerate() {
        let ordinal = (index + 1) as u32;
        if ordinal == target_ordinal || track.track_type != track_type {
            continue;
        }
        if track.is_default {
            changes.push(PropertyChange::set(
                FLAG_DEFAULT,
                PropertySection::Track(ordinal),
                "0",
            ));
        }
    }

    changes.push(PropertyChange::set(
        FLAG_DEFAULT,
        PropertySection::Track(target_ordinal),
        "1",
    ));

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrackType;

    fn audio_track(is_default: bool) -> TrackInfo {
        TrackInfo {
            id: 0,
            track_type: TrackType::Audio,
            name: None,
            language: None,
            language_ietf: None,
            is_default,
            is_enabled: true,
            is_forced: false,
        }
    }

    #[test]
    fn set_on_a_track_emits_edit_then_set() {
        let changes = vec![PropertyChange::set(
            "flag-default",
            PropertySection::Track(2),
            "1",
        )];
        let tokens = plan(Path::new("/videos/movie.mkv"), &changes);

        assert_eq!(
            tokens,
            vec![
                "/videos/movie.mkv".to_string(),
                "--edit".to_string(),
                "track:2".to_string(),
                "--set".to_string(),
                "flag-default=1".to_string(),
            ]
        );
    }

    #[test]
    fn info_section_needs_no_edit_selector() {
        let changes = vec![PropertyChange::set("title", PropertySection::Info, "My Movie")];
        let tokens = plan(Path::new("movie.mkv"), &changes);

        assert_eq!(
            tokens,
            vec![
                "movie.mkv".to_string(),
                "--set".to_string(),
                "title=My Movie".to_string(),
            ]
        );
    }

    #[test]
    fn delete_and_add_map_to_their_directives() {
        let changes = vec![
            PropertyChange::delete("title", PropertySection::Info),
            PropertyChange::add("comment", PropertySection::Info, "restored"),
        ];
        let tokens = plan(Path::new("movie.mkv"), &changes);

        assert_eq!(
            tokens,
            vec![
                "movie.mkv".to_string(),
                "--delete".to_string(),
                "title".to_string(),
                "--add".to_string(),
                "comment=restored".to_string(),
            ]
        );
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let changes = vec![
            PropertyChange::set("flag-default", PropertySection::Track(1), "0"),
            PropertyChange::set("title", PropertySection::Info, "T"),
            PropertyChange::set("flag-enabled", PropertySection::Track(1), "1"),
        ];
        let tokens = plan(Path::new("m.mkv"), &changes);

        assert_eq!(
            tokens,
            vec![
                "m.mkv".to_string(),
                "--edit".to_string(),
                "track:1".to_string(),
                "--set".to_string(),
                "flag-default=0".to_string(),
                "--set".to_string(),
                "flag-enabled=1".to_string(),
                "--set".to_string(),
                "title=T".to_string(),
            ]
        );
    }

    #[test]
    fn empty_batch_plans_to_just_the_path() {
        let tokens = plan(Path::new("m.mkv"), &[]);
        assert_eq!(tokens, vec!["m.mkv".to_string()]);
    }

    #[test]
    fn default_flag_batch_clears_other_tracks_first() {
        let tracks = vec![audio_track(true), audio_track(false), audio_track(true)];
        let changes = default_flag_batch(&tracks, 2, TrackType::Audio);

        assert_eq!(
            changes,
            vec![
                PropertyChange::set("flag-default", PropertySection::Track(1), "0"),
                PropertyChange::set("flag-default", PropertySection::Track(3), "0"),
                PropertyChange::set("flag-default", PropertySection::Track(2), "1"),
            ]
        );
    }

    #[test]
    fn default_flag_batch_ignores_other_track_types() {
        let mut video = audio_track(true);
        video.track_type = TrackType::Video;
        let tracks = vec![video, audio_track(true)];

        let changes = default_flag_batch(&tracks, 2, TrackType::Audio);

        // Only the target is touched; the video default stays.
        assert_eq!(
            changes,
            vec![PropertyChange::set(
                "flag-default",
                PropertySection::Track(2),
                "1"
            )]
        );
    }
}
