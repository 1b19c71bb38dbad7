//! Parser for the property listing text protocol.
//!
//! One property per line in the form `name (type): description`. Blank
//! lines and `#` comments are skipped, as is anything else that does not
//! match the pattern.

use crate::models::{PropertyDefinition, PropertyType};

pub fn parse_listing(listing: &str) -> Vec<PropertyDefinition> {
    listing.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<PropertyDefinition> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (name, rest) = line.split_once(" (")?;
    let (label, description) = rest.split_once("):")?;

    let name = name.trim();
    if name.is_empty() || name.contains(' ') {
        return None;
    }

    Some(PropertyDefinition::new(
        name,
        PropertyType::from_label(label),
        description.trim(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SectionAffinity;

    #[test]
    fn matching_line_produces_one_definition() {
        let defs = parse_listing("flag-default (boolean): Set if the track is the default.\n");

        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "flag-default");
        assert_eq!(defs[0].display_name, "Flag Default");
        assert_eq!(defs[0].property_type, PropertyType::Boolean);
        assert_eq!(defs[0].section, SectionAffinity::Track);
        assert_eq!(defs[0].description, "Set if the track is the default.");
    }

    #[test]
    fn unmapped_type_label_parses_as_unknown() {
        let defs = parse_listing("date (date_time): Creation date.");

        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].property_type, PropertyType::Unknown);
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        let listing = "\n# All known property names\n\n   \ntitle (string): The title.\n";
        let defs = parse_listing(listing);

        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "title");
    }

    #[test]
    fn non_matching_lines_are_skipped() {
        let listing = "Elements in the category 'Segment information':\nno parens here\n";
        assert!(parse_listing(listing).is_empty());
    }

    #[test]
    fn type_label_match_is_case_insensitive() {
        let defs = parse_listing("muxing-application (STRING): Muxer name.");
        assert_eq!(defs[0].property_type, PropertyType::String);
    }

    #[test]
    fn multi_line_listing_keeps_order() {
        let listing = concat!(
            "title (string): The title for the whole movie.\n",
            "flag-enabled (boolean): Set if the track is used.\n",
            "flag-forced (boolean): Forced display flag.\n",
        );
        let defs = parse_listing(listing);
        let names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();

        assert_eq!(names, vec!["title", "flag-enabled", "flag-forced"]);
    }
}
