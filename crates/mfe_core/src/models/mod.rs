//! Data model shared across the core.

mod enums;
mod media;
mod properties;
mod results;

pub use enums::{ChangeType, PropertyType, TrackType};
pub use media::{FileInfo, PropertyValue, TrackInfo};
pub use properties::{
    ParseSectionError, PropertyChange, PropertyDefinition, PropertySection, SectionAffinity,
};
pub use results::EditResult;
