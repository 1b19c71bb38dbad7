//! Container inspection.
//!
//! Validates candidate files and reads their current track and property
//! state through the external identify capability (`mkvmerge -J`).
//! Validation failures are reported through an invalid [`FileInfo`],
//! never raised.

mod probe;

pub use probe::{check_file, read_properties, validate, ValidationFailure};
