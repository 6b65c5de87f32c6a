//! Core types shared by every pomsense crate: text snapshots, byte ranges,
//! text edits, and artifact coordinates.

/// Artifact coordinates (`groupId:artifactId[:version]`).
pub mod coordinate;
/// Immutable text snapshots with editor position conversion.
pub mod document;
/// Text edits and all-or-nothing edit sets.
pub mod edit;
/// Byte ranges into a text snapshot.
pub mod range;

pub use coordinate::{ArtifactKey, Coordinate, CoordinateError};
pub use document::TextDocument;
pub use edit::{EditError, EditSet, TextEdit};
pub use range::ByteRange;
