//! Error types for tree report parsing.

use thiserror::Error;

/// A line of a tree report that could not be understood.
///
/// Line numbers are 1-based. A failed parse never yields a partial forest.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeParseError {
	/// The connector prefix width is not a multiple of three.
	#[error("line {line}: connector prefix of width {width} is not a multiple of 3")]
	Indentation {
		/// Offending line.
		line: usize,
		/// Prefix width in bytes.
		width: usize,
	},

	/// A node is nested more than one level below the previous node.
	#[error("line {line}: depth {depth} has no parent at depth {}", depth - 1)]
	Orphan {
		/// Offending line.
		line: usize,
		/// Depth of the node.
		depth: usize,
	},

	/// The coordinate tokens could not be read.
	#[error("line {line}: cannot read coordinate `{text}`")]
	Coordinate {
		/// Offending line.
		line: usize,
		/// The unreadable text.
		text: String,
	},

	/// A project header appears anywhere but on the first line.
	#[error("line {line}: project header must be the first line")]
	MisplacedHeader {
		/// Offending line.
		line: usize,
	},

	/// A conflict omission names no winning version.
	#[error("line {line}: conflict without an effective version")]
	MissingEffectiveVersion {
		/// Offending line.
		line: usize,
	},
}

/// Result type for tree report parsing.
pub type Result<T, E = TreeParseError> = std::result::Result<T, E>;
