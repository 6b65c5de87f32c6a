//! Error types for descriptor markup parsing.

use thiserror::Error;

/// Errors raised while building a [`crate::MarkupTree`].
///
/// Every variant carries the byte offset where the problem was detected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkupError {
	/// The tokenizer rejected the input.
	#[error("malformed markup at byte {position}: {message}")]
	Syntax {
		/// Byte offset reported by the tokenizer.
		position: usize,
		/// Tokenizer message.
		message: String,
	},

	/// A closing tag does not match the innermost open element.
	#[error("mismatched closing tag at byte {position}: expected </{expected}>, found </{found}>")]
	MismatchedEnd {
		/// Start of the closing tag.
		position: usize,
		/// Name of the innermost open element.
		expected: String,
		/// Name found in the closing tag.
		found: String,
	},

	/// A closing tag appears with no element open.
	#[error("unexpected closing tag </{name}> at byte {position}")]
	UnmatchedEnd {
		/// Start of the closing tag.
		position: usize,
		/// Name found in the closing tag.
		name: String,
	},

	/// The input ended while an element was still open.
	#[error("element <{name}> opened at byte {position} is never closed")]
	Unclosed {
		/// Start of the unclosed element.
		position: usize,
		/// Element name.
		name: String,
	},

	/// A second top-level element follows the root.
	#[error("second root element <{name}> at byte {position}")]
	MultipleRoots {
		/// Start of the extra element.
		position: usize,
		/// Element name.
		name: String,
	},

	/// The input holds no element at all.
	#[error("no root element")]
	Empty,
}

/// Result type for markup operations.
pub type Result<T, E = MarkupError> = std::result::Result<T, E>;
