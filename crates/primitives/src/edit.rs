//! Text edits and edit sets.
//!
//! An [`EditSet`] groups every edit needed for one logical change to one
//! descriptor. All ranges are computed against the same snapshot, so the set
//! is either applied completely or not at all.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{ByteRange, TextDocument};

/// A single replacement of a byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
	/// Range replaced (pre-edit offsets).
	pub range: ByteRange,
	/// Replacement text.
	pub new_text: String,
}

impl TextEdit {
	/// Inserts `text` at `offset`.
	pub fn insert(offset: usize, text: impl Into<String>) -> Self {
		Self {
			range: ByteRange::point(offset),
			new_text: text.into(),
		}
	}

	/// Deletes `range`.
	pub fn delete(range: ByteRange) -> Self {
		Self {
			range,
			new_text: String::new(),
		}
	}

	/// Replaces `range` with `text`.
	pub fn replace(range: ByteRange, text: impl Into<String>) -> Self {
		Self {
			range,
			new_text: text.into(),
		}
	}

	/// Converts to an editor edit against `document`.
	pub fn to_lsp(&self, document: &TextDocument) -> lsp_types::TextEdit {
		lsp_types::TextEdit::new(document.range_of(self.range), self.new_text.clone())
	}
}

/// Errors raised while applying an [`EditSet`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
	/// Two edits in the same set overlap.
	#[error("edits overlap at byte {0}")]
	Overlap(usize),
	/// An edit reaches past the end of the text or splits a character.
	#[error("edit range {start}..{end} is out of bounds")]
	OutOfBounds {
		/// Start of the offending range.
		start: usize,
		/// End of the offending range.
		end: usize,
	},
}

/// All edits for one logical change to a single descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSet {
	path: PathBuf,
	edits: Vec<TextEdit>,
}

impl EditSet {
	/// Creates an empty edit set targeting `path`.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			edits: Vec::new(),
		}
	}

	/// Descriptor the edits apply to.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Adds an edit.
	pub fn push(&mut self, edit: TextEdit) {
		self.edits.push(edit);
	}

	/// Returns the edits ordered by position.
	///
	/// Edits starting at the same offset keep their insertion order, and a
	/// zero-length insert sorts before a deletion starting at the same offset.
	pub fn edits(&self) -> Vec<&TextEdit> {
		let mut ordered: Vec<&TextEdit> = self.edits.iter().collect();
		ordered.sort_by_key(|edit| (edit.range.start, edit.range.end));
		ordered
	}

	/// Number of edits.
	pub fn len(&self) -> usize {
		self.edits.len()
	}

	/// Returns true if the set holds no edits.
	pub fn is_empty(&self) -> bool {
		self.edits.is_empty()
	}

	/// Applies every edit to `text` in one pass.
	///
	/// Fails without producing output if any two edits overlap or a range is
	/// out of bounds.
	pub fn apply_to(&self, text: &str) -> Result<String, EditError> {
		let mut out = String::with_capacity(text.len());
		let mut cursor = 0;

		for edit in self.edits() {
			let ByteRange { start, end } = edit.range;
			if end > text.len() || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
				return Err(EditError::OutOfBounds { start, end });
			}
			if start < cursor {
				return Err(EditError::Overlap(start));
			}
			out.push_str(&text[cursor..start]);
			out.push_str(&edit.new_text);
			cursor = end;
		}

		out.push_str(&text[cursor..]);
		Ok(out)
	}

	/// Converts to editor edits against `document`, ordered by position.
	pub fn to_lsp(&self, document: &TextDocument) -> Vec<lsp_types::TextEdit> {
		self.edits()
			.into_iter()
			.map(|edit| edit.to_lsp(document))
			.collect()
	}
}

#[cfg(test)]
mod tests;
