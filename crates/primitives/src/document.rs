//! Immutable text snapshots.
//!
//! All markup analysis works on UTF-8 byte offsets into a [`TextDocument`].
//! Editors address text by line and UTF-16 code unit column, so every
//! conversion between the two goes through [`TextDocument::offset_at`] and
//! [`TextDocument::position_at`]. Callers must never mix the two spaces.

use std::path::{Path, PathBuf};

use lsp_types::{Position, Range};
use ropey::Rope;

use crate::ByteRange;

/// A snapshot of a descriptor's text as seen by the editor.
///
/// Snapshots are never mutated; an edit produces a new snapshot and
/// invalidates every byte range computed against the old one.
#[derive(Debug, Clone)]
pub struct TextDocument {
	path: PathBuf,
	text: String,
	rope: Rope,
}

impl TextDocument {
	/// Creates a snapshot for the descriptor at `path`.
	pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
		let text = text.into();
		let rope = Rope::from_str(&text);
		Self {
			path: path.into(),
			text,
			rope,
		}
	}

	/// Reads a snapshot from disk.
	pub fn read(path: impl Into<PathBuf>) -> std::io::Result<Self> {
		let path = path.into();
		let text = std::fs::read_to_string(&path)?;
		Ok(Self::new(path, text))
	}

	/// Descriptor path this snapshot belongs to.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Full text of the snapshot.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Length in bytes.
	pub fn len(&self) -> usize {
		self.text.len()
	}

	/// Returns true if the snapshot holds no text.
	pub fn is_empty(&self) -> bool {
		self.text.is_empty()
	}

	/// Converts an editor position (line, UTF-16 column) to a byte offset.
	///
	/// Columns past the end of a line clamp to the line end (before the line
	/// break); lines past the end of the document clamp to the document end.
	pub fn offset_at(&self, position: Position) -> usize {
		let line = position.line as usize;
		if line >= self.rope.len_lines() {
			return self.text.len();
		}

		let line_start = self.rope.line_to_char(line);
		let line_end = line_start + line_content_chars(self.rope.line(line));
		let start_cu = self.rope.char_to_utf16_cu(line_start);
		let end_cu = self.rope.char_to_utf16_cu(line_end);
		let target_cu = (start_cu + position.character as usize).min(end_cu);

		self.rope.char_to_byte(self.rope.utf16_cu_to_char(target_cu))
	}

	/// Converts a byte offset to an editor position (line, UTF-16 column).
	///
	/// Offsets past the end clamp to the document end.
	pub fn position_at(&self, offset: usize) -> Position {
		let offset = offset.min(self.text.len());
		let char_idx = self.rope.byte_to_char(offset);
		let line = self.rope.char_to_line(char_idx);
		let line_start_cu = self.rope.char_to_utf16_cu(self.rope.line_to_char(line));
		let column = self.rope.char_to_utf16_cu(char_idx) - line_start_cu;
		Position::new(line as u32, column as u32)
	}

	/// Converts a byte range to an editor range.
	pub fn range_of(&self, range: ByteRange) -> Range {
		Range::new(self.position_at(range.start), self.position_at(range.end))
	}

	/// Converts an editor range to a byte range.
	pub fn byte_range_of(&self, range: Range) -> ByteRange {
		ByteRange::new(self.offset_at(range.start), self.offset_at(range.end))
	}

	/// Leading whitespace of the line containing `offset`.
	pub fn line_indent(&self, offset: usize) -> &str {
		let offset = offset.min(self.text.len());
		let line_start = self.text[..offset].rfind('\n').map_or(0, |idx| idx + 1);
		let rest = &self.text[line_start..];
		let width = rest.len() - rest.trim_start_matches([' ', '\t']).len();
		&rest[..width]
	}

	/// Line terminator used by this snapshot.
	pub fn eol(&self) -> &'static str {
		if self.text.contains("\r\n") { "\r\n" } else { "\n" }
	}
}

/// Number of chars in a rope line excluding its trailing line break.
fn line_content_chars(line: ropey::RopeSlice<'_>) -> usize {
	let mut len = line.len_chars();
	while len > 0 {
		match line.char(len - 1) {
			'\n' | '\r' => len -= 1,
			_ => break,
		}
	}
	len
}
