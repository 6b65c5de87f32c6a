/// A half-open byte range `[start, end)` into a UTF-8 text snapshot.
///
/// Byte offsets are only meaningful against the exact snapshot they were
/// computed from. Use [`crate::TextDocument`] to convert them into editor
/// positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ByteRange {
	/// Start offset (inclusive).
	pub start: usize,
	/// End offset (exclusive).
	pub end: usize,
}

impl ByteRange {
	/// Creates a new range. `end` is clamped so that it never precedes `start`.
	pub const fn new(start: usize, end: usize) -> Self {
		if end < start {
			Self { start, end: start }
		} else {
			Self { start, end }
		}
	}

	/// Creates a zero-length range at `offset`.
	pub const fn point(offset: usize) -> Self {
		Self {
			start: offset,
			end: offset,
		}
	}

	/// Returns the number of bytes covered.
	#[inline]
	pub const fn len(&self) -> usize {
		self.end - self.start
	}

	/// Returns true for zero-length ranges.
	#[inline]
	pub const fn is_empty(&self) -> bool {
		self.start == self.end
	}

	/// Returns true if `offset` lies inside the half-open range.
	#[inline]
	pub const fn contains(&self, offset: usize) -> bool {
		self.start <= offset && offset < self.end
	}

	/// Returns true if `offset` lies inside the range or exactly on its end.
	#[inline]
	pub const fn touches(&self, offset: usize) -> bool {
		self.start <= offset && offset <= self.end
	}

	/// Returns true if `other` is entirely inside this range.
	#[inline]
	pub const fn encloses(&self, other: &ByteRange) -> bool {
		self.start <= other.start && other.end <= self.end
	}

	/// Returns the slice of `text` covered by this range, if in bounds.
	pub fn slice<'t>(&self, text: &'t str) -> Option<&'t str> {
		text.get(self.start..self.end)
	}
}

impl From<std::ops::Range<usize>> for ByteRange {
	fn from(range: std::ops::Range<usize>) -> Self {
		Self::new(range.start, range.end)
	}
}
