use pretty_assertions::assert_eq;

use super::*;

#[test]
fn applies_in_position_order_regardless_of_push_order() {
	let mut set = EditSet::new("pom.xml");
	set.push(TextEdit::insert(11, "!"));
	set.push(TextEdit::delete(ByteRange::new(0, 6)));

	assert_eq!(set.apply_to("hello world").unwrap(), "world!");
}

#[test]
fn insert_before_delete_at_same_offset() {
	let text = "<a>\n  <b/>\n</a>";
	let mut set = EditSet::new("pom.xml");
	set.push(TextEdit::delete(ByteRange::new(3, 10)));
	set.push(TextEdit::insert(3, "\n  <c/>"));

	assert_eq!(set.apply_to(text).unwrap(), "<a>\n  <c/>\n</a>");
}

#[test]
fn overlapping_edits_are_rejected() {
	let mut set = EditSet::new("pom.xml");
	set.push(TextEdit::delete(ByteRange::new(0, 5)));
	set.push(TextEdit::replace(ByteRange::new(3, 7), "x"));

	assert_eq!(set.apply_to("0123456789"), Err(EditError::Overlap(3)));
}

#[test]
fn out_of_bounds_is_rejected() {
	let mut set = EditSet::new("pom.xml");
	set.push(TextEdit::insert(42, "x"));

	assert_eq!(
		set.apply_to("short"),
		Err(EditError::OutOfBounds { start: 42, end: 42 })
	);
}

#[test]
fn lsp_edits_use_document_positions() {
	let doc = TextDocument::new("pom.xml", "<a>\n<b/>\n</a>");
	let mut set = EditSet::new("pom.xml");
	set.push(TextEdit::delete(ByteRange::new(4, 8)));

	let edits = set.to_lsp(&doc);
	assert_eq!(edits.len(), 1);
	assert_eq!(edits[0].range.start, lsp_types::Position::new(1, 0));
	assert_eq!(edits[0].range.end, lsp_types::Position::new(1, 4));
	assert_eq!(edits[0].new_text, "");
}
