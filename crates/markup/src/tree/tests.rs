use pretty_assertions::assert_eq;

use super::*;

const POM: &str = "<project>\n  <modules>\n    <module>core</module>\n  </modules>\n  <version/>\n  <name></name>\n</project>\n";

#[test]
fn element_ranges_cover_tags() {
	let tree = MarkupTree::parse(POM).unwrap();
	let root = tree.root();

	assert_eq!(root.name(), Some("project"));
	assert_eq!(root.range().slice(POM).map(|s| s.ends_with("</project>")), Some(true));

	let module = tree.elements_by_tag("module").next().unwrap();
	assert_eq!(module.range().slice(POM), Some("<module>core</module>"));
	assert_eq!(module.inner_range().slice(POM), Some("core"));
	assert_eq!(module.text(), Some("core"));
	assert_eq!(module.tag_path(), vec!["project", "modules", "module"]);
}

#[test]
fn empty_elements_have_zero_length_text_range() {
	let tree = MarkupTree::parse(POM).unwrap();

	let version = tree.root().child("version").unwrap();
	assert!(version.is_self_closing());
	assert_eq!(version.text(), None);
	assert!(version.text_range().is_empty());
	assert_eq!(version.text_range().start, POM.find("/>").unwrap());

	let name = tree.root().child("name").unwrap();
	assert!(!name.is_self_closing());
	assert_eq!(name.text(), None);
	assert_eq!(name.text_range(), ByteRange::point(POM.find("</name>").unwrap()));
}

#[test]
fn locate_finds_innermost_node() {
	let tree = MarkupTree::parse(POM).unwrap();

	let in_text = POM.find("core").unwrap() + 2;
	let node = tree.locate(in_text).unwrap();
	assert!(node.is_text());
	assert_eq!(node.text(), Some("core"));
	assert_eq!(node.enclosing_tag().and_then(|n| n.name()), Some("module"));

	let end_of_text = POM.find("core").unwrap() + 4;
	assert!(tree.locate(end_of_text).unwrap().is_text());

	let in_tag = POM.find("<module>").unwrap() + 1;
	assert_eq!(tree.locate(in_tag).unwrap().name(), Some("module"));

	let tag_start = POM.find("<modules>").unwrap();
	assert_eq!(tree.locate(tag_start).unwrap().name(), Some("modules"));
}

#[test]
fn locate_ignores_whitespace_and_outside_root() {
	let tree = MarkupTree::parse(POM).unwrap();

	let between = POM.find("\n  <modules>").unwrap() + 1;
	assert!(tree.locate(between).is_none());
	assert!(tree.locate(POM.len() - 1).is_none());
	assert!(tree.locate(POM.len() + 10).is_none());
}

#[test]
fn declaration_and_comments_are_skipped() {
	let text = "<?xml version=\"1.0\"?>\n<!-- header -->\n<project><!-- x --><name>n</name></project>";
	let tree = MarkupTree::parse(text).unwrap();

	assert_eq!(tree.root().name(), Some("project"));
	assert_eq!(tree.root().elements().count(), 1);
	assert_eq!(tree.root().child_text("name"), Some("n"));
}

#[test]
fn cdata_content_excludes_delimiters() {
	let text = "<project><name><![CDATA[ a<b ]]></name></project>";
	let tree = MarkupTree::parse(text).unwrap();

	assert_eq!(tree.root().child_text("name"), Some("a<b"));
}

#[test]
fn multibyte_text_keeps_byte_offsets() {
	let text = "<project><name>caf\u{e9} \u{1F600}</name></project>";
	let tree = MarkupTree::parse(text).unwrap();
	let name = tree.root().child("name").unwrap();

	assert_eq!(name.text_range().slice(text), Some("caf\u{e9} \u{1F600}"));
}

#[test]
fn mismatched_end_tag_is_an_error() {
	let err = MarkupTree::parse("<project><a></b></project>").unwrap_err();
	assert_eq!(
		err,
		MarkupError::MismatchedEnd {
			position: 12,
			expected: "a".into(),
			found: "b".into(),
		}
	);
}

#[test]
fn unclosed_and_empty_inputs_are_errors() {
	assert!(MarkupTree::parse("<project><a>").is_err());
	assert_eq!(MarkupTree::parse("  ").unwrap_err(), MarkupError::Empty);
	assert!(matches!(
		MarkupTree::parse("<a/><b/>").unwrap_err(),
		MarkupError::MultipleRoots { position: 4, .. }
	));
}
