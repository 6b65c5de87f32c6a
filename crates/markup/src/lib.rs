//! Markup position resolution for project descriptors.
//!
//! [`MarkupTree`] keeps the byte range of every element and text node so a
//! semantic reference such as `groupId:artifactId` can be mapped back to the
//! exact span of text that declares it. Ranges are UTF-8 byte offsets; use
//! [`pomsense_primitives::TextDocument`] to convert them to editor positions.

mod dependency;
mod error;
mod tree;

pub use dependency::{DeclarationKind, DependencyElement, DependencyLocation, DEFAULT_PLUGIN_GROUP};
pub use error::{MarkupError, Result};
use pomsense_primitives::ByteRange;
pub use tree::{MarkupTree, NodeId, NodeRef};

/// Descriptor tags that carry meaning for navigation and diagnostics.
pub const RECOGNIZED_TAGS: &[&str] = &[
	"project",
	"parent",
	"modules",
	"module",
	"dependencyManagement",
	"dependencies",
	"dependency",
	"exclusions",
	"exclusion",
	"build",
	"plugins",
	"plugin",
	"groupId",
	"artifactId",
	"version",
	"scope",
	"type",
	"classifier",
	"relativePath",
	"properties",
	"packaging",
	"name",
];

/// Returns true if `tag` is one of [`RECOGNIZED_TAGS`].
pub fn is_recognized_tag(tag: &str) -> bool {
	RECOGNIZED_TAGS.contains(&tag)
}

/// Owned summary of the node found by [`locate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
	/// Range of the located node.
	pub range: ByteRange,
	/// True when the offset fell inside element text.
	pub is_text: bool,
	/// Element names from the root down to the located node.
	pub tag_path: Vec<String>,
	/// Nearest recognized ancestor-or-self tag.
	pub enclosing_tag: Option<String>,
}

/// Innermost node at `offset` in `text`.
///
/// Returns `None` for unparseable markup, whitespace-only text and offsets
/// outside the root element.
pub fn locate(text: &str, offset: usize) -> Option<Location> {
	let tree = MarkupTree::parse(text).ok()?;
	let node = tree.locate(offset)?;
	Some(Location {
		range: node.range(),
		is_text: node.is_text(),
		tag_path: node.tag_path().into_iter().map(str::to_string).collect(),
		enclosing_tag: node
			.enclosing_tag()
			.and_then(|tag| tag.name())
			.map(str::to_string),
	})
}

/// Finds the first dependency-like element declaring `group_id:artifact_id`.
///
/// Returns `None` for unparseable markup.
pub fn find_dependency_element(
	text: &str,
	group_id: &str,
	artifact_id: &str,
) -> Option<DependencyLocation> {
	let tree = MarkupTree::parse(text).ok()?;
	tree.find_dependency_element(group_id, artifact_id)
		.map(|found| found.location())
}
