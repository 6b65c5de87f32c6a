//! Lookup of dependency-like declarations by coordinates.

use pomsense_primitives::ByteRange;

use crate::{MarkupTree, NodeRef};

/// Group assumed for `<plugin>` elements without a `<groupId>`.
pub const DEFAULT_PLUGIN_GROUP: &str = "org.apache.maven.plugins";

/// Which element declared the coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
	Dependency,
	Plugin,
	/// `<exclusion>` inside `<exclusions>`.
	Exclusion,
}

impl DeclarationKind {
	fn of(node: NodeRef<'_>) -> Option<Self> {
		match node.name()? {
			"dependency" => Some(Self::Dependency),
			"plugin" => Some(Self::Plugin),
			"exclusion" if node.parent().and_then(|p| p.name()) == Some("exclusions") => {
				Some(Self::Exclusion)
			}
			_ => None,
		}
	}
}

/// A `<dependency>`, `<plugin>` or `<exclusion>` element.
#[derive(Debug, Clone, Copy)]
pub struct DependencyElement<'t> {
	kind: DeclarationKind,
	element: NodeRef<'t>,
}

impl<'t> DependencyElement<'t> {
	/// Wraps `node` if it is a dependency-like element.
	pub fn new(node: NodeRef<'t>) -> Option<Self> {
		DeclarationKind::of(node).map(|kind| Self {
			kind,
			element: node,
		})
	}

	pub fn kind(&self) -> DeclarationKind {
		self.kind
	}

	pub fn element(&self) -> NodeRef<'t> {
		self.element
	}

	/// Declared group, defaulted for plugins.
	pub fn group_id(&self) -> Option<&'t str> {
		match self.element.child_text("groupId") {
			Some(group) => Some(group),
			None if self.kind == DeclarationKind::Plugin => Some(DEFAULT_PLUGIN_GROUP),
			None => None,
		}
	}

	pub fn artifact_id(&self) -> Option<&'t str> {
		self.element.child_text("artifactId")
	}

	/// Declared version text, if any.
	pub fn version(&self) -> Option<&'t str> {
		self.element.child_text("version")
	}

	/// The `<version>` child element.
	pub fn version_element(&self) -> Option<NodeRef<'t>> {
		self.element.child("version")
	}

	/// Returns true if this declaration names `group_id:artifact_id`.
	pub fn matches(&self, group_id: &str, artifact_id: &str) -> bool {
		self.group_id() == Some(group_id) && self.artifact_id() == Some(artifact_id)
	}

	/// Owned ranges of this declaration.
	pub fn location(&self) -> DependencyLocation {
		let text_range = |tag: &str| self.element.child(tag).map(|node| node.text_range());
		DependencyLocation {
			kind: self.kind,
			element: self.element.range(),
			group_id: text_range("groupId"),
			artifact_id: text_range("artifactId"),
			version: text_range("version"),
		}
	}
}

/// Byte ranges of a declaration, detached from its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyLocation {
	pub kind: DeclarationKind,
	/// Outer range of the declaring element.
	pub element: ByteRange,
	/// Text range of `<groupId>`, if declared.
	pub group_id: Option<ByteRange>,
	/// Text range of `<artifactId>`, if declared.
	pub artifact_id: Option<ByteRange>,
	/// Text range of `<version>`, if declared.
	pub version: Option<ByteRange>,
}

impl MarkupTree {
	/// Every dependency-like declaration in document order.
	pub fn declarations(&self) -> impl Iterator<Item = DependencyElement<'_>> + '_ {
		self.nodes().filter_map(DependencyElement::new)
	}

	/// First declaration whose `groupId` and `artifactId` match.
	pub fn find_dependency_element(
		&self,
		group_id: &str,
		artifact_id: &str,
	) -> Option<DependencyElement<'_>> {
		self.declarations()
			.find(|found| found.matches(group_id, artifact_id))
	}
}
