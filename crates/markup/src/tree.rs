//! Arena tree of elements and text nodes with byte ranges.

use pomsense_primitives::ByteRange;
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::trace;

use crate::error::{MarkupError, Result};
use crate::is_recognized_tag;

/// Index of a node inside a [`MarkupTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
	fn index(self) -> usize {
		self.0 as usize
	}
}

#[derive(Debug, Clone)]
enum NodeKind {
	Element { name: String, self_closing: bool },
	/// `content` excludes CDATA delimiters.
	Text { content: ByteRange },
}

#[derive(Debug, Clone)]
struct Node {
	kind: NodeKind,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
	range: ByteRange,
	inner: ByteRange,
}

/// Parsed element tree over one descriptor snapshot.
///
/// Nodes are stored in document order. Every range is a UTF-8 byte range
/// into the snapshot given to [`MarkupTree::parse`] and is meaningless
/// against any other text.
#[derive(Debug, Clone)]
pub struct MarkupTree {
	source: String,
	nodes: Vec<Node>,
	root: NodeId,
}

impl MarkupTree {
	/// Parses `text` into a tree.
	///
	/// Comments, processing instructions and declarations are skipped. Text
	/// outside the root element is ignored.
	pub fn parse(text: &str) -> Result<Self> {
		let mut reader = Reader::from_str(text);
		reader.config_mut().check_end_names = false;

		let mut nodes: Vec<Node> = Vec::new();
		let mut stack: Vec<NodeId> = Vec::new();
		let mut root = None;

		loop {
			let start = reader.buffer_position() as usize;
			let event = match reader.read_event() {
				Ok(event) => event,
				Err(error) => {
					return Err(MarkupError::Syntax {
						position: reader.buffer_position() as usize,
						message: error.to_string(),
					});
				}
			};
			let end = reader.buffer_position() as usize;

			match event {
				Event::Start(ref tag) | Event::Empty(ref tag) => {
					let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
					let self_closing = matches!(event, Event::Empty(_));
					let parent = stack.last().copied();
					if parent.is_none() && root.is_some() {
						return Err(MarkupError::MultipleRoots {
							position: start,
							name,
						});
					}

					let id = NodeId(nodes.len() as u32);
					let inner = if self_closing {
						ByteRange::point(end - 2)
					} else {
						ByteRange::point(end)
					};
					nodes.push(Node {
						kind: NodeKind::Element { name, self_closing },
						parent,
						children: Vec::new(),
						range: ByteRange::new(start, end),
						inner,
					});
					match parent {
						Some(parent) => nodes[parent.index()].children.push(id),
						None => root = Some(id),
					}
					if !self_closing {
						stack.push(id);
					}
				}
				Event::End(tag) => {
					let found = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
					let Some(open) = stack.pop() else {
						return Err(MarkupError::UnmatchedEnd {
							position: start,
							name: found,
						});
					};
					let node = &mut nodes[open.index()];
					if let NodeKind::Element { name, .. } = &node.kind
						&& *name != found
					{
						return Err(MarkupError::MismatchedEnd {
							position: start,
							expected: name.clone(),
							found,
						});
					}
					node.range.end = end;
					node.inner.end = start;
				}
				Event::Text(_) | Event::CData(_) => {
					let Some(&parent) = stack.last() else {
						continue;
					};
					let range = ByteRange::new(start, end);
					let content = if let Event::CData(_) = event {
						ByteRange::new(start + "<![CDATA[".len(), end.saturating_sub("]]>".len()))
					} else {
						range
					};
					let id = NodeId(nodes.len() as u32);
					nodes.push(Node {
						kind: NodeKind::Text { content },
						parent: Some(parent),
						children: Vec::new(),
						range,
						inner: range,
					});
					nodes[parent.index()].children.push(id);
				}
				Event::Eof => break,
				_ => {}
			}
		}

		if let Some(open) = stack.first() {
			let node = &nodes[open.index()];
			let name = match &node.kind {
				NodeKind::Element { name, .. } => name.clone(),
				NodeKind::Text { .. } => String::new(),
			};
			return Err(MarkupError::Unclosed {
				position: node.range.start,
				name,
			});
		}

		let root = root.ok_or(MarkupError::Empty)?;
		trace!(nodes = nodes.len(), "parsed markup tree");
		Ok(Self {
			source: text.to_string(),
			nodes,
			root,
		})
	}

	/// Snapshot text the tree was built from.
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Root element.
	pub fn root(&self) -> NodeRef<'_> {
		self.node(self.root)
	}

	/// Node by id.
	///
	/// # Panics
	///
	/// Panics if `id` was produced by a different tree.
	pub fn node(&self, id: NodeId) -> NodeRef<'_> {
		assert!(id.index() < self.nodes.len(), "node id out of range");
		NodeRef { tree: self, id }
	}

	/// All nodes in document order.
	pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
		(0..self.nodes.len()).map(move |idx| NodeRef {
			tree: self,
			id: NodeId(idx as u32),
		})
	}

	/// Elements named `tag` in document order.
	pub fn elements_by_tag<'t>(&'t self, tag: &'t str) -> impl Iterator<Item = NodeRef<'t>> + 't {
		self.nodes().filter(move |node| node.name() == Some(tag))
	}

	/// Innermost node containing `offset`.
	///
	/// Element ranges are half-open and win over adjacent text; a text node
	/// also matches on its end offset so a cursor placed right after a value
	/// still resolves to it.
	/// Returns `None` for whitespace-only text and offsets outside the root.
	pub fn locate(&self, offset: usize) -> Option<NodeRef<'_>> {
		let mut current = self.root();
		if !current.range().contains(offset) {
			return None;
		}

		while let Some(child) = current
			.elements()
			.find(|child| child.range().contains(offset))
			.or_else(|| {
				current
					.children()
					.find(|child| child.is_text() && child.range().touches(offset))
			}) {
			current = child;
		}

		if current.is_text() && current.text().is_none() {
			return None;
		}
		Some(current)
	}
}

/// Borrowed handle to a node of a [`MarkupTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
	tree: &'t MarkupTree,
	id: NodeId,
}

impl std::fmt::Debug for NodeRef<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NodeRef")
			.field("id", &self.id)
			.field("name", &self.name())
			.field("range", &self.range())
			.finish()
	}
}

impl PartialEq for NodeRef<'_> {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.tree, other.tree) && self.id == other.id
	}
}

impl Eq for NodeRef<'_> {}

impl<'t> NodeRef<'t> {
	fn raw(&self) -> &'t Node {
		&self.tree.nodes[self.id.index()]
	}

	pub fn id(&self) -> NodeId {
		self.id
	}

	pub fn tree(&self) -> &'t MarkupTree {
		self.tree
	}

	/// Element name, `None` for text nodes.
	pub fn name(&self) -> Option<&'t str> {
		match &self.raw().kind {
			NodeKind::Element { name, .. } => Some(name.as_str()),
			NodeKind::Text { .. } => None,
		}
	}

	pub fn is_text(&self) -> bool {
		matches!(self.raw().kind, NodeKind::Text { .. })
	}

	pub fn is_self_closing(&self) -> bool {
		matches!(
			self.raw().kind,
			NodeKind::Element {
				self_closing: true,
				..
			}
		)
	}

	/// Outer range, from `<` of the opening tag to past `>` of the closing tag.
	pub fn range(&self) -> ByteRange {
		self.raw().range
	}

	/// Range between the opening tag's `>` and the closing tag's `<`.
	///
	/// Self-closing elements report a zero-length range at their `/`.
	pub fn inner_range(&self) -> ByteRange {
		self.raw().inner
	}

	pub fn parent(&self) -> Option<NodeRef<'t>> {
		let tree = self.tree;
		self.raw().parent.map(|id| NodeRef { tree, id })
	}

	/// All child nodes, text included.
	pub fn children(&self) -> impl Iterator<Item = NodeRef<'t>> + 't {
		let tree = self.tree;
		self.raw()
			.children
			.iter()
			.map(move |&id| NodeRef { tree, id })
	}

	/// Child elements only.
	pub fn elements(&self) -> impl Iterator<Item = NodeRef<'t>> + 't {
		self.children().filter(|node| !node.is_text())
	}

	/// First child element named `tag`.
	pub fn child(&self, tag: &str) -> Option<NodeRef<'t>> {
		self.elements().find(|node| node.name() == Some(tag))
	}

	/// Text of the child element named `tag`.
	pub fn child_text(&self, tag: &str) -> Option<&'t str> {
		self.child(tag).and_then(|node| node.text())
	}

	/// Trimmed text content.
	///
	/// For an element this is its first non-blank text child. Returns `None`
	/// when there is no such text.
	pub fn text(&self) -> Option<&'t str> {
		let range = self.text_range();
		let text = range.slice(&self.tree.source)?;
		(!text.is_empty()).then_some(text)
	}

	/// Range of the trimmed text content.
	///
	/// An element without text reports a zero-length range at its inner
	/// start.
	pub fn text_range(&self) -> ByteRange {
		match self.raw().kind {
			NodeKind::Text { content } => trimmed(&self.tree.source, content),
			NodeKind::Element { .. } => self
				.children()
				.filter(|node| node.is_text())
				.map(|node| node.text_range())
				.find(|range| !range.is_empty())
				.unwrap_or(ByteRange::point(self.inner_range().start)),
		}
	}

	/// Ancestors from the parent up to the root.
	pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'t>> + 't {
		std::iter::successors(self.parent(), |node| node.parent())
	}

	/// Element names from the root down to this node.
	///
	/// A text node's path ends at its parent element.
	pub fn tag_path(&self) -> Vec<&'t str> {
		let mut path: Vec<&'t str> = std::iter::once(*self)
			.chain(self.ancestors())
			.filter_map(|node| node.name())
			.collect();
		path.reverse();
		path
	}

	/// Nearest ancestor-or-self element with a recognized descriptor tag.
	pub fn enclosing_tag(&self) -> Option<NodeRef<'t>> {
		std::iter::once(*self)
			.chain(self.ancestors())
			.find(|node| node.name().is_some_and(is_recognized_tag))
	}
}

fn trimmed(source: &str, range: ByteRange) -> ByteRange {
	let Some(slice) = range.slice(source) else {
		return ByteRange::point(range.start);
	};
	let leading = slice.len() - slice.trim_start().len();
	let body = slice.trim();
	ByteRange::new(range.start + leading, range.start + leading + body.len())
}

#[cfg(test)]
mod tests;
