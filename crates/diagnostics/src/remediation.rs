//! Descriptor edits that remediate dependency conflicts.
//!
//! Every function computes one [`EditSet`] against a single snapshot. The
//! edits never overlap and keep the surrounding indentation, so applying
//! the set and re-parsing yields a well-formed descriptor.

use pomsense_config::EditSettings;
use pomsense_dependency_tree::{DependencyForest, DependencyId};
use pomsense_markup::{DependencyElement, MarkupTree, NodeRef};
use pomsense_primitives::{ByteRange, EditSet, TextDocument, TextEdit};
use tracing::debug;

use crate::error::{RemediationError, Result};

/// Formatting of inserted markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditStyle {
	/// One level of indentation.
	pub indent: String,
	/// Line terminator.
	pub eol: String,
}

impl Default for EditStyle {
	fn default() -> Self {
		Self {
			indent: "    ".to_string(),
			eol: "\n".to_string(),
		}
	}
}

impl From<&EditSettings> for EditStyle {
	fn from(settings: &EditSettings) -> Self {
		Self {
			indent: settings.indent.clone(),
			eol: settings.eol.clone(),
		}
	}
}

/// Pins `group_id:artifact_id` to `chosen_version` through
/// `<dependencyManagement>`.
///
/// The edit set removes the inline `<version>` of the direct dependency,
/// drops any managed entry for the same coordinates and inserts a new one,
/// creating the `<dependencyManagement>` and `<dependencies>` wrappers when
/// missing. Returns `Ok(None)` when the chosen version is already in effect.
pub fn resolve_conflict(
	document: &TextDocument,
	group_id: &str,
	artifact_id: &str,
	effective_version: &str,
	chosen_version: &str,
	style: &EditStyle,
) -> Result<Option<EditSet>> {
	if chosen_version == effective_version {
		return Ok(None);
	}

	let tree = MarkupTree::parse(document.text())?;
	let project = single_project(&tree)?;
	let mut edits = EditSet::new(document.path());

	if let Some(direct) = direct_dependency(project, group_id, artifact_id)
		&& let Some(version) = direct.version_element()
	{
		edits.push(delete_element(document, version));
	}

	let managed = Snippet::dependency(1, group_id, artifact_id, Some(chosen_version));
	match project.child("dependencyManagement") {
		Some(management) => match management.child("dependencies") {
			Some(dependencies) => {
				if let Some(existing) = matching_child(dependencies, "dependency", group_id, artifact_id) {
					edits.push(delete_element(document, existing));
				}
				edits.push(insert_first(document, dependencies, &managed, style));
			}
			None => {
				let wrapped = managed.wrap("dependencies");
				edits.push(insert_first(document, management, &wrapped, style));
			}
		},
		None => {
			let wrapped = managed.wrap("dependencies").wrap("dependencyManagement");
			edits.push(insert_last(document, project, &wrapped, style));
		}
	}

	debug!(
		path = %document.path().display(),
		dependency = %format_args!("{group_id}:{artifact_id}"),
		from = effective_version,
		to = chosen_version,
		edits = edits.len(),
		"computed conflict resolution"
	);
	Ok(Some(edits))
}

/// Excludes the transitive dependency `node` from the direct dependency that
/// introduced it.
///
/// Returns `Ok(None)` when the exclusion is already declared.
pub fn exclude_dependency(
	document: &TextDocument,
	forest: &DependencyForest,
	node: DependencyId,
	style: &EditStyle,
) -> Result<Option<EditSet>> {
	let excluded = forest.node(node);
	let root_id = forest.root(node);
	if root_id == node {
		return Err(RemediationError::DirectDependency {
			key: excluded.key(),
		});
	}
	let root = forest.node(root_id);

	let tree = MarkupTree::parse(document.text())?;
	let project = single_project(&tree)?;
	let Some(declaration) = direct_dependency(project, root.group_id(), root.artifact_id()) else {
		return Err(RemediationError::NotDeclared { key: root.key() });
	};
	let element = declaration.element();

	let exclusion = Snippet::new()
		.line(1, "<exclusion>")
		.line(2, format!("<groupId>{}</groupId>", excluded.group_id()))
		.line(2, format!("<artifactId>{}</artifactId>", excluded.artifact_id()))
		.line(1, "</exclusion>");

	let mut edits = EditSet::new(document.path());
	match element.child("exclusions") {
		Some(exclusions) => {
			if matching_child(exclusions, "exclusion", excluded.group_id(), excluded.artifact_id()).is_some() {
				return Ok(None);
			}
			edits.push(insert_first(document, exclusions, &exclusion, style));
		}
		None => {
			let wrapped = exclusion.wrap("exclusions");
			edits.push(insert_last(document, element, &wrapped, style));
		}
	}

	debug!(
		path = %document.path().display(),
		excluded = %excluded.key(),
		from = %root.key(),
		"computed exclusion"
	);
	Ok(Some(edits))
}

fn single_project(tree: &MarkupTree) -> Result<NodeRef<'_>> {
	let count = tree.elements_by_tag("project").count();
	let root = tree.root();
	if count != 1 || root.name() != Some("project") {
		return Err(RemediationError::ProjectCount { count });
	}
	Ok(root)
}

/// `<project><dependencies><dependency>` declaring the coordinates.
fn direct_dependency<'t>(
	project: NodeRef<'t>,
	group_id: &str,
	artifact_id: &str,
) -> Option<DependencyElement<'t>> {
	project
		.child("dependencies")?
		.elements()
		.filter_map(DependencyElement::new)
		.find(|found| found.matches(group_id, artifact_id))
}

fn matching_child<'t>(
	container: NodeRef<'t>,
	tag: &str,
	group_id: &str,
	artifact_id: &str,
) -> Option<NodeRef<'t>> {
	container
		.elements()
		.filter(|child| child.name() == Some(tag))
		.filter_map(DependencyElement::new)
		.find(|found| found.matches(group_id, artifact_id))
		.map(|found| found.element())
}

/// Markup lines, each with a nesting depth relative to its container.
#[derive(Debug, Clone, Default)]
struct Snippet {
	lines: Vec<(usize, String)>,
}

impl Snippet {
	fn new() -> Self {
		Self::default()
	}

	fn line(mut self, depth: usize, text: impl Into<String>) -> Self {
		self.lines.push((depth, text.into()));
		self
	}

	fn dependency(depth: usize, group_id: &str, artifact_id: &str, version: Option<&str>) -> Self {
		let mut snippet = Self::new()
			.line(depth, "<dependency>")
			.line(depth + 1, format!("<groupId>{group_id}</groupId>"))
			.line(depth + 1, format!("<artifactId>{artifact_id}</artifactId>"));
		if let Some(version) = version {
			snippet = snippet.line(depth + 1, format!("<version>{version}</version>"));
		}
		snippet.line(depth, "</dependency>")
	}

	/// Nests the lines one level deeper inside `<tag>`.
	fn wrap(self, tag: &str) -> Self {
		let mut lines = Vec::with_capacity(self.lines.len() + 2);
		lines.push((1, format!("<{tag}>")));
		lines.extend(self.lines.into_iter().map(|(depth, text)| (depth + 1, text)));
		lines.push((1, format!("</{tag}>")));
		Self { lines }
	}

	/// Each line on its own row below `base` indentation.
	fn render(&self, base: &str, style: &EditStyle) -> String {
		let mut out = String::new();
		for (depth, text) in &self.lines {
			out.push_str(&style.eol);
			out.push_str(base);
			out.push_str(&style.indent.repeat(*depth));
			out.push_str(text);
		}
		out
	}
}

/// Inserts `snippet` as the first content of `container`.
fn insert_first(
	document: &TextDocument,
	container: NodeRef<'_>,
	snippet: &Snippet,
	style: &EditStyle,
) -> TextEdit {
	if container.is_self_closing() {
		return expand_self_closing(document, container, snippet, style);
	}
	let base = document.line_indent(container.range().start);
	TextEdit::insert(container.inner_range().start, snippet.render(base, style))
}

/// Inserts `snippet` as the last content of `container`, replacing the
/// whitespace before its closing tag.
fn insert_last(
	document: &TextDocument,
	container: NodeRef<'_>,
	snippet: &Snippet,
	style: &EditStyle,
) -> TextEdit {
	if container.is_self_closing() {
		return expand_self_closing(document, container, snippet, style);
	}
	let base = document.line_indent(container.range().start);
	let inner = container.inner_range();
	let content = inner.slice(document.text()).unwrap_or_default();
	let start = inner.start + content.trim_end().len();
	TextEdit::replace(
		ByteRange::new(start, inner.end),
		format!("{}{}{base}", snippet.render(base, style), style.eol),
	)
}

/// Rewrites `<tag/>` as `<tag>…</tag>` around `snippet`.
fn expand_self_closing(
	document: &TextDocument,
	element: NodeRef<'_>,
	snippet: &Snippet,
	style: &EditStyle,
) -> TextEdit {
	let name = element.name().unwrap_or_default();
	let base = document.line_indent(element.range().start);
	TextEdit::replace(
		element.range(),
		format!("<{name}>{}{}{base}</{name}>", snippet.render(base, style), style.eol),
	)
}

/// Deletes `element`, together with its line when nothing else is on it.
fn delete_element(document: &TextDocument, element: NodeRef<'_>) -> TextEdit {
	let text = document.text();
	let range = element.range();
	let line_start = text[..range.start].rfind('\n').map_or(0, |idx| idx + 1);
	let line_end = text[range.end..]
		.find('\n')
		.map(|idx| range.end + idx + 1);

	if text[line_start..range.start].trim().is_empty()
		&& let Some(line_end) = line_end
		&& text[range.end..line_end].trim().is_empty()
	{
		return TextEdit::delete(ByteRange::new(line_start, line_end));
	}
	TextEdit::delete(range)
}
