//! Hover and go-to-definition on descriptor coordinates.

use std::path::PathBuf;

use lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind};
use pomsense_markup::{DependencyElement, MarkupTree, NodeRef};
use pomsense_primitives::{ByteRange, TextDocument};
use pomsense_project::{LocalRepository, Project, Workspace, descriptor_in};
use tracing::trace;

/// A definition found for the element under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionTarget {
	/// Range of the element the lookup started from.
	pub origin: ByteRange,
	/// Descriptor the element refers to.
	pub path: PathBuf,
}

/// Coordinates and effective version of the dependency, plugin or parent
/// whose `groupId`, `artifactId` or `version` lies at `offset`.
pub fn hover(document: &TextDocument, project: &Project, offset: usize) -> Option<Hover> {
	let tree = MarkupTree::parse(document.text()).ok()?;
	let owner = coordinate_owner(&tree, offset)?;
	let (group_id, artifact_id) = coordinates(owner)?;

	let version = match owner.name()? {
		"parent" => owner.child_text("version").map(str::to_string),
		_ => project.dependency_version(group_id, artifact_id),
	}?;

	Some(Hover {
		contents: HoverContents::Markup(MarkupContent {
			kind: MarkupKind::PlainText,
			value: format!("groupId = {group_id}\n\nartifactId = {artifact_id}\n\nversion = {version}"),
		}),
		range: Some(document.range_of(owner.range())),
	})
}

/// Descriptors referred to by the element at `offset`.
///
/// A module resolves to its descriptor path. A parent resolves to the
/// registered parent project, its descriptor on disk or its copy in the
/// local repository. Dependencies and plugins resolve to the local
/// repository descriptor of the version in effect, or to every cached
/// version when that one is missing.
pub fn definition(
	document: &TextDocument,
	project: &Project,
	workspace: &Workspace,
	repository: Option<&LocalRepository>,
	offset: usize,
) -> Vec<DefinitionTarget> {
	let Ok(tree) = MarkupTree::parse(document.text()) else {
		return Vec::new();
	};
	let Some(tag) = tree.locate(offset).and_then(|node| node.enclosing_tag()) else {
		return Vec::new();
	};

	let owner = match tag.name() {
		Some("groupId" | "artifactId" | "version") => tag.parent(),
		Some("module") => {
			let Some(module) = tag.text() else {
				return Vec::new();
			};
			return vec![DefinitionTarget {
				origin: tag.range(),
				path: descriptor_in(&project.dir().join(module)),
			}];
		}
		_ => Some(tag),
	};
	let Some(owner) = owner else {
		return Vec::new();
	};

	let targets = match owner.name() {
		Some("parent") => parent_targets(project, workspace, repository, owner),
		Some("dependency" | "plugin") => dependency_targets(project, repository, owner),
		_ => Vec::new(),
	};
	trace!(offset, found = targets.len(), "definition lookup");
	targets
		.into_iter()
		.map(|path| DefinitionTarget {
			origin: owner.range(),
			path,
		})
		.collect()
}

fn parent_targets(
	project: &Project,
	workspace: &Workspace,
	repository: Option<&LocalRepository>,
	parent: NodeRef<'_>,
) -> Vec<PathBuf> {
	if let Some(registered) = workspace.parent_of(project) {
		return vec![registered.path().to_path_buf()];
	}
	if let Some(path) = project.parent_descriptor_path()
		&& path.is_file()
	{
		return vec![path];
	}
	let (Some(repository), Some((group_id, artifact_id)), Some(version)) = (
		repository,
		coordinates(parent),
		parent.child_text("version"),
	) else {
		return Vec::new();
	};
	let path = repository.descriptor_path(group_id, artifact_id, version);
	if path.is_file() { vec![path] } else { Vec::new() }
}

fn dependency_targets(
	project: &Project,
	repository: Option<&LocalRepository>,
	element: NodeRef<'_>,
) -> Vec<PathBuf> {
	let (Some(repository), Some((group_id, artifact_id))) = (repository, coordinates(element)) else {
		return Vec::new();
	};
	let version = project
		.dependency_version(group_id, artifact_id)
		.or_else(|| element.child_text("version").map(str::to_string));

	if let Some(version) = version {
		let path = repository.descriptor_path(group_id, artifact_id, &version);
		if path.is_file() {
			return vec![path];
		}
	}
	repository.possible_descriptor_paths(group_id, artifact_id)
}

/// Dependency, plugin or parent element whose coordinate child lies at
/// `offset`.
fn coordinate_owner(tree: &MarkupTree, offset: usize) -> Option<NodeRef<'_>> {
	let tag = tree.locate(offset)?.enclosing_tag()?;
	if !matches!(tag.name()?, "groupId" | "artifactId" | "version") {
		return None;
	}
	let owner = tag.parent()?;
	matches!(owner.name()?, "dependency" | "plugin" | "parent").then_some(owner)
}

/// `(groupId, artifactId)` of `element`, with the plugin group default.
fn coordinates(element: NodeRef<'_>) -> Option<(&str, &str)> {
	match DependencyElement::new(element) {
		Some(declaration) => Some((declaration.group_id()?, declaration.artifact_id()?)),
		None => Some((element.child_text("groupId")?, element.child_text("artifactId")?)),
	}
}
