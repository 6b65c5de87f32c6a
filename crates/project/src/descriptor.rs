//! Structured view of a project descriptor.

use indexmap::IndexMap;
use pomsense_markup::{DEFAULT_PLUGIN_GROUP, MarkupTree, NodeRef};
use tracing::warn;

use crate::error::ParseError;

/// How a `<parent>` locates its descriptor on disk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RelativePath {
	/// No `<relativePath>`: the parent lives at `../pom.xml`.
	#[default]
	Default,
	/// An empty `<relativePath/>`: lookup on disk is disabled.
	Disabled,
	/// An explicit path relative to the child's directory.
	Path(String),
}

/// The `<parent>` reference of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParentRef {
	pub group_id: Option<String>,
	pub artifact_id: Option<String>,
	pub version: Option<String>,
	pub relative_path: RelativePath,
}

/// A `<dependency>` as written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeclaredDependency {
	pub group_id: Option<String>,
	pub artifact_id: Option<String>,
	pub version: Option<String>,
	pub scope: Option<String>,
	pub packaging: Option<String>,
	pub classifier: Option<String>,
}

impl DeclaredDependency {
	pub fn matches(&self, group_id: &str, artifact_id: &str) -> bool {
		self.group_id.as_deref() == Some(group_id) && self.artifact_id.as_deref() == Some(artifact_id)
	}
}

/// A `<plugin>` as written; the group defaults to the standard plugin group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredPlugin {
	pub group_id: String,
	pub artifact_id: Option<String>,
	pub version: Option<String>,
}

/// Project descriptor contents relevant to navigation and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Descriptor {
	pub group_id: Option<String>,
	pub artifact_id: Option<String>,
	pub version: Option<String>,
	pub name: Option<String>,
	pub packaging: Option<String>,
	pub parent: Option<ParentRef>,
	pub modules: Vec<String>,
	pub properties: IndexMap<String, String>,
	pub dependencies: Vec<DeclaredDependency>,
	pub dependency_management: Vec<DeclaredDependency>,
	pub plugins: Vec<DeclaredPlugin>,
}

impl Descriptor {
	/// Parses descriptor text. The root element must be `<project>`.
	pub fn parse(text: &str) -> Result<Self, ParseError> {
		let tree = MarkupTree::parse(text)?;
		let root = tree.root();
		match root.name() {
			Some("project") => Ok(Self::from_element(root)),
			other => Err(ParseError::NotAProject {
				root: other.unwrap_or_default().to_string(),
			}),
		}
	}

	/// Parses merged-descriptor output.
	///
	/// Multi-module output wraps several `<project>` elements in
	/// `<projects>`; the one whose `artifactId` equals `select` is used. When
	/// none matches, the result is empty.
	pub fn parse_effective(text: &str, select: &str) -> Result<Self, ParseError> {
		let tree = MarkupTree::parse(text)?;
		let root = tree.root();
		match root.name() {
			Some("project") => Ok(Self::from_element(root)),
			Some("projects") => {
				let selected = root
					.elements()
					.filter(|node| node.name() == Some("project"))
					.find(|node| node.child_text("artifactId") == Some(select));
				match selected {
					Some(project) => Ok(Self::from_element(project)),
					None => {
						warn!(select, "no matching project in merged descriptor");
						Ok(Self::default())
					}
				}
			}
			other => Err(ParseError::NotAProject {
				root: other.unwrap_or_default().to_string(),
			}),
		}
	}

	fn from_element(project: NodeRef<'_>) -> Self {
		let text = |node: NodeRef<'_>, tag: &str| node.child_text(tag).map(str::to_string);

		let parent = project.child("parent").map(|parent| ParentRef {
			group_id: text(parent, "groupId"),
			artifact_id: text(parent, "artifactId"),
			version: text(parent, "version"),
			relative_path: match parent.child("relativePath") {
				None => RelativePath::Default,
				Some(node) => match node.text() {
					None => RelativePath::Disabled,
					Some(path) => RelativePath::Path(path.to_string()),
				},
			},
		});

		let modules = project
			.child("modules")
			.map(|modules| {
				modules
					.elements()
					.filter(|node| node.name() == Some("module"))
					.filter_map(|node| node.text().map(str::to_string))
					.collect()
			})
			.unwrap_or_default();

		let properties = project
			.child("properties")
			.map(|properties| {
				properties
					.elements()
					.filter_map(|node| {
						let key = node.name()?.to_string();
						Some((key, node.text().unwrap_or_default().to_string()))
					})
					.collect()
			})
			.unwrap_or_default();

		let dependency_management = project
			.child("dependencyManagement")
			.and_then(|management| management.child("dependencies"))
			.map(dependencies_in)
			.unwrap_or_default();

		let plugins = project
			.child("build")
			.and_then(|build| build.child("plugins"))
			.map(|plugins| {
				plugins
					.elements()
					.filter(|node| node.name() == Some("plugin"))
					.map(|plugin| DeclaredPlugin {
						group_id: text(plugin, "groupId")
							.unwrap_or_else(|| DEFAULT_PLUGIN_GROUP.to_string()),
						artifact_id: text(plugin, "artifactId"),
						version: text(plugin, "version"),
					})
					.collect()
			})
			.unwrap_or_default();

		Self {
			group_id: text(project, "groupId"),
			artifact_id: text(project, "artifactId"),
			version: text(project, "version"),
			name: text(project, "name"),
			packaging: text(project, "packaging"),
			parent,
			modules,
			properties,
			dependencies: project
				.child("dependencies")
				.map(dependencies_in)
				.unwrap_or_default(),
			dependency_management,
			plugins,
		}
	}

	/// Declared dependency for `group_id:artifact_id`.
	pub fn dependency(&self, group_id: &str, artifact_id: &str) -> Option<&DeclaredDependency> {
		self.dependencies
			.iter()
			.find(|dependency| dependency.matches(group_id, artifact_id))
	}
}

fn dependencies_in(dependencies: NodeRef<'_>) -> Vec<DeclaredDependency> {
	dependencies
		.elements()
		.filter(|node| node.name() == Some("dependency"))
		.map(|node| {
			let text = |tag: &str| node.child_text(tag).map(str::to_string);
			DeclaredDependency {
				group_id: text("groupId"),
				artifact_id: text("artifactId"),
				version: text("version"),
				scope: text("scope"),
				packaging: text("type"),
				classifier: text("classifier"),
			}
		})
		.collect()
}
