//! One project descriptor and everything derived from it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use pomsense_dependency_tree::{DependencyForest, compare_versions};
use tracing::{debug, warn};

use crate::descriptor::{DeclaredDependency, DeclaredPlugin, Descriptor, RelativePath};
use crate::error::{ParseError, ProjectError, Result};
use crate::paths::{self, DESCRIPTOR_FILE_NAME};
use crate::runner::BuildToolRunner;
use crate::workspace::Workspace;

/// Merged descriptor produced by the build tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effective {
	/// Raw output as returned by the build tool.
	pub text: String,
	pub descriptor: Descriptor,
}

/// Last successfully parsed dependency tree report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeReport {
	/// Raw report text.
	pub text: String,
	pub forest: DependencyForest,
}

/// A project identified by the absolute path of its descriptor.
///
/// Parsed state is swapped in wholesale once a computation completes, so
/// readers always observe either the previous or the new value.
#[derive(Debug)]
pub struct Project {
	path: PathBuf,
	declared: RwLock<Option<Arc<Descriptor>>>,
	effective: RwLock<Option<Arc<Effective>>>,
	tree: RwLock<Option<Arc<TreeReport>>>,
	/// Registry key of the project listing this one as a module.
	parent: RwLock<Option<PathBuf>>,
}

impl Project {
	pub fn new(path: impl AsRef<Path>) -> Self {
		Self {
			path: paths::normalize(path.as_ref()),
			declared: RwLock::new(None),
			effective: RwLock::new(None),
			tree: RwLock::new(None),
			parent: RwLock::new(None),
		}
	}

	/// Absolute descriptor path (the registry key).
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Directory containing the descriptor.
	pub fn dir(&self) -> &Path {
		self.path.parent().unwrap_or(Path::new(""))
	}

	/// Parses `text` as this project's descriptor.
	///
	/// On failure the declared and merged views are both cleared.
	pub fn parse_declared(&self, text: &str) -> Result<()> {
		match Descriptor::parse(text) {
			Ok(descriptor) => {
				*self.declared.write() = Some(Arc::new(descriptor));
				Ok(())
			}
			Err(source) => {
				self.clear_parsed();
				Err(ProjectError::Parse {
					path: self.path.clone(),
					source,
				})
			}
		}
	}

	/// Reads the descriptor from disk and parses it.
	pub fn reload(&self) -> Result<()> {
		let text = match std::fs::read_to_string(&self.path) {
			Ok(text) => text,
			Err(error) => {
				self.clear_parsed();
				return Err(ProjectError::Io {
					path: self.path.clone(),
					error,
				});
			}
		};
		self.parse_declared(&text)
	}

	fn clear_parsed(&self) {
		*self.declared.write() = None;
		*self.effective.write() = None;
	}

	pub fn declared(&self) -> Option<Arc<Descriptor>> {
		self.declared.read().clone()
	}

	pub fn effective(&self) -> Option<Arc<Effective>> {
		self.effective.read().clone()
	}

	pub fn tree(&self) -> Option<Arc<TreeReport>> {
		self.tree.read().clone()
	}

	/// Registry key of the project that lists this one as a module.
	pub fn parent_link(&self) -> Option<PathBuf> {
		self.parent.read().clone()
	}

	/// Records `parent` unless a link already exists. Returns true if set.
	pub fn link_parent(&self, parent: &Path) -> bool {
		let mut slot = self.parent.write();
		if slot.is_some() {
			return false;
		}
		*slot = Some(parent.to_path_buf());
		true
	}

	pub fn artifact_id(&self) -> Option<String> {
		self.declared()?.artifact_id.clone()
	}

	pub fn packaging(&self) -> Option<String> {
		self.declared()?.packaging.clone()
	}

	/// Own `groupId`, else the parent reference's, else inherited.
	pub fn group_id(&self, workspace: &Workspace) -> Option<String> {
		self.inherited(workspace, |descriptor| {
			descriptor
				.group_id
				.clone()
				.or_else(|| descriptor.parent.as_ref()?.group_id.clone())
		})
	}

	/// Own `version`, else the parent reference's, else inherited.
	pub fn version(&self, workspace: &Workspace) -> Option<String> {
		self.inherited(workspace, |descriptor| {
			descriptor
				.version
				.clone()
				.or_else(|| descriptor.parent.as_ref()?.version.clone())
		})
	}

	/// `<name>` with properties filled in, else the artifactId.
	pub fn name(&self, workspace: &Workspace) -> Option<String> {
		let declared = self.declared()?;
		match &declared.name {
			Some(raw) => Some(self.fill_properties(workspace, raw)),
			None => declared.artifact_id.clone(),
		}
	}

	/// `groupId:artifactId`.
	pub fn id(&self, workspace: &Workspace) -> Option<String> {
		Some(format!(
			"{}:{}",
			self.group_id(workspace)?,
			self.artifact_id()?
		))
	}

	/// Absolute descriptor paths of the declared modules.
	pub fn modules(&self) -> Vec<PathBuf> {
		let Some(declared) = self.declared() else {
			return Vec::new();
		};
		declared
			.modules
			.iter()
			.map(|module| paths::descriptor_in(&self.dir().join(module)))
			.collect()
	}

	/// Where the `<parent>` descriptor should live on disk.
	///
	/// `None` without a parent or when `<relativePath/>` is empty.
	pub fn parent_descriptor_path(&self) -> Option<PathBuf> {
		let declared = self.declared()?;
		let parent = declared.parent.as_ref()?;
		match &parent.relative_path {
			RelativePath::Default => {
				Some(paths::normalize(&self.dir().join("..").join(DESCRIPTOR_FILE_NAME)))
			}
			RelativePath::Disabled => None,
			RelativePath::Path(relative) => Some(paths::descriptor_at(&self.dir().join(relative))),
		}
	}

	fn inherited(
		&self,
		workspace: &Workspace,
		pick: impl Fn(&Descriptor) -> Option<String>,
	) -> Option<String> {
		if let Some(value) = self.declared().and_then(|declared| pick(declared.as_ref())) {
			return Some(value);
		}
		workspace
			.lineage(self)
			.find_map(|ancestor| ancestor.declared().and_then(|declared| pick(declared.as_ref())))
	}

	/// Value of property `key`, from this project or the nearest ancestor.
	///
	/// Falls back to the built-in `project.groupId`, `project.artifactId` and
	/// `project.version`.
	pub fn resolve_property(&self, workspace: &Workspace, key: &str) -> Option<String> {
		let own = self
			.declared()
			.and_then(|declared| declared.properties.get(key).cloned());
		if own.is_some() {
			return own;
		}
		let inherited = workspace.lineage(self).find_map(|ancestor| {
			ancestor
				.declared()
				.and_then(|declared| declared.properties.get(key).cloned())
		});
		if inherited.is_some() {
			return inherited;
		}
		match key {
			"project.groupId" => self.group_id(workspace),
			"project.artifactId" => self.artifact_id(),
			"project.version" => self.version(workspace),
			_ => None,
		}
	}

	/// Replaces each `${key}` in `raw` with its resolved value.
	///
	/// Single pass: substituted values are not expanded again, and
	/// unresolved placeholders are left verbatim.
	pub fn fill_properties(&self, workspace: &Workspace, raw: &str) -> String {
		let mut out = String::with_capacity(raw.len());
		let mut rest = raw;
		while let Some(open) = rest.find("${") {
			let Some(close) = rest[open + 2..].find('}') else {
				break;
			};
			let key = &rest[open + 2..open + 2 + close];
			out.push_str(&rest[..open]);
			match self.resolve_property(workspace, key) {
				Some(value) => out.push_str(&value),
				None => out.push_str(&rest[open..open + 3 + close]),
			}
			rest = &rest[open + 3 + close..];
		}
		out.push_str(rest);
		out
	}

	/// Computes the merged descriptor through `runner`.
	///
	/// With `cache_only`, a previously computed value is returned without
	/// running the build tool. A failure keeps the previous value.
	pub async fn compute_effective(
		&self,
		workspace: &Workspace,
		runner: &dyn BuildToolRunner,
		cache_only: bool,
	) -> Result<Arc<Effective>> {
		if self.declared().is_none() {
			return Err(ProjectError::NotParsed {
				path: self.path.clone(),
			});
		}
		if cache_only && let Some(cached) = self.effective() {
			return Ok(cached);
		}

		let text = runner
			.effective_merge(&self.path)
			.await
			.map_err(|source| ProjectError::Process {
				path: self.path.clone(),
				source,
			})?;
		let select = self.name(workspace).unwrap_or_default();
		let descriptor =
			Descriptor::parse_effective(&text, &select).map_err(|source| ProjectError::Parse {
				path: self.path.clone(),
				source,
			})?;

		let effective = Arc::new(Effective { text, descriptor });
		*self.effective.write() = Some(Arc::clone(&effective));
		debug!(path = %self.path.display(), "merged descriptor updated");
		Ok(effective)
	}

	/// Regenerates and parses the dependency tree report.
	///
	/// A build-tool failure keeps the previous forest. A report that fails
	/// to parse clears it so no truncated forest is ever visible.
	pub async fn refresh_dependency_tree(
		&self,
		runner: &dyn BuildToolRunner,
	) -> Result<Arc<TreeReport>> {
		let text = runner
			.tree_report(&self.path)
			.await
			.map_err(|source| ProjectError::Process {
				path: self.path.clone(),
				source,
			})?;
		self.apply_tree_report(text)
	}

	/// Parses `text` as this project's tree report and stores it.
	pub fn apply_tree_report(&self, text: String) -> Result<Arc<TreeReport>> {
		match pomsense_dependency_tree::parse(&text) {
			Ok(forest) => {
				let report = Arc::new(TreeReport { text, forest });
				*self.tree.write() = Some(Arc::clone(&report));
				Ok(report)
			}
			Err(error) => {
				warn!(path = %self.path.display(), %error, "discarding unreadable tree report");
				*self.tree.write() = None;
				Err(ProjectError::Parse {
					path: self.path.clone(),
					source: ParseError::Report(error),
				})
			}
		}
	}

	/// Version of `group_id:artifact_id` in effect for this project.
	///
	/// Looks at the merged dependency list first, then the tree report.
	pub fn dependency_version(&self, group_id: &str, artifact_id: &str) -> Option<String> {
		let from_effective = self.effective().and_then(|effective| {
			effective
				.descriptor
				.dependency(group_id, artifact_id)?
				.version
				.clone()
		});
		if from_effective.is_some() {
			return from_effective;
		}
		let report = self.tree()?;
		let forest = &report.forest;
		forest
			.find(group_id, artifact_id)
			.next()
			.map(|id| forest.node(id).effective_version().to_string())
	}

	/// Distinct versions of `group_id:artifact_id` in the tree report,
	/// newest first.
	pub fn versions_in_tree(&self, group_id: &str, artifact_id: &str) -> Vec<String> {
		let Some(report) = self.tree() else {
			return Vec::new();
		};
		let forest = &report.forest;
		let mut seen = HashSet::new();
		let mut versions: Vec<String> = forest
			.find(group_id, artifact_id)
			.map(|id| forest.node(id).version().to_string())
			.filter(|version| seen.insert(version.clone()))
			.collect();
		versions.sort_by(|a, b| compare_versions(b, a));
		versions
	}

	/// Dependencies of the merged descriptor.
	pub fn dependencies(&self) -> Vec<DeclaredDependency> {
		self.effective()
			.map(|effective| effective.descriptor.dependencies.clone())
			.unwrap_or_default()
	}

	/// Plugins of the merged descriptor.
	pub fn plugins(&self) -> Vec<DeclaredPlugin> {
		self.effective()
			.map(|effective| effective.descriptor.plugins.clone())
			.unwrap_or_default()
	}

	/// Property names of the merged descriptor.
	pub fn effective_property_keys(&self) -> Vec<String> {
		self.effective()
			.map(|effective| effective.descriptor.properties.keys().cloned().collect())
			.unwrap_or_default()
	}
}
