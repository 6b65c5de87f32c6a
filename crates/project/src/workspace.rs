//! Registry of the projects in a workspace.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use indexmap::IndexMap;
use parking_lot::RwLock;
use pomsense_config::DiscoverySettings;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::paths;
use crate::project::Project;

/// A discovery glob that failed to compile.
#[derive(Debug, Error)]
#[error("invalid discovery pattern `{pattern}`: {error}")]
pub struct PatternError {
	pub pattern: String,
	#[source]
	pub error: globset::Error,
}

/// All known projects, keyed by absolute descriptor path.
///
/// The registry is an explicit context object; callers pass it wherever
/// inherited values need resolving.
#[derive(Debug, Default)]
pub struct Workspace {
	projects: RwLock<IndexMap<PathBuf, Arc<Project>>>,
}

impl Workspace {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, path: &Path) -> Option<Arc<Project>> {
		self.projects.read().get(&paths::normalize(path)).cloned()
	}

	/// Registers `project`, replacing any project with the same path.
	pub fn insert(&self, project: Arc<Project>) -> Option<Arc<Project>> {
		self.projects
			.write()
			.insert(project.path().to_path_buf(), project)
	}

	/// Creates, parses and registers the project at `path`.
	///
	/// A descriptor that fails to load is still registered so later edits
	/// can fix it.
	pub fn add(&self, path: &Path) -> Arc<Project> {
		let project = Arc::new(Project::new(path));
		if let Err(error) = project.reload() {
			warn!(path = %project.path().display(), %error, "descriptor did not load");
		}
		self.insert(Arc::clone(&project));
		project
	}

	pub fn remove(&self, path: &Path) -> Option<Arc<Project>> {
		self.projects.write().shift_remove(&paths::normalize(path))
	}

	/// Removes every project whose descriptor lies under `folder`.
	pub fn remove_all_under(&self, folder: &Path) -> usize {
		let folder = paths::normalize(folder);
		let mut projects = self.projects.write();
		let before = projects.len();
		projects.retain(|path, _| !path.starts_with(&folder));
		before - projects.len()
	}

	/// Projects in registration order.
	pub fn projects(&self) -> Vec<Arc<Project>> {
		self.projects.read().values().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.projects.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.projects.read().is_empty()
	}

	/// Parent of `project`: the registered project at its declared parent
	/// path, else the project that lists it as a module.
	pub fn parent_of(&self, project: &Project) -> Option<Arc<Project>> {
		project
			.parent_descriptor_path()
			.and_then(|path| self.get(&path))
			.or_else(|| project.parent_link().and_then(|path| self.get(&path)))
	}

	/// Ancestors of `project`, nearest first. Stops at the first project
	/// already visited.
	pub fn lineage<'w>(&'w self, project: &Project) -> Lineage<'w> {
		let mut visited = HashSet::new();
		visited.insert(project.path().to_path_buf());
		Lineage {
			workspace: self,
			next: self.parent_of(project),
			visited,
		}
	}

	/// Finds descriptors under `root`, registers the new ones and links
	/// module parents. Returns every project found, new or known.
	pub fn discover(
		&self,
		root: &Path,
		settings: &DiscoverySettings,
	) -> Result<Vec<Arc<Project>>, PatternError> {
		let found = find_descriptors(root, settings)?;
		let mut all = Vec::with_capacity(found.len());
		let mut created = Vec::new();

		for path in found {
			match self.get(&path) {
				Some(project) => all.push(project),
				None => {
					let project = Arc::new(Project::new(&path));
					if let Err(error) = project.reload() {
						warn!(path = %path.display(), %error, "descriptor did not load");
					}
					created.push(Arc::clone(&project));
					all.push(project);
				}
			}
		}

		for project in &created {
			self.insert(Arc::clone(project));
		}
		for project in &created {
			for module in project.modules() {
				if let Some(child) = self.get(&module)
					&& child.link_parent(project.path())
				{
					debug!(
						module = %module.display(),
						parent = %project.path().display(),
						"linked module parent"
					);
				}
			}
		}

		info!(
			root = %root.display(),
			found = all.len(),
			new = created.len(),
			"discovered projects"
		);
		Ok(all)
	}
}

/// Iterator over a project's ancestors. See [`Workspace::lineage`].
pub struct Lineage<'w> {
	workspace: &'w Workspace,
	next: Option<Arc<Project>>,
	visited: HashSet<PathBuf>,
}

impl Iterator for Lineage<'_> {
	type Item = Arc<Project>;

	fn next(&mut self) -> Option<Self::Item> {
		let current = self.next.take()?;
		if !self.visited.insert(current.path().to_path_buf()) {
			warn!(path = %current.path().display(), "parent cycle");
			return None;
		}
		self.next = self.workspace.parent_of(&current);
		Some(current)
	}
}

/// Descriptor paths under `root` matching the discovery settings, sorted.
pub fn find_descriptors(
	root: &Path,
	settings: &DiscoverySettings,
) -> Result<Vec<PathBuf>, PatternError> {
	let include = glob_set(std::slice::from_ref(&settings.pattern))?;
	let exclude = glob_set(&settings.exclude)?;

	let mut walker = WalkBuilder::new(root);
	walker
		.hidden(false)
		.git_ignore(false)
		.git_global(false)
		.git_exclude(false)
		.ignore(false)
		.parents(false);

	let mut found: Vec<PathBuf> = walker
		.build()
		.filter_map(|entry| match entry {
			Ok(entry) => Some(entry),
			Err(error) => {
				debug!(%error, "skipping unreadable entry");
				None
			}
		})
		.filter(|entry| entry.file_type().is_some_and(|kind| kind.is_file()))
		.filter_map(|entry| {
			let relative = entry.path().strip_prefix(root).ok()?;
			(include.is_match(relative) && !exclude.is_match(relative))
				.then(|| paths::normalize(entry.path()))
		})
		.collect();
	found.sort();
	Ok(found)
}

fn glob_set(patterns: &[String]) -> Result<GlobSet, PatternError> {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		let glob = Glob::new(pattern).map_err(|error| PatternError {
			pattern: pattern.clone(),
			error,
		})?;
		builder.add(glob);
	}
	builder.build().map_err(|error| PatternError {
		pattern: patterns.join(","),
		error,
	})
}

#[cfg(test)]
mod tests;
