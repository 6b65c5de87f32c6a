//! Local artifact repository layout.

use std::path::{Path, PathBuf};

use tracing::debug;

/// The local repository where the build tool caches artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
	root: PathBuf,
}

impl LocalRepository {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	/// `configured` if set, else `~/.m2/repository`.
	pub fn locate(configured: Option<&Path>) -> Option<Self> {
		match configured {
			Some(root) => Some(Self::new(root)),
			None => dirs::home_dir().map(|home| Self::new(home.join(".m2").join("repository"))),
		}
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Directory holding every version of `group_id:artifact_id`.
	pub fn artifact_dir(&self, group_id: &str, artifact_id: &str) -> PathBuf {
		let mut dir = self.root.clone();
		dir.extend(group_id.split('.'));
		dir.push(artifact_id);
		dir
	}

	/// `<root>/<group/as/path>/<aid>/<version>/<aid>-<version>.pom`.
	pub fn descriptor_path(&self, group_id: &str, artifact_id: &str, version: &str) -> PathBuf {
		self.artifact_dir(group_id, artifact_id)
			.join(version)
			.join(format!("{artifact_id}-{version}.pom"))
	}

	/// Descriptor paths of every locally cached version, sorted by path.
	pub fn possible_descriptor_paths(&self, group_id: &str, artifact_id: &str) -> Vec<PathBuf> {
		let dir = self.artifact_dir(group_id, artifact_id);
		let Ok(entries) = std::fs::read_dir(&dir) else {
			debug!(dir = %dir.display(), "artifact not in local repository");
			return Vec::new();
		};
		let mut paths: Vec<PathBuf> = entries
			.filter_map(|entry| entry.ok())
			.filter(|entry| entry.path().is_dir())
			.filter_map(|entry| {
				let version = entry.file_name().to_string_lossy().into_owned();
				let path = self.descriptor_path(group_id, artifact_id, &version);
				path.is_file().then_some(path)
			})
			.collect();
		paths.sort();
		paths
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn descriptor_path_layout() {
		let repo = LocalRepository::new("/m2");
		assert_eq!(
			repo.descriptor_path("org.slf4j", "slf4j-api", "2.0.9"),
			PathBuf::from("/m2/org/slf4j/slf4j-api/2.0.9/slf4j-api-2.0.9.pom")
		);
	}

	#[test]
	fn lists_cached_versions() {
		let dir = tempfile::tempdir().unwrap();
		let repo = LocalRepository::new(dir.path());
		for version in ["1.0", "2.0"] {
			let path = repo.descriptor_path("a.b", "c", version);
			std::fs::create_dir_all(path.parent().unwrap()).unwrap();
			std::fs::write(&path, "<project/>").unwrap();
		}
		std::fs::create_dir_all(repo.artifact_dir("a.b", "c").join("3.0")).unwrap();

		let found = repo.possible_descriptor_paths("a.b", "c");
		assert_eq!(found.len(), 2);
		assert!(found[0].ends_with("1.0/c-1.0.pom"));
		assert!(repo.possible_descriptor_paths("x", "y").is_empty());
	}
}
