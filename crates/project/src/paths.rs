//! Lexical path helpers.

use std::path::{Component, Path, PathBuf};

/// File name of a project descriptor.
pub const DESCRIPTOR_FILE_NAME: &str = "pom.xml";

/// Resolves `.` and `..` components without touching the filesystem.
///
/// Registry keys must compare equal however a path was spelled, so
/// `/ws/app/../pom.xml` and `/ws/pom.xml` normalize to the same key.
pub fn normalize(path: &Path) -> PathBuf {
	let mut out = PathBuf::new();
	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => match out.components().next_back() {
				Some(Component::Normal(_)) => {
					out.pop();
				}
				Some(Component::RootDir | Component::Prefix(_)) => {}
				_ => out.push(component),
			},
			other => out.push(other),
		}
	}
	out
}

/// Descriptor path for `target`: itself if it is a file, else
/// `target/pom.xml`.
pub fn descriptor_in(target: &Path) -> PathBuf {
	if target.is_file() {
		normalize(target)
	} else {
		normalize(&target.join(DESCRIPTOR_FILE_NAME))
	}
}

/// Descriptor path named by a parent `relativePath`: `target/pom.xml` if
/// `target` is a directory, else `target` itself.
pub fn descriptor_at(target: &Path) -> PathBuf {
	if target.is_dir() {
		normalize(&target.join(DESCRIPTOR_FILE_NAME))
	} else {
		normalize(target)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalize_collapses_dots() {
		assert_eq!(normalize(Path::new("/ws/app/../pom.xml")), PathBuf::from("/ws/pom.xml"));
		assert_eq!(normalize(Path::new("/ws/./a/b/../c")), PathBuf::from("/ws/a/c"));
		assert_eq!(normalize(Path::new("../x")), PathBuf::from("../x"));
		assert_eq!(normalize(Path::new("../../proj/pom.xml")), PathBuf::from("../../proj/pom.xml"));
		assert_eq!(normalize(Path::new("a/../../x")), PathBuf::from("../x"));
		assert_eq!(normalize(Path::new("/../x")), PathBuf::from("/x"));
	}

	#[test]
	fn descriptor_in_appends_file_name_for_directories() {
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("custom.xml");
		std::fs::write(&file, "<project/>").unwrap();

		assert_eq!(descriptor_in(&file), file);
		assert_eq!(descriptor_in(dir.path()), dir.path().join("pom.xml"));
		assert_eq!(descriptor_at(dir.path()), dir.path().join("pom.xml"));
		assert_eq!(descriptor_at(&dir.path().join("base.xml")), dir.path().join("base.xml"));
	}
}
