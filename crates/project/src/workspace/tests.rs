use std::fs;

use pretty_assertions::assert_eq;

use super::*;

fn write(root: &Path, relative: &str, text: &str) -> PathBuf {
	let path = root.join(relative);
	if let Some(dir) = path.parent() {
		fs::create_dir_all(dir).unwrap();
	}
	fs::write(&path, text).unwrap();
	path
}

fn sample(root: &Path) {
	write(
		root,
		"pom.xml",
		"<project><groupId>com.example</groupId><artifactId>root</artifactId>\
		 <modules><module>core</module><module>web</module></modules></project>",
	);
	write(root, "core/pom.xml", "<project><artifactId>core</artifactId></project>");
	write(root, "web/pom.xml", "<project><artifactId>web</artifactId></project>");
	write(root, "target/pom.xml", "<project><artifactId>built</artifactId></project>");
	write(root, "broken/pom.xml", "<project><artifactId>broken");
}

#[test]
fn discovery_skips_excluded_directories() {
	let dir = tempfile::tempdir().unwrap();
	sample(dir.path());

	let found = find_descriptors(dir.path(), &DiscoverySettings::default()).unwrap();
	let relative: Vec<_> = found
		.iter()
		.map(|path| path.strip_prefix(dir.path()).unwrap().to_path_buf())
		.collect();

	assert_eq!(
		relative,
		vec![
			PathBuf::from("broken/pom.xml"),
			PathBuf::from("core/pom.xml"),
			PathBuf::from("pom.xml"),
			PathBuf::from("web/pom.xml"),
		]
	);
}

#[test]
fn invalid_pattern_is_reported() {
	let dir = tempfile::tempdir().unwrap();
	let settings = DiscoverySettings {
		pattern: "**/[pom.xml".to_string(),
		..DiscoverySettings::default()
	};

	let err = find_descriptors(dir.path(), &settings).unwrap_err();
	assert_eq!(err.pattern, "**/[pom.xml");
}

#[test]
fn discover_registers_and_links_modules() {
	let dir = tempfile::tempdir().unwrap();
	sample(dir.path());
	let workspace = Workspace::new();

	let found = workspace.discover(dir.path(), &DiscoverySettings::default()).unwrap();
	assert_eq!(found.len(), 4);
	assert_eq!(workspace.len(), 4);

	let root = workspace.get(&dir.path().join("pom.xml")).unwrap();
	let core = workspace.get(&dir.path().join("core/pom.xml")).unwrap();
	assert_eq!(core.parent_link().as_deref(), Some(root.path()));
	assert!(Arc::ptr_eq(&workspace.parent_of(&core).unwrap(), &root));
	assert_eq!(core.group_id(&workspace).as_deref(), Some("com.example"));
	assert!(!core.link_parent(&dir.path().join("web/pom.xml")));

	let broken = workspace.get(&dir.path().join("broken/pom.xml")).unwrap();
	assert!(broken.declared().is_none());
}

#[test]
fn rediscovery_keeps_known_projects() {
	let dir = tempfile::tempdir().unwrap();
	sample(dir.path());
	let workspace = Workspace::new();
	let settings = DiscoverySettings::default();

	let first = workspace.discover(dir.path(), &settings).unwrap();
	let second = workspace.discover(dir.path(), &settings).unwrap();

	assert_eq!(workspace.len(), 4);
	for (a, b) in first.iter().zip(&second) {
		assert!(Arc::ptr_eq(a, b));
	}
}

#[test]
fn removal_by_path_and_folder() {
	let dir = tempfile::tempdir().unwrap();
	sample(dir.path());
	write(dir.path(), "web/admin/pom.xml", "<project><artifactId>admin</artifactId></project>");
	let workspace = Workspace::new();
	workspace.discover(dir.path(), &DiscoverySettings::default()).unwrap();
	assert_eq!(workspace.len(), 5);

	assert!(workspace.remove(&dir.path().join("core/../core/pom.xml")).is_some());
	assert!(workspace.remove(&dir.path().join("core/pom.xml")).is_none());
	assert_eq!(workspace.remove_all_under(&dir.path().join("web")), 2);
	assert_eq!(workspace.len(), 2);
}

#[test]
fn add_registers_unloadable_descriptors() {
	let workspace = Workspace::new();
	let project = workspace.add(Path::new("/nonexistent/pomsense/pom.xml"));

	assert!(project.declared().is_none());
	assert!(workspace.get(Path::new("/nonexistent/pomsense/pom.xml")).is_some());
	assert!(!workspace.is_empty());
}

#[test]
fn declared_parent_path_wins_over_module_link() {
	let workspace = Workspace::new();
	let declared = Arc::new(Project::new("/ws/pom.xml"));
	declared.parse_declared("<project/>").unwrap();
	let aggregator = Arc::new(Project::new("/ws/agg/pom.xml"));
	aggregator.parse_declared("<project/>").unwrap();
	let child = Arc::new(Project::new("/ws/child/pom.xml"));
	child
		.parse_declared("<project><parent><artifactId>p</artifactId></parent></project>")
		.unwrap();
	child.link_parent(aggregator.path());
	workspace.insert(Arc::clone(&declared));
	workspace.insert(aggregator);
	workspace.insert(Arc::clone(&child));

	assert!(Arc::ptr_eq(&workspace.parent_of(&child).unwrap(), &declared));
}
