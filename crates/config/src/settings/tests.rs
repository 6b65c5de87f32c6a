use pretty_assertions::assert_eq;

use super::*;

#[test]
fn empty_text_yields_defaults() {
	let settings = Settings::parse("").unwrap();

	assert_eq!(settings, Settings::default());
	assert!(settings.diagnostics.conflicts);
	assert_eq!(settings.discovery.pattern, "**/pom.xml");
	assert_eq!(settings.maven.executable, "mvn");
	assert_eq!(settings.scheduler.floor(), Duration::from_millis(350));
	assert_eq!(settings.scheduler.capacity, 32);
	assert_eq!(settings.edit.indent, "    ");
}

#[test]
fn partial_sections_keep_other_defaults() {
	let settings = Settings::parse(
		r#"
[diagnostics]
conflicts = false

[maven]
prefer-wrapper = false
local-repository = "/opt/m2"

[scheduler]
growth-factor = 2.0
"#,
	)
	.unwrap();

	assert!(!settings.diagnostics.conflicts);
	assert!(!settings.maven.prefer_wrapper);
	assert_eq!(settings.maven.executable, "mvn");
	assert_eq!(settings.maven.local_repository, Some(PathBuf::from("/opt/m2")));
	assert_eq!(settings.scheduler.growth_factor, 2.0);
	assert_eq!(settings.scheduler.floor_ms, 350);
}

#[test]
fn unknown_keys_are_rejected() {
	let err = Settings::parse("[scheduler]\nfloor = 10\n").unwrap_err();
	assert!(matches!(err, ConfigError::Toml { path: None, .. }));
}

#[test]
fn discover_prefers_workspace_file() {
	let dir = tempfile::tempdir().unwrap();
	std::fs::write(
		dir.path().join(WORKSPACE_FILE_NAME),
		"[edit]\nindent = \"\\t\"\n",
	)
	.unwrap();

	let settings = Settings::discover(dir.path()).unwrap();
	assert_eq!(settings.edit.indent, "\t");
}

#[test]
fn load_reports_path_on_failure() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("broken.toml");
	std::fs::write(&path, "[edit\n").unwrap();

	match Settings::load(&path).unwrap_err() {
		ConfigError::Toml { path: Some(p), .. } => assert_eq!(p, path),
		other => panic!("unexpected error: {other}"),
	}
	assert!(matches!(
		Settings::load(&dir.path().join("missing.toml")),
		Err(ConfigError::Io { .. })
	));
}
