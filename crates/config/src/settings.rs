//! Settings schema and loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Settings file looked up in the workspace root.
pub const WORKSPACE_FILE_NAME: &str = "pomsense.toml";

/// All pomsense settings.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Settings {
	pub diagnostics: DiagnosticsSettings,
	pub discovery: DiscoverySettings,
	pub maven: MavenSettings,
	pub scheduler: SchedulerSettings,
	pub edit: EditSettings,
}

/// Which analyses publish diagnostics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct DiagnosticsSettings {
	/// Report dependency version conflicts.
	pub conflicts: bool,
}

impl Default for DiagnosticsSettings {
	fn default() -> Self {
		Self { conflicts: true }
	}
}

/// Which files count as project descriptors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct DiscoverySettings {
	/// Glob matched against paths relative to the workspace root.
	pub pattern: String,
	/// Globs for paths never searched.
	pub exclude: Vec<String>,
}

impl Default for DiscoverySettings {
	fn default() -> Self {
		Self {
			pattern: "**/pom.xml".to_string(),
			exclude: vec![
				"**/target/**".to_string(),
				"**/node_modules/**".to_string(),
				"**/.git/**".to_string(),
			],
		}
	}
}

/// How the build tool is invoked.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct MavenSettings {
	/// Executable used when no wrapper applies.
	pub executable: String,
	/// Use `mvnw` next to the descriptor (or an ancestor) when present.
	pub prefer_wrapper: bool,
	/// Local repository root; defaults to `~/.m2/repository`.
	pub local_repository: Option<PathBuf>,
}

impl Default for MavenSettings {
	fn default() -> Self {
		Self {
			executable: "mvn".to_string(),
			prefer_wrapper: true,
			local_repository: None,
		}
	}
}

/// Adaptive debounce tuning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SchedulerSettings {
	/// Minimum delay in milliseconds.
	pub floor_ms: u64,
	/// Multiplier applied to the observed average runtime.
	pub growth_factor: f64,
	/// Number of keys whose runtime history is kept.
	pub capacity: usize,
}

impl SchedulerSettings {
	pub fn floor(&self) -> Duration {
		Duration::from_millis(self.floor_ms)
	}
}

impl Default for SchedulerSettings {
	fn default() -> Self {
		Self {
			floor_ms: 350,
			growth_factor: 1.3,
			capacity: 32,
		}
	}
}

/// Formatting of generated markup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct EditSettings {
	/// One level of indentation.
	pub indent: String,
	/// Line terminator for inserted lines.
	pub eol: String,
}

impl Default for EditSettings {
	fn default() -> Self {
		Self {
			indent: "    ".to_string(),
			eol: "\n".to_string(),
		}
	}
}

impl Settings {
	/// Parses settings from TOML text. Missing keys take their defaults.
	pub fn parse(text: &str) -> Result<Self> {
		toml::from_str(text).map_err(|error| ConfigError::Toml { path: None, error })
	}

	/// Reads and parses a settings file.
	pub fn load(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		toml::from_str(&text).map_err(|error| ConfigError::Toml {
			path: Some(path.to_path_buf()),
			error,
		})
	}

	/// Loads the first settings file found for `workspace_root`.
	///
	/// Falls back to defaults when no file exists. A file that exists but
	/// fails to parse is an error.
	pub fn discover(workspace_root: &Path) -> Result<Self> {
		let candidates = std::iter::once(workspace_root.join(WORKSPACE_FILE_NAME))
			.chain(user_config_path());
		for candidate in candidates {
			if candidate.is_file() {
				debug!(path = %candidate.display(), "loading settings");
				return Self::load(&candidate);
			}
		}
		debug!("no settings file found, using defaults");
		Ok(Self::default())
	}
}

/// User-level settings file: `$XDG_CONFIG_HOME/pomsense/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
	std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.or_else(dirs::config_dir)
		.map(|dir| dir.join("pomsense").join("config.toml"))
}

#[cfg(test)]
mod tests;
