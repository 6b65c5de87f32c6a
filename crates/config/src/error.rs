//! Error types for settings loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a settings file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or an unknown key.
	#[error("invalid settings{}: {error}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
	Toml {
		/// File the text came from, if any.
		path: Option<PathBuf>,
		/// The underlying parse error.
		error: toml::de::Error,
	},
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
