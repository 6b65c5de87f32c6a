//! Error types for the project model.

use std::path::PathBuf;

use pomsense_dependency_tree::TreeParseError;
use pomsense_markup::MarkupError;
use thiserror::Error;

/// Why a descriptor or report could not be understood.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
	/// Malformed markup.
	#[error(transparent)]
	Markup(#[from] MarkupError),

	/// Well-formed markup whose root is not a project.
	#[error("root element is <{root}>, expected <project>")]
	NotAProject {
		/// Name of the actual root element.
		root: String,
	},

	/// Unreadable dependency tree report.
	#[error(transparent)]
	Report(#[from] TreeParseError),
}

/// Failure to run the build tool or collect its output.
#[derive(Debug, Error)]
pub enum ProcessError {
	/// The executable could not be started.
	#[error("failed to start {program}: {error}")]
	Spawn {
		/// Program that failed to start.
		program: String,
		/// The underlying I/O error.
		#[source]
		error: std::io::Error,
	},

	/// The build tool exited unsuccessfully.
	#[error("build tool exited with {}: {stderr}", status.map_or_else(|| "a signal".to_string(), |code| format!("status {code}")))]
	Failed {
		/// Exit code, `None` when terminated by a signal.
		status: Option<i32>,
		/// Captured standard error.
		stderr: String,
	},

	/// The output file could not be prepared or read.
	#[error("build tool output unavailable: {0}")]
	Io(#[from] std::io::Error),
}

/// Errors raised by [`crate::Project`] operations.
#[derive(Debug, Error)]
pub enum ProjectError {
	/// The descriptor could not be read from disk.
	#[error("failed to read {}: {error}", path.display())]
	Io {
		/// Descriptor path.
		path: PathBuf,
		/// The underlying I/O error.
		#[source]
		error: std::io::Error,
	},

	/// A descriptor, merged descriptor or report failed to parse.
	#[error("failed to parse {}: {source}", path.display())]
	Parse {
		/// Descriptor path.
		path: PathBuf,
		/// What went wrong.
		source: ParseError,
	},

	/// The build tool failed.
	#[error("build tool failed for {}: {source}", path.display())]
	Process {
		/// Descriptor path.
		path: PathBuf,
		/// What went wrong.
		source: ProcessError,
	},

	/// The merged view was requested before the descriptor parsed.
	#[error("{} has not been parsed", path.display())]
	NotParsed {
		/// Descriptor path.
		path: PathBuf,
	},
}

/// Result type for project operations.
pub type Result<T, E = ProjectError> = std::result::Result<T, E>;
