//! Error types for remediation edits.

use pomsense_markup::MarkupError;
use pomsense_primitives::ArtifactKey;
use thiserror::Error;

/// Why a remediation edit could not be computed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemediationError {
	/// The descriptor text is not well-formed markup.
	#[error(transparent)]
	Markup(#[from] MarkupError),

	/// Edits are only computed for descriptors with one `<project>` element.
	#[error("expected exactly one <project> element, found {count}")]
	ProjectCount {
		/// Number of `<project>` elements found.
		count: usize,
	},

	/// No direct dependency declares the coordinates.
	#[error("no direct dependency declares {key}")]
	NotDeclared {
		/// Coordinates that were looked up.
		key: ArtifactKey,
	},

	/// Direct dependencies cannot exclude themselves.
	#[error("{key} is declared directly and cannot be excluded")]
	DirectDependency {
		/// Coordinates of the declared dependency.
		key: ArtifactKey,
	},
}

pub type Result<T, E = RemediationError> = std::result::Result<T, E>;
