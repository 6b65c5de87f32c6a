//! Artifact coordinates.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Identity of an artifact regardless of version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactKey {
	pub group_id: String,
	pub artifact_id: String,
}

impl ArtifactKey {
	pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
		Self {
			group_id: group_id.into(),
			artifact_id: artifact_id.into(),
		}
	}
}

impl fmt::Display for ArtifactKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.group_id, self.artifact_id)
	}
}

/// A `groupId:artifactId[:version]` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
	pub group_id: String,
	pub artifact_id: String,
	pub version: Option<String>,
}

impl Coordinate {
	pub fn new(
		group_id: impl Into<String>,
		artifact_id: impl Into<String>,
		version: Option<String>,
	) -> Self {
		Self {
			group_id: group_id.into(),
			artifact_id: artifact_id.into(),
			version,
		}
	}

	/// Version-less identity of this coordinate.
	pub fn key(&self) -> ArtifactKey {
		ArtifactKey::new(self.group_id.clone(), self.artifact_id.clone())
	}
}

impl fmt::Display for Coordinate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.group_id, self.artifact_id)?;
		if let Some(version) = &self.version {
			write!(f, ":{version}")?;
		}
		Ok(())
	}
}

/// Malformed coordinate text.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid coordinate `{0}`: expected groupId:artifactId[:version]")]
pub struct CoordinateError(pub String);

impl FromStr for Coordinate {
	type Err = CoordinateError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let parts: Vec<&str> = s.trim().split(':').collect();
		let invalid = || CoordinateError(s.to_string());
		if parts.iter().any(|part| part.is_empty()) {
			return Err(invalid());
		}
		match parts.as_slice() {
			[group, artifact] => Ok(Self::new(*group, *artifact, None)),
			[group, artifact, version] => Ok(Self::new(*group, *artifact, Some(version.to_string()))),
			_ => Err(invalid()),
		}
	}
}

impl FromStr for ArtifactKey {
	type Err = CoordinateError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let coordinate: Coordinate = s.parse()?;
		if coordinate.version.is_some() {
			return Err(CoordinateError(s.to_string()));
		}
		Ok(coordinate.key())
	}
}
