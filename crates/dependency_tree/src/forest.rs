//! Arena forest of resolved dependencies.

use std::fmt;

use pomsense_primitives::{ArtifactKey, Coordinate};

/// Index of a node inside a [`DependencyForest`].
///
/// Ids are only meaningful within the forest that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyId(pub(crate) u32);

impl DependencyId {
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

/// Why the build tool left a node out of the resolved graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OmissionStatus {
	/// Another version of the same artifact won mediation.
	Conflict,
	/// The same version is already present elsewhere.
	Duplicate,
	/// Including the node would create a cycle.
	Cycle,
}

impl OmissionStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Conflict => "conflict",
			Self::Duplicate => "duplicate",
			Self::Cycle => "cycle",
		}
	}
}

/// Omission annotation of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Omitted {
	pub status: OmissionStatus,
	/// Version actually selected for this artifact.
	pub effective_version: String,
}

impl fmt::Display for Omitted {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.status {
			OmissionStatus::Conflict => {
				write!(f, "omitted for conflict with {}", self.effective_version)
			}
			status => write!(f, "omitted for {}", status.as_str()),
		}
	}
}

/// Header line naming the project a report belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectHeader {
	pub group_id: String,
	pub artifact_id: String,
	pub packaging: String,
	pub version: String,
}

/// One resolved (or omitted) dependency in a tree report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
	pub(crate) group_id: String,
	pub(crate) artifact_id: String,
	pub(crate) packaging: String,
	pub(crate) classifier: Option<String>,
	pub(crate) version: String,
	pub(crate) scope: String,
	pub(crate) optional: bool,
	pub(crate) omitted: Option<Omitted>,
	pub(crate) parent: Option<DependencyId>,
	pub(crate) root: DependencyId,
	pub(crate) children: Vec<DependencyId>,
	pub(crate) depth: usize,
	pub(crate) line: usize,
}

impl Dependency {
	pub fn group_id(&self) -> &str {
		&self.group_id
	}

	pub fn artifact_id(&self) -> &str {
		&self.artifact_id
	}

	/// Artifact type (`jar`, `pom`, ...).
	pub fn packaging(&self) -> &str {
		&self.packaging
	}

	pub fn classifier(&self) -> Option<&str> {
		self.classifier.as_deref()
	}

	/// Version requested along this path.
	pub fn version(&self) -> &str {
		&self.version
	}

	pub fn scope(&self) -> &str {
		&self.scope
	}

	pub fn is_optional(&self) -> bool {
		self.optional
	}

	pub fn omitted(&self) -> Option<&Omitted> {
		self.omitted.as_ref()
	}

	/// Returns true if this node lost version mediation.
	pub fn is_conflict(&self) -> bool {
		self.omitted
			.as_ref()
			.is_some_and(|omitted| omitted.status == OmissionStatus::Conflict)
	}

	/// Version in effect for this artifact: the winner when omitted, else
	/// the node's own version.
	pub fn effective_version(&self) -> &str {
		self.omitted
			.as_ref()
			.map_or(self.version.as_str(), |omitted| omitted.effective_version.as_str())
	}

	/// Nesting depth below the roots (roots are at 0).
	pub fn depth(&self) -> usize {
		self.depth
	}

	/// 1-based line of the report that declared this node.
	pub fn line(&self) -> usize {
		self.line
	}

	pub fn key(&self) -> ArtifactKey {
		ArtifactKey::new(self.group_id.clone(), self.artifact_id.clone())
	}

	pub fn coordinate(&self) -> Coordinate {
		Coordinate::new(
			self.group_id.clone(),
			self.artifact_id.clone(),
			Some(self.version.clone()),
		)
	}

	pub fn matches(&self, group_id: &str, artifact_id: &str) -> bool {
		self.group_id == group_id && self.artifact_id == artifact_id
	}
}

/// Forest of dependency trees parsed from one report.
///
/// Each root is a direct dependency of the project; every other node was
/// pulled in transitively by its root. The forest is immutable and is
/// replaced wholesale when the report is regenerated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DependencyForest {
	pub(crate) project: Option<ProjectHeader>,
	pub(crate) nodes: Vec<Dependency>,
	pub(crate) roots: Vec<DependencyId>,
}

impl DependencyForest {
	/// Project header of the report, if it had one.
	pub fn project(&self) -> Option<&ProjectHeader> {
		self.project.as_ref()
	}

	pub fn roots(&self) -> &[DependencyId] {
		&self.roots
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn get(&self, id: DependencyId) -> Option<&Dependency> {
		self.nodes.get(id.index())
	}

	/// Node by id.
	///
	/// # Panics
	///
	/// Panics if `id` belongs to another forest.
	pub fn node(&self, id: DependencyId) -> &Dependency {
		&self.nodes[id.index()]
	}

	pub fn parent(&self, id: DependencyId) -> Option<DependencyId> {
		self.node(id).parent
	}

	/// Direct dependency that introduced `id` (itself for roots).
	pub fn root(&self, id: DependencyId) -> DependencyId {
		self.node(id).root
	}

	pub fn children(&self, id: DependencyId) -> &[DependencyId] {
		&self.node(id).children
	}

	pub fn depth(&self, id: DependencyId) -> usize {
		self.node(id).depth
	}

	/// Parents of `id` from the nearest up to its root.
	pub fn ancestors(&self, id: DependencyId) -> impl Iterator<Item = DependencyId> + '_ {
		std::iter::successors(self.parent(id), |&id| self.parent(id))
	}

	/// All nodes in report order.
	pub fn iter(&self) -> impl Iterator<Item = (DependencyId, &Dependency)> + '_ {
		self.nodes
			.iter()
			.enumerate()
			.map(|(idx, node)| (DependencyId(idx as u32), node))
	}

	/// Nodes omitted for a version conflict, in report order.
	pub fn conflicts(&self) -> impl Iterator<Item = DependencyId> + '_ {
		self.iter()
			.filter(|(_, node)| node.is_conflict())
			.map(|(id, _)| id)
	}

	/// Every node for `group_id:artifact_id`, in report order.
	pub fn find<'a>(
		&'a self,
		group_id: &'a str,
		artifact_id: &'a str,
	) -> impl Iterator<Item = DependencyId> + 'a {
		self.iter()
			.filter(move |(_, node)| node.matches(group_id, artifact_id))
			.map(|(id, _)| id)
	}
}

#[cfg(test)]
mod tests;
