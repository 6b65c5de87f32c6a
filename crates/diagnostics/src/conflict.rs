//! Conflict diagnostics for a descriptor.
//!
//! A conflict is a transitive dependency the build tool omitted because a
//! different version of the same artifact won. The diagnostic is anchored on
//! the direct dependency that pulled the loser in, since that declaration is
//! the one the user can act on.

use std::collections::HashMap;

use lsp_types::{
	CodeAction, CodeActionKind, Diagnostic, DiagnosticSeverity, NumberOrString, Uri, WorkspaceEdit,
};
use pomsense_config::DiagnosticsSettings;
use pomsense_dependency_tree::{DependencyForest, DependencyId};
use pomsense_markup::{MarkupError, MarkupTree};
use pomsense_primitives::{ArtifactKey, TextDocument};
use pomsense_project::Project;
use tracing::{debug, warn};

use crate::error::Result;
use crate::remediation::{EditStyle, resolve_conflict};
use crate::sink::DiagnosticsSink;

/// Diagnostic code of dependency conflicts.
pub const CONFLICT_CODE: &str = "Maven dependency conflict";

/// Source reported on every diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "pomsense";

/// Conflict nodes of `forest` in report order.
pub fn conflict_nodes(forest: &DependencyForest) -> Vec<DependencyId> {
	forest.conflicts().collect()
}

/// A conflict diagnostic with the coordinates it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictFinding {
	pub diagnostic: Diagnostic,
	pub node: DependencyId,
	/// Coordinates of the omitted dependency.
	pub key: ArtifactKey,
	pub version: String,
	/// Version the build tool selected instead.
	pub effective_version: String,
	/// Direct dependency that introduced the omitted one.
	pub root: ArtifactKey,
}

impl ConflictFinding {
	/// Title of the quick fix for this finding.
	pub fn action_title(&self) -> String {
		format!("Resolve conflict for {}", self.key)
	}

	/// Quick fix pinning the artifact to `chosen_version`.
	///
	/// `Ok(None)` when the chosen version is already in effect.
	pub fn resolve_action(
		&self,
		uri: Uri,
		document: &TextDocument,
		chosen_version: &str,
		style: &EditStyle,
	) -> Result<Option<CodeAction>> {
		let Some(edits) = resolve_conflict(
			document,
			&self.key.group_id,
			&self.key.artifact_id,
			&self.effective_version,
			chosen_version,
			style,
		)?
		else {
			return Ok(None);
		};

		Ok(Some(CodeAction {
			title: self.action_title(),
			kind: Some(CodeActionKind::QUICKFIX),
			diagnostics: Some(vec![self.diagnostic.clone()]),
			edit: Some(WorkspaceEdit {
				changes: Some(HashMap::from([(uri, edits.to_lsp(document))])),
				..WorkspaceEdit::default()
			}),
			is_preferred: Some(true),
			..CodeAction::default()
		}))
	}
}

/// Diagnostic for the conflict `node`, anchored on the declaration of its
/// root dependency.
///
/// `None` when the markup does not parse or the root is not declared.
pub fn diagnostic_for(
	document: &TextDocument,
	forest: &DependencyForest,
	node: DependencyId,
) -> Option<Diagnostic> {
	let tree = MarkupTree::parse(document.text()).ok()?;
	finding_in(document, &tree, forest, node).map(|finding| finding.diagnostic)
}

/// Every conflict finding of `forest` against `document`.
pub fn findings(
	document: &TextDocument,
	forest: &DependencyForest,
) -> std::result::Result<Vec<ConflictFinding>, MarkupError> {
	let tree = MarkupTree::parse(document.text())?;
	Ok(forest
		.conflicts()
		.filter_map(|node| finding_in(document, &tree, forest, node))
		.collect())
}

fn finding_in(
	document: &TextDocument,
	tree: &MarkupTree,
	forest: &DependencyForest,
	node: DependencyId,
) -> Option<ConflictFinding> {
	let dependency = forest.node(node);
	let root = forest.node(forest.root(node));
	let Some(declaration) = tree.find_dependency_element(root.group_id(), root.artifact_id()) else {
		warn!(
			path = %document.path().display(),
			dependency = %root.key(),
			"declaration of conflicting dependency not found"
		);
		return None;
	};

	let message = format!(
		"Dependency conflict in {}: {}:{}:{} conflict with {}",
		root.artifact_id(),
		dependency.group_id(),
		dependency.artifact_id(),
		dependency.version(),
		dependency.effective_version(),
	);
	let diagnostic = Diagnostic {
		range: document.range_of(declaration.element().range()),
		severity: Some(DiagnosticSeverity::WARNING),
		code: Some(NumberOrString::String(CONFLICT_CODE.to_string())),
		source: Some(DIAGNOSTIC_SOURCE.to_string()),
		message,
		..Diagnostic::default()
	};

	Some(ConflictFinding {
		diagnostic,
		node,
		key: dependency.key(),
		version: dependency.version().to_string(),
		effective_version: dependency.effective_version().to_string(),
		root: root.key(),
	})
}

/// What [`refresh`] did with the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
	/// This many diagnostics were published.
	Published(usize),
	/// Analysis is disabled; an empty set was published.
	Disabled,
	/// The descriptor did not parse; the sink was left untouched.
	Skipped,
}

/// Recomputes and publishes the conflict diagnostics of `document`.
///
/// Uses the project's last dependency tree; without one an empty set is
/// published.
pub fn refresh(
	document: &TextDocument,
	project: &Project,
	settings: &DiagnosticsSettings,
	sink: &dyn DiagnosticsSink,
) -> RefreshOutcome {
	let key = document.path();
	if !settings.conflicts {
		sink.set(key, Vec::new());
		return RefreshOutcome::Disabled;
	}

	let report = project.tree();
	let empty = DependencyForest::default();
	let forest = report.as_ref().map_or(&empty, |report| &report.forest);
	match findings(document, forest) {
		Ok(findings) => {
			let diagnostics: Vec<Diagnostic> =
				findings.into_iter().map(|finding| finding.diagnostic).collect();
			let count = diagnostics.len();
			sink.set(key, diagnostics);
			RefreshOutcome::Published(count)
		}
		Err(error) => {
			debug!(path = %key.display(), %error, "descriptor does not parse; keeping diagnostics");
			RefreshOutcome::Skipped
		}
	}
}

#[cfg(test)]
mod tests;
