//! Subcommand implementations. Each returns the text to print.

use std::error::Error;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use pomsense_config::Settings;
use pomsense_dependency_tree::DependencyForest;
use pomsense_diagnostics::{
	EditSink, EditStyle, FileEdits, exclude_dependency, findings, resolve_conflict,
};
use pomsense_primitives::{ArtifactKey, EditSet, TextDocument};
use pomsense_project::{BuildToolRunner, Project, Workspace, normalize};
use thiserror::Error;
use tracing::info;

pub type CommandResult = Result<String, Box<dyn Error>>;

/// Failures specific to the command line.
#[derive(Debug, Error)]
pub enum CommandError {
	/// The artifact does not appear in the dependency tree.
	#[error("{key} is not part of the dependency tree")]
	NotInTree {
		/// Artifact that was looked up.
		key: ArtifactKey,
	},

	/// The descriptor could not be rewritten.
	#[error("failed to apply edits to {}", path.display())]
	EditRejected {
		/// Descriptor that was edited.
		path: PathBuf,
	},

	/// `check` found conflicts.
	#[error("{count} dependency conflict(s) found")]
	Conflicts {
		/// Number of conflicts reported.
		count: usize,
	},
}

/// Loads and parses `pom`, then regenerates its tree report.
///
/// The project is keyed by the absolute descriptor path; the document keeps
/// the path as given.
async fn load(pom: &Path, runner: &dyn BuildToolRunner) -> Result<(TextDocument, Project), Box<dyn Error>> {
	let document = TextDocument::read(pom)?;
	let project = Project::new(normalize(&std::path::absolute(pom)?));
	project.parse_declared(document.text())?;
	project.refresh_dependency_tree(runner).await?;
	Ok((document, project))
}

fn forest(project: &Project) -> DependencyForest {
	project
		.tree()
		.map(|report| report.forest.clone())
		.unwrap_or_default()
}

/// `tree`: the forest, indented by depth, with omission marks.
pub async fn tree(pom: &Path, runner: &dyn BuildToolRunner) -> CommandResult {
	let (_, project) = load(pom, runner).await?;
	Ok(render_forest(&forest(&project)))
}

pub fn render_forest(forest: &DependencyForest) -> String {
	let mut out = String::new();
	if let Some(header) = forest.project() {
		let _ = writeln!(
			out,
			"{}:{}:{}",
			header.group_id, header.artifact_id, header.version
		);
	}
	for (_, node) in forest.iter() {
		let _ = write!(
			out,
			"{}{} ({})",
			"   ".repeat(node.depth() + 1),
			node.coordinate(),
			node.scope()
		);
		if let Some(omitted) = node.omitted() {
			let _ = write!(out, " [{omitted}]");
		}
		out.push('\n');
	}
	out
}

/// Result of `check`.
#[derive(Debug)]
pub struct CheckOutput {
	/// One `path:line:column: warning: message` line per conflict.
	pub listing: String,
	pub conflicts: usize,
}

/// `check`: lists the conflicts of `pom` against its declarations.
pub async fn check(pom: &Path, runner: &dyn BuildToolRunner) -> Result<CheckOutput, Box<dyn Error>> {
	let (document, project) = load(pom, runner).await?;
	let found = findings(&document, &forest(&project))?;

	let mut listing = String::new();
	for finding in &found {
		let start = finding.diagnostic.range.start;
		let _ = writeln!(
			listing,
			"{}:{}:{}: warning: {}",
			pom.display(),
			start.line + 1,
			start.character + 1,
			finding.diagnostic.message
		);
	}
	info!(path = %pom.display(), conflicts = found.len(), "check finished");
	Ok(CheckOutput {
		listing,
		conflicts: found.len(),
	})
}

/// `resolve`: pins `key` to `version` through dependency management.
pub async fn resolve(
	pom: &Path,
	key: &ArtifactKey,
	version: &str,
	write: bool,
	settings: &Settings,
	runner: &dyn BuildToolRunner,
) -> CommandResult {
	let (document, project) = load(pom, runner).await?;
	let effective = project
		.dependency_version(&key.group_id, &key.artifact_id)
		.ok_or_else(|| CommandError::NotInTree { key: key.clone() })?;

	let edits = resolve_conflict(
		&document,
		&key.group_id,
		&key.artifact_id,
		&effective,
		version,
		&EditStyle::from(&settings.edit),
	)?;
	match edits {
		Some(edits) => emit(&document, edits, write),
		None => {
			info!(%key, version, "version already in effect");
			Ok(String::new())
		}
	}
}

/// `exclude`: adds an exclusion for `key` to the direct dependency that
/// brings it in. Conflicting occurrences are preferred over other
/// transitive ones.
pub async fn exclude(
	pom: &Path,
	key: &ArtifactKey,
	write: bool,
	settings: &Settings,
	runner: &dyn BuildToolRunner,
) -> CommandResult {
	let (document, project) = load(pom, runner).await?;
	let forest = forest(&project);
	let nodes: Vec<_> = forest.find(&key.group_id, &key.artifact_id).collect();
	let node = nodes
		.iter()
		.copied()
		.find(|&id| forest.node(id).is_conflict())
		.or_else(|| nodes.iter().copied().find(|&id| forest.parent(id).is_some()))
		.or_else(|| nodes.first().copied())
		.ok_or_else(|| CommandError::NotInTree { key: key.clone() })?;

	match exclude_dependency(&document, &forest, node, &EditStyle::from(&settings.edit))? {
		Some(edits) => emit(&document, edits, write),
		None => {
			info!(%key, "already excluded");
			Ok(String::new())
		}
	}
}

/// Writes `edits` to disk or returns the edited text.
fn emit(document: &TextDocument, edits: EditSet, write: bool) -> CommandResult {
	if !write {
		return Ok(edits.apply_to(document.text())?);
	}
	let path = edits.path().to_path_buf();
	if !FileEdits.apply(edits) {
		return Err(CommandError::EditRejected { path }.into());
	}
	info!(path = %path.display(), "descriptor updated");
	Ok(String::new())
}

/// `projects`: one line per discovered project with its parent.
pub fn projects(dir: &Path, settings: &Settings) -> CommandResult {
	let dir = normalize(&std::path::absolute(dir)?);
	let workspace = Workspace::new();
	let found = workspace.discover(&dir, &settings.discovery)?;

	let mut out = String::new();
	for project in &found {
		let id = project.id(&workspace).unwrap_or_else(|| "<unparsed>".to_string());
		let relative = project.path().strip_prefix(&dir).unwrap_or(project.path());
		let _ = write!(out, "{id}\t{}", relative.display());
		if let Some(parent) = workspace.parent_of(project).and_then(|parent| parent.id(&workspace)) {
			let _ = write!(out, "\tparent={parent}");
		}
		out.push('\n');
	}
	Ok(out)
}
