//! Debounced diagnostics for open descriptors.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pomsense_config::{DiagnosticsSettings, SchedulerSettings};
use pomsense_primitives::TextDocument;
use pomsense_project::{BuildToolRunner, Project, Workspace};
use pomsense_scheduler::{DebounceScheduler, SchedulerConfig};
use tracing::{debug, warn};

use crate::conflict::{RefreshOutcome, refresh};
use crate::sink::DiagnosticsSink;

/// Ties document changes to tree regeneration and diagnostic publishing.
///
/// Every change re-parses the declared descriptor at once. Regenerating the
/// tree report is expensive, so it is debounced per descriptor.
pub struct DiagnosticsSession {
	workspace: Arc<Workspace>,
	runner: Arc<dyn BuildToolRunner>,
	sink: Arc<dyn DiagnosticsSink>,
	settings: DiagnosticsSettings,
	scheduler: DebounceScheduler<PathBuf>,
}

impl DiagnosticsSession {
	pub fn new(
		workspace: Arc<Workspace>,
		runner: Arc<dyn BuildToolRunner>,
		sink: Arc<dyn DiagnosticsSink>,
		settings: DiagnosticsSettings,
		scheduler: &SchedulerSettings,
	) -> Self {
		Self {
			workspace,
			runner,
			sink,
			settings,
			scheduler: DebounceScheduler::new(SchedulerConfig {
				floor: scheduler.floor(),
				growth_factor: scheduler.growth_factor,
				capacity: scheduler.capacity,
			}),
		}
	}

	pub fn workspace(&self) -> &Arc<Workspace> {
		&self.workspace
	}

	pub fn scheduler(&self) -> &DebounceScheduler<PathBuf> {
		&self.scheduler
	}

	/// Records a new snapshot of a descriptor and schedules its refresh.
	///
	/// A snapshot that does not parse schedules nothing and drops any
	/// pending refresh of an older one; published diagnostics stay.
	/// Must be called from within a tokio runtime.
	pub fn document_changed(&self, document: TextDocument) {
		let project = self.project_for(document.path());
		if let Err(error) = project.parse_declared(document.text()) {
			let cancelled = self.scheduler.cancel(&project.path().to_path_buf());
			debug!(%error, cancelled, "descriptor does not parse yet");
			return;
		}

		let runner = Arc::clone(&self.runner);
		let sink = Arc::clone(&self.sink);
		let settings = self.settings.clone();
		let key = project.path().to_path_buf();
		self.scheduler.schedule(key, move || async move {
			regenerate(&document, &project, runner.as_ref(), &settings, sink.as_ref()).await;
		});
	}

	/// Regenerates the tree and publishes diagnostics without debouncing.
	pub async fn refresh_now(&self, document: &TextDocument) -> RefreshOutcome {
		let project = self.project_for(document.path());
		if let Err(error) = project.parse_declared(document.text()) {
			debug!(%error, "descriptor does not parse yet");
		}
		regenerate(
			document,
			&project,
			self.runner.as_ref(),
			&self.settings,
			self.sink.as_ref(),
		)
		.await
	}

	/// Forgets pending work for a closed descriptor and clears its
	/// diagnostics.
	pub fn document_closed(&self, path: &Path) {
		self.scheduler.cancel(&pomsense_project::normalize(path));
		self.sink.set(path, Vec::new());
	}

	fn project_for(&self, path: &Path) -> Arc<Project> {
		if let Some(project) = self.workspace.get(path) {
			return project;
		}
		let project = Arc::new(Project::new(path));
		self.workspace.insert(Arc::clone(&project));
		project
	}
}

async fn regenerate(
	document: &TextDocument,
	project: &Project,
	runner: &dyn BuildToolRunner,
	settings: &DiagnosticsSettings,
	sink: &dyn DiagnosticsSink,
) -> RefreshOutcome {
	if settings.conflicts
		&& let Err(error) = project.refresh_dependency_tree(runner).await
	{
		warn!(path = %project.path().display(), %error, "dependency tree not refreshed");
	}
	refresh(document, project, settings, sink)
}
