//! Runner that serves a saved tree report.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pomsense_project::{BuildToolRunner, ProcessError};
use tracing::debug;

/// [`BuildToolRunner`] returning a report read from disk. Merged
/// descriptors still come from `fallback`.
pub struct SavedReportRunner<R> {
	report: PathBuf,
	fallback: R,
}

impl<R> SavedReportRunner<R> {
	pub fn new(report: impl Into<PathBuf>, fallback: R) -> Self {
		Self {
			report: report.into(),
			fallback,
		}
	}
}

#[async_trait]
impl<R: BuildToolRunner> BuildToolRunner for SavedReportRunner<R> {
	async fn tree_report(&self, descriptor: &Path) -> Result<String, ProcessError> {
		debug!(
			descriptor = %descriptor.display(),
			report = %self.report.display(),
			"using saved tree report"
		);
		Ok(tokio::fs::read_to_string(&self.report).await?)
	}

	async fn effective_merge(&self, descriptor: &Path) -> Result<String, ProcessError> {
		self.fallback.effective_merge(descriptor).await
	}
}
