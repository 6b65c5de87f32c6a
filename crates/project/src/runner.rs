//! Build-tool invocation.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use pomsense_config::MavenSettings;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::ProcessError;

/// Runs the build tool for a descriptor and returns its textual output.
#[async_trait]
pub trait BuildToolRunner: Send + Sync {
	/// Verbose dependency tree report for `descriptor`.
	async fn tree_report(&self, descriptor: &Path) -> Result<String, ProcessError>;

	/// Merged (effective) descriptor for `descriptor`.
	async fn effective_merge(&self, descriptor: &Path) -> Result<String, ProcessError>;
}

/// Names of the wrapper script, most specific first.
#[cfg(windows)]
const WRAPPER_NAMES: &[&str] = &["mvnw.cmd", "mvnw"];
#[cfg(not(windows))]
const WRAPPER_NAMES: &[&str] = &["mvnw"];

/// [`BuildToolRunner`] that spawns Maven.
///
/// Each goal writes its result to a file in a private temporary directory,
/// which is read back once the process exits successfully.
#[derive(Debug, Clone)]
pub struct MavenRunner {
	settings: MavenSettings,
}

impl MavenRunner {
	pub fn new(settings: MavenSettings) -> Self {
		Self { settings }
	}

	/// Program used for `descriptor`.
	///
	/// With wrappers preferred, the nearest `mvnw` in the descriptor's
	/// directory or an ancestor wins over the configured executable.
	pub fn program_for(&self, descriptor: &Path) -> PathBuf {
		if self.settings.prefer_wrapper
			&& let Some(wrapper) = find_wrapper(descriptor)
		{
			return wrapper;
		}
		PathBuf::from(&self.settings.executable)
	}

	/// Arguments for running `goal` against `descriptor`. The build tool
	/// runs in the descriptor's directory, so `descriptor` must be absolute.
	pub fn goal_args(goal: &[&str], output_flag: &str, output: &Path, descriptor: &Path) -> Vec<String> {
		let mut args: Vec<String> = goal.iter().map(|arg| arg.to_string()).collect();
		args.push(format!("{output_flag}={}", output.display()));
		args.push("-f".to_string());
		args.push(descriptor.display().to_string());
		args
	}

	async fn run_goal(
		&self,
		descriptor: &Path,
		goal: &[&str],
		output_flag: &str,
	) -> Result<String, ProcessError> {
		let descriptor = std::path::absolute(descriptor)?;
		let scratch = tempfile::Builder::new().prefix("pomsense-").tempdir()?;
		let output = scratch.path().join("output.txt");
		let program = self.program_for(&descriptor);
		let args = Self::goal_args(goal, output_flag, &output, &descriptor);

		let mut cmd = Command::new(&program);
		cmd.args(&args)
			.stdin(Stdio::null())
			.stdout(Stdio::null())
			.stderr(Stdio::piped())
			.kill_on_drop(true);
		if let Some(dir) = descriptor.parent()
			&& !dir.as_os_str().is_empty()
		{
			cmd.current_dir(dir);
		}

		debug!(program = %program.display(), ?args, "running build tool");
		let result = cmd.output().await.map_err(|error| ProcessError::Spawn {
			program: program.display().to_string(),
			error,
		})?;

		if !result.status.success() {
			let stderr = String::from_utf8_lossy(&result.stderr).into_owned();
			warn!(
				descriptor = %descriptor.display(),
				status = ?result.status.code(),
				"build tool failed"
			);
			return Err(ProcessError::Failed {
				status: result.status.code(),
				stderr,
			});
		}

		Ok(tokio::fs::read_to_string(&output).await?)
	}
}

#[async_trait]
impl BuildToolRunner for MavenRunner {
	async fn tree_report(&self, descriptor: &Path) -> Result<String, ProcessError> {
		self.run_goal(descriptor, &["dependency:tree", "-Dverbose"], "-DoutputFile")
			.await
	}

	async fn effective_merge(&self, descriptor: &Path) -> Result<String, ProcessError> {
		self.run_goal(descriptor, &["help:effective-pom"], "-Doutput")
			.await
	}
}

fn find_wrapper(descriptor: &Path) -> Option<PathBuf> {
	descriptor
		.parent()?
		.ancestors()
		.flat_map(|dir| WRAPPER_NAMES.iter().map(move |name| dir.join(name)))
		.find(|candidate| candidate.is_file())
}
