//! pomsense command line.
//!
//! Runs the dependency tree report for a descriptor and reports, resolves
//! or excludes version conflicts.

mod cli;
mod commands;
mod report;

use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Command};
use commands::CommandError;
use pomsense_config::Settings;
use pomsense_project::{BuildToolRunner, MavenRunner};
use report::SavedReportRunner;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let settings = match &cli.config {
		Some(path) => Settings::load(path)?,
		None => Settings::discover(&cli.command.workspace_root())?,
	};
	debug!(?settings, "settings loaded");

	let maven = MavenRunner::new(settings.maven.clone());
	let runner: Arc<dyn BuildToolRunner> = match &cli.report {
		Some(report) => Arc::new(SavedReportRunner::new(report, maven)),
		None => Arc::new(maven),
	};

	let output = match &cli.command {
		Command::Tree { pom } => commands::tree(pom, runner.as_ref()).await?,
		Command::Check { pom } => {
			let output = commands::check(pom, runner.as_ref()).await?;
			print!("{}", output.listing);
			if output.conflicts > 0 {
				return Err(CommandError::Conflicts {
					count: output.conflicts,
				}
				.into());
			}
			String::new()
		}
		Command::Resolve {
			pom,
			artifact,
			version,
			write,
		} => commands::resolve(pom, artifact, version, *write, &settings, runner.as_ref()).await?,
		Command::Exclude {
			pom,
			artifact,
			write,
		} => commands::exclude(pom, artifact, *write, &settings, runner.as_ref()).await?,
		Command::Projects { dir } => commands::projects(dir, &settings)?,
	};
	print!("{output}");

	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("POMSENSE_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("debug")
		} else {
			EnvFilter::new("info")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
