use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pomsense_primitives::ArtifactKey;

#[derive(Parser, Debug)]
#[command(name = "pomsense")]
#[command(about = "Dependency conflict analysis for Maven descriptors")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Settings file (defaults to pomsense.toml in the workspace root)
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Use a saved dependency tree report instead of running Maven
	#[arg(long, global = true, value_name = "FILE")]
	pub report: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Print the dependency tree with omission marks
	Tree {
		/// Project descriptor
		pom: PathBuf,
	},
	/// Report dependency conflicts
	Check {
		/// Project descriptor
		pom: PathBuf,
	},
	/// Pin an artifact through dependencyManagement
	Resolve {
		/// Project descriptor
		pom: PathBuf,
		/// Artifact as groupId:artifactId
		artifact: ArtifactKey,
		/// Version to pin
		version: String,
		/// Rewrite the descriptor instead of printing it
		#[arg(long)]
		write: bool,
	},
	/// Exclude a transitive artifact from the dependency that pulls it in
	Exclude {
		/// Project descriptor
		pom: PathBuf,
		/// Artifact as groupId:artifactId
		artifact: ArtifactKey,
		/// Rewrite the descriptor instead of printing it
		#[arg(long)]
		write: bool,
	},
	/// List the projects found under a directory
	Projects {
		/// Workspace root
		#[arg(default_value = ".")]
		dir: PathBuf,
	},
}

impl Command {
	/// Directory whose settings apply to this command.
	pub fn workspace_root(&self) -> PathBuf {
		match self {
			Self::Projects { dir } => dir.clone(),
			Self::Tree { pom }
			| Self::Check { pom }
			| Self::Resolve { pom, .. }
			| Self::Exclude { pom, .. } => pom
				.parent()
				.filter(|dir| !dir.as_os_str().is_empty())
				.map_or_else(|| PathBuf::from("."), PathBuf::from),
		}
	}
}
