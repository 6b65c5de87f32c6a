//! Project model for build descriptors.
//!
//! A [`Project`] wraps one descriptor file and the state derived from it:
//! the declared descriptor, the merged descriptor computed by the build tool
//! and the last dependency tree report. A [`Workspace`] keys projects by
//! descriptor path and resolves values inherited along parent chains.

mod descriptor;
mod error;
mod paths;
mod project;
mod repository;
mod runner;
mod workspace;

pub use descriptor::{DeclaredDependency, DeclaredPlugin, Descriptor, ParentRef, RelativePath};
pub use error::{ParseError, ProcessError, ProjectError, Result};
pub use paths::{DESCRIPTOR_FILE_NAME, descriptor_in, normalize};
pub use project::{Effective, Project, TreeReport};
pub use repository::LocalRepository;
pub use runner::{BuildToolRunner, MavenRunner};
pub use workspace::{Lineage, PatternError, Workspace, find_descriptors};
