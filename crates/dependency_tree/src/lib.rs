//! Parser for dependency tree reports.
//!
//! [`parse`] turns the indentation-encoded listing printed by the build
//! tool's dependency report into a [`DependencyForest`]: one tree per direct
//! dependency, with every node annotated with the omission status the build
//! tool reported for it.

mod error;
mod forest;
mod parse;
mod version;

pub use error::{Result, TreeParseError};
pub use forest::{
	Dependency, DependencyForest, DependencyId, OmissionStatus, Omitted, ProjectHeader,
};
pub use parse::parse;
pub use version::compare_versions;
