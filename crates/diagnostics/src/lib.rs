//! Dependency conflict diagnostics for Maven descriptors.
//!
//! Conflicts come from the project's dependency tree report and are anchored
//! on the declaring markup. Remediation produces edit sets that either pin
//! the artifact through dependency management or exclude it from the direct
//! dependency that pulls it in. Hover and definition lookups share the same
//! markup and project model.

mod conflict;
mod error;
mod navigation;
mod remediation;
mod session;
mod sink;

pub use conflict::{
	CONFLICT_CODE, ConflictFinding, DIAGNOSTIC_SOURCE, RefreshOutcome, conflict_nodes,
	diagnostic_for, findings, refresh,
};
pub use error::{RemediationError, Result};
pub use navigation::{DefinitionTarget, definition, hover};
pub use remediation::{EditStyle, exclude_dependency, resolve_conflict};
pub use session::DiagnosticsSession;
pub use sink::{DiagnosticsSink, EditSink, FileEdits, MemoryDiagnostics, MemoryEdits};
