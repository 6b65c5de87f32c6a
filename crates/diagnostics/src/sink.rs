//! Destinations for published diagnostics and computed edits.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lsp_types::Diagnostic;
use parking_lot::Mutex;
use pomsense_primitives::EditSet;
use tracing::{debug, warn};

/// Receives the full diagnostic set of one descriptor.
pub trait DiagnosticsSink: Send + Sync {
	/// Replaces every diagnostic previously published for `key`.
	fn set(&self, key: &Path, diagnostics: Vec<Diagnostic>);
}

/// Applies edit sets to descriptors.
pub trait EditSink: Send + Sync {
	/// Applies every edit in `edits` or none of them. Returns true on success.
	fn apply(&self, edits: EditSet) -> bool;
}

/// Diagnostics kept in memory, keyed by descriptor path.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
	published: Mutex<HashMap<PathBuf, Vec<Diagnostic>>>,
}

impl MemoryDiagnostics {
	pub fn new() -> Self {
		Self::default()
	}

	/// Diagnostics last published for `key`; `None` if never published.
	pub fn get(&self, key: &Path) -> Option<Vec<Diagnostic>> {
		self.published.lock().get(key).cloned()
	}

	pub fn keys(&self) -> Vec<PathBuf> {
		let mut keys: Vec<PathBuf> = self.published.lock().keys().cloned().collect();
		keys.sort();
		keys
	}
}

impl DiagnosticsSink for MemoryDiagnostics {
	fn set(&self, key: &Path, diagnostics: Vec<Diagnostic>) {
		debug!(path = %key.display(), count = diagnostics.len(), "publishing diagnostics");
		self.published.lock().insert(key.to_path_buf(), diagnostics);
	}
}

/// Open documents held in memory; edits rewrite the stored text.
#[derive(Debug, Default)]
pub struct MemoryEdits {
	documents: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryEdits {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn open(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
		self.documents.lock().insert(path.into(), text.into());
	}

	pub fn text(&self, path: &Path) -> Option<String> {
		self.documents.lock().get(path).cloned()
	}
}

impl EditSink for MemoryEdits {
	fn apply(&self, edits: EditSet) -> bool {
		let mut documents = self.documents.lock();
		let Some(text) = documents.get_mut(edits.path()) else {
			warn!(path = %edits.path().display(), "edit target is not open");
			return false;
		};
		match edits.apply_to(text) {
			Ok(updated) => {
				*text = updated;
				true
			}
			Err(error) => {
				warn!(path = %edits.path().display(), %error, "rejected edit set");
				false
			}
		}
	}
}

/// Applies edits to descriptors on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileEdits;

impl EditSink for FileEdits {
	fn apply(&self, edits: EditSet) -> bool {
		let path = edits.path();
		let text = match std::fs::read_to_string(path) {
			Ok(text) => text,
			Err(error) => {
				warn!(path = %path.display(), %error, "failed to read edit target");
				return false;
			}
		};
		let updated = match edits.apply_to(&text) {
			Ok(updated) => updated,
			Err(error) => {
				warn!(path = %path.display(), %error, "rejected edit set");
				return false;
			}
		};
		if let Err(error) = std::fs::write(path, updated) {
			warn!(path = %path.display(), %error, "failed to write edit target");
			return false;
		}
		debug!(path = %path.display(), edits = edits.len(), "applied edits");
		true
	}
}
