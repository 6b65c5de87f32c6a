//! Tree report parsing.
//!
//! A report lists one artifact per line. Nesting is encoded by a prefix of
//! connector glyphs three columns wide per level:
//!
//! ```text
//! com.example:app:jar:1.0
//! +- org.a:b:jar:1.0:compile
//! |  \- org.x:y:jar:2.0:compile
//! \- org.a:c:jar:1.0:compile
//!    \- (org.x:y:jar:1.0:compile - omitted for conflict with 2.0)
//! ```

use tracing::debug;

use crate::error::{Result, TreeParseError};
use crate::forest::{Dependency, DependencyForest, DependencyId, OmissionStatus, Omitted, ProjectHeader};

const CONNECTOR_GLYPHS: &[char] = &['+', '-', '\\', '|', ' '];
const LOG_PREFIX: &str = "[INFO] ";

/// Parses a tree report into a forest.
///
/// Blank lines are skipped and a leading `[INFO] ` log prefix is tolerated.
/// Any line that cannot be read aborts the whole parse.
pub fn parse(report: &str) -> Result<DependencyForest> {
	let mut forest = DependencyForest::default();
	// stack[i] is the open node at depth i below the roots.
	let mut stack: Vec<DependencyId> = Vec::new();
	let mut root_level = 0;
	let mut seen_line = false;

	for (idx, raw) in report.lines().enumerate() {
		let line_no = idx + 1;
		let line = raw.strip_prefix(LOG_PREFIX).unwrap_or(raw).trim_end();
		if line.trim().is_empty() {
			continue;
		}

		let body = line.trim_start_matches(CONNECTOR_GLYPHS);
		let width = line.len() - body.len();
		if width % 3 != 0 {
			return Err(TreeParseError::Indentation {
				line: line_no,
				width,
			});
		}
		let level = width / 3;
		let first = !seen_line;
		seen_line = true;

		if level == 0
			&& let Some(header) = parse_header(body)
		{
			if !first {
				return Err(TreeParseError::MisplacedHeader { line: line_no });
			}
			forest.project = Some(header);
			root_level = 1;
			continue;
		}

		if level < root_level {
			return Err(TreeParseError::MisplacedHeader { line: line_no });
		}
		let depth = level - root_level;
		if depth > stack.len() {
			return Err(TreeParseError::Orphan {
				line: line_no,
				depth,
			});
		}
		stack.truncate(depth);

		let entry = parse_entry(body, line_no)?;
		let id = DependencyId(forest.nodes.len() as u32);
		let parent = stack.last().copied();
		let root = match parent {
			Some(parent) => forest.nodes[parent.index()].root,
			None => id,
		};
		forest.nodes.push(Dependency {
			group_id: entry.group_id,
			artifact_id: entry.artifact_id,
			packaging: entry.packaging,
			classifier: entry.classifier,
			version: entry.version,
			scope: entry.scope,
			optional: entry.optional,
			omitted: entry.omitted,
			parent,
			root,
			children: Vec::new(),
			depth,
			line: line_no,
		});
		match parent {
			Some(parent) => forest.nodes[parent.index()].children.push(id),
			None => forest.roots.push(id),
		}
		stack.push(id);
	}

	debug!(
		nodes = forest.nodes.len(),
		roots = forest.roots.len(),
		conflicts = forest.conflicts().count(),
		"parsed dependency tree report"
	);
	Ok(forest)
}

/// `groupId:artifactId:packaging:version` with no scope and no annotation.
fn parse_header(body: &str) -> Option<ProjectHeader> {
	if body.contains(char::is_whitespace) || body.split(':').any(str::is_empty) {
		return None;
	}
	match body.split(':').collect::<Vec<_>>().as_slice() {
		[group, artifact, packaging, version] => Some(ProjectHeader {
			group_id: group.to_string(),
			artifact_id: artifact.to_string(),
			packaging: packaging.to_string(),
			version: version.to_string(),
		}),
		_ => None,
	}
}

struct Entry {
	group_id: String,
	artifact_id: String,
	packaging: String,
	classifier: Option<String>,
	version: String,
	scope: String,
	optional: bool,
	omitted: Option<Omitted>,
}

/// Parses `coord`, `(coord - notes)`, `coord - notes` or `coord (notes)`.
fn parse_entry(body: &str, line: usize) -> Result<Entry> {
	let body = body.trim();
	let body = body
		.strip_prefix('(')
		.and_then(|inner| inner.strip_suffix(')'))
		.unwrap_or(body);

	let (coordinate, notes) = match body.split_once(char::is_whitespace) {
		Some((coordinate, notes)) => (coordinate, notes),
		None => (body, ""),
	};
	let invalid = || TreeParseError::Coordinate {
		line,
		text: coordinate.to_string(),
	};

	let tokens: Vec<&str> = coordinate.split(':').collect();
	if tokens.iter().any(|token| token.is_empty()) {
		return Err(invalid());
	}
	let (group, artifact, packaging, classifier, version, scope) = match tokens.as_slice() {
		[g, a, t, v, s] => (*g, *a, *t, None, *v, *s),
		[g, a, t, c, v, s] => (*g, *a, *t, Some(*c), *v, *s),
		_ => return Err(invalid()),
	};

	let mut status = None;
	let mut effective = None;
	let mut optional = false;
	for clause in clauses(notes) {
		if let Some(rest) = clause.strip_prefix("omitted for conflict") {
			status = Some(OmissionStatus::Conflict);
			if let Some(version) = rest.trim().strip_prefix("with ") {
				effective = Some(version.trim().to_string());
			}
		} else if clause.starts_with("omitted for duplicate") {
			status = Some(OmissionStatus::Duplicate);
		} else if clause.starts_with("omitted for cycle") {
			status = Some(OmissionStatus::Cycle);
		} else if let Some(version) = clause.strip_prefix("effective version ") {
			effective = Some(version.trim().to_string());
		} else if clause == "optional" {
			optional = true;
		}
	}

	let omitted = match status {
		Some(OmissionStatus::Conflict) => Some(Omitted {
			status: OmissionStatus::Conflict,
			effective_version: effective
				.ok_or(TreeParseError::MissingEffectiveVersion { line })?,
		}),
		Some(status) => Some(Omitted {
			status,
			effective_version: effective.unwrap_or_else(|| version.to_string()),
		}),
		None => None,
	};

	Ok(Entry {
		group_id: group.to_string(),
		artifact_id: artifact.to_string(),
		packaging: packaging.to_string(),
		classifier: classifier.map(str::to_string),
		version: version.to_string(),
		scope: scope.to_string(),
		optional,
		omitted,
	})
}

/// Splits annotation text into trimmed clauses.
///
/// Clauses are separated by `;` or ` - ` and may be wrapped in parentheses.
fn clauses(notes: &str) -> impl Iterator<Item = &str> {
	notes
		.split(';')
		.flat_map(|part| part.split(" - "))
		.map(|clause| {
			clause
				.trim()
				.trim_start_matches('-')
				.trim_matches(|c: char| c == '(' || c == ')' || c.is_whitespace())
		})
		.filter(|clause| !clause.is_empty())
}

#[cfg(test)]
mod tests;
