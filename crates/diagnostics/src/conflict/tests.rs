use std::path::Path;

use lsp_types::{Position, Range};
use pretty_assertions::assert_eq;

use super::*;
use crate::sink::MemoryDiagnostics;

const POM: &str = "\
<project>
    <dependencies>
        <dependency>
            <groupId>A</groupId>
            <artifactId>B</artifactId>
            <version>1.0</version>
        </dependency>
        <dependency>
            <groupId>A</groupId>
            <artifactId>C</artifactId>
            <version>1.0</version>
        </dependency>
    </dependencies>
</project>
";

const REPORT: &str = "\
com.example:app:jar:1.0
+- A:B:jar:1.0:compile
|  \\- X:Y:jar:2.0:compile
\\- A:C:jar:1.0:compile
   \\- (X:Y:jar:1.0:compile - omitted for conflict with 2.0)
";

fn document(text: &str) -> TextDocument {
	TextDocument::new("/ws/pom.xml", text)
}

fn project_with_report() -> Project {
	let project = Project::new("/ws/pom.xml");
	project.parse_declared(POM).unwrap();
	project.apply_tree_report(REPORT.to_string()).unwrap();
	project
}

#[test]
fn conflict_is_reported_on_the_introducing_dependency() {
	let forest = pomsense_dependency_tree::parse(REPORT).unwrap();
	let nodes = conflict_nodes(&forest);
	assert_eq!(nodes.len(), 1);

	let diagnostic = diagnostic_for(&document(POM), &forest, nodes[0]).unwrap();
	assert_eq!(
		diagnostic.message,
		"Dependency conflict in C: X:Y:1.0 conflict with 2.0"
	);
	assert_eq!(
		diagnostic.range,
		Range::new(Position::new(7, 8), Position::new(11, 21))
	);
	assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::WARNING));
	assert_eq!(
		diagnostic.code,
		Some(NumberOrString::String(CONFLICT_CODE.to_string()))
	);
	assert_eq!(diagnostic.source.as_deref(), Some(DIAGNOSTIC_SOURCE));
}

#[test]
fn undeclared_root_yields_no_diagnostic() {
	let forest = pomsense_dependency_tree::parse(REPORT).unwrap();
	let node = conflict_nodes(&forest)[0];
	let text = "<project><dependencies><dependency><groupId>A</groupId><artifactId>B</artifactId></dependency></dependencies></project>";

	assert_eq!(diagnostic_for(&document(text), &forest, node), None);
	assert_eq!(findings(&document(text), &forest).unwrap(), Vec::new());
}

#[test]
fn findings_carry_coordinates() {
	let forest = pomsense_dependency_tree::parse(REPORT).unwrap();
	let found = findings(&document(POM), &forest).unwrap();

	assert_eq!(found.len(), 1);
	assert_eq!(found[0].key, ArtifactKey::new("X", "Y"));
	assert_eq!(found[0].root, ArtifactKey::new("A", "C"));
	assert_eq!(found[0].version, "1.0");
	assert_eq!(found[0].effective_version, "2.0");
	assert_eq!(found[0].action_title(), "Resolve conflict for X:Y");
}

#[test]
fn resolve_action_carries_the_edit() {
	let forest = pomsense_dependency_tree::parse(REPORT).unwrap();
	let doc = document(POM);
	let finding = findings(&doc, &forest).unwrap().remove(0);
	let uri: Uri = "file:///ws/pom.xml".parse().unwrap();

	let action = finding
		.resolve_action(uri.clone(), &doc, "1.0", &EditStyle::default())
		.unwrap()
		.unwrap();
	assert_eq!(action.title, "Resolve conflict for X:Y");
	assert_eq!(action.kind, Some(CodeActionKind::QUICKFIX));
	assert_eq!(action.is_preferred, Some(true));
	let changes = action.edit.unwrap().changes.unwrap();
	assert_eq!(changes[&uri].len(), 1);

	assert_eq!(
		finding.resolve_action(uri, &doc, "2.0", &EditStyle::default()),
		Ok(None)
	);
}

#[test]
fn refresh_publishes_replaces_and_keeps() {
	let project = project_with_report();
	let sink = MemoryDiagnostics::new();
	let settings = DiagnosticsSettings::default();
	let key = Path::new("/ws/pom.xml");

	assert_eq!(
		refresh(&document(POM), &project, &settings, &sink),
		RefreshOutcome::Published(1)
	);
	assert_eq!(sink.get(key).unwrap().len(), 1);

	assert_eq!(
		refresh(&document("<project><dependencies>"), &project, &settings, &sink),
		RefreshOutcome::Skipped
	);
	assert_eq!(sink.get(key).unwrap().len(), 1);

	let disabled = DiagnosticsSettings { conflicts: false };
	assert_eq!(
		refresh(&document(POM), &project, &disabled, &sink),
		RefreshOutcome::Disabled
	);
	assert_eq!(sink.get(key), Some(Vec::new()));
}

#[test]
fn refresh_without_report_publishes_nothing() {
	let project = Project::new("/ws/pom.xml");
	let sink = MemoryDiagnostics::new();

	assert_eq!(
		refresh(&document(POM), &project, &DiagnosticsSettings::default(), &sink),
		RefreshOutcome::Published(0)
	);
	assert_eq!(sink.get(Path::new("/ws/pom.xml")), Some(Vec::new()));
}
