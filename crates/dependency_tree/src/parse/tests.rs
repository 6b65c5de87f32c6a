use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

const REPORT: &str = "\
com.example:app:jar:1.0
+- A:B:jar:1.0:compile
|  \\- X:Y:jar:2.0:compile
\\- A:C:jar:1.0:compile
   \\- (X:Y:jar:1.0:compile - omitted for conflict with 2.0)
";

#[test]
fn conflict_example() {
	let forest = parse(REPORT).unwrap();

	let header = forest.project().unwrap();
	assert_eq!(header.artifact_id, "app");
	assert_eq!(forest.roots().len(), 2);
	assert_eq!(forest.len(), 4);

	let conflicts: Vec<_> = forest.conflicts().collect();
	assert_eq!(conflicts.len(), 1);
	let node = forest.node(conflicts[0]);
	assert_eq!(node.version(), "1.0");
	assert_eq!(node.effective_version(), "2.0");
	assert_eq!(node.line(), 5);
	assert_eq!(node.omitted().unwrap().to_string(), "omitted for conflict with 2.0");

	let root = forest.node(forest.root(conflicts[0]));
	assert_eq!((root.group_id(), root.artifact_id()), ("A", "C"));
	assert_eq!(forest.depth(conflicts[0]), 1);
}

#[test]
fn report_without_header_roots_at_depth_zero() {
	let report = "A:B:jar:1.0:compile\n\\- X:Y:jar:2.0:runtime\nA:C:jar:1.0:test\n";
	let forest = parse(report).unwrap();

	assert_eq!(forest.project(), None);
	assert_eq!(forest.roots().len(), 2);
	let child = forest.children(forest.roots()[0])[0];
	assert_eq!(forest.node(child).scope(), "runtime");
	assert_eq!(forest.parent(child), Some(forest.roots()[0]));
}

#[test]
fn headerless_conflict_child_keeps_its_effective_version() {
	let report = "A:B:jar:1.0:compile\n\\- A:C:jar:2.0:compile (omitted for conflict; effective version 3.0)\n";
	let forest = parse(report).unwrap();

	assert_eq!(forest.project(), None);
	assert_eq!(forest.roots().len(), 1);
	let root = forest.roots()[0];
	assert_eq!(forest.node(root).coordinate().to_string(), "A:B:1.0");
	assert_eq!(forest.depth(root), 0);

	let children = forest.children(root);
	assert_eq!(children.len(), 1);
	let child = forest.node(children[0]);
	assert_eq!(child.coordinate().to_string(), "A:C:2.0");
	assert_eq!(
		child.omitted(),
		Some(&Omitted {
			status: OmissionStatus::Conflict,
			effective_version: "3.0".to_string(),
		})
	);
	assert_eq!(forest.root(children[0]), root);
	assert_eq!(forest.conflicts().collect::<Vec<_>>(), vec![children[0]]);
}

#[test]
fn annotation_forms() {
	let report = "\
g:app:pom:1
+- a:one:jar:1.0:compile
|  +- x:y:jar:1.0:compile - omitted for conflict with 2.0
|  +- x:z:jar:1.0:compile (omitted for conflict; effective version 3.0)
|  +- (x:w:jar:1.0:compile - version managed from 0.9; omitted for duplicate)
|  +- x:v:jar:1.0:compile (optional)
|  \\- (x:u:jar:1.0:compile - omitted for cycle)
\\- a:two:jar:tests:1.0:test
";
	let forest = parse(report).unwrap();
	let by_artifact = |aid: &str| forest.node(forest.find("x", aid).next().unwrap());

	assert_eq!(by_artifact("y").effective_version(), "2.0");
	assert_eq!(by_artifact("z").effective_version(), "3.0");
	assert!(by_artifact("z").is_conflict());

	let duplicate = by_artifact("w").omitted().unwrap();
	assert_eq!(duplicate.status, OmissionStatus::Duplicate);
	assert_eq!(duplicate.effective_version, "1.0");

	assert!(by_artifact("v").is_optional());
	assert_eq!(by_artifact("v").omitted(), None);
	assert_eq!(by_artifact("u").omitted().unwrap().status, OmissionStatus::Cycle);

	let two = forest.node(forest.roots()[1]);
	assert_eq!(two.classifier(), Some("tests"));
	assert_eq!(two.version(), "1.0");
	assert_eq!(forest.conflicts().count(), 2);
}

#[test]
fn log_prefix_and_blank_lines_are_tolerated() {
	let report = "[INFO] g:app:jar:1\n\n[INFO] +- a:b:jar:1.0:compile\n[INFO] \\- a:c:jar:1.0:compile\n";
	let forest = parse(report).unwrap();

	assert_eq!(forest.roots().len(), 2);
	assert_eq!(forest.node(forest.roots()[1]).line(), 4);
}

#[test]
fn depth_jump_is_rejected() {
	let report = "g:app:jar:1\n+- a:b:jar:1.0:compile\n|  |  \\- a:c:jar:1.0:compile\n";
	assert_eq!(
		parse(report),
		Err(TreeParseError::Orphan { line: 3, depth: 2 })
	);
}

#[test]
fn ragged_prefix_is_rejected() {
	let report = "g:app:jar:1\n+-  a:b:jar:1.0:compile\n";
	assert_eq!(
		parse(report),
		Err(TreeParseError::Indentation { line: 2, width: 4 })
	);
}

#[test]
fn malformed_lines_abort_the_parse() {
	assert_eq!(
		parse("g:app:jar:1\n+- not-a-coordinate\n"),
		Err(TreeParseError::Coordinate {
			line: 2,
			text: "not-a-coordinate".into(),
		})
	);
	assert_eq!(
		parse("g:app:jar:1\n+- a:b:jar:1.0:compile - omitted for conflict\n"),
		Err(TreeParseError::MissingEffectiveVersion { line: 2 })
	);
	assert_eq!(
		parse("a:b:jar:1.0:compile\ng:app:jar:1\n"),
		Err(TreeParseError::MisplacedHeader { line: 2 })
	);
}

#[test]
fn empty_report_is_an_empty_forest() {
	let forest = parse("\n\n").unwrap();
	assert!(forest.is_empty());
	assert!(forest.roots().is_empty());
}

/// Renders a random shape as a tree report, one line per `(depth, aid)`.
fn render(shape: &[usize]) -> String {
	let mut out = String::from("g:app:jar:1\n");
	let mut depth = 0usize;
	for (idx, &step) in shape.iter().enumerate() {
		depth = if idx == 0 { 0 } else { step.min(depth + 1) };
		out.push_str(&"|  ".repeat(depth));
		let conflict = if idx % 3 == 2 { " - omitted for conflict with 9.0" } else { "" };
		out.push_str(&format!("+- g:a{idx}:jar:1.{idx}:compile{conflict}\n"));
	}
	out
}

proptest! {
	#[test]
	fn reparse_is_identical(shape in prop::collection::vec(0usize..5, 0..30)) {
		let report = render(&shape);
		prop_assert_eq!(parse(&report), parse(&report));
	}

	#[test]
	fn parent_walk_reaches_root(shape in prop::collection::vec(0usize..5, 1..30)) {
		let forest = parse(&render(&shape)).unwrap();
		for (id, node) in forest.iter() {
			let root = forest.root(id);
			prop_assert_eq!(forest.root(root), root);
			prop_assert_eq!(forest.parent(root), None);

			let walked: Vec<_> = forest.ancestors(id).collect();
			prop_assert_eq!(walked.len(), node.depth());
			prop_assert_eq!(walked.last().copied().unwrap_or(id), root);
		}
	}
}
