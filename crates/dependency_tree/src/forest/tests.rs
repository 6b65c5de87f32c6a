use pretty_assertions::assert_eq;

use crate::parse;

const REPORT: &str = "\
g:app:jar:1
+- a:b:jar:1.0:compile
|  \\- x:y:jar:2.0:compile
|     \\- (x:z:jar:1.0:compile - omitted for duplicate)
\\- a:c:jar:1.0:compile
   \\- x:y:jar:1.5:compile - omitted for conflict with 2.0
";

#[test]
fn ancestors_walk_up_to_root() {
	let forest = parse(REPORT).unwrap();
	let deepest = forest.find("x", "z").next().unwrap();

	let chain: Vec<_> = forest
		.ancestors(deepest)
		.map(|id| forest.node(id).artifact_id().to_string())
		.collect();
	assert_eq!(chain, vec!["y", "b"]);
	assert_eq!(forest.depth(deepest), 2);
	assert_eq!(forest.root(deepest), forest.roots()[0]);
}

#[test]
fn find_returns_every_occurrence_in_report_order() {
	let forest = parse(REPORT).unwrap();
	let versions: Vec<_> = forest
		.find("x", "y")
		.map(|id| forest.node(id).version().to_string())
		.collect();

	assert_eq!(versions, vec!["2.0", "1.5"]);
	assert_eq!(forest.find("x", "missing").count(), 0);
}

#[test]
fn effective_version_and_labels() {
	let forest = parse(REPORT).unwrap();

	let kept = forest.node(forest.find("x", "y").next().unwrap());
	assert_eq!(kept.effective_version(), "2.0");
	assert!(!kept.is_conflict());
	assert_eq!(kept.coordinate().to_string(), "x:y:2.0");

	let duplicate = forest.node(forest.find("x", "z").next().unwrap());
	assert_eq!(duplicate.omitted().unwrap().to_string(), "omitted for duplicate");
	assert_eq!(duplicate.key().to_string(), "x:z");
}

#[test]
fn get_is_bounds_checked() {
	let forest = parse(REPORT).unwrap();
	assert!(forest.get(crate::DependencyId(3)).is_some());
	assert!(forest.get(crate::DependencyId(99)).is_none());
}
