//! End-to-end Python package resolution over a real on-disk tree.

mod common;

use common::{build_graph, edges_by_basename, write_tree};

#[test]
fn relative_import_climbs_to_the_right_package() {
    let (dir, paths) = write_tree(&[
        ("pkg/__init__.py", ""),
        ("pkg/sub/__init__.py", ""),
        ("pkg/sub/a.py", "from .b import func\nfrom ..util import helper\n"),
        ("pkg/sub/b.py", ""),
        ("pkg/util.py", "def helper():\n    pass\n"),
    ]);

    let (graph, warnings) = build_graph(&paths);
    assert!(warnings.is_empty());

    let edges = edges_by_basename(dir.path(), &graph);
    let mut a_targets = edges["pkg/sub/a.py"].clone();
    a_targets.sort();
    assert_eq!(
        a_targets,
        vec!["pkg/sub/b.py".to_string(), "pkg/util.py".to_string()]
    );
}

#[test]
fn absolute_import_matches_any_suffix_in_the_supplied_set() {
    let (dir, paths) = write_tree(&[
        ("service/models.py", "import app.models\n"),
        ("app/models.py", ""),
    ]);

    let (graph, _warnings) = build_graph(&paths);
    let edges = edges_by_basename(dir.path(), &graph);
    assert_eq!(
        edges["service/models.py"],
        vec!["app/models.py".to_string()]
    );
}
