//! End-to-end: build two graphs from real file trees, diff them, and render
//! the result in every supported format.

mod common;

use common::{build_graph, write_tree};
use depgraph_core::delta;
use depgraph_core::render::{self, OutputFormat};

#[test]
fn diff_reports_an_added_file_and_its_new_edge() {
    let (_dir_a, paths_a) = write_tree(&[
        ("a.rs", "mod b;\n"),
        ("b.rs", ""),
    ]);
    let (base, _) = build_graph(&paths_a);

    let (_dir_b, paths_b) = write_tree(&[
        ("a.rs", "mod b;\nmod c;\n"),
        ("b.rs", ""),
        ("c.rs", ""),
    ]);
    let (target, _) = build_graph(&paths_b);

    let delta = delta::diff(&base, &target, &[]).expect("diff");
    assert_eq!(delta.nodes_added.len(), 1);
    assert!(delta.nodes_added[0].ends_with("c.rs"));
    assert_eq!(delta.edges_added.len(), 1);
    assert!(delta.edges_removed.is_empty());
    assert!(delta.changed_nodes.iter().any(|n| n.ends_with("a.rs")));
}

#[test]
fn diff_is_symmetric_under_swap() {
    let (_dir_a, paths_a) = write_tree(&[("a.rs", "mod b;\n"), ("b.rs", "")]);
    let (base, _) = build_graph(&paths_a);
    let (_dir_b, paths_b) = write_tree(&[("a.rs", ""), ("b.rs", "")]);
    let (target, _) = build_graph(&paths_b);

    let forward = delta::diff(&base, &target, &[]).expect("diff");
    let backward = delta::diff(&target, &base, &[]).expect("diff");

    assert_eq!(forward.edges_added, backward.edges_removed);
    assert_eq!(forward.edges_removed, backward.edges_added);
    assert_eq!(forward.nodes_added, backward.nodes_removed);
    assert_eq!(forward.nodes_removed, backward.nodes_added);
}

#[test]
fn diffing_a_graph_against_itself_is_empty() {
    let (_dir, paths) = write_tree(&[("a.rs", "mod b;\n"), ("b.rs", "")]);
    let (g, _) = build_graph(&paths);
    let delta = delta::diff(&g, &g, &[]).expect("diff");
    assert!(delta.is_empty());
}

#[test]
fn graph_renders_in_every_supported_format() {
    let (_dir, paths) = write_tree(&[("a.rs", "mod b;\n"), ("b.rs", "")]);
    let (g, _) = build_graph(&paths);

    let dot = render::render_graph(&g, OutputFormat::Dot).unwrap();
    assert!(dot.starts_with("digraph"));
    let mermaid = render::render_graph(&g, OutputFormat::Mermaid).unwrap();
    assert!(mermaid.starts_with("flowchart LR"));
    let json = render::render_graph(&g, OutputFormat::Json).unwrap();
    assert!(json.contains("\"nodes\""));
}

#[test]
fn json_delta_rendering_is_rejected() {
    let (_dir, paths) = write_tree(&[("a.rs", "")]);
    let (g, _) = build_graph(&paths);
    let delta = delta::diff(&g, &g, &[]).expect("diff");
    let err = render::render_delta(&delta, OutputFormat::Json).unwrap_err();
    assert!(matches!(
        err,
        depgraph_core::error::DepgraphError::UnknownFormat { .. }
    ));
}

#[test]
fn why_reports_the_direct_dependency_between_two_files() {
    let (_dir, paths) = write_tree(&[("a.rs", "mod b;\n"), ("b.rs", "")]);
    let (g, _) = build_graph(&paths);
    let a = paths.iter().find(|p| p.ends_with("a.rs")).unwrap();
    let b = paths.iter().find(|p| p.ends_with("b.rs")).unwrap();
    let report = render::render_why(&g, a, b);
    assert!(report.contains("depends on"));
}
