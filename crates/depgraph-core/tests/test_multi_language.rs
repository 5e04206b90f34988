//! A single supplied set spanning several languages: each resolver only
//! ever sees the files relevant to its own language, and files of a
//! language with no registered module still end up as bare vertices.

mod common;

use common::{build_graph, edges_by_basename, write_tree};
use depgraph_core::registry::LanguageRegistry;

#[test]
fn each_file_is_resolved_by_its_own_language_only() {
    let (dir, paths) = write_tree(&[
        ("src/index.js", "import { helper } from './helper';\n"),
        ("src/helper.js", ""),
        ("lib/types.rs", ""),
        ("lib/main.rs", "mod types;\n"),
        ("README.txt", "not a source file"),
    ]);

    let (graph, warnings) = build_graph(&paths);
    assert!(warnings.is_empty());
    assert_eq!(graph.node_count(), 5);

    let edges = edges_by_basename(dir.path(), &graph);
    assert_eq!(
        edges["src/index.js"],
        vec!["src/helper.js".to_string()]
    );
    assert_eq!(edges["lib/main.rs"], vec!["lib/types.rs".to_string()]);
    assert!(edges["README.txt"].is_empty());
}

#[test]
fn languages_command_data_lists_every_supported_language_once() {
    let registry = LanguageRegistry::new();
    let infos = registry.supported_languages();
    assert!(infos.iter().any(|l| l.display_name == "Rust"));
    assert!(infos.iter().any(|l| l.display_name == "Python"));
    assert!(infos.iter().any(|l| l.display_name == "Go"));
    assert_eq!(infos.len(), 13);
}
