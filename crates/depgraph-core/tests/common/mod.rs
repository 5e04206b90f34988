//! Shared test helpers for integration tests: build a small on-disk source
//! tree in a temp directory and run the full pipeline over it.

use std::collections::BTreeMap;
use std::path::Path;

use depgraph_core::content_reader::FsContentReader;
use depgraph_core::graph::{self, DependencyGraph};
use depgraph_core::registry::LanguageRegistry;

/// Write `files` (relative path -> content) under a fresh temp directory and
/// return the directory plus the absolute, cleaned paths written.
pub fn write_tree(files: &[(&str, &str)]) -> (tempfile::TempDir, Vec<String>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut paths = Vec::new();
    for (rel, content) in files {
        let full = dir.path().join(rel);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("mkdir");
        }
        std::fs::write(&full, content).expect("write fixture file");
        paths.push(
            depgraph_core::path_util::absolutize(&full)
                .to_string_lossy()
                .into_owned(),
        );
    }
    paths.sort();
    (dir, paths)
}

pub fn build_graph(paths: &[String]) -> (DependencyGraph, Vec<depgraph_core::error::BuildWarning>) {
    let registry = LanguageRegistry::new();
    let reader = FsContentReader;
    graph::build(paths, &reader, &registry).expect("graph build")
}

/// Graph edges as a sorted map of file name (not full path) -> neighbor file
/// names, for fixture assertions that don't want to spell out temp paths.
pub fn edges_by_basename(dir: &Path, g: &DependencyGraph) -> BTreeMap<String, Vec<String>> {
    let basename = |p: &str| -> String {
        Path::new(p)
            .strip_prefix(dir)
            .unwrap_or(Path::new(p))
            .to_string_lossy()
            .into_owned()
    };
    g.nodes()
        .into_iter()
        .map(|n| {
            let targets = g.neighbors(n).iter().map(|t| basename(t)).collect();
            (basename(n), targets)
        })
        .collect()
}
