//! Directed file-dependency graph, built directly as sorted adjacency lists
//! rather than through a general graph library: the operations this crate
//! needs (add node, add edge, enumerate neighbors in order, diff two graphs)
//! are all linear in the adjacency list.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::content_reader::ContentReader;
use crate::error::{BuildWarning, DepgraphError};
use crate::path_util;
use crate::registry::{LanguageRegistry, SuppliedFileSet};

/// A directed graph keyed by absolute, cleaned source-file paths.
///
/// Every file handed to [`build`] is a vertex, even with no outgoing edges.
/// Adjacency lists are always sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    adjacency: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ensure_node(&mut self, path: &str) {
        self.adjacency.entry(path.to_string()).or_default();
    }

    pub(crate) fn add_edge(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }
        let targets = self.adjacency.entry(from.to_string()).or_default();
        if let Err(idx) = targets.binary_search(&to.to_string()) {
            targets.insert(idx, to.to_string());
        }
        self.ensure_node(to);
    }

    /// All vertices, sorted lexicographically.
    pub fn nodes(&self) -> Vec<&str> {
        self.adjacency.keys().map(|s| s.as_str()).collect()
    }

    pub fn contains_node(&self, path: &str) -> bool {
        self.adjacency.contains_key(path)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Sorted direct successors of `path`; empty if `path` is not a vertex
    /// or has no outgoing edges.
    pub fn neighbors(&self, path: &str) -> &[String] {
        self.adjacency
            .get(path)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All `(from, to)` edges, sorted by `(from, to)`.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::new();
        for (from, targets) in &self.adjacency {
            for to in targets {
                out.push((from.as_str(), to.as_str()));
            }
        }
        out
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|v| v.len()).sum()
    }

    /// Direct edges between `a` and `b` in either direction, as `(from, to)`
    /// pairs — the data behind the `why` CLI command.
    pub fn edges_between(&self, a: &str, b: &str) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if self.neighbors(a).binary_search(&b.to_string()).is_ok() {
            out.push((a.to_string(), b.to_string()));
        }
        if self.neighbors(b).binary_search(&a.to_string()).is_ok() {
            out.push((b.to_string(), a.to_string()));
        }
        out
    }
}

/// Build a [`DependencyGraph`] from a closed set of files.
///
/// Per-file read/parse failures are collected as [`BuildWarning`]s and do
/// not abort the build. Parsing is parallelized across files (parsers are
/// pure and the reader is reentrant); results are aggregated into a sorted
/// adjacency map, so output is deterministic regardless of parallelism.
pub fn build(
    files: &[String],
    reader: &dyn ContentReader,
    registry: &LanguageRegistry,
) -> Result<(DependencyGraph, Vec<BuildWarning>), DepgraphError> {
    let mut cleaned = Vec::with_capacity(files.len());
    for f in files {
        if f.trim().is_empty() {
            return Err(DepgraphError::PathInvalid { path: f.clone() });
        }
        cleaned.push(path_util::clean(f));
    }

    let supplied = SuppliedFileSet::new(cleaned.iter().cloned());

    let per_file: Vec<(String, Vec<String>, Option<BuildWarning>)> = cleaned
        .par_iter()
        .map(|path| resolve_one(path, &supplied, reader, registry))
        .collect();

    let mut graph = DependencyGraph::new();
    let mut warnings = Vec::new();
    for path in &cleaned {
        graph.ensure_node(path);
    }
    for (path, targets, warning) in per_file {
        for target in targets {
            graph.add_edge(&path, &target);
        }
        if let Some(w) = warning {
            warnings.push(w);
        }
    }
    warnings.sort_by_key(|w| match w {
        BuildWarning::ReadFailed { path, .. } => path.clone(),
        BuildWarning::ParseFailed { path, .. } => path.clone(),
    });

    Ok((graph, warnings))
}

fn resolve_one(
    path: &str,
    supplied: &SuppliedFileSet,
    reader: &dyn ContentReader,
    registry: &LanguageRegistry,
) -> (String, Vec<String>, Option<BuildWarning>) {
    let Some(ext) = path.rsplit('.').next().filter(|e| *e != path) else {
        return (path.to_string(), Vec::new(), None);
    };
    let Some(module) = registry.module_for_extension(ext) else {
        return (path.to_string(), Vec::new(), None);
    };

    let bytes = match reader.read(path) {
        Ok(b) => b,
        Err(reason) => {
            return (
                path.to_string(),
                Vec::new(),
                Some(BuildWarning::ReadFailed {
                    path: path.to_string(),
                    reason,
                }),
            );
        }
    };

    let records = match module.parse(&bytes) {
        Ok(r) => r,
        Err(e) => {
            return (
                path.to_string(),
                Vec::new(),
                Some(BuildWarning::ParseFailed {
                    path: path.to_string(),
                    reason: e.message,
                }),
            );
        }
    };

    let targets = module.resolve(path, &records, supplied, reader);
    (path.to_string(), targets, None)
}
