//! Structural diff between two [`DependencyGraph`]s, with a pluggable
//! semantic-analyzer slot for cross-cutting findings.

use std::collections::BTreeSet;

use crate::error::DepgraphError;
use crate::graph::DependencyGraph;
use crate::path_util;

/// A single directed edge, as it appears in a [`Delta`].
pub type GraphEdge = (String, String);

/// A pluggable cross-cutting check over a base/target graph pair and the
/// structural delta already computed between them. Registration is
/// compile-time only — never dynamically loaded.
pub trait SemanticAnalyzer: Send + Sync {
    fn analyze(
        &self,
        base: &DependencyGraph,
        target: &DependencyGraph,
        delta: &Delta,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;
}

/// The structural (and, once analyzers run, semantic) difference between
/// two graphs. Every collection is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta {
    pub nodes_added: Vec<String>,
    pub nodes_removed: Vec<String>,
    pub edges_added: Vec<GraphEdge>,
    pub edges_removed: Vec<GraphEdge>,
    /// Nodes present in both graphs with at least one added or removed
    /// incident edge. Computed for renderers, not part of the core diff
    /// algorithm.
    pub changed_nodes: Vec<String>,
    pub findings: Vec<String>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.nodes_added.is_empty()
            && self.nodes_removed.is_empty()
            && self.edges_added.is_empty()
            && self.edges_removed.is_empty()
            && self.findings.is_empty()
    }
}

fn edge_key(edge: &GraphEdge) -> (String, String) {
    (path_util::clean(&edge.0), path_util::clean(&edge.1))
}

/// Diff `base` against `target`. Semantic analyzers run in order against the
/// already-computed structural delta; any analyzer failure aborts the diff
/// and its error is returned unchanged. A `None` entry in `analyzers` is
/// simply skipped — mirroring a nil analyzer slot.
pub fn diff(
    base: &DependencyGraph,
    target: &DependencyGraph,
    analyzers: &[Option<&dyn SemanticAnalyzer>],
) -> Result<Delta, DepgraphError> {
    let base_nodes: BTreeSet<&str> = base.nodes().into_iter().collect();
    let target_nodes: BTreeSet<&str> = target.nodes().into_iter().collect();

    let nodes_added: Vec<String> = target_nodes
        .difference(&base_nodes)
        .map(|s| s.to_string())
        .collect();
    let nodes_removed: Vec<String> = base_nodes
        .difference(&target_nodes)
        .map(|s| s.to_string())
        .collect();

    let base_edges: BTreeSet<GraphEdge> = base
        .edges()
        .into_iter()
        .map(|(f, t)| (f.to_string(), t.to_string()))
        .collect();
    let target_edges: BTreeSet<GraphEdge> = target
        .edges()
        .into_iter()
        .map(|(f, t)| (f.to_string(), t.to_string()))
        .collect();

    let mut edges_added: Vec<GraphEdge> = target_edges.difference(&base_edges).cloned().collect();
    let mut edges_removed: Vec<GraphEdge> = base_edges.difference(&target_edges).cloned().collect();
    edges_added.sort_by_key(edge_key);
    edges_removed.sort_by_key(edge_key);

    let mut changed: BTreeSet<String> = BTreeSet::new();
    for (from, to) in edges_added.iter().chain(edges_removed.iter()) {
        if base_nodes.contains(from.as_str()) && target_nodes.contains(from.as_str()) {
            changed.insert(from.clone());
        }
        if base_nodes.contains(to.as_str()) && target_nodes.contains(to.as_str()) {
            changed.insert(to.clone());
        }
    }

    let mut delta = Delta {
        nodes_added,
        nodes_removed,
        edges_added,
        edges_removed,
        changed_nodes: changed.into_iter().collect(),
        findings: Vec::new(),
    };

    let mut findings = Vec::new();
    for analyzer in analyzers.iter().flatten() {
        let found = analyzer
            .analyze(base, target, &delta)
            .map_err(|source| DepgraphError::AnalyzerFailed { source })?;
        findings.extend(found);
    }
    findings.sort();
    delta.findings = findings;

    Ok(delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str)]) -> DependencyGraph {
        let mut files = Vec::new();
        for (f, t) in edges {
            files.push(f.to_string());
            files.push(t.to_string());
        }
        files.sort();
        files.dedup();

        let mut g = DependencyGraph::new();
        for f in &files {
            g.ensure_node(f);
        }
        for (f, t) in edges {
            g.add_edge(f, t);
        }
        g
    }

    #[test]
    fn delta_example_from_two_single_edge_graphs() {
        let base = graph(&[("A", "B")]);
        let target = graph(&[("A", "B"), ("A", "C")]);

        let delta = diff(&base, &target, &[]).unwrap();
        assert_eq!(delta.nodes_added, vec!["C".to_string()]);
        assert!(delta.nodes_removed.is_empty());
        assert_eq!(delta.edges_added, vec![("A".to_string(), "C".to_string())]);
        assert!(delta.edges_removed.is_empty());
    }

    #[test]
    fn round_trip_diff_of_identical_graphs_is_empty() {
        let g = graph(&[("A", "B")]);
        let delta = diff(&g, &g, &[]).unwrap();
        assert!(delta.is_empty());
    }

    #[test]
    fn delta_is_symmetric_under_swap() {
        let base = graph(&[("A", "B")]);
        let target = graph(&[("A", "B"), ("A", "C")]);

        let forward = diff(&base, &target, &[]).unwrap();
        let backward = diff(&target, &base, &[]).unwrap();

        assert_eq!(forward.nodes_added, backward.nodes_removed);
        assert_eq!(forward.nodes_removed, backward.nodes_added);
        assert_eq!(forward.edges_added, backward.edges_removed);
        assert_eq!(forward.edges_removed, backward.edges_added);
    }

    struct FailingAnalyzer;
    impl SemanticAnalyzer for FailingAnalyzer {
        fn analyze(
            &self,
            _base: &DependencyGraph,
            _target: &DependencyGraph,
            _delta: &Delta,
        ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
            Err("boom".into())
        }
    }

    #[test]
    fn analyzer_failure_aborts_diff() {
        let g = graph(&[("A", "B")]);
        let analyzer: &dyn SemanticAnalyzer = &FailingAnalyzer;
        let err = diff(&g, &g, &[Some(analyzer)]).unwrap_err();
        assert!(matches!(err, DepgraphError::AnalyzerFailed { .. }));
    }

    struct CountingAnalyzer;
    impl SemanticAnalyzer for CountingAnalyzer {
        fn analyze(
            &self,
            _base: &DependencyGraph,
            _target: &DependencyGraph,
            delta: &Delta,
        ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(vec![format!("{} node(s) added", delta.nodes_added.len())])
        }
    }

    #[test]
    fn analyzer_findings_are_collected_and_sorted() {
        let base = graph(&[("A", "B")]);
        let target = graph(&[("A", "B"), ("A", "C")]);
        let analyzer: &dyn SemanticAnalyzer = &CountingAnalyzer;
        let delta = diff(&base, &target, &[Some(analyzer)]).unwrap();
        assert_eq!(delta.findings, vec!["1 node(s) added".to_string()]);
    }
}
