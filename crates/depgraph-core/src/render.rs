//! Renderers for full graphs and deltas: DOT, Mermaid, JSON (graphs only),
//! and a textual summary (deltas only).

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::delta::Delta;
use crate::error::DepgraphError;
use crate::graph::DependencyGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Dot,
    Mermaid,
    Json,
}

pub const GRAPH_FORMATS: &str = "dot, mermaid, json";
pub const DELTA_FORMATS: &str = "dot, mermaid";

pub fn parse_format(raw: &str) -> Result<OutputFormat, DepgraphError> {
    match raw {
        "dot" => Ok(OutputFormat::Dot),
        "mermaid" => Ok(OutputFormat::Mermaid),
        "json" => Ok(OutputFormat::Json),
        other => Err(DepgraphError::UnknownFormat {
            format: other.to_string(),
            valid: GRAPH_FORMATS.to_string(),
        }),
    }
}

fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

/// Render a full graph. All three formats are supported.
pub fn render_graph(graph: &DependencyGraph, format: OutputFormat) -> Result<String, DepgraphError> {
    match format {
        OutputFormat::Dot => Ok(render_graph_dot(graph)),
        OutputFormat::Mermaid => Ok(render_graph_mermaid(graph)),
        OutputFormat::Json => render_graph_json(graph),
    }
}

fn render_graph_dot(graph: &DependencyGraph) -> String {
    let mut out = String::from("digraph depgraph {\n  rankdir=LR;\n  node [shape=box];\n");
    for node in graph.nodes() {
        out.push_str(&format!("  {:?} [label={:?}];\n", node, base_name(node)));
    }
    for (from, to) in graph.edges() {
        out.push_str(&format!("  {:?} -> {:?};\n", from, to));
    }
    out.push_str("}\n");
    out
}

fn render_graph_mermaid(graph: &DependencyGraph) -> String {
    let mut out = String::from("flowchart LR\n");
    let mut ids: BTreeMap<&str, String> = BTreeMap::new();
    for (i, node) in graph.nodes().into_iter().enumerate() {
        let id = format!("n{i}");
        out.push_str(&format!("    {id}[\"{}\"]\n", base_name(node)));
        ids.insert(node, id);
    }
    for (from, to) in graph.edges() {
        out.push_str(&format!("    {} --> {}\n", ids[from], ids[to]));
    }
    out
}

#[derive(Serialize)]
struct GraphJson {
    nodes: Vec<String>,
    edges: Vec<[String; 2]>,
}

fn render_graph_json(graph: &DependencyGraph) -> Result<String, DepgraphError> {
    let payload = GraphJson {
        nodes: graph.nodes().into_iter().map(str::to_string).collect(),
        edges: graph
            .edges()
            .into_iter()
            .map(|(f, t)| [f.to_string(), t.to_string()])
            .collect(),
    };
    serde_json::to_string_pretty(&payload).map_err(|e| DepgraphError::UnknownFormat {
        format: format!("json serialization failed: {e}"),
        valid: GRAPH_FORMATS.to_string(),
    })
}

/// Render a delta. JSON is explicitly unsupported here and rejected.
pub fn render_delta(delta: &Delta, format: OutputFormat) -> Result<String, DepgraphError> {
    match format {
        OutputFormat::Dot => Ok(render_delta_dot(delta)),
        OutputFormat::Mermaid => Ok(render_delta_mermaid(delta)),
        OutputFormat::Json => Err(DepgraphError::UnknownFormat {
            format: "json".to_string(),
            valid: DELTA_FORMATS.to_string(),
        }),
    }
}

fn render_delta_dot(delta: &Delta) -> String {
    let mut out = String::from("digraph diff {\n  rankdir=LR;\n  node [shape=box];\n");

    for n in &delta.changed_nodes {
        out.push_str(&format!(
            "  {:?} [label={:?}, style=filled, fillcolor=\"#d9f2d9\", color=\"#2e8b57\"];\n",
            n,
            base_name(n)
        ));
    }
    for n in &delta.nodes_added {
        out.push_str(&format!(
            "  {:?} [label={:?}, style=filled, fillcolor=\"#d9f2d9\", color=\"#2e8b57\"];\n",
            n,
            base_name(n)
        ));
    }
    for n in &delta.nodes_removed {
        out.push_str(&format!(
            "  {:?} [label={:?}, style=filled, fillcolor=\"#f8d7da\", color=\"#b22222\"];\n",
            n,
            base_name(n)
        ));
    }

    for (from, to) in &delta.edges_added {
        out.push_str(&format!(
            "  {from:?} -> {to:?} [color=\"#2e8b57\"];\n"
        ));
    }
    for (from, to) in &delta.edges_removed {
        out.push_str(&format!(
            "  {from:?} -> {to:?} [color=\"#b22222\", style=dashed];\n"
        ));
    }

    out.push_str("}\n");
    out
}

fn render_delta_mermaid(delta: &Delta) -> String {
    let mut out = String::from("flowchart LR\n");
    let mut ids: BTreeMap<String, String> = BTreeMap::new();

    let mut nodes: Vec<String> = delta
        .changed_nodes
        .iter()
        .chain(delta.nodes_added.iter())
        .chain(delta.nodes_removed.iter())
        .cloned()
        .collect();
    nodes.sort();
    nodes.dedup();

    for node in &nodes {
        let id = format!("n{}", ids.len());
        out.push_str(&format!("    {id}[\"{}\"]\n", base_name(node)));
        ids.insert(node.clone(), id);
    }

    let mut ensure_id = |out: &mut String, ids: &mut BTreeMap<String, String>, node: &str| -> String {
        if let Some(id) = ids.get(node) {
            return id.clone();
        }
        let id = format!("n{}", ids.len());
        out.push_str(&format!("    {id}[\"{}\"]\n", base_name(node)));
        ids.insert(node.to_string(), id.clone());
        id
    };

    for (from, to) in &delta.edges_added {
        let from_id = ensure_id(&mut out, &mut ids, from);
        let to_id = ensure_id(&mut out, &mut ids, to);
        out.push_str(&format!("    {from_id} --> {to_id}\n"));
    }
    for (from, to) in &delta.edges_removed {
        let from_id = ensure_id(&mut out, &mut ids, from);
        let to_id = ensure_id(&mut out, &mut ids, to);
        out.push_str(&format!("    {from_id} -.-> {to_id}\n"));
    }

    let added_classes: Vec<&str> = delta
        .nodes_added
        .iter()
        .filter_map(|n| ids.get(n).map(|s| s.as_str()))
        .collect();
    if !added_classes.is_empty() {
        out.push_str("    classDef added fill:#d9f2d9,stroke:#2e8b57,color:#000000\n");
        out.push_str(&format!("    class {} added\n", added_classes.join(",")));
    }

    let removed_classes: Vec<&str> = delta
        .nodes_removed
        .iter()
        .filter_map(|n| ids.get(n).map(|s| s.as_str()))
        .collect();
    if !removed_classes.is_empty() {
        out.push_str("    classDef removed fill:#f8d7da,stroke:#b22222,color:#000000\n");
        out.push_str(&format!("    class {} removed\n", removed_classes.join(",")));
    }

    let changed_set: std::collections::HashSet<&str> =
        delta.changed_nodes.iter().map(|s| s.as_str()).collect();
    let mut unchanged_classes: Vec<&str> = ids
        .iter()
        .filter(|(node, _)| !changed_set.contains(node.as_str()))
        .map(|(_, id)| id.as_str())
        .collect();
    unchanged_classes.sort();
    if !unchanged_classes.is_empty() {
        out.push_str(
            "    classDef unchanged fill:#f5f6f8,stroke:#c3c7cf,color:#667085,stroke-dasharray: 5 3\n",
        );
        out.push_str(&format!("    class {} unchanged\n", unchanged_classes.join(",")));
    }

    out
}

/// Human-readable block listing counts and entries in a fixed order.
pub fn render_delta_summary(delta: &Delta) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Nodes added: {}", delta.nodes_added.len()));
    lines.extend(delta.nodes_added.iter().cloned());

    lines.push(format!("Nodes removed: {}", delta.nodes_removed.len()));
    lines.extend(delta.nodes_removed.iter().cloned());

    lines.push(format!("Edges added: {}", delta.edges_added.len()));
    lines.extend(
        delta
            .edges_added
            .iter()
            .map(|(f, t)| format!("{f} -> {t}")),
    );

    lines.push(format!("Edges removed: {}", delta.edges_removed.len()));
    lines.extend(
        delta
            .edges_removed
            .iter()
            .map(|(f, t)| format!("{f} -> {t}")),
    );

    lines.push(format!("Semantic findings: {}", delta.findings.len()));
    lines.extend(delta.findings.iter().cloned());

    lines.join("\n")
}

/// Text for the `why` CLI command: one line per direct edge found between
/// the two files, in either direction.
pub fn render_why(graph: &DependencyGraph, from: &str, to: &str) -> String {
    let edges = graph.edges_between(from, to);
    if edges.is_empty() {
        return format!("no direct dependency between {from} and {to}");
    }
    edges
        .into_iter()
        .map(|(f, t)| format!("{f} depends on {t}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_format_is_rejected() {
        let err = parse_format("yaml").unwrap_err();
        assert!(matches!(err, DepgraphError::UnknownFormat { .. }));
    }

    #[test]
    fn json_is_rejected_for_deltas() {
        let delta = Delta::default();
        let err = render_delta(&delta, OutputFormat::Json).unwrap_err();
        assert!(matches!(err, DepgraphError::UnknownFormat { .. }));
    }

    #[test]
    fn why_reports_direct_dependency() {
        let mut graph = DependencyGraph::new();
        graph.ensure_node("/repo/from.js");
        graph.add_edge("/repo/from.js", "/repo/to.js");
        let text = render_why(&graph, "/repo/from.js", "/repo/to.js");
        assert!(text.contains("from.js depends on"));
        assert!(text.contains("to.js"));
    }

    #[test]
    fn summary_lists_sections_in_fixed_order() {
        let delta = Delta {
            nodes_added: vec!["/repo/c.js".to_string()],
            edges_added: vec![("/repo/a.js".to_string(), "/repo/c.js".to_string())],
            ..Default::default()
        };
        let summary = render_delta_summary(&delta);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines[0], "Nodes added: 1");
        assert!(lines.contains(&"/repo/c.js"));
    }
}
