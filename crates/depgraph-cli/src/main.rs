//! depgraph CLI — build and diff multi-language file-dependency graphs.

mod discover;
mod vcs;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use depgraph_core::content_reader::FsContentReader;
use depgraph_core::error::BuildWarning;
use depgraph_core::path_util;
use depgraph_core::registry::LanguageRegistry;
use depgraph_core::{delta, graph, render};

#[derive(Parser)]
#[command(
    name = "depgraph",
    about = "Map and diff the file-level import dependency graph of a repository"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build & render a full dependency graph for a directory.
    Graph {
        /// Path to the repository (or subdirectory) to analyze.
        path: PathBuf,

        #[arg(long, default_value = "dot")]
        format: String,
    },

    /// Render a structural delta between two snapshots. With no refs, diffs
    /// the working tree against HEAD. With one ref, diffs it against its
    /// first parent (or an empty tree, for a root commit).
    Diff {
        /// Zero, one (`<targetRef>`), or two (`<baseRef> <targetRef>`)
        /// commit-ish refs.
        refs: Vec<String>,

        #[arg(short = 'r', long)]
        repo: Option<PathBuf>,

        #[arg(long, default_value = "dot")]
        format: String,
    },

    /// List direct edges (in either direction) between two files.
    Why {
        from: PathBuf,
        to: PathBuf,

        #[arg(short = 'r', long)]
        repo: Option<PathBuf>,
    },

    /// Print supported languages with maturity glyphs.
    Languages,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("{} {e:#}", style("error:").red().bold());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Graph { path, format } => cmd_graph(&path, &format),
        Commands::Diff { refs, repo, format } => cmd_diff(refs, repo, &format),
        Commands::Why { from, to, repo } => cmd_why(&from, &to, repo),
        Commands::Languages => cmd_languages(),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

fn warn_about(warnings: &[BuildWarning]) {
    for w in warnings {
        log::warn!("{w}");
    }
}

fn cmd_graph(path: &std::path::Path, format: &str) -> Result<()> {
    let format = render::parse_format(format)?;
    let pb = spinner("Discovering files...");
    let files = discover::discover_files(path)
        .with_context(|| format!("failed to walk {}", path.display()))?;
    pb.set_message(format!("Parsing {} files...", files.len()));

    let registry = LanguageRegistry::new();
    let reader = FsContentReader;
    let (built, warnings) = graph::build(&files, &reader, &registry)
        .context("failed to build dependency graph")?;
    pb.finish_and_clear();
    warn_about(&warnings);

    println!("{}", render::render_graph(&built, format)?);
    Ok(())
}

fn cmd_diff(refs: Vec<String>, repo_path: Option<PathBuf>, format: &str) -> Result<()> {
    if refs.len() > 2 {
        bail!("diff takes zero, one, or two refs, got {}", refs.len());
    }
    let format = render::parse_format(format)?;
    let repo_path = repo_path.unwrap_or_else(|| PathBuf::from("."));
    let repo = vcs::Repo::open(&repo_path)?;
    let registry = LanguageRegistry::new();

    let (base_graph, target_graph, base_warnings, target_warnings) = match refs.len() {
        0 => {
            let (base, base_w) = build_at_head(&repo, &registry)?;
            let pb = spinner("Computing delta...");
            let (target, target_w) = build_working_tree(&repo, &registry)?;
            pb.finish_and_clear();
            (base, target, base_w, target_w)
        }
        1 => {
            let target_oid = repo.resolve_commit(&refs[0])?;
            let pb = spinner("Computing delta...");
            let (base, base_w) = match repo.first_parent(target_oid)? {
                Some(parent_oid) => build_at_oid(&repo, parent_oid, &registry)?,
                None => (graph::DependencyGraph::new(), Vec::new()),
            };
            let (target, target_w) = build_at_oid(&repo, target_oid, &registry)?;
            pb.finish_and_clear();
            (base, target, base_w, target_w)
        }
        2 => {
            let (base, base_w) = build_at_ref(&repo, &refs[0], &registry)?;
            let pb = spinner("Computing delta...");
            let (target, target_w) = build_at_ref(&repo, &refs[1], &registry)?;
            pb.finish_and_clear();
            (base, target, base_w, target_w)
        }
        _ => unreachable!("refs.len() > 2 is rejected above"),
    };
    warn_about(&base_warnings);
    warn_about(&target_warnings);

    let d = delta::diff(&base_graph, &target_graph, &[])?;
    println!("{}", render::render_delta(&d, format)?);
    Ok(())
}

fn build_at_head(
    repo: &vcs::Repo,
    registry: &LanguageRegistry,
) -> Result<(graph::DependencyGraph, Vec<BuildWarning>)> {
    let head = repo.resolve_commit("HEAD")?;
    build_at_oid(repo, head, registry)
}

fn build_at_ref(
    repo: &vcs::Repo,
    refname: &str,
    registry: &LanguageRegistry,
) -> Result<(graph::DependencyGraph, Vec<BuildWarning>)> {
    let oid = repo.resolve_commit(refname)?;
    build_at_oid(repo, oid, registry)
}

fn build_at_oid(
    repo: &vcs::Repo,
    oid: git2::Oid,
    registry: &LanguageRegistry,
) -> Result<(graph::DependencyGraph, Vec<BuildWarning>)> {
    let files: Vec<String> = repo
        .files_at(oid)?
        .into_iter()
        .map(|rel| path_util::join_clean(&repo.root().to_string_lossy(), &rel))
        .collect();
    let reader = vcs::RevisionReader::new(repo.root(), oid)?;
    Ok(graph::build(&files, &reader, registry)?)
}

fn build_working_tree(
    repo: &vcs::Repo,
    registry: &LanguageRegistry,
) -> Result<(graph::DependencyGraph, Vec<BuildWarning>)> {
    let files: Vec<String> = repo
        .working_tree_files()?
        .into_iter()
        .map(|rel| path_util::join_clean(&repo.root().to_string_lossy(), &rel))
        .collect();
    let reader = FsContentReader;
    Ok(graph::build(&files, &reader, registry)?)
}

fn cmd_why(from: &std::path::Path, to: &std::path::Path, repo_path: Option<PathBuf>) -> Result<()> {
    let root = repo_path.unwrap_or_else(|| PathBuf::from("."));
    let files = discover::discover_files(&root)
        .with_context(|| format!("failed to walk {}", root.display()))?;

    let registry = LanguageRegistry::new();
    let reader = FsContentReader;
    let (built, warnings) = graph::build(&files, &reader, &registry)?;
    warn_about(&warnings);

    let from = path_util::absolutize(from).to_string_lossy().into_owned();
    let to = path_util::absolutize(to).to_string_lossy().into_owned();
    println!("{}", render::render_why(&built, &from, &to));
    Ok(())
}

fn cmd_languages() -> Result<()> {
    let registry = LanguageRegistry::new();
    for info in registry.supported_languages() {
        println!(
            "{} {:<12} {}",
            info.maturity_glyph,
            info.display_name,
            info.extensions.join(", ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_rejects_more_than_two_refs() {
        let err = cmd_diff(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            None,
            "dot",
        )
        .unwrap_err();
        assert!(err.to_string().contains("zero, one, or two refs"));
    }
}
