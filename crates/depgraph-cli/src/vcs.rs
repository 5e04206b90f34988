//! Git-backed version-control adapter: enumerates files at a revision (or
//! the working tree), resolves parents, and reads blob contents through a
//! [`ContentReader`] realization so the core never has to know about git.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use depgraph_core::content_reader::ContentReader;
use depgraph_core::error::ReadError;
use git2::{Oid, Repository};

pub struct Repo {
    repo: Repository,
    root: PathBuf,
}

impl Repo {
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .with_context(|| format!("failed to open git repository at {}", path.display()))?;
        let root = repo
            .workdir()
            .ok_or_else(|| anyhow!("bare repositories are not supported"))?
            .to_path_buf();
        Ok(Self { repo, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a ref or commit-ish string (`HEAD`, a branch name, a short or
    /// full hash) to a commit id.
    pub fn resolve_commit(&self, refname: &str) -> Result<Oid> {
        let obj = self
            .repo
            .revparse_single(refname)
            .with_context(|| format!("unknown commit or ref: {refname}"))?;
        obj.peel_to_commit()
            .with_context(|| format!("{refname} does not point at a commit"))
            .map(|c| c.id())
    }

    /// The first parent of `oid`, or `None` for a root commit.
    pub fn first_parent(&self, oid: Oid) -> Result<Option<Oid>> {
        let commit = self.repo.find_commit(oid)?;
        match commit.parent(0) {
            Ok(parent) => Ok(Some(parent.id())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Every file path (relative to the repo root) present in the tree at
    /// `oid`.
    pub fn files_at(&self, oid: Oid) -> Result<Vec<String>> {
        let commit = self.repo.find_commit(oid)?;
        let tree = commit.tree()?;
        let mut files = Vec::new();
        tree.walk(git2::TreeWalkMode::PreOrder, |parent, entry| {
            if entry.kind() == Some(git2::ObjectType::Blob) {
                if let Some(name) = entry.name() {
                    files.push(format!("{parent}{name}"));
                }
            }
            git2::TreeWalkResult::Ok
        })?;
        Ok(files)
    }

    /// Tracked and untracked files as they currently sit on disk (working
    /// tree vs HEAD), as paths relative to the repo root.
    pub fn working_tree_files(&self) -> Result<Vec<String>> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);
        let statuses = self.repo.statuses(Some(&mut opts))?;

        let mut files = Vec::new();
        if let Ok(head_tree) = self.repo.head().and_then(|h| h.peel_to_tree()) {
            head_tree.walk(git2::TreeWalkMode::PreOrder, |parent, entry| {
                if entry.kind() == Some(git2::ObjectType::Blob) {
                    if let Some(name) = entry.name() {
                        files.push(format!("{parent}{name}"));
                    }
                }
                git2::TreeWalkResult::Ok
            })?;
        }
        for entry in statuses.iter() {
            if let Some(path) = entry.path() {
                if entry.status().is_wt_deleted() {
                    files.retain(|f| f != path);
                } else {
                    files.push(path.to_string());
                }
            }
        }
        files.sort();
        files.dedup();
        Ok(files)
    }
}

/// Reads blob contents at a fixed revision. Wraps the repository in a mutex
/// since libgit2 repository handles are not safely shared across threads
/// without external synchronization, and the core may call `read`
/// concurrently while parsing files in parallel.
pub struct RevisionReader {
    repo: Mutex<Repository>,
    root: PathBuf,
    oid: Oid,
}

impl RevisionReader {
    pub fn new(root: &Path, oid: Oid) -> Result<Self> {
        let repo = Repository::discover(root)?;
        Ok(Self {
            repo: Mutex::new(repo),
            root: root.to_path_buf(),
            oid,
        })
    }
}

impl ContentReader for RevisionReader {
    fn read(&self, path: &str) -> Result<Vec<u8>, ReadError> {
        let rel = Path::new(path)
            .strip_prefix(&self.root)
            .unwrap_or_else(|_| Path::new(path));

        let repo = self.repo.lock().unwrap_or_else(|e| e.into_inner());
        let commit = repo
            .find_commit(self.oid)
            .map_err(|_| ReadError::Io(path.to_string()))?;
        let tree = commit
            .tree()
            .map_err(|_| ReadError::Io(path.to_string()))?;
        let entry = tree
            .get_path(rel)
            .map_err(|_| ReadError::NotFound(path.to_string()))?;
        let blob = entry
            .to_object(&repo)
            .ok()
            .and_then(|o| o.into_blob().ok())
            .ok_or_else(|| ReadError::Io(path.to_string()))?;
        Ok(blob.content().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_rejects_non_repository() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Repo::open(dir.path()).is_err());
    }
}
