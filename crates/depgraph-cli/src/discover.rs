//! Filesystem file-list discovery for the `graph` command's plain-directory
//! mode (as opposed to `diff`, which discovers files through the VCS
//! adapter).

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

/// Every regular file under `root`, skipping dotfiles/dotdirs (`.git`,
/// `.venv`, …), as cleaned absolute path strings, sorted.
pub fn discover_files(root: &Path) -> anyhow::Result<Vec<String>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root).into_iter().filter_entry(|e| !is_hidden(e));
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(depgraph_core::path_util::absolutize(entry.path()).to_string_lossy().into_owned());
        }
    }
    files.sort();
    Ok(files)
}
