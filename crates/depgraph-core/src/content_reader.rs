//! The content reader capability the core consumes but never implements
//! beyond a plain filesystem realisation — revision-scoped reads are an
//! external collaborator's concern (the VCS adapter in `depgraph-cli`).

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::ReadError;

/// `read(path) -> bytes | error`, safe to call from multiple threads.
///
/// A revision-scoped variant is obtained by wrapping a different
/// implementation of this trait around a commit identifier (see
/// `depgraph-cli::vcs::RevisionReader`) rather than by parameterising this
/// trait itself — keeping `read` single-argument is what lets parsers and
/// resolvers stay pure functions of `(path, reader)`.
pub trait ContentReader: Send + Sync {
    fn read(&self, path: &str) -> Result<Vec<u8>, ReadError>;
}

/// Reads files directly off the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsContentReader;

impl ContentReader for FsContentReader {
    fn read(&self, path: &str) -> Result<Vec<u8>, ReadError> {
        let p = Path::new(path);
        fs::read(p).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ReadError::NotFound(path.to_string()),
            std::io::ErrorKind::PermissionDenied => ReadError::Permission(path.to_string()),
            _ => ReadError::Io(path.to_string()),
        })
    }
}

impl<R: ContentReader + ?Sized> ContentReader for Arc<R> {
    fn read(&self, path: &str) -> Result<Vec<u8>, ReadError> {
        (**self).read(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let reader = FsContentReader;
        let err = reader.read("/does/not/exist/zzz.rs").unwrap_err();
        assert!(matches!(err, ReadError::NotFound(_)));
    }
}
