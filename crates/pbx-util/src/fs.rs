//! Filesystem access behind a trait seam.
//!
//! The document layer never touches `std::fs` directly; it goes through
//! [`Filesystem`] so tests can run against an in-memory tree.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::path::normalize_path;

/// Read-mostly filesystem operations the document layer depends on.
pub trait Filesystem {
    /// Whether `path` exists and is readable.
    fn is_readable(&self, path: &Path) -> bool;

    /// Resolve `path` to a canonical absolute form, if it exists.
    fn resolve_path(&self, path: &Path) -> Option<PathBuf>;

    /// Read the full contents of `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write `contents` to `path`, replacing any existing file.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Default)]
pub struct HostFilesystem;

impl HostFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for HostFilesystem {
    fn is_readable(&self, path: &Path) -> bool {
        std::fs::File::open(path).is_ok()
    }

    fn resolve_path(&self, path: &Path) -> Option<PathBuf> {
        std::fs::canonicalize(path).ok()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// An in-memory filesystem for tests.
///
/// Paths are stored normalized, so `/a/./b` and `/a/b` address the same
/// file.
#[derive(Debug, Default)]
pub struct MemoryFilesystem {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating or replacing it.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        let path = normalize_path(&path.into());
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(path, contents.into());
    }

    /// Fetch a file's contents, if present.
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        let path = normalize_path(path);
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&path)
            .cloned()
    }
}

impl Filesystem for MemoryFilesystem {
    fn is_readable(&self, path: &Path) -> bool {
        self.contents(path).is_some()
    }

    fn resolve_path(&self, path: &Path) -> Option<PathBuf> {
        let path = normalize_path(path);
        self.is_readable(&path).then_some(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.contents(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_filesystem_round_trips() {
        let fs = MemoryFilesystem::new();
        fs.insert("/proj/project.pbxproj", b"{ }".to_vec());
        assert!(fs.is_readable(Path::new("/proj/project.pbxproj")));
        assert_eq!(
            fs.read(Path::new("/proj/project.pbxproj")).unwrap(),
            b"{ }".to_vec()
        );
        assert!(!fs.is_readable(Path::new("/proj/missing")));
    }

    #[test]
    fn memory_filesystem_normalizes_lookups() {
        let fs = MemoryFilesystem::new();
        fs.insert("/proj/project.pbxproj", b"x".to_vec());
        assert!(fs.is_readable(Path::new("/proj/./project.pbxproj")));
        assert_eq!(
            fs.resolve_path(Path::new("/proj/./project.pbxproj")),
            Some(PathBuf::from("/proj/project.pbxproj"))
        );
    }

    #[test]
    fn host_filesystem_reads_written_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.txt");
        let fs = HostFilesystem::new();
        fs.write(&path, b"contents").unwrap();
        assert!(fs.is_readable(&path));
        assert_eq!(fs.read(&path).unwrap(), b"contents".to_vec());
        assert!(fs.resolve_path(&path).is_some());
    }
}
