//! Filesystem boundary used by the include resolver
//!
//! The core only needs existence checks, whole-file reads and flat directory
//! listings; everything else about the host filesystem stays outside. Tests
//! and embedders can substitute their own implementation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// The filesystem surface the configuration core consumes
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Regular files directly inside `dir`, sorted by file name
    ///
    /// Not recursive and not filtered by extension.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Stable identity for a path, used for visited-path tracking
    fn canonicalize(&self, path: &Path) -> PathBuf;
}

/// [`FileSystem`] backed by `std::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
        debug!(dir = %dir.display(), count = files.len(), "listed include directory");
        Ok(files)
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }
}
