//! Configuration file lifecycle: read, parse, resolve includes
//!
//! [`ConfigurationFile`] owns everything derived from one file on disk: the
//! raw contents, the parse outcome, the merged document and the include
//! records. IO failures and syntax failures are kept apart and surfaced
//! through separate accessors; neither is ever folded into a default value.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use super::ast::ConfigurationTree;
use super::document::Document;
use super::fs::{FileSystem, LocalFileSystem};
use super::grammar::{self, SyntaxError};
use super::includes::{IncludeRecord, Resolver};
use super::query::{self, QueryOutcome};
use super::stats::Statistics;

/// One configuration file and everything derived from it
///
/// A file whose parse failed has no document, no statistics and an empty
/// include list; accessors return `None` rather than misleading zeros.
#[derive(Debug, Clone)]
pub struct ConfigurationFile {
    file_path: PathBuf,
    file_contents: Option<String>,
    last_io_error: Option<String>,
    last_syntax_error: Option<SyntaxError>,
    parse_succeeded: bool,
    tree: Option<ConfigurationTree>,
    document: Option<Document>,
    includes: Vec<IncludeRecord>,
}

impl ConfigurationFile {
    /// Read and parse `path` from the local filesystem, resolving includes
    /// recursively
    pub fn load(path: impl Into<PathBuf>) -> Self {
        Self::load_with(path, &LocalFileSystem)
    }

    /// Same as [`load`](Self::load) with an explicit filesystem
    pub fn load_with(path: impl Into<PathBuf>, fs: &dyn FileSystem) -> Self {
        let path = path.into();
        let mut visited = HashSet::new();
        visited.insert(fs.canonicalize(&path));
        Self::build(path, fs, &mut visited)
    }

    /// Construct one file, threading the visited-path set so include cycles
    /// are rejected instead of recursing forever
    pub(crate) fn build(
        path: PathBuf,
        fs: &dyn FileSystem,
        visited: &mut HashSet<PathBuf>,
    ) -> Self {
        let mut file = ConfigurationFile {
            file_path: path,
            file_contents: None,
            last_io_error: None,
            last_syntax_error: None,
            parse_succeeded: false,
            tree: None,
            document: None,
            includes: Vec::new(),
        };

        if !fs.exists(&file.file_path) {
            file.last_io_error = Some(format!("file not found: {}", file.file_path.display()));
            return file;
        }

        let contents = match fs.read_to_string(&file.file_path) {
            Ok(contents) => contents,
            Err(error) => {
                file.last_io_error = Some(error.to_string());
                return file;
            }
        };

        let tree = match grammar::parse_tree(&contents) {
            Ok(tree) => tree,
            Err(error) => {
                file.file_contents = Some(contents);
                file.last_syntax_error = Some(error);
                return file;
            }
        };
        debug!(path = %file.file_path.display(), nodes = tree.nodes.len(), "parsed");

        let file_name = file.file_name();
        let mut document = Document::from_tree(&tree, &file_name);

        let base_dir = file
            .file_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let mut resolver = Resolver::new(fs, visited);
        file.includes = resolver.resolve(&base_dir, &tree.nodes, &mut document);

        file.file_contents = Some(contents);
        file.tree = Some(tree);
        file.document = Some(document);
        file.parse_succeeded = true;
        file
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Short name used for `File` attributes and per-file statistics
    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_path.display().to_string())
    }

    pub fn contents(&self) -> Option<&str> {
        self.file_contents.as_deref()
    }

    pub fn parse_succeeded(&self) -> bool {
        self.parse_succeeded
    }

    pub fn last_io_error(&self) -> Option<&str> {
        self.last_io_error.as_deref()
    }

    pub fn last_syntax_error(&self) -> Option<&SyntaxError> {
        self.last_syntax_error.as_ref()
    }

    pub fn tree(&self) -> Option<&ConfigurationTree> {
        self.tree.as_ref()
    }

    /// The merged document, including spliced-in include content
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Include records in declaration order (directory entries in name
    /// order)
    pub fn includes(&self) -> &[IncludeRecord] {
        &self.includes
    }

    /// Derived statistics; `None` until a successful parse
    pub fn statistics(&self) -> Option<Statistics> {
        self.document
            .as_ref()
            .map(|document| Statistics::derive(document, &self.includes, &self.file_name()))
    }

    /// Evaluate path queries against the merged document; `None` until a
    /// successful parse
    ///
    /// Each expression gets its own outcome; a malformed expression reports
    /// an error without aborting the rest of the batch.
    pub fn evaluate<S: AsRef<str>>(
        &self,
        expressions: &[S],
    ) -> Option<IndexMap<String, QueryOutcome>> {
        self.document
            .as_ref()
            .map(|document| query::evaluate(document, expressions))
    }
}
