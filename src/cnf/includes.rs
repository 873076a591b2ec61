//! Recursive `!include` / `!includedir` resolution
//!
//! Walks the top-level node sequence of a parsed file, constructs one nested
//! [`ConfigurationFile`] per referenced file and splices each successfully
//! parsed document into the parent. Failures stay local: a broken include is
//! recorded and the parent's own parse outcome is untouched.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::ast::{ConfigNode, KeyValueNode};
use super::document::Document;
use super::file::ConfigurationFile;
use super::fs::FileSystem;

/// The two include directive forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeDirective {
    File,
    Dir,
}

impl IncludeDirective {
    /// Classify a key/value node, if it is a directive
    pub fn of(node: &KeyValueNode) -> Option<IncludeDirective> {
        match node.key.as_str() {
            "!include" => Some(IncludeDirective::File),
            "!includedir" => Some(IncludeDirective::Dir),
            _ => None,
        }
    }
}

/// One resolved include: the declared path, whether the nested file parsed,
/// and the nested file itself
///
/// The nested file is exclusively owned by its record. It is absent only
/// when no file could be constructed at all (unlistable directory, rejected
/// cycle).
#[derive(Debug, Clone)]
pub struct IncludeRecord {
    pub declared_path: String,
    pub succeeded: bool,
    pub file: Option<ConfigurationFile>,
}

/// Threads the filesystem and the visited-path set through recursive
/// construction
pub(crate) struct Resolver<'a> {
    fs: &'a dyn FileSystem,
    visited: &'a mut HashSet<PathBuf>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(fs: &'a dyn FileSystem, visited: &'a mut HashSet<PathBuf>) -> Self {
        Self { fs, visited }
    }

    /// Resolve every directive in `nodes`, merging nested documents into
    /// `document` in declaration order
    pub(crate) fn resolve(
        &mut self,
        base_dir: &Path,
        nodes: &[ConfigNode],
        document: &mut Document,
    ) -> Vec<IncludeRecord> {
        let mut records = Vec::new();

        for node in nodes {
            let ConfigNode::KeyValue(kv) = node else {
                continue;
            };
            let Some(directive) = IncludeDirective::of(kv) else {
                continue;
            };
            let declared = kv.value.as_str();

            match directive {
                IncludeDirective::File => {
                    let path = resolve_path(base_dir, declared);
                    records.push(self.include_one(declared.to_string(), path, document));
                }
                IncludeDirective::Dir => {
                    let dir = resolve_path(base_dir, declared);
                    match self.fs.list_files(&dir) {
                        Ok(files) => {
                            for file in files {
                                let declared = file.display().to_string();
                                records.push(self.include_one(declared, file, document));
                            }
                        }
                        Err(error) => {
                            warn!(dir = %dir.display(), %error, "includedir not listable");
                            records.push(IncludeRecord {
                                declared_path: declared.to_string(),
                                succeeded: false,
                                file: None,
                            });
                        }
                    }
                }
            }
        }

        records
    }

    fn include_one(
        &mut self,
        declared_path: String,
        path: PathBuf,
        document: &mut Document,
    ) -> IncludeRecord {
        let identity = self.fs.canonicalize(&path);
        if !self.visited.insert(identity) {
            warn!(path = %path.display(), "include cycle rejected");
            return IncludeRecord {
                declared_path,
                succeeded: false,
                file: None,
            };
        }

        debug!(path = %path.display(), "resolving include");
        let nested = ConfigurationFile::build(path, self.fs, self.visited);
        let succeeded = nested.parse_succeeded();

        if succeeded {
            if let Some(nested_document) = nested.document() {
                document.merge_from(nested_document.clone());
            }
        }

        IncludeRecord {
            declared_path,
            succeeded,
            file: Some(nested),
        }
    }
}

/// Resolve a declared path against the including file's directory
fn resolve_path(base_dir: &Path, declared: &str) -> PathBuf {
    let declared = Path::new(declared);
    if declared.is_absolute() {
        declared.to_path_buf()
    } else {
        base_dir.join(declared)
    }
}
