//! Derived statistics over a merged document
//!
//! All metrics are pure functions of the immutable document and the include
//! records; per-file metrics are scoped through the `File` attribute the
//! document builder and include resolver leave on every element.

use serde::Serialize;

use super::document::{Document, ElementKind};
use super::includes::IncludeRecord;

/// Summary metrics for one configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statistics {
    /// Count of include records
    pub total_include_files: usize,
    /// Count of include records whose nested file parsed
    pub include_files_parsed: usize,
    /// Direct children of the merged root
    pub total_top_level_nodes: usize,
    /// Direct children of the root tagged with this file's own name
    pub total_file_top_level_nodes: usize,
    /// Smallest `Line` among own-file descendants; 0 if none
    pub first_line_parsed: usize,
    /// Largest `Line` among own-file descendants; 0 if none
    pub last_line_parsed: usize,
    /// Comment elements in the whole merged document
    pub total_comments: usize,
    /// Comment elements tagged with this file's own name
    pub total_file_comments: usize,
    /// Key elements tagged with this file's own name
    pub total_keys: usize,
}

impl Statistics {
    pub(crate) fn derive(
        document: &Document,
        includes: &[IncludeRecord],
        file_name: &str,
    ) -> Statistics {
        let root = &document.root;

        let mut first_line_parsed = 0;
        let mut last_line_parsed = 0;
        let mut total_comments = 0;
        let mut total_file_comments = 0;
        let mut total_keys = 0;

        for element in root.descendants() {
            let own = element.file() == Some(file_name);

            if element.kind == ElementKind::Comment {
                total_comments += 1;
                if own {
                    total_file_comments += 1;
                }
            }
            if own && element.kind == ElementKind::Key {
                total_keys += 1;
            }
            if own {
                if let Some(line) = element.line() {
                    if first_line_parsed == 0 || line < first_line_parsed {
                        first_line_parsed = line;
                    }
                    if line > last_line_parsed {
                        last_line_parsed = line;
                    }
                }
            }
        }

        Statistics {
            total_include_files: includes.len(),
            include_files_parsed: includes.iter().filter(|r| r.succeeded).count(),
            total_top_level_nodes: root.children.len(),
            total_file_top_level_nodes: root
                .children
                .iter()
                .filter(|e| e.file() == Some(file_name))
                .count(),
            first_line_parsed,
            last_line_parsed,
            total_comments,
            total_file_comments,
            total_keys,
        }
    }
}
