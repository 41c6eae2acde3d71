//! The corpus boundary: where documents come from.
//!
//! The engine is agnostic about document storage. Anything that can
//! enumerate documents and return their text implements [`CorpusProvider`];
//! the build pipeline consumes the trait object and nothing else. A
//! filesystem implementation is provided for native targets.

use async_trait::async_trait;

use crate::{error::NotegraphError, properties::DocumentKind};

/// One enumerated corpus document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    /// Corpus-relative path with `/` separators. Doubles as the File node
    /// identity, so a provider must report each document under one stable
    /// path.
    pub path: String,
    pub kind: DocumentKind,
}

impl DocumentEntry {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        DocumentEntry {
            kind: DocumentKind::from_path(&path),
            path,
        }
    }
}

/// Source of corpus documents.
///
/// Enumeration failure is the one fatal condition in a refresh; a failure to
/// read an individual document is degraded per-document by the engine and
/// must not be turned into an `Err` by implementations of
/// [`list_documents`](CorpusProvider::list_documents).
#[async_trait]
pub trait CorpusProvider: Send + Sync {
    /// Enumerate all documents. Order is significant: it fixes node
    /// registration order and thereby resolution tie-breaking.
    async fn list_documents(&self) -> Result<Vec<DocumentEntry>, NotegraphError>;

    /// Return the full text of one document by its enumerated path.
    async fn read_document(&self, path: &str) -> Result<String, NotegraphError>;
}

#[cfg(not(target_arch = "wasm32"))]
pub use fs::FsCorpusProvider;

#[cfg(not(target_arch = "wasm32"))]
mod fs {
    use std::path::{Path, PathBuf};

    use async_trait::async_trait;
    use walkdir::WalkDir;

    use super::{CorpusProvider, DocumentEntry};
    use crate::error::NotegraphError;

    /// Reads a corpus from a directory tree.
    ///
    /// Documents are enumerated depth-first in lexicographic order, so the
    /// corpus order (and with it resolution tie-breaking) is stable across
    /// refreshes and platforms. Hidden entries are skipped.
    #[derive(Debug, Clone)]
    pub struct FsCorpusProvider {
        root: PathBuf,
    }

    impl FsCorpusProvider {
        pub fn new(root: impl Into<PathBuf>) -> Self {
            FsCorpusProvider { root: root.into() }
        }

        pub fn root(&self) -> &Path {
            &self.root
        }
    }

    fn is_hidden(entry: &walkdir::DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
    }

    #[async_trait]
    impl CorpusProvider for FsCorpusProvider {
        async fn list_documents(&self) -> Result<Vec<DocumentEntry>, NotegraphError> {
            let mut entries = Vec::new();
            let walker = WalkDir::new(&self.root)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

            for entry in walker {
                let entry = entry.map_err(|e| {
                    NotegraphError::Provider(format!(
                        "Cannot enumerate corpus at {}: {e}",
                        self.root.display()
                    ))
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let relative = entry
                    .path()
                    .strip_prefix(&self.root)
                    .map_err(|e| NotegraphError::Provider(format!("Path outside corpus: {e}")))?;
                let path = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                entries.push(DocumentEntry::new(path));
            }

            tracing::debug!(
                "Enumerated {} documents under {}",
                entries.len(),
                self.root.display()
            );
            Ok(entries)
        }

        async fn read_document(&self, path: &str) -> Result<String, NotegraphError> {
            Ok(tokio::fs::read_to_string(self.root.join(path)).await?)
        }
    }
}
