use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::dom::{Document, ElementNode};
use crate::errors::{ColladaError, Result};

/// Document reader trait.
///
/// Produces a typed [`Document`] for a URI. The XML parser itself lives
/// behind this trait; the importer only consumes the element tree.
pub trait DocumentReader: Send + Sync {
    fn read_document(&self, uri: &str) -> Result<Document>;
}

/// Reads JSON snapshots of an element tree from the local file system.
pub struct JsonDocumentReader {
    root_path: PathBuf,
}

impl JsonDocumentReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let root_path = if path.is_file() {
            path.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            path.to_path_buf()
        };
        Self { root_path }
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Parses an element tree snapshot from a JSON string.
    pub fn parse_str(json: &str) -> Result<Document> {
        let tree: ElementNode = serde_json::from_str(json)?;
        Ok(Document::from_tree(tree))
    }
}

impl DocumentReader for JsonDocumentReader {
    fn read_document(&self, uri: &str) -> Result<Document> {
        let path = self.root_path.join(uri);
        let file = std::fs::File::open(&path).map_err(|e| ColladaError::DocumentOpen {
            uri: uri.to_string(),
            reason: format!("{}: {e}", path.display()),
        })?;
        let reader = std::io::BufReader::new(file);
        let tree: ElementNode =
            serde_json::from_reader(reader).map_err(|e| ColladaError::DocumentOpen {
                uri: uri.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Document::from_tree(tree))
    }
}

/// In-memory document reader, keyed by URI.
#[derive(Default)]
pub struct MemoryDocumentReader {
    documents: FxHashMap<String, ElementNode>,
}

impl MemoryDocumentReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, uri: impl Into<String>, tree: ElementNode) {
        self.documents.insert(uri.into(), tree);
    }

    #[must_use]
    pub fn with_document(mut self, uri: impl Into<String>, tree: ElementNode) -> Self {
        self.insert(uri, tree);
        self
    }
}

impl DocumentReader for MemoryDocumentReader {
    fn read_document(&self, uri: &str) -> Result<Document> {
        self.documents
            .get(uri)
            .cloned()
            .map(Document::from_tree)
            .ok_or_else(|| ColladaError::AssetNotFound(uri.to_string()))
    }
}

/// Resolves an image reference found in a document against the document's
/// own location. Absolute paths and URIs with a scheme are returned as-is,
/// except that a `file://` prefix is stripped.
#[must_use]
pub fn resolve_relative_uri(document_uri: &str, reference: &str) -> String {
    if let Some(stripped) = reference.strip_prefix("file://") {
        return stripped.to_string();
    }
    if reference.contains("://") || Path::new(reference).is_absolute() {
        return reference.to_string();
    }
    match Path::new(document_uri).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(reference).to_string_lossy().into_owned(),
        _ => reference.to_string(),
    }
}
