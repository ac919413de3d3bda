use std::path::Path;

/// Texture resource record.
///
/// Only the source URI is kept; decoding the pixels is left to whoever
/// consumes the record (renderer upload, streaming, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub name: Option<String>,
    pub uri: String,
}

impl Texture {
    /// Creates a texture named after the file stem of `uri`.
    #[must_use]
    pub fn from_uri(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let name = Path::new(&uri)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(ToString::to_string);
        Self { name, uri }
    }
}
