//! Error Types
//!
//! This module defines the error types returned by the importer.
//!
//! # Overview
//!
//! Only *fatal* conditions are surfaced as [`ColladaError`]:
//! - the document cannot be opened or parsed
//! - the document declares no `<scene>` element
//!
//! Everything else (unresolved references, unsupported primitives, invalid
//! faces, ...) is recovered locally and recorded as a
//! [`Diagnostic`](crate::assets::loaders::collada::Diagnostic) instead.
//!
//! # Usage
//!
//! ```rust,ignore
//! use myth_collada::errors::{ColladaError, Result};
//!
//! fn open() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the COLLADA importer.
#[derive(Error, Debug)]
pub enum ColladaError {
    // ========================================================================
    // Document Errors
    // ========================================================================
    /// The document could not be opened or its element tree is malformed.
    #[error("Failed to open COLLADA document `{uri}`: {reason}")]
    DocumentOpen {
        /// URI of the document that failed
        uri: String,
        /// Human readable cause
        reason: String,
    },

    /// The document has no `<scene>` element, so there is nothing to load.
    #[error("No scene element defined in COLLADA document `{0}`")]
    MissingScene(String),

    // ========================================================================
    // Asset Errors
    // ========================================================================
    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// The texture collaborator refused to create a texture.
    #[error("Texture unavailable: {0}")]
    TextureUnavailable(String),

    // ========================================================================
    // Format Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, ColladaError>`.
pub type Result<T> = std::result::Result<T, ColladaError>;
