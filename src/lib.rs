#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! # Myth COLLADA
//!
//! Imports COLLADA documents into a Myth-style scene graph.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use myth_collada::{AssetServer, ColladaResource, JsonDocumentReader, Scene};
//!
//! let mut scene = Scene::new();
//! let assets = AssetServer::new();
//! let mut duck = ColladaResource::new(
//!     "duck.json",
//!     Arc::new(JsonDocumentReader::new("demos/assets")),
//!     Arc::new(assets.clone()),
//! );
//! let root = duck.load(&mut scene)?;
//! for warning in duck.diagnostics().entries() {
//!     println!("{warning}");
//! }
//! ```

pub mod assets;
pub mod dom;
pub mod errors;
pub mod resources;
pub mod scene;

pub use assets::loaders::{ColladaSettings, Diagnostic, DiagnosticKind, Diagnostics};
pub use assets::{
    AssetServer, ColladaResource, DocumentReader, JsonDocumentReader, MemoryDocumentReader, TextureFactory,
    TextureHandle,
};
pub use dom::{Document, ElementKind, ElementNode, UpAxis};
pub use errors::{ColladaError, Result};
pub use resources::{Face, FaceSet, Material, Texture};
pub use scene::{Node, NodeHandle, NodeKind, Scene, Transform};
