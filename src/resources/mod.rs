//! Engine-side resources produced by the importer.
//!
//! - [`Material`]: flattened fixed-function shading record
//! - [`Face`] / [`FaceSet`]: triangle soup with per-corner attributes
//! - [`Texture`]: texture record keyed by image URI

pub mod material;
pub mod mesh;
pub mod texture;

pub use material::Material;
pub use mesh::{DEFAULT_VERTEX_COLOR, Face, FaceError, FaceSet};
pub use texture::Texture;
