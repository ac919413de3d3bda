//! Document Object Model
//!
//! Typed element tree of a COLLADA document:
//! - [`ElementKind`]: closed set of element payloads the importer consumes
//! - [`ElementNode`]: owned nested tree, the form produced by a parser or a snapshot
//! - [`Document`]: arena form with id / URI / sid resolution

pub mod document;
pub mod element;

pub use document::{Document, Element, ElementId};
pub use element::{
    ColorOrTexture, ElementKind, ElementNode, ElementTag, FloatOrParam, ParamValue, ShadingChannels,
    ShadingModel, SurfaceType, UpAxis,
};
