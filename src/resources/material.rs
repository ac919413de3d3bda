use glam::Vec4;

use crate::assets::{ShaderHandle, TextureHandle};
use crate::dom::ShadingModel;

/// Flattened fixed-function material.
///
/// Produced by the COLLADA effect resolver from a `<material>` →
/// `<effect>` → `<profile_COMMON>` chain. Colors default to zero (black,
/// fully transparent) and are only overwritten by channels the shading model
/// actually defines.
///
/// Materials are shared through `Arc` once resolved and never mutated again.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Declared `id` of the source `<material>` element, if any.
    pub name: Option<String>,
    /// Last shading model read into this material.
    pub shading_model: Option<ShadingModel>,

    pub diffuse: Vec4,
    pub ambient: Vec4,
    pub specular: Vec4,
    pub emission: Vec4,
    pub shininess: f32,

    /// Texture bound to the diffuse channel.
    pub texture: Option<TextureHandle>,
    /// Shader override. Nothing in the importer populates it.
    pub shader: Option<ShaderHandle>,
}

impl Material {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: None,
            shading_model: None,
            diffuse: Vec4::ZERO,
            ambient: Vec4::ZERO,
            specular: Vec4::ZERO,
            emission: Vec4::ZERO,
            shininess: 0.0,
            texture: None,
            shader: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}
