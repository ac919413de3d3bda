use slotmap::new_key_type;
use std::sync::Arc;
use uuid::Uuid;

use crate::assets::storage::AssetStorage;
use crate::errors::{ColladaError, Result};
use crate::resources::texture::Texture;

// Strongly-typed handles
new_key_type! {
    pub struct TextureHandle;
    /// Reserved for shader programs bound to a material. The importer never
    /// creates one.
    pub struct ShaderHandle;
}

/// Texture creation capability consumed by the material resolver.
///
/// Implementations register a texture resource for an image URI and hand back
/// a handle; pixel decoding is the implementation's business and may be
/// deferred. Creation is best-effort: an error only means the material ends up
/// without a texture.
pub trait TextureFactory: Send + Sync {
    fn create_texture(&self, uri: &str) -> Result<TextureHandle>;
}

// Asset Server

#[derive(Clone)] // AssetServer is lightweight and can be cloned freely
pub struct AssetServer {
    pub textures: Arc<AssetStorage<TextureHandle, Texture>>,
}

impl Default for AssetServer {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetServer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            textures: Arc::new(AssetStorage::new()),
        }
    }

    /// Stable identity of an image URI; the same URI always maps to the same texture.
    #[must_use]
    pub fn texture_uuid(uri: &str) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_URL, uri.as_bytes())
    }

    #[must_use]
    pub fn get_texture(&self, handle: TextureHandle) -> Option<Arc<Texture>> {
        self.textures.get(handle)
    }

    #[must_use]
    pub fn find_texture(&self, uri: &str) -> Option<TextureHandle> {
        self.textures.handle_for(&Self::texture_uuid(uri))
    }
}

impl TextureFactory for AssetServer {
    fn create_texture(&self, uri: &str) -> Result<TextureHandle> {
        if uri.trim().is_empty() {
            return Err(ColladaError::TextureUnavailable("empty image URI".to_string()));
        }
        let handle = self
            .textures
            .get_or_insert_with(Self::texture_uuid(uri), || Texture::from_uri(uri));
        log::debug!("Registered texture `{uri}`");
        Ok(handle)
    }
}
