//! Material and effect resolution.
//!
//! Flattens `<material>` → `<instance_effect>` → `<effect>` →
//! `<profile_COMMON>` → `<technique>` → shading model into one [`Material`].
//! Resolved materials are cached per source element, so every batch naming
//! the same material shares a single `Arc`.

use std::sync::Arc;

use glam::Vec4;
use rustc_hash::FxHashMap;

use crate::assets::io::resolve_relative_uri;
use crate::assets::loaders::collada::diagnostics::{DiagnosticKind, Diagnostics};
use crate::assets::server::{TextureFactory, TextureHandle};
use crate::dom::{
    ColorOrTexture, Document, ElementId, ElementKind, ElementTag, FloatOrParam, ParamValue, ShadingChannels,
    ShadingModel,
};
use crate::resources::material::Material;

/// `<instance_material symbol target>` pairs bound by one `<instance_geometry>`.
#[derive(Debug, Clone, Default)]
pub struct MaterialBindings<'doc> {
    targets: FxHashMap<&'doc str, &'doc str>,
}

impl<'doc> MaterialBindings<'doc> {
    /// Collects the bindings under `instance`'s `<bind_material>`.
    #[must_use]
    pub fn collect(doc: &'doc Document, instance: ElementId) -> Self {
        let mut targets = FxHashMap::default();
        for binding in doc.descendants_of(instance, ElementTag::InstanceMaterial) {
            if let Some(ElementKind::InstanceMaterial { symbol, target }) = doc.kind(binding) {
                targets.entry(symbol.as_str()).or_insert(target.as_str());
            }
        }
        Self { targets }
    }

    #[must_use]
    pub fn target(&self, symbol: &str) -> Option<&'doc str> {
        self.targets.get(symbol).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// `<newparam sid>` values of one profile.
type ParamTable<'doc> = FxHashMap<&'doc str, &'doc ParamValue>;

pub struct MaterialResolver<'a> {
    doc: &'a Document,
    document_uri: &'a str,
    textures: &'a dyn TextureFactory,
    cache: FxHashMap<ElementId, Arc<Material>>,
    fallback: Arc<Material>,
}

impl<'a> MaterialResolver<'a> {
    #[must_use]
    pub fn new(doc: &'a Document, document_uri: &'a str, textures: &'a dyn TextureFactory) -> Self {
        Self {
            doc,
            document_uri,
            textures,
            cache: FxHashMap::default(),
            fallback: Arc::new(Material::default()),
        }
    }

    /// Resolves the `material` symbol of a primitive batch.
    ///
    /// The symbol is looked up in the instance bindings first, then as a
    /// document-wide id. Anything unresolved yields the shared default
    /// material.
    pub fn resolve(
        &mut self,
        symbol: Option<&str>,
        bindings: &MaterialBindings<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Arc<Material> {
        let Some(symbol) = symbol else {
            log::debug!("Primitive batch has no material symbol, using default material");
            return Arc::clone(&self.fallback);
        };
        let reference = bindings.target(symbol).unwrap_or(symbol);
        let material = self
            .doc
            .resolve_id_ref(reference)
            .filter(|&m| self.doc.tag(m) == Some(ElementTag::Material));
        match material {
            Some(id) => self.resolve_element(id, diagnostics),
            None => {
                diagnostics.warn(
                    DiagnosticKind::UnresolvedMaterial,
                    format!("Material `{symbol}` could not be resolved, using default material"),
                );
                Arc::clone(&self.fallback)
            }
        }
    }

    /// Resolves a `<material>` element, consulting the cache first.
    pub fn resolve_element(&mut self, material: ElementId, diagnostics: &mut Diagnostics) -> Arc<Material> {
        if let Some(cached) = self.cache.get(&material) {
            return Arc::clone(cached);
        }
        let resolved = Arc::new(self.build(material, diagnostics));
        self.cache.insert(material, Arc::clone(&resolved));
        resolved
    }

    /// Number of distinct materials resolved so far.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn build(&self, material_id: ElementId, diagnostics: &mut Diagnostics) -> Material {
        let doc = self.doc;
        let mut material = Material::new();
        let declared = doc.get(material_id).and_then(|e| e.id.as_deref());
        material.name = declared.map(str::to_owned);
        let label = declared.unwrap_or("<unnamed>");

        let effect_url = doc
            .first_child_of(material_id, ElementTag::InstanceEffect)
            .and_then(|inst| match doc.kind(inst) {
                Some(ElementKind::InstanceEffect { url }) => Some(url.as_str()),
                _ => None,
            });
        let effect = effect_url
            .and_then(|url| doc.resolve_uri(url))
            .filter(|&e| doc.tag(e) == Some(ElementTag::Effect));
        let Some(effect) = effect else {
            diagnostics.warn(
                DiagnosticKind::UnresolvedEffect,
                format!(
                    "Material `{label}` references unknown effect `{}`",
                    effect_url.unwrap_or_default()
                ),
            );
            return material;
        };

        for &profile in doc.children(effect) {
            match doc.tag(profile) {
                Some(ElementTag::ProfileCommon) => self.read_profile(profile, &mut material, diagnostics),
                Some(ElementTag::ProfileOther) => {
                    log::debug!("Material `{label}`: ignoring non-common effect profile");
                }
                _ => {}
            }
        }
        material
    }

    fn read_profile(&self, profile: ElementId, material: &mut Material, diagnostics: &mut Diagnostics) {
        let doc = self.doc;
        let mut params = ParamTable::default();
        for param in doc.descendants_of(profile, ElementTag::Newparam) {
            let Some(element) = doc.get(param) else { continue };
            if let (Some(sid), ElementKind::Newparam(value)) = (element.sid.as_deref(), &element.kind) {
                params.insert(sid, value);
            }
        }

        for technique in doc.children_of(profile, ElementTag::Technique) {
            for &body in doc.children(technique) {
                if let Some((model, channels)) = doc.kind(body).and_then(ElementKind::as_shading) {
                    self.read_shading(model, channels, &params, material, diagnostics);
                }
            }
        }
    }

    fn read_shading(
        &self,
        model: ShadingModel,
        channels: &ShadingChannels,
        params: &ParamTable<'_>,
        material: &mut Material,
        diagnostics: &mut Diagnostics,
    ) {
        material.shading_model = Some(model);

        if let Some(color) = self.channel_color(channels.emission.as_ref(), params, diagnostics) {
            material.emission = color;
        }
        if model.has_diffuse() {
            if let Some(color) = self.channel_color(channels.ambient.as_ref(), params, diagnostics) {
                material.ambient = color;
            }
            match &channels.diffuse {
                Some(ColorOrTexture::Texture { texture, .. }) => {
                    if let Some(handle) = self.resolve_texture(texture, params, diagnostics) {
                        material.texture = Some(handle);
                    }
                }
                other => {
                    if let Some(color) = self.channel_color(other.as_ref(), params, diagnostics) {
                        material.diffuse = color;
                    }
                }
            }
        }
        if model.has_specular() {
            if let Some(color) = self.channel_color(channels.specular.as_ref(), params, diagnostics) {
                material.specular = color;
            }
            match &channels.shininess {
                Some(FloatOrParam::Float(value)) => material.shininess = *value,
                Some(FloatOrParam::Param(name)) => match params.get(name.as_str()) {
                    Some(ParamValue::Float { value }) => material.shininess = *value,
                    _ => diagnostics.warn(
                        DiagnosticKind::UnresolvedParam,
                        format!("Shininess param `{name}` does not name a float"),
                    ),
                },
                None => {}
            }
        }
    }

    fn channel_color(
        &self,
        channel: Option<&ColorOrTexture>,
        params: &ParamTable<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Option<Vec4> {
        match channel? {
            ColorOrTexture::Color(rgba) => Some(Vec4::from_array(*rgba)),
            ColorOrTexture::Param(name) => match params.get(name.as_str()) {
                Some(ParamValue::Float4 { value }) => Some(Vec4::from_array(*value)),
                _ => {
                    diagnostics.warn(
                        DiagnosticKind::UnresolvedParam,
                        format!("Color param `{name}` does not name a float4"),
                    );
                    None
                }
            },
            ColorOrTexture::Texture { texture, .. } => {
                log::debug!("Texture `{texture}` outside the diffuse channel is ignored");
                None
            }
        }
    }

    /// Follows a `<texture texture="...">` symbol to an image and creates the
    /// texture for it.
    fn resolve_texture(
        &self,
        symbol: &str,
        params: &ParamTable<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Option<TextureHandle> {
        let doc = self.doc;
        if let Some(image) = doc
            .resolve_id_ref(symbol)
            .filter(|&i| doc.tag(i) == Some(ElementTag::Image))
        {
            return self.create_texture(image, diagnostics);
        }

        let surface = match params.get(symbol) {
            Some(ParamValue::Sampler2D { source }) => params.get(source.as_str()),
            _ => {
                diagnostics.warn(
                    DiagnosticKind::UnresolvedTexture,
                    format!("Texture `{symbol}` names neither an image nor a sampler2D param"),
                );
                return None;
            }
        };
        let image_ref = match surface {
            Some(ParamValue::Surface { init_from, .. }) => init_from.first(),
            _ => {
                diagnostics.warn(
                    DiagnosticKind::UnresolvedTexture,
                    format!("Sampler `{symbol}` does not reference a surface param"),
                );
                return None;
            }
        };
        let image = image_ref
            .and_then(|r| doc.resolve_id_ref(r))
            .filter(|&i| doc.tag(i) == Some(ElementTag::Image));
        let Some(image) = image else {
            diagnostics.warn(
                DiagnosticKind::UnresolvedTexture,
                format!(
                    "Surface for `{symbol}` references unknown image `{}`",
                    image_ref.map_or("", String::as_str)
                ),
            );
            return None;
        };
        self.create_texture(image, diagnostics)
    }

    fn create_texture(&self, image: ElementId, diagnostics: &mut Diagnostics) -> Option<TextureHandle> {
        let Some(ElementKind::Image {
            init_from: Some(reference),
        }) = self.doc.kind(image)
        else {
            diagnostics.warn(DiagnosticKind::UnresolvedTexture, "Image has no init_from source");
            return None;
        };
        let uri = resolve_relative_uri(self.document_uri, reference);
        match self.textures.create_texture(&uri) {
            Ok(handle) => Some(handle),
            Err(e) => {
                diagnostics.warn(
                    DiagnosticKind::TextureCreationFailed,
                    format!("Failed to create texture `{uri}`: {e}"),
                );
                None
            }
        }
    }
}
