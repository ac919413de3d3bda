//! Shared fixture builders for the integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use glam::{Vec3, Vec4};
use myth_collada::assets::{AssetServer, ColladaResource, MemoryDocumentReader, TextureFactory, TextureHandle};
use myth_collada::dom::{ElementKind, ElementNode, ParamValue, ShadingChannels, SurfaceType, UpAxis};
use myth_collada::errors::{ColladaError, Result};
use myth_collada::scene::{NodeHandle, Scene};

pub const EPSILON: f32 = 1e-5;

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

pub fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

pub fn vec4_approx(a: Vec4, b: Vec4) -> bool {
    (a - b).abs().max_element() < EPSILON
}

// ============================================================================
// Element builders
// ============================================================================

pub fn el(kind: ElementKind) -> ElementNode {
    ElementNode::new(kind)
}

pub fn float_source(id: &str, values: Vec<f32>, stride: usize) -> ElementNode {
    let count = values.len() / stride.max(1);
    el(ElementKind::Source)
        .with_id(id)
        .with_child(el(ElementKind::FloatArray { values }).with_id(format!("{id}-array")))
        .with_child(el(ElementKind::TechniqueCommon).with_child(el(ElementKind::Accessor {
            source: format!("#{id}-array"),
            count,
            stride,
        })))
}

pub fn input(semantic: &str, source: &str, offset: u32) -> ElementNode {
    el(ElementKind::Input {
        semantic: semantic.to_string(),
        source: source.to_string(),
        offset,
        set: None,
    })
}

pub fn vertices(id: &str, position_source: &str) -> ElementNode {
    el(ElementKind::Vertices)
        .with_id(id)
        .with_child(input("POSITION", position_source, 0))
}

pub fn triangles(material: Option<&str>, inputs: Vec<ElementNode>, indices: Vec<u32>) -> ElementNode {
    let count = indices.len();
    el(ElementKind::Triangles {
        material: material.map(str::to_string),
        count,
    })
    .with_children(inputs)
    .with_child(el(ElementKind::P { values: indices }))
}

pub fn geometry(id: &str, mesh_children: Vec<ElementNode>) -> ElementNode {
    el(ElementKind::Geometry)
        .with_id(id)
        .with_child(el(ElementKind::Mesh).with_children(mesh_children))
}

/// Unit quad in the XY plane: four positions, two triangles via `<vertices>`.
pub fn quad_geometry(id: &str, material: Option<&str>) -> ElementNode {
    geometry(
        id,
        vec![
            float_source(
                &format!("{id}-pos"),
                vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0],
                3,
            ),
            vertices(&format!("{id}-verts"), &format!("#{id}-pos")),
            triangles(
                material,
                vec![input("VERTEX", &format!("#{id}-verts"), 0)],
                vec![0, 1, 2, 2, 1, 3],
            ),
        ],
    )
}

pub fn node(id: &str, children: Vec<ElementNode>) -> ElementNode {
    el(ElementKind::Node).with_id(id).with_name(id).with_children(children)
}

pub fn translate(x: f32, y: f32, z: f32) -> ElementNode {
    el(ElementKind::Translate { value: [x, y, z] })
}

pub fn instance_geometry(url: &str, bindings: &[(&str, &str)]) -> ElementNode {
    let mut instance = el(ElementKind::InstanceGeometry { url: url.to_string() });
    if !bindings.is_empty() {
        let technique = el(ElementKind::TechniqueCommon).with_children(bindings.iter().map(|(symbol, target)| {
            el(ElementKind::InstanceMaterial {
                symbol: (*symbol).to_string(),
                target: (*target).to_string(),
            })
        }));
        instance = instance.with_child(el(ElementKind::BindMaterial).with_child(technique));
    }
    instance
}

pub fn instance_node(url: &str) -> ElementNode {
    el(ElementKind::InstanceNode { url: url.to_string() })
}

pub fn material(id: &str, effect_url: &str) -> ElementNode {
    el(ElementKind::Material)
        .with_id(id)
        .with_child(el(ElementKind::InstanceEffect {
            url: effect_url.to_string(),
        }))
}

pub fn effect(id: &str, profiles: Vec<ElementNode>) -> ElementNode {
    el(ElementKind::Effect).with_id(id).with_children(profiles)
}

pub fn profile_common(params: Vec<ElementNode>, shading: ElementKind) -> ElementNode {
    el(ElementKind::ProfileCommon)
        .with_children(params)
        .with_child(el(ElementKind::Technique).with_sid("common").with_child(el(shading)))
}

pub fn newparam(sid: &str, value: ParamValue) -> ElementNode {
    el(ElementKind::Newparam(value)).with_sid(sid)
}

pub fn surface_param(sid: &str, image: &str) -> ElementNode {
    newparam(
        sid,
        ParamValue::Surface {
            surface_type: SurfaceType::D2,
            init_from: vec![image.to_string()],
        },
    )
}

pub fn sampler_param(sid: &str, surface: &str) -> ElementNode {
    newparam(
        sid,
        ParamValue::Sampler2D {
            source: surface.to_string(),
        },
    )
}

pub fn image(id: &str, uri: &str) -> ElementNode {
    el(ElementKind::Image {
        init_from: Some(uri.to_string()),
    })
    .with_id(id)
}

pub fn phong(diffuse: [f32; 4]) -> ElementKind {
    ElementKind::Phong(ShadingChannels {
        diffuse: Some(myth_collada::dom::ColorOrTexture::Color(diffuse)),
        ..ShadingChannels::default()
    })
}

pub fn library(children: Vec<ElementNode>) -> ElementNode {
    el(ElementKind::Library).with_children(children)
}

/// A complete document: `<asset>`, the given libraries, one visual scene
/// holding `nodes`, and a `<scene>` instantiating it.
pub fn document(up_axis: UpAxis, libraries: Vec<ElementNode>, nodes: Vec<ElementNode>) -> ElementNode {
    el(ElementKind::Collada)
        .with_child(el(ElementKind::Asset { up_axis }))
        .with_children(libraries)
        .with_child(library(vec![el(ElementKind::VisualScene).with_id("scene").with_children(nodes)]))
        .with_child(el(ElementKind::Scene).with_child(el(ElementKind::InstanceVisualScene {
            url: "#scene".to_string(),
        })))
}

// ============================================================================
// Loading helpers
// ============================================================================

pub const DOCUMENT_URI: &str = "models/test.dae";

pub fn resource_for(tree: ElementNode, assets: &AssetServer) -> ColladaResource {
    let reader = MemoryDocumentReader::new().with_document(DOCUMENT_URI, tree);
    ColladaResource::new(DOCUMENT_URI, Arc::new(reader), Arc::new(assets.clone()))
}

/// Loads `tree` into a fresh scene.
pub fn load(tree: ElementNode) -> (Scene, ColladaResource, NodeHandle) {
    let assets = AssetServer::new();
    let mut resource = resource_for(tree, &assets);
    let mut scene = Scene::new();
    let root = resource.load(&mut scene).expect("document should load");
    (scene, resource, root)
}

/// Texture factory that refuses every request.
pub struct FailingTextures;

impl TextureFactory for FailingTextures {
    fn create_texture(&self, uri: &str) -> Result<TextureHandle> {
        Err(ColladaError::TextureUnavailable(uri.to_string()))
    }
}
