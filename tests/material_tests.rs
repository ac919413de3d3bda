//! Material & Effect Resolution Tests
//!
//! Tests for:
//! - Material cache: shared instances, default material for unknown symbols
//! - Shading models: which channels each model reads
//! - Texture chain: sampler → surface → image, direct image references
//! - Failure handling: broken chains, refusing texture factories
//! - Multiple profiles and `<bind_material>` symbol binding

mod common;

use std::path::Path;
use std::sync::Arc;

use common::*;
use glam::Vec4;
use myth_collada::assets::{AssetServer, ColladaResource, MemoryDocumentReader};
use myth_collada::assets::loaders::collada::DiagnosticKind;
use myth_collada::dom::{ColorOrTexture, ElementKind, ElementNode, FloatOrParam, ParamValue, ShadingChannels, ShadingModel, UpAxis};
use myth_collada::resources::Material;
use myth_collada::scene::{NodeHandle, Scene};

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

fn materials_of(scene: &Scene, root: NodeHandle) -> Vec<Arc<Material>> {
    scene
        .geometry_under(root)
        .into_iter()
        .flat_map(|(_, faces, _)| faces.iter().map(|f| Arc::clone(&f.material)).collect::<Vec<_>>())
        .collect()
}

/// One quad instanced once, its batch naming `symbol`.
fn quad_document(symbol: &str, libraries: Vec<ElementNode>) -> ElementNode {
    let mut libs = vec![library(vec![quad_geometry("quad", Some(symbol))])];
    libs.extend(libraries);
    document(
        UpAxis::YUp,
        libs,
        vec![node("n", vec![instance_geometry("#quad", &[])])],
    )
}

fn red_phong_library() -> Vec<ElementNode> {
    vec![
        library(vec![material("mat-red", "#fx-red")]),
        library(vec![effect("fx-red", vec![profile_common(vec![], phong(RED))])]),
    ]
}

fn load_with_assets(tree: ElementNode) -> (Scene, ColladaResource, NodeHandle, AssetServer) {
    let assets = AssetServer::new();
    let mut resource = resource_for(tree, &assets);
    let mut scene = Scene::new();
    let root = resource.load(&mut scene).unwrap();
    (scene, resource, root, assets)
}

// ============================================================================
// Cache
// ============================================================================

#[test]
fn material_cache_shares_instance_between_batches() {
    let mut libs = red_phong_library();
    libs.push(library(vec![quad_geometry("quad-b", Some("mat-red"))]));
    let tree = document(
        UpAxis::YUp,
        [vec![library(vec![quad_geometry("quad-a", Some("mat-red"))])], libs].concat(),
        vec![node(
            "n",
            vec![instance_geometry("#quad-a", &[]), instance_geometry("#quad-b", &[])],
        )],
    );
    let (scene, resource, root) = load(tree);

    let materials = materials_of(&scene, root);
    assert_eq!(materials.len(), 4);
    assert!(materials.iter().all(|m| Arc::ptr_eq(m, &materials[0])));
    assert_eq!(materials[0].diffuse, Vec4::from_array(RED));
    assert_eq!(materials[0].name.as_deref(), Some("mat-red"));
    assert!(resource.diagnostics().is_empty());
}

#[test]
fn material_unknown_symbol_yields_default() {
    let (scene, resource, root) = load(quad_document("missing", vec![]));

    let materials = materials_of(&scene, root);
    assert_eq!(materials.len(), 2);
    assert_eq!(*materials[0], Material::default());
    assert_eq!(materials[0].diffuse, Vec4::ZERO);
    assert_eq!(resource.diagnostics().count(DiagnosticKind::UnresolvedMaterial), 1);
}

#[test]
fn material_unresolved_effect_is_cached() {
    let tree = document(
        UpAxis::YUp,
        vec![
            library(vec![
                quad_geometry("quad-a", Some("mat-broken")),
                quad_geometry("quad-b", Some("mat-broken")),
            ]),
            library(vec![material("mat-broken", "#fx-missing")]),
        ],
        vec![node(
            "n",
            vec![instance_geometry("#quad-a", &[]), instance_geometry("#quad-b", &[])],
        )],
    );
    let (scene, resource, root) = load(tree);

    let materials = materials_of(&scene, root);
    assert_eq!(materials[0].name.as_deref(), Some("mat-broken"));
    assert_eq!(materials[0].diffuse, Vec4::ZERO);
    assert_eq!(resource.diagnostics().count(DiagnosticKind::UnresolvedEffect), 1);
}

// ============================================================================
// Shading Models
// ============================================================================

fn load_single_effect(shading: ElementKind, params: Vec<ElementNode>) -> (Arc<Material>, ColladaResource) {
    let tree = quad_document(
        "mat",
        vec![
            library(vec![material("mat", "#fx")]),
            library(vec![effect("fx", vec![profile_common(params, shading)])]),
        ],
    );
    let (scene, resource, root) = load(tree);
    (materials_of(&scene, root).remove(0), resource)
}

fn all_channels() -> ShadingChannels {
    ShadingChannels {
        emission: Some(ColorOrTexture::Color([0.1, 0.1, 0.1, 1.0])),
        ambient: Some(ColorOrTexture::Color([0.2, 0.2, 0.2, 1.0])),
        diffuse: Some(ColorOrTexture::Color([0.3, 0.3, 0.3, 1.0])),
        specular: Some(ColorOrTexture::Color([0.4, 0.4, 0.4, 1.0])),
        shininess: Some(FloatOrParam::Float(20.0)),
    }
}

#[test]
fn material_constant_reads_emission_only() {
    let (m, _) = load_single_effect(ElementKind::Constant(all_channels()), vec![]);
    assert_eq!(m.shading_model, Some(ShadingModel::Constant));
    assert!(vec4_approx(m.emission, Vec4::new(0.1, 0.1, 0.1, 1.0)));
    assert_eq!(m.diffuse, Vec4::ZERO);
    assert_eq!(m.ambient, Vec4::ZERO);
    assert_eq!(m.specular, Vec4::ZERO);
}

#[test]
fn material_lambert_has_no_specular() {
    let (m, _) = load_single_effect(ElementKind::Lambert(all_channels()), vec![]);
    assert!(vec4_approx(m.ambient, Vec4::new(0.2, 0.2, 0.2, 1.0)));
    assert!(vec4_approx(m.diffuse, Vec4::new(0.3, 0.3, 0.3, 1.0)));
    assert_eq!(m.specular, Vec4::ZERO);
    assert!(approx_eq(m.shininess, 0.0));
}

#[test]
fn material_blinn_reads_every_channel() {
    let (m, _) = load_single_effect(ElementKind::Blinn(all_channels()), vec![]);
    assert_eq!(m.shading_model, Some(ShadingModel::Blinn));
    assert!(vec4_approx(m.specular, Vec4::new(0.4, 0.4, 0.4, 1.0)));
    assert!(approx_eq(m.shininess, 20.0));
}

#[test]
fn material_param_refs_resolve_through_newparams() {
    let channels = ShadingChannels {
        diffuse: Some(ColorOrTexture::Param("base".to_string())),
        shininess: Some(FloatOrParam::Param("gloss".to_string())),
        specular: Some(ColorOrTexture::Param("missing".to_string())),
        ..ShadingChannels::default()
    };
    let params = vec![
        newparam("base", ParamValue::Float4 { value: BLUE }),
        newparam("gloss", ParamValue::Float { value: 8.0 }),
    ];
    let (m, resource) = load_single_effect(ElementKind::Phong(channels), params);

    assert_eq!(m.diffuse, Vec4::from_array(BLUE));
    assert!(approx_eq(m.shininess, 8.0));
    assert_eq!(m.specular, Vec4::ZERO);
    assert_eq!(resource.diagnostics().count(DiagnosticKind::UnresolvedParam), 1);
}

#[test]
fn material_later_common_profile_overwrites_earlier() {
    let tree = quad_document(
        "mat",
        vec![
            library(vec![material("mat", "#fx")]),
            library(vec![effect(
                "fx",
                vec![
                    profile_common(vec![], phong(RED)),
                    el(ElementKind::ProfileOther)
                        .with_child(el(ElementKind::Technique).with_child(el(phong([0.0, 1.0, 0.0, 1.0])))),
                    profile_common(vec![], phong(BLUE)),
                ],
            )]),
        ],
    );
    let (scene, _, root) = load(tree);
    assert_eq!(materials_of(&scene, root)[0].diffuse, Vec4::from_array(BLUE));
}

#[test]
fn material_symbol_bound_through_bind_material() {
    let mut libs = red_phong_library();
    libs.push(library(vec![quad_geometry("quad", Some("SLOT0"))]));
    let tree = document(
        UpAxis::YUp,
        libs,
        vec![node("n", vec![instance_geometry("#quad", &[("SLOT0", "#mat-red")])])],
    );
    let (scene, resource, root) = load(tree);

    assert_eq!(materials_of(&scene, root)[0].diffuse, Vec4::from_array(RED));
    assert!(resource.diagnostics().is_empty());
}

// ============================================================================
// Textures
// ============================================================================

fn textured(diffuse_texture: &str, params: Vec<ElementNode>) -> ElementNode {
    let channels = ShadingChannels {
        diffuse: Some(ColorOrTexture::Texture {
            texture: diffuse_texture.to_string(),
            texcoord: Some("UVSET0".to_string()),
        }),
        ..ShadingChannels::default()
    };
    quad_document(
        "mat",
        vec![
            library(vec![image("wood", "tex/wood.png")]),
            library(vec![material("mat", "#fx")]),
            library(vec![effect("fx", vec![profile_common(params, ElementKind::Phong(channels))])]),
        ],
    )
}

fn expected_uri() -> String {
    Path::new("models").join("tex/wood.png").to_string_lossy().into_owned()
}

#[test]
fn texture_sampler_chain_creates_texture() {
    let tree = textured(
        "wood-sampler",
        vec![surface_param("wood-surface", "wood"), sampler_param("wood-sampler", "wood-surface")],
    );
    let (scene, resource, root, assets) = load_with_assets(tree);

    let m = &materials_of(&scene, root)[0];
    let handle = m.texture.expect("texture should be bound");
    assert_eq!(assets.find_texture(&expected_uri()), Some(handle));
    assert_eq!(assets.get_texture(handle).unwrap().name.as_deref(), Some("wood"));
    assert!(resource.diagnostics().is_empty());
}

#[test]
fn texture_direct_image_reference() {
    let (scene, _, root, assets) = load_with_assets(textured("wood", vec![]));

    let m = &materials_of(&scene, root)[0];
    assert!(m.has_texture());
    assert_eq!(assets.textures.len(), 1);
}

#[test]
fn texture_broken_chain_leaves_material_untextured() {
    let tree = textured("wood-sampler", vec![sampler_param("wood-sampler", "no-such-surface")]);
    let (scene, resource, root) = load(tree);

    assert!(!materials_of(&scene, root)[0].has_texture());
    assert_eq!(resource.diagnostics().count(DiagnosticKind::UnresolvedTexture), 1);
}

#[test]
fn texture_survives_failed_later_profile() {
    let diffuse = |texture: &str| {
        ElementKind::Phong(ShadingChannels {
            diffuse: Some(ColorOrTexture::Texture {
                texture: texture.to_string(),
                texcoord: None,
            }),
            ..ShadingChannels::default()
        })
    };
    let tree = quad_document(
        "mat",
        vec![
            library(vec![image("wood", "tex/wood.png")]),
            library(vec![material("mat", "#fx")]),
            library(vec![effect(
                "fx",
                vec![profile_common(vec![], diffuse("wood")), profile_common(vec![], diffuse("nothing"))],
            )]),
        ],
    );
    let (scene, resource, root, assets) = load_with_assets(tree);

    let m = &materials_of(&scene, root)[0];
    assert_eq!(m.texture, assets.find_texture(&expected_uri()));
    assert!(m.has_texture());
    assert_eq!(resource.diagnostics().count(DiagnosticKind::UnresolvedTexture), 1);
}

#[test]
fn texture_factory_failure_is_a_warning() {
    let reader = MemoryDocumentReader::new().with_document(DOCUMENT_URI, textured("wood", vec![]));
    let mut resource = ColladaResource::new(DOCUMENT_URI, Arc::new(reader), Arc::new(FailingTextures));
    let mut scene = Scene::new();
    let root = resource.load(&mut scene).unwrap();

    assert!(!materials_of(&scene, root)[0].has_texture());
    assert_eq!(resource.diagnostics().count(DiagnosticKind::TextureCreationFailed), 1);
}
