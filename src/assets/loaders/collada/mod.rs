//! COLLADA importer.
//!
//! [`ColladaResource`] turns one COLLADA document into a subtree of a
//! [`Scene`]:
//!
//! 1. the document is read through a [`DocumentReader`]
//! 2. `<scene>` → `<instance_visual_scene>` selects the node roots
//! 3. [`nodes`] chains one transform node per transform element
//! 4. [`geometry`] decodes `<triangles>` batches via [`inputs`] and [`triangles`]
//! 5. [`material`] flattens effects and creates textures on demand
//!
//! Only a broken document or a missing `<scene>` fails the load. Everything
//! else is recorded in [`Diagnostics`] and skipped.

pub mod axis;
pub mod diagnostics;
pub mod geometry;
pub mod inputs;
pub mod material;
pub mod nodes;
pub mod settings;
pub mod triangles;

use std::sync::Arc;

use rustc_hash::FxHashSet;

pub use axis::AxisNormalizer;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, PrimitiveKind, TransformKind};
pub use inputs::{AttributeKind, AttributeWriter, OffsetMap};
pub use material::{MaterialBindings, MaterialResolver};
pub use settings::ColladaSettings;
pub use triangles::{TriangleDecoder, Vertex, VertexScratch};

use crate::assets::io::DocumentReader;
use crate::assets::server::TextureFactory;
use crate::dom::{Document, ElementId, ElementKind, ElementTag, UpAxis};
use crate::errors::{ColladaError, Result};
use crate::scene::{NodeHandle, Scene, Transform};

use self::nodes::SceneAssembler;

/// Name of the transform node every load hangs its subtree from.
pub const ROOT_NODE_NAME: &str = "collada_root";

/// Decode state of one load. Dropped when the load returns.
pub(crate) struct ImportContext<'a> {
    pub(crate) doc: &'a Document,
    pub(crate) settings: &'a ColladaSettings,
    pub(crate) axis: AxisNormalizer,
    pub(crate) materials: MaterialResolver<'a>,
    pub(crate) diagnostics: Diagnostics,
    /// Geometries whose unsupported primitives were already reported.
    pub(crate) reported_geometries: FxHashSet<ElementId>,
}

/// A COLLADA document loaded into a scene.
///
/// The resource keeps only a handle to the root node it created. The nodes
/// themselves belong to the [`Scene`]; [`unload`](Self::unload) forgets the
/// handle but leaves the subtree in place.
pub struct ColladaResource {
    uri: String,
    reader: Arc<dyn DocumentReader>,
    textures: Arc<dyn TextureFactory>,
    settings: ColladaSettings,
    root: Option<NodeHandle>,
    diagnostics: Diagnostics,
}

impl ColladaResource {
    pub fn new(uri: impl Into<String>, reader: Arc<dyn DocumentReader>, textures: Arc<dyn TextureFactory>) -> Self {
        Self {
            uri: uri.into(),
            reader,
            textures,
            settings: ColladaSettings::default(),
            root: None,
            diagnostics: Diagnostics::new(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ColladaSettings) -> Self {
        self.settings = settings;
        self
    }

    #[inline]
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &ColladaSettings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.root.is_some()
    }

    /// Root node created by the last successful load.
    #[inline]
    #[must_use]
    pub fn scene_root(&self) -> Option<NodeHandle> {
        self.root
    }

    /// Recoverable problems recorded by the last load.
    #[inline]
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Reads the document and assembles it into `scene`.
    ///
    /// Loading an already loaded resource returns the existing root without
    /// touching the scene.
    pub fn load(&mut self, scene: &mut Scene) -> Result<NodeHandle> {
        if let Some(root) = self.root {
            log::debug!("COLLADA document `{}` is already loaded", self.uri);
            return Ok(root);
        }
        let document = self.reader.read_document(&self.uri)?;
        self.load_document(&document, scene)
    }

    /// Assembles an already parsed document into `scene`.
    pub fn load_document(&mut self, document: &Document, scene: &mut Scene) -> Result<NodeHandle> {
        if let Some(root) = self.root {
            return Ok(root);
        }

        let Some(scene_element) = document.find_first(ElementTag::Scene) else {
            return Err(ColladaError::MissingScene(self.uri.clone()));
        };

        let mut diagnostics = Diagnostics::new();
        let axis = match document.up_axis() {
            UpAxis::ZUp if self.settings.normalize_up_axis => {
                log::info!("Rotating Z_UP document `{}` into Y-up", self.uri);
                AxisNormalizer::for_up_axis(UpAxis::ZUp)
            }
            UpAxis::XUp => {
                diagnostics.warn(
                    DiagnosticKind::UnsupportedUpAxis,
                    format!("X_UP document `{}` is imported without axis correction", self.uri),
                );
                AxisNormalizer::IDENTITY
            }
            _ => AxisNormalizer::IDENTITY,
        };

        let root = scene.create_transform_node(Some(ROOT_NODE_NAME), Transform::new(), None);

        let visual_scene = document
            .first_child_of(scene_element, ElementTag::InstanceVisualScene)
            .and_then(|inst| match document.kind(inst) {
                Some(ElementKind::InstanceVisualScene { url }) => document.resolve_uri(url),
                _ => None,
            })
            .filter(|&vs| document.tag(vs) == Some(ElementTag::VisualScene));

        let diagnostics = match visual_scene {
            Some(visual_scene) => {
                let ctx = ImportContext {
                    doc: document,
                    settings: &self.settings,
                    axis,
                    materials: MaterialResolver::new(document, &self.uri, self.textures.as_ref()),
                    diagnostics,
                    reported_geometries: FxHashSet::default(),
                };
                let mut assembler = SceneAssembler::new(ctx, scene);
                for node in document.children_of(visual_scene, ElementTag::Node) {
                    assembler.assemble(node, root);
                }
                assembler.finish()
            }
            None => {
                diagnostics.warn(
                    DiagnosticKind::MissingVisualScene,
                    format!("Document `{}` instantiates no visual scene, nothing to assemble", self.uri),
                );
                diagnostics
            }
        };

        log::info!(
            "Loaded COLLADA document `{}`: {} nodes, {} warnings",
            self.uri,
            scene.subtree(root).len(),
            diagnostics.len()
        );
        self.diagnostics = diagnostics;
        self.root = Some(root);
        Ok(root)
    }

    /// Forgets the loaded root and returns it. The nodes stay in the scene.
    pub fn unload(&mut self) -> Option<NodeHandle> {
        self.root.take()
    }
}
