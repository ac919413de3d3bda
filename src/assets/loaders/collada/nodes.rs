//! Scene assembly.
//!
//! Walks `<node>` elements and mirrors them into the [`Scene`]. Every
//! transform element becomes its own transform node chained below the
//! previous one, so `<translate/><rotate/>` yields two nested nodes and the
//! geometry hangs off the innermost.

use glam::{Mat4, Quat, Vec3, Vec4};

use crate::assets::loaders::collada::ImportContext;
use crate::assets::loaders::collada::diagnostics::{DiagnosticKind, Diagnostics, TransformKind};
use crate::assets::loaders::collada::geometry::decode_geometry;
use crate::assets::loaders::collada::material::MaterialBindings;
use crate::dom::{Element, ElementId, ElementKind, ElementTag};
use crate::scene::{NodeHandle, Scene, Transform};

/// Squared axis length below which a `<rotate>` is rejected.
const MIN_AXIS_LENGTH_SQUARED: f32 = 1e-12;

/// Decomposes a row-major `<matrix>` into scale, rotation and translation.
///
/// The bottom row is dropped; a projective row is only logged.
#[must_use]
pub fn matrix_transform(values: &[f32; 16]) -> Transform {
    if has_projective_row(values) {
        log::debug!(
            "<matrix> bottom row {:?} is not [0, 0, 0, 1] and is discarded",
            &values[12..]
        );
    }
    Transform::from_mat4(Mat4::from_cols_array(values).transpose())
}

fn has_projective_row(values: &[f32; 16]) -> bool {
    Vec4::from_slice(&values[12..]) != Vec4::W
}

/// `<rotate>` axis and angle in degrees; `None` for a zero-length axis.
#[must_use]
pub fn rotate_transform(value: &[f32; 4]) -> Option<Transform> {
    let axis = Vec3::new(value[0], value[1], value[2]);
    if axis.length_squared() < MIN_AXIS_LENGTH_SQUARED {
        return None;
    }
    let rotation = Quat::from_axis_angle(axis.normalize(), value[3].to_radians());
    Some(Transform::from_rotation(rotation))
}

pub(crate) struct SceneAssembler<'a, 's> {
    ctx: ImportContext<'a>,
    scene: &'s mut Scene,
    /// `<node>` elements on the current recursion path.
    path: Vec<ElementId>,
}

impl<'a, 's> SceneAssembler<'a, 's> {
    pub(crate) fn new(ctx: ImportContext<'a>, scene: &'s mut Scene) -> Self {
        Self {
            ctx,
            scene,
            path: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> Diagnostics {
        log::debug!("Resolved {} distinct materials", self.ctx.materials.cached());
        self.ctx.diagnostics
    }

    /// Assembles `node` and everything it references below `parent`.
    pub(crate) fn assemble(&mut self, node: ElementId, parent: NodeHandle) {
        let doc = self.ctx.doc;
        let label = doc.get(node).and_then(Element::label).unwrap_or("<unnamed>");
        if self.path.contains(&node) {
            self.ctx.diagnostics.warn(
                DiagnosticKind::NodeCycle,
                format!("Node `{label}` instantiates itself, skipping"),
            );
            return;
        }
        self.path.push(node);

        let mut current = parent;
        for &child in doc.children(node) {
            let Some(element) = doc.get(child) else { continue };
            let transform = match &element.kind {
                ElementKind::Matrix { values } => Some(matrix_transform(values)),
                ElementKind::Rotate { value } => {
                    let rotate = rotate_transform(value);
                    if rotate.is_none() {
                        self.ctx.diagnostics.warn(
                            DiagnosticKind::InvalidTransform,
                            format!("Node `{label}`: <rotate> with a zero-length axis is ignored"),
                        );
                    }
                    rotate
                }
                ElementKind::Scale { value } => Some(Transform::from_scale(Vec3::from_array(*value))),
                ElementKind::Translate { value } => Some(Transform::from_translation(Vec3::from_array(*value))),
                ElementKind::Lookat { .. } => {
                    self.unsupported_transform(TransformKind::Lookat, label);
                    None
                }
                ElementKind::Skew { .. } => {
                    self.unsupported_transform(TransformKind::Skew, label);
                    None
                }
                _ => None,
            };
            if let Some(transform) = transform {
                let name = element.sid.as_deref().or(Some(label));
                current = self.scene.create_transform_node(name, transform, Some(current));
            }
        }

        for instance in doc.children_of(node, ElementTag::InstanceGeometry) {
            self.instance_geometry(instance, current);
        }

        for instance in doc.children_of(node, ElementTag::InstanceNode) {
            let Some(ElementKind::InstanceNode { url }) = doc.kind(instance) else {
                continue;
            };
            match doc
                .resolve_uri(url)
                .filter(|&n| doc.tag(n) == Some(ElementTag::Node))
            {
                Some(target) => self.assemble(target, current),
                None => self.ctx.diagnostics.warn(
                    DiagnosticKind::UnresolvedNode,
                    format!("Node `{label}` instantiates unknown node `{url}`"),
                ),
            }
        }

        if self.ctx.settings.follow_child_nodes {
            for child in doc.children_of(node, ElementTag::Node) {
                self.assemble(child, current);
            }
        }

        self.path.pop();
    }

    fn unsupported_transform(&mut self, kind: TransformKind, label: &str) {
        let element = match kind {
            TransformKind::Lookat => "lookat",
            TransformKind::Skew => "skew",
        };
        self.ctx.diagnostics.warn(
            DiagnosticKind::UnsupportedTransform(kind),
            format!("Node `{label}`: <{element}> transform is not supported"),
        );
    }

    fn instance_geometry(&mut self, instance: ElementId, parent: NodeHandle) {
        let doc = self.ctx.doc;
        let Some(ElementKind::InstanceGeometry { url }) = doc.kind(instance) else {
            return;
        };
        let Some(geometry) = doc
            .resolve_uri(url)
            .filter(|&g| doc.tag(g) == Some(ElementTag::Geometry))
        else {
            self.ctx.diagnostics.warn(
                DiagnosticKind::UnresolvedGeometry,
                format!("Geometry instance references unknown geometry `{url}`"),
            );
            return;
        };

        let bindings = MaterialBindings::collect(doc, instance);
        if let Some(faces) = decode_geometry(&mut self.ctx, geometry, &bindings) {
            let name = doc.get(geometry).and_then(Element::label);
            self.scene.create_geometry_node(name, faces, parent);
        }
    }
}
