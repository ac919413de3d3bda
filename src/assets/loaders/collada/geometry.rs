use glam::Vec4;
use smallvec::SmallVec;

use crate::assets::loaders::collada::ImportContext;
use crate::assets::loaders::collada::diagnostics::{DiagnosticKind, PrimitiveKind};
use crate::assets::loaders::collada::inputs::OffsetMap;
use crate::assets::loaders::collada::material::MaterialBindings;
use crate::assets::loaders::collada::triangles::TriangleDecoder;
use crate::dom::{ElementId, ElementKind, ElementTag};
use crate::resources::mesh::FaceSet;

fn primitive_kind(kind: &ElementKind) -> Option<PrimitiveKind> {
    match kind {
        ElementKind::Lines { .. } => Some(PrimitiveKind::Lines),
        ElementKind::Linestrips { .. } => Some(PrimitiveKind::Linestrips),
        ElementKind::Polygons { .. } => Some(PrimitiveKind::Polygons),
        ElementKind::Polylist { .. } => Some(PrimitiveKind::Polylist),
        ElementKind::Trifans { .. } => Some(PrimitiveKind::Trifans),
        ElementKind::Tristrips { .. } => Some(PrimitiveKind::Tristrips),
        _ => None,
    }
}

/// Decodes every `<triangles>` batch of a `<geometry>` into one face set.
///
/// Returns `None` when the geometry has no `<mesh>`. Non-triangle batches are
/// skipped and reported once per kind, on the first instance of the geometry.
pub(crate) fn decode_geometry(
    ctx: &mut ImportContext<'_>,
    geometry: ElementId,
    bindings: &MaterialBindings<'_>,
) -> Option<FaceSet> {
    let doc = ctx.doc;
    let label = doc
        .get(geometry)
        .and_then(|g| g.label())
        .unwrap_or("<unnamed>");

    let Some(mesh) = doc.first_child_of(geometry, ElementTag::Mesh) else {
        ctx.diagnostics.warn(
            DiagnosticKind::UnsupportedGeometry,
            format!("Geometry `{label}` has no <mesh>, only triangle meshes are supported"),
        );
        return None;
    };

    if ctx.reported_geometries.insert(geometry) {
        let mut unsupported: SmallVec<[PrimitiveKind; 4]> = SmallVec::new();
        for &child in doc.children(mesh) {
            if let Some(kind) = doc.kind(child).and_then(primitive_kind)
                && !unsupported.contains(&kind)
            {
                unsupported.push(kind);
            }
        }
        for kind in unsupported {
            ctx.diagnostics.warn(
                DiagnosticKind::UnsupportedPrimitive(kind),
                format!("Geometry `{label}`: <{}> primitives are not supported", kind.element_name()),
            );
        }
    }

    let default_color = Vec4::from_array(ctx.settings.default_vertex_color);
    let mut faces = FaceSet::new();
    for batch in doc.children_of(mesh, ElementTag::Triangles) {
        let Some(ElementKind::Triangles { material, .. }) = doc.kind(batch) else {
            continue;
        };
        let inputs: Vec<ElementId> = doc.children_of(batch, ElementTag::Input).collect();
        let offsets = OffsetMap::resolve(doc, &inputs, &mut ctx.diagnostics);
        let indices = doc
            .first_child_of(batch, ElementTag::P)
            .and_then(|p| match doc.kind(p) {
                Some(ElementKind::P { values }) => Some(values.as_slice()),
                _ => None,
            })
            .unwrap_or_default();

        let material = ctx
            .materials
            .resolve(material.as_deref(), bindings, &mut ctx.diagnostics);
        let decoder = TriangleDecoder::new(&offsets, ctx.axis, default_color);
        faces.extend(decoder.decode(indices, &material, &mut ctx.diagnostics));
    }

    log::debug!("Geometry `{label}`: {} faces", faces.len());
    Some(faces)
}
