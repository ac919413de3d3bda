//! Triangle stream decoder.
//!
//! The `<p>` array of a `<triangles>` batch is a flat run of sub-indices,
//! `group_len` per vertex. Sub-index `i` feeds every writer registered at
//! offset `i % group_len`; once a group is complete the scratch slots are
//! snapshotted into a [`Vertex`], and every third vertex closes a [`Face`].

use std::sync::Arc;

use glam::{Vec2, Vec3, Vec4};

use crate::assets::loaders::collada::axis::AxisNormalizer;
use crate::assets::loaders::collada::diagnostics::{DiagnosticKind, Diagnostics};
use crate::assets::loaders::collada::inputs::{AttributeKind, OffsetMap};
use crate::resources::material::Material;
use crate::resources::mesh::{Face, FaceError};

/// Destination slots the attribute writers copy into.
///
/// Slots are not cleared between vertices; a writer only overwrites the
/// components its record provides.
#[derive(Debug, Clone, Copy)]
pub struct VertexScratch {
    position: [f32; 3],
    normal: [f32; 3],
    texcoord: [f32; 2],
    color: [f32; 4],
}

impl VertexScratch {
    /// Zeroed slots, except the color which starts at `default_color`.
    #[must_use]
    pub fn new(default_color: Vec4) -> Self {
        Self {
            position: [0.0; 3],
            normal: [0.0; 3],
            texcoord: [0.0; 2],
            color: default_color.to_array(),
        }
    }

    pub fn slot_mut(&mut self, kind: AttributeKind) -> &mut [f32] {
        match kind {
            AttributeKind::Position => &mut self.position,
            AttributeKind::Normal => &mut self.normal,
            AttributeKind::Texcoord => &mut self.texcoord,
            AttributeKind::Color => &mut self.color,
        }
    }

    fn snapshot(&self, axis: &AxisNormalizer) -> Vertex {
        Vertex {
            position: axis.apply(Vec3::from_array(self.position)),
            normal: axis.apply(Vec3::from_array(self.normal)),
            texcoord: Vec2::from_array(self.texcoord),
            color: Vec4::from_array(self.color),
        }
    }
}

/// One decoded corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub texcoord: Vec2,
    pub color: Vec4,
}

/// Decodes `<p>` streams against one batch's [`OffsetMap`].
pub struct TriangleDecoder<'m, 'doc> {
    offsets: &'m OffsetMap<'doc>,
    axis: AxisNormalizer,
    default_color: Vec4,
}

impl<'m, 'doc> TriangleDecoder<'m, 'doc> {
    #[must_use]
    pub fn new(offsets: &'m OffsetMap<'doc>, axis: AxisNormalizer, default_color: Vec4) -> Self {
        Self {
            offsets,
            axis,
            default_color,
        }
    }

    /// Decodes every complete triangle of `indices`.
    ///
    /// Faces that fail validation, or that read past the end of a source, are
    /// reported and skipped; decoding continues with the next triangle.
    pub fn decode(&self, indices: &[u32], material: &Arc<Material>, diagnostics: &mut Diagnostics) -> Vec<Face> {
        let group_len = self.offsets.group_len();
        let triangle_len = group_len * 3;
        let usable = indices.len() - indices.len() % triangle_len;
        if usable < indices.len() {
            diagnostics.warn(
                DiagnosticKind::TrailingIndices,
                format!(
                    "Ignoring {} trailing indices that do not complete a triangle",
                    indices.len() - usable
                ),
            );
        }

        let mut faces = Vec::with_capacity(usable / triangle_len);
        let mut scratch = VertexScratch::new(self.default_color);
        let mut ring = [Vertex::default(); 3];
        let mut corner = 0;
        let mut fault: Option<FaceError> = None;

        for (i, &index) in indices[..usable].iter().enumerate() {
            let offset = i % group_len;
            for writer in self.offsets.writers_at(offset) {
                if let Err(e) = writer.write(index, &mut scratch) {
                    fault.get_or_insert(e);
                }
            }
            if offset + 1 < group_len {
                continue;
            }

            ring[corner] = scratch.snapshot(&self.axis);
            corner += 1;
            if corner < 3 {
                continue;
            }
            corner = 0;

            let result = match fault.take() {
                Some(e) => Err(e),
                None => Face::new(
                    ring.map(|v| v.position),
                    ring.map(|v| v.normal),
                    ring.map(|v| v.texcoord),
                    ring.map(|v| v.color),
                    Arc::clone(material),
                ),
            };
            match result {
                Ok(face) => faces.push(face),
                Err(e) => diagnostics.warn(
                    DiagnosticKind::InvalidFace,
                    format!("Skipping triangle {}: {e}", i / triangle_len),
                ),
            }
        }

        log::debug!(
            "Decoded {} of {} triangles ({} indices per vertex)",
            faces.len(),
            usable / triangle_len,
            group_len
        );
        faces
    }
}
