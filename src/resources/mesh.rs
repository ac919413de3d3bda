use std::sync::Arc;

use glam::{Vec2, Vec3, Vec4};
use thiserror::Error;

use crate::resources::material::Material;

/// Default vertex color used when a triangle batch declares no COLOR input:
/// opaque white.
pub const DEFAULT_VERTEX_COLOR: Vec4 = Vec4::ONE;

/// Twice the triangle area below which a face is considered degenerate.
const DEGENERATE_AREA_EPSILON: f32 = 1e-12;

/// Reasons a [`Face`] cannot be constructed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FaceError {
    /// All three positions are collinear (or coincide).
    #[error("degenerate triangle: {0:?}")]
    Degenerate([Vec3; 3]),

    /// A position contains NaN or infinity.
    #[error("non-finite vertex position: {0:?}")]
    NonFinite([Vec3; 3]),

    /// An index addressed past the end of an attribute source.
    #[error("{semantic} index {index} out of range for a source of {len} floats")]
    IndexOutOfRange {
        semantic: &'static str,
        index: u32,
        len: usize,
    },
}

/// One triangle with flat per-corner attributes.
#[derive(Debug, Clone)]
pub struct Face {
    pub positions: [Vec3; 3],
    pub normals: [Vec3; 3],
    pub texcoords: [Vec2; 3],
    pub colors: [Vec4; 3],
    pub material: Arc<Material>,
}

impl Face {
    /// Validated constructor: rejects non-finite and zero-area triangles.
    pub fn new(
        positions: [Vec3; 3],
        normals: [Vec3; 3],
        texcoords: [Vec2; 3],
        colors: [Vec4; 3],
        material: Arc<Material>,
    ) -> Result<Self, FaceError> {
        if !positions.iter().all(|p| p.is_finite()) {
            return Err(FaceError::NonFinite(positions));
        }
        let [a, b, c] = positions;
        if (b - a).cross(c - a).length_squared() <= DEGENERATE_AREA_EPSILON * DEGENERATE_AREA_EPSILON {
            return Err(FaceError::Degenerate(positions));
        }
        Ok(Self {
            positions,
            normals,
            texcoords,
            colors,
            material,
        })
    }

    /// Geometric normal from the winding order.
    #[must_use]
    pub fn face_normal(&self) -> Vec3 {
        let [a, b, c] = self.positions;
        (b - a).cross(c - a).normalize_or_zero()
    }
}

/// Ordered collection of faces for one geometry instance.
#[derive(Debug, Clone, Default)]
pub struct FaceSet {
    faces: Vec<Face>,
}

impl FaceSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn extend(&mut self, faces: impl IntoIterator<Item = Face>) {
        self.faces.extend(faces);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Face> {
        self.faces.iter()
    }

    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Axis-aligned bounds of all face positions, `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut positions = self.faces.iter().flat_map(|f| f.positions);
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}

impl<'a> IntoIterator for &'a FaceSet {
    type Item = &'a Face;
    type IntoIter = std::slice::Iter<'a, Face>;

    fn into_iter(self) -> Self::IntoIter {
        self.faces.iter()
    }
}
