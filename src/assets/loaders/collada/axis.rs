use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

use crate::dom::UpAxis;

/// Rotates decoded vectors from the document's up axis into Y-up.
///
/// Only `Z_UP` needs a correction: -90° about X maps +Z onto +Y. Applied to
/// positions and normals only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisNormalizer {
    rotation: Option<Quat>,
}

impl AxisNormalizer {
    pub const IDENTITY: Self = Self { rotation: None };

    #[must_use]
    pub fn for_up_axis(up_axis: UpAxis) -> Self {
        match up_axis {
            UpAxis::ZUp => Self {
                rotation: Some(Quat::from_rotation_x(-FRAC_PI_2)),
            },
            UpAxis::XUp | UpAxis::YUp => Self::IDENTITY,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.rotation.is_none()
    }

    #[inline]
    #[must_use]
    pub fn apply(&self, v: Vec3) -> Vec3 {
        match self.rotation {
            Some(q) => q * v,
            None => v,
        }
    }
}
