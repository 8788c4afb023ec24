use crate::{Mat4, Quat, Vec3};

/// Radians added per frame while spinning about Y.
pub const SPIN_STEP: f32 = 0.001;

/// Placement of one drawn mesh: translate, rotate about an axis, scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
    /// Rotation angle in radians.
    pub angle: f32,
    pub axis: Vec3,
    /// Spin continuously about Y instead of using `axis`.
    pub spin_y: bool,
}

impl Transform {
    #[inline]
    pub fn new(position: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            scale,
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_rotation(mut self, angle: f32, axis: Vec3) -> Self {
        self.angle = angle;
        self.axis = axis;
        self
    }

    #[inline]
    pub fn with_spin(mut self, spin_y: bool) -> Self {
        self.spin_y = spin_y;
        self
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Per-frame step.
    #[inline]
    pub fn advance(&mut self) {
        if self.spin_y {
            self.angle += SPIN_STEP;
        }
    }

    /// Build matrix = T * R * S (column-major Mat4 per glam).
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        let axis = if self.spin_y {
            Vec3::Y
        } else {
            self.axis.try_normalize().unwrap_or(Vec3::Z)
        };
        let q = Quat::from_axis_angle(axis, self.angle);
        Mat4::from_scale_rotation_translation(self.scale, q, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::splat(0.5),
            angle: 0.0,
            axis: Vec3::Z,
            spin_y: false,
        }
    }
}
