use glam::{Mat4, Quat, Vec2, Vec3};

#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub translation: Vec3,
    pub scale: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Places something on the ground plane at `at` (world XZ), turned
    /// `heading` radians about the vertical axis.
    pub fn on_ground(at: Vec2, heading: f32) -> Self {
        Self {
            translation: Vec3::new(at.x, 0.0, at.y),
            rotation: Quat::from_rotation_y(heading),
            ..Default::default()
        }
    }
}

impl From<Transform> for Mat4 {
    fn from(value: Transform) -> Self {
        Self::from_scale_rotation_translation(value.scale, value.rotation, value.translation)
    }
}

impl From<&Transform> for Mat4 {
    fn from(value: &Transform) -> Self {
        Self::from_scale_rotation_translation(value.scale, value.rotation, value.translation)
    }
}
