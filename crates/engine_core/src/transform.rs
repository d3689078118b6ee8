//! Placement of a city entity in world space.

use glam::{Mat4, Quat, Vec2, Vec3};

/// Position, orientation and scale. Y is up; the ground is the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Positioned and turned by `yaw` radians around +Y (vehicles facing their lane direction).
    pub fn from_position_yaw(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_y(yaw),
            ..Default::default()
        }
    }

    /// Ground-plane (x, z) of the position.
    pub fn planar(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    /// Model matrix handed to the renderer.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Facing direction, -Z in local space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Turn to face `target`. Leaves the rotation alone when `target` is the current position.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        if (target - self.position).length_squared() <= 1e-8 {
            return;
        }
        self.rotation = Quat::from_mat4(&Mat4::look_at_rh(self.position, target, up)).inverse();
    }
}
