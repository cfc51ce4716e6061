//! Perspective camera and the screen-to-field raycast.
//!
//! The particle field is drawn with a fixed tilt (`model_matrix`). Pointer
//! rays are intersected with the field's own y = 0 plane, so the returned
//! point is in the same frame the displacement program works in.

use crate::constants::RAY_PLANE_EPSILON;
use crate::pointer::Raycaster;
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Camera placement as stored in the settings document.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Rotation of the field about x then y, in radians.
    pub field_tilt: [f32; 2],
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [15.0, 12.0, 25.0],
            target: [0.0, 0.0, 0.0],
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 100.0,
            field_tilt: [-std::f32::consts::PI * 0.3, std::f32::consts::PI * 0.15],
        }
    }
}

/// Right-handed camera with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    pub field_tilt: Vec2,
}

impl Camera {
    pub fn from_settings(settings: &CameraSettings, aspect: f32) -> Self {
        Self {
            eye: Vec3::from_array(settings.position),
            target: Vec3::from_array(settings.target),
            up: Vec3::Y,
            aspect,
            fovy_radians: settings.fov_y_degrees.to_radians(),
            znear: settings.near,
            zfar: settings.far,
            field_tilt: Vec2::from_array(settings.field_tilt),
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.aspect = width / height.max(1.0);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Field-to-world transform (x rotation applied after y, as an Euler XYZ
    /// rotation).
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_quat(Quat::from_euler(
            glam::EulerRot::XYZ,
            self.field_tilt.x,
            self.field_tilt.y,
            0.0,
        ))
    }

    pub fn model_view_matrix(&self) -> Mat4 {
        self.view_matrix() * self.model_matrix()
    }

    /// World-space ray through a normalized device coordinate.
    /// Returns `(origin, direction)`.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let p_near = inv * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let near = p_near.truncate() / p_near.w;
        let far = p_far.truncate() / p_far.w;
        (near, (far - near).normalize_or_zero())
    }
}

/// Intersection of a ray with the plane y = 0. `None` when the ray runs
/// parallel to the plane or points away from it.
pub fn intersect_ground(origin: Vec3, direction: Vec3) -> Option<Vec3> {
    if direction.y.abs() < RAY_PLANE_EPSILON {
        return None;
    }
    let t = -origin.y / direction.y;
    if t < 0.0 {
        return None;
    }
    Some(origin + direction * t)
}

impl Raycaster for Camera {
    fn raycast(&self, ndc: Vec2) -> Option<Vec3> {
        let (origin, direction) = self.ray_from_ndc(ndc);
        let to_field = self.model_matrix().inverse();
        let origin = to_field.transform_point3(origin);
        let direction = to_field.transform_vector3(direction);
        intersect_ground(origin, direction)
    }
}
