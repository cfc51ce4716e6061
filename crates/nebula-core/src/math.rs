//! Shader-style scalar helpers shared by the displacement and shading models.
//!
//! These follow the WGSL/GLSL built-ins of the same name so that the CPU model
//! and `particles.wgsl` agree sample for sample.

use glam::Vec3;

/// Hermite interpolation between `edge0` and `edge1`.
///
/// Like the shader built-in, `edge0 > edge1` yields a falling curve. Callers
/// must not pass equal edges.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
pub fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

#[inline]
pub fn mix_f32(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothstep_hits_edges_exactly() {
        assert_eq!(smoothstep(0.0, 1.0, 0.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 1.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_eq!(smoothstep(0.0, 1.0, -3.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 7.0), 1.0);
    }

    #[test]
    fn reversed_edges_fall_off() {
        // falloff from 1 at 0 to 0 at the radius
        assert_eq!(smoothstep(8.0, 0.0, 0.0), 1.0);
        assert_eq!(smoothstep(8.0, 0.0, 8.0), 0.0);
        assert!(smoothstep(8.0, 0.0, 2.0) > smoothstep(8.0, 0.0, 6.0));
    }

    #[test]
    fn mix_endpoints() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-1.0, 0.0, 5.0);
        assert_eq!(mix(a, b, 0.0), a);
        assert_eq!(mix(a, b, 1.0), b);
        assert_eq!(mix_f32(2.0, 4.0, 0.25), 2.5);
    }
}
