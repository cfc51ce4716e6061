//! Flat GPU layouts. Each struct here mirrors a WGSL struct in
//! `shaders/particles.wgsl`; fields are grouped in 16-byte rows so the WGSL
//! uniform layout and `#[repr(C)]` agree without implicit padding.

use crate::constants::CURL_TIME_SCALE;
use crate::displacement::PointerSnapshot;
use crate::params::AnimationParameters;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Per-frame uniform block (`struct Params`).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ParamBlock {
    /// time, mode flag, point size, pixel ratio
    pub frame: [f32; 4],
    /// frequency, amplitude, speed, unused
    pub wave1: [f32; 4],
    pub wave2: [f32; 4],
    /// scale, amplitude, speed, unused
    pub turbulence1: [f32; 4],
    pub turbulence2: [f32; 4],
    /// noise scale, strength, time scale, unused
    pub curl: [f32; 4],
    /// min, max, alpha min, alpha max
    pub density: [f32; 4],
    /// size boost, ramp low y, ramp high y, unused
    pub shading: [f32; 4],
    /// rgb + unused
    pub ramp: [[f32; 4]; 4],
    /// rgb + low y / high y in w
    pub curl_colors: [[f32; 4]; 2],
    /// world xyz, active flag
    pub pointer: [f32; 4],
    /// radius, strength, unused, unused
    pub pointer_shape: [f32; 4],
}

impl ParamBlock {
    pub fn lower(params: &AnimationParameters, pointer: &PointerSnapshot) -> Self {
        let w = &params.wave;
        let t = &w.turbulence;
        let d = &params.density;
        let r = &params.ramp;
        let g = &params.curl_gradient;
        let [c1r, c1g, c1b] = g.color1;
        let [c2r, c2g, c2b] = g.color2;
        let p = pointer.world_position;

        Self {
            frame: [
                params.elapsed_time,
                params.mode.as_flag(),
                params.point_size,
                params.pixel_ratio,
            ],
            wave1: [w.frequency_x1, w.amplitude1, w.speed1, 0.0],
            wave2: [w.frequency_x2, w.amplitude2, w.speed2, 0.0],
            turbulence1: [t.scale1, t.amplitude1, t.speed1, 0.0],
            turbulence2: [t.scale2, t.amplitude2, t.speed2, 0.0],
            curl: [
                params.curl.noise_scale,
                params.curl.curl_strength,
                CURL_TIME_SCALE,
                0.0,
            ],
            density: [d.min, d.max, d.alpha_min, d.alpha_max],
            shading: [d.size_boost, r.low_y, r.high_y, 0.0],
            ramp: r.stops.map(|[cr, cg, cb]| [cr, cg, cb, 0.0]),
            curl_colors: [[c1r, c1g, c1b, g.low_y], [c2r, c2g, c2b, g.high_y]],
            pointer: [p.x, p.y, p.z, if pointer.active { 1.0 } else { 0.0 }],
            pointer_shape: [pointer.radius, pointer.strength, 0.0, 0.0],
        }
    }

    pub fn elapsed_time(&self) -> f32 {
        self.frame[0]
    }

    pub fn pointer_active(&self) -> bool {
        self.pointer[3] > 0.5
    }
}

/// Camera uniform (`struct Camera`). `viewport` holds the drawable size in
/// physical pixels.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CameraBlock {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub viewport: [f32; 4],
}

impl CameraBlock {
    pub fn new(model_view: Mat4, projection: Mat4, viewport: Vec2) -> Self {
        Self {
            model_view: model_view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            viewport: [viewport.x, viewport.y, 0.0, 0.0],
        }
    }
}

/// Static per-instance attributes (`struct ParticleIn`), uploaded once.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub base_position: [f32; 3],
    pub size_scale: f32,
    pub planar_offset: [f32; 2],
    pub _pad: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::AnimationMode;
    use glam::Vec3;

    #[test]
    fn layouts_are_row_aligned() {
        assert_eq!(std::mem::size_of::<ParamBlock>() % 16, 0);
        assert_eq!(std::mem::size_of::<ParamBlock>(), 16 * 16);
        assert_eq!(std::mem::size_of::<CameraBlock>(), 144);
        assert_eq!(std::mem::size_of::<ParticleVertex>(), 32);
    }

    #[test]
    fn lowering_carries_mode_and_pointer() {
        let mut params = AnimationParameters {
            mode: AnimationMode::CurlNoise,
            elapsed_time: 4.25,
            ..AnimationParameters::default()
        };
        params.curl.curl_strength = 1.5;
        let pointer = PointerSnapshot {
            world_position: Vec3::new(1.0, 0.0, -2.0),
            active: true,
            radius: 8.0,
            strength: 5.0,
        };
        let block = ParamBlock::lower(&params, &pointer);
        assert_eq!(block.elapsed_time(), 4.25);
        assert_eq!(block.frame[1], 1.0);
        assert_eq!(block.curl[1], 1.5);
        assert!(block.pointer_active());
        assert_eq!(block.pointer_shape[0], 8.0);
        assert_eq!(block.ramp[3][..3], params.ramp.stops[3]);

        let idle = ParamBlock::lower(&params, &PointerSnapshot::inactive());
        assert!(!idle.pointer_active());
    }
}
