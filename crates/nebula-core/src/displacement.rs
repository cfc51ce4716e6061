//! Per-particle position function: wave + turbulence or curl advection, then
//! mouse repulsion. Mirrors `vs_main` in `particles.wgsl`.

use crate::constants::{
    CURL_TIME_SCALE, DIAGONAL_X, DIAGONAL_Z, MIN_INFLUENCE_RADIUS, OUTWARD_PUSH_RATIO,
};
use crate::math::smoothstep;
use crate::noise::{curl3, noise3};
use crate::params::{AnimationParameters, CurlCoefficients, Motion, WaveCoefficients};
use glam::{Vec2, Vec3};

/// Pointer state as seen by the displacement program for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSnapshot {
    pub world_position: Vec3,
    pub active: bool,
    pub radius: f32,
    pub strength: f32,
}

impl PointerSnapshot {
    pub fn inactive() -> Self {
        Self {
            world_position: Vec3::ZERO,
            active: false,
            radius: 0.0,
            strength: 0.0,
        }
    }
}

/// Result of displacing one particle. `curl` is only present in curl mode and
/// feeds the curl-mode shading variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Displaced {
    pub position: Vec3,
    pub curl: Option<Vec3>,
}

impl Displaced {
    pub fn curl_magnitude(&self) -> Option<f32> {
        self.curl.map(Vec3::length)
    }
}

pub fn wave_height(base: Vec3, wave: &WaveCoefficients, time: f32) -> f32 {
    let diag = base.x * DIAGONAL_X + base.z * DIAGONAL_Z;
    let wave1 = (diag * wave.frequency_x1 - time * wave.speed1).sin() * wave.amplitude1;
    let wave2 = (diag * wave.frequency_x2 - time * wave.speed2).sin() * wave.amplitude2;

    let t = &wave.turbulence;
    let n1 = noise3(Vec3::new(base.x * t.scale1, base.z * t.scale1, time * t.speed1)) * t.amplitude1;
    let n2 = noise3(Vec3::new(base.x * t.scale2, base.z * t.scale2, time * t.speed2)) * t.amplitude2;

    wave1 + wave2 + n1 + n2
}

/// Curl vector at a particle. Called once per particle per frame.
pub fn curl_at(base: Vec3, curl: &CurlCoefficients, time: f32) -> Vec3 {
    curl3(base * curl.noise_scale + Vec3::splat(time * CURL_TIME_SCALE))
}

/// Offset produced by the pointer at `position`, zero when inactive or out of
/// reach. A zero or negative radius disables the falloff.
pub fn repulsion(position: Vec3, pointer: &PointerSnapshot) -> Vec3 {
    if !pointer.active || pointer.radius <= MIN_INFLUENCE_RADIUS {
        return Vec3::ZERO;
    }
    let planar = Vec2::new(position.x, position.z);
    let center = Vec2::new(pointer.world_position.x, pointer.world_position.z);
    let delta = planar - center;
    let influence = smoothstep(pointer.radius, 0.0, delta.length());
    if influence <= 0.0 {
        return Vec3::ZERO;
    }

    let push = influence * pointer.strength;
    let outward = delta.normalize_or_zero() * push * OUTWARD_PUSH_RATIO;
    Vec3::new(outward.x, push, outward.y)
}

/// Full displacement of one particle's rest position.
pub fn displace(base: Vec3, params: &AnimationParameters, pointer: &PointerSnapshot) -> Displaced {
    let time = params.elapsed_time;
    let (position, curl) = match params.motion() {
        Motion::Wave(wave) => (
            Vec3::new(base.x, wave_height(base, wave, time), base.z),
            None,
        ),
        Motion::CurlNoise(coeffs) => {
            let curl = curl_at(base, coeffs, time);
            (base + curl * coeffs.curl_strength, Some(curl))
        }
    };
    Displaced {
        position: position + repulsion(position, pointer),
        curl,
    }
}
