//! Animation parameter set shared between the configuration surface and the
//! per-frame update.
//!
//! `AnimationParameters` is a plain struct: the control surface writes it via
//! the single-field setters on `ParticleField` and the frame
//! update reads it once per frame. There is no global state and no locking;
//! everything runs on one thread in a fixed order.

use crate::constants::{MAX_PIXEL_RATIO, POINTER_RADIUS, POINTER_STRENGTH};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which displacement program runs per particle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationMode {
    #[default]
    Wave,
    CurlNoise,
}

impl AnimationMode {
    pub fn toggled(self) -> Self {
        match self {
            AnimationMode::Wave => AnimationMode::CurlNoise,
            AnimationMode::CurlNoise => AnimationMode::Wave,
        }
    }

    /// Float flag used by the GPU program (0 = wave, 1 = curl noise).
    pub fn as_flag(self) -> f32 {
        match self {
            AnimationMode::Wave => 0.0,
            AnimationMode::CurlNoise => 1.0,
        }
    }
}

/// Two-octave simplex turbulence added to the wave height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurbulenceCoefficients {
    pub scale1: f32,
    pub amplitude1: f32,
    pub speed1: f32,
    pub scale2: f32,
    pub amplitude2: f32,
    pub speed2: f32,
}

impl Default for TurbulenceCoefficients {
    fn default() -> Self {
        Self {
            scale1: 0.04,
            amplitude1: 4.0,
            speed1: 0.25,
            scale2: 0.10,
            amplitude2: 1.5,
            speed2: 0.40,
        }
    }
}

/// Diagonal sine waves plus turbulence (wave mode).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveCoefficients {
    pub frequency_x1: f32,
    pub amplitude1: f32,
    pub speed1: f32,
    pub frequency_x2: f32,
    pub amplitude2: f32,
    pub speed2: f32,
    pub turbulence: TurbulenceCoefficients,
}

impl Default for WaveCoefficients {
    fn default() -> Self {
        Self {
            frequency_x1: 0.07,
            amplitude1: 5.5,
            speed1: 0.7,
            frequency_x2: 0.12,
            amplitude2: 3.0,
            speed2: 0.91,
            turbulence: TurbulenceCoefficients::default(),
        }
    }
}

impl WaveCoefficients {
    /// Flat field: every wave and turbulence amplitude zeroed.
    pub fn flat() -> Self {
        Self {
            amplitude1: 0.0,
            amplitude2: 0.0,
            turbulence: TurbulenceCoefficients {
                amplitude1: 0.0,
                amplitude2: 0.0,
                ..TurbulenceCoefficients::default()
            },
            ..Self::default()
        }
    }
}

/// Curl-noise advection (curl mode).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurlCoefficients {
    pub noise_scale: f32,
    pub curl_strength: f32,
}

impl Default for CurlCoefficients {
    fn default() -> Self {
        Self {
            noise_scale: 0.15,
            curl_strength: 2.5,
        }
    }
}

/// Borrowed view of the active displacement program and its coefficients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion<'a> {
    Wave(&'a WaveCoefficients),
    CurlNoise(&'a CurlCoefficients),
}

/// Maps inverse height to alpha and point-size boost.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityMapping {
    pub min: f32,
    pub max: f32,
    pub alpha_min: f32,
    pub alpha_max: f32,
    pub size_boost: f32,
}

impl Default for DensityMapping {
    fn default() -> Self {
        Self {
            min: -4.0,
            max: 6.0,
            alpha_min: 0.2,
            alpha_max: 1.0,
            size_boost: 0.7,
        }
    }
}

/// Four-stop height gradient used in wave mode. Stops sit at 0, 0.3, 0.7, 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorRamp {
    pub stops: [[f32; 3]; 4],
    pub low_y: f32,
    pub high_y: f32,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self {
            stops: [
                [0.10, 0.15, 0.40], // deep blue
                [0.50, 0.10, 0.70], // violet
                [1.00, 0.30, 0.80], // magenta
                [1.00, 0.40, 0.30], // crimson
            ],
            low_y: -6.0,
            high_y: 6.0,
        }
    }
}

impl ColorRamp {
    #[inline]
    pub fn stop(&self, index: usize) -> Vec3 {
        Vec3::from_array(self.stops[index])
    }
}

/// Two-color gradient used in curl mode.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurlGradient {
    pub color1: [f32; 3],
    pub color2: [f32; 3],
    pub low_y: f32,
    pub high_y: f32,
}

impl Default for CurlGradient {
    fn default() -> Self {
        Self {
            color1: [0.0, 0.4, 1.0], // #0066ff
            color2: [1.0, 0.0, 1.0], // #ff00ff
            low_y: -7.5,
            high_y: 7.5,
        }
    }
}

/// Mouse repulsion reach and push height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerInfluence {
    pub radius: f32,
    pub strength: f32,
}

impl Default for PointerInfluence {
    fn default() -> Self {
        Self {
            radius: POINTER_RADIUS,
            strength: POINTER_STRENGTH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationParameters {
    /// Seconds since field creation or the last `reset_time`.
    #[serde(skip)]
    pub elapsed_time: f32,
    pub mode: AnimationMode,
    pub wave: WaveCoefficients,
    pub curl: CurlCoefficients,
    pub density: DensityMapping,
    pub ramp: ColorRamp,
    pub curl_gradient: CurlGradient,
    pub pointer: PointerInfluence,
    pub point_size: f32,
    pub pixel_ratio: f32,
}

impl Default for AnimationParameters {
    fn default() -> Self {
        Self {
            elapsed_time: 0.0,
            mode: AnimationMode::Wave,
            wave: WaveCoefficients::default(),
            curl: CurlCoefficients::default(),
            density: DensityMapping::default(),
            ramp: ColorRamp::default(),
            curl_gradient: CurlGradient::default(),
            pointer: PointerInfluence::default(),
            point_size: 3.5,
            pixel_ratio: 1.0,
        }
    }
}

impl AnimationParameters {
    pub fn motion(&self) -> Motion<'_> {
        match self.mode {
            AnimationMode::Wave => Motion::Wave(&self.wave),
            AnimationMode::CurlNoise => Motion::CurlNoise(&self.curl),
        }
    }
}

/// Device pixel ratio capped the way the renderer expects.
#[inline]
pub fn clamp_pixel_ratio(device_pixel_ratio: f32) -> f32 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_follows_mode() {
        let mut p = AnimationParameters::default();
        assert!(matches!(p.motion(), Motion::Wave(_)));
        p.mode = p.mode.toggled();
        match p.motion() {
            Motion::CurlNoise(c) => assert_eq!(c.curl_strength, 2.5),
            other => panic!("unexpected motion {other:?}"),
        }
        assert_eq!(p.mode.as_flag(), 1.0);
    }

    #[test]
    fn flat_wave_zeroes_every_amplitude() {
        let w = WaveCoefficients::flat();
        assert_eq!(w.amplitude1, 0.0);
        assert_eq!(w.amplitude2, 0.0);
        assert_eq!(w.turbulence.amplitude1, 0.0);
        assert_eq!(w.turbulence.amplitude2, 0.0);
        assert_eq!(w.frequency_x1, WaveCoefficients::default().frequency_x1);
    }

    #[test]
    fn pixel_ratio_is_capped() {
        assert_eq!(clamp_pixel_ratio(3.0), 2.0);
        assert_eq!(clamp_pixel_ratio(1.25), 1.25);
        assert_eq!(clamp_pixel_ratio(f32::NAN), 1.0);
        assert_eq!(clamp_pixel_ratio(0.0), 1.0);
    }
}
