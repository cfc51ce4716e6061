//! Per-particle color, alpha and size, plus the per-fragment soft circle.
//!
//! Two gradient variants exist side by side: the 4-stop height ramp used in
//! wave mode and the two-color curl gradient. They are intentionally not
//! unified; each reproduces its own program's output.

use crate::constants::{
    CURL_COLOR_LIFT, CURL_GRADIENT_WEIGHT, EMISSIVE_BOOST, FOOTPRINT_RADIUS, FOOTPRINT_SHARPNESS,
    RAMP_STOP_HIGH, RAMP_STOP_LOW,
};
use crate::math::{mix, mix_f32, smoothstep};
use crate::params::{AnimationMode, AnimationParameters, ColorRamp, CurlGradient, DensityMapping};
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shade {
    pub color: Vec3,
    pub alpha: f32,
    pub size_multiplier: f32,
}

/// Inverse-height density in [0, 1]: valleys are dense.
#[inline]
pub fn density(y: f32, mapping: &DensityMapping) -> f32 {
    smoothstep(mapping.min, mapping.max, -y)
}

#[inline]
pub fn density_alpha(density: f32, mapping: &DensityMapping) -> f32 {
    density * (mapping.alpha_max - mapping.alpha_min) + mapping.alpha_min
}

#[inline]
pub fn size_multiplier(density: f32, mapping: &DensityMapping) -> f32 {
    1.0 + density * mapping.size_boost
}

/// Normalized height in [0, 1] for the ramp.
pub fn ramp_position(y: f32, ramp: &ColorRamp) -> f32 {
    ((y - ramp.low_y) / (ramp.high_y - ramp.low_y)).clamp(0.0, 1.0)
}

/// Three chained smooth blends across stops at 0, 0.3, 0.7 and 1.
pub fn ramp_color(h: f32, ramp: &ColorRamp) -> Vec3 {
    let c = mix(ramp.stop(0), ramp.stop(1), smoothstep(0.0, RAMP_STOP_LOW, h));
    let c = mix(c, ramp.stop(2), smoothstep(RAMP_STOP_LOW, RAMP_STOP_HIGH, h));
    mix(c, ramp.stop(3), smoothstep(RAMP_STOP_HIGH, 1.0, h))
}

/// Two-color gradient tinted by the local curl magnitude.
pub fn curl_color(y: f32, curl_magnitude: f32, gradient: &CurlGradient) -> Vec3 {
    let g = (y - gradient.low_y) / (gradient.high_y - gradient.low_y);
    let g = mix_f32(g, curl_magnitude, CURL_GRADIENT_WEIGHT);
    let c1 = Vec3::from_array(gradient.color1);
    let c2 = Vec3::from_array(gradient.color2);
    mix(c1, c2, g) + Vec3::splat(curl_magnitude * CURL_COLOR_LIFT)
}

/// Vertex-stage shading of a displaced particle. `curl_magnitude` selects the
/// curl variant when present.
pub fn shade(position: Vec3, curl_magnitude: Option<f32>, params: &AnimationParameters) -> Shade {
    let d = density(position.y, &params.density);
    let color = match (params.mode, curl_magnitude) {
        (AnimationMode::CurlNoise, Some(m)) => curl_color(position.y, m, &params.curl_gradient),
        _ => ramp_color(ramp_position(position.y, &params.ramp), &params.ramp),
    };
    Shade {
        color,
        alpha: density_alpha(d, &params.density),
        size_multiplier: size_multiplier(d, &params.density),
    }
}

/// Fragment-stage output for a point in footprint space (`uv` in [0, 1]²).
/// `None` means the fragment is discarded.
pub fn fragment(shade: &Shade, uv: Vec2) -> Option<(Vec3, f32)> {
    let dist = (uv - Vec2::splat(0.5)).length();
    if dist > FOOTPRINT_RADIUS {
        return None;
    }
    let falloff = smoothstep(FOOTPRINT_RADIUS, 0.0, dist).powf(FOOTPRINT_SHARPNESS);
    let alpha = falloff * shade.alpha;
    Some((shade.color * (1.0 + alpha * EMISSIVE_BOOST), alpha))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn density_bounds_map_to_alpha_range() {
        let mapping = DensityMapping::default();
        // -y at the lower edge
        let d = density(-mapping.min, &mapping);
        assert_eq!(d, 0.0);
        assert!(approx(density_alpha(d, &mapping), mapping.alpha_min));
        // -y at the upper edge
        let d = density(-mapping.max, &mapping);
        assert_eq!(d, 1.0);
        assert!(approx(density_alpha(d, &mapping), mapping.alpha_max));
        assert!(approx(size_multiplier(d, &mapping), 1.0 + mapping.size_boost));
    }

    #[test]
    fn valleys_are_denser_than_peaks() {
        let mapping = DensityMapping::default();
        assert!(density(-3.0, &mapping) > density(3.0, &mapping));
    }

    #[test]
    fn ramp_endpoints_are_exact() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp_color(0.0, &ramp), ramp.stop(0));
        assert_eq!(ramp_color(1.0, &ramp), ramp.stop(3));
        assert_eq!(ramp_position(-100.0, &ramp), 0.0);
        assert_eq!(ramp_position(100.0, &ramp), 1.0);
    }

    #[test]
    fn ramp_is_continuous_across_stops() {
        let ramp = ColorRamp::default();
        for stop in [RAMP_STOP_LOW, RAMP_STOP_HIGH] {
            let below = ramp_color(stop - 1e-4, &ramp);
            let above = ramp_color(stop + 1e-4, &ramp);
            assert!((below - above).abs().max_element() < 1e-3, "jump at {stop}");
        }
    }

    #[test]
    fn curl_color_follows_gradient_and_lift() {
        let g = CurlGradient::default();
        // y at the low end with no curl: pure color1
        assert_eq!(curl_color(g.low_y, 0.0, &g), Vec3::from_array(g.color1));
        let lifted = curl_color(g.low_y, 0.5, &g);
        let expected = mix(
            Vec3::from_array(g.color1),
            Vec3::from_array(g.color2),
            0.5 * CURL_GRADIENT_WEIGHT,
        ) + Vec3::splat(0.5 * CURL_COLOR_LIFT);
        assert!((lifted - expected).abs().max_element() < 1e-6);
    }

    #[test]
    fn shade_selects_variant_by_mode() {
        let mut params = AnimationParameters::default();
        let p = Vec3::new(0.0, 0.0, 0.0);
        let wave = shade(p, None, &params);
        assert_eq!(wave.color, ramp_color(0.5, &params.ramp));

        params.mode = AnimationMode::CurlNoise;
        let curl = shade(p, Some(0.0), &params);
        assert_eq!(curl.color, curl_color(0.0, 0.0, &params.curl_gradient));
        assert_eq!(wave.alpha, curl.alpha);
    }

    #[test]
    fn fragment_discards_outside_footprint() {
        let s = Shade {
            color: Vec3::ONE,
            alpha: 1.0,
            size_multiplier: 1.0,
        };
        assert!(fragment(&s, Vec2::new(1.0, 1.0)).is_none());
        assert!(fragment(&s, Vec2::new(0.5, 0.0)).is_some());

        let (color, alpha) = fragment(&s, Vec2::splat(0.5)).unwrap_or_default();
        assert_eq!(alpha, 1.0);
        assert_eq!(color, Vec3::splat(1.0 + EMISSIVE_BOOST));

        let (_, edge_alpha) = fragment(&s, Vec2::new(0.5, 0.0)).unwrap_or_default();
        assert_eq!(edge_alpha, 0.0);
    }
}
