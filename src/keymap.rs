use crate::constants::*;
use nebula_core::ParticleField;

/// What a key press asks for. Tuning actions carry a signed step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    ResetTime,
    ToggleMode,
    ToggleFullscreen,
    ToggleInfo,
    ExportSettings,
    CurlStrength(f32),
    ParticleSize(f32),
    NoiseScale(f32),
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "r" | "R" => Some(KeyAction::ResetTime),
        "m" | "M" => Some(KeyAction::ToggleMode),
        "f" | "F" => Some(KeyAction::ToggleFullscreen),
        "h" | "H" => Some(KeyAction::ToggleInfo),
        "e" | "E" => Some(KeyAction::ExportSettings),
        "[" => Some(KeyAction::CurlStrength(-CURL_STRENGTH_STEP)),
        "]" => Some(KeyAction::CurlStrength(CURL_STRENGTH_STEP)),
        "-" | "_" => Some(KeyAction::ParticleSize(-PARTICLE_SIZE_STEP)),
        "=" | "+" => Some(KeyAction::ParticleSize(PARTICLE_SIZE_STEP)),
        "," | "<" => Some(KeyAction::NoiseScale(-NOISE_SCALE_STEP)),
        "." | ">" => Some(KeyAction::NoiseScale(NOISE_SCALE_STEP)),
        _ => None,
    }
}

#[inline]
pub fn step_clamped(value: f32, delta: f32, min: f32, max: f32) -> f32 {
    (value + delta).clamp(min, max)
}

/// Applies the field-side part of `action`. Returns `false` for actions the
/// page has to handle itself (fullscreen, info overlay, export).
pub fn apply(action: KeyAction, field: &mut ParticleField) -> bool {
    match action {
        KeyAction::ResetTime => field.reset_time(),
        KeyAction::ToggleMode => {
            field.toggle_mode();
        }
        KeyAction::CurlStrength(delta) => {
            let next = step_clamped(
                field.params().curl.curl_strength,
                delta,
                CURL_STRENGTH_MIN,
                CURL_STRENGTH_MAX,
            );
            field.set_curl_strength(next);
        }
        KeyAction::ParticleSize(delta) => {
            let next = step_clamped(
                field.params().point_size,
                delta,
                PARTICLE_SIZE_MIN,
                PARTICLE_SIZE_MAX,
            );
            field.set_particle_size(next);
        }
        KeyAction::NoiseScale(delta) => {
            let next = step_clamped(
                field.params().curl.noise_scale,
                delta,
                NOISE_SCALE_MIN,
                NOISE_SCALE_MAX,
            );
            field.set_noise_scale(next);
        }
        KeyAction::ToggleFullscreen | KeyAction::ToggleInfo | KeyAction::ExportSettings => {
            return false;
        }
    }
    true
}
