// Host-side tests for the keyboard mapping.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod keymap {
    include!("../src/keymap.rs");
}

use constants::*;
use keymap::*;
use nebula_core::{AnimationMode, AnimationParameters, ParticleField, ParticleGridSpec};

fn small_field() -> ParticleField {
    let spec = ParticleGridSpec {
        width: 2.0,
        depth: 2.0,
        resolution_x: 2,
        resolution_z: 2,
    };
    ParticleField::with_seed(spec, AnimationParameters::default(), 7).unwrap()
}

#[test]
fn letter_keys_are_case_insensitive() {
    for (lower, upper, action) in [
        ("r", "R", KeyAction::ResetTime),
        ("m", "M", KeyAction::ToggleMode),
        ("f", "F", KeyAction::ToggleFullscreen),
        ("h", "H", KeyAction::ToggleInfo),
        ("e", "E", KeyAction::ExportSettings),
    ] {
        assert_eq!(action_for_key(lower), Some(action));
        assert_eq!(action_for_key(upper), Some(action));
    }
}

#[test]
fn bracket_keys_step_in_opposite_directions() {
    assert_eq!(
        action_for_key("["),
        Some(KeyAction::CurlStrength(-CURL_STRENGTH_STEP))
    );
    assert_eq!(
        action_for_key("]"),
        Some(KeyAction::CurlStrength(CURL_STRENGTH_STEP))
    );
    assert_eq!(
        action_for_key("-"),
        Some(KeyAction::ParticleSize(-PARTICLE_SIZE_STEP))
    );
    assert_eq!(
        action_for_key("="),
        Some(KeyAction::ParticleSize(PARTICLE_SIZE_STEP))
    );
    assert_eq!(
        action_for_key(","),
        Some(KeyAction::NoiseScale(-NOISE_SCALE_STEP))
    );
    assert_eq!(
        action_for_key("."),
        Some(KeyAction::NoiseScale(NOISE_SCALE_STEP))
    );
}

#[test]
fn unmapped_keys_are_ignored() {
    for key in ["x", "1", "Enter", " ", ""] {
        assert_eq!(action_for_key(key), None, "key {key:?}");
    }
}

#[test]
fn step_clamped_stays_in_range() {
    assert_eq!(step_clamped(4.95, 0.1, 0.5, 5.0), 5.0);
    assert_eq!(step_clamped(0.55, -0.1, 0.5, 5.0), 0.5);
    assert!((step_clamped(2.5, 0.1, 0.5, 5.0) - 2.6).abs() < 1e-6);
}

#[test]
fn apply_toggles_mode_and_resets_time() {
    let mut field = small_field();
    field.update(3.0, glam::Vec3::ZERO, false).unwrap();
    assert!(apply(KeyAction::ToggleMode, &mut field));
    assert_eq!(field.params().mode, AnimationMode::CurlNoise);
    assert!(apply(KeyAction::ResetTime, &mut field));
    assert_eq!(field.params().elapsed_time, 0.0);
}

#[test]
fn apply_clamps_tuning_to_control_ranges() {
    let mut field = small_field();
    for _ in 0..100 {
        apply(KeyAction::CurlStrength(CURL_STRENGTH_STEP), &mut field);
        apply(KeyAction::ParticleSize(-PARTICLE_SIZE_STEP), &mut field);
        apply(KeyAction::NoiseScale(NOISE_SCALE_STEP), &mut field);
    }
    let p = field.params();
    assert_eq!(p.curl.curl_strength, CURL_STRENGTH_MAX);
    assert_eq!(p.point_size, PARTICLE_SIZE_MIN);
    assert_eq!(p.curl.noise_scale, NOISE_SCALE_MAX);
}

#[test]
fn page_actions_are_left_to_the_caller() {
    let mut field = small_field();
    let before = *field.params();
    for action in [
        KeyAction::ToggleFullscreen,
        KeyAction::ToggleInfo,
        KeyAction::ExportSettings,
    ] {
        assert!(!apply(action, &mut field));
    }
    assert_eq!(*field.params(), before);
}
