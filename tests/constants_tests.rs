// Host-side checks that the keyboard ranges agree with the core defaults.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use nebula_core::AnimationParameters;

#[test]
#[allow(clippy::assertions_on_constants)]
fn ranges_are_ordered_and_steps_fit() {
    for (min, max, step) in [
        (CURL_STRENGTH_MIN, CURL_STRENGTH_MAX, CURL_STRENGTH_STEP),
        (PARTICLE_SIZE_MIN, PARTICLE_SIZE_MAX, PARTICLE_SIZE_STEP),
        (NOISE_SCALE_MIN, NOISE_SCALE_MAX, NOISE_SCALE_STEP),
    ] {
        assert!(min < max);
        assert!(step > 0.0 && step < max - min);
    }
    assert!(FPS_REFRESH_SEC > 0.0);
}

#[test]
fn defaults_start_inside_keyboard_ranges() {
    let p = AnimationParameters::default();
    assert!((CURL_STRENGTH_MIN..=CURL_STRENGTH_MAX).contains(&p.curl.curl_strength));
    assert!((PARTICLE_SIZE_MIN..=PARTICLE_SIZE_MAX).contains(&p.point_size));
    assert!((NOISE_SCALE_MIN..=NOISE_SCALE_MAX).contains(&p.curl.noise_scale));
}

#[test]
fn element_ids_are_distinct() {
    let ids = [
        CANVAS_ID,
        CONFIG_SCRIPT_ID,
        LOADING_ID,
        INFO_ID,
        PARTICLE_COUNT_ID,
        FPS_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
