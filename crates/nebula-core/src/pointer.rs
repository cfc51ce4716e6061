//! Smoothed pointer tracking and its projection onto the particle field.

use crate::constants::{POINTER_SENTINEL, POINTER_SMOOTHING};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Resolves a normalized device coordinate to a point on the field plane.
pub trait Raycaster {
    fn raycast(&self, ndc: Vec2) -> Option<Vec3>;
}

impl<F> Raycaster for F
where
    F: Fn(Vec2) -> Option<Vec3>,
{
    fn raycast(&self, ndc: Vec2) -> Option<Vec3> {
        self(ndc)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerSettings {
    pub smoothing: f32,
    pub enabled: bool,
}

impl Default for PointerSettings {
    fn default() -> Self {
        Self {
            smoothing: POINTER_SMOOTHING,
            enabled: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub raw: Vec2,
    pub smoothed: Vec2,
    pub world_position: Vec3,
    pub velocity: Vec2,
    pub active: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            raw: Vec2::splat(POINTER_SENTINEL),
            smoothed: Vec2::splat(POINTER_SENTINEL),
            world_position: Vec3::ZERO,
            velocity: Vec2::ZERO,
            active: false,
        }
    }
}

/// Maps client pixel coordinates to NDC: x grows right, y grows up.
pub fn client_to_ndc(client: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        client.x / viewport.x * 2.0 - 1.0,
        -(client.y / viewport.y) * 2.0 + 1.0,
    ))
}

#[derive(Debug, Default)]
pub struct PointerTracker {
    state: PointerState,
    settings: PointerSettings,
    last_raw: Option<Vec2>,
    // smoothed still holds the sentinel until the first activation
    smoothed_valid: bool,
    // world_position is only meaningful once a raycast has landed
    has_hit: bool,
}

impl PointerTracker {
    pub fn new(settings: PointerSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &PointerState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Active and projected onto the field at least once. Until then the
    /// world position is a placeholder and must not repel particles.
    pub fn influences_field(&self) -> bool {
        self.state.active && self.has_hit
    }

    pub fn world_position(&self) -> Vec3 {
        self.state.world_position
    }

    pub fn velocity(&self) -> Vec2 {
        self.state.velocity
    }

    pub fn settings(&self) -> &PointerSettings {
        &self.settings
    }

    /// Disabling deactivates the tracker and drops events until re-enabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.settings.enabled == enabled {
            return;
        }
        self.settings.enabled = enabled;
        if !enabled {
            self.on_pointer_leave_or_end();
        }
        log::info!("[pointer] interaction {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32, viewport: Vec2) {
        if !self.settings.enabled {
            return;
        }
        let Some(ndc) = client_to_ndc(Vec2::new(client_x, client_y), viewport) else {
            return;
        };
        self.state.raw = ndc;
        self.state.active = true;
        self.state.velocity = self.last_raw.map_or(Vec2::ZERO, |last| ndc - last);
        self.last_raw = Some(ndc);
    }

    pub fn on_pointer_leave_or_end(&mut self) {
        self.state.active = false;
        self.state.raw = Vec2::splat(POINTER_SENTINEL);
    }

    /// Eases the smoothed position toward the raw sample and re-projects it.
    /// A raycast miss keeps the previous world position.
    pub fn update(&mut self, raycaster: &dyn Raycaster) {
        if !self.state.active {
            return;
        }
        if self.smoothed_valid {
            let s = &mut self.state;
            s.smoothed += (s.raw - s.smoothed) * self.settings.smoothing;
        } else {
            self.state.smoothed = self.state.raw;
            self.smoothed_valid = true;
        }
        match raycaster.raycast(self.state.smoothed) {
            Some(hit) if hit.is_finite() => {
                self.state.world_position = hit;
                self.has_hit = true;
            }
            _ => log::trace!("[pointer] raycast miss at {:?}", self.state.smoothed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Vec2 = Vec2::new(800.0, 600.0);

    fn plane_hit(ndc: Vec2) -> Option<Vec3> {
        Some(Vec3::new(ndc.x * 10.0, 0.0, -ndc.y * 10.0))
    }

    fn always_miss(_: Vec2) -> Option<Vec3> {
        None
    }

    #[test]
    fn ndc_flips_y() {
        assert_eq!(client_to_ndc(Vec2::ZERO, VIEW), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(client_to_ndc(VIEW, VIEW), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(client_to_ndc(VIEW * 0.5, VIEW), Some(Vec2::ZERO));
        assert_eq!(client_to_ndc(Vec2::ONE, Vec2::ZERO), None);
    }

    #[test]
    fn first_activation_snaps_then_smooths() {
        let mut t = PointerTracker::default();
        t.on_pointer_move(400.0, 300.0, VIEW);
        t.update(&plane_hit);
        assert_eq!(t.state().smoothed, Vec2::ZERO);
        assert_eq!(t.world_position(), Vec3::ZERO);

        t.on_pointer_move(800.0, 300.0, VIEW);
        t.update(&plane_hit);
        assert!((t.state().smoothed.x - POINTER_SMOOTHING).abs() < 1e-6);
        assert!((t.velocity().x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn leave_freezes_world_position() {
        let mut t = PointerTracker::default();
        t.on_pointer_move(600.0, 150.0, VIEW);
        t.update(&plane_hit);
        let frozen = t.world_position();
        assert_ne!(frozen, Vec3::ZERO);

        t.on_pointer_leave_or_end();
        assert!(!t.is_active());
        assert_eq!(t.state().raw, Vec2::splat(POINTER_SENTINEL));
        t.update(&plane_hit);
        assert_eq!(t.world_position(), frozen);
    }

    #[test]
    fn raycast_miss_keeps_last_good_position() {
        let mut t = PointerTracker::default();
        t.on_pointer_move(600.0, 150.0, VIEW);
        t.update(&plane_hit);
        let good = t.world_position();
        t.on_pointer_move(100.0, 100.0, VIEW);
        t.update(&always_miss);
        assert_eq!(t.world_position(), good);
        assert!(t.world_position().is_finite());
    }

    #[test]
    fn disabled_tracker_ignores_events() {
        let mut t = PointerTracker::default();
        t.on_pointer_move(10.0, 10.0, VIEW);
        t.set_enabled(false);
        assert!(!t.is_active());
        t.on_pointer_move(20.0, 20.0, VIEW);
        assert!(!t.is_active());
        t.set_enabled(true);
        t.on_pointer_move(20.0, 20.0, VIEW);
        assert!(t.is_active());
    }

    #[test]
    fn no_influence_before_first_hit() {
        let mut t = PointerTracker::default();
        t.on_pointer_move(400.0, 300.0, VIEW);
        assert!(t.is_active());
        assert!(!t.influences_field());
        t.update(&always_miss);
        t.update(&always_miss);
        assert!(t.is_active());
        assert!(!t.influences_field());

        t.update(&plane_hit);
        assert!(t.influences_field());
        t.update(&always_miss);
        assert!(t.influences_field());

        t.on_pointer_leave_or_end();
        assert!(!t.influences_field());
    }

    #[test]
    fn enter_without_motion_engages_pointer() {
        let mut t = PointerTracker::default();
        t.on_pointer_move(600.0, 150.0, VIEW);
        t.update(&plane_hit);
        assert!(t.influences_field());
        let entered = t.world_position();
        t.update(&plane_hit);
        assert_eq!(t.world_position(), entered);
        assert_eq!(t.velocity(), Vec2::ZERO);
    }
}
