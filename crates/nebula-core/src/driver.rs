//! Per-frame orchestration: pointer, then field, then parameter push, then
//! render. The platform loop owns scheduling; this type owns the ordering.

use crate::block::{ParamBlock, ParticleVertex};
use crate::error::RenderError;
use crate::field::ParticleField;
use crate::pointer::{PointerTracker, Raycaster};

/// What the frame driver needs from a renderer.
pub trait RenderBackend {
    /// Static per-particle data, sent once after the field is created.
    fn upload_particles(&mut self, vertices: &[ParticleVertex]);
    /// Parameters for the next `render`.
    fn push_params(&mut self, block: &ParamBlock);
    fn render(&mut self, dt: f32) -> Result<(), RenderError>;
    /// Frees GPU-side resources. Called at most once per driver.
    fn release(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FrameOutcome {
    Rendered,
    /// The frame ran but the backend reported an error; state is kept.
    RenderFailed(RenderError),
    Skipped,
}

#[derive(Debug)]
pub struct FrameDriver {
    state: DriverState,
    frames: u64,
    released: bool,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            state: DriverState::Running,
            frames: 0,
            released: false,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn start(&mut self) {
        if self.released {
            log::warn!("[frame] start ignored after dispose");
            return;
        }
        self.state = DriverState::Running;
    }

    pub fn stop(&mut self) {
        if self.state == DriverState::Running {
            log::info!("[frame] stopped after {} frames", self.frames);
        }
        self.state = DriverState::Stopped;
    }

    /// Uploads the field's static attributes to `backend`.
    pub fn attach(&self, field: &ParticleField, backend: &mut dyn RenderBackend) -> bool {
        match field.attributes() {
            Ok(attrs) => {
                backend.upload_particles(&attrs.to_vertices());
                true
            }
            Err(e) => {
                log::warn!("[frame] attach skipped: {}", e);
                false
            }
        }
    }

    /// Runs one frame. A stopped driver or a disposed field makes this a no-op.
    pub fn frame(
        &mut self,
        dt: f32,
        tracker: &mut PointerTracker,
        field: &mut ParticleField,
        raycaster: &dyn Raycaster,
        backend: &mut dyn RenderBackend,
    ) -> FrameOutcome {
        if self.state != DriverState::Running || field.is_disposed() {
            return FrameOutcome::Skipped;
        }

        tracker.update(raycaster);
        if field
            .update(dt, tracker.world_position(), tracker.influences_field())
            .is_err()
        {
            return FrameOutcome::Skipped;
        }
        backend.push_params(field.param_block());
        self.frames += 1;

        match backend.render(dt) {
            Ok(()) => FrameOutcome::Rendered,
            Err(e) => {
                log::error!("[frame] render error: {}", e);
                FrameOutcome::RenderFailed(e)
            }
        }
    }

    /// Stops the loop, disposes the field and releases the backend once.
    pub fn dispose(&mut self, field: &mut ParticleField, backend: &mut dyn RenderBackend) {
        self.stop();
        field.dispose();
        if !self.released {
            backend.release();
            self.released = true;
        }
    }
}
