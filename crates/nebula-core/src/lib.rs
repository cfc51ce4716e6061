//! Platform-independent core of the nebula particle field.
//!
//! The displacement and shading model lives here twice: once as plain Rust
//! (`displacement`, `shading`, used by `ParticleField::evaluate` and the
//! tests) and once as WGSL in [`PARTICLES_WGSL`], which the web renderer runs
//! per particle per frame. The host side only pushes a [`ParamBlock`].

pub mod block;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod displacement;
pub mod driver;
pub mod error;
pub mod field;
pub mod math;
pub mod noise;
pub mod params;
pub mod pointer;
pub mod shading;

pub use block::{CameraBlock, ParamBlock, ParticleVertex};
pub use camera::{Camera, CameraSettings};
pub use clock::Clock;
pub use config::{NebulaConfig, PostSettings};
pub use displacement::{displace, PointerSnapshot};
pub use driver::{DriverState, FrameDriver, FrameOutcome, RenderBackend};
pub use error::{ConfigError, FieldError, RenderError};
pub use field::{ParticleAttributes, ParticleField, ParticleGridSpec, RenderAttributes};
pub use noise::{curl3, noise3};
pub use params::{AnimationMode, AnimationParameters};
pub use pointer::{PointerSettings, PointerState, PointerTracker, Raycaster};
pub use shading::shade;

/// Particle billboard program: `vs_main` / `fs_main`.
pub const PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
/// Full-screen post-processing programs.
pub const POST_WGSL: &str = include_str!("../shaders/post.wgsl");
