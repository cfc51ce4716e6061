//! The particle field: a fixed grid of rest positions plus the animation
//! parameters that drive it.
//!
//! Lifecycle is `create` → `update`* → `dispose`. Construction is the only
//! way to obtain a field, so there is no "update before create" state; after
//! `dispose` every operation that would touch the released attributes
//! returns [`FieldError::Disposed`] and changes nothing.

use crate::block::{ParamBlock, ParticleVertex};
use crate::constants::{SIZE_SCALE_MAX, SIZE_SCALE_MIN};
use crate::displacement::{displace, PointerSnapshot};
use crate::error::{FieldError, FieldResult};
use crate::params::{AnimationMode, AnimationParameters};
use crate::shading::shade;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleGridSpec {
    pub width: f32,
    pub depth: f32,
    pub resolution_x: u32,
    pub resolution_z: u32,
}

impl Default for ParticleGridSpec {
    fn default() -> Self {
        Self {
            width: 60.0,
            depth: 40.0,
            resolution_x: 380,
            resolution_z: 260,
        }
    }
}

impl ParticleGridSpec {
    /// Lighter grid for phones and tablets.
    pub fn mobile() -> Self {
        Self {
            resolution_x: 200,
            resolution_z: 150,
            ..Self::default()
        }
    }

    pub fn particle_count(&self) -> usize {
        self.resolution_x as usize * self.resolution_z as usize
    }
}

/// Per-particle static data, index aligned. Row-major with x outer.
#[derive(Clone, Debug, Default)]
pub struct ParticleAttributes {
    pub base_positions: Vec<Vec3>,
    pub size_scales: Vec<f32>,
    pub planar_offsets: Vec<Vec2>,
}

impl ParticleAttributes {
    pub fn generate<R: Rng + ?Sized>(spec: &ParticleGridSpec, rng: &mut R) -> Self {
        let count = spec.particle_count();
        let mut base_positions = Vec::with_capacity(count);
        let mut size_scales = Vec::with_capacity(count);
        let mut planar_offsets = Vec::with_capacity(count);

        for i in 0..spec.resolution_x {
            let u = i as f32 / spec.resolution_x as f32;
            let x = (u - 0.5) * spec.width;
            for j in 0..spec.resolution_z {
                let v = j as f32 / spec.resolution_z as f32;
                let z = (v - 0.5) * spec.depth;
                base_positions.push(Vec3::new(x, 0.0, z));
                planar_offsets.push(Vec2::new(x, z));
                size_scales.push(rng.gen_range(SIZE_SCALE_MIN..SIZE_SCALE_MAX));
            }
        }

        Self {
            base_positions,
            size_scales,
            planar_offsets,
        }
    }

    pub fn len(&self) -> usize {
        self.base_positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base_positions.is_empty()
    }

    /// Interleaved instance data for upload.
    pub fn to_vertices(&self) -> Vec<ParticleVertex> {
        self.base_positions
            .iter()
            .zip(&self.size_scales)
            .zip(&self.planar_offsets)
            .map(|((p, s), o)| ParticleVertex {
                base_position: p.to_array(),
                size_scale: *s,
                planar_offset: o.to_array(),
                _pad: [0.0; 2],
            })
            .collect()
    }
}

/// CPU evaluation of one particle, matching what the GPU program draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderAttributes {
    pub position: Vec3,
    pub color: Vec3,
    pub alpha: f32,
    pub size_multiplier: f32,
    /// Pixel size before perspective attenuation.
    pub point_size: f32,
}

#[derive(Debug)]
pub struct ParticleField {
    spec: ParticleGridSpec,
    params: AnimationParameters,
    attributes: Option<ParticleAttributes>,
    pointer: PointerSnapshot,
    block: ParamBlock,
}

impl ParticleField {
    pub fn create<R: Rng + ?Sized>(
        spec: ParticleGridSpec,
        params: AnimationParameters,
        rng: &mut R,
    ) -> FieldResult<Self> {
        if spec.resolution_x == 0 || spec.resolution_z == 0 {
            return Err(FieldError::EmptyGrid {
                resolution_x: spec.resolution_x,
                resolution_z: spec.resolution_z,
            });
        }
        let attributes = ParticleAttributes::generate(&spec, rng);
        log::info!(
            "[field] created {} particles ({}x{} over {}x{})",
            attributes.len(),
            spec.resolution_x,
            spec.resolution_z,
            spec.width,
            spec.depth
        );
        let pointer = PointerSnapshot {
            radius: params.pointer.radius,
            strength: params.pointer.strength,
            ..PointerSnapshot::inactive()
        };
        Ok(Self {
            spec,
            block: ParamBlock::lower(&params, &pointer),
            params,
            attributes: Some(attributes),
            pointer,
        })
    }

    pub fn with_seed(
        spec: ParticleGridSpec,
        params: AnimationParameters,
        seed: u64,
    ) -> FieldResult<Self> {
        Self::create(spec, params, &mut StdRng::seed_from_u64(seed))
    }

    /// Field with a fresh random seed.
    pub fn new(spec: ParticleGridSpec, params: AnimationParameters) -> FieldResult<Self> {
        Self::create(spec, params, &mut StdRng::from_entropy())
    }

    pub fn spec(&self) -> &ParticleGridSpec {
        &self.spec
    }

    pub fn particle_count(&self) -> usize {
        self.spec.particle_count()
    }

    pub fn params(&self) -> &AnimationParameters {
        &self.params
    }

    pub fn attributes(&self) -> FieldResult<&ParticleAttributes> {
        self.attributes.as_ref().ok_or(FieldError::Disposed)
    }

    pub fn pointer(&self) -> &PointerSnapshot {
        &self.pointer
    }

    pub fn is_disposed(&self) -> bool {
        self.attributes.is_none()
    }

    /// Advances time and snapshots the pointer for the next render. The
    /// lowered block is available from [`Self::param_block`] afterwards.
    pub fn update(&mut self, dt: f32, pointer_world: Vec3, pointer_active: bool) -> FieldResult<()> {
        if self.is_disposed() {
            return Err(FieldError::Disposed);
        }
        self.params.elapsed_time += dt;
        // an inactive pointer keeps its last position, as the GPU block did
        if pointer_active {
            self.pointer.world_position = pointer_world;
        }
        self.pointer.active = pointer_active;
        self.pointer.radius = self.params.pointer.radius;
        self.pointer.strength = self.params.pointer.strength;
        self.block = ParamBlock::lower(&self.params, &self.pointer);
        Ok(())
    }

    /// Block produced by the most recent `update` (or creation).
    pub fn param_block(&self) -> &ParamBlock {
        &self.block
    }

    /// Runs displacement and shading for every particle on the CPU.
    pub fn evaluate(&self) -> FieldResult<Vec<RenderAttributes>> {
        let attributes = self.attributes()?;
        let params = &self.params;
        Ok(attributes
            .base_positions
            .iter()
            .zip(&attributes.size_scales)
            .map(|(base, scale)| {
                let displaced = displace(*base, params, &self.pointer);
                let shaded = shade(displaced.position, displaced.curl_magnitude(), params);
                RenderAttributes {
                    position: displaced.position,
                    color: shaded.color,
                    alpha: shaded.alpha,
                    size_multiplier: shaded.size_multiplier,
                    point_size: params.point_size
                        * scale
                        * params.pixel_ratio
                        * shaded.size_multiplier,
                }
            })
            .collect())
    }

    pub fn set_mode(&mut self, mode: AnimationMode) {
        if self.params.mode != mode {
            log::info!("[field] mode {:?} -> {:?}", self.params.mode, mode);
        }
        self.params.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> AnimationMode {
        self.set_mode(self.params.mode.toggled());
        self.params.mode
    }

    pub fn set_curl_strength(&mut self, strength: f32) {
        self.params.curl.curl_strength = strength;
    }

    pub fn set_noise_scale(&mut self, scale: f32) {
        self.params.curl.noise_scale = scale;
    }

    pub fn set_particle_size(&mut self, size: f32) {
        self.params.point_size = size;
    }

    pub fn set_pixel_ratio(&mut self, ratio: f32) {
        self.params.pixel_ratio = ratio;
    }

    pub fn set_pointer_influence(&mut self, radius: f32, strength: f32) {
        self.params.pointer.radius = radius;
        self.params.pointer.strength = strength;
    }

    /// Restarts the animation clock. Attributes and coefficients are kept.
    pub fn reset_time(&mut self) {
        self.params.elapsed_time = 0.0;
        log::info!("[field] time reset");
    }

    /// Releases the attributes. Returns `true` only on the first call.
    pub fn dispose(&mut self) -> bool {
        match self.attributes.take() {
            Some(_) => {
                log::info!("[field] disposed");
                true
            }
            None => false,
        }
    }
}
