use glam::{Vec2, Vec3};
use nebula_core::params::WaveCoefficients;
use nebula_core::{
    AnimationMode, AnimationParameters, FieldError, FrameDriver, FrameOutcome, ParamBlock,
    ParticleField, ParticleGridSpec, ParticleVertex, PointerTracker, RenderBackend, RenderError,
};

fn grid_4x4() -> ParticleGridSpec {
    ParticleGridSpec {
        width: 4.0,
        depth: 4.0,
        resolution_x: 4,
        resolution_z: 4,
    }
}

fn flat_wave() -> AnimationParameters {
    AnimationParameters {
        mode: AnimationMode::Wave,
        wave: WaveCoefficients::flat(),
        ..AnimationParameters::default()
    }
}

fn positions(field: &ParticleField) -> Vec<Vec3> {
    field
        .evaluate()
        .expect("field is live")
        .into_iter()
        .map(|r| r.position)
        .collect()
}

#[test]
fn flat_wave_field_stays_on_its_grid() {
    let mut field = ParticleField::with_seed(grid_4x4(), flat_wave(), 42).unwrap();
    field.update(0.0, Vec3::ZERO, false).unwrap();

    let bases = field.attributes().unwrap().base_positions.clone();
    let out = positions(&field);
    assert_eq!(out.len(), 16);
    for (p, b) in out.iter().zip(&bases) {
        assert_eq!(p.y, 0.0);
        assert_eq!(p.x, b.x);
        assert_eq!(p.z, b.z);
    }
}

#[test]
fn zero_strength_curl_matches_flat_wave() {
    let mut wave = ParticleField::with_seed(grid_4x4(), flat_wave(), 42).unwrap();
    let mut params = AnimationParameters::default();
    params.mode = AnimationMode::CurlNoise;
    params.curl.curl_strength = 0.0;
    let mut curl = ParticleField::with_seed(grid_4x4(), params, 42).unwrap();

    wave.update(0.0, Vec3::ZERO, false).unwrap();
    curl.update(0.0, Vec3::ZERO, false).unwrap();
    assert_eq!(positions(&wave), positions(&curl));
}

#[test]
fn pointer_lifts_particles_near_it_only() {
    let mut field = ParticleField::with_seed(grid_4x4(), flat_wave(), 1).unwrap();
    field.set_pointer_influence(1.5, 5.0);
    field.update(0.016, Vec3::new(-2.0, 0.0, -2.0), true).unwrap();

    let out = positions(&field);
    // particle 0 sits exactly under the pointer
    assert_eq!(out[0], Vec3::new(-2.0, 5.0, -2.0));
    // far corner is untouched
    assert_eq!(out[15], Vec3::new(1.0, 0.0, 1.0));
}

#[test]
fn setters_take_effect_on_next_evaluation() {
    let mut field =
        ParticleField::with_seed(grid_4x4(), AnimationParameters::default(), 5).unwrap();
    field.set_mode(AnimationMode::CurlNoise);
    field.set_curl_strength(0.0);
    field.set_noise_scale(0.3);
    field.set_particle_size(10.0);
    field.set_pixel_ratio(2.0);
    field.update(1.0, Vec3::ZERO, false).unwrap();

    let block = field.param_block();
    assert_eq!(block.frame, [1.0, 1.0, 10.0, 2.0]);
    assert_eq!(block.curl[0], 0.3);

    let scales = field.attributes().unwrap().size_scales.clone();
    for (r, s) in field.evaluate().unwrap().iter().zip(scales) {
        assert!((r.point_size - 10.0 * s * 2.0 * r.size_multiplier).abs() < 1e-4);
    }
}

#[test]
fn update_after_dispose_has_no_effect() {
    let mut field = ParticleField::with_seed(grid_4x4(), flat_wave(), 1).unwrap();
    field.update(0.5, Vec3::ZERO, false).unwrap();
    let block = *field.param_block();
    field.dispose();

    assert_eq!(field.update(0.5, Vec3::ONE, true), Err(FieldError::Disposed));
    assert_eq!(*field.param_block(), block);
    assert_eq!(field.params().elapsed_time, 0.5);
}

#[derive(Default)]
struct CountingBackend {
    last: Option<ParamBlock>,
    frames: u32,
}

impl RenderBackend for CountingBackend {
    fn upload_particles(&mut self, _vertices: &[ParticleVertex]) {}
    fn push_params(&mut self, block: &ParamBlock) {
        self.last = Some(*block);
    }
    fn render(&mut self, _dt: f32) -> Result<(), RenderError> {
        self.frames += 1;
        Ok(())
    }
    fn release(&mut self) {}
}

#[test]
fn pointer_leave_freezes_pushed_position() {
    let mut driver = FrameDriver::new();
    let mut tracker = PointerTracker::default();
    let mut field = ParticleField::with_seed(grid_4x4(), flat_wave(), 3).unwrap();
    let mut backend = CountingBackend::default();
    let ray = |ndc: Vec2| Some(Vec3::new(ndc.x * 2.0, 0.0, ndc.y * 2.0));
    let viewport = Vec2::new(100.0, 100.0);

    tracker.on_pointer_move(75.0, 25.0, viewport);
    driver.frame(0.016, &mut tracker, &mut field, &ray, &mut backend);
    let live = backend.last.map(|b| b.pointer).unwrap_or_default();
    assert_eq!(live, [1.0, 0.0, 1.0, 1.0]);

    tracker.on_pointer_leave_or_end();
    let out = driver.frame(0.016, &mut tracker, &mut field, &ray, &mut backend);
    assert_eq!(out, FrameOutcome::Rendered);
    let after = backend.last.map(|b| b.pointer).unwrap_or_default();
    assert_eq!(after, [1.0, 0.0, 1.0, 0.0]);
    assert_eq!(backend.frames, 2);
}
