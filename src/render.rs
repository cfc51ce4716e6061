use glam::Vec2;
use nebula_core::{
    Camera, CameraBlock, ParamBlock, ParticleVertex, PostSettings, RenderBackend, RenderError,
};
use web_sys as web;

mod helpers;
mod particles;
mod post;
mod targets;

use particles::ParticleResources;
use post::{PostBindGroups, PostResources};
use targets::{RenderTargets, HDR_FORMAT};

// Near-black scene background
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.01,
    a: 1.0,
};

/// Mirrors `PostUniforms` in post.wgsl.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    texel: [f32; 2],
    bloom_strength: f32,
    bloom_threshold: f32,
    bloom_radius: f32,
    afterimage_damp: f32,
    exposure: f32,
    _pad: f32,
}

impl PostUniforms {
    fn new(settings: &PostSettings, width: u32, height: u32) -> Self {
        let bw = (width.max(1) / 2).max(1) as f32;
        let bh = (height.max(1) / 2).max(1) as f32;
        Self {
            texel: [1.0 / bw, 1.0 / bh],
            bloom_strength: settings.bloom_strength,
            bloom_threshold: settings.bloom_threshold,
            bloom_radius: settings.bloom_radius,
            afterimage_damp: settings.afterimage_damp.clamp(0.0, 1.0),
            exposure: 1.0,
            _pad: 0.0,
        }
    }
}

/// Post chain plus the targets and bind groups it reads and writes.
struct PostChain {
    resources: PostResources,
    targets: RenderTargets,
    groups: PostBindGroups,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sampler: wgpu::Sampler,
    particles: ParticleResources,
    post: Option<PostChain>,
    post_settings: PostSettings,
    width: u32,
    height: u32,
    released: bool,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, post_settings: PostSettings) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} format {:?}", width, height, format);

        let sampler = helpers::linear_sampler(&device);
        let post = if post_settings.enabled {
            match post::try_create_post_resources(&device, format).await {
                Some(resources) => {
                    let targets = RenderTargets::new(&device, width, height);
                    let groups = resources.bind_groups(&device, &sampler, &targets);
                    Some(PostChain {
                        resources,
                        targets,
                        groups,
                    })
                }
                None => None,
            }
        } else {
            log::info!("[post] disabled by configuration");
            None
        };
        let scene_format = if post.is_some() { HDR_FORMAT } else { format };
        let particles = ParticleResources::new(&device, scene_format);

        let state = Self {
            surface,
            device,
            queue,
            config,
            sampler,
            particles,
            post,
            post_settings,
            width,
            height,
            released: false,
        };
        state.write_post_uniforms();
        Ok(state)
    }

    pub fn has_post(&self) -> bool {
        self.post.is_some()
    }

    pub fn set_camera(&mut self, camera: &Camera) {
        if self.released {
            return;
        }
        let block = CameraBlock::new(
            camera.model_view_matrix(),
            camera.projection_matrix(),
            Vec2::new(self.width as f32, self.height as f32),
        );
        self.particles.write_camera(&self.queue, &block);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if self.released || width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            if let Some(chain) = &mut self.post {
                chain.targets.recreate(&self.device, width, height);
                chain.groups = chain
                    .resources
                    .bind_groups(&self.device, &self.sampler, &chain.targets);
            }
            self.write_post_uniforms();
            log::debug!("[gpu] resized to {}x{}", width, height);
        }
    }

    fn write_post_uniforms(&self) {
        if let Some(chain) = &self.post {
            let u = PostUniforms::new(&self.post_settings, self.width, self.height);
            self.queue
                .write_buffer(&chain.resources.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }
    }

    fn acquire(&mut self) -> Result<wgpu::SurfaceTexture, RenderError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(RenderError::OutOfMemory),
            Err(other) => Err(RenderError::Backend(format!("{:?}", other))),
        }
    }
}

impl RenderBackend for GpuState {
    fn upload_particles(&mut self, vertices: &[ParticleVertex]) {
        if self.released {
            return;
        }
        self.particles.upload(&self.device, vertices);
        log::info!("[gpu] uploaded {} particles", vertices.len());
    }

    fn push_params(&mut self, block: &ParamBlock) {
        if self.released {
            return;
        }
        self.particles.write_params(&self.queue, block);
    }

    fn render(&mut self, _dt: f32) -> Result<(), RenderError> {
        if self.released {
            return Ok(());
        }
        let frame = self.acquire()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        match &mut self.post {
            Some(chain) => {
                {
                    let mut pass =
                        helpers::clear_pass(&mut encoder, "scene_pass", &chain.targets.hdr, CLEAR_COLOR);
                    self.particles.draw(&mut pass);
                }
                chain
                    .resources
                    .encode(&mut encoder, &chain.groups, &chain.targets, &view);
                chain.targets.swap_history();
            }
            None => {
                let mut pass = helpers::clear_pass(&mut encoder, "direct_pass", &view, CLEAR_COLOR);
                self.particles.draw(&mut pass);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.particles.destroy();
        if let Some(mut chain) = self.post.take() {
            chain.targets.destroy();
            chain.resources.destroy();
        }
        self.released = true;
        log::info!("[gpu] resources released");
    }
}
