use super::helpers;
use super::targets::{RenderTargets, HDR_FORMAT};
use super::PostUniforms;

pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    pub(crate) uniform_buffer: wgpu::Buffer,
    bright_pipeline: wgpu::RenderPipeline,
    blur_h_pipeline: wgpu::RenderPipeline,
    blur_v_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
    afterimage_pipeline: wgpu::RenderPipeline,
    present_pipeline: wgpu::RenderPipeline,
}

/// Bind groups over the current `RenderTargets`; rebuilt on resize.
pub(crate) struct PostBindGroups {
    from_hdr: wgpu::BindGroup,
    from_bloom_a: wgpu::BindGroup,
    from_bloom_b: wgpu::BindGroup,
    from_composite: wgpu::BindGroup,
    from_history: [wgpu::BindGroup; 2],
    bloom_a_only: wgpu::BindGroup,
    history_only: [wgpu::BindGroup; 2],
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

/// Builds the post chain inside a validation error scope. `None` means the
/// device rejected part of it and the caller should render directly.
pub(crate) async fn try_create_post_resources(
    device: &wgpu::Device,
    swap_format: wgpu::TextureFormat,
) -> Option<PostResources> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let post = create_post_resources(device, swap_format);
    match device.pop_error_scope().await {
        None => Some(post),
        Some(e) => {
            log::warn!("[post] disabled, pipeline creation failed: {}", e);
            None
        }
    }
}

fn create_post_resources(
    device: &wgpu::Device,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("post_shader"),
        source: wgpu::ShaderSource::Wgsl(nebula_core::POST_WGSL.into()),
    });
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            texture_entry(0),
            sampler_entry(1),
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[texture_entry(0), sampler_entry(1)],
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("post_uniforms"),
        size: std::mem::size_of::<PostUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_pair = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_01"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let make = |layout: &wgpu::PipelineLayout, entry: &str, format: wgpu::TextureFormat| {
        helpers::make_post_pipeline(device, layout, &shader, entry, format)
    };

    PostResources {
        bright_pipeline: make(&pl_single, "fs_bright", HDR_FORMAT),
        blur_h_pipeline: make(&pl_single, "fs_blur_h", HDR_FORMAT),
        blur_v_pipeline: make(&pl_single, "fs_blur_v", HDR_FORMAT),
        composite_pipeline: make(&pl_pair, "fs_composite", HDR_FORMAT),
        afterimage_pipeline: make(&pl_pair, "fs_afterimage", HDR_FORMAT),
        present_pipeline: make(&pl_single, "fs_present", swap_format),
        bgl0,
        bgl1,
        uniform_buffer,
    }
}

impl PostResources {
    pub(crate) fn bind_groups(
        &self,
        device: &wgpu::Device,
        sampler: &wgpu::Sampler,
        targets: &RenderTargets,
    ) -> PostBindGroups {
        let source = |label: &str, view: &wgpu::TextureView| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &self.bgl0,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: self.uniform_buffer.as_entire_binding(),
                    },
                ],
            })
        };
        let aux = |label: &str, view: &wgpu::TextureView| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &self.bgl1,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            })
        };
        PostBindGroups {
            from_hdr: source("bg_hdr", &targets.hdr),
            from_bloom_a: source("bg_from_bloom_a", &targets.bloom_a),
            from_bloom_b: source("bg_from_bloom_b", &targets.bloom_b),
            from_composite: source("bg_from_composite", &targets.composite),
            from_history: [
                source("bg_from_history_a", &targets.history[0]),
                source("bg_from_history_b", &targets.history[1]),
            ],
            bloom_a_only: aux("bg_bloom_a_only", &targets.bloom_a),
            history_only: [
                aux("bg_history_a_only", &targets.history[0]),
                aux("bg_history_b_only", &targets.history[1]),
            ],
        }
    }

    /// Records bright -> blur -> composite -> afterimage -> present. Expects
    /// the scene already drawn into `targets.hdr`.
    pub(crate) fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        groups: &PostBindGroups,
        targets: &RenderTargets,
        output: &wgpu::TextureView,
    ) {
        let cur = targets.current;
        let prev = targets.previous();

        blit(encoder, "bright_pass", &targets.bloom_a, &self.bright_pipeline, &groups.from_hdr, None);
        blit(encoder, "blur_h", &targets.bloom_b, &self.blur_h_pipeline, &groups.from_bloom_a, None);
        blit(encoder, "blur_v", &targets.bloom_a, &self.blur_v_pipeline, &groups.from_bloom_b, None);
        blit(
            encoder,
            "composite",
            &targets.composite,
            &self.composite_pipeline,
            &groups.from_hdr,
            Some(&groups.bloom_a_only),
        );
        blit(
            encoder,
            "afterimage",
            &targets.history[cur],
            &self.afterimage_pipeline,
            &groups.from_composite,
            Some(&groups.history_only[prev]),
        );
        blit(
            encoder,
            "present",
            output,
            &self.present_pipeline,
            &groups.from_history[cur],
            None,
        );
    }

    pub(crate) fn destroy(&self) {
        self.uniform_buffer.destroy();
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = helpers::clear_pass(encoder, label, target, wgpu::Color::BLACK);
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
