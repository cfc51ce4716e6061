use super::helpers;

pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen color targets for the post chain.
///
/// - `hdr` receives the additive particle pass.
/// - `composite` holds scene + bloom before the afterimage blend.
/// - `bloom_*` are half-res ping-pong buffers for bright-pass and blur.
/// - `history` is the afterimage ping-pong pair; `current` indexes the one
///   written this frame.
pub(crate) struct RenderTargets {
    pub(crate) hdr: wgpu::TextureView,
    pub(crate) composite: wgpu::TextureView,
    pub(crate) bloom_a: wgpu::TextureView,
    pub(crate) bloom_b: wgpu::TextureView,
    pub(crate) history: [wgpu::TextureView; 2],
    pub(crate) current: usize,
    // views keep their textures alive, the handles are kept for explicit destroy
    textures: Vec<wgpu::Texture>,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let mut textures = Vec::with_capacity(6);
        let mut make = |label: &str, w: u32, h: u32| {
            let (tex, view) = helpers::create_color_texture(device, label, w, h, HDR_FORMAT);
            textures.push(tex);
            view
        };
        let bw = (width.max(1) / 2).max(1);
        let bh = (height.max(1) / 2).max(1);
        let hdr = make("hdr_tex", width, height);
        let composite = make("composite_tex", width, height);
        let bloom_a = make("bloom_a", bw, bh);
        let bloom_b = make("bloom_b", bw, bh);
        let history = [
            make("history_a", width, height),
            make("history_b", width, height),
        ];
        Self {
            hdr,
            composite,
            bloom_a,
            bloom_b,
            history,
            current: 0,
            textures,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.destroy();
        *self = Self::new(device, width, height);
    }

    pub(crate) fn previous(&self) -> usize {
        1 - self.current
    }

    pub(crate) fn swap_history(&mut self) {
        self.current = self.previous();
    }

    pub(crate) fn destroy(&mut self) {
        for tex in self.textures.drain(..) {
            tex.destroy();
        }
    }
}
