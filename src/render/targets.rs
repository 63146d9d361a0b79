use super::helpers;

/// Depth buffer matching the swapchain size.
pub(crate) struct DepthTarget {
    pub(crate) tex: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
}

impl DepthTarget {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (tex, view) = helpers::create_texture_device(
            device,
            "depth_tex",
            width.max(1),
            height.max(1),
            helpers::DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        Self { tex, view }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.tex.destroy();
        *self = Self::new(device, width, height);
    }
}
