use super::helpers::{self, BoundTexture, PipelineSpec};
use crate::constants::{STAR_COUNT, STAR_SEED, STAR_TEXTURE_SIZE};
use rand::prelude::*;

/// Equirectangular star field: black with `count` scattered stars of
/// random brightness. The same seed always yields the same sky.
pub(crate) fn star_field(width: u32, height: u32, count: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pixels = vec![0u8; (width * height * 4) as usize];
    for alpha in pixels.iter_mut().skip(3).step_by(4) {
        *alpha = 255;
    }
    if width == 0 || height == 0 {
        return pixels;
    }
    for _ in 0..count {
        let x = rng.gen_range(0..width);
        let y = rng.gen_range(0..height);
        let level: u8 = rng.gen_range(60..=255);
        let tint: u8 = rng.gen_range(0..=40);
        let i = ((y * width + x) * 4) as usize;
        pixels[i] = level.saturating_sub(tint);
        pixels[i + 1] = level.saturating_sub(tint / 2);
        pixels[i + 2] = level;
    }
    pixels
}

/// Fullscreen background drawn behind everything else.
pub(crate) struct SkyLayer {
    pipeline: wgpu::RenderPipeline,
    texture: BoundTexture,
}

impl SkyLayer {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        camera_bgl: &wgpu::BindGroupLayout,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let (w, h) = STAR_TEXTURE_SIZE;
        let texture = BoundTexture::new(
            device,
            queue,
            "sky_texture",
            STAR_TEXTURE_SIZE,
            &star_field(w, h, STAR_COUNT, STAR_SEED),
        );
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sky_pipeline_layout"),
            bind_group_layouts: &[camera_bgl, texture.layout()],
            push_constant_ranges: &[],
        });
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sky_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SKY_WGSL.into()),
        });
        let pipeline = helpers::make_layer_pipeline(
            device,
            &layout,
            color_format,
            &PipelineSpec {
                label: "sky_pipeline",
                shader: &shader,
                vs_entry: "vs_fullscreen",
                fs_entry: "fs_sky",
                buffers: &[],
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                blend: None,
                depth_write: false,
                depth_compare: wgpu::CompareFunction::Always,
            },
        );
        Self { pipeline, texture }
    }

    pub(crate) fn set_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        size: (u32, u32),
        pixels: &[u8],
    ) {
        self.texture.replace(device, queue, "sky_texture", size, pixels);
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(1, &self.texture.bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }
}

