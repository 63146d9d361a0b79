use super::helpers::{self, BoundTexture, PipelineSpec};
use crate::constants::{GLOBE_FALLBACK_RGBA, SPHERE_LAT_SEGMENTS, SPHERE_LNG_SEGMENTS};
use globe_core::geometry::uv_sphere;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct GlobeVertex {
    position: [f32; 3],
    uv: [f32; 2],
}

/// The textured earth sphere.
pub(crate) struct GlobeLayer {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
    texture: BoundTexture,
}

impl GlobeLayer {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        camera_bgl: &wgpu::BindGroupLayout,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        // Flat colour until the night texture arrives (or for good if it fails).
        let texture = BoundTexture::new(device, queue, "globe_texture", (1, 1), &GLOBE_FALLBACK_RGBA);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("globe_pipeline_layout"),
            bind_group_layouts: &[camera_bgl, texture.layout()],
            push_constant_ranges: &[],
        });
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("globe_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::GLOBE_WGSL.into()),
        });
        let buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlobeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2],
        }];
        let pipeline = helpers::make_layer_pipeline(
            device,
            &layout,
            color_format,
            &PipelineSpec {
                label: "globe_pipeline",
                shader: &shader,
                vs_entry: "vs_globe",
                fs_entry: "fs_globe",
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                blend: None,
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );

        let (sphere, index_data) = uv_sphere(SPHERE_LAT_SEGMENTS, SPHERE_LNG_SEGMENTS);
        let vertex_data: Vec<GlobeVertex> = sphere
            .iter()
            .map(|v| GlobeVertex {
                position: v.position.to_array(),
                uv: v.uv.to_array(),
            })
            .collect();
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globe_vertices"),
            contents: bytemuck::cast_slice(&vertex_data),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globe_indices"),
            contents: bytemuck::cast_slice(&index_data),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline,
            vertices,
            indices,
            index_count: index_data.len() as u32,
            texture,
        }
    }

    pub(crate) fn set_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        size: (u32, u32),
        pixels: &[u8],
    ) {
        self.texture
            .replace(device, queue, "globe_texture", size, pixels);
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(1, &self.texture.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertices.slice(..));
        rpass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
