use super::helpers::{self, DynamicBuffer, PipelineSpec};
use glam::{Mat4, Vec3};
use globe_core::constants::MODEL_UNITS_PER_GLOBE;
use globe_core::model::Mesh;
use globe_core::MovingMarker;
use std::rc::Rc;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelVertex {
    position: [f32; 3],
    normal: [f32; 3],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelInstance {
    model: [[f32; 4]; 4],
}

struct MeshBuffers {
    source: Rc<Mesh>,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    fn upload(device: &wgpu::Device, mesh: &Rc<Mesh>) -> Self {
        let vertex_data: Vec<ModelVertex> = mesh
            .positions
            .iter()
            .zip(&mesh.normals)
            .zip(&mesh.colors)
            .map(|((p, n), c)| ModelVertex {
                position: p.to_array(),
                normal: n.to_array(),
                color: c.to_array(),
            })
            .collect();
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("model_vertices"),
            contents: bytemuck::cast_slice(&vertex_data),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("model_indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            source: Rc::clone(mesh),
            vertices,
            indices,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// Instanced draw of the moving marker meshes.
pub(crate) struct ModelLayer {
    pipeline: wgpu::RenderPipeline,
    mesh: Option<MeshBuffers>,
    instances: DynamicBuffer,
}

impl ModelLayer {
    pub(crate) fn new(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("model_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::MODEL_WGSL.into()),
        });
        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ModelVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ModelInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    3 => Float32x4, 4 => Float32x4, 5 => Float32x4, 6 => Float32x4
                ],
            },
        ];
        let pipeline = helpers::make_layer_pipeline(
            device,
            layout,
            color_format,
            &PipelineSpec {
                label: "model_pipeline",
                shader: &shader,
                vs_entry: "vs_model",
                fs_entry: "fs_model",
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                blend: None,
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );
        Self {
            pipeline,
            mesh: None,
            instances: DynamicBuffer::default(),
        }
    }

    /// Upload the markers' transforms. Every marker is cloned from one
    /// template, so mesh buffers are only rebuilt when the template changes.
    pub(crate) fn set_objects(&mut self, device: &wgpu::Device, objects: &[MovingMarker]) {
        if let Some(first) = objects.first() {
            let mesh = &first.object.mesh;
            let cached = self
                .mesh
                .as_ref()
                .is_some_and(|m| Rc::ptr_eq(&m.source, mesh));
            if !cached {
                self.mesh = Some(MeshBuffers::upload(device, mesh));
            }
        }
        let to_world = Mat4::from_scale(Vec3::splat(MODEL_UNITS_PER_GLOBE));
        let instances: Vec<ModelInstance> = objects
            .iter()
            .map(|m| ModelInstance {
                model: (m.object.transform.matrix() * to_world).to_cols_array_2d(),
            })
            .collect();
        self.instances.replace(device, "model_instances", &instances);
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        let (Some(mesh), Some(instances)) = (&self.mesh, self.instances.slice()) else {
            return;
        };
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, mesh.vertices.slice(..));
        rpass.set_vertex_buffer(1, instances);
        rpass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..mesh.index_count, 0, 0..self.instances.count());
    }
}
