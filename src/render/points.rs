use super::helpers::{self, DynamicBuffer, PipelineSpec};
use globe_core::constants::POINT_ALTITUDE;
use globe_core::geo::to_cartesian;
use globe_core::{GeoCoordinate, PointMarker};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointInstance {
    center: [f32; 3],
    radius: f32,
    color: [f32; 4],
}

impl From<&PointMarker> for PointInstance {
    /// Marker sizes are angular radii in degrees; on a unit globe the
    /// world radius is the same angle in radians.
    fn from(p: &PointMarker) -> Self {
        Self {
            center: to_cartesian(GeoCoordinate::new(p.lat, p.lng), POINT_ALTITUDE).to_array(),
            radius: p.size.to_radians(),
            color: p.color.to_array(),
        }
    }
}

/// Billboarded discs for the departure and destination points.
pub(crate) struct PointLayer {
    pipeline: wgpu::RenderPipeline,
    instances: DynamicBuffer,
}

impl PointLayer {
    pub(crate) fn new(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::POINTS_WGSL.into()),
        });
        let buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32, 2 => Float32x4],
        }];
        let pipeline = helpers::make_layer_pipeline(
            device,
            layout,
            color_format,
            &PipelineSpec {
                label: "points_pipeline",
                shader: &shader,
                vs_entry: "vs_point",
                fs_entry: "fs_point",
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth_write: false,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );
        Self {
            pipeline,
            instances: DynamicBuffer::default(),
        }
    }

    pub(crate) fn set_points(&mut self, device: &wgpu::Device, points: &[PointMarker]) {
        let instances: Vec<PointInstance> = points.iter().map(PointInstance::from).collect();
        self.instances.replace(device, "point_instances", &instances);
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if let Some(slice) = self.instances.slice() {
            rpass.set_pipeline(&self.pipeline);
            rpass.set_vertex_buffer(0, slice);
            rpass.draw(0..6, 0..self.instances.count());
        }
    }
}
