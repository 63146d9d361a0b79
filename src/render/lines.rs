use super::helpers::{self, DynamicBuffer, PipelineSpec};
use glam::Vec3;
use globe_core::constants::{ARC_ALTITUDE, ARC_SEGMENTS, ARC_STROKE, POLYGON_ALTITUDE};
use globe_core::countries::CountryPolygon;
use globe_core::geometry::{arc_points, ribbon, ring_outlines, ring_walls, stroke_width};
use globe_core::palette::Rgba;
use globe_core::{ArcDescriptor, PolygonStyle};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ColorVertex {
    position: [f32; 3],
    color: [f32; 4],
}

impl ColorVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

fn lerp_color(a: Rgba, b: Rgba, t: f32) -> [f32; 4] {
    let (a, b) = (a.to_array(), b.to_array());
    std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
}

/// Ribbon triangles for every arc, coloured from start to end.
pub(crate) fn arc_vertices(arcs: &[ArcDescriptor]) -> Vec<ColorVertex> {
    let width = stroke_width(ARC_STROKE);
    let mut out = Vec::with_capacity(arcs.len() * ARC_SEGMENTS * 6);
    for arc in arcs {
        let points = arc_points(arc.start, arc.end, ARC_ALTITUDE, ARC_SEGMENTS);
        let tris = ribbon(&points, width);
        let segments = points.len().saturating_sub(1).max(1) as f32;
        // ribbon() emits [l0, r0, l1, l1, r0, r1] per segment.
        const ENDS: [usize; 6] = [0, 0, 1, 1, 0, 1];
        for (i, quad) in tris.chunks_exact(6).enumerate() {
            for (v, end) in quad.iter().zip(ENDS) {
                let t = (i + end) as f32 / segments;
                out.push(ColorVertex::new(*v, lerp_color(arc.color[0], arc.color[1], t)));
            }
        }
    }
    out
}

/// Outline line list and wall triangles for the country overlay.
pub(crate) fn polygon_vertices(
    polygons: &[CountryPolygon],
    style: &PolygonStyle,
) -> (Vec<ColorVertex>, Vec<ColorVertex>) {
    let mut lines = Vec::new();
    let mut walls = Vec::new();
    let side = style.side.to_array();
    for (i, country) in polygons.iter().enumerate() {
        let stroke = style.stroke_for(i).to_array();
        lines.extend(
            ring_outlines(&country.rings, POLYGON_ALTITUDE)
                .into_iter()
                .map(|p| ColorVertex::new(p, stroke)),
        );
        walls.extend(
            ring_walls(&country.rings, POLYGON_ALTITUDE)
                .into_iter()
                .map(|p| ColorVertex::new(p, side)),
        );
    }
    (lines, walls)
}

pub(crate) struct ColorLayers {
    line_pipeline: wgpu::RenderPipeline,
    triangle_pipeline: wgpu::RenderPipeline,
    polygon_lines: DynamicBuffer,
    polygon_walls: DynamicBuffer,
    arcs: DynamicBuffer,
}

impl ColorLayers {
    pub(crate) fn new(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("color_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::COLOR_WGSL.into()),
        });
        let buffers = [ColorVertex::layout()];
        let spec = |label, topology| PipelineSpec {
            label,
            shader: &shader,
            vs_entry: "vs_color",
            fs_entry: "fs_color",
            buffers: &buffers,
            topology,
            cull_mode: None,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            depth_write: false,
            depth_compare: wgpu::CompareFunction::Less,
        };
        Self {
            line_pipeline: helpers::make_layer_pipeline(
                device,
                layout,
                color_format,
                &spec("polygon_line_pipeline", wgpu::PrimitiveTopology::LineList),
            ),
            triangle_pipeline: helpers::make_layer_pipeline(
                device,
                layout,
                color_format,
                &spec("color_triangle_pipeline", wgpu::PrimitiveTopology::TriangleList),
            ),
            polygon_lines: DynamicBuffer::default(),
            polygon_walls: DynamicBuffer::default(),
            arcs: DynamicBuffer::default(),
        }
    }

    pub(crate) fn set_polygons(
        &mut self,
        device: &wgpu::Device,
        polygons: Option<&[CountryPolygon]>,
        style: &PolygonStyle,
    ) {
        let (lines, walls) = polygons
            .map(|p| polygon_vertices(p, style))
            .unwrap_or_default();
        self.polygon_lines.replace(device, "polygon_lines", &lines);
        self.polygon_walls.replace(device, "polygon_walls", &walls);
    }

    pub(crate) fn set_arcs(&mut self, device: &wgpu::Device, arcs: &[ArcDescriptor]) {
        self.arcs.replace(device, "arcs", &arc_vertices(arcs));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.triangle_pipeline);
        for layer in [&self.polygon_walls, &self.arcs] {
            if let Some(slice) = layer.slice() {
                rpass.set_vertex_buffer(0, slice);
                rpass.draw(0..layer.count(), 0..1);
            }
        }
        if let Some(slice) = self.polygon_lines.slice() {
            rpass.set_pipeline(&self.line_pipeline);
            rpass.set_vertex_buffer(0, slice);
            rpass.draw(0..self.polygon_lines.count(), 0..1);
        }
    }
}
