use crate::constants::CLEAR_COLOR;
use crate::input::OrbitInput;
use crate::labels::LabelLayer;
use globe_core::camera::PointOfView;
use globe_core::cities::CityLabel;
use globe_core::constants::DEFAULT_POV_ALTITUDE;
use globe_core::controls;
use globe_core::countries::CountryPolygon;
use globe_core::{
    ArcDescriptor, CameraRig, MovingMarker, PointMarker, PolygonStyle, SceneRenderer,
};
use wgpu::util::DeviceExt;
use web_sys as web;

mod globe;
mod helpers;
mod lines;
mod model;
mod points;
mod sky;
mod targets;
use targets::DepthTarget;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CameraUniforms {
    view_proj: [[f32; 4]; 4],
    inv_view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    right: [f32; 4],
    up: [f32; 4],
}

impl CameraUniforms {
    fn new(pov: &PointOfView, aspect: f32) -> Self {
        let view_proj = pov.view_proj(aspect);
        let (right, up) = crate::camera::billboard_axes(pov.view_matrix());
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            inv_view_proj: view_proj.inverse().to_cols_array_2d(),
            eye: pov.eye().extend(1.0).to_array(),
            right: right.extend(0.0).to_array(),
            up: up.extend(0.0).to_array(),
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTarget,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,

    sky: sky::SkyLayer,
    globe: globe::GlobeLayer,
    colors: lines::ColorLayers,
    points: points::PointLayer,
    models: model::ModelLayer,
    labels: Option<LabelLayer>,

    rig: CameraRig,
    width: u32,
    height: u32,
    now_ms: f64,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        labels: Option<LabelLayer>,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

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
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
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
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let rig = CameraRig::new(PointOfView::new(0.0, 0.0, DEFAULT_POV_ALTITUDE));
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera_uniforms"),
            contents: bytemuck::bytes_of(&CameraUniforms::new(&rig.pov(), aspect)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });
        let plain_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("camera_pipeline_layout"),
            bind_group_layouts: &[&camera_bgl],
            push_constant_ranges: &[],
        });

        let sky = sky::SkyLayer::new(&device, &queue, &camera_bgl, format);
        let globe = globe::GlobeLayer::new(&device, &queue, &camera_bgl, format);
        let colors = lines::ColorLayers::new(&device, &plain_layout, format);
        let points = points::PointLayer::new(&device, &plain_layout, format);
        let models = model::ModelLayer::new(&device, &plain_layout, format);
        let depth = DepthTarget::new(&device, width, height);
        log::info!("[gpu] ready: {}x{} format={:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            camera_buffer,
            camera_bind_group,
            sky,
            globe,
            colors,
            points,
            models,
            labels,
            rig,
            width,
            height,
            now_ms: 0.0,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth.recreate(&self.device, width, height);
        }
    }

    /// Clock used for camera transitions started during this frame.
    pub fn begin_frame(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
    }

    /// Apply drag and wheel input gathered since the last frame. Direct
    /// manipulation cancels any running fly-to.
    pub fn apply_orbit(&mut self, input: OrbitInput) {
        if input.is_idle() {
            return;
        }
        let pov = self.rig.advance(self.now_ms);
        let pov = controls::orbit(pov, input.dx, input.dy);
        let pov = controls::zoom(pov, input.zoom);
        self.rig.set_pov(pov);
    }

    pub fn set_globe_texture(&mut self, size: (u32, u32), pixels: &[u8]) {
        self.globe.set_texture(&self.device, &self.queue, size, pixels);
    }

    pub fn set_sky_texture(&mut self, size: (u32, u32), pixels: &[u8]) {
        self.sky.set_texture(&self.device, &self.queue, size, pixels);
    }

    fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let pov = self.rig.advance(self.now_ms);
        let aspect = self.aspect();
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&CameraUniforms::new(&pov, aspect)),
        );

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: CLEAR_COLOR[0],
                            g: CLEAR_COLOR[1],
                            b: CLEAR_COLOR[2],
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.camera_bind_group, &[]);
            self.sky.draw(&mut rpass);
            self.globe.draw(&mut rpass);
            self.models.draw(&mut rpass);
            self.colors.draw(&mut rpass);
            self.points.draw(&mut rpass);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();

        if let Some(labels) = &self.labels {
            labels.draw(pov.view_proj(aspect), pov.eye());
        }
        Ok(())
    }
}

impl SceneRenderer for GpuState<'_> {
    fn set_polygons(&mut self, polygons: Option<&[CountryPolygon]>, style: &PolygonStyle) {
        self.colors.set_polygons(&self.device, polygons, style);
    }

    fn set_points(&mut self, points: &[PointMarker]) {
        self.points.set_points(&self.device, points);
    }

    fn set_arcs(&mut self, arcs: &[ArcDescriptor]) {
        self.colors.set_arcs(&self.device, arcs);
    }

    fn set_labels(&mut self, labels: &[CityLabel]) {
        if let Some(layer) = &mut self.labels {
            layer.set_labels(labels);
        }
    }

    fn set_custom_objects(&mut self, objects: &[MovingMarker]) {
        self.models.set_objects(&self.device, objects);
    }

    fn point_of_view(&mut self, pov: PointOfView, duration_ms: u32) {
        self.rig.animate_to(pov, duration_ms, self.now_ms);
    }

    /// The camera is usable once the canvas has been laid out.
    fn camera_attached(&self) -> bool {
        self.width > 1 && self.height > 1
    }
}
