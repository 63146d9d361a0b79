//! City labels drawn on a 2D canvas stacked over the WebGPU canvas.

use crate::camera::{angular_size_px, faces_camera, project_to_screen};
use crate::constants::{LABEL_FONT_FAMILY, LABEL_MAX_PX, LABEL_MIN_PX, LABEL_TEXT_GAP_PX};
use glam::{Mat4, Vec3};
use globe_core::cities::CityLabel;
use globe_core::camera::FOVY_RADIANS;
use globe_core::constants::{GLOBE_RADIUS, LABEL_ALTITUDE, LABEL_COLOR};
use globe_core::geo::to_cartesian;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct LabelLayer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    labels: Vec<CityLabel>,
    color: String,
}

impl LabelLayer {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self {
            canvas,
            ctx,
            labels: Vec::new(),
            color: LABEL_COLOR.to_css(),
        })
    }

    pub fn set_labels(&mut self, labels: &[CityLabel]) {
        self.labels = labels.to_vec();
    }

    /// Redraw every label on the near hemisphere. Text height and dot radius
    /// are angular sizes on the globe, projected with the camera's focal length.
    pub fn draw(&self, view_proj: Mat4, eye: Vec3) {
        let (w, h) = (self.canvas.width() as f32, self.canvas.height() as f32);
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        if self.labels.is_empty() {
            return;
        }
        self.ctx.set_fill_style_str(&self.color);
        self.ctx.set_text_baseline("middle");
        for label in &self.labels {
            let world = to_cartesian(label.coordinate(), LABEL_ALTITUDE);
            if !faces_camera(world, eye) {
                continue;
            }
            let Some(at) = project_to_screen(view_proj, world, w, h) else {
                continue;
            };
            let distance = world.distance(eye);
            let to_px = |deg| angular_size_px(deg, GLOBE_RADIUS, distance, h, FOVY_RADIANS);
            let px = to_px(label.size());
            if px < LABEL_MIN_PX {
                continue;
            }
            let px = px.min(LABEL_MAX_PX);
            let dot = to_px(label.dot_radius()).min(LABEL_MAX_PX) as f64;
            self.ctx.begin_path();
            _ = self.ctx.arc(
                at.x as f64,
                at.y as f64,
                dot,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.fill();
            self.ctx
                .set_font(&format!("{}px {}", px.round(), LABEL_FONT_FAMILY));
            _ = self.ctx.fill_text(
                &label.name,
                at.x as f64 + dot + LABEL_TEXT_GAP_PX as f64,
                at.y as f64,
            );
        }
    }
}
