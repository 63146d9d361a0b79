use glam::Vec2;

// WheelEvent.deltaMode line/page sizes in pixels
const WHEEL_LINE_PX: f64 = 16.0;
const WHEEL_PAGE_PX: f64 = 800.0;

/// Primary-button drag in progress on the canvas.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: Vec2,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, at: Vec2) {
        *self = Self {
            active: true,
            pointer_id,
            last: at,
        };
    }

    /// Movement since the previous event of the same pointer, in CSS pixels.
    pub fn move_to(&mut self, pointer_id: i32, at: Vec2) -> Option<Vec2> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        Some(delta)
    }

    pub fn end(&mut self, pointer_id: i32) {
        if pointer_id == self.pointer_id {
            self.active = false;
        }
    }
}

/// Orbit input accumulated between frames; the frame loop drains it.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct OrbitInput {
    pub dx: f64,
    pub dy: f64,
    pub zoom: f64,
}

impl OrbitInput {
    pub fn add_drag(&mut self, delta: Vec2) {
        self.dx += delta.x as f64;
        self.dy += delta.y as f64;
    }

    pub fn add_zoom(&mut self, pixels: f64) {
        self.zoom += pixels;
    }

    pub fn is_idle(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0 && self.zoom == 0.0
    }

    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

/// Normalize a wheel delta to pixels (`delta_mode`: 0 pixel, 1 line, 2 page).
#[inline]
pub fn wheel_pixels(delta_y: f64, delta_mode: u32) -> f64 {
    match delta_mode {
        1 => delta_y * WHEEL_LINE_PX,
        2 => delta_y * WHEEL_PAGE_PX,
        _ => delta_y,
    }
}

#[inline]
pub fn is_polygon_toggle_key(key: &str) -> bool {
    key.eq_ignore_ascii_case("g")
}
