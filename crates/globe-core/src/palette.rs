use rand::prelude::*;

/// 8-bit RGBA colour, the form the scene styling constants are written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `0xRRGGBBAA`
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 24) as u8,
            g: (hex >> 16) as u8,
            b: (hex >> 8) as u8,
            a: hex as u8,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// CSS colour string for the 2D label canvas.
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

/// Convert HSL (hue in degrees, saturation and lightness in 0..=1) to an opaque colour.
pub fn hsl(hue_deg: f32, saturation: f32, lightness: f32) -> Rgba {
    let h = hue_deg.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_u8 = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba::new(to_u8(r1), to_u8(g1), to_u8(b1), 255)
}

/// Vibrant random colours for tinting country outlines.
///
/// Saturation stays in 60..100% and lightness in 35..65% so every entry keeps
/// good contrast against the night texture. The same seed always yields the
/// same palette.
pub fn country_palette(count: usize, seed: u64) -> Vec<Rgba> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let hue = rng.gen_range(0..360) as f32;
            let saturation = rng.gen_range(60..100) as f32 / 100.0;
            let lightness = rng.gen_range(35..65) as f32 / 100.0;
            hsl(hue, saturation, lightness)
        })
        .collect()
}
