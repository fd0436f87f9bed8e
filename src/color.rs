//! Color value type and conversions shared by the pickers, fields and palette.
//!
//! Channels are straight (non-premultiplied) floats in `0.0..=1.0`, stored
//! exactly as they are written to the swap chain.

use egui::Color32;

/// A 4-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const GREY: Rgba = Rgba::new(0.5, 0.5, 0.5, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_array(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn rgb(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Replace the color channels, keeping alpha.
    pub fn with_rgb(self, rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], self.a)
    }

    pub fn from_hsv(h: f32, s: f32, v: f32, a: f32) -> Self {
        let (r, g, b) = hsv_to_rgb(h, s, v);
        Self::new(r, g, b, a)
    }

    /// Hue, saturation and value, each in `0.0..=1.0`.
    pub fn to_hsv(self) -> [f32; 3] {
        let (h, s, v) = rgb_to_hsv(self.r, self.g, self.b);
        [h, s, v]
    }

    /// `#RRGGBBAA`
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_array().map(channel_to_u8);
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }

    /// Parse `RRGGBB` or `RRGGBBAA`, with or without a leading `#`.
    /// A six-digit value is opaque.
    pub fn from_hex(text: &str) -> Option<Self> {
        let text = text.trim();
        let digits = text.strip_prefix('#').unwrap_or(text);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        let [r, g, b, a] = match digits.len() {
            6 => {
                let [_, r, g, b] = value.to_be_bytes();
                [r, g, b, 255]
            }
            8 => value.to_be_bytes(),
            _ => return None,
        };
        Some(Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        ))
    }

    pub fn to_color32(self) -> Color32 {
        let [r, g, b, a] = self.to_array().map(channel_to_u8);
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

fn channel_to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert HSV to RGB.
///
/// Hue is normalized (`0.0..=1.0`, wrapping), so `1.0` is red again.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    if s <= 0.0 {
        return (v, v, v);
    }

    let h = h.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as i32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Convert RGB to normalized HSV.
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;

    let h = if d <= f32::EPSILON {
        0.0
    } else if max == r {
        ((g - b) / d).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / d + 2.0) / 6.0
    } else {
        ((r - g) / d + 4.0) / 6.0
    };
    let s = if max <= 0.0 { 0.0 } else { d / max };
    (h, s, max)
}

/// Lowest temperature on the temperature bar.
pub const KELVIN_MIN: f32 = 1000.0;
/// Highest temperature on the temperature bar.
pub const KELVIN_MAX: f32 = 40000.0;

/// Approximate blackbody color for a temperature in Kelvin.
///
/// Curve fit by Tanner Helland; accurate to a few percent over 1000-40000 K.
pub fn kelvin_to_rgb(kelvin: f32) -> (f32, f32, f32) {
    let t = kelvin.clamp(KELVIN_MIN, KELVIN_MAX) / 100.0;

    let r = if t <= 66.0 {
        255.0
    } else {
        329.698_73 * (t - 60.0).powf(-0.133_204_76)
    };

    let g = if t <= 66.0 {
        99.470_8 * t.ln() - 161.119_57
    } else {
        288.122_17 * (t - 60.0).powf(-0.075_514_85)
    };

    let b = if t >= 66.0 {
        255.0
    } else if t <= 19.0 {
        0.0
    } else {
        138.517_73 * (t - 10.0).ln() - 305.044_8
    };

    (
        (r / 255.0).clamp(0.0, 1.0),
        (g / 255.0).clamp(0.0, 1.0),
        (b / 255.0).clamp(0.0, 1.0),
    )
}
