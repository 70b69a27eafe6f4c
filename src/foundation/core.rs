use crate::foundation::error::{TopoError, TopoResult};

pub use kurbo::{Point, Rect, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Largest supported side length in pixels.
    pub const MAX_DIM: u32 = 16_384;

    /// Create a validated canvas.
    pub fn new(width: u32, height: u32) -> TopoResult<Self> {
        if width == 0 || height == 0 {
            return Err(TopoError::validation("canvas width/height must be > 0"));
        }
        if width > Self::MAX_DIM || height > Self::MAX_DIM {
            return Err(TopoError::validation(format!(
                "canvas too large: {width}x{height} (max {0}x{0})",
                Self::MAX_DIM
            )));
        }
        Ok(Self { width, height })
    }
}

/// Straight-alpha RGBA8 colour, as written in settings files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Mid grey used for de-emphasized context.
    pub const GREY: Self = Self::rgb(128, 128, 128);
    /// Pure red used for propagation hops.
    pub const RED: Self = Self::rgb(255, 0, 0);

    /// Convert to premultiplied bytes.
    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }

    /// CSS `rgb(..)` notation, used when building SVG overlays.
    pub fn to_css_rgb(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Build an opaque colour from HSV components (`h` in turns, `s` and `v` in `[0, 1]`).
pub fn hsv_to_rgba8(h: f64, s: f64, v: f64) -> Rgba8 {
    let h = h.rem_euclid(1.0) * 6.0;
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    let to_u8 = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba8::rgb(to_u8(r), to_u8(g), to_u8(b))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
