use crate::foundation::error::{TopoError, TopoResult};

/// A rendered frame as premultiplied RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Frame filled with one premultiplied colour.
    pub fn solid(width: u32, height: u32, premul: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for _ in 0..(width as usize) * (height as usize) {
            data.extend_from_slice(&premul);
        }
        Self {
            width,
            height,
            data,
        }
    }

    fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        &self.data[i..i + 4]
    }

    /// Bounding box `(x0, y0, x1, y1)` (exclusive max) of pixels that differ from `background`.
    pub fn content_bounds(&self, background: [u8; 4]) -> Option<(u32, u32, u32, u32)> {
        let mut x0 = u32::MAX;
        let mut y0 = u32::MAX;
        let mut x1 = 0u32;
        let mut y1 = 0u32;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.pixel(x, y) != &background[..] {
                    x0 = x0.min(x);
                    y0 = y0.min(y);
                    x1 = x1.max(x + 1);
                    y1 = y1.max(y + 1);
                }
            }
        }
        (x0 != u32::MAX).then_some((x0, y0, x1, y1))
    }

    /// Crop to the content box plus `padding` pixels on each side, clamped to the frame.
    ///
    /// A frame with no content is returned unchanged.
    pub fn crop_to_content(self, background: [u8; 4], padding: u32) -> Self {
        let Some((x0, y0, x1, y1)) = self.content_bounds(background) else {
            return self;
        };
        let x0 = x0.saturating_sub(padding);
        let y0 = y0.saturating_sub(padding);
        let x1 = x1.saturating_add(padding).min(self.width);
        let y1 = y1.saturating_add(padding).min(self.height);
        if (x0, y0, x1, y1) == (0, 0, self.width, self.height) {
            return self;
        }

        let width = x1 - x0;
        let height = y1 - y0;
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for y in y0..y1 {
            let row = ((y as usize) * (self.width as usize) + (x0 as usize)) * 4;
            data.extend_from_slice(&self.data[row..row + (width as usize) * 4]);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Convert to a straight-alpha image for encoding.
    pub fn to_rgba_image(&self) -> TopoResult<image::RgbaImage> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| TopoError::render("frame byte length does not match its dimensions"))
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = (((*c as u16) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
