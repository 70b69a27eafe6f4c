//! Explicit per-frame drawing surface.
//!
//! A [`FrameCanvas`] is created for one frame, drawn into, and consumed by
//! [`FrameCanvas::finish`]; nothing carries over to the next frame.

use std::sync::Arc;

use crate::config::settings::RenderSettings;
use crate::foundation::core::{Canvas, Point, Rgba8, Vec2};
use crate::foundation::error::{TopoError, TopoResult};
use crate::graph::frame::TopologyFrame;
use crate::layout::spring::LayoutPositions;
use crate::render::frame::FrameRGBA;
use crate::render::labels::{LabelFonts, LabelLayer};
use crate::style::palette::ColorAssignment;

/// How a set of edges is stroked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
    /// Stroke colour.
    pub color: Rgba8,
    /// Stroke width in pixels.
    pub width: f64,
    /// Opacity multiplied into the colour's alpha, in `[0, 1]`.
    pub opacity: f32,
    /// Draw an arrowhead at the target end (ignored for undirected frames).
    pub arrows: bool,
}

/// How node discs are filled.
#[derive(Clone, Copy, Debug)]
pub enum NodeFill<'a> {
    /// Palette colour per node.
    Palette(&'a ColorAssignment),
    /// One colour for every node.
    Uniform(Rgba8),
}

/// Counters for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Nodes not drawn because the reference layout has no position for them.
    pub nodes_skipped: usize,
    /// Edges not drawn because an endpoint has no position.
    pub edges_skipped: usize,
}

/// Drawing surface for exactly one output frame.
pub struct FrameCanvas<'a> {
    settings: &'a RenderSettings,
    positions: &'a LayoutPositions,
    fonts: &'a LabelFonts,
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    labels: LabelLayer,
    stats: DrawStats,
}

impl<'a> FrameCanvas<'a> {
    /// Fresh canvas cleared to the background colour.
    pub fn new(
        settings: &'a RenderSettings,
        positions: &'a LayoutPositions,
        fonts: &'a LabelFonts,
    ) -> TopoResult<Self> {
        let canvas = settings.canvas()?;
        let (w, h) = canvas_u16(canvas)?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);

        let bg = settings.background;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(canvas.width),
            f64::from(canvas.height),
        ));

        Ok(Self {
            settings,
            positions,
            fonts,
            canvas,
            ctx,
            labels: LabelLayer::default(),
            stats: DrawStats::default(),
        })
    }

    /// Map a layout coordinate in `[-1, 1]²` into pixel space (y axis pointing up).
    pub fn to_pixels(&self, p: Point) -> Point {
        let m = self.settings.margin_px;
        let w = f64::from(self.canvas.width) - 2.0 * m;
        let h = f64::from(self.canvas.height) - 2.0 * m;
        Point::new(m + (p.x + 1.0) * 0.5 * w, m + (1.0 - (p.y + 1.0) * 0.5) * h)
    }

    fn pixel_of(&self, id: &str) -> Option<Point> {
        self.positions.get(id).map(|p| self.to_pixels(p))
    }

    /// Stroke every edge of `frame`. Self loops are not drawn.
    pub fn draw_edges(&mut self, frame: &TopologyFrame, style: EdgeStyle) {
        let alpha = (f32::from(style.color.a) * style.opacity.clamp(0.0, 1.0)).round() as u8;
        let color =
            vello_cpu::peniko::Color::from_rgba8(style.color.r, style.color.g, style.color.b, alpha);
        let arrows = style.arrows && frame.is_directed();
        let radius = self.settings.node_radius_px;
        let arrow = self.settings.arrow_size_px;

        self.ctx.set_paint(color);
        self.ctx
            .set_stroke(vello_cpu::kurbo::Stroke::new(style.width));

        let mut skipped = 0usize;
        for (from, to) in frame.edges() {
            let (Some(a), Some(b)) = (self.pixel_of(from), self.pixel_of(to)) else {
                skipped += 1;
                continue;
            };
            let along = b - a;
            let length = along.hypot();
            if from == to || length <= f64::EPSILON {
                continue;
            }
            let dir = along / length;

            // Arrow tips touch the target disc instead of its centre.
            let tip = if arrows && length > radius {
                b - dir * radius
            } else {
                b
            };
            let shaft_end = if arrows && (tip - a).hypot() > arrow {
                tip - dir * arrow
            } else {
                tip
            };

            let mut line = vello_cpu::kurbo::BezPath::new();
            line.move_to(to_cpu(a));
            line.line_to(to_cpu(shaft_end));
            self.ctx.stroke_path(&line);

            if arrows && arrow > 0.0 {
                self.ctx.fill_path(&arrowhead(tip, dir, arrow));
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, "edges with an endpoint outside the reference layout not drawn");
        }
        self.stats.edges_skipped += skipped;
    }

    /// Fill a disc for every node of `frame` and queue its label.
    pub fn draw_nodes(&mut self, frame: &TopologyFrame, fill: NodeFill<'_>, bold_labels: bool) {
        let radius = self.settings.node_radius_px;
        for (position, node) in frame.nodes().enumerate() {
            let Some(center) = self.pixel_of(&node.id) else {
                tracing::warn!(node = %node.id, "node outside the reference layout not drawn");
                self.stats.nodes_skipped += 1;
                continue;
            };
            let color = match fill {
                NodeFill::Palette(colors) => colors
                    .color_for_node(frame, position, &node.id)
                    .unwrap_or(Rgba8::GREY),
                NodeFill::Uniform(c) => c,
            };

            self.ctx
                .set_paint(vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a));
            self.ctx.fill_path(&circle(center, radius));
            self.labels.push(center, node.display_text(), bold_labels, Rgba8::BLACK);
        }
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> DrawStats {
        self.stats
    }

    /// Rasterize geometry and labels, then crop to content.
    pub fn finish(mut self) -> TopoResult<FrameRGBA> {
        let (w, h) = canvas_u16(self.canvas)?;

        if !self.labels.is_empty() {
            let bytes = self.labels.rasterize(
                self.canvas,
                self.fonts,
                &self.settings.font_family,
                self.settings.font_size_px,
            )?;
            let pixmap = pixmap_from_premul_bytes(&bytes, w, h)?;
            self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.ctx
                .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.ctx.set_paint(vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            });
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.canvas.width),
                f64::from(self.canvas.height),
            ));
        }

        self.ctx.flush();
        let mut target = vello_cpu::Pixmap::new(w, h);
        self.ctx.render_to_pixmap(&mut target);

        let frame = FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: target.data_as_u8_slice().to_vec(),
        };
        Ok(frame.crop_to_content(
            self.settings.background.to_premul(),
            self.settings.crop_padding_px,
        ))
    }
}

fn canvas_u16(canvas: Canvas) -> TopoResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| TopoError::render("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| TopoError::render("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn circle(center: Point, radius: f64) -> vello_cpu::kurbo::BezPath {
    use vello_cpu::kurbo::Shape as _;
    vello_cpu::kurbo::Circle::new(to_cpu(center), radius).to_path(0.1)
}

/// Filled triangle with its tip at `tip`, pointing along `dir` (unit length).
fn arrowhead(tip: Point, dir: Vec2, size: f64) -> vello_cpu::kurbo::BezPath {
    let base = tip - dir * size;
    let normal = Vec2::new(-dir.y, dir.x) * (size * 0.4);
    let mut p = vello_cpu::kurbo::BezPath::new();
    p.move_to(to_cpu(tip));
    p.line_to(to_cpu(base + normal));
    p.line_to(to_cpu(base - normal));
    p.close_path();
    p
}

fn pixmap_from_premul_bytes(bytes: &[u8], w: u16, h: u16) -> TopoResult<vello_cpu::Pixmap> {
    if bytes.len() != (w as usize) * (h as usize) * 4 {
        return Err(TopoError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
