use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{TopoError, TopoResult};

/// Font database shared by every frame of a run.
#[derive(Clone)]
pub struct LabelFonts {
    db: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for LabelFonts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFonts")
            .field("faces", &self.db.faces().count())
            .finish()
    }
}

impl LabelFonts {
    /// System fonts, plus any `.ttf`/`.otf`/`.ttc` files in `extra_dir`.
    ///
    /// An `extra_dir` that cannot be listed is an error.
    pub fn system(extra_dir: Option<&Path>) -> TopoResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = extra_dir {
            load_fonts_from_dir(&mut db, dir)?;
        }
        tracing::debug!(faces = db.faces().count(), "label fonts loaded");
        Ok(Self { db: Arc::new(db) })
    }

    /// A database with no faces; labels are laid out but draw nothing.
    pub fn empty() -> Self {
        Self {
            db: Arc::new(usvg::fontdb::Database::new()),
        }
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) -> TopoResult<()> {
    let rd = std::fs::read_dir(dir)
        .with_context(|| format!("read font dir '{}'", dir.display()))?;

    let mut loaded = 0usize;
    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        match db.load_font_file(&path) {
            Ok(()) => loaded += 1,
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "font file not loaded"),
        }
    }
    if loaded == 0 {
        tracing::warn!(dir = %dir.display(), "no font files found in font dir");
    }
    Ok(())
}

#[derive(Clone, Debug)]
struct Label {
    at: Point,
    text: String,
    bold: bool,
    color: Rgba8,
}

/// Text drawn above all geometry of a frame.
///
/// Labels are collected while the frame is drawn, then emitted as one SVG document and
/// rasterized through `resvg`.
#[derive(Clone, Debug, Default)]
pub(crate) struct LabelLayer {
    labels: Vec<Label>,
}

impl LabelLayer {
    pub(crate) fn push(&mut self, at: Point, text: &str, bold: bool, color: Rgba8) {
        self.labels.push(Label {
            at,
            text: text.to_owned(),
            bold,
            color,
        });
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub(crate) fn to_svg(&self, canvas: Canvas, font_family: &str, font_size: f64) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = canvas.width,
            h = canvas.height
        );
        // Baseline shifted so glyphs sit vertically centred on the anchor.
        let baseline_shift = font_size * 0.35;
        for label in &self.labels {
            svg.push_str(&format!(
                r#"<text x="{x:.2}" y="{y:.2}" font-family="{family}" font-size="{size}" font-weight="{weight}" fill="{fill}" text-anchor="middle">{text}</text>"#,
                x = label.at.x,
                y = label.at.y + baseline_shift,
                family = escape_xml(font_family),
                size = font_size,
                weight = if label.bold { "bold" } else { "normal" },
                fill = label.color.to_css_rgb(),
                text = escape_xml(&label.text),
            ));
        }
        svg.push_str("</svg>");
        svg
    }

    /// Rasterize to premultiplied RGBA8 covering the whole canvas.
    pub(crate) fn rasterize(
        &self,
        canvas: Canvas,
        fonts: &LabelFonts,
        font_family: &str,
        font_size: f64,
    ) -> TopoResult<Vec<u8>> {
        let svg = self.to_svg(canvas, font_family, font_size);
        let opts = usvg::Options {
            fontdb: fonts.db.clone(),
            font_family: font_family.to_owned(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse label svg")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| TopoError::render("failed to allocate label pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::default(),
            &mut pixmap.as_mut(),
        );
        Ok(pixmap.data().to_vec())
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/labels.rs"]
mod tests;
