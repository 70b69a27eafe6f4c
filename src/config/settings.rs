use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{TopoError, TopoResult};

/// How node colours are chosen from the palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Key by the node's index in the frame currently being drawn.
    #[default]
    Positional,
    /// Key by the node's index in the reference frame, stable across frames.
    Identity,
}

/// Parameters of the force-directed layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Number of cooling iterations.
    pub iterations: u32,
    /// Seed for the initial random placement.
    pub seed: u64,
    /// Optimal pair distance; `None` uses `1 / sqrt(n)`.
    pub k: Option<f64>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            iterations: 50,
            seed: 42,
            k: None,
        }
    }
}

/// Visual and layout parameters shared by both pipelines.
///
/// Every field has a default, so a settings file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Figure width in inches.
    pub figure_width_in: f64,
    /// Figure height in inches.
    pub figure_height_in: f64,
    /// Pixels per inch.
    pub dpi: u32,
    /// Background colour, also used to detect the content box when cropping.
    pub background: Rgba8,
    /// Node disc radius in pixels.
    pub node_radius_px: f64,
    /// Label font size in pixels.
    pub font_size_px: f64,
    /// Label font family (falls back to any sans-serif face).
    pub font_family: String,
    /// Stroke width for foreground edges.
    pub edge_width_px: f64,
    /// Stroke width for background connection edges.
    pub background_edge_width_px: f64,
    /// Arrowhead length in pixels.
    pub arrow_size_px: f64,
    /// Opacity of de-emphasized layers (background connections, starting graph, past hops).
    pub faint_opacity: f32,
    /// Padding kept around the content box when cropping.
    pub crop_padding_px: u32,
    /// Margin between the layout's unit box and the canvas edge before cropping.
    pub margin_px: f64,
    /// Palette keying strategy.
    pub color_mode: ColorMode,
    /// Force-directed layout parameters.
    pub layout: LayoutSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            figure_width_in: 8.0,
            figure_height_in: 8.0,
            dpi: 100,
            background: Rgba8::WHITE,
            node_radius_px: 12.0,
            font_size_px: 12.0,
            font_family: "sans-serif".to_string(),
            edge_width_px: 1.0,
            background_edge_width_px: 4.0,
            arrow_size_px: 10.0,
            faint_opacity: 0.2,
            crop_padding_px: 10,
            margin_px: 40.0,
            color_mode: ColorMode::Positional,
            layout: LayoutSettings::default(),
        }
    }
}

impl RenderSettings {
    /// Load settings from a JSON file; missing keys keep their defaults.
    pub fn load_json(path: &Path) -> TopoResult<Self> {
        let f = File::open(path).with_context(|| format!("open settings '{}'", path.display()))?;
        let settings: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse settings JSON '{}'", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check ranges that would otherwise surface as rendering failures mid-sequence.
    pub fn validate(&self) -> TopoResult<()> {
        fn positive(name: &str, v: f64) -> TopoResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(TopoError::validation(format!("{name} must be > 0")));
            }
            Ok(())
        }

        positive("figure_width_in", self.figure_width_in)?;
        positive("figure_height_in", self.figure_height_in)?;
        positive("node_radius_px", self.node_radius_px)?;
        positive("font_size_px", self.font_size_px)?;
        positive("edge_width_px", self.edge_width_px)?;
        positive("background_edge_width_px", self.background_edge_width_px)?;
        if !self.arrow_size_px.is_finite() || self.arrow_size_px < 0.0 {
            return Err(TopoError::validation("arrow_size_px must be >= 0"));
        }
        if !self.margin_px.is_finite() || self.margin_px < 0.0 {
            return Err(TopoError::validation("margin_px must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.faint_opacity) {
            return Err(TopoError::validation("faint_opacity must be in [0, 1]"));
        }
        if self.dpi == 0 {
            return Err(TopoError::validation("dpi must be > 0"));
        }
        if self.layout.iterations == 0 {
            return Err(TopoError::validation("layout.iterations must be > 0"));
        }
        if let Some(k) = self.layout.k {
            positive("layout.k", k)?;
        }
        let canvas = self.canvas()?;
        if f64::from(canvas.width.min(canvas.height)) <= 2.0 * self.margin_px {
            return Err(TopoError::validation(
                "margin_px leaves no drawable area on the canvas",
            ));
        }
        Ok(())
    }

    /// Pixel canvas implied by figure size and DPI.
    pub fn canvas(&self) -> TopoResult<Canvas> {
        let to_px = |inches: f64| (inches * f64::from(self.dpi)).round();
        let w = to_px(self.figure_width_in);
        let h = to_px(self.figure_height_in);
        if !(w.is_finite() && h.is_finite()) || w > f64::from(Canvas::MAX_DIM) || h > f64::from(Canvas::MAX_DIM) {
            return Err(TopoError::validation(format!(
                "figure {}x{} in at {} dpi exceeds the maximum canvas size",
                self.figure_width_in, self.figure_height_in, self.dpi
            )));
        }
        Canvas::new(w as u32, h as u32)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
