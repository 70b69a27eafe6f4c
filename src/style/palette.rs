use crate::config::settings::ColorMode;
use crate::foundation::core::{Rgba8, hsv_to_rgba8};
use crate::graph::frame::TopologyFrame;

/// Hue-spaced node palette built once per run from the reference frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorAssignment {
    colors: Vec<Rgba8>,
    mode: ColorMode,
    reference_ids: Vec<String>,
}

impl ColorAssignment {
    /// Palette of `reference.node_count()` evenly spaced hues.
    pub fn for_reference(reference: &TopologyFrame, mode: ColorMode) -> Self {
        Self {
            colors: hue_spaced(reference.node_count()),
            mode,
            reference_ids: reference.nodes().map(|n| n.id.clone()).collect(),
        }
    }

    /// Number of distinct palette entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette is empty (empty reference frame).
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colour for palette slot `index`, wrapping when a frame has more nodes than the palette.
    pub fn color_for_index(&self, index: usize) -> Rgba8 {
        if self.colors.is_empty() {
            return Rgba8::GREY;
        }
        self.colors[index % self.colors.len()]
    }

    /// Colour for the node at `position` in `frame`'s own enumeration.
    ///
    /// In [`ColorMode::Positional`] this is the palette slot `position`, so the same peer can change
    /// colour between frames whose node order differs. [`ColorMode::Identity`] keys by the peer's
    /// slot in the reference frame instead and returns `None` for peers the reference lacks.
    pub fn color_for_node(&self, frame: &TopologyFrame, position: usize, id: &str) -> Option<Rgba8> {
        match self.mode {
            ColorMode::Positional => {
                debug_assert!(position < frame.node_count());
                Some(self.color_for_index(position))
            }
            ColorMode::Identity => self
                .reference_ids
                .iter()
                .position(|r| r == id)
                .map(|slot| self.color_for_index(slot)),
        }
    }
}

/// `n` fully saturated colours with hues spaced `1/n` turns apart.
pub fn hue_spaced(n: usize) -> Vec<Rgba8> {
    (0..n)
        .map(|i| hsv_to_rgba8(i as f64 / n as f64, 1.0, 1.0))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/style/palette.rs"]
mod tests;
