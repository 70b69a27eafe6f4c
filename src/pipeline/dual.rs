use std::path::Path;

use crate::config::settings::RenderSettings;
use crate::encode::sink::{FrameSink, PngDirSink};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{TopoError, TopoResult};
use crate::input::resolve::{DualInputs, PlotSelection, resolve_dual};
use crate::layout::spring::spring_layout;
use crate::pipeline::{RenderStats, decode};
use crate::render::canvas::{EdgeStyle, FrameCanvas, NodeFill};
use crate::render::labels::LabelFonts;
use crate::style::palette::ColorAssignment;

/// Render neighbours and/or connections snapshots, one frame per timestep, named `000`, `001`, ...
///
/// With both families present, timestep `i` draws `connections[i]` as faint thick background
/// edges first and `neighbours[i]` (edges, nodes, labels) on top. With one family present it is
/// drawn in full. Positions and the palette come from [`DualInputs::reference`].
#[tracing::instrument(skip_all, fields(frames = inputs.len()))]
pub fn render_dual_sequence(
    inputs: &DualInputs,
    settings: &RenderSettings,
    fonts: &LabelFonts,
    sink: &mut dyn FrameSink,
) -> TopoResult<RenderStats> {
    settings.validate()?;
    let both = !inputs.neighbours.is_empty() && !inputs.connections.is_empty();
    if both && inputs.neighbours.len() != inputs.connections.len() {
        return Err(TopoError::CountMismatch {
            neighbours: inputs.neighbours.len(),
            connections: inputs.connections.len(),
        });
    }
    let reference_path = inputs.reference().ok_or(TopoError::NoGraphTypeSelected)?;

    let reference = decode(reference_path)?;
    let positions = spring_layout(&reference, &settings.layout);
    let colors = ColorAssignment::for_reference(&reference, settings.color_mode);
    tracing::info!(
        reference = %reference_path.display(),
        nodes = reference.node_count(),
        "layout computed"
    );

    let foreground = EdgeStyle {
        color: Rgba8::BLACK,
        width: settings.edge_width_px,
        opacity: 1.0,
        arrows: true,
    };
    let background = EdgeStyle {
        color: Rgba8::GREY,
        width: settings.background_edge_width_px,
        opacity: settings.faint_opacity,
        arrows: false,
    };

    let mut stats = RenderStats::default();
    sink.begin()?;
    for i in 0..inputs.len() {
        let mut canvas = FrameCanvas::new(settings, &positions, fonts)?;

        if let Some(path) = inputs.connections.get(i) {
            let connections = decode(path)?;
            if inputs.neighbours.is_empty() {
                canvas.draw_edges(&connections, foreground);
                canvas.draw_nodes(&connections, NodeFill::Palette(&colors), false);
            } else {
                canvas.draw_edges(&connections, background);
            }
        }

        if let Some(path) = inputs.neighbours.get(i) {
            let neighbours = decode(path)?;
            canvas.draw_edges(&neighbours, foreground);
            canvas.draw_nodes(&neighbours, NodeFill::Palette(&colors), false);
        }

        stats.absorb(canvas.stats());
        let frame = canvas.finish()?;
        sink.push_frame(&format!("{i:03}"), &frame)?;
    }
    sink.end()?;

    Ok(stats)
}

/// Resolve inputs in `dot_dir`, then render them into PNG files in `output_dir`.
///
/// Input validation happens before the output directory is cleared.
pub fn run_dual(
    dot_dir: &Path,
    output_dir: &Path,
    selection: PlotSelection,
    settings: &RenderSettings,
    fonts: &LabelFonts,
) -> TopoResult<RenderStats> {
    let inputs = resolve_dual(dot_dir, selection)?;
    let mut sink = PngDirSink::new(output_dir);
    render_dual_sequence(&inputs, settings, fonts, &mut sink)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/dual.rs"]
mod tests;
