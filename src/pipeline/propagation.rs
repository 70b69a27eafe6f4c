use std::path::Path;

use crate::config::settings::RenderSettings;
use crate::encode::sink::{FrameSink, PngDirSink};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{TopoError, TopoResult};
use crate::graph::frame::TopologyFrame;
use crate::input::resolve::{PropagationInputs, resolve_propagation};
use crate::layout::spring::spring_layout;
use crate::pipeline::{RenderStats, decode};
use crate::render::canvas::{EdgeStyle, FrameCanvas, NodeFill};
use crate::render::labels::LabelFonts;

/// Render a message propagation: one frame for the starting topology, then one per hop.
///
/// Frame `000` shows the start graph with grey nodes, bold labels and faint directed edges.
/// Hop frame `k` redraws that background, every earlier hop in faint red, and hop `k` in full
/// red. Hop frames are named after their input file stem.
#[tracing::instrument(skip_all, fields(hops = inputs.hops.len()))]
pub fn render_propagation_sequence(
    inputs: &PropagationInputs,
    settings: &RenderSettings,
    fonts: &LabelFonts,
    sink: &mut dyn FrameSink,
) -> TopoResult<RenderStats> {
    settings.validate()?;
    let start = decode(&inputs.start)?;
    let positions = spring_layout(&start, &settings.layout);
    tracing::info!(
        start = %inputs.start.display(),
        nodes = start.node_count(),
        "layout computed"
    );

    let start_edges = EdgeStyle {
        color: Rgba8::BLACK,
        width: settings.edge_width_px,
        opacity: settings.faint_opacity,
        arrows: true,
    };
    let previous_hop = EdgeStyle {
        color: Rgba8::RED,
        width: settings.edge_width_px,
        opacity: settings.faint_opacity,
        arrows: true,
    };
    let current_hop = EdgeStyle {
        opacity: 1.0,
        ..previous_hop
    };

    let mut stats = RenderStats::default();
    sink.begin()?;

    let mut canvas = FrameCanvas::new(settings, &positions, fonts)?;
    draw_start(&mut canvas, &start, start_edges);
    stats.absorb(canvas.stats());
    sink.push_frame("000", &canvas.finish()?)?;

    let mut history: Vec<TopologyFrame> = Vec::with_capacity(inputs.hops.len());
    for path in &inputs.hops {
        let hop = decode(path)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| TopoError::validation(format!("bad hop file name '{}'", path.display())))?;

        let mut canvas = FrameCanvas::new(settings, &positions, fonts)?;
        draw_start(&mut canvas, &start, start_edges);
        for earlier in &history {
            canvas.draw_edges(earlier, previous_hop);
        }
        canvas.draw_edges(&hop, current_hop);
        stats.absorb(canvas.stats());
        sink.push_frame(name, &canvas.finish()?)?;

        history.push(hop);
    }
    sink.end()?;

    Ok(stats)
}

fn draw_start(canvas: &mut FrameCanvas<'_>, start: &TopologyFrame, edges: EdgeStyle) {
    canvas.draw_edges(start, edges);
    canvas.draw_nodes(start, NodeFill::Uniform(Rgba8::GREY), true);
}

/// Resolve `neighbours-000.dot` and the hop files in `dot_dir`, then render them into PNG files
/// in `output_dir`.
pub fn run_propagation(
    dot_dir: &Path,
    output_dir: &Path,
    settings: &RenderSettings,
    fonts: &LabelFonts,
) -> TopoResult<RenderStats> {
    let inputs = resolve_propagation(dot_dir)?;
    let mut sink = PngDirSink::new(output_dir);
    render_propagation_sequence(&inputs, settings, fonts, &mut sink)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/propagation.rs"]
mod tests;
