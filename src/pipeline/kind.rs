use std::path::Path;

use crate::config::settings::RenderSettings;
use crate::foundation::error::TopoResult;
use crate::input::resolve::PlotSelection;
use crate::pipeline::RenderStats;
use crate::pipeline::dual::run_dual;
use crate::pipeline::propagation::run_propagation;
use crate::render::labels::LabelFonts;

/// What a simulation asks to have rendered from a dot directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderKind {
    /// Neighbours in the foreground with connections underneath.
    NetworkGraphFull,
    /// Connections only.
    NetworkGraphOnlyConnections,
    /// Neighbours only.
    NetworkGraphOnlyNeighbours,
    /// Message propagation over hop files.
    Propagation,
}

impl RenderKind {
    /// Dual-mode plot flags, or `None` for [`RenderKind::Propagation`].
    pub fn plot_selection(self) -> Option<PlotSelection> {
        match self {
            Self::NetworkGraphFull => Some(PlotSelection {
                connections: true,
                neighbours: true,
            }),
            Self::NetworkGraphOnlyConnections => Some(PlotSelection {
                connections: true,
                neighbours: false,
            }),
            Self::NetworkGraphOnlyNeighbours => Some(PlotSelection {
                connections: false,
                neighbours: true,
            }),
            Self::Propagation => None,
        }
    }
}

/// Run the pipeline matching `kind` with system fonts.
#[tracing::instrument(skip_all, fields(?kind, dot_dir = %dot_dir.display(), output_dir = %output_dir.display()))]
pub fn render_sequence(
    kind: RenderKind,
    dot_dir: &Path,
    output_dir: &Path,
    settings: &RenderSettings,
) -> TopoResult<RenderStats> {
    let fonts = LabelFonts::system(None)?;
    match kind.plot_selection() {
        Some(selection) => run_dual(dot_dir, output_dir, selection, settings, &fonts),
        None => run_propagation(dot_dir, output_dir, settings, &fonts),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/kind.rs"]
mod tests;
