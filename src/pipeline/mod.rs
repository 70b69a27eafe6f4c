pub(crate) mod dual;
pub(crate) mod kind;
pub(crate) mod propagation;

use crate::foundation::error::TopoResult;
use crate::graph::dot::decode_dot_file;
use crate::graph::frame::TopologyFrame;
use crate::render::canvas::DrawStats;

/// Aggregated counters of one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_written: usize,
    /// Node draws skipped because the node is absent from the reference layout.
    pub nodes_skipped: usize,
    /// Edge draws skipped because an endpoint is absent from the reference layout.
    pub edges_skipped: usize,
}

impl RenderStats {
    pub(crate) fn absorb(&mut self, frame: DrawStats) {
        self.frames_written += 1;
        self.nodes_skipped += frame.nodes_skipped;
        self.edges_skipped += frame.edges_skipped;
    }
}

fn decode(path: &std::path::Path) -> TopoResult<TopologyFrame> {
    let frame = decode_dot_file(path)?;
    tracing::debug!(
        path = %path.display(),
        nodes = frame.node_count(),
        edges = frame.edge_count(),
        "decoded frame"
    );
    Ok(frame)
}
