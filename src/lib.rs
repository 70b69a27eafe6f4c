//! Topoframes turns sequences of DHT topology snapshots into PNG frames.
//!
//! Snapshots are Graphviz dot files written by a network simulation. Two sequences are
//! supported:
//!
//! - dual: `neighbours-NNN.dot` and/or `connections-NNN.dot`, one frame per timestep
//! - propagation: `hop-NNN.dot` drawn over the step-0 neighbours graph, one frame per hop
//!
//! Every frame of a run shares one spring layout computed from a reference snapshot, so
//! nodes keep their place across frames.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Command-line argument definitions shared by the binaries.
pub mod cli;
pub(crate) mod config;
/// Frame sinks.
pub mod encode;
pub(crate) mod graph;
pub(crate) mod input;
pub(crate) mod layout;
/// Tracing subscriber setup.
pub mod logging;
pub(crate) mod pipeline;
/// Per-frame drawing surface and frame buffers.
pub mod render;
pub(crate) mod style;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{TopoError, TopoResult};

pub use crate::config::settings::{ColorMode, LayoutSettings, RenderSettings};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngDirSink, prepare_output_dir};
pub use crate::graph::dot::{decode_dot_file, decode_dot_str};
pub use crate::graph::frame::{PeerNode, TopologyFrame};
pub use crate::input::resolve::{
    CONNECTIONS_PATTERN, DualInputs, HOP_PATTERN, NEIGHBOURS_PATTERN, PROPAGATION_REFERENCE,
    PlotSelection, PropagationInputs, connections_file_name, hop_file_name, list_matching,
    neighbours_file_name, resolve_dual, resolve_propagation,
};
pub use crate::layout::spring::{LayoutPositions, spring_layout};
pub use crate::pipeline::RenderStats;
pub use crate::pipeline::dual::{render_dual_sequence, run_dual};
pub use crate::pipeline::kind::{RenderKind, render_sequence};
pub use crate::pipeline::propagation::{render_propagation_sequence, run_propagation};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::labels::LabelFonts;
pub use crate::style::palette::{ColorAssignment, hue_spaced};
