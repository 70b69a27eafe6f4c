/// Per-frame drawing surface.
pub mod canvas;
pub(crate) mod frame;
pub(crate) mod labels;
