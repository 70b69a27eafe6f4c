/// Dot-language decoder.
pub mod dot;
pub(crate) mod frame;
