//! Compositing: a CPU canvas and the staged pipeline drawing onto it.

/// Drawing surface backed by `vello_cpu`.
pub mod canvas;
/// Stage-by-stage card renderer.
pub mod pipeline;
