//! Pure bitmap transforms applied before compositing.

pub(crate) mod attention;
/// Circular alpha mask.
pub mod mask;
/// Crop-resize and scale-to-height.
pub mod transform;
