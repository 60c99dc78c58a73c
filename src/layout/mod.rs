/// Card geometry constants and element positions.
pub mod geometry;
