//! Everything the renderer reads from outside: image bytes and font programs.

/// Image probing and decoding (raster and SVG).
pub mod decode;
/// Font roles and byte sources.
pub mod fonts;
/// Reference resolvers.
pub mod resolver;
