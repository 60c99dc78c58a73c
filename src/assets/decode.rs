use std::io::Cursor;

use image::RgbaImage;

/// Failure to read dimensions from, or decode, image bytes.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// Raster decoder failure (unknown format, truncated data, ...).
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// SVG parse failure.
    #[error("svg: {0}")]
    Svg(#[from] usvg::Error),

    /// Reader failure while sniffing the format.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Bytes that decoded but cannot be used.
    #[error("{0}")]
    Invalid(String),
}

impl DecodeError {
    /// Build a [`DecodeError::Invalid`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// A source buffer classified by container family.
pub(crate) enum Source {
    Raster,
    Vector(usvg::Tree),
}

/// Classify `bytes`. Buffers whose magic is not a known raster format but
/// that look like XML are parsed as SVG.
pub(crate) fn sniff(bytes: &[u8]) -> Result<Source, DecodeError> {
    if image::guess_format(bytes).is_err() && looks_like_svg(bytes) {
        let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())?;
        return Ok(Source::Vector(tree));
    }
    Ok(Source::Raster)
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    let head = head.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(head);
    let start = head
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(head.len());
    let head = &head[start..];
    head.starts_with(b"<?xml")
        || head.starts_with(b"<svg")
        || head.windows(4).any(|w| w == b"<svg")
}

/// Natural size of an image without decoding its pixels.
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32), DecodeError> {
    match sniff(bytes)? {
        Source::Vector(tree) => svg_dimensions(&tree),
        Source::Raster => {
            let reader = image::ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
            Ok(reader.into_dimensions()?)
        }
    }
}

/// Decode image bytes (raster or SVG) into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, DecodeError> {
    match sniff(bytes)? {
        Source::Vector(tree) => {
            let (w, h) = svg_dimensions(&tree)?;
            rasterize_svg(&tree, w, h)
        }
        Source::Raster => Ok(image::load_from_memory(bytes)?.to_rgba8()),
    }
}

pub(crate) fn svg_dimensions(tree: &usvg::Tree) -> Result<(u32, u32), DecodeError> {
    fn to_px(v: f32) -> Result<u32, DecodeError> {
        if !v.is_finite() || v <= 0.0 {
            return Err(DecodeError::invalid("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    Ok((to_px(size.width())?, to_px(size.height())?))
}

/// Rasterize an SVG tree stretched to exactly `width`×`height`.
pub(crate) fn rasterize_svg(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> Result<RgbaImage, DecodeError> {
    // Avoid pathological allocations from hostile width/height attributes.
    const MAX_DIM: u32 = 16_384;
    if width > MAX_DIM || height > MAX_DIM {
        return Err(DecodeError::invalid(format!(
            "svg raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| DecodeError::invalid("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());

    let mut rgba = pixmap.take();
    unpremultiply_rgba8_in_place(&mut rgba);
    RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| DecodeError::invalid("svg raster byte length mismatch"))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
