use std::{borrow::Cow, io::Cursor};

use image::{RgbaImage, imageops::FilterType};

use crate::assets::decode::{self, DecodeError, Source};
use crate::imaging::attention::attention_offset;

/// Failure of a size-normalizing transform.
#[derive(thiserror::Error, Debug)]
pub enum TransformError {
    /// The input header could not be read or the image decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Re-encoding the transformed image failed.
    #[error("export: {0}")]
    Export(#[source] image::ImageError),

    /// The requested target cannot be produced.
    #[error("{0}")]
    Invalid(String),
}

impl TransformError {
    /// Build a [`TransformError::Invalid`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Resize `buf` to cover `w`×`h` and crop to exactly that size, keeping the
/// most interesting region.
///
/// Returns `buf` itself when it already is `w`×`h`, so applying the transform
/// to its own output is a no-op. Otherwise the result is PNG encoded.
#[tracing::instrument(level = "debug", skip(buf), fields(len = buf.len()))]
pub fn crop_resize(buf: &[u8], w: u32, h: u32) -> Result<Cow<'_, [u8]>, TransformError> {
    let (sw, sh) = decode::image_dimensions(buf)?;
    if (sw, sh) == (w, h) {
        tracing::trace!("image already {w}x{h}");
        return Ok(Cow::Borrowed(buf));
    }
    if w == 0 || h == 0 {
        return Err(TransformError::invalid(format!(
            "target size must be non-zero, got {w}x{h}"
        )));
    }
    if sw == 0 || sh == 0 {
        return Err(TransformError::invalid("source image is empty"));
    }

    tracing::debug!("resizing an image to {w}x{h} px");

    let (cw, ch) = cover_size((sw, sh), (w, h));
    let covered = match decode::sniff(buf)? {
        Source::Vector(tree) => decode::rasterize_svg(&tree, cw, ch)?,
        Source::Raster => {
            let src = decode::decode_image(buf)?;
            image::imageops::resize(&src, cw, ch, FilterType::Lanczos3)
        }
    };

    let (x, y) = attention_offset(&covered, w, h);
    let cropped = image::imageops::crop_imm(&covered, x, y, w, h).to_image();
    encode_png(cropped).map(Cow::Owned)
}

/// Uniformly scale `buf` so its height becomes `h`. Width follows the aspect
/// ratio; nothing is cropped.
///
/// Returns `buf` itself when its height already is `h`. Otherwise the result
/// is PNG encoded.
#[tracing::instrument(level = "debug", skip(buf), fields(len = buf.len()))]
pub fn scale_to_height(buf: &[u8], h: u32) -> Result<Cow<'_, [u8]>, TransformError> {
    let (sw, sh) = decode::image_dimensions(buf)?;
    if sh == h {
        tracing::trace!("image already {h}px high");
        return Ok(Cow::Borrowed(buf));
    }
    if h == 0 {
        return Err(TransformError::invalid("target height must be > 0"));
    }
    if sw == 0 || sh == 0 {
        return Err(TransformError::invalid("source image is empty"));
    }

    tracing::debug!("scaling an image to {h}px height");

    let ratio = f64::from(h) / f64::from(sh);
    let nw = ((f64::from(sw) * ratio).round() as u32).max(1);
    let scaled = match decode::sniff(buf)? {
        Source::Vector(tree) => decode::rasterize_svg(&tree, nw, h)?,
        Source::Raster => {
            let src = decode::decode_image(buf)?;
            image::imageops::resize(&src, nw, h, FilterType::Lanczos3)
        }
    };
    encode_png(scaled).map(Cow::Owned)
}

/// Smallest size with the source's aspect ratio that covers `target`.
pub(crate) fn cover_size(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (sw, sh) = (f64::from(source.0), f64::from(source.1));
    let (tw, th) = target;
    let scale = (f64::from(tw) / sw).max(f64::from(th) / sh);
    let cw = ((sw * scale).round() as u32).max(tw);
    let ch = ((sh * scale).round() as u32).max(th);
    (cw, ch)
}

fn encode_png(img: RgbaImage) -> Result<Vec<u8>, TransformError> {
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(TransformError::Export)?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/transform.rs"]
mod tests;
