use std::{io::Cursor, path::Path, str::FromStr};

use image::{ExtendedColorType, ImageEncoder, RgbaImage, codecs::jpeg::JpegEncoder};
use serde::{Deserialize, Serialize};

/// File format of an encoded card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy, honours the quality setting. Alpha is dropped.
    #[default]
    Jpeg,
    /// Lossless; quality is ignored.
    Png,
}

impl OutputFormat {
    /// Guess the format from a file extension (`jpg`, `jpeg`, `png`).
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            other => Err(format!("unknown output format '{other}' (expected jpeg or png)")),
        }
    }
}

/// Encode a rendered card. `quality` is clamped to `1..=100` for JPEG.
pub fn encode(
    img: &RgbaImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, image::ImageError> {
    let mut out = Vec::new();
    match format {
        OutputFormat::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100)).write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ExtendedColorType::Rgb8,
            )?;
        }
        OutputFormat::Png => {
            img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)?;
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/output.rs"]
mod tests;
