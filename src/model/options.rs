use serde::{Deserialize, Serialize};

use crate::foundation::color::Rgba8;
use crate::foundation::error::{PreviewError, PreviewResult};

/// Background used when the options leave it empty.
pub const DEFAULT_BG_COLOR: Rgba8 = Rgba8::WHITE;

/// Declarative description of one card.
///
/// Image fields hold references (paths or URLs) for a [`crate::Resolver`]; the
/// render core itself only ever sees the resolved bytes in [`crate::Inputs`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Canvas width in pixels.
    pub canvas_w: u32,
    /// Canvas height in pixels.
    pub canvas_h: u32,
    /// Opacity of the black overlay, `0.0..=1.0`.
    pub opacity: f64,
    /// Avatar diameter in pixels.
    pub ava_d: u32,
    /// Title text; capped before wrapping.
    pub title: String,
    /// Title font size in points.
    pub title_size: f32,
    /// Author text; drawn as is.
    pub author: String,
    /// Author font size in points.
    pub author_size: f32,
    /// Left part of the logo label. Carried along, not drawn.
    pub label_l: String,
    /// Right part of the logo label. Carried along, not drawn.
    pub label_r: String,
    /// Logo label font size. Carried along, not drawn.
    pub label_size: f32,
    /// `#RGB`/`#RRGGBB` color, or a reference to a background image. Empty
    /// means [`DEFAULT_BG_COLOR`].
    pub bg: String,
    /// Reference to the avatar image.
    pub ava_url: String,
    /// Reference to the logo image.
    pub logo_url: String,
    /// Logo height in pixels; width follows the logo's aspect ratio.
    pub logo_h: u32,
    /// Encoder quality, `0..=100`.
    pub quality: u8,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            canvas_w: 1200,
            canvas_h: 630,
            opacity: 0.6,
            ava_d: 64,
            title: String::new(),
            title_size: 48.0,
            author: String::new(),
            author_size: 28.0,
            label_l: String::new(),
            label_r: String::new(),
            label_size: 28.0,
            bg: String::new(),
            ava_url: String::new(),
            logo_url: String::new(),
            logo_h: 36,
            quality: 90,
        }
    }
}

/// What the background stage draws, as decided by [`Options::background`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundSpec<'a> {
    /// Flat fill.
    Color(Rgba8),
    /// Image reference to be resolved.
    Image(&'a str),
}

impl Options {
    /// Classify the background: hex colors fill, empty falls back to
    /// [`DEFAULT_BG_COLOR`], anything else is an image reference.
    pub fn background(&self) -> BackgroundSpec<'_> {
        if self.bg.is_empty() {
            return BackgroundSpec::Color(DEFAULT_BG_COLOR);
        }
        match Rgba8::from_hex(&self.bg) {
            Some(color) => BackgroundSpec::Color(color),
            None => BackgroundSpec::Image(&self.bg),
        }
    }

    /// References a resolver must fetch, in order: avatar, logo, then the
    /// background when it is an image.
    pub fn references(&self) -> Vec<&str> {
        let mut refs = vec![self.ava_url.as_str(), self.logo_url.as_str()];
        if let BackgroundSpec::Image(r) = self.background() {
            refs.push(r);
        }
        refs
    }

    /// Opt-in sanity check for options coming from untrusted input. The
    /// render core does not call this.
    pub fn validate(&self) -> PreviewResult<()> {
        // The CPU rasterizer addresses surfaces with u16 coordinates.
        let max = u32::from(u16::MAX);
        if self.canvas_w == 0 || self.canvas_h == 0 {
            return Err(PreviewError::validation("canvas width/height must be > 0"));
        }
        if self.canvas_w > max || self.canvas_h > max {
            return Err(PreviewError::validation(format!(
                "canvas must be at most {max}x{max}, got {}x{}",
                self.canvas_w, self.canvas_h
            )));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(PreviewError::validation("opacity must be within 0..=1"));
        }
        for (name, size) in [
            ("title_size", self.title_size),
            ("author_size", self.author_size),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(PreviewError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.quality > 100 {
            return Err(PreviewError::validation("quality must be within 0..=100"));
        }
        if self.ava_url.is_empty() {
            return Err(PreviewError::validation("ava_url must be set"));
        }
        if self.logo_url.is_empty() {
            return Err(PreviewError::validation("logo_url must be set"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/options.rs"]
mod tests;
