//! Fixed card geometry.
//!
//! Every position is derived from the canvas size, the avatar diameter and a
//! handful of constants. Nothing depends on measured text: the title is wrapped
//! into a computed box instead of the box growing around the text.

use std::borrow::Cow;

use kurbo::{Point, Rect};

use crate::model::options::Options;

/// Inset of the translucent overlay from the canvas edges.
pub const MARGIN: f64 = 20.0;
/// Distance of the content from the canvas edges.
pub const PADDING: f64 = 48.0;
/// Width of the ring drawn around the avatar.
pub const BORDER: u32 = 8;
/// Title length cap, in codepoints.
pub const MAX_TITLE_LENGTH: usize = 90;
/// Appended to a capped title.
pub const ELLIPSIS: char = '…';
/// Title line height as a multiple of the font's line metrics.
pub const TITLE_LINE_HEIGHT: f32 = 1.2;

/// Avatar circle placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvatarGeometry {
    /// Shared center of the border ring and the masked image.
    pub center: Point,
    /// Radius of the filled border circle.
    pub border_radius: f64,
    /// Target edge length of the square avatar bitmap.
    pub diameter: u32,
}

/// Resolved positions of every card element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardLayout {
    /// Canvas width in pixels.
    pub canvas_w: u32,
    /// Canvas height in pixels.
    pub canvas_h: u32,
    /// Overlay rectangle.
    pub foreground: Rect,
    /// Avatar placement.
    pub avatar: AvatarGeometry,
    /// Left edge and vertical center of the author line.
    pub author_anchor: Point,
    /// Top-left corner of the title block.
    pub title_origin: Point,
    /// Wrap width of the title block.
    pub title_max_width: f64,
    /// Target logo height.
    pub logo_h: u32,
}

impl CardLayout {
    /// Compute the layout for `opts`.
    pub fn new(opts: &Options) -> Self {
        let canvas_w = f64::from(opts.canvas_w);
        let canvas_h = f64::from(opts.canvas_h);
        let ava_d = f64::from(opts.ava_d);

        let ring = (ava_d + f64::from(BORDER)) / 2.0;
        let avatar = AvatarGeometry {
            center: Point::new(PADDING + ring, PADDING + ring),
            border_radius: ring,
            diameter: opts.ava_d,
        };

        Self {
            canvas_w: opts.canvas_w,
            canvas_h: opts.canvas_h,
            foreground: Rect::new(MARGIN, MARGIN, canvas_w - MARGIN, canvas_h - MARGIN),
            avatar,
            author_anchor: Point::new(PADDING + ava_d + PADDING / 2.0, PADDING + ava_d / 2.0),
            title_origin: Point::new(PADDING, PADDING * 2.0 + ava_d),
            title_max_width: canvas_w - PADDING - MARGIN * 2.0,
            logo_h: opts.logo_h,
        }
    }

    /// Full canvas rectangle.
    pub fn canvas(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.canvas_w), f64::from(self.canvas_h))
    }

    /// Top-left corner of a logo `logo_w` pixels wide, pinned to the
    /// bottom-right padding corner.
    pub fn logo_origin(&self, logo_w: u32) -> Point {
        Point::new(
            f64::from(self.canvas_w) - PADDING - f64::from(logo_w),
            f64::from(self.canvas_h) - PADDING - f64::from(self.logo_h),
        )
    }
}

/// Cap `title` at [`MAX_TITLE_LENGTH`] codepoints, appending [`ELLIPSIS`] when
/// anything was cut. Never splits a multi-byte character.
pub fn truncate_title(title: &str) -> Cow<'_, str> {
    match title.char_indices().nth(MAX_TITLE_LENGTH) {
        None => Cow::Borrowed(title),
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len_utf8());
            out.push_str(&title[..cut]);
            out.push(ELLIPSIS);
            Cow::Owned(out)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
