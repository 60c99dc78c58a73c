//! ogcard renders Open Graph preview cards.
//!
//! A card is described by [`Options`]: canvas size, a background (hex color or
//! image), an avatar, author and title text, a logo and a translucent overlay.
//! Rendering is a fixed sequence of stages drawn onto one CPU canvas:
//!
//! 1. **Background**: solid fill, or an image crop-resized to the canvas
//! 2. **Foreground**: black overlay inset by the margin
//! 3. **Avatar**: white ring plus a circular avatar
//! 4. **Author**: one line next to the avatar
//! 5. **Title**: wrapped and capped at 90 characters
//! 6. **Logo**: scaled to a fixed height, bottom-right
//!
//! The core never performs IO. [`render`] takes pre-fetched bytes ([`Inputs`])
//! and a [`FontSource`]; [`Preview`] pairs it with a [`Resolver`] that fetches
//! the references first. Any failure aborts the render with a
//! [`PreviewError`] naming the [`Stage`].
//!
//! ```no_run
//! use ogcard::{DirFontSource, FsResolver, Options, OutputFormat, Preview, encode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let opts = Options {
//!     title: "Hello".to_owned(),
//!     bg: "#112233".to_owned(),
//!     ava_url: "avatar.png".to_owned(),
//!     logo_url: "logo.svg".to_owned(),
//!     ..Options::default()
//! };
//! let preview = Preview::new(FsResolver::new("assets"), DirFontSource::new("fonts"));
//! let card = preview.draw(&opts)?;
//! std::fs::write("card.jpg", encode(&card, OutputFormat::Jpeg, opts.quality)?)?;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod encode;
mod foundation;
mod imaging;
mod layout;
mod model;
mod render;
mod text;

pub use crate::assets::decode::{DecodeError, decode_image, image_dimensions};
pub use crate::assets::fonts::{
    DirFontSource, FontError, FontFiles, FontRole, FontSource, MemoryFontSource,
};
pub use crate::assets::resolver::{FetchError, FsResolver, MemoryResolver, Resolver};
pub use crate::encode::output::{OutputFormat, encode};
pub use crate::foundation::color::Rgba8;
pub use crate::foundation::error::{PreviewError, PreviewResult, Stage};
pub use crate::imaging::mask::circular_mask;
pub use crate::imaging::transform::{TransformError, crop_resize, scale_to_height};
pub use crate::layout::geometry::{
    AvatarGeometry, BORDER, CardLayout, MARGIN, MAX_TITLE_LENGTH, PADDING, truncate_title,
};
pub use crate::model::options::{BackgroundSpec, DEFAULT_BG_COLOR, Options};
pub use crate::render::canvas::Canvas;
pub use crate::render::pipeline::{Inputs, Preview, render};
pub use crate::text::face::CompositeFace;
