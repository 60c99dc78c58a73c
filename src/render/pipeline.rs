use std::borrow::Cow;

use image::RgbaImage;

use crate::assets::decode;
use crate::assets::fonts::FontSource;
use crate::assets::resolver::Resolver;
use crate::foundation::color::{Rgba8, opacity_to_alpha};
use crate::foundation::error::{PreviewError, PreviewResult, Stage};
use crate::imaging::mask::circular_mask;
use crate::imaging::transform::{TransformError, crop_resize, scale_to_height};
use crate::layout::geometry::{CardLayout, TITLE_LINE_HEIGHT, truncate_title};
use crate::model::options::{BackgroundSpec, Options};
use crate::render::canvas::Canvas;
use crate::text::face::CompositeFace;

const BORDER_COLOR: Rgba8 = Rgba8::WHITE;
const AUTHOR_COLOR: Rgba8 = Rgba8::WHITE.with_alpha(204);
const TITLE_COLOR: Rgba8 = Rgba8::WHITE;

/// Raw image bytes for one render, already fetched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inputs {
    /// Avatar image bytes.
    pub avatar: Vec<u8>,
    /// Logo image bytes.
    pub logo: Vec<u8>,
    /// Background image bytes; only read when the background is an image.
    pub background: Option<Vec<u8>>,
}

impl Inputs {
    /// Pair the buffers returned for [`Options::references`] with their roles.
    pub fn from_resolved(opts: &Options, buffers: Vec<Vec<u8>>) -> PreviewResult<Self> {
        let expected = opts.references().len();
        if buffers.len() != expected {
            return Err(PreviewError::validation(format!(
                "expected {expected} resolved buffers, got {}",
                buffers.len()
            )));
        }

        let mut it = buffers.into_iter();
        let (Some(avatar), Some(logo)) = (it.next(), it.next()) else {
            return Err(PreviewError::validation("avatar and logo buffers missing"));
        };
        Ok(Self {
            avatar,
            logo,
            background: it.next(),
        })
    }
}

/// Composite one card from pre-fetched bytes.
///
/// Stages run in [`Stage::ORDER`]; the first failure aborts the render and no
/// partial image is returned. Fonts are loaded from `fonts` for every text
/// stage.
#[tracing::instrument(skip_all, fields(w = opts.canvas_w, h = opts.canvas_h))]
pub fn render(opts: &Options, inputs: &Inputs, fonts: &dyn FontSource) -> PreviewResult<RgbaImage> {
    let layout = CardLayout::new(opts);
    let canvas = Canvas::new(layout.canvas_w, layout.canvas_h)?;

    let canvas = draw_background(canvas, opts, inputs, &layout)?;
    let canvas = draw_foreground(canvas, opts, &layout);
    let canvas = draw_avatar(canvas, inputs, &layout)?;
    let canvas = draw_author(canvas, opts, fonts, &layout)?;
    let canvas = draw_title(canvas, opts, fonts, &layout)?;
    let canvas = draw_logo(canvas, inputs, &layout)?;

    canvas.into_image()
}

fn draw_background(
    mut canvas: Canvas,
    opts: &Options,
    inputs: &Inputs,
    layout: &CardLayout,
) -> PreviewResult<Canvas> {
    match opts.background() {
        BackgroundSpec::Color(color) => canvas.fill_rect(layout.canvas(), color),
        BackgroundSpec::Image(reference) => {
            let bytes = inputs.background.as_deref().ok_or_else(|| {
                PreviewError::validation(format!("no bytes for background '{reference}'"))
            })?;
            let img = fit(Stage::Background, bytes, |b| {
                crop_resize(b, layout.canvas_w, layout.canvas_h)
            })?;
            canvas.draw_image(&img, kurbo::Point::ZERO)?;
        }
    }
    Ok(canvas)
}

fn draw_foreground(mut canvas: Canvas, opts: &Options, layout: &CardLayout) -> Canvas {
    let overlay = Rgba8::BLACK.with_alpha(opacity_to_alpha(opts.opacity));
    canvas.fill_rect(layout.foreground, overlay);
    canvas
}

fn draw_avatar(mut canvas: Canvas, inputs: &Inputs, layout: &CardLayout) -> PreviewResult<Canvas> {
    let avatar = layout.avatar;
    canvas.fill_circle(avatar.center, avatar.border_radius, BORDER_COLOR);

    let img = fit(Stage::Avatar, &inputs.avatar, |b| {
        crop_resize(b, avatar.diameter, avatar.diameter)
    })?;
    canvas.draw_image_anchored(&circular_mask(&img), avatar.center, 0.5, 0.5)?;
    Ok(canvas)
}

fn draw_author(
    mut canvas: Canvas,
    opts: &Options,
    fonts: &dyn FontSource,
    layout: &CardLayout,
) -> PreviewResult<Canvas> {
    let mut face = load_face(Stage::Author, fonts, opts.author_size)?;
    let text = author_layout(&mut face, opts);

    let anchor = layout.author_anchor;
    let origin = kurbo::Point::new(anchor.x, anchor.y - f64::from(text.height()) / 2.0);
    canvas.draw_text(&face, &text, origin)?;
    Ok(canvas)
}

fn draw_title(
    mut canvas: Canvas,
    opts: &Options,
    fonts: &dyn FontSource,
    layout: &CardLayout,
) -> PreviewResult<Canvas> {
    let mut face = load_face(Stage::Title, fonts, opts.title_size)?;
    let text = title_layout(&mut face, opts, layout);
    canvas.draw_text(&face, &text, layout.title_origin)?;
    Ok(canvas)
}

/// The author line, shaped whole on one line.
fn author_layout(face: &mut CompositeFace, opts: &Options) -> parley::Layout<Rgba8> {
    face.layout(&opts.author, AUTHOR_COLOR, None, 1.0)
}

/// The title, capped by [`truncate_title`] and wrapped to the title box.
fn title_layout(
    face: &mut CompositeFace,
    opts: &Options,
    layout: &CardLayout,
) -> parley::Layout<Rgba8> {
    let title = truncate_title(&opts.title);
    face.layout(
        &title,
        TITLE_COLOR,
        Some(layout.title_max_width as f32),
        TITLE_LINE_HEIGHT,
    )
}

fn draw_logo(mut canvas: Canvas, inputs: &Inputs, layout: &CardLayout) -> PreviewResult<Canvas> {
    let img = fit(Stage::Logo, &inputs.logo, |b| scale_to_height(b, layout.logo_h))?;
    canvas.draw_image(&img, layout.logo_origin(img.width()))?;
    Ok(canvas)
}

fn fit<'a>(
    stage: Stage,
    bytes: &'a [u8],
    transform: impl FnOnce(&'a [u8]) -> Result<Cow<'a, [u8]>, TransformError>,
) -> PreviewResult<RgbaImage> {
    let fitted = transform(bytes).map_err(|e| PreviewError::from_transform(stage, e))?;
    decode::decode_image(&fitted).map_err(|source| PreviewError::Decode { stage, source })
}

fn load_face(stage: Stage, fonts: &dyn FontSource, size: f32) -> PreviewResult<CompositeFace> {
    CompositeFace::load(fonts, size).map_err(|source| PreviewError::FontLoad { stage, source })
}

/// Resolves references with `R`, then renders with fonts from `F`.
pub struct Preview<R, F> {
    resolver: R,
    fonts: F,
}

impl<R: Resolver, F: FontSource> Preview<R, F> {
    /// Bundle a resolver and a font source.
    pub fn new(resolver: R, fonts: F) -> Self {
        Self { resolver, fonts }
    }

    /// Fetch every reference of `opts` in one batch, then [`render`].
    #[tracing::instrument(skip_all, fields(avatar = %opts.ava_url, logo = %opts.logo_url))]
    pub fn draw(&self, opts: &Options) -> PreviewResult<RgbaImage> {
        let references = opts.references();
        let buffers = self.resolver.get_all(&references)?;
        let inputs = Inputs::from_resolved(opts, buffers)?;
        render(opts, &inputs, &self.fonts)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
