use std::sync::Arc;

use image::RgbaImage;
use vello_cpu::kurbo::Shape as _;

use crate::assets::decode::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};
use crate::foundation::color::Rgba8;
use crate::foundation::error::{PreviewError, PreviewResult};
use crate::text::face::CompositeFace;

/// The drawing surface of one render.
///
/// Draw calls are recorded into a `vello_cpu` context and rasterized once by
/// [`Canvas::into_image`]; later calls paint over earlier ones.
pub struct Canvas {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl Canvas {
    /// Transparent canvas of `width`×`height` pixels.
    ///
    /// Rasterizes with the f32 pipeline: translucent paint over an opaque
    /// pixel keeps it at alpha 255.
    pub fn new(width: u32, height: u32) -> PreviewResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| PreviewError::render("canvas width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| PreviewError::render("canvas height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(PreviewError::render("canvas width/height must be > 0"));
        }

        Ok(Self {
            width: width_u16,
            height: height_u16,
            ctx: vello_cpu::RenderContext::new_with(
                width_u16,
                height_u16,
                vello_cpu::RenderSettings {
                    render_mode: vello_cpu::RenderMode::OptimizeQuality,
                    ..Default::default()
                },
            ),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: kurbo::Rect, color: Rgba8) {
        self.reset_transforms();
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Fill a circle.
    pub fn fill_circle(&mut self, center: kurbo::Point, radius: f64, color: Rgba8) {
        self.reset_transforms();
        self.ctx.set_paint(color_to_cpu(color));
        let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(center), radius);
        self.ctx.fill_path(&circle.to_path(0.1));
    }

    /// Draw `img` with its top-left corner at `origin`, snapped to whole
    /// pixels.
    pub fn draw_image(&mut self, img: &RgbaImage, origin: kurbo::Point) -> PreviewResult<()> {
        let (w, h) = img.dimensions();
        if w == 0 || h == 0 {
            return Ok(());
        }

        let paint = image_to_paint(img)?;
        self.reset_transforms();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            origin.x.floor(),
            origin.y.floor(),
        )));
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));
        Ok(())
    }

    /// Draw `img` so that the point `(ax, ay)` of its bounds, given as
    /// fractions of its size, lands on `anchor`. `(0.5, 0.5)` centers it.
    pub fn draw_image_anchored(
        &mut self,
        img: &RgbaImage,
        anchor: kurbo::Point,
        ax: f64,
        ay: f64,
    ) -> PreviewResult<()> {
        let (w, h) = img.dimensions();
        let origin = kurbo::Point::new(
            anchor.x.trunc() - (ax * f64::from(w)).trunc(),
            anchor.y.trunc() - (ay * f64::from(h)).trunc(),
        );
        self.draw_image(img, origin)
    }

    /// Draw a shaped layout with its top-left corner at `origin`. Glyph runs
    /// are painted with the font the shaper picked for them.
    pub fn draw_text(
        &mut self,
        face: &CompositeFace,
        layout: &parley::Layout<Rgba8>,
        origin: kurbo::Point,
    ) -> PreviewResult<()> {
        self.reset_transforms();
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let font = face.paint_font(run.run()).ok_or_else(|| {
                    PreviewError::render("glyph run shaped with an unregistered font")
                })?;

                let brush = run.style().brush;
                self.ctx.set_paint(color_to_cpu(brush));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    /// Rasterize every recorded draw call into straight-alpha RGBA8.
    pub fn into_image(mut self) -> PreviewResult<RgbaImage> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut data = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        RgbaImage::from_raw(self.width(), self.height(), data)
            .ok_or_else(|| PreviewError::render("canvas readback byte length mismatch"))
    }

    fn reset_transforms(&mut self) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: kurbo::Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn image_to_paint(img: &RgbaImage) -> PreviewResult<vello_cpu::Image> {
    let (width, height) = img.dimensions();
    let w: u16 = width
        .try_into()
        .map_err(|_| PreviewError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PreviewError::render("image height exceeds u16"))?;

    let mut rgba8_premul = img.as_raw().clone();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
