use std::borrow::Cow;

use crate::assets::fonts::{FontError, FontRole, FontSource};
use crate::foundation::color::Rgba8;

/// One registered font program of a [`CompositeFace`].
pub(crate) struct Face {
    pub(crate) role: FontRole,
    pub(crate) family: String,
    blob: vello_cpu::peniko::Blob<u8>,
}

/// Text, symbols and emoji fonts merged into one face at a fixed size.
///
/// Shaping walks the three families in [`FontRole::LOOKUP_ORDER`] for every
/// cluster and takes the first font that maps it, so callers can mix scripts,
/// symbols and emoji without segmenting the string themselves.
pub struct CompositeFace {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    faces: Vec<Face>,
    size: f32,
}

impl CompositeFace {
    /// Read and parse the three fonts from `source` for use at `size` points.
    pub fn load(source: &dyn FontSource, size: f32) -> Result<Self, FontError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(FontError::InvalidSize(size));
        }

        let mut font_ctx = parley::FontContext::default();
        let mut faces = Vec::with_capacity(FontRole::LOOKUP_ORDER.len());
        for role in FontRole::LOOKUP_ORDER {
            let bytes = source.read(role)?;

            let blob = vello_cpu::peniko::Blob::new(bytes);
            let families = font_ctx.collection.register_fonts(blob.clone(), None);
            let family_id = families
                .first()
                .map(|(id, _)| *id)
                .ok_or(FontError::Parse { role })?;
            let family = font_ctx
                .collection
                .family_name(family_id)
                .ok_or(FontError::Parse { role })?
                .to_string();

            faces.push(Face { role, family, blob });
        }

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            faces,
            size,
        })
    }

    /// Point size every layout of this face uses.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Family names in lookup order.
    pub fn families(&self) -> Vec<&str> {
        self.faces.iter().map(|f| f.family.as_str()).collect()
    }

    /// Shape `text`. With `max_width` the text is word wrapped and left
    /// aligned within it; without, it stays on one line. `line_height` is a
    /// multiple of the font's own line metrics.
    pub fn layout(
        &mut self,
        text: &str,
        brush: Rgba8,
        max_width: Option<f32>,
        line_height: f32,
    ) -> parley::Layout<Rgba8> {
        let stack: Vec<parley::style::FontFamily<'static>> = self
            .faces
            .iter()
            .map(|f| parley::style::FontFamily::Named(Cow::Owned(f.family.clone())))
            .collect();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::List(Cow::Owned(stack)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size));
        builder.push_default(parley::style::StyleProperty::LineHeight(
            parley::style::LineHeight::MetricsRelative(line_height),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        if let Some(w) = max_width {
            layout.break_all_lines(Some(w));
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        } else {
            layout.break_all_lines(None);
        }
        layout
    }

    /// The registered face a shaped run was assigned to.
    pub(crate) fn face_for_run(&self, run: &parley::layout::Run<'_, Rgba8>) -> Option<&Face> {
        let id = run.font().data.id();
        self.faces.iter().find(|f| f.blob.id() == id)
    }

    /// Font to paint a shaped run with: the registered bytes of its face at
    /// the collection index the shaper chose.
    pub(crate) fn paint_font(
        &self,
        run: &parley::layout::Run<'_, Rgba8>,
    ) -> Option<vello_cpu::peniko::FontData> {
        let face = self.face_for_run(run)?;
        Some(vello_cpu::peniko::FontData::new(
            face.blob.clone(),
            run.font().index,
        ))
    }

    /// Role of every glyph run of `layout`, in visual order.
    pub fn run_roles(&self, layout: &parley::Layout<Rgba8>) -> Vec<FontRole> {
        let mut roles = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                if let Some(face) = self.face_for_run(run.run()) {
                    roles.push(face.role);
                }
            }
        }
        roles
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/face.rs"]
mod tests;
