use super::*;
use crate::assets::fonts::{DirFontSource, FontFiles, MemoryFontSource};

// DejaVu Sans Mono lacks U+1D00 and U+26C0, DejaVu Serif has U+1D00 only,
// DejaVu Sans has both.
fn fixture_fonts() -> DirFontSource {
    DirFontSource::with_files(
        "tests/data/fonts",
        FontFiles {
            text: "DejaVuSansMono.ttf".to_owned(),
            symbols: "DejaVuSerif.ttf".to_owned(),
            emoji: "DejaVuSans.ttf".to_owned(),
        },
    )
}

#[test]
fn load_registers_three_families_in_order() {
    let face = CompositeFace::load(&fixture_fonts(), 24.0).unwrap();
    assert_eq!(
        face.families(),
        ["DejaVu Sans Mono", "DejaVu Serif", "DejaVu Sans"]
    );
    assert_eq!(face.size(), 24.0);
}

#[test]
fn latin_text_uses_the_primary_face() {
    let mut face = CompositeFace::load(&fixture_fonts(), 24.0).unwrap();
    let layout = face.layout("Hello World", Rgba8::WHITE, None, 1.0);
    let roles = face.run_roles(&layout);
    assert!(!roles.is_empty());
    assert!(roles.iter().all(|r| *r == FontRole::Text), "{roles:?}");
}

#[test]
fn fallback_is_first_match_wins_per_codepoint() {
    let mut face = CompositeFace::load(&fixture_fonts(), 24.0).unwrap();
    let layout = face.layout("A\u{1D00}\u{26C0}", Rgba8::WHITE, None, 1.0);
    assert_eq!(
        face.run_roles(&layout),
        [FontRole::Text, FontRole::Symbols, FontRole::Emoji]
    );
}

#[test]
fn wrapping_respects_max_width() {
    let mut face = CompositeFace::load(&fixture_fonts(), 20.0).unwrap();
    let text = "the quick brown fox jumps over the lazy dog ".repeat(4);

    let single = face.layout(&text, Rgba8::WHITE, None, 1.2);
    assert_eq!(single.lines().count(), 1);

    let wrapped = face.layout(&text, Rgba8::WHITE, Some(200.0), 1.2);
    assert!(wrapped.lines().count() > 1);
    assert!(wrapped.height() > single.height());
}

#[test]
fn invalid_size_is_rejected() {
    for size in [0.0, -3.0, f32::NAN, f32::INFINITY] {
        assert!(matches!(
            CompositeFace::load(&fixture_fonts(), size),
            Err(FontError::InvalidSize(_))
        ));
    }
}

#[test]
fn unparsable_font_names_its_role() {
    let fonts = fixture_fonts();
    let text = fonts.read(FontRole::Text).unwrap();
    let source = MemoryFontSource::new(text.as_ref().clone(), b"not a font".to_vec(), vec![]);
    match CompositeFace::load(&source, 12.0) {
        Err(FontError::Parse { role }) => assert_eq!(role, FontRole::Symbols),
        Err(other) => panic!("expected parse error, got {other:?}"),
        Ok(_) => panic!("expected parse error"),
    }
}

#[test]
fn missing_font_fails_the_load() {
    let source = DirFontSource::new("tests/data/fonts");
    assert!(matches!(
        CompositeFace::load(&source, 12.0),
        Err(FontError::NotFound {
            role: FontRole::Text,
            ..
        })
    ));
}

#[test]
fn paint_fonts_share_the_source_bytes_and_keep_the_run_index() {
    let fixtures = fixture_fonts();
    let [text, symbols, emoji] =
        FontRole::LOOKUP_ORDER.map(|role| fixtures.read(role).unwrap().as_ref().clone());
    let source = MemoryFontSource::new(text, symbols, emoji);

    let mut face = CompositeFace::load(&source, 24.0).unwrap();
    let layout = face.layout("A\u{1D00}\u{26C0}", Rgba8::WHITE, None, 1.0);

    let mut seen = Vec::new();
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let role = face.face_for_run(run.run()).unwrap().role;
            let font = face.paint_font(run.run()).unwrap();
            let bytes = source.read(role).unwrap();

            assert_eq!(font.index, run.run().font().index);
            assert_eq!(font.data.data().as_ptr(), bytes.as_ptr(), "{role} bytes were copied");
            seen.push(role);
        }
    }
    assert_eq!(seen, FontRole::LOOKUP_ORDER);
}
