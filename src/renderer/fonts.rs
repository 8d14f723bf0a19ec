use std::sync::OnceLock;

use egui::Pos2;
use log::{debug, warn};
use rustybuzz::ttf_parser::{GlyphId, OutlineBuilder};
use rustybuzz::{Face, UnicodeBuffer};

use crate::element::FontSpec;

/// System font database used to outline text labels for rasterization.
///
/// Fonts are loaded lazily on the first text label; a stage without text
/// never touches the file system.
#[derive(Default)]
pub struct FontBook {
    db: OnceLock<fontdb::Database>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("faces", &self.db.get().map(|db| db.len()))
            .finish()
    }
}

impl FontBook {
    fn database(&self) -> &fontdb::Database {
        self.db.get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            debug!("loaded {} font faces", db.len());
            db
        })
    }

    /// Best installed face for `font`: the family itself, then any sans-serif
    fn resolve(&self, font: &FontSpec) -> Option<fontdb::ID> {
        let families = [fontdb::Family::Name(&font.family), fontdb::Family::SansSerif];
        let query = fontdb::Query {
            families: &families,
            weight: if font.bold {
                fontdb::Weight::BOLD
            } else {
                fontdb::Weight::NORMAL
            },
            ..fontdb::Query::default()
        };
        self.database().query(&query)
    }

    /// Raw bytes and collection index of the face used for `font`, so the
    /// live view can draw with the same face the raster uses.
    pub fn face_data(&self, font: &FontSpec) -> Option<(Vec<u8>, u32)> {
        let id = self.resolve(font)?;
        self.database()
            .with_face_data(id, |data, index| (data.to_vec(), index))
    }

    /// Shape `content` with the best matching face and return the glyph
    /// outlines as one path in canvas coordinates. `origin` is the top-left
    /// corner of the first line.
    ///
    /// Returns `None` when nothing can be drawn, including when no usable
    /// font is installed.
    pub fn outline_text(&self, origin: Pos2, content: &str, font: &FontSpec) -> Option<tiny_skia::Path> {
        let Some(id) = self.resolve(font) else {
            warn!("no font matches '{}', text is left out of the raster", font.family);
            return None;
        };

        self.database()
            .with_face_data(id, |data, index| {
                let face = Face::from_slice(data, index)?;
                layout(&face, origin, content, font.size)
            })
            .flatten()
    }
}

fn layout(face: &Face<'_>, origin: Pos2, content: &str, size: f32) -> Option<tiny_skia::Path> {
    let scale = size / face.units_per_em() as f32;
    let ascender = f32::from(face.ascender()) * scale;
    let line_height =
        (f32::from(face.ascender()) - f32::from(face.descender()) + f32::from(face.line_gap())) * scale;

    let mut builder = GlyphPath {
        builder: tiny_skia::PathBuilder::new(),
        scale,
        x: 0.0,
        y: 0.0,
    };

    for (row, line) in content.lines().enumerate() {
        let baseline = origin.y + ascender + row as f32 * line_height;
        let mut pen_x = origin.x;

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(line);
        let glyphs = rustybuzz::shape(face, &[], buffer);

        for (info, pos) in glyphs.glyph_infos().iter().zip(glyphs.glyph_positions()) {
            builder.x = pen_x + pos.x_offset as f32 * scale;
            builder.y = baseline - pos.y_offset as f32 * scale;
            // Glyphs without outlines (spaces) still advance the pen.
            let _ = face.outline_glyph(GlyphId(info.glyph_id as u16), &mut builder);
            pen_x += pos.x_advance as f32 * scale;
        }
    }

    builder.builder.finish()
}

/// Converts font-unit outlines into a tiny-skia path at the current pen position
struct GlyphPath {
    builder: tiny_skia::PathBuilder,
    scale: f32,
    x: f32,
    y: f32,
}

impl GlyphPath {
    fn tx(&self, x: f32) -> f32 {
        self.x + x * self.scale
    }

    fn ty(&self, y: f32) -> f32 {
        // font units grow upwards
        self.y - y * self.scale
    }
}

impl OutlineBuilder for GlyphPath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(self.tx(x), self.ty(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(self.tx(x), self.ty(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(self.tx(x1), self.ty(y1), self.tx(x), self.ty(y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.tx(x1),
            self.ty(y1),
            self.tx(x2),
            self.ty(y2),
            self.tx(x),
            self.ty(y),
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
