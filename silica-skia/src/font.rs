//! fontdb lookup and ttf-parser outlines behind the silica font traits.

use silica_graphics::{
    FontDescriptor, FontFace, FontLoader, FontSlant, FontWeight, FontWidth, GlyphId, OutlineSink,
};
use std::fmt;
use std::sync::Arc;

/// A font face parsed from in-memory font data.
///
/// Metrics are read once; outlines and cmap lookups reparse the face
/// header, which ttf-parser keeps allocation-free.
#[derive(Clone)]
pub struct TtfFontFace {
    data: Arc<Vec<u8>>,
    index: u32,
    units_per_em: u16,
    ascent: i16,
    descent: i16,
    full_name: Option<String>,
}

impl fmt::Debug for TtfFontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtfFontFace")
            .field("full_name", &self.full_name)
            .field("index", &self.index)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl TtfFontFace {
    /// Parse face `index` of `data`. `None` if the data is not a font.
    pub fn from_data(data: Arc<Vec<u8>>, index: u32) -> Option<Self> {
        let face = ttf_parser::Face::parse(&data, index).ok()?;
        let full_name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .find_map(|name| name.to_string());
        let units_per_em = face.units_per_em();
        let ascent = face.ascender();
        let descent = face.descender();
        Some(Self {
            data,
            index,
            units_per_em,
            ascent,
            descent,
            full_name,
        })
    }

    fn with_face<T>(&self, f: impl FnOnce(&ttf_parser::Face<'_>) -> T) -> Option<T> {
        ttf_parser::Face::parse(&self.data, self.index)
            .ok()
            .map(|face| f(&face))
    }
}

/// Forwards ttf-parser outline callbacks to an [`OutlineSink`].
struct SinkAdapter<'a> {
    sink: &'a mut dyn OutlineSink,
}

impl ttf_parser::OutlineBuilder for SinkAdapter<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.sink.move_to(x as f64, y as f64);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.sink.line_to(x as f64, y as f64);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.sink.quad_to(x1 as f64, y1 as f64, x as f64, y as f64);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.sink.curve_to(
            x1 as f64, y1 as f64, x2 as f64, y2 as f64, x as f64, y as f64,
        );
    }

    fn close(&mut self) {
        self.sink.close();
    }
}

impl FontFace for TtfFontFace {
    fn full_name(&self) -> Option<String> {
        self.full_name.clone()
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn ascent(&self) -> i16 {
        self.ascent
    }

    fn descent(&self) -> i16 {
        self.descent
    }

    fn glyph_index(&self, c: char) -> GlyphId {
        self.with_face(|face| face.glyph_index(c))
            .flatten()
            .map_or(0, |glyph| glyph.0)
    }

    fn advance(&self, glyph: GlyphId) -> u16 {
        self.with_face(|face| face.glyph_hor_advance(ttf_parser::GlyphId(glyph)))
            .flatten()
            .unwrap_or(0)
    }

    fn outline(&self, glyph: GlyphId, sink: &mut dyn OutlineSink) -> bool {
        let mut adapter = SinkAdapter { sink };
        self.with_face(|face| {
            face.outline_glyph(ttf_parser::GlyphId(glyph), &mut adapter)
                .is_some()
        })
        .unwrap_or(false)
    }
}

/// Generic family for the names `serif`, `sans-serif`, `monospace`,
/// `cursive` and `fantasy`; any other name is a concrete family.
fn query_family(name: &str) -> fontdb::Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => fontdb::Family::Serif,
        "sans-serif" => fontdb::Family::SansSerif,
        "monospace" => fontdb::Family::Monospace,
        "cursive" => fontdb::Family::Cursive,
        "fantasy" => fontdb::Family::Fantasy,
        _ => fontdb::Family::Name(name),
    }
}

/// [`FontLoader`] backed by a shared [`fontdb::Database`].
#[derive(Clone)]
pub struct FontdbLoader {
    db: Arc<fontdb::Database>,
}

impl fmt::Debug for FontdbLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontdbLoader")
            .field("faces", &self.db.len())
            .finish()
    }
}

impl FontdbLoader {
    pub fn new(db: fontdb::Database) -> Self {
        Self { db: Arc::new(db) }
    }

    pub fn database(&self) -> &fontdb::Database {
        &self.db
    }
}

impl FontLoader for FontdbLoader {
    fn load(&self, descriptor: &FontDescriptor) -> Option<Arc<dyn FontFace>> {
        let families = [query_family(&descriptor.family)];
        let query = fontdb::Query {
            families: &families,
            weight: match descriptor.weight {
                FontWeight::Regular => fontdb::Weight::NORMAL,
                FontWeight::Bold => fontdb::Weight::BOLD,
            },
            stretch: match descriptor.width {
                FontWidth::Normal => fontdb::Stretch::Normal,
                FontWidth::Condensed => fontdb::Stretch::Condensed,
            },
            style: match descriptor.slant {
                FontSlant::Roman => fontdb::Style::Normal,
                FontSlant::Italic => fontdb::Style::Italic,
                FontSlant::Oblique => fontdb::Style::Oblique,
            },
        };
        let Some(id) = self.db.query(&query) else {
            log::debug!(target: "silica::font", "no face for family {:?}", descriptor.family);
            return None;
        };
        log::trace!(target: "silica::font", "matched {id:?} for {:?}", descriptor.family);
        let face = self
            .db
            .with_face_data(id, |data, index| {
                TtfFontFace::from_data(Arc::new(data.to_vec()), index)
            })
            .flatten()?;
        Some(Arc::new(face))
    }
}
