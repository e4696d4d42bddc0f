//! Fonts: name resolution, metrics and the font cache.

use crate::error::{GraphicsError, GraphicsResult};
use crate::geometry::{AffineTransform, Point, Size};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Index of a glyph inside a font face. Zero is the missing glyph.
pub type GlyphId = u16;

/// Receives glyph outline segments in font units (y axis pointing up).
pub trait OutlineSink {
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64);
    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64);
    fn close(&mut self);
}

/// Metrics and outlines of one loaded font face.
pub trait FontFace: fmt::Debug + Send + Sync {
    /// Full name of the face as reported by the font.
    fn full_name(&self) -> Option<String> {
        None
    }

    fn units_per_em(&self) -> u16;

    /// Ascender in font units.
    fn ascent(&self) -> i16;

    /// Descender in font units (usually negative).
    fn descent(&self) -> i16;

    /// Glyph for a Unicode scalar; `0` when the face has none.
    fn glyph_index(&self, c: char) -> GlyphId;

    /// Horizontal advance in font units.
    fn advance(&self, glyph: GlyphId) -> u16;

    /// Emit the outline of `glyph`. Returns `false` if it has none.
    fn outline(&self, glyph: GlyphId, sink: &mut dyn OutlineSink) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontSlant {
    #[default]
    Roman,
    Italic,
    Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWidth {
    #[default]
    Normal,
    Condensed,
}

/// Family and traits parsed from a PostScript-style font name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontDescriptor {
    pub family: String,
    pub weight: FontWeight,
    pub slant: FontSlant,
    pub width: FontWidth,
}

/// Generic family names, matched whole and case-insensitively.
const GENERIC_FAMILIES: &[&str] = &["serif", "sans-serif", "monospace", "cursive", "fantasy"];

impl FontDescriptor {
    /// Split `name` at its first `-`; the remainder is searched for the
    /// `Bold`, `Italic`, `Oblique` and `Condensed` traits. Generic family
    /// names such as `sans-serif` are never split.
    ///
    /// `"Helvetica-BoldOblique"` is Helvetica, bold, oblique.
    pub fn parse(name: &str) -> Self {
        let generic = GENERIC_FAMILIES
            .iter()
            .any(|generic| generic.eq_ignore_ascii_case(name));
        let (family, traits) = match name.split_once('-') {
            Some((family, traits)) if !generic => (family, Some(traits)),
            _ => (name, None),
        };
        let mut descriptor = FontDescriptor {
            family: family.to_string(),
            weight: FontWeight::Regular,
            slant: FontSlant::Roman,
            width: FontWidth::Normal,
        };
        if let Some(traits) = traits {
            if traits.contains("Bold") {
                descriptor.weight = FontWeight::Bold;
            }
            if traits.contains("Italic") {
                descriptor.slant = FontSlant::Italic;
            }
            if traits.contains("Oblique") {
                descriptor.slant = FontSlant::Oblique;
            }
            if traits.contains("Condensed") {
                descriptor.width = FontWidth::Condensed;
            }
        }
        descriptor
    }
}

/// Resolves descriptors to loaded faces.
pub trait FontLoader {
    /// Best face for `descriptor`, or `None` if no family matches.
    fn load(&self, descriptor: &FontDescriptor) -> Option<Arc<dyn FontFace>>;
}

/// An immutable, cheaply clonable font. Fonts compare equal by name.
#[derive(Clone)]
pub struct Font {
    name: String,
    descriptor: FontDescriptor,
    face: Arc<dyn FontFace>,
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name)
            .field("family", &self.descriptor.family)
            .finish()
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Font {}

impl std::hash::Hash for Font {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Font {
    /// Resolve `name` through `loader`.
    pub fn load(name: &str, loader: &dyn FontLoader) -> GraphicsResult<Self> {
        let descriptor = FontDescriptor::parse(name);
        let face = loader
            .load(&descriptor)
            .ok_or_else(|| GraphicsError::FontResolution {
                name: name.to_string(),
            })?;
        log::debug!(target: "silica::font", "resolved {name:?} to {:?}", face.full_name());
        Ok(Self::from_face(name, face))
    }

    /// Wrap an already loaded face under `name`.
    pub fn from_face(name: &str, face: Arc<dyn FontFace>) -> Self {
        Self {
            name: name.to_string(),
            descriptor: FontDescriptor::parse(name),
            face,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> &str {
        &self.descriptor.family
    }

    pub fn descriptor(&self) -> &FontDescriptor {
        &self.descriptor
    }

    pub fn face(&self) -> &dyn FontFace {
        self.face.as_ref()
    }

    /// Glyphs for each Unicode scalar of `text`.
    pub fn glyphs(&self, text: &str) -> Vec<GlyphId> {
        text.chars().map(|c| self.face.glyph_index(c)).collect()
    }

    /// Per-glyph advances in text space: `advance × size / unitsPerEm +
    /// spacing`, then mapped through `text_matrix`. Horizontal layout only.
    pub fn advances(
        &self,
        glyphs: &[GlyphId],
        font_size: f64,
        text_matrix: &AffineTransform,
        character_spacing: f64,
    ) -> Vec<Size> {
        let glyph_space_to_text_space = font_size / self.face.units_per_em() as f64;
        glyphs
            .iter()
            .map(|&glyph| {
                let width = self.face.advance(glyph) as f64 * glyph_space_to_text_space
                    + character_spacing;
                Size::new(width, 0.0).applying(text_matrix)
            })
            .collect()
    }

    /// Ascender scaled to `font_size`.
    pub fn ascender(&self, font_size: f64) -> f64 {
        self.face.ascent() as f64 * font_size / self.face.units_per_em() as f64
    }

    /// Descender scaled to `font_size`.
    pub fn descender(&self, font_size: f64) -> f64 {
        self.face.descent() as f64 * font_size / self.face.units_per_em() as f64
    }

    /// Width of `text` laid out on one line.
    pub fn single_line_width(
        &self,
        text: &str,
        font_size: f64,
        text_matrix: &AffineTransform,
    ) -> f64 {
        self.advances(&self.glyphs(text), font_size, text_matrix, 0.0)
            .iter()
            .map(|advance| advance.width)
            .sum()
    }
}

/// Glyph origins for a run of advances: a running sum starting at the origin,
/// each advance first mapped through `text_matrix`.
pub fn positions(advances: &[Size], text_matrix: &AffineTransform) -> Vec<Point> {
    let mut current = Point::ZERO;
    advances
        .iter()
        .map(|advance| {
            let position = current;
            current = current + advance.applying(text_matrix);
            position
        })
        .collect()
}

/// Fonts by full name, shared across contexts and threads.
///
/// Misses are resolved outside the lock; when two threads miss on the same
/// name concurrently the last insert wins, which is harmless because fonts
/// with the same name are equal.
pub struct FontCache<L> {
    loader: L,
    fonts: RwLock<HashMap<String, Font>>,
}

impl<L: FontLoader> FontCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            fonts: RwLock::new(HashMap::new()),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Cached font for `name`, loading it on a miss.
    pub fn get(&self, name: &str) -> GraphicsResult<Font> {
        if let Some(font) = self.read().get(name) {
            return Ok(font.clone());
        }
        let font = Font::load(name, &self.loader)?;
        self.write().insert(name.to_string(), font.clone());
        Ok(font)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Font>> {
        // Entries are inserted whole, so a poisoned map is still consistent.
        self.fonts.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Font>> {
        self.fonts.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Monospaced test face: every glyph advances `advance` units on a
    /// 1000-unit em and is a unit square outline.
    #[derive(Debug)]
    pub(crate) struct TestFace {
        pub advances: Vec<u16>,
    }

    impl FontFace for TestFace {
        fn units_per_em(&self) -> u16 {
            1000
        }

        fn ascent(&self) -> i16 {
            800
        }

        fn descent(&self) -> i16 {
            -200
        }

        fn glyph_index(&self, c: char) -> GlyphId {
            match c {
                'a'..='z' => (c as u32 - 'a' as u32 + 1) as GlyphId,
                _ => 0,
            }
        }

        fn advance(&self, glyph: GlyphId) -> u16 {
            self.advances
                .get(glyph as usize)
                .copied()
                .unwrap_or(500)
        }

        fn outline(&self, glyph: GlyphId, sink: &mut dyn OutlineSink) -> bool {
            if glyph == 0 {
                return false;
            }
            sink.move_to(0.0, 0.0);
            sink.line_to(500.0, 0.0);
            sink.line_to(500.0, 500.0);
            sink.close();
            true
        }
    }

    struct CountingLoader {
        loads: AtomicUsize,
    }

    impl FontLoader for CountingLoader {
        fn load(&self, descriptor: &FontDescriptor) -> Option<Arc<dyn FontFace>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            (descriptor.family == "Test").then(|| {
                Arc::new(TestFace {
                    advances: Vec::new(),
                }) as Arc<dyn FontFace>
            })
        }
    }

    fn test_font(advances: Vec<u16>) -> Font {
        Font::from_face("Test", Arc::new(TestFace { advances }))
    }

    #[test]
    fn test_parse_descriptor() {
        let plain = FontDescriptor::parse("Verdana");
        assert_eq!(plain.family, "Verdana");
        assert_eq!(plain.weight, FontWeight::Regular);
        assert_eq!(plain.slant, FontSlant::Roman);

        let bold_oblique = FontDescriptor::parse("Helvetica-BoldOblique");
        assert_eq!(bold_oblique.family, "Helvetica");
        assert_eq!(bold_oblique.weight, FontWeight::Bold);
        assert_eq!(bold_oblique.slant, FontSlant::Oblique);

        let condensed = FontDescriptor::parse("DejaVu Sans-Condensed-Italic");
        assert_eq!(condensed.family, "DejaVu Sans");
        assert_eq!(condensed.width, FontWidth::Condensed);
        assert_eq!(condensed.slant, FontSlant::Italic);

        let generic = FontDescriptor::parse("sans-serif");
        assert_eq!(generic.family, "sans-serif");
        assert_eq!(generic.weight, FontWeight::Regular);
        assert_eq!(FontDescriptor::parse("Sans-Serif").family, "Sans-Serif");
    }

    #[test]
    fn test_advances_and_positions() {
        // Glyphs 1, 2, 3 advance 2000, 3000, 4000 units at size 1 => 2, 3, 4.
        let font = test_font(vec![0, 2000, 3000, 4000]);
        let advances = font.advances(&[1, 2, 3], 1.0, &AffineTransform::IDENTITY, 0.0);
        assert_eq!(
            advances,
            vec![Size::new(2.0, 0.0), Size::new(3.0, 0.0), Size::new(4.0, 0.0)]
        );

        let positions = positions(&advances, &AffineTransform::IDENTITY);
        assert_eq!(
            positions,
            vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(5.0, 0.0)]
        );
        let total: f64 = advances.iter().map(|a| a.width).sum();
        assert_eq!(total, 9.0);
    }

    #[test]
    fn test_advances_spacing_and_matrix() {
        let font = test_font(vec![0, 500]);
        let advances = font.advances(&[1, 1], 20.0, &AffineTransform::scale(2.0, 1.0), 1.5);
        // (500 × 20 / 1000 + 1.5) × 2
        assert_eq!(advances[0], Size::new(23.0, 0.0));
        assert_eq!(font.ascender(20.0), 16.0);
        assert_eq!(font.descender(20.0), -4.0);
    }

    #[test]
    fn test_single_line_width() {
        let font = test_font(vec![0, 1000, 1000, 1000]);
        assert_eq!(font.single_line_width("abc", 10.0, &AffineTransform::IDENTITY), 30.0);
        assert_eq!(font.glyphs("ab?"), vec![1, 2, 0]);
    }

    #[test]
    fn test_font_cache_loads_once() {
        let cache = FontCache::new(CountingLoader {
            loads: AtomicUsize::new(0),
        });
        assert!(cache.is_empty());
        let first = cache.get("Test-Bold").unwrap();
        let second = cache.get("Test-Bold").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.family(), "Test");
        assert_eq!(cache.loader().loads.load(Ordering::SeqCst), 1);
        assert!(cache.contains("Test-Bold"));

        cache.clear();
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_font_cache_resolution_failure() {
        let cache = FontCache::new(CountingLoader {
            loads: AtomicUsize::new(0),
        });
        let err = cache.get("Nope-Italic").unwrap_err();
        assert!(matches!(err, GraphicsError::FontResolution { ref name } if name == "Nope-Italic"));
        assert!(!cache.contains("Nope-Italic"));
    }

    #[test]
    fn test_font_cache_concurrent_misses() {
        let cache = Arc::new(FontCache::new(CountingLoader {
            loads: AtomicUsize::new(0),
        }));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get("Test").unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().name(), "Test");
        }
        assert_eq!(cache.len(), 1);
    }
}
