use crate::font::FontdbLoader;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Font sources for a [`FontdbLoader`] plus the concrete families that stand
/// in for `serif`, `sans-serif` and the other generic names.
///
/// Nothing is scanned until [`FontConfig::resolve`] runs.
#[derive(Clone, Debug)]
pub struct FontConfig {
    /// In-memory fonts registered after system and directory fonts.
    pub custom_fonts: Vec<CustomFont>,
    pub generic_families: GenericFamilyMap,
    /// Scan the platform font directories. On by default.
    pub load_system_fonts: bool,
    /// Extra directories scanned recursively.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            custom_fonts: Vec::new(),
            generic_families: GenericFamilyMap::defaults(),
            load_system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

/// Font file bytes (TTF, OTF or a TTC collection).
#[derive(Clone, Debug)]
pub struct CustomFont {
    pub data: Arc<Vec<u8>>,
    /// Family every face in `data` is registered under. `None` keeps the
    /// families from the name table.
    pub family_name: Option<String>,
}

/// Candidate families for each generic name, most preferred first.
#[derive(Clone, Debug, Default)]
pub struct GenericFamilyMap {
    pub serif: Vec<String>,
    pub sans_serif: Vec<String>,
    pub monospace: Vec<String>,
    pub cursive: Vec<String>,
    pub fantasy: Vec<String>,
}

fn families(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl GenericFamilyMap {
    /// Default preference lists, covering the usual macOS, Windows and
    /// Linux families.
    pub fn defaults() -> Self {
        Self {
            sans_serif: families(&["Helvetica", "Arial", "Liberation Sans", "DejaVu Sans"]),
            monospace: families(&["Courier", "Courier New", "Liberation Mono", "DejaVu Sans Mono"]),
            serif: families(&["Times", "Times New Roman", "Liberation Serif", "DejaVu Serif"]),
            cursive: families(&["Apple Chancery", "Comic Sans MS"]),
            fantasy: families(&["Papyrus", "Impact"]),
        }
    }

    /// The first family of `candidates` present in `available`.
    fn pick<'a>(candidates: &'a [String], available: &HashSet<String>) -> Option<&'a str> {
        candidates
            .iter()
            .find(|family| available.contains(*family))
            .map(String::as_str)
    }
}

impl FontConfig {
    /// Config that loads nothing but `fonts`.
    pub fn with_fonts_only(fonts: Vec<CustomFont>) -> Self {
        Self {
            custom_fonts: fonts,
            load_system_fonts: false,
            ..Self::default()
        }
    }

    /// Scan and register every configured source, then wrap the database in a
    /// loader. Call once and share the loader; clones share the database.
    pub fn resolve(&self) -> FontdbLoader {
        FontdbLoader::new(font_config_to_fontdb(self))
    }
}

/// Build the face database described by `config`.
pub fn font_config_to_fontdb(config: &FontConfig) -> fontdb::Database {
    let mut db = fontdb::Database::new();

    if config.load_system_fonts {
        db.load_system_fonts();
    }
    for dir in &config.font_dirs {
        db.load_fonts_dir(dir);
    }
    for font in &config.custom_fonts {
        let ids = db.load_font_source(fontdb::Source::Binary(font.data.clone()));
        if let Some(family) = &font.family_name {
            rename_faces(&mut db, &ids, family);
        }
    }

    set_generic_families(&mut db, &config.generic_families);

    log::debug!(target: "silica::font", "font database holds {} faces", db.len());
    db
}

/// Re-register the faces `ids` under `family`.
fn rename_faces(db: &mut fontdb::Database, ids: &[fontdb::ID], family: &str) {
    for id in ids {
        let Some(mut info) = db.face(*id).cloned() else {
            continue;
        };
        db.remove_face(*id);
        info.families = vec![(family.to_string(), fontdb::Language::English_UnitedStates)];
        db.push_face_info(info);
    }
}

/// Point each generic name at its first installed candidate. Generic names
/// with no installed candidate keep fontdb's default.
fn set_generic_families(db: &mut fontdb::Database, generic: &GenericFamilyMap) {
    let installed: HashSet<String> = db
        .faces()
        .flat_map(|face| face.families.iter().map(|(family, _)| family.clone()))
        .collect();

    let slots: [(&str, &[String], fn(&mut fontdb::Database, &str)); 5] = [
        ("sans-serif", &generic.sans_serif, |db, family| db.set_sans_serif_family(family)),
        ("serif", &generic.serif, |db, family| db.set_serif_family(family)),
        ("monospace", &generic.monospace, |db, family| db.set_monospace_family(family)),
        ("cursive", &generic.cursive, |db, family| db.set_cursive_family(family)),
        ("fantasy", &generic.fantasy, |db, family| db.set_fantasy_family(family)),
    ];
    for (name, candidates, set) in slots {
        if let Some(family) = GenericFamilyMap::pick(candidates, &installed) {
            log::trace!(target: "silica::font", "{name} -> {family}");
            set(db, family);
        }
    }
}
