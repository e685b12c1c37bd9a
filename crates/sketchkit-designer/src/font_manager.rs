//! Font lookup and text measurement.
//!
//! Faces come from the system font database (`fontdb`) or an explicit font
//! file and are parsed once with `rusttype`; parsed fonts live for the rest
//! of the process so every surface and the editor measure text identically.

use crate::model::TextMetrics;
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::{point as rt_point, Font, Scale};
use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
    sync::{Mutex, OnceLock},
};

/// Average advance, in em, assumed when no font could be loaded.
const FALLBACK_ADVANCE_EM: f64 = 0.6;

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

fn cache() -> &'static Mutex<HashMap<String, Option<&'static Font<'static>>>> {
    static CACHE: OnceLock<Mutex<HashMap<String, Option<&'static Font<'static>>>>> =
        OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn cached(key: String, load: impl FnOnce() -> Option<Font<'static>>) -> Option<&'static Font<'static>> {
    if let Some(font) = cache().lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
        return *font;
    }

    let font_ref: Option<&'static Font<'static>> = load().map(|f| &*Box::leak(Box::new(f)));
    if font_ref.is_none() {
        tracing::warn!("No usable font for '{}', text will be measured approximately", key);
    }
    cache()
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(key, font_ref);
    font_ref
}

pub fn list_font_families() -> Vec<String> {
    let mut set = HashSet::new();
    for face in db().faces() {
        for (name, _) in &face.families {
            set.insert(name.clone());
        }
    }
    let mut out: Vec<_> = set.into_iter().collect();
    out.sort();
    out
}

/// Looks up a system font by family name. `""` and `"Sans"` select the
/// default sans-serif face.
pub fn get_font_for(family: &str) -> Option<&'static Font<'static>> {
    cached(format!("family:{}", family), || load_font_from_system(family))
}

/// Loads a font from a file path.
pub fn get_font_from_file(path: &Path) -> Option<&'static Font<'static>> {
    cached(format!("file:{}", path.display()), || {
        let bytes = fs::read(path).ok()?;
        Font::try_from_vec(bytes)
    })
}

fn load_font_from_system(family: &str) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "Sans" => vec![Family::SansSerif],
        "Serif" => vec![Family::Serif],
        "Monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other), Family::SansSerif],
    };

    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => Font::try_from_vec(fs::read(path).ok()?),
        fontdb::Source::SharedFile(path, _) => Font::try_from_vec(fs::read(path).ok()?),
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}

/// Text measurement shared by the renderers and the editor's hit-testing.
#[derive(Clone, Copy, Default)]
pub struct FontMetrics {
    font: Option<&'static Font<'static>>,
}

impl FontMetrics {
    /// Default sans-serif system face.
    pub fn system() -> Self {
        Self::for_family("")
    }

    pub fn for_family(family: &str) -> Self {
        Self {
            font: get_font_for(family),
        }
    }

    pub fn from_font(font: Option<&'static Font<'static>>) -> Self {
        Self { font }
    }

    /// Metrics with no font: every glyph advances by a fixed fraction of the
    /// font size.
    pub fn approximate() -> Self {
        Self { font: None }
    }

    pub fn font(&self) -> Option<&'static Font<'static>> {
        self.font
    }
}

impl std::fmt::Debug for FontMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontMetrics")
            .field("loaded", &self.font.is_some())
            .finish()
    }
}

impl TextMetrics for FontMetrics {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        let Some(font) = self.font else {
            return text.chars().count() as f64 * font_size * FALLBACK_ADVANCE_EM;
        };
        let scale = Scale::uniform(font_size as f32);
        font.layout(text, scale, rt_point(0.0, 0.0))
            .last()
            .map(|g| f64::from(g.position().x + g.unpositioned().h_metrics().advance_width))
            .unwrap_or(0.0)
    }
}
