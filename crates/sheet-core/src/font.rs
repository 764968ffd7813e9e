//! Font resolution
//!
//! Tries a list of TrueType/OpenType files in order and falls back to a tiny
//! built-in bitmap face, so resolution never fails. Only label glyphs change
//! between environments; geometry does not depend on the face.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::FontVec;

/// Font files probed when no explicit path matches
pub const DEFAULT_FONT_PATHS: &[&str] = &[
    "arial.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "C:\\Windows\\Fonts\\msjh.ttc",
    "C:\\Windows\\Fonts\\arial.ttf",
    "/System/Library/Fonts/PingFang.ttc",
    "/Library/Fonts/Arial.ttf",
];

/// Loaded glyph source
#[derive(Clone)]
pub enum Typeface {
    /// Outline font parsed by ab_glyph
    TrueType(Arc<FontVec>),
    /// 5x7 bitmap glyphs for digits, `A`-`E` and `:`
    Builtin,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Typeface::TrueType(_) => f.write_str("TrueType"),
            Typeface::Builtin => f.write_str("Builtin"),
        }
    }
}

impl Typeface {
    pub fn is_builtin(&self) -> bool {
        matches!(self, Typeface::Builtin)
    }
}

/// A typeface at a pixel size
#[derive(Debug, Clone)]
pub struct SheetFont {
    pub typeface: Typeface,
    pub size: f32,
}

/// Resolves the sheet's typeface from candidate files or raw bytes
#[derive(Debug, Clone)]
pub struct FontResolver {
    paths: Vec<PathBuf>,
    bytes: Option<Vec<u8>>,
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FontResolver {
    /// `extra_paths` are probed before [`DEFAULT_FONT_PATHS`]
    pub fn new(extra_paths: Vec<PathBuf>) -> Self {
        let mut paths = extra_paths;
        paths.extend(DEFAULT_FONT_PATHS.iter().map(PathBuf::from));
        Self { paths, bytes: None }
    }

    /// Probe exactly these paths, without the defaults
    pub fn only(paths: Vec<PathBuf>) -> Self {
        Self { paths, bytes: None }
    }

    /// Use in-memory font data (browsers have no font files to probe)
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            paths: Vec::new(),
            bytes: Some(bytes),
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// First loadable typeface, else the built-in one
    pub fn resolve(&self) -> Typeface {
        if let Some(bytes) = &self.bytes {
            match FontVec::try_from_vec(bytes.clone()) {
                Ok(font) => {
                    log::debug!("Using in-memory font ({} bytes)", bytes.len());
                    return Typeface::TrueType(Arc::new(font));
                }
                Err(e) => log::debug!("In-memory font rejected: {}", e),
            }
        }

        for path in &self.paths {
            if let Some(font) = load_font_file(path) {
                log::debug!("Using font {:?}", path);
                return Typeface::TrueType(Arc::new(font));
            }
        }

        log::warn!("No usable font file found, falling back to built-in glyphs");
        Typeface::Builtin
    }
}

fn load_font_file(path: &Path) -> Option<FontVec> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            log::debug!("Font {:?} unavailable: {}", path, e);
            return None;
        }
    };
    match FontVec::try_from_vec(data) {
        Ok(font) => Some(font),
        Err(e) => {
            log::debug!("Font {:?} not parseable: {}", path, e);
            None
        }
    }
}

/// Rows of a built-in glyph, bit 4 is the leftmost column
pub type GlyphRows = [u8; 7];

pub const BUILTIN_GLYPH_W: u32 = 5;

/// Bitmap for `ch`, if the built-in face has it
pub fn builtin_glyph(ch: char) -> Option<&'static GlyphRows> {
    let glyph: &'static GlyphRows = match ch {
        '0' => &[0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => &[0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => &[0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => &[0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => &[0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => &[0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => &[0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => &[0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => &[0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => &[0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => &[0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => &[0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => &[0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => &[0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => &[0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        ':' => &[0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        _ => return None,
    };
    Some(glyph)
}

/// Integer cell scale of the built-in face for a pixel size
pub fn builtin_scale(size: f32) -> u32 {
    ((size / 10.0).round() as u32).max(1)
}
