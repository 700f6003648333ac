use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    foundation::error::{CartridgeError, CartridgeResult},
    text::font::{FontFace, FontStyle, OutlineFace},
};

/// Where font faces come from.
///
/// `Ok(None)` means "not here, try the next source"; errors abort the lookup.
pub trait FontSource: Send + Sync {
    /// Load the face registered under the logical `name` that best matches `style`.
    ///
    /// A source without a dedicated bold or italic face may return the regular one; the
    /// renderer then synthesizes the missing style.
    fn load(&self, name: &str, style: FontStyle) -> CartridgeResult<Option<Arc<dyn FontFace>>>;
}

/// Font files in a directory, addressed as `<root>/<name>.ttf`.
///
/// Styled requests look for `<name>-Bold.ttf`, `<name>-Italic.ttf` (or `-Oblique`) and
/// `<name>-BoldItalic.ttf` (or `-BoldOblique`) before the regular file. Names that already
/// carry a `ttf`, `otf` or `ttc` extension are used as-is for every style.
#[derive(Clone, Debug)]
pub struct FontDirectory {
    root: PathBuf,
}

impl FontDirectory {
    /// Font directory rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path a logical font name maps to.
    pub fn path_for(&self, name: &str) -> CartridgeResult<PathBuf> {
        let rel = normalize_font_name(name)?;
        let file = if has_font_extension(&rel) {
            rel
        } else {
            format!("{rel}.ttf")
        };
        Ok(self.root.join(file))
    }

    /// Candidate paths for `name` in `style`, most specific first.
    pub fn candidates(&self, name: &str, style: FontStyle) -> CartridgeResult<Vec<PathBuf>> {
        let plain = self.path_for(name)?;
        let rel = normalize_font_name(name)?;
        if has_font_extension(&rel) {
            return Ok(vec![plain]);
        }

        let suffixes: &[&str] = match (style.is_bold(), style.is_italic()) {
            (false, false) => &[],
            (true, false) => &["Bold"],
            (false, true) => &["Italic", "Oblique"],
            (true, true) => &["BoldItalic", "BoldOblique"],
        };
        let mut out: Vec<PathBuf> = suffixes
            .iter()
            .map(|suffix| self.root.join(format!("{rel}-{suffix}.ttf")))
            .collect();
        out.push(plain);
        Ok(out)
    }
}

fn has_font_extension(rel: &str) -> bool {
    Path::new(rel)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
}

impl FontSource for FontDirectory {
    fn load(&self, name: &str, style: FontStyle) -> CartridgeResult<Option<Arc<dyn FontFace>>> {
        let Some(path) = self
            .candidates(name, style)?
            .into_iter()
            .find(|p| p.is_file())
        else {
            return Ok(None);
        };
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        let face = OutlineFace::from_bytes(bytes, 0).map_err(|e| {
            CartridgeError::configuration(format!("font '{}': {e}", path.display()))
        })?;
        tracing::debug!(font = name, ?style, path = %path.display(), "loaded font file");
        Ok(Some(Arc::new(face)))
    }
}

/// Fonts installed on the host, resolved through `fontdb`.
///
/// Bold requests query weight 700 and italic requests the italic (else oblique) face of the
/// family. Generic names (`serif`, `sans-serif`, `monospace`, ...) fall back to the first
/// installed face when the generic family is not configured.
pub struct SystemFonts {
    db: usvg::fontdb::Database,
}

impl SystemFonts {
    /// Scan the system font directories.
    pub fn load() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "scanned system fonts");
        Self { db }
    }

    /// Wrap an already populated database.
    pub fn from_database(db: usvg::fontdb::Database) -> Self {
        Self { db }
    }

    /// Whether no face was found at all.
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

impl fmt::Debug for SystemFonts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemFonts")
            .field("faces", &self.db.len())
            .finish()
    }
}

impl FontSource for SystemFonts {
    fn load(&self, name: &str, style: FontStyle) -> CartridgeResult<Option<Arc<dyn FontFace>>> {
        use usvg::fontdb::{Family, Query, Stretch, Style, Weight};

        let lower = name.trim().to_ascii_lowercase();
        let (family, generic) = match lower.as_str() {
            "serif" => (Family::Serif, true),
            "sans-serif" | "sansserif" | "sans" | "dialog" => (Family::SansSerif, true),
            "monospace" | "monospaced" | "mono" => (Family::Monospace, true),
            "cursive" => (Family::Cursive, true),
            "fantasy" => (Family::Fantasy, true),
            _ => (Family::Name(name.trim()), false),
        };

        let families = [family];
        let query = Query {
            families: &families,
            weight: if style.is_bold() {
                Weight::BOLD
            } else {
                Weight::NORMAL
            },
            stretch: Stretch::Normal,
            style: if style.is_italic() {
                Style::Italic
            } else {
                Style::Normal
            },
        };

        let id = match self.db.query(&query) {
            Some(id) => id,
            None if generic => match self.db.faces().next() {
                Some(face) => face.id,
                None => return Ok(None),
            },
            None => return Ok(None),
        };

        let Some((bytes, index)) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))
        else {
            return Ok(None);
        };

        let face = OutlineFace::from_bytes(bytes, index)
            .map_err(|e| CartridgeError::configuration(format!("system font '{name}': {e}")))?;
        tracing::debug!(font = name, ?style, family = face.family_name(), "loaded system font");
        Ok(Some(Arc::new(face)))
    }
}

/// Normalize a logical font name into a relative file name.
///
/// Uses `/` separators, drops `.` segments and rejects absolute names or `..`.
pub fn normalize_font_name(name: &str) -> CartridgeResult<String> {
    let s = name.trim().replace('\\', "/");
    if s.starts_with('/') {
        return Err(CartridgeError::configuration(
            "font names must be relative",
        ));
    }
    if s.is_empty() {
        return Err(CartridgeError::configuration("font name must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(CartridgeError::configuration(
                "font names must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(CartridgeError::configuration(
            "font name must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/text/source.rs"]
mod tests;
