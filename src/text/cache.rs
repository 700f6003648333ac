use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};

use crate::{
    foundation::error::{CartridgeError, CartridgeResult},
    text::{
        font::{Font, FontDescriptor, FontFace, FontStyle},
        source::{FontDirectory, FontSource, SystemFonts},
    },
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct VariantKey {
    name: String,
    style: FontStyle,
    size_bits: u32,
}

/// Process-wide font cache.
///
/// Faces are keyed by logical name and style and loaded at most once per key from the first
/// [`FontSource`] that knows the name, so `BOLD` and `ITALIC` resolve to the dedicated faces
/// where a source has them. Sized variants are keyed by name, style and size. Two threads
/// racing on a cold key may both load it, the last insert wins and both results are
/// equivalent.
pub struct FontCache {
    sources: Vec<Box<dyn FontSource>>,
    faces: RwLock<HashMap<(String, FontStyle), Arc<dyn FontFace>>>,
    variants: RwLock<HashMap<VariantKey, Font>>,
}

impl FontCache {
    /// Cache resolving names against `sources`, in order.
    pub fn new(sources: Vec<Box<dyn FontSource>>) -> Self {
        Self {
            sources,
            faces: RwLock::new(HashMap::new()),
            variants: RwLock::new(HashMap::new()),
        }
    }

    /// Cache backed by the installed system fonts only.
    pub fn system() -> Self {
        Self::new(vec![Box::new(SystemFonts::load())])
    }

    /// Cache that looks in `dir` first and then in the installed system fonts.
    pub fn with_directory(dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(vec![
            Box::new(FontDirectory::new(dir)),
            Box::new(SystemFonts::load()),
        ])
    }

    /// Append another source, consulted after the existing ones.
    pub fn push_source(&mut self, source: impl FontSource + 'static) {
        self.sources.push(Box::new(source));
    }

    /// Face registered under `name` for `style`.
    pub fn face(&self, name: &str, style: FontStyle) -> CartridgeResult<Arc<dyn FontFace>> {
        let key = (name.to_string(), style);
        if let Some(face) = read_lock(&self.faces)?.get(&key) {
            return Ok(face.clone());
        }

        let mut loaded = None;
        for source in &self.sources {
            if let Some(face) = source.load(name, style)? {
                loaded = Some(face);
                break;
            }
        }
        let face = loaded
            .ok_or_else(|| CartridgeError::configuration(format!("font '{name}' not found")))?;

        tracing::debug!(font = name, ?style, family = face.family_name(), "cached font face");
        write_lock(&self.faces)?.insert(key, face.clone());
        Ok(face)
    }

    /// Face `name` bound to `style` and `size`.
    pub fn font(&self, name: &str, style: FontStyle, size: f32) -> CartridgeResult<Font> {
        if !size.is_finite() || size <= 0.0 {
            return Err(CartridgeError::configuration(format!(
                "font '{name}' size must be finite and > 0, got {size}"
            )));
        }

        let key = VariantKey {
            name: name.to_string(),
            style,
            size_bits: size.to_bits(),
        };
        if let Some(font) = read_lock(&self.variants)?.get(&key) {
            return Ok(font.clone());
        }

        let font = Font::new(self.face(name, style)?, style, size);
        write_lock(&self.variants)?.insert(key, font.clone());
        Ok(font)
    }

    /// Font a descriptor asks for, at its base size.
    pub fn resolve(&self, descriptor: &FontDescriptor) -> CartridgeResult<Font> {
        self.font(&descriptor.name, descriptor.style, descriptor.size)
    }

    /// Number of cached (name, style) faces.
    pub fn face_count(&self) -> usize {
        self.faces.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Number of cached sized variants.
    pub fn variant_count(&self) -> usize {
        self.variants.read().map(|m| m.len()).unwrap_or(0)
    }
}

impl fmt::Debug for FontCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCache")
            .field("sources", &self.sources.len())
            .field("faces", &self.face_count())
            .field("variants", &self.variant_count())
            .finish()
    }
}

pub(crate) fn read_lock<T>(
    lock: &RwLock<T>,
) -> CartridgeResult<std::sync::RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| anyhow::anyhow!("cache lock poisoned").into())
}

pub(crate) fn write_lock<T>(
    lock: &RwLock<T>,
) -> CartridgeResult<std::sync::RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| anyhow::anyhow!("cache lock poisoned").into())
}

#[cfg(test)]
#[path = "../../tests/unit/text/cache.rs"]
mod tests;
