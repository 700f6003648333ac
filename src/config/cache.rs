use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::{
    config::{request::ConfigurationRequest, resolved::ResolvedConfiguration},
    foundation::error::CartridgeResult,
    text::cache::{FontCache, read_lock, write_lock},
};

/// Process-wide memo of resolved configurations, keyed by request value.
///
/// A cold request resolved concurrently by two threads is resolved twice; the second insert
/// replaces an equivalent entry.
#[derive(Debug, Default)]
pub struct ConfigurationCache {
    entries: RwLock<HashMap<ConfigurationRequest, Arc<ResolvedConfiguration>>>,
}

impl ConfigurationCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolved form of `request`, resolving and caching it on first use.
    pub fn get_or_resolve(
        &self,
        request: &ConfigurationRequest,
        fonts: &FontCache,
    ) -> CartridgeResult<Arc<ResolvedConfiguration>> {
        if let Some(hit) = read_lock(&self.entries)?.get(request) {
            return Ok(hit.clone());
        }

        let resolved = Arc::new(ResolvedConfiguration::resolve(request, fonts)?);
        tracing::debug!("cached resolved configuration");
        write_lock(&self.entries)?.insert(request.clone(), resolved.clone());
        Ok(resolved)
    }

    /// Number of cached configurations.
    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Whether nothing is cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
