//! Cache for assembled shader sources.
//!
//! Entries are keyed by a caller-chosen name and invalidated when the fingerprint of the
//! [`ShaderRequest`] changes, so a program only needs recompiling when its source did.
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use tracing::debug;

use super::assembler::ShaderAssembler;
use super::request::ShaderRequest;
use crate::error::{Error, Result};

struct SourceEntry {
    source: String,
    fingerprint: u64,
}

/// Source returned by [`ShaderCache::get_or_assemble`].
#[derive(Clone, Copy, Debug)]
pub struct CachedSource<'a> {
    pub source: &'a str,
    /// `true` when the source was (re)assembled by this call and must be recompiled.
    pub rebuilt: bool,
}

/// Assembled sources keyed by name, invalidated by request fingerprint.
#[derive(Default)]
pub struct ShaderCache {
    entries: HashMap<String, SourceEntry>,
}

impl ShaderCache {
    /// Creates a new, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached source for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.source.as_str())
    }

    /// Whether `request` differs from what is cached under `key`.
    pub fn needs_rebuild(&self, key: &str, request: &ShaderRequest) -> bool {
        match self.entries.get(key) {
            Some(entry) => entry.fingerprint != fingerprint(request),
            None => true,
        }
    }

    /// Returns the source for `key`, assembling it when missing or stale.
    pub fn get_or_assemble<'a>(
        &'a mut self,
        key: &str,
        request: &ShaderRequest,
    ) -> Result<CachedSource<'a>> {
        let fp = fingerprint(request);
        let rebuilt = match self.entries.get(key) {
            Some(entry) => entry.fingerprint != fp,
            None => true,
        };

        if rebuilt {
            let source = ShaderAssembler::try_assemble(request)?;
            debug!("Shader '{}' reassembled.", key);
            self.entries.insert(
                key.to_string(),
                SourceEntry {
                    source,
                    fingerprint: fp,
                },
            );
        }

        match self.entries.get(key) {
            Some(entry) => Ok(CachedSource {
                source: &entry.source,
                rebuilt,
            }),
            None => Err(Error::Other("Entry missing after insert".to_string())),
        }
    }

    /// Removes the entry for `key`, returning its source.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key).map(|e| e.source)
    }

    /// Clears all entries from the cache.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached shaders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn fingerprint(request: &ShaderRequest) -> u64 {
    let mut hasher = DefaultHasher::new();

    for fragment in [
        &request.variables,
        &request.geometries,
        &request.preface,
        &request.scene,
        &request.lighting,
        &request.postprocessing,
    ] {
        fragment.hash(&mut hasher);
    }
    request.steps.hash(&mut hasher);
    request.min_distance.to_bits().hash(&mut hasher);
    request.max_distance.to_bits().hash(&mut hasher);
    match request.background {
        Some(bg) => {
            1u8.hash(&mut hasher);
            for c in bg {
                c.to_bits().hash(&mut hasher);
            }
        }
        None => 0u8.hash(&mut hasher),
    }

    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere() -> ShaderRequest {
        ShaderRequest::new("vec2( length( p ) - 1., 0. )")
    }

    #[test]
    fn caches_and_returns_assembled_sources() {
        let mut cache = ShaderCache::new();
        let first = cache.get_or_assemble("main", &sphere()).expect("assembles");
        assert!(first.rebuilt);
        let expected = ShaderAssembler::assemble(&sphere());
        assert_eq!(first.source, expected);

        let second = cache.get_or_assemble("main", &sphere()).expect("cached");
        assert!(!second.rebuilt);
        assert!(!cache.needs_rebuild("main", &sphere()));

        assert!(cache.remove("main").is_some());
        assert!(cache.get("main").is_none());
    }

    #[test]
    fn rebuilds_when_request_changes() {
        let mut cache = ShaderCache::new();
        cache.get_or_assemble("main", &sphere()).expect("assembles");

        let changed = sphere().with_steps(64);
        assert!(cache.needs_rebuild("main", &changed));
        let entry = cache.get_or_assemble("main", &changed).expect("reassembles");
        assert!(entry.rebuilt);
        assert!(entry.source.contains("i < 64;"));
    }

    #[test]
    fn invalid_requests_are_not_cached() {
        let mut cache = ShaderCache::new();
        assert!(cache
            .get_or_assemble("main", &sphere().with_min_distance(-1.0))
            .is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_removes_all_entries() {
        let mut cache = ShaderCache::new();
        cache.get_or_assemble("a", &sphere()).expect("a");
        cache.get_or_assemble("b", &sphere()).expect("b");
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }
}
