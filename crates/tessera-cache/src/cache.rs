// Copyright 2026 tessera contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The cache subsystem's root context and the atlas eviction sweep.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tessera_core::{BundleHandle, TextureReclaim, UsageTracker};

use crate::entry::BundleInfo;
use crate::registry::AtlasRegistry;

/// The reserved name prefix under which bundles are treated as atlas
/// bundles.
pub const DEFAULT_ATLAS_NAMESPACE: &str = "atlas/";

/// Configuration of the cache subsystem.
#[derive(Debug, Clone)]
pub struct BundleCacheConfig {
    /// Bundle-name prefix that marks atlas bundles.
    pub atlas_namespace: String,
}

impl Default for BundleCacheConfig {
    fn default() -> Self {
        Self {
            atlas_namespace: DEFAULT_ATLAS_NAMESPACE.to_owned(),
        }
    }
}

/// The root context of the bundle cache subsystem.
///
/// Owns every [`BundleInfo`] entry (keyed by bundle name), the
/// [`AtlasRegistry`], and the shared backend seams. Higher-level asset
/// management goes through [`BundleCache::get_mut`] for per-entry
/// operations and calls [`BundleCache::unload_unused_atlases`] from its
/// memory-pressure or maintenance trigger.
pub struct BundleCache {
    entries: HashMap<String, BundleInfo>,
    registry: AtlasRegistry,
    textures: Arc<dyn TextureReclaim>,
    usage: Arc<dyn UsageTracker>,
    config: BundleCacheConfig,
}

impl BundleCache {
    /// Creates a cache with the default configuration.
    pub fn new(textures: Arc<dyn TextureReclaim>, usage: Arc<dyn UsageTracker>) -> Self {
        Self::with_config(textures, usage, BundleCacheConfig::default())
    }

    /// Creates a cache with an explicit configuration.
    pub fn with_config(
        textures: Arc<dyn TextureReclaim>,
        usage: Arc<dyn UsageTracker>,
        config: BundleCacheConfig,
    ) -> Self {
        Self {
            entries: HashMap::new(),
            registry: AtlasRegistry::new(),
            textures,
            usage,
            config,
        }
    }

    /// Installs a freshly loaded container handle under `name`.
    ///
    /// Reuses the existing entry when the name is already known, so
    /// reference bookkeeping persists across handle generations; otherwise
    /// creates one. Entries whose atlas list materialized are registered
    /// with the atlas registry (idempotently).
    pub fn insert(&mut self, name: &str, handle: Box<dyn BundleHandle>) -> &mut BundleInfo {
        let entry = self.entries.entry(name.to_owned()).or_insert_with(|| {
            BundleInfo::new(
                name,
                name.starts_with(&self.config.atlas_namespace),
                Arc::clone(&self.textures),
            )
        });
        if entry.load(handle) {
            self.registry.register(name);
        }
        entry
    }

    /// Looks up an entry by bundle name.
    pub fn get(&self, name: &str) -> Option<&BundleInfo> {
        self.entries.get(name)
    }

    /// Looks up an entry by bundle name for mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut BundleInfo> {
        self.entries.get_mut(name)
    }

    /// Unloads and removes an entry entirely.
    ///
    /// Guarded the same way as [`BundleInfo::unload`]: refuses (and keeps
    /// the entry) while anything is in flight or referencing it. Returns
    /// `true` once the entry is gone.
    pub fn remove(&mut self, name: &str, unload_all: bool) -> bool {
        let Some(entry) = self.entries.get_mut(name) else {
            return false;
        };
        if !entry.unload(unload_all) {
            return false;
        }
        self.entries.remove(name);
        true
    }

    /// Number of entries currently tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no bundle has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The atlas registry, in registration order.
    pub fn atlas_registry(&self) -> &AtlasRegistry {
        &self.registry
    }

    /// One atlas eviction sweep.
    ///
    /// With `unload_all` set, every registered entry gets an unconditional
    /// [`BundleInfo::unload_atlas`] (a forced full sweep, bypassing the
    /// usage query). Otherwise the external usage tracker is consulted once
    /// and only entries whose `atlas_name` is currently unused are swept,
    /// each texture name at most once per pass: several bundles can share
    /// one underlying texture, and the first entry already freed it.
    ///
    /// Entries that refuse (busy, no atlas) are skipped; the sweep always
    /// completes.
    pub fn unload_unused_atlases(&mut self, unload_all: bool) {
        if unload_all {
            for name in self.registry.iter() {
                let Some(entry) = self.entries.get_mut(name) else {
                    continue;
                };
                if !entry.unload_atlas() {
                    log::debug!("forced atlas sweep skipped busy bundle '{name}'");
                }
            }
            return;
        }

        let unused = self.usage.unused_texture_names();
        let mut handled: HashSet<String> = HashSet::new();
        for name in self.registry.iter() {
            let Some(entry) = self.entries.get_mut(name) else {
                continue;
            };
            let Some(atlas_name) = entry.atlas_name() else {
                continue;
            };
            if !unused.contains(atlas_name) || handled.contains(atlas_name) {
                continue;
            }
            let atlas_name = atlas_name.to_owned();
            if !entry.unload_atlas() {
                log::debug!("atlas sweep skipped busy bundle '{name}'");
            }
            handled.insert(atlas_name);
        }
    }
}
