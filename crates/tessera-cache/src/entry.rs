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

//! The reference-counted wrapper around one loaded bundle container.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tessera_core::{asset_stem, AssetKind, Atlas, BundleHandle, SharedAsset, TextureReclaim};

/// One cache entry: a bundle name, its (optional) live container handle,
/// and the bookkeeping that gates every release decision.
///
/// The entry outlives individual handle generations on purpose: after a
/// guarded [`BundleInfo::unload`], the same entry can receive a fresh handle
/// via [`BundleInfo::load`] while its name and reference bookkeeping
/// persist.
pub struct BundleInfo {
    name: String,
    /// `true` if the bundle name falls under the atlas namespace.
    atlas_bundle: bool,
    handle: Option<Box<dyn BundleHandle>>,
    /// In-flight async operations interested in this entry. Shared with
    /// [`LoadingScope`] guards so the marker survives across suspension
    /// points without borrowing the entry.
    loading: Arc<AtomicU32>,
    /// Referencing-asset path -> how many times it took a reference.
    /// Re-entrant references coalesce into one key.
    ref_bundles: HashMap<String, u32>,
    only_asset: Option<SharedAsset>,
    asset_list: Option<Vec<SharedAsset>>,
    atlas_list: Option<Vec<Atlas>>,
    atlas_name: Option<String>,
    textures: Arc<dyn TextureReclaim>,
}

impl BundleInfo {
    /// Creates an entry for `name` with no handle installed yet.
    ///
    /// `atlas_bundle` marks whether the name falls under the atlas
    /// namespace; the [`crate::BundleCache`] computes it from its
    /// configuration.
    pub fn new(
        name: impl Into<String>,
        atlas_bundle: bool,
        textures: Arc<dyn TextureReclaim>,
    ) -> Self {
        Self {
            name: name.into(),
            atlas_bundle,
            handle: None,
            loading: Arc::new(AtomicU32::new(0)),
            ref_bundles: HashMap::new(),
            only_asset: None,
            asset_list: None,
            atlas_list: None,
            atlas_name: None,
            textures,
        }
    }

    /// The bundle name (unique, immutable key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` while a container handle is installed.
    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    /// The primary-texture name recorded during atlas materialization.
    pub fn atlas_name(&self) -> Option<&str> {
        self.atlas_name.as_deref()
    }

    /// The materialized atlas descriptors, if this is an atlas bundle that
    /// completed materialization.
    pub fn atlas_list(&self) -> Option<&[Atlas]> {
        self.atlas_list.as_deref()
    }

    // --- in-flight operation markers -------------------------------------

    /// Number of in-flight operations currently registered on this entry.
    pub fn loading_count(&self) -> u32 {
        self.loading.load(Ordering::Relaxed)
    }

    /// Registers one in-flight operation.
    ///
    /// Callers are responsible for balancing this with
    /// [`BundleInfo::del_loading_count`] on every exit path; prefer
    /// [`BundleInfo::loading_scope`] which cannot leak the marker.
    pub fn add_loading_count(&self) {
        self.loading.fetch_add(1, Ordering::Relaxed);
    }

    /// Unregisters one in-flight operation.
    pub fn del_loading_count(&self) {
        decrement_loading(&self.loading, &self.name);
    }

    /// Registers an in-flight operation for the lifetime of the returned
    /// guard. Dropping the guard, on any path including cancellation,
    /// unregisters exactly once.
    #[must_use = "dropping the scope immediately unregisters the marker"]
    pub fn loading_scope(&self) -> LoadingScope {
        self.loading.fetch_add(1, Ordering::Relaxed);
        LoadingScope {
            loading: Arc::clone(&self.loading),
            bundle: self.name.clone(),
        }
    }

    // --- per-asset references --------------------------------------------

    /// Number of distinct asset paths holding a reference (not the sum of
    /// their counts).
    pub fn ref_count(&self) -> usize {
        self.ref_bundles.len()
    }

    /// Records that `asset_path` depends on this bundle.
    pub fn add_ref(&mut self, asset_path: &str) {
        *self.ref_bundles.entry(asset_path.to_owned()).or_insert(0) += 1;
    }

    /// Releases one reference held by `asset_path`. The key disappears when
    /// its count reaches zero; releasing an absent key is tolerated so
    /// reordered async completions cannot wedge the cache, but is surfaced
    /// on the diagnostic channel.
    pub fn del_ref(&mut self, asset_path: &str) {
        match self.ref_bundles.get_mut(asset_path) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.ref_bundles.remove(asset_path);
            }
            None => {
                log::debug!(
                    "del_ref('{}') without matching add_ref on bundle '{}'",
                    asset_path,
                    self.name
                );
            }
        }
    }

    // --- handle lifecycle -------------------------------------------------

    /// Installs a fresh container handle and, for atlas bundles,
    /// materializes the atlas list immediately.
    ///
    /// Returns `true` when atlas materialization ran, so the owning cache
    /// can register the entry with the atlas registry.
    pub fn load(&mut self, handle: Box<dyn BundleHandle>) -> bool {
        self.handle = Some(handle);
        self.load_atlas()
    }

    /// Enumerates the container's top-level objects and collects the atlas
    /// component of each. Runs only for atlas bundles with a live handle.
    ///
    /// The recorded [`BundleInfo::atlas_name`] is the primary-texture name
    /// of the first atlas whose primary texture is present.
    fn load_atlas(&mut self) -> bool {
        if !self.atlas_bundle {
            return false;
        }
        let Some(handle) = &self.handle else {
            return false;
        };

        let atlases: Vec<Atlas> = handle
            .load_all_assets()
            .iter()
            .filter_map(|obj| obj.atlas().cloned())
            .collect();

        self.atlas_name = atlases
            .iter()
            .find_map(|atlas| atlas.texture.as_ref().map(|tex| tex.name.clone()));
        self.atlas_list = Some(atlases);
        true
    }

    /// Releases the container handle if nothing is in flight and nothing
    /// references the bundle.
    ///
    /// With `unload_all` set, the backend also tears down objects already
    /// instantiated from the container. A `false` return is advisory "try
    /// again later", never an error. On success the materialized asset
    /// cache is cleared; the atlas list survives so the sweeper can still
    /// reclaim textures.
    pub fn unload(&mut self, unload_all: bool) -> bool {
        if self.loading_count() > 0 || self.ref_count() > 0 {
            return false;
        }

        if let Some(mut handle) = self.handle.take() {
            handle.unload(unload_all);
            log::debug!(
                "released bundle '{}' (unload_all: {})",
                self.name,
                unload_all
            );
        }
        self.only_asset = None;
        self.asset_list = None;
        true
    }

    /// Releases every atlas texture (primary and alpha) of this entry from
    /// engine memory, leaving the container itself resident.
    ///
    /// Gated on in-flight operations only, not on references: texture
    /// eviction is deliberately more aggressive than whole-bundle eviction,
    /// since other assets from the container may still be referenced while
    /// its atlas textures are idle.
    pub fn unload_atlas(&mut self) -> bool {
        let Some(atlases) = &self.atlas_list else {
            return false;
        };
        if self.loading_count() > 0 {
            return false;
        }

        for atlas in atlases {
            if let Some(texture) = &atlas.texture {
                self.textures.release(texture);
            }
            if let Some(alpha) = &atlas.alpha_texture {
                self.textures.release(alpha);
            }
        }
        true
    }

    // --- asset access -----------------------------------------------------

    /// Queries the backend for presence without materializing anything.
    /// `false` while unloaded.
    pub fn contains(&self, asset_name: &str) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| handle.contains(asset_name))
    }

    /// Synchronous single-asset fetch. `None` while unloaded or for an
    /// empty name; the name is normalized before lookup.
    pub fn load_asset(&self, asset_name: &str, kind: AssetKind) -> Option<SharedAsset> {
        let handle = self.handle.as_ref()?;
        if asset_name.is_empty() {
            return None;
        }
        handle.load_asset(asset_stem(asset_name), kind)
    }

    /// Asynchronous single-asset fetch; same contract as
    /// [`BundleInfo::load_asset`].
    pub async fn load_asset_async(&self, asset_name: &str, kind: AssetKind) -> Option<SharedAsset> {
        let handle = self.handle.as_ref()?;
        if asset_name.is_empty() {
            return None;
        }
        handle.load_asset_async(asset_stem(asset_name), kind).await
    }

    /// Synchronously decodes every top-level object. Empty while unloaded.
    pub fn load_all_assets(&self) -> Vec<SharedAsset> {
        self.handle
            .as_ref()
            .map(|handle| handle.load_all_assets())
            .unwrap_or_default()
    }

    /// The single materialization point for bulk bundles: suspends on the
    /// backend's bulk decode and caches the result by cardinality (one
    /// object into `only_asset`, several into `asset_list`, none into
    /// neither).
    ///
    /// Idempotent: once either cache slot is populated, later calls return
    /// immediately.
    pub async fn cache_all_assets(&mut self) {
        if self.only_asset.is_some() || self.asset_list.is_some() {
            return;
        }
        let Some(handle) = &self.handle else {
            return;
        };

        let assets = handle.load_all_assets_async().await;
        match assets.len() {
            0 => {}
            1 => self.only_asset = assets.into_iter().next(),
            _ => self.asset_list = Some(assets),
        }
    }

    /// The single decoded object, when materialization found exactly one.
    pub fn only_asset(&self) -> Option<&SharedAsset> {
        self.only_asset.as_ref()
    }

    /// The full decoded sequence, when materialization found more than one.
    pub fn asset_list(&self) -> Option<&[SharedAsset]> {
        self.asset_list.as_deref()
    }

    /// Linear scan of the materialized `asset_list` for the first object
    /// whose normalized name and kind match ([`AssetKind::Any`] matches
    /// every kind).
    ///
    /// Deliberately never consults `only_asset`: callers holding a
    /// single-asset bundle check [`BundleInfo::only_asset`] themselves.
    pub fn find_asset(&self, asset_name: &str, kind: AssetKind) -> Option<SharedAsset> {
        let list = self.asset_list.as_ref()?;
        let stem = asset_stem(asset_name);
        list.iter()
            .find(|asset| asset.name() == stem && kind.matches(asset.kind()))
            .cloned()
    }
}

/// RAII in-flight marker for one asynchronous operation on a bundle entry.
///
/// Holds only the shared counter, not a borrow of the entry, so it can
/// travel into a spawned future and still decrement exactly once when that
/// future completes, fails, or is cancelled.
pub struct LoadingScope {
    loading: Arc<AtomicU32>,
    bundle: String,
}

impl Drop for LoadingScope {
    fn drop(&mut self) {
        decrement_loading(&self.loading, &self.bundle);
    }
}

/// Saturating decrement of an in-flight counter. An underflow means an
/// unbalanced `del_loading_count`; the counter stays at zero and the misuse
/// is logged instead of wrapping.
fn decrement_loading(loading: &AtomicU32, bundle: &str) {
    let result = loading.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |count| {
        count.checked_sub(1)
    });
    if result.is_err() {
        log::warn!("in-flight counter underflow on bundle '{bundle}'");
    }
}
