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

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tessera_cache::BundleCache;
use tessera_core::{
    Atlas, AssetKind, BundleHandle, EngineObject, SharedAsset, TextureReclaim, TextureRef,
    UsageTracker,
};

// --- Test doubles for the engine backend seams ---

struct AtlasObject {
    atlas: Atlas,
}

impl EngineObject for AtlasObject {
    fn name(&self) -> &str {
        "atlas_root"
    }
    fn kind(&self) -> AssetKind {
        AssetKind::Prefab
    }
    fn atlas(&self) -> Option<&Atlas> {
        Some(&self.atlas)
    }
}

struct TestBundle {
    assets: Vec<SharedAsset>,
}

#[async_trait]
impl BundleHandle for TestBundle {
    fn contains(&self, asset_name: &str) -> bool {
        self.assets.iter().any(|a| a.name() == asset_name)
    }
    fn load_asset(&self, asset_name: &str, kind: AssetKind) -> Option<SharedAsset> {
        self.assets
            .iter()
            .find(|a| a.name() == asset_name && kind.matches(a.kind()))
            .cloned()
    }
    async fn load_asset_async(&self, asset_name: &str, kind: AssetKind) -> Option<SharedAsset> {
        self.load_asset(asset_name, kind)
    }
    fn load_all_assets(&self) -> Vec<SharedAsset> {
        self.assets.clone()
    }
    async fn load_all_assets_async(&self) -> Vec<SharedAsset> {
        self.assets.clone()
    }
    fn unload(&mut self, _unload_all: bool) {}
}

#[derive(Default)]
struct RecordingReclaim {
    released: Mutex<Vec<String>>,
}

impl RecordingReclaim {
    fn released(&self) -> Vec<String> {
        self.released.lock().unwrap().clone()
    }
}

impl TextureReclaim for RecordingReclaim {
    fn release(&self, texture: &TextureRef) {
        self.released.lock().unwrap().push(texture.name.clone());
    }
}

struct FixedUsage {
    unused: HashSet<String>,
}

impl FixedUsage {
    fn new(unused: &[&str]) -> Self {
        Self {
            unused: unused.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl UsageTracker for FixedUsage {
    fn unused_texture_names(&self) -> HashSet<String> {
        self.unused.clone()
    }
}

fn atlas_bundle(texture: &str) -> Box<dyn BundleHandle> {
    Box::new(TestBundle {
        assets: vec![Arc::new(AtlasObject {
            atlas: Atlas::with_texture(texture),
        }) as SharedAsset],
    })
}

fn cache_with(unused: &[&str]) -> (BundleCache, Arc<RecordingReclaim>) {
    let reclaim = Arc::new(RecordingReclaim::default());
    let cache = BundleCache::new(
        Arc::clone(&reclaim) as Arc<dyn TextureReclaim>,
        Arc::new(FixedUsage::new(unused)),
    );
    (cache, reclaim)
}

// --- Sweep behavior ---

#[test]
fn test_sweep_releases_only_unused_atlases() {
    let (mut cache, reclaim) = cache_with(&["ui_main"]);
    cache.insert("atlas/ui", atlas_bundle("ui_main"));
    cache.insert("atlas/world", atlas_bundle("world_main"));

    cache.unload_unused_atlases(false);
    assert_eq!(reclaim.released(), vec!["ui_main".to_owned()]);
}

#[test]
fn test_sweep_dedupes_shared_texture_names() {
    let (mut cache, reclaim) = cache_with(&["shared_main"]);
    // Two bundles exposing the same underlying texture name.
    cache.insert("atlas/ui", atlas_bundle("shared_main"));
    cache.insert("atlas/hud", atlas_bundle("shared_main"));

    cache.unload_unused_atlases(false);
    assert_eq!(
        reclaim.released(),
        vec!["shared_main".to_owned()],
        "shared texture must be released at most once per sweep"
    );
}

#[test]
fn test_forced_sweep_bypasses_usage_query() {
    // Nothing is reported unused, yet unload_all touches every entry.
    let (mut cache, reclaim) = cache_with(&[]);
    cache.insert("atlas/ui", atlas_bundle("ui_main"));
    cache.insert("atlas/world", atlas_bundle("world_main"));

    cache.unload_unused_atlases(true);
    assert_eq!(
        reclaim.released(),
        vec!["ui_main".to_owned(), "world_main".to_owned()]
    );
}

#[test]
fn test_sweep_skips_busy_entries_and_completes() {
    let (mut cache, reclaim) = cache_with(&["ui_main", "world_main"]);
    cache.insert("atlas/ui", atlas_bundle("ui_main"));
    cache.insert("atlas/world", atlas_bundle("world_main"));

    let scope = cache.get("atlas/ui").unwrap().loading_scope();
    cache.unload_unused_atlases(false);
    drop(scope);

    // The busy entry was skipped silently; the rest of the pass still ran.
    assert_eq!(reclaim.released(), vec!["world_main".to_owned()]);
}

#[test]
fn test_non_atlas_bundles_never_register() {
    let (mut cache, reclaim) = cache_with(&["ui_main"]);
    cache.insert("characters/hero", atlas_bundle("ui_main"));

    assert!(cache.atlas_registry().is_empty());
    cache.unload_unused_atlases(false);
    assert!(reclaim.released().is_empty());
}

#[test]
fn test_reload_does_not_duplicate_registry_slot() {
    let (mut cache, reclaim) = cache_with(&["ui_main"]);
    cache.insert("atlas/ui", atlas_bundle("ui_main"));

    // External unload + reload of the same bundle name.
    assert!(cache.get_mut("atlas/ui").unwrap().unload(false));
    cache.insert("atlas/ui", atlas_bundle("ui_main"));

    assert_eq!(cache.atlas_registry().len(), 1);
    cache.unload_unused_atlases(true);
    assert_eq!(reclaim.released(), vec!["ui_main".to_owned()]);
}

// --- Root context lifecycle ---

#[test]
fn test_remove_is_guarded_like_unload() {
    let (mut cache, _reclaim) = cache_with(&[]);
    cache.insert("characters/hero", atlas_bundle("unused"));

    cache.get_mut("characters/hero").unwrap().add_ref("scene/town");
    assert!(!cache.remove("characters/hero", false));
    assert_eq!(cache.len(), 1);

    cache.get_mut("characters/hero").unwrap().del_ref("scene/town");
    assert!(cache.remove("characters/hero", false));
    assert!(cache.is_empty());
}

#[test]
fn test_ref_bookkeeping_survives_reload() {
    let (mut cache, _reclaim) = cache_with(&[]);
    cache.insert("characters/hero", atlas_bundle("unused"));
    cache.get_mut("characters/hero").unwrap().add_ref("scene/town");

    assert!(!cache.get_mut("characters/hero").unwrap().unload(false));

    // A second insert under the same name reuses the entry and its refs.
    cache.insert("characters/hero", atlas_bundle("unused"));
    assert_eq!(cache.get("characters/hero").unwrap().ref_count(), 1);
}

// --- Cancellation safety of in-flight markers ---

#[tokio::test]
async fn test_cancelled_operation_releases_marker() {
    let (mut cache, _reclaim) = cache_with(&[]);
    let entry = cache.insert("characters/hero", atlas_bundle("unused"));

    let scope = entry.loading_scope();
    let task = tokio::spawn(async move {
        let _scope = scope;
        std::future::pending::<()>().await;
    });

    assert_eq!(cache.get("characters/hero").unwrap().loading_count(), 1);
    task.abort();
    let _ = task.await;
    assert_eq!(cache.get("characters/hero").unwrap().loading_count(), 0);
}
