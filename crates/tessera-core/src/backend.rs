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

//! The seams behind which the engine backend lives.
//!
//! The cache layer never decodes bundle bytes and never touches texture
//! memory directly. Everything engine-owned is reached through the three
//! contracts in this module:
//!
//! - [`BundleHandle`]: one loaded bundle container and the load/query/unload
//!   operations it supports. Decoding a full bundle can be slow I/O, so the
//!   bulk operations are asynchronous.
//! - [`TextureReclaim`]: releasing individual decoded textures, independent
//!   of whether their owning container stays resident.
//! - [`UsageTracker`]: the draw-call side's answer to "which texture names
//!   have zero live references right now".
//!
//! Concrete implementations wrap the actual engine and live outside this
//! workspace; the test suites provide in-memory doubles.

use crate::asset::{AssetKind, SharedAsset};
use crate::atlas::TextureRef;
use async_trait::async_trait;
use std::collections::HashSet;

/// A live, engine-owned loaded bundle container.
///
/// Handles are exclusively owned by their cache entry and are never aliased;
/// `unload` therefore takes `&mut self`. Asset names passed to the lookup
/// methods are already normalized (see [`crate::asset_stem`]).
#[async_trait]
pub trait BundleHandle: Send + Sync {
    /// Returns `true` if the container exposes an object with this name.
    fn contains(&self, asset_name: &str) -> bool;

    /// Synchronously decodes and returns a single object, or `None` if the
    /// container has no object of this name and kind.
    fn load_asset(&self, asset_name: &str, kind: AssetKind) -> Option<SharedAsset>;

    /// Asynchronous variant of [`BundleHandle::load_asset`].
    async fn load_asset_async(&self, asset_name: &str, kind: AssetKind) -> Option<SharedAsset>;

    /// Synchronously decodes every top-level object in the container.
    fn load_all_assets(&self) -> Vec<SharedAsset>;

    /// Asynchronously decodes every top-level object in the container.
    ///
    /// This is the backend's bulk decode; the caller suspends until the
    /// engine reports completion.
    async fn load_all_assets_async(&self) -> Vec<SharedAsset>;

    /// Releases the container.
    ///
    /// With `unload_all` set, objects already instantiated from the
    /// container are torn down too; otherwise they survive the container.
    fn unload(&mut self, unload_all: bool);
}

/// Engine-side reclamation of individual decoded textures.
pub trait TextureReclaim: Send + Sync {
    /// Asks the engine to drop the decoded texture from memory.
    ///
    /// The owning bundle container may stay resident; a later access will
    /// decode the texture again.
    fn release(&self, texture: &TextureRef);
}

/// The external draw-call usage probe consulted by atlas eviction sweeps.
pub trait UsageTracker: Send + Sync {
    /// The set of texture names with zero active draw references right now.
    fn unused_texture_names(&self) -> HashSet<String>;
}
