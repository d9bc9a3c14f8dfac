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

//! The decoded-object model shared by every layer above the engine backend.
//!
//! A loaded bundle hands out *decoded engine objects*: textures, prefabs,
//! audio clips and so on, already resident in engine memory. Higher layers
//! never see the raw bytes, only [`EngineObject`] trait objects tagged with
//! an [`AssetKind`]. Lookups across the whole layer are extension-agnostic,
//! which is what [`asset_stem`] encodes.

use crate::atlas::Atlas;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The runtime type tag of a decoded engine object.
///
/// [`AssetKind::Any`] is the universal type: in lookups it matches every
/// other kind, mirroring a query against the engine's root object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// The universal object type; matches every kind.
    Any,
    /// A decoded texture.
    Texture,
    /// A material referencing one or more textures.
    Material,
    /// Mesh geometry.
    Mesh,
    /// A decoded audio clip.
    AudioClip,
    /// An instantiable object template.
    Prefab,
    /// A raw text asset.
    Text,
}

impl AssetKind {
    /// Returns `true` if an object of kind `candidate` satisfies a lookup
    /// for `self`.
    pub fn matches(self, candidate: AssetKind) -> bool {
        self == AssetKind::Any || self == candidate
    }
}

/// A decoded object exposed by a loaded bundle.
///
/// The supertraits mirror the rest of the engine's asset contracts:
/// `Send + Sync + 'static` so decoded objects can be shared freely and
/// stored for the lifetime of the application.
pub trait EngineObject: Send + Sync + 'static {
    /// The object's name inside the bundle namespace (no directory, no
    /// extension).
    fn name(&self) -> &str;

    /// The object's runtime type tag.
    fn kind(&self) -> AssetKind;

    /// The atlas capability of this object, if it carries one.
    ///
    /// Only objects originating from atlas bundles return `Some`; everything
    /// else keeps the default.
    fn atlas(&self) -> Option<&Atlas> {
        None
    }
}

/// Shared ownership of a decoded engine object.
///
/// Cloning is cheap: it only bumps the reference count, it never duplicates
/// the decoded data.
pub type SharedAsset = Arc<dyn EngineObject>;

/// Normalizes an asset name for lookup within a bundle.
///
/// Strips any directory components and a trailing file extension, so
/// `"ui/icons/sword.png"` and `"sword"` address the same object. The bundle
/// namespace is extension-agnostic by design.
pub fn asset_stem(name: &str) -> &str {
    let file = match name.rfind(['/', '\\']) {
        Some(idx) => &name[idx + 1..],
        None => name,
    };
    match file.rfind('.') {
        // A leading dot is a hidden-file marker, not an extension.
        Some(0) | None => file,
        Some(idx) => &file[..idx],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_stem_strips_extension() {
        assert_eq!(asset_stem("sword.png"), "sword");
    }

    #[test]
    fn test_asset_stem_strips_directories() {
        assert_eq!(asset_stem("ui/icons/sword.png"), "sword");
        assert_eq!(asset_stem("ui\\icons\\sword.png"), "sword");
    }

    #[test]
    fn test_asset_stem_plain_name_unchanged() {
        assert_eq!(asset_stem("sword"), "sword");
    }

    #[test]
    fn test_asset_stem_keeps_hidden_file_names() {
        assert_eq!(asset_stem(".manifest"), ".manifest");
    }

    #[test]
    fn test_asset_stem_only_last_extension() {
        assert_eq!(asset_stem("atlas.main.png"), "atlas.main");
    }

    #[test]
    fn test_kind_any_matches_everything() {
        assert!(AssetKind::Any.matches(AssetKind::Texture));
        assert!(AssetKind::Any.matches(AssetKind::Any));
        assert!(!AssetKind::Mesh.matches(AssetKind::Texture));
        assert!(AssetKind::Mesh.matches(AssetKind::Mesh));
    }
}
