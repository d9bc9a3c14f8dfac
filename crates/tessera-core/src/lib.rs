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

//! # Tessera Core
//!
//! Foundational crate containing the traits, core types, and interface
//! contracts of the tessera resource-lifecycle layer.
//!
//! Nothing in this crate loads, caches, or unpacks anything. It only defines
//! the "common language" the other crates speak: the decoded-object model,
//! the atlas descriptors, and the seams behind which the engine backend and
//! the draw-call usage tracker live.

#![warn(missing_docs)]

pub mod asset;
pub mod atlas;
pub mod backend;

pub use asset::{asset_stem, AssetKind, EngineObject, SharedAsset};
pub use atlas::{Atlas, TextureRef};
pub use backend::{BundleHandle, TextureReclaim, UsageTracker};
