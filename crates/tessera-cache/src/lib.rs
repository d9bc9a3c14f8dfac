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

//! # Tessera Cache
//!
//! The reference-counted bundle cache: the layer that decides when it is
//! safe to release engine resources.
//!
//! Every loaded bundle container is wrapped in a [`BundleInfo`], which
//! tracks in-flight operations and per-asset references and owns the
//! materialized decoded-asset cache. Entries live inside a [`BundleCache`],
//! the subsystem root context, which also owns the [`AtlasRegistry`] and
//! runs the atlas eviction sweep.
//!
//! All cache mutation flows through `&mut` borrows, so the borrow checker
//! enforces the single serialization domain; there are no locks here.
//! Asynchronous materialization holds `&mut self` across its suspension
//! point, excluding every other cache mutation for its duration. In-flight
//! markers that must outlive a borrow travel in a [`LoadingScope`] instead.

#![warn(missing_docs)]

pub mod cache;
pub mod entry;
pub mod registry;

pub use cache::{BundleCache, BundleCacheConfig, DEFAULT_ATLAS_NAMESPACE};
pub use entry::{BundleInfo, LoadingScope};
pub use registry::AtlasRegistry;
