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

//! The ordered registry of atlas-bearing bundle entries.
//!
//! Historically a hidden process-wide list; here it is an explicit object
//! owned by the [`crate::BundleCache`] root context, so its lifetime is
//! tied to the subsystem rather than to static initialization order.

use std::collections::HashSet;

/// Registration-ordered set of bundle names that completed atlas
/// materialization.
///
/// Registration is idempotent by bundle name: a handle reload
/// re-materializes an entry's atlas list but cannot occupy a second
/// registry slot, so one sweep visits each entry at most once.
#[derive(Debug, Default)]
pub struct AtlasRegistry {
    order: Vec<String>,
    known: HashSet<String>,
}

impl AtlasRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a bundle name, preserving first-registration order.
    /// Returns `false` if the name was already registered.
    pub fn register(&mut self, bundle_name: &str) -> bool {
        if !self.known.insert(bundle_name.to_owned()) {
            return false;
        }
        self.order.push(bundle_name.to_owned());
        true
    }

    /// `true` if the bundle name has been registered.
    pub fn contains(&self, bundle_name: &str) -> bool {
        self.known.contains(bundle_name)
    }

    /// Iterates registered names in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` when nothing has registered yet.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_preserves_order() {
        let mut registry = AtlasRegistry::new();
        assert!(registry.register("atlas/ui"));
        assert!(registry.register("atlas/world"));
        assert!(registry.register("atlas/hud"));

        let names: Vec<&str> = registry.iter().collect();
        assert_eq!(names, ["atlas/ui", "atlas/world", "atlas/hud"]);
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = AtlasRegistry::new();
        assert!(registry.register("atlas/ui"));
        assert!(!registry.register("atlas/ui"));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("atlas/ui"));
    }
}
