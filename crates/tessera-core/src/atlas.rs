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

//! Atlas descriptors.
//!
//! An atlas is a composite texture bundling many sub-images, optionally
//! paired with a separate alpha/mask texture. The cache layer only needs the
//! descriptor — which textures an atlas owns — never the pixel data itself.

use serde::{Deserialize, Serialize};

/// A handle-by-name to a decoded texture resident in engine memory.
///
/// Texture identity across the whole layer (usage tracking, eviction) is the
/// engine-side texture name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureRef {
    /// The engine-side name of the texture.
    pub name: String,
}

impl TextureRef {
    /// Creates a reference to the named texture.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Descriptor of one atlas exposed by an atlas bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atlas {
    /// The primary (color) texture, if the atlas has finished decoding.
    pub texture: Option<TextureRef>,
    /// The separate alpha/mask texture, if this atlas ships one.
    pub alpha_texture: Option<TextureRef>,
}

impl Atlas {
    /// Creates an atlas descriptor with a primary texture and no alpha
    /// texture.
    pub fn with_texture(name: impl Into<String>) -> Self {
        Self {
            texture: Some(TextureRef::new(name)),
            alpha_texture: None,
        }
    }
}
