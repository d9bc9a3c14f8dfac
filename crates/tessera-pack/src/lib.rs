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

//! # Tessera Pack
//!
//! The packed-resource archive format and its extraction algorithm.
//!
//! An archive is a single `.dat` file holding many named resource blobs
//! behind a random-access offset index:
//!
//! ```text
//! i32              file_count          (must be > 0)
//! i32[file_count]  offsets             (absolute, in file order)
//! at each offset:
//! i32              content_len
//! i32              name_len
//! u8[name_len]     name (UTF-8, may contain '/' separators)
//! u8[content_len]  content
//! ```
//!
//! All integers are 4-byte little-endian. The whole offset table is
//! buffered before any entry is touched, so one corrupt trailing entry
//! never blocks extraction of the earlier ones.

#![warn(missing_docs)]

mod error;
mod extract;
mod format;

pub use error::PackError;
pub use extract::{extract, ExtractReport, EXPORT_DIR};
pub use format::{read_entry, PackEntry, PackIndex, PACK_EXTENSION};
