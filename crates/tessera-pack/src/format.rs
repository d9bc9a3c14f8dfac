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

//! Low-level readers for the archive header and individual entries.

use std::io::{Read, Seek, SeekFrom};

use crate::error::PackError;

/// File extension carried by every packed archive.
pub const PACK_EXTENSION: &str = "dat";

/// The archive's random-access index: the offset of every entry, in file
/// order.
#[derive(Debug)]
pub struct PackIndex {
    offsets: Vec<i32>,
}

impl PackIndex {
    /// Reads the header (entry count plus the full offset table) from the
    /// start of an archive.
    ///
    /// The table is buffered in one pass before any entry is visited;
    /// a valid table with a corrupt trailing entry still lets earlier
    /// entries extract.
    ///
    /// # Errors
    /// [`PackError::EmptyArchive`] when the declared count is not positive,
    /// [`PackError::Io`] when the header itself is truncated.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, PackError> {
        let count = read_i32(reader)?;
        if count <= 0 {
            return Err(PackError::EmptyArchive { count });
        }

        let mut offsets = Vec::with_capacity(count as usize);
        for _ in 0..count {
            offsets.push(read_i32(reader)?);
        }
        Ok(Self { offsets })
    }

    /// Entry offsets in file order.
    pub fn offsets(&self) -> &[i32] {
        &self.offsets
    }

    /// Number of entries the archive declares.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always `false` for a successfully parsed index; the format rejects
    /// empty archives up front.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// One decoded archive entry: a relative name and its content bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackEntry {
    /// Relative destination path; may contain `/` separators.
    pub name: String,
    /// The raw resource bytes.
    pub content: Vec<u8>,
}

/// Seeks to `offset` and decodes the entry stored there.
pub fn read_entry<R: Read + Seek>(reader: &mut R, offset: i32) -> Result<PackEntry, PackError> {
    let offset = u64::try_from(offset).map_err(|_| PackError::InvalidOffset { offset })?;
    reader.seek(SeekFrom::Start(offset))?;

    let content_len = read_len(reader)?;
    let name_len = read_len(reader)?;

    let mut name_bytes = vec![0u8; name_len];
    reader.read_exact(&mut name_bytes)?;
    let name = String::from_utf8(name_bytes)?;

    let mut content = vec![0u8; content_len];
    reader.read_exact(&mut content)?;

    Ok(PackEntry { name, content })
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32, PackError> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(i32::from_le_bytes(bytes))
}

fn read_len<R: Read>(reader: &mut R) -> Result<usize, PackError> {
    let length = read_i32(reader)?;
    usize::try_from(length).map_err(|_| PackError::InvalidLength { length })
}
