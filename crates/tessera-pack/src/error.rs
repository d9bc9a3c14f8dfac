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

use thiserror::Error;

/// Failures while parsing or extracting a packed archive.
#[derive(Debug, Error)]
pub enum PackError {
    /// The archive header declares no entries (or a negative count).
    #[error("archive declares {count} entries; expected a positive count")]
    EmptyArchive {
        /// The declared entry count.
        count: i32,
    },

    /// An entry offset points outside the addressable file range.
    #[error("entry offset {offset} is not addressable")]
    InvalidOffset {
        /// The offending offset from the index table.
        offset: i32,
    },

    /// A length prefix (name or content) is negative.
    #[error("entry declares negative length {length}")]
    InvalidLength {
        /// The offending length prefix.
        length: i32,
    },

    /// An entry name is not valid UTF-8.
    #[error("entry name is not valid UTF-8")]
    InvalidName(#[from] std::string::FromUtf8Error),

    /// An underlying read or write failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
