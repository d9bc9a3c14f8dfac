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

//! Extraction of a whole archive to a destination directory tree.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use crate::error::PackError;
use crate::format::{read_entry, PackIndex};

/// Name of the directory entries are extracted into, next to the archive.
pub const EXPORT_DIR: &str = "Export";

/// Outcome of one extraction pass.
///
/// When the index itself was valid, `written + skipped` equals the declared
/// entry count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractReport {
    /// Entries written to disk.
    pub written: usize,
    /// Entries that failed to decode or write and were left behind.
    pub skipped: usize,
}

/// Extracts every entry of the archive at `archive_path` into
/// `<archive dir>/Export/<entry name>`, creating intermediate directories
/// as needed.
///
/// A failure on one entry (truncated data, bad name, I/O error on write) is
/// logged, counted in [`ExtractReport::skipped`], and does not stop the
/// pass; the remaining entries still extract.
///
/// # Errors
/// Only the archive-level conditions are fatal: the file cannot be opened,
/// or the header/offset table is invalid ([`PackError::EmptyArchive`],
/// truncation).
pub fn extract(archive_path: &Path) -> Result<ExtractReport, PackError> {
    let mut reader = BufReader::new(File::open(archive_path)?);
    let index = PackIndex::read(&mut reader)?;

    let export_root = archive_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(EXPORT_DIR);

    let mut report = ExtractReport {
        written: 0,
        skipped: 0,
    };
    for &offset in index.offsets() {
        match write_one(&mut reader, offset, &export_root) {
            Ok(name) => {
                log::debug!("extracted '{name}'");
                report.written += 1;
            }
            Err(err) => {
                log::warn!("skipping entry at offset {offset}: {err}");
                report.skipped += 1;
            }
        }
    }

    log::info!(
        "extracted {} entries to '{}' ({} skipped)",
        report.written,
        export_root.display(),
        report.skipped
    );
    Ok(report)
}

fn write_one(
    reader: &mut BufReader<File>,
    offset: i32,
    export_root: &Path,
) -> Result<String, PackError> {
    let entry = read_entry(reader, offset)?;

    let target = export_root.join(&entry.name);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, &entry.content)?;
    Ok(entry.name)
}
