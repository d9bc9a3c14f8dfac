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

//! Extracts a packed `.dat` resource archive next to itself, into an
//! `Export/` directory tree.
//!
//! Exit status is `-1` for a missing argument, a path without the `.dat`
//! extension, a missing file, or an empty/invalid archive header; `0` once
//! the pass completed, even when individual entries had to be skipped
//! (their count is printed).

use anyhow::Context;
use std::path::Path;
use std::process;

use tessera_pack::{extract, ExtractReport, PACK_EXTENSION};

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    process::exit(run(&args));
}

fn run(args: &[String]) -> i32 {
    let [archive] = args else {
        eprintln!("usage: tessera-extract <archive.{PACK_EXTENSION}>");
        return -1;
    };
    let path = Path::new(archive);

    // The extension gate runs before the file is ever opened.
    if path.extension().and_then(|ext| ext.to_str()) != Some(PACK_EXTENSION) {
        eprintln!("resource archive must end in .{PACK_EXTENSION}");
        return -1;
    }
    if !path.exists() {
        eprintln!("resource archive '{}' does not exist", path.display());
        return -1;
    }

    match extract(path).with_context(|| format!("failed to extract '{}'", path.display())) {
        Ok(ExtractReport { written, skipped }) => {
            println!("extracted {written} entries ({skipped} skipped)");
            0
        }
        Err(err) => {
            eprintln!("{err:#}");
            -1
        }
    }
}
