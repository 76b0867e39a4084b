//! Turn the GCIDE source files into dictionary entries.
//!
//! The corpus is a set of SGML-ish files (`CIDE.A` … `CIDE.Z`) with custom
//! `<NAME/` entity markers and paragraphs tagged with their source edition.
//! This crate covers everything from bytes on disk to post-processed entry
//! fragments:
//!
//! - [`discover`] and [`read_source`] find and load the files, memory-mapped or
//!   owned per [`LoadMode`];
//! - [`normalize`] resolves entity markers and cleans punctuation;
//! - [`extract`] walks paragraphs into a [`Dictionary`] and [`Index`];
//! - [`postprocess`] rewrites each entry into a small HTML vocabulary.
//!
//! # Example
//! ```no_run
//! use gcide_corpus::extract::{ExtractOptions, Extractor};
//! use gcide_corpus::{LoadMode, discover, normalize, read_source};
//! use gcide_types::UnknownEntities;
//! use regex::Regex;
//!
//! # fn main() -> anyhow::Result<()> {
//! let pattern = Regex::new(r"CIDE\.[A-Z]")?;
//! let mut unknown = UnknownEntities::new();
//! let mut extractor = Extractor::new(ExtractOptions::default());
//! for path in discover("srcFiles", &pattern)? {
//!     let raw = read_source(&path, LoadMode::Mmap)?;
//!     extractor.extract(&normalize::normalize(&raw, &mut unknown));
//! }
//! let extracted = extractor.finish();
//! println!("{} entries", extracted.dictionary.len());
//! # Ok(()) }
//! ```

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use memmap2::Mmap;
use regex::Regex;

pub use gcide_types::{Dictionary, Index, UnknownEntities};

mod entities;
pub mod extract;
pub mod markup;
pub mod normalize;
pub mod postprocess;

/// Strategy for loading source files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each source file.
    Mmap,
    /// Read each file into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// Files directly inside `dir` whose name matches `pattern`, sorted by path.
pub fn discover(dir: impl AsRef<Path>, pattern: &Regex) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry.with_context(|| format!("read dir entry in {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| pattern.is_match(name));
        if matches {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Load one source file as text; invalid UTF-8 becomes U+FFFD.
pub fn read_source(path: impl AsRef<Path>, mode: LoadMode) -> Result<String> {
    let path = path.as_ref();
    let buffer = load_file(path, mode)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer> {
    match mode {
        LoadMode::Mmap => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            // Empty files cannot be mapped on every platform.
            if file
                .metadata()
                .with_context(|| format!("stat {}", path.display()))?
                .len()
                == 0
            {
                return Ok(Buffer::Owned(Vec::new()));
            }
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .with_context(|| format!("mmap {}", path.display()))
        }
        LoadMode::Owned => {
            let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}
