use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use gcide_corpus::extract::{ExtractOptions, Extractor};
use gcide_corpus::{LoadMode, UnknownEntities, discover, normalize, read_source};
use regex::Regex;

fn main() -> Result<()> {
    let source_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p gcide-corpus --example stats -- <path-to-cide-dir>")?;

    let pattern = Regex::new(r"CIDE\.[A-Z]")?;
    let files = discover(&source_dir, &pattern)
        .with_context(|| format!("listing sources in {}", source_dir.display()))?;

    let mut unknown = UnknownEntities::new();
    let mut extractor = Extractor::new(ExtractOptions::default());
    for path in &files {
        let raw = read_source(path, LoadMode::Mmap)?;
        extractor.extract(&normalize::normalize(&raw, &mut unknown));
    }
    let extracted = extractor.finish();

    let alias_count: usize = extracted.index.iter().map(|(_, a)| a.len()).sum();
    let fragment_bytes: usize = extracted.dictionary.iter().map(|(_, f)| f.len()).sum();

    println!("Sources      : {}", source_dir.display());
    println!("Files        : {}", files.len());
    println!("Paragraphs   : {}", extracted.stats.paragraphs);
    println!("Skipped      : {}", extracted.stats.skipped);
    println!("Entries      : {}", extracted.dictionary.len());
    println!("Aliases      : {}", alias_count);
    println!("Fragment size: {} bytes", fragment_bytes);
    println!("Unknown entities: {}", unknown.len());

    // Spot-check a couple of headwords.
    for name in ["Dog", "Run"] {
        println!("Entry '{}' exists? {}", name, extracted.dictionary.contains(name));
    }

    Ok(())
}
