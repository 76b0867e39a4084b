//! One build, from source directory to written artifacts.
//!
//! [`Pipeline`] owns the state of a run: the extractor and the set of unknown
//! entities. Documents are fed in with [`Pipeline::ingest`]; once every file
//! has been read, [`Pipeline::finish`] hands back a [`BuiltDictionary`] that
//! can be snapshotted, post-processed and assembled. [`run`] drives the whole
//! sequence from the file system.

use std::time::Instant;

use anyhow::Result;
use gcide_corpus::extract::{ExtractOptions, ExtractStats, Extractor};
use gcide_corpus::{discover, normalize, postprocess, read_source};
use gcide_types::{Dictionary, Index, UnknownEntities};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::assemble::build_xml;
use crate::config::RunConfig;
use crate::output::{write_json, write_text};

pub struct Pipeline {
    extractor: Extractor,
    unknown: UnknownEntities,
}

impl Pipeline {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            extractor: Extractor::new(options),
            unknown: UnknownEntities::new(),
        }
    }

    /// Normalize one raw document and merge its paragraphs.
    pub fn ingest(&mut self, raw: &str) {
        let normalized = normalize::normalize(raw, &mut self.unknown);
        self.extractor.extract(&normalized);
        let stats = self.extractor.stats();
        debug!(
            "{} documents, {} paragraphs, {} skipped",
            stats.documents, stats.paragraphs, stats.skipped
        );
    }

    pub fn finish(self) -> BuiltDictionary {
        let extracted = self.extractor.finish();
        BuiltDictionary {
            dictionary: extracted.dictionary,
            index: extracted.index,
            unknown: self.unknown,
            stats: extracted.stats,
        }
    }
}

/// Extraction result, before or after post-processing.
#[derive(Debug)]
pub struct BuiltDictionary {
    pub dictionary: Dictionary,
    pub index: Index,
    pub unknown: UnknownEntities,
    pub stats: ExtractStats,
}

/// Shape of `dictPrelim.json`.
#[derive(Serialize)]
pub struct Snapshot<'a> {
    pub dictionary: &'a Dictionary,
    pub index: &'a Index,
}

impl BuiltDictionary {
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            dictionary: &self.dictionary,
            index: &self.index,
        }
    }

    pub fn postprocess(&mut self) {
        postprocess::postprocess(&mut self.dictionary);
    }

    pub fn to_xml(&self) -> String {
        build_xml(&self.dictionary, &self.index)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub files: usize,
    pub entries: usize,
    pub skipped_paragraphs: usize,
    pub unknown_entities: usize,
}

/// Read every matching source file and write all three artifacts.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let files = discover(&config.source_dir, &config.file_pattern)?;
    if files.is_empty() {
        warn!(
            "no files matching {} in {}",
            config.file_pattern,
            config.source_dir.display()
        );
    }

    let start = Instant::now();
    let mut pipeline = Pipeline::new(config.extract.clone());
    for path in &files {
        info!("reading {}", path.display());
        let raw = read_source(path, config.load_mode)?;
        pipeline.ingest(&raw);
    }
    let mut built = pipeline.finish();
    info!(
        "parsed {} files into {} entries in {} ms",
        files.len(),
        built.dictionary.len(),
        start.elapsed().as_millis()
    );
    if !built.unknown.is_empty() {
        warn!("unknown entities: {}", built.unknown);
    }

    write_json(&config.prelim_path(), &built.snapshot())?;

    built.postprocess();
    let xml = built.to_xml();
    write_json(&config.dict_path(), &built.dictionary)?;
    write_text(&config.xml_path, &xml)?;

    Ok(RunSummary {
        files: files.len(),
        entries: built.dictionary.len(),
        skipped_paragraphs: built.stats.skipped,
        unknown_entities: built.unknown.len(),
    })
}
