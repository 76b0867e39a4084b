use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gcide_corpus::LoadMode;
use gcide_corpus::extract::{DEFAULT_ACCEPTED_SOURCE, ExtractOptions};
use regex::Regex;

pub const DEFAULT_SOURCE_DIR: &str = "srcFiles";
pub const DEFAULT_FILE_PATTERN: &str = r"CIDE\.[A-Z]";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_XML_PATH: &str = "template/dict.xml";

const PRELIM_FILE: &str = "dictPrelim.json";
const DICT_FILE: &str = "dict.json";

#[derive(Debug, Parser)]
#[command(name = "gcide-dict")]
#[command(about = "Build Apple Dictionary XML from the GCIDE 1913 Webster corpus")]
pub struct Cli {
    /// Directory holding the CIDE.* source files.
    #[arg(long, env = "GCIDE_SOURCE_DIR", default_value = DEFAULT_SOURCE_DIR)]
    pub source_dir: PathBuf,
    /// Regex a file name must match to be loaded.
    #[arg(long, env = "GCIDE_FILE_PATTERN", default_value = DEFAULT_FILE_PATTERN)]
    pub file_pattern: String,
    /// Directory for dictPrelim.json and dict.json.
    #[arg(long, env = "GCIDE_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
    /// Destination of the dictionary XML.
    #[arg(long, env = "GCIDE_XML_PATH", default_value = DEFAULT_XML_PATH)]
    pub xml_path: PathBuf,
    /// Edition label a paragraph must carry to be kept.
    #[arg(long, env = "GCIDE_SOURCE", default_value = DEFAULT_ACCEPTED_SOURCE)]
    pub source: String,
    /// Keep paragraphs from every edition.
    #[arg(long, default_value_t = false)]
    pub all_sources: bool,
    #[arg(long, env = "GCIDE_LOAD_MODE", value_enum, default_value_t = LoadModeArg::Mmap)]
    pub load_mode: LoadModeArg,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LoadModeArg {
    Mmap,
    Owned,
}

impl From<LoadModeArg> for LoadMode {
    fn from(arg: LoadModeArg) -> Self {
        match arg {
            LoadModeArg::Mmap => LoadMode::Mmap,
            LoadModeArg::Owned => LoadMode::Owned,
        }
    }
}

/// Resolved settings for one build.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub source_dir: PathBuf,
    pub file_pattern: Regex,
    pub output_dir: PathBuf,
    pub xml_path: PathBuf,
    pub load_mode: LoadMode,
    pub extract: ExtractOptions,
}

impl Cli {
    pub fn into_config(self) -> Result<RunConfig> {
        let file_pattern = Regex::new(&self.file_pattern)
            .with_context(|| format!("invalid file pattern {:?}", self.file_pattern))?;
        let extract = if self.all_sources {
            ExtractOptions::all_sources()
        } else {
            ExtractOptions::only_source(self.source)
        };
        Ok(RunConfig {
            source_dir: self.source_dir,
            file_pattern,
            output_dir: self.output_dir,
            xml_path: self.xml_path,
            load_mode: self.load_mode.into(),
            extract,
        })
    }
}

impl RunConfig {
    /// Snapshot written right after extraction.
    pub fn prelim_path(&self) -> PathBuf {
        self.output_dir.join(PRELIM_FILE)
    }

    /// Post-processed dictionary.
    pub fn dict_path(&self) -> PathBuf {
        self.output_dir.join(DICT_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_resolve_into_a_run_config() {
        let cli = Cli::try_parse_from([
            "gcide-dict",
            "--source-dir",
            "corpus",
            "--output-dir",
            "out",
            "--xml-path",
            "out/d.xml",
            "--load-mode",
            "owned",
            "--source",
            "Century Dict.",
        ])
        .unwrap();
        let config = cli.into_config().unwrap();
        assert_eq!(config.source_dir, PathBuf::from("corpus"));
        assert_eq!(config.prelim_path(), PathBuf::from("out").join("dictPrelim.json"));
        assert_eq!(config.dict_path(), PathBuf::from("out").join("dict.json"));
        assert_eq!(config.xml_path, PathBuf::from("out/d.xml"));
        assert_eq!(config.load_mode, LoadMode::Owned);
        assert_eq!(config.extract, ExtractOptions::only_source("Century Dict."));
    }

    #[test]
    fn all_sources_disables_the_filter() {
        let cli = Cli::try_parse_from(["gcide-dict", "--all-sources"]).unwrap();
        assert_eq!(cli.into_config().unwrap().extract, ExtractOptions::all_sources());
    }

    #[test]
    fn rejects_an_invalid_file_pattern() {
        let cli = Cli::try_parse_from(["gcide-dict", "--file-pattern", "CIDE.("]).unwrap();
        let err = cli.into_config().unwrap_err();
        assert!(err.to_string().contains("invalid file pattern"));
    }

    #[test]
    fn rejects_unknown_load_modes() {
        assert!(Cli::try_parse_from(["gcide-dict", "--load-mode", "lazy"]).is_err());
    }
}
