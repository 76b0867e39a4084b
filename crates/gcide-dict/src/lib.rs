pub mod assemble;
pub mod config;
pub mod output;
pub mod pipeline;

pub use assemble::{EntryIds, build_xml};
pub use config::{Cli, LoadModeArg, RunConfig};
pub use output::{OutputError, write_json, write_text};
pub use pipeline::{BuiltDictionary, Pipeline, RunSummary, Snapshot, run};
