use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use gcide_dict::{Cli, run};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Cli::parse().into_config()?;
    info!("reading sources from {}", config.source_dir.display());
    info!(
        "writing json to {} and xml to {} (mode: {:?})",
        config.output_dir.display(),
        config.xml_path.display(),
        config.load_mode
    );
    match &config.extract.accepted_source {
        Some(source) => info!("keeping paragraphs from {source}"),
        None => info!("keeping paragraphs from every source"),
    }

    let summary = run(&config)?;
    info!(
        "done: {} files, {} entries, {} skipped paragraphs, {} unknown entities",
        summary.files, summary.entries, summary.skipped_paragraphs, summary.unknown_entities
    );
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
