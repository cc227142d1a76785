use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use flipprobe::HostConfig;
use page::Page;

#[derive(Parser, Debug)]
#[command(name = "flipprobe", version)]
/// Load an HTML document and answer getBoundingClientRects requests over JSON lines
/// (stdin in, stdout out).
struct Cli {
    /// HTML document to load.
    #[arg(long)]
    document: PathBuf,

    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides `viewport_width` from the config.
    #[arg(long)]
    viewport_width: Option<f32>,

    /// Overrides `frame_interval_ms` from the config.
    #[arg(long)]
    frame_interval_ms: Option<u64>,

    /// Overrides the attribute ids are looked up by.
    #[arg(long)]
    attribute: Option<String>,
}

fn resolve_config(cli: &Cli) -> anyhow::Result<HostConfig> {
    let mut config = match &cli.config {
        Some(path) => HostConfig::load(path)?,
        None => HostConfig::default(),
    };
    if let Some(width) = cli.viewport_width {
        config.viewport_width = width;
    }
    if let Some(interval) = cli.frame_interval_ms {
        config.frame_interval_ms = interval;
    }
    if let Some(attribute) = &cli.attribute {
        config.attribute = attribute.clone();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let source = fs::read_to_string(&cli.document)
        .with_context(|| format!("failed to read {}", cli.document.display()))?;

    let page = Page::from_html(&source, config.viewport(), config.attribute.clone());
    log::info!(
        target: "flipprobe.host",
        "loaded {} ({}x{}), frame every {} ms, ids from [{}]",
        cli.document.display(),
        config.viewport_width,
        config.viewport_height,
        config.frame_interval_ms,
        config.attribute
    );

    let page = flipprobe::serve(io::stdin().lock(), io::stdout(), page, &config)?;
    log::debug!(target: "flipprobe.host", "served {} frames", page.frame_id());
    Ok(())
}
