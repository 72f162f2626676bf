//! confdoc - validate conference paper XML and report reading metrics.
//!
//! Reads a `<papers>` document (optionally inside a markdown code fence)
//! from a file or stdin and writes the validation report followed by the
//! per-paper calculations and LaTeX templates.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

use confdoc_config::{Config, OutputFormat, DEFAULT_LOG_FILTER};
use confdoc_report::Pipeline;

const DEMO_PAPERS: &str = include_str!("../../../demos/sample_papers.xml");

/// Command-line arguments for confdoc
#[derive(Parser, Debug)]
#[command(name = "confdoc")]
#[command(about = "Validate conference paper XML and compute reading metrics")]
#[command(version)]
struct Args {
    /// Input file; reads stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Output format (markdown or json); overrides the config file
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, env = "CONFDOC_CONFIG")]
    config: Option<PathBuf>,

    /// Process the bundled four-paper sample instead of reading input
    #[arg(long, conflicts_with = "input")]
    demo: bool,
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Subscriber writing to `writer`, plus a handle for swapping its filter once
/// the configuration is known.
fn logging_subscriber<W>(writer: W, filter: EnvFilter) -> (impl Subscriber + Send + Sync, FilterHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer));
    (subscriber, handle)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins; otherwise start from the default and apply the
    // configured filter after loading.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let filter_from_env = env_filter.is_some();
    let (subscriber, filter_handle) = logging_subscriber(
        io::stderr,
        env_filter.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER)),
    );
    subscriber.init();

    let config = match &args.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load confdoc.toml")?,
    };

    if !filter_from_env {
        filter_handle
            .reload(EnvFilter::new(&config.logging.filter))
            .context("Failed to apply logging filter")?;
    }
    debug!(?config, "Configuration loaded");

    let raw = read_input(&args)?;
    let pipeline = Pipeline::new(config.metrics.clone(), config.input.strip_markdown_fence);
    let report = pipeline.analyse(&raw);
    if !report.validation.is_valid() {
        warn!(
            errors = report.validation.errors().len(),
            "Input failed validation"
        );
    }

    let format = args.format.unwrap_or(config.output.format);
    let rendered = match format {
        OutputFormat::Markdown => report.render(),
        OutputFormat::Json => serde_json::to_string_pretty(&report)
            .context("Failed to serialise report as JSON")?,
    };

    write_output(args.output.as_ref(), &rendered)?;
    info!(papers = report.papers.len(), %format, "Report written");
    Ok(())
}

fn read_input(args: &Args) -> Result<String> {
    if args.demo {
        return Ok(DEMO_PAPERS.to_string());
    }
    match &args.input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&PathBuf>, rendered: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, format!("{rendered}\n"))
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{rendered}").context("Failed to write to stdout")
        }
    }
}
