use std::path::PathBuf;

use addrmerge::{Config, Dispatcher, Pipeline, PipelineConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "addrmerge",
    about = "Parse address files and output JSON sorted by ZIP code"
)]
struct Cli {
    /// Input files to process (.xml, .tsv or .txt).
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Write the JSON array here instead of the configured path (default output.json).
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// TOML config file layered over the built-in defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log parser decisions to stderr (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = Config::load(cli.config.as_deref())?;
    let mut pipeline_config = PipelineConfig::from_config(&config);
    if let Some(output) = cli.output {
        pipeline_config.output_path = output;
    }

    let summary = Pipeline::new(Dispatcher::new(&config), pipeline_config).run(&cli.files)?;

    println!("{}", summary.json);
    println!(
        "Successfully wrote {} addresses to {}",
        summary.records.len(),
        summary.output_path.display()
    );
    Ok(())
}
