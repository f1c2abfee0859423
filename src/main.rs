mod builder;
mod config;
mod error;
mod models;
mod output;
mod registry;
mod render;
mod utils;
mod workbook;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use builder::NetworkModel;
use config::Config;
use error::CcgError;
use output::OutputWriter;
use render::ConfigRenderer;
use workbook::Workbook;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generate Cisco device configuration files from a network workbook
#[derive(Debug, Parser)]
#[command(name = "ccg", version)]
struct Cli {
    /// Workbook file (JSON: sheet name -> rows)
    input: PathBuf,

    /// Directory for the generated files (overrides CCG_OUTPUT_DIR)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ccg=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    println!("+-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-+");
    println!("  Cisco Config Generator v{}", VERSION);
    println!("+-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-+");

    // clap prints usage and exits with code 2 when the input is missing
    let cli = Cli::parse();
    let cfg = Config::load();

    match run(&cli, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            println!("Script failed.");
            let code = e.downcast_ref::<CcgError>().map(CcgError::exit_code).unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run(cli: &Cli, cfg: &Config) -> anyhow::Result<()> {
    let workbook = Workbook::load(&cli.input)?;
    println!("Data read from: '{}'", cli.input.display());
    tracing::debug!("Sheets: {}", workbook.sheet_names().collect::<Vec<_>>().join(", "));

    let model = NetworkModel::build(&workbook)?;

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cfg.output_dir));
    let writer = OutputWriter::new(output_dir, cfg.file_prefix.clone());
    let renderer = ConfigRenderer::for_model(&model);
    tracing::debug!("Writing device files to {}", writer.output_dir().display());

    println!("\nGenerate config files:");
    for device in model.devices.values() {
        writer
            .write_device(&renderer, device)
            .with_context(|| format!("device {}", device.name))?;
        println!(
            "  -- New File: {: <22} [complete]",
            writer.file_name(&device.name)
        );
    }

    Ok(())
}
