// src/bin/pass2bw.rs
//! pass2bw — export a pass/gopass store to a Bitwarden JSON import file
//!
//! Exit codes: 0 ok, 1 IO/config, 2 decryption, 3 store layout,
//! 4 finished but some entries were skipped (`--skip-failed`).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pass_export::config::expand_home;
use pass_export::{export_store, load_config, Config, CoreError, ErrorPolicy, ExportFormat};
use pass_export::{ExportReport, GpgDecryptor};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const EXIT_PARTIAL: u8 = 4;

#[derive(Parser, Debug)]
#[command(name = "pass2bw")]
#[command(about = "Export password-store data to Bitwarden JSON format")]
#[command(version)]
struct Cli {
    /// Directory of the password store
    #[arg(short, long)]
    directory: Option<String>,

    /// Path to the GPG binary
    #[arg(short = 'b', long)]
    gpg_binary: Option<String>,

    /// Use the GPG agent
    #[arg(short = 'a', long)]
    gpg_agent: bool,

    /// File to write the JSON to
    #[arg(short, long)]
    output_file: Option<String>,

    /// Output layout
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Leave out entries that fail to decrypt instead of aborting
    #[arg(long)]
    skip_failed: bool,

    /// TOML config file (defaults to $PASS2BW_CONFIG, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Flags win over the config file
    fn apply(self, config: &mut Config) {
        if let Some(directory) = self.directory {
            config.store.directory = directory;
        }
        if let Some(binary) = self.gpg_binary {
            config.gpg.binary = binary;
        }
        if self.gpg_agent {
            config.gpg.use_agent = true;
        }
        if let Some(file) = self.output_file {
            config.output.file = file;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.skip_failed {
            config.output.on_error = ErrorPolicy::Skip;
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()) {
        Ok(report) if report.is_complete() => ExitCode::SUCCESS,
        Ok(report) => {
            eprintln!("\n=== {} ENTRY(IES) SKIPPED ===", report.failures.len());
            for failed in &report.failures {
                eprintln!("{}/{}: {}", failed.website, failed.identifier, failed.reason);
            }
            ExitCode::from(EXIT_PARTIAL)
        }
        Err(err) => {
            error!("{err:#}");
            let code = err
                .downcast_ref::<CoreError>()
                .map(CoreError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<ExportReport> {
    let mut config =
        load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);

    let decryptor = GpgDecryptor::new(expand_home(&config.gpg.binary), config.gpg.use_agent);
    let report = export_store(&config, &decryptor)
        .with_context(|| format!("Export of {} failed", config.store_dir().display()))?;

    println!(
        "Exported {} credential(s) → {}",
        report.records.len(),
        config.output_path().display()
    );
    if report.ignored > 0 {
        println!("Ignored {} non-gpg file(s)", report.ignored);
    }
    println!("SECURITY: This file contains every password in cleartext — delete it after import!");

    Ok(report)
}
