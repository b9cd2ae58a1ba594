use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use checksum_report_rs::config::{Settings, DEFAULT_SETTINGS_FILE};
use checksum_report_rs::prelude::*;

/// Environment variable holding a tracing filter, e.g. `debug`
const LOG_ENV: &str = "CHECKSUM_REPORT_LOG";

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Crc32,
    Md5,
    Sha1,
}

impl From<AlgorithmArg> for ChecksumAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Crc32 => ChecksumAlgorithm::Crc32,
            AlgorithmArg::Md5 => ChecksumAlgorithm::Md5,
            AlgorithmArg::Sha1 => ChecksumAlgorithm::Sha1,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Txt,
    Xlsx,
    Both,
}

impl FormatArg {
    fn formats(self) -> &'static [ReportFormat] {
        match self {
            FormatArg::Txt => &[ReportFormat::Text],
            FormatArg::Xlsx => &[ReportFormat::Spreadsheet],
            FormatArg::Both => &[ReportFormat::Text, ReportFormat::Spreadsheet],
        }
    }
}

#[derive(Parser)]
#[command(name = "checksum_report")]
#[command(about = "Checksum every file in a folder and export a numbered report", long_about = None)]
struct Cli {
    /// Folder to scan; reports are saved into it (default: last scanned folder)
    directory: Option<PathBuf>,

    /// Checksum algorithm (default: last used, else crc32)
    #[arg(short, long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Report format to export
    #[arg(short, long, value_enum, default_value = "txt")]
    format: FormatArg,

    /// Settings file remembering the last folder and algorithm
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,

    /// Run in batch mode (no progress bar)
    #[arg(long)]
    batch: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Ctrl-C stops the scan between files
    let shutdown_requested = Arc::new(AtomicBool::new(false));
    let shutdown_flag = shutdown_requested.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nShutdown requested. Stopping after the current file...");
        shutdown_flag.store(true, Ordering::SeqCst);
    })
    .context("Error setting Ctrl-C handler")?;

    let mut settings = Settings::load_or_default(&cli.config);

    let folder = match cli.directory.clone().or_else(|| settings.last_path.clone()) {
        Some(folder) => folder,
        None => bail!("No folder given and no previous folder remembered in {}", cli.config.display()),
    };
    let algorithm = cli
        .algorithm
        .map(ChecksumAlgorithm::from)
        .unwrap_or_else(|| settings.algorithm());

    let files = collect_files(&folder)
        .with_context(|| format!("Failed to list folder {}", folder.display()))?;
    println!("Scanning {} file(s) in {} with {}", files.len(), folder.display(), algorithm);

    let progress = if cli.batch {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        pb
    };

    let scanner = Scanner::new(algorithm).with_cancel_flag(shutdown_requested.clone());
    let mut records = Vec::with_capacity(files.len());
    for file in files.iter().progress_with(progress.clone()) {
        if scanner.is_cancelled() {
            break;
        }
        progress.set_message(file.name.clone());
        records.push(scanner.record_for(file));
    }

    if scanner.is_cancelled() {
        progress.abandon();
        eprintln!("Scan cancelled after {}/{} file(s); nothing exported", records.len(), files.len());
        return Ok(());
    }
    progress.finish_and_clear();

    settings.record_scan(&folder, algorithm);
    if let Err(e) = settings.save(&cli.config) {
        warn!(error = %e, "could not save settings");
    }

    let unreadable = records.iter().filter(|r| !r.has_digest()).count();
    println!("Scanned {} file(s)", records.len());
    if unreadable > 0 {
        println!("Could not read {} file(s); their checksum is left empty", unreadable);
    }

    for &format in cli.format.formats() {
        match export_report(&records, &folder, format, algorithm) {
            Ok(path) => println!("Saved to {}", path.display()),
            Err(ReportError::NoRecords) => {
                println!("No files found in the specified folder; nothing to export.");
                break;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to export {} report", format.extension()));
            }
        }
    }

    Ok(())
}
