//! Batch processing command for multiple ID card images.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use kartu_core::ktp::{KtpParser, AnchoredKtpParser};
use kartu_core::models::config::KartuConfig;
use kartu_core::models::record::KtpRecord;
use kartu_core::ocr::PureOcrEngine;

use super::process::{build_engine, build_parser, format_record};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: super::process::OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    record: Option<KtpRecord>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        KartuConfig::from_file(std::path::Path::new(path))?
    } else {
        KartuConfig::default()
    };

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(
                ext.to_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "tiff" | "bmp" | "txt"
            )
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let parser = build_parser(&config);

    // The engine loads models once and is reused for every image; text files
    // never need it.
    let mut engine: Option<PureOcrEngine> = None;

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &parser, &mut engine, &args, &config);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(record) => {
                debug!("Processed {}", path.display());
                results.push(ProcessResult {
                    path,
                    record: Some(record),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                warn!("Failed to process {}: {}", path.display(), e);
                results.push(ProcessResult {
                    path: path.clone(),
                    record: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                });

                if !args.continue_on_error {
                    pb.abandon_with_message("Aborted");
                    anyhow::bail!("Failed to process {}: {}", path.display(), e);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");

    // Write per-file outputs
    if let Some(ref output_dir) = args.output_dir {
        for result in &results {
            let Some(ref record) = result.record else {
                continue;
            };

            let file_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            let extension = match args.format {
                super::process::OutputFormat::Json => "json",
                super::process::OutputFormat::Csv => "csv",
                super::process::OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", file_name, extension));
            fs::write(&output_path, format_record(record, args.format)?)?;
        }
    } else {
        for result in &results {
            if let Some(ref record) = result.record {
                println!("{}", result.path.display());
                println!("{}", format_record(record, args.format)?);
            }
        }
    }

    // Write summary CSV
    if args.summary {
        let summary_path = args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("summary.csv");
        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let succeeded = results.iter().filter(|r| r.record.is_some()).count();
    let failed = results.len() - succeeded;

    println!();
    println!(
        "{} Processed {} files in {:.1}s ({} ok, {} failed)",
        style("✓").green(),
        results.len(),
        start.elapsed().as_secs_f64(),
        succeeded,
        failed
    );

    Ok(())
}

fn process_single_file(
    path: &Path,
    parser: &AnchoredKtpParser,
    engine: &mut Option<PureOcrEngine>,
    args: &BatchArgs,
    config: &KartuConfig,
) -> anyhow::Result<KtpRecord> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = if ext == "txt" {
        fs::read_to_string(path)?
    } else {
        if engine.is_none() {
            *engine = Some(build_engine(args.model_dir.as_ref(), config)?);
        }
        let image = image::open(path)?;
        engine
            .as_ref()
            .unwrap()
            .process(&image)
            .map_err(|e| anyhow::anyhow!("OCR failed: {}", e))?
            .text
    };

    if text.trim().is_empty() {
        anyhow::bail!("No text detected");
    }

    Ok(parser.parse(&text)?.record)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["file", "nik", "nama", "tanggal_lahir", "error", "time_ms"])?;

    for result in results {
        let empty = KtpRecord::empty();
        let record = result.record.as_ref().unwrap_or(&empty);
        wtr.write_record([
            &result.path.display().to_string(),
            &record.nik,
            &record.nama,
            &record.tanggal_lahir,
            &result.error.clone().unwrap_or_default(),
            &result.processing_time_ms.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
