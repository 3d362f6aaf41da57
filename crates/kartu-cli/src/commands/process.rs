//! Process command - extract fields from a single ID card image.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use kartu_core::ktp::{AnchoredKtpParser, ExtractionResult, KtpParser};
use kartu_core::models::config::KartuConfig;
use kartu_core::models::record::KtpRecord;
use kartu_core::ocr::PureOcrEngine;

use super::models::default_model_dir;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (image, or text with --text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Treat the input as already-recognized text, one OCR line per row
    #[arg(long)]
    text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        KartuConfig::from_file(std::path::Path::new(path))?
    } else {
        KartuConfig::default()
    };

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let text = if args.text {
        fs::read_to_string(&args.input)?
    } else {
        recognize_image(&args, &config)?
    };

    if text.trim().is_empty() {
        anyhow::bail!("No text detected in {}", args.input.display());
    }

    let result = build_parser(&config).parse(&text)?;

    report_warnings(&result);

    // Format output
    let output = format_record(&result.record, args.format)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Build a parser from the extraction configuration.
pub fn build_parser(config: &KartuConfig) -> AnchoredKtpParser {
    let mut parser = AnchoredKtpParser::new();
    if let Some(year) = config.extraction.reference_year {
        parser = parser.with_reference_year(year);
    }
    parser
}

/// Build the OCR engine from the model directory.
pub fn build_engine(
    model_dir: Option<&PathBuf>,
    config: &KartuConfig,
) -> anyhow::Result<PureOcrEngine> {
    let mut models = config.models.clone();
    models.model_dir = model_dir
        .cloned()
        .unwrap_or_else(|| default_model_dir(&config.models.model_dir));

    let det_model = models.model_dir.join(&models.detection_model);
    let rec_model = models.model_dir.join(&models.recognition_model);

    if !det_model.exists() || !rec_model.exists() {
        anyhow::bail!(
            "OCR models not found at {}.\n\n\
             Place '{}', '{}' and '{}' there, or pass --model-dir.",
            models.model_dir.display(),
            models.detection_model,
            models.recognition_model,
            models.dictionary,
        );
    }

    PureOcrEngine::from_model_config(&models, config.ocr.clone())
        .map_err(|e| anyhow::anyhow!("Failed to load OCR models: {}", e))
}

fn recognize_image(args: &ProcessArgs, config: &KartuConfig) -> anyhow::Result<String> {
    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if !matches!(extension.as_str(), "png" | "jpg" | "jpeg" | "tiff" | "bmp") {
        anyhow::bail!("Unsupported file format: {}", extension);
    }

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Loading image...");
    pb.set_position(10);

    let image = image::open(&args.input)?;

    pb.set_message("Loading OCR models...");
    pb.set_position(30);

    let engine = build_engine(args.model_dir.as_ref(), config)?;

    pb.set_message("Recognizing text...");
    pb.set_position(50);

    let result = engine
        .process(&image)
        .map_err(|e| anyhow::anyhow!("OCR failed: {}", e))?;

    pb.set_position(100);
    pb.finish_with_message("Done");

    debug!(
        "OCR detected {} text boxes in {}ms",
        result.boxes.len(),
        result.processing_time_ms
    );

    Ok(result.text)
}

fn report_warnings(result: &ExtractionResult) {
    if result.warnings.is_empty() {
        return;
    }

    eprintln!("{}", style("Extraction warnings:").yellow());
    for warning in &result.warnings {
        eprintln!("  - {}", warning);
    }
}

pub fn format_record(record: &KtpRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &KtpRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["NIK", "Nama", "Tanggal Lahir"])?;
    wtr.write_record([&record.nik, &record.nama, &record.tanggal_lahir])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &KtpRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("NIK:           {}\n", record.nik));
    output.push_str(&format!("Nama:          {}\n", record.nama));
    output.push_str(&format!("Tanggal Lahir: {}\n", record.tanggal_lahir));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_csv_has_header_and_row() {
        let record = KtpRecord {
            nik: "1234567890123456".to_string(),
            nama: "JOHN DOE".to_string(),
            tanggal_lahir: "17-08-1990".to_string(),
        };

        let csv = format_csv(&record).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("NIK,Nama,Tanggal Lahir"));
        assert_eq!(lines.next(), Some("1234567890123456,JOHN DOE,17-08-1990"));
    }

    #[test]
    fn test_format_text_lists_all_fields() {
        let text = format_text(&KtpRecord::empty());
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Tanggal Lahir: Not found"));
    }
}
