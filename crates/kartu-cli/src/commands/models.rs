//! Models command - inspect and manage OCR model files.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use kartu_core::models::config::ModelConfig;

/// Arguments for the models command.
#[derive(Args)]
pub struct ModelsArgs {
    #[command(subcommand)]
    command: ModelsCommand,
}

#[derive(Subcommand)]
enum ModelsCommand {
    /// List the model files the OCR engine expects
    List,

    /// Check model status
    Status(StatusArgs),

    /// Remove model files
    Clean(CleanArgs),
}

#[derive(Args)]
struct StatusArgs {
    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

#[derive(Args)]
struct CleanArgs {
    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Do not ask for confirmation
    #[arg(long)]
    force: bool,
}

/// Resolve the model directory: an existing configured path wins, otherwise
/// the per-user data directory.
pub fn default_model_dir(configured: &Path) -> PathBuf {
    if configured.exists() {
        return configured.to_path_buf();
    }

    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kartu")
        .join("models")
}

pub async fn run(args: ModelsArgs) -> anyhow::Result<()> {
    match args.command {
        ModelsCommand::List => list_models(),
        ModelsCommand::Status(status_args) => show_status(status_args),
        ModelsCommand::Clean(clean_args) => clean_models(clean_args),
    }
}

fn expected_files(models: &ModelConfig) -> [&String; 3] {
    [
        &models.detection_model,
        &models.recognition_model,
        &models.dictionary,
    ]
}

fn list_models() -> anyhow::Result<()> {
    let models = ModelConfig::default();

    println!("Expected model files:");
    println!("  {}  (text detection)", models.detection_model);
    println!("  {}  (text recognition)", models.recognition_model);
    println!("  {}  (character dictionary)", models.dictionary);
    println!();
    println!(
        "Default directory: {}",
        default_model_dir(&models.model_dir).display()
    );

    Ok(())
}

fn show_status(args: StatusArgs) -> anyhow::Result<()> {
    let models = ModelConfig::default();
    let model_dir = args
        .model_dir
        .unwrap_or_else(|| default_model_dir(&models.model_dir));

    println!("Model directory: {}", model_dir.display());
    println!();

    let mut missing = 0;
    for file in expected_files(&models) {
        let path = model_dir.join(file);
        match fs::metadata(&path) {
            Ok(meta) => {
                println!(
                    "  {} {}  ({:.1} MB)",
                    style("✓").green(),
                    file,
                    meta.len() as f64 / (1024.0 * 1024.0)
                );
            }
            Err(_) => {
                println!("  {} {}  (missing)", style("✗").red(), file);
                missing += 1;
            }
        }
    }

    if missing > 0 {
        println!();
        println!(
            "{} {} file(s) missing. Place PaddleOCR-compatible ONNX models in the directory above.",
            style("ℹ").blue(),
            missing
        );
    }

    Ok(())
}

fn clean_models(args: CleanArgs) -> anyhow::Result<()> {
    let models = ModelConfig::default();
    let model_dir = args
        .model_dir
        .unwrap_or_else(|| default_model_dir(&models.model_dir));

    if !model_dir.exists() {
        println!(
            "{} Nothing to clean at {}",
            style("ℹ").blue(),
            model_dir.display()
        );
        return Ok(());
    }

    if !args.force {
        anyhow::bail!(
            "This removes all model files under {}. Re-run with --force to confirm.",
            model_dir.display()
        );
    }

    fs::remove_dir_all(&model_dir)?;
    println!(
        "{} Removed model directory {}",
        style("✓").green(),
        model_dir.display()
    );

    Ok(())
}
