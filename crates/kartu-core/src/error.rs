//! Error types for the kartu-core library.

use thiserror::Error;

/// Main error type for the kartu library.
#[derive(Error, Debug)]
pub enum KartuError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// KTP extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text detection or recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors surfaced by adapters around the extraction pipeline.
///
/// The pipeline itself never fails on a valid line sequence; these variants
/// cover the boundaries that feed it.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The input produced no text at all.
    #[error("no text to extract from")]
    EmptyInput,

    /// Failed to parse a value.
    #[error("failed to parse {field}: {value}")]
    Parse { field: String, value: String },
}

/// Result type for the kartu library.
pub type Result<T> = std::result::Result<T, KartuError>;
