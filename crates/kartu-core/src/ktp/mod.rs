//! KTP field extraction module.

mod parser;
pub mod rules;

pub use parser::{AnchoredKtpParser, ExtractionResult, KtpParser};

use crate::error::ExtractionError;
use crate::models::record::KtpRecord;
use crate::ocr::OcrResult;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for KTP field extractors.
pub trait KtpExtractor {
    /// Extract the record from an OCR result.
    fn extract(&self, ocr_result: &OcrResult) -> Result<KtpRecord>;

    /// Extract the record from plain text.
    fn extract_from_text(&self, text: &str) -> Result<KtpRecord>;
}
