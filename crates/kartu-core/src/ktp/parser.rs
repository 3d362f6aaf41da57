//! Anchored KTP parser composing the rule-based field scanners.

use std::time::Instant;

use chrono::Datelike;
use tracing::{debug, info};

use crate::models::record::{KtpRecord, NOT_FOUND};
use crate::ocr::OcrResult;

use super::rules::{extract_birth_date, extract_name, format_birth_date, locate_nik};
use super::{KtpExtractor, Result};

/// Result of KTP extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: KtpRecord,
    /// Raw input text.
    pub raw_text: String,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for KTP parsing.
pub trait KtpParser {
    /// Parse the record from text.
    fn parse(&self, text: &str) -> Result<ExtractionResult>;
}

/// Rule-based parser anchored on the NIK line.
///
/// Every field search runs forward from the line holding the 16-digit
/// identity number. A field that fails to match never re-triggers the anchor
/// search, and no scanner revisits lines before the anchor.
pub struct AnchoredKtpParser {
    /// Reference year for resolving 2-digit birth years. `None` means the
    /// local year at extraction time.
    reference_year: Option<i32>,
}

impl AnchoredKtpParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            reference_year: None,
        }
    }

    /// Pin the reference year used for 2-digit year century resolution.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    fn reference_year(&self) -> i32 {
        self.reference_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }
}

impl Default for AnchoredKtpParser {
    fn default() -> Self {
        Self::new()
    }
}

impl KtpParser for AnchoredKtpParser {
    fn parse(&self, text: &str) -> Result<ExtractionResult> {
        let start = Instant::now();
        let mut warnings = Vec::new();

        let lines: Vec<&str> = text.trim().split('\n').collect();
        info!("Parsing KTP fields from {} lines", lines.len());

        let anchor = locate_nik(&lines);

        let (nama, birth_date) = match &anchor {
            Some(anchor) => (
                extract_name(&lines, anchor.line_idx),
                extract_birth_date(&lines, anchor.line_idx),
            ),
            None => (None, None),
        };

        if anchor.is_none() {
            warnings.push("Could not extract NIK".to_string());
        }
        if nama.is_none() {
            warnings.push("Could not extract name".to_string());
        }
        if birth_date.is_none() {
            warnings.push("Could not extract date of birth".to_string());
        }

        let record = KtpRecord {
            nik: anchor
                .map(|a| a.nik)
                .unwrap_or_else(|| NOT_FOUND.to_string()),
            nama: nama.unwrap_or_else(|| NOT_FOUND.to_string()),
            tanggal_lahir: birth_date
                .map(|t| format_birth_date(&t, self.reference_year()))
                .unwrap_or_else(|| NOT_FOUND.to_string()),
        };

        debug!(
            "Extracted record (NIK {}) with {} warnings",
            if record.nik == NOT_FOUND { "missing" } else { "present" },
            warnings.len()
        );

        Ok(ExtractionResult {
            record,
            raw_text: text.to_string(),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

impl KtpExtractor for AnchoredKtpParser {
    fn extract(&self, ocr_result: &OcrResult) -> Result<KtpRecord> {
        self.parse(&ocr_result.text).map(|r| r.record)
    }

    fn extract_from_text(&self, text: &str) -> Result<KtpRecord> {
        self.parse(text).map(|r| r.record)
    }
}
