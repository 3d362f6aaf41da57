//! Core library for Indonesian KTP (identity card) OCR processing.
//!
//! This crate provides:
//! - OCR boundary types and a pure Rust engine wrapper
//! - KTP field extraction (NIK, name, date of birth)
//! - Output record and configuration models

pub mod error;
pub mod ktp;
pub mod models;
pub mod ocr;

pub use error::{ExtractionError, KartuError, OcrError, Result};
pub use ktp::{AnchoredKtpParser, ExtractionResult, KtpExtractor, KtpParser};
pub use models::config::KartuConfig;
pub use models::record::{KtpRecord, NOT_FOUND};
pub use ocr::{OcrResult, TextBox};

#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
