//! Data models for KTP extraction.

pub mod config;
pub mod record;

pub use config::KartuConfig;
pub use record::{KtpRecord, NOT_FOUND};
