//! Common regex patterns for KTP field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // 16-digit NIK run
    pub static ref NIK_PATTERN: Regex = Regex::new(r"\b\d{16}\b").unwrap();

    // Date triple: 1-2 digit day and month, 2-4 digit year, separated by
    // dash, slash, whitespace, or dot
    pub static ref DATE_PATTERN: Regex = Regex::new(
        r"(\d{1,2})[-/\s.](\d{1,2})[-/\s.](\d{2,4})"
    ).unwrap();

    // "Nama" label with optional colon and surrounding whitespace
    pub static ref NAME_LABEL: Regex = Regex::new(r"Nama\s*:?\s*").unwrap();

    // All-uppercase name heuristic (uppercase letters, spaces, periods, commas)
    pub static ref UPPERCASE_NAME: Regex = Regex::new(r"^[A-Z][A-Z\s.,]+$").unwrap();
}

/// Lower-cased keywords marking a date-of-birth line.
pub const BIRTH_DATE_KEYWORDS: [&str; 3] = ["lahir", "tgl", "tanggal"];
