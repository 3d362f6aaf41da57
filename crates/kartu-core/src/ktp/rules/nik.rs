//! NIK (16-digit identity number) anchor location.

use tracing::debug;

use super::patterns::NIK_PATTERN;

/// Location of the NIK within the line sequence.
///
/// The line index is the lower bound for every later field search; scanners
/// never look at lines before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NikAnchor {
    /// Index of the line that actually held the 16-digit run.
    pub line_idx: usize,

    /// The 16-digit identity number.
    pub nik: String,
}

/// Locate the NIK and its line within the OCR line sequence.
///
/// The first line containing the literal `"NIK"` is checked for a 16-digit
/// run, then the line after it. The labeled scan stops at that first
/// occurrence even when neither line holds digits; a later `"NIK"` line is
/// never tried. When the labeled scan fails, every line is scanned in order
/// for the first 16-digit run.
pub fn locate_nik(lines: &[&str]) -> Option<NikAnchor> {
    if let Some(idx) = lines.iter().position(|line| line.contains("NIK")) {
        if let Some(m) = NIK_PATTERN.find(lines[idx]) {
            debug!("NIK found on label line {}", idx);
            return Some(NikAnchor {
                line_idx: idx,
                nik: m.as_str().to_string(),
            });
        }

        if let Some(next) = lines.get(idx + 1) {
            if let Some(m) = NIK_PATTERN.find(next) {
                debug!("NIK found on line {} following the label", idx + 1);
                return Some(NikAnchor {
                    line_idx: idx + 1,
                    nik: m.as_str().to_string(),
                });
            }
        }
    }

    // Labeled scan failed; take the first 16-digit run anywhere.
    lines.iter().enumerate().find_map(|(idx, line)| {
        NIK_PATTERN.find(line).map(|m| {
            debug!("NIK found by fallback scan on line {}", idx);
            NikAnchor {
                line_idx: idx,
                nik: m.as_str().to_string(),
            }
        })
    })
}
