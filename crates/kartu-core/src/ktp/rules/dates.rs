//! Date-of-birth extraction and normalization.

use super::patterns::{BIRTH_DATE_KEYWORDS, DATE_PATTERN};

/// Raw day/month/year capture, numeric but not yet zero-padded or
/// century-resolved. Year length is 2 to 4 digits as captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTriple {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl DateTriple {
    /// Day within 1-31 and month within 1-12.
    fn is_plausible(&self) -> bool {
        let day: u32 = self.day.parse().unwrap_or(0);
        let month: u32 = self.month.parse().unwrap_or(0);
        (1..=31).contains(&day) && (1..=12).contains(&month)
    }
}

/// First date-pattern match in a line.
fn find_date(line: &str) -> Option<DateTriple> {
    DATE_PATTERN.captures(line).map(|caps| DateTriple {
        day: caps[1].to_string(),
        month: caps[2].to_string(),
        year: caps[3].to_string(),
    })
}

/// Scan lines after the anchor for the date of birth.
///
/// Contextual pass: every line whose lower-cased text mentions `lahir`, `tgl`
/// or `tanggal` is checked for a date together with the line after it; the
/// first match wins, with no range check. Fallback pass, only when the
/// contextual pass found nothing: the first date after the anchor whose day
/// is within 1-31 and month within 1-12; out-of-range matches skip the line.
pub fn extract_birth_date(lines: &[&str], anchor_idx: usize) -> Option<DateTriple> {
    for i in (anchor_idx + 1)..lines.len() {
        let lowered = lines[i].to_lowercase();
        if !BIRTH_DATE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            continue;
        }

        let end = lines.len().min(i + 2);
        for j in i..end {
            if let Some(triple) = find_date(lines[j]) {
                return Some(triple);
            }
        }
    }

    for line in &lines[anchor_idx + 1..] {
        if let Some(triple) = find_date(line) {
            if triple.is_plausible() {
                return Some(triple);
            }
        }
    }

    None
}

/// Format a raw triple as `DD-MM-YYYY`, repairing the year.
///
/// A 2-digit year at or below the reference year's last two digits becomes
/// 20xx, above it 19xx — a century heuristic, kept as observed behavior. A
/// 4-digit year with a leading `00` (a recurring OCR misread) becomes 20xx.
/// Anything else passes through unchanged. Day and month are zero-padded; no
/// days-in-month check is applied here.
pub fn format_birth_date(triple: &DateTriple, reference_year: i32) -> String {
    let year = normalize_year(&triple.year, reference_year);
    format!("{:0>2}-{:0>2}-{}", triple.day, triple.month, year)
}

fn normalize_year(year: &str, reference_year: i32) -> String {
    if year.len() == 2 {
        let value: i32 = year.parse().unwrap_or(0);
        let century = if value <= reference_year % 100 { "20" } else { "19" };
        format!("{}{}", century, year)
    } else if year.len() == 4 && year.starts_with("00") {
        format!("20{}", &year[2..])
    } else {
        year.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn triple(day: &str, month: &str, year: &str) -> DateTriple {
        DateTriple {
            day: day.to_string(),
            month: month.to_string(),
            year: year.to_string(),
        }
    }

    #[test]
    fn test_contextual_date_on_keyword_line() {
        let lines = ["1234567890123456", "Tempat/Tgl Lahir: JAKARTA, 17-08-1990"];
        assert_eq!(extract_birth_date(&lines, 0), Some(triple("17", "08", "1990")));
    }

    #[test]
    fn test_contextual_date_on_line_after_keyword() {
        let lines = ["1234567890123456", "Tempat/Tgl Lahir", "JAKARTA, 17-08-1990"];
        assert_eq!(extract_birth_date(&lines, 0), Some(triple("17", "08", "1990")));
    }

    #[test]
    fn test_contextual_pass_skips_no_range_check() {
        let lines = ["1234567890123456", "Tanggal Lahir", "32-13-1990"];
        assert_eq!(extract_birth_date(&lines, 0), Some(triple("32", "13", "1990")));
    }

    #[test]
    fn test_later_keyword_line_is_still_tried() {
        let lines = [
            "1234567890123456",
            "Gol. Darah Tgl",
            "Alamat",
            "Tanggal Lahir",
            "17-08-1990",
        ];
        assert_eq!(extract_birth_date(&lines, 0), Some(triple("17", "08", "1990")));
    }

    #[test]
    fn test_fallback_accepts_plausible_date() {
        let lines = ["1234567890123456", "JAKARTA", "17/08/1990"];
        assert_eq!(extract_birth_date(&lines, 0), Some(triple("17", "08", "1990")));
    }

    #[test]
    fn test_fallback_rejects_out_of_range_date() {
        let lines = ["1234567890123456", "32-13-1990"];
        assert_eq!(extract_birth_date(&lines, 0), None);
    }

    #[test]
    fn test_fallback_skips_invalid_line_then_accepts() {
        let lines = ["1234567890123456", "99-99-1990", "03.05.2005"];
        assert_eq!(extract_birth_date(&lines, 0), Some(triple("03", "05", "2005")));
    }

    #[test]
    fn test_whitespace_separator() {
        let lines = ["1234567890123456", "Lahir", "17 08 1990"];
        assert_eq!(extract_birth_date(&lines, 0), Some(triple("17", "08", "1990")));
    }

    #[test]
    fn test_lines_before_anchor_are_ignored() {
        let lines = ["Tanggal Lahir 17-08-1990", "1234567890123456"];
        assert_eq!(extract_birth_date(&lines, 1), None);
    }

    #[test]
    fn test_two_digit_year_resolves_to_1900s() {
        assert_eq!(format_birth_date(&triple("17", "8", "45"), 2025), "17-08-1945");
    }

    #[test]
    fn test_two_digit_year_resolves_to_2000s() {
        assert_eq!(format_birth_date(&triple("3", "5", "05"), 2025), "03-05-2005");
    }

    #[test]
    fn test_two_digit_year_equal_to_reference() {
        assert_eq!(format_birth_date(&triple("1", "1", "25"), 2025), "01-01-2025");
    }

    #[test]
    fn test_year_with_leading_zeros_is_repaired() {
        assert_eq!(format_birth_date(&triple("1", "1", "0004"), 2025), "01-01-2004");
    }

    #[test]
    fn test_correct_four_digit_year_passes_through() {
        assert_eq!(format_birth_date(&triple("17", "08", "1990"), 2025), "17-08-1990");
        // Re-normalizing the already-resolved year changes nothing.
        assert_eq!(normalize_year("1990", 2025), "1990");
        assert_eq!(normalize_year(&normalize_year("1990", 2025), 2025), "1990");
    }

    #[test]
    fn test_day_and_month_are_zero_padded() {
        assert_eq!(format_birth_date(&triple("7", "8", "1990"), 2025), "07-08-1990");
    }
}
