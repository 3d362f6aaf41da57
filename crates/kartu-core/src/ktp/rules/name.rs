//! Name extraction from the window after the NIK anchor.

use super::patterns::{NAME_LABEL, UPPERCASE_NAME};

/// How many lines after the anchor are searched for the name.
pub const NAME_WINDOW: usize = 4;

/// Scan the window after the anchor line for the card holder's name.
///
/// Lines `(anchor, anchor + NAME_WINDOW]` are tried in order and the first
/// line matching a rule ends the search:
/// - a line that is exactly `Nama` names the following line;
/// - a line containing `Nama:` or `Nama :` names its own remainder after the
///   label — an empty remainder still counts as a match and yields an empty
///   name;
/// - an all-uppercase line of at least two words and more than five
///   characters is taken verbatim.
pub fn extract_name(lines: &[&str], anchor_idx: usize) -> Option<String> {
    let end = lines.len().min(anchor_idx + 1 + NAME_WINDOW);

    for i in (anchor_idx + 1)..end {
        let line = lines[i].trim();

        if line == "Nama" {
            if let Some(next) = lines.get(i + 1) {
                return Some(next.trim().to_string());
            }
        } else if line.contains("Nama:") || line.contains("Nama :") {
            return Some(NAME_LABEL.replace(line, "").trim().to_string());
        } else if UPPERCASE_NAME.is_match(line)
            && line.contains(' ')
            && line.split_whitespace().count() >= 2
            && line.chars().count() > 5
        {
            return Some(line.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bare_label_names_next_line() {
        let lines = ["1234567890123456", "Nama", "  JOHN DOE  "];
        assert_eq!(extract_name(&lines, 0), Some("JOHN DOE".to_string()));
    }

    #[test]
    fn test_bare_label_as_last_line() {
        let lines = ["1234567890123456", "Nama"];
        assert_eq!(extract_name(&lines, 0), None);
    }

    #[test]
    fn test_inline_label_with_colon() {
        let lines = ["1234567890123456", "Nama: JOHN DOE"];
        assert_eq!(extract_name(&lines, 0), Some("JOHN DOE".to_string()));
    }

    #[test]
    fn test_inline_label_with_spaced_colon() {
        let lines = ["1234567890123456", "Nama : SITI AMINAH"];
        assert_eq!(extract_name(&lines, 0), Some("SITI AMINAH".to_string()));
    }

    #[test]
    fn test_inline_label_with_empty_remainder() {
        // The label match ends the search even when nothing follows it; the
        // name becomes the empty string, not the sentinel.
        let lines = ["1234567890123456", "Nama :", "JOHN DOE"];
        assert_eq!(extract_name(&lines, 0), Some(String::new()));
    }

    #[test]
    fn test_uppercase_heuristic() {
        let lines = ["1234567890123456", "JOHN DOE"];
        assert_eq!(extract_name(&lines, 0), Some("JOHN DOE".to_string()));
    }

    #[test]
    fn test_uppercase_heuristic_rejects_single_word() {
        let lines = ["1234567890123456", "JAKARTA", "Alamat"];
        assert_eq!(extract_name(&lines, 0), None);
    }

    #[test]
    fn test_uppercase_heuristic_rejects_short_line() {
        // Two words but not more than five characters in total.
        let lines = ["1234567890123456", "JL M"];
        assert_eq!(extract_name(&lines, 0), None);
    }

    #[test]
    fn test_uppercase_heuristic_rejects_mixed_case() {
        let lines = ["1234567890123456", "Jalan Merdeka"];
        assert_eq!(extract_name(&lines, 0), None);
    }

    #[test]
    fn test_window_ends_four_lines_after_anchor() {
        let lines = [
            "1234567890123456",
            "a",
            "b",
            "c",
            "d",
            "Nama: JOHN DOE",
        ];
        assert_eq!(extract_name(&lines, 0), None);
    }

    #[test]
    fn test_label_on_last_window_line_names_line_outside_window() {
        let lines = ["1234567890123456", "a", "b", "c", "Nama", "JOHN DOE"];
        assert_eq!(extract_name(&lines, 0), Some("JOHN DOE".to_string()));
    }

    #[test]
    fn test_first_matching_line_ends_the_search() {
        let lines = ["1234567890123456", "Nama: BUDI SANTOSO", "JOHN DOE"];
        assert_eq!(extract_name(&lines, 0), Some("BUDI SANTOSO".to_string()));
    }
}
