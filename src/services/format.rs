//! Pure text transforms between scanned result data and the portal's entry
//! conventions. Everything here is independent of DOM state.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\d]").expect("valid regex"));

/// Rewrite a swim time into the portal's fixed-width digit convention.
///
/// All non-digits are stripped, then the digits are left-padded with zeros to
/// 6 characters when the race label contains "500" and 5 otherwise (the
/// portal's two time-entry field widths). Overlong input keeps its rightmost
/// digits so the seconds/hundredths alignment survives.
pub fn format_swim_time(time: &str, race_label: &str) -> String {
    let digits: String = NON_DIGIT.replace_all(time, "").into_owned();
    let width = if race_label.contains("500") { 6 } else { 5 };

    if digits.len() >= width {
        digits.chars().skip(digits.len() - width).collect()
    } else {
        format!("{:0>width$}", digits, width = width)
    }
}

/// Rewrite a stored "First Last" name into the "Last, First" form the
/// portal's autocomplete expects.
///
/// With more than two tokens the final token is taken as the surname and the
/// rest as given names. Single-token names pass through unchanged.
pub fn format_swimmer_name(name: &str) -> String {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    match tokens.as_slice() {
        [] => String::new(),
        [only] => (*only).to_string(),
        [given @ .., last] => format!("{}, {}", last, given.join(" ")),
    }
}

/// Normalize one scraped table cell: line breaks removed, internal whitespace
/// runs collapsed to a single space, ends trimmed.
pub fn clean_cell(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw, " ").trim().to_string()
}

/// Drop the decorative "Power Points" tail the portal appends to the
/// opponent column.
pub fn strip_opponent_decoration(opponent: &str) -> String {
    opponent
        .split("Power Points")
        .next()
        .unwrap_or(opponent)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_examples() {
        assert_eq!(format_swim_time("1:23.45", "200 Free"), "12345");
        assert_eq!(format_swim_time("4:59.99", "500 Free"), "045999");
    }

    #[test]
    fn test_time_width_is_fixed_for_any_input() {
        for input in ["", "5", "23.45", "1:23.45", "10:23.45", "1:00:23.45"] {
            assert_eq!(format_swim_time(input, "100 Back").len(), 5, "input {:?}", input);
            assert_eq!(format_swim_time(input, "500 Free").len(), 6, "input {:?}", input);
        }
    }

    #[test]
    fn test_time_overlong_keeps_rightmost_digits() {
        // 7 digits into a 5-wide field: the minutes overflow is dropped, the
        // seconds/hundredths stay aligned.
        assert_eq!(format_swim_time("1:04:59.99", "100 Free"), "45999");
    }

    #[test]
    fn test_time_pads_short_input() {
        assert_eq!(format_swim_time("23.45", "50 Free"), "02345");
        assert_eq!(format_swim_time("", "50 Free"), "00000");
    }

    #[test]
    fn test_name_two_tokens() {
        assert_eq!(format_swimmer_name("John Smith"), "Smith, John");
    }

    #[test]
    fn test_name_round_trips_two_token_input() {
        for name in ["John Smith", "Amy Jones", "Li Wang"] {
            let rewritten = format_swimmer_name(name);
            let (last, first) = rewritten.split_once(", ").unwrap();
            assert_eq!(format!("{} {}", first, last), name);
        }
    }

    #[test]
    fn test_name_edge_shapes() {
        assert_eq!(format_swimmer_name("Madonna"), "Madonna");
        assert_eq!(format_swimmer_name(""), "");
        assert_eq!(format_swimmer_name("  John   Smith "), "Smith, John");
        assert_eq!(format_swimmer_name("Mary Jo Kane"), "Kane, Mary Jo");
    }

    #[test]
    fn test_clean_cell_removes_breaks_and_collapses_runs() {
        assert_eq!(clean_cell("12/4\n4:00pm"), "12/4 4:00pm");
        assert_eq!(clean_cell("  W   123-47  "), "W 123-47");
        assert_eq!(clean_cell("Robbinsville\r\n  High"), "Robbinsville High");
        assert!(!clean_cell("a\nb\nc").contains('\n'));
    }

    #[test]
    fn test_strip_opponent_decoration() {
        assert_eq!(
            strip_opponent_decoration("Robbinsville Power Points: 12.3"),
            "Robbinsville"
        );
        assert_eq!(strip_opponent_decoration("Robbinsville"), "Robbinsville");
    }
}
