use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Spellings of the `Converted` column that count as a conversion once trimmed
/// and lowercased. Everything else, blanks included, is not converted.
const CONVERTED_TRUE_VALUES: &[&str] = &["true"];

/// Normalizes the free-text `Converted` flag into a boolean.
pub fn parse_conversion_flag(value: &str) -> bool {
    let normalized = value.trim().to_ascii_lowercase();
    CONVERTED_TRUE_VALUES.contains(&normalized.as_str())
}

/// Coerces a spreadsheet cell into a number. Currency symbols and thousands
/// separators are tolerated; anything unparseable is treated as missing.
pub fn coerce_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let cleaned = unsigned.replace(',', "");
    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|number| number.is_finite())
}

pub(crate) fn coerce_integer(value: &str) -> Option<i64> {
    coerce_number(value)
        .filter(|number| number.fract() == 0.0)
        .map(|number| number as i64)
}

/// Coerces a date cell. Accepts ISO dates, US-style dates and full timestamps;
/// the time component is discarded.
pub fn coerce_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%m/%d/%Y") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.date());
        }
    }

    None
}

pub(crate) fn clean_label(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.replace(['\u{feff}', '\u{200b}'], "").trim().to_string())
        .filter(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_flag_accepts_any_case_and_padding() {
        assert!(parse_conversion_flag("TRUE"));
        assert!(parse_conversion_flag("true"));
        assert!(parse_conversion_flag("True"));
        assert!(parse_conversion_flag(" true "));
        assert!(parse_conversion_flag("\ttRuE\n"));
    }

    #[test]
    fn conversion_flag_rejects_everything_else() {
        assert!(!parse_conversion_flag("FALSE"));
        assert!(!parse_conversion_flag(""));
        assert!(!parse_conversion_flag("   "));
        assert!(!parse_conversion_flag("yes"));
        assert!(!parse_conversion_flag("1"));
        assert!(!parse_conversion_flag("truee"));
    }

    #[test]
    fn numbers_tolerate_currency_formatting() {
        assert_eq!(coerce_number("125.50"), Some(125.5));
        assert_eq!(coerce_number(" $1,250 "), Some(1250.0));
        assert_eq!(coerce_number("0"), Some(0.0));
        assert_eq!(coerce_number("n/a"), None);
        assert_eq!(coerce_number(""), None);
        assert_eq!(coerce_number("$"), None);
        assert_eq!(coerce_number("NaN"), None);
    }

    #[test]
    fn integers_reject_fractions() {
        assert_eq!(coerce_integer("2024"), Some(2024));
        assert_eq!(coerce_integer("3.0"), Some(3));
        assert_eq!(coerce_integer("3.5"), None);
    }

    #[test]
    fn dates_accept_common_sheet_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(coerce_date("2024-03-07"), Some(expected));
        assert_eq!(coerce_date("03/07/2024"), Some(expected));
        assert_eq!(coerce_date("2024-03-07T09:30:00Z"), Some(expected));
        assert_eq!(coerce_date("2024-03-07 09:30:00"), Some(expected));
        assert_eq!(coerce_date("next week"), None);
        assert_eq!(coerce_date(" "), None);
    }

    #[test]
    fn labels_drop_invisible_characters_and_blanks() {
        assert_eq!(
            clean_label(Some("\u{feff} Google Ads ".to_string())),
            Some("Google Ads".to_string())
        );
        assert_eq!(clean_label(Some("  ".to_string())), None);
        assert_eq!(clean_label(None), None);
    }
}
