//! Name normalization
//!
//! Names coming from documents and from building models differ in
//! numbering, padding and case ("Office 12 " vs "office"). Comparisons
//! are made on the normalized form only.

/// Remove decimal digit runs, lowercase, and trim surrounding whitespace.
///
/// Only ASCII `0-9` count as digits: unit marks such as "²" in "м²" and
/// numeral letters are part of the name. Pure and idempotent. Missing input should be passed as `""`, which
/// normalizes to `""`.
pub fn normalize(name: &str) -> String {
    let stripped: String = name.chars().filter(|c| !c.is_ascii_digit()).collect();
    stripped.to_lowercase().trim().to_string()
}

/// Returns true when the normalized `pattern` is non-empty and occurs in
/// the already normalized `haystack`.
///
/// An empty pattern never matches; otherwise it would match every name.
pub fn contains_normalized(haystack: &str, pattern: &str) -> bool {
    !pattern.is_empty() && haystack.contains(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_digits_case_and_padding() {
        assert_eq!(normalize("  Office 12 "), "office");
        assert_eq!(normalize("Room 1A"), "room a");
        assert_eq!(normalize("Коридор 3"), "коридор");
        assert_eq!(normalize("101"), "");
    }

    #[test]
    fn test_normalize_keeps_non_decimal_numerals() {
        assert_eq!(normalize("Зал 2, 40 м²"), "зал ,  м²");
        assert_eq!(normalize("Корпус Ⅳ"), "корпус ⅳ");
    }

    #[test]
    fn test_normalize_keeps_inner_spacing() {
        assert_eq!(normalize("Open  Office"), "open  office");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for name in ["", "  ", "Open Office #3", " 12 Kitchen ", "Холл 1 этаж", "A1B2C3"] {
            let once = normalize(name);
            assert_eq!(normalize(&once), once, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn test_empty_pattern_never_matches() {
        assert!(!contains_normalized("office", ""));
        assert!(!contains_normalized("", ""));
        assert!(contains_normalized("open office", "office"));
    }
}
