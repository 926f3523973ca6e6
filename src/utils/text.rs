//! Text normalization shared by the resolver and the classifier.

/// Normalize text for format-insensitive comparison.
///
/// Lower-cases the input and removes every whitespace, hyphen, underscore and
/// period character, so "E-621", "e621" and "e 621" all become `e621`.
///
/// # Examples
///
/// ```
/// use maa_scan::utils::text::normalize;
///
/// assert_eq!(normalize("E-621"), "e621");
/// assert_eq!(normalize("Monosodium Glutamate"), "monosodiumglutamate");
/// assert_eq!(normalize("en:e_330."), "en:e330");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !is_separator(*c))
        .collect()
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '_' | '.')
}

/// Strip leading `'0'` characters from a scanned code.
#[must_use]
pub fn strip_leading_zeros(code: &str) -> &str {
    code.trim_start_matches('0')
}

/// Length of a code in characters (not bytes).
#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_separators() {
        assert_eq!(normalize("Contains E-621"), "containse621");
        assert_eq!(normalize("contains e621"), "containse621");
        assert_eq!(normalize("stabilizer\t440"), "stabilizer440");
        assert_eq!(normalize("a_b.c-d e"), "abcde");
    }

    #[test]
    fn test_normalize_keeps_other_punctuation() {
        assert_eq!(
            normalize("Thickeners (508, 412)"),
            "thickeners(508,412)"
        );
        assert_eq!(normalize("en:e621"), "en:e621");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" -_. "), "");
    }

    #[test]
    fn test_strip_leading_zeros() {
        assert_eq!(strip_leading_zeros("00123456"), "123456");
        assert_eq!(strip_leading_zeros("123"), "123");
        assert_eq!(strip_leading_zeros("1020"), "1020");
        assert_eq!(strip_leading_zeros("000"), "");
    }

    #[test]
    fn test_char_len_counts_chars() {
        assert_eq!(char_len("abc"), 3);
        assert_eq!(char_len("é12"), 3);
    }
}
