//! Normalisation of raw form input before validation.

/// Keeps only ASCII digits, the way the phone input strips everything else.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Trimmed value, or `None` when nothing but whitespace was entered.
pub fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
