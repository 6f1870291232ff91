use crate::config::ContractionTable;

/// Normalize raw text into the ordered token sequence used for alignment.
///
/// Steps, in order: lowercase, expand whole-word contractions, strip every
/// character that is not alphanumeric or whitespace, split on whitespace,
/// drop empty tokens. Total over all inputs: blank or punctuation-only text
/// yields an empty sequence, never an error.
///
/// The retained character class is Unicode alphanumerics, so accented
/// letters and non-Latin scripts survive; underscore does not.
pub fn normalize_text(text: &str, contractions: &ContractionTable) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let expanded = contractions.expand(&trimmed.to_lowercase());
    let cleaned: String = expanded
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().map(str::to_owned).collect()
}
