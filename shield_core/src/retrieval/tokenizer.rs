//! Bag-of-words tokenizer.

/// Minimum token length in characters
pub const MIN_TOKEN_CHARS: usize = 2;

/// Split text into lowercase word tokens.
///
/// Words are maximal runs of alphanumeric characters or `_`; words shorter
/// than [`MIN_TOKEN_CHARS`] are dropped. Works for any script, so Cyrillic
/// and Latin questions tokenize the same way.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| word.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
        .collect()
}
