//! Whole-word occurrence counting

/// Count case-insensitive, whole-token occurrences of `word` in `text`.
///
/// The text is split on Unicode whitespace plus the ASCII information
/// separators U+001C..=U+001F, and a token only counts when it equals the
/// word exactly after lower-casing. Punctuation stays attached to its
/// token, so `"tabs,"` is not a match for `"tabs"`.
///
/// # Example
///
/// ```
/// use simulacra_domain::count_word_occurrences;
///
/// assert_eq!(count_word_occurrences("Tabs tabs TABSOLUTELY", "tabs"), 2);
/// ```
pub fn count_word_occurrences(text: &str, word: &str) -> u64 {
    let word = word.to_lowercase();
    text.to_lowercase()
        .split(is_separator)
        .filter(|token| !token.is_empty() && *token == word)
        .count() as u64
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
