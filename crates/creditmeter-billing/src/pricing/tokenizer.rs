//! Message tokenizer
//!
//! Apostrophes and hyphens stay inside words (`don't`, `self-aware`);
//! every other non-alphanumeric character is a word boundary. Runs of
//! punctuation collapse into a single separator, so they never produce
//! empty words.
//!
//! Alphanumeric means a letter (`L*`) or number (`N*`) general category.
//! Combining marks such as Devanagari vowel signs are boundaries even
//! though `char::is_alphanumeric` accepts them.

use unicode_general_category::{get_general_category, GeneralCategory};

fn is_word_char(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

/// Split message text into lower-cased words
pub fn tokenize(text: &str) -> Vec<String> {
    let mut cleaned = String::with_capacity(text.len());

    for c in text.chars() {
        if is_word_char(c) || matches!(c, '\'' | '-' | ' ') {
            cleaned.push(c);
        } else if !cleaned.ends_with(' ') {
            cleaned.push(' ');
        }
    }

    cleaned
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
