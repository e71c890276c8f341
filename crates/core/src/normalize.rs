use std::fmt;

use serde::{Deserialize, Serialize};

use crate::similarity::close_matches;
use crate::words::{digit_for_word, known_words};

/// Minimum similarity for a cleaned string to count as a number word.
pub const FUZZY_CUTOFF: f64 = 0.6;

/// Canonical form of recognised text: a digit string, the digit (or `@`) of a
/// number word, or the cleaned text itself when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_numeric(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(char::is_numeric)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token(s.to_string())
    }
}

/// Normalise raw OCR text into a single token.
pub fn normalize(text: &str) -> Token {
    let cleaned: String = text
        .to_lowercase()
        .trim()
        .replace(',', "")
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();

    let token = Token(cleaned);
    if token.is_numeric() {
        return token;
    }

    // The vocabulary is static and the arguments are in range.
    let best = close_matches(token.as_str(), known_words(), 1, FUZZY_CUTOFF)
        .ok()
        .and_then(|found| found.first().copied())
        .and_then(digit_for_word);

    match best {
        Some(digit) => Token::from(digit),
        None => token,
    }
}

/// Tokens of the reference text, one per whitespace-separated word, in reading order.
pub fn main_sequence(text: &str) -> Vec<Token> {
    text.replace(',', "")
        .split_whitespace()
        .map(normalize)
        .collect()
}
