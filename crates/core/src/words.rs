/// Digit (or `@`) to English word, in lookup order.
pub const NUMBER_WORDS: &[(&str, &str)] = &[
    ("0", "zero"),
    ("1", "one"),
    ("2", "two"),
    ("3", "three"),
    ("4", "four"),
    ("5", "five"),
    ("6", "six"),
    ("7", "seven"),
    ("8", "eight"),
    ("9", "nine"),
    ("@", "a"),
];

pub fn word_for_digit(digit: &str) -> Option<&'static str> {
    NUMBER_WORDS
        .iter()
        .find(|(d, _)| *d == digit)
        .map(|(_, w)| *w)
}

pub fn digit_for_word(word: &str) -> Option<&'static str> {
    NUMBER_WORDS
        .iter()
        .find(|(_, w)| *w == word)
        .map(|(d, _)| *d)
}

/// The fuzzy-match vocabulary.
pub fn known_words() -> impl Iterator<Item = &'static str> {
    NUMBER_WORDS.iter().map(|(_, w)| *w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_bidirectional() {
        for (digit, word) in NUMBER_WORDS {
            assert_eq!(word_for_digit(digit), Some(*word));
            assert_eq!(digit_for_word(word), Some(*digit));
        }
    }

    #[test]
    fn at_sign_maps_to_a() {
        assert_eq!(digit_for_word("a"), Some("@"));
        assert_eq!(word_for_digit("@"), Some("a"));
    }

    #[test]
    fn unknown_entries_miss() {
        assert_eq!(digit_for_word("ten"), None);
        assert_eq!(word_for_digit("10"), None);
        assert_eq!(digit_for_word("One"), None);
    }

    #[test]
    fn vocabulary_order() {
        let words: Vec<_> = known_words().collect();
        assert_eq!(words.len(), 11);
        assert_eq!(words.first(), Some(&"zero"));
        assert_eq!(words.last(), Some(&"a"));
    }
}
