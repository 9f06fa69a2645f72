use hangman_types::Word;
use rand::seq::IndexedRandom;

use crate::GameError;

/// Words inserted when the store is initialized empty or reset
pub const DEFAULT_WORDS: &[&str] = &["PYTHON", "FLASK", "GATO", "MANZANA", "COMPUTADORA"];

/// Normalize a word before it enters the store.
/// Trims and uppercases; rejects empty or non-alphabetic text.
pub fn normalize_word(text: &str) -> Result<String, GameError> {
    let normalized = text.trim().to_uppercase();
    if normalized.is_empty() || !normalized.chars().all(|c| c.is_alphabetic()) {
        return Err(GameError::InvalidWord {
            text: text.to_string(),
        });
    }
    Ok(normalized)
}

/// Uniform random choice over the available words
pub fn pick_random(words: &[Word]) -> Result<&Word, GameError> {
    words.choose(&mut rand::rng()).ok_or(GameError::EmptyStore)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("gato").unwrap(), "GATO");
        assert_eq!(normalize_word("  Manzana ").unwrap(), "MANZANA");
        assert_eq!(normalize_word("pingüino").unwrap(), "PINGÜINO");
    }

    #[test]
    fn test_normalize_word_rejects_invalid_text() {
        for text in ["", "   ", "abc1", "two words", "semi-colon"] {
            let err = normalize_word(text).unwrap_err();
            assert!(matches!(err, GameError::InvalidWord { .. }), "{text:?}");
        }
    }

    #[test]
    fn test_pick_random_from_empty_store() {
        assert!(matches!(pick_random(&[]), Err(GameError::EmptyStore)));
    }

    #[test]
    fn test_pick_random_single_word() {
        let words = vec![Word::new(1, "GATO")];
        assert_eq!(pick_random(&words).unwrap().text, "GATO");
    }

    #[test]
    fn test_pick_random_reaches_every_word() {
        let words: Vec<Word> = DEFAULT_WORDS
            .iter()
            .enumerate()
            .map(|(i, text)| Word::new(i as i32 + 1, *text))
            .collect();

        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.insert(pick_random(&words).unwrap().id);
        }
        assert_eq!(seen.len(), words.len());
    }

    #[test]
    fn test_default_words_are_normalized() {
        for word in DEFAULT_WORDS {
            assert_eq!(normalize_word(word).unwrap(), *word);
        }
    }
}
