//! Word n-gram tokenization.
//!
//! Splits text on Unicode word boundaries (UAX #29), lowercases, drops
//! single-character tokens, and expands the remaining tokens into n-grams.
//! Multi-word n-grams are joined with a single space, so "weekly shop"
//! yields the bigram term `"weekly shop"` alongside both unigrams.

use unicode_segmentation::UnicodeSegmentation;

/// Tokenize text into word n-grams of sizes `min_n..=max_n`.
pub fn tokenize(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .unicode_words()
        .filter(|w| w.chars().count() >= 2)
        .collect();

    let mut terms = Vec::new();
    for n in min_n..=max_n {
        if n == 0 || n > words.len() {
            continue;
        }
        for window in words.windows(n) {
            terms.push(window.join(" "));
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unigrams_and_bigrams() {
        let terms = tokenize("Tesco weekly shop", 1, 2);
        assert_eq!(
            terms,
            vec!["tesco", "weekly", "shop", "tesco weekly", "weekly shop"]
        );
    }

    #[test]
    fn test_short_tokens_dropped() {
        // "O2" survives (two chars); a lone "a" does not.
        let terms = tokenize("a O2 bill", 1, 1);
        assert_eq!(terms, vec!["o2", "bill"]);
    }

    #[test]
    fn test_punctuation_ignored() {
        let terms = tokenize("Sainsbury's, groceries!", 1, 1);
        assert_eq!(terms, vec!["sainsbury's", "groceries"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(tokenize("", 1, 2).is_empty());
    }

    #[test]
    fn test_ngram_larger_than_text() {
        // Only one token, so no bigrams are produced.
        let terms = tokenize("netflix", 1, 2);
        assert_eq!(terms, vec!["netflix"]);
    }
}
