//! Word-boundary-respecting character n-gram tokenization.
//!
//! Each whitespace-separated word is lowercased and padded with a single
//! space on both sides, then character n-grams are drawn from within the
//! padded word only. N-grams never cross word boundaries, so "Mc Cafe" and
//! "McCafe" still share most of their grams. Words shorter than the gram
//! size contribute the whole padded word once.

/// Tokenize text into character n-grams of sizes `min_gram..=max_gram`.
pub fn tokenize(text: &str, min_gram: usize, max_gram: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut grams = Vec::new();

    for word in lowered.split_whitespace() {
        let padded: Vec<char> = std::iter::once(' ')
            .chain(word.chars())
            .chain(std::iter::once(' '))
            .collect();

        for n in min_gram..=max_gram {
            if n == 0 {
                continue;
            }
            if padded.len() <= n {
                // Short word: emit it whole, once.
                grams.push(padded.iter().collect());
                break;
            }
            for window in padded.windows(n) {
                grams.push(window.iter().collect());
            }
        }
    }

    grams
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigrams_padded() {
        let grams = tokenize("uber", 3, 3);
        assert_eq!(grams, vec![" ub", "ube", "ber", "er "]);
    }

    #[test]
    fn test_no_cross_word_grams() {
        let grams = tokenize("co op", 3, 3);
        // Every gram comes from " co " or " op "; none spans the space
        // between the two words.
        assert_eq!(grams, vec![" co", "co ", " op", "op "]);
    }

    #[test]
    fn test_short_word_emitted_whole() {
        // " bp " has 4 chars; for n=5 the whole padded word is emitted once.
        let grams = tokenize("bp", 5, 5);
        assert_eq!(grams, vec![" bp "]);
    }

    #[test]
    fn test_variable_range() {
        let grams = tokenize("ab", 3, 5);
        // Padded length 4: 3-grams window, then the whole word for n=4,
        // and the range stops there.
        assert_eq!(grams, vec![" ab", "ab ", " ab "]);
    }

    #[test]
    fn test_case_folded() {
        assert_eq!(tokenize("KFC", 3, 3), tokenize("kfc", 3, 3));
    }

    #[test]
    fn test_empty_text() {
        assert!(tokenize("", 3, 5).is_empty());
    }
}
