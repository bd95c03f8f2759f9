//! Merchant noise injection.
//!
//! Real transaction feeds spell the same brand many ways ("McCafe",
//! "Mc Cafe", "MCCAFE"). The generator injects such near-duplicate variants
//! deliberately so the character n-gram branch has the signal it exists
//! for. Variants keep the merchant recognizable: one case flip, one spacing
//! change, one dropped character, or one adjacent swap.

use rand::Rng;
use rand::rngs::StdRng;

/// Return the merchant unchanged, or a near-duplicate variant with
/// probability `probability`.
pub fn maybe_variant(merchant: &str, probability: f64, rng: &mut StdRng) -> String {
    if probability <= 0.0 || !rng.random_bool(probability) {
        return merchant.to_string();
    }
    variant(merchant, rng)
}

/// Produce one near-duplicate variant of a merchant name.
pub fn variant(merchant: &str, rng: &mut StdRng) -> String {
    let chars: Vec<char> = merchant.chars().collect();
    match rng.random_range(0..4u8) {
        0 => case_flip(merchant, rng),
        1 => respace(&chars, rng),
        2 => drop_char(&chars, rng),
        _ => swap_adjacent(&chars, rng),
    }
}

fn case_flip(merchant: &str, rng: &mut StdRng) -> String {
    if rng.random_bool(0.5) {
        merchant.to_uppercase()
    } else {
        merchant.to_lowercase()
    }
}

/// Insert a space at an interior position, or squeeze an existing one.
fn respace(chars: &[char], rng: &mut StdRng) -> String {
    if chars.contains(&' ') {
        return chars.iter().filter(|&&c| c != ' ').collect();
    }
    if chars.len() < 3 {
        return chars.iter().collect();
    }
    let at = rng.random_range(1..chars.len());
    let mut out: Vec<char> = chars.to_vec();
    out.insert(at, ' ');
    out.into_iter().collect()
}

fn drop_char(chars: &[char], rng: &mut StdRng) -> String {
    if chars.len() < 4 {
        return chars.iter().collect();
    }
    let at = rng.random_range(0..chars.len());
    chars
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != at)
        .map(|(_, &c)| c)
        .collect()
}

fn swap_adjacent(chars: &[char], rng: &mut StdRng) -> String {
    if chars.len() < 4 {
        return chars.iter().collect();
    }
    let at = rng.random_range(0..chars.len() - 1);
    let mut out: Vec<char> = chars.to_vec();
    out.swap(at, at + 1);
    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_zero_probability_is_identity() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(maybe_variant("Starbucks", 0.0, &mut rng), "Starbucks");
        }
    }

    #[test]
    fn test_variant_never_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let v = variant("McDonalds", &mut rng);
            assert!(!v.is_empty());
        }
    }

    #[test]
    fn test_variant_stays_close() {
        // A variant differs from the original by at most one edit plus case.
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let v = variant("Vodafone", &mut rng);
            let orig = "vodafone";
            let folded: String = v.to_lowercase().chars().filter(|c| *c != ' ').collect();
            let len_diff = folded.chars().count().abs_diff(orig.chars().count());
            assert!(len_diff <= 1, "variant {v} drifted too far");
        }
    }

    #[test]
    fn test_respace_squeezes_existing_space() {
        let mut rng = StdRng::seed_from_u64(3);
        let chars: Vec<char> = "Local Market".chars().collect();
        assert_eq!(respace(&chars, &mut rng), "LocalMarket");
    }

    #[test]
    fn test_deterministic_for_seed() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            assert_eq!(
                maybe_variant("Sainsbury's", 0.5, &mut a),
                maybe_variant("Sainsbury's", 0.5, &mut b)
            );
        }
    }
}
