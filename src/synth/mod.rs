//! Deterministic synthetic transaction generation.
//!
//! The generator consumes [`Settings`] and produces a labeled corpus whose
//! text, amount, and timestamp are all correlated with the category, so that
//! every feature branch carries real signal. Generation is seeded: the same
//! seed and settings always yield bit-identical records.
//!
//! Categories are generated in configured order, each with its requested
//! sample count clamped up to the per-category floor, followed by a small
//! fixed set of out-of-vocabulary rows used to sanity-check generalization.

pub mod amount;
pub mod noise;
pub mod time;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::config::Settings;
use crate::error::{FinsiftError, Result};
use crate::features::RawTransaction;

/// Generate the full labeled corpus described by `settings`.
///
/// # Errors
///
/// Fails fast with a configuration error if the category set, a vocabulary,
/// or an amount range is degenerate. Generation never emits empty text.
pub fn generate(settings: &Settings) -> Result<Vec<RawTransaction>> {
    settings.validate()?;

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut records = Vec::new();

    for category in &settings.categories {
        let count = settings.sample_count(category);
        generate_for_category(settings, category, count, &mut rng, &mut records)?;
    }

    append_generalization_rows(settings, &mut rng, &mut records)?;

    log::debug!(
        "generated {} records across {} categories",
        records.len(),
        settings.categories.len()
    );
    Ok(records)
}

fn generate_for_category(
    settings: &Settings,
    category: &str,
    count: usize,
    rng: &mut StdRng,
    records: &mut Vec<RawTransaction>,
) -> Result<()> {
    let entry = settings
        .vocab
        .get(category)
        .ok_or_else(|| FinsiftError::config(format!("no vocabulary for '{category}'")))?;
    let spec = settings.amount_spec(category);

    for _ in 0..count {
        let merchant = entry
            .merchants
            .choose(rng)
            .ok_or_else(|| FinsiftError::config(format!("empty merchants for '{category}'")))?;
        let description = entry
            .descriptions
            .choose(rng)
            .ok_or_else(|| FinsiftError::config(format!("empty descriptions for '{category}'")))?
            .clone();

        let merchant = noise::maybe_variant(merchant, settings.noise_probability, rng);

        records.push(RawTransaction {
            merchant,
            description,
            amount: amount::sample(spec, settings.default_ndigits, rng),
            timestamp: time::sample(&settings.time, category, rng)?,
            category: Some(category.to_string()),
        });
    }
    Ok(())
}

/// A few fixed rows with merchants outside the configured vocabulary,
/// appended to check that the model generalizes past exact brand matches.
fn append_generalization_rows(
    settings: &Settings,
    rng: &mut StdRng,
    records: &mut Vec<RawTransaction>,
) -> Result<()> {
    let extras: [(&str, &str, f64, &str); 4] = [
        ("HSBC", "PAYROLL BACS CREDIT", 1350.0, "Income"),
        ("STREAMIO", "monthly subscription", -8.99, "Entertainment"),
        ("QuickRide", "late night ride", -11.2, "Transport"),
        ("HSBC", "card payment", -24.99, "Other"),
    ];

    for (merchant, description, amount, category) in extras {
        if settings.category_index(category).is_none() {
            continue;
        }
        records.push(RawTransaction {
            merchant: merchant.to_string(),
            description: description.to_string(),
            amount,
            timestamp: time::sample(&settings.time, category, rng)?,
            category: Some(category.to_string()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_generation_is_deterministic() {
        let settings = Settings::default();
        let first = generate(&settings).unwrap();
        let second = generate(&settings).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_category_reaches_floor() {
        let settings = Settings::default();
        let records = generate(&settings).unwrap();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &records {
            let category = record.category.as_deref().unwrap();
            *counts.entry(category).or_insert(0) += 1;
        }

        for category in &settings.categories {
            let count = counts.get(category.as_str()).copied().unwrap_or(0);
            assert!(
                count >= settings.min_samples_per_category,
                "category '{category}' has only {count} samples"
            );
        }
    }

    #[test]
    fn test_text_never_empty() {
        let records = generate(&Settings::default()).unwrap();
        for record in &records {
            assert!(!record.merchant.is_empty());
            assert!(!record.description.is_empty());
        }
    }

    #[test]
    fn test_amount_sign_matches_category() {
        let settings = Settings::default();
        let records = generate(&Settings::default()).unwrap();

        for record in &records {
            let category = record.category.as_deref().unwrap();
            let spec = settings.amount_spec(category);
            if f64::from(spec.sign) > 0.0 {
                assert!(record.amount > 0.0, "{category} amount {}", record.amount);
            } else {
                assert!(record.amount < 0.0, "{category} amount {}", record.amount);
            }
        }
    }

    #[test]
    fn test_empty_vocabulary_fails_fast() {
        let mut settings = Settings::default();
        settings.vocab.get_mut("Shopping").unwrap().merchants.clear();

        let err = generate(&settings).unwrap_err();
        assert!(matches!(err, FinsiftError::Config(_)));
    }

    #[test]
    fn test_different_seeds_differ() {
        let settings = Settings::default();
        let mut other = Settings::default();
        other.seed = 43;

        assert_ne!(generate(&settings).unwrap(), generate(&other).unwrap());
    }
}
