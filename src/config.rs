//! Configuration for synthesis, feature extraction, and training.
//!
//! All knobs live in a single immutable [`Settings`] structure that is built
//! once at startup and threaded through generation, feature building, and
//! training. [`Settings::default`] carries the built-in category catalog;
//! [`Settings::validate`] fails fast on degenerate configuration before any
//! data is generated.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{FinsiftError, Result};

/// Default ISO timestamp used when a request timestamp cannot be parsed.
pub const DEFAULT_ISO_DATETIME: &str = "2025-08-24T09:00:00";

/// Per-category text vocabulary used by the synthetic data generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabEntry {
    /// Merchant names seen for this category.
    pub merchants: Vec<String>,
    /// Free-text descriptions seen for this category.
    pub descriptions: Vec<String>,
}

impl VocabEntry {
    /// Build an entry from string slices.
    pub fn new(merchants: &[&str], descriptions: &[&str]) -> Self {
        VocabEntry {
            merchants: merchants.iter().map(|s| s.to_string()).collect(),
            descriptions: descriptions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Inclusive range and sign used to sample a monetary amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AmountSpec {
    /// Inclusive lower bound of the absolute amount.
    pub low: f64,
    /// Inclusive upper bound of the absolute amount.
    pub high: f64,
    /// Direction of the amount: 1 for income, -1 for expense.
    pub sign: i8,
}

impl AmountSpec {
    /// Create an expense spec (negative amounts).
    pub fn expense(low: f64, high: f64) -> Self {
        AmountSpec {
            low,
            high,
            sign: -1,
        }
    }

    /// Create an income spec (positive amounts).
    pub fn income(low: f64, high: f64) -> Self {
        AmountSpec { low, high, sign: 1 }
    }
}

/// Parameters that control generation of synthetic timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSettings {
    /// Start point for all generated timestamps.
    pub base_date: NaiveDateTime,
    /// Per-category fixed hour lists (e.g. dining skews lunch/evening).
    pub hour_choices: HashMap<String, Vec<u32>>,
    /// Fallback inclusive hour range for categories without fixed hours.
    pub default_hour_range: (u32, u32),
    /// Inclusive day-offset window added to the base date.
    pub day_offset_range: (i64, i64),
}

/// Featurizer and classifier hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Fraction of the corpus held out for evaluation.
    pub test_size: f64,
    /// Word n-gram range over `combined_text` (unigrams + bigrams).
    pub word_ngram: (usize, usize),
    /// Minimum document frequency for a word n-gram to enter the vocabulary.
    pub word_min_df: usize,
    /// Upper bound on the word vocabulary size.
    pub word_max_features: usize,
    /// Character n-gram range over `merchant_text` (word-boundary respecting).
    pub char_ngram: (usize, usize),
    /// Minimum document frequency for a character n-gram.
    pub char_min_df: usize,
    /// Upper bound on the character vocabulary size.
    pub char_max_features: usize,
    /// Gradient descent step size for the softmax solver.
    pub learning_rate: f64,
    /// L2 regularization strength (bias excluded).
    pub l2_penalty: f64,
    /// Iteration budget for the solver; exceeding it is a warning, not an error.
    pub max_iter: usize,
    /// Absolute loss-change threshold that counts as convergence.
    pub tolerance: f64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        ModelSettings {
            test_size: 0.2,
            word_ngram: (1, 2),
            word_min_df: 2,
            word_max_features: 20_000,
            char_ngram: (3, 5),
            char_min_df: 2,
            char_max_features: 20_000,
            learning_rate: 0.1,
            l2_penalty: 1e-4,
            max_iter: 2000,
            tolerance: 1e-7,
        }
    }
}

/// Single source of truth for all knobs affecting synthesis and training.
///
/// Loaded once at process start and read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Closed category set, in ranking tie-break order.
    pub categories: Vec<String>,
    /// Per-category text vocabulary.
    pub vocab: HashMap<String, VocabEntry>,
    /// Per-category amount distributions.
    pub amounts: HashMap<String, AmountSpec>,
    /// Amount distribution for categories without an explicit spec.
    pub default_amount: AmountSpec,
    /// Decimal places for generated amounts.
    pub default_ndigits: u32,
    /// Timestamp synthesis parameters.
    pub time: TimeSettings,
    /// Featurizer/classifier hyperparameters.
    pub model: ModelSettings,
    /// Default number of generated samples per category.
    pub samples_per_category: usize,
    /// Per-category sample count overrides.
    pub per_category_overrides: HashMap<String, usize>,
    /// Minimum per-category count the generated corpus must reach.
    pub min_samples_per_category: usize,
    /// Probability of emitting a near-duplicate merchant variant.
    pub noise_probability: f64,
    /// Fallback timestamp for unparsable request input.
    pub default_timestamp: String,
    /// Seed for all random generation.
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let categories = [
            "Groceries",
            "Transport",
            "Dining & Coffee",
            "Entertainment",
            "Bills & Utilities",
            "Health & Fitness",
            "Shopping",
            "Income",
            "Other",
        ];

        let mut vocab = HashMap::new();
        vocab.insert(
            "Groceries".to_string(),
            VocabEntry::new(
                &[
                    "Tesco",
                    "Sainsbury's",
                    "ALDI",
                    "LIDL",
                    "ASDA",
                    "Co-op",
                    "Morrisons",
                ],
                &["groceries", "weekly shop", "food basket", "fresh produce"],
            ),
        );
        vocab.insert(
            "Transport".to_string(),
            VocabEntry::new(
                &["Uber", "Bolt", "ScotRail", "TFL", "Shell", "BP", "Stagecoach"],
                &["ride home", "bus ticket", "train to work", "petrol", "diesel"],
            ),
        );
        vocab.insert(
            "Dining & Coffee".to_string(),
            VocabEntry::new(
                &["Starbucks", "Costa", "Caffè Nero", "KFC", "McDonalds", "Dominos"],
                &["morning latte", "burger meal", "pizza deal", "americano", "lunch"],
            ),
        );
        vocab.insert(
            "Entertainment".to_string(),
            VocabEntry::new(
                &["Netflix", "Spotify", "Steam", "Cineworld", "Disney+"],
                &["subscription", "movie ticket", "monthly sub", "premium plan"],
            ),
        );
        vocab.insert(
            "Bills & Utilities".to_string(),
            VocabEntry::new(
                &["Vodafone", "O2", "EE", "BT", "British Gas", "Octopus Energy"],
                &["mobile bill", "broadband", "energy bill", "council tax"],
            ),
        );
        vocab.insert(
            "Health & Fitness".to_string(),
            VocabEntry::new(
                &["Boots", "NHS", "PureGym", "The Gym Group", "Holland & Barrett"],
                &["pharmacy", "gym membership", "vitamins", "healthcare"],
            ),
        );
        vocab.insert(
            "Shopping".to_string(),
            VocabEntry::new(
                &["Amazon", "eBay", "Argos", "Currys", "Primark", "IKEA"],
                &["online order", "charger", "home goods", "t-shirt", "accessories"],
            ),
        );
        vocab.insert(
            "Income".to_string(),
            VocabEntry::new(
                &["Payroll", "ACME LTD", "Company Ltd", "Employer Ltd", "HSBC"],
                &["monthly salary", "PAYROLL BACS CREDIT", "wage", "payslip"],
            ),
        );
        vocab.insert(
            "Other".to_string(),
            VocabEntry::new(
                &["Local Market", "HSBC", "Barclays", "NatWest", "Halifax", "Monzo"],
                &["card payment", "transfer", "fee", "charge", "misc purchase"],
            ),
        );

        let mut amounts = HashMap::new();
        amounts.insert("Groceries".to_string(), AmountSpec::expense(8.0, 120.0));
        amounts.insert("Transport".to_string(), AmountSpec::expense(3.0, 70.0));
        amounts.insert("Dining & Coffee".to_string(), AmountSpec::expense(2.0, 30.0));
        amounts.insert("Entertainment".to_string(), AmountSpec::expense(4.0, 20.0));
        amounts.insert(
            "Bills & Utilities".to_string(),
            AmountSpec::expense(20.0, 500.0),
        );
        amounts.insert(
            "Health & Fitness".to_string(),
            AmountSpec::expense(3.0, 120.0),
        );
        amounts.insert("Shopping".to_string(), AmountSpec::expense(5.0, 500.0));
        amounts.insert("Income".to_string(), AmountSpec::income(800.0, 2500.0));

        let mut hour_choices = HashMap::new();
        hour_choices.insert("Transport".to_string(), vec![7, 8, 9, 22, 23, 0, 1]);
        hour_choices.insert("Dining & Coffee".to_string(), vec![8, 12, 13, 18, 19]);
        hour_choices.insert("Entertainment".to_string(), vec![19, 20, 21, 22]);

        let base_date = NaiveDate::from_ymd_opt(2025, 8, 15)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("built-in base date is valid");

        let mut per_category_overrides = HashMap::new();
        per_category_overrides.insert("Other".to_string(), 50);

        Settings {
            categories: categories.iter().map(|s| s.to_string()).collect(),
            vocab,
            amounts,
            default_amount: AmountSpec::expense(1.0, 80.0),
            default_ndigits: 2,
            time: TimeSettings {
                base_date,
                hour_choices,
                default_hour_range: (8, 21),
                day_offset_range: (0, 13),
            },
            model: ModelSettings::default(),
            samples_per_category: 60,
            per_category_overrides,
            min_samples_per_category: 40,
            noise_probability: 0.15,
            default_timestamp: DEFAULT_ISO_DATETIME.to_string(),
            seed: 42,
        }
    }
}

impl Settings {
    /// Validate the configuration before any generation or training runs.
    ///
    /// Configuration errors are fatal: an empty vocabulary or an inverted
    /// amount range would otherwise produce a degenerate corpus.
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(FinsiftError::config("category set must not be empty"));
        }

        for category in &self.categories {
            let entry = self.vocab.get(category).ok_or_else(|| {
                FinsiftError::config(format!("category '{category}' has no vocabulary entry"))
            })?;
            if entry.merchants.is_empty() {
                return Err(FinsiftError::config(format!(
                    "category '{category}' has an empty merchant vocabulary"
                )));
            }
            if entry.descriptions.is_empty() {
                return Err(FinsiftError::config(format!(
                    "category '{category}' has an empty description vocabulary"
                )));
            }
        }

        for (category, spec) in &self.amounts {
            Self::validate_amount_spec(category, spec)?;
        }
        Self::validate_amount_spec("(default)", &self.default_amount)?;

        for (category, hours) in &self.time.hour_choices {
            if hours.is_empty() {
                return Err(FinsiftError::config(format!(
                    "category '{category}' has an empty hour list"
                )));
            }
            if hours.iter().any(|&h| h > 23) {
                return Err(FinsiftError::config(format!(
                    "category '{category}' has an hour outside 0..=23"
                )));
            }
        }
        let (start_hour, end_hour) = self.time.default_hour_range;
        if start_hour > end_hour || end_hour > 23 {
            return Err(FinsiftError::config(format!(
                "default hour range {start_hour}..={end_hour} is invalid"
            )));
        }
        let (start_day, end_day) = self.time.day_offset_range;
        if start_day > end_day {
            return Err(FinsiftError::config(format!(
                "day offset range {start_day}..={end_day} is invalid"
            )));
        }

        if self.min_samples_per_category == 0 {
            return Err(FinsiftError::config(
                "minimum samples per category must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.noise_probability) {
            return Err(FinsiftError::config(
                "noise probability must be within 0.0..=1.0",
            ));
        }
        if !(0.0..1.0).contains(&self.model.test_size) || self.model.test_size <= 0.0 {
            return Err(FinsiftError::config("test size must be within (0.0, 1.0)"));
        }

        Ok(())
    }

    fn validate_amount_spec(category: &str, spec: &AmountSpec) -> Result<()> {
        if spec.low > spec.high {
            return Err(FinsiftError::config(format!(
                "amount range for '{category}' has low > high ({} > {})",
                spec.low, spec.high
            )));
        }
        if spec.low < 0.0 {
            return Err(FinsiftError::config(format!(
                "amount bounds for '{category}' must be absolute (non-negative)"
            )));
        }
        if spec.sign != 1 && spec.sign != -1 {
            return Err(FinsiftError::config(format!(
                "amount sign for '{category}' must be 1 or -1"
            )));
        }
        Ok(())
    }

    /// Amount spec for a category, falling back to the default spec.
    pub fn amount_spec(&self, category: &str) -> &AmountSpec {
        self.amounts.get(category).unwrap_or(&self.default_amount)
    }

    /// Requested sample count for a category, clamped up to the configured floor.
    pub fn sample_count(&self, category: &str) -> usize {
        let requested = self
            .per_category_overrides
            .get(category)
            .copied()
            .unwrap_or(self.samples_per_category);
        requested.max(self.min_samples_per_category)
    }

    /// Index of a category in the configured order.
    pub fn category_index(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }
}
