//! The three-branch feature transform.
//!
//! [`FittedTransform::fit`] fits three branches jointly on the training
//! corpus, and [`FittedTransform::apply`] concatenates their outputs in a
//! stable, fixed order:
//!
//! 1. word tf-idf over `combined_text` (phrasing),
//! 2. character tf-idf over `merchant_text` (spelling/brand variants),
//! 3. scaled numerics (`amount`, `hour`, `day_of_week`, `is_weekend`).
//!
//! Fit runs exactly once per training run; applying never mutates the
//! fitted vocabularies or statistics, so any later inference sees the exact
//! same feature space. Unseen text degrades to zero contribution instead of
//! failing.

pub mod scaler;
pub mod tfidf;

use serde::{Deserialize, Serialize};

use crate::analysis::TokenizerKind;
use crate::config::ModelSettings;
use crate::error::{FinsiftError, Result};
use crate::features::EngineeredRecord;
use scaler::StandardScaler;
use tfidf::TfidfVectorizer;

/// The fitted feature transform: three branches, one fixed concatenation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedTransform {
    word: TfidfVectorizer,
    char: TfidfVectorizer,
    scaler: StandardScaler,
}

impl FittedTransform {
    /// Fit all three branches on the engineered training records.
    ///
    /// # Errors
    ///
    /// Fails on an empty corpus, invalid n-gram bounds, or a branch whose
    /// vocabulary comes out empty.
    pub fn fit(model: &ModelSettings, records: &[EngineeredRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(FinsiftError::training(
                "cannot fit the feature transform on an empty corpus",
            ));
        }

        let (word_min, word_max) = model.word_ngram;
        let mut word = TfidfVectorizer::new(
            TokenizerKind::word_ngram(word_min, word_max)?,
            model.word_min_df,
            model.word_max_features,
        );
        let combined: Vec<String> = records.iter().map(|r| r.combined_text.clone()).collect();
        word.fit(&combined)?;

        let (char_min, char_max) = model.char_ngram;
        let mut char = TfidfVectorizer::new(
            TokenizerKind::char_wb(char_min, char_max)?,
            model.char_min_df,
            model.char_max_features,
        );
        let merchants: Vec<String> = records.iter().map(|r| r.merchant_text.clone()).collect();
        char.fit(&merchants)?;

        let numeric_rows: Vec<Vec<f64>> = records.iter().map(numeric_row).collect();
        let scaler = StandardScaler::fit(&numeric_rows)?;

        Ok(FittedTransform { word, char, scaler })
    }

    /// Apply the fitted transform to one record.
    ///
    /// Branch outputs are concatenated in fixed order: word text, char
    /// text, numerics. The output width is constant for the lifetime of the
    /// fitted transform.
    pub fn apply(&self, record: &EngineeredRecord) -> Vec<f64> {
        let mut vector = self.word.transform(&record.combined_text);
        vector.extend(self.char.transform(&record.merchant_text));
        vector.extend(self.scaler.transform(&numeric_row(record)));
        vector
    }

    /// Apply the fitted transform to a batch of records.
    pub fn apply_batch(&self, records: &[EngineeredRecord]) -> Vec<Vec<f64>> {
        records.iter().map(|r| self.apply(r)).collect()
    }

    /// Total width of the concatenated feature vector.
    pub fn width(&self) -> usize {
        self.word.vocabulary_size() + self.char.vocabulary_size() + self.scaler.width()
    }
}

fn numeric_row(record: &EngineeredRecord) -> Vec<f64> {
    vec![
        record.amount,
        f64::from(record.hour),
        f64::from(record.day_of_week),
        if record.is_weekend { 1.0 } else { 0.0 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::features;
    use crate::synth;

    fn fitted() -> (FittedTransform, Vec<EngineeredRecord>) {
        let mut settings = Settings::default();
        settings.samples_per_category = 20;
        settings.per_category_overrides.clear();
        settings.min_samples_per_category = 10;

        let raw = synth::generate(&settings).unwrap();
        let records = features::build_all(&raw);
        let transform = FittedTransform::fit(&settings.model, &records).unwrap();
        (transform, records)
    }

    #[test]
    fn test_width_is_fixed() {
        let (transform, records) = fitted();
        let width = transform.width();
        assert!(width > 4);
        for record in records.iter().take(20) {
            assert_eq!(transform.apply(record).len(), width);
        }
    }

    #[test]
    fn test_apply_is_pure() {
        let (transform, records) = fitted();
        let first = transform.apply(&records[0]);
        let second = transform.apply(&records[0]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unseen_text_degrades_gracefully() {
        let (transform, records) = fitted();
        let mut record = records[0].clone();
        record.combined_text = "zzzz qqqq".to_string();
        record.merchant_text = "zzzzqqqq".to_string();

        let vector = transform.apply(&record);
        assert_eq!(vector.len(), transform.width());
        // Text branches are zero; numerics still carry signal.
        assert!(vector.iter().any(|&v| v != 0.0));
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let settings = Settings::default();
        assert!(FittedTransform::fit(&settings.model, &[]).is_err());
    }
}
