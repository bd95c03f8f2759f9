//! Text analysis for feature extraction.
//!
//! Two tokenization strategies feed the tf-idf branches of the feature
//! transform:
//!
//! - [`word`]: lowercased unicode word tokens expanded into n-grams
//!   (unigrams + bigrams by default), used over the merchant+description
//!   text to capture phrasing.
//! - [`char_wb`]: character n-grams that never cross word boundaries,
//!   used over the merchant text alone so a misspelled or unseen merchant
//!   still lands near its correct form.
//!
//! The branch set is closed and known at design time, so tokenizers are a
//! serde-able [`TokenizerKind`] enum rather than trait objects: a fitted
//! vectorizer can be persisted and reconstructed with the exact tokenizer
//! it was fit with.

pub mod char_wb;
pub mod word;

use serde::{Deserialize, Serialize};

use crate::error::{FinsiftError, Result};

/// The closed set of tokenizers used by the feature transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenizerKind {
    /// Word n-grams over lowercased unicode word tokens.
    WordNgram {
        /// Minimum n-gram size in words.
        min_n: usize,
        /// Maximum n-gram size in words.
        max_n: usize,
    },
    /// Word-boundary-respecting character n-grams.
    CharWb {
        /// Minimum n-gram size in characters.
        min_gram: usize,
        /// Maximum n-gram size in characters.
        max_gram: usize,
    },
}

impl TokenizerKind {
    /// Create a word n-gram tokenizer.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_n` is 0 or `max_n < min_n`.
    pub fn word_ngram(min_n: usize, max_n: usize) -> Result<Self> {
        validate_range("word n-gram", min_n, max_n)?;
        Ok(TokenizerKind::WordNgram { min_n, max_n })
    }

    /// Create a word-boundary character n-gram tokenizer.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_gram` is 0 or `max_gram < min_gram`.
    pub fn char_wb(min_gram: usize, max_gram: usize) -> Result<Self> {
        validate_range("char n-gram", min_gram, max_gram)?;
        Ok(TokenizerKind::CharWb { min_gram, max_gram })
    }

    /// Tokenize text into terms for the tf-idf vectorizer.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        match *self {
            TokenizerKind::WordNgram { min_n, max_n } => word::tokenize(text, min_n, max_n),
            TokenizerKind::CharWb { min_gram, max_gram } => {
                char_wb::tokenize(text, min_gram, max_gram)
            }
        }
    }

    /// Name of the tokenizer.
    pub fn name(&self) -> &'static str {
        match self {
            TokenizerKind::WordNgram { .. } => "word_ngram",
            TokenizerKind::CharWb { .. } => "char_wb",
        }
    }
}

fn validate_range(what: &str, min: usize, max: usize) -> Result<()> {
    if min == 0 {
        return Err(FinsiftError::analysis(format!(
            "{what} minimum must be at least 1"
        )));
    }
    if max < min {
        return Err(FinsiftError::analysis(format!(
            "{what} maximum ({max}) must be >= minimum ({min})"
        )));
    }
    Ok(())
}
