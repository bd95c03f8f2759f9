//! TF-IDF vectorizer with a bounded, deterministic vocabulary.
//!
//! Fit once on the training corpus, then applied read-only: `transform`
//! never touches the vocabulary or idf table, and out-of-vocabulary terms
//! contribute zero rather than failing. Rows are L2-normalized so the two
//! text branches land on a comparable scale.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::TokenizerKind;
use crate::error::{FinsiftError, Result};

/// TF-IDF vectorizer over one tokenization strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Tokenizer this vectorizer was (or will be) fit with.
    tokenizer: TokenizerKind,
    /// Minimum document frequency for a term to enter the vocabulary.
    min_df: usize,
    /// Upper bound on the vocabulary size.
    max_features: usize,
    /// Term -> feature index mapping, frozen at fit time.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    idf: Vec<f64>,
    /// Number of documents seen at fit time.
    n_documents: usize,
}

impl TfidfVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new(tokenizer: TokenizerKind, min_df: usize, max_features: usize) -> Self {
        TfidfVectorizer {
            tokenizer,
            min_df,
            max_features,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
        }
    }

    /// Fit the vocabulary and idf table on the training corpus.
    ///
    /// Vocabulary selection is deterministic: candidates passing the
    /// `min_df` floor are capped by document frequency (ties broken
    /// lexicographically), then indexed in sorted term order, so the same
    /// corpus always produces the same fitted state.
    ///
    /// # Errors
    ///
    /// Fails if the corpus is empty or no term survives the `min_df` floor.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            return Err(FinsiftError::training(format!(
                "cannot fit {} vectorizer on an empty corpus",
                self.tokenizer.name()
            )));
        }

        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let unique: HashSet<String> = self.tokenizer.tokenize(doc).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let mut candidates: Vec<(&String, usize)> = document_frequency
            .iter()
            .filter(|&(_, &df)| df >= self.min_df)
            .map(|(term, &df)| (term, df))
            .collect();
        if candidates.is_empty() {
            return Err(FinsiftError::training(format!(
                "no {} term reaches the min_df floor of {}",
                self.tokenizer.name(),
                self.min_df
            )));
        }
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        candidates.truncate(self.max_features);

        let mut terms: Vec<&String> = candidates.iter().map(|(term, _)| *term).collect();
        terms.sort();

        let n_docs = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (index, term) in terms.into_iter().enumerate() {
            let df = document_frequency[term] as f64;
            vocabulary.insert(term.clone(), index);
            // Smooth idf, matching ln((N + 1) / (df + 1)) + 1.
            idf.push(((n_docs + 1.0) / (df + 1.0)).ln() + 1.0);
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
        self.n_documents = documents.len();
        Ok(())
    }

    /// Transform a document into an L2-normalized tf-idf vector.
    ///
    /// Out-of-vocabulary terms contribute zero; a document with no known
    /// terms maps to the zero vector.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut row = vec![0.0; self.vocabulary.len()];
        for term in self.tokenizer.tokenize(document) {
            if let Some(&index) = self.vocabulary.get(&term) {
                row[index] += 1.0;
            }
        }

        for (index, value) in row.iter_mut().enumerate() {
            *value *= self.idf[index];
        }

        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut row {
                *value /= norm;
            }
        }
        row
    }

    /// Size of the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    fn word_vectorizer(min_df: usize, max_features: usize) -> TfidfVectorizer {
        TfidfVectorizer::new(
            TokenizerKind::word_ngram(1, 1).unwrap(),
            min_df,
            max_features,
        )
    }

    #[test]
    fn test_fit_transform_dimensions() {
        let corpus = docs(&["tesco groceries", "tesco weekly shop", "uber ride"]);
        let mut vectorizer = word_vectorizer(1, 100);
        vectorizer.fit(&corpus).unwrap();

        let row = vectorizer.transform("tesco ride");
        assert_eq!(row.len(), vectorizer.vocabulary_size());
    }

    #[test]
    fn test_rows_are_l2_normalized() {
        let corpus = docs(&["tesco groceries", "uber ride home", "tesco shop"]);
        let mut vectorizer = word_vectorizer(1, 100);
        vectorizer.fit(&corpus).unwrap();

        let row = vectorizer.transform("tesco groceries");
        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_oov_maps_to_zero_vector() {
        let corpus = docs(&["tesco groceries", "uber ride"]);
        let mut vectorizer = word_vectorizer(1, 100);
        vectorizer.fit(&corpus).unwrap();

        let row = vectorizer.transform("completely unseen words");
        assert!(row.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_min_df_floor() {
        // "tesco" appears in two documents, everything else in one.
        let corpus = docs(&["tesco groceries", "tesco shop", "uber ride"]);
        let mut vectorizer = word_vectorizer(2, 100);
        vectorizer.fit(&corpus).unwrap();

        assert_eq!(vectorizer.vocabulary_size(), 1);
    }

    #[test]
    fn test_max_features_cap() {
        let corpus = docs(&["alpha beta gamma delta", "alpha beta", "alpha gamma"]);
        let mut vectorizer = word_vectorizer(1, 2);
        vectorizer.fit(&corpus).unwrap();

        // "alpha" (df=3) and "beta"/"gamma" (df=2, tie broken to "beta").
        assert_eq!(vectorizer.vocabulary_size(), 2);
        assert!(vectorizer.transform("alpha").iter().any(|&v| v > 0.0));
        assert!(vectorizer.transform("beta").iter().any(|&v| v > 0.0));
        assert!(vectorizer.transform("gamma").iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let corpus = docs(&["tesco groceries", "uber ride home", "netflix sub"]);
        let mut a = word_vectorizer(1, 100);
        let mut b = word_vectorizer(1, 100);
        a.fit(&corpus).unwrap();
        b.fit(&corpus).unwrap();

        assert_eq!(a.transform("tesco ride"), b.transform("tesco ride"));
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let mut vectorizer = word_vectorizer(1, 100);
        assert!(vectorizer.fit(&[]).is_err());
    }

    #[test]
    fn test_nothing_reaches_min_df() {
        let corpus = docs(&["alpha", "beta"]);
        let mut vectorizer = word_vectorizer(2, 100);
        assert!(vectorizer.fit(&corpus).is_err());
    }
}
