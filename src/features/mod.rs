//! Feature engineering for transaction records.
//!
//! [`build`] is a pure, stateless mapping from a [`RawTransaction`] to an
//! [`EngineeredRecord`]. The exact same function runs at training and at
//! inference time; any divergence between the two would silently skew
//! predictions, so nothing here reads mutable state.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// A transaction record as produced by the generator or received at inference.
///
/// `category` is present for training data only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Merchant name (non-empty).
    pub merchant: String,
    /// Free-text description (non-empty).
    pub description: String,
    /// Signed amount: negative for expenses, positive for income.
    pub amount: f64,
    /// Transaction timestamp.
    pub timestamp: NaiveDateTime,
    /// Category label, training data only.
    pub category: Option<String>,
}

/// A raw transaction plus derived fields, ready for the feature transform.
///
/// Derived fields are pure functions of the raw record and are never
/// independently mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeredRecord {
    /// Merchant + description, lowercase-normalized. Word n-gram input.
    pub combined_text: String,
    /// Merchant alone, lowercase-normalized. Character n-gram input.
    pub merchant_text: String,
    /// Signed amount, copied from the raw record.
    pub amount: f64,
    /// Hour of day, 0..=23.
    pub hour: u32,
    /// Day of week, Monday = 0 .. Sunday = 6.
    pub day_of_week: u32,
    /// Whether the day falls on Saturday or Sunday.
    pub is_weekend: bool,
    /// Category label carried through from the raw record.
    pub category: Option<String>,
}

/// Derive the engineered record from a raw transaction.
pub fn build(raw: &RawTransaction) -> EngineeredRecord {
    let day_of_week = raw.timestamp.weekday().num_days_from_monday();
    EngineeredRecord {
        combined_text: format!("{} {}", raw.merchant, raw.description).to_lowercase(),
        merchant_text: raw.merchant.to_lowercase(),
        amount: raw.amount,
        hour: raw.timestamp.hour(),
        day_of_week,
        is_weekend: matches!(raw.timestamp.weekday(), Weekday::Sat | Weekday::Sun),
        category: raw.category.clone(),
    }
}

/// Derive engineered records for a whole corpus.
pub fn build_all(raw: &[RawTransaction]) -> Vec<EngineeredRecord> {
    raw.iter().map(build).collect()
}

/// Parse an ISO-8601 timestamp, falling back to a default on failure.
///
/// Malformed per-request timestamps are recovered locally: the request
/// proceeds with the configured fallback instead of failing.
pub fn parse_timestamp_or_default(input: &str, default: NaiveDateTime) -> NaiveDateTime {
    match input.parse::<NaiveDateTime>() {
        Ok(ts) => ts,
        Err(_) => {
            log::debug!("unparsable timestamp '{input}', using fallback");
            default
        }
    }
}
