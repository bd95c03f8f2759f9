//! Timestamp sampling for synthetic transactions.
//!
//! The hour comes from a per-category list when one is configured (dining
//! skews lunch/evening, transport skews commute hours), otherwise from the
//! default inclusive range. The day is a random offset from the configured
//! base date, spreading records across several days of the week.

use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::config::TimeSettings;
use crate::error::{FinsiftError, Result};

/// Sample a timestamp for a category.
pub fn sample(time: &TimeSettings, category: &str, rng: &mut StdRng) -> Result<NaiveDateTime> {
    let hour = match time.hour_choices.get(category) {
        Some(hours) => *hours
            .choose(rng)
            .ok_or_else(|| FinsiftError::config(format!("empty hour list for '{category}'")))?,
        None => {
            let (start, end) = time.default_hour_range;
            rng.random_range(start..=end)
        }
    };

    let (start_day, end_day) = time.day_offset_range;
    let day_offset = rng.random_range(start_day..=end_day);

    Ok(time.base_date + Duration::days(day_offset) + Duration::hours(i64::from(hour)))
}
