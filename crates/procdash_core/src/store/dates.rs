//! Date cell parsing and deterministic date synthesis.
//!
//! # Invariants
//! - Slash and dash dates with the year last are read day-first (`dd/mm/yyyy`).
//! - Synthesized dates depend only on row count and the reference day.

use chrono::{Days, NaiveDate};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

/// Seed used when a source has no date column.
pub const SYNTHETIC_DATE_SEED: u64 = 42;
/// Synthesized dates fall in `[today - (window - 1), today]`.
pub const SYNTHETIC_DATE_WINDOW_DAYS: u64 = 200;
/// Export format for date cells.
pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d", "%d.%m.%Y"];

static TIME_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+?)(?:[ T]\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?)?$").expect("valid time regex")
});

/// Parses one date cell; returns `None` for blank or unrecognized values.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = TIME_SUFFIX_RE
        .captures(trimmed)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())?;

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

/// Generates one reproducible date per row, counting back from `today`.
pub fn synthesize_dates(count: usize, today: NaiveDate) -> Vec<NaiveDate> {
    let mut rng = StdRng::seed_from_u64(SYNTHETIC_DATE_SEED);
    (0..count)
        .map(|_| {
            let offset = rng.gen_range(0..SYNTHETIC_DATE_WINDOW_DAYS);
            today
                .checked_sub_days(Days::new(offset))
                .unwrap_or(NaiveDate::MIN)
        })
        .collect()
}

/// Formats a date for export cells.
pub fn format_date(date: NaiveDate) -> String {
    date.format(EXPORT_DATE_FORMAT).to_string()
}
