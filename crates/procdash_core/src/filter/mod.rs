//! Record filtering over the loaded table.
//!
//! # Responsibility
//! - Model per-interaction filter criteria.
//! - Reduce a record sequence with AND-composed predicates.
//! - Derive sidebar option lists from the full table.
//!
//! # Invariants
//! - Filtering never reorders; output is a subsequence of input.
//! - A criterion left at its default value matches every record.
//! - Missing record fields never match an active criterion.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod criteria;
pub mod engine;

/// Rejected filter input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Range with only one bound, or with `start` after `end`.
    InvalidDateRange {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateRange { start, end } => {
                let show = |date: &Option<NaiveDate>| {
                    date.map(|d| d.to_string())
                        .unwrap_or_else(|| "unset".to_string())
                };
                write!(
                    f,
                    "invalid date range: start={} end={}",
                    show(start),
                    show(end)
                )
            }
        }
    }
}

impl Error for FilterError {}
