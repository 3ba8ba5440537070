//! Filter criteria built fresh for every interaction.

use super::FilterError;
use crate::model::record::ProcessType;
use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which text fields the free-text search inspects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Process number only.
    #[default]
    NumberOnly,
    /// Process number, description or subject.
    NumberDescriptionSubject,
}

impl SearchScope {
    /// Parses `number` or `text` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "number" | "number_only" => Some(Self::NumberOnly),
            "text" | "all" | "number_description_subject" => Some(Self::NumberDescriptionSubject),
            _ => None,
        }
    }
}

/// Process-type selector; `All` disables the criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessTypeFilter {
    #[default]
    All,
    Received,
    Generated,
}

impl ProcessTypeFilter {
    /// Exact match; a missing process type only passes `All`.
    pub fn matches(self, process_type: Option<ProcessType>) -> bool {
        match self {
            Self::All => true,
            Self::Received => process_type == Some(ProcessType::Received),
            Self::Generated => process_type == Some(ProcessType::Generated),
        }
    }
}

/// Inclusive calendar range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, FilterError> {
        if start > end {
            return Err(FilterError::InvalidDateRange {
                start: Some(start),
                end: Some(end),
            });
        }
        Ok(Self { start, end })
    }

    /// Builds a range from optional bounds; both must be present.
    pub fn from_bounds(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, FilterError> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end),
            _ => Err(FilterError::InvalidDateRange { start, end }),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// User-selected filters for one dashboard query.
///
/// `Default` selects everything: blank search, empty selections, `All`
/// process types and no date range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_text: String,
    pub search_scope: SearchScope,
    /// Empty means no responsible filtering.
    pub selected_responsibles: BTreeSet<String>,
    /// Empty means no marker filtering.
    pub selected_markers: BTreeSet<String>,
    pub process_type: ProcessTypeFilter,
    pub date_range: Option<DateRange>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>, scope: SearchScope) -> Self {
        self.search_text = text.into();
        self.search_scope = scope;
        self
    }

    pub fn with_responsibles<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_responsibles = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_markers<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_markers = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_process_type(mut self, process_type: ProcessTypeFilter) -> Self {
        self.process_type = process_type;
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Applies raw date-picker bounds.
    ///
    /// Half-open or reversed bounds do not fail the query: the range filter
    /// is cleared and a warning is logged.
    pub fn with_date_bounds(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        if start.is_none() && end.is_none() {
            self.date_range = None;
            return self;
        }
        match DateRange::from_bounds(start, end) {
            Ok(range) => self.date_range = Some(range),
            Err(err) => {
                warn!("event=date_range_skipped module=filter status=warn reason=\"{err}\"");
                self.date_range = None;
            }
        }
        self
    }

    /// Trimmed, lowercased search needle; `None` when search is blank.
    pub fn search_needle(&self) -> Option<String> {
        let trimmed = self.search_text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.to_lowercase())
    }

    /// Returns whether every criterion is at its select-all value.
    pub fn is_select_all(&self) -> bool {
        self.search_needle().is_none()
            && self.selected_responsibles.is_empty()
            && self.selected_markers.is_empty()
            && self.process_type == ProcessTypeFilter::All
            && self.date_range.is_none()
    }
}
