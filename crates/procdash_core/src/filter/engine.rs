//! Predicate evaluation and option-list derivation.

use super::criteria::{FilterCriteria, SearchScope};
use crate::model::record::ProcessRecord;
use std::collections::BTreeSet;

/// Criteria prepared for repeated per-record evaluation.
#[derive(Debug)]
pub struct RecordMatcher<'c> {
    criteria: &'c FilterCriteria,
    needle: Option<String>,
}

impl<'c> RecordMatcher<'c> {
    pub fn new(criteria: &'c FilterCriteria) -> Self {
        Self {
            criteria,
            needle: criteria.search_needle(),
        }
    }

    /// Returns whether `record` passes every active criterion.
    pub fn matches(&self, record: &ProcessRecord) -> bool {
        self.matches_search(record)
            && selection_matches(
                &self.criteria.selected_responsibles,
                record.responsible.as_deref(),
            )
            && selection_matches(&self.criteria.selected_markers, record.marker.as_deref())
            && self.criteria.process_type.matches(record.process_type)
            && self.matches_date(record)
    }

    fn matches_search(&self, record: &ProcessRecord) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };
        let contains = |field: Option<&str>| {
            field
                .map(|value| value.to_lowercase().contains(needle))
                .unwrap_or(false)
        };
        match self.criteria.search_scope {
            SearchScope::NumberOnly => contains(Some(record.number.as_str())),
            SearchScope::NumberDescriptionSubject => {
                contains(Some(record.number.as_str()))
                    || contains(record.description.as_deref())
                    || contains(record.subject.as_deref())
            }
        }
    }

    fn matches_date(&self, record: &ProcessRecord) -> bool {
        match (self.criteria.date_range, record.date) {
            (None, _) => true,
            (Some(range), Some(date)) => range.contains(date),
            (Some(_), None) => false,
        }
    }
}

fn selection_matches(selected: &BTreeSet<String>, value: Option<&str>) -> bool {
    if selected.is_empty() {
        return true;
    }
    value.map(|value| selected.contains(value)).unwrap_or(false)
}

/// Returns the records passing `criteria`, in input order.
pub fn filter<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a ProcessRecord>
where
    I: IntoIterator<Item = &'a ProcessRecord>,
{
    let matcher = RecordMatcher::new(criteria);
    records
        .into_iter()
        .filter(|record| matcher.matches(record))
        .collect()
}

/// Sorted distinct non-null `responsible` values.
pub fn distinct_responsibles<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ProcessRecord>,
{
    distinct(records, |record| record.responsible.as_deref())
}

/// Sorted distinct non-null `marker` values.
pub fn distinct_markers<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ProcessRecord>,
{
    distinct(records, |record| record.marker.as_deref())
}

fn distinct<'a, I, F>(records: I, field: F) -> Vec<String>
where
    I: IntoIterator<Item = &'a ProcessRecord>,
    F: Fn(&'a ProcessRecord) -> Option<&'a str>,
{
    records
        .into_iter()
        .filter_map(field)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
