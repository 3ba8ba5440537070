//! Summary counters over a filtered view.
//!
//! Each counter is an independent single pass over the records it is given.
//! Records without a date count toward totals but never toward SLA buckets.

use crate::classify::{classify, SlaStatus};
use crate::model::record::ProcessRecord;
use chrono::NaiveDate;
use serde::Serialize;

/// Count of records carrying one highlighted marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerCount {
    pub marker: String,
    pub count: usize,
}

/// Header metrics of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryMetrics {
    /// Records in the filtered view.
    pub total_in_view: usize,
    /// Records in the whole store.
    pub total_loaded: usize,
    pub marker_counts: Vec<MarkerCount>,
    pub overdue: usize,
    pub near_due: usize,
    /// Records in view without a date.
    pub date_unknown: usize,
}

/// Records whose marker equals `marker` exactly.
pub fn count_marker<'a, I>(records: I, marker: &str) -> usize
where
    I: IntoIterator<Item = &'a ProcessRecord>,
{
    records
        .into_iter()
        .filter(|record| record.marker.as_deref() == Some(marker))
        .count()
}

/// Dated records classified as `status`.
pub fn count_sla_status<'a, I>(
    records: I,
    status: SlaStatus,
    reference_date: NaiveDate,
    sla_max_days: u32,
) -> usize
where
    I: IntoIterator<Item = &'a ProcessRecord>,
{
    records
        .into_iter()
        .filter_map(|record| classify(record, reference_date, sla_max_days).ok())
        .filter(|result| result.sla_status == status)
        .count()
}

/// Records with a null date.
pub fn count_date_unknown<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a ProcessRecord>,
{
    records
        .into_iter()
        .filter(|record| record.date.is_none())
        .count()
}

/// Builds all header metrics for `view`.
pub fn summarize(
    view: &[&ProcessRecord],
    total_loaded: usize,
    highlighted_markers: &[String],
    reference_date: NaiveDate,
    sla_max_days: u32,
) -> SummaryMetrics {
    let records = || view.iter().copied();
    SummaryMetrics {
        total_in_view: view.len(),
        total_loaded,
        marker_counts: highlighted_markers
            .iter()
            .map(|marker| MarkerCount {
                marker: marker.clone(),
                count: count_marker(records(), marker),
            })
            .collect(),
        overdue: count_sla_status(records(), SlaStatus::Overdue, reference_date, sla_max_days),
        near_due: count_sla_status(records(), SlaStatus::NearDue, reference_date, sla_max_days),
        date_unknown: count_date_unknown(records()),
    }
}
