//! SLA classification for process records.
//!
//! # Responsibility
//! - Derive elapsed days, SLA status and progress from a record date.
//! - Attach the marker icon/color used by record cards.
//!
//! # Invariants
//! - Status is monotonic in elapsed days: `OnTime` -> `NearDue` -> `Overdue`.
//! - `days_elapsed == sla_max_days` is `NearDue`; only `>` is `Overdue`.
//! - `progress_percent` stays within `0..=100`.
//! - Records without a date are never classified; callers report them as
//!   "date unknown".

use crate::model::marker::{marker_style, MarkerStyle};
use crate::model::record::ProcessRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fraction of the SLA window after which a record counts as near due.
pub const NEAR_DUE_RATIO: f64 = 0.8;

/// SLA bucket for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaStatus {
    OnTime,
    NearDue,
    Overdue,
}

impl SlaStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::OnTime => "No prazo",
            Self::NearDue => "Próximo do vencimento",
            Self::Overdue => "Atrasado",
        }
    }
}

/// Derived per-record classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    /// Reference date minus record date; negative for future dates.
    pub days_elapsed: i64,
    pub sla_status: SlaStatus,
    pub progress_percent: u8,
    pub style: MarkerStyle,
}

/// Classification could not be computed for a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    /// Record has no date to measure elapsed time from.
    MissingDate { number: String },
    /// SLA window of zero days.
    InvalidSlaWindow,
}

impl Display for ClassificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDate { number } => {
                write!(f, "process `{number}` has no date; SLA is undefined")
            }
            Self::InvalidSlaWindow => write!(f, "SLA window must be at least one day"),
        }
    }
}

impl Error for ClassificationError {}

/// Classifies `record` against an SLA of `sla_max_days`, as seen on `reference_date`.
///
/// # Errors
/// - [`ClassificationError::MissingDate`] when the record date is null.
/// - [`ClassificationError::InvalidSlaWindow`] when `sla_max_days == 0`.
pub fn classify(
    record: &ProcessRecord,
    reference_date: NaiveDate,
    sla_max_days: u32,
) -> Result<ClassificationResult, ClassificationError> {
    if sla_max_days == 0 {
        return Err(ClassificationError::InvalidSlaWindow);
    }
    let date = record.date.ok_or_else(|| ClassificationError::MissingDate {
        number: record.number.clone(),
    })?;

    let days_elapsed = days_elapsed(date, reference_date);
    Ok(ClassificationResult {
        days_elapsed,
        sla_status: sla_status(days_elapsed, sla_max_days),
        progress_percent: progress_percent(days_elapsed, sla_max_days),
        style: marker_style(record.marker.as_deref()),
    })
}

/// Whole days from `date` to `reference_date`.
pub fn days_elapsed(date: NaiveDate, reference_date: NaiveDate) -> i64 {
    reference_date.signed_duration_since(date).num_days()
}

/// Buckets elapsed days into an SLA status.
pub fn sla_status(days_elapsed: i64, sla_max_days: u32) -> SlaStatus {
    let max = i64::from(sla_max_days);
    if days_elapsed > max {
        SlaStatus::Overdue
    } else if days_elapsed as f64 >= f64::from(sla_max_days) * NEAR_DUE_RATIO {
        SlaStatus::NearDue
    } else {
        SlaStatus::OnTime
    }
}

/// `floor(days_elapsed / sla_max_days * 100)` clamped to `0..=100`.
pub fn progress_percent(days_elapsed: i64, sla_max_days: u32) -> u8 {
    if sla_max_days == 0 || days_elapsed <= 0 {
        return 0;
    }
    let percent = days_elapsed.saturating_mul(100) / i64::from(sla_max_days);
    percent.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::{classify, progress_percent, sla_status, ClassificationError, SlaStatus};
    use crate::model::marker::DEFAULT_MARKER_STYLE;
    use crate::model::record::ProcessRecord;
    use chrono::{Duration, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn record_aged(days: i64) -> ProcessRecord {
        ProcessRecord::new("23106.000001/2026-01")
            .unwrap()
            .with_date(today() - Duration::days(days))
    }

    #[test]
    fn boundary_at_window_is_near_due_and_full_progress() {
        let result = classify(&record_aged(120), today(), 120).unwrap();
        assert_eq!(result.days_elapsed, 120);
        assert_eq!(result.sla_status, SlaStatus::NearDue);
        assert_eq!(result.progress_percent, 100);
    }

    #[test]
    fn one_day_past_window_is_overdue() {
        let result = classify(&record_aged(121), today(), 120).unwrap();
        assert_eq!(result.sla_status, SlaStatus::Overdue);
        assert_eq!(result.progress_percent, 100);
    }

    #[test]
    fn near_due_threshold_is_eighty_percent() {
        assert_eq!(sla_status(96, 120), SlaStatus::NearDue);
        assert_eq!(sla_status(95, 120), SlaStatus::OnTime);
        // 0.8 * 10 = 8; one day earlier stays on time.
        assert_eq!(sla_status(7, 10), SlaStatus::OnTime);
        assert_eq!(sla_status(8, 10), SlaStatus::NearDue);
        // 0.8 * 7 = 5.6 is not an integer boundary.
        assert_eq!(sla_status(5, 7), SlaStatus::OnTime);
        assert_eq!(sla_status(6, 7), SlaStatus::NearDue);
    }

    #[test]
    fn progress_floors_and_clamps() {
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 66);
        assert_eq!(progress_percent(500, 120), 100);
        assert_eq!(progress_percent(-4, 120), 0);
        assert_eq!(progress_percent(0, 120), 0);
    }

    #[test]
    fn status_is_monotonic_in_elapsed_days() {
        let mut previous = SlaStatus::OnTime;
        for days in -10..400 {
            let status = sla_status(days, 120);
            assert!(status >= previous, "status regressed at day {days}");
            previous = status;
        }
    }

    #[test]
    fn future_dates_are_on_time() {
        let result = classify(&record_aged(-3), today(), 120).unwrap();
        assert_eq!(result.days_elapsed, -3);
        assert_eq!(result.sla_status, SlaStatus::OnTime);
        assert_eq!(result.progress_percent, 0);
    }

    #[test]
    fn missing_date_is_reported_not_panicking() {
        let record = ProcessRecord::new("sem-data").unwrap();
        let err = classify(&record, today(), 120).unwrap_err();
        assert_eq!(
            err,
            ClassificationError::MissingDate {
                number: "sem-data".to_string()
            }
        );
    }

    #[test]
    fn zero_window_is_rejected() {
        let err = classify(&record_aged(1), today(), 0).unwrap_err();
        assert_eq!(err, ClassificationError::InvalidSlaWindow);
    }

    #[test]
    fn unmapped_marker_gets_default_style() {
        let record = record_aged(10).with_marker("Unknown-Tag");
        let result = classify(&record, today(), 120).unwrap();
        assert_eq!(result.style, DEFAULT_MARKER_STYLE);
    }
}
