//! Dashboard use-case service.
//!
//! # Responsibility
//! - Own the loaded record store for the session.
//! - Turn filter criteria into a renderable view: cards plus summary.
//! - Provide sidebar option lists, deep links and filtered-view export.
//!
//! # Invariants
//! - The store is read-only; every query builds new values.
//! - Card order equals filter output order, which equals store order.
//! - A record without a date is shown as "date unknown" instead of failing the view.

use crate::classify::{classify, ClassificationError, ClassificationResult};
use crate::config::DashboardConfig;
use crate::filter::criteria::FilterCriteria;
use crate::filter::engine::{distinct_markers, distinct_responsibles, filter};
use crate::model::marker::{marker_style, MarkerStyle};
use crate::model::record::ProcessRecord;
use crate::service::link::build_link_with_template;
use crate::service::summary::{summarize, SummaryMetrics};
use crate::store::RecordStore;
use chrono::NaiveDate;
use log::{debug, warn};
use serde::Serialize;
use std::io::{self, Write};

/// SLA column of a record card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlaDisplay {
    Classified(ClassificationResult),
    DateUnknown,
}

/// Everything the renderer needs for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordCard<'a> {
    pub record: &'a ProcessRecord,
    pub sla: SlaDisplay,
    pub style: MarkerStyle,
    pub link: String,
}

/// Result of one dashboard query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView<'a> {
    pub reference_date: NaiveDate,
    pub summary: SummaryMetrics,
    pub cards: Vec<RecordCard<'a>>,
}

impl<'a> DashboardView<'a> {
    /// True when no record passed the filters.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Records in card order.
    pub fn records(&self) -> impl Iterator<Item = &'a ProcessRecord> + '_ {
        self.cards.iter().map(|card| card.record)
    }
}

/// Sidebar multiselect options; selecting all of them equals selecting none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub responsibles: Vec<String>,
    pub markers: Vec<String>,
}

/// Session facade over one loaded store.
pub struct DashboardService {
    store: RecordStore,
    config: DashboardConfig,
}

impl DashboardService {
    pub fn new(store: RecordStore, config: DashboardConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Distinct responsibles and markers of the whole store.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            responsibles: distinct_responsibles(self.store.records()),
            markers: distinct_markers(self.store.records()),
        }
    }

    /// Select-all criteria using the configured search scope.
    pub fn default_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search_scope: self.config.search_scope,
            ..FilterCriteria::default()
        }
    }

    /// Filtered records without classification.
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&ProcessRecord> {
        filter(self.store.records(), criteria)
    }

    /// Filters, classifies and summarizes in one pass per concern.
    pub fn view(&self, criteria: &FilterCriteria, reference_date: NaiveDate) -> DashboardView<'_> {
        let records = self.filter(criteria);
        let summary = summarize(
            &records,
            self.store.len(),
            &self.config.highlighted_markers,
            reference_date,
            self.config.sla_max_days,
        );
        let cards = records
            .into_iter()
            .map(|record| self.card(record, reference_date))
            .collect::<Vec<_>>();

        debug!(
            "event=view_built module=service status=ok in_view={} total={} overdue={} near_due={} date_unknown={}",
            summary.total_in_view,
            summary.total_loaded,
            summary.overdue,
            summary.near_due,
            summary.date_unknown
        );

        DashboardView {
            reference_date,
            summary,
            cards,
        }
    }

    /// Deep link for `number` using the configured template.
    pub fn link_for(&self, number: &str) -> String {
        build_link_with_template(&self.config.link_template, number)
    }

    /// Writes the records of `view` in the source column layout.
    pub fn export_view<W: Write>(
        &self,
        view: &DashboardView<'_>,
        writer: &mut W,
    ) -> io::Result<usize> {
        self.store.export(writer, view.records())
    }

    fn card<'a>(&self, record: &'a ProcessRecord, reference_date: NaiveDate) -> RecordCard<'a> {
        let sla = match classify(record, reference_date, self.config.sla_max_days) {
            Ok(result) => SlaDisplay::Classified(result),
            Err(ClassificationError::MissingDate { .. }) => SlaDisplay::DateUnknown,
            Err(err) => {
                warn!(
                    "event=classify_failed module=service status=warn number={} reason=\"{}\"",
                    record.number, err
                );
                SlaDisplay::DateUnknown
            }
        };
        RecordCard {
            record,
            sla,
            style: marker_style(record.marker.as_deref()),
            link: self.link_for(&record.number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DashboardService, SlaDisplay};
    use crate::classify::SlaStatus;
    use crate::config::DashboardConfig;
    use crate::filter::criteria::SearchScope;
    use crate::model::record::ProcessRecord;
    use crate::store::RecordStore;
    use chrono::{Duration, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn default_criteria_follow_configured_scope() {
        let config = DashboardConfig {
            search_scope: SearchScope::NumberDescriptionSubject,
            ..DashboardConfig::default()
        };
        let service = DashboardService::new(RecordStore::from_records("empty", vec![]), config);
        let criteria = service.default_criteria();
        assert_eq!(criteria.search_scope, SearchScope::NumberDescriptionSubject);
        assert!(criteria.is_select_all());
    }

    #[test]
    fn cards_carry_classification_or_unknown_date() {
        let store = RecordStore::from_records(
            "fixture",
            vec![
                ProcessRecord::new("dated")
                    .unwrap()
                    .with_date(today() - Duration::days(130)),
                ProcessRecord::new("undated").unwrap(),
            ],
        );
        let service = DashboardService::new(store, DashboardConfig::default());
        let view = service.view(&service.default_criteria(), today());

        assert_eq!(view.cards.len(), 2);
        match view.cards[0].sla {
            SlaDisplay::Classified(result) => assert_eq!(result.sla_status, SlaStatus::Overdue),
            SlaDisplay::DateUnknown => panic!("dated record must be classified"),
        }
        assert_eq!(view.cards[1].sla, SlaDisplay::DateUnknown);
        assert!(view.cards[1].link.ends_with("id_procedimento=undated"));
    }
}
