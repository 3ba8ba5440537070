//! Core logic for the process panel.
//! Loads the process table once, then filters, classifies and summarizes it
//! per interaction without mutating it.

pub mod classify;
pub mod config;
pub mod filter;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use classify::{classify, ClassificationError, ClassificationResult, SlaStatus};
pub use config::{ConfigError, DashboardConfig};
pub use filter::criteria::{DateRange, FilterCriteria, ProcessTypeFilter, SearchScope};
pub use filter::engine::{distinct_markers, distinct_responsibles, filter};
pub use filter::FilterError;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::marker::{marker_style, MarkerStyle, DEFAULT_MARKER_STYLE};
pub use model::record::{ProcessRecord, ProcessType, RecordValidationError};
pub use service::dashboard_service::{
    DashboardService, DashboardView, FilterOptions, RecordCard, SlaDisplay,
};
pub use service::link::build_external_link;
pub use service::selection::RecordSelection;
pub use service::summary::{summarize, MarkerCount, SummaryMetrics};
pub use store::{CsvFileSource, DataLoadError, InlineSource, LoadReport, RecordSource, RecordStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
