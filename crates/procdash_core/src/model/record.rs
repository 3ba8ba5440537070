//! Process record domain model.
//!
//! # Responsibility
//! - Define the canonical row shape shared by filtering, classification and export.
//! - Keep every optional column nullable so a sparse source never fails to load.
//!
//! # Invariants
//! - `number` is never blank.
//! - `icons` keeps first-seen order and holds no duplicates.
//! - Unknown source columns survive untouched in `extra`, as do `Tipo` and
//!   `Data` cells that failed to parse.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Origin of a process inside the external system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessType {
    /// Process received from another unit.
    Received,
    /// Process generated by the unit itself.
    Generated,
}

impl ProcessType {
    /// Parses the `Tipo` column value.
    ///
    /// Accepts the Portuguese labels used by the source sheet and their
    /// English aliases, case-insensitively. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "recebido" | "recebidos" | "received" => Some(Self::Received),
            "gerado" | "gerados" | "generated" => Some(Self::Generated),
            _ => None,
        }
    }

    /// Label written back on export.
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Received => "Recebido",
            Self::Generated => "Gerado",
        }
    }
}

/// Validation failures for record construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// `number` is empty or whitespace-only.
    BlankNumber,
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankNumber => write!(f, "process number must not be blank"),
        }
    }
}

impl Error for RecordValidationError {}

/// One row of the process dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Process number; display key and deep-link parameter.
    pub number: String,
    pub responsible: Option<String>,
    /// Category label, looked up in the marker style table.
    pub marker: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub process_type: Option<ProcessType>,
    /// Reference date used for SLA computation.
    pub date: Option<NaiveDate>,
    /// Short symbolic tags rendered next to the card title.
    pub icons: Vec<String>,
    /// Source columns without a dedicated field, keyed by header name.
    ///
    /// Also holds the raw text of typed cells that could not be parsed.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl ProcessRecord {
    /// Creates a record with only the mandatory process number set.
    ///
    /// The number is trimmed before storing.
    pub fn new(number: impl Into<String>) -> Result<Self, RecordValidationError> {
        let number = number.into().trim().to_string();
        if number.is_empty() {
            return Err(RecordValidationError::BlankNumber);
        }
        Ok(Self {
            number,
            responsible: None,
            marker: None,
            description: None,
            subject: None,
            process_type: None,
            date: None,
            icons: Vec::new(),
            extra: BTreeMap::new(),
        })
    }

    /// Builder-style setter for `responsible`.
    pub fn with_responsible(mut self, value: impl Into<String>) -> Self {
        self.responsible = Some(value.into());
        self
    }

    /// Builder-style setter for `marker`.
    pub fn with_marker(mut self, value: impl Into<String>) -> Self {
        self.marker = Some(value.into());
        self
    }

    pub fn with_description(mut self, value: impl Into<String>) -> Self {
        self.description = Some(value.into());
        self
    }

    pub fn with_subject(mut self, value: impl Into<String>) -> Self {
        self.subject = Some(value.into());
        self
    }

    pub fn with_process_type(mut self, value: ProcessType) -> Self {
        self.process_type = Some(value);
        self
    }

    pub fn with_date(mut self, value: NaiveDate) -> Self {
        self.date = Some(value);
        self
    }

    /// Appends icons, skipping blanks and tags already present.
    pub fn with_icons<I, S>(mut self, icons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for icon in icons {
            self.push_icon(icon);
        }
        self
    }

    /// Adds one icon tag unless blank or already present.
    pub fn push_icon(&mut self, icon: impl Into<String>) {
        let icon = icon.into().trim().to_string();
        if icon.is_empty() || self.icons.contains(&icon) {
            return;
        }
        self.icons.push(icon);
    }
}

#[cfg(test)]
mod tests {
    use super::{ProcessRecord, ProcessType, RecordValidationError};

    #[test]
    fn new_trims_number_and_rejects_blank() {
        let record = ProcessRecord::new("  23106.000001/2024-11 ").unwrap();
        assert_eq!(record.number, "23106.000001/2024-11");

        let err = ProcessRecord::new("   ").unwrap_err();
        assert_eq!(err, RecordValidationError::BlankNumber);
    }

    #[test]
    fn icons_keep_first_seen_order_without_duplicates() {
        let record = ProcessRecord::new("1")
            .unwrap()
            .with_icons(["⚠️", "📎", " ", "⚠️", "🔒"]);
        assert_eq!(record.icons, vec!["⚠️", "📎", "🔒"]);
    }

    #[test]
    fn process_type_parses_labels_and_aliases() {
        assert_eq!(ProcessType::parse("Recebido"), Some(ProcessType::Received));
        assert_eq!(ProcessType::parse(" GERADO "), Some(ProcessType::Generated));
        assert_eq!(ProcessType::parse("received"), Some(ProcessType::Received));
        assert_eq!(ProcessType::parse("arquivado"), None);
        assert_eq!(ProcessType::Generated.as_label(), "Gerado");
    }
}
