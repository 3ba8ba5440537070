//! In-memory record table loaded once per session.
//!
//! # Responsibility
//! - Map raw table cells onto [`ProcessRecord`] fields by header name.
//! - Synthesize dates when the source lacks a `Data` column.
//! - Export any record subset with the source column layout.
//!
//! # Invariants
//! - `columns` lists the source header order, plus `Data` when synthesized.
//! - Records keep source row order.
//! - The store is never mutated after `load` returns.

use super::dates::{format_date, parse_date, synthesize_dates};
use super::source::RecordSource;
use super::table::{parse_table, write_row, RawRow};
use super::{DataLoadError, LoadResult};
use crate::model::record::{ProcessRecord, ProcessType};
use chrono::NaiveDate;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::io::{self, Write};

pub const COLUMN_NUMBER: &str = "Número";
pub const COLUMN_RESPONSIBLE: &str = "Responsável";
pub const COLUMN_MARKER: &str = "Marcador";
pub const COLUMN_DESCRIPTION: &str = "Descrição";
pub const COLUMN_SUBJECT: &str = "Assunto";
pub const COLUMN_DATE: &str = "Data";
pub const COLUMN_PROCESS_TYPE: &str = "Tipo";
pub const COLUMN_ICONS: &str = "Ícones";

/// Column layout used for stores built directly from records.
pub const STANDARD_COLUMNS: &[&str] = &[
    COLUMN_NUMBER,
    COLUMN_RESPONSIBLE,
    COLUMN_MARKER,
    COLUMN_DESCRIPTION,
    COLUMN_SUBJECT,
    COLUMN_PROCESS_TYPE,
    COLUMN_DATE,
    COLUMN_ICONS,
];

static ICON_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,|\s]+").expect("valid icon separator regex"));

/// Load diagnostics for rows that were repaired or dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub rows_loaded: usize,
    /// Rows dropped because the process number was blank.
    pub rows_skipped: usize,
    /// Rows with more cells than the header; overflow cells were dropped.
    pub rows_truncated: usize,
    /// Non-blank date cells that no accepted format could parse.
    pub unparsable_dates: usize,
    /// Numbers seen more than once, in first-duplicate order.
    pub duplicate_numbers: Vec<String>,
    pub dates_synthesized: bool,
    pub unterminated_quote: bool,
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    number: usize,
    responsible: Option<usize>,
    marker: Option<usize>,
    description: Option<usize>,
    subject: Option<usize>,
    date: Option<usize>,
    process_type: Option<usize>,
    icons: Option<usize>,
}

impl ColumnIndex {
    fn resolve(header: &[String]) -> Option<Self> {
        let find = |name: &str| header.iter().position(|column| column == name);
        Some(Self {
            number: find(COLUMN_NUMBER)?,
            responsible: find(COLUMN_RESPONSIBLE),
            marker: find(COLUMN_MARKER),
            description: find(COLUMN_DESCRIPTION),
            subject: find(COLUMN_SUBJECT),
            date: find(COLUMN_DATE),
            process_type: find(COLUMN_PROCESS_TYPE),
            icons: find(COLUMN_ICONS),
        })
    }

    fn is_mapped(&self, index: usize) -> bool {
        index == self.number
            || [
                self.responsible,
                self.marker,
                self.description,
                self.subject,
                self.date,
                self.process_type,
                self.icons,
            ]
            .contains(&Some(index))
    }
}

/// Immutable, session-scoped table of process records.
#[derive(Debug, Clone)]
pub struct RecordStore {
    source_name: String,
    columns: Vec<String>,
    records: Vec<ProcessRecord>,
    report: LoadReport,
}

impl RecordStore {
    /// Loads and maps every row of `source`.
    ///
    /// `today` anchors synthesized dates when the `Data` column is absent.
    ///
    /// # Errors
    /// - [`DataLoadError::Io`] / [`DataLoadError::Encoding`] when the source is unreadable.
    /// - [`DataLoadError::EmptySource`] when there is no header row.
    /// - [`DataLoadError::MissingColumn`] when `Número` is absent.
    pub fn load(source: &dyn RecordSource, today: NaiveDate) -> LoadResult<Self> {
        let source_name = source.source_name();
        let text = source.read_text()?;
        let table = parse_table(&text);

        if table.header.is_empty() {
            return Err(DataLoadError::EmptySource { source_name });
        }
        let index = ColumnIndex::resolve(&table.header).ok_or_else(|| {
            DataLoadError::MissingColumn {
                source_name: source_name.clone(),
                column: COLUMN_NUMBER,
            }
        })?;

        let mut report = LoadReport {
            unterminated_quote: table.unterminated_quote,
            ..LoadReport::default()
        };
        if table.unterminated_quote {
            warn!(
                "event=store_load module=store status=warn source={} reason=unterminated_quote",
                source_name
            );
        }

        let mut records = Vec::with_capacity(table.rows.len());
        let mut seen = HashSet::<String>::new();
        for row in &table.rows {
            if row.fields.len() > table.header.len() {
                report.rows_truncated += 1;
                warn!(
                    "event=row_truncated module=store status=warn source={} line={} cells={} columns={}",
                    source_name,
                    row.line,
                    row.fields.len(),
                    table.header.len()
                );
            }
            let Some(record) = map_row(row, &table.header, &index, &mut report) else {
                report.rows_skipped += 1;
                warn!(
                    "event=row_skipped module=store status=warn source={} line={} reason=blank_number",
                    source_name, row.line
                );
                continue;
            };
            if !seen.insert(record.number.clone())
                && !report.duplicate_numbers.contains(&record.number)
            {
                report.duplicate_numbers.push(record.number.clone());
            }
            records.push(record);
        }

        let mut columns = table.header.clone();
        if index.date.is_none() {
            let dates = synthesize_dates(records.len(), today);
            for (record, date) in records.iter_mut().zip(dates) {
                record.date = Some(date);
            }
            columns.push(COLUMN_DATE.to_string());
            report.dates_synthesized = true;
        }

        report.rows_loaded = records.len();
        if !report.duplicate_numbers.is_empty() {
            warn!(
                "event=duplicate_numbers module=store status=warn source={} count={}",
                source_name,
                report.duplicate_numbers.len()
            );
        }
        info!(
            "event=store_load module=store status=ok source={} rows={} skipped={} unparsable_dates={} synthesized_dates={}",
            source_name,
            report.rows_loaded,
            report.rows_skipped,
            report.unparsable_dates,
            report.dates_synthesized
        );

        Ok(Self {
            source_name,
            columns,
            records,
            report,
        })
    }

    /// Builds a store from already-typed records with [`STANDARD_COLUMNS`].
    pub fn from_records(source_name: impl Into<String>, records: Vec<ProcessRecord>) -> Self {
        let report = LoadReport {
            rows_loaded: records.len(),
            ..LoadReport::default()
        };
        Self {
            source_name: source_name.into(),
            columns: STANDARD_COLUMNS.iter().map(|c| c.to_string()).collect(),
            records,
            report,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the first record with the given process number.
    pub fn find(&self, number: &str) -> Option<&ProcessRecord> {
        let number = number.trim();
        self.records.iter().find(|record| record.number == number)
    }

    /// Writes `records` in this store's column layout, header first.
    ///
    /// Returns the number of data rows written.
    pub fn export<'a, W, I>(&self, writer: &mut W, records: I) -> io::Result<usize>
    where
        W: Write,
        I: IntoIterator<Item = &'a ProcessRecord>,
    {
        write_row(writer, self.columns.as_slice())?;
        let mut written = 0usize;
        for record in records {
            let cells = self
                .columns
                .iter()
                .map(|column| cell_value(record, column).unwrap_or_default())
                .collect::<Vec<_>>();
            write_row(writer, cells.as_slice())?;
            written += 1;
        }
        writer.flush()?;
        Ok(written)
    }
}

fn map_row(
    row: &RawRow,
    header: &[String],
    index: &ColumnIndex,
    report: &mut LoadReport,
) -> Option<ProcessRecord> {
    let cell = |position: Option<usize>| -> Option<String> {
        position
            .and_then(|position| row.fields.get(position))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let mut record = ProcessRecord::new(cell(Some(index.number))?).ok()?;
    record.responsible = cell(index.responsible);
    record.marker = cell(index.marker);
    record.description = cell(index.description);
    record.subject = cell(index.subject);

    // Unparsable typed cells stay in `extra` so exports reproduce them.
    if let Some(raw_type) = cell(index.process_type) {
        record.process_type = ProcessType::parse(&raw_type);
        if record.process_type.is_none() {
            record.extra.insert(COLUMN_PROCESS_TYPE.to_string(), raw_type);
        }
    }
    if let Some(raw_date) = cell(index.date) {
        record.date = parse_date(&raw_date);
        if record.date.is_none() {
            report.unparsable_dates += 1;
            record.extra.insert(COLUMN_DATE.to_string(), raw_date);
        }
    }
    if let Some(raw_icons) = cell(index.icons) {
        for icon in ICON_SEPARATOR_RE.split(&raw_icons) {
            record.push_icon(icon);
        }
    }

    for (position, column) in header.iter().enumerate() {
        if index.is_mapped(position) || record.extra.contains_key(column) {
            continue;
        }
        if let Some(value) = cell(Some(position)) {
            record.extra.insert(column.clone(), value);
        }
    }

    Some(record)
}

fn cell_value(record: &ProcessRecord, column: &str) -> Option<String> {
    match column {
        COLUMN_NUMBER => Some(record.number.clone()),
        COLUMN_RESPONSIBLE => record.responsible.clone(),
        COLUMN_MARKER => record.marker.clone(),
        COLUMN_DESCRIPTION => record.description.clone(),
        COLUMN_SUBJECT => record.subject.clone(),
        COLUMN_DATE => record
            .date
            .map(format_date)
            .or_else(|| record.extra.get(COLUMN_DATE).cloned()),
        COLUMN_PROCESS_TYPE => record
            .process_type
            .map(|kind| kind.as_label().to_string())
            .or_else(|| record.extra.get(COLUMN_PROCESS_TYPE).cloned()),
        COLUMN_ICONS if !record.icons.is_empty() => Some(record.icons.join(" ")),
        COLUMN_ICONS => None,
        other => record.extra.get(other).cloned(),
    }
}
