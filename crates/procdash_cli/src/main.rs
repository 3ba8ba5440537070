//! Terminal front-end for the process panel.
//!
//! # Responsibility
//! - Load the process table once, apply command-line filters and print the
//!   summary and record cards.
//! - Write the filtered view to a delimited file on request.

use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use log::info;
use procdash_core::config::parse_sla_max_days;
use procdash_core::{
    init_logging, CsvFileSource, DashboardConfig, DashboardService, DashboardView,
    FilterCriteria, InlineSource, ProcessTypeFilter, RecordCard, RecordSelection, RecordSource,
    RecordStore, SearchScope, SlaDisplay,
};
use serde_json::json;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "procdash")]
#[command(about = "Filter and classify administrative process records")]
struct Cli {
    /// Semicolon-delimited process sheet.
    #[arg(long, conflicts_with = "sample")]
    data: Option<PathBuf>,
    /// Use the built-in demo dataset.
    #[arg(long, default_value_t = false)]
    sample: bool,
    /// Case-insensitive text to look for.
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, value_enum)]
    scope: Option<ScopeCli>,
    /// Repeat to select several responsibles; none selects all.
    #[arg(long = "responsible")]
    responsibles: Vec<String>,
    /// Repeat to select several markers; none selects all.
    #[arg(long = "marker")]
    markers: Vec<String>,
    #[arg(long, value_enum, default_value_t = ProcessTypeCli::All)]
    process_type: ProcessTypeCli,
    /// Inclusive range start (YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Inclusive range end (YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
    #[arg(long, value_parser = parse_sla_days)]
    sla_days: Option<u32>,
    /// Reference date for SLA computation; defaults to the local date.
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Write the filtered view to this file.
    #[arg(long)]
    export: Option<PathBuf>,
    /// Print details for one process number.
    #[arg(long)]
    select: Option<String>,
    /// Print the sidebar option lists and exit.
    #[arg(long, default_value_t = false)]
    options: bool,
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScopeCli {
    Number,
    Text,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProcessTypeCli {
    All,
    Received,
    Generated,
}

impl From<ScopeCli> for SearchScope {
    fn from(value: ScopeCli) -> Self {
        match value {
            ScopeCli::Number => SearchScope::NumberOnly,
            ScopeCli::Text => SearchScope::NumberDescriptionSubject,
        }
    }
}

impl From<ProcessTypeCli> for ProcessTypeFilter {
    fn from(value: ProcessTypeCli) -> Self {
        match value {
            ProcessTypeCli::All => ProcessTypeFilter::All,
            ProcessTypeCli::Received => ProcessTypeFilter::Received,
            ProcessTypeCli::Generated => ProcessTypeFilter::Generated,
        }
    }
}

fn parse_sla_days(raw: &str) -> Result<u32, String> {
    parse_sla_max_days(raw).map_err(|err| err.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("procdash: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = DashboardConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(days) = cli.sla_days {
        config.sla_max_days = days;
    }
    if let Some(scope) = cli.scope {
        config.search_scope = scope.into();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.validate().map_err(|err| err.to_string())?;

    if let Some(log_dir) = &cli.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let source: Box<dyn RecordSource> = match &cli.data {
        Some(path) => Box::new(CsvFileSource::new(path)),
        None if cli.sample => Box::new(InlineSource::sample()),
        None => return Err("either --data <path> or --sample is required".to_string()),
    };
    let store = RecordStore::load(source.as_ref(), today).map_err(|err| err.to_string())?;
    let service = DashboardService::new(store, config);

    if cli.options {
        return print_options(&service, cli.json);
    }

    let criteria = FilterCriteria::new()
        .with_search(cli.search.clone(), service.config().search_scope)
        .with_responsibles(cli.responsibles.iter().cloned())
        .with_markers(cli.markers.iter().cloned())
        .with_process_type(cli.process_type.into())
        .with_date_bounds(cli.from, cli.to);

    let view = service.view(&criteria, today);
    info!(
        "event=query module=cli status=ok in_view={} total={}",
        view.summary.total_in_view, view.summary.total_loaded
    );

    if let Some(path) = &cli.export {
        let file = File::create(path)
            .map_err(|err| format!("failed to create `{}`: {err}", path.display()))?;
        let mut writer = BufWriter::new(file);
        let written = service
            .export_view(&view, &mut writer)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
        eprintln!("exported {written} process(es) to {}", path.display());
    }

    let mut selection = RecordSelection::new();
    if let Some(number) = &cli.select {
        selection.select(number.clone());
    }

    if cli.json {
        let selected = selection.resolve(service.store());
        let payload = json!({
            "source": service.store().source_name(),
            "view": view,
            "selected": selected,
            "load_report": service.store().report(),
        });
        let text = serde_json::to_string_pretty(&payload).map_err(|err| err.to_string())?;
        println!("{text}");
        return Ok(());
    }

    print_view(&service, &criteria, &view);
    if let Some(number) = selection.selected_number() {
        print_details(&service, &selection, number);
    }
    Ok(())
}

fn print_options(service: &DashboardService, as_json: bool) -> Result<(), String> {
    let options = service.filter_options();
    if as_json {
        let text = serde_json::to_string_pretty(&options).map_err(|err| err.to_string())?;
        println!("{text}");
        return Ok(());
    }
    println!("Responsável:");
    for value in &options.responsibles {
        println!("  {value}");
    }
    println!("Marcador:");
    for value in &options.markers {
        println!("  {value}");
    }
    Ok(())
}

fn print_view(service: &DashboardService, criteria: &FilterCriteria, view: &DashboardView<'_>) {
    let summary = &view.summary;
    println!("== Resumo Geral ({}) ==", service.store().source_name());
    if let Some(range) = criteria.date_range {
        println!("Período: {} a {}", range.start(), range.end());
    }
    println!(
        "Processos na Vista: {} (de {} no total)",
        summary.total_in_view, summary.total_loaded
    );
    for marker in &summary.marker_counts {
        println!("{}: {}", marker.marker, marker.count);
    }
    println!(
        "Atrasados: {} | Próximos do vencimento: {} | Sem data: {} (SLA {} dias)",
        summary.overdue,
        summary.near_due,
        summary.date_unknown,
        service.config().sla_max_days
    );
    println!();
    println!("== Lista de Processos ==");

    if view.is_empty() {
        println!("Nenhum processo encontrado com os filtros selecionados.");
        return;
    }
    for card in &view.cards {
        print_card(card);
    }
}

fn print_card(card: &RecordCard<'_>) {
    let record = card.record;
    let dash = "-";
    let mut title = format!("{} {}", card.style.icon, record.number);
    if !record.icons.is_empty() {
        title.push_str(&format!(" [{}]", record.icons.join(" ")));
    }
    println!("{title}");
    println!(
        "  Responsável: {} | Marcador: {}",
        record.responsible.as_deref().unwrap_or(dash),
        record.marker.as_deref().unwrap_or(dash)
    );
    if let Some(description) = &record.description {
        println!("  {description}");
    }
    if let Some(subject) = &record.subject {
        println!("  Assunto: {subject}");
    }
    match &card.sla {
        SlaDisplay::Classified(result) => println!(
            "  {} | {} dias | {}%",
            result.sla_status.label(),
            result.days_elapsed,
            result.progress_percent
        ),
        SlaDisplay::DateUnknown => println!("  Data desconhecida"),
    }
    println!("  {}", card.link);
    println!();
}

fn print_details(service: &DashboardService, selection: &RecordSelection, number: &str) {
    println!("== Detalhes ==");
    let Some(record) = selection.resolve(service.store()) else {
        println!("Processo {number} não encontrado.");
        return;
    };
    println!("Número: {}", record.number);
    if let Some(kind) = record.process_type {
        println!("Tipo: {}", kind.as_label());
    }
    if let Some(date) = record.date {
        println!("Data: {}", date.format("%d/%m/%Y"));
    }
    for (column, value) in &record.extra {
        println!("{column}: {value}");
    }
    println!("Abrir no SEI: {}", service.link_for(&record.number));
}
