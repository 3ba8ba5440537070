use chrono::{Duration, NaiveDate};
use procdash_core::{
    filter, DateRange, FilterCriteria, ProcessRecord, ProcessType, ProcessTypeFilter,
    SearchScope,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

fn fixture() -> Vec<ProcessRecord> {
    vec![
        ProcessRecord::new("23106.000101/2024-01")
            .unwrap()
            .with_responsible("Ana")
            .with_marker("Administrativo - Gestão")
            .with_description("Contrato de vigilância")
            .with_process_type(ProcessType::Received)
            .with_date(today() - Duration::days(10)),
        ProcessRecord::new("23106.000102/2024-02")
            .unwrap()
            .with_responsible("Bruno")
            .with_marker("Urgente")
            .with_subject("Vigilância patrimonial")
            .with_process_type(ProcessType::Generated)
            .with_date(today() - Duration::days(100)),
        ProcessRecord::new("23106.000103/2024-03")
            .unwrap()
            .with_marker("Administrativo - Gestão")
            .with_date(today() - Duration::days(150)),
        ProcessRecord::new("23106.000104/2024-04")
            .unwrap()
            .with_responsible("Carla")
            .with_process_type(ProcessType::Received),
        ProcessRecord::new("23106.000105/2024-05")
            .unwrap()
            .with_responsible("Ana")
            .with_marker("Financeiro")
            .with_description("Empenho")
            .with_date(today() - Duration::days(30)),
    ]
}

fn numbers(records: &[&ProcessRecord]) -> Vec<String> {
    records.iter().map(|r| r.number.clone()).collect()
}

fn sample_criteria() -> Vec<FilterCriteria> {
    vec![
        FilterCriteria::new().with_search("vigil", SearchScope::NumberDescriptionSubject),
        FilterCriteria::new().with_search("0102", SearchScope::NumberOnly),
        FilterCriteria::new().with_responsibles(["Ana", "Carla"]),
        FilterCriteria::new().with_markers(["Administrativo - Gestão"]),
        FilterCriteria::new().with_process_type(ProcessTypeFilter::Received),
        FilterCriteria::new().with_date_range(
            DateRange::new(today() - Duration::days(40), today()).unwrap(),
        ),
        FilterCriteria::new()
            .with_responsibles(["Ana"])
            .with_markers(["Financeiro", "Administrativo - Gestão"])
            .with_search("2024", SearchScope::NumberOnly),
    ]
}

#[test]
fn default_criteria_return_input_unchanged() {
    let records = fixture();
    let result = filter(&records, &FilterCriteria::default());
    assert_eq!(result.len(), records.len());
    for (kept, original) in result.iter().zip(&records) {
        assert!(std::ptr::eq(*kept, original));
    }
}

#[test]
fn output_is_a_subsequence_of_input() {
    let records = fixture();
    for criteria in sample_criteria() {
        let result = filter(&records, &criteria);
        let mut cursor = records.iter();
        for kept in result {
            assert!(
                cursor.any(|candidate| std::ptr::eq(candidate, kept)),
                "order broken for {criteria:?}"
            );
        }
    }
}

#[test]
fn filtering_is_idempotent() {
    let records = fixture();
    for criteria in sample_criteria() {
        let once = filter(&records, &criteria);
        let twice = filter(once.iter().copied(), &criteria);
        assert_eq!(numbers(&once), numbers(&twice), "not idempotent for {criteria:?}");
    }
}

#[test]
fn responsible_selection_restricts_membership() {
    let records = fixture();
    let criteria = FilterCriteria::new().with_responsibles(["Ana", "Carla"]);
    let result = filter(&records, &criteria);
    assert_eq!(result.len(), 3);
    for record in result {
        let responsible = record.responsible.as_deref().unwrap();
        assert!(criteria.selected_responsibles.contains(responsible));
    }
}

#[test]
fn marker_selection_keeps_matching_records_in_order() {
    let records = vec![
        ProcessRecord::new("1").unwrap().with_marker("A"),
        ProcessRecord::new("2").unwrap().with_marker("B"),
        ProcessRecord::new("3").unwrap().with_marker("A"),
    ];
    let result = filter(&records, &FilterCriteria::new().with_markers(["A"]));
    assert_eq!(numbers(&result), vec!["1", "3"]);
}

#[test]
fn full_selection_behaves_like_empty_selection() {
    let records = fixture();
    let everyone = FilterCriteria::new().with_responsibles(["Ana", "Bruno", "Carla"]);
    // Record 3 has no responsible, so only the empty selection keeps it.
    assert_eq!(filter(&records, &everyone).len(), 4);
    assert_eq!(filter(&records, &FilterCriteria::new()).len(), 5);
}

#[test]
fn criteria_are_combined_with_and() {
    let records = fixture();
    let criteria = FilterCriteria::new()
        .with_responsibles(["Ana"])
        .with_markers(["Administrativo - Gestão"])
        .with_process_type(ProcessTypeFilter::Received);
    assert_eq!(numbers(&filter(&records, &criteria)), vec!["23106.000101/2024-01"]);
}

#[test]
fn process_type_filter_excludes_untyped_records() {
    let records = fixture();
    let generated =
        filter(&records, &FilterCriteria::new().with_process_type(ProcessTypeFilter::Generated));
    assert_eq!(numbers(&generated), vec!["23106.000102/2024-02"]);

    let received =
        filter(&records, &FilterCriteria::new().with_process_type(ProcessTypeFilter::Received));
    assert_eq!(received.len(), 2);
}

#[test]
fn date_range_is_inclusive_and_skips_undated_records() {
    let records = fixture();
    let range =
        DateRange::new(today() - Duration::days(100), today() - Duration::days(10)).unwrap();
    let result = filter(&records, &FilterCriteria::new().with_date_range(range));
    assert_eq!(
        numbers(&result),
        vec![
            "23106.000101/2024-01",
            "23106.000102/2024-02",
            "23106.000105/2024-05"
        ]
    );
}

#[test]
fn half_open_date_bounds_leave_view_unfiltered() {
    let records = fixture();
    let criteria = FilterCriteria::new().with_date_bounds(None, Some(today()));
    assert_eq!(filter(&records, &criteria).len(), records.len());
}

#[test]
fn text_search_across_fields_or_number_only() {
    let records = fixture();
    let across = filter(
        &records,
        &FilterCriteria::new().with_search("VIGILÂNCIA", SearchScope::NumberDescriptionSubject),
    );
    assert_eq!(
        numbers(&across),
        vec!["23106.000101/2024-01", "23106.000102/2024-02"]
    );

    let number_only = filter(
        &records,
        &FilterCriteria::new().with_search("vigilância", SearchScope::NumberOnly),
    );
    assert!(number_only.is_empty());
}
