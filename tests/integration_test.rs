// Integration tests for the lookup pipeline
use memolookup::prelude::*;
use serde_json::json;

fn rows(value: serde_json::Value) -> RecordSet {
    serde_json::from_value(value).unwrap()
}

fn demo_criterion() -> Criterion {
    Criterion::none()
        .or_contains("name", "demo")
        .or_equals("id", "demo-memorial")
}

fn render(reporter: &LookupReporter, outcome: &LookupOutcome) -> String {
    let mut out = Vec::new();
    reporter.report(&mut out, outcome);
    String::from_utf8(out).unwrap()
}

#[test]
fn test_case_insensitive_substring() {
    let records = rows(json!([{"name": "Demo Memorial"}]));
    let outcome = RecordFinder::new("name").find(&records, &Criterion::none().or_contains("name", "demo"));
    assert!(outcome.is_found());
}

#[test]
fn test_exact_match_alternative_finds_second_record() {
    let records = rows(json!([{"id": "x"}, {"id": "demo-memorial"}]));
    let outcome = RecordFinder::new("name").find(&records, &Criterion::none().or_equals("id", "demo-memorial"));
    assert_eq!(outcome.record(), Some(&records[1]));
}

#[test]
fn test_absence_reports_summary() {
    let records = rows(json!([{"name": "Alice"}, {"name": "Bob"}]));
    let outcome = RecordFinder::new("name").find(&records, &Criterion::none().or_contains("name", "demo"));
    assert_eq!(
        outcome,
        LookupOutcome::NotFound {
            considered: vec!["Alice".to_string(), "Bob".to_string()]
        }
    );
}

#[test]
fn test_earliest_match_across_alternatives() {
    // The second row matches only by id and the third only by name; source order decides.
    let records = rows(json!([
        {"id": "a", "name": "Alice"},
        {"id": "demo-memorial", "name": "Memorial"},
        {"id": "c", "name": "Demo"}
    ]));
    let outcome = RecordFinder::new("name").find(&records, &demo_criterion());
    assert_eq!(outcome.record().and_then(|r| r.get_str("id")), Some("demo-memorial"));
}

#[test]
fn test_find_is_idempotent() {
    let records = rows(json!([{"name": "Alice"}, {"name": "demo two"}, {"name": "Demo"}]));
    let finder = RecordFinder::new("name");
    let criterion = demo_criterion();
    let first = finder.find(&records, &criterion);
    let second = finder.find(&records, &criterion);
    assert_eq!(first, second);
    assert_eq!(first.record().and_then(|r| r.get_str("name")), Some("demo two"));
}

#[test]
fn test_missing_fields_never_match_or_fail() {
    let records = rows(json!([{}, {"title": "demo"}, {"name": null, "id": null}]));
    let outcome = RecordFinder::new("name").find(&records, &demo_criterion());
    assert_eq!(
        outcome,
        LookupOutcome::NotFound {
            considered: vec!["<missing>".to_string(); 3]
        }
    );
}

#[test]
fn test_found_pipeline_report() {
    let records = rows(json!([
        {"id": "m1", "name": "Alice", "access_code": "A1"},
        {"id": "demo-memorial", "name": "Demo Memorial", "access_code": "DEMO"}
    ]));
    let outcome = RecordFinder::new("name").find(&records, &demo_criterion());
    let reporter = LookupReporter::new(ReportFormat::Text, ["id", "name", "access_code"]);
    assert_eq!(
        render(&reporter, &outcome),
        "Found record:\n  id: demo-memorial\n  name: Demo Memorial\n  access_code: DEMO\n"
    );
    assert!(!NotFoundSeverity::Error.fails(&outcome));
}

#[test]
fn test_not_found_pipeline_report_and_severity() {
    let records = rows(json!([{"name": "Alice"}, {"id": "no-name"}]));
    let outcome = RecordFinder::new("name").find(&records, &demo_criterion());
    let reporter = LookupReporter::new(ReportFormat::Text, ["id", "name"]);
    assert_eq!(
        render(&reporter, &outcome),
        "No matching record found\nRecords considered (2):\n  - Alice\n  - <missing>\n"
    );
    assert!(!NotFoundSeverity::Warn.fails(&outcome));
    assert!(NotFoundSeverity::Error.fails(&outcome));
}

#[test]
fn test_json_pipeline_report() {
    let records = rows(json!([{"id": "demo-memorial", "name": "Demo", "access_code": 1234}]));
    let outcome = RecordFinder::new("name").find(&records, &demo_criterion());
    let reporter = LookupReporter::new(ReportFormat::Json, ["id", "access_code"]);
    let parsed: serde_json::Value = serde_json::from_str(render(&reporter, &outcome).trim()).unwrap();
    assert_eq!(
        parsed,
        json!({"status": "found", "record": {"id": "demo-memorial", "access_code": 1234}})
    );
}
