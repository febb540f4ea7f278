// Workflow tests - replay outcome events through the full pipeline

use reportify::ingest;
use reportify::report::sheet::{self, SheetReporter};
use reportify::state::{CaseStatus, RunLog, StoryMap};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_events(dir: &std::path::Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n")).expect("Failed to write event file");
    path
}

fn replay(path: &std::path::Path) -> RunLog {
    let stories = StoryMap::default();
    let batch = ingest::load_events(path).expect("Failed to load events");

    let mut log = RunLog::new();
    for raw in &batch.events {
        log.record(raw, &stories);
    }
    log.metrics.degraded_events = batch.degraded;
    log
}

/// The reference scenario: one passed, one failed, one skipped outcome.
#[test]
fn test_three_outcome_scenario() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let events = write_events(
        temp_dir.path(),
        "run.jsonl",
        &[
            r#"{"test": "tests/test_02_login.py::test_login", "status": "passed", "duration": 1.2}"#,
            r#"{"test": "tests/test_01_registro_usuario.py::test_register", "status": "failed", "duration": 0.5, "message": "element not found"}"#,
            r#"{"test": "tests/test_07_logout.py::test_logout", "status": "skipped", "duration": 0.0}"#,
        ],
    );

    let log = replay(&events);

    assert_eq!(log.total(), 3);
    assert_eq!(log.passed(), 1);
    assert_eq!(log.failed(), 1);
    assert_eq!(log.skipped(), 1);
    assert_eq!(log.errors(), 0);
    assert!((log.pass_rate() - 33.333333).abs() < 0.01);

    // The rendered sheet carries three data rows and the 33.33% summary
    let xml = sheet::render(&log);
    assert_eq!(xml.matches("ss:StyleID=\"sCenter\"><Data ss:Type=\"String\">N/A").count(), 3);
    assert!(xml.contains("33.33%"));
    assert!(xml.contains("element not found"));
}

#[test]
fn test_insertion_order_survives_to_the_sheet() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let events = write_events(
        temp_dir.path(),
        "run.jsonl",
        &[
            r#"{"test": "tests/test_03_crear_evento.py::test_crear", "status": "passed", "duration": 0.3}"#,
            r#"{"test": "tests/test_02_login.py::test_login", "status": "passed", "duration": 0.2}"#,
            r#"{"test": "tests/test_05_eliminar_evento.py::test_eliminar", "status": "passed", "duration": 0.1}"#,
        ],
    );

    let log = replay(&events);
    let xml = sheet::render(&log);

    let crear = xml.find("test_crear").expect("first row missing");
    let login = xml.find("test_login").expect("second row missing");
    let eliminar = xml.find("test_eliminar").expect("third row missing");
    assert!(crear < login && login < eliminar);
}

#[test]
fn test_malformed_lines_degrade_to_error_records() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let events = write_events(
        temp_dir.path(),
        "run.jsonl",
        &[
            r#"{"test": "tests/test_02_login.py::test_login", "status": "passed", "duration": 1.0}"#,
            "this is not an event",
            r#"{"test": "tests/test_06_navegacion.py::test_menu", "status": "half-done", "duration": 0.2}"#,
        ],
    );

    let log = replay(&events);

    assert_eq!(log.total(), 3);
    assert_eq!(log.passed(), 1);
    assert_eq!(log.errors(), 2);
    assert_eq!(log.metrics.degraded_events, 1);

    let error_records: Vec<_> = log
        .all()
        .iter()
        .filter(|r| r.status == CaseStatus::Error)
        .collect();
    assert_eq!(error_records.len(), 2);
    assert!(error_records.iter().all(|r| !r.error_message.is_empty()));
}

#[test]
fn test_story_resolution_from_event_paths() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let events = write_events(
        temp_dir.path(),
        "run.jsonl",
        &[
            r#"{"test": "tests/test_04_visualizar_calendario.py::test_mes", "status": "passed", "duration": 0.4}"#,
            r#"{"test": "tests/test_99_misterio.py::test_raro", "status": "passed", "duration": 0.1}"#,
            r#"{"test": "test_sin_archivo", "status": "passed", "duration": 0.1}"#,
        ],
    );

    let log = replay(&events);
    let records = log.all();

    assert_eq!(records[0].story, "HU-04: Visualización de calendario mensual");
    assert_eq!(records[1].story, "Desconocida");
    assert_eq!(records[2].story, "Desconocida");
}

#[test]
fn test_error_messages_truncate_at_bound() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let long_message = "x".repeat(300);
    let line = format!(
        r#"{{"test": "tests/test_02_login.py::test_login", "status": "failed", "duration": 0.5, "message": "{}"}}"#,
        long_message
    );
    let events = write_events(temp_dir.path(), "run.jsonl", &[&line]);

    let log = replay(&events);

    assert_eq!(log.all()[0].error_message.chars().count(), 200);
}

#[test]
fn test_consecutive_saves_get_distinct_paths() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let events = write_events(
        temp_dir.path(),
        "run.jsonl",
        &[r#"{"test": "tests/test_02_login.py::test_login", "status": "passed", "duration": 1.0}"#],
    );

    let log = replay(&events);
    let reporter = SheetReporter::new(temp_dir.path().join("reports"));

    let first = reporter.save(&log).expect("first save");
    let first_content = fs::read_to_string(&first).expect("first report readable");
    let second = reporter.save(&log).expect("second save");

    assert_ne!(first, second);
    // The first report is untouched by the second save
    assert_eq!(
        fs::read_to_string(&first).expect("first report still readable"),
        first_content
    );
}

#[test]
fn test_empty_run_renders_header_and_summary_only() {
    let log = RunLog::new();
    let xml = sheet::render(&log);

    assert!(xml.contains("ID Caso"));
    assert!(xml.contains("Total de Pruebas:"));
    assert!(!xml.contains("Porcentaje"));
    assert_eq!(log.pass_rate(), 0.0);
}
