use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn get_binary() -> String {
    env!("CARGO_BIN_EXE_reportify").to_string()
}

fn create_event_file(dir: &std::path::Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write event file");
    path
}

fn find_report(dir: &std::path::Path) -> std::path::PathBuf {
    let mut reports: Vec<_> = fs::read_dir(dir)
        .expect("Report dir missing")
        .flatten()
        .map(|e| e.path())
        .collect();
    reports.sort();
    reports.pop().expect("No report file produced")
}

#[test]
fn test_render_produces_styled_workbook() {
    let binary = get_binary();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let reports_dir = temp_dir.path().join("reports");

    let events = create_event_file(
        temp_dir.path(),
        "run.jsonl",
        concat!(
            r#"{"test": "tests/test_02_login.py::test_login_exitoso", "status": "passed", "duration": 1.2}"#,
            "\n",
            r#"{"test": "tests/test_07_logout.py::test_logout", "status": "skipped", "duration": 0.0}"#,
            "\n",
        ),
    );

    let output = Command::new(&binary)
        .args([
            "render",
            events.to_str().unwrap(),
            "--output-dir",
            reports_dir.to_str().unwrap(),
            "--progress",
            "none",
        ])
        .output()
        .expect("Failed to execute render");

    assert!(output.status.success(), "render exited non-zero");

    let report = find_report(&reports_dir);
    let name = report.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("reporte_pruebas_"));
    assert!(name.ends_with(".xml"));

    let content = fs::read_to_string(&report).expect("Report unreadable");
    assert!(content.contains("mso-application progid=\"Excel.Sheet\""));
    assert!(content.contains("ss:Name=\"Resultados de Pruebas\""));
    assert!(content.contains("Historia de Usuario"));
    assert!(content.contains("HU-02: Inicio de sesión"));
    assert!(content.contains("ss:StyleID=\"sPassed\""));
    assert!(content.contains("ss:StyleID=\"sSkipped\""));
    assert!(content.contains("RESUMEN"));
    assert!(content.contains("50.00%"));
}

#[test]
fn test_render_exits_nonzero_on_failures_but_still_reports() {
    let binary = get_binary();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let reports_dir = temp_dir.path().join("reports");

    let events = create_event_file(
        temp_dir.path(),
        "run.jsonl",
        concat!(
            r#"{"test": "tests/test_03_crear_evento.py::test_crear_evento", "status": "failed", "duration": 0.5, "message": "element not found"}"#,
            "\n",
        ),
    );

    let output = Command::new(&binary)
        .args([
            "render",
            events.to_str().unwrap(),
            "--output-dir",
            reports_dir.to_str().unwrap(),
            "--progress",
            "none",
        ])
        .output()
        .expect("Failed to execute render");

    assert!(!output.status.success(), "failing run must exit non-zero");

    let report = find_report(&reports_dir);
    let content = fs::read_to_string(&report).expect("Report unreadable");
    assert!(content.contains("ss:StyleID=\"sFailed\""));
    assert!(content.contains("element not found"));
}

#[test]
fn test_render_writes_additional_junit_report() {
    let binary = get_binary();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let reports_dir = temp_dir.path().join("reports");
    let junit_path = temp_dir.path().join("junit.xml");

    let events = create_event_file(
        temp_dir.path(),
        "run.jsonl",
        concat!(
            r#"{"test": "tests/test_06_navegacion.py::test_menu_superior", "status": "passed", "duration": 0.3}"#,
            "\n",
        ),
    );

    let output = Command::new(&binary)
        .args([
            "render",
            events.to_str().unwrap(),
            "--output-dir",
            reports_dir.to_str().unwrap(),
            "--log-format",
            "junit",
            "--log-output",
            junit_path.to_str().unwrap(),
            "--progress",
            "none",
        ])
        .output()
        .expect("Failed to execute render");

    assert!(output.status.success());
    let junit = fs::read_to_string(&junit_path).expect("JUnit report missing");
    assert!(junit.contains("<testsuites name=\"reportify\""));
    assert!(junit.contains("classname=\"HU-06: Navegación en la interfaz\""));
}

#[test]
fn test_check_reports_malformed_lines_as_json() {
    let binary = get_binary();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let events = create_event_file(
        temp_dir.path(),
        "run.jsonl",
        concat!(
            r#"{"test": "tests/test_02_login.py::test_login", "status": "passed", "duration": 1.0}"#,
            "\n",
            "definitely not json\n",
            r#"{"test": "tests/test_02_login.py::test_otro", "status": "weird", "duration": 1.0}"#,
            "\n",
        ),
    );

    let output = Command::new(&binary)
        .args(["check", events.to_str().unwrap(), "--format", "json"])
        .output()
        .expect("Failed to execute check");

    // Malformed lines are errors, so check gates with a non-zero exit
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let check_result: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(check_result["summary"]["total_errors"], 1);
    assert_eq!(check_result["summary"]["total_warnings"], 1);
    assert_eq!(check_result["summary"]["total_events"], 2);
}
