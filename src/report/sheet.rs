// Spreadsheet reporter - styled SpreadsheetML (Excel 2003 XML) workbook
// Built by plain string construction, like the JUnit renderer

use super::Reporter;
use crate::state::{CaseRecord, CaseStatus, RunLog};
use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base name of the persisted report file
pub const REPORT_BASENAME: &str = "reporte_pruebas";

const SHEET_NAME: &str = "Resultados de Pruebas";

const HEADERS: [&str; 8] = [
    "ID Caso",
    "Historia de Usuario",
    "Nombre del Test",
    "Descripción",
    "Estado",
    "Fecha Ejecución",
    "Duración (seg)",
    "Error/Observaciones",
];

/// Column width hints in points, mirroring the report's original layout
const COLUMN_WIDTHS: [u32; 8] = [72, 180, 240, 300, 90, 120, 90, 300];

/// Workbook preamble: processing instructions, namespaces and the named
/// styles every cell refers to. Status styles are the four fixed buckets.
const WORKBOOK_HEAD: &str = r##"<?xml version="1.0"?>
<?mso-application progid="Excel.Sheet"?>
<Workbook xmlns="urn:schemas-microsoft-com:office:spreadsheet"
 xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet">
 <Styles>
  <Style ss:ID="sHeader">
   <Interior ss:Color="#366092" ss:Pattern="Solid"/>
   <Font ss:Color="#FFFFFF" ss:Bold="1" ss:Size="12"/>
   <Alignment ss:Horizontal="Center" ss:Vertical="Center" ss:WrapText="1"/>
   <Borders>
    <Border ss:Position="Left" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Right" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Top" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Bottom" ss:LineStyle="Continuous" ss:Weight="1"/>
   </Borders>
  </Style>
  <Style ss:ID="sText">
   <Alignment ss:Vertical="Center" ss:WrapText="1"/>
   <Borders>
    <Border ss:Position="Left" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Right" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Top" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Bottom" ss:LineStyle="Continuous" ss:Weight="1"/>
   </Borders>
  </Style>
  <Style ss:ID="sCenter">
   <Alignment ss:Horizontal="Center" ss:Vertical="Center"/>
   <Borders>
    <Border ss:Position="Left" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Right" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Top" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Bottom" ss:LineStyle="Continuous" ss:Weight="1"/>
   </Borders>
  </Style>
  <Style ss:ID="sPassed">
   <Interior ss:Color="#C6EFCE" ss:Pattern="Solid"/>
   <Font ss:Bold="1"/>
   <Alignment ss:Horizontal="Center" ss:Vertical="Center"/>
   <Borders>
    <Border ss:Position="Left" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Right" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Top" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Bottom" ss:LineStyle="Continuous" ss:Weight="1"/>
   </Borders>
  </Style>
  <Style ss:ID="sFailed">
   <Interior ss:Color="#FFC7CE" ss:Pattern="Solid"/>
   <Font ss:Bold="1"/>
   <Alignment ss:Horizontal="Center" ss:Vertical="Center"/>
   <Borders>
    <Border ss:Position="Left" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Right" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Top" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Bottom" ss:LineStyle="Continuous" ss:Weight="1"/>
   </Borders>
  </Style>
  <Style ss:ID="sSkipped">
   <Interior ss:Color="#FFEB9C" ss:Pattern="Solid"/>
   <Font ss:Bold="1"/>
   <Alignment ss:Horizontal="Center" ss:Vertical="Center"/>
   <Borders>
    <Border ss:Position="Left" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Right" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Top" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Bottom" ss:LineStyle="Continuous" ss:Weight="1"/>
   </Borders>
  </Style>
  <Style ss:ID="sError">
   <Interior ss:Color="#FF9999" ss:Pattern="Solid"/>
   <Font ss:Bold="1"/>
   <Alignment ss:Horizontal="Center" ss:Vertical="Center"/>
   <Borders>
    <Border ss:Position="Left" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Right" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Top" ss:LineStyle="Continuous" ss:Weight="1"/>
    <Border ss:Position="Bottom" ss:LineStyle="Continuous" ss:Weight="1"/>
   </Borders>
  </Style>
  <Style ss:ID="sTitle">
   <Font ss:Bold="1" ss:Size="14"/>
  </Style>
  <Style ss:ID="sBold">
   <Font ss:Bold="1"/>
  </Style>
 </Styles>
"##;

/// Spreadsheet reporter. `save` is the single entry point: it renders the
/// table, appends the summary and persists the workbook once.
pub struct SheetReporter {
    output_dir: PathBuf,
}

impl SheetReporter {
    /// Create new spreadsheet reporter
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Render the run log and write it under the output directory, which
    /// is created if absent. The file name embeds the generation
    /// timestamp and existing files are never overwritten. Returns the
    /// resulting path.
    pub fn save(&self, log: &RunLog) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create report directory: {}",
                self.output_dir.display()
            )
        })?;

        let path = unique_report_path(&self.output_dir);
        fs::write(&path, render(log))
            .with_context(|| format!("Failed to write report file: {}", path.display()))?;

        info!("Reporte generado: {}", path.display());
        Ok(path)
    }
}

impl Reporter for SheetReporter {
    fn on_test_start(&self, _test_name: &str) {
        // No-op for the file reporter
    }

    fn on_test_end(&self, _test_name: &str, _record: &CaseRecord) {
        // No-op: the workbook is a one-shot render at suite end
    }

    fn on_suite_end(&self, log: &RunLog) -> Result<()> {
        self.save(log).map(|_| ())
    }
}

/// Render the full workbook: header row, one row per record in insertion
/// order, a blank separator and the summary block. Pure function of the
/// log.
pub fn render(log: &RunLog) -> String {
    let mut xml = String::new();
    xml.push_str(WORKBOOK_HEAD);
    xml.push_str(&format!(
        " <Worksheet ss:Name=\"{}\">\n  <Table>\n",
        SHEET_NAME
    ));

    for width in COLUMN_WIDTHS {
        xml.push_str(&format!(
            "   <Column ss:AutoFitWidth=\"0\" ss:Width=\"{}\"/>\n",
            width
        ));
    }

    xml.push_str("   <Row>\n");
    for header in HEADERS {
        xml.push_str(&string_cell("sHeader", header));
    }
    xml.push_str("   </Row>\n");

    for record in log.all() {
        xml.push_str(&data_row(record));
    }

    xml.push_str(&summary_rows(log));

    xml.push_str("  </Table>\n </Worksheet>\n</Workbook>\n");
    xml
}

fn data_row(record: &CaseRecord) -> String {
    let mut row = String::from("   <Row>\n");
    row.push_str(&string_cell("sCenter", &record.case_id));
    row.push_str(&string_cell("sText", &record.story));
    row.push_str(&string_cell("sText", &record.name));
    row.push_str(&string_cell("sText", &record.description));
    row.push_str(&string_cell(status_style(record.status), record.status.as_str()));
    row.push_str(&string_cell("sCenter", &format_timestamp(record.recorded_at)));
    row.push_str(&number_cell("sCenter", &format!("{:.2}", record.duration_secs)));
    row.push_str(&string_cell("sText", &record.error_message));
    row.push_str("   </Row>\n");
    row
}

/// Summary block: blank separator, RESUMEN title, total and per-status
/// counts, then the success percentage. The percentage row is omitted for
/// an empty run.
pub fn summary_rows(log: &RunLog) -> String {
    let mut xml = String::from("   <Row/>\n");

    xml.push_str("   <Row>\n");
    xml.push_str(&string_cell("sTitle", "RESUMEN"));
    xml.push_str("   </Row>\n");

    xml.push_str(&summary_count_row("Total de Pruebas:", log.total(), None));
    xml.push_str(&summary_count_row(
        "Exitosas (PASSED):",
        log.passed(),
        Some("sPassed"),
    ));
    xml.push_str(&summary_count_row(
        "Fallidas (FAILED):",
        log.failed(),
        Some("sFailed"),
    ));
    xml.push_str(&summary_count_row(
        "Omitidas (SKIPPED):",
        log.skipped(),
        Some("sSkipped"),
    ));
    xml.push_str(&summary_count_row(
        "Errores (ERROR):",
        log.errors(),
        Some("sError"),
    ));

    if !log.is_empty() {
        xml.push_str("   <Row/>\n");
        xml.push_str("   <Row>\n");
        xml.push_str(&plain_cell("Porcentaje de Éxito:"));
        xml.push_str(&string_cell("sBold", &format!("{:.2}%", log.pass_rate())));
        xml.push_str("   </Row>\n");
    }

    xml
}

fn summary_count_row(label: &str, count: usize, style: Option<&str>) -> String {
    let mut row = String::from("   <Row>\n");
    row.push_str(&plain_cell(label));
    match style {
        Some(style) => row.push_str(&number_cell(style, &count.to_string())),
        None => row.push_str(&format!(
            "    <Cell><Data ss:Type=\"Number\">{}</Data></Cell>\n",
            count
        )),
    }
    row.push_str("   </Row>\n");
    row
}

fn string_cell(style: &str, value: &str) -> String {
    format!(
        "    <Cell ss:StyleID=\"{}\"><Data ss:Type=\"String\">{}</Data></Cell>\n",
        style,
        escape_xml(value)
    )
}

fn number_cell(style: &str, value: &str) -> String {
    format!(
        "    <Cell ss:StyleID=\"{}\"><Data ss:Type=\"Number\">{}</Data></Cell>\n",
        style, value
    )
}

fn plain_cell(value: &str) -> String {
    format!(
        "    <Cell><Data ss:Type=\"String\">{}</Data></Cell>\n",
        escape_xml(value)
    )
}

fn status_style(status: CaseStatus) -> &'static str {
    match status {
        CaseStatus::Passed => "sPassed",
        CaseStatus::Failed => "sFailed",
        CaseStatus::Skipped => "sSkipped",
        CaseStatus::Error => "sError",
    }
}

fn format_timestamp(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_default()
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Timestamped report path under `dir`. A numeric suffix keeps two runs
/// in the same second from colliding.
fn unique_report_path(dir: &Path) -> PathBuf {
    let base = format!(
        "{}_{}",
        REPORT_BASENAME,
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let mut path = dir.join(format!("{}.xml", base));
    let mut attempt = 1;
    while path.exists() {
        path = dir.join(format!("{}_{}.xml", base, attempt));
        attempt += 1;
    }
    path
}
