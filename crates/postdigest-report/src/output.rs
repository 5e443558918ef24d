//! Report serializer: the structured JSON report and the plain-text narrative.

use std::path::Path;

use chrono::NaiveDate;
use postdigest_core::WeeklyReport;

use crate::error::ReportError;

#[must_use]
pub fn report_file_name(list_name: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!("report_{list_name}_{start}_to_{end}.json")
}

#[must_use]
pub fn narrative_file_name(list_name: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!("summary_{list_name}_{start}_to_{end}.txt")
}

/// Write `report` as indented JSON, creating parent directories as needed.
///
/// Keys appear in struct field order, so output is stable across runs.
///
/// # Errors
///
/// Returns [`ReportError::Serialize`] if encoding fails and
/// [`ReportError::Io`] if the file cannot be written.
pub fn save_report(report: &WeeklyReport, path: &Path) -> Result<(), ReportError> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    write_file(path, json.as_bytes())?;
    tracing::info!(path = %path.display(), "report saved");
    Ok(())
}

/// Parse a report previously written by [`save_report`].
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the file cannot be read and
/// [`ReportError::Serialize`] if it is not a valid report.
pub fn load_report(path: &Path) -> Result<WeeklyReport, ReportError> {
    let content = std::fs::read_to_string(path).map_err(|e| ReportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Write the overall summary as plain text.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the file cannot be written.
pub fn save_narrative(text: &str, path: &Path) -> Result<(), ReportError> {
    write_file(path, text.as_bytes())?;
    tracing::info!(path = %path.display(), "narrative saved");
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), ReportError> {
    let io_err = |e: std::io::Error| ReportError::Io {
        path: path.display().to_string(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, contents).map_err(io_err)
}
