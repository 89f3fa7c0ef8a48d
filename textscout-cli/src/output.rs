use colored::Colorize;
use textscout::{FileResult, SearchReport};

pub const NO_FILES_MESSAGE: &str = "No files found inside given directory with these extensions";
pub const NOT_FOUND_MESSAGE: &str =
    "Not found searching text in given directory and in files with given extensions";

/// Output format for the search report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

/// One line per ranked result
pub fn format_result(result: &FileResult) -> String {
    let unit = if result.occurrences == 1 { "time" } else { "times" };
    format!(
        "Inside file {} text occurred {} {}",
        result.path.display(),
        result.occurrences,
        unit
    )
}

/// Lines printed to stdout for a text report
pub fn report_lines(report: &SearchReport) -> Vec<String> {
    if report.no_files_found() {
        return vec![NO_FILES_MESSAGE.to_string()];
    }
    if report.results.is_empty() {
        return vec![NOT_FOUND_MESSAGE.to_string()];
    }
    report.results.iter().map(format_result).collect()
}

pub fn print_report(report: &SearchReport, format: OutputFormat) -> serde_json::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            for line in report_lines(report) {
                println!("{}", line);
            }
        }
    }
    print_failures(report);
    Ok(())
}

fn print_failures(report: &SearchReport) {
    for failure in &report.failures {
        eprintln!(
            "{} skipped {}: {}",
            "warning:".yellow().bold(),
            failure.path.display(),
            failure.error
        );
    }
    if !report.no_files_found() {
        eprintln!(
            "Searched {} files, {} failed",
            report.files_discovered,
            report.failures.len()
        );
    }
}
