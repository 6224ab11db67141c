//! Config command handler

use harvester::settings::{
    Settings, DOWNLOADS_DIR, METRICS_REPORT_PATH, PAGE_LOAD_TIMEOUT, RESOURCE_BATCH_SIZE,
    SCREENSHOT_DIR, SELENIUM_HEADLESS, TELEMETRY_ENABLED, TELEMETRY_LOG_LEVEL, WAIT_TIMEOUT,
};

use crate::commands::ConfigArgs;
use crate::error::CliResult;
use crate::output::{to_json, OutputFormat, Printer};

/// Print the resolved settings
pub fn execute_config(settings: &Settings, args: &ConfigArgs, printer: &Printer) -> CliResult<()> {
    println!("{}", render_settings(settings, args.format, printer)?);
    Ok(())
}

/// Render settings as text or JSON.
///
/// Text output lists each field with the env vars that set it.
pub fn render_settings(
    settings: &Settings,
    format: OutputFormat,
    printer: &Printer,
) -> CliResult<String> {
    if format == OutputFormat::Json {
        return Ok(to_json(settings)?);
    }

    let rows: [(&str, String, &[&str]); 9] = [
        ("selenium_headless", settings.selenium_headless.to_string(), SELENIUM_HEADLESS),
        ("page_load_timeout", format!("{}s", settings.page_load_timeout), PAGE_LOAD_TIMEOUT),
        ("wait_timeout", format!("{}s", settings.wait_timeout), WAIT_TIMEOUT),
        ("screenshot_dir", settings.screenshot_dir.display().to_string(), SCREENSHOT_DIR),
        ("downloads_dir", settings.downloads_dir.display().to_string(), DOWNLOADS_DIR),
        ("resource_batch_size", settings.resource_batch_size.to_string(), RESOURCE_BATCH_SIZE),
        ("telemetry_enabled", settings.telemetry_enabled.to_string(), TELEMETRY_ENABLED),
        ("telemetry_log_level", settings.telemetry_log_level.clone(), TELEMETRY_LOG_LEVEL),
        (
            "metrics_report_path",
            settings.metrics_report_path.display().to_string(),
            METRICS_REPORT_PATH,
        ),
    ];

    let width = rows.iter().map(|(name, _, _)| name.len()).max().unwrap_or(0);
    let mut lines = vec![printer.header("Settings")];
    lines.extend(rows.iter().map(|(name, value, aliases)| {
        format!(
            "{}{} = {value}  {}",
            printer.key(name),
            " ".repeat(width - name.len()),
            printer.dim(&format!("({})", aliases.join(", ")))
        )
    }));
    Ok(lines.join("\n"))
}
