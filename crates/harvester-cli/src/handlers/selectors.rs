//! Selector catalog handlers

use harvester::catalog::{self, NamedSelectors, NAMED};
use harvester::{SelectorSpec, SelectorTemplate};
use serde::Serialize;

use crate::commands::SelectorsArgs;
use crate::error::CliResult;
use crate::output::{to_json, OutputFormat, Printer};

#[derive(Debug, Serialize)]
struct NamedView {
    name: &'static str,
    description: &'static str,
    placeholders: Vec<&'static str>,
    selectors: Vec<SelectorSpec>,
}

impl From<&NamedSelectors> for NamedView {
    fn from(entry: &NamedSelectors) -> Self {
        Self {
            name: entry.name,
            description: entry.description,
            placeholders: entry.placeholders(),
            selectors: entry.templates.iter().map(SelectorTemplate::spec).collect(),
        }
    }
}

/// List the catalog, or show one entry
pub fn execute_selectors(args: &SelectorsArgs, printer: &Printer) -> CliResult<()> {
    let rendered = match &args.name {
        Some(name) => render_named(catalog::named(name)?, args.format, printer)?,
        None => render_selector_index(args.format, printer)?,
    };
    println!("{rendered}");
    Ok(())
}

/// One line per catalog entry
pub fn render_selector_index(format: OutputFormat, printer: &Printer) -> CliResult<String> {
    if format == OutputFormat::Json {
        let views: Vec<NamedView> = NAMED.iter().map(NamedView::from).collect();
        return Ok(to_json(&views)?);
    }

    let width = NAMED.iter().map(|e| e.name.len()).max().unwrap_or(0);
    let mut lines = vec![printer.header("Selectors")];
    for entry in NAMED {
        let placeholders = entry.placeholders();
        let params = if placeholders.is_empty() {
            String::new()
        } else {
            format!(
                "  {}",
                printer.dim(
                    &placeholders
                        .iter()
                        .map(|p| format!("{{{p}}}"))
                        .collect::<Vec<_>>()
                        .join(" ")
                )
            )
        };
        lines.push(format!(
            "{} {}{params}",
            printer.key(&format!("{:<width$}", entry.name)),
            entry.description
        ));
    }
    Ok(lines.join("\n"))
}

/// Full fallback list for one entry, in priority order
pub fn render_named(
    entry: &NamedSelectors,
    format: OutputFormat,
    printer: &Printer,
) -> CliResult<String> {
    if format == OutputFormat::Json {
        return Ok(to_json(&NamedView::from(entry))?);
    }

    let mut lines = vec![
        printer.header(entry.name),
        entry.description.to_string(),
    ];
    let placeholders = entry.placeholders();
    if !placeholders.is_empty() {
        lines.push(format!("{} {}", printer.key("params:"), placeholders.join(", ")));
    }
    lines.extend(
        entry
            .templates
            .iter()
            .enumerate()
            .map(|(i, template)| format!("  {i}. {}", template.spec())),
    );
    Ok(lines.join("\n"))
}
