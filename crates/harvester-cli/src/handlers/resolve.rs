//! Resolve command handler

use harvester::{catalog, resolve_indexed, ElementHandle, HtmlDocument, Resolved};
use serde::Serialize;
use tracing::info;

use crate::commands::ResolveArgs;
use crate::error::CliResult;
use crate::output::{to_json, OutputFormat, Printer};

#[derive(Debug, Serialize)]
struct ResolvedView<'a> {
    name: &'a str,
    index: usize,
    fallback: bool,
    selector: String,
    element: &'a ElementHandle,
}

/// Resolve a catalog entry against a saved page and print the match.
///
/// Fails with `ElementNotFound` when no selector in the list matches.
pub fn execute_resolve(args: &ResolveArgs, printer: &Printer) -> CliResult<()> {
    let entry = catalog::named(&args.name)?;
    let params: Vec<(&str, &str)> = args
        .params
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    let list = entry.render(&params)?;

    let page = HtmlDocument::from_file(&args.html)?;
    info!(name = entry.name, page = %args.html.display(), "resolving");
    let resolved = resolve_indexed(&page, &list)?;

    println!("{}", render_resolved(entry.name, &resolved, args.format, printer)?);
    Ok(())
}

/// Render a match with the selector that produced it
pub fn render_resolved(
    name: &str,
    resolved: &Resolved<ElementHandle>,
    format: OutputFormat,
    printer: &Printer,
) -> CliResult<String> {
    if format == OutputFormat::Json {
        return Ok(to_json(&ResolvedView {
            name,
            index: resolved.index,
            fallback: resolved.used_fallback(),
            selector: resolved.selector.to_string(),
            element: &resolved.element,
        })?);
    }

    let summary = format!("{name} matched {} (#{})", resolved.selector, resolved.index);
    let element = &resolved.element;
    let mut lines = vec![if resolved.used_fallback() {
        printer.warning(&summary)
    } else {
        printer.success(&summary)
    }];
    lines.push(format!("  {} {}", printer.key("tag: "), element.tag_name));
    if let Some(id) = &element.id {
        lines.push(format!("  {} {id}", printer.key("id:  ")));
    }
    if let Some(text) = &element.text_content {
        lines.push(format!("  {} {text}", printer.key("text:")));
    }
    Ok(lines.join("\n"))
}
