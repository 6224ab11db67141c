//! Course table handlers

use harvester::{CourseCatalog, CourseEntry};

use crate::commands::{CourseArgs, CoursesArgs};
use crate::error::{CliError, CliResult};
use crate::output::{to_json, OutputFormat, Printer};

/// Print the course table, optionally one group
pub fn execute_courses(
    catalog: &CourseCatalog,
    args: &CoursesArgs,
    printer: &Printer,
) -> CliResult<()> {
    println!(
        "{}",
        render_courses(catalog, args.group.as_deref(), args.format, printer)?
    );
    Ok(())
}

/// Render courses grouped under their headers.
///
/// An unknown group is an argument error listing the valid names.
pub fn render_courses(
    catalog: &CourseCatalog,
    group: Option<&str>,
    format: OutputFormat,
    printer: &Printer,
) -> CliResult<String> {
    let groups: Vec<&str> = match group {
        Some(name) if catalog.groups().contains(&name) => vec![name],
        Some(name) => {
            return Err(CliError::invalid_argument(format!(
                "unknown course group {name:?} (known: {})",
                catalog.groups().join(", ")
            )));
        }
        None => catalog.groups(),
    };

    if format == OutputFormat::Json {
        let entries: Vec<&CourseEntry> = groups
            .iter()
            .flat_map(|group| catalog.in_group(group))
            .collect();
        return Ok(to_json(&entries)?);
    }

    let mut lines = Vec::new();
    for group in groups {
        lines.push(printer.header(group));
        lines.extend(
            catalog
                .in_group(group)
                .into_iter()
                .map(|entry| format!("  {}", printer.key(&entry.code))),
        );
    }
    Ok(lines.join("\n"))
}

/// Print one course
pub fn execute_course(catalog: &CourseCatalog, args: &CourseArgs, printer: &Printer) -> CliResult<()> {
    let entry = catalog.lookup(&args.code)?;
    println!("{}", render_course(entry, args.format, printer)?);
    Ok(())
}

/// Render one course entry
pub fn render_course(entry: &CourseEntry, format: OutputFormat, printer: &Printer) -> CliResult<String> {
    if format == OutputFormat::Json {
        return Ok(to_json(entry)?);
    }
    Ok([
        ("code", entry.code.as_str()),
        ("group", entry.group.as_str()),
        ("name", entry.name.as_str()),
        ("full_name", entry.full_name.as_str()),
    ]
    .iter()
    .map(|(key, value)| format!("{} {value}", printer.key(&format!("{key:<9}"))))
    .collect::<Vec<_>>()
    .join("\n"))
}
