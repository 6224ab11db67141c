//! Harvester CLI: inspect settings, courses and portal selectors
//!
//! ## Usage
//!
//! ```bash
//! harvester config --format json               # Resolved settings
//! harvester courses --group "Global Dynamics"  # Course table
//! harvester selectors courses.course_card      # One fallback list
//! harvester resolve resources.item_title --html saved.html
//! ```

use clap::Parser;
use harvester::{CourseCatalog, Settings};
use harvester_cli::{
    handlers, telemetry, Cli, CliConfig, CliResult, ColorChoice, Commands, Printer, Verbosity,
};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);

    let settings = Settings::load_with_env_file(&config.env_file)?;
    let use_color = config.color.should_color();
    telemetry::init(&settings, config.verbosity, use_color);
    if config.env_file.is_file() {
        debug!(path = %config.env_file.display(), "loaded env file");
    }
    let printer = Printer::new(use_color);

    match cli.command {
        Commands::Config(args) => handlers::execute_config(&settings, &args, &printer),
        Commands::Courses(args) => {
            handlers::execute_courses(&CourseCatalog::builtin(), &args, &printer)
        }
        Commands::Course(args) => handlers::execute_course(&CourseCatalog::builtin(), &args, &printer),
        Commands::Selectors(args) => handlers::execute_selectors(&args, &printer),
        Commands::Resolve(args) => handlers::execute_resolve(&args, &printer),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(color)
        .with_env_file(&cli.env_file)
}
