//! Harvester settings resolved from the environment.
//!
//! Settings are read once at process start and passed explicitly to
//! whatever needs them. Each option has one or more environment variable
//! names; the first one present wins, later names are legacy fallbacks.
//! Names match case-insensitively; an exact upper-case name shadows other
//! spellings of the same variable. Variables not listed here are ignored.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::result::{HarvesterError, HarvesterResult};

/// Env names for `selenium_headless`
pub const SELENIUM_HEADLESS: &[&str] = &["HARVESTER_SELENIUM_HEADLESS", "SELENIUM_HEADLESS"];
/// Env names for `page_load_timeout`
pub const PAGE_LOAD_TIMEOUT: &[&str] = &["HARVESTER_PAGE_LOAD_TIMEOUT"];
/// Env names for `wait_timeout`
pub const WAIT_TIMEOUT: &[&str] = &["HARVESTER_WAIT_TIMEOUT"];
/// Env names for `screenshot_dir`
pub const SCREENSHOT_DIR: &[&str] = &["HARVESTER_SCREENSHOT_DIR"];
/// Env names for `downloads_dir`
pub const DOWNLOADS_DIR: &[&str] = &["HARVESTER_DOWNLOADS_DIR"];
/// Env names for `resource_batch_size`
pub const RESOURCE_BATCH_SIZE: &[&str] = &["HARVESTER_RESOURCE_BATCH_SIZE"];
/// Env names for `telemetry_enabled`
pub const TELEMETRY_ENABLED: &[&str] = &["HARVESTER_TELEMETRY_ENABLED", "TELEMETRY_ENABLED"];
/// Env names for `telemetry_log_level`
pub const TELEMETRY_LOG_LEVEL: &[&str] =
    &["HARVESTER_TELEMETRY_LOG_LEVEL", "TELEMETRY_LOG_LEVEL"];
/// Env names for `metrics_report_path`
pub const METRICS_REPORT_PATH: &[&str] =
    &["HARVESTER_METRICS_REPORT_PATH", "METRICS_REPORT_PATH"];

/// Default page load timeout in seconds
pub const DEFAULT_PAGE_LOAD_TIMEOUT_SECS: u64 = 60;
/// Default element wait timeout in seconds
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 30;
/// Default resources processed per batch
pub const DEFAULT_RESOURCE_BATCH_SIZE: usize = 50;

const EXPECT_BOOL: &str = "a boolean (true/false, 1/0, yes/no, on/off)";
const EXPECT_UINT: &str = "a non-negative integer";
const EXPECT_UNICODE: &str = "valid Unicode";

/// Typed harvester options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Run the browser without a window
    pub selenium_headless: bool,
    /// Page load timeout in seconds
    pub page_load_timeout: u64,
    /// Element wait timeout in seconds
    pub wait_timeout: u64,
    /// Where error screenshots are written
    pub screenshot_dir: PathBuf,
    /// Scratch directory for downloaded assets
    pub downloads_dir: PathBuf,
    /// Resources processed per batch
    pub resource_batch_size: usize,
    /// Emit logs
    pub telemetry_enabled: bool,
    /// Log level name (INFO, DEBUG, ...)
    pub telemetry_log_level: String,
    /// Where the last pipeline status JSON is written
    pub metrics_report_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selenium_headless: true,
            page_load_timeout: DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
            wait_timeout: DEFAULT_WAIT_TIMEOUT_SECS,
            screenshot_dir: PathBuf::from("logs/error_screenshots"),
            downloads_dir: PathBuf::from("/tmp/harvester_downloads"),
            resource_batch_size: DEFAULT_RESOURCE_BATCH_SIZE,
            telemetry_enabled: true,
            telemetry_log_level: "INFO".to_string(),
            metrics_report_path: PathBuf::from("data/pipeline_status.json"),
        }
    }
}

impl Settings {
    /// Resolve from an arbitrary name -> value lookup.
    ///
    /// `lookup` is called with the exact alias names.
    ///
    /// # Errors
    ///
    /// [`HarvesterError::ConfigValidation`] for the first malformed typed value.
    pub fn from_lookup<F>(lookup: F) -> HarvesterResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_os_lookup(|name| lookup(name).map(OsString::from))
    }

    fn from_os_lookup<F>(lookup: F) -> HarvesterResult<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let defaults = Self::default();
        let env = Source { lookup: &lookup };

        Ok(Self {
            selenium_headless: env
                .parsed(SELENIUM_HEADLESS, parse_bool)?
                .unwrap_or(defaults.selenium_headless),
            page_load_timeout: env
                .parsed(PAGE_LOAD_TIMEOUT, parse_uint)?
                .unwrap_or(defaults.page_load_timeout),
            wait_timeout: env
                .parsed(WAIT_TIMEOUT, parse_uint)?
                .unwrap_or(defaults.wait_timeout),
            screenshot_dir: env
                .raw(SCREENSHOT_DIR)?
                .map_or(defaults.screenshot_dir, |(_, v)| PathBuf::from(v)),
            downloads_dir: env
                .raw(DOWNLOADS_DIR)?
                .map_or(defaults.downloads_dir, |(_, v)| PathBuf::from(v)),
            resource_batch_size: env
                .parsed(RESOURCE_BATCH_SIZE, parse_uint)?
                .unwrap_or(defaults.resource_batch_size),
            telemetry_enabled: env
                .parsed(TELEMETRY_ENABLED, parse_bool)?
                .unwrap_or(defaults.telemetry_enabled),
            telemetry_log_level: env
                .raw(TELEMETRY_LOG_LEVEL)?
                .map_or(defaults.telemetry_log_level, |(_, v)| v),
            metrics_report_path: env
                .raw(METRICS_REPORT_PATH)?
                .map_or(defaults.metrics_report_path, |(_, v)| PathBuf::from(v)),
        })
    }

    /// Resolve from a fixed set of variables, matching names case-insensitively
    pub fn from_vars<I, K, V>(vars: I) -> HarvesterResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = VarTable::default();
        for (name, value) in vars {
            table.insert(&name.into(), OsString::from(value.into()));
        }
        Self::from_os_lookup(|name| table.get(name))
    }

    /// Resolve from the process environment, matching names case-insensitively.
    ///
    /// A non-Unicode value under a known name is a validation error.
    pub fn from_env() -> HarvesterResult<Self> {
        let mut table = VarTable::default();
        for (name, value) in std::env::vars_os() {
            if let Some(name) = name.to_str() {
                table.insert(name, value);
            }
        }
        Self::from_os_lookup(|name| table.get(name))
    }

    /// Load `.env` from the working directory if present, then resolve from
    /// the process environment
    pub fn load() -> HarvesterResult<Self> {
        Self::load_with_env_file(".env")
    }

    /// Load `env_file` if it exists, then resolve from the process
    /// environment. Variables already set take precedence over the file.
    pub fn load_with_env_file(env_file: impl AsRef<Path>) -> HarvesterResult<Self> {
        let path = env_file.as_ref();
        if path.is_file() {
            dotenvy::from_path(path).map_err(|err| HarvesterError::EnvFile {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        }
        Self::from_env()
    }

    /// Page load timeout
    #[must_use]
    pub const fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout)
    }

    /// Element wait timeout
    #[must_use]
    pub const fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout)
    }

    /// Create the screenshot and download directories and the report's
    /// parent directory
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.screenshot_dir)?;
        fs::create_dir_all(&self.downloads_dir)?;
        if let Some(parent) = self.metrics_report_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// Variables keyed by upper-cased name
#[derive(Debug, Default)]
struct VarTable {
    vars: HashMap<String, OsString>,
}

impl VarTable {
    fn insert(&mut self, name: &str, value: OsString) {
        let key = name.to_ascii_uppercase();
        if key == name {
            let _ = self.vars.insert(key, value);
        } else {
            let _ = self.vars.entry(key).or_insert(value);
        }
    }

    fn get(&self, name: &str) -> Option<OsString> {
        self.vars.get(&name.to_ascii_uppercase()).cloned()
    }
}

struct Source<'a, F> {
    lookup: &'a F,
}

impl<F> Source<'_, F>
where
    F: Fn(&str) -> Option<OsString>,
{
    /// First alias present, with its name
    fn raw(&self, aliases: &[&'static str]) -> HarvesterResult<Option<(&'static str, String)>> {
        let Some((name, value)) = aliases
            .iter()
            .find_map(|&name| (self.lookup)(name).map(|value| (name, value)))
        else {
            return Ok(None);
        };
        value.into_string().map(|value| Some((name, value))).map_err(|raw| {
            HarvesterError::config_validation(name, raw.to_string_lossy(), EXPECT_UNICODE)
        })
    }

    fn parsed<T>(
        &self,
        aliases: &[&'static str],
        parse: fn(&str, &str) -> HarvesterResult<T>,
    ) -> HarvesterResult<Option<T>> {
        self.raw(aliases)?
            .map(|(name, value)| parse(name, &value))
            .transpose()
    }
}

/// Parse a boolean env value
pub fn parse_bool(variable: &str, value: &str) -> HarvesterResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        _ => Err(HarvesterError::config_validation(variable, value, EXPECT_BOOL)),
    }
}

/// Parse a non-negative integer env value
pub fn parse_uint<T: std::str::FromStr>(variable: &str, value: &str) -> HarvesterResult<T> {
    let trimmed = value.trim();
    if trimmed.starts_with('+') {
        return Err(HarvesterError::config_validation(variable, value, EXPECT_UINT));
    }
    trimmed
        .parse()
        .map_err(|_| HarvesterError::config_validation(variable, value, EXPECT_UINT))
}
