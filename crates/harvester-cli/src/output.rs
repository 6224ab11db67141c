//! Output formatting

use clap::ValueEnum;
use console::style;
use serde::{Deserialize, Serialize};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Styles text for stdout
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    /// Whether to use colors
    pub use_color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Printer {
    /// Create a new printer
    #[must_use]
    pub const fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Section header
    #[must_use]
    pub fn header(&self, title: &str) -> String {
        if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        }
    }

    /// Key in a key/value listing
    #[must_use]
    pub fn key(&self, key: &str) -> String {
        if self.use_color {
            style(key).cyan().to_string()
        } else {
            key.to_string()
        }
    }

    /// De-emphasized text
    #[must_use]
    pub fn dim(&self, text: &str) -> String {
        if self.use_color {
            style(text).dim().to_string()
        } else {
            text.to_string()
        }
    }

    /// Positive outcome marker
    #[must_use]
    pub fn success(&self, text: &str) -> String {
        if self.use_color {
            format!("{} {text}", style("✓").green().bold())
        } else {
            format!("OK {text}")
        }
    }

    /// Cautionary outcome marker
    #[must_use]
    pub fn warning(&self, text: &str) -> String {
        if self.use_color {
            format!("{} {text}", style("⚠").yellow().bold())
        } else {
            format!("WARN {text}")
        }
    }
}

/// Serialize `value` as pretty JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
