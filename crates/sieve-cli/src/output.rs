//! Output formatting and writing utilities
//!
//! This module writes command results in the selected format: a readable
//! error listing, JSON, YAML or the flat legacy message mapping.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use sieve_core::{to_legacy_messages, Context, ValidationError};
use std::io::{self, Write};
use std::path::Path;
use tracing::trace;

/// One reported failure in machine-readable output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub code: String,
    pub message: String,
}

impl From<&ValidationError> for ErrorEntry {
    fn from(error: &ValidationError) -> Self {
        Self {
            path: error.field_path().map(str::to_string),
            code: error.code().to_string(),
            message: error.message().to_string(),
        }
    }
}

/// Outcome of validating one data document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub data: String,
    pub rules: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    pub valid: bool,
    pub errors: Vec<ErrorEntry>,
}

impl ValidationReport {
    /// Collect the errors of a finished validation
    pub fn from_context(result: &Context<'_>, data: &Path, rules: &Path, rule: Option<&str>) -> Self {
        let errors: Vec<ErrorEntry> = result.errors().iter().map(ErrorEntry::from).collect();
        Self {
            data: data.display().to_string(),
            rules: rules.display().to_string(),
            rule: rule.map(str::to_string),
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Summary of a built rule document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RulesSummary {
    pub rules: String,
    pub has_root_rule: bool,
    pub definitions: Vec<String>,
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured machine format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = match self.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Human | OutputFormat::JsonPretty | OutputFormat::Legacy => {
                serde_json::to_string_pretty(value)?
            }
        };
        trace!(bytes = formatted.len(), "Outputting data");

        if formatted.ends_with('\n') {
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write the outcome of a validation
    pub fn validation_result(&mut self, result: &Context<'_>, report: &ValidationReport) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                let formatted = format_errors_human(&report.errors, self.use_color);
                self.write(&formatted)
            }
            OutputFormat::Legacy => self.data(&to_legacy_messages(result)),
            _ => self.data(report),
        }
    }
}

/// Format reported errors for human reading
pub fn format_errors_human(errors: &[ErrorEntry], use_color: bool) -> String {
    let mut output = String::new();

    for (i, error) in errors.iter().enumerate() {
        let location = error.path.as_deref().unwrap_or("<root>");
        let code = if use_color {
            error.code.yellow().to_string()
        } else {
            error.code.clone()
        };
        output.push_str(&format!("{}. {} [{}]\n", i + 1, location, code));
        output.push_str(&format!("   {}\n", error.message));
    }

    output
}
