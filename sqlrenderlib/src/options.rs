//! Render options and format identifiers.
//!
//! This module contains the configuration types that control how a result
//! set is rendered.

use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;

/// Built-in output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// ASCII box table with a summary footer for long results
    #[default]
    Table,
    /// Markdown pipe table
    Markdown,
    /// HTML `<table>`
    Html,
    /// Comma-separated values with a UTF-8 byte-order mark
    Csv,
    /// JSON array of objects
    Json,
    /// YAML sequence of mappings
    Yaml,
    /// `resultset/row/field` XML document
    Xml,
    /// Excel workbook
    Xlsx,
    /// One `name=value, ...` line per row
    Plain,
}

impl Format {
    /// Every built-in format, in display order
    pub const ALL: [Format; 9] = [
        Format::Table,
        Format::Markdown,
        Format::Html,
        Format::Csv,
        Format::Json,
        Format::Yaml,
        Format::Xml,
        Format::Xlsx,
        Format::Plain,
    ];

    /// Identifier used on the command line and in the registry
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Table => "table",
            Format::Markdown => "markdown",
            Format::Html => "html",
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Xml => "xml",
            Format::Xlsx => "xlsx",
            Format::Plain => "plain",
        }
    }

    /// Check if the output is binary rather than text
    pub fn is_binary(&self) -> bool {
        matches!(self, Format::Xlsx)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Format::Table),
            "markdown" | "md" => Ok(Format::Markdown),
            "html" => Ok(Format::Html),
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "xml" => Ok(Format::Xml),
            "xlsx" | "excel" => Ok(Format::Xlsx),
            "plain" | "text" => Ok(Format::Plain),
            _ => Err(RenderError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// How spreadsheet columns are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnAddressing {
    /// Single letters `A`..`Z` only; columns past the 26th are not written
    #[default]
    SingleLetter,
    /// Spreadsheet-style letters without limit: `A`..`Z`, `AA`, `AB`, ...
    Extended,
}

impl FromStr for ColumnAddressing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "letters" | "single" | "single-letter" => Ok(ColumnAddressing::SingleLetter),
            "extended" => Ok(ColumnAddressing::Extended),
            _ => Err(format!("Unknown column addressing: {}", s)),
        }
    }
}

/// Options shared by every renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit the column-name header row (tabular formats)
    pub include_header: bool,
    /// Query text, written to the XML `statement` attribute
    pub statement: String,
    /// Spreadsheet column addressing
    pub sheet_addressing: ColumnAddressing,
    /// Spreadsheet worksheet name
    pub sheet_name: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_header: true,
            statement: String::new(),
            sheet_addressing: ColumnAddressing::default(),
            sheet_name: "Sheet1".to_string(),
        }
    }
}

impl RenderOptions {
    /// Create options with defaults (header on, single-letter addressing)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: toggle the header row
    pub fn include_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Builder: set the query text
    pub fn statement(mut self, statement: impl Into<String>) -> Self {
        self.statement = statement.into();
        self
    }

    /// Builder: set spreadsheet column addressing
    pub fn sheet_addressing(mut self, addressing: ColumnAddressing) -> Self {
        self.sheet_addressing = addressing;
        self
    }

    /// Builder: set the worksheet name
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }
}
