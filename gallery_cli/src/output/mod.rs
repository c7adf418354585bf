mod formatters;

pub use formatters::{CsvFormatter, JsonFormatter, JsonLinesFormatter, TextFormatter};

use anyhow::Result;
use gallery_core::MediaDescriptor;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    #[value(name = "jsonl", alias = "json-lines")]
    JsonLines,
    Csv,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-lines" | "jsonl" => Ok(Self::JsonLines),
            "csv" => Ok(Self::Csv),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format a single descriptor
    fn format_single(&self, media: &MediaDescriptor) -> Result<String>;

    /// Format a batch of descriptors
    fn format_batch(&self, media: &[MediaDescriptor]) -> Result<String> {
        // Default implementation concatenates single results
        let formatted: Result<Vec<String>> = media.iter().map(|m| self.format_single(m)).collect();

        Ok(formatted?.join("\n"))
    }
}

/// Create a formatter based on output format
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::JsonLines => Box::new(JsonLinesFormatter::new()),
        OutputFormat::Csv => Box::new(CsvFormatter::new()),
    }
}
