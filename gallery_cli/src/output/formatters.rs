use super::OutputFormatter;
use crate::progress::format_bytes;
use anyhow::Result;
use colored::*;
use gallery_core::MediaDescriptor;

/// Placeholder for a descriptor whose relative path could not be built
const UNKNOWN_PATH: &str = "(unknown path)";

/// Text formatter for human-readable output
pub struct TextFormatter {
    use_color: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_single(&self, media: &MediaDescriptor) -> Result<String> {
        let mut output = String::new();

        let path = media.path.as_deref().unwrap_or(UNKNOWN_PATH);
        output.push_str(&format!("File: {}\n", self.colorize(path, |s| s.cyan())));
        output.push_str(&format!("Id: {}\n", media.file_id));
        output.push_str(&format!(
            "Type: {}\n",
            self.colorize(&media.mime_type, |s| s.yellow())
        ));
        output.push_str(&format!(
            "Size: {} ({})\n",
            format_bytes(media.size),
            media.size
        ));
        match media.mtime {
            Some(mtime) => output.push_str(&format!("Modified: {mtime}\n")),
            None => output.push_str("Modified: -\n"),
        }
        output.push_str(&format!("Etag: {}\n", media.etag));
        output.push_str(&format!(
            "Shared: {}\n",
            if media.shared_with_user { "yes" } else { "no" }
        ));

        Ok(output)
    }

    fn format_batch(&self, media: &[MediaDescriptor]) -> Result<String> {
        // One aligned row per file
        let lines: Vec<String> = media
            .iter()
            .map(|m| {
                let mime_type = format!("{:<16}", m.mime_type);
                format!(
                    "{:>10}  {}  {:>10}  {}",
                    m.file_id,
                    self.colorize(&mime_type, |s| s.yellow()),
                    format_bytes(m.size),
                    self.colorize(m.path.as_deref().unwrap_or(UNKNOWN_PATH), |s| s.cyan())
                )
            })
            .collect();

        Ok(lines.join("\n"))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_single(&self, media: &MediaDescriptor) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(media)?)
        } else {
            Ok(serde_json::to_string(media)?)
        }
    }

    fn format_batch(&self, media: &[MediaDescriptor]) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(media)?)
        } else {
            Ok(serde_json::to_string(media)?)
        }
    }
}

/// JSON Lines formatter for streaming output
pub struct JsonLinesFormatter;

impl Default for JsonLinesFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonLinesFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for JsonLinesFormatter {
    fn format_single(&self, media: &MediaDescriptor) -> Result<String> {
        JsonFormatter::new(false).format_single(media)
    }
}

/// CSV formatter for tabular output
///
/// Columns follow the descriptor's serialized keys.
pub struct CsvFormatter;

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    fn write_records(media: &[MediaDescriptor]) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for descriptor in media {
            wtr.serialize(descriptor)?;
        }

        let data = wtr.into_inner()?;
        Ok(String::from_utf8(data)?)
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_single(&self, media: &MediaDescriptor) -> Result<String> {
        Self::write_records(std::slice::from_ref(media))
    }

    fn format_batch(&self, media: &[MediaDescriptor]) -> Result<String> {
        Self::write_records(media)
    }
}
