//! Human-readable progress output.

use std::io::{self, Write};

use genai_ingest_types::files::File;

pub const UPLOADING_MESSAGE: &str = "Uploading large PDF...";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Line printed before the upload starts.
///
/// # Errors
/// 写入失败时返回错误。
pub fn write_uploading(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{UPLOADING_MESSAGE}")
}

/// Line printed once the service has returned the handle.
///
/// # Errors
/// 写入失败时返回错误。
pub fn write_complete(out: &mut impl Write, file: &File) -> io::Result<()> {
    writeln!(out, "Upload complete. File: {}", file.name_or_default())
}

/// Example follow-up request. Printed only; never sent.
#[must_use]
pub fn usage_hint(model: &str) -> String {
    format!(
        "Use this file in generate_content, e.g.:\n  \
         response = client.models.generate_content(\n      \
         model='{model}',\n      \
         contents=['Your prompt about the guide', sample_file]\n  \
         )"
    )
}

/// Writes [`usage_hint`] followed by a newline.
///
/// # Errors
/// 写入失败时返回错误。
pub fn write_usage_hint(out: &mut impl Write, model: &str) -> io::Result<()> {
    writeln!(out, "{}", usage_hint(model))
}
