use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{LiveLogsError, Result};

/// Check that `wanted` is one of `allowed`, naming the valid choices on failure.
pub fn validate_argument(name: &str, wanted: &str, allowed: &[String]) -> Result<()> {
    if allowed.iter().any(|value| value == wanted) {
        return Ok(());
    }
    Err(unknown_argument(name, wanted, allowed))
}

/// The `InvalidArgument` error for a value missing from `allowed`
pub fn unknown_argument(name: &str, wanted: &str, allowed: &[String]) -> LiveLogsError {
    if allowed.is_empty() {
        return LiveLogsError::InvalidArgument(format!("no {} found", name));
    }

    LiveLogsError::InvalidArgument(format!(
        "{} not found [{}], consider using one of the following {} values [{}]",
        name,
        wanted,
        name,
        to_csv(allowed)
    ))
}

/// Join values into a single CSV record, quoting fields that need it
///
/// Fields starting with whitespace are always quoted so the record reads
/// back without losing it.
pub fn to_csv(values: &[String]) -> String {
    values
        .iter()
        .map(|value| csv_field(value))
        .collect::<Vec<_>>()
        .join(",")
}

fn csv_field(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let style = if value.starts_with(char::is_whitespace) {
        QuoteStyle::Always
    } else {
        QuoteStyle::Necessary
    };
    let mut writer = WriterBuilder::new()
        .quote_style(style)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    if writer.write_record([value]).is_err() {
        return String::new();
    }

    let bytes = writer.into_inner().unwrap_or_default();
    let field = String::from_utf8(bytes).unwrap_or_default();
    field.strip_suffix('\n').unwrap_or(&field).to_string()
}
