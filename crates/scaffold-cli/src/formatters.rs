//! Output formatters for CLI commands.
//!
//! Every command builds a serializable report and hands it to
//! [`format_output`], so the three output modes stay consistent.

use anyhow::Result;
use colored::Colorize;
use scaffold_core::cli::OutputFormat;
use serde::Serialize;

/// Formats data according to the specified output format.
///
/// # Errors
///
/// Returns an error if serialization fails.
///
/// # Examples
///
/// ```
/// use scaffold_cli::formatters::format_output;
/// use scaffold_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     id: String,
///     parameters: usize,
/// }
///
/// let summary = Summary { id: "feature".to_string(), parameters: 2 };
///
/// let output = format_output(&summary, OutputFormat::Text)?;
/// assert_eq!(output, "id=feature\nparameters=2");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Formats data as indented JSON.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain `key=value` lines for scripts.
pub mod text {
    use super::{Result, Serialize};
    use serde_json::Value;

    /// Formats data as one `path=value` line per scalar.
    ///
    /// Nested keys are joined with `.`, array items are indexed
    /// (`files[0].path=...`). Object keys come out sorted. Strings are
    /// printed unquoted.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut lines = Vec::new();
        flatten(&value, "", &mut lines);
        Ok(lines.join("\n"))
    }

    fn flatten(value: &Value, prefix: &str, lines: &mut Vec<String>) {
        match value {
            Value::Object(map) if !map.is_empty() => {
                for (key, item) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    flatten(item, &path, lines);
                }
            }
            Value::Array(items) if !items.is_empty() => {
                for (i, item) in items.iter().enumerate() {
                    flatten(item, &format!("{prefix}[{i}]"), lines);
                }
            }
            Value::Object(_) => lines.push(format!("{prefix}={{}}")),
            Value::Array(_) => lines.push(format!("{prefix}=[]")),
            Value::String(s) => lines.push(format!("{prefix}={s}")),
            Value::Null => lines.push(format!("{prefix}=")),
            other => lines.push(format!("{prefix}={other}")),
        }
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use serde_json::Value;

    /// Formats data as an indented, colorized outline.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = Vec::new();
        format_value(&value, 0, &mut out);
        Ok(out.join("\n"))
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::Null => "-".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.green().to_string(),
            Value::Array(items) if items.is_empty() => "(none)".dimmed().to_string(),
            Value::Object(_) | Value::Array(_) => String::new(),
        }
    }

    fn is_nested(value: &Value) -> bool {
        match value {
            Value::Object(map) => !map.is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => false,
        }
    }

    fn format_value(value: &Value, indent: usize, out: &mut Vec<String>) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Object(map) => {
                for (key, item) in map {
                    if is_nested(item) {
                        out.push(format!("{pad}{}:", key.blue().bold()));
                        format_value(item, indent + 1, out);
                    } else {
                        out.push(format!("{pad}{}: {}", key.blue().bold(), scalar(item)));
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    if is_nested(item) {
                        out.push(format!("{pad}-"));
                        format_value(item, indent + 1, out);
                    } else {
                        out.push(format!("{pad}- {}", scalar(item)));
                    }
                }
            }
            other => out.push(format!("{pad}{}", scalar(other))),
        }
    }
}
