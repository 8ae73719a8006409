//! Formatting utilities for CLI output.

use std::io::Write;

use anyhow::Result;
use rl_types::ArchiveItem;

use crate::OutputFormat;

/// Format a large number with commas for readability.
///
/// # Examples
///
/// ```
/// use rl_cli_common::format_number;
///
/// assert_eq!(format_number(0), "0");
/// assert_eq!(format_number(1234), "1,234");
/// assert_eq!(format_number(1234567), "1,234,567");
/// ```
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Write `items` to `out` in the requested format.
pub fn write_items<W: Write>(out: &mut W, items: &[ArchiveItem], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            for item in items {
                writeln!(out, "{}", item.name())?;
            }
        }
        OutputFormat::Jsonl => {
            for item in items {
                writeln!(out, "{}", serde_json::to_string(item)?)?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(items)?)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(items: &[ArchiveItem], format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_items(&mut buf, items, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(12), "12");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(12345), "12,345");
        assert_eq!(format_number(123456), "123,456");
        assert_eq!(format_number(1234567890), "1,234,567,890");
    }

    #[test]
    fn test_plain_output() {
        let items = vec![ArchiveItem::new("a.gz"), ArchiveItem::new("b.gz")];
        assert_eq!(render(&items, OutputFormat::Plain), "a.gz\nb.gz\n");
        assert_eq!(render(&[], OutputFormat::Plain), "");
    }

    #[test]
    fn test_jsonl_output_one_object_per_line() {
        let items = vec![
            ArchiveItem::new("a.gz").with_raw_metadata("nightly"),
            ArchiveItem::new("b.gz"),
        ];
        let out = render(&items, OutputFormat::Jsonl);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["name"], "a.gz");
        assert_eq!(first["raw_metadata"], "nightly");
    }

    #[test]
    fn test_json_output_is_array() {
        let items = vec![ArchiveItem::new("a.gz")];
        let value: serde_json::Value =
            serde_json::from_str(&render(&items, OutputFormat::Json)).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
    }
}
