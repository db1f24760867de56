//! Output formatting for command results

use rowan::TextSize;
use serde::Serialize;
use strindex_core::{CaretSpec, LiteralKind, LiteralToken, StringPosition};

use crate::OutputFormat;

/// Answer for one caret query
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaretReport {
    pub caret: String,
    pub offset: u32,
    pub caret_count: usize,
    /// Status text, empty when there is no position
    pub text: String,
    pub position: Option<PositionReport>,
}

/// One-based line and column, zero-based index
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PositionReport {
    pub line: usize,
    pub column: usize,
    pub index: usize,
}

impl From<StringPosition> for PositionReport {
    fn from(position: StringPosition) -> Self {
        Self {
            line: position.line() + 1,
            column: position.column() + 1,
            index: position.offset(),
        }
    }
}

impl CaretReport {
    pub fn new(
        caret: CaretSpec,
        offset: u32,
        caret_count: usize,
        position: Option<StringPosition>,
        text: &str,
    ) -> Self {
        Self {
            caret: caret.to_string(),
            offset,
            caret_count,
            text: text.to_string(),
            position: position.map(PositionReport::from),
        }
    }
}

/// One string literal of a file
#[derive(Debug, Clone, Serialize)]
pub struct LiteralReport {
    /// One-based line of the opening delimiter
    pub line: usize,
    /// One-based column of the opening delimiter, in characters
    pub column: usize,
    pub kind: &'static str,
    /// Decoded value; `None` when the literal is malformed
    pub value: Option<String>,
    /// Length of the value in UTF-16 units
    pub length: Option<usize>,
}

impl LiteralReport {
    pub fn new(source: &str, literal: &LiteralToken, value: Option<String>) -> Self {
        let (line, column) = line_column(source, literal.range().start());
        Self {
            line,
            column,
            kind: match literal.kind() {
                LiteralKind::SimpleString => "string",
                LiteralKind::TextBlock => "text-block",
            },
            length: value.as_deref().map(|value| value.encode_utf16().count()),
            value,
        }
    }
}

/// One-based line and character column of a byte offset
fn line_column(source: &str, offset: TextSize) -> (usize, usize) {
    let before = source.get(..usize::from(offset)).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |index| index + 1);
    (line, before[line_start..].chars().count() + 1)
}

pub fn print_caret_report(report: &CaretReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", report.text),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

pub fn print_literal_reports(reports: &[LiteralReport], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for report in reports {
                let value = match &report.value {
                    Some(value) => format!("{value:?}"),
                    None => "<malformed>".to_string(),
                };
                println!(
                    "{}:{}\t{}\t{}",
                    report.line, report.column, report.kind, value
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(reports)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_column() {
        let source = "ab\nçd\"x\"";
        assert_eq!(line_column(source, TextSize::from(0)), (1, 1));
        assert_eq!(line_column(source, TextSize::from(3)), (2, 1));
        assert_eq!(line_column(source, TextSize::from(6)), (2, 3));
    }

    #[test]
    fn test_position_report_is_one_based() {
        let report = PositionReport::from(StringPosition::new(1, 2, 5));
        assert_eq!((report.line, report.column, report.index), (2, 3, 5));
    }

    #[test]
    fn test_literal_report() {
        let source = "s = \"a\\tb\";";
        let literal = LiteralToken::new(LiteralKind::SimpleString, "\"a\\tb\"", 4.into());
        let report = LiteralReport::new(source, &literal, Some("a\tb".to_string()));
        assert_eq!((report.line, report.column), (1, 5));
        assert_eq!(report.kind, "string");
        assert_eq!(report.length, Some(3));
    }
}
