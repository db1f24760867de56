//! Caret specifications as typed by a user
//!
//! A caret is given either as a byte offset (`42`) or as a 1-based
//! `LINE:COL` pair where the column counts characters (`3:17`).

use std::fmt;
use std::str::FromStr;

use rowan::TextSize;

use crate::error::StrIndexError;
use crate::result::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretSpec {
    Offset(usize),
    LineColumn { line: usize, column: usize },
}

impl CaretSpec {
    /// Byte offset of the caret in `source`
    ///
    /// A column one past the last character of a line is the end of that
    /// line.
    pub fn resolve(&self, source: &str) -> Result<TextSize> {
        let offset = match *self {
            CaretSpec::Offset(offset) => {
                if offset > source.len() || !source.is_char_boundary(offset) {
                    return Err(StrIndexError::invalid_caret(
                        self.to_string(),
                        format!("not a character boundary of a {} byte file", source.len()),
                    ));
                }
                offset
            }
            CaretSpec::LineColumn { line, column } => {
                line_column_offset(source, line, column).ok_or_else(|| {
                    StrIndexError::invalid_caret(self.to_string(), "position is outside the file")
                })?
            }
        };
        u32::try_from(offset).map(TextSize::from).map_err(|_| {
            StrIndexError::invalid_caret(self.to_string(), "offset does not fit in 32 bits")
        })
    }
}

fn line_column_offset(source: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 || column == 0 {
        return None;
    }
    let line_start = if line == 1 {
        0
    } else {
        source
            .match_indices('\n')
            .nth(line - 2)
            .map(|(index, _)| index + 1)?
    };
    let text = &source[line_start..];
    let line_text = &text[..text.find('\n').unwrap_or(text.len())];
    let line_text = line_text.strip_suffix('\r').unwrap_or(line_text);

    let mut chars = line_text.char_indices().map(|(index, _)| index);
    let within = chars
        .nth(column - 1)
        .or_else(|| (line_text.chars().count() == column - 1).then_some(line_text.len()))?;
    Some(line_start + within)
}

impl FromStr for CaretSpec {
    type Err = StrIndexError;

    fn from_str(s: &str) -> Result<Self> {
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|e| StrIndexError::invalid_caret(s, e.to_string()))
        };
        match s.split_once(':') {
            Some((line, column)) => Ok(CaretSpec::LineColumn {
                line: parse(line)?,
                column: parse(column)?,
            }),
            None => Ok(CaretSpec::Offset(parse(s)?)),
        }
    }
}

impl fmt::Display for CaretSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaretSpec::Offset(offset) => write!(f, "{offset}"),
            CaretSpec::LineColumn { line, column } => write!(f, "{line}:{column}"),
        }
    }
}
