//! Position inside a decoded string value
//!
//! A [`StringPosition`] is the (line, column, index) reached after consuming
//! some string. Positions compose: consuming `a` then `b` lands on the same
//! position as consuming `a + b` in one step, which is what lets the prefix
//! contributed by earlier concatenation operands be added to the position
//! inside the literal under the caret.
//!
//! All three coordinates are zero-based and measured in UTF-16 code units,
//! the unit of `String.length()` on the Java side.

use std::fmt;
use std::ops::Add;

/// Zero-based line, column and absolute index inside a string value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StringPosition {
    line: usize,
    column: usize,
    offset: usize,
}

impl StringPosition {
    /// The position before any character has been consumed
    pub const ZERO: StringPosition = StringPosition {
        line: 0,
        column: 0,
        offset: 0,
    };

    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Position reached after consuming `string` from the start of a value
    pub fn of(string: &str) -> Self {
        let mut position = Self::ZERO;
        for ch in string.chars() {
            let units = ch.len_utf16();
            position.offset += units;
            if ch == '\n' {
                position.line += 1;
                position.column = 0;
            } else {
                position.column += units;
            }
        }
        position
    }

    pub const fn line(&self) -> usize {
        self.line
    }

    pub const fn column(&self) -> usize {
        self.column
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Compose with the position of a fragment consumed after this one
    ///
    /// When the fragment contains a newline its column replaces ours,
    /// otherwise the columns add up.
    pub const fn plus(self, other: StringPosition) -> Self {
        Self {
            line: self.line + other.line,
            column: if other.line == 0 {
                self.column + other.column
            } else {
                other.column
            },
            offset: self.offset + other.offset,
        }
    }

    /// Compose with the position of consuming `string`
    pub fn plus_str(self, string: &str) -> Self {
        if string.is_empty() {
            return self;
        }
        self.plus(Self::of(string))
    }

    /// Render as status text
    ///
    /// With `compact_single_line`, positions on the first line drop the
    /// line/column pair and only report the index.
    pub fn render(&self, compact_single_line: bool) -> String {
        if compact_single_line && self.line == 0 {
            format!("String index {}", self.offset)
        } else {
            self.to_string()
        }
    }
}

impl Add for StringPosition {
    type Output = StringPosition;

    fn add(self, rhs: StringPosition) -> Self::Output {
        self.plus(rhs)
    }
}

impl fmt::Display for StringPosition {
    /// One-based line and column, zero-based index
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "String {}:{} (index {})",
            self.line + 1,
            self.column + 1,
            self.offset
        )
    }
}
