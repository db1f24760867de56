//! Escape-aware decoding of literal content
//!
//! Turns the raw spelling between a literal's delimiters into the characters
//! the literal denotes:
//!
//! - **Simple strings**: backslash escapes (`\n`, `\t`, `\"`, `\\`, `\s`,
//!   octal `\0`..`\377`, unicode `\uXXXX`) become single characters.
//! - **Text blocks**: the common indentation of the content lines (the
//!   closing delimiter line included) is stripped, trailing whitespace is
//!   dropped, and then the same escapes apply, plus `\` at the end of a line
//!   which joins it with the next one.
//!
//! The prefix variants decode only the part before a caret. An escape that
//! is cut by the caret, or an invalid escape, ends the decoded prefix just
//! before it; no partial character is ever emitted.

use crate::literal::LiteralKind;

/// Decode the complete raw content of a literal
///
/// Returns `None` for malformed content (invalid escapes, a text block whose
/// opening delimiter is not followed by a line break).
pub fn decode(raw_content: &str, kind: LiteralKind) -> Option<String> {
    match kind {
        LiteralKind::SimpleString => unescape(raw_content, raw_content.len(), false, true),
        LiteralKind::TextBlock => {
            let stripped = strip_text_block(raw_content)?;
            unescape(&stripped, stripped.len(), true, true)
        }
    }
}

/// Decode the raw content that lies before `up_to` (a byte offset into
/// `raw_content`)
///
/// Text blocks are decoded as if the literal ended exactly at `up_to`: the
/// truncated content gets a synthetic line continuation and a closing line
/// carrying the block's indentation, goes through the usual indentation
/// stripping, and the synthetic tail is removed again before escapes are
/// interpreted.
pub fn decode_prefix(raw_content: &str, up_to: usize, kind: LiteralKind) -> Option<String> {
    let up_to = up_to.min(raw_content.len());
    if !raw_content.is_char_boundary(up_to) {
        return None;
    }
    match kind {
        LiteralKind::SimpleString => unescape(raw_content, up_to, false, false),
        LiteralKind::TextBlock => {
            let indent = text_block_indent(raw_content)?;
            if is_opening_line(raw_content, up_to) {
                return Some(String::new());
            }
            let stripped = strip_text_block_prefix(&raw_content[..up_to], indent)?;
            unescape(&stripped, stripped.len(), true, false)
        }
    }
}

/// Common indentation of a text block, in characters
///
/// The minimum leading whitespace over all non-blank content lines and the
/// closing delimiter line (which counts even when blank).
pub fn text_block_indent(raw_content: &str) -> Option<usize> {
    let lines = text_block_lines(raw_content)?;
    Some(common_indent(&lines))
}

/// Whether byte `up_to` of text-block content is still on the line of the
/// opening delimiter, which contributes nothing to the value
pub fn is_opening_line(raw_content: &str, up_to: usize) -> bool {
    raw_content
        .get(..up_to)
        .is_some_and(|before| !before.contains(['\n', '\r']))
}

const CONTINUATION: &str = "\\\n";

fn strip_text_block_prefix(raw_prefix: &str, indent: usize) -> Option<String> {
    let mut synthetic = String::with_capacity(raw_prefix.len() + CONTINUATION.len() + indent);
    synthetic.push_str(raw_prefix);
    synthetic.push_str(CONTINUATION);
    synthetic.extend(std::iter::repeat_n(' ', indent));

    let stripped = strip_text_block(&synthetic)?;
    // The closing line strips to nothing, leaving the continuation at the end
    stripped
        .strip_suffix(CONTINUATION)
        .map(str::to_string)
}

/// Split text-block content into lines, skipping the rest of the opening
/// delimiter line
///
/// The last element is the closing delimiter line.
fn text_block_lines(raw_content: &str) -> Option<Vec<&str>> {
    let trimmed = raw_content.trim_start_matches(is_block_whitespace);
    let body = if let Some(rest) = trimmed.strip_prefix("\r\n") {
        rest
    } else if let Some(rest) = trimmed
        .strip_prefix('\n')
        .or_else(|| trimmed.strip_prefix('\r'))
    {
        rest
    } else {
        return None;
    };

    let mut lines = Vec::new();
    let mut rest = body;
    while let Some(index) = rest.find(['\n', '\r']) {
        lines.push(&rest[..index]);
        let terminator = if rest[index..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[index + terminator..];
    }
    lines.push(rest);
    Some(lines)
}

fn common_indent(lines: &[&str]) -> usize {
    let last = lines.len().saturating_sub(1);
    lines
        .iter()
        .enumerate()
        .filter(|(index, line)| *index == last || !is_blank(line))
        .map(|(_, line)| leading_whitespace(line))
        .min()
        .unwrap_or(0)
}

/// Indentation stripping without escape interpretation
fn strip_text_block(raw_content: &str) -> Option<String> {
    let lines = text_block_lines(raw_content)?;
    let indent = common_indent(&lines);

    let mut text = String::with_capacity(raw_content.len());
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            text.push('\n');
        }
        if is_blank(line) {
            continue;
        }
        let content = skip_chars(line, indent);
        text.push_str(content.trim_end_matches(is_block_whitespace));
    }
    Some(text)
}

fn is_block_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\x0C')
}

fn is_blank(line: &str) -> bool {
    line.chars().all(is_block_whitespace)
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|&ch| is_block_whitespace(ch)).count()
}

fn skip_chars(line: &str, count: usize) -> &str {
    match line.char_indices().nth(count) {
        Some((index, _)) => &line[index..],
        None => "",
    }
}

/// Interpret escapes in `raw[..limit]`
///
/// In strict mode an invalid or truncated escape fails the whole decode; in
/// prefix mode decoding just stops before it. An escape whose spelling runs
/// past `limit` counts as truncated.
fn unescape(raw: &str, limit: usize, text_block: bool, strict: bool) -> Option<String> {
    let mut units: Vec<u16> = Vec::with_capacity(limit);
    let mut chars = raw.char_indices().peekable();
    let mut buf = [0u16; 2];

    while let Some((start, ch)) = chars.next() {
        if start >= limit {
            break;
        }
        if ch != '\\' {
            if start + ch.len_utf8() > limit {
                break;
            }
            units.extend_from_slice(ch.encode_utf16(&mut buf));
            continue;
        }

        match read_escape(raw, start, text_block) {
            Some((decoded, end)) if end <= limit => {
                if let Some(unit) = decoded {
                    units.push(unit);
                }
                while chars.peek().is_some_and(|&(index, _)| index < end) {
                    chars.next();
                }
            }
            _ if strict => return None,
            _ => break,
        }
    }

    Some(String::from_utf16_lossy(&units))
}

/// Read the escape starting at `raw[start]` (a backslash)
///
/// Returns the decoded UTF-16 unit (`None` for a line continuation) and the
/// byte offset just past the escape.
fn read_escape(raw: &str, start: usize, text_block: bool) -> Option<(Option<u16>, usize)> {
    let bytes = raw.as_bytes();
    let at = start + 1;
    let next = *bytes.get(at)?;

    let simple = |unit: u8| Some((Some(u16::from(unit)), at + 1));
    match next {
        b'b' => simple(0x08),
        b't' => simple(b'\t'),
        b'n' => simple(b'\n'),
        b'f' => simple(0x0C),
        b'r' => simple(b'\r'),
        b's' => simple(b' '),
        b'"' => simple(b'"'),
        b'\'' => simple(b'\''),
        b'\\' => simple(b'\\'),
        b'0'..=b'7' => {
            let max_digits = if next <= b'3' { 3 } else { 2 };
            let mut end = at;
            let mut value: u16 = 0;
            while end < bytes.len() && end - at < max_digits && matches!(bytes[end], b'0'..=b'7') {
                value = value * 8 + u16::from(bytes[end] - b'0');
                end += 1;
            }
            Some((Some(value), end))
        }
        b'u' => {
            let mut end = at;
            while bytes.get(end) == Some(&b'u') {
                end += 1;
            }
            let digits = raw.get(end..end + 4)?;
            let value = u16::from_str_radix(digits, 16).ok()?;
            if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            Some((Some(value), end + 4))
        }
        b'\n' if text_block => Some((None, at + 1)),
        b'\r' if text_block => {
            let end = if bytes.get(at + 1) == Some(&b'\n') {
                at + 2
            } else {
                at + 1
            };
            Some((None, end))
        }
        _ => None,
    }
}
