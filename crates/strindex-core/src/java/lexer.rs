//! Lossless Java lexer
//!
//! Every byte of the input ends up in exactly one token, whitespace and
//! comments included, so concatenating the token texts gives back the
//! source. Malformed input (an unterminated literal, a stray character)
//! still produces a token, together with a [`LexerError`].

use super::JavaSyntaxKind;
use std::ops::Range;

/// Byte range in the source
pub type JavaSpan = Range<usize>;

/// A lexer error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    pub message: String,
    pub span: JavaSpan,
}

impl LexerError {
    pub fn new(message: impl Into<String>, span: JavaSpan) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A token with its syntax kind and span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaToken {
    pub kind: JavaSyntaxKind,
    pub text: String,
    pub span: JavaSpan,
}

impl JavaToken {
    pub fn new(kind: JavaSyntaxKind, text: impl Into<String>, span: JavaSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Result returned by the lexer
pub type JavaLexResult = (Vec<JavaToken>, Vec<LexerError>);

/// Operators, longest first so the first match is the maximal munch
const OPERATORS: &[(&str, JavaSyntaxKind)] = &[
    (">>>=", JavaSyntaxKind::AssignOp),
    ("<<=", JavaSyntaxKind::AssignOp),
    (">>=", JavaSyntaxKind::AssignOp),
    (">>>", JavaSyntaxKind::UShr),
    ("...", JavaSyntaxKind::Ellipsis),
    ("::", JavaSyntaxKind::ColonColon),
    ("->", JavaSyntaxKind::Arrow),
    ("==", JavaSyntaxKind::EqEq),
    ("!=", JavaSyntaxKind::NotEq),
    ("<=", JavaSyntaxKind::LtEq),
    (">=", JavaSyntaxKind::GtEq),
    ("&&", JavaSyntaxKind::AmpAmp),
    ("||", JavaSyntaxKind::PipePipe),
    ("++", JavaSyntaxKind::PlusPlus),
    ("--", JavaSyntaxKind::MinusMinus),
    ("+=", JavaSyntaxKind::AssignOp),
    ("-=", JavaSyntaxKind::AssignOp),
    ("*=", JavaSyntaxKind::AssignOp),
    ("/=", JavaSyntaxKind::AssignOp),
    ("%=", JavaSyntaxKind::AssignOp),
    ("&=", JavaSyntaxKind::AssignOp),
    ("|=", JavaSyntaxKind::AssignOp),
    ("^=", JavaSyntaxKind::AssignOp),
    ("<<", JavaSyntaxKind::Shl),
    (">>", JavaSyntaxKind::Shr),
    ("(", JavaSyntaxKind::LParen),
    (")", JavaSyntaxKind::RParen),
    ("{", JavaSyntaxKind::LBrace),
    ("}", JavaSyntaxKind::RBrace),
    ("[", JavaSyntaxKind::LBracket),
    ("]", JavaSyntaxKind::RBracket),
    (";", JavaSyntaxKind::Semicolon),
    (",", JavaSyntaxKind::Comma),
    (".", JavaSyntaxKind::Dot),
    ("@", JavaSyntaxKind::At),
    ("?", JavaSyntaxKind::Question),
    (":", JavaSyntaxKind::Colon),
    ("=", JavaSyntaxKind::Eq),
    ("!", JavaSyntaxKind::Bang),
    ("<", JavaSyntaxKind::Lt),
    (">", JavaSyntaxKind::Gt),
    ("+", JavaSyntaxKind::Plus),
    ("-", JavaSyntaxKind::Minus),
    ("*", JavaSyntaxKind::Star),
    ("/", JavaSyntaxKind::Slash),
    ("%", JavaSyntaxKind::Percent),
    ("&", JavaSyntaxKind::Amp),
    ("|", JavaSyntaxKind::Pipe),
    ("^", JavaSyntaxKind::Caret),
    ("~", JavaSyntaxKind::Tilde),
];

/// Lex input preserving all trivia
///
/// The returned token list always ends with an empty `Eof` token.
pub fn lex_with_trivia(input: &str) -> JavaLexResult {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    let len = input.len();
    let mut i = 0usize;

    while i < len {
        let Some((current, size)) = next_char(input, i) else {
            break;
        };
        let start = i;
        let rest = &input[start..];

        let (kind, end) = match current {
            '\n' => (JavaSyntaxKind::Newline, start + size),
            '\r' => {
                // \r\n is a single line terminator
                if rest.starts_with("\r\n") {
                    (JavaSyntaxKind::Newline, start + 2)
                } else {
                    (JavaSyntaxKind::Newline, start + size)
                }
            }
            c if c.is_whitespace() => (
                JavaSyntaxKind::Whitespace,
                consume_while(input, start, |c| {
                    c.is_whitespace() && c != '\n' && c != '\r'
                }),
            ),
            '/' if rest.starts_with("//") => (
                JavaSyntaxKind::CommentLine,
                consume_while(input, start, |c| c != '\n' && c != '\r'),
            ),
            '/' if rest.starts_with("/*") => {
                let end = match input[start + 2..].find("*/") {
                    Some(pos) => start + 2 + pos + 2,
                    None => {
                        errors.push(LexerError::new(
                            "Unterminated block comment",
                            span(start, len),
                        ));
                        len
                    }
                };
                (JavaSyntaxKind::CommentBlock, end)
            }
            '"' if rest.starts_with("\"\"\"") => {
                let (end, error) = lex_text_block(input, start);
                errors.extend(error);
                (JavaSyntaxKind::TextBlock, end)
            }
            '"' => {
                let (end, error) = lex_quoted(input, start, b'"', "string literal");
                errors.extend(error);
                (JavaSyntaxKind::StringLiteral, end)
            }
            '\'' => {
                let (end, error) = lex_quoted(input, start, b'\'', "character literal");
                errors.extend(error);
                (JavaSyntaxKind::CharLiteral, end)
            }
            c if c.is_ascii_digit() => lex_number(input, start),
            '.' if input[start + 1..].starts_with(|c: char| c.is_ascii_digit()) => {
                lex_number(input, start)
            }
            c if is_ident_start(c) => {
                let end = consume_while(input, start, is_ident_continue);
                let kind = JavaSyntaxKind::keyword(&input[start..end])
                    .unwrap_or(JavaSyntaxKind::Ident);
                (kind, end)
            }
            _ => match OPERATORS.iter().find(|(op, _)| rest.starts_with(op)) {
                Some((op, kind)) => (*kind, start + op.len()),
                None => {
                    errors.push(LexerError::new(
                        format!("Unexpected character '{current}'"),
                        span(start, start + size),
                    ));
                    (JavaSyntaxKind::Error, start + size)
                }
            },
        };

        tokens.push(JavaToken::new(kind, &input[start..end], span(start, end)));
        i = end;
    }

    tokens.push(JavaToken::new(JavaSyntaxKind::Eof, "", span(len, len)));
    (tokens, errors)
}

/// Lex a `"..."` or `'...'` literal; it may not span lines
fn lex_quoted(
    input: &str,
    start: usize,
    quote: u8,
    what: &str,
) -> (usize, Option<LexerError>) {
    let bytes = input.as_bytes();
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                // An escaped line terminator still ends the literal
                if matches!(bytes.get(i + 1), Some(b'\n' | b'\r') | None) {
                    i += 1;
                    break;
                }
                i += 2;
            }
            b'\n' | b'\r' => break,
            b if b == quote => return (i + 1, None),
            _ => i += 1,
        }
    }
    let end = i.min(bytes.len());
    (
        end,
        Some(LexerError::new(format!("Unterminated {what}"), span(start, end))),
    )
}

/// Lex a `"""` text block up to the closing, unescaped `"""`
fn lex_text_block(input: &str, start: usize) -> (usize, Option<LexerError>) {
    let bytes = input.as_bytes();
    let mut i = start + 3;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
        } else if bytes[i..].starts_with(b"\"\"\"") {
            return (i + 3, None);
        } else {
            i += 1;
        }
    }
    let end = bytes.len();
    (
        end,
        Some(LexerError::new("Unterminated text block", span(start, end))),
    )
}

/// Lex an integer or floating literal
fn lex_number(input: &str, start: usize) -> (JavaSyntaxKind, usize) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let at = |i: usize| bytes.get(i).copied().unwrap_or(0);
    let mut i = start;

    let radix_prefix = at(i) == b'0' && matches!(at(i + 1), b'x' | b'X' | b'b' | b'B');
    if radix_prefix {
        i += 2;
        while i < len && (at(i).is_ascii_hexdigit() || at(i) == b'_') {
            i += 1;
        }
        return integer_suffix(bytes, i);
    }

    while i < len && (at(i).is_ascii_digit() || at(i) == b'_') {
        i += 1;
    }

    let mut floating = false;
    if at(i) == b'.' && !is_ident_start(at(i + 1) as char) && at(i + 1) != b'.' {
        floating = true;
        i += 1;
        while i < len && (at(i).is_ascii_digit() || at(i) == b'_') {
            i += 1;
        }
    }

    if matches!(at(i), b'e' | b'E') {
        let digits_at = if matches!(at(i + 1), b'+' | b'-') { i + 2 } else { i + 1 };
        if at(digits_at).is_ascii_digit() {
            floating = true;
            i = digits_at;
            while i < len && (at(i).is_ascii_digit() || at(i) == b'_') {
                i += 1;
            }
        }
    }

    match at(i) {
        b'f' | b'F' => (JavaSyntaxKind::FloatLiteral, i + 1),
        b'd' | b'D' => (JavaSyntaxKind::DoubleLiteral, i + 1),
        _ if floating => (JavaSyntaxKind::DoubleLiteral, i),
        _ => integer_suffix(bytes, i),
    }
}

fn integer_suffix(bytes: &[u8], end: usize) -> (JavaSyntaxKind, usize) {
    match bytes.get(end) {
        Some(b'l' | b'L') => (JavaSyntaxKind::LongLiteral, end + 1),
        _ => (JavaSyntaxKind::IntLiteral, end),
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// End of the run of characters matching `predicate`, starting at `start`
fn consume_while(input: &str, start: usize, predicate: impl Fn(char) -> bool) -> usize {
    input[start..]
        .char_indices()
        .find(|&(_, c)| !predicate(c))
        .map_or(input.len(), |(offset, _)| start + offset)
}

/// Get next character and its UTF-8 size
fn next_char(input: &str, pos: usize) -> Option<(char, usize)> {
    input[pos..].chars().next().map(|c| (c, c.len_utf8()))
}

/// Create a span from start to end
fn span(start: usize, end: usize) -> JavaSpan {
    start..end
}
