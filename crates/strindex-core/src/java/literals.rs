//! Values of Java literal tokens

use super::{JavaSyntaxKind, JavaSyntaxToken};
use crate::escape;
use crate::literal::{LiteralKind, LiteralToken};
use crate::value::ConstValue;

/// Value a literal token denotes; `None` when it is malformed or out of range
pub fn literal_value(token: &JavaSyntaxToken) -> Option<ConstValue> {
    let text = token.text();
    match token.kind() {
        JavaSyntaxKind::StringLiteral => {
            string_value(LiteralKind::SimpleString, text, token).map(ConstValue::Str)
        }
        JavaSyntaxKind::TextBlock => {
            string_value(LiteralKind::TextBlock, text, token).map(ConstValue::Str)
        }
        JavaSyntaxKind::CharLiteral => char_value(text).map(ConstValue::Char),
        JavaSyntaxKind::IntLiteral => int_value(text).map(ConstValue::Int),
        JavaSyntaxKind::LongLiteral => long_value(text).map(ConstValue::Long),
        JavaSyntaxKind::FloatLiteral => float_value(text).map(ConstValue::Float),
        JavaSyntaxKind::DoubleLiteral => double_value(text).map(ConstValue::Double),
        JavaSyntaxKind::TrueKw => Some(ConstValue::Bool(true)),
        JavaSyntaxKind::FalseKw => Some(ConstValue::Bool(false)),
        JavaSyntaxKind::NullKw => Some(ConstValue::Null),
        _ => None,
    }
}

fn string_value(kind: LiteralKind, text: &str, token: &JavaSyntaxToken) -> Option<String> {
    let literal = LiteralToken::new(kind, text, token.text_range().start());
    if !literal.is_terminated() {
        return None;
    }
    escape::decode(literal.raw_content(), kind)
}

/// A char literal must denote exactly one UTF-16 unit
fn char_value(text: &str) -> Option<u16> {
    let content = text.strip_prefix('\'')?.strip_suffix('\'')?;
    let decoded = escape::decode(content, LiteralKind::SimpleString)?;
    let mut units = decoded.encode_utf16();
    let unit = units.next()?;
    units.next().is_none().then_some(unit)
}

/// Digits and radix of an integer literal, underscores and suffix removed
fn integer_digits(text: &str) -> (String, u32) {
    let cleaned: String = text
        .trim_end_matches(['l', 'L'])
        .chars()
        .filter(|c| *c != '_')
        .collect();
    if let Some(hex) = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        (hex.to_string(), 16)
    } else if let Some(binary) = cleaned
        .strip_prefix("0b")
        .or_else(|| cleaned.strip_prefix("0B"))
    {
        (binary.to_string(), 2)
    } else if cleaned.len() > 1 && cleaned.starts_with('0') {
        (cleaned[1..].to_string(), 8)
    } else {
        (cleaned, 10)
    }
}

/// `int` literal value
///
/// Decimal literals may reach 2147483648 (only valid as the operand of
/// unary minus, where it wraps to `i32::MIN`); hex, octal and binary
/// literals cover the full 32-bit pattern.
fn int_value(text: &str) -> Option<i32> {
    let (digits, radix) = integer_digits(text);
    let value = u64::from_str_radix(&digits, radix).ok()?;
    let limit = if radix == 10 {
        1u64 << 31
    } else {
        u64::from(u32::MAX)
    };
    (value <= limit).then_some(value as u32 as i32)
}

/// `long` literal value, same rules as [`int_value`] at 64 bits
fn long_value(text: &str) -> Option<i64> {
    let (digits, radix) = integer_digits(text);
    let value = u64::from_str_radix(&digits, radix).ok()?;
    if radix == 10 && value > 1u64 << 63 {
        return None;
    }
    Some(value as i64)
}

fn floating_digits(text: &str) -> String {
    text.trim_end_matches(['f', 'F', 'd', 'D'])
        .chars()
        .filter(|c| *c != '_')
        .collect()
}

fn float_value(text: &str) -> Option<f32> {
    floating_digits(text).parse().ok()
}

fn double_value(text: &str) -> Option<f64> {
    floating_digits(text).parse().ok()
}
