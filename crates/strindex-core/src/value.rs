//! Statically known values and their textual form

use std::fmt::Display;

/// Static type of an expression, as far as the resolver needs to know it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Char,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    Null,
    /// Any other reference type
    Object,
}

impl ValueType {
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            ValueType::Char | ValueType::Int | ValueType::Long | ValueType::Float | ValueType::Double
        )
    }

    /// Primitive type name or `String` as spelled in source
    pub fn from_type_name(name: &str) -> Option<Self> {
        let ty = match name {
            "String" | "java.lang.String" => ValueType::String,
            "char" => ValueType::Char,
            "byte" | "short" | "int" => ValueType::Int,
            "long" => ValueType::Long,
            "float" => ValueType::Float,
            "double" => ValueType::Double,
            "boolean" => ValueType::Boolean,
            _ => return None,
        };
        Some(ty)
    }
}

/// A value known without running the program
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Str(String),
    /// A UTF-16 code unit
    Char(u16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    /// The `null` literal; appends nothing to a concatenation
    Null,
}

impl ConstValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            ConstValue::Str(_) => ValueType::String,
            ConstValue::Char(_) => ValueType::Char,
            ConstValue::Int(_) => ValueType::Int,
            ConstValue::Long(_) => ValueType::Long,
            ConstValue::Float(_) => ValueType::Float,
            ConstValue::Double(_) => ValueType::Double,
            ConstValue::Bool(_) => ValueType::Boolean,
            ConstValue::Null => ValueType::Null,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConstValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            ConstValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Append the value the way string concatenation renders it
    pub fn append_to(&self, out: &mut String) {
        match self {
            ConstValue::Str(s) => out.push_str(s),
            ConstValue::Char(unit) => out.push_str(&String::from_utf16_lossy(&[*unit])),
            ConstValue::Int(v) => out.push_str(&v.to_string()),
            ConstValue::Long(v) => out.push_str(&v.to_string()),
            ConstValue::Float(v) => out.push_str(&format_floating(*v, v.abs() as f64)),
            ConstValue::Double(v) => out.push_str(&format_floating(*v, v.abs())),
            ConstValue::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
            ConstValue::Null => {}
        }
    }

    /// Textual form used when a value takes part in a concatenation
    pub fn to_concat_string(&self) -> String {
        let mut out = String::new();
        self.append_to(&mut out);
        out
    }
}

/// Render a floating point number like `Double.toString`/`Float.toString`
///
/// Plain decimal notation with at least one fractional digit between 10^-3
/// and 10^7, computerized scientific notation (`1.0E10`) outside.
fn format_floating<F>(value: F, magnitude: f64) -> String
where
    F: Display + std::fmt::LowerExp + Copy,
{
    if magnitude.is_nan() {
        return "NaN".to_string();
    }
    let shortest = value.to_string();
    if magnitude.is_infinite() {
        return if shortest.starts_with('-') {
            "-Infinity".to_string()
        } else {
            "Infinity".to_string()
        };
    }
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return if shortest.contains('.') {
            shortest
        } else {
            format!("{shortest}.0")
        };
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    if mantissa.contains('.') {
        format!("{mantissa}E{exponent}")
    } else {
        format!("{mantissa}.0E{exponent}")
    }
}
