//! Compile-time constant folding for Java expressions
//!
//! Follows the Java rules for constant expressions: literals, `final`
//! variables of primitive or `String` type initialized with a constant,
//! unary and binary operators with numeric promotion, casts to primitive
//! types or `String`, and the conditional operator. Integer arithmetic
//! wraps; integer division or remainder by zero is not a constant.

use super::ast::{
    AstNode, CastExpr, ConditionalExpr, Declarator, LiteralExpr, ParenExpr, PolyadicExpr,
    PrefixExpr,
};
use super::{JavaSourceTree, JavaSyntaxKind, JavaSyntaxNode};
use crate::syntax::BinaryOp;
use crate::value::{ConstValue, ValueType};

/// How deep constant references may chain before evaluation gives up
pub const MAX_EVAL_DEPTH: usize = 64;

/// Longest string constant, in bytes, a class file can hold
pub const MAX_CONSTANT_STRING_BYTES: usize = 65535;

/// Evaluates constant expressions of one source tree
pub struct ConstantEvaluator<'t> {
    tree: &'t JavaSourceTree,
}

impl<'t> ConstantEvaluator<'t> {
    pub fn new(tree: &'t JavaSourceTree) -> Self {
        Self { tree }
    }

    /// Value of a constant expression; `None` when it is not one
    pub fn evaluate(&self, node: &JavaSyntaxNode) -> Option<ConstValue> {
        self.eval(node, 0)
    }

    /// Constant value of a variable, when it is a constant variable
    pub fn declarator_constant(&self, declarator: &Declarator) -> Option<ConstValue> {
        self.constant_of(declarator, 0)
    }

    fn eval(&self, node: &JavaSyntaxNode, depth: usize) -> Option<ConstValue> {
        if depth > MAX_EVAL_DEPTH {
            return None;
        }
        match node.kind() {
            JavaSyntaxKind::LiteralExpr => LiteralExpr::cast(node.clone())?
                .value()
                .filter(|value| *value != ConstValue::Null),
            JavaSyntaxKind::ParenExpr => {
                let inner = ParenExpr::cast(node.clone())?.inner()?;
                self.eval(&inner, depth + 1)
            }
            JavaSyntaxKind::NameRef => {
                let declarator = self.tree.declarator_of(node)?;
                self.constant_of(&declarator, depth + 1)
            }
            JavaSyntaxKind::PrefixExpr => {
                let prefix = PrefixExpr::cast(node.clone())?;
                let operand = self.eval(&prefix.operand()?, depth + 1)?;
                unary(prefix.operator()?, operand)
            }
            JavaSyntaxKind::PolyadicExpr => {
                let polyadic = PolyadicExpr::cast(node.clone())?;
                self.fold(polyadic.operator()?, &polyadic.operands(), depth + 1)
            }
            JavaSyntaxKind::CastExpr => {
                let cast_expr = CastExpr::cast(node.clone())?;
                let operand = self.eval(&cast_expr.operand()?, depth + 1)?;
                cast(&cast_expr.type_name()?, operand)
            }
            JavaSyntaxKind::ConditionalExpr => {
                let conditional = ConditionalExpr::cast(node.clone())?;
                let condition = self.eval(&conditional.condition()?, depth + 1)?;
                let then_value = self.eval(&conditional.then_branch()?, depth + 1)?;
                let else_value = self.eval(&conditional.else_branch()?, depth + 1)?;
                let ConstValue::Bool(condition) = condition else {
                    return None;
                };
                conditional_result(condition, then_value, else_value)
            }
            _ => None,
        }
    }

    fn fold(&self, op: BinaryOp, operands: &[JavaSyntaxNode], depth: usize) -> Option<ConstValue> {
        let (first, rest) = operands.split_first()?;
        let mut acc = self.eval(first, depth)?;
        for operand in rest {
            let value = self.eval(operand, depth)?;
            acc = binary(op, acc, value)?;
            if matches!(&acc, ConstValue::Str(s) if s.len() > MAX_CONSTANT_STRING_BYTES) {
                return None;
            }
        }
        Some(acc)
    }

    fn constant_of(&self, declarator: &Declarator, depth: usize) -> Option<ConstValue> {
        if depth > MAX_EVAL_DEPTH || declarator.has_array_dims() {
            return None;
        }
        let declaration = declarator.declaration()?;
        if !self.tree.declares_constants(&declaration) {
            return None;
        }
        let type_name = declaration.type_name()?;
        ValueType::from_type_name(&type_name)?;
        let value = self.eval(&declarator.initializer()?, depth)?;
        assign(&type_name, value)
    }
}

/// Numeric operand after promotion
#[derive(Debug, Clone, Copy, PartialEq)]
enum Num {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Num {
    fn of(value: &ConstValue) -> Option<Self> {
        let num = match value {
            ConstValue::Char(c) => Num::Int(i32::from(*c)),
            ConstValue::Int(v) => Num::Int(*v),
            ConstValue::Long(v) => Num::Long(*v),
            ConstValue::Float(v) => Num::Float(*v),
            ConstValue::Double(v) => Num::Double(*v),
            _ => return None,
        };
        Some(num)
    }

    fn rank(self) -> u8 {
        match self {
            Num::Int(_) => 0,
            Num::Long(_) => 1,
            Num::Float(_) => 2,
            Num::Double(_) => 3,
        }
    }

    /// Widen to the representation of `rank`
    fn widen(self, rank: u8) -> Self {
        match rank {
            0 => self,
            1 => Num::Long(self.to_long()),
            2 => Num::Float(self.to_float()),
            _ => Num::Double(self.to_double()),
        }
    }

    fn to_int(self) -> i32 {
        match self {
            Num::Int(v) => v,
            Num::Long(v) => v as i32,
            Num::Float(v) => v as i32,
            Num::Double(v) => v as i32,
        }
    }

    fn to_long(self) -> i64 {
        match self {
            Num::Int(v) => i64::from(v),
            Num::Long(v) => v,
            Num::Float(v) => v as i64,
            Num::Double(v) => v as i64,
        }
    }

    fn to_float(self) -> f32 {
        match self {
            Num::Int(v) => v as f32,
            Num::Long(v) => v as f32,
            Num::Float(v) => v,
            Num::Double(v) => v as f32,
        }
    }

    fn to_double(self) -> f64 {
        match self {
            Num::Int(v) => f64::from(v),
            Num::Long(v) => v as f64,
            Num::Float(v) => f64::from(v),
            Num::Double(v) => v,
        }
    }

    fn into_value(self) -> ConstValue {
        match self {
            Num::Int(v) => ConstValue::Int(v),
            Num::Long(v) => ConstValue::Long(v),
            Num::Float(v) => ConstValue::Float(v),
            Num::Double(v) => ConstValue::Double(v),
        }
    }
}

/// Binary numeric promotion
fn promote(left: Num, right: Num) -> (Num, Num) {
    let rank = left.rank().max(right.rank());
    (left.widen(rank), right.widen(rank))
}

/// `left op right` on constant values
pub fn binary(op: BinaryOp, left: ConstValue, right: ConstValue) -> Option<ConstValue> {
    if op == BinaryOp::Plus
        && (left.value_type() == ValueType::String || right.value_type() == ValueType::String)
    {
        let mut text = left.to_concat_string();
        right.append_to(&mut text);
        return Some(ConstValue::Str(text));
    }

    match (op, &left, &right) {
        (BinaryOp::AndAnd, ConstValue::Bool(l), ConstValue::Bool(r)) => {
            return Some(ConstValue::Bool(*l && *r));
        }
        (BinaryOp::OrOr, ConstValue::Bool(l), ConstValue::Bool(r)) => {
            return Some(ConstValue::Bool(*l || *r));
        }
        (BinaryOp::Amp, ConstValue::Bool(l), ConstValue::Bool(r)) => {
            return Some(ConstValue::Bool(*l & *r));
        }
        (BinaryOp::Pipe, ConstValue::Bool(l), ConstValue::Bool(r)) => {
            return Some(ConstValue::Bool(*l | *r));
        }
        (BinaryOp::Caret, ConstValue::Bool(l), ConstValue::Bool(r)) => {
            return Some(ConstValue::Bool(*l ^ *r));
        }
        (BinaryOp::EqEq, ConstValue::Bool(l), ConstValue::Bool(r)) => {
            return Some(ConstValue::Bool(l == r));
        }
        (BinaryOp::NotEq, ConstValue::Bool(l), ConstValue::Bool(r)) => {
            return Some(ConstValue::Bool(l != r));
        }
        // Constant strings are interned, so reference equality is content equality
        (BinaryOp::EqEq, ConstValue::Str(l), ConstValue::Str(r)) => {
            return Some(ConstValue::Bool(l == r));
        }
        (BinaryOp::NotEq, ConstValue::Str(l), ConstValue::Str(r)) => {
            return Some(ConstValue::Bool(l != r));
        }
        _ => {}
    }

    let left = Num::of(&left)?;
    let right = Num::of(&right)?;

    if matches!(op, BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr) {
        return shift(op, left, right);
    }

    let (left, right) = promote(left, right);
    let result = match (left, right) {
        (Num::Int(l), Num::Int(r)) => match op {
            BinaryOp::Plus => ConstValue::Int(l.wrapping_add(r)),
            BinaryOp::Minus => ConstValue::Int(l.wrapping_sub(r)),
            BinaryOp::Star => ConstValue::Int(l.wrapping_mul(r)),
            BinaryOp::Slash | BinaryOp::Percent if r == 0 => return None,
            BinaryOp::Slash => ConstValue::Int(l.wrapping_div(r)),
            BinaryOp::Percent => ConstValue::Int(l.wrapping_rem(r)),
            BinaryOp::Amp => ConstValue::Int(l & r),
            BinaryOp::Pipe => ConstValue::Int(l | r),
            BinaryOp::Caret => ConstValue::Int(l ^ r),
            _ => compare(op, &l, &r)?,
        },
        (Num::Long(l), Num::Long(r)) => match op {
            BinaryOp::Plus => ConstValue::Long(l.wrapping_add(r)),
            BinaryOp::Minus => ConstValue::Long(l.wrapping_sub(r)),
            BinaryOp::Star => ConstValue::Long(l.wrapping_mul(r)),
            BinaryOp::Slash | BinaryOp::Percent if r == 0 => return None,
            BinaryOp::Slash => ConstValue::Long(l.wrapping_div(r)),
            BinaryOp::Percent => ConstValue::Long(l.wrapping_rem(r)),
            BinaryOp::Amp => ConstValue::Long(l & r),
            BinaryOp::Pipe => ConstValue::Long(l | r),
            BinaryOp::Caret => ConstValue::Long(l ^ r),
            _ => compare(op, &l, &r)?,
        },
        (Num::Float(l), Num::Float(r)) => match op {
            BinaryOp::Plus => ConstValue::Float(l + r),
            BinaryOp::Minus => ConstValue::Float(l - r),
            BinaryOp::Star => ConstValue::Float(l * r),
            BinaryOp::Slash => ConstValue::Float(l / r),
            BinaryOp::Percent => ConstValue::Float(l % r),
            _ => compare(op, &l, &r)?,
        },
        (Num::Double(l), Num::Double(r)) => match op {
            BinaryOp::Plus => ConstValue::Double(l + r),
            BinaryOp::Minus => ConstValue::Double(l - r),
            BinaryOp::Star => ConstValue::Double(l * r),
            BinaryOp::Slash => ConstValue::Double(l / r),
            BinaryOp::Percent => ConstValue::Double(l % r),
            _ => compare(op, &l, &r)?,
        },
        _ => return None,
    };
    Some(result)
}

fn compare<T: PartialOrd>(op: BinaryOp, left: &T, right: &T) -> Option<ConstValue> {
    let result = match op {
        BinaryOp::Lt => left < right,
        BinaryOp::Gt => left > right,
        BinaryOp::Le => left <= right,
        BinaryOp::Ge => left >= right,
        BinaryOp::EqEq => left == right,
        BinaryOp::NotEq => left != right,
        _ => return None,
    };
    Some(ConstValue::Bool(result))
}

/// Shifts promote each operand on its own; the distance is masked to the
/// width of the left operand
fn shift(op: BinaryOp, left: Num, right: Num) -> Option<ConstValue> {
    let distance = match right {
        Num::Int(v) => i64::from(v),
        Num::Long(v) => v,
        _ => return None,
    };
    let result = match left {
        Num::Int(l) => {
            let n = (distance & 31) as u32;
            ConstValue::Int(match op {
                BinaryOp::Shl => l.wrapping_shl(n),
                BinaryOp::Shr => l.wrapping_shr(n),
                _ => ((l as u32) >> n) as i32,
            })
        }
        Num::Long(l) => {
            let n = (distance & 63) as u32;
            ConstValue::Long(match op {
                BinaryOp::Shl => l.wrapping_shl(n),
                BinaryOp::Shr => l.wrapping_shr(n),
                _ => ((l as u64) >> n) as i64,
            })
        }
        _ => return None,
    };
    Some(result)
}

/// `op operand` on a constant value
pub fn unary(op: JavaSyntaxKind, operand: ConstValue) -> Option<ConstValue> {
    if let ConstValue::Bool(value) = operand {
        return (op == JavaSyntaxKind::Bang).then_some(ConstValue::Bool(!value));
    }
    let num = Num::of(&operand)?;
    let result = match (op, num) {
        (JavaSyntaxKind::Plus, num) => num,
        (JavaSyntaxKind::Minus, Num::Int(v)) => Num::Int(v.wrapping_neg()),
        (JavaSyntaxKind::Minus, Num::Long(v)) => Num::Long(v.wrapping_neg()),
        (JavaSyntaxKind::Minus, Num::Float(v)) => Num::Float(-v),
        (JavaSyntaxKind::Minus, Num::Double(v)) => Num::Double(-v),
        (JavaSyntaxKind::Tilde, Num::Int(v)) => Num::Int(!v),
        (JavaSyntaxKind::Tilde, Num::Long(v)) => Num::Long(!v),
        _ => return None,
    };
    Some(result.into_value())
}

/// `(type_name) value`, for primitive types and `String`
pub fn cast(type_name: &str, value: ConstValue) -> Option<ConstValue> {
    match type_name {
        "String" | "java.lang.String" => {
            return matches!(value, ConstValue::Str(_)).then_some(value);
        }
        "boolean" => return matches!(value, ConstValue::Bool(_)).then_some(value),
        _ => {}
    }
    let num = Num::of(&value)?;
    let result = match type_name {
        "byte" => ConstValue::Int(i32::from(num.to_int() as i8)),
        "short" => ConstValue::Int(i32::from(num.to_int() as i16)),
        "char" => ConstValue::Char(num.to_int() as u16),
        "int" => ConstValue::Int(num.to_int()),
        "long" => ConstValue::Long(num.to_long()),
        "float" => ConstValue::Float(num.to_float()),
        "double" => ConstValue::Double(num.to_double()),
        _ => return None,
    };
    Some(result)
}

/// Assignment of a constant initializer to a variable of `type_name`
///
/// Widening always applies; an `int` constant also narrows to `byte`,
/// `short` or `char` when it fits.
fn assign(type_name: &str, value: ConstValue) -> Option<ConstValue> {
    let fits = match (type_name, &value) {
        ("byte", ConstValue::Int(v)) => i8::try_from(*v).is_ok(),
        ("short", ConstValue::Int(v)) => i16::try_from(*v).is_ok(),
        ("char", ConstValue::Int(v)) => u16::try_from(*v).is_ok(),
        ("byte" | "short", ConstValue::Char(v)) => i16::try_from(*v).is_ok(),
        ("int" | "long" | "float" | "double", ConstValue::Char(_)) => true,
        (_, value) => {
            let from = value.value_type();
            match ValueType::from_type_name(type_name) {
                Some(ValueType::Long) => matches!(from, ValueType::Int | ValueType::Long),
                Some(ValueType::Float) => {
                    matches!(from, ValueType::Int | ValueType::Long | ValueType::Float)
                }
                Some(ValueType::Double) => from.is_numeric(),
                Some(to) => to == from,
                None => false,
            }
        }
    };
    if fits { cast(type_name, value) } else { None }
}

/// Result of `condition ? then : otherwise` with both branches constant
fn conditional_result(
    condition: bool,
    then_value: ConstValue,
    else_value: ConstValue,
) -> Option<ConstValue> {
    let then_type = then_value.value_type();
    let else_type = else_value.value_type();
    let chosen = if condition {
        then_value.clone()
    } else {
        else_value.clone()
    };
    if then_type == else_type || !then_type.is_numeric() || !else_type.is_numeric() {
        return Some(chosen);
    }

    // An int constant that fits in char keeps the char type
    let char_fits =
        |value: &ConstValue| matches!(value, ConstValue::Int(v) if u16::try_from(*v).is_ok());
    if (then_type == ValueType::Char && char_fits(&else_value))
        || (else_type == ValueType::Char && char_fits(&then_value))
    {
        return cast("char", chosen);
    }

    let rank = Num::of(&then_value)?.rank().max(Num::of(&else_value)?.rank());
    Some(Num::of(&chosen)?.widen(rank).into_value())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(source: &str) -> Option<ConstValue> {
        let tree = JavaSourceTree::parse(source);
        let initializer = tree.initializer_of("x").unwrap();
        ConstantEvaluator::new(&tree).evaluate(&initializer)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("int x = 1 + 2 * 3;"), Some(ConstValue::Int(7)));
        assert_eq!(eval("int x = 7 / 2;"), Some(ConstValue::Int(3)));
        assert_eq!(eval("int x = -7 % 3;"), Some(ConstValue::Int(-1)));
        assert_eq!(eval("long x = 1L << 40;"), Some(ConstValue::Long(1 << 40)));
        assert_eq!(eval("double x = 1 / 2.0;"), Some(ConstValue::Double(0.5)));
    }

    #[test]
    fn test_overflow_wraps() {
        assert_eq!(
            eval("int x = 2147483647 + 1;"),
            Some(ConstValue::Int(i32::MIN))
        );
        assert_eq!(eval("int x = -2147483648;"), Some(ConstValue::Int(i32::MIN)));
        assert_eq!(
            eval("int x = -2147483648 / -1;"),
            Some(ConstValue::Int(i32::MIN))
        );
    }

    #[test]
    fn test_division_by_zero_is_not_constant() {
        assert_eq!(eval("int x = 1 / 0;"), None);
        assert_eq!(eval("int x = 1 % 0;"), None);
        assert_eq!(
            eval("double x = 1.0 / 0;"),
            Some(ConstValue::Double(f64::INFINITY))
        );
    }

    #[test]
    fn test_shifts_mask_distance() {
        assert_eq!(eval("int x = 1 << 33;"), Some(ConstValue::Int(2)));
        assert_eq!(eval("int x = -1 >>> 28;"), Some(ConstValue::Int(15)));
        assert_eq!(eval("int x = -16 >> 2;"), Some(ConstValue::Int(-4)));
    }

    #[test]
    fn test_char_promotion() {
        assert_eq!(eval("int x = 'a' + 1;"), Some(ConstValue::Int(98)));
        assert_eq!(eval("char x = (char) ('a' + 1);"), Some(ConstValue::Char(98)));
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(
            eval("String x = \"a\" + 1 + 2;"),
            Some(ConstValue::Str("a12".into()))
        );
        assert_eq!(
            eval("String x = 1 + 2 + \"a\";"),
            Some(ConstValue::Str("3a".into()))
        );
        assert_eq!(
            eval("String x = \"v\" + 1.0 + true + 'c';"),
            Some(ConstValue::Str("v1.0truec".into()))
        );
    }

    #[test]
    fn test_casts_narrow_like_java() {
        assert_eq!(eval("int x = (byte) 200;"), Some(ConstValue::Int(-56)));
        assert_eq!(eval("int x = (short) 70000;"), Some(ConstValue::Int(4464)));
        assert_eq!(eval("int x = (int) 3.9;"), Some(ConstValue::Int(3)));
        assert_eq!(eval("int x = (int) 1e20;"), Some(ConstValue::Int(i32::MAX)));
        assert_eq!(eval("long x = (long) -1.5f;"), Some(ConstValue::Long(-1)));
    }

    #[test]
    fn test_final_references() {
        let source = "class A { static final int N = 4; static final String S = \"n\" + N; String x = S + N * 2; }";
        assert_eq!(eval(source), Some(ConstValue::Str("n48".into())));
    }

    #[test]
    fn test_non_final_reference_is_not_constant() {
        assert_eq!(eval("class A { int n = 1; int x = n + 1; }"), None);
    }

    #[test]
    fn test_conditional() {
        assert_eq!(
            eval("String x = 1 < 2 ? \"yes\" : \"no\";"),
            Some(ConstValue::Str("yes".into()))
        );
        assert_eq!(
            eval("double x = true ? 1 : 2.0;"),
            Some(ConstValue::Double(1.0))
        );
    }

    #[test]
    fn test_logic_and_comparison() {
        assert_eq!(eval("boolean x = 1 < 2 && !false;"), Some(ConstValue::Bool(true)));
        assert_eq!(eval("boolean x = \"a\" == \"a\";"), Some(ConstValue::Bool(true)));
        assert_eq!(eval("int x = 6 & 3 | 8 ^ 1;"), Some(ConstValue::Int(11)));
    }

    #[test]
    fn test_null_is_not_constant() {
        assert_eq!(eval("String x = null;"), None);
    }

    #[test]
    fn test_self_reference_terminates() {
        assert_eq!(eval("class A { static final int x = x + 1; }"), None);
    }

    #[test]
    fn test_string_constant_length_is_bounded() {
        // Each constant doubles the previous one, starting from 16 bytes
        let mut source = String::from("class A { static final String C0 = \"0123456789abcdef\";");
        for level in 1..=12 {
            source.push_str(&format!(
                " static final String C{level} = C{prev} + C{prev};",
                prev = level - 1
            ));
        }

        let fits = format!("{source} String x = C11; }}");
        let Some(ConstValue::Str(value)) = eval(&fits) else {
            panic!("C11 should be a string constant");
        };
        assert_eq!(value.len(), 32768);

        let too_long = format!("{source} String x = C12; }}");
        assert_eq!(eval(&too_long), None);
    }
}
