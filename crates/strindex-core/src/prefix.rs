//! Position contributed by the operands before a literal
//!
//! For `"ab" + "c\nd" + "ef"` with the caret in `"ef"`, everything the first
//! two operands produce comes before the caret in the final string. Operands
//! whose value cannot be known are skipped, so the result is a lower bound
//! in that case.

use tracing::trace;

use crate::position::StringPosition;
use crate::resolver::ConstantResolver;
use crate::syntax::{BinaryOp, ExprShape, SyntaxTree};

/// Accumulated position of everything concatenated before `literal`
///
/// Only the immediately enclosing `+` chain counts. When the literal is not
/// an operand of one, or is its first operand, the result is zero.
pub fn prefix_position<T: SyntaxTree>(
    resolver: &ConstantResolver<'_, T>,
    tree: &T,
    literal: &T::Node,
) -> StringPosition {
    let Some(parent) = tree.parent_skipping_parens(literal) else {
        return StringPosition::ZERO;
    };
    let ExprShape::Polyadic {
        op: BinaryOp::Plus,
        operands,
    } = tree.shape(&parent)
    else {
        return StringPosition::ZERO;
    };

    let Some(index) = operands
        .iter()
        .position(|operand| tree.skip_parens(operand).as_ref() == Some(literal))
    else {
        return StringPosition::ZERO;
    };

    let mut position = StringPosition::ZERO;
    for part in resolver.concatenation_parts(&operands, index) {
        match part {
            Some(text) => position = position.plus_str(&text),
            None => trace!("Skipping unresolvable operand before the literal"),
        }
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::java::{JavaSourceTree, JavaSyntaxKind, JavaSyntaxNode};

    /// Literal expression starting at the first occurrence of `needle`
    fn literal_at(tree: &JavaSourceTree, needle: &str) -> JavaSyntaxNode {
        let offset = rowan::TextSize::from(tree.text().find(needle).unwrap() as u32);
        tree.root()
            .descendants()
            .filter(|n| n.kind() == JavaSyntaxKind::LiteralExpr)
            .find(|n| n.text_range().start() == offset)
            .unwrap()
    }

    fn prefix(source: &str, needle: &str) -> StringPosition {
        let tree = JavaSourceTree::parse(source);
        let literal = literal_at(&tree, needle);
        prefix_position(&ConstantResolver::new(&tree), &tree, &literal)
    }

    #[test]
    fn test_first_operand_has_no_prefix() {
        assert_eq!(prefix(r#"s = "ab" + "cd";"#, r#""ab""#), StringPosition::ZERO);
    }

    #[test]
    fn test_not_in_concatenation() {
        assert_eq!(prefix(r#"s = "ab";"#, r#""ab""#), StringPosition::ZERO);
        assert_eq!(prefix(r#"s = f("ab");"#, r#""ab""#), StringPosition::ZERO);
    }

    #[test]
    fn test_preceding_operands_accumulate() {
        assert_eq!(
            prefix(r#"s = "ab" + "c\nd" + "ef";"#, r#""ef""#),
            StringPosition::new(1, 1, 5)
        );
    }

    #[test]
    fn test_numeric_operands_are_rendered_one_by_one() {
        assert_eq!(
            prefix(r#"s = 1 + 2 + "a";"#, r#""a""#),
            StringPosition::new(0, 2, 2)
        );
    }

    #[test]
    fn test_unresolvable_and_null_operands_add_nothing() {
        assert_eq!(
            prefix(r#"s = "ab" + input + null + "c";"#, r#""c""#),
            StringPosition::new(0, 2, 2)
        );
    }

    #[test]
    fn test_parenthesized_literal() {
        assert_eq!(
            prefix(r#"s = "ab" + ("c");"#, r#""c""#),
            StringPosition::new(0, 2, 2)
        );
    }

    #[test]
    fn test_huge_repeat_before_literal_is_skipped() {
        assert_eq!(
            prefix(r#"s = "ab".repeat(100000).repeat(100000) + "x";"#, r#""x""#),
            StringPosition::ZERO
        );
    }
}
