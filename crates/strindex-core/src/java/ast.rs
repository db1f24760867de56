//! Typed AST layer over the Java CST
//!
//! Thin wrappers that give names to the parts of the nodes the engine reads.
//! Each wrapper implements [`AstNode`], so a raw node is checked once in
//! `cast()` and accessed through typed methods afterwards.
//!
//! # Example
//!
//! ```
//! use strindex_core::java::ast::{AstNode, VariableDecl};
//! use strindex_core::java::parse_java;
//!
//! let (cst, _) = parse_java("final String s = \"a\";");
//! let decl = VariableDecl::cast(cst.first_child().unwrap()).unwrap();
//!
//! assert!(decl.is_final());
//! assert_eq!(decl.type_name().unwrap(), "String");
//! assert_eq!(decl.declarators().next().unwrap().name().unwrap(), "s");
//! ```

use super::parser::binary_op;
use super::{JavaSyntaxKind, JavaSyntaxNode, JavaSyntaxToken};
use crate::syntax::BinaryOp;
use crate::value::ConstValue;

/// Helper trait for casting CST nodes to typed wrappers
pub trait AstNode: Sized {
    fn can_cast(kind: JavaSyntaxKind) -> bool;
    fn cast(node: JavaSyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &JavaSyntaxNode;
}

/// Helper function to find first child of a specific kind
fn child_of_kind(parent: &JavaSyntaxNode, kind: JavaSyntaxKind) -> Option<JavaSyntaxNode> {
    parent.children().find(|n| n.kind() == kind)
}

/// Helper function to find first token of a specific kind
fn token_of_kind(parent: &JavaSyntaxNode, kind: JavaSyntaxKind) -> Option<JavaSyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

/// Direct tokens of a node, trivia skipped
fn direct_tokens(parent: &JavaSyntaxNode) -> impl Iterator<Item = JavaSyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
}

/// Child nodes that are expressions
pub(crate) fn expression_children(
    parent: &JavaSyntaxNode,
) -> impl Iterator<Item = JavaSyntaxNode> {
    parent.children().filter(|n| n.kind().is_expression())
}

/// Source text of a node with whitespace and comments removed
pub fn text_without_trivia(node: &JavaSyntaxNode) -> String {
    node.descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
        .map(|t| t.text().to_string())
        .collect()
}

/// A literal token wrapped as an expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiteralExpr {
    syntax: JavaSyntaxNode,
}

impl AstNode for LiteralExpr {
    fn can_cast(kind: JavaSyntaxKind) -> bool {
        kind == JavaSyntaxKind::LiteralExpr
    }

    fn cast(node: JavaSyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self { syntax: node })
        } else {
            None
        }
    }

    fn syntax(&self) -> &JavaSyntaxNode {
        &self.syntax
    }
}

impl LiteralExpr {
    pub fn token(&self) -> Option<JavaSyntaxToken> {
        direct_tokens(&self.syntax).next()
    }

    /// Denoted value; `None` for a malformed literal
    pub fn value(&self) -> Option<ConstValue> {
        super::literals::literal_value(&self.token()?)
    }
}

/// `( expr )`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParenExpr {
    syntax: JavaSyntaxNode,
}

impl AstNode for ParenExpr {
    fn can_cast(kind: JavaSyntaxKind) -> bool {
        kind == JavaSyntaxKind::ParenExpr
    }

    fn cast(node: JavaSyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self { syntax: node })
        } else {
            None
        }
    }

    fn syntax(&self) -> &JavaSyntaxNode {
        &self.syntax
    }
}

impl ParenExpr {
    pub fn inner(&self) -> Option<JavaSyntaxNode> {
        expression_children(&self.syntax).next()
    }
}

/// A simple name in expression position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameRef {
    syntax: JavaSyntaxNode,
}

impl AstNode for NameRef {
    fn can_cast(kind: JavaSyntaxKind) -> bool {
        kind == JavaSyntaxKind::NameRef
    }

    fn cast(node: JavaSyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self { syntax: node })
        } else {
            None
        }
    }

    fn syntax(&self) -> &JavaSyntaxNode {
        &self.syntax
    }
}

impl NameRef {
    pub fn name(&self) -> Option<String> {
        token_of_kind(&self.syntax, JavaSyntaxKind::Ident).map(|t| t.text().to_string())
    }
}

/// `name(args)` or `receiver.name(args)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodCallExpr {
    syntax: JavaSyntaxNode,
}

impl AstNode for MethodCallExpr {
    fn can_cast(kind: JavaSyntaxKind) -> bool {
        kind == JavaSyntaxKind::MethodCall
    }

    fn cast(node: JavaSyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self { syntax: node })
        } else {
            None
        }
    }

    fn syntax(&self) -> &JavaSyntaxNode {
        &self.syntax
    }
}

impl MethodCallExpr {
    /// Expression in front of the dot, if the call is qualified
    pub fn receiver(&self) -> Option<JavaSyntaxNode> {
        expression_children(&self.syntax).next()
    }

    /// Method name; `None` for `this(...)` and `super(...)`
    pub fn name(&self) -> Option<String> {
        direct_tokens(&self.syntax)
            .filter(|t| t.kind() == JavaSyntaxKind::Ident)
            .last()
            .map(|t| t.text().to_string())
    }

    pub fn arguments(&self) -> Vec<JavaSyntaxNode> {
        child_of_kind(&self.syntax, JavaSyntaxKind::ArgList)
            .map(|args| expression_children(&args).collect())
            .unwrap_or_default()
    }
}

/// `a op b op c ...` with one operator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolyadicExpr {
    syntax: JavaSyntaxNode,
}

impl AstNode for PolyadicExpr {
    fn can_cast(kind: JavaSyntaxKind) -> bool {
        kind == JavaSyntaxKind::PolyadicExpr
    }

    fn cast(node: JavaSyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self { syntax: node })
        } else {
            None
        }
    }

    fn syntax(&self) -> &JavaSyntaxNode {
        &self.syntax
    }
}

impl PolyadicExpr {
    pub fn operator(&self) -> Option<BinaryOp> {
        direct_tokens(&self.syntax).find_map(|t| binary_op(t.kind()))
    }

    pub fn operands(&self) -> Vec<JavaSyntaxNode> {
        expression_children(&self.syntax).collect()
    }
}

/// `op operand`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrefixExpr {
    syntax: JavaSyntaxNode,
}

impl AstNode for PrefixExpr {
    fn can_cast(kind: JavaSyntaxKind) -> bool {
        kind == JavaSyntaxKind::PrefixExpr
    }

    fn cast(node: JavaSyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self { syntax: node })
        } else {
            None
        }
    }

    fn syntax(&self) -> &JavaSyntaxNode {
        &self.syntax
    }
}

impl PrefixExpr {
    pub fn operator(&self) -> Option<JavaSyntaxKind> {
        direct_tokens(&self.syntax).next().map(|t| t.kind())
    }

    pub fn operand(&self) -> Option<JavaSyntaxNode> {
        expression_children(&self.syntax).next()
    }
}

/// `(Type) operand`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CastExpr {
    syntax: JavaSyntaxNode,
}

impl AstNode for CastExpr {
    fn can_cast(kind: JavaSyntaxKind) -> bool {
        kind == JavaSyntaxKind::CastExpr
    }

    fn cast(node: JavaSyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self { syntax: node })
        } else {
            None
        }
    }

    fn syntax(&self) -> &JavaSyntaxNode {
        &self.syntax
    }
}

impl CastExpr {
    pub fn type_name(&self) -> Option<String> {
        child_of_kind(&self.syntax, JavaSyntaxKind::TypeRef).map(|t| text_without_trivia(&t))
    }

    pub fn operand(&self) -> Option<JavaSyntaxNode> {
        expression_children(&self.syntax).next()
    }
}

/// `condition ? then : otherwise`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConditionalExpr {
    syntax: JavaSyntaxNode,
}

impl AstNode for ConditionalExpr {
    fn can_cast(kind: JavaSyntaxKind) -> bool {
        kind == JavaSyntaxKind::ConditionalExpr
    }

    fn cast(node: JavaSyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self { syntax: node })
        } else {
            None
        }
    }

    fn syntax(&self) -> &JavaSyntaxNode {
        &self.syntax
    }
}

impl ConditionalExpr {
    pub fn condition(&self) -> Option<JavaSyntaxNode> {
        expression_children(&self.syntax).next()
    }

    pub fn then_branch(&self) -> Option<JavaSyntaxNode> {
        expression_children(&self.syntax).nth(1)
    }

    pub fn else_branch(&self) -> Option<JavaSyntaxNode> {
        expression_children(&self.syntax).nth(2)
    }
}

/// `[modifiers] Type a = x, b = y;`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableDecl {
    syntax: JavaSyntaxNode,
}

impl AstNode for VariableDecl {
    fn can_cast(kind: JavaSyntaxKind) -> bool {
        kind == JavaSyntaxKind::VariableDecl
    }

    fn cast(node: JavaSyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self { syntax: node })
        } else {
            None
        }
    }

    fn syntax(&self) -> &JavaSyntaxNode {
        &self.syntax
    }
}

impl VariableDecl {
    pub fn is_final(&self) -> bool {
        token_of_kind(&self.syntax, JavaSyntaxKind::FinalKw).is_some()
    }

    /// Declared type as written, without whitespace
    pub fn type_name(&self) -> Option<String> {
        child_of_kind(&self.syntax, JavaSyntaxKind::TypeRef)
            .map(|t| text_without_trivia(&t))
            .filter(|name| !name.is_empty())
    }

    pub fn declarators(&self) -> impl Iterator<Item = Declarator> {
        self.syntax.children().filter_map(Declarator::cast)
    }
}

/// `name [= initializer]` inside a variable declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declarator {
    syntax: JavaSyntaxNode,
}

impl AstNode for Declarator {
    fn can_cast(kind: JavaSyntaxKind) -> bool {
        kind == JavaSyntaxKind::Declarator
    }

    fn cast(node: JavaSyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self { syntax: node })
        } else {
            None
        }
    }

    fn syntax(&self) -> &JavaSyntaxNode {
        &self.syntax
    }
}

impl Declarator {
    pub fn name(&self) -> Option<String> {
        token_of_kind(&self.syntax, JavaSyntaxKind::Ident).map(|t| t.text().to_string())
    }

    /// Whether the name carries its own `[]`, as in `String names[]`
    pub fn has_array_dims(&self) -> bool {
        token_of_kind(&self.syntax, JavaSyntaxKind::LBracket).is_some()
    }

    pub fn initializer(&self) -> Option<JavaSyntaxNode> {
        expression_children(&self.syntax).next()
    }

    /// The declaration this declarator belongs to
    pub fn declaration(&self) -> Option<VariableDecl> {
        self.syntax.parent().and_then(VariableDecl::cast)
    }
}
