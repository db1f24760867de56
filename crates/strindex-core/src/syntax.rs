//! Host syntax-tree abstraction
//!
//! The engine never parses source itself. It asks a [`SyntaxTree`] for the
//! token under the caret, for the structural shape of expression nodes and
//! for the static facts (types, declarations, constant values) a compiler
//! front end already knows. [`crate::java::JavaSourceTree`] is the built-in
//! implementation.

use rowan::{TextRange, TextSize};

use crate::literal::LiteralKind;
use crate::value::{ConstValue, ValueType};

/// Binary operators that can head a polyadic (flattened) expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Shl,
    Shr,
    UShr,
    Lt,
    Gt,
    Le,
    Ge,
    EqEq,
    NotEq,
    Amp,
    Caret,
    Pipe,
    AndAnd,
    OrOr,
}

impl BinaryOp {
    /// Binding power; higher binds tighter
    pub const fn precedence(self) -> u8 {
        match self {
            BinaryOp::OrOr => 1,
            BinaryOp::AndAnd => 2,
            BinaryOp::Pipe => 3,
            BinaryOp::Caret => 4,
            BinaryOp::Amp => 5,
            BinaryOp::EqEq | BinaryOp::NotEq => 6,
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => 7,
            BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr => 8,
            BinaryOp::Plus | BinaryOp::Minus => 9,
            BinaryOp::Star | BinaryOp::Slash | BinaryOp::Percent => 10,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Star => "*",
            BinaryOp::Slash => "/",
            BinaryOp::Percent => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::EqEq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Amp => "&",
            BinaryOp::Caret => "^",
            BinaryOp::Pipe => "|",
            BinaryOp::AndAnd => "&&",
            BinaryOp::OrOr => "||",
        }
    }
}

/// What sits in front of the dot of a method call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualifier<N> {
    /// Unqualified call such as `foo()`
    None,
    /// A type name, as in `String.valueOf(x)`; holds the name as written
    Type(String),
    /// An expression receiver, as in `s.concat(t)`
    Expr(N),
}

impl<N> Qualifier<N> {
    /// Whether the qualifier names `java.lang.String`
    pub fn is_string_class(&self) -> bool {
        matches!(self, Qualifier::Type(name) if name == "String" || name == "java.lang.String")
    }

    pub fn receiver(&self) -> Option<&N> {
        match self {
            Qualifier::Expr(node) => Some(node),
            _ => None,
        }
    }
}

/// Structural view of an expression node
#[derive(Debug, Clone, PartialEq)]
pub enum ExprShape<N> {
    /// A literal; `None` when the literal is malformed
    Literal(Option<ConstValue>),
    /// `( inner )`; `None` when the parentheses are empty
    Parenthesized(Option<N>),
    /// A simple name that may resolve to a declaration
    Reference,
    /// `a op b op c ...` with a single operator
    Polyadic { op: BinaryOp, operands: Vec<N> },
    MethodCall {
        qualifier: Qualifier<N>,
        name: String,
        arguments: Vec<N>,
    },
    /// Anything the resolver does not look into
    Other,
}

/// The declaration a reference resolves to
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration<N> {
    pub name: String,
    /// Compile-time constant value of the variable, when it has one
    pub constant: Option<ConstValue>,
    pub initializer: Option<N>,
}

/// Kind of the token under the caret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Literal(LiteralKind),
    Other,
}

/// The token found at an offset
#[derive(Debug, Clone, PartialEq)]
pub struct TokenAt<N> {
    pub kind: TokenKind,
    pub range: TextRange,
    pub text: String,
    /// Innermost node containing the token
    pub parent: Option<N>,
}

/// Read access to a parsed document, as the engine needs it
pub trait SyntaxTree {
    /// Handle to a syntax node; cheap to clone
    type Node: Clone + PartialEq + std::fmt::Debug;

    /// Document text the tree was built from
    fn source(&self) -> &str;

    /// The token containing `offset` (`start <= offset < end`)
    fn token_at(&self, offset: TextSize) -> Option<TokenAt<Self::Node>>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn text_range(&self, node: &Self::Node) -> TextRange;

    fn shape(&self, node: &Self::Node) -> ExprShape<Self::Node>;

    /// Static type of an expression, `None` when unknown
    fn value_type(&self, node: &Self::Node) -> Option<ValueType>;

    /// Declaration a [`ExprShape::Reference`] node refers to
    fn resolve(&self, reference: &Self::Node) -> Option<Declaration<Self::Node>>;

    /// Constant value of a non-string expression, computed by the host's
    /// own evaluator
    fn fold_constant(&self, node: &Self::Node) -> Option<ConstValue>;

    /// Whether a polyadic node is a string concatenation
    fn is_string_concatenation(&self, node: &Self::Node) -> bool {
        matches!(self.shape(node), ExprShape::Polyadic { op: BinaryOp::Plus, .. })
            && self.value_type(node) == Some(ValueType::String)
    }

    /// Skip enclosing parentheses upwards
    fn parent_skipping_parens(&self, node: &Self::Node) -> Option<Self::Node> {
        let mut parent = self.parent(node)?;
        while matches!(self.shape(&parent), ExprShape::Parenthesized(_)) {
            parent = self.parent(&parent)?;
        }
        Some(parent)
    }

    /// Skip parentheses downwards; `None` for empty parentheses
    fn skip_parens(&self, node: &Self::Node) -> Option<Self::Node> {
        let mut current = node.clone();
        while let ExprShape::Parenthesized(inner) = self.shape(&current) {
            current = inner?;
        }
        Some(current)
    }
}
