//! Java source tree as seen by the position engine
//!
//! [`JavaSourceTree`] owns a parsed document and answers the questions of
//! [`SyntaxTree`]: which token is under a caret, what an expression node
//! looks like, what type it has, which declaration a name refers to and
//! what a constant expression evaluates to.
//!
//! Name resolution is lexical and file-local. A simple name resolves to the
//! nearest enclosing declaration: a local variable declared earlier in an
//! enclosing block, or a field of an enclosing class body (in any order).
//! Method parameters, lambda parameters, `catch` and `for` variables shadow
//! outer declarations and are never resolved themselves.

use rowan::{NodeOrToken, TextSize};

use super::ast::{
    AstNode, CastExpr, ConditionalExpr, Declarator, LiteralExpr, MethodCallExpr, NameRef,
    ParenExpr, PolyadicExpr, PrefixExpr, VariableDecl, text_without_trivia,
};
use super::eval::{ConstantEvaluator, MAX_EVAL_DEPTH};
use super::lexer::LexerError;
use super::{JavaSyntaxElement, JavaSyntaxKind, JavaSyntaxNode, parse_java};
use crate::literal::{LiteralKind, LiteralToken};
use crate::syntax::{BinaryOp, Declaration, ExprShape, Qualifier, SyntaxTree, TokenAt, TokenKind};
use crate::value::{ConstValue, ValueType};

/// String methods whose result is a `String`
const STRING_RESULT_METHODS: &[&str] = &[
    "concat",
    "formatted",
    "indent",
    "intern",
    "repeat",
    "replace",
    "replaceAll",
    "replaceFirst",
    "strip",
    "stripIndent",
    "stripLeading",
    "stripTrailing",
    "substring",
    "toLowerCase",
    "toString",
    "toUpperCase",
    "translateEscapes",
    "trim",
];

/// String methods whose result is an `int`
const INT_RESULT_METHODS: &[&str] = &[
    "codePointAt",
    "codePointBefore",
    "codePointCount",
    "compareTo",
    "compareToIgnoreCase",
    "hashCode",
    "indexOf",
    "lastIndexOf",
    "length",
];

/// String methods whose result is a `boolean`
const BOOLEAN_RESULT_METHODS: &[&str] = &[
    "contains",
    "contentEquals",
    "endsWith",
    "equals",
    "equalsIgnoreCase",
    "isBlank",
    "isEmpty",
    "matches",
    "regionMatches",
    "startsWith",
];

/// Static methods of `String` returning a `String`
const STRING_FACTORY_METHODS: &[&str] = &["copyValueOf", "format", "join", "valueOf"];

/// A parsed Java document
#[derive(Debug, Clone)]
pub struct JavaSourceTree {
    text: String,
    root: JavaSyntaxNode,
    errors: Vec<LexerError>,
}

impl JavaSourceTree {
    pub fn parse(source: impl Into<String>) -> Self {
        let text = source.into();
        let (root, errors) = parse_java(&text);
        Self { text, root, errors }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> &JavaSyntaxNode {
        &self.root
    }

    /// Problems found while tokenizing; the tree is built regardless
    pub fn lexer_errors(&self) -> &[LexerError] {
        &self.errors
    }

    /// Initializer of the first variable called `name`, in document order
    pub fn initializer_of(&self, name: &str) -> Option<JavaSyntaxNode> {
        self.root
            .descendants()
            .filter_map(Declarator::cast)
            .find(|declarator| declarator.name().as_deref() == Some(name))?
            .initializer()
    }

    /// Every string and text-block literal, in document order
    pub fn string_literals(&self) -> Vec<LiteralToken> {
        self.root
            .descendants_with_tokens()
            .filter_map(NodeOrToken::into_token)
            .filter_map(|token| {
                let kind = match token.kind() {
                    JavaSyntaxKind::StringLiteral => LiteralKind::SimpleString,
                    JavaSyntaxKind::TextBlock => LiteralKind::TextBlock,
                    _ => return None,
                };
                Some(LiteralToken::new(
                    kind,
                    token.text(),
                    token.text_range().start(),
                ))
            })
            .collect()
    }

    /// Variable a simple name refers to
    pub(crate) fn declarator_of(&self, node: &JavaSyntaxNode) -> Option<Declarator> {
        let name = NameRef::cast(node.clone())?.name()?;
        let start = node.text_range().start();

        for ancestor in node.ancestors().skip(1) {
            match ancestor.kind() {
                JavaSyntaxKind::LambdaExpr => {
                    if lambda_declares(&ancestor, &name) {
                        return None;
                    }
                }
                JavaSyntaxKind::Block => {
                    if header_declares(&ancestor, &name) {
                        return None;
                    }
                    let found = if is_class_body(&ancestor) {
                        find_member(&ancestor, &name, node)
                    } else {
                        find_local(&ancestor, &name, start)
                    };
                    if found.is_some() {
                        return found;
                    }
                }
                JavaSyntaxKind::Root => return find_member(&ancestor, &name, node),
                _ => {}
            }
        }
        None
    }

    /// Whether variables of `declaration` are constants when initialized
    /// with a constant: `final`, or a field of an interface
    pub(crate) fn declares_constants(&self, declaration: &VariableDecl) -> bool {
        declaration.is_final()
            || declaration.syntax().parent().is_some_and(|parent| {
                parent.kind() == JavaSyntaxKind::Block
                    && header_elements(&parent).iter().any(|element| {
                        element.kind() == JavaSyntaxKind::InterfaceKw
                    })
            })
    }

    fn type_of(&self, node: &JavaSyntaxNode, depth: usize) -> Option<ValueType> {
        if depth > MAX_EVAL_DEPTH {
            return None;
        }
        match node.kind() {
            JavaSyntaxKind::LiteralExpr => literal_type(&LiteralExpr::cast(node.clone())?),
            JavaSyntaxKind::ParenExpr => {
                self.type_of(&ParenExpr::cast(node.clone())?.inner()?, depth + 1)
            }
            JavaSyntaxKind::NameRef => {
                let declarator = self.declarator_of(node)?;
                self.declared_type(&declarator, depth + 1)
            }
            JavaSyntaxKind::MethodCall => {
                self.method_type(&MethodCallExpr::cast(node.clone())?, depth + 1)
            }
            JavaSyntaxKind::PolyadicExpr => {
                let polyadic = PolyadicExpr::cast(node.clone())?;
                let types: Vec<_> = polyadic
                    .operands()
                    .iter()
                    .map(|operand| self.type_of(operand, depth + 1))
                    .collect();
                polyadic_type(polyadic.operator()?, &types)
            }
            JavaSyntaxKind::PrefixExpr => {
                let prefix = PrefixExpr::cast(node.clone())?;
                let operand = self.type_of(&prefix.operand()?, depth + 1)?;
                match prefix.operator()? {
                    JavaSyntaxKind::Bang => Some(ValueType::Boolean),
                    JavaSyntaxKind::PlusPlus | JavaSyntaxKind::MinusMinus => Some(operand),
                    _ => unary_promotion(operand),
                }
            }
            JavaSyntaxKind::PostfixExpr => node
                .children()
                .next()
                .and_then(|operand| self.type_of(&operand, depth + 1)),
            JavaSyntaxKind::CastExpr => {
                let type_name = CastExpr::cast(node.clone())?.type_name()?;
                Some(ValueType::from_type_name(&type_name).unwrap_or(ValueType::Object))
            }
            JavaSyntaxKind::ConditionalExpr => {
                let conditional = ConditionalExpr::cast(node.clone())?;
                let then_type = self.type_of(&conditional.then_branch()?, depth + 1);
                let else_type = self.type_of(&conditional.else_branch()?, depth + 1);
                match (then_type, else_type) {
                    (Some(ValueType::Null), other) | (other, Some(ValueType::Null)) => other,
                    (Some(a), Some(b)) if a != b && a.is_numeric() && b.is_numeric() => {
                        binary_promotion(a, b)
                    }
                    (then_type, _) => then_type,
                }
            }
            JavaSyntaxKind::AssignExpr => node
                .children()
                .next()
                .and_then(|target| self.type_of(&target, depth + 1)),
            JavaSyntaxKind::InstanceofExpr => Some(ValueType::Boolean),
            JavaSyntaxKind::NewExpr => {
                let created = node
                    .children()
                    .find(|child| child.kind() == JavaSyntaxKind::TypeRef)
                    .map(|type_ref| text_without_trivia(&type_ref))?;
                if ValueType::from_type_name(&created) == Some(ValueType::String) {
                    Some(ValueType::String)
                } else {
                    Some(ValueType::Object)
                }
            }
            JavaSyntaxKind::ThisExpr | JavaSyntaxKind::LambdaExpr | JavaSyntaxKind::MethodRef => {
                Some(ValueType::Object)
            }
            _ => None,
        }
    }

    fn declared_type(&self, declarator: &Declarator, depth: usize) -> Option<ValueType> {
        let type_name = declarator.declaration()?.type_name()?;
        if declarator.has_array_dims() {
            return Some(ValueType::Object);
        }
        if type_name == "var" {
            return self.type_of(&declarator.initializer()?, depth);
        }
        Some(ValueType::from_type_name(&type_name).unwrap_or(ValueType::Object))
    }

    fn method_type(&self, call: &MethodCallExpr, depth: usize) -> Option<ValueType> {
        let name = call.name()?;
        let argument_count = call.arguments().len();
        if name == "toString" && argument_count == 0 {
            return Some(ValueType::String);
        }

        let receiver = call.receiver()?;
        let qualifier = self.qualifier(&receiver);
        if let Qualifier::Type(_) = qualifier {
            return (qualifier.is_string_class()
                && STRING_FACTORY_METHODS.contains(&name.as_str()))
            .then_some(ValueType::String);
        }

        if self.type_of(&receiver, depth)? != ValueType::String {
            return None;
        }
        let name = name.as_str();
        if STRING_RESULT_METHODS.contains(&name) {
            Some(ValueType::String)
        } else if INT_RESULT_METHODS.contains(&name) {
            Some(ValueType::Int)
        } else if BOOLEAN_RESULT_METHODS.contains(&name) {
            Some(ValueType::Boolean)
        } else if name == "charAt" {
            Some(ValueType::Char)
        } else {
            None
        }
    }

    /// Classify the expression in front of a method name
    ///
    /// A name that is not a variable in scope and starts with an upper-case
    /// letter is taken as a type name.
    fn qualifier(&self, receiver: &JavaSyntaxNode) -> Qualifier<JavaSyntaxNode> {
        let names_type = match receiver.kind() {
            JavaSyntaxKind::NameRef => self.declarator_of(receiver).is_none(),
            JavaSyntaxKind::FieldAccess => receiver
                .descendants()
                .find(|n| n.kind() == JavaSyntaxKind::NameRef)
                .is_some_and(|first| self.declarator_of(&first).is_none()),
            _ => false,
        };
        if names_type {
            let name = text_without_trivia(receiver);
            let last_segment = name.rsplit('.').next().unwrap_or_default();
            if last_segment.starts_with(|c: char| c.is_uppercase()) {
                return Qualifier::Type(name);
            }
        }
        Qualifier::Expr(receiver.clone())
    }
}

impl SyntaxTree for JavaSourceTree {
    type Node = JavaSyntaxNode;

    fn source(&self) -> &str {
        &self.text
    }

    fn token_at(&self, offset: TextSize) -> Option<TokenAt<JavaSyntaxNode>> {
        if offset > self.root.text_range().end() {
            return None;
        }
        let token = self
            .root
            .token_at_offset(offset)
            .right_biased()
            .filter(|token| token.text_range().contains(offset))?;

        let kind = match token.kind() {
            JavaSyntaxKind::StringLiteral => TokenKind::Literal(LiteralKind::SimpleString),
            JavaSyntaxKind::TextBlock => TokenKind::Literal(LiteralKind::TextBlock),
            _ => TokenKind::Other,
        };
        Some(TokenAt {
            kind,
            range: token.text_range(),
            text: token.text().to_string(),
            parent: token.parent(),
        })
    }

    fn parent(&self, node: &JavaSyntaxNode) -> Option<JavaSyntaxNode> {
        node.parent()
    }

    fn text_range(&self, node: &JavaSyntaxNode) -> rowan::TextRange {
        node.text_range()
    }

    fn shape(&self, node: &JavaSyntaxNode) -> ExprShape<JavaSyntaxNode> {
        match node.kind() {
            JavaSyntaxKind::LiteralExpr => match LiteralExpr::cast(node.clone()) {
                Some(literal) => ExprShape::Literal(literal.value()),
                None => ExprShape::Other,
            },
            JavaSyntaxKind::ParenExpr => {
                ExprShape::Parenthesized(ParenExpr::cast(node.clone()).and_then(|p| p.inner()))
            }
            JavaSyntaxKind::NameRef => ExprShape::Reference,
            JavaSyntaxKind::PolyadicExpr => {
                let Some(polyadic) = PolyadicExpr::cast(node.clone()) else {
                    return ExprShape::Other;
                };
                match polyadic.operator() {
                    Some(op) => ExprShape::Polyadic {
                        op,
                        operands: polyadic.operands(),
                    },
                    None => ExprShape::Other,
                }
            }
            JavaSyntaxKind::MethodCall => {
                let Some(call) = MethodCallExpr::cast(node.clone()) else {
                    return ExprShape::Other;
                };
                let Some(name) = call.name() else {
                    return ExprShape::Other;
                };
                let qualifier = match call.receiver() {
                    Some(receiver) => self.qualifier(&receiver),
                    None => Qualifier::None,
                };
                ExprShape::MethodCall {
                    qualifier,
                    name,
                    arguments: call.arguments(),
                }
            }
            _ => ExprShape::Other,
        }
    }

    fn value_type(&self, node: &JavaSyntaxNode) -> Option<ValueType> {
        self.type_of(node, 0)
    }

    fn resolve(&self, reference: &JavaSyntaxNode) -> Option<Declaration<JavaSyntaxNode>> {
        let declarator = self.declarator_of(reference)?;
        Some(Declaration {
            name: declarator.name()?,
            constant: ConstantEvaluator::new(self).declarator_constant(&declarator),
            initializer: declarator.initializer(),
        })
    }

    fn fold_constant(&self, node: &JavaSyntaxNode) -> Option<ConstValue> {
        ConstantEvaluator::new(self).evaluate(node)
    }
}

fn literal_type(literal: &LiteralExpr) -> Option<ValueType> {
    let ty = match literal.token()?.kind() {
        JavaSyntaxKind::StringLiteral | JavaSyntaxKind::TextBlock => ValueType::String,
        JavaSyntaxKind::CharLiteral => ValueType::Char,
        JavaSyntaxKind::IntLiteral => ValueType::Int,
        JavaSyntaxKind::LongLiteral => ValueType::Long,
        JavaSyntaxKind::FloatLiteral => ValueType::Float,
        JavaSyntaxKind::DoubleLiteral => ValueType::Double,
        JavaSyntaxKind::TrueKw | JavaSyntaxKind::FalseKw => ValueType::Boolean,
        JavaSyntaxKind::NullKw => ValueType::Null,
        _ => return None,
    };
    Some(ty)
}

fn unary_promotion(ty: ValueType) -> Option<ValueType> {
    match ty {
        ValueType::Char | ValueType::Int => Some(ValueType::Int),
        ty if ty.is_numeric() => Some(ty),
        _ => None,
    }
}

fn binary_promotion(left: ValueType, right: ValueType) -> Option<ValueType> {
    if !left.is_numeric() || !right.is_numeric() {
        return None;
    }
    let ty = if left == ValueType::Double || right == ValueType::Double {
        ValueType::Double
    } else if left == ValueType::Float || right == ValueType::Float {
        ValueType::Float
    } else if left == ValueType::Long || right == ValueType::Long {
        ValueType::Long
    } else {
        ValueType::Int
    };
    Some(ty)
}

/// Result type of `t0 op t1 op ...`
fn polyadic_type(op: BinaryOp, types: &[Option<ValueType>]) -> Option<ValueType> {
    if op == BinaryOp::Plus && types.contains(&Some(ValueType::String)) {
        return Some(ValueType::String);
    }
    match op {
        BinaryOp::Lt
        | BinaryOp::Gt
        | BinaryOp::Le
        | BinaryOp::Ge
        | BinaryOp::EqEq
        | BinaryOp::NotEq
        | BinaryOp::AndAnd
        | BinaryOp::OrOr => Some(ValueType::Boolean),
        BinaryOp::Amp | BinaryOp::Pipe | BinaryOp::Caret
            if types.iter().all(|ty| *ty == Some(ValueType::Boolean)) =>
        {
            Some(ValueType::Boolean)
        }
        BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr => unary_promotion((*types.first()?)?),
        _ => {
            let (first, rest) = types.split_first()?;
            rest.iter().try_fold((*first)?, |acc, ty| binary_promotion(acc, (*ty)?))
        }
    }
}

/// Elements in front of a block that belong to the same statement, nearest
/// first: the header of a class, method, `if`, `for` or `catch`
fn header_elements(block: &JavaSyntaxNode) -> Vec<JavaSyntaxElement> {
    let mut elements = Vec::new();
    let mut current = block.prev_sibling_or_token();
    while let Some(element) = current {
        let boundary = match &element {
            NodeOrToken::Token(token) => matches!(
                token.kind(),
                JavaSyntaxKind::Semicolon | JavaSyntaxKind::LBrace | JavaSyntaxKind::RBrace
            ),
            NodeOrToken::Node(node) => matches!(
                node.kind(),
                JavaSyntaxKind::Block | JavaSyntaxKind::VariableDecl | JavaSyntaxKind::Error
            ),
        };
        if boundary {
            break;
        }
        current = element.prev_sibling_or_token();
        elements.push(element);
    }
    elements
}

/// Whether a block is the body of a class, interface, enum, record or
/// anonymous class
fn is_class_body(block: &JavaSyntaxNode) -> bool {
    if block
        .parent()
        .is_some_and(|parent| parent.kind() == JavaSyntaxKind::NewExpr)
    {
        return true;
    }
    header_elements(block).iter().any(|element| match element {
        NodeOrToken::Token(token) => {
            matches!(
                token.kind(),
                JavaSyntaxKind::ClassKw | JavaSyntaxKind::InterfaceKw | JavaSyntaxKind::EnumKw
            )
        }
        NodeOrToken::Node(node) => {
            node.kind() == JavaSyntaxKind::NameRef && node.text() == "record"
        }
    })
}

/// Whether the block's header declares a variable `name`, as a method
/// parameter, `catch` parameter or `for` variable does
fn header_declares(block: &JavaSyntaxNode, name: &str) -> bool {
    header_elements(block)
        .iter()
        .filter_map(|element| element.as_node())
        .filter(|node| {
            matches!(
                node.kind(),
                JavaSyntaxKind::MethodCall | JavaSyntaxKind::ParenExpr
            )
        })
        .flat_map(|node| node.descendants_with_tokens())
        .filter_map(|element| element.into_token())
        .filter(|token| token.kind() == JavaSyntaxKind::Ident && token.text() == name)
        .any(|token| {
            let mut previous = token.prev_token();
            while let Some(prev) = previous.as_ref().filter(|t| t.kind().is_trivia()) {
                previous = prev.prev_token();
            }
            previous.is_some_and(|prev| {
                prev.kind().is_primitive_type()
                    || matches!(
                        prev.kind(),
                        JavaSyntaxKind::Ident
                            | JavaSyntaxKind::Gt
                            | JavaSyntaxKind::Shr
                            | JavaSyntaxKind::UShr
                            | JavaSyntaxKind::RBracket
                            | JavaSyntaxKind::Ellipsis
                    )
            })
        })
}

/// Whether a lambda has a parameter `name`
fn lambda_declares(lambda: &JavaSyntaxNode, name: &str) -> bool {
    let Some(parameters) = lambda.children().next() else {
        return false;
    };
    parameters
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .any(|token| token.kind() == JavaSyntaxKind::Ident && token.text() == name)
}

/// Field `name` declared directly in a class body, in any order, except
/// the declarator the reference itself sits in
fn find_member(body: &JavaSyntaxNode, name: &str, reference: &JavaSyntaxNode) -> Option<Declarator> {
    let reference_range = reference.text_range();
    body.children()
        .filter_map(VariableDecl::cast)
        .flat_map(|declaration| declaration.declarators().collect::<Vec<_>>())
        .find(|declarator| {
            declarator.name().as_deref() == Some(name)
                && !declarator
                    .syntax()
                    .text_range()
                    .contains_range(reference_range)
        })
}

/// Local `name` declared in a block before `before`; the nearest one wins
fn find_local(block: &JavaSyntaxNode, name: &str, before: TextSize) -> Option<Declarator> {
    block
        .children()
        .filter_map(VariableDecl::cast)
        .flat_map(|declaration| declaration.declarators().collect::<Vec<_>>())
        .filter(|declarator| {
            declarator.name().as_deref() == Some(name)
                && declarator.syntax().text_range().end() <= before
        })
        .last()
}
