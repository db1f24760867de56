//! Recovery-oriented parser for Java sources
//!
//! This is not a full Java grammar. It recognises the structure string
//! positions depend on (blocks, variable declarations and expressions with
//! correct precedence) and keeps everything else verbatim as tokens inside
//! the current node, so the tree always covers the whole input.

use super::lexer::LexerError;
use super::{CstBuilder, JavaSyntaxKind, JavaSyntaxNode, JavaToken, lex_with_trivia};
use crate::syntax::BinaryOp;

/// Parse Java source into a lossless CST
///
/// # Example
///
/// ```
/// use strindex_core::java::parse_java;
///
/// let source = "String s = \"a\" + \"b\";";
/// let (cst, errors) = parse_java(source);
/// assert!(errors.is_empty());
/// assert_eq!(cst.text().to_string(), source);
/// ```
pub fn parse_java(source: &str) -> (JavaSyntaxNode, Vec<LexerError>) {
    let (tokens, errors) = lex_with_trivia(source);
    let cst = parse_tokens(&tokens);
    (cst, errors)
}

/// Parse a token stream into a CST
fn parse_tokens(tokens: &[JavaToken]) -> JavaSyntaxNode {
    let mut parser = Parser::new(tokens);
    parser.parse_root();
    parser.finish()
}

/// Binary operator a token stands for
pub(crate) fn binary_op(kind: JavaSyntaxKind) -> Option<BinaryOp> {
    let op = match kind {
        JavaSyntaxKind::Plus => BinaryOp::Plus,
        JavaSyntaxKind::Minus => BinaryOp::Minus,
        JavaSyntaxKind::Star => BinaryOp::Star,
        JavaSyntaxKind::Slash => BinaryOp::Slash,
        JavaSyntaxKind::Percent => BinaryOp::Percent,
        JavaSyntaxKind::Shl => BinaryOp::Shl,
        JavaSyntaxKind::Shr => BinaryOp::Shr,
        JavaSyntaxKind::UShr => BinaryOp::UShr,
        JavaSyntaxKind::Lt => BinaryOp::Lt,
        JavaSyntaxKind::Gt => BinaryOp::Gt,
        JavaSyntaxKind::LtEq => BinaryOp::Le,
        JavaSyntaxKind::GtEq => BinaryOp::Ge,
        JavaSyntaxKind::EqEq => BinaryOp::EqEq,
        JavaSyntaxKind::NotEq => BinaryOp::NotEq,
        JavaSyntaxKind::Amp => BinaryOp::Amp,
        JavaSyntaxKind::Caret => BinaryOp::Caret,
        JavaSyntaxKind::Pipe => BinaryOp::Pipe,
        JavaSyntaxKind::AmpAmp => BinaryOp::AndAnd,
        JavaSyntaxKind::PipePipe => BinaryOp::OrOr,
        _ => return None,
    };
    Some(op)
}

/// Tokens that can begin an expression
fn is_expr_start(kind: JavaSyntaxKind) -> bool {
    kind.is_literal()
        || matches!(
            kind,
            JavaSyntaxKind::Ident
                | JavaSyntaxKind::ThisKw
                | JavaSyntaxKind::SuperKw
                | JavaSyntaxKind::LParen
                | JavaSyntaxKind::NewKw
                | JavaSyntaxKind::Minus
                | JavaSyntaxKind::Plus
                | JavaSyntaxKind::Bang
                | JavaSyntaxKind::Tilde
                | JavaSyntaxKind::PlusPlus
                | JavaSyntaxKind::MinusMinus
        )
}

/// Keywords followed by a parenthesized header rather than an expression
fn takes_header(kind: JavaSyntaxKind) -> bool {
    matches!(
        kind,
        JavaSyntaxKind::IfKw
            | JavaSyntaxKind::WhileKw
            | JavaSyntaxKind::ForKw
            | JavaSyntaxKind::SwitchKw
            | JavaSyntaxKind::CatchKw
            | JavaSyntaxKind::TryKw
            | JavaSyntaxKind::SynchronizedKw
    )
}

/// Token stream parser
struct Parser<'a> {
    tokens: &'a [JavaToken],
    pos: usize,
    builder: CstBuilder,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [JavaToken]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: CstBuilder::new(),
        }
    }

    fn finish(self) -> JavaSyntaxNode {
        self.builder.finish()
    }

    fn parse_root(&mut self) {
        self.builder.start_node(JavaSyntaxKind::Root);

        while !self.at_end() {
            let start = self.pos;
            if self.at(JavaSyntaxKind::RBrace) {
                self.error_and_recover();
            } else {
                self.parse_statement();
            }
            if self.pos == start && !self.at_end() {
                self.error_and_recover();
            }
        }
        self.consume_trivia();

        self.builder.finish_node(); // ROOT
    }

    /// `{ statement* }`, also used for class bodies
    fn parse_block(&mut self) {
        self.builder.start_node(JavaSyntaxKind::Block);
        self.bump(); // {

        loop {
            self.consume_trivia();
            if self.at(JavaSyntaxKind::RBrace) {
                self.bump();
                break;
            }
            if self.at_end() {
                break;
            }
            let start = self.pos;
            self.parse_statement();
            if self.pos == start {
                self.bump();
            }
        }

        self.builder.finish_node(); // BLOCK
    }

    fn parse_statement(&mut self) {
        self.consume_trivia();
        match self.current_kind() {
            JavaSyntaxKind::Eof | JavaSyntaxKind::RBrace => {}
            JavaSyntaxKind::LBrace => self.parse_block(),
            JavaSyntaxKind::Semicolon => self.bump(),
            _ if self.at_variable_decl() => self.parse_variable_decl(),
            _ => self.parse_statement_tokens(),
        }
    }

    /// Any other statement: expressions where they can start, raw tokens
    /// elsewhere, up to `;` or through a trailing block
    fn parse_statement_tokens(&mut self) {
        let mut previous = JavaSyntaxKind::Eof;
        loop {
            self.consume_trivia();
            let kind = self.current_kind();
            match kind {
                JavaSyntaxKind::Eof | JavaSyntaxKind::RBrace => break,
                JavaSyntaxKind::Semicolon => {
                    self.bump();
                    break;
                }
                JavaSyntaxKind::LBrace => {
                    self.parse_block();
                    break;
                }
                JavaSyntaxKind::LParen if takes_header(previous) => self.parse_paren(),
                _ if self.at_expr_start() => {
                    self.parse_expr();
                }
                _ => self.bump(),
            }
            previous = kind;
        }
    }

    /// `[modifiers] Type name [= init] {, name [= init]} ;`
    fn parse_variable_decl(&mut self) {
        self.builder.start_node(JavaSyntaxKind::VariableDecl);

        loop {
            self.consume_trivia();
            if self.current_kind().is_modifier() {
                self.bump();
            } else if self.at(JavaSyntaxKind::At) {
                self.bump();
                self.consume_trivia();
                self.parse_expr();
            } else {
                break;
            }
        }

        self.builder.start_node(JavaSyntaxKind::TypeRef);
        if let Some(type_end) = self.skip_type(self.pos) {
            while self.pos < type_end {
                self.bump();
            }
        }
        self.builder.finish_node(); // TYPE_REF

        loop {
            self.consume_trivia();
            self.parse_declarator();
            if self.peek_kind() != JavaSyntaxKind::Comma {
                break;
            }
            self.consume_trivia();
            self.bump();
        }

        if self.peek_kind() == JavaSyntaxKind::Semicolon {
            self.consume_trivia();
            self.bump();
        }

        self.builder.finish_node(); // VARIABLE_DECL
    }

    fn parse_declarator(&mut self) {
        self.builder.start_node(JavaSyntaxKind::Declarator);
        self.expect(JavaSyntaxKind::Ident);

        // C-style array dimensions: `String names[]`
        while self.peek_kind() == JavaSyntaxKind::LBracket {
            self.consume_trivia();
            self.bump();
            self.consume_trivia();
            self.expect(JavaSyntaxKind::RBracket);
        }

        if self.peek_kind() == JavaSyntaxKind::Eq {
            self.consume_trivia();
            self.bump();
            self.consume_trivia();
            if self.at(JavaSyntaxKind::LBrace) {
                self.parse_array_init();
            } else {
                self.parse_expr();
            }
        }

        self.builder.finish_node(); // DECLARATOR
    }

    /// Parse one expression if one starts here
    fn parse_expr(&mut self) -> bool {
        self.consume_trivia();
        if !self.at_expr_start() {
            return false;
        }

        let checkpoint = self.builder.checkpoint();
        self.parse_conditional();

        match self.peek_kind() {
            JavaSyntaxKind::Eq | JavaSyntaxKind::AssignOp => {
                self.builder
                    .start_node_at(checkpoint, JavaSyntaxKind::AssignExpr);
                self.consume_trivia();
                self.bump();
                self.parse_expr();
                self.builder.finish_node();
            }
            JavaSyntaxKind::Arrow => {
                self.builder
                    .start_node_at(checkpoint, JavaSyntaxKind::LambdaExpr);
                self.consume_trivia();
                self.bump();
                self.consume_trivia();
                if self.at(JavaSyntaxKind::LBrace) {
                    self.parse_block();
                } else {
                    self.parse_expr();
                }
                self.builder.finish_node();
            }
            _ => {}
        }
        true
    }

    fn parse_conditional(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.parse_binary(0);

        if self.peek_kind() == JavaSyntaxKind::Question {
            self.builder
                .start_node_at(checkpoint, JavaSyntaxKind::ConditionalExpr);
            self.consume_trivia();
            self.bump();
            self.parse_expr();
            if self.peek_kind() == JavaSyntaxKind::Colon {
                self.consume_trivia();
                self.bump();
                self.consume_trivia();
                if self.at_expr_start() {
                    self.parse_conditional();
                }
            }
            self.builder.finish_node();
        }
    }

    /// Precedence climbing; a run of one operator becomes a single
    /// polyadic node
    fn parse_binary(&mut self, min_prec: u8) {
        let checkpoint = self.builder.checkpoint();
        self.parse_unary();

        loop {
            let kind = self.peek_kind();
            if kind == JavaSyntaxKind::InstanceofKw {
                if BinaryOp::Lt.precedence() < min_prec {
                    break;
                }
                self.builder
                    .start_node_at(checkpoint, JavaSyntaxKind::InstanceofExpr);
                self.consume_trivia();
                self.bump();
                self.consume_trivia();
                if self.at(JavaSyntaxKind::FinalKw) {
                    self.bump();
                    self.consume_trivia();
                }
                if let Some(type_end) = self.skip_type(self.pos) {
                    while self.pos < type_end {
                        self.bump();
                    }
                }
                // Pattern binding: `x instanceof String s`
                if self.peek_kind() == JavaSyntaxKind::Ident {
                    self.consume_trivia();
                    self.bump();
                }
                self.builder.finish_node();
                continue;
            }

            let Some(op) = binary_op(kind) else {
                break;
            };
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }

            self.builder
                .start_node_at(checkpoint, JavaSyntaxKind::PolyadicExpr);
            loop {
                self.consume_trivia();
                self.bump(); // operator
                self.consume_trivia();
                if self.at_expr_start() {
                    self.parse_binary(prec + 1);
                }
                if binary_op(self.peek_kind()) != Some(op) {
                    break;
                }
            }
            self.builder.finish_node(); // POLYADIC_EXPR
        }
    }

    fn parse_unary(&mut self) {
        match self.current_kind() {
            JavaSyntaxKind::Minus
            | JavaSyntaxKind::Plus
            | JavaSyntaxKind::Bang
            | JavaSyntaxKind::Tilde
            | JavaSyntaxKind::PlusPlus
            | JavaSyntaxKind::MinusMinus => {
                self.builder.start_node(JavaSyntaxKind::PrefixExpr);
                self.bump();
                self.consume_trivia();
                if self.at_expr_start() {
                    self.parse_unary();
                }
                self.builder.finish_node();
            }
            JavaSyntaxKind::LParen if self.at_cast() => {
                self.builder.start_node(JavaSyntaxKind::CastExpr);
                self.bump();
                self.consume_trivia();
                self.builder.start_node(JavaSyntaxKind::TypeRef);
                if let Some(type_end) = self.skip_type(self.pos) {
                    while self.pos < type_end {
                        self.bump();
                    }
                }
                self.builder.finish_node();
                self.consume_trivia();
                self.expect(JavaSyntaxKind::RParen);
                self.consume_trivia();
                if self.at_expr_start() {
                    self.parse_unary();
                }
                self.builder.finish_node();
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) {
        let checkpoint = self.builder.checkpoint();
        if !self.parse_primary() {
            return;
        }

        loop {
            match self.peek_kind() {
                JavaSyntaxKind::Dot => {
                    let member = self.nth(1);
                    if !matches!(
                        member,
                        JavaSyntaxKind::Ident
                            | JavaSyntaxKind::ClassKw
                            | JavaSyntaxKind::ThisKw
                            | JavaSyntaxKind::SuperKw
                            | JavaSyntaxKind::NewKw
                    ) {
                        break;
                    }
                    let is_call =
                        member == JavaSyntaxKind::Ident && self.nth(2) == JavaSyntaxKind::LParen;
                    let kind = if is_call {
                        JavaSyntaxKind::MethodCall
                    } else {
                        JavaSyntaxKind::FieldAccess
                    };
                    self.builder.start_node_at(checkpoint, kind);
                    self.consume_trivia();
                    self.bump(); // .
                    self.consume_trivia();
                    self.bump(); // member
                    if is_call {
                        self.consume_trivia();
                        self.parse_arg_list();
                    }
                    self.builder.finish_node();
                }
                JavaSyntaxKind::LBracket => {
                    self.builder
                        .start_node_at(checkpoint, JavaSyntaxKind::IndexExpr);
                    self.consume_trivia();
                    self.bump();
                    self.parse_expr();
                    self.consume_trivia();
                    self.expect(JavaSyntaxKind::RBracket);
                    self.builder.finish_node();
                }
                JavaSyntaxKind::PlusPlus | JavaSyntaxKind::MinusMinus => {
                    self.builder
                        .start_node_at(checkpoint, JavaSyntaxKind::PostfixExpr);
                    self.consume_trivia();
                    self.bump();
                    self.builder.finish_node();
                }
                JavaSyntaxKind::ColonColon => {
                    self.builder
                        .start_node_at(checkpoint, JavaSyntaxKind::MethodRef);
                    self.consume_trivia();
                    self.bump();
                    self.consume_trivia();
                    if self.at(JavaSyntaxKind::Ident) || self.at(JavaSyntaxKind::NewKw) {
                        self.bump();
                    }
                    self.builder.finish_node();
                }
                _ => break,
            }
        }
    }

    fn parse_primary(&mut self) -> bool {
        match self.current_kind() {
            kind if kind.is_literal() => {
                self.builder.start_node(JavaSyntaxKind::LiteralExpr);
                self.bump();
                self.builder.finish_node();
            }
            JavaSyntaxKind::Ident | JavaSyntaxKind::ThisKw | JavaSyntaxKind::SuperKw
                if self.nth(1) == JavaSyntaxKind::LParen =>
            {
                self.builder.start_node(JavaSyntaxKind::MethodCall);
                self.bump();
                self.consume_trivia();
                self.parse_arg_list();
                self.builder.finish_node();
            }
            JavaSyntaxKind::Ident => {
                self.builder.start_node(JavaSyntaxKind::NameRef);
                self.bump();
                self.builder.finish_node();
            }
            JavaSyntaxKind::ThisKw | JavaSyntaxKind::SuperKw => {
                self.builder.start_node(JavaSyntaxKind::ThisExpr);
                self.bump();
                self.builder.finish_node();
            }
            JavaSyntaxKind::LParen => self.parse_paren(),
            JavaSyntaxKind::NewKw => self.parse_new(),
            _ => return false,
        }
        true
    }

    /// `( expr )`; anything else up to the closing parenthesis stays inside
    fn parse_paren(&mut self) {
        self.builder.start_node(JavaSyntaxKind::ParenExpr);
        self.bump(); // (
        self.parse_expr();

        loop {
            self.consume_trivia();
            match self.current_kind() {
                JavaSyntaxKind::RParen
                | JavaSyntaxKind::Eof
                | JavaSyntaxKind::LBrace
                | JavaSyntaxKind::RBrace => break,
                _ if self.at_expr_start() => {
                    self.parse_expr();
                }
                _ => self.bump(),
            }
        }

        self.expect(JavaSyntaxKind::RParen);
        self.builder.finish_node(); // PAREN_EXPR
    }

    fn parse_new(&mut self) {
        self.builder.start_node(JavaSyntaxKind::NewExpr);
        self.bump(); // new
        self.consume_trivia();

        self.builder.start_node(JavaSyntaxKind::TypeRef);
        if let Some(type_end) = self.skip_type(self.pos) {
            while self.pos < type_end {
                self.bump();
            }
        }
        self.builder.finish_node();

        while self.peek_kind() == JavaSyntaxKind::LBracket {
            self.consume_trivia();
            self.bump();
            self.parse_expr();
            self.consume_trivia();
            self.expect(JavaSyntaxKind::RBracket);
        }

        match self.peek_kind() {
            JavaSyntaxKind::LParen => {
                self.consume_trivia();
                self.parse_arg_list();
                // Anonymous class body
                if self.peek_kind() == JavaSyntaxKind::LBrace {
                    self.consume_trivia();
                    self.parse_block();
                }
            }
            JavaSyntaxKind::LBrace => {
                self.consume_trivia();
                self.parse_array_init();
            }
            _ => {}
        }

        self.builder.finish_node(); // NEW_EXPR
    }

    fn parse_arg_list(&mut self) {
        self.builder.start_node(JavaSyntaxKind::ArgList);
        self.bump(); // (

        loop {
            self.consume_trivia();
            match self.current_kind() {
                JavaSyntaxKind::RParen => {
                    self.bump();
                    break;
                }
                JavaSyntaxKind::Eof | JavaSyntaxKind::Semicolon | JavaSyntaxKind::RBrace => break,
                JavaSyntaxKind::Comma => self.bump(),
                _ => self.parse_argument(),
            }
        }

        self.builder.finish_node(); // ARG_LIST
    }

    /// One argument; when it is not a single expression the whole argument
    /// is wrapped so the argument count stays right
    fn parse_argument(&mut self) {
        let checkpoint = self.builder.checkpoint();
        let parsed = self.parse_expr();
        if parsed
            && matches!(
                self.peek_kind(),
                JavaSyntaxKind::Comma
                    | JavaSyntaxKind::RParen
                    | JavaSyntaxKind::Eof
                    | JavaSyntaxKind::Semicolon
                    | JavaSyntaxKind::RBrace
            )
        {
            return;
        }

        self.builder
            .start_node_at(checkpoint, JavaSyntaxKind::UnparsedExpr);
        loop {
            self.consume_trivia();
            match self.current_kind() {
                JavaSyntaxKind::Comma
                | JavaSyntaxKind::RParen
                | JavaSyntaxKind::Eof
                | JavaSyntaxKind::Semicolon
                | JavaSyntaxKind::RBrace => break,
                JavaSyntaxKind::LBrace => self.parse_block(),
                _ if self.at_expr_start() => {
                    self.parse_expr();
                }
                _ => self.bump(),
            }
        }
        self.builder.finish_node(); // UNPARSED_EXPR
    }

    fn parse_array_init(&mut self) {
        self.builder.start_node(JavaSyntaxKind::ArrayInit);
        self.bump(); // {

        loop {
            self.consume_trivia();
            match self.current_kind() {
                JavaSyntaxKind::RBrace => {
                    self.bump();
                    break;
                }
                JavaSyntaxKind::Eof | JavaSyntaxKind::Semicolon => break,
                JavaSyntaxKind::Comma => self.bump(),
                JavaSyntaxKind::LBrace => self.parse_array_init(),
                _ if self.at_expr_start() => {
                    self.parse_expr();
                }
                _ => self.bump(),
            }
        }

        self.builder.finish_node(); // ARRAY_INIT
    }

    fn error_and_recover(&mut self) {
        self.builder.start_node(JavaSyntaxKind::Error);
        self.bump();
        self.builder.finish_node();
    }

    // Lookahead

    /// Whether a variable declaration starts at the current token
    fn at_variable_decl(&self) -> bool {
        let mut i = self.next_non_trivia(self.pos);
        loop {
            let kind = self.kind_at(i);
            if kind.is_modifier() {
                i = self.next_non_trivia(i + 1);
            } else if kind == JavaSyntaxKind::At
                && self.kind_at(self.next_non_trivia(i + 1)) == JavaSyntaxKind::Ident
            {
                match self.skip_annotation(i) {
                    Some(next) => i = self.next_non_trivia(next),
                    None => return false,
                }
            } else {
                break;
            }
        }

        let Some(type_end) = self.skip_type(i) else {
            return false;
        };
        let name = self.next_non_trivia(type_end);
        if self.kind_at(name) != JavaSyntaxKind::Ident {
            return false;
        }

        let next = self.next_non_trivia(name + 1);
        match self.kind_at(next) {
            JavaSyntaxKind::Eq | JavaSyntaxKind::Semicolon | JavaSyntaxKind::Comma => true,
            JavaSyntaxKind::LBracket => {
                self.kind_at(self.next_non_trivia(next + 1)) == JavaSyntaxKind::RBracket
            }
            _ => false,
        }
    }

    /// Whether the `(` at the current position opens a cast
    fn at_cast(&self) -> bool {
        let start = self.next_non_trivia(self.pos + 1);
        let primitive = self.kind_at(start).is_primitive_type();
        let Some(type_end) = self.skip_type(start) else {
            return false;
        };
        let close = self.next_non_trivia(type_end);
        if self.kind_at(close) != JavaSyntaxKind::RParen {
            return false;
        }

        let next = self.kind_at(self.next_non_trivia(close + 1));
        if primitive {
            return is_expr_start(next);
        }
        next.is_literal()
            || matches!(
                next,
                JavaSyntaxKind::Ident
                    | JavaSyntaxKind::LParen
                    | JavaSyntaxKind::ThisKw
                    | JavaSyntaxKind::SuperKw
                    | JavaSyntaxKind::NewKw
                    | JavaSyntaxKind::Bang
                    | JavaSyntaxKind::Tilde
            )
    }

    /// Index just past a type starting at `start`: a primitive or a
    /// qualified name with type arguments, then `[]` pairs
    fn skip_type(&self, start: usize) -> Option<usize> {
        let mut i = start;
        match self.kind_at(i) {
            kind if kind.is_primitive_type() => i += 1,
            JavaSyntaxKind::Ident => {
                i += 1;
                loop {
                    let next = self.next_non_trivia(i);
                    match self.kind_at(next) {
                        JavaSyntaxKind::Lt => i = self.skip_type_args(next)?,
                        JavaSyntaxKind::Dot
                            if self.kind_at(self.next_non_trivia(next + 1))
                                == JavaSyntaxKind::Ident =>
                        {
                            i = self.next_non_trivia(next + 1) + 1;
                        }
                        _ => break,
                    }
                }
            }
            _ => return None,
        }

        loop {
            let open = self.next_non_trivia(i);
            let close = self.next_non_trivia(open + 1);
            if self.kind_at(open) == JavaSyntaxKind::LBracket
                && self.kind_at(close) == JavaSyntaxKind::RBracket
            {
                i = close + 1;
            } else {
                break;
            }
        }
        Some(i)
    }

    /// Index just past balanced `<...>` starting at `open`
    ///
    /// `>>` and `>>>` close two and three levels at once.
    fn skip_type_args(&self, open: usize) -> Option<usize> {
        let mut depth: i32 = 0;
        let mut i = open;
        loop {
            match self.kind_at(i) {
                JavaSyntaxKind::Lt => depth += 1,
                JavaSyntaxKind::Gt => depth -= 1,
                JavaSyntaxKind::Shr => depth -= 2,
                JavaSyntaxKind::UShr => depth -= 3,
                JavaSyntaxKind::Ident
                | JavaSyntaxKind::Dot
                | JavaSyntaxKind::Comma
                | JavaSyntaxKind::Question
                | JavaSyntaxKind::ExtendsKw
                | JavaSyntaxKind::SuperKw
                | JavaSyntaxKind::LBracket
                | JavaSyntaxKind::RBracket
                | JavaSyntaxKind::Amp
                | JavaSyntaxKind::At => {}
                kind if kind.is_trivia() || kind.is_primitive_type() => {}
                _ => return None,
            }
            i += 1;
            if depth <= 0 {
                return (depth == 0).then_some(i);
            }
        }
    }

    /// Index just past `@Name(.Name)*[(...)]` starting at the `@`
    fn skip_annotation(&self, at: usize) -> Option<usize> {
        let mut i = self.next_non_trivia(at + 1) + 1;
        loop {
            let dot = self.next_non_trivia(i);
            let name = self.next_non_trivia(dot + 1);
            if self.kind_at(dot) == JavaSyntaxKind::Dot && self.kind_at(name) == JavaSyntaxKind::Ident
            {
                i = name + 1;
            } else {
                break;
            }
        }

        let open = self.next_non_trivia(i);
        if self.kind_at(open) != JavaSyntaxKind::LParen {
            return Some(i);
        }
        let mut depth = 0usize;
        let mut j = open;
        loop {
            match self.kind_at(j) {
                JavaSyntaxKind::LParen => depth += 1,
                JavaSyntaxKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(j + 1);
                    }
                }
                JavaSyntaxKind::Eof => return None,
                _ => {}
            }
            j += 1;
        }
    }

    // Helper methods

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len() || self.at(JavaSyntaxKind::Eof)
    }

    fn current(&self) -> Option<&JavaToken> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> JavaSyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(JavaSyntaxKind::Eof)
    }

    fn at(&self, kind: JavaSyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_trivia(&self) -> bool {
        self.current_kind().is_trivia()
    }

    fn at_expr_start(&self) -> bool {
        is_expr_start(self.current_kind())
    }

    fn kind_at(&self, index: usize) -> JavaSyntaxKind {
        self.tokens
            .get(index)
            .map(|t| t.kind)
            .unwrap_or(JavaSyntaxKind::Eof)
    }

    fn next_non_trivia(&self, from: usize) -> usize {
        let mut i = from;
        while self.kind_at(i).is_trivia() {
            i += 1;
        }
        i
    }

    /// Kind of the `n`th non-trivia token from the current position
    fn nth(&self, n: usize) -> JavaSyntaxKind {
        let mut i = self.next_non_trivia(self.pos);
        for _ in 0..n {
            i = self.next_non_trivia(i + 1);
        }
        self.kind_at(i)
    }

    fn peek_kind(&self) -> JavaSyntaxKind {
        self.nth(0)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn add_current_token(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.add_token(token);
        }
    }

    fn bump(&mut self) {
        self.add_current_token();
        self.advance();
    }

    fn expect(&mut self, kind: JavaSyntaxKind) {
        if self.at(kind) {
            self.bump();
        } else {
            // Missing token
            self.builder.token(JavaSyntaxKind::Error, "");
        }
    }

    fn consume_trivia(&mut self) {
        while self.at_trivia() {
            self.bump();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Indented outline of node kinds, tokens shown for leaves of interest
    fn outline(node: &JavaSyntaxNode) -> String {
        fn walk(node: &JavaSyntaxNode, depth: usize, out: &mut String) {
            out.push_str(&format!("{}{:?}\n", "  ".repeat(depth), node.kind()));
            for child in node.children() {
                walk(&child, depth + 1, out);
            }
        }
        let mut out = String::new();
        walk(node, 0, &mut out);
        out
    }

    fn parse(source: &str) -> JavaSyntaxNode {
        let (cst, _) = parse_java(source);
        assert_eq!(cst.text().to_string(), source, "lossless");
        cst
    }

    #[test]
    fn test_polyadic_flattening() {
        let cst = parse("String s = \"a\" + b + 'c';");
        insta::assert_snapshot!(outline(&cst), @r"
        Root
          VariableDecl
            TypeRef
            Declarator
              PolyadicExpr
                LiteralExpr
                NameRef
                LiteralExpr
        ");
    }

    #[test]
    fn test_precedence_nests_tighter_operators() {
        let cst = parse("x = 1 + 2 * 3 + 4;");
        insta::assert_snapshot!(outline(&cst), @r"
        Root
          AssignExpr
            NameRef
            PolyadicExpr
              LiteralExpr
              PolyadicExpr
                LiteralExpr
                LiteralExpr
              LiteralExpr
        ");
    }

    #[test]
    fn test_left_associative_mixed_operators() {
        let cst = parse("a - b + c;");
        insta::assert_snapshot!(outline(&cst), @r"
        Root
          PolyadicExpr
            PolyadicExpr
              NameRef
              NameRef
            NameRef
        ");
    }

    #[test]
    fn test_method_call_chain() {
        let cst = parse("String.valueOf(1).concat(s.substring(0, 2));");
        insta::assert_snapshot!(outline(&cst), @r"
        Root
          MethodCall
            MethodCall
              NameRef
              ArgList
                LiteralExpr
            ArgList
              MethodCall
                NameRef
                ArgList
                  LiteralExpr
                  LiteralExpr
        ");
    }

    #[test]
    fn test_class_with_fields_and_method() {
        let source = "class A {\n  static final String X = \"x\";\n  String f(int n) {\n    return X + n;\n  }\n}\n";
        let cst = parse(source);
        insta::assert_snapshot!(outline(&cst), @r"
        Root
          NameRef
          Block
            VariableDecl
              TypeRef
              Declarator
                LiteralExpr
            NameRef
            MethodCall
              ArgList
                UnparsedExpr
                  NameRef
            Block
              PolyadicExpr
                NameRef
                NameRef
        ");
    }

    #[test]
    fn test_generic_declaration() {
        let cst = parse("Map<String, List<String>> m = new HashMap<>();");
        insta::assert_snapshot!(outline(&cst), @r"
        Root
          VariableDecl
            TypeRef
            Declarator
              NewExpr
                TypeRef
                ArgList
        ");
    }

    #[test]
    fn test_cast_and_parens() {
        let cst = parse("y = (int) x + (a);");
        insta::assert_snapshot!(outline(&cst), @r"
        Root
          AssignExpr
            NameRef
            PolyadicExpr
              CastExpr
                TypeRef
                NameRef
              ParenExpr
                NameRef
        ");
    }

    #[test]
    fn test_if_header_is_not_a_cast() {
        let cst = parse("if (flag) run(\"x\");");
        insta::assert_snapshot!(outline(&cst), @r"
        Root
          ParenExpr
            NameRef
          MethodCall
            ArgList
              LiteralExpr
        ");
    }

    #[test]
    fn test_lambda_argument_keeps_argument_count() {
        let cst = parse("list.forEach(x -> { String t = x; }, 2);");
        let args = cst
            .descendants()
            .find(|n| n.kind() == JavaSyntaxKind::ArgList)
            .unwrap();
        let kinds: Vec<_> = args.children().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![JavaSyntaxKind::LambdaExpr, JavaSyntaxKind::LiteralExpr]
        );
    }

    #[test]
    fn test_text_block_literal() {
        let source = "String s = \"\"\"\n    hi\n    \"\"\";";
        let cst = parse(source);
        let literal = cst
            .descendants()
            .find(|n| n.kind() == JavaSyntaxKind::LiteralExpr)
            .unwrap();
        let token = literal.first_token().unwrap();
        assert_eq!(token.kind(), JavaSyntaxKind::TextBlock);
    }

    #[test]
    fn test_garbage_is_kept() {
        let source = "} # ) ( \"x";
        let (cst, errors) = parse_java(source);
        assert_eq!(cst.text().to_string(), source);
        assert!(!errors.is_empty());
    }
}
