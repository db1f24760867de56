//! Java front end
//!
//! A lossless syntax tree for Java sources built with Rowan, plus the static
//! knowledge the position engine asks for.
//!
//! ## Architecture
//!
//! - **Lexer**: turns source text into tokens, trivia included, so that
//!   `parse(source).text() == source` always holds
//! - **Parser**: a recovery-oriented expression and declaration parser. It
//!   never fails; constructs it does not model stay in the tree as plain
//!   tokens
//! - **AST**: typed wrappers over the nodes the engine reads
//! - **Semantics**: [`JavaSourceTree`] implements
//!   [`SyntaxTree`](crate::syntax::SyntaxTree) with file-local name
//!   resolution, expression types and constant folding
//!
//! ## Example
//!
//! ```
//! use strindex_core::java::{JavaSourceTree, JavaSyntaxKind};
//!
//! let tree = JavaSourceTree::parse("String s = \"a\" + \"b\";");
//! let concat = tree.initializer_of("s").unwrap();
//! assert_eq!(concat.kind(), JavaSyntaxKind::PolyadicExpr);
//! ```

mod builder;
mod eval;
mod language;
mod lexer;
mod literals;
mod parser;
mod semantics;
mod syntax_kind;

pub mod ast;

pub use builder::CstBuilder;
pub use eval::{ConstantEvaluator, MAX_CONSTANT_STRING_BYTES, MAX_EVAL_DEPTH};
pub use language::{JavaLanguage, JavaSyntaxElement, JavaSyntaxNode, JavaSyntaxToken};
pub use lexer::{JavaLexResult, JavaSpan, JavaToken, LexerError, lex_with_trivia};
pub use literals::literal_value;
pub use parser::parse_java;
pub use semantics::JavaSourceTree;
pub use syntax_kind::JavaSyntaxKind;
