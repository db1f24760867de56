//! strindex core
//!
//! Tells where a caret sits inside the string value a Java string or
//! text-block literal produces: its line, column and absolute index, all in
//! UTF-16 units, after escapes are decoded, text-block indentation is
//! stripped and constant operands concatenated in front of the literal are
//! taken into account.
//!
//! ```
//! use rowan::TextSize;
//! use strindex_core::{EditorContext, JavaSourceTree, compute_display_text};
//!
//! let source = "String s = \"ab\\n\" + \"cd\";";
//! let tree = JavaSourceTree::parse(source);
//! let caret = TextSize::from(source.find("d\"").unwrap() as u32);
//!
//! let text = compute_display_text(caret, &EditorContext::new(&tree));
//! assert_eq!(text, "String 2:2 (index 4)");
//! ```

pub mod caret;
pub mod config;
pub mod display;
pub mod error;
pub mod escape;
pub mod java;
pub mod literal;
pub mod locator;
pub mod position;
pub mod prefix;
pub mod resolver;
pub mod result;
pub mod session;
pub mod syntax;
pub mod value;

// Re-export commonly used types
pub use caret::CaretSpec;
pub use config::{ConfigLoader, DisplayConfiguration, ResolverConfiguration, StrIndexConfig};
pub use display::{compute_display_text, compute_position};
pub use error::{ErrorKind, StrIndexError};
pub use java::JavaSourceTree;
pub use literal::{LiteralKind, LiteralToken};
pub use locator::{EditorContext, LocatedLiteral, locate};
pub use position::StringPosition;
pub use prefix::prefix_position;
pub use resolver::ConstantResolver;
pub use result::{Result, ResultExt};
pub use session::EditorSession;
pub use syntax::{BinaryOp, Declaration, ExprShape, Qualifier, SyntaxTree, TokenAt, TokenKind};
pub use value::{ConstValue, ValueType};

/// Initialize the tracing subscriber for logging
///
/// `RUST_LOG` wins over `default_directive` when set. Logs go to stderr.
pub fn init_tracing(default_directive: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
