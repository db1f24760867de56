//! Finding the literal under the caret

use rowan::TextSize;
use tracing::debug;

use crate::config::StrIndexConfig;
use crate::escape;
use crate::literal::{LiteralKind, LiteralToken};
use crate::position::StringPosition;
use crate::syntax::{ExprShape, SyntaxTree, TokenKind};

/// What the host editor knows at the moment of a query
#[derive(Debug, Clone)]
pub struct EditorContext<'a, T: SyntaxTree> {
    pub tree: &'a T,
    /// Number of carets in the editor
    pub caret_count: usize,
    /// Whether declaration lookups are available (no indexing in progress)
    pub index_ready: bool,
    pub config: StrIndexConfig,
}

impl<'a, T: SyntaxTree> EditorContext<'a, T> {
    /// Single caret, index ready, default configuration
    pub fn new(tree: &'a T) -> Self {
        Self {
            tree,
            caret_count: 1,
            index_ready: true,
            config: StrIndexConfig::default(),
        }
    }

    pub fn with_caret_count(mut self, caret_count: usize) -> Self {
        self.caret_count = caret_count;
        self
    }

    pub fn with_index_ready(mut self, index_ready: bool) -> Self {
        self.index_ready = index_ready;
        self
    }

    pub fn with_config(mut self, config: StrIndexConfig) -> Self {
        self.config = config;
        self
    }
}

/// A caret placed inside the content of a string literal
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedLiteral<N> {
    pub literal: LiteralToken,
    /// The literal expression node owning the token
    pub expression: N,
    /// Byte offset of the caret from the start of the content
    pub offset_in_content: usize,
}

impl<N> LocatedLiteral<N> {
    /// Position of the caret inside the decoded literal value
    pub fn local_position(&self) -> Option<StringPosition> {
        let decoded = escape::decode_prefix(
            self.literal.raw_content(),
            self.offset_in_content,
            self.literal.kind(),
        )?;
        Some(StringPosition::of(&decoded))
    }
}

/// Locate the string literal whose content contains `offset`
pub fn locate<T: SyntaxTree>(
    offset: TextSize,
    context: &EditorContext<'_, T>,
) -> Option<LocatedLiteral<T::Node>> {
    if !context.index_ready {
        debug!("Index not ready, no position");
        return None;
    }
    if context.caret_count > 1 {
        debug!("{} carets, no position", context.caret_count);
        return None;
    }

    let tree = context.tree;
    let token = tree.token_at(offset)?;
    let TokenKind::Literal(kind) = token.kind else {
        return None;
    };
    let expression = token.parent?;
    if !matches!(tree.shape(&expression), ExprShape::Literal(_)) {
        return None;
    }

    let literal = LiteralToken::new(kind, token.text, token.range.start());
    if !literal.range().contains(offset) || !literal.content_contains(offset) {
        debug!("Caret on a literal delimiter");
        return None;
    }

    let offset_in_content = usize::from(offset - literal.content_range().start());
    if kind == LiteralKind::TextBlock {
        let indent = escape::text_block_indent(literal.raw_content())?;
        let column = column_at(tree.source(), offset)?;
        let opening = escape::is_opening_line(literal.raw_content(), offset_in_content);
        if column < indent && !opening {
            debug!("Caret in text block indentation ({} < {})", column, indent);
            return None;
        }
    }

    Some(LocatedLiteral {
        literal,
        expression,
        offset_in_content,
    })
}

/// Characters between the start of the line and `offset`
fn column_at(source: &str, offset: TextSize) -> Option<usize> {
    let before = source.get(..usize::from(offset))?;
    let line_start = before.rfind(['\n', '\r']).map_or(0, |i| i + 1);
    Some(before[line_start..].chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_at() {
        let source = "ab\n  cd";
        assert_eq!(column_at(source, 0.into()), Some(0));
        assert_eq!(column_at(source, 2.into()), Some(2));
        assert_eq!(column_at(source, 3.into()), Some(0));
        assert_eq!(column_at(source, 6.into()), Some(3));
        assert_eq!(column_at(source, 40.into()), None);
    }
}
