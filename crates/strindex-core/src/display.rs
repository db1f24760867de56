//! Status text for a caret position

use rowan::TextSize;
use tracing::debug;

use crate::locator::{self, EditorContext};
use crate::position::StringPosition;
use crate::prefix::prefix_position;
use crate::resolver::ConstantResolver;
use crate::syntax::SyntaxTree;

/// Position of the caret inside the string value it is editing
///
/// Combines the operands concatenated before the literal with the position
/// inside the literal itself. `None` when the caret is not inside string
/// content, or when a guard (several carets, indexing in progress, caret on
/// a delimiter or in text-block indentation) applies.
pub fn compute_position<T: SyntaxTree>(
    cursor_offset: TextSize,
    context: &EditorContext<'_, T>,
) -> Option<StringPosition> {
    let located = locator::locate(cursor_offset, context)?;
    let local = located.local_position()?;

    let resolver = ConstantResolver::with_config(context.tree, &context.config.resolver);
    let prefix = prefix_position(&resolver, context.tree, &located.expression);

    let position = prefix + local;
    debug!(
        "Caret at {:?}: prefix {:?}, local {:?}",
        cursor_offset, prefix, local
    );
    Some(position)
}

/// Status text for the caret, or an empty string when there is none
pub fn compute_display_text<T: SyntaxTree>(
    cursor_offset: TextSize,
    context: &EditorContext<'_, T>,
) -> String {
    compute_position(cursor_offset, context)
        .map(|position| position.render(context.config.display.compact_single_line))
        .unwrap_or_default()
}
