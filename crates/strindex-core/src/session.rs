//! Event-driven editor model without a UI
//!
//! An [`EditorSession`] holds what a status-bar widget would observe: the
//! document, its parsed tree, the carets and whether indexing is running.
//! Every event recomputes the display text right away. A document change
//! replaces the parsed tree as a whole, so a query never sees half of an
//! edit.

use rowan::TextSize;
use tracing::debug;

use crate::config::StrIndexConfig;
use crate::display::compute_position;
use crate::java::JavaSourceTree;
use crate::locator::EditorContext;
use crate::position::StringPosition;

pub struct EditorSession {
    config: StrIndexConfig,
    tree: JavaSourceTree,
    carets: Vec<TextSize>,
    indexing: bool,
    position: Option<StringPosition>,
    display_text: String,
}

impl EditorSession {
    pub fn new(source: impl Into<String>, config: StrIndexConfig) -> Self {
        let mut session = Self {
            config,
            tree: JavaSourceTree::parse(source),
            carets: vec![TextSize::from(0)],
            indexing: false,
            position: None,
            display_text: String::new(),
        };
        session.refresh();
        session
    }

    pub fn tree(&self) -> &JavaSourceTree {
        &self.tree
    }

    pub fn carets(&self) -> &[TextSize] {
        &self.carets
    }

    pub fn is_indexing(&self) -> bool {
        self.indexing
    }

    /// Position of the primary caret, when it has one
    pub fn position(&self) -> Option<StringPosition> {
        self.position
    }

    /// Text currently shown for the primary caret
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Replace the document; carets past the new end are clamped to it
    pub fn document_changed(&mut self, source: impl Into<String>) -> &str {
        self.tree = JavaSourceTree::parse(source);
        let end = TextSize::of(self.tree.text());
        for caret in &mut self.carets {
            *caret = (*caret).min(end);
        }
        self.refresh()
    }

    /// Move the carets; the first one is the primary caret
    pub fn carets_moved(&mut self, carets: impl IntoIterator<Item = TextSize>) -> &str {
        self.carets = carets.into_iter().collect();
        self.refresh()
    }

    pub fn set_indexing(&mut self, indexing: bool) -> &str {
        self.indexing = indexing;
        self.refresh()
    }

    fn refresh(&mut self) -> &str {
        self.position = self.carets.first().and_then(|&primary| {
            let context = EditorContext::new(&self.tree)
                .with_caret_count(self.carets.len())
                .with_index_ready(!self.indexing)
                .with_config(self.config.clone());
            compute_position(primary, &context)
        });
        self.display_text = self
            .position
            .map(|position| position.render(self.config.display.compact_single_line))
            .unwrap_or_default();
        debug!("Display text now {:?}", self.display_text);
        &self.display_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "class A { String s = \"abc\"; }";

    fn offset_of(source: &str, needle: &str) -> TextSize {
        TextSize::from(source.find(needle).unwrap() as u32)
    }

    #[test]
    fn test_caret_moves_update_text() {
        let mut session = EditorSession::new(SOURCE, StrIndexConfig::default());
        assert_eq!(session.display_text(), "");

        let caret = offset_of(SOURCE, "bc");
        assert_eq!(session.carets_moved([caret]), "String 1:2 (index 1)");
        assert_eq!(session.position(), Some(StringPosition::new(0, 1, 1)));
    }

    #[test]
    fn test_indexing_hides_text() {
        let mut session = EditorSession::new(SOURCE, StrIndexConfig::default());
        session.carets_moved([offset_of(SOURCE, "bc")]);
        assert_eq!(session.set_indexing(true), "");
        assert_eq!(session.set_indexing(false), "String 1:2 (index 1)");
    }

    #[test]
    fn test_multiple_carets_hide_text() {
        let mut session = EditorSession::new(SOURCE, StrIndexConfig::default());
        let caret = offset_of(SOURCE, "bc");
        assert_eq!(session.carets_moved([caret, caret + TextSize::from(1)]), "");
    }

    #[test]
    fn test_document_change_reparses() {
        let mut session = EditorSession::new(SOURCE, StrIndexConfig::default());
        session.carets_moved([offset_of(SOURCE, "bc")]);

        let edited = "class A { String s = \"x\" + \"abc\"; }";
        // The old caret now sits right before the closing quote of "x"
        assert_eq!(session.document_changed(edited), "String 1:2 (index 1)");

        assert_eq!(
            session.carets_moved([offset_of(edited, "bc")]),
            "String 1:3 (index 2)"
        );
    }

    #[test]
    fn test_document_change_clamps_carets() {
        let mut session = EditorSession::new(SOURCE, StrIndexConfig::default());
        session.carets_moved([TextSize::of(SOURCE)]);
        session.document_changed("\"ab\"");
        assert_eq!(session.carets(), &[TextSize::from(4)]);
    }
}
