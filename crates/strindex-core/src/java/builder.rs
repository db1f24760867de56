//! Thin wrapper over Rowan's green tree builder

use rowan::{Checkpoint, GreenNodeBuilder};

use super::{JavaSyntaxKind, JavaSyntaxNode, JavaToken};

/// Builds a Java CST node by node
pub struct CstBuilder {
    builder: GreenNodeBuilder<'static>,
}

impl CstBuilder {
    pub fn new() -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
        }
    }

    pub fn start_node(&mut self, kind: JavaSyntaxKind) {
        self.builder.start_node(kind.into());
    }

    /// Wrap everything added since `checkpoint` in a new node
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: JavaSyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    pub fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub fn token(&mut self, kind: JavaSyntaxKind, text: &str) {
        self.builder.token(kind.into(), text);
    }

    pub fn add_token(&mut self, token: &JavaToken) {
        self.token(token.kind, &token.text);
    }

    pub fn finish(self) -> JavaSyntaxNode {
        JavaSyntaxNode::new_root(self.builder.finish())
    }
}

impl Default for CstBuilder {
    fn default() -> Self {
        Self::new()
    }
}
