//! Rowan language implementation for Java sources

use rowan::Language;

use super::JavaSyntaxKind;

/// Language tag connecting [`JavaSyntaxKind`] to Rowan's generic trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JavaLanguage;

impl Language for JavaLanguage {
    type Kind = JavaSyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        match raw.0 {
            // Trivia (0-9)
            0 => JavaSyntaxKind::Whitespace,
            1 => JavaSyntaxKind::CommentLine,
            2 => JavaSyntaxKind::CommentBlock,
            3 => JavaSyntaxKind::Newline,

            // Keywords (10-99)
            10 => JavaSyntaxKind::NullKw,
            11 => JavaSyntaxKind::TrueKw,
            12 => JavaSyntaxKind::FalseKw,
            13 => JavaSyntaxKind::NewKw,
            14 => JavaSyntaxKind::ThisKw,
            15 => JavaSyntaxKind::SuperKw,
            16 => JavaSyntaxKind::InstanceofKw,
            17 => JavaSyntaxKind::ClassKw,
            18 => JavaSyntaxKind::InterfaceKw,
            19 => JavaSyntaxKind::EnumKw,
            20 => JavaSyntaxKind::FinalKw,
            21 => JavaSyntaxKind::StaticKw,
            22 => JavaSyntaxKind::PublicKw,
            23 => JavaSyntaxKind::PrivateKw,
            24 => JavaSyntaxKind::ProtectedKw,
            25 => JavaSyntaxKind::AbstractKw,
            26 => JavaSyntaxKind::TransientKw,
            27 => JavaSyntaxKind::VolatileKw,
            28 => JavaSyntaxKind::SynchronizedKw,
            29 => JavaSyntaxKind::NativeKw,
            30 => JavaSyntaxKind::StrictfpKw,
            31 => JavaSyntaxKind::DefaultKw,
            32 => JavaSyntaxKind::BooleanKw,
            33 => JavaSyntaxKind::ByteKw,
            34 => JavaSyntaxKind::CharKw,
            35 => JavaSyntaxKind::ShortKw,
            36 => JavaSyntaxKind::IntKw,
            37 => JavaSyntaxKind::LongKw,
            38 => JavaSyntaxKind::FloatKw,
            39 => JavaSyntaxKind::DoubleKw,
            40 => JavaSyntaxKind::VoidKw,
            41 => JavaSyntaxKind::ReturnKw,
            42 => JavaSyntaxKind::IfKw,
            43 => JavaSyntaxKind::ElseKw,
            44 => JavaSyntaxKind::ForKw,
            45 => JavaSyntaxKind::WhileKw,
            46 => JavaSyntaxKind::DoKw,
            47 => JavaSyntaxKind::SwitchKw,
            48 => JavaSyntaxKind::CaseKw,
            49 => JavaSyntaxKind::BreakKw,
            50 => JavaSyntaxKind::ContinueKw,
            51 => JavaSyntaxKind::ThrowKw,
            52 => JavaSyntaxKind::ThrowsKw,
            53 => JavaSyntaxKind::TryKw,
            54 => JavaSyntaxKind::CatchKw,
            55 => JavaSyntaxKind::FinallyKw,
            56 => JavaSyntaxKind::ImportKw,
            57 => JavaSyntaxKind::PackageKw,
            58 => JavaSyntaxKind::ExtendsKw,
            59 => JavaSyntaxKind::ImplementsKw,
            60 => JavaSyntaxKind::AssertKw,

            // Punctuation and operators (100-149)
            100 => JavaSyntaxKind::LParen,
            101 => JavaSyntaxKind::RParen,
            102 => JavaSyntaxKind::LBrace,
            103 => JavaSyntaxKind::RBrace,
            104 => JavaSyntaxKind::LBracket,
            105 => JavaSyntaxKind::RBracket,
            106 => JavaSyntaxKind::Semicolon,
            107 => JavaSyntaxKind::Comma,
            108 => JavaSyntaxKind::Dot,
            109 => JavaSyntaxKind::Ellipsis,
            110 => JavaSyntaxKind::At,
            111 => JavaSyntaxKind::Question,
            112 => JavaSyntaxKind::Colon,
            113 => JavaSyntaxKind::ColonColon,
            114 => JavaSyntaxKind::Arrow,
            115 => JavaSyntaxKind::Eq,
            116 => JavaSyntaxKind::EqEq,
            117 => JavaSyntaxKind::Bang,
            118 => JavaSyntaxKind::NotEq,
            119 => JavaSyntaxKind::Lt,
            120 => JavaSyntaxKind::Gt,
            121 => JavaSyntaxKind::LtEq,
            122 => JavaSyntaxKind::GtEq,
            123 => JavaSyntaxKind::Plus,
            124 => JavaSyntaxKind::Minus,
            125 => JavaSyntaxKind::Star,
            126 => JavaSyntaxKind::Slash,
            127 => JavaSyntaxKind::Percent,
            128 => JavaSyntaxKind::Amp,
            129 => JavaSyntaxKind::Pipe,
            130 => JavaSyntaxKind::Caret,
            131 => JavaSyntaxKind::Tilde,
            132 => JavaSyntaxKind::AmpAmp,
            133 => JavaSyntaxKind::PipePipe,
            134 => JavaSyntaxKind::PlusPlus,
            135 => JavaSyntaxKind::MinusMinus,
            136 => JavaSyntaxKind::Shl,
            137 => JavaSyntaxKind::Shr,
            138 => JavaSyntaxKind::UShr,
            139 => JavaSyntaxKind::AssignOp,

            // Literals and identifiers (150-189)
            150 => JavaSyntaxKind::Ident,
            151 => JavaSyntaxKind::StringLiteral,
            152 => JavaSyntaxKind::TextBlock,
            153 => JavaSyntaxKind::CharLiteral,
            154 => JavaSyntaxKind::IntLiteral,
            155 => JavaSyntaxKind::LongLiteral,
            156 => JavaSyntaxKind::FloatLiteral,
            157 => JavaSyntaxKind::DoubleLiteral,

            // Special (190-199)
            190 => JavaSyntaxKind::Error,
            191 => JavaSyntaxKind::Eof,

            // Nodes (200-299)
            200 => JavaSyntaxKind::Root,
            201 => JavaSyntaxKind::Block,
            202 => JavaSyntaxKind::VariableDecl,
            203 => JavaSyntaxKind::TypeRef,
            204 => JavaSyntaxKind::Declarator,
            205 => JavaSyntaxKind::ArrayInit,
            206 => JavaSyntaxKind::LiteralExpr,
            207 => JavaSyntaxKind::NameRef,
            208 => JavaSyntaxKind::ThisExpr,
            209 => JavaSyntaxKind::ParenExpr,
            210 => JavaSyntaxKind::MethodCall,
            211 => JavaSyntaxKind::ArgList,
            212 => JavaSyntaxKind::FieldAccess,
            213 => JavaSyntaxKind::IndexExpr,
            214 => JavaSyntaxKind::NewExpr,
            215 => JavaSyntaxKind::CastExpr,
            216 => JavaSyntaxKind::PolyadicExpr,
            217 => JavaSyntaxKind::PrefixExpr,
            218 => JavaSyntaxKind::PostfixExpr,
            219 => JavaSyntaxKind::ConditionalExpr,
            220 => JavaSyntaxKind::AssignExpr,
            221 => JavaSyntaxKind::InstanceofExpr,
            222 => JavaSyntaxKind::MethodRef,
            223 => JavaSyntaxKind::LambdaExpr,
            224 => JavaSyntaxKind::UnparsedExpr,

            _ => JavaSyntaxKind::Error,
        }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// A node in the Java concrete syntax tree
pub type JavaSyntaxNode = rowan::SyntaxNode<JavaLanguage>;
/// A token (leaf) in the Java concrete syntax tree
pub type JavaSyntaxToken = rowan::SyntaxToken<JavaLanguage>;
/// Either a node or a token
pub type JavaSyntaxElement = rowan::SyntaxElement<JavaLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_round_trip() {
        for kind in [
            JavaSyntaxKind::Whitespace,
            JavaSyntaxKind::AssertKw,
            JavaSyntaxKind::AssignOp,
            JavaSyntaxKind::TextBlock,
            JavaSyntaxKind::Eof,
            JavaSyntaxKind::UnparsedExpr,
        ] {
            assert_eq!(JavaLanguage::kind_from_raw(JavaLanguage::kind_to_raw(kind)), kind);
        }
    }
}
