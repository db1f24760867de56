//! Syntax kinds for the Java CST
//!
//! Every token and node kind the lexer and parser produce. Numbering follows
//! fixed ranges so a kind's class can be read off its value.

use std::fmt;

/// Syntax kind for Java source elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum JavaSyntaxKind {
    // ==================
    // Trivia (0-9)
    // ==================
    /// Spaces, tabs, form feeds
    Whitespace = 0,
    /// Line comment starting with //
    CommentLine = 1,
    /// Block comment /* ... */
    CommentBlock = 2,
    /// Line terminator
    Newline = 3,

    // ==================
    // Keywords (10-99)
    // ==================
    NullKw = 10,
    TrueKw = 11,
    FalseKw = 12,
    NewKw = 13,
    ThisKw = 14,
    SuperKw = 15,
    InstanceofKw = 16,
    ClassKw = 17,
    InterfaceKw = 18,
    EnumKw = 19,
    FinalKw = 20,
    StaticKw = 21,
    PublicKw = 22,
    PrivateKw = 23,
    ProtectedKw = 24,
    AbstractKw = 25,
    TransientKw = 26,
    VolatileKw = 27,
    SynchronizedKw = 28,
    NativeKw = 29,
    StrictfpKw = 30,
    DefaultKw = 31,
    BooleanKw = 32,
    ByteKw = 33,
    CharKw = 34,
    ShortKw = 35,
    IntKw = 36,
    LongKw = 37,
    FloatKw = 38,
    DoubleKw = 39,
    VoidKw = 40,
    ReturnKw = 41,
    IfKw = 42,
    ElseKw = 43,
    ForKw = 44,
    WhileKw = 45,
    DoKw = 46,
    SwitchKw = 47,
    CaseKw = 48,
    BreakKw = 49,
    ContinueKw = 50,
    ThrowKw = 51,
    ThrowsKw = 52,
    TryKw = 53,
    CatchKw = 54,
    FinallyKw = 55,
    ImportKw = 56,
    PackageKw = 57,
    ExtendsKw = 58,
    ImplementsKw = 59,
    AssertKw = 60,

    // ==================
    // Punctuation and operators (100-149)
    // ==================
    /// `(`
    LParen = 100,
    /// `)`
    RParen = 101,
    /// `{`
    LBrace = 102,
    /// `}`
    RBrace = 103,
    /// `[`
    LBracket = 104,
    /// `]`
    RBracket = 105,
    /// `;`
    Semicolon = 106,
    /// `,`
    Comma = 107,
    /// `.`
    Dot = 108,
    /// `...`
    Ellipsis = 109,
    /// `@`
    At = 110,
    /// `?`
    Question = 111,
    /// `:`
    Colon = 112,
    /// `::`
    ColonColon = 113,
    /// `->`
    Arrow = 114,
    /// `=`
    Eq = 115,
    /// `==`
    EqEq = 116,
    /// `!`
    Bang = 117,
    /// `!=`
    NotEq = 118,
    /// `<`
    Lt = 119,
    /// `>`
    Gt = 120,
    /// `<=`
    LtEq = 121,
    /// `>=`
    GtEq = 122,
    /// `+`
    Plus = 123,
    /// `-`
    Minus = 124,
    /// `*`
    Star = 125,
    /// `/`
    Slash = 126,
    /// `%`
    Percent = 127,
    /// `&`
    Amp = 128,
    /// `|`
    Pipe = 129,
    /// `^`
    Caret = 130,
    /// `~`
    Tilde = 131,
    /// `&&`
    AmpAmp = 132,
    /// `||`
    PipePipe = 133,
    /// `++`
    PlusPlus = 134,
    /// `--`
    MinusMinus = 135,
    /// `<<`
    Shl = 136,
    /// `>>`
    Shr = 137,
    /// `>>>`
    UShr = 138,
    /// Compound assignment such as += or >>>=
    AssignOp = 139,

    // ==================
    // Literals and identifiers (150-189)
    // ==================
    Ident = 150,
    /// `"..."`
    StringLiteral = 151,
    /// `"""..."""`
    TextBlock = 152,
    /// `'c'`
    CharLiteral = 153,
    IntLiteral = 154,
    /// Integer literal with an L suffix
    LongLiteral = 155,
    /// Floating literal with an f suffix
    FloatLiteral = 156,
    DoubleLiteral = 157,

    // ==================
    // Special (190-199)
    // ==================
    /// Unrecognised input or a missing token
    Error = 190,
    /// End of input
    Eof = 191,

    // ==================
    // Nodes (200-299)
    // ==================
    Root = 200,
    /// { ... } of a class body or statement block
    Block = 201,
    /// Field or local variable declaration
    VariableDecl = 202,
    TypeRef = 203,
    /// name [= initializer] inside a declaration
    Declarator = 204,
    /// { a, b } array initializer
    ArrayInit = 205,
    LiteralExpr = 206,
    /// Simple name in expression position
    NameRef = 207,
    /// this or super
    ThisExpr = 208,
    ParenExpr = 209,
    MethodCall = 210,
    ArgList = 211,
    FieldAccess = 212,
    IndexExpr = 213,
    NewExpr = 214,
    CastExpr = 215,
    /// Chain of one binary operator: a + b + c
    PolyadicExpr = 216,
    PrefixExpr = 217,
    PostfixExpr = 218,
    ConditionalExpr = 219,
    AssignExpr = 220,
    InstanceofExpr = 221,
    MethodRef = 222,
    LambdaExpr = 223,
    /// Argument the expression grammar does not cover
    UnparsedExpr = 224,
}

impl JavaSyntaxKind {
    /// Check if this is a trivia kind (whitespace, comments, newlines)
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::CommentLine | Self::CommentBlock | Self::Newline
        )
    }

    /// Check if this is a keyword
    pub const fn is_keyword(self) -> bool {
        (self as u16) >= 10 && (self as u16) < 100
    }

    /// Check if this is punctuation or an operator
    pub const fn is_punct(self) -> bool {
        (self as u16) >= 100 && (self as u16) < 150
    }

    /// Check if this is a literal token (including `null`, `true`, `false`)
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::StringLiteral
                | Self::TextBlock
                | Self::CharLiteral
                | Self::IntLiteral
                | Self::LongLiteral
                | Self::FloatLiteral
                | Self::DoubleLiteral
                | Self::NullKw
                | Self::TrueKw
                | Self::FalseKw
        )
    }

    /// Check if this is a structural node
    pub const fn is_node(self) -> bool {
        (self as u16) >= 200 && (self as u16) < 300
    }

    /// Node kinds that stand for an expression
    pub const fn is_expression(self) -> bool {
        matches!(
            self,
            Self::LiteralExpr
                | Self::NameRef
                | Self::ThisExpr
                | Self::ParenExpr
                | Self::MethodCall
                | Self::FieldAccess
                | Self::IndexExpr
                | Self::NewExpr
                | Self::CastExpr
                | Self::PolyadicExpr
                | Self::PrefixExpr
                | Self::PostfixExpr
                | Self::ConditionalExpr
                | Self::AssignExpr
                | Self::InstanceofExpr
                | Self::MethodRef
                | Self::LambdaExpr
                | Self::ArrayInit
                | Self::UnparsedExpr
        )
    }

    /// Declaration modifiers
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::FinalKw
                | Self::StaticKw
                | Self::PublicKw
                | Self::PrivateKw
                | Self::ProtectedKw
                | Self::AbstractKw
                | Self::TransientKw
                | Self::VolatileKw
                | Self::SynchronizedKw
                | Self::NativeKw
                | Self::StrictfpKw
                | Self::DefaultKw
        )
    }

    /// Primitive type keywords
    pub const fn is_primitive_type(self) -> bool {
        matches!(
            self,
            Self::BooleanKw
                | Self::ByteKw
                | Self::CharKw
                | Self::ShortKw
                | Self::IntKw
                | Self::LongKw
                | Self::FloatKw
                | Self::DoubleKw
        )
    }

    /// Keyword kind for a reserved word
    pub fn keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "null" => Self::NullKw,
            "true" => Self::TrueKw,
            "false" => Self::FalseKw,
            "new" => Self::NewKw,
            "this" => Self::ThisKw,
            "super" => Self::SuperKw,
            "instanceof" => Self::InstanceofKw,
            "class" => Self::ClassKw,
            "interface" => Self::InterfaceKw,
            "enum" => Self::EnumKw,
            "final" => Self::FinalKw,
            "static" => Self::StaticKw,
            "public" => Self::PublicKw,
            "private" => Self::PrivateKw,
            "protected" => Self::ProtectedKw,
            "abstract" => Self::AbstractKw,
            "transient" => Self::TransientKw,
            "volatile" => Self::VolatileKw,
            "synchronized" => Self::SynchronizedKw,
            "native" => Self::NativeKw,
            "strictfp" => Self::StrictfpKw,
            "default" => Self::DefaultKw,
            "boolean" => Self::BooleanKw,
            "byte" => Self::ByteKw,
            "char" => Self::CharKw,
            "short" => Self::ShortKw,
            "int" => Self::IntKw,
            "long" => Self::LongKw,
            "float" => Self::FloatKw,
            "double" => Self::DoubleKw,
            "void" => Self::VoidKw,
            "return" => Self::ReturnKw,
            "if" => Self::IfKw,
            "else" => Self::ElseKw,
            "for" => Self::ForKw,
            "while" => Self::WhileKw,
            "do" => Self::DoKw,
            "switch" => Self::SwitchKw,
            "case" => Self::CaseKw,
            "break" => Self::BreakKw,
            "continue" => Self::ContinueKw,
            "throw" => Self::ThrowKw,
            "throws" => Self::ThrowsKw,
            "try" => Self::TryKw,
            "catch" => Self::CatchKw,
            "finally" => Self::FinallyKw,
            "import" => Self::ImportKw,
            "package" => Self::PackageKw,
            "extends" => Self::ExtendsKw,
            "implements" => Self::ImplementsKw,
            "assert" => Self::AssertKw,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for JavaSyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<JavaSyntaxKind> for rowan::SyntaxKind {
    fn from(kind: JavaSyntaxKind) -> Self {
        Self(kind as u16)
    }
}
