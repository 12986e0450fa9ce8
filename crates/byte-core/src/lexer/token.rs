//! Token types for the Byte scanner

use thiserror::Error;

use super::Span;

/// Lexical errors carried by [`TokenKind::Error`] tokens
///
/// An error token is a control signal for the parser, not source text: the
/// parser reports the error and asks for the next token.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character {0}")]
    UnexpectedChar(char),
    #[error("unterminated string (opening quote not matched)")]
    UnterminatedString,
    #[error("unterminated scientific notation")]
    UnterminatedExponent,
    #[error("maximum interpolation nesting of {max} exceeded by {excess}")]
    InterpolationTooDeep { max: usize, excess: usize },
}

/// A token produced by the scanner
///
/// Tokens are small `Copy` values. The text of a token is not stored; it is
/// recovered from the source buffer with [`Token::lexeme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The span in the source code
    pub span: Span,
    /// 1-based line the token starts on
    pub line: u32,
}

impl Token {
    /// Create a new token
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span, line: u32) -> Self {
        Self { kind, span, line }
    }

    /// The source text covered by this token
    ///
    /// String and interpolation tokens cover only the literal's content,
    /// without quotes or `${`/`}` delimiters.
    #[must_use]
    pub fn lexeme<'src>(&self, source: &'src str) -> &'src str {
        self.span.slice(source)
    }

    /// Returns true for error tokens
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error(_))
    }
}

/// The kind of token produced by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // ========== Delimiters ==========
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Colon,
    Semicolon,
    Dot,
    DotDot,

    // ========== Operators ==========
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,
    SlashSlash,
    Equal,
    Greater,
    Less,
    Bang,

    Tilde,
    Pipe,
    Amp,
    Caret,

    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    StarStarEqual,
    SlashSlashEqual,
    EqualEqual,
    GreaterEqual,
    LessEqual,
    BangEqual,

    TildeEqual,
    PipeEqual,
    AmpEqual,
    CaretEqual,

    // ========== Literals ==========
    Identifier,
    /// A complete string literal, or the tail of an interpolated one
    String,
    /// The part of a string literal preceding an interpolated expression.
    ///
    /// `"a ${b} c ${d} e"` is scanned as `Interpolation("a ")`,
    /// `Identifier(b)`, `Interpolation(" c ")`, `Identifier(d)`,
    /// `String(" e")`.
    Interpolation,
    Number,

    // ========== Keywords ==========
    And,
    Or,
    Not,
    Nil,
    In,
    Import,
    Class,
    Is,
    Super,
    If,
    Else,
    True,
    False,
    Fn,
    For,
    Print,
    Return,
    This,
    Let,
    While,

    // ========== Special ==========
    Newline,
    Eof,
    Error(LexError),
}

/// Reserved words and the token kinds they scan to
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("not", TokenKind::Not),
    ("nil", TokenKind::Nil),
    ("in", TokenKind::In),
    ("is", TokenKind::Is),
    ("import", TokenKind::Import),
    ("class", TokenKind::Class),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("fn", TokenKind::Fn),
    ("for", TokenKind::For),
    ("print", TokenKind::Print),
    ("return", TokenKind::Return),
    ("super", TokenKind::Super),
    ("this", TokenKind::This),
    ("let", TokenKind::Let),
    ("while", TokenKind::While),
];

impl TokenKind {
    /// Look up a reserved word, returning `None` for plain identifiers
    #[must_use]
    pub fn keyword(text: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(word, _)| word.len() == text.len() && *word == text)
            .map(|(_, kind)| *kind)
    }

    /// Returns true if this is a reserved word
    #[must_use]
    pub fn is_keyword(&self) -> bool {
        KEYWORDS.iter().any(|(_, kind)| kind == self)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::LeftBracket => write!(f, "["),
            Self::RightBracket => write!(f, "]"),
            Self::LeftBrace => write!(f, "{{"),
            Self::RightBrace => write!(f, "}}"),
            Self::Comma => write!(f, ","),
            Self::Colon => write!(f, ":"),
            Self::Semicolon => write!(f, ";"),
            Self::Dot => write!(f, "."),
            Self::DotDot => write!(f, ".."),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::StarStar => write!(f, "**"),
            Self::SlashSlash => write!(f, "//"),
            Self::Equal => write!(f, "="),
            Self::Greater => write!(f, ">"),
            Self::Less => write!(f, "<"),
            Self::Bang => write!(f, "!"),
            Self::Tilde => write!(f, "~"),
            Self::Pipe => write!(f, "|"),
            Self::Amp => write!(f, "&"),
            Self::Caret => write!(f, "^"),
            Self::PlusEqual => write!(f, "+="),
            Self::MinusEqual => write!(f, "-="),
            Self::StarEqual => write!(f, "*="),
            Self::SlashEqual => write!(f, "/="),
            Self::PercentEqual => write!(f, "%="),
            Self::StarStarEqual => write!(f, "**="),
            Self::SlashSlashEqual => write!(f, "//="),
            Self::EqualEqual => write!(f, "=="),
            Self::GreaterEqual => write!(f, ">="),
            Self::LessEqual => write!(f, "<="),
            Self::BangEqual => write!(f, "!="),
            Self::TildeEqual => write!(f, "~="),
            Self::PipeEqual => write!(f, "|="),
            Self::AmpEqual => write!(f, "&="),
            Self::CaretEqual => write!(f, "^="),
            Self::Identifier => write!(f, "identifier"),
            Self::String => write!(f, "string"),
            Self::Interpolation => write!(f, "interpolation"),
            Self::Number => write!(f, "number"),
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
            Self::Not => write!(f, "not"),
            Self::Nil => write!(f, "nil"),
            Self::In => write!(f, "in"),
            Self::Import => write!(f, "import"),
            Self::Class => write!(f, "class"),
            Self::Is => write!(f, "is"),
            Self::Super => write!(f, "super"),
            Self::If => write!(f, "if"),
            Self::Else => write!(f, "else"),
            Self::True => write!(f, "true"),
            Self::False => write!(f, "false"),
            Self::Fn => write!(f, "fn"),
            Self::For => write!(f, "for"),
            Self::Print => write!(f, "print"),
            Self::Return => write!(f, "return"),
            Self::This => write!(f, "this"),
            Self::Let => write!(f, "let"),
            Self::While => write!(f, "while"),
            Self::Newline => write!(f, "newline"),
            Self::Eof => write!(f, "end of file"),
            Self::Error(_) => write!(f, "error"),
        }
    }
}
