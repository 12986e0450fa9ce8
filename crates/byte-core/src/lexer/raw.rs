//! Normal-mode token recognition, generated with logos
//!
//! Everything outside string literals is matched here by longest match:
//! punctuation and operators, numbers, identifiers, newlines and the quote
//! characters that switch the scanner into string mode. Spaces, tabs,
//! carriage returns and `#` comments are skipped.

use logos::Logos;

use super::{LexError, TokenKind};

/// Raw token recognised by logos before the scanner applies its own state
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"#[^\n]*")]
pub(super) enum RawToken {
    // ========== Delimiters ==========
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,

    // ========== Operators ==========
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("**")]
    StarStar,
    #[token("//")]
    SlashSlash,
    #[token("=")]
    Equal,
    #[token(">")]
    Greater,
    #[token("<")]
    Less,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("|")]
    Pipe,
    #[token("&")]
    Amp,
    #[token("^")]
    Caret,
    #[token("+=")]
    PlusEqual,
    #[token("-=")]
    MinusEqual,
    #[token("*=")]
    StarEqual,
    #[token("/=")]
    SlashEqual,
    #[token("%=")]
    PercentEqual,
    #[token("**=")]
    StarStarEqual,
    #[token("//=")]
    SlashSlashEqual,
    #[token("==")]
    EqualEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("<=")]
    LessEqual,
    #[token("!=")]
    BangEqual,
    #[token("~=")]
    TildeEqual,
    #[token("|=")]
    PipeEqual,
    #[token("&=")]
    AmpEqual,
    #[token("^=")]
    CaretEqual,

    // ========== Literals ==========
    /// Digits, an optional fraction with at least one digit, an optional
    /// exponent with at least one digit. `3.` scans as `3` followed by `.`
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    /// An exponent marker (and sign) with no digits after it
    #[regex(r"[0-9]+(\.[0-9]+)?[eE][+-]?")]
    UnterminatedExponent,

    /// Identifier or keyword; keywords are resolved by the scanner
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    #[token("\"")]
    DoubleQuote,
    #[token("'")]
    SingleQuote,

    #[token("\n")]
    Newline,
}

impl RawToken {
    /// The token kind this raw token scans to when no scanner state applies
    ///
    /// Quotes map to `String`; the scanner replaces them by scanning the
    /// literal. Identifiers still need a keyword lookup.
    pub(super) const fn kind(self) -> TokenKind {
        match self {
            Self::LeftParen => TokenKind::LeftParen,
            Self::RightParen => TokenKind::RightParen,
            Self::LeftBracket => TokenKind::LeftBracket,
            Self::RightBracket => TokenKind::RightBracket,
            Self::LeftBrace => TokenKind::LeftBrace,
            Self::RightBrace => TokenKind::RightBrace,
            Self::Comma => TokenKind::Comma,
            Self::Colon => TokenKind::Colon,
            Self::Semicolon => TokenKind::Semicolon,
            Self::Dot => TokenKind::Dot,
            Self::DotDot => TokenKind::DotDot,
            Self::Plus => TokenKind::Plus,
            Self::Minus => TokenKind::Minus,
            Self::Star => TokenKind::Star,
            Self::Slash => TokenKind::Slash,
            Self::Percent => TokenKind::Percent,
            Self::StarStar => TokenKind::StarStar,
            Self::SlashSlash => TokenKind::SlashSlash,
            Self::Equal => TokenKind::Equal,
            Self::Greater => TokenKind::Greater,
            Self::Less => TokenKind::Less,
            Self::Bang => TokenKind::Bang,
            Self::Tilde => TokenKind::Tilde,
            Self::Pipe => TokenKind::Pipe,
            Self::Amp => TokenKind::Amp,
            Self::Caret => TokenKind::Caret,
            Self::PlusEqual => TokenKind::PlusEqual,
            Self::MinusEqual => TokenKind::MinusEqual,
            Self::StarEqual => TokenKind::StarEqual,
            Self::SlashEqual => TokenKind::SlashEqual,
            Self::PercentEqual => TokenKind::PercentEqual,
            Self::StarStarEqual => TokenKind::StarStarEqual,
            Self::SlashSlashEqual => TokenKind::SlashSlashEqual,
            Self::EqualEqual => TokenKind::EqualEqual,
            Self::GreaterEqual => TokenKind::GreaterEqual,
            Self::LessEqual => TokenKind::LessEqual,
            Self::BangEqual => TokenKind::BangEqual,
            Self::TildeEqual => TokenKind::TildeEqual,
            Self::PipeEqual => TokenKind::PipeEqual,
            Self::AmpEqual => TokenKind::AmpEqual,
            Self::CaretEqual => TokenKind::CaretEqual,
            Self::Number => TokenKind::Number,
            Self::UnterminatedExponent => TokenKind::Error(LexError::UnterminatedExponent),
            Self::Identifier => TokenKind::Identifier,
            Self::DoubleQuote | Self::SingleQuote => TokenKind::String,
            Self::Newline => TokenKind::Newline,
        }
    }
}
