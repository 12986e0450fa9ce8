//! Operator precedence and the parse rule table

use crate::bytecode::OpCode;
use crate::lexer::TokenKind;

/// Binding tiers, loosest first
///
/// Only `Term`, `Factor` and `Unary` are reached by the current grammar; the
/// remaining tiers reserve the ordering for operators the scanner already
/// recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    None,
    Assignment,
    Or,
    And,
    Equality,
    Comparison,
    BitOr,
    BitXor,
    BitAnd,
    Range,
    Term,
    Factor,
    Unary,
    Call,
    Primary,
}

impl Precedence {
    /// The next tighter tier, used for the right operand of a
    /// left-associative operator
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Precedence::None => Precedence::Assignment,
            Precedence::Assignment => Precedence::Or,
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::Equality,
            Precedence::Equality => Precedence::Comparison,
            Precedence::Comparison => Precedence::BitOr,
            Precedence::BitOr => Precedence::BitXor,
            Precedence::BitXor => Precedence::BitAnd,
            Precedence::BitAnd => Precedence::Range,
            Precedence::Range => Precedence::Term,
            Precedence::Term => Precedence::Factor,
            Precedence::Factor => Precedence::Unary,
            Precedence::Unary => Precedence::Call,
            Precedence::Call | Precedence::Primary => Precedence::Primary,
        }
    }
}

/// Handlers that can start an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixRule {
    /// `( expression )`
    Grouping,
    /// A prefix operator applied to an operand parsed at `Unary`
    Unary(OpCode),
    /// A numeric literal
    Number,
}

/// Handlers that continue an expression after its left operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixRule {
    /// A left-associative binary operator emitting one opcode
    Binary(OpCode),
}

/// How a token kind behaves in expression position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseRule {
    pub prefix: Option<PrefixRule>,
    pub infix: Option<InfixRule>,
    /// Binding tier of the infix handler, `None` when there is none
    pub precedence: Precedence,
}

impl ParseRule {
    const NONE: Self = Self {
        prefix: None,
        infix: None,
        precedence: Precedence::None,
    };

    const fn prefix(rule: PrefixRule) -> Self {
        Self {
            prefix: Some(rule),
            infix: None,
            precedence: Precedence::None,
        }
    }

    const fn binary(op: OpCode, precedence: Precedence) -> Self {
        Self {
            prefix: None,
            infix: Some(InfixRule::Binary(op)),
            precedence,
        }
    }
}

/// Look up the parse rule for a token kind
#[must_use]
pub const fn rule(kind: TokenKind) -> ParseRule {
    match kind {
        TokenKind::LeftParen => ParseRule::prefix(PrefixRule::Grouping),
        TokenKind::Number => ParseRule::prefix(PrefixRule::Number),
        TokenKind::Minus => ParseRule {
            prefix: Some(PrefixRule::Unary(OpCode::Neg)),
            infix: Some(InfixRule::Binary(OpCode::Sub)),
            precedence: Precedence::Term,
        },
        TokenKind::Plus => ParseRule::binary(OpCode::Add, Precedence::Term),
        TokenKind::Star => ParseRule::binary(OpCode::Mul, Precedence::Factor),
        TokenKind::Slash => ParseRule::binary(OpCode::Div, Precedence::Factor),

        TokenKind::RightParen
        | TokenKind::LeftBracket
        | TokenKind::RightBracket
        | TokenKind::LeftBrace
        | TokenKind::RightBrace
        | TokenKind::Comma
        | TokenKind::Colon
        | TokenKind::Semicolon
        | TokenKind::Dot
        | TokenKind::DotDot
        | TokenKind::Percent
        | TokenKind::StarStar
        | TokenKind::SlashSlash
        | TokenKind::Equal
        | TokenKind::Greater
        | TokenKind::Less
        | TokenKind::Bang
        | TokenKind::Tilde
        | TokenKind::Pipe
        | TokenKind::Amp
        | TokenKind::Caret
        | TokenKind::PlusEqual
        | TokenKind::MinusEqual
        | TokenKind::StarEqual
        | TokenKind::SlashEqual
        | TokenKind::PercentEqual
        | TokenKind::StarStarEqual
        | TokenKind::SlashSlashEqual
        | TokenKind::EqualEqual
        | TokenKind::GreaterEqual
        | TokenKind::LessEqual
        | TokenKind::BangEqual
        | TokenKind::TildeEqual
        | TokenKind::PipeEqual
        | TokenKind::AmpEqual
        | TokenKind::CaretEqual
        | TokenKind::Identifier
        | TokenKind::String
        | TokenKind::Interpolation
        | TokenKind::And
        | TokenKind::Or
        | TokenKind::Not
        | TokenKind::Nil
        | TokenKind::In
        | TokenKind::Import
        | TokenKind::Class
        | TokenKind::Is
        | TokenKind::Super
        | TokenKind::If
        | TokenKind::Else
        | TokenKind::True
        | TokenKind::False
        | TokenKind::Fn
        | TokenKind::For
        | TokenKind::Print
        | TokenKind::Return
        | TokenKind::This
        | TokenKind::Let
        | TokenKind::While
        | TokenKind::Newline
        | TokenKind::Eof
        | TokenKind::Error(_) => ParseRule::NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_ordering() {
        assert!(Precedence::None < Precedence::Assignment);
        assert!(Precedence::Term < Precedence::Factor);
        assert!(Precedence::Factor < Precedence::Unary);
        assert_eq!(Precedence::Term.next(), Precedence::Factor);
        assert_eq!(Precedence::Primary.next(), Precedence::Primary);
    }

    #[test]
    fn next_is_strictly_tighter() {
        let mut tier = Precedence::None;
        while tier != Precedence::Primary {
            assert!(tier.next() > tier);
            tier = tier.next();
        }
    }

    #[test]
    fn arithmetic_rules() {
        assert_eq!(
            rule(TokenKind::Plus),
            ParseRule::binary(OpCode::Add, Precedence::Term)
        );
        assert_eq!(rule(TokenKind::Star).precedence, Precedence::Factor);
        assert_eq!(
            rule(TokenKind::Slash).infix,
            Some(InfixRule::Binary(OpCode::Div))
        );

        let minus = rule(TokenKind::Minus);
        assert_eq!(minus.prefix, Some(PrefixRule::Unary(OpCode::Neg)));
        assert_eq!(minus.infix, Some(InfixRule::Binary(OpCode::Sub)));
        assert_eq!(minus.precedence, Precedence::Term);
    }

    #[test]
    fn prefix_only_rules() {
        assert_eq!(rule(TokenKind::LeftParen).prefix, Some(PrefixRule::Grouping));
        assert_eq!(rule(TokenKind::Number).prefix, Some(PrefixRule::Number));
        assert_eq!(rule(TokenKind::Number).precedence, Precedence::None);
    }

    #[test]
    fn other_tokens_have_no_rule() {
        for kind in [
            TokenKind::RightParen,
            TokenKind::Identifier,
            TokenKind::String,
            TokenKind::Bang,
            TokenKind::Newline,
            TokenKind::Eof,
        ] {
            assert_eq!(rule(kind), ParseRule::NONE, "{kind:?}");
        }
    }
}
