//! Scanner for the Byte programming language
//!
//! The scanner produces one token per call, on demand, handling:
//! - Punctuation and operators by maximal munch
//! - Numeric literals with optional fraction and exponent
//! - Identifiers and keywords
//! - String literals delimited by `'` or `"`, with `${...}` interpolation
//! - `#` line comments
//!
//! Tokens never own text; they carry a [`Span`] into the source buffer.

#![allow(clippy::cast_possible_truncation)] // We intentionally use u32 for spans; files > 4GB are unsupported

mod raw;
mod span;
mod token;

pub use span::Span;
pub use token::{LexError, Token, TokenKind};

use logos::Logos;
use raw::RawToken;

/// Maximum depth of `${...}` nesting within one string literal
pub const MAX_INTERPOLATION_NESTING: usize = 8;

/// The Byte scanner
///
/// State is mutated only by [`Scanner::next_token`]: the cursor, the current
/// line and the stack of quote characters whose strings are waiting to be
/// resumed when an interpolated expression ends.
pub struct Scanner<'src> {
    source: &'src str,
    /// Current position in the source (byte offset)
    position: usize,
    /// 1-based line of the current position
    line: u32,
    /// Quote characters of strings suspended by `${`
    interpolating: Vec<u8>,
    /// Open `${` beyond the stack's capacity; their `}` close no string
    overflowed: usize,
}

impl<'src> Scanner<'src> {
    /// Create a new scanner for the given source code
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            interpolating: Vec::with_capacity(MAX_INTERPOLATION_NESTING),
            overflowed: 0,
        }
    }

    /// Tokenize the entire source, including the trailing `Eof` token
    #[must_use]
    pub fn tokenize(source: &'src str) -> Vec<Token> {
        let mut scanner = Scanner::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = scanner.next_token();
            tokens.push(token);
            if token.kind == TokenKind::Eof {
                break;
            }
        }
        tokens
    }

    /// Number of strings currently suspended by an interpolation
    #[must_use]
    pub fn interpolation_depth(&self) -> usize {
        self.interpolating.len()
    }

    /// Returns true once the whole source has been consumed
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Get the next token
    ///
    /// After the end of input this keeps returning `Eof`.
    pub fn next_token(&mut self) -> Token {
        let source = self.source;
        let remaining = &source[self.position..];
        let mut lexer = RawToken::lexer(remaining);

        let Some(result) = lexer.next() else {
            // Only blanks and comments were left
            self.position = self.source.len();
            return self.make_token(TokenKind::Eof, self.position, self.position);
        };

        // span is relative to remaining slice, accounting for skipped blanks
        let span_range = lexer.span();
        let start = self.position + span_range.start;
        let end = self.position + span_range.end;

        match result {
            Ok(RawToken::DoubleQuote) => {
                self.position = end;
                self.string(b'"', start)
            }
            Ok(RawToken::SingleQuote) => {
                self.position = end;
                self.string(b'\'', start)
            }
            Ok(RawToken::RightBrace) if self.overflowed > 0 => {
                self.position = end;
                self.overflowed -= 1;
                self.make_token(TokenKind::RightBrace, start, end)
            }
            Ok(RawToken::RightBrace) => {
                self.position = end;
                match self.interpolating.pop() {
                    Some(quote) => self.string(quote, start),
                    None => self.make_token(TokenKind::RightBrace, start, end),
                }
            }
            Ok(RawToken::Identifier) => {
                self.position = end;
                let kind =
                    TokenKind::keyword(&remaining[span_range]).unwrap_or(TokenKind::Identifier);
                self.make_token(kind, start, end)
            }
            Ok(RawToken::Newline) => {
                self.position = end;
                let token = self.make_token(TokenKind::Newline, start, end);
                self.line += 1;
                token
            }
            Ok(raw) => {
                self.position = end;
                self.make_token(raw.kind(), start, end)
            }
            Err(()) => {
                // Error recovery: skip the invalid character
                let Some(invalid_char) = source[start..].chars().next() else {
                    self.position = self.source.len();
                    return self.make_token(TokenKind::Eof, self.position, self.position);
                };
                self.position = start + invalid_char.len_utf8();
                self.make_token(
                    TokenKind::Error(LexError::UnexpectedChar(invalid_char)),
                    start,
                    self.position,
                )
            }
        }
    }

    fn make_token(&self, kind: TokenKind, start: usize, end: usize) -> Token {
        Token::new(kind, Span::from_range(start..end), self.line)
    }

    /// Scan string content up to the closing `quote` or the next `${`
    ///
    /// `open` is the offset of the opening quote, or of the `}` that resumed
    /// this string; error tokens span from there.
    fn string(&mut self, quote: u8, open: usize) -> Token {
        let source = self.source;
        let bytes = source.as_bytes();
        let start = self.position;
        let line = self.line;

        while let Some(&c) = bytes.get(self.position) {
            match c {
                c if c == quote => {
                    let token = Token::new(
                        TokenKind::String,
                        Span::from_range(start..self.position),
                        line,
                    );
                    self.position += 1;
                    return token;
                }
                b'\\' if is_escaped(bytes.get(self.position + 1).copied(), quote) => {
                    // Escapes pass through undecoded
                    self.position += 2;
                }
                b'$' if bytes.get(self.position + 1) == Some(&b'{') => {
                    let content = Span::from_range(start..self.position);
                    self.position += 2;

                    if self.interpolating.len() < MAX_INTERPOLATION_NESTING {
                        self.interpolating.push(quote);
                        return Token::new(TokenKind::Interpolation, content, line);
                    }

                    self.overflowed += 1;
                    return Token::new(
                        TokenKind::Error(LexError::InterpolationTooDeep {
                            max: MAX_INTERPOLATION_NESTING,
                            excess: self.overflowed,
                        }),
                        Span::from_range(open..self.position),
                        line,
                    );
                }
                b'\n' => {
                    self.line += 1;
                    self.position += 1;
                }
                _ => self.position += 1,
            }
        }

        Token::new(
            TokenKind::Error(LexError::UnterminatedString),
            Span::from_range(open..self.position),
            line,
        )
    }
}

/// Whether `next` forms an escape sequence after a backslash
fn is_escaped(next: Option<u8>, quote: u8) -> bool {
    matches!(next, Some(c) if c == quote || c == b'\\' || c == b'$')
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}
