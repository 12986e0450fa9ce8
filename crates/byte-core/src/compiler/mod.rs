//! Single-pass Pratt compiler for the Byte programming language
//!
//! The compiler pulls tokens from the [`Scanner`] on demand and emits
//! bytecode directly into a [`Chunk`]; no syntax tree is built. Each
//! expression is parsed by precedence climbing driven by the table in
//! [`rules`].

mod diagnostic;
mod rules;

pub use diagnostic::{Diagnostic, DiagnosticKind, Location};
pub use rules::{rule, InfixRule, ParseRule, Precedence, PrefixRule};

use tracing::{debug, trace};

use crate::bytecode::{Chunk, OpCode, Value, MAX_CONSTANTS};
use crate::lexer::{LexError, Scanner, Span, Token, TokenKind};

/// Maximum number of sub-expressions open at once
///
/// Each level of grouping, negation or right operand holds one level while
/// it is parsed.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Compile one expression from `source` into `chunk`
///
/// Returns every diagnostic reported if compilation failed. The chunk may
/// then hold partial bytecode and must not be executed.
///
/// Input after the expression is not examined.
///
/// # Errors
///
/// Returns the diagnostics reported during compilation, in source order.
pub fn compile(source: &str, chunk: &mut Chunk) -> Result<(), Vec<Diagnostic>> {
    debug!(source_len = source.len(), "compiling");

    let mut parser = Parser::new(source, chunk);
    parser.advance();
    parser.expression();
    parser.end();
    parser.finish()
}

/// Per-call compilation state
///
/// Owns the scanner and borrows the target chunk for the duration of one
/// [`compile`] call, so independent compiles never share state.
struct Parser<'src, 'chunk> {
    source: &'src str,
    scanner: Scanner<'src>,
    chunk: &'chunk mut Chunk,
    current: Token,
    previous: Token,
    /// Open `parse_precedence` calls below the outermost one
    depth: usize,
    /// Set on the first syntax diagnostic; suppresses further ones
    panic_mode: bool,
    /// Set on any diagnostic; never cleared
    had_error: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<'src, 'chunk> Parser<'src, 'chunk> {
    fn new(source: &'src str, chunk: &'chunk mut Chunk) -> Self {
        let start = Token::new(TokenKind::Eof, Span::default(), 1);
        Self {
            source,
            scanner: Scanner::new(source),
            chunk,
            current: start,
            previous: start,
            depth: 0,
            panic_mode: false,
            had_error: false,
            diagnostics: Vec::new(),
        }
    }

    // ==================== Token Stream ====================

    /// Shift `current` into `previous` and scan the next token
    ///
    /// Error tokens are reported here and never reach the grammar.
    fn advance(&mut self) {
        self.previous = self.current;

        loop {
            self.current = self.scanner.next_token();
            trace!(kind = ?self.current.kind, line = self.current.line, "token");

            let TokenKind::Error(error) = self.current.kind else {
                break;
            };
            self.lexical_error(self.current, error);
        }
    }

    /// Consume the current token if it has the given kind, or report
    fn consume(&mut self, kind: TokenKind, error: DiagnosticKind) {
        if self.current.kind == kind {
            self.advance();
        } else {
            self.error_at_current(error);
        }
    }

    // ==================== Expression Parsing (Pratt Parser) ====================

    fn expression(&mut self) {
        self.parse_precedence(Precedence::Assignment);
    }

    /// Parse an expression whose operators bind at least as tightly as
    /// `precedence`
    fn parse_precedence(&mut self, precedence: Precedence) {
        if self.depth > MAX_NESTING_DEPTH {
            self.error_at_current(DiagnosticKind::NestingTooDeep {
                max: MAX_NESTING_DEPTH,
            });
            return;
        }
        let Some(prefix) = rule(self.current.kind).prefix else {
            self.error_at_current(DiagnosticKind::ExpectedExpression);
            return;
        };

        self.depth += 1;
        self.advance();
        self.prefix(prefix);

        loop {
            let next = rule(self.current.kind);
            let Some(infix) = next.infix else { break };
            if next.precedence < precedence {
                break;
            }
            self.advance();
            self.infix(infix);
        }
        self.depth -= 1;
    }

    fn prefix(&mut self, rule: PrefixRule) {
        match rule {
            PrefixRule::Grouping => self.grouping(),
            PrefixRule::Unary(op) => self.unary(op),
            PrefixRule::Number => self.number(),
        }
    }

    fn infix(&mut self, rule: InfixRule) {
        match rule {
            InfixRule::Binary(op) => self.binary(op),
        }
    }

    fn grouping(&mut self) {
        self.expression();
        self.consume(
            TokenKind::RightParen,
            DiagnosticKind::ExpectedAfter {
                expected: ")",
                context: "expression",
            },
        );
    }

    fn unary(&mut self, op: OpCode) {
        let line = self.previous.line;
        self.parse_precedence(Precedence::Unary);
        self.chunk.write_op(op, line);
    }

    fn binary(&mut self, op: OpCode) {
        let operator = self.previous;
        self.parse_precedence(rule(operator.kind).precedence.next());
        self.chunk.write_op(op, operator.line);
    }

    fn number(&mut self) {
        let lexeme = self.previous.lexeme(self.source);
        match lexeme.parse::<f64>() {
            Ok(value) => self.emit_constant(Value::Number(value)),
            Err(_) => self.error(DiagnosticKind::InvalidNumber),
        }
    }

    // ==================== Emission ====================

    fn emit_constant(&mut self, value: Value) {
        let index = self.make_constant(value);
        self.chunk
            .write_op_u8(OpCode::Const, index, self.previous.line);
    }

    /// Add a constant to the pool, reporting overflow against the literal
    ///
    /// Index 0 stands in for a constant that did not fit so compilation can
    /// carry on.
    fn make_constant(&mut self, value: Value) -> u8 {
        if let Some(index) = self.chunk.add_constant(value) {
            index
        } else {
            self.error(DiagnosticKind::TooManyConstants { max: MAX_CONSTANTS });
            0
        }
    }

    fn end(&mut self) {
        self.chunk.write_op(OpCode::Return, self.previous.line);

        #[cfg(feature = "print-code")]
        if !self.had_error {
            tracing::debug!(
                target: "byte_core::code",
                "\n{}",
                crate::bytecode::disassemble_chunk(self.chunk, "code")
            );
        }
    }

    fn finish(self) -> Result<(), Vec<Diagnostic>> {
        debug!(
            bytes = self.chunk.len(),
            constants = self.chunk.constants().len(),
            diagnostics = self.diagnostics.len(),
            "compiled"
        );

        if self.had_error {
            Err(self.diagnostics)
        } else {
            Ok(())
        }
    }

    // ==================== Diagnostics ====================

    fn error(&mut self, kind: DiagnosticKind) {
        self.error_at(self.previous, kind);
    }

    fn error_at_current(&mut self, kind: DiagnosticKind) {
        self.error_at(self.current, kind);
    }

    /// Report a syntax or resource diagnostic unless already panicking
    fn error_at(&mut self, token: Token, kind: DiagnosticKind) {
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;

        let location = match token.kind {
            TokenKind::Eof => Location::End,
            TokenKind::Newline => Location::Newline,
            TokenKind::String => Location::String,
            TokenKind::Interpolation => Location::Interpolation,
            _ => Location::Lexeme(token.lexeme(self.source).to_string()),
        };
        self.report(Diagnostic::new(kind, token.line, location, token.span));
    }

    /// Report a scanner error
    ///
    /// Independent scanner errors are all reported, so these bypass panic
    /// mode.
    fn lexical_error(&mut self, token: Token, error: LexError) {
        self.report(Diagnostic::new(
            error.into(),
            token.line,
            Location::Omitted,
            token.span,
        ));
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        trace!(%diagnostic, "diagnostic");
        self.had_error = true;
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile_ok(source: &str) -> Chunk {
        let mut chunk = Chunk::new();
        let result = compile(source, &mut chunk);
        assert!(result.is_ok(), "compile failed: {result:?}");
        chunk
    }

    fn compile_err(source: &str) -> Vec<Diagnostic> {
        let mut chunk = Chunk::new();
        compile(source, &mut chunk).expect_err("compile should fail")
    }

    fn constants(chunk: &Chunk) -> Vec<f64> {
        chunk
            .constants()
            .iter()
            .filter_map(Value::as_number)
            .collect()
    }

    fn op(op: OpCode) -> u8 {
        op as u8
    }

    #[test]
    fn compile_number() {
        let chunk = compile_ok("42");
        assert_eq!(constants(&chunk), vec![42.0]);
        assert_eq!(chunk.code(), &[op(OpCode::Const), 0, op(OpCode::Return)]);
    }

    #[test]
    fn multiplication_binds_tighter() {
        let chunk = compile_ok("1 + 2 * 3");
        assert_eq!(constants(&chunk), vec![1.0, 2.0, 3.0]);
        assert_eq!(
            chunk.code(),
            &[
                op(OpCode::Const),
                0,
                op(OpCode::Const),
                1,
                op(OpCode::Const),
                2,
                op(OpCode::Mul),
                op(OpCode::Add),
                op(OpCode::Return),
            ]
        );
    }

    #[test]
    fn grouping_overrides_precedence() {
        let chunk = compile_ok("(1 + 2) * 3");
        assert_eq!(
            chunk.code(),
            &[
                op(OpCode::Const),
                0,
                op(OpCode::Const),
                1,
                op(OpCode::Add),
                op(OpCode::Const),
                2,
                op(OpCode::Mul),
                op(OpCode::Return),
            ]
        );
    }

    #[test]
    fn unary_binds_to_its_operand() {
        let chunk = compile_ok("-1 + 2");
        assert_eq!(
            chunk.code(),
            &[
                op(OpCode::Const),
                0,
                op(OpCode::Neg),
                op(OpCode::Const),
                1,
                op(OpCode::Add),
                op(OpCode::Return),
            ]
        );
    }

    #[test]
    fn same_tier_is_left_associative() {
        // (8 - 4) - 2
        let chunk = compile_ok("8 - 4 - 2");
        assert_eq!(
            chunk.code(),
            &[
                op(OpCode::Const),
                0,
                op(OpCode::Const),
                1,
                op(OpCode::Sub),
                op(OpCode::Const),
                2,
                op(OpCode::Sub),
                op(OpCode::Return),
            ]
        );
    }

    #[test]
    fn double_negation() {
        let chunk = compile_ok("--3");
        assert_eq!(
            chunk.code(),
            &[
                op(OpCode::Const),
                0,
                op(OpCode::Neg),
                op(OpCode::Neg),
                op(OpCode::Return),
            ]
        );
    }

    #[test]
    fn number_literal_forms() {
        let chunk = compile_ok("1e-5 + 1E+5 + 2.5");
        assert_eq!(constants(&chunk), vec![1e-5, 1e5, 2.5]);
    }

    #[test]
    fn missing_expression_at_token() {
        let diagnostics = compile_err(")");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].to_string(),
            "[line 1] SyntaxError at ')': expected an expression"
        );
    }

    #[test]
    fn missing_expression_at_end() {
        let diagnostics = compile_err("1 +");
        assert_eq!(
            diagnostics[0].to_string(),
            "[line 1] SyntaxError at end: expected an expression"
        );
        assert_eq!(compile_err("")[0].location, Location::End);
    }

    #[test]
    fn missing_expression_at_newline() {
        let diagnostics = compile_err("1 +\n2");
        assert_eq!(
            diagnostics[0].to_string(),
            "[line 1] SyntaxError at newline: expected an expression"
        );
    }

    #[test]
    fn unclosed_group() {
        let diagnostics = compile_err("(1 + 2");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::ExpectedAfter {
                expected: ")",
                context: "expression",
            }
        );
        assert_eq!(diagnostics[0].location, Location::End);
    }

    #[test]
    fn panic_mode_suppresses_cascades() {
        // Only the innermost failure is reported
        let diagnostics = compile_err("((");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::ExpectedExpression);
    }

    #[test]
    fn independent_lexical_errors_are_all_reported() {
        let mut chunk = Chunk::new();
        let diagnostics = compile("1 @ + ` 2", &mut chunk).unwrap_err();
        assert_eq!(
            diagnostics
                .iter()
                .map(|d| d.kind.clone())
                .collect::<Vec<_>>(),
            vec![
                DiagnosticKind::Lexical(LexError::UnexpectedChar('@')),
                DiagnosticKind::Lexical(LexError::UnexpectedChar('`')),
            ]
        );
        // The error tokens were skipped, so the expression itself compiled
        assert_eq!(constants(&chunk), vec![1.0, 2.0]);
    }

    #[test]
    fn lexical_error_does_not_suppress_syntax_error() {
        let diagnostics = compile_err("@ )");
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].is_lexical());
        assert_eq!(diagnostics[0].location, Location::Omitted);
        assert_eq!(diagnostics[1].kind, DiagnosticKind::ExpectedExpression);
    }

    #[test]
    fn syntax_error_does_not_suppress_lexical_error() {
        let diagnostics = compile_err(") @");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::ExpectedExpression);

        // The scanner error sits inside a group that is still being parsed
        let diagnostics = compile_err("(1 @ @");
        assert_eq!(diagnostics.len(), 3);
        assert!(diagnostics[0].is_lexical());
        assert!(diagnostics[1].is_lexical());
        assert_eq!(diagnostics[2].location, Location::End);
    }

    #[test]
    fn constant_pool_overflow() {
        let source = vec!["1"; MAX_CONSTANTS + 1].join(" + ");
        let mut chunk = Chunk::new();
        let diagnostics = compile(&source, &mut chunk).unwrap_err();

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::TooManyConstants { max: MAX_CONSTANTS }
        );
        assert_eq!(diagnostics[0].location, Location::Lexeme("1".to_string()));
        assert_eq!(chunk.constants().len(), MAX_CONSTANTS);

        // The literal that did not fit loads index 0
        let code = chunk.code();
        let last_const = code.len() - 4;
        assert_eq!(code[last_const], op(OpCode::Const));
        assert_eq!(code[last_const + 1], 0);
    }

    #[test]
    fn string_tokens_are_described_by_kind() {
        let diagnostics = compile_err("''");
        assert_eq!(diagnostics[0].location, Location::String);
        assert_eq!(
            diagnostics[0].to_string(),
            "[line 1] SyntaxError at string: expected an expression"
        );

        let diagnostics = compile_err("1 + '${2}'");
        assert_eq!(
            diagnostics[0].to_string(),
            "[line 1] SyntaxError at interpolation: expected an expression"
        );
    }

    #[test]
    fn nesting_up_to_the_limit_compiles() {
        let source = format!(
            "{}1{}",
            "(".repeat(MAX_NESTING_DEPTH),
            ")".repeat(MAX_NESTING_DEPTH)
        );
        compile_ok(&source);
        compile_ok(&format!("{}1", "-".repeat(MAX_NESTING_DEPTH)));

        let diagnostics = compile_err(&format!("({source})"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::NestingTooDeep {
                max: MAX_NESTING_DEPTH
            }
        );
        // Reported at the innermost operand
        assert_eq!(diagnostics[0].location, Location::Lexeme("1".to_string()));
    }

    #[test]
    fn deep_nesting_is_reported_not_overflowed() {
        let depth = 100_000;
        let groups = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        let diagnostics = compile_err(&groups);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::NestingTooDeep {
                max: MAX_NESTING_DEPTH
            }
        );

        let negations = format!("{}1", "-".repeat(depth));
        let diagnostics = compile_err(&negations);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::NestingTooDeep {
                max: MAX_NESTING_DEPTH
            }
        );
    }

    #[test]
    fn trailing_input_is_ignored() {
        let chunk = compile_ok("1 2");
        assert_eq!(constants(&chunk), vec![1.0]);
    }

    #[test]
    fn lines_are_recorded() {
        let mut chunk = Chunk::new();
        let _ = compile("\n\n-1", &mut chunk);
        // The leading newlines are not an expression, so only RETURN is
        // emitted, on the line of the last consumed token
        assert_eq!(chunk.code(), &[op(OpCode::Return)]);

        let chunk = compile_ok("(1 + 2)");
        assert!((0..chunk.len()).all(|offset| chunk.get_line(offset) == 1));
    }

    #[test]
    fn parser_flags() {
        let mut chunk = Chunk::new();
        let mut parser = Parser::new("@ )", &mut chunk);
        parser.advance();
        assert!(parser.had_error);
        assert!(!parser.panic_mode);

        parser.expression();
        assert!(parser.panic_mode);
        assert_eq!(parser.diagnostics.len(), 2);
    }
}
