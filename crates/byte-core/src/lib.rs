//! Byte Core - Front end of the Byte programming language
//!
//! This crate provides:
//! - Lexer: On-demand scanning of source code, including string interpolation
//! - Compiler: Single-pass Pratt compilation of expressions to bytecode
//! - Bytecode: Instruction set, chunks with constant pools, disassembly
//!
//! ```
//! use byte_core::{compile, Chunk};
//!
//! let mut chunk = Chunk::new();
//! compile("(1 + 2) * 3", &mut chunk).unwrap();
//! assert_eq!(chunk.constants().len(), 3);
//! ```

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lexer module - tokenization of Byte source code
pub mod lexer;

/// Bytecode module - instruction set, chunks and disassembler
pub mod bytecode;

/// Compiler module - expressions to bytecode
pub mod compiler;

/// Convenience re-export of the scanner
pub use lexer::Scanner;

/// Convenience re-export of the compiler entry point and its diagnostics
pub use compiler::{compile, Diagnostic, DiagnosticKind};

/// Convenience re-export of bytecode types
pub use bytecode::{disassemble_chunk, Chunk, OpCode, Value};

/// Compile one expression into a fresh chunk
///
/// # Errors
///
/// Returns every diagnostic reported if compilation failed.
pub fn compile_to_chunk(source: &str) -> Result<Chunk, Vec<Diagnostic>> {
    let mut chunk = Chunk::new();
    compile(source, &mut chunk)?;
    Ok(chunk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn compile_to_chunk_and_disassemble() {
        let chunk = compile_to_chunk("-1 + 2").unwrap();
        let listing = disassemble_chunk(&chunk, "expr");
        assert!(listing.starts_with("== expr ==\n"));
        assert!(listing.contains("NEG"));
        assert!(listing.contains("ADD"));
        assert!(listing.trim_end().ends_with("RETURN"));
    }

    #[test]
    fn compile_to_chunk_reports_diagnostics() {
        let diagnostics = compile_to_chunk("1 *").unwrap_err();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::ExpectedExpression);
    }

    #[test]
    fn independent_compiles_do_not_interfere() {
        let mut first = Chunk::new();
        let mut second = Chunk::new();
        compile("1 + 2", &mut first).unwrap();
        compile("3", &mut second).unwrap();
        compile("4 * 5", &mut first).unwrap();

        assert_eq!(second.constants(), &[Value::Number(3.0)]);
        assert_eq!(first.constants().len(), 4);
    }
}
