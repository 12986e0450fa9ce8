//! Byte CLI - Command-line interface for the Byte programming language

use anyhow::{Context, Result};
use byte_core::lexer::{Scanner, TokenKind};
use byte_core::{compile, disassemble_chunk, Chunk, Diagnostic};
use clap::{Parser, Subcommand};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod repl;

/// Environment variable holding the log filter
const LOG_ENV: &str = "BYTE_LOG";

/// Exit status for source that failed to compile
const EXIT_COMPILE_ERROR: u8 = 65;
/// Exit status for unreadable input
const EXIT_IO_ERROR: u8 = 74;

#[derive(Parser)]
#[command(name = "byte")]
#[command(version = byte_core::VERSION)]
#[command(about = "The Byte programming language", long_about = None)]
struct Cli {
    /// Log filter, e.g. `debug` or `byte_core=trace` (overrides BYTE_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive REPL
    Repl,

    /// Compile a Byte source file
    Compile {
        /// Path to the source file
        file: PathBuf,

        /// Print the disassembled bytecode
        #[arg(long)]
        print_code: bool,
    },

    /// Compile an expression given on the command line
    Eval {
        /// Expression to compile
        expression: String,

        /// Print the disassembled bytecode
        #[arg(long)]
        print_code: bool,
    },

    /// Print the token stream of a Byte source file
    Tokens {
        /// Path to the source file
        file: PathBuf,
    },
}

/// Compilation reported diagnostics, which have already been printed
#[derive(Debug, thiserror::Error)]
#[error("compilation failed with {count} error(s)")]
struct CompileFailed {
    count: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}

fn run(command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Compile { file, print_code }) => compile_file(&file, print_code),
        Some(Commands::Eval {
            expression,
            print_code,
        }) => compile_source(&expression, "eval", print_code),
        Some(Commands::Tokens { file }) => {
            let source = read_source(&file)?;
            print!("{}", token_listing(&source));
            Ok(())
        }
        Some(Commands::Repl) | None => {
            let mut repl = repl::Repl::new()?;
            repl.run()
        }
    }
}

/// Install the stderr subscriber
///
/// `--log-level` wins over `BYTE_LOG`; without either only warnings show.
fn init_tracing(log_level: Option<&str>) {
    let filter = log_level
        .and_then(|level| EnvFilter::try_new(level).ok())
        .or_else(|| EnvFilter::try_from_env(LOG_ENV).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Map a command failure to a process exit status
fn exit_status(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<CompileFailed>().is_some() {
        EXIT_COMPILE_ERROR
    } else if err
        .chain()
        .any(|cause| cause.downcast_ref::<std::io::Error>().is_some())
    {
        EXIT_IO_ERROR
    } else {
        1
    }
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read file '{}'", path.display()))
}

/// Compile a Byte source file
fn compile_file(path: &Path, print_code: bool) -> Result<()> {
    let source = read_source(path)?;
    compile_source(&source, &path.display().to_string(), print_code)
}

/// Compile source, printing diagnostics to stderr and, on request, the
/// disassembly to stdout
fn compile_source(source: &str, name: &str, print_code: bool) -> Result<()> {
    match compile_to_listing(source, name) {
        Ok(listing) => {
            if print_code {
                print!("{listing}");
            }
            Ok(())
        }
        Err(diagnostics) => {
            for diagnostic in &diagnostics {
                eprintln!("{diagnostic}");
            }
            Err(CompileFailed {
                count: diagnostics.len(),
            }
            .into())
        }
    }
}

/// Compile source into a fresh chunk and disassemble it
pub(crate) fn compile_to_listing(source: &str, name: &str) -> Result<String, Vec<Diagnostic>> {
    let mut chunk = Chunk::new();
    compile(source, &mut chunk)?;
    Ok(disassemble_chunk(&chunk, name))
}

/// Render one line per token: line, kind and source text or error message
pub(crate) fn token_listing(source: &str) -> String {
    let mut output = String::new();

    for token in Scanner::tokenize(source) {
        let _ = write!(output, "{:4} {:<16} ", token.line, token.kind.to_string());
        let _ = match token.kind {
            TokenKind::Error(error) => writeln!(output, "{error}"),
            TokenKind::Newline | TokenKind::Eof => writeln!(output),
            _ => writeln!(output, "'{}'", token.lexeme(source)),
        };
    }

    output
}
