//! REPL (Read-Compile-Print Loop) for Byte
//!
//! Each line is compiled into a fresh chunk and its disassembly printed.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::{compile_to_listing, token_listing};

/// REPL prompt shown at the start of each line
const PROMPT: &str = "> ";
/// History file name
const HISTORY_FILE: &str = ".byte_history";

/// Result of processing a REPL command
#[derive(Debug, PartialEq, Eq)]
enum CommandResult {
    /// Not a command; compile the input
    Continue,
    /// Exit the REPL
    Exit,
    /// Input was handled as a command (no further compilation needed)
    Handled,
}

/// The Byte REPL
pub struct Repl {
    editor: DefaultEditor,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new() -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        // Load history if available
        if let Some(home) = home_dir() {
            let history_path = home.join(HISTORY_FILE);
            let _ = editor.load_history(&history_path);
        }

        Ok(Self { editor })
    }

    /// Run the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!("Byte v{}", byte_core::VERSION);
        println!("Type :help for help, :quit to exit");
        println!();

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line.as_str());

                    match handle_command(&line) {
                        CommandResult::Exit => break,
                        CommandResult::Handled => continue,
                        CommandResult::Continue => {}
                    }

                    compile_and_print(&line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error reading input: {err}");
                    break;
                }
            }
        }

        // Save history
        if let Some(home) = home_dir() {
            let history_path = home.join(HISTORY_FILE);
            let _ = self.editor.save_history(&history_path);
        }

        Ok(())
    }
}

fn compile_and_print(line: &str) {
    match compile_to_listing(line, "repl") {
        Ok(listing) => print!("{listing}"),
        Err(diagnostics) => {
            for diagnostic in diagnostics {
                eprintln!("{diagnostic}");
            }
        }
    }
}

/// Handle REPL commands (starting with :)
fn handle_command(input: &str) -> CommandResult {
    let trimmed = input.trim();

    if !trimmed.starts_with(':') {
        return CommandResult::Continue;
    }

    let cmd = trimmed.trim_start_matches(':').trim();
    let (cmd_name, args) = cmd.split_once(' ').unwrap_or((cmd, ""));

    match cmd_name.to_lowercase().as_str() {
        "quit" | "q" | "exit" => CommandResult::Exit,

        "help" | "h" | "?" => {
            print_help();
            CommandResult::Handled
        }

        "tokens" | "t" => {
            if args.trim().is_empty() {
                println!("Usage: :tokens <source>");
            } else {
                print!("{}", token_listing(args.trim()));
            }
            CommandResult::Handled
        }

        _ => {
            println!("Unknown command: :{cmd_name}");
            println!("Type :help for available commands");
            CommandResult::Handled
        }
    }
}

fn print_help() {
    println!(
        r"
Byte REPL Commands:
  :help, :h, :?       Show this help message
  :quit, :q, :exit    Exit the REPL
  :tokens <source>    Show the tokens of <source>

Tips:
  - Each line is compiled on its own and its bytecode is printed
  - Press Ctrl+C to cancel current input
  - Press Ctrl+D to exit
  - Use up/down arrows for history

Examples:
  > -1 + 2 * 3
  > :tokens 'total: ${{x}}'
"
    );
}

/// Get the user's home directory
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
