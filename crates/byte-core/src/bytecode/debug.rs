//! Bytecode disassembler for debugging

use super::chunk::Chunk;
use super::opcode::OpCode;
use super::value::Value;
use std::fmt::Write;

/// Disassemble a chunk to a string
pub fn disassemble_chunk(chunk: &Chunk, name: &str) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "== {name} ==");

    let mut offset = 0;
    while offset < chunk.len() {
        offset = disassemble_instruction_to_string(chunk, offset, &mut output);
    }

    output
}

/// Disassemble a single instruction to stdout, returning the next offset
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> usize {
    let mut output = String::new();
    let next = disassemble_instruction_to_string(chunk, offset, &mut output);
    print!("{output}");
    next
}

/// Disassemble a single instruction to a string, returning the next offset
fn disassemble_instruction_to_string(chunk: &Chunk, offset: usize, output: &mut String) -> usize {
    // Print offset
    let _ = write!(output, "{offset:04} ");

    // Print line number (or | if same as previous)
    let line = chunk.get_line(offset);
    if offset > 0 && line == chunk.get_line(offset - 1) {
        let _ = write!(output, "   | ");
    } else {
        let _ = write!(output, "{line:4} ");
    }

    // Read opcode
    let Some(byte) = chunk.read_byte(offset) else {
        let _ = writeln!(output, "Invalid offset");
        return offset + 1;
    };

    let Ok(opcode) = OpCode::try_from(byte) else {
        let _ = writeln!(output, "Unknown opcode {byte}");
        return offset + 1;
    };

    match opcode {
        OpCode::Const => {
            let Some(index) = chunk.read_byte(offset + 1) else {
                let _ = writeln!(output, "{:16} <missing operand>", opcode.name());
                return offset + opcode.size();
            };
            let _ = writeln!(
                output,
                "{:16} {:4} '{}'",
                opcode.name(),
                index,
                format_constant(chunk.get_constant(index))
            );
        }

        OpCode::Neg | OpCode::Add | OpCode::Sub | OpCode::Mul | OpCode::Div | OpCode::Return => {
            let _ = writeln!(output, "{}", opcode.name());
        }
    }

    offset + opcode.size()
}

fn format_constant(constant: Option<&Value>) -> String {
    match constant {
        Some(value) => value.to_string(),
        None => "<invalid>".to_string(),
    }
}
