//! Bytecode chunk - a sequence of instructions with constants and debug info

use super::opcode::OpCode;
use super::value::Value;

/// Maximum number of constants a chunk can hold
///
/// Constant operands are single bytes, so indices run from 0 to 255.
pub const MAX_CONSTANTS: usize = 256;

/// A chunk of bytecode
///
/// Contains the raw bytecode instructions, a constant pool, and line
/// number information for debugging and error messages.
#[derive(Clone, Default)]
pub struct Chunk {
    /// Raw bytecode instructions
    code: Vec<u8>,

    /// Constant pool
    constants: Vec<Value>,

    /// Line number information (run-length encoded)
    /// Each entry is (line_number, count) meaning `count` bytes at this line
    lines: Vec<(u32, u32)>,
}

impl Chunk {
    /// Create a new empty chunk
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of bytes in the chunk
    #[must_use]
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// Returns true if the chunk is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Returns the raw bytecode
    #[must_use]
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// Returns the constant pool
    #[must_use]
    pub fn constants(&self) -> &[Value] {
        &self.constants
    }

    /// Get a constant by index
    #[must_use]
    pub fn get_constant(&self, index: u8) -> Option<&Value> {
        self.constants.get(usize::from(index))
    }

    /// Write a single byte to the chunk
    pub fn write_byte(&mut self, byte: u8, line: u32) {
        self.code.push(byte);
        self.add_line(line, 1);
    }

    /// Write an opcode to the chunk
    pub fn write_op(&mut self, op: OpCode, line: u32) {
        self.write_byte(op as u8, line);
    }

    /// Write an opcode with a u8 operand
    pub fn write_op_u8(&mut self, op: OpCode, operand: u8, line: u32) {
        self.write_byte(op as u8, line);
        self.write_byte(operand, line);
    }

    /// Read a byte at a position
    #[must_use]
    pub fn read_byte(&self, offset: usize) -> Option<u8> {
        self.code.get(offset).copied()
    }

    /// Add a constant to the pool and return its index
    ///
    /// Constants are not deduplicated. Returns `None` once the pool holds
    /// [`MAX_CONSTANTS`] values; the pool is left unchanged in that case.
    pub fn add_constant(&mut self, value: Value) -> Option<u8> {
        let index = u8::try_from(self.constants.len()).ok()?;
        self.constants.push(value);
        Some(index)
    }

    /// Add line information for `count` bytes
    fn add_line(&mut self, line: u32, count: u32) {
        if let Some(last) = self.lines.last_mut() {
            if last.0 == line {
                // Same line, extend the count
                last.1 += count;
                return;
            }
        }
        // New line
        self.lines.push((line, count));
    }

    /// Get the line number for a bytecode offset
    #[must_use]
    pub fn get_line(&self, offset: usize) -> u32 {
        let mut current_offset = 0;
        for (line, count) in &self.lines {
            current_offset += *count as usize;
            if offset < current_offset {
                return *line;
            }
        }
        // Default to last line or 0
        self.lines.last().map_or(0, |(line, _)| *line)
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("code_len", &self.code.len())
            .field("constants_len", &self.constants.len())
            .finish()
    }
}
