//! Bytecode module for the Byte compiler
//!
//! This module provides:
//! - `OpCode`: The bytecode instruction set
//! - `Value`: Constant values
//! - `Chunk`: A sequence of bytecode instructions with its constant pool
//! - Disassembler utilities for debugging

mod chunk;
mod debug;
mod opcode;
mod value;

pub use chunk::{Chunk, MAX_CONSTANTS};
pub use debug::{disassemble_chunk, disassemble_instruction};
pub use opcode::OpCode;
pub use value::Value;
