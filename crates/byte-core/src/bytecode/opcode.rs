//! Bytecode instruction set for the Byte compiler

/// Bytecode operation codes
///
/// This is a stack-based instruction set. Arithmetic operations pop their
/// operands from the stack and push the result back onto it, so an
/// operator's instruction always follows the instructions of its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// Push a constant from the constant pool onto the stack
    /// Operand: u8 constant index
    Const = 0,

    /// Negate the top of stack
    Neg = 1,

    // ===== Arithmetic =====
    /// Pop b, pop a, push a + b
    Add = 2,

    /// Pop b, pop a, push a - b
    Sub = 3,

    /// Pop b, pop a, push a * b
    Mul = 4,

    /// Pop b, pop a, push a / b
    Div = 5,

    /// Return from the current chunk
    Return = 6,
}

impl OpCode {
    /// Every opcode, in discriminant order
    pub const ALL: [OpCode; 7] = [
        OpCode::Const,
        OpCode::Neg,
        OpCode::Add,
        OpCode::Sub,
        OpCode::Mul,
        OpCode::Div,
        OpCode::Return,
    ];

    /// Returns the size of this instruction in bytes (including operands)
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            OpCode::Const => 2,
            OpCode::Neg
            | OpCode::Add
            | OpCode::Sub
            | OpCode::Mul
            | OpCode::Div
            | OpCode::Return => 1,
        }
    }

    /// Returns the name of this opcode for disassembly
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            OpCode::Const => "CONST",
            OpCode::Neg => "NEG",
            OpCode::Add => "ADD",
            OpCode::Sub => "SUB",
            OpCode::Mul => "MUL",
            OpCode::Div => "DIV",
            OpCode::Return => "RETURN",
        }
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<OpCode> for u8 {
    fn from(op: OpCode) -> Self {
        op as u8
    }
}

impl TryFrom<u8> for OpCode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OpCode::Const),
            1 => Ok(OpCode::Neg),
            2 => Ok(OpCode::Add),
            3 => Ok(OpCode::Sub),
            4 => Ok(OpCode::Mul),
            5 => Ok(OpCode::Div),
            6 => Ok(OpCode::Return),
            _ => Err(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_size_consistency() {
        assert_eq!(OpCode::Const.size(), 2);
        for op in OpCode::ALL.into_iter().skip(1) {
            assert_eq!(op.size(), 1, "OpCode {op:?} has invalid size");
        }
    }

    #[test]
    fn opcode_roundtrip() {
        for op in OpCode::ALL {
            assert_eq!(OpCode::try_from(u8::from(op)), Ok(op));
        }
        assert_eq!(OpCode::try_from(7), Err(7));
        assert_eq!(OpCode::try_from(255), Err(255));
    }

    #[test]
    fn opcode_names() {
        assert_eq!(OpCode::Const.name(), "CONST");
        assert_eq!(OpCode::Neg.to_string(), "NEG");
        assert_eq!(OpCode::Return.name(), "RETURN");
    }
}
