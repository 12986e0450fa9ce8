//! Constant values stored in a chunk's constant pool

use std::fmt;

/// A value the compiler can place in the constant pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Double-precision number
    Number(f64),
}

impl Value {
    /// Returns the numeric payload, if this value is a number
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
        }
    }
}
