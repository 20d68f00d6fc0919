//! The fixed operator vocabulary.

use std::fmt;

/// One of the operators the engine knows how to resolve.
///
/// The set is closed: new operator kinds cannot be registered at runtime,
/// only new type capabilities for the kinds below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// Unary arithmetic negation (`-x`).
    Negate,
    /// Unary bitwise complement (`~x`).
    BitwiseNot,
    /// Binary addition (`+`).
    Add,
    /// Binary subtraction (`-`).
    Subtract,
    /// Binary multiplication (`*`).
    Multiply,
    /// Binary division (`/`).
    Divide,
    /// Bitwise or (`|`).
    BitwiseOr,
    /// Bitwise and (`&`).
    BitwiseAnd,
    /// Bitwise xor (`^`).
    BitwiseXor,
    /// Equality (`==`).
    Equal,
    /// Inequality (`!=`).
    NotEqual,
    /// Greater-than (`>`).
    GreaterThan,
    /// Less-than (`<`).
    LessThan,
    /// Greater-than-or-equal (`>=`).
    GreaterThanOrEqual,
    /// Less-than-or-equal (`<=`).
    LessThanOrEqual,
    /// Explicit conversion between two types.
    Convert,
    /// The zero (default/identity) value of a type.
    ZeroValue,
}

/// The operand shape a kind resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpShape {
    /// One operand, same-typed result.
    Unary,
    /// Two operands, explicit result type.
    Binary,
    /// Two operands, boolean result.
    Predicate,
    /// A source and a target type.
    Conversion,
    /// No operands; produces a value.
    Producer,
}

impl OpKind {
    pub(crate) fn shape(self) -> OpShape {
        match self {
            OpKind::Negate | OpKind::BitwiseNot => OpShape::Unary,
            OpKind::Add
            | OpKind::Subtract
            | OpKind::Multiply
            | OpKind::Divide
            | OpKind::BitwiseOr
            | OpKind::BitwiseAnd
            | OpKind::BitwiseXor => OpShape::Binary,
            OpKind::Equal
            | OpKind::NotEqual
            | OpKind::GreaterThan
            | OpKind::LessThan
            | OpKind::GreaterThanOrEqual
            | OpKind::LessThanOrEqual => OpShape::Predicate,
            OpKind::Convert => OpShape::Conversion,
            OpKind::ZeroValue => OpShape::Producer,
        }
    }

    /// The operator's source-level spelling, used in diagnostics.
    pub fn symbol(self) -> &'static str {
        match self {
            OpKind::Negate => "-",
            OpKind::BitwiseNot => "~",
            OpKind::Add => "+",
            OpKind::Subtract => "-",
            OpKind::Multiply => "*",
            OpKind::Divide => "/",
            OpKind::BitwiseOr => "|",
            OpKind::BitwiseAnd => "&",
            OpKind::BitwiseXor => "^",
            OpKind::Equal => "==",
            OpKind::NotEqual => "!=",
            OpKind::GreaterThan => ">",
            OpKind::LessThan => "<",
            OpKind::GreaterThanOrEqual => ">=",
            OpKind::LessThanOrEqual => "<=",
            OpKind::Convert => "convert",
            OpKind::ZeroValue => "zero",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes() {
        assert_eq!(OpKind::Negate.shape(), OpShape::Unary);
        assert_eq!(OpKind::Add.shape(), OpShape::Binary);
        assert_eq!(OpKind::LessThan.shape(), OpShape::Predicate);
        assert_eq!(OpKind::Convert.shape(), OpShape::Conversion);
        assert_eq!(OpKind::ZeroValue.shape(), OpShape::Producer);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", OpKind::Add), "+");
        assert_eq!(format!("{}", OpKind::GreaterThanOrEqual), ">=");
        assert_eq!(format!("{}", OpKind::Convert), "convert");
    }
}
