use crate::Width;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The divisor supplied to a division was zero before any masking was applied.
    #[error("division by zero")]
    DivisionByZero,

    /// The requested operand width cannot be represented. Products are twice the operand width
    /// and must fit in 128 bits.
    #[error("unsupported width {bits}: expected 1 to {max} bits", max = Width::MAX_BITS)]
    UnsupportedWidth { bits: u32 },

    /// The name does not identify any of the supported operations.
    #[error("unknown operation {0:?}")]
    UnknownOperation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
