use std::fmt::{
    self,
    Display,
    Formatter,
};

use crate::instructions::InstructionTag;

/// Every way packing or unpacking a prover instruction can fail. None of these are transient; the
/// same input always produces the same error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CodecError {
    /// Fewer bytes were available than a fixed-width read required.
    TruncatedInput { needed: usize, available: usize },
    /// The leading 8 bytes don't match any registered instruction.
    UnknownVariant([u8; 8]),
    /// A field was present but structurally invalid.
    MalformedPayload {
        field: &'static str,
        reason: MalformedReason,
    },
    /// Bytes were left over after the payload was fully read and the decoder rejects them.
    TrailingBytes { remaining: usize },
    /// Fewer accounts were supplied than the instruction's account schema requires.
    AccountCountMismatch {
        instruction: InstructionTag,
        expected: usize,
        actual: usize,
    },
    /// A variable-length field is too long for its `u32` length prefix.
    LengthOverflow { field: &'static str },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MalformedReason {
    /// The length prefix claims more bytes than remain in the buffer.
    LengthExceedsBuffer { length: usize, remaining: usize },
    InvalidUtf8,
}

impl From<&CodecError> for &'static str {
    fn from(value: &CodecError) -> Self {
        match value {
            CodecError::TruncatedInput { .. } => "Not enough bytes passed",
            CodecError::UnknownVariant(_) => "Invalid instruction discriminator",
            CodecError::MalformedPayload { .. } => "Malformed instruction payload",
            CodecError::TrailingBytes { .. } => "Unexpected trailing bytes",
            CodecError::AccountCountMismatch { .. } => "Not enough accounts passed",
            CodecError::LengthOverflow { .. } => "Field too long to length-prefix",
        }
    }
}

impl Display for MalformedReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthExceedsBuffer { length, remaining } => {
                write!(f, "length prefix {length} exceeds the {remaining} remaining bytes")
            }
            Self::InvalidUtf8 => f.write_str("invalid utf-8"),
        }
    }
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let summary: &'static str = self.into();
        match self {
            Self::TruncatedInput { needed, available } => {
                write!(f, "{summary}: needed {needed}, got {available}")
            }
            Self::UnknownVariant(discriminator) => {
                write!(f, "{summary}: {discriminator:02x?}")
            }
            Self::MalformedPayload { field, reason } => write!(f, "{summary}: `{field}` {reason}"),
            Self::TrailingBytes { remaining } => write!(f, "{summary}: {remaining} bytes"),
            Self::AccountCountMismatch {
                instruction,
                expected,
                actual,
            } => write!(f, "{summary}: {instruction} needs {expected}, got {actual}"),
            Self::LengthOverflow { field } => write!(f, "{summary}: `{field}`"),
        }
    }
}

impl std::error::Error for CodecError {}

pub type CodecResult<T> = Result<T, CodecError>;
