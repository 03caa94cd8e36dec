use std::fmt::{
    self,
    Display,
    Formatter,
};

use polymer_prover_interface::error::CodecError;

/// Why a message couldn't be resolved or one of its prover instructions couldn't be decoded.
///
/// `slot` is always the index of the instruction within the message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The message header's signer and read-only counts don't fit its static account keys.
    InvalidHeader {
        num_required_signatures: u8,
        num_readonly_signed_accounts: u8,
        num_readonly_unsigned_accounts: u8,
        num_static_accounts: usize,
    },
    /// An instruction's program ID index points past the message's account keys.
    ProgramResolutionFailure {
        slot: usize,
        index: u8,
        num_accounts: usize,
    },
    /// One of an instruction's account indices points past the message's account keys.
    AccountResolutionFailure {
        slot: usize,
        index: u8,
        num_accounts: usize,
    },
    /// The instruction targets the prover program but its data or accounts didn't decode.
    Decode { slot: usize, source: CodecError },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHeader {
                num_required_signatures,
                num_readonly_signed_accounts,
                num_readonly_unsigned_accounts,
                num_static_accounts,
            } => write!(
                f,
                "Invalid message header: {num_required_signatures} signers \
                 ({num_readonly_signed_accounts} read-only), {num_readonly_unsigned_accounts} \
                 read-only non-signers, {num_static_accounts} static accounts"
            ),
            Self::ProgramResolutionFailure {
                slot,
                index,
                num_accounts,
            } => write!(
                f,
                "Instruction {slot}: program ID index {index} out of range for {num_accounts} \
                 accounts"
            ),
            Self::AccountResolutionFailure {
                slot,
                index,
                num_accounts,
            } => write!(
                f,
                "Instruction {slot}: account index {index} out of range for {num_accounts} \
                 accounts"
            ),
            Self::Decode { slot, source } => {
                write!(f, "Instruction {slot}: unable to decode instruction: {source}")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}
