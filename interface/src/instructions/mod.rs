use solana_sdk::{
    instruction::{
        AccountMeta,
        Instruction,
    },
    pubkey::Pubkey,
};

use crate::{
    accounts::InstructionAccounts,
    error::{
        CodecError,
        CodecResult,
    },
    pack::{
        ByteReader,
        Pack,
        TrailingBytes,
    },
};

pub mod initialize;
pub mod load_proof;
pub mod proof_cache;
pub mod registry;
pub mod validate_event;

pub use initialize::*;
pub use load_proof::*;
pub use proof_cache::*;
pub use registry::*;
pub use validate_event::*;

/// The byte length of an instruction discriminator.
pub const DISCRIMINATOR_LEN: usize = 8;

/// The kind of a prover instruction, without its payload or accounts.
///
/// The `repr(u8)` value is the kind's index into [`INSTRUCTION_REGISTRY`]; it never appears on the
/// wire. On the wire each kind is identified by its 8-byte [`InstructionTag::discriminator`].
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[derive(strum_macros::Display, strum_macros::EnumIter, strum_macros::IntoStaticStr)]
pub enum InstructionTag {
    ClearProofCache,
    CloseAccounts,
    CreateAccounts,
    Initialize,
    LoadProof,
    ValidateEvent,
}

impl InstructionTag {
    #[inline(always)]
    pub fn registry_entry(self) -> &'static RegistryEntry {
        &INSTRUCTION_REGISTRY[self as usize]
    }

    #[inline(always)]
    pub fn discriminator(self) -> [u8; DISCRIMINATOR_LEN] {
        self.registry_entry().discriminator
    }
}

impl TryFrom<[u8; DISCRIMINATOR_LEN]> for InstructionTag {
    type Error = CodecError;

    fn try_from(discriminator: [u8; DISCRIMINATOR_LEN]) -> Result<Self, Self::Error> {
        find_by_discriminator(&discriminator)
            .map(|entry| entry.tag)
            .ok_or(CodecError::UnknownVariant(discriminator))
    }
}

/// A prover instruction: exactly one operation with its arguments and named accounts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProverInstruction {
    /// Empties the authority's proof cache.
    ClearProofCache { accounts: ProofCacheAccounts },
    /// Closes the authority's proof cache account.
    CloseAccounts { accounts: ProofCacheAccounts },
    /// Creates the authority's proof cache account.
    CreateAccounts { accounts: ProofCacheAccounts },
    /// One-time setup of the program's internal account.
    Initialize {
        data: InitializeInstructionData,
        accounts: InitializeAccounts,
    },
    /// Appends a chunk of proof bytes to the authority's cache.
    LoadProof {
        data: LoadProofInstructionData,
        accounts: ProofCacheAccounts,
    },
    /// Validates the cached proof and clears the cache.
    ValidateEvent { accounts: ValidateEventAccounts },
}

impl ProverInstruction {
    pub fn tag(&self) -> InstructionTag {
        match self {
            Self::ClearProofCache { .. } => InstructionTag::ClearProofCache,
            Self::CloseAccounts { .. } => InstructionTag::CloseAccounts,
            Self::CreateAccounts { .. } => InstructionTag::CreateAccounts,
            Self::Initialize { .. } => InstructionTag::Initialize,
            Self::LoadProof { .. } => InstructionTag::LoadProof,
            Self::ValidateEvent { .. } => InstructionTag::ValidateEvent,
        }
    }

    /// The instruction's accounts in schema order.
    pub fn account_metas(&self) -> Vec<AccountMeta> {
        match self {
            Self::ClearProofCache { accounts }
            | Self::CloseAccounts { accounts }
            | Self::CreateAccounts { accounts }
            | Self::LoadProof { accounts, .. } => accounts.to_metas(),
            Self::Initialize { accounts, .. } => accounts.to_metas(),
            Self::ValidateEvent { accounts } => accounts.to_metas(),
        }
    }

    /// Packs the instruction data and pairs it with the account metas for `program_id`.
    pub fn to_instruction(&self, program_id: Pubkey) -> CodecResult<Instruction> {
        Ok(Instruction {
            program_id,
            accounts: self.account_metas(),
            data: self.pack()?,
        })
    }
}

/// Instruction data layout:
///   - [0..8]: the discriminator
///   - [8..]: the operation's packed arguments, if any
impl Pack for ProverInstruction {
    fn pack_into(&self, dst: &mut Vec<u8>) -> CodecResult<()> {
        dst.extend_from_slice(&self.tag().discriminator());
        match self {
            Self::Initialize { data, .. } => data.pack_into(dst),
            Self::LoadProof { data, .. } => data.pack_into(dst),
            Self::ClearProofCache { .. }
            | Self::CloseAccounts { .. }
            | Self::CreateAccounts { .. }
            | Self::ValidateEvent { .. } => Ok(()),
        }
    }
}

/// A decoded instruction along with any accounts supplied past the end of its account schema.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodedInstruction {
    pub instruction: ProverInstruction,
    pub remaining_accounts: Vec<AccountMeta>,
}

impl DecodedInstruction {
    /// All accounts in their original order: the schema accounts, then the remaining ones.
    pub fn account_metas(&self) -> Vec<AccountMeta> {
        let mut metas = self.instruction.account_metas();
        metas.extend_from_slice(&self.remaining_accounts);
        metas
    }
}

/// Decodes raw instruction data and attaches `accounts` to it by position.
///
/// The steps, in order, and the error each one can produce:
///   1. Split off the discriminator: [`CodecError::TruncatedInput`].
///   2. Look it up in the registry: [`CodecError::UnknownVariant`].
///   3. Unpack the arguments: [`CodecError::TruncatedInput`] or [`CodecError::MalformedPayload`],
///      then [`CodecError::TrailingBytes`] if `trailing_bytes` rejects leftovers.
///   4. Map the accounts onto the schema: [`CodecError::AccountCountMismatch`].
pub fn unpack_instruction(
    accounts: &[AccountMeta],
    data: &[u8],
    trailing_bytes: TrailingBytes,
) -> CodecResult<DecodedInstruction> {
    let mut reader = ByteReader::new(data);
    let discriminator = reader.read_array::<DISCRIMINATOR_LEN>()?;
    let entry = find_by_discriminator(&discriminator)
        .ok_or(CodecError::UnknownVariant(discriminator))?;

    let instruction = (entry.unpack)(&mut reader, trailing_bytes, accounts)?;
    let remaining_accounts = accounts
        .get(entry.accounts.len()..)
        .unwrap_or_default()
        .to_vec();

    Ok(DecodedInstruction {
        instruction,
        remaining_accounts,
    })
}
