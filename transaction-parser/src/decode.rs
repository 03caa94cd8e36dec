//! See [`DecodeProverInstructions`].

use log::{
    debug,
    trace,
};
use polymer_prover_interface::{
    instructions::{
        unpack_instruction,
        DecodedInstruction,
    },
    pack::TrailingBytes,
    program,
};
use solana_sdk::{
    message::{
        v0::LoadedAddresses,
        VersionedMessage,
    },
    pubkey::Pubkey,
};

use crate::{
    resolve_accounts,
    resolve_program_id,
    ParseError,
    ParsedAccounts,
    ResolvedMessage,
};

/// Which program's instructions a batch decode picks out and how strictly their data is read.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecoderConfig {
    /// Instructions targeting any other program are skipped.
    pub program_id: Pubkey,
    pub trailing_bytes: TrailingBytes,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            program_id: program::ID,
            trailing_bytes: TrailingBytes::default(),
        }
    }
}

impl DecoderConfig {
    /// The default config pointed at a different deployment of the prover program.
    pub fn with_program_id(program_id: Pubkey) -> Self {
        Self {
            program_id,
            ..Default::default()
        }
    }
}

/// A trait for decoding prover instructions out of a sequence of instruction slots. Implementors
/// provide per-slot accessors and get a fail-fast batch decode that keeps message order.
pub trait DecodeProverInstructions {
    fn num_slots(&self) -> usize;

    fn program_id(&self, slot: usize) -> Result<Pubkey, ParseError>;

    fn accounts(&self, slot: usize) -> Result<ParsedAccounts, ParseError>;

    fn data(&self, slot: usize) -> &[u8];

    /// Decodes every slot that targets `config.program_id`, stopping at the first failure.
    /// Accounts are only resolved for the slots that are decoded.
    fn decode_prover_instructions(
        &self,
        config: &DecoderConfig,
    ) -> Result<Vec<DecodedInstruction>, ParseError> {
        let mut decoded = vec![];
        for slot in 0..self.num_slots() {
            let program_id = self.program_id(slot)?;
            if program_id != config.program_id {
                trace!("Skipping instruction {slot} for program {program_id}");
                continue;
            }

            let metas = self.accounts(slot)?.account_metas();
            let instruction = unpack_instruction(&metas, self.data(slot), config.trailing_bytes)
                .map_err(|source| ParseError::Decode { slot, source })?;
            debug!("Decoded instruction {slot}: {}", instruction.instruction.tag());
            decoded.push(instruction);
        }

        Ok(decoded)
    }
}

impl DecodeProverInstructions for ResolvedMessage {
    fn num_slots(&self) -> usize {
        self.instructions.len()
    }

    fn program_id(&self, slot: usize) -> Result<Pubkey, ParseError> {
        resolve_program_id(slot, &self.instructions[slot], &self.accounts)
    }

    fn accounts(&self, slot: usize) -> Result<ParsedAccounts, ParseError> {
        resolve_accounts(slot, &self.instructions[slot], &self.accounts)
    }

    fn data(&self, slot: usize) -> &[u8] {
        &self.instructions[slot].data
    }
}

/// Resolves `message` against its loaded addresses and decodes its prover instructions.
///
/// Legacy messages can't use lookup tables; pass [`LoadedAddresses::default()`] for them.
pub fn decode_instructions(
    message: &VersionedMessage,
    loaded_addresses: &LoadedAddresses,
    config: &DecoderConfig,
) -> Result<Vec<DecodedInstruction>, ParseError> {
    ResolvedMessage::new(message, loaded_addresses)?.decode_prover_instructions(config)
}
