//! Authority-level context holding the derived prover accounts and helpers for building each
//! prover instruction.

use anyhow::{
    bail,
    Context,
};
use polymer_prover_interface::{
    instructions::{
        chunk_proof,
        InitializeAccounts,
        InitializeInstructionData,
        LoadProofInstructionData,
        MAX_CACHED_PROOF_LEN,
        ProofCacheAccounts,
        ProverInstruction,
        ValidateEventAccounts,
    },
    program,
};
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
};

use crate::{
    pda::{
        find_cache_address,
        find_internal_address,
    },
    program_ids::{
        INSTRUCTIONS_SYSVAR_ID,
        SYSTEM_PROGRAM_ID,
    },
};

pub struct ProverContext {
    pub program_id: Pubkey,
    pub authority: Pubkey,
    /// The authority's proof cache PDA.
    pub cache_account: Pubkey,
    /// The program-wide internal account PDA.
    pub internal: Pubkey,
}

impl ProverContext {
    /// Derives the PDAs for `authority` under the default program ID.
    pub fn new(authority: Pubkey) -> Self {
        Self::with_program_id(program::ID, authority)
    }

    pub fn with_program_id(program_id: Pubkey, authority: Pubkey) -> Self {
        Self {
            program_id,
            authority,
            cache_account: find_cache_address(&authority, &program_id).0,
            internal: find_internal_address(&program_id).0,
        }
    }

    pub fn proof_cache_accounts(&self) -> ProofCacheAccounts {
        ProofCacheAccounts::new(self.authority, self.cache_account, SYSTEM_PROGRAM_ID)
    }

    pub fn create_accounts(&self) -> ProverInstruction {
        ProverInstruction::CreateAccounts {
            accounts: self.proof_cache_accounts(),
        }
    }

    pub fn clear_proof_cache(&self) -> ProverInstruction {
        ProverInstruction::ClearProofCache {
            accounts: self.proof_cache_accounts(),
        }
    }

    pub fn close_accounts(&self) -> ProverInstruction {
        ProverInstruction::CloseAccounts {
            accounts: self.proof_cache_accounts(),
        }
    }

    pub fn initialize(&self, data: InitializeInstructionData) -> ProverInstruction {
        ProverInstruction::Initialize {
            data,
            accounts: InitializeAccounts::new(self.authority, self.internal, SYSTEM_PROGRAM_ID),
        }
    }

    pub fn load_proof(&self, proof_chunk: Vec<u8>) -> ProverInstruction {
        ProverInstruction::LoadProof {
            data: LoadProofInstructionData { proof_chunk },
            accounts: self.proof_cache_accounts(),
        }
    }

    /// Builds the `LoadProof` instructions that load `proof` into the cache `chunk_len` bytes at a
    /// time, in order.
    ///
    /// Fails if `proof` is larger than the cache account can hold.
    pub fn load_proof_chunks(
        &self,
        proof: &[u8],
        chunk_len: usize,
    ) -> anyhow::Result<Vec<ProverInstruction>> {
        if proof.len() > MAX_CACHED_PROOF_LEN {
            bail!(
                "Proof is {} bytes but the cache holds at most {MAX_CACHED_PROOF_LEN}",
                proof.len()
            );
        }

        Ok(chunk_proof(proof, chunk_len)
            .into_iter()
            .map(|data| ProverInstruction::LoadProof {
                data,
                accounts: self.proof_cache_accounts(),
            })
            .collect())
    }

    pub fn validate_event(&self) -> ProverInstruction {
        ProverInstruction::ValidateEvent {
            accounts: ValidateEventAccounts::new(
                self.authority,
                self.cache_account,
                self.internal,
                INSTRUCTIONS_SYSVAR_ID,
            ),
        }
    }

    /// Encodes `instruction` for this context's program.
    pub fn to_instruction(&self, instruction: &ProverInstruction) -> anyhow::Result<Instruction> {
        instruction
            .to_instruction(self.program_id)
            .with_context(|| format!("Failed to encode {} instruction", instruction.tag()))
    }

    /// Encodes each instruction in order, failing on the first that can't be encoded.
    pub fn to_instructions(
        &self,
        instructions: &[ProverInstruction],
    ) -> anyhow::Result<Vec<Instruction>> {
        instructions
            .iter()
            .map(|instruction| self.to_instruction(instruction))
            .collect()
    }
}
