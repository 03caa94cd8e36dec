//! The static table mapping each 8-byte discriminator to its instruction kind, names, account
//! schema, and unpack routine.
//!
//! Each discriminator is the first 8 bytes of `sha256("global:<idl_name>")`, the Anchor
//! convention the on-chain program was built with.

use solana_sdk::instruction::AccountMeta;

use crate::{
    accounts::{
        AccountRole,
        InstructionAccounts,
    },
    error::{
        CodecError,
        CodecResult,
    },
    instructions::{
        InitializeAccounts,
        InstructionTag,
        ProofCacheAccounts,
        ProverInstruction,
        ValidateEventAccounts,
        DISCRIMINATOR_LEN,
    },
    pack::{
        ByteReader,
        TrailingBytes,
        Unpack,
    },
};

type UnpackFn =
    fn(&mut ByteReader<'_>, TrailingBytes, &[AccountMeta]) -> CodecResult<ProverInstruction>;

pub struct RegistryEntry {
    pub tag: InstructionTag,
    pub discriminator: [u8; DISCRIMINATOR_LEN],
    /// The display name, e.g. `ClearProofCache`.
    pub name: &'static str,
    /// The name in the program's IDL, e.g. `clear_proof_cache`.
    pub idl_name: &'static str,
    pub accounts: &'static [AccountRole],
    pub(crate) unpack: UnpackFn,
}

impl core::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("tag", &self.tag)
            .field("discriminator", &self.discriminator)
            .field("idl_name", &self.idl_name)
            .finish_non_exhaustive()
    }
}

/// Indexed by `InstructionTag as usize`.
#[rustfmt::skip]
pub static INSTRUCTION_REGISTRY: [RegistryEntry; 6] = [
    RegistryEntry {
        tag: InstructionTag::ClearProofCache,
        discriminator: [201, 199, 110, 50, 133, 117, 40, 35],
        name: "ClearProofCache",
        idl_name: "clear_proof_cache",
        accounts: ProofCacheAccounts::ROLES,
        unpack: |src, trailing, metas| {
            let ((), accounts) = unpack_parts(InstructionTag::ClearProofCache, src, trailing, metas)?;
            Ok(ProverInstruction::ClearProofCache { accounts })
        },
    },
    RegistryEntry {
        tag: InstructionTag::CloseAccounts,
        discriminator: [171, 222, 94, 233, 34, 250, 202, 1],
        name: "CloseAccounts",
        idl_name: "close_accounts",
        accounts: ProofCacheAccounts::ROLES,
        unpack: |src, trailing, metas| {
            let ((), accounts) = unpack_parts(InstructionTag::CloseAccounts, src, trailing, metas)?;
            Ok(ProverInstruction::CloseAccounts { accounts })
        },
    },
    RegistryEntry {
        tag: InstructionTag::CreateAccounts,
        discriminator: [94, 175, 109, 170, 173, 11, 25, 176],
        name: "CreateAccounts",
        idl_name: "create_accounts",
        accounts: ProofCacheAccounts::ROLES,
        unpack: |src, trailing, metas| {
            let ((), accounts) = unpack_parts(InstructionTag::CreateAccounts, src, trailing, metas)?;
            Ok(ProverInstruction::CreateAccounts { accounts })
        },
    },
    RegistryEntry {
        tag: InstructionTag::Initialize,
        discriminator: [175, 175, 109, 31, 13, 152, 155, 237],
        name: "Initialize",
        idl_name: "initialize",
        accounts: InitializeAccounts::ROLES,
        unpack: |src, trailing, metas| {
            let (data, accounts) = unpack_parts(InstructionTag::Initialize, src, trailing, metas)?;
            Ok(ProverInstruction::Initialize { data, accounts })
        },
    },
    RegistryEntry {
        tag: InstructionTag::LoadProof,
        discriminator: [34, 145, 85, 9, 72, 98, 17, 92],
        name: "LoadProof",
        idl_name: "load_proof",
        accounts: ProofCacheAccounts::ROLES,
        unpack: |src, trailing, metas| {
            let (data, accounts) = unpack_parts(InstructionTag::LoadProof, src, trailing, metas)?;
            Ok(ProverInstruction::LoadProof { data, accounts })
        },
    },
    RegistryEntry {
        tag: InstructionTag::ValidateEvent,
        discriminator: [66, 249, 207, 221, 30, 87, 27, 129],
        name: "ValidateEvent",
        idl_name: "validate_event",
        accounts: ValidateEventAccounts::ROLES,
        unpack: |src, trailing, metas| {
            let ((), accounts) = unpack_parts(InstructionTag::ValidateEvent, src, trailing, metas)?;
            Ok(ProverInstruction::ValidateEvent { accounts })
        },
    },
];

/// Unpacks the arguments, applies the trailing byte policy, then maps the accounts.
fn unpack_parts<D: Unpack, A: InstructionAccounts>(
    tag: InstructionTag,
    src: &mut ByteReader<'_>,
    trailing_bytes: TrailingBytes,
    metas: &[AccountMeta],
) -> CodecResult<(D, A)> {
    let data = D::unpack(src)?;
    src.check_trailing(trailing_bytes)?;
    let accounts = A::from_metas(metas).ok_or(CodecError::AccountCountMismatch {
        instruction: tag,
        expected: A::ROLES.len(),
        actual: metas.len(),
    })?;
    Ok((data, accounts))
}

pub fn find_by_discriminator(
    discriminator: &[u8; DISCRIMINATOR_LEN],
) -> Option<&'static RegistryEntry> {
    INSTRUCTION_REGISTRY
        .iter()
        .find(|entry| &entry.discriminator == discriminator)
}

/// Finds an entry by either its display name or its IDL name. Only used for diagnostics.
pub fn find_by_name(name: &str) -> Option<&'static RegistryEntry> {
    INSTRUCTION_REGISTRY
        .iter()
        .find(|entry| entry.name == name || entry.idl_name == name)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn registry_is_indexed_by_tag() {
        assert_eq!(INSTRUCTION_REGISTRY.len(), InstructionTag::iter().count());
        for (i, entry) in INSTRUCTION_REGISTRY.iter().enumerate() {
            assert_eq!(entry.tag as usize, i);
        }
    }

    #[test]
    fn discriminators_and_names_are_unique() {
        let discriminators = INSTRUCTION_REGISTRY
            .iter()
            .map(|e| e.discriminator)
            .collect::<HashSet<_>>();
        let names = INSTRUCTION_REGISTRY
            .iter()
            .flat_map(|e| [e.name, e.idl_name])
            .collect::<HashSet<_>>();
        assert_eq!(discriminators.len(), INSTRUCTION_REGISTRY.len());
        assert_eq!(names.len(), INSTRUCTION_REGISTRY.len() * 2);
    }

    #[test]
    fn lookup_by_name() {
        for entry in INSTRUCTION_REGISTRY.iter() {
            assert_eq!(find_by_name(entry.name).unwrap().tag, entry.tag);
            assert_eq!(find_by_name(entry.idl_name).unwrap().tag, entry.tag);
        }
        assert!(find_by_name("resize_cache").is_none());
    }
}
