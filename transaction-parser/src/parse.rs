use solana_sdk::{
    message::{
        compiled_instruction::CompiledInstruction,
        v0::LoadedAddresses,
        MessageHeader,
        VersionedMessage,
    },
    pubkey::Pubkey,
};

use crate::{
    parsed_account::{
        ParsedAccount,
        ParsedAccounts,
    },
    ParseError,
};

/// Groups accounts by their read/write and signer/non-signer status according to the info in a
/// transaction's [`MessageHeader`]
///
/// ```text
/// where:
///  - n  = account_keys.len()
///  - wr = write
///  - ro = read only
///
/// 0 ------------------------------------------ all accounts -------------------------------------n
/// |-------------------- signers --------------------|---------------- non_signers ---------------|
/// |------ wr_signers ------|------ ro_signers ------|--- wr_non_signers ---|--- ro_non_signers --|
/// 0----------------------- a ---------------------- b -------------------- c --------------------n
/// ```
///
/// Only the static account keys are described by the header; see [`parse_message_accounts`] for
/// the addresses loaded from lookup tables.
pub fn parse_accounts_from_header(
    account_keys: &[Pubkey],
    header: &MessageHeader,
) -> Result<ParsedAccounts, ParseError> {
    let invalid_header = || ParseError::InvalidHeader {
        num_required_signatures: header.num_required_signatures,
        num_readonly_signed_accounts: header.num_readonly_signed_accounts,
        num_readonly_unsigned_accounts: header.num_readonly_unsigned_accounts,
        num_static_accounts: account_keys.len(),
    };

    let n = account_keys.len();
    // Total number of signed accounts.
    let n_signers = header.num_required_signatures as usize;
    // The number of readonly signed accounts.
    let ro_signers = header.num_readonly_signed_accounts as usize;
    // The number of readonly, unsigned accounts.
    let ro_non_signers = header.num_readonly_unsigned_accounts as usize;

    let a = n_signers.checked_sub(ro_signers).ok_or_else(invalid_header)?;
    let b = n_signers;
    let c = n
        .checked_sub(ro_non_signers)
        .filter(|c| *c >= b)
        .ok_or_else(invalid_header)?;

    Ok(account_keys
        .iter()
        .enumerate()
        .map(|(i, pubkey)| ParsedAccount {
            pubkey: *pubkey,
            writable: i < a || (b..c).contains(&i),
            signer: i < b,
        })
        .collect())
}

/// Resolves the full account table of a message: the static keys, then the writable addresses
/// loaded from lookup tables, then the read-only loaded addresses. Instruction account indices
/// point into this table.
///
/// Loaded addresses are never signers.
pub fn parse_message_accounts(
    static_keys: &[Pubkey],
    header: &MessageHeader,
    loaded_addresses: &LoadedAddresses,
) -> Result<ParsedAccounts, ParseError> {
    let statics = parse_accounts_from_header(static_keys, header)?;
    let loaded_writable = loaded_addresses.writable.iter().map(|pubkey| ParsedAccount {
        pubkey: *pubkey,
        writable: true,
        signer: false,
    });
    let loaded_readonly = loaded_addresses.readonly.iter().map(|pubkey| ParsedAccount {
        pubkey: *pubkey,
        writable: false,
        signer: false,
    });

    Ok(statics
        .into_iter()
        .chain(loaded_writable)
        .chain(loaded_readonly)
        .collect())
}

/// A message with its full account table resolved, ready for each instruction's program ID and
/// accounts to be looked up by index.
#[derive(Clone, Debug)]
pub struct ResolvedMessage {
    pub accounts: ParsedAccounts,
    pub instructions: Vec<CompiledInstruction>,
}

impl ResolvedMessage {
    /// Resolves a legacy or v0 message. Legacy messages can't use lookup tables, so callers should
    /// pass [`LoadedAddresses::default()`] for them.
    pub fn new(
        message: &VersionedMessage,
        loaded_addresses: &LoadedAddresses,
    ) -> Result<Self, ParseError> {
        Self::from_parts(
            message.static_account_keys(),
            message.header(),
            loaded_addresses,
            message.instructions().to_vec(),
        )
    }

    pub fn from_parts(
        static_keys: &[Pubkey],
        header: &MessageHeader,
        loaded_addresses: &LoadedAddresses,
        instructions: Vec<CompiledInstruction>,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            accounts: parse_message_accounts(static_keys, header, loaded_addresses)?,
            instructions,
        })
    }
}

/// Looks up an instruction's program ID in the message's account table. `slot` is only used to
/// report failures.
pub fn resolve_program_id(
    slot: usize,
    instruction: &CompiledInstruction,
    parsed_accounts: &ParsedAccounts,
) -> Result<Pubkey, ParseError> {
    let index = instruction.program_id_index;
    parsed_accounts
        .get(index as usize)
        .map(|account| account.pubkey)
        .ok_or(ParseError::ProgramResolutionFailure {
            slot,
            index,
            num_accounts: parsed_accounts.len(),
        })
}

/// Looks up each of an instruction's account indices in the message's account table, keeping
/// their order.
pub fn resolve_accounts(
    slot: usize,
    instruction: &CompiledInstruction,
    parsed_accounts: &ParsedAccounts,
) -> Result<ParsedAccounts, ParseError> {
    instruction
        .accounts
        .iter()
        .map(|&index| {
            parsed_accounts
                .get(index as usize)
                .copied()
                .ok_or(ParseError::AccountResolutionFailure {
                    slot,
                    index,
                    num_accounts: parsed_accounts.len(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(n: u8) -> Vec<Pubkey> {
        (0..n).map(|i| Pubkey::new_from_array([i; 32])).collect()
    }

    fn header(signers: u8, ro_signers: u8, ro_non_signers: u8) -> MessageHeader {
        MessageHeader {
            num_required_signatures: signers,
            num_readonly_signed_accounts: ro_signers,
            num_readonly_unsigned_accounts: ro_non_signers,
        }
    }

    fn flags(accounts: &ParsedAccounts) -> Vec<(bool, bool)> {
        accounts.iter().map(|a| (a.writable, a.signer)).collect()
    }

    #[test]
    fn header_partitions_static_keys() {
        let accounts = parse_accounts_from_header(&keys(6), &header(3, 1, 2)).unwrap();
        assert_eq!(
            flags(&accounts),
            [
                (true, true),
                (true, true),
                (false, true),
                (true, false),
                (false, false),
                (false, false),
            ]
        );
        assert_eq!(accounts.pubkeys(), keys(6));
    }

    #[test]
    fn header_with_no_non_signers() {
        let accounts = parse_accounts_from_header(&keys(2), &header(2, 1, 0)).unwrap();
        assert_eq!(flags(&accounts), [(true, true), (false, true)]);
    }

    #[test]
    fn inconsistent_headers_are_rejected() {
        for bad in [header(1, 2, 0), header(4, 0, 0), header(2, 0, 2)] {
            assert!(matches!(
                parse_accounts_from_header(&keys(3), &bad),
                Err(ParseError::InvalidHeader { .. })
            ));
        }
    }

    #[test]
    fn loaded_addresses_follow_static_keys() {
        let loaded = LoadedAddresses {
            writable: vec![Pubkey::new_from_array([100; 32])],
            readonly: vec![
                Pubkey::new_from_array([101; 32]),
                Pubkey::new_from_array([102; 32]),
            ],
        };
        let accounts = parse_message_accounts(&keys(2), &header(1, 0, 1), &loaded).unwrap();
        assert_eq!(
            flags(&accounts),
            [
                (true, true),
                (false, false),
                (true, false),
                (false, false),
                (false, false),
            ]
        );
        assert_eq!(accounts[2].pubkey, loaded.writable[0]);
        assert_eq!(accounts[4].pubkey, loaded.readonly[1]);
    }
}
