//! Decodes prover instructions out of a transaction already fetched over RPC.

use anyhow::{
    anyhow,
    bail,
    Context,
};
use polymer_prover_interface::instructions::DecodedInstruction;
use solana_sdk::{
    bs58,
    message::{
        compiled_instruction::CompiledInstruction,
        v0::LoadedAddresses,
    },
    pubkey::Pubkey,
};
use solana_transaction_status::{
    option_serializer::OptionSerializer,
    EncodedConfirmedTransactionWithStatusMeta,
    EncodedTransaction,
    UiMessage,
    UiRawMessage,
    UiTransaction,
};
use solana_transaction_status_client_types::{
    UiCompiledInstruction,
    UiLoadedAddresses,
};

use crate::{
    DecodeProverInstructions,
    DecoderConfig,
    ResolvedMessage,
};

/// Decodes the prover instructions of an RPC-encoded transaction.
///
/// Binary encodings and the raw JSON encoding are supported. The `jsonParsed` encoding has already
/// lost the instruction account indices and is rejected.
pub fn decode_encoded_transaction(
    encoded: &EncodedConfirmedTransactionWithStatusMeta,
    config: &DecoderConfig,
) -> anyhow::Result<Vec<DecodedInstruction>> {
    let transaction = &encoded.transaction;
    let loaded_addresses = match transaction.meta.as_ref().map(|m| &m.loaded_addresses) {
        Some(OptionSerializer::Some(addresses)) => {
            parse_loaded_addresses(addresses).context("Failed to parse loaded addresses")?
        }
        _ => LoadedAddresses::default(),
    };

    let message = resolve_encoded_message(&transaction.transaction, &loaded_addresses)
        .with_context(|| format!("Failed to resolve transaction in slot {}", encoded.slot))?;

    message
        .decode_prover_instructions(config)
        .with_context(|| format!("Failed to decode transaction in slot {}", encoded.slot))
}

fn resolve_encoded_message(
    transaction: &EncodedTransaction,
    loaded_addresses: &LoadedAddresses,
) -> anyhow::Result<ResolvedMessage> {
    match transaction {
        EncodedTransaction::Json(UiTransaction {
            message: UiMessage::Raw(raw),
            ..
        }) => resolve_raw_message(raw, loaded_addresses),
        EncodedTransaction::Json(UiTransaction {
            message: UiMessage::Parsed(_),
            ..
        }) => bail!("Parsed JSON messages don't carry account indices; fetch a raw encoding"),
        encoded => {
            let versioned = encoded
                .decode()
                .ok_or_else(|| anyhow!("Unable to decode the binary transaction"))?;
            Ok(ResolvedMessage::new(&versioned.message, loaded_addresses)?)
        }
    }
}

fn resolve_raw_message(
    raw: &UiRawMessage,
    loaded_addresses: &LoadedAddresses,
) -> anyhow::Result<ResolvedMessage> {
    let static_keys = parse_pubkeys(&raw.account_keys).context("Invalid static account key")?;
    let instructions = raw
        .instructions
        .iter()
        .map(compiled_from_ui)
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(ResolvedMessage::from_parts(
        &static_keys,
        &raw.header,
        loaded_addresses,
        instructions,
    )?)
}

fn compiled_from_ui(instruction: &UiCompiledInstruction) -> anyhow::Result<CompiledInstruction> {
    Ok(CompiledInstruction {
        program_id_index: instruction.program_id_index,
        accounts: instruction.accounts.clone(),
        data: bs58::decode(&instruction.data)
            .into_vec()
            .context("Instruction data isn't valid base58")?,
    })
}

fn parse_loaded_addresses(addresses: &UiLoadedAddresses) -> anyhow::Result<LoadedAddresses> {
    Ok(LoadedAddresses {
        writable: parse_pubkeys(&addresses.writable)?,
        readonly: parse_pubkeys(&addresses.readonly)?,
    })
}

fn parse_pubkeys(keys: &[String]) -> anyhow::Result<Vec<Pubkey>> {
    keys.iter()
        .map(|key| {
            key.parse::<Pubkey>()
                .with_context(|| format!("Invalid pubkey {key}"))
        })
        .collect()
}
