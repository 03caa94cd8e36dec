use client::{
    context::ProverContext,
    pda::{
        find_cache_address,
        find_internal_address,
    },
    program_ids::{
        INSTRUCTIONS_SYSVAR_ID,
        SYSTEM_PROGRAM_ID,
    },
};
use polymer_prover_interface::{
    instructions::{
        parse_eth_address,
        InitializeInstructionData,
        ProverInstruction,
        MAX_CACHED_PROOF_LEN,
    },
    program,
};
use solana_sdk::{
    instruction::AccountMeta,
    message::{
        v0::LoadedAddresses,
        Message,
        VersionedMessage,
    },
    pubkey::Pubkey,
};
use transaction_parser::{
    decode_instructions,
    DecoderConfig,
};

fn authority() -> Pubkey {
    Pubkey::new_from_array([8; 32])
}

fn initialize_data() -> InitializeInstructionData {
    InitializeInstructionData {
        client_type: "proof_api".into(),
        signer_addr: [0x5a; 20],
        peptide_chain_id: 901,
    }
}

#[test]
fn accounts_use_derived_addresses() -> anyhow::Result<()> {
    let ctx = ProverContext::new(authority());
    let cache = find_cache_address(&authority(), &program::ID).0;
    let internal = find_internal_address(&program::ID).0;

    assert_eq!(
        ctx.to_instruction(&ctx.load_proof(vec![1, 2, 3]))?.accounts,
        [
            AccountMeta::new(authority(), true),
            AccountMeta::new(cache, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ]
    );
    assert_eq!(
        ctx.to_instruction(&ctx.initialize(initialize_data()))?.accounts,
        [
            AccountMeta::new(authority(), true),
            AccountMeta::new(internal, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ]
    );
    assert_eq!(
        ctx.to_instruction(&ctx.validate_event())?.accounts,
        [
            AccountMeta::new(authority(), true),
            AccountMeta::new(cache, false),
            AccountMeta::new_readonly(internal, false),
            AccountMeta::new_readonly(INSTRUCTIONS_SYSVAR_ID, false),
        ]
    );
    Ok(())
}

#[test]
fn proof_is_loaded_in_order() -> anyhow::Result<()> {
    let ctx = ProverContext::new(authority());
    let proof = (0..=255u8).cycle().take(2500).collect::<Vec<_>>();
    let chunks = ctx.load_proof_chunks(&proof, 1000)?;

    let reassembled = chunks
        .iter()
        .flat_map(|instruction| match instruction {
            ProverInstruction::LoadProof { data, .. } => data.proof_chunk.clone(),
            other => panic!("Expected LoadProof, got {}", other.tag()),
        })
        .collect::<Vec<_>>();
    assert_eq!(chunks.len(), 3);
    assert_eq!(reassembled, proof);
    Ok(())
}

#[test]
fn proof_must_fit_in_the_cache() -> anyhow::Result<()> {
    let ctx = ProverContext::new(authority());

    let largest = vec![1u8; MAX_CACHED_PROOF_LEN];
    assert_eq!(ctx.load_proof_chunks(&largest, 1000)?.len(), 3);

    let too_large = vec![1u8; MAX_CACHED_PROOF_LEN + 1];
    let error = ctx.load_proof_chunks(&too_large, 1000).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Proof is 3001 bytes but the cache holds at most 3000"
    );
    Ok(())
}

#[test]
fn full_flow_decodes_back_from_a_message() -> anyhow::Result<()> {
    let deployment = Pubkey::new_from_array([77; 32]);
    let ctx = ProverContext::with_program_id(deployment, authority());

    let mut flow = vec![ctx.create_accounts()];
    flow.extend(ctx.load_proof_chunks(&[7; 300], 128)?);
    flow.extend([ctx.validate_event(), ctx.close_accounts()]);

    let message = VersionedMessage::Legacy(Message::new(
        &ctx.to_instructions(&flow)?,
        Some(&ctx.authority),
    ));
    let decoded = decode_instructions(
        &message,
        &LoadedAddresses::default(),
        &DecoderConfig::with_program_id(deployment),
    )?;

    assert_eq!(
        decoded.into_iter().map(|d| d.instruction).collect::<Vec<_>>(),
        flow
    );
    Ok(())
}

#[test]
fn initialize_from_a_hex_signer_address() -> anyhow::Result<()> {
    let ctx = ProverContext::new(authority());
    let signer_addr = parse_eth_address("0x8ba1f109551bD432803012645Ac136ddd64DBA72")?;
    let instruction = ctx.to_instruction(&ctx.initialize(InitializeInstructionData {
        client_type: "proof_api".into(),
        signer_addr,
        peptide_chain_id: 901,
    }))?;

    // discriminator, client_type length prefix, "proof_api"
    let offset = 8 + 4 + 9;
    assert_eq!(instruction.data[offset..offset + 20], signer_addr);
    assert_eq!(signer_addr[0], 0x8b);
    assert_eq!(signer_addr[19], 0x72);
    assert!(parse_eth_address("0x8ba1f109551bD432803012645Ac136ddd64DBA").is_err());
    Ok(())
}
