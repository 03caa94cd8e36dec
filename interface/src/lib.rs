//! Instruction interface for the Polymer prover program: the discriminator registry, each
//! instruction's payload and account schema, and the codec that packs and unpacks them.

pub mod accounts;
pub mod error;
pub mod instructions;
pub mod pack;

pub mod program {
    use solana_sdk::pubkey::Pubkey;

    /// The address the prover program is deployed at unless a different one is configured.
    pub const ID: Pubkey = Pubkey::from_str_const("FtdxWoZXZKNYn1Dx9XXDE5hKXWf69tjFJUofNZuaWUH3");

    pub const PROGRAM_NAME: &str = "PolymerProver";
}
