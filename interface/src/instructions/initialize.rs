use std::fmt::{
    self,
    Display,
    Formatter,
};

use crate::{
    accounts::instruction_accounts,
    error::CodecResult,
    pack::{
        write_prefixed_bytes,
        write_u64,
        ByteReader,
        Pack,
        Unpack,
    },
};

/// The byte length of an Ethereum address.
pub const ETH_ADDRESS_LEN: usize = 20;

instruction_accounts! {
    /// Sets up the program's internal account, which holds the values every proof is validated
    /// against.
    ///
    /// ### Accounts
    ///  0. `[WRITE, SIGNER]` Authority
    ///  1. `[WRITE]` Internal account PDA
    ///  2. `[READ]` System program
    pub struct InitializeAccounts {
        /// Becomes the owner of the internal account.
        authority: (signer = true, writable = true),
        /// The internal account PDA, seeded with `internal`.
        internal: (signer = false, writable = true),
        system_program: (signer = false, writable = false),
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializeInstructionData {
    /// The client type the proofs are generated with on peptide. Part of the proof key.
    pub client_type: String,
    /// The known Ethereum address that signs peptide state roots.
    pub signer_addr: [u8; ETH_ADDRESS_LEN],
    /// The peptide chain ID included in each proof.
    pub peptide_chain_id: u64,
}

/// Instruction data layout:
///   - [0..4]: `client_type` byte length, u32 little-endian
///   - [4..4+n]: `client_type` utf-8 bytes
///   - [4+n..24+n]: `signer_addr`, 20 bytes
///   - [24+n..32+n]: `peptide_chain_id`, u64 little-endian
impl Pack for InitializeInstructionData {
    fn pack_into(&self, dst: &mut Vec<u8>) -> CodecResult<()> {
        write_prefixed_bytes(dst, "client_type", self.client_type.as_bytes())?;
        dst.extend_from_slice(&self.signer_addr);
        write_u64(dst, self.peptide_chain_id);
        Ok(())
    }
}

impl Unpack for InitializeInstructionData {
    fn unpack(src: &mut ByteReader<'_>) -> CodecResult<Self> {
        Ok(Self {
            client_type: src.read_string("client_type")?,
            signer_addr: src.read_array()?,
            peptide_chain_id: src.read_u64()?,
        })
    }
}

impl Display for InitializeInstructionData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "client_type: {}, signer_addr: {}, peptide_chain_id: {}",
            self.client_type,
            eth_address_hex(&self.signer_addr),
            self.peptide_chain_id
        )
    }
}

/// Formats an Ethereum address as `0x`-prefixed lowercase hex.
pub fn eth_address_hex(address: &[u8; ETH_ADDRESS_LEN]) -> String {
    format!("0x{}", hex::encode(address))
}

/// Parses a hex Ethereum address, with or without the `0x` prefix.
///
/// Anything other than exactly 40 hex digits is an error.
pub fn parse_eth_address(address: &str) -> Result<[u8; ETH_ADDRESS_LEN], hex::FromHexError> {
    let digits = address.strip_prefix("0x").unwrap_or(address);
    let mut parsed = [0u8; ETH_ADDRESS_LEN];
    hex::decode_to_slice(digits, &mut parsed)?;
    Ok(parsed)
}
