use crate::{
    error::CodecResult,
    pack::{
        write_prefixed_bytes,
        ByteReader,
        Pack,
        Unpack,
    },
};

/// The largest proof the on-chain cache account can hold. Proofs bigger than a single transaction
/// are split into chunks and sent across several `LoadProof` instructions.
pub const MAX_CACHED_PROOF_LEN: usize = 3000;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoadProofInstructionData {
    /// The next chunk of proof bytes, appended to whatever the cache already holds.
    pub proof_chunk: Vec<u8>,
}

/// Instruction data layout:
///   - [0..4]: `proof_chunk` byte length, u32 little-endian
///   - [4..4+n]: `proof_chunk` bytes
impl Pack for LoadProofInstructionData {
    fn pack_into(&self, dst: &mut Vec<u8>) -> CodecResult<()> {
        write_prefixed_bytes(dst, "proof_chunk", &self.proof_chunk)
    }
}

impl Unpack for LoadProofInstructionData {
    fn unpack(src: &mut ByteReader<'_>) -> CodecResult<Self> {
        Ok(Self {
            proof_chunk: src.read_prefixed_bytes("proof_chunk")?.to_vec(),
        })
    }
}

/// Splits `proof` into consecutive `LoadProof` payloads of at most `chunk_len` bytes each.
///
/// An empty proof produces no chunks.
pub fn chunk_proof(proof: &[u8], chunk_len: usize) -> Vec<LoadProofInstructionData> {
    proof
        .chunks(chunk_len.max(1))
        .map(|chunk| LoadProofInstructionData {
            proof_chunk: chunk.to_vec(),
        })
        .collect()
}
