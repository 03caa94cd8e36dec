use std::fmt::{
    self,
    Display,
    Formatter,
};

use colored::Colorize;
use itertools::Itertools;
use polymer_prover_interface::{
    instructions::{
        eth_address_hex,
        DecodedInstruction,
        ProverInstruction,
    },
    program::PROGRAM_NAME,
};
use solana_sdk::instruction::AccountMeta;

use crate::logs::LogColor;

/// How many proof bytes are shown before the rest is elided.
const PROOF_PREVIEW_LEN: usize = 8;

/// Renders a decoded instruction as a small tree: the instruction name, then one line per argument,
/// then one line per account with its role and signer/writable markers.
pub struct PrettyInstruction<'a> {
    pub instruction: &'a DecodedInstruction,
    /// The amount of spaces preceding each line after the first.
    pub indent_size: usize,
}

impl Display for PrettyInstruction<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let instruction = &self.instruction.instruction;
        let indentation = " ".repeat(self.indent_size);

        let header = format!(
            "{}::{}",
            PROGRAM_NAME.color(LogColor::Debug),
            instruction.tag().to_string().color(LogColor::Highlight)
        );

        let args = instruction_args(instruction)
            .into_iter()
            .map(|(name, value)| {
                let name = format!("{name}:").color(LogColor::Gray);
                format!("{indentation}{name} {value}")
            });

        let role_names = instruction
            .tag()
            .registry_entry()
            .accounts
            .iter()
            .map(|role| role.name)
            .chain(std::iter::repeat("remaining"));
        let metas = self.instruction.account_metas();
        let width = role_names
            .clone()
            .take(metas.len())
            .map(str::len)
            .max()
            .unwrap_or_default();
        let accounts = role_names.zip(&metas).enumerate().map(|(i, (name, meta))| {
            format!(
                "{indentation}{i:>2}. {} {}{}",
                format!("{name:<width$}").color(LogColor::Gray),
                meta.pubkey.to_string().color(LogColor::FadedGray),
                format_markers(meta),
            )
        });

        let mut lines = std::iter::once(header).chain(args).chain(accounts);
        f.write_str(&lines.join("\n"))
    }
}

/// The instruction's arguments as `(name, value)` pairs, in wire order.
fn instruction_args(instruction: &ProverInstruction) -> Vec<(&'static str, String)> {
    match instruction {
        ProverInstruction::Initialize { data, .. } => vec![
            ("client_type", data.client_type.clone()),
            ("signer_addr", eth_address_hex(&data.signer_addr)),
            ("peptide_chain_id", data.peptide_chain_id.to_string()),
        ],
        ProverInstruction::LoadProof { data, .. } => {
            vec![("proof_chunk", format_proof_chunk(&data.proof_chunk))]
        }
        ProverInstruction::ClearProofCache { .. }
        | ProverInstruction::CloseAccounts { .. }
        | ProverInstruction::CreateAccounts { .. }
        | ProverInstruction::ValidateEvent { .. } => vec![],
    }
}

fn format_proof_chunk(chunk: &[u8]) -> String {
    let preview = hex::encode(&chunk[..chunk.len().min(PROOF_PREVIEW_LEN)]);
    let ellipsis = if chunk.len() > PROOF_PREVIEW_LEN { "..." } else { "" };
    format!("{} bytes 0x{preview}{ellipsis}", chunk.len())
}

fn format_markers(meta: &AccountMeta) -> String {
    let markers = [
        meta.is_writable.then(|| "WRITE".color(LogColor::Warning)),
        meta.is_signer.then(|| "SIGNER".color(LogColor::Info)),
    ]
    .into_iter()
    .flatten()
    .join(", ");

    match markers.is_empty() {
        true => markers,
        false => format!(" [{markers}]"),
    }
}
