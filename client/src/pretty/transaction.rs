use std::fmt::{
    self,
    Display,
    Formatter,
};

use colored::Colorize;
use polymer_prover_interface::instructions::DecodedInstruction;
use solana_sdk::message::{
    v0::LoadedAddresses,
    VersionedMessage,
};
use transaction_parser::{
    decode_instructions,
    DecoderConfig,
    ParseError,
};

use crate::{
    logs::LogColor,
    pretty::instruction::PrettyInstruction,
};

/// Renders every prover instruction decoded from a transaction, numbered in message order.
pub struct PrettyTransaction {
    /// The amount of spaces preceding each instruction's detail lines.
    pub indent_size: usize,
    pub instructions: Vec<DecodedInstruction>,
}

impl PrettyTransaction {
    pub fn from_message(
        message: &VersionedMessage,
        loaded_addresses: &LoadedAddresses,
        config: &DecoderConfig,
        indent_size: usize,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            indent_size,
            instructions: decode_instructions(message, loaded_addresses, config)?,
        })
    }
}

impl Display for PrettyTransaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.instructions.is_empty() {
            return write!(f, "{}", "No prover instructions".color(LogColor::FadedGray));
        }

        for (i, instruction) in self.instructions.iter().enumerate() {
            let pretty = PrettyInstruction {
                instruction,
                indent_size: self.indent_size,
            };
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} {pretty}", format_instruction_index(i + 1))?;
        }

        Ok(())
    }
}

fn format_instruction_index(idx: usize) -> String {
    format!("{idx:>2}").color(LogColor::FadedGray).to_string()
}
