//! Colored console output for scripts that build or decode prover instructions.

use std::fmt::Display;

use colored::{
    Color,
    Colorize,
};
use itertools::Itertools;
use polymer_prover_interface::instructions::DecodedInstruction;

use crate::pretty::instruction::PrettyInstruction;

#[derive(Clone, Copy, strum_macros::Display)]
#[strum(serialize_all = "UPPERCASE")]
enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    fn color(self) -> LogColor {
        match self {
            Self::Info => LogColor::Info,
            Self::Success => LogColor::Highlight,
            Self::Warning => LogColor::Warning,
            Self::Error => LogColor::Error,
        }
    }
}

/// The palette shared by the log helpers and the pretty printers.
#[derive(Clone, Copy, Debug)]
pub enum LogColor {
    Highlight,
    Debug,
    Error,
    Warning,
    Info,
    Gray,
    FadedGray,
}

fn format_line(severity: Severity, label: impl Display, msg: impl Display) -> String {
    format!(
        "[{}] {} {}",
        severity.to_string().color(severity.color()),
        label.to_string().color(LogColor::Debug),
        msg.to_string().bright_black()
    )
}

fn log(severity: Severity, label: impl Display, msg: impl Display) {
    println!("{}", format_line(severity, label, msg));
}

fn format_instruction(label: impl Display, instruction: &DecodedInstruction) -> String {
    let pretty = PrettyInstruction {
        instruction,
        indent_size: 4,
    };
    let header = format_line(Severity::Info, label, instruction.instruction.tag());
    format!("{header}\n{pretty}")
}

fn format_error_chain(label: impl Display, error: &anyhow::Error) -> String {
    let causes = error
        .chain()
        .skip(1)
        .map(|cause| format!("    {} {cause}", "caused by:".color(LogColor::FadedGray)));
    std::iter::once(format_line(Severity::Error, label, error))
        .chain(causes)
        .join("\n")
}

/// Prints `instruction` as a tree under an info line.
pub fn log_instruction(label: impl Display, instruction: &DecodedInstruction) {
    println!("{}", format_instruction(label, instruction));
}

/// Prints an error along with every cause beneath it, outermost first.
pub fn log_error_chain(label: impl Display, error: &anyhow::Error) {
    println!("{}", format_error_chain(label, error));
}

#[rustfmt::skip]
mod unformatted {
    use super::*;

    pub fn log_info(label: impl Display, msg: impl Display) { log(Severity::Info, label, msg) }
    pub fn log_success(label: impl Display, msg: impl Display) { log(Severity::Success, label, msg) }
    pub fn log_warning(label: impl Display, msg: impl Display) { log(Severity::Warning, label, msg) }
    pub fn log_error(label: impl Display, msg: impl Display) { log(Severity::Error, label, msg) }
    pub fn log_divider() { println!("{}", "-".repeat(80).color(LogColor::FadedGray)); }

    impl From<LogColor> for Color {
        fn from(value: LogColor) -> Color {
            match value {
                LogColor::Highlight  => Color::TrueColor { r: 255, g: 215, b: 87  },
                LogColor::Debug      => Color::TrueColor { r: 40, g: 100,  b: 153 },
                LogColor::Error      => Color::TrueColor { r: 255, g: 0,   b: 45  },
                LogColor::Warning    => Color::TrueColor { r: 180, g: 105, b: 0   },
                LogColor::Info       => Color::TrueColor { r: 0,   g: 95,  b: 255 },
                LogColor::Gray       => Color::TrueColor { r: 192, g: 192, b: 192 },
                LogColor::FadedGray  => Color::TrueColor { r: 95,  g: 95,  b: 95  },
            }
        }
    }
}

pub use unformatted::*;
